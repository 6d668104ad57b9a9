// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gate counts for two-level circuits built from minimized forms.
//!
//! Each output is implemented as one gate per term feeding a single combining gate (AND
//! terms into an OR for DNF, OR clauses into an AND for CNF). Inverters on the inputs are
//! shared by every output.

use crate::cover::Cover;
use std::fmt;

const TRANSISTORS_PER_INVERTER: usize = 2;
const TRANSISTORS_PER_GATE: usize = 4;
const TRANSISTORS_PER_GATE_INPUT: usize = 2;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CircuitCost {
    /// One inverter per input variable.
    pub inverters: usize,
    /// Gates implementing individual terms. Single-literal terms need no gate.
    pub term_gates: usize,
    /// Inputs over all term gates.
    pub term_inputs: usize,
    /// Gates combining the terms of each output. Outputs with one term need none.
    pub combining_gates: usize,
    /// Inputs over all combining gates.
    pub combining_inputs: usize,
}

impl CircuitCost {
    /// Computes the cost of implementing every cover in `outputs` over `variable_count`
    /// shared inputs.
    pub fn of_outputs<'a>(
        variable_count: usize,
        outputs: impl IntoIterator<Item = &'a Cover>,
    ) -> Self {
        let mut cost = Self {
            inverters: variable_count,
            ..Self::default()
        };
        for cover in outputs {
            for cube in cover.iter() {
                let inputs = cube.literal_count();
                if inputs > 1 {
                    cost.term_gates += 1;
                    cost.term_inputs += inputs;
                }
            }
            if cover.cube_count() > 1 {
                cost.combining_gates += 1;
                cost.combining_inputs += cover.cube_count();
            }
        }
        cost
    }

    #[inline]
    pub fn gates(&self) -> usize {
        self.term_gates + self.combining_gates
    }

    /// An estimate of the transistor count: 2 per inverter, and 4 per gate plus 2 per gate
    /// input.
    pub fn transistors(&self) -> usize {
        self.inverters * TRANSISTORS_PER_INVERTER
            + self.gates() * TRANSISTORS_PER_GATE
            + (self.term_inputs + self.combining_inputs) * TRANSISTORS_PER_GATE_INPUT
    }
}

impl fmt::Display for CircuitCost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} inverters, {} term gates ({} inputs), {} combining gates ({} inputs), ~{} transistors",
            self.inverters,
            self.term_gates,
            self.term_inputs,
            self.combining_gates,
            self.combining_inputs,
            self.transistors()
        )
    }
}
