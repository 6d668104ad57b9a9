// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{details::FixtureDetails, value_generator::ValueGenerator};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use logic_reduce::{
    cube::MAX_INPUTS, karnaugh::GRID_VARIABLES, logic_function::MIN_VARIABLES, Form,
    LogicFunction, Method, MinimizeError,
};
use once_cell::sync::Lazy;
use proptest::prelude::*;

pub struct AllFixtures {
    dir: Utf8PathBuf,
    fixtures: Vec<FixtureDetails>,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

/// Totals over a batch of randomly generated functions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RandomCheckSummary {
    pub functions: usize,
    pub dnf_literals: usize,
    pub cnf_literals: usize,
    /// Functions whose DNF has fewer literals than their CNF.
    pub dnf_smaller: usize,
}

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
        let dir = manifest_dir
            .parent()
            .unwrap_or(manifest_dir)
            .join("data");
        Self {
            dir,
            fixtures: reference_fixtures().expect("reference fixtures are valid"),
        }
    }

    /// The directory reference outputs are written to.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn fixtures(&self) -> &[FixtureDetails] {
        &self.fixtures
    }

    pub fn fixture(&self, name: &str) -> Option<&FixtureDetails> {
        self.fixtures.iter().find(|fixture| fixture.name == name)
    }

    /// Checks every named fixture.
    pub fn check_all(&self) -> Result<()> {
        for fixture in &self.fixtures {
            fixture.check()?;
            log::info!("{}: ok", fixture.name);
        }
        Ok(())
    }

    /// Minimizes `count` random functions into both forms and checks that each result is
    /// equivalent to its function.
    ///
    /// `variable_count` fixes the number of variables; otherwise it varies per function.
    pub fn check_random(
        count: usize,
        variable_count: Option<usize>,
        seed: &str,
        method: Method,
    ) -> Result<RandomCheckSummary> {
        if let Some(variable_count) = variable_count {
            if !(MIN_VARIABLES..=MAX_INPUTS).contains(&variable_count) {
                bail!(
                    "variable count {} is outside {}..={}",
                    variable_count,
                    MIN_VARIABLES,
                    MAX_INPUTS
                );
            }
        }
        if method == Method::Karnaugh && variable_count != Some(GRID_VARIABLES) {
            bail!(
                "the karnaugh method needs exactly {} variables",
                GRID_VARIABLES
            );
        }

        let mut value_gen = ValueGenerator::from_seed(seed);
        let mut summary = RandomCheckSummary::default();
        for _ in 0..count {
            let mut gen = value_gen.partial_clone();
            let function = gen.generate(any_with::<LogicFunction>(variable_count))?;

            let mut literals = [0; 2];
            for (ix, form) in [Form::Dnf, Form::Cnf].into_iter().enumerate() {
                let minimized = function
                    .minimize(form, method)
                    .wrap_err_with(|| format!("minimizing {:?}", function.on_set()))?;
                minimized
                    .check_equivalent(&function)
                    .wrap_err_with(|| format!("{} of {:?}", form, function.on_set()))?;
                literals[ix] = minimized.implicants().literal_count();
            }

            summary.functions += 1;
            summary.dnf_literals += literals[0];
            summary.cnf_literals += literals[1];
            if literals[0] < literals[1] {
                summary.dnf_smaller += 1;
            }
        }

        log::info!(
            "checked {} functions: {} DNF literals, {} CNF literals, DNF smaller for {}",
            summary.functions,
            summary.dnf_literals,
            summary.cnf_literals,
            summary.dnf_smaller
        );
        Ok(summary)
    }

    /// Writes the rendered minimized forms of every fixture to the data directory.
    pub fn write_outputs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .wrap_err_with(|| format!("failed to create {}", self.dir))?;
        for fixture in &self.fixtures {
            let path = self.dir.join(format!("{}.txt", fixture.name));
            std::fs::write(&path, fixture.render()?)
                .wrap_err_with(|| format!("failed to write {}", path))?;
            log::info!("wrote {}", path);
        }
        Ok(())
    }
}

fn reference_fixtures() -> Result<Vec<FixtureDetails>, MinimizeError> {
    let abc = ["a", "b", "c"];
    let abcd = ["a", "b", "c", "d"];

    // The 8421 -> 8421+6 converter: output (n + 6) mod 10 for inputs 0-9, 0 on rows 10-15.
    let bcd_output = |bit: usize| {
        let minterms = (0..10).filter(move |n| ((n + 6) % 10) >> bit & 1 == 1);
        LogicFunction::new(abcd, minterms)
    };

    let fixtures = [
        LogicFunction::new(["a", "b"], [0b11]).map(|f| {
            FixtureDetails::new("and2", "two-input AND", f)
                .with_dnf("a & b")
                .with_cnf("b & a")
        }),
        LogicFunction::from_fn(abc, |v| !(v.iter().all(|&x| x) || v.iter().all(|&x| !x))).map(
            |f| {
                FixtureDetails::new("not-all-equal", "1 unless all inputs are equal", f)
                    .with_dnf("(¬b & c) | (¬a & b) | (a & ¬c)")
                    .with_cnf("(a | b | c) & (¬a | ¬b | ¬c)")
            },
        ),
        LogicFunction::from_fn(abc, |v| v[0] ^ v[1] ^ v[2]).map(|f| {
            FixtureDetails::new("full-adder-sum", "sum output of a one-bit full adder", f)
                .with_dnf("(¬a & ¬b & c) | (¬a & b & ¬c) | (a & ¬b & ¬c) | (a & b & c)")
                .with_cnf("(a | b | c) & (a | ¬b | ¬c) & (¬a | b | ¬c) & (¬a | ¬b | c)")
        }),
        LogicFunction::from_fn(abc, |v| v.iter().filter(|&&x| x).count() >= 2).map(|f| {
            FixtureDetails::new("full-adder-carry", "carry output of a one-bit full adder", f)
                .with_dnf("(b & c) | (a & c) | (a & b)")
                .with_cnf("(b | c) & (a | c) & (a | b)")
        }),
        bcd_output(3).map(|f| {
            FixtureDetails::new("bcd-plus-6-y1", "8421+6 converter, bit 8", f)
                .with_dnf("¬a & ¬b & c")
        }),
        bcd_output(2).map(|f| {
            FixtureDetails::new("bcd-plus-6-y2", "8421+6 converter, bit 4", f)
                .with_dnf("¬b & ¬c")
        }),
        bcd_output(1).map(|f| {
            FixtureDetails::new("bcd-plus-6-y3", "8421+6 converter, bit 2", f)
                .with_dnf("(¬a & ¬b & ¬c) | (¬a & b & c)")
        }),
        bcd_output(0).map(|f| {
            FixtureDetails::new("bcd-plus-6-y4", "8421+6 converter, bit 1", f)
                .with_dnf("(¬b & ¬c & d) | (¬a & d)")
        }),
        LogicFunction::new(abcd, 0..16).map(|f| {
            FixtureDetails::new("all-ones", "constant 1 over four inputs", f)
                .with_dnf("1")
                .with_cnf("1")
        }),
        LogicFunction::new(abcd, [0b0101]).map(|f| {
            FixtureDetails::new("single-cell", "a single true row", f)
                .with_dnf("¬a & b & ¬c & d")
        }),
    ];

    fixtures.into_iter().collect()
}
