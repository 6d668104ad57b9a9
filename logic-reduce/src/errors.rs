// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for this crate.

use std::{error, fmt, ops::RangeInclusive};

/// A numeric cube representation could not be converted to a cube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidCubeNumeric {
    /// A value other than 0, 1 or 2.
    Value(u8),
    /// More positions than a cube can hold.
    TooLong(usize),
}

impl fmt::Display for InvalidCubeNumeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(
                f,
                "invalid numeric cube value {} (expected 0, 1 or 2)",
                value
            ),
            Self::TooLong(len) => write!(
                f,
                "numeric cube has {} positions, at most {} are supported",
                len,
                crate::cube::MAX_INPUTS
            ),
        }
    }
}

impl error::Error for InvalidCubeNumeric {}

/// Errors returned while minimizing a function.
///
/// All of these are fatal to the call that returned them: minimization is pure and
/// deterministic, so retrying with the same input produces the same error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MinimizeError {
    /// Two cubes of different lengths were compared or merged.
    LengthMismatch {
        /// Length of the left-hand cube.
        left: usize,
        /// Length of the right-hand cube.
        right: usize,
    },

    /// The number of variables is outside the range supported by the chosen method.
    UnsupportedVariableCount {
        /// The number of variables supplied.
        count: usize,
        /// The supported range.
        supported: RangeInclusive<usize>,
    },

    /// The cover selector could not cover these minterms with any subset of the supplied
    /// implicants. This indicates a bug in implicant generation.
    CoverageInconsistency {
        /// The minterms that no combination of implicants covers.
        uncovered: Vec<usize>,
    },

    /// A minterm index does not fit in the truth table.
    MintermOutOfRange {
        /// The minterm index.
        minterm: usize,
        /// The number of variables in the function.
        variable_count: usize,
    },

    /// Implicants cover rows outside the target set.
    OffTargetCoverage {
        /// The covered rows that are not targets.
        rows: Vec<usize>,
    },

    /// A minimized form disagrees with its function.
    NotEquivalent {
        /// The variable values of the first row on which they differ.
        values: Vec<bool>,
    },

    /// The same variable name was supplied twice.
    DuplicateVariable {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { left, right } => {
                write!(f, "cube lengths differ: {} and {}", left, right)
            }
            Self::UnsupportedVariableCount { count, supported } => write!(
                f,
                "unsupported variable count {} (supported: {}..={})",
                count,
                supported.start(),
                supported.end()
            ),
            Self::CoverageInconsistency { uncovered } => write!(
                f,
                "implicants do not cover minterms {:?} -- implicant generation is inconsistent",
                uncovered
            ),
            Self::MintermOutOfRange {
                minterm,
                variable_count,
            } => write!(
                f,
                "minterm {} out of range for {} variables",
                minterm, variable_count
            ),
            Self::OffTargetCoverage { rows } => {
                write!(f, "implicants cover non-target rows {:?}", rows)
            }
            Self::NotEquivalent { values } => write!(
                f,
                "minimized form differs from the function at {:?}",
                values
            ),
            Self::DuplicateVariable { name } => write!(f, "variable '{}' given twice", name),
        }
    }
}

impl error::Error for MinimizeError {}
