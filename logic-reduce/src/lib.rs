// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimization of Boolean functions of 2 to 5 variables into minimal disjunctive and
//! conjunctive normal forms.
//!
//! Prime implicants are generated either by repeatedly merging adjacent cubes
//! ([`combine`]) or, for 4 variables, by grouping cells on a toroidal Karnaugh map
//! ([`karnaugh`]). A small covering subset is then selected from them ([`select`]).

pub mod combine;
pub mod cost;
pub mod cover;
pub mod cube;
pub mod errors;
pub mod karnaugh;
pub mod logic_function;
pub mod minterms;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod select;

pub use cube::Form;
pub use errors::MinimizeError;
pub use logic_function::{LogicFunction, Method, Minimized, Minimizer};
