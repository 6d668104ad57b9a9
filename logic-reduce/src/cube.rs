// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::TermDisplay,
    errors::{InvalidCubeNumeric, MinimizeError},
    minterms::MintermSet,
};
use arrayvec::ArrayVec;
use std::{borrow::Cow, fmt};

/// The maximum number of variables a cube can range over.
pub const MAX_INPUTS: usize = 5;

/// A product (or, for CNF, a sum) term over up to [`MAX_INPUTS`] variables.
///
/// Position `i` corresponds to variable `i`. `Some(value)` fixes the variable, `None` is a
/// don't care: the variable has been merged out.
#[derive(Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Cube {
    pub input: ArrayVec<Option<bool>, MAX_INPUTS>,
}

/// Which normal form a set of cubes describes.
///
/// The form decides the sign convention of literals: in DNF a 0 bit is a negated variable,
/// in CNF a 0 bit is a plain variable (the clause is false exactly on the row).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Form {
    /// Disjunctive normal form: OR of AND-terms, built from the rows where the function is 1.
    Dnf,
    /// Conjunctive normal form: AND of OR-clauses, built from the rows where the function is 0.
    Cnf,
}

impl Form {
    /// The truth value whose rows this form groups.
    #[inline]
    pub fn target_value(self) -> bool {
        matches!(self, Self::Dnf)
    }

    /// Returns true if a variable fixed to `value` appears negated in a term of this form.
    #[inline]
    pub fn is_negated(self, value: bool) -> bool {
        match self {
            Self::Dnf => !value,
            Self::Cnf => value,
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Dnf => write!(f, "DNF"),
            Self::Cnf => write!(f, "CNF"),
        }
    }
}

impl Cube {
    /// Builds a cube from its input symbols.
    pub fn new(input: &[Option<bool>]) -> Result<Self, MinimizeError> {
        check_capacity(input.len())?;
        Ok(Self {
            input: input.iter().copied().collect(),
        })
    }

    /// Builds a cube from the numeric representation: 0 is false, 1 is true and 2 is don't
    /// care.
    pub fn from_numeric<const N: usize>(
        input_numeric: [u8; N],
    ) -> Result<Self, InvalidCubeNumeric> {
        if N > MAX_INPUTS {
            return Err(InvalidCubeNumeric::TooLong(N));
        }
        let mut input = ArrayVec::new();
        for value in input_numeric {
            match value {
                0 => input.push(Some(false)),
                1 => input.push(Some(true)),
                2 => input.push(None),
                _ => return Err(InvalidCubeNumeric::Value(value)),
            }
        }
        Ok(Self { input })
    }

    /// Returns the fully specified cube for truth-table row `minterm` over `variable_count`
    /// variables. Variable 0 is the most significant bit.
    pub fn from_minterm(minterm: usize, variable_count: usize) -> Result<Self, MinimizeError> {
        check_capacity(variable_count)?;
        let input = (0..variable_count)
            .map(|ix| Some((minterm >> (variable_count - 1 - ix)) & 1 == 1))
            .collect();
        Ok(Self { input })
    }

    /// The cube that covers every row.
    pub fn universe(variable_count: usize) -> Result<Self, MinimizeError> {
        check_capacity(variable_count)?;
        Ok(Self {
            input: (0..variable_count).map(|_| None).collect(),
        })
    }

    /// The number of variables this cube ranges over.
    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Number of fixed (non don't care) positions.
    #[inline]
    pub fn literal_count(&self) -> usize {
        self.input.iter().filter(|c| c.is_some()).count()
    }

    /// Returns the row index if this cube is fully specified.
    pub fn minterm_index(&self) -> Option<usize> {
        self.input.iter().try_fold(0_usize, |acc, &c| {
            c.map(|value| (acc << 1) | usize::from(value))
        })
    }

    /// Number of positions where both cubes are fixed to opposite values.
    pub fn distance(&self, other: &Cube) -> Result<usize, MinimizeError> {
        self.check_len(other)?;
        Ok(self
            .input
            .iter()
            .zip(&other.input)
            .filter(|(c, d)| matches!((c, d), (Some(x), Some(y)) if x != y))
            .count())
    }

    /// Returns the position at which `self` and `other` can be merged, if any.
    ///
    /// Two cubes merge iff their don't cares are in the same positions and they differ in
    /// exactly one fixed position. Identical cubes are at distance 0 and do not merge.
    pub fn merge_position(&self, other: &Cube) -> Result<Option<usize>, MinimizeError> {
        self.check_len(other)?;
        let mut position = None;
        for (ix, (&c, &d)) in self.input.iter().zip(&other.input).enumerate() {
            match (c, d) {
                (None, None) => {}
                (None, Some(_)) | (Some(_), None) => return Ok(None),
                (Some(x), Some(y)) if x == y => {}
                (Some(_), Some(_)) => {
                    if position.is_some() {
                        return Ok(None);
                    }
                    position = Some(ix);
                }
            }
        }
        Ok(position)
    }

    #[inline]
    pub fn can_merge(&self, other: &Cube) -> Result<bool, MinimizeError> {
        Ok(self.merge_position(other)?.is_some())
    }

    /// Merges two adjacent cubes, replacing the differing position with a don't care.
    ///
    /// Returns `Ok(None)` if the cubes are not mergeable.
    pub fn merge(&self, other: &Cube) -> Result<Option<Cube>, MinimizeError> {
        Ok(self.merge_position(other)?.map(|ix| {
            let mut merged = self.clone();
            merged.input[ix] = None;
            merged
        }))
    }

    /// Returns every row this cube covers.
    pub fn expand(&self) -> MintermSet {
        let free: ArrayVec<usize, MAX_INPUTS> = self
            .input
            .iter()
            .enumerate()
            .filter_map(|(ix, c)| c.is_none().then(|| ix))
            .collect();
        let len = self.len();
        let base = self.input.iter().fold(0_usize, |acc, &c| {
            (acc << 1) | usize::from(c.unwrap_or(false))
        });

        (0..(1_usize << free.len()))
            .map(|assignment| {
                free.iter()
                    .enumerate()
                    .fold(base, |minterm, (bit, &ix)| {
                        if (assignment >> bit) & 1 == 1 {
                            minterm | (1 << (len - 1 - ix))
                        } else {
                            minterm
                        }
                    })
            })
            .collect()
    }

    pub fn contains(&self, other: &Cube) -> bool {
        self.len() == other.len()
            && self
                .input
                .iter()
                .zip(&other.input)
                .all(|(&c, &d)| CubeContains::input_contains(c, d) >= CubeContains::Contains)
    }

    pub fn strictly_contains(&self, other: &Cube) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut any_strictly = false;
        let contains = self.input.iter().zip(&other.input).all(|(&c, &d)| {
            match CubeContains::input_contains(c, d) {
                CubeContains::Strictly => {
                    any_strictly = true;
                    true
                }
                CubeContains::Contains => true,
                CubeContains::DoesNotContain => false,
            }
        });
        contains && any_strictly
    }

    /// Returns true if this cube, read as a product term, is true for `values`.
    pub fn evaluate(&self, values: &[bool]) -> bool {
        self.input
            .iter()
            .zip(values)
            .all(|(variable, value)| variable.map_or(true, |v| v == *value))
    }

    /// Returns the literals of this cube under the sign convention of `form`.
    ///
    /// Don't care positions produce no literal. A cube with no literals is the constant 1
    /// (DNF) or 0 (CNF).
    pub fn literals<'a, S: AsRef<str>>(&self, variables: &'a [S], form: Form) -> Vec<Literal<'a>> {
        self.input
            .iter()
            .zip(variables)
            .filter_map(|(c, variable)| {
                c.map(|value| Literal {
                    variable: variable.as_ref(),
                    negated: form.is_negated(value),
                })
            })
            .collect()
    }

    #[inline]
    pub fn matrix_display(&self) -> CubeMatrixDisplay<'_> {
        CubeMatrixDisplay::new(self)
    }

    #[inline]
    pub fn term_display<'a, S: AsRef<str>>(
        &'a self,
        variables: &'a [S],
        form: Form,
    ) -> TermDisplay<'a, S> {
        TermDisplay::new(self, variables, form)
    }

    fn check_len(&self, other: &Cube) -> Result<(), MinimizeError> {
        if self.len() != other.len() {
            return Err(MinimizeError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }
}

fn check_capacity(count: usize) -> Result<(), MinimizeError> {
    if count > MAX_INPUTS {
        return Err(MinimizeError::UnsupportedVariableCount {
            count,
            supported: 0..=MAX_INPUTS,
        });
    }
    Ok(())
}

/// A possibly negated variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Literal<'a> {
    pub variable: &'a str,
    pub negated: bool,
}

impl<'a> fmt::Display for Literal<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negated {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.variable)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CubeContains {
    DoesNotContain,
    Contains,
    Strictly,
}

impl CubeContains {
    fn input_contains(c: Option<bool>, d: Option<bool>) -> Self {
        match (c, d) {
            (Some(false), Some(false)) | (Some(true), Some(true)) | (None, None) => Self::Contains,
            (Some(_), _) => Self::DoesNotContain,
            (None, Some(_)) => Self::Strictly,
        }
    }
}

pub struct CubeMatrixDisplay<'a> {
    cube: &'a Cube,
    format: MatrixDisplayFormat,
    separator: Cow<'a, str>,
}

impl<'a> CubeMatrixDisplay<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self {
            cube,
            format: MatrixDisplayFormat::default(),
            separator: Cow::Borrowed(""),
        }
    }

    pub fn with_format(mut self, format: MatrixDisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for CubeMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let len = self.cube.len();
        for (input_ix, &input) in self.cube.input.iter().enumerate() {
            write!(f, "{}", self.format.char_for_input(input))?;
            if input_ix + 1 < len {
                write!(f, "{}", self.separator)?;
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub enum MatrixDisplayFormat {
    /// Display a cube as `10X1`, with `X` marking merged-out positions.
    Crosses,

    /// Display a cube as `10-1`, with dashes representing the don't care set.
    Dashes,

    /// Display a cube as `1021`, with numeric identifiers representing the don't care set.
    Numeric,
}

impl MatrixDisplayFormat {
    /// Returns the character that would be displayed for an input.
    pub fn char_for_input(self, input: Option<bool>) -> char {
        match input {
            Some(true) => '1',
            Some(false) => '0',
            None => match self {
                Self::Crosses => 'X',
                Self::Dashes => '-',
                Self::Numeric => '2',
            },
        }
    }
}

impl Default for MatrixDisplayFormat {
    fn default() -> Self {
        Self::Crosses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube<const N: usize>(numeric: [u8; N]) -> Cube {
        Cube::from_numeric(numeric).unwrap()
    }

    #[test]
    fn test_can_merge() {
        assert!(cube([0, 0, 0]).can_merge(&cube([0, 0, 1])).unwrap());
        assert!(cube([0, 2, 0]).can_merge(&cube([1, 2, 0])).unwrap());

        // Distance 0 never merges.
        assert!(!cube([0, 1, 0]).can_merge(&cube([0, 1, 0])).unwrap());
        // Distance 2.
        assert!(!cube([0, 0]).can_merge(&cube([1, 1])).unwrap());
        // Don't cares must line up.
        assert!(!cube([2, 0, 0]).can_merge(&cube([0, 2, 1])).unwrap());
        assert!(!cube([2, 0, 0]).can_merge(&cube([1, 0, 1])).unwrap());
    }

    #[test]
    fn test_merge() {
        let a = cube([1, 0, 1, 2]);
        let b = cube([1, 1, 1, 2]);
        let expected = cube([1, 2, 1, 2]);
        assert_eq!(a.merge(&b).unwrap(), Some(expected.clone()));
        assert_eq!(b.merge(&a).unwrap(), Some(expected));
        assert_eq!(a.merge(&a).unwrap(), None);
    }

    #[test]
    fn test_length_mismatch() {
        let err = cube([0, 1]).can_merge(&cube([0, 1, 1])).unwrap_err();
        assert_eq!(err, MinimizeError::LengthMismatch { left: 2, right: 3 });
        assert!(cube([0, 1]).merge(&cube([0, 1, 1])).is_err());
    }

    #[test]
    fn test_expand() {
        assert_eq!(cube([1, 0, 1]).expand().iter().collect::<Vec<_>>(), vec![5]);
        assert_eq!(
            cube([2, 0, 2]).expand().iter().collect::<Vec<_>>(),
            vec![0, 1, 4, 5]
        );
        assert_eq!(Cube::universe(4).unwrap().expand().len(), 16);
    }

    #[test]
    fn test_minterm_round_trip() {
        let c = Cube::from_minterm(0b1101, 4).unwrap();
        assert_eq!(c, cube([1, 1, 0, 1]));
        assert_eq!(c.minterm_index(), Some(0b1101));
        assert_eq!(cube([1, 2]).minterm_index(), None);
    }

    #[test]
    fn test_literal_count() {
        assert_eq!(cube([1, 2, 0, 2, 1]).literal_count(), 3);
        assert_eq!(Cube::universe(3).unwrap().literal_count(), 0);
    }

    #[test]
    fn test_contains() {
        let big = cube([2, 2, 1]);
        let small = cube([1, 0, 1]);
        assert!(big.contains(&small));
        assert!(big.strictly_contains(&small));
        assert!(big.contains(&big));
        assert!(!big.strictly_contains(&big));
        assert!(!small.contains(&big));
    }

    #[test]
    fn test_invalid_numeric() {
        assert_eq!(
            Cube::from_numeric([0, 3]).unwrap_err(),
            InvalidCubeNumeric::Value(3)
        );
        assert_eq!(
            Cube::from_numeric([0; MAX_INPUTS + 1]).unwrap_err(),
            InvalidCubeNumeric::TooLong(MAX_INPUTS + 1)
        );
    }

    #[test]
    fn test_too_many_variables() {
        let too_many = MinimizeError::UnsupportedVariableCount {
            count: MAX_INPUTS + 1,
            supported: 0..=MAX_INPUTS,
        };
        assert_eq!(
            Cube::new(&[None; MAX_INPUTS + 1]).unwrap_err(),
            too_many.clone()
        );
        assert_eq!(
            Cube::from_minterm(0, MAX_INPUTS + 1).unwrap_err(),
            too_many.clone()
        );
        assert_eq!(Cube::universe(MAX_INPUTS + 1).unwrap_err(), too_many);

        let c = Cube::new(&[Some(true), None, Some(false)]).unwrap();
        assert_eq!(c, cube([1, 2, 0]));
    }

    #[test]
    fn test_literals() {
        let variables = ["a", "b", "c"];
        let c = cube([1, 0, 2]);
        let dnf: Vec<_> = c
            .literals(&variables, Form::Dnf)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(dnf, vec!["a", "¬b"]);
        let cnf: Vec<_> = c
            .literals(&variables, Form::Cnf)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(cnf, vec!["¬a", "b"]);
    }

    #[test]
    fn test_matrix_display() {
        let c = cube([1, 2, 0]);
        assert_eq!(c.matrix_display().to_string(), "1X0");
        assert_eq!(
            c.matrix_display()
                .with_format(MatrixDisplayFormat::Dashes)
                .with_separator(" ")
                .to_string(),
            "1 - 0"
        );
    }
}
