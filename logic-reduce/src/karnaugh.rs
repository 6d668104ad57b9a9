// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Geometric minimization on a 4×4 Karnaugh map.
//!
//! Rows are indexed by the first two variables and columns by the last two, both in Gray
//! code order (00, 01, 11, 10), so that neighbouring cells differ in exactly one variable.
//! The map wraps around at both edges.

use crate::{
    cover::Cover,
    cube::{Cube, Form, Literal},
    errors::MinimizeError,
    minterms::MintermSet,
};
use bitvec::prelude::*;
use log::debug;
use once_cell::sync::Lazy;
use std::fmt;

/// The number of variables a Karnaugh map is laid out for.
pub const GRID_VARIABLES: usize = 4;

const SIDE: usize = 4;
const GRAY: [usize; SIDE] = [0b00, 0b01, 0b11, 0b10];
// Inverse of GRAY: the index at which each 2-bit code appears.
const GRAY_POSITION: [usize; SIDE] = [0, 1, 3, 2];

type CellBits = BitArr!(for SIDE * SIDE, in u16, Lsb0);

/// Returns the truth-table row shown at (`row`, `col`).
#[inline]
pub fn cell_minterm(row: usize, col: usize) -> usize {
    (GRAY[row] << 2) | GRAY[col]
}

/// Returns the (row, column) position of truth-table row `minterm`.
pub fn minterm_cell(minterm: usize) -> (usize, usize) {
    (
        GRAY_POSITION[(minterm >> 2) & 0b11],
        GRAY_POSITION[minterm & 0b11],
    )
}

/// A toroidal rectangle of cells: 1, 2, 4, 8 or 16 cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group {
    cells: CellBits,
}

impl Group {
    fn rectangle(row: usize, col: usize, height: usize, width: usize) -> Self {
        let mut cells = CellBits::ZERO;
        for dr in 0..height {
            for dc in 0..width {
                let r = (row + dr) % SIDE;
                let c = (col + dc) % SIDE;
                cells.set(r * SIDE + c, true);
            }
        }
        Self { cells }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// Iterates over the (row, column) positions in this group.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter_ones().map(|ix| (ix / SIDE, ix % SIDE))
    }

    #[inline]
    pub fn contains_cell(&self, row: usize, col: usize) -> bool {
        self.cells[row * SIDE + col]
    }

    /// Returns true if every cell of `self` is in `other` and `other` is larger.
    pub fn is_strict_subset(&self, other: &Group) -> bool {
        self.cell_count() < other.cell_count()
            && self.cells().all(|(r, c)| other.contains_cell(r, c))
    }

    /// The truth-table rows this group covers.
    pub fn minterms(&self) -> MintermSet {
        self.cells().map(|(r, c)| cell_minterm(r, c)).collect()
    }

    /// Returns the cube covering exactly this group's cells.
    ///
    /// A variable whose bit is the same across every cell stays fixed; a variable whose bit
    /// varies is generalized away.
    pub fn to_cube(&self) -> Cube {
        let minterms: Vec<_> = self.minterms().iter().collect();
        let input = (0..GRID_VARIABLES)
            .map(|ix| {
                let shift = GRID_VARIABLES - 1 - ix;
                let first = (minterms[0] >> shift) & 1 == 1;
                minterms
                    .iter()
                    .all(|m| ((m >> shift) & 1 == 1) == first)
                    .then(|| first)
            })
            .collect();
        Cube { input }
    }

    /// Returns the literals describing this group under the sign convention of `form`.
    ///
    /// A group covering all 16 cells has no literals: it is the constant 1 (DNF) or 0 (CNF).
    pub fn literals<'a, S: AsRef<str>>(
        &self,
        variables: &'a [S],
        form: Form,
    ) -> Result<Vec<Literal<'a>>, MinimizeError> {
        check_variable_count(variables.len())?;
        Ok(self.to_cube().literals(variables, form))
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.cells()).finish()
    }
}

static TOROIDAL_GROUPS: Lazy<Vec<Group>> = Lazy::new(generate_groups);

/// Returns every toroidal rectangle of the map, largest first.
///
/// The table is built once and shared.
pub fn toroidal_groups() -> &'static [Group] {
    &TOROIDAL_GROUPS
}

fn generate_groups() -> Vec<Group> {
    const SHAPES: [(usize, usize); 9] = [
        (4, 4),
        (2, 4),
        (4, 2),
        (1, 4),
        (4, 1),
        (2, 2),
        (1, 2),
        (2, 1),
        (1, 1),
    ];
    // A full-length side has only one distinct offset.
    let offsets = |extent: usize| if extent == SIDE { 1 } else { SIDE };

    let mut groups = Vec::new();
    for (height, width) in SHAPES {
        for row in 0..offsets(height) {
            for col in 0..offsets(width) {
                groups.push(Group::rectangle(row, col, height, width));
            }
        }
    }
    groups
}

/// The 4×4 grid of function values.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KarnaughMap {
    cells: [[bool; SIDE]; SIDE],
}

impl KarnaughMap {
    /// Lays out the function whose true rows are `minterms` on the grid.
    pub fn from_minterms(
        minterms: &MintermSet,
        variable_count: usize,
    ) -> Result<Self, MinimizeError> {
        check_variable_count(variable_count)?;
        if let Some(minterm) = minterms.iter().find(|&minterm| minterm >= SIDE * SIDE) {
            return Err(MinimizeError::MintermOutOfRange {
                minterm,
                variable_count,
            });
        }
        let mut cells = [[false; SIDE]; SIDE];
        for (row, row_cells) in cells.iter_mut().enumerate() {
            for (col, cell) in row_cells.iter_mut().enumerate() {
                *cell = minterms.contains(cell_minterm(row, col));
            }
        }
        Ok(Self { cells })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    /// Returns the map with every cell flipped.
    pub fn inverted(&self) -> Self {
        let mut cells = self.cells;
        for cell in cells.iter_mut().flatten() {
            *cell = !*cell;
        }
        Self { cells }
    }

    /// Returns the rows whose cell equals `value`.
    pub fn minterms(&self, value: bool) -> MintermSet {
        (0..SIDE)
            .flat_map(|row| (0..SIDE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.get(row, col) == value)
            .map(|(row, col)| cell_minterm(row, col))
            .collect()
    }

    /// Returns the prime groups of cells equal to `target_value`.
    ///
    /// A group is valid if all of its cells equal `target_value`, and prime if it is not a
    /// strict subset of another valid group. Groups are returned largest first.
    pub fn find_prime_groups(&self, target_value: bool) -> Vec<Group> {
        let valid: Vec<&Group> = toroidal_groups()
            .iter()
            .filter(|group| group.cells().all(|(r, c)| self.get(r, c) == target_value))
            .collect();
        let primes: Vec<Group> = valid
            .iter()
            .filter(|group| !valid.iter().any(|other| group.is_strict_subset(other)))
            .map(|&&group| group)
            .collect();
        debug!(
            "karnaugh map: {} valid groups, {} prime groups for value {}",
            valid.len(),
            primes.len(),
            u8::from(target_value)
        );
        primes
    }

    /// Returns the prime implicants of `form` as cubes: groups of 1-cells for DNF, groups of
    /// 0-cells for CNF.
    pub fn prime_implicants(&self, form: Form) -> Cover {
        self.find_prime_groups(form.target_value())
            .iter()
            .map(Group::to_cube)
            .collect()
    }

    #[inline]
    pub fn display<'a, S: AsRef<str>>(&'a self, variables: &'a [S]) -> KarnaughMapDisplay<'a, S> {
        KarnaughMapDisplay {
            map: self,
            variables,
        }
    }
}

impl fmt::Debug for KarnaughMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let default_names = ["a", "b", "c", "d"];
        write!(f, "{}", self.display(&default_names))
    }
}

/// Finds the prime groups of `grid` for `target_value`.
#[inline]
pub fn find_prime_groups(grid: &KarnaughMap, target_value: bool) -> Vec<Group> {
    grid.find_prime_groups(target_value)
}

/// Returns the literals describing `group`.
#[inline]
pub fn group_to_literals<'a, S: AsRef<str>>(
    group: &Group,
    variables: &'a [S],
    form: Form,
) -> Result<Vec<Literal<'a>>, MinimizeError> {
    group.literals(variables, form)
}

fn check_variable_count(count: usize) -> Result<(), MinimizeError> {
    if count != GRID_VARIABLES {
        return Err(MinimizeError::UnsupportedVariableCount {
            count,
            supported: GRID_VARIABLES..=GRID_VARIABLES,
        });
    }
    Ok(())
}

/// Displays the map with Gray-coded row and column headers:
///
/// ```text
/// ab\cd 00 01 11 10
///    00  1  0  0  1
///    01  0  0  0  0
///    11  0  0  0  0
///    10  1  0  0  1
/// ```
pub struct KarnaughMapDisplay<'a, S> {
    map: &'a KarnaughMap,
    variables: &'a [S],
}

impl<'a, S: AsRef<str>> fmt::Display for KarnaughMapDisplay<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = |range: std::ops::Range<usize>| -> String {
            self.variables
                .get(range)
                .unwrap_or(&[])
                .iter()
                .map(|v| v.as_ref())
                .collect()
        };
        let label = format!("{}\\{}", names(0..2), names(2..4));
        let width = label.chars().count();

        write!(f, "{}", label)?;
        for code in GRAY {
            write!(f, " {:02b}", code)?;
        }
        writeln!(f)?;

        for (row, code) in GRAY.iter().enumerate() {
            write!(f, "{:>width$}", format!("{:02b}", code), width = width)?;
            for col in 0..SIDE {
                write!(f, " {:>2}", u8::from(self.map.get(row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(minterms: impl IntoIterator<Item = usize>) -> KarnaughMap {
        KarnaughMap::from_minterms(&minterms.into_iter().collect(), 4).unwrap()
    }

    fn literal_strings(group: &Group, form: Form) -> Vec<String> {
        group
            .literals(&["a", "b", "c", "d"], form)
            .unwrap()
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_group_table() {
        let groups = toroidal_groups();
        assert_eq!(groups.len(), 81);
        for size in [1, 2, 4, 8, 16] {
            let count = groups.iter().filter(|g| g.cell_count() == size).count();
            let expected = match size {
                16 => 1,
                8 => 8,
                4 => 24,
                2 => 32,
                1 => 16,
                _ => unreachable!(),
            };
            assert_eq!(count, expected, "groups of size {}", size);
        }
        for (ix, group) in groups.iter().enumerate() {
            assert!(group.cell_count().is_power_of_two());
            assert!(
                !groups[..ix].contains(group),
                "group {:?} appears twice",
                group
            );
        }
    }

    #[test]
    fn test_gray_layout() {
        for minterm in 0..16 {
            let (row, col) = minterm_cell(minterm);
            assert_eq!(cell_minterm(row, col), minterm);
        }
        // Neighbouring cells, including across the edges, differ in exactly one bit.
        for row in 0..SIDE {
            for col in 0..SIDE {
                let here = cell_minterm(row, col);
                let right = cell_minterm(row, (col + 1) % SIDE);
                let down = cell_minterm((row + 1) % SIDE, col);
                assert_eq!((here ^ right).count_ones(), 1);
                assert_eq!((here ^ down).count_ones(), 1);
            }
        }
    }

    #[test]
    fn test_all_ones() {
        let map = map_of(0..16);
        let primes = map.find_prime_groups(true);
        assert_eq!(primes.len(), 1);
        assert_eq!(primes[0].cell_count(), 16);
        assert!(literal_strings(&primes[0], Form::Dnf).is_empty());
        assert_eq!(
            map.prime_implicants(Form::Dnf),
            Cover::new([Cube::universe(4).unwrap()])
        );
        assert!(map.find_prime_groups(false).is_empty());
    }

    #[test]
    fn test_single_cell() {
        let map = map_of([0b0101]);
        let primes = map.find_prime_groups(true);
        assert_eq!(primes.len(), 1);
        assert_eq!(primes[0].cell_count(), 1);
        assert_eq!(
            literal_strings(&primes[0], Form::Dnf),
            vec!["¬a", "b", "¬c", "d"]
        );
        assert_eq!(
            literal_strings(&primes[0], Form::Cnf),
            vec!["a", "¬b", "c", "¬d"]
        );
    }

    #[test]
    fn test_corners_wrap_around() {
        let map = map_of([0b0000, 0b0010, 0b1000, 0b1010]);
        let primes = map.find_prime_groups(true);
        assert_eq!(primes.len(), 1);
        assert_eq!(
            primes[0].cells().collect::<Vec<_>>(),
            vec![(0, 0), (0, 3), (3, 0), (3, 3)]
        );
        assert_eq!(literal_strings(&primes[0], Form::Dnf), vec!["¬b", "¬d"]);
    }

    #[test]
    fn test_prime_groups_are_maximal() {
        // a & b plus the lone cell ¬a & ¬b & ¬c & ¬d
        let map = map_of([0b1100, 0b1101, 0b1111, 0b1110, 0b0000]);
        let primes = map.find_prime_groups(true);
        let cubes: Vec<_> = primes.iter().map(|g| g.to_cube()).collect();
        assert_eq!(
            cubes,
            vec![
                Cube::from_numeric([1, 1, 2, 2]).unwrap(),
                Cube::from_numeric([0, 0, 0, 0]).unwrap(),
            ]
        );
        for group in &primes {
            assert!(!primes.iter().any(|other| group.is_strict_subset(other)));
        }
    }

    #[test]
    fn test_zero_groups() {
        let map = map_of((0..16).filter(|&m| m != 0b0111));
        let primes = map.find_prime_groups(false);
        assert_eq!(primes.len(), 1);
        assert_eq!(
            literal_strings(&primes[0], Form::Cnf),
            vec!["a", "¬b", "¬c", "¬d"]
        );
        assert_eq!(map.inverted().find_prime_groups(true), primes);
    }

    #[test]
    fn test_unsupported_variable_count() {
        let err = KarnaughMap::from_minterms(&MintermSet::new(), 3).unwrap_err();
        assert_eq!(
            err,
            MinimizeError::UnsupportedVariableCount {
                count: 3,
                supported: 4..=4,
            }
        );
        let group = toroidal_groups()[0];
        assert!(group.literals(&["a", "b", "c"], Form::Dnf).is_err());
    }

    #[test]
    fn test_rows_out_of_range() {
        let err = KarnaughMap::from_minterms(&[3, 16, 20].into_iter().collect(), 4).unwrap_err();
        assert_eq!(
            err,
            MinimizeError::MintermOutOfRange {
                minterm: 16,
                variable_count: 4,
            }
        );
    }

    #[test]
    fn test_display() {
        let map = map_of([0b0000, 0b0010, 0b1000, 0b1010]);
        let expected = "ab\\cd 00 01 11 10\n   00  1  0  0  1\n   01  0  0  0  0\n   11  0  0  0  0\n   10  1  0  0  1\n";
        assert_eq!(map.display(&["a", "b", "c", "d"]).to_string(), expected);
    }
}
