// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cube::MAX_INPUTS;
use bitvec::prelude::*;
use std::fmt;

/// The largest number of truth-table rows a function can have.
pub const MAX_ROWS: usize = 1 << MAX_INPUTS;

type RowBits = BitArr!(for MAX_ROWS, in u32, Lsb0);

/// A set of truth-table rows, identified by their index.
///
/// Row indexes treat variable 0 as the most significant bit, so for variables `[a, b, c]`
/// the row `a = 1, b = 0, c = 1` has index `0b101 = 5`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MintermSet {
    bits: RowBits,
}

impl MintermSet {
    #[inline]
    pub fn new() -> Self {
        Self {
            bits: RowBits::ZERO,
        }
    }

    /// Returns the set of all `2^variable_count` rows.
    pub fn full(variable_count: usize) -> Self {
        (0..(1 << variable_count)).collect()
    }

    /// Adds `minterm` to the set.
    ///
    /// Panics if `minterm >= MAX_ROWS`.
    #[inline]
    pub fn insert(&mut self, minterm: usize) {
        self.bits.set(minterm, true);
    }

    #[inline]
    pub fn contains(&self, minterm: usize) -> bool {
        minterm < MAX_ROWS && self.bits[minterm]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Iterates over the rows in this set in ascending order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    pub fn union_with(&mut self, other: &Self) {
        for minterm in other.iter() {
            self.insert(minterm);
        }
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.iter().filter(|&m| !other.contains(m)).collect()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|m| other.contains(m))
    }

    /// Returns the rows in `0..2^variable_count` that are not in this set.
    pub fn complement(&self, variable_count: usize) -> Self {
        Self::full(variable_count).difference(self)
    }
}

impl Default for MintermSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<usize> for MintermSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for minterm in iter {
            set.insert(minterm);
        }
        set
    }
}

impl Extend<usize> for MintermSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for minterm in iter {
            self.insert(minterm);
        }
    }
}

impl fmt::Debug for MintermSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
