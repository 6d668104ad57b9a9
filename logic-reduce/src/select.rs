// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selection of a small covering subset of prime implicants.
//!
//! Essential implicants (the only implicant covering some target row) are always selected.
//! The rows they leave uncovered are then covered by the first subset of the remaining
//! implicants, by increasing size and in combination order, that covers all of them.

use crate::{cover::Cover, cube::Cube, errors::MinimizeError, minterms::MintermSet};
use itertools::Itertools;
use log::debug;

/// The implicants chosen to cover a set of target rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Implicants that are the sole cover of at least one target row.
    pub essential: Cover,
    /// The smallest set of other implicants covering what the essential ones miss.
    pub chosen: Cover,
}

impl Selection {
    /// Returns all selected implicants.
    pub fn into_cover(self) -> Cover {
        self.essential | self.chosen
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// Subsets of this size are next to be tried.
    Searching(usize),
    /// A covering subset was found.
    Found,
    /// No subset covers the remaining rows.
    Exhausted,
}

/// Exhaustive search for the smallest covering subset of candidate implicants.
#[derive(Clone, Debug)]
pub struct CoverSearch<'a> {
    candidates: Vec<(&'a Cube, MintermSet)>,
    remaining: MintermSet,
    state: SearchState,
    found: Option<Vec<usize>>,
}

impl<'a> CoverSearch<'a> {
    /// Creates a search for subsets of `candidates` covering `remaining`.
    pub fn new(candidates: impl IntoIterator<Item = &'a Cube>, remaining: MintermSet) -> Self {
        let candidates: Vec<_> = candidates
            .into_iter()
            .map(|cube| (cube, cube.expand()))
            .collect();
        let state = if remaining.is_empty() {
            SearchState::Found
        } else if candidates.is_empty() {
            SearchState::Exhausted
        } else {
            SearchState::Searching(1)
        };
        let found = remaining.is_empty().then(Vec::new);
        Self {
            candidates,
            remaining,
            state,
            found,
        }
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Tries every subset of the current size.
    pub fn step(&mut self) -> SearchState {
        let size = match self.state {
            SearchState::Searching(size) => size,
            state => return state,
        };

        debug!(
            "searching {}-subsets of {} candidates",
            size,
            self.candidates.len()
        );
        let found = (0..self.candidates.len())
            .combinations(size)
            .find(|combination| self.covers_remaining(combination));

        self.state = match found {
            Some(combination) => {
                self.found = Some(combination);
                SearchState::Found
            }
            None if size >= self.candidates.len() => SearchState::Exhausted,
            None => SearchState::Searching(size + 1),
        };
        self.state
    }

    /// Runs the search to completion, returning the chosen implicants if a cover exists.
    pub fn run(mut self) -> Option<Cover> {
        while let SearchState::Searching(_) = self.step() {}
        let found = self.found?;
        Some(
            found
                .into_iter()
                .map(|ix| self.candidates[ix].0.clone())
                .collect(),
        )
    }

    fn covers_remaining(&self, combination: &[usize]) -> bool {
        let mut covered = MintermSet::new();
        for &ix in combination {
            covered.union_with(&self.candidates[ix].1);
        }
        self.remaining.is_subset(&covered)
    }
}

/// Selects a cover of `targets` from `primes`.
///
/// Returns [`MinimizeError::OffTargetCoverage`] if any implicant covers a row outside
/// `targets`, and [`MinimizeError::CoverageInconsistency`] if `primes` cannot cover `targets`.
pub fn select_cover(primes: &Cover, targets: &MintermSet) -> Result<Selection, MinimizeError> {
    let implicants: Vec<&Cube> = primes.iter().collect();
    let coverage: Vec<MintermSet> = implicants.iter().map(|cube| cube.expand()).collect();

    let mut off_target = MintermSet::new();
    for covered in &coverage {
        off_target.union_with(&covered.difference(targets));
    }
    if !off_target.is_empty() {
        return Err(MinimizeError::OffTargetCoverage {
            rows: off_target.iter().collect(),
        });
    }

    let covering = |minterm: usize| -> Vec<usize> {
        coverage
            .iter()
            .enumerate()
            .filter_map(|(ix, covered)| covered.contains(minterm).then(|| ix))
            .collect()
    };

    let uncovered: Vec<usize> = targets
        .iter()
        .filter(|&minterm| covering(minterm).is_empty())
        .collect();
    if !uncovered.is_empty() {
        return Err(MinimizeError::CoverageInconsistency { uncovered });
    }

    let mut is_essential = vec![false; implicants.len()];
    for minterm in targets.iter() {
        if let [only] = covering(minterm)[..] {
            is_essential[only] = true;
        }
    }

    let mut covered_by_essential = MintermSet::new();
    for (covered, _) in coverage
        .iter()
        .zip(&is_essential)
        .filter(|(_, essential)| **essential)
    {
        covered_by_essential.union_with(covered);
    }
    let remaining = targets.difference(&covered_by_essential);

    let (essential, others): (Vec<_>, Vec<_>) = implicants
        .iter()
        .zip(&is_essential)
        .partition(|(_, essential)| **essential);
    let essential: Cover = essential.into_iter().map(|(&cube, _)| cube.clone()).collect();
    debug!(
        "{} essential implicants of {}, {} rows left to cover",
        essential.cube_count(),
        implicants.len(),
        remaining.len()
    );

    let search = CoverSearch::new(others.into_iter().map(|(&cube, _)| cube), remaining);
    match search.run() {
        Some(chosen) => Ok(Selection { essential, chosen }),
        None => Err(MinimizeError::CoverageInconsistency {
            uncovered: remaining.iter().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover<const N: usize>(numeric: impl IntoIterator<Item = [u8; N]>) -> Cover {
        Cover::from_numeric(numeric).unwrap()
    }

    fn minterms(rows: impl IntoIterator<Item = usize>) -> MintermSet {
        rows.into_iter().collect()
    }

    #[test]
    fn test_all_essential() {
        let primes = cover([[2, 1, 1], [1, 2, 1], [1, 1, 2]]);
        let selection = select_cover(&primes, &minterms([3, 5, 6, 7])).unwrap();
        assert_eq!(selection.essential, primes);
        assert!(selection.chosen.is_empty());
    }

    #[test]
    fn test_redundant_prime_dropped() {
        // a & ¬b | b & c, with consensus term a & c redundant
        let primes = cover([[1, 0, 2], [2, 1, 1], [1, 2, 1]]);
        let selection = select_cover(&primes, &minterms([3, 4, 5, 7])).unwrap();
        assert_eq!(selection.essential, cover([[1, 0, 2], [2, 1, 1]]));
        assert!(selection.chosen.is_empty());
        assert_eq!(
            selection.into_cover().coverage(),
            &minterms([3, 4, 5, 7])
        );
    }

    #[test]
    fn test_cyclic_cover() {
        // Every row is covered by exactly two primes, so nothing is essential.
        let primes = cover([
            [0, 0, 2],
            [0, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
            [1, 2, 1],
            [1, 1, 2],
        ]);
        let targets = minterms([0, 1, 2, 5, 6, 7]);
        let selection = select_cover(&primes, &targets).unwrap();
        assert!(selection.essential.is_empty());
        // The first 3-subset in combination order that covers every row.
        assert_eq!(
            selection.chosen,
            cover([[2, 0, 1], [0, 2, 0], [1, 1, 2]])
        );
        assert_eq!(selection.into_cover().coverage(), &targets);
    }

    #[test]
    fn test_search_states() {
        let candidates = [
            Cube::from_numeric([0, 2]).unwrap(),
            Cube::from_numeric([2, 0]).unwrap(),
        ];
        let mut search = CoverSearch::new(&candidates, minterms([0, 1, 2]));
        assert_eq!(search.state(), SearchState::Searching(1));
        assert_eq!(search.step(), SearchState::Searching(2));
        assert_eq!(search.step(), SearchState::Found);
        assert_eq!(search.step(), SearchState::Found);

        let mut search = CoverSearch::new(&candidates, minterms([3]));
        assert_eq!(search.step(), SearchState::Searching(2));
        assert_eq!(search.step(), SearchState::Exhausted);
        assert!(search.run().is_none());
    }

    #[test]
    fn test_empty_targets() {
        let selection = select_cover(&Cover::default(), &MintermSet::new()).unwrap();
        assert!(selection.into_cover().is_empty());
    }

    #[test]
    fn test_coverage_inconsistency() {
        let err = select_cover(&cover([[1, 2]]), &minterms([0, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            MinimizeError::CoverageInconsistency { uncovered: vec![0] }
        );
    }

    #[test]
    fn test_coverage_outside_targets() {
        // b covers rows 1 and 3, but only row 3 is a target.
        let err = select_cover(&cover([[2, 1]]), &minterms([3])).unwrap_err();
        assert_eq!(err, MinimizeError::OffTargetCoverage { rows: vec![1] });

        let err = select_cover(&cover([[2, 2]]), &MintermSet::new()).unwrap_err();
        assert_eq!(
            err,
            MinimizeError::OffTargetCoverage {
                rows: vec![0, 1, 2, 3]
            }
        );
    }
}
