// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Algebraic reduction of a set of cubes to its prime implicants.
//!
//! Each round compares pairs of cubes in the working set and merges those that differ in
//! exactly one position. Cubes that found no partner in a round are prime and are moved to
//! the result. The merged cubes form the next working set, and reduction stops once a round
//! merges nothing.

use crate::{cover::Cover, cube::Cube, errors::MinimizeError};
use itertools::Itertools;
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};

/// How candidate pairs are chosen in each round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CombineStrategy {
    /// Compare every unordered pair of cubes.
    Pairwise,

    /// Only compare cubes whose number of fixed-true positions differs by exactly one.
    ///
    /// Mergeable cubes always satisfy this, so the output is the same as `Pairwise` with
    /// fewer comparisons.
    BucketByOnes,
}

impl Default for CombineStrategy {
    fn default() -> Self {
        Self::Pairwise
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CombineState {
    /// The last round merged at least one pair; another round is pending.
    Reducing,
    /// No further merges are possible. The primes are final.
    Stable,
}

/// Iteratively merges cubes until a fixpoint is reached.
#[derive(Clone, Debug)]
pub struct TermCombiner {
    working: BTreeSet<Cube>,
    primes: BTreeSet<Cube>,
    strategy: CombineStrategy,
    state: CombineState,
    round: usize,
}

impl TermCombiner {
    pub fn new(cubes: impl IntoIterator<Item = Cube>) -> Self {
        let working: BTreeSet<_> = cubes.into_iter().collect();
        let state = if working.is_empty() {
            CombineState::Stable
        } else {
            CombineState::Reducing
        };
        Self {
            working,
            primes: BTreeSet::new(),
            strategy: CombineStrategy::default(),
            state,
            round: 0,
        }
    }

    pub fn with_strategy(mut self, strategy: CombineStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn state(&self) -> CombineState {
        self.state
    }

    /// The number of rounds run so far.
    #[inline]
    pub fn round(&self) -> usize {
        self.round
    }

    /// Runs one round of merging.
    pub fn step(&mut self) -> Result<CombineState, MinimizeError> {
        if self.state == CombineState::Stable {
            return Ok(CombineState::Stable);
        }

        let working: Vec<_> = std::mem::take(&mut self.working).into_iter().collect();
        check_lengths(&working)?;

        let mut consumed = vec![false; working.len()];
        let mut next = BTreeSet::new();
        for (i, j) in self.candidate_pairs(&working) {
            if let Some(merged) = working[i].merge(&working[j])? {
                trace!(
                    "merged {} and {} into {}",
                    working[i].matrix_display(),
                    working[j].matrix_display(),
                    merged.matrix_display()
                );
                next.insert(merged);
                consumed[i] = true;
                consumed[j] = true;
            }
        }

        let before = self.primes.len();
        self.primes.extend(
            working
                .into_iter()
                .zip(consumed)
                .filter_map(|(cube, consumed)| (!consumed).then(|| cube)),
        );

        self.round += 1;
        debug!(
            "round {}: {} merged cubes, {} new primes",
            self.round,
            next.len(),
            self.primes.len() - before
        );

        self.state = if next.is_empty() {
            CombineState::Stable
        } else {
            CombineState::Reducing
        };
        self.working = next;
        Ok(self.state)
    }

    /// Runs rounds until no merges remain and returns the prime implicants.
    pub fn run(mut self) -> Result<Cover, MinimizeError> {
        while self.step()? == CombineState::Reducing {}
        Ok(Cover::new(self.primes))
    }

    fn candidate_pairs(&self, working: &[Cube]) -> Vec<(usize, usize)> {
        match self.strategy {
            CombineStrategy::Pairwise => (0..working.len()).tuple_combinations().collect(),
            CombineStrategy::BucketByOnes => {
                let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
                for (ix, cube) in working.iter().enumerate() {
                    let ones = cube.input.iter().filter(|&&c| c == Some(true)).count();
                    buckets.entry(ones).or_default().push(ix);
                }
                buckets
                    .iter()
                    .filter_map(|(ones, lower)| {
                        buckets.get(&(ones + 1)).map(|upper| (lower, upper))
                    })
                    .flat_map(|(lower, upper)| {
                        lower.iter().copied().cartesian_product(upper.iter().copied())
                    })
                    .collect()
            }
        }
    }
}

/// Reduces `cubes` to their prime implicants with the default strategy.
pub fn combine_terms(cubes: impl IntoIterator<Item = Cube>) -> Result<Cover, MinimizeError> {
    TermCombiner::new(cubes).run()
}

fn check_lengths(cubes: &[Cube]) -> Result<(), MinimizeError> {
    if let Some(first) = cubes.first() {
        if let Some(other) = cubes.iter().find(|c| c.len() != first.len()) {
            return Err(MinimizeError::LengthMismatch {
                left: first.len(),
                right: other.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic_function::LogicFunction;
    use proptest::prelude::*;

    fn cover<const N: usize>(numeric: impl IntoIterator<Item = [u8; N]>) -> Cover {
        Cover::from_numeric(numeric).unwrap()
    }

    #[test]
    fn test_combine_basic() {
        let primes = combine_terms(cover([[0, 0, 0], [0, 0, 1]]).elements().clone()).unwrap();
        assert_eq!(primes, cover([[0, 0, 2]]));
    }

    #[test]
    fn test_no_combination() {
        let input = cover([[0, 0], [1, 1]]);
        let primes = combine_terms(input.elements().clone()).unwrap();
        assert_eq!(primes, input, "cubes at distance 2 both survive");
    }

    #[test]
    fn test_single_minterm() {
        let primes = combine_terms(cover([[1, 1]]).elements().clone()).unwrap();
        assert_eq!(primes, cover([[1, 1]]));
    }

    #[test]
    fn test_full_adder_carry() {
        // carry = 1 on rows 3, 5, 6, 7
        let primes = combine_terms(cover([[0, 1, 1], [1, 0, 1], [1, 1, 0], [1, 1, 1]])
            .elements()
            .clone())
        .unwrap();
        assert_eq!(primes, cover([[2, 1, 1], [1, 2, 1], [1, 1, 2]]));
    }

    #[test]
    fn test_all_rows() {
        let all = Cover::from_minterms(&(0..8).collect(), 3).unwrap();
        let mut combiner = TermCombiner::new(all.elements().clone());
        assert_eq!(combiner.step().unwrap(), CombineState::Reducing);
        assert_eq!(combiner.step().unwrap(), CombineState::Reducing);
        assert_eq!(combiner.step().unwrap(), CombineState::Reducing);
        assert_eq!(combiner.step().unwrap(), CombineState::Stable);
        assert_eq!(combiner.round(), 4);
        assert_eq!(combiner.run().unwrap(), Cover::new([Cube::universe(3).unwrap()]));
    }

    #[test]
    fn test_empty() {
        let combiner = TermCombiner::new(Vec::new());
        assert_eq!(combiner.state(), CombineState::Stable);
        assert!(combiner.run().unwrap().is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let cubes = vec![
            Cube::from_numeric([0, 1]).unwrap(),
            Cube::from_numeric([0, 1, 1]).unwrap(),
        ];
        for strategy in [CombineStrategy::Pairwise, CombineStrategy::BucketByOnes] {
            let err = TermCombiner::new(cubes.clone())
                .with_strategy(strategy)
                .run()
                .unwrap_err();
            assert!(matches!(err, MinimizeError::LengthMismatch { .. }));
        }
    }

    fn same_length_cubes() -> impl Strategy<Value = (Cube, Cube)> {
        (2_usize..=5).prop_flat_map(|len| {
            (
                any_with::<Cube>(Some(len)),
                any_with::<Cube>(Some(len)),
            )
        })
    }

    proptest! {
        #[test]
        fn proptest_primes_cover_exactly(function: LogicFunction) {
            let minterms = function.minterm_cover().unwrap();
            let primes = combine_terms(minterms.elements().clone()).unwrap();
            prop_assert_eq!(primes.coverage(), minterms.coverage());
            prop_assert!(primes.is_irredundant_by_containment(), "no prime contains another");
        }

        #[test]
        fn proptest_idempotent(function: LogicFunction) {
            let primes = combine_terms(function.minterm_cover().unwrap().elements().clone()).unwrap();
            let again = combine_terms(primes.elements().clone()).unwrap();
            prop_assert_eq!(again, primes);
        }

        #[test]
        fn proptest_bucketing_matches_pairwise(function: LogicFunction) {
            let minterms = function.maxterm_cover().unwrap();
            let pairwise = TermCombiner::new(minterms.elements().clone()).run().unwrap();
            let bucketed = TermCombiner::new(minterms.elements().clone())
                .with_strategy(CombineStrategy::BucketByOnes)
                .run()
                .unwrap();
            prop_assert_eq!(pairwise, bucketed);
        }

        #[test]
        fn proptest_merge_commutative((a, b) in same_length_cubes()) {
            prop_assert_eq!(a.merge(&b).unwrap(), b.merge(&a).unwrap());
            prop_assert_eq!(a.can_merge(&b).unwrap(), a.distance(&b).unwrap() == 1
                && a.input.iter().zip(&b.input).all(|(c, d)| c.is_none() == d.is_none()));
        }
    }
}
