// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::{CoverMatrixDisplay, ExpressionDisplay},
    cube::{Cube, Form},
    errors::{InvalidCubeNumeric, MinimizeError},
    minterms::MintermSet,
};
use std::{
    collections::BTreeSet,
    ops::{BitOr, Index},
};

use super::caches::CoverCache;

/// An ordered set of cubes: the terms of a DNF or the clauses of a CNF.
///
/// Cubes are kept in a `BTreeSet`, so iteration order is deterministic.
#[derive(Clone, Default)]
pub struct Cover {
    elements: CoverElements,
    cache: CoverCache,
}

impl Cover {
    pub fn new(elements: impl IntoIterator<Item = Cube>) -> Self {
        Self {
            elements: CoverElements(elements.into_iter().collect()),
            cache: CoverCache::default(),
        }
    }

    pub fn from_numeric<const N: usize>(
        numeric: impl IntoIterator<Item = [u8; N]>,
    ) -> Result<Self, InvalidCubeNumeric> {
        let elements: BTreeSet<_> = numeric
            .into_iter()
            .map(Cube::from_numeric)
            .collect::<Result<_, _>>()?;
        Ok(Self::new(elements))
    }

    /// Returns the cover made of one fully specified cube per row in `minterms`.
    pub fn from_minterms(
        minterms: &MintermSet,
        variable_count: usize,
    ) -> Result<Self, MinimizeError> {
        let elements: BTreeSet<_> = minterms
            .iter()
            .map(|minterm| Cube::from_minterm(minterm, variable_count))
            .collect::<Result<_, _>>()?;
        Ok(Self::new(elements))
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.elements().len()
    }

    #[inline]
    pub fn elements(&self) -> &BTreeSet<Cube> {
        &self.elements.0
    }

    #[inline]
    pub fn elements_mut(&mut self) -> &mut BTreeSet<Cube> {
        self.cache.invalidate();
        &mut self.elements.0
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Cube> + '_ {
        self.elements().iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    #[inline]
    pub fn contains(&self, cube: &Cube) -> bool {
        self.elements().contains(cube)
    }

    /// Returns the union of the rows covered by every cube in this cover.
    #[inline]
    pub fn coverage(&self) -> &MintermSet {
        self.cache.get_or_init_coverage(self.elements())
    }

    /// Total number of literals over all cubes.
    pub fn literal_count(&self) -> usize {
        self.elements().iter().map(Cube::literal_count).sum()
    }

    /// Returns true if no cube of this cover is strictly contained in another.
    pub fn is_irredundant_by_containment(&self) -> bool {
        self.elements().iter().all(|elem| {
            !self
                .elements()
                .iter()
                .any(|other| other.strictly_contains(elem))
        })
    }

    /// Returns true if any cube, read as a product term, is true for `values`.
    pub fn evaluate(&self, values: &[bool]) -> bool {
        self.elements().iter().any(|elem| elem.evaluate(values))
    }

    /// Checks that `self` and `other` are true on exactly the same rows.
    ///
    /// Returns the first row (as variable values) on which they differ.
    pub fn check_logically_equivalent(
        &self,
        other: &Self,
        variable_count: usize,
    ) -> Result<(), Vec<bool>> {
        for input_bits in 0..(1_usize << variable_count) {
            let values: Vec<bool> = (0..variable_count)
                .map(|ix| (input_bits >> (variable_count - 1 - ix)) & 1 == 1)
                .collect();
            if self.evaluate(&values) != other.evaluate(&values) {
                return Err(values);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn matrix_display(&self) -> CoverMatrixDisplay<'_> {
        CoverMatrixDisplay::new(self)
    }

    #[inline]
    pub fn expression_display<'a, S: AsRef<str>>(
        &'a self,
        variables: &'a [S],
        form: Form,
    ) -> ExpressionDisplay<'a, S> {
        ExpressionDisplay::new(self, variables, form)
    }

    fn union_impl(&self, other: &Self) -> Self {
        let elements = self.elements().iter().chain(other.elements()).cloned();
        Self::new(elements)
    }
}

impl Index<usize> for Cover {
    type Output = Cube;

    /// Returns the `index`th cube in iteration order.
    ///
    /// Panics if `index >= self.cube_count()`.
    fn index(&self, index: usize) -> &Cube {
        self.elements()
            .iter()
            .nth(index)
            .unwrap_or_else(|| panic!("cube index {} out of range", index))
    }
}

impl FromIterator<Cube> for Cover {
    fn from_iter<I: IntoIterator<Item = Cube>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl BitOr for Cover {
    type Output = Cover;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union_impl(&rhs)
    }
}

impl<'a, 'b> BitOr<&'a Cover> for &'b Cover {
    type Output = Cover;

    fn bitor(self, rhs: &'a Cover) -> Self::Output {
        self.union_impl(rhs)
    }
}

impl PartialEq for Cover {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for Cover {}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct CoverElements(BTreeSet<Cube>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::MAX_INPUTS;
    use proptest::prelude::*;

    #[test]
    fn test_coverage() {
        let cover = Cover::from_numeric([[2, 0, 1], [1, 1, 2]]).unwrap();
        assert_eq!(
            cover.coverage().iter().collect::<Vec<_>>(),
            vec![1, 5, 6, 7]
        );
        assert_eq!(cover.literal_count(), 4);
    }

    #[test]
    fn test_cache_invalidation() {
        let mut cover = Cover::from_numeric([[0, 0]]).unwrap();
        assert_eq!(cover.coverage().len(), 1);
        cover
            .elements_mut()
            .insert(Cube::from_numeric([1, 2]).unwrap());
        assert_eq!(
            cover.coverage().iter().collect::<Vec<_>>(),
            vec![0, 2, 3],
            "coverage recomputed after mutation"
        );
    }

    #[test]
    fn test_irredundant_by_containment() {
        let redundant = Cover::from_numeric([[2, 2, 1], [0, 1, 1], [1, 0, 2], [1, 0, 0]]).unwrap();
        assert!(!redundant.is_irredundant_by_containment());
        let maximal = Cover::from_numeric([[2, 2, 1], [1, 0, 2]]).unwrap();
        assert!(maximal.is_irredundant_by_containment());
    }

    #[test]
    fn test_from_minterms() {
        let cover = Cover::from_minterms(&[1, 2].into_iter().collect(), 2).unwrap();
        assert_eq!(cover, Cover::from_numeric([[0, 1], [1, 0]]).unwrap());
        assert!(Cover::from_minterms(&MintermSet::new(), MAX_INPUTS + 1).is_err());
    }

    #[test]
    fn test_logically_equivalent() {
        let merged = Cover::from_numeric([[1, 2]]).unwrap();
        let split = Cover::from_numeric([[1, 0], [1, 1]]).unwrap();
        merged
            .check_logically_equivalent(&split, 2)
            .expect("a and (a & b | a & ¬b) are equivalent");

        let other = Cover::from_numeric([[2, 1]]).unwrap();
        assert_eq!(
            merged.check_logically_equivalent(&other, 2),
            Err(vec![false, true])
        );
    }

    #[test]
    fn test_union_and_index() {
        let a = Cover::from_numeric([[0, 1]]).unwrap();
        let b = Cover::from_numeric([[1, 1], [0, 1]]).unwrap();
        let union = &a | &b;
        assert_eq!(union.cube_count(), 2);
        assert_eq!(union[0], Cube::from_numeric([0, 1]).unwrap());
        assert_eq!(union[1], Cube::from_numeric([1, 1]).unwrap());
    }

    proptest! {
        #[test]
        fn proptest_coverage_matches_evaluate(cover: Cover) {
            let variable_count = cover.iter().next().map_or(0, Cube::len);
            for row in 0..(1_usize << variable_count) {
                let values = crate::logic_function::row_values(row, variable_count);
                prop_assert_eq!(cover.coverage().contains(row), cover.evaluate(&values));
            }
        }
    }
}
