// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::Cube, minterms::MintermSet};
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;

/// Cache for cover data.
#[derive(Clone, Debug, Default)]
pub(super) struct CoverCache {
    coverage: OnceCell<MintermSet>,
}

impl CoverCache {
    pub(super) fn invalidate(&mut self) {
        self.coverage = OnceCell::new();
    }

    pub(super) fn get_or_init_coverage(&self, elements: &BTreeSet<Cube>) -> &MintermSet {
        self.coverage.get_or_init(|| {
            let mut coverage = MintermSet::new();
            for cube in elements {
                coverage.union_with(&cube.expand());
            }
            coverage
        })
    }
}
