// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::Cover,
    cube::{Cube, MAX_INPUTS},
    logic_function::{LogicFunction, DEFAULT_VARIABLES, MIN_VARIABLES},
};
use proptest::prelude::*;

impl Arbitrary for Cube {
    /// The cube length. Defaults to any supported variable count.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(len: Self::Parameters) -> Self::Strategy {
        let len = len.map_or(MIN_VARIABLES..=MAX_INPUTS, |len| len..=len);
        prop::collection::vec(any::<Option<bool>>(), len)
            .prop_map(|input| Cube::new(&input).expect("length is at most MAX_INPUTS"))
            .boxed()
    }
}

impl Arbitrary for Cover {
    /// The length of every cube in the cover.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(len: Self::Parameters) -> Self::Strategy {
        let len = len.map_or(MIN_VARIABLES..=MAX_INPUTS, |len| len..=len);
        len.prop_flat_map(|len| {
            prop::collection::btree_set(any_with::<Cube>(Some(len)), 0..(2 * len))
        })
        .prop_map(|elements| Self::new(elements))
        .boxed()
    }
}

impl Arbitrary for LogicFunction {
    /// The number of variables. Defaults to any supported count.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(variable_count: Self::Parameters) -> Self::Strategy {
        let variable_count =
            variable_count.map_or(MIN_VARIABLES..=MAX_INPUTS, |count| count..=count);
        variable_count
            .prop_flat_map(|count| {
                (
                    Just(count),
                    prop::collection::vec(any::<bool>(), 1 << count),
                )
            })
            .prop_map(|(count, values)| {
                LogicFunction::from_truth_values(&DEFAULT_VARIABLES[..count], &values)
                    .expect("generated truth values match the variable count")
            })
            .boxed()
    }
}
