// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use color_eyre::{eyre::eyre, Result};
use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Generates values from proptest strategies deterministically, given a seed string.
#[derive(Debug)]
pub struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    pub fn from_seed(seed: impl AsRef<[u8]>) -> Self {
        // ChaCha takes a 32-byte seed: hash the seed string with four different keys.
        let mut bytes = [0_u8; 32];
        for (key, chunk) in bytes.chunks_exact_mut(8).enumerate() {
            let mut hasher = XxHash64::with_seed(key as u64);
            hasher.write(seed.as_ref());
            chunk.copy_from_slice(&hasher.finish().to_le_bytes());
        }
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &bytes);
        Self {
            runner: TestRunner::new_with_rng(Config::default(), rng),
        }
    }

    /// Returns a new generator seeded from this one.
    ///
    /// Values drawn from the new generator do not change the values later drawn from `self`.
    pub fn partial_clone(&mut self) -> Self {
        Self {
            runner: TestRunner::new_with_rng(Config::default(), self.runner.new_rng()),
        }
    }

    pub fn generate<S: Strategy>(&mut self, strategy: S) -> Result<S::Value> {
        let tree = strategy
            .new_tree(&mut self.runner)
            .map_err(|reason| eyre!("failed to generate value: {}", reason))?;
        Ok(tree.current())
    }
}
