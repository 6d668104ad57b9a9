// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod caches;
mod cover_impl;
mod display;

pub use cover_impl::*;
pub use display::*;
