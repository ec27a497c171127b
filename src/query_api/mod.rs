// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod pattern;

pub use pattern::{Occurrences, Pattern, Quantifier, Strictness};
