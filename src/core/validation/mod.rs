// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern validation
//!
//! Structural checks run on a pattern chain before any automaton state is
//! created. A failure rejects the whole pattern.

pub mod pattern_names;

pub use pattern_names::{validate_unique_names, PatternValidationError};
