// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern Name Uniqueness
//!
//! Every element name in a chain identifies the events it matched, so two
//! elements may never share a name. Names compare by exact, case-sensitive
//! string equality.

use std::collections::HashSet;

use thiserror::Error;

use crate::query_api::pattern::Pattern;

/// Pattern validation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternValidationError {
    #[error("Duplicate pattern name: {name}. Pattern names must be unique.")]
    DuplicatePatternName { name: String },
}

impl PatternValidationError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicatePatternName { name: name.into() }
    }

    /// The element name that caused the failure
    pub fn pattern_name(&self) -> &str {
        match self {
            PatternValidationError::DuplicatePatternName { name } => name,
        }
    }
}

/// Check that no two elements of the chain share a name
///
/// Walks from the tail to the head and fails on the first name seen twice.
/// For `begin("a").followed_by("b").followed_by("a")` the reported name is `a`.
pub fn validate_unique_names<E>(pattern: &Pattern<E>) -> Result<(), PatternValidationError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(pattern.len());

    for element in pattern.iter() {
        if !seen.insert(element.name()) {
            return Err(PatternValidationError::duplicate_name(element.name()));
        }
    }

    Ok(())
}
