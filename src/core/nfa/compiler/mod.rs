// SPDX-License-Identifier: MIT OR Apache-2.0

//! NFA Compiler - turns a pattern chain into an [`Nfa`]
//!
//! The chain is walked from its tail to its head so that every element's
//! continuation state already exists when the element is expanded:
//!
//! ```text
//! begin("start") -> followed_by("middle").zero_or_more() -> followed_by("end")
//!
//!   1. $endState$                 (final)
//!   2. end     --TAKE-->    $endState$
//!   3. middle  --PROCEED--> end   (plus its loop states)
//!   4. start   --TAKE-->    middle (marked start)
//! ```
//!
//! Compilation is all-or-nothing: states are collected in a local builder and
//! only returned once the whole chain has been expanded and verified.

pub mod expansion;

use crate::core::config::CompilerConfig;
use crate::core::error::{CepError, CepResult};
use crate::core::nfa::{Nfa, NfaBuilder, StateKind};
use crate::core::validation::validate_unique_names;
use crate::query_api::pattern::Pattern;

pub use expansion::Expansion;

/// Compiles pattern chains into automata. Holds only configuration, so one
/// compiler can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct NfaCompiler {
    config: CompilerConfig,
}

impl NfaCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile `pattern` into an automaton
    ///
    /// # Errors
    /// * `Configuration` if the compiler config is invalid
    /// * `MalformedPattern` if two elements share a name
    /// * `InternalConsistencyFault` if the produced automaton breaks an
    ///   invariant (only checked when `verify_invariants` is set)
    pub fn compile<E: 'static>(&self, pattern: &Pattern<E>) -> CepResult<Nfa<E>> {
        if let Err(e) = self.config.validate() {
            log::warn!("[NfaCompiler] Invalid configuration: {}", e);
            return Err(e);
        }

        if let Err(e) = validate_unique_names(pattern) {
            log::warn!("[NfaCompiler] Rejecting pattern '{}': {}", pattern.name(), e);
            return Err(CepError::from(e));
        }

        let mut builder = NfaBuilder::with_capacity(2 * pattern.len() + 1)
            .with_trace(self.config.log_enabled(log::Level::Trace));
        let final_state = builder.add_state(&self.config.final_state_name, StateKind::Final);

        let mut next = final_state;
        for element in pattern.iter() {
            let expansion = expansion::expand(&mut builder, element, next);
            if self.config.log_enabled(log::Level::Debug) {
                log::debug!(
                    "[NfaCompiler] Expanded '{}' ({}, {:?}) into {} state(s), entry {}",
                    element.name(),
                    element.quantifier(),
                    element.strictness(),
                    expansion.states.len(),
                    expansion.entry
                );
            }
            next = expansion.entry;
        }

        let start = next;
        builder.set_kind(start, StateKind::Start);
        let state_count = builder.len();
        let nfa = builder.build(start, final_state);

        if self.config.verify_invariants {
            if let Err(e) = nfa.verify() {
                log::error!("[NfaCompiler] {}", e);
                return Err(e);
            }
        }

        if self.config.log_enabled(log::Level::Info) {
            log::info!(
                "[NfaCompiler] Compiled pattern {:?} into {} states",
                pattern.names(),
                state_count
            );
        }
        Ok(nfa)
    }
}

/// Compile with the default configuration.
pub fn compile<E: 'static>(pattern: &Pattern<E>) -> CepResult<Nfa<E>> {
    NfaCompiler::new().compile(pattern)
}
