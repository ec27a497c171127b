// SPDX-License-Identifier: MIT OR Apache-2.0

//! EventFlux CEP pattern compiler
//!
//! Turns a chained event pattern (`begin("a").followed_by("b").next("c")`) into
//! a nondeterministic finite automaton that a streaming matcher can walk.
//!
//! ```rust
//! use eventflux_cep::prelude::*;
//!
//! struct Trade {
//!     symbol: String,
//!     price: f64,
//! }
//!
//! # fn main() -> Result<(), CepError> {
//! let pattern = Pattern::<Trade>::begin("start")
//!     .where_(|t: &Trade| t.price > 2.0)
//!     .followed_by("middle")
//!     .zero_or_more()
//!     .followed_by("end")
//!     .where_(|t: &Trade| t.symbol == "end");
//!
//! let nfa = NfaCompiler::new().compile(&pattern)?;
//! assert!(nfa.start_state().is_start());
//! assert_eq!(nfa.len(), 5);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod query_api;

pub mod prelude {
    pub use crate::core::config::CompilerConfig;
    pub use crate::core::error::{CepError, CepResult};
    pub use crate::core::nfa::compiler::NfaCompiler;
    pub use crate::core::nfa::{
        Nfa, NfaFactory, State, StateId, StateKind, StateTransition, StateTransitionAction,
    };
    pub use crate::query_api::pattern::condition::{Condition, Subtyped};
    pub use crate::query_api::pattern::{Occurrences, Pattern, Quantifier, Strictness};
}
