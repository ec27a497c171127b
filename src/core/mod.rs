// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod config;
pub mod error;
pub mod nfa;
pub mod validation;

pub use error::{CepError, CepResult};
