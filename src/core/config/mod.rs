// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod compiler_config;

pub use compiler_config::{CompilerConfig, LogLevel, DEFAULT_FINAL_STATE_NAME};
