// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Compiler Configuration
//!
//! Settings for [`NfaCompiler`](crate::core::nfa::compiler::NfaCompiler),
//! loadable from TOML or YAML. Every key is optional.
//!
//! ```toml
//! final_state_name = "$endState$"
//! verify_invariants = true
//! log_level = "warn"
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CepError, CepResult};

/// Reserved name of the accepting state.
pub const DEFAULT_FINAL_STATE_NAME: &str = "$endState$";

/// Log level the host application should use for compiler output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Matching filter for the `log` facade
    pub const fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Name given to the single accepting state
    pub final_state_name: String,
    /// Re-check automaton invariants after every compilation
    pub verify_invariants: bool,
    /// Most verbose level the compiler emits. Warnings and errors always
    /// pass; the installed logger may still filter further.
    pub log_level: LogLevel,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            final_state_name: DEFAULT_FINAL_STATE_NAME.to_string(),
            verify_invariants: true,
            log_level: LogLevel::default(),
        }
    }
}

impl CompilerConfig {
    pub fn from_toml_str(content: &str) -> CepResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CepError::configuration(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> CepResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| CepError::configuration(format!("Invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> CepResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => Err(CepError::configuration(format!(
                "Unsupported config file extension {:?} for '{}'. Expected .toml, .yaml or .yml",
                other,
                path.display()
            ))),
        }
    }

    pub fn validate(&self) -> CepResult<()> {
        if self.final_state_name.trim().is_empty() {
            return Err(CepError::configuration_with_key(
                "final state name must not be empty",
                "final_state_name",
            ));
        }
        Ok(())
    }

    pub fn with_final_state_name(mut self, name: impl Into<String>) -> Self {
        self.final_state_name = name.into();
        self
    }

    pub fn with_verify_invariants(mut self, verify: bool) -> Self {
        self.verify_invariants = verify;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Whether the compiler should emit records at `level`
    pub fn log_enabled(&self, level: log::Level) -> bool {
        level <= log::Level::Warn || level <= self.log_level.to_level_filter()
    }
}
