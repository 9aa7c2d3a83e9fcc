//! CLI-level error type.
//!
//! Covers failures that happen before the core ever runs: an unreadable
//! script file, a malformed config. Parse/runtime errors from the language
//! itself are reported through [`crate::diagnostics`] instead; they are
//! part of the core's documented contract, not a CLI-layer failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("could not read source file '{path}': {source}")]
    ReadSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read config file '{path}': {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file '{path}': {source}")]
    ParseConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
