//! Optional `lox.toml` configuration for the REPL/CLI layer.
//!
//! None of this is read by the core: [`crate::Session::run`] behaves
//! identically regardless of config. It only governs how `main.rs` drives
//! the REPL loop (prompt text, whether a bare top-level expression gets
//! echoed, whether output is colored).

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "lox.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Printed before each REPL line.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// REPL-only convenience: echo the value of a bare top-level expression
    /// statement (`1 + 2;` prints `3`). File mode never echoes, regardless
    /// of this setting.
    #[serde(default = "default_true")]
    pub echo_bare_expressions: bool,

    /// Whether diagnostics may use ANSI color. Currently unused by the
    /// plain-text diagnostic format this crate emits, but kept so a future
    /// richer renderer has somewhere to read the setting from.
    #[serde(default)]
    pub color: bool,
}

fn default_prompt() -> String {
    ">>> ".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            echo_bare_expressions: true,
            color: false,
        }
    }
}

impl Config {
    /// Looks for `lox.toml` in the current directory; falls back to
    /// defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::ParseConfig {
            path: path.display().to_string(),
            source,
        })
    }
}
