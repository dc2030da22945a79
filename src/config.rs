// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generator configuration.
//!
//! Settings come from defaults, then an optional TOML file, then the
//! environment:
//!
//! | Key          | Environment            | Default             |
//! |--------------|------------------------|---------------------|
//! | `cache_dir`  | `MARSHALGEN_CACHE_DIR` | `.marshalgen-cache` |
//! | `use_cache`  | `MARSHALGEN_USE_CACHE` | `true`              |
//! | `print_out`  | `MARSHALGEN_PRINT_OUT` | `false`             |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{MarshalError, Result};

/// Environment variable overriding the cache directory.
pub const ENV_CACHE_DIR: &str = "MARSHALGEN_CACHE_DIR";
/// Environment variable enabling or disabling the cache.
pub const ENV_USE_CACHE: &str = "MARSHALGEN_USE_CACHE";
/// Environment variable enabling printing of generated sources.
pub const ENV_PRINT_OUT: &str = "MARSHALGEN_PRINT_OUT";

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = ".marshalgen-cache";

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn default_true() -> bool {
    true
}

/// Configuration for factory generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory holding cached factory sources and fingerprints
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Reuse a cached factory whose fingerprint matches
    #[serde(default = "default_true")]
    pub use_cache: bool,
    /// Print every freshly generated source to stdout
    pub print_out: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            use_cache: true,
            print_out: false,
        }
    }
}

impl GeneratorConfig {
    /// Parse a TOML configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MarshalError::Config(e.to_string()))
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MarshalError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::Config`] for a boolean variable that is not
    /// one of `1/0`, `true/false`, `yes/no` or `on/off`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|d| !d.trim().is_empty()) {
            self.cache_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_USE_CACHE) {
            self.use_cache = parse_flag(ENV_USE_CACHE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PRINT_OUT) {
            self.print_out = parse_flag(ENV_PRINT_OUT, &raw)?;
        }
        Ok(())
    }

    /// Set the cache directory.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Enable or disable the cache.
    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Enable or disable printing of generated sources.
    pub fn print_out(mut self, enabled: bool) -> Self {
        self.print_out = enabled;
        self
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(MarshalError::Config(format!(
            "{key}: expected a boolean, found '{other}'"
        ))),
    }
}
