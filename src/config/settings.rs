//! Generator settings file.
//!
//! A TOML file carrying a preset plus the same overrides the builder
//! accepts. Seed and info are plain strings whose UTF-8 bytes are used
//! as-is.

use super::builder::Overrides;
use super::types::{
    ExpansionMode, HashAlgorithm, MixingMode, OutputMode, SecurityPreset, ThreadingMode,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings file: {0}")]
    FileReadError(String),
    /// The file is not valid settings TOML.
    #[error("failed to parse settings file: {0}")]
    ParseError(String),
}

/// Full settings file format.
///
/// ```toml
/// preset = "secure"
/// output_mode = "hex"
/// sources = ["cpu", "rdrand"]
/// seed = "extra seed material"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings {
    /// Preset the overrides are applied to.
    #[serde(default)]
    pub preset: SecurityPreset,
    /// Collection rounds.
    pub complexity: Option<i32>,
    /// Digest algorithm.
    pub hash_algorithm: Option<HashAlgorithm>,
    /// Expansion mode.
    pub expansion_mode: Option<ExpansionMode>,
    /// Mixing mode.
    pub mixing_mode: Option<MixingMode>,
    /// `user_lock` is accepted but carries no callbacks from a file.
    pub threading_mode: Option<ThreadingMode>,
    /// Output encoding.
    pub output_mode: Option<OutputMode>,
    /// Source names to enable; all others are disabled.
    pub sources: Option<Vec<String>>,
    /// Seed text, used as raw bytes.
    pub seed: Option<String>,
    /// HKDF context text, used as raw bytes.
    pub info: Option<String>,
}

impl GeneratorSettings {
    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| SettingsError::ParseError(e.to_string()))
    }

    /// Builder overrides borrowing this file's seed, info and source names.
    pub fn overrides(&self) -> Overrides<'_> {
        Overrides {
            hash_algorithm: self.hash_algorithm,
            expansion_mode: self.expansion_mode,
            output_mode: self.output_mode,
            complexity: self.complexity,
            mixing_mode: self.mixing_mode,
            threading_mode: self.threading_mode,
            user_lock: None,
            seed: self.seed.as_deref().map(str::as_bytes),
            info: self.info.as_deref().map(str::as_bytes),
            sources: self
                .sources
                .as_ref()
                .map(|names| names.iter().map(String::as_str).collect()),
        }
    }
}
