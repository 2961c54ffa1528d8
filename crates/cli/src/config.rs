// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mirror configuration management.
//!
//! Configuration is stored in `.mira/config.toml` and describes the source
//! project to mirror and the destination repository to mirror into. The
//! checkpoint lives next to it as `.mira/tickets.jsonl`.
//!
//! Credentials never go in the file: they come from `MIRA_SOURCE_TOKEN` and
//! `MIRA_DEST_TOKEN` (with `GITHUB_TOKEN` as a fallback for the latter).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".mira";
const CONFIG_FILE_NAME: &str = "config.toml";
const CHECKPOINT_FILE_NAME: &str = "tickets.jsonl";

/// Environment variable holding the source tracker bearer token.
pub const SOURCE_TOKEN_VAR: &str = "MIRA_SOURCE_TOKEN";
/// Environment variable holding the destination tracker bearer token.
pub const DEST_TOKEN_VAR: &str = "MIRA_DEST_TOKEN";
/// Fallback for [`DEST_TOKEN_VAR`].
pub const DEST_TOKEN_FALLBACK_VAR: &str = "GITHUB_TOKEN";

/// Mirror configuration stored in `.mira/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where tickets come from.
    pub source: SourceConfig,
    /// Where mirrored issues go.
    pub destination: DestinationConfig,
    /// Rendering knobs.
    #[serde(default)]
    pub render: RenderConfig,
    /// Optional bounded-retry policy. Absent means retry forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryConfig>,
}

/// Source tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the source tracker (e.g. `https://bugs.example.com`).
    pub base_url: String,
    /// Project key whose tickets are mirrored (e.g. `MC`).
    pub project: String,
    /// Search page size.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

/// Destination tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Destination API root.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

/// Rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Version that earns tickets an `affects <version>` label when it
    /// appears in their affected versions. Empty disables the label.
    #[serde(default)]
    pub current_version: String,
}

/// Bounded-retry settings for destination mutations.
///
/// By default every destination call is retried until it succeeds, which
/// mirrors the destination's write-only contract but can spin forever on a
/// request the server will never accept. Setting `max_permanent_attempts`
/// makes clearly permanent errors (4xx other than 403/429) give up after
/// that many attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_permanent_attempts: Option<u32>,
}

fn default_page_size() -> u64 {
    1000
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Config {
    /// Loads configuration from the given `.mira/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to the given `.mira/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the .mira directory by walking up from the current directory.
pub fn find_work_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Path of the JSONL checkpoint inside the work directory.
pub fn checkpoint_path(work_dir: &Path) -> PathBuf {
    work_dir.join(CHECKPOINT_FILE_NAME)
}

/// Initialize a new .mira directory at the given path.
///
/// An existing but config-less `.mira/` directory is adopted rather than
/// rejected.
pub fn init_work_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;

    Ok(work_dir)
}

/// Source tracker bearer token from the environment.
pub fn source_token() -> Result<String> {
    std::env::var(SOURCE_TOKEN_VAR).map_err(|_| Error::MissingCredential(SOURCE_TOKEN_VAR))
}

/// Destination tracker bearer token from the environment.
pub fn dest_token() -> Result<String> {
    std::env::var(DEST_TOKEN_VAR)
        .or_else(|_| std::env::var(DEST_TOKEN_FALLBACK_VAR))
        .map_err(|_| Error::MissingCredential(DEST_TOKEN_VAR))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
