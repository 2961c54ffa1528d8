// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::{DestError, SourceError};

/// All possible errors that can occur in the mirars library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'mira init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("source tracker error: {0}")]
    Source(#[from] SourceError),

    #[error("destination tracker error: {0}")]
    Dest(#[from] DestError),

    #[error("{0}")]
    Core(#[from] mira_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for mirars operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
