// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::config::{
    init_work_dir, Config, DestinationConfig, RenderConfig, SourceConfig, DEST_TOKEN_VAR,
    SOURCE_TOKEN_VAR,
};
use crate::error::Result;

#[allow(clippy::too_many_arguments)]
pub fn run(
    path: Option<String>,
    source_url: String,
    project: String,
    owner: String,
    repo: String,
    api_url: String,
    current_version: Option<String>,
    page_size: u64,
) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let config = Config {
        source: SourceConfig {
            base_url: source_url,
            project,
            page_size,
        },
        destination: DestinationConfig {
            api_url,
            owner,
            repo,
        },
        render: RenderConfig {
            current_version: current_version.unwrap_or_default(),
        },
        retry: None,
    };

    let work_dir = init_work_dir(&target_path, &config)?;

    println!("Initialized mirror workspace at {}", work_dir.display());
    println!(
        "Source: {} project {}",
        config.source.base_url, config.source.project
    );
    println!(
        "Destination: {}/{}",
        config.destination.owner, config.destination.repo
    );
    println!(
        "Set {} and {} before running 'mira run'",
        SOURCE_TOKEN_VAR, DEST_TOKEN_VAR
    );

    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
