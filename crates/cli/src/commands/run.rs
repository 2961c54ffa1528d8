// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing_subscriber::EnvFilter;

use mira_core::CheckpointStore;

use crate::config::{checkpoint_path, dest_token, find_work_dir, source_token, Config};
use crate::error::Result;
use crate::sync::{Driver, GitHubDest, JiraSource, ReliableExecutor, RetryPolicy};

pub fn run(verbose: bool) -> Result<()> {
    init_tracing(verbose);

    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;

    let source = JiraSource::new(&config.source, source_token()?);
    let dest = GitHubDest::new(&config.destination, dest_token()?);
    let policy = RetryPolicy {
        max_permanent_attempts: config.retry.as_ref().and_then(|r| r.max_permanent_attempts),
        ..RetryPolicy::default()
    };
    let executor = ReliableExecutor::new(dest, policy);
    let store = CheckpointStore::new(checkpoint_path(&work_dir));

    let mut driver = Driver::new(source, executor, store, config);
    let report = driver.run()?;

    println!(
        "mirrored {} tickets in {:.1}s: {} created, {} updated, {} unchanged",
        report.fetched,
        report.elapsed.as_secs_f64(),
        report.created,
        report.updated,
        report.unchanged
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
