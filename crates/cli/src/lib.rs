// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mirars - a batch ticket mirror library.
//!
//! This crate provides the functionality behind the `mira` CLI tool, which
//! mirrors a source tracker's tickets into GitHub-style issues and keeps the
//! mirror current across repeated runs.
//!
//! # Main Components
//!
//! - [`sync::Driver`] - pages the source project and reconciles each ticket
//! - [`sync::ReconcileEngine`] - computes and executes minimal destination
//!   mutations ([`sync::Reconciliation`] says what happened)
//! - [`sync::ReliableExecutor`] - blocking retry around the destination
//! - [`render`] - ticket and comment body rendering
//! - [`Config`] - workspace configuration under `.mira/`
//! - [`Error`] - error types for all operations
//!
//! # Initialization
//!
//! Use [`config::init_work_dir`] to create a `.mira/` workspace, then find
//! it again from anywhere below:
//!
//! ```rust,ignore
//! use mirars::config::{checkpoint_path, find_work_dir, Config};
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let checkpoint = checkpoint_path(&work_dir);
//! ```

mod cli;
mod commands;

pub mod config;
pub mod error;
pub mod render;
pub mod sync;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init {
            path,
            source_url,
            project,
            owner,
            repo,
            api_url,
            current_version,
            page_size,
        } => commands::init::run(
            path,
            source_url,
            project,
            owner,
            repo,
            api_url,
            current_version,
            page_size,
        ),
        Command::Run { verbose } => commands::run::run(verbose),
        Command::Status => commands::status::run(),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "mira", &mut std::io::stdout());
            Ok(())
        }
    }
}
