// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand};
use clap_complete::Shell;

const QUICKSTART_HELP: &str = "\
Get started:
  mira init --source-url https://bugs.example.com --project MC \\
            --owner example --repo mirror
  MIRA_SOURCE_TOKEN=... GITHUB_TOKEN=... mira run
  mira status";

#[derive(Parser)]
#[command(name = "mira")]
#[command(about = "Mirror a tracker's tickets into GitHub-style issues, batch by batch")]
#[command(
    long_about = "Mirror a tracker's tickets into GitHub-style issues.\n\n\
    Each run walks the source project oldest-first, pushes whatever changed\n\
    to the destination, and checkpoints progress so interrupted runs resume\n\
    for free."
)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a mirror workspace
    #[command(after_help = "Examples:\n  \
        mira init --source-url https://bugs.example.com --project MC \\\n            \
        --owner example --repo mirror\n  \
        mira init --source-url https://bugs.example.com --project MC \\\n            \
        --owner example --repo mirror --current-version 1.12.2")]
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<String>,

        /// Source tracker base URL
        #[arg(long)]
        source_url: String,

        /// Source project key (e.g. MC)
        #[arg(long)]
        project: String,

        /// Destination repository owner
        #[arg(long)]
        owner: String,

        /// Destination repository name
        #[arg(long)]
        repo: String,

        /// Destination API root
        #[arg(long, default_value = "https://api.github.com")]
        api_url: String,

        /// Version whose affected tickets get an "affects" label
        #[arg(long)]
        current_version: Option<String>,

        /// Tickets fetched per search page
        #[arg(long, default_value_t = 1000)]
        page_size: u64,
    },

    /// Run one full mirror pass
    Run {
        /// Log at debug level
        #[arg(long, short)]
        verbose: bool,
    },

    /// Summarize the local checkpoint without touching the network
    Status,

    /// Generate shell completions
    #[command(after_help = "Examples:\n  \
        mira completion bash > ~/.local/share/bash-completion/completions/mira\n  \
        mira completion zsh > ~/.zfunc/_mira\n  \
        mira completion fish > ~/.config/fish/completions/mira.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
