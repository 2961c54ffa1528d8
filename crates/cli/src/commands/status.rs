// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use mira_core::CheckpointStore;

use crate::config::{checkpoint_path, find_work_dir};
use crate::error::Result;

pub fn run() -> Result<()> {
    let work_dir = find_work_dir()?;
    let store = CheckpointStore::new(checkpoint_path(&work_dir));
    let tickets = store.load()?;

    let open = tickets.iter().filter(|t| t.open).count();
    let pending = tickets.iter().filter(|t| t.dest_id.is_none()).count();
    let comments: usize = tickets.iter().map(|t| t.comments.len()).sum();

    println!(
        "{} tickets mirrored ({} open, {} closed)",
        tickets.len(),
        open,
        tickets.len() - open
    );
    println!("{} comments", comments);
    if pending > 0 {
        println!("{} tickets awaiting destination creation", pending);
    }

    Ok(())
}
