// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Status command behavior through the real binary.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mira() -> Command {
    cargo_bin_cmd!("mira")
}

fn init(temp: &TempDir) {
    mira()
        .args([
            "init",
            "--source-url",
            "https://bugs.example.com",
            "--project",
            "MC",
            "--owner",
            "example",
            "--repo",
            "mirror",
        ])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn fails_outside_a_workspace() {
    let temp = TempDir::new().unwrap();

    mira()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn empty_checkpoint_reports_zero() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    mira()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 tickets mirrored"));
}

#[test]
fn counts_tickets_and_comments_from_the_checkpoint() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    let checkpoint = concat!(
        r#"{"source_key":"MC-1","dest_id":1,"title":"First","body":"b","open":true,"labels":[],"#,
        r#""comments":[{"source_id":"10","dest_id":100,"body":"c"}]}"#,
        "\n",
        r#"{"source_key":"MC-2","dest_id":2,"title":"Second","body":"b","open":false,"labels":["fixed"],"comments":[]}"#,
        "\n",
    );
    std::fs::write(temp.path().join(".mira/tickets.jsonl"), checkpoint).unwrap();

    mira()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 tickets mirrored (1 open, 1 closed)"))
        .stdout(predicate::str::contains("1 comments"));
}

#[test]
fn works_from_a_subdirectory() {
    let temp = TempDir::new().unwrap();
    init(&temp);
    std::fs::create_dir_all(temp.path().join("deep/nested")).unwrap();

    mira()
        .arg("status")
        .current_dir(temp.path().join("deep/nested"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0 tickets mirrored"));
}

#[test]
fn flags_tickets_awaiting_creation() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    let checkpoint = concat!(
        r#"{"source_key":"MC-1","title":"First","body":"b","open":true,"labels":[],"comments":[]}"#,
        "\n",
    );
    std::fs::write(temp.path().join(".mira/tickets.jsonl"), checkpoint).unwrap();

    mira()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 tickets awaiting destination creation"));
}
