// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Completion command behavior through the real binary.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

fn mira() -> Command {
    cargo_bin_cmd!("mira")
}

#[yare::parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
    elvish = { "elvish" },
    powershell = { "powershell" },
)]
fn completion_generates_non_empty_output(shell: &str) {
    let output = mira().args(["completion", shell]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.is_empty(), "completion output should not be empty");
}

#[test]
fn completion_bash_mentions_every_subcommand() {
    let output = mira().args(["completion", "bash"]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["init", "run", "status", "completion"] {
        assert!(
            stdout.contains(command),
            "bash completion should mention '{command}'"
        );
    }
}

#[test]
fn completion_without_shell_fails() {
    mira().arg("completion").assert().failure();
}

#[test]
fn completion_invalid_shell_fails() {
    mira().args(["completion", "tcsh"]).assert().failure();
}
