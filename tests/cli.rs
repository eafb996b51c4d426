//! CLI surface tests: argument parsing, flags, and offline failure paths.

mod support;

use predicates::prelude::*;
use support::hostkey;

#[test]
fn help_lists_all_subcommands() {
    hostkey()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("create"))
                .and(predicate::str::contains("delete"))
                .and(predicate::str::contains("delete_from_secret")),
        );
}

#[test]
fn version_flag_works() {
    hostkey()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostkey"));
}

#[test]
fn role_without_subcommand_fails() {
    hostkey().arg("web").assert().failure();
}

#[test]
fn create_requires_hostname() {
    hostkey().args(["web", "create"]).assert().failure();
}

#[test]
fn delete_from_secret_keeps_underscore_spelling() {
    // The dashed alias must not exist; only the original spelling parses.
    hostkey()
        .args(["web", "delete-from-secret", "a1"])
        .assert()
        .failure();
}

#[test]
fn insecure_and_verbose_flags_are_accepted() {
    // Parse succeeds; the command then fails offline with exit code 1.
    hostkey()
        .args(["-k", "--verbose", "web", "list"])
        .env("VAULT_URL", "http://127.0.0.1:1")
        .env("VAULT_TOKEN", "t")
        .assert()
        .code(1);
}

#[test]
fn unreachable_endpoint_exits_one() {
    // Nothing listens on port 1; the listing fails at the broker boundary.
    hostkey()
        .args(["web", "list"])
        .env("VAULT_URL", "http://127.0.0.1:1")
        .env("VAULT_TOKEN", "t")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("listing"));
}

#[test]
fn missing_credentials_exit_one() {
    // No env pair and (in any sane test environment) no config file.
    hostkey().args(["web", "list"]).assert().code(1);
}
