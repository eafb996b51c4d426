//! Test support utilities for hostkey integration tests.
//!
//! Command builders with isolated environment, and the Vault AppRole
//! response/path helpers shared by the wire-level tests.

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};

/// Build a hostkey command with a scrubbed environment.
///
/// `VAULT_URL`/`VAULT_TOKEN` are removed so the host environment can't
/// leak in; `NO_COLOR` keeps output assertions stable.
pub fn hostkey() -> Command {
    let mut cmd = Command::cargo_bin("hostkey").expect("hostkey binary builds");
    cmd.env_remove("VAULT_URL")
        .env_remove("VAULT_TOKEN")
        .env_remove("HOSTKEY_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// The token every stub-backed command authenticates with.
pub const TEST_TOKEN: &str = "test-token";

/// Build a hostkey command pointed at a stub server via the env pair.
pub fn hostkey_at(url: &str) -> Command {
    let mut cmd = hostkey();
    cmd.env("VAULT_URL", url).env("VAULT_TOKEN", TEST_TOKEN);
    cmd
}

// Wire paths ---------------------------------------------------------------

pub fn login_path() -> String {
    "/v1/auth/approle/login".to_string()
}

pub fn secret_id_path(role: &str) -> String {
    format!("/v1/auth/approle/role/{}/secret-id", role)
}

pub fn lookup_path(role: &str) -> String {
    format!("/v1/auth/approle/role/{}/secret-id-accessor/lookup", role)
}

pub fn destroy_path(role: &str) -> String {
    format!("/v1/auth/approle/role/{}/secret-id-accessor/destroy", role)
}

pub fn roles_path() -> String {
    "/v1/auth/approle/role".to_string()
}

// Response bodies ----------------------------------------------------------

/// `{"data": {"keys": [...]}}`, used for accessor and role listings.
pub fn key_list(keys: &[&str]) -> Value {
    json!({ "data": { "keys": keys } })
}

/// Accessor lookup response carrying a hostname tag.
pub fn lookup_response(hostname: &str) -> Value {
    json!({ "data": { "metadata": { "hostname": hostname } } })
}

/// Accessor lookup response with no metadata at all.
pub fn lookup_response_untagged() -> Value {
    json!({ "data": { "metadata": null } })
}

/// Successful secret-id creation.
pub fn created_response(secret_id: &str, accessor: &str) -> Value {
    json!({ "data": { "secret_id": secret_id, "secret_id_accessor": accessor } })
}

/// Standard error envelope. An empty list is the backend's
/// "nothing listed here" 404.
pub fn errors(messages: &[&str]) -> Value {
    json!({ "errors": messages })
}

/// Successful AppRole login.
pub fn login_response(token: &str) -> Value {
    json!({ "auth": { "client_token": token } })
}
