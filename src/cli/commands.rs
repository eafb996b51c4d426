//! Command implementations.
//!
//! Handler functions for each CLI command. Handlers own all presentation;
//! the core returns plain records and typed errors.

use tracing::warn;

use crate::cli::output;
use crate::cli::{Cli, Command};
use crate::core::broker::VaultBroker;
use crate::core::lifecycle;
use crate::core::session::Credentials;
use crate::error::{Error, Result};

/// Resolve credentials, establish the session, and run the command.
///
/// # Errors
///
/// Returns error if credential resolution, authentication, or the command
/// itself fails.
pub fn execute(cli: Cli) -> Result<()> {
    let credentials = Credentials::resolve()?;
    let broker = VaultBroker::authenticate(credentials, cli.insecure)?;

    match cli.command {
        Command::List { json } => cmd_list(&broker, &cli.role_name, json),
        Command::Create { hostname } => cmd_create(&broker, &cli.role_name, &hostname),
        Command::Delete { hostname } => cmd_delete(&broker, &cli.role_name, &hostname),
        Command::DeleteFromSecret { secret_id_accessor } => {
            cmd_delete_from_secret(&broker, &cli.role_name, &secret_id_accessor)
        }
    }
}

/// List identities under the role.
fn cmd_list(broker: &VaultBroker, role: &str, json: bool) -> Result<()> {
    let records = match lifecycle::list(broker, role) {
        Ok(records) => records,
        Err(Error::RoleNotFound { role }) => return discover_roles(broker, &role),
        Err(e) => return Err(e),
    };

    if json {
        let rendered = serde_json::to_string_pretty(&records).map_err(|e| Error::Listing {
            target: format!("role {}", role),
            reason: e.to_string(),
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    if records.is_empty() {
        output::dimmed(&format!("no identities registered under role {}", role));
        return Ok(());
    }

    let rows: Vec<[String; 2]> = records
        .into_iter()
        .map(|r| [r.hostname.unwrap_or_else(|| "-".to_string()), r.accessor])
        .collect();
    output::table(["hostname", "secret_id_accessor"], &rows);

    Ok(())
}

/// Role discovery after a missing-role report.
///
/// Deliberately invoked here in the caller; the library `list` never
/// substitutes a different result shape. Prints the known roles and exits
/// with code 2; if discovery itself fails, the original missing-role error
/// stands.
fn discover_roles(broker: &VaultBroker, role: &str) -> Result<()> {
    let roles = match lifecycle::roles(broker) {
        Ok(roles) => roles,
        Err(e) => {
            warn!(reason = %e, "role discovery failed");
            return Err(Error::RoleNotFound {
                role: role.to_string(),
            });
        }
    };

    output::warn(&format!("role {} does not exist", role));
    if roles.is_empty() {
        output::dimmed("no roles defined");
    } else {
        println!("known roles:");
        for role in &roles {
            output::list_item(role);
        }
    }
    std::process::exit(2);
}

/// Issue a new identity and print its one-time secret.
fn cmd_create(broker: &VaultBroker, role: &str, hostname: &str) -> Result<()> {
    let identity = lifecycle::create(broker, role, hostname)?;

    // Only the secret goes to stdout so it can be piped; it cannot be
    // retrieved again after this.
    println!("{}", identity.secret_value.as_str());
    Ok(())
}

/// Delete the identity registered for a hostname.
fn cmd_delete(broker: &VaultBroker, role: &str, hostname: &str) -> Result<()> {
    let accessor = lifecycle::delete_by_hostname(broker, role, hostname)?;

    output::success("identity deleted");
    output::kv("hostname:", hostname);
    output::kv("accessor:", accessor);
    Ok(())
}

/// Delete an identity directly by accessor.
fn cmd_delete_from_secret(broker: &VaultBroker, role: &str, accessor: &str) -> Result<()> {
    lifecycle::delete_by_accessor(broker, role, accessor)?;

    output::success("identity deleted");
    output::kv("accessor:", accessor);
    Ok(())
}
