//! Credential resolution.
//!
//! An ordered, explicit chain replaces ambient client state: an
//! already-issued session token from the environment wins, otherwise the
//! config file supplies an AppRole credential pair for login. Each step
//! either produces typed [`Credentials`] or falls through; nothing is
//! guessed and no failure is suppressed.

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::config::Config;
use crate::core::constants;
use crate::error::Result;

/// How to establish a session with the backend.
pub enum AuthMethod {
    /// Adopt an already-issued session token (no login call).
    Token(Zeroizing<String>),
    /// Log in with an AppRole credential pair.
    AppRole {
        role_id: String,
        secret_id: Zeroizing<String>,
    },
}

/// Resolved endpoint and authentication method.
pub struct Credentials {
    pub url: String,
    pub auth: AuthMethod,
}

impl Credentials {
    /// Resolve credentials: environment first, then the config file.
    ///
    /// `VAULT_URL` and `VAULT_TOKEN` must *both* be set to bypass the
    /// file; a lone variable falls through to file-based AppRole login.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the environment pair is absent and the
    /// config file is missing or malformed.
    pub fn resolve() -> Result<Self> {
        let url = std::env::var(constants::ENV_URL).ok();
        let token = std::env::var(constants::ENV_TOKEN).ok();
        if let Some(credentials) = Self::from_env(url, token) {
            debug!("using session token from environment");
            return Ok(credentials);
        }

        let config = Config::load()?;
        debug!(url = %config.url, "using approle credentials from config file");
        Ok(Self {
            url: config.url,
            auth: AuthMethod::AppRole {
                role_id: config.role_id,
                secret_id: Zeroizing::new(config.secret_id),
            },
        })
    }

    /// Build token credentials from the environment pair, if complete.
    fn from_env(url: Option<String>, token: Option<String>) -> Option<Self> {
        match (url, token) {
            (Some(url), Some(token)) => Some(Self {
                url,
                auth: AuthMethod::Token(Zeroizing::new(token)),
            }),
            _ => None,
        }
    }
}
