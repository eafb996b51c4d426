//! Vault AppRole implementation of the [`Broker`] trait.
//!
//! Speaks the AppRole auth-method HTTP API with a blocking client. All
//! status and transport handling lives here: callers receive exactly one
//! [`BrokerError`] per call, with the backend's diagnostic text folded into
//! the reason.
//!
//! Listing semantics on the wire: the backend answers 404 both for a role
//! that does not exist (with diagnostics in `errors`) and for a role with
//! nothing listed under it (with an empty `errors` array). The two are
//! mapped to `RoleNotFound` and the empty set respectively.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::broker::Broker;
use crate::core::constants;
use crate::core::session::{AuthMethod, Credentials};
use crate::core::types::{Accessor, Metadata, NewIdentity, RoleName};
use crate::error::{AuthError, BrokerError, Error};

const TOKEN_HEADER: &str = "X-Vault-Token";

/// Authenticated session against a Vault server.
///
/// Constructed once by [`VaultBroker::authenticate`] and passed explicitly
/// into every operation; the token is read-only after construction and is
/// never logged.
pub struct VaultBroker {
    http: Client,
    url: String,
    token: Zeroizing<String>,
}

// The session token is never rendered: `Debug` redacts it so it cannot leak
// through a formatter (e.g. a panicking `unwrap_err`). Required because
// `Result::unwrap_err` bounds the Ok type on `Debug`.
impl std::fmt::Debug for VaultBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultBroker")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct KeyList {
    data: KeyListData,
}

#[derive(Deserialize)]
struct KeyListData {
    keys: Vec<String>,
}

#[derive(Deserialize)]
struct AccessorLookup {
    data: AccessorLookupData,
}

#[derive(Deserialize)]
struct AccessorLookupData {
    #[serde(default)]
    metadata: Option<Metadata>,
}

#[derive(Deserialize)]
struct SecretIdCreated {
    data: SecretIdCreatedData,
}

#[derive(Deserialize)]
struct SecretIdCreatedData {
    secret_id: String,
    secret_id_accessor: String,
}

#[derive(Deserialize)]
struct Login {
    auth: LoginAuth,
}

#[derive(Deserialize)]
struct LoginAuth {
    client_token: String,
}

/// Standard error envelope: `{"errors": [...]}`.
#[derive(Deserialize, Default)]
struct ApiErrors {
    #[serde(default)]
    errors: Vec<String>,
}

/// Fold a non-success response into a one-line reason string.
fn response_reason(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrors>(body) {
        Ok(api) if !api.errors.is_empty() => format!("{}: {}", status, api.errors.join(", ")),
        _ => format!("unexpected status {}", status),
    }
}

impl VaultBroker {
    /// Establish a session.
    ///
    /// An already-issued token is adopted directly; AppRole credentials
    /// perform a login call first. `insecure` disables TLS certificate
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Client` if the HTTP client cannot be built and
    /// `AuthError::LoginFailed` if the login call is rejected.
    pub fn authenticate(credentials: Credentials, insecure: bool) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(constants::REQUEST_TIMEOUT_SECS))
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| AuthError::Client(e.to_string()))?;

        let url = credentials.url.trim_end_matches('/').to_string();

        let token = match credentials.auth {
            AuthMethod::Token(token) => token,
            AuthMethod::AppRole { role_id, secret_id } => {
                Self::login(&http, &url, &role_id, &secret_id)?
            }
        };

        Ok(Self { http, url, token })
    }

    /// AppRole login: exchange the credential pair for a session token.
    fn login(
        http: &Client,
        url: &str,
        role_id: &str,
        secret_id: &str,
    ) -> Result<Zeroizing<String>, Error> {
        debug!(%role_id, "logging in via approle");

        let response = http
            .post(format!("{}/v1/auth/approle/login", url))
            .json(&serde_json::json!({ "role_id": role_id, "secret_id": secret_id }))
            .send()
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::LoginFailed(response_reason(status, &body)).into());
        }

        let login: Login = serde_json::from_str(&body)
            .map_err(|e| AuthError::LoginFailed(format!("malformed login response: {}", e)))?;

        debug!("approle login succeeded");
        Ok(Zeroizing::new(login.auth.client_token))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.url, path)
    }
}

impl Broker for VaultBroker {
    fn list_accessors(&self, role: &str) -> Result<Vec<Accessor>, BrokerError> {
        debug!(%role, "listing secret-id accessors");

        let response = self
            .http
            .get(self.endpoint(&format!("auth/approle/role/{}/secret-id", role)))
            .query(&[("list", "true")])
            .header(TOKEN_HEADER, self.token.as_str())
            .send()
            .map_err(|e| BrokerError::List(e.to_string()))?;

        let status = response.status();
        let body = response.text().map_err(|e| BrokerError::List(e.to_string()))?;

        match status {
            StatusCode::OK => {
                let list: KeyList = serde_json::from_str(&body)
                    .map_err(|e| BrokerError::List(format!("malformed list response: {}", e)))?;
                Ok(list.data.keys)
            }
            StatusCode::FORBIDDEN => Err(BrokerError::PermissionDenied(role.to_string())),
            StatusCode::NOT_FOUND => {
                let api: ApiErrors = serde_json::from_str(&body).unwrap_or_default();
                if api.errors.is_empty() {
                    // Nothing listed under an existing role.
                    Ok(Vec::new())
                } else {
                    Err(BrokerError::RoleNotFound(role.to_string()))
                }
            }
            s => Err(BrokerError::List(response_reason(s, &body))),
        }
    }

    fn get_metadata(&self, role: &str, accessor: &str) -> Result<Metadata, BrokerError> {
        debug!(%role, %accessor, "looking up accessor metadata");

        let fetch_err = |reason: String| BrokerError::Fetch {
            accessor: accessor.to_string(),
            reason,
        };

        let response = self
            .http
            .post(self.endpoint(&format!(
                "auth/approle/role/{}/secret-id-accessor/lookup",
                role
            )))
            .header(TOKEN_HEADER, self.token.as_str())
            .json(&serde_json::json!({ "secret_id_accessor": accessor }))
            .send()
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        let body = response.text().map_err(|e| fetch_err(e.to_string()))?;

        if !status.is_success() {
            return Err(fetch_err(response_reason(status, &body)));
        }

        let lookup: AccessorLookup = serde_json::from_str(&body)
            .map_err(|e| fetch_err(format!("malformed lookup response: {}", e)))?;

        Ok(lookup.data.metadata.unwrap_or_default())
    }

    fn create_identity(
        &self,
        role: &str,
        metadata: &Metadata,
    ) -> Result<NewIdentity, BrokerError> {
        debug!(%role, "creating secret-id");

        // The backend requires the metadata map JSON-encoded as a string.
        let encoded =
            serde_json::to_string(metadata).map_err(|e| BrokerError::Create(e.to_string()))?;

        let response = self
            .http
            .post(self.endpoint(&format!("auth/approle/role/{}/secret-id", role)))
            .header(TOKEN_HEADER, self.token.as_str())
            .json(&serde_json::json!({ "metadata": encoded }))
            .send()
            .map_err(|e| BrokerError::Create(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| BrokerError::Create(e.to_string()))?;

        if !status.is_success() {
            return Err(BrokerError::Create(response_reason(status, &body)));
        }

        let created: SecretIdCreated = serde_json::from_str(&body)
            .map_err(|e| BrokerError::Create(format!("malformed create response: {}", e)))?;

        debug!(accessor = %created.data.secret_id_accessor, "secret-id created");
        Ok(NewIdentity {
            secret_value: Zeroizing::new(created.data.secret_id),
            accessor: created.data.secret_id_accessor,
        })
    }

    fn delete_accessor(&self, role: &str, accessor: &str) -> Result<(), BrokerError> {
        debug!(%role, %accessor, "destroying secret-id accessor");

        let delete_err = |reason: String| BrokerError::Delete {
            accessor: accessor.to_string(),
            reason,
        };

        let response = self
            .http
            .post(self.endpoint(&format!(
                "auth/approle/role/{}/secret-id-accessor/destroy",
                role
            )))
            .header(TOKEN_HEADER, self.token.as_str())
            .json(&serde_json::json!({ "secret_id_accessor": accessor }))
            .send()
            .map_err(|e| delete_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(delete_err(response_reason(status, &body)));
        }

        Ok(())
    }

    fn list_roles(&self) -> Result<Vec<RoleName>, BrokerError> {
        debug!("listing approle roles");

        let response = self
            .http
            .get(self.endpoint("auth/approle/role"))
            .query(&[("list", "true")])
            .header(TOKEN_HEADER, self.token.as_str())
            .send()
            .map_err(|e| BrokerError::List(e.to_string()))?;

        let status = response.status();
        let body = response.text().map_err(|e| BrokerError::List(e.to_string()))?;

        match status {
            StatusCode::OK => {
                let list: KeyList = serde_json::from_str(&body)
                    .map_err(|e| BrokerError::List(format!("malformed list response: {}", e)))?;
                Ok(list.data.keys)
            }
            StatusCode::FORBIDDEN => Err(BrokerError::PermissionDenied("role listing".to_string())),
            StatusCode::NOT_FOUND => {
                let api: ApiErrors = serde_json::from_str(&body).unwrap_or_default();
                if api.errors.is_empty() {
                    Ok(Vec::new())
                } else {
                    Err(BrokerError::List(response_reason(status, &body)))
                }
            }
            s => Err(BrokerError::List(response_reason(s, &body))),
        }
    }
}
