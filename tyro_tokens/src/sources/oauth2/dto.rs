//! DTOs for interacting with the authorization endpoint

use serde::Deserialize;

use crate::{error::ConfigError, ClientKey, ClientKeyRef, ClientSecret, ClientSecretRef};

/// The client credentials used to obtain tokens
#[derive(Debug)]
pub struct ClientCredentials {
    token_url: String,
    client_key: ClientKey,
    client_secret: ClientSecret,
}

impl ClientCredentials {
    /// Constructs a new set of client credentials
    ///
    /// Each value must be non-empty. No other validation is performed; a
    /// malformed URL surfaces as a transport error when a token is requested.
    pub fn new(
        token_url: impl Into<String>,
        client_key: ClientKey,
        client_secret: ClientSecret,
    ) -> Result<Self, ConfigError> {
        let token_url = token_url.into();
        if token_url.trim().is_empty() {
            return Err(ConfigError::Missing("token_url"));
        }
        if client_key.as_str().is_empty() {
            return Err(ConfigError::Missing("client_key"));
        }
        if client_secret.as_str().is_empty() {
            return Err(ConfigError::Missing("client_secret"));
        }

        Ok(Self {
            token_url,
            client_key,
            client_secret,
        })
    }

    /// The URL of the token endpoint
    #[inline]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// The client key
    #[inline]
    pub fn client_key(&self) -> &ClientKeyRef {
        &self.client_key
    }

    /// The client secret
    #[inline]
    pub fn client_secret(&self) -> &ClientSecretRef {
        &self.client_secret
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
}
