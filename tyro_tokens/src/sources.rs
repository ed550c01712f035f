//! Token sources

use std::time::Duration;

use async_trait::async_trait;

use crate::{error::AcquireError, AccessToken};

#[cfg(feature = "oauth2")]
#[cfg_attr(docsrs, doc(cfg(feature = "oauth2")))]
pub mod oauth2;

/// A token as granted by a source, before any lifetime policy is applied
#[derive(Debug)]
pub struct GrantedToken {
    /// The access token
    pub access_token: AccessToken,
    /// The token type, if the source reported one
    pub token_type: Option<String>,
    /// How long the token is valid for
    pub expires_in: Duration,
}

/// An asynchronous source for tokens
///
/// A single call performs a single exchange with the authority. Sources hold
/// no shared state; the refresher decides what to do with the result.
#[async_trait]
pub trait AsyncTokenSource: Send + Sync {
    /// Requests a token from an asynchronous source
    async fn request_token(&mut self) -> Result<GrantedToken, AcquireError>;
}

/// A token source that always hands out the same token
#[derive(Debug)]
pub struct StaticTokenSource {
    access_token: AccessToken,
    expires_in: Duration,
}

impl StaticTokenSource {
    /// Constructs a source for the given token, valid for an hour per request
    pub fn new(access_token: impl Into<AccessToken>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in: Duration::from_secs(3600),
        }
    }

    /// Overrides the lifetime reported for each request
    pub fn with_lifetime(mut self, expires_in: Duration) -> Self {
        self.expires_in = expires_in;
        self
    }
}

#[async_trait]
impl AsyncTokenSource for StaticTokenSource {
    async fn request_token(&mut self) -> Result<GrantedToken, AcquireError> {
        Ok(GrantedToken {
            access_token: self.access_token.clone(),
            token_type: Some("bearer".to_owned()),
            expires_in: self.expires_in,
        })
    }
}
