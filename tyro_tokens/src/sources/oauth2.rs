//! A token source that performs the OAuth2 client credentials exchange

use std::time::Duration;

use async_trait::async_trait;

use super::{AsyncTokenSource, GrantedToken};
use crate::{error::AcquireError, AccessToken};

pub mod dto;

/// A token source for the client credentials flow
///
/// Each request sends `grant_type=client_credentials` as form data,
/// authenticating with the client key and secret over HTTP basic auth.
#[derive(Debug)]
pub struct ClientCredentialsTokenSource {
    client: reqwest::Client,
    credentials: dto::ClientCredentials,
}

impl ClientCredentialsTokenSource {
    /// Constructs a new client credentials source
    pub fn new(client: reqwest::Client, credentials: dto::ClientCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

#[async_trait]
impl AsyncTokenSource for ClientCredentialsTokenSource {
    async fn request_token(&mut self) -> Result<GrantedToken, AcquireError> {
        request_token(&self.client, &self.credentials).await
    }
}

/// The most of an error body that is kept for reporting
const MAX_ERROR_BODY_CHARS: usize = 256;

fn truncate_body(mut body: String) -> String {
    if let Some((cut, _)) = body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        body.truncate(cut);
        body.push('…');
    }
    body
}

fn transport(error: reqwest::Error) -> AcquireError {
    AcquireError::Transport(Box::new(error))
}

#[tracing::instrument(
    err,
    skip(client, credentials),
    fields(
        token_url = %credentials.token_url(),
        client_key = %credentials.client_key(),
    ),
)]
async fn request_token(
    client: &reqwest::Client,
    credentials: &dto::ClientCredentials,
) -> Result<GrantedToken, AcquireError> {
    tracing::trace!("requesting token from authority");

    let resp = client
        .post(credentials.token_url())
        .basic_auth(
            credentials.client_key().as_str(),
            Some(credentials.client_secret().as_str()),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(transport)?;

    let status = resp.status();
    tracing::debug!(
        response.status = status.as_u16(),
        "received token response from authority"
    );

    if !status.is_success() {
        let body = resp.text().await.map_err(transport)?;
        return Err(AcquireError::Authentication {
            status: status.as_u16(),
            body: truncate_body(body),
        });
    }

    let body = resp.bytes().await.map_err(transport)?;
    let resp: dto::TokenResponse = serde_json::from_slice(&body)?;

    if resp.access_token.is_empty() {
        return Err(AcquireError::EmptyToken);
    }

    tracing::info!(
        lifetime = resp.expires_in,
        token_type = resp.token_type.as_deref().unwrap_or("<none>"),
        "received new token"
    );

    Ok(GrantedToken {
        access_token: AccessToken::new(resp.access_token),
        token_type: resp.token_type,
        expires_in: Duration::from_secs(resp.expires_in),
    })
}
