//! A single shared access token, kept fresh in the background
//!
//! Tyro sits in front of a bibliographic catalog API and serves many concurrent
//! clients with one OAuth2 _client credentials_ token. This crate owns that
//! token's lifecycle.
//!
//! The [`TokenManager`] spawns a background refresher that acquires a token
//! at start-up and publishes it to a [`TokenStore`]. It then waits until
//! shortly before the token expires, or until a handler asks for a refresh
//! (for example after the upstream API answered `401 Unauthorized`), and
//! repeats. Readers are never held up by an acquisition in flight: they
//! keep getting the last published token until a new one replaces it.
//!
//! Failed acquisitions are logged and retried on a fixed schedule. The
//! refresher itself never gives up; it stops only once every handle to it has
//! been dropped.
//!
//! # General Flow
//!
//! ```
//! use std::time::Duration;
//!
//! use tyro_tokens::{
//!     backoff::ErrorBackoffConfig,
//!     sources::oauth2::{dto::ClientCredentials, ClientCredentialsTokenSource},
//!     ClientKey, ClientSecret, TokenLifetimeConfig, TokenManager,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = ClientCredentials::new(
//!     "https://sandbox.iii.com/iii/sierra-api/v1/token",
//!     ClientKey::from_static("client-key"),
//!     ClientSecret::from_static("client-secret"),
//! )?;
//!
//! let manager = TokenManager::spawn(
//!     ClientCredentialsTokenSource::new(reqwest::Client::new(), credentials),
//!     TokenLifetimeConfig::default(),
//!     ErrorBackoffConfig::default(),
//! );
//!
//! // In a request handler:
//! let token = manager.get_or_wait_for(Duration::from_secs(30)).await?;
//! tracing::debug!(token = format_args!("{:#?}", token.access_token()), "using token");
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! * `oauth2` (default): provides [`ClientCredentialsTokenSource`][sources::oauth2::ClientCredentialsTokenSource],
//!   which performs the exchange over `reqwest`.
//! * `rustls-tls` (default): enables TLS for that exchange.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_imports,
    unused_qualifications
)]
#![deny(
    missing_debug_implementations,
    trivial_numeric_casts,
    unsafe_code,
    unused_must_use
)]

pub mod backoff;
mod braids;
pub mod error;
mod manager;
pub mod sources;
mod store;
mod tokens;

pub use braids::*;
pub use error::{AcquireError, ConfigError, TokenError};
pub use manager::{TokenManager, DEFAULT_INITIAL_WAIT};
pub use store::{TokenState, TokenStore};
pub use tokens::{IssuedToken, TokenLifetimeConfig, TokenStatus};
