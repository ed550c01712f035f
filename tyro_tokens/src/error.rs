//! Errors raised while obtaining and serving tokens

use std::{error, sync::Arc, time::Duration};

use thiserror::Error;

/// An error while attempting to acquire a new token from the authority
///
/// These errors never reach callers of the token store directly. The
/// refresher logs them, records a failed state, and schedules a retry.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The request could not be built or sent to the authority
    #[error("error sending token request to authority")]
    Transport(#[source] Box<dyn error::Error + Send + Sync + 'static>),
    /// The authority answered with a non-success status
    #[error("authority rejected token request with status {status}: {body}")]
    Authentication {
        /// The HTTP status code returned by the authority
        status: u16,
        /// The body of the error response
        body: String,
    },
    /// The token response body could not be decoded
    #[error("error decoding token response from authority")]
    Decode(#[from] serde_json::Error),
    /// The authority returned an empty access token
    #[error("authority returned an empty access token")]
    EmptyToken,
    /// The authority issued a token that would need refreshing almost immediately
    #[error("token lifetime of {lifetime}s is below the minimum of {minimum}s")]
    TtlTooShort {
        /// The lifetime reported by the authority, in seconds
        lifetime: u64,
        /// The configured minimum lifetime, in seconds
        minimum: u64,
    },
}

/// An error returned to callers asking for the current token
///
/// Both variants are transient: the refresher keeps working in the background,
/// so a caller may report a temporary failure and try again later.
#[derive(Clone, Debug, Error)]
pub enum TokenError {
    /// The most recent attempt to acquire a token failed
    #[error("token acquisition failed: {reason}")]
    Failed {
        /// A description of the failure that left the store without a token
        reason: Arc<str>,
    },
    /// No token became available before the wait elapsed
    #[error("no token became available within {0:?}")]
    Timeout(Duration),
}

/// An error in the configuration supplied to a token source
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value was empty
    #[error("a value for `{0}` is required")]
    Missing(&'static str),
}
