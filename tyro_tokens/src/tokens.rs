use std::time::Duration;

use tokio::time::Instant;

use crate::{error::AcquireError, AccessToken, AccessTokenRef};

/// About 30 years, the horizon tokio itself uses for a sleep that never ends
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// The instant `delay` after `start`, clamped to the far future
///
/// Authorities may report lifetimes that no `Instant` can represent.
pub(crate) fn deadline_after(start: Instant, delay: Duration) -> Instant {
    start
        .checked_add(delay)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

/// A token as granted by the authorization endpoint, along with the instants
/// at which it should be refreshed and at which it expires
#[derive(Debug)]
pub struct IssuedToken {
    access_token: AccessToken,
    token_type: Option<String>,
    lifetime: Duration,
    issued: Instant,
    refresh_at: Instant,
    expiry: Instant,
}

/// A token's lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
    /// The token is valid and not yet due for refresh
    Fresh,
    /// The token is valid, but a refresh is due
    Stale,
    /// The token is no longer valid
    Expired,
}

impl IssuedToken {
    /// Gets the current access token
    #[inline]
    pub fn access_token(&self) -> &AccessTokenRef {
        &self.access_token
    }

    /// Gets the token type reported by the authority, if any
    #[inline]
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Gets the token's lifetime
    #[inline]
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Gets the instant that the token was issued
    #[inline]
    pub fn issued(&self) -> Instant {
        self.issued
    }

    /// Gets the instant at which the token should be refreshed
    #[inline]
    pub fn refresh_at(&self) -> Instant {
        self.refresh_at
    }

    /// Gets the instant at which the token expires
    #[inline]
    pub fn expiry(&self) -> Instant {
        self.expiry
    }

    /// Gets the token's current lifetime status
    #[inline]
    pub fn token_status(&self) -> TokenStatus {
        self.token_status_at(Instant::now())
    }

    /// Gets the token's lifetime status as of the provided instant
    pub fn token_status_at(&self, now: Instant) -> TokenStatus {
        if now < self.refresh_at {
            TokenStatus::Fresh
        } else if now < self.expiry {
            TokenStatus::Stale
        } else {
            TokenStatus::Expired
        }
    }

    /// Gets how much longer the token remains valid
    #[inline]
    pub fn until_expired(&self) -> Duration {
        self.until_expired_at(Instant::now())
    }

    /// Gets how much longer the token remains valid as of the provided instant
    #[inline]
    pub fn until_expired_at(&self, now: Instant) -> Duration {
        self.expiry.saturating_duration_since(now)
    }
}

/// Configuration for determining when a token should be refreshed
#[derive(Clone, Debug)]
pub struct TokenLifetimeConfig {
    refresh_buffer: Duration,
    minimum_lifetime: Duration,
}

impl Default for TokenLifetimeConfig {
    /// Default lifetime configuration
    ///
    /// Refreshes tokens 5 seconds before they expire and rejects tokens
    /// that live for less than 10 seconds.
    fn default() -> Self {
        Self {
            refresh_buffer: Duration::from_secs(5),
            minimum_lifetime: Duration::from_secs(10),
        }
    }
}

impl TokenLifetimeConfig {
    /// Constructs a new lifetime configuration
    ///
    /// A token will be refreshed `refresh_buffer` before it would expire. Tokens
    /// issued with a lifetime shorter than `minimum_lifetime` are rejected so
    /// that a misbehaving authority cannot drive the refresher into a tight loop.
    pub fn new(refresh_buffer: Duration, minimum_lifetime: Duration) -> Self {
        Self {
            refresh_buffer,
            minimum_lifetime,
        }
    }

    /// The margin subtracted from a token's lifetime when scheduling its refresh
    #[inline]
    pub fn refresh_buffer(&self) -> Duration {
        self.refresh_buffer
    }

    /// The shortest lifetime that will be accepted from the authority
    #[inline]
    pub fn minimum_lifetime(&self) -> Duration {
        self.minimum_lifetime
    }

    /// How long to wait before refreshing a token with the given lifetime
    pub fn refresh_delay(&self, lifetime: Duration) -> Duration {
        lifetime.saturating_sub(self.refresh_buffer)
    }

    /// Given an access token and its lifetime, constructs an issued token
    ///
    /// Fails if the lifetime is shorter than the configured minimum.
    pub fn create_token(
        &self,
        access_token: AccessToken,
        token_type: Option<String>,
        lifetime: Duration,
    ) -> Result<IssuedToken, AcquireError> {
        if lifetime < self.minimum_lifetime {
            return Err(AcquireError::TtlTooShort {
                lifetime: lifetime.as_secs(),
                minimum: self.minimum_lifetime.as_secs(),
            });
        }

        let issued = Instant::now();
        Ok(IssuedToken {
            access_token,
            token_type,
            lifetime,
            issued,
            refresh_at: deadline_after(issued, self.refresh_delay(lifetime)),
            expiry: deadline_after(issued, lifetime),
        })
    }
}
