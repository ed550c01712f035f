use std::{sync::Arc, time::Duration};

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::{error::TokenError, IssuedToken};

/// The state of the shared token
#[derive(Clone, Debug)]
pub enum TokenState {
    /// No acquisition has completed yet
    Uninitialized,
    /// The most recent acquisition produced a usable token
    Valid(Arc<IssuedToken>),
    /// The most recent acquisition failed
    Failed(Arc<str>),
}

/// A thread-safe holder for the current token
///
/// Readers take a shared lock only long enough to clone the current state,
/// so they are never held up by an acquisition in flight.
///
/// Only the refresher publishes into a store, so one is obtained through
/// [`TokenManager::store()`](crate::TokenManager::store) rather than
/// constructed directly.
///
/// ```compile_fail
/// let store = tyro_tokens::TokenStore::new();
/// ```
#[derive(Debug)]
pub struct TokenStore {
    state: RwLock<TokenState>,
    initialized: watch::Sender<bool>,
}

impl TokenStore {
    /// Constructs a new, uninitialized store
    pub(crate) fn new() -> Self {
        let (initialized, _) = watch::channel(false);
        Self {
            state: RwLock::new(TokenState::Uninitialized),
            initialized,
        }
    }

    /// Gets the current token
    ///
    /// Returns `Ok(None)` until the first acquisition completes. That is not an
    /// error: callers that need a token should use [`get_or_wait()`](Self::get_or_wait).
    pub fn get(&self) -> Result<Option<Arc<IssuedToken>>, TokenError> {
        match &*self.state.read() {
            TokenState::Uninitialized => Ok(None),
            TokenState::Valid(token) => Ok(Some(Arc::clone(token))),
            TokenState::Failed(reason) => Err(TokenError::Failed {
                reason: Arc::clone(reason),
            }),
        }
    }

    /// Gets the current token, waiting up to `timeout` for the first
    /// acquisition to complete
    pub async fn get_or_wait(&self, timeout: Duration) -> Result<Arc<IssuedToken>, TokenError> {
        if let Some(token) = self.get()? {
            return Ok(token);
        }

        tracing::trace!(timeout_ms = timeout.as_millis() as u64, "waiting for first token");
        let mut initialized = self.initialized.subscribe();
        let ready = tokio::time::timeout(timeout, async {
            // The sender lives as long as `self`, so this cannot observe a closed channel
            let _ = initialized.wait_for(|ready| *ready).await;
        });

        if ready.await.is_err() {
            tracing::debug!(
                timeout_ms = timeout.as_millis() as u64,
                "timed out waiting for first token"
            );
            return Err(TokenError::Timeout(timeout));
        }

        self.get()?.ok_or(TokenError::Timeout(timeout))
    }

    /// Whether the store has left its uninitialized state
    #[inline]
    pub fn is_initialized(&self) -> bool {
        *self.initialized.borrow()
    }

    /// Completes once the first acquisition, successful or not, has been published
    pub async fn initialized(&self) {
        let mut initialized = self.initialized.subscribe();
        let _ = initialized.wait_for(|ready| *ready).await;
    }

    /// Subscribes to the one-time initialization event
    ///
    /// The receiver observes `true` once the store has left its uninitialized
    /// state. The value changes exactly once over the life of the store.
    pub fn subscribe_initialized(&self) -> watch::Receiver<bool> {
        self.initialized.subscribe()
    }

    pub(crate) fn publish(&self, state: TokenState) {
        let mut current = self.state.write();
        if matches!(*current, TokenState::Uninitialized) {
            tracing::debug!("first token acquisition complete");
            self.initialized.send_replace(true);
        }
        *current = state;
    }
}
