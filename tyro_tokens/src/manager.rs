use std::{error, sync::Arc, time::Duration};

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    time::{self, Instant},
};

use crate::{
    backoff::{ErrorBackoffConfig, ErrorBackoffHandler, WithBackoff},
    error::TokenError,
    sources::AsyncTokenSource,
    store::{TokenState, TokenStore},
    tokens::deadline_after,
    IssuedToken, TokenLifetimeConfig,
};

/// How long [`TokenManager::get_or_wait()`] waits for the first token by default
pub const DEFAULT_INITIAL_WAIT: Duration = Duration::from_secs(30);

/// A handle to a shared token that is refreshed in the background
///
/// Handles are cheap to clone and can be handed to every request handler.
/// The background refresher stops once the last handle has been dropped;
/// the store keeps its last value after that.
#[derive(Clone, Debug)]
pub struct TokenManager {
    store: Arc<TokenStore>,
    refresh: mpsc::Sender<()>,
    initial_wait: Duration,
}

impl TokenManager {
    /// Spawns a refresher that keeps a token from `token_source` up to date
    ///
    /// The first acquisition starts immediately. This returns before it
    /// completes, so the store starts out uninitialized. After a successful
    /// acquisition the next one is scheduled `refresh_buffer` before the token
    /// expires. After a failure the retry delay comes from `backoff_config`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(
        token_source: S,
        lifetime_config: TokenLifetimeConfig,
        backoff_config: ErrorBackoffConfig,
    ) -> Self
    where
        S: AsyncTokenSource + 'static,
    {
        let store = Arc::new(TokenStore::new());
        let (tx, rx) = mpsc::channel(1);

        let join = tokio::spawn(forever_refresh(
            token_source,
            Arc::clone(&store),
            rx,
            lifetime_config,
            backoff_config,
        ));

        tokio::spawn(async move {
            if let Err(err) = join.await {
                if err.is_panic() {
                    tracing::error!("token refresher panicked!")
                } else if err.is_cancelled() {
                    tracing::info!("token refresher was cancelled")
                }
            } else {
                tracing::info!("all token handles dropped, token refresher stopped")
            }
        });

        Self {
            store,
            refresh: tx,
            initial_wait: DEFAULT_INITIAL_WAIT,
        }
    }

    /// Sets how long [`get_or_wait()`](Self::get_or_wait) waits for the first token
    pub fn with_initial_wait(mut self, initial_wait: Duration) -> Self {
        self.initial_wait = initial_wait;
        self
    }

    /// Gets the current token without waiting
    ///
    /// See [`TokenStore::get()`].
    #[inline]
    pub fn get(&self) -> Result<Option<Arc<IssuedToken>>, TokenError> {
        self.store.get()
    }

    /// Gets the current token, waiting for the first acquisition if necessary
    pub async fn get_or_wait(&self) -> Result<Arc<IssuedToken>, TokenError> {
        self.store.get_or_wait(self.initial_wait).await
    }

    /// Gets the current token, waiting up to `timeout` for the first acquisition
    pub async fn get_or_wait_for(&self, timeout: Duration) -> Result<Arc<IssuedToken>, TokenError> {
        self.store.get_or_wait(timeout).await
    }

    /// Asks the refresher to acquire a new token now
    ///
    /// Requests made while another is still pending are merged with it.
    pub fn request_refresh(&self) {
        match self.refresh.try_send(()) {
            Ok(()) => tracing::debug!("token refresh requested"),
            Err(TrySendError::Full(())) => tracing::trace!("token refresh already pending"),
            Err(TrySendError::Closed(())) => {
                tracing::warn!("token refresher is not running, refresh request ignored")
            }
        }
    }

    /// Completes once the first acquisition has been published
    pub async fn initialized(&self) {
        self.store.initialized().await
    }

    /// The underlying token store
    #[inline]
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }
}

async fn forever_refresh<S>(
    mut token_source: S,
    store: Arc<TokenStore>,
    mut signals: mpsc::Receiver<()>,
    lifetime_config: TokenLifetimeConfig,
    backoff_config: ErrorBackoffConfig,
) where
    S: AsyncTokenSource,
{
    let mut backoff_handler = ErrorBackoffHandler::new(backoff_config);

    loop {
        let (state, delay) = refresh(
            &mut token_source,
            &lifetime_config,
            &mut backoff_handler,
        )
        .await;

        // Requests that arrived during the acquisition are answered by it.
        // Anything sent once the new state is visible must survive.
        while signals.try_recv().is_ok() {}
        store.publish(state);

        let deadline = deadline_after(Instant::now(), delay);
        tokio::select! {
            _ = time::sleep_until(deadline) => {
                tracing::trace!("token due for refresh");
            }
            signal = signals.recv() => match signal {
                Some(()) => tracing::trace!("refreshing token on request"),
                None => {
                    tracing::debug!("refresh requests closed, halting refreshes");
                    return;
                }
            },
        }
    }
}

async fn refresh<S>(
    token_source: &mut S,
    lifetime_config: &TokenLifetimeConfig,
    backoff_handler: &mut ErrorBackoffHandler,
) -> (TokenState, Duration)
where
    S: AsyncTokenSource,
{
    tracing::debug!("requesting new token");

    let result = token_source.request_token().await.and_then(|granted| {
        lifetime_config.create_token(granted.access_token, granted.token_type, granted.expires_in)
    });

    match result.with_backoff(backoff_handler) {
        Ok(token) => {
            let delay = lifetime_config.refresh_delay(token.lifetime());
            tracing::debug!(
                lifetime = token.lifetime().as_secs(),
                delay = delay.as_secs(),
                "waiting for token to need refreshing"
            );
            (TokenState::Valid(Arc::new(token)), delay)
        }
        Err((error, delay)) => {
            tracing::warn!(
                error = (&error as &dyn error::Error),
                delay_ms = delay.as_millis() as u64,
                "error requesting token, will retry"
            );
            (TokenState::Failed(error.to_string().into()), delay)
        }
    }
}
