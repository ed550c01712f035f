//! Retry delays after a failed token acquisition

use std::time::Duration;

/// Configuration for how long to wait before retrying a failed acquisition
#[derive(Clone, Debug)]
pub struct ErrorBackoffConfig {
    initial_error_delay: Duration,
    max_error_delay: Duration,
    multiplier: u32,
}

impl Default for ErrorBackoffConfig {
    /// Default backoff configuration
    ///
    /// Retries every 30 seconds without growing the delay.
    fn default() -> Self {
        Self::fixed(Duration::from_secs(30))
    }
}

impl ErrorBackoffConfig {
    /// Constructs a new backoff configuration
    ///
    /// The first failure waits `initial_error_delay`. Each consecutive failure
    /// multiplies the previous delay by `multiplier`, capped at `max_error_delay`.
    pub fn new(initial_error_delay: Duration, max_error_delay: Duration, multiplier: u32) -> Self {
        Self {
            initial_error_delay,
            max_error_delay,
            multiplier,
        }
    }

    /// Constructs a configuration that always waits `delay` after a failure
    pub fn fixed(delay: Duration) -> Self {
        Self::new(delay, delay, 1)
    }
}

/// Utility trait for extending types with a backoff handler
pub trait WithBackoff {
    /// The output of providing backoff
    type Output;

    /// Applies backoff to the current value
    fn with_backoff(self, handler: &mut ErrorBackoffHandler) -> Self::Output;
}

impl<T, E> WithBackoff for Result<T, E> {
    type Output = Result<T, (E, Duration)>;

    fn with_backoff(self, handler: &mut ErrorBackoffHandler) -> Self::Output {
        match self {
            Ok(ok) => {
                handler.success();
                Ok(ok)
            }
            Err(err) => Err((err, handler.error())),
        }
    }
}

/// A stateful handler that tracks consecutive failures
#[derive(Debug)]
pub struct ErrorBackoffHandler {
    config: ErrorBackoffConfig,
    last_delay: Option<Duration>,
}

impl ErrorBackoffHandler {
    /// Constructs a new handler from an [`ErrorBackoffConfig`]
    pub fn new(config: ErrorBackoffConfig) -> Self {
        Self {
            config,
            last_delay: None,
        }
    }

    /// Reports a success, resetting the delay
    pub fn success(&mut self) {
        self.last_delay = None;
    }

    /// Reports a failure and returns how long to wait before retrying
    pub fn error(&mut self) -> Duration {
        let new_delay = match self.last_delay {
            Some(last) => last
                .saturating_mul(self.config.multiplier)
                .min(self.config.max_error_delay),
            None => self.config.initial_error_delay,
        };
        self.last_delay = Some(new_delay);
        new_delay
    }
}

impl From<ErrorBackoffConfig> for ErrorBackoffHandler {
    fn from(config: ErrorBackoffConfig) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_retries_on_a_fixed_schedule() {
        let mut handler = ErrorBackoffHandler::from(ErrorBackoffConfig::default());
        assert_eq!(handler.error(), Duration::from_secs(30));
        assert_eq!(handler.error(), Duration::from_secs(30));
        assert_eq!(handler.error(), Duration::from_secs(30));
    }

    #[test]
    fn growing_delay_is_capped() {
        let mut handler = ErrorBackoffHandler::new(ErrorBackoffConfig::new(
            Duration::from_secs(1),
            Duration::from_secs(5),
            2,
        ));
        let delays: Vec<_> = (0..5).map(|_| handler.error().as_secs()).collect();
        assert_eq!(delays, [1, 2, 4, 5, 5]);
    }

    #[test]
    fn success_resets_the_delay() {
        let mut handler = ErrorBackoffHandler::new(ErrorBackoffConfig::new(
            Duration::from_secs(1),
            Duration::from_secs(60),
            3,
        ));
        handler.error();
        handler.error();

        let result: Result<(), ()> = Ok(());
        assert!(result.with_backoff(&mut handler).is_ok());

        let result: Result<(), ()> = Err(());
        assert_eq!(
            result.with_backoff(&mut handler),
            Err(((), Duration::from_secs(1)))
        );
    }
}
