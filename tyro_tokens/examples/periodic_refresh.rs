use std::time::Duration;

use clap::Parser;
use tokio::time;
use tyro_tokens::{
    backoff::ErrorBackoffConfig,
    sources::oauth2::{dto::ClientCredentials, ClientCredentialsTokenSource},
    ClientKey, ClientSecret, TokenLifetimeConfig, TokenManager, TokenStatus,
};

#[derive(Debug, Parser)]
#[command(about = "Keeps a catalog API token fresh and reports on it periodically")]
struct Opts {
    /// The authorization endpoint's token URL
    #[arg(
        short,
        long,
        env = "TYRO_TOKEN_URL",
        default_value = "https://sandbox.iii.com/iii/sierra-api/v1/token"
    )]
    token_url: String,

    /// The client key
    #[arg(short = 'k', long = "key", env = "TYRO_KEY")]
    client_key: ClientKey,

    /// The client secret used to identify the client to the authorization endpoint
    #[arg(short = 's', long = "secret", env = "TYRO_SECRET", hide_env_values = true)]
    client_secret: ClientSecret,

    /// Seconds before expiry at which a token is refreshed
    #[arg(long, env = "TYRO_REFRESH_BUFFER", default_value_t = 5)]
    refresh_buffer: u64,

    /// Shortest token lifetime, in seconds, that will be accepted
    #[arg(long, env = "TYRO_MINIMUM_LIFETIME", default_value_t = 10)]
    minimum_lifetime: u64,

    /// Seconds to wait before retrying a failed acquisition
    #[arg(long, env = "TYRO_RETRY_DELAY", default_value_t = 30)]
    retry_delay: u64,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();

    let credentials = ClientCredentials::new(opts.token_url, opts.client_key, opts.client_secret)?;
    let client = reqwest::Client::builder().user_agent("Tyro").build()?;

    let manager = TokenManager::spawn(
        ClientCredentialsTokenSource::new(client, credentials),
        TokenLifetimeConfig::new(
            Duration::from_secs(opts.refresh_buffer),
            Duration::from_secs(opts.minimum_lifetime),
        ),
        ErrorBackoffConfig::fixed(Duration::from_secs(opts.retry_delay)),
    );

    match manager.get_or_wait().await {
        Ok(token) => tracing::info!(
            token = format_args!("{:#?}", token.access_token()),
            "first access token"
        ),
        Err(error) => tracing::warn!(%error, "no token available yet"),
    }

    let mut interval = time::interval(Duration::from_secs(5));
    loop {
        interval.tick().await;

        let token = match manager.get() {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("token not yet initialized");
                continue;
            }
            Err(error) => {
                tracing::error!(%error, "token unavailable");
                continue;
            }
        };

        let now = time::Instant::now();
        let status = token.token_status_at(now);
        let until_expired = token.until_expired_at(now).as_secs();
        match status {
            TokenStatus::Fresh => {
                tracing::debug!(?status, until_expired, "pulled token")
            }
            TokenStatus::Stale => {
                tracing::warn!(?status, until_expired, "pulled token")
            }
            TokenStatus::Expired => {
                tracing::error!(?status, until_expired, "pulled token")
            }
        }
    }
}
