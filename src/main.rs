use anyhow::{Context, Result};
use golfbert_proxy::{server, Config};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `LOG_LEVEL` when both are set.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {}", log_level))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let status = config.credentials.status();
    if !(status.api_key_set && status.access_key_set && status.secret_key_set) {
        warn!(
            api_key_set = status.api_key_set,
            access_key_set = status.access_key_set,
            secret_key_set = status.secret_key_set,
            "Golfbert credentials incomplete, upstream calls will be unauthenticated"
        );
    }

    server::serve(config).await.context("server exited with error")
}
