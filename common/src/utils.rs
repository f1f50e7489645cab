// common/src/utils.rs
use std::env;
use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::FmtSubscriber;

/// Setup tracing for consistent logging.
///
/// The level is read from `LOG_LEVEL` and defaults to `INFO`.
pub fn setup_tracing() -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level_from(env::var("LOG_LEVEL").ok().as_deref()))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

fn log_level_from(value: Option<&str>) -> Level {
    value
        .and_then(|v| v.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO)
}
