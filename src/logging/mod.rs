// Logging module for structured logging using the tracing crate

use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for structured logging
///
/// Filtering follows `RUST_LOG` when set and defaults to `info`.
/// With `json` enabled the output is line-delimited JSON for log
/// aggregation; otherwise it is the human-readable format.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Examples
///
/// ```ignore
/// use nameplate::logging::init_subscriber;
///
/// init_subscriber(false).expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber(json: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()?;
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()?;
    }

    Ok(())
}
