use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::settings::{AppConfig, LogFormat};

/// Installs the global tracing subscriber.
///
/// `CATALOG_LOG` takes precedence over the configured `log_level`.
/// Returns `false` when a subscriber was already installed (e.g. by a host application).
pub fn init_tracing(config: &AppConfig) -> bool {
    let env_filter = EnvFilter::try_from_env("CATALOG_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
