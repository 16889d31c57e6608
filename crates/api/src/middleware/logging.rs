//! Tracing subscriber setup.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level so a deployment can turn
/// logging up without a config change. Format is `json` for log
/// aggregation or human-readable `pretty` for local runs.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_current_span(true)
                    .with_target(true),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().pretty().with_span_events(FmtSpan::CLOSE))
            .init();
    }
}
