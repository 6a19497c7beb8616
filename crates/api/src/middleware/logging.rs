//! Tracing subscriber setup.
//!
//! Level and format come from [`LoggingConfig`]; an explicit `RUST_LOG`
//! wins over the configured level. Span close events are enabled so the
//! per-request spans opened by the trace-id middleware log their duration.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Install the global tracing subscriber. Call once at startup.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Anything that is not "json" renders as pretty; that covers the
    // "pretty" default and typos alike, which beats crashing at boot.
    if config.format == "json" {
        let layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true);
        registry.with(layer).init();
    } else {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true);
        registry.with(layer).init();
    }
}
