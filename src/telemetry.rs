//! Telemetry helpers for applications embedding `chart-viewport`.
//!
//! Viewport, transform and axis code emit `tracing` events only; nothing is
//! printed unless the host installs a subscriber. Zoom and pan steps log at
//! `trace`, axis recalculation at `debug` and rejected input at `warn`.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "chart_viewport=warn";

/// Initializes a compact `tracing` subscriber honoring `RUST_LOG`.
///
/// Returns `false` when the `telemetry` feature is disabled or the host
/// already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like `init_default_tracing`, with `fallback` as the filter directives used
/// when `RUST_LOG` is not set (for example `"chart_viewport=trace"`).
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
