//! Opt-in tracing bootstrap for hosts that do not configure `tracing`
//! themselves.
//!
//! Builders, matchers and range conversions emit `debug!`/`trace!` events
//! under the `chart_brush` target. Hosts with their own subscriber need
//! nothing from this module.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_brush=info";

/// Installs a compact `tracing` subscriber honoring `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"chart_brush=trace"` while debugging offset reconstruction.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
