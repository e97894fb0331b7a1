//! Telemetry helpers for applications embedding `layer-stack`.
//!
//! Stack operations emit `tracing` events under the `layer_stack` target:
//! `debug` for construction and bulk changes, `trace` for per-layer
//! mutations. Nothing is installed implicitly; call one of the helpers below
//! or register your own subscriber.

/// Filter applied when `RUST_LOG` is unset: host output at `info`, stack
/// bookkeeping at `debug`.
pub const DEFAULT_FILTER: &str = "info,layer_stack=debug";

/// Installs a compact subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is unset or unparsable.
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback directive.
///
/// Returns `false` when `fallback` is not a valid filter directive.
#[must_use]
pub fn init_tracing(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match EnvFilter::try_new(fallback) {
                Ok(filter) => filter,
                Err(_) => return false,
            },
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
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

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILTER, init_default_tracing, init_tracing};

    #[test]
    fn default_filter_scopes_stack_events() {
        assert!(DEFAULT_FILTER.contains("layer_stack=debug"));
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn tracing_init_is_a_no_op_without_feature() {
        assert!(!init_default_tracing());
        assert!(!init_tracing("trace"));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_tracing_init_reports_existing_subscriber() {
        let _ = init_default_tracing();
        assert!(!init_tracing("layer_stack=trace"));
    }
}
