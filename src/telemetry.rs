//! Tracing setup for hosts embedding chart widgets.
//!
//! Widget events carry a `comm_id` field so one kernel's widgets can be told
//! apart. Field assignments, opens, closes and observer attach/detach are
//! logged at `debug`; unchanged assignments at `trace`. Remote keys the
//! widget skips and sink send failures are logged at `warn`, which is the
//! default level here. `RUST_LOG=chart_widgets=debug` follows a single
//! widget's sync traffic.

/// Installs a compact stderr subscriber filtered by `RUST_LOG` (default
/// `warn`). Notebook kernels reserve stdout for the protocol, so nothing
/// goes there.
///
/// Returns `false` without the `telemetry` feature or when the host already
/// set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
