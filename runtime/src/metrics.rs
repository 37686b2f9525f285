//! Prometheus metrics for observability and monitoring.
//!
//! The Store records through the `metrics` facade; without an installed
//! recorder every call is a no-op. [`install_recorder`] installs a Prometheus
//! recorder whose handle renders the text exposition on demand (no HTTP
//! listener is started).
//!
//! # Example
//!
//! ```rust,no_run
//! use reflow_runtime::metrics::install_recorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = install_recorder()?;
//! // ... dispatch some actions ...
//! println!("{}", handle.render());
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use thiserror::Error;

pub use metrics_exporter_prometheus::PrometheusHandle;

/// Actions dispatched, labelled by `action_type`
pub const ACTIONS_DISPATCHED: &str = "store_actions_dispatched_total";
/// Root reducer execution time per dispatch
pub const REDUCER_DURATION: &str = "store_reducer_duration_seconds";
/// Observer invocations
pub const OBSERVERS_NOTIFIED: &str = "store_observers_notified_total";
/// Re-entrant dispatches rejected, labelled by `action_type`
pub const REENTRANT_DISPATCH_REJECTED: &str = "store_reentrant_dispatch_rejected_total";
/// Currently registered observers
pub const SUBSCRIPTIONS_ACTIVE: &str = "store_subscriptions_active";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Install the Prometheus recorder and register metric descriptions.
///
/// # Errors
///
/// Returns [`MetricsError::Install`] if a global recorder is already installed,
/// or [`MetricsError::Build`] if the histogram buckets are rejected.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[0.000_001, 0.000_01, 0.000_1, 0.001, 0.01, 0.1],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    describe_metrics();
    tracing::info!("Prometheus metrics recorder installed");

    Ok(handle)
}

/// Register all metric descriptions.
pub fn describe_metrics() {
    describe_counter!(
        ACTIONS_DISPATCHED,
        "Total number of actions dispatched to a store"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time taken by the root reducer to compute the next state"
    );
    describe_counter!(
        OBSERVERS_NOTIFIED,
        "Total number of observer invocations after dispatch"
    );
    describe_counter!(
        REENTRANT_DISPATCH_REJECTED,
        "Total number of dispatches rejected because they were issued from an observer"
    );
    describe_gauge!(
        SUBSCRIPTIONS_ACTIVE,
        "Number of observers currently subscribed"
    );
}
