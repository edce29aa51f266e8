//! Dispatch metrics.
//!
//! Recorded through the `metrics` facade. Installing an exporter is left to
//! the embedding application; without one every call is a no-op.
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `wayfinder_dispatch_total` | Counter | `route`, `outcome` | Dispatched requests |
//! | `wayfinder_dispatch_duration_seconds` | Histogram | `route` | Dispatch latency |
//! | `wayfinder_routes` | Gauge | - | Routes in the live table |

use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};

/// Dispatch counter name.
pub const DISPATCH_TOTAL: &str = "wayfinder_dispatch_total";

/// Dispatch latency histogram name.
pub const DISPATCH_DURATION: &str = "wayfinder_dispatch_duration_seconds";

/// Live route count gauge name.
pub const ROUTES: &str = "wayfinder_routes";

/// Values of the `outcome` label.
pub mod outcome {
    /// The handler returned a value, view or envelope.
    pub const OK: &str = "ok";
    /// The handler failed or panicked.
    pub const FAILURE: &str = "failure";
    /// An argument did not convert under strict binding.
    pub const BAD_REQUEST: &str = "bad_request";
    /// No route matched.
    pub const NO_ROUTE: &str = "no_route";
}

/// Registers metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(DISPATCH_TOTAL, Unit::Count, "Total number of dispatched requests");
    describe_histogram!(
        DISPATCH_DURATION,
        Unit::Seconds,
        "Time from lookup to normalized response"
    );
    describe_gauge!(ROUTES, Unit::Count, "Number of routes in the live table");
}

/// Records one dispatch.
///
/// `route` is the route label, or `-` when nothing matched.
pub fn record_dispatch(route: &str, outcome: &'static str, duration: Duration) {
    counter!(DISPATCH_TOTAL, "route" => route.to_string(), "outcome" => outcome).increment(1);
    histogram!(DISPATCH_DURATION, "route" => route.to_string()).record(duration.as_secs_f64());
}

/// Records the size of the live route table.
pub fn record_route_count(count: usize) {
    gauge!(ROUTES).set(count as f64);
}
