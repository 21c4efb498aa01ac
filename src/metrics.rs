//! Prometheus metrics for plan generation.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Plans generated counter metric name.
pub const METRIC_PLANS_GENERATED: &str = "plans_generated_total";
/// Plan failures counter metric name.
pub const METRIC_PLAN_FAILURES: &str = "plan_failures_total";
/// Plan generation latency metric name.
pub const METRIC_PLAN_LATENCY: &str = "plan_generation_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_PLAN_LATENCY,
        "End-to-end plan generation latency in milliseconds"
    );

    describe_counter!(
        METRIC_PLANS_GENERATED,
        "Total number of workout plans generated"
    );
    describe_counter!(
        METRIC_PLAN_FAILURES,
        "Total number of failed plan generation attempts"
    );

    debug!("Metrics initialized");
}

/// Record plan generation latency.
pub fn record_plan_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_PLAN_LATENCY).record(latency_ms);
}

/// Increment the generated-plans counter.
pub fn inc_plans_generated() {
    counter!(METRIC_PLANS_GENERATED).increment(1);
}

/// Increment the failed-plans counter.
pub fn inc_plan_failures() {
    counter!(METRIC_PLAN_FAILURES).increment(1);
}
