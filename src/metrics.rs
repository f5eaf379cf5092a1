//! Prometheus metrics for command dispatch.
//!
//! - `slcmd_dispatch_total{outcome}` - Dispatches by terminal outcome
//! - `slcmd_command_total{command}` - Command bodies executed
//! - `slcmd_command_duration_seconds{command}` - Command body latency
//! - `slcmd_collaborator_faults_total{stage}` - Dispatches aborted by a failing collaborator
//!
//! Recording is a no-op until [`init`] has been called, so hosts that do not
//! scrape metrics pay only an atomic load per dispatch.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Dispatches by outcome kind.
pub static DISPATCH_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command bodies executed, by primary command name.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command body latency, by primary command name.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Collaborator faults by pipeline stage.
pub static COLLABORATOR_FAULTS: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; only the first call registers.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(DISPATCH_COUNTER, IntCounterVec::new(Opts::new("slcmd_dispatch_total", "Dispatches by outcome"), &["outcome"]));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("slcmd_command_total", "Command bodies executed"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("slcmd_command_duration_seconds", "Command body latency")
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["command"]));
    register!(COLLABORATOR_FAULTS, IntCounterVec::new(Opts::new("slcmd_collaborator_faults_total", "Dispatches aborted by a collaborator fault"), &["stage"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a dispatch outcome.
#[inline]
pub fn record_outcome(kind: &str) {
    if let Some(c) = DISPATCH_COUNTER.get() {
        c.with_label_values(&[kind]).inc();
    }
}

/// Record a command body execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a collaborator fault.
#[inline]
pub fn record_fault(stage: &str) {
    if let Some(c) = COLLABORATOR_FAULTS.get() {
        c.with_label_values(&[stage]).inc();
    }
}
