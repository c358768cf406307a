//! Prometheus metrics for textgen-service.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static TEXTGEN_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static TEXTGEN_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static TEXTGEN_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static TEXTGEN_PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup; later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new("textgen_requests_total", "Total text generation requests"),
        &["content_type", "outcome"],
    )
    .expect("Failed to create textgen_requests_total metric");

    // type: input, output
    let tokens_total = IntCounterVec::new(
        Opts::new("textgen_tokens_total", "Total tokens processed"),
        &["model", "type"],
    )
    .expect("Failed to create textgen_tokens_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "textgen_provider_latency_seconds",
            "Text provider API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )
    .expect("Failed to create textgen_provider_latency_seconds metric");

    let provider_errors = IntCounterVec::new(
        Opts::new("textgen_provider_errors_total", "Total text provider errors"),
        &["provider", "error_type"],
    )
    .expect("Failed to create textgen_provider_errors_total metric");

    registry
        .register(Box::new(requests_total.clone()))
        .expect("Failed to register textgen_requests_total");
    registry
        .register(Box::new(tokens_total.clone()))
        .expect("Failed to register textgen_tokens_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register textgen_provider_latency_seconds");
    registry
        .register(Box::new(provider_errors.clone()))
        .expect("Failed to register textgen_provider_errors_total");

    if REGISTRY.set(registry).is_err() {
        // Lost an init race; the winner's metrics are already installed.
        return;
    }
    let _ = TEXTGEN_REQUESTS_TOTAL.set(requests_total);
    let _ = TEXTGEN_TOKENS_TOTAL.set(tokens_total);
    let _ = TEXTGEN_PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = TEXTGEN_PROVIDER_ERRORS_TOTAL.set(provider_errors);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

/// Record a finished generation request. `outcome` is `success` or `error`.
pub fn record_request(content_type: &str, outcome: &str) {
    if let Some(counter) = TEXTGEN_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[content_type, outcome]).inc();
    }
}

/// Record token usage reported by the provider.
pub fn record_tokens(model: &str, input_tokens: i32, output_tokens: i32) {
    if let Some(counter) = TEXTGEN_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens.max(0) as u64);
        counter
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens.max(0) as u64);
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = TEXTGEN_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = TEXTGEN_PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}
