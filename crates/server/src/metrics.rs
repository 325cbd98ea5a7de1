use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static SHIP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "ship_catalog_requests_total",
        "Ship catalog operations by outcome",
        &["operation", "outcome"]
    )
    .expect("register ship_catalog_requests_total")
});

fn outcome<T>(res: &Result<T, ServiceError>) -> &'static str {
    match res {
        Ok(_) => "ok",
        Err(ServiceError::InvalidRequest(_)) => "invalid_request",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::Repository(_)) => "error",
    }
}

pub fn observe<T>(operation: &str, res: &Result<T, ServiceError>) {
    SHIP_REQUESTS_TOTAL.with_label_values(&[operation, outcome(res)]).inc();
}

/// Pass an extractor result through, counting a rejection as an invalid request.
pub fn accept<T, E>(operation: &str, extracted: Result<T, E>) -> Result<T, E> {
    if extracted.is_err() {
        SHIP_REQUESTS_TOTAL.with_label_values(&[operation, "invalid_request"]).inc();
    }
    extracted
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
