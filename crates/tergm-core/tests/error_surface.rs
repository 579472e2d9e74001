use tergm_core::errors::{ErrorInfo, TergmError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("vertex", "3")
        .with_context("reason", "example")
}

#[test]
fn network_error_surface() {
    let err = TergmError::Network(sample_info("vertex-out-of-range", "vertex 3 not in 1..=2"));
    assert_eq!(err.info().code, "vertex-out-of-range");
    assert!(err.info().context.contains_key("vertex"));
    assert!(!err.is_fatal());
}

#[test]
fn model_error_surface() {
    let err = TergmError::Model(sample_info("parameter-length", "theta length mismatch"));
    assert_eq!(err.info().code, "parameter-length");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn proposal_error_is_fatal() {
    let err = TergmError::Proposal(sample_info("proposal-unrecoverable", "sampler state lost"));
    assert!(err.is_fatal());
    assert!(err.to_string().starts_with("fatal proposal error"));
}

#[test]
fn config_error_surface() {
    let err = TergmError::Config(sample_info("zero-interval", "interval must be positive"));
    assert_eq!(err.info().code, "zero-interval");
}

#[test]
fn display_includes_context_and_hint() {
    let err = TergmError::Serde(
        ErrorInfo::new("manifest-write", "disk full")
            .with_context("path", "/tmp/out")
            .with_hint("free some space"),
    );
    let rendered = err.to_string();
    assert!(rendered.contains("code: manifest-write"));
    assert!(rendered.contains("path=/tmp/out"));
    assert!(rendered.contains("hint: free some space"));
}
