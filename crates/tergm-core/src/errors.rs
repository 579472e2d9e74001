//! Structured error types shared across the sampler crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`TergmError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (vertices, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the sampler.
///
/// Every family except [`TergmError::Proposal`] is recoverable in the usual
/// sense: the call failed before or without touching caller-visible state. A
/// `Proposal` error is raised when a proposal reports an unrecoverable internal
/// failure mid-chain. At that point the network pair, both models and both
/// proposals may violate their invariants, so the caller must drop everything
/// associated with the call instead of attempting cleanup or reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum TergmError {
    /// Network structure errors (bad vertices, bipartite violations, ...).
    #[error("network error: {0}")]
    Network(ErrorInfo),
    /// Model construction and change-statistic errors.
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Unrecoverable proposal failure. State touched by the call is corrupted.
    #[error("fatal proposal error: {0}")]
    Proposal(ErrorInfo),
    /// Invalid sampler configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and artefact I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl TergmError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            TergmError::Network(info)
            | TergmError::Model(info)
            | TergmError::Proposal(info)
            | TergmError::Config(info)
            | TergmError::Serde(info) => info,
        }
    }

    /// Whether the error leaves caller state in an undefined condition.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TergmError::Proposal(_))
    }
}
