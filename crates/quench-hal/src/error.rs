//! Error types for the HAL crate.

use quench_ir::IrError;
use thiserror::Error;

/// Errors that can occur in sampler operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Sampler is not available.
    #[error("Sampler not available: {0}")]
    BackendUnavailable(String),

    /// Request exceeds the sampler's variable or read limits.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Sampling did not finish within the configured limit.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Anneal schedule violates the schedule rules.
    #[error("Invalid anneal schedule: {0}")]
    InvalidSchedule(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic sampler error.
    #[error("Sampler error: {0}")]
    Backend(String),

    /// Model or assignment error surfaced through a sampler.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
