//! Sampler trait and configuration.
//!
//! The [`Sampler`] trait is the only way the rest of the workspace talks to
//! an annealer, real or simulated:
//!
//! ```text
//!   capabilities() ──→ availability() ──→ validate() ──→ sample()
//!    (sync, &ref)         (async)          (async)       (async)
//! ```
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `availability()` | async | yes | `HalResult<SamplerAvailability>` |
//! | `validate()` | async | provided | `HalResult<ValidationResult>` |
//! | `sample()` | async | yes | `HalResult<SampleSet>` |
//!
//! A sampling call runs to completion or fails as a whole. There are no
//! partial results, and callers must not assume that two calls with the
//! same inputs return the same samples.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use quench_ir::EnergyModel;

use crate::capability::Capabilities;
use crate::error::HalResult;
use crate::sample::SampleSet;
use crate::schedule::AnnealSchedule;

/// Configuration for a sampler instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Name of the sampler.
    pub name: String,
    /// Remote endpoint, for samplers that have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Authentication token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Sampler-specific settings such as `seed` or `num_sweeps`.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SamplerConfig {
    /// Create a new sampler configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer setting.
    ///
    /// Missing keys give `Ok(None)`; present keys of the wrong type are a
    /// configuration error.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                crate::error::HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }
}

impl fmt::Debug for SamplerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamplerConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for samplers of energy models.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; implementations cache
///   their capabilities at construction time.
/// - `sample()` returns records in non-decreasing energy order, each with at
///   least one occurrence. Zero reads yield an empty [`SampleSet`].
/// - Requests above `max_variables` or `max_reads` fail with
///   `HalError::ResourceExhausted`; a schedule passed to a sampler without
///   schedule support fails with `HalError::Unsupported`.
#[async_trait]
pub trait Sampler: Send + Sync {
    /// Get the name of this sampler.
    fn name(&self) -> &str;

    /// Get the capabilities of this sampler.
    fn capabilities(&self) -> &Capabilities;

    /// Check whether the sampler can take work right now.
    async fn availability(&self) -> HalResult<SamplerAvailability>;

    /// Check a request against the sampler's limits without running it.
    async fn validate(
        &self,
        model: &EnergyModel,
        num_reads: u32,
        schedule: Option<&AnnealSchedule>,
    ) -> HalResult<ValidationResult> {
        match self
            .capabilities()
            .check(model.num_variables(), num_reads, schedule)
        {
            Ok(()) => Ok(ValidationResult::Valid),
            Err(e) => Ok(ValidationResult::Invalid {
                reasons: vec![e.to_string()],
            }),
        }
    }

    /// Draw `num_reads` samples from `model`.
    async fn sample(
        &self,
        model: &EnergyModel,
        num_reads: u32,
        schedule: Option<&AnnealSchedule>,
    ) -> HalResult<SampleSet>;
}

/// Sampler availability information.
#[derive(Debug, Clone)]
pub struct SamplerAvailability {
    /// Whether the sampler is currently accepting work.
    pub is_available: bool,
    /// Estimated wait before a new call starts (if known).
    pub estimated_wait: Option<Duration>,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl SamplerAvailability {
    /// Availability of an in-process sampler.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            estimated_wait: Some(Duration::ZERO),
            status_message: None,
        }
    }

    /// Availability of an offline sampler.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            estimated_wait: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Result of checking a request against sampler limits.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The request can be submitted as-is.
    Valid,
    /// The request cannot run on this sampler.
    Invalid {
        /// Reasons the request is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the request is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Trait for creating samplers from configuration.
pub trait SamplerFactory: Sampler + Sized {
    /// Create a sampler from configuration.
    fn from_config(config: SamplerConfig) -> HalResult<Self>;
}
