//! Sampler capability introspection.
//!
//! [`Capabilities`] describe the limits a sampler enforces: how many
//! variables a model may have, how many reads one call may request and
//! whether anneal schedules are honored. Callers use them to reject work
//! before it is submitted.

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};
use crate::schedule::AnnealSchedule;

/// Limits and features of a sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the sampler.
    pub name: String,
    /// Largest model the sampler accepts.
    pub max_variables: usize,
    /// Most reads per sampling call.
    pub max_reads: u32,
    /// Whether custom anneal schedules are honored.
    pub supports_schedule: bool,
    /// Longest schedule accepted, if the sampler has a limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_anneal_time_us: Option<f64>,
    /// Whether this is a classical simulation (`true`) or hardware (`false`).
    pub is_simulator: bool,
}

impl Capabilities {
    /// Capabilities of an in-process simulator.
    pub fn simulator(name: impl Into<String>, max_variables: usize) -> Self {
        Self {
            name: name.into(),
            max_variables,
            max_reads: 100_000,
            supports_schedule: false,
            max_anneal_time_us: None,
            is_simulator: true,
        }
    }

    /// Set the read limit.
    pub fn with_max_reads(mut self, max_reads: u32) -> Self {
        self.max_reads = max_reads;
        self
    }

    /// Mark schedules as supported, optionally with a duration limit.
    pub fn with_schedule_support(mut self, max_anneal_time_us: Option<f64>) -> Self {
        self.supports_schedule = true;
        self.max_anneal_time_us = max_anneal_time_us;
        self
    }

    /// Check a request against these limits.
    pub fn check(
        &self,
        num_variables: usize,
        num_reads: u32,
        schedule: Option<&AnnealSchedule>,
    ) -> HalResult<()> {
        if num_variables > self.max_variables {
            return Err(HalError::ResourceExhausted(format!(
                "model has {num_variables} variables, {} accepts at most {}",
                self.name, self.max_variables
            )));
        }
        if num_reads > self.max_reads {
            return Err(HalError::ResourceExhausted(format!(
                "{num_reads} reads requested, {} accepts at most {}",
                self.name, self.max_reads
            )));
        }
        if let Some(schedule) = schedule {
            if !self.supports_schedule {
                return Err(HalError::Unsupported(format!(
                    "{} does not accept anneal schedules",
                    self.name
                )));
            }
            if let Some(limit) = self.max_anneal_time_us {
                if schedule.duration_us() > limit {
                    return Err(HalError::InvalidSchedule(format!(
                        "schedule lasts {} us, {} allows at most {limit} us",
                        schedule.duration_us(),
                        self.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_defaults() {
        let caps = Capabilities::simulator("exact", 20);
        assert_eq!(caps.max_reads, 100_000);
        assert!(caps.is_simulator);
        assert!(!caps.supports_schedule);
    }

    #[test]
    fn test_check_limits() {
        let caps = Capabilities::simulator("exact", 4).with_max_reads(10);
        assert!(caps.check(4, 10, None).is_ok());
        assert!(matches!(caps.check(5, 1, None), Err(HalError::ResourceExhausted(_))));
        assert!(matches!(caps.check(1, 11, None), Err(HalError::ResourceExhausted(_))));
    }

    #[test]
    fn test_check_schedule() {
        let schedule = AnnealSchedule::linear(20.0).unwrap();
        let plain = Capabilities::simulator("exact", 4);
        assert!(matches!(plain.check(1, 1, Some(&schedule)), Err(HalError::Unsupported(_))));

        let limited = plain.clone().with_schedule_support(Some(10.0));
        assert!(matches!(
            limited.check(1, 1, Some(&schedule)),
            Err(HalError::InvalidSchedule(_))
        ));
        let open = plain.with_schedule_support(None);
        assert!(open.check(1, 1, Some(&schedule)).is_ok());
    }
}
