//! What a sampler hands back: records plus optional timing metadata.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use quench_ir::{Assignment, SampleResult, VariableTable};

/// Timing metadata reported by a sampler, in microseconds.
///
/// Informational only. Simulators leave `access_time_us` unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Wall-clock time of the whole call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_real_time_us: Option<f64>,
    /// Time spent on the device itself (hardware only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_time_us: Option<f64>,
    /// Anneal duration of a single read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anneal_time_per_sample_us: Option<f64>,
    /// Further sampler-specific fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl Timing {
    /// Create empty timing metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total wall-clock time.
    pub fn with_total_real_time(mut self, us: f64) -> Self {
        self.total_real_time_us = Some(us);
        self
    }

    /// Set the device access time.
    pub fn with_access_time(mut self, us: f64) -> Self {
        self.access_time_us = Some(us);
        self
    }

    /// Set the per-read anneal time.
    pub fn with_anneal_time_per_sample(mut self, us: f64) -> Self {
        self.anneal_time_per_sample_us = Some(us);
        self
    }

    /// Add a named field. Negative values are stored as 0.
    pub fn with_extra(mut self, key: impl Into<String>, us: f64) -> Self {
        self.extra.insert(key.into(), us.max(0.0));
        self
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<f64>| v.map_or_else(|| "not available".to_string(), |us| format!("{us:.0} us"));
        writeln!(f, "total real time: {}", show(self.total_real_time_us))?;
        writeln!(f, "access time: {}", show(self.access_time_us))?;
        write!(
            f,
            "anneal time per sample: {}",
            show(self.anneal_time_per_sample_us)
        )?;
        for (key, us) in &self.extra {
            write!(f, "\n{key}: {us:.0} us")?;
        }
        Ok(())
    }
}

/// Result of one sampling call.
///
/// Records are kept in non-decreasing energy order. A record may repeat an
/// assignment seen in another record; merging is the caller's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleSet {
    variables: VariableTable,
    records: Vec<SampleResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timing: Option<Timing>,
}

impl SampleSet {
    /// Create a sample set, ordering records by energy.
    pub fn new(variables: VariableTable, mut records: Vec<SampleResult>) -> Self {
        records.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        Self {
            variables,
            records,
            timing: None,
        }
    }

    /// A sample set with no records.
    pub fn empty(variables: VariableTable) -> Self {
        Self::new(variables, Vec::new())
    }

    /// Attach timing metadata.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Variables of the sampled model.
    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Records in energy order.
    pub fn records(&self) -> &[SampleResult] {
        &self.records
    }

    /// Timing metadata, if the sampler reported any.
    pub fn timing(&self) -> Option<&Timing> {
        self.timing.as_ref()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lowest-energy record.
    pub fn lowest(&self) -> Option<&SampleResult> {
        self.records.first()
    }

    /// Sum of occurrences over all records.
    pub fn total_occurrences(&self) -> u64 {
        self.records.iter().map(|r| r.occurrences).sum()
    }

    /// Merge records with identical assignments, summing their occurrences.
    pub fn aggregate(self) -> Self {
        let mut index: FxHashMap<Assignment, usize> = FxHashMap::default();
        let mut merged: Vec<SampleResult> = Vec::new();
        for record in self.records {
            match index.get(&record.assignment) {
                Some(&i) => merged[i].occurrences += record.occurrences,
                None => {
                    index.insert(record.assignment.clone(), merged.len());
                    merged.push(record);
                }
            }
        }
        Self {
            variables: self.variables,
            records: merged,
            timing: self.timing,
        }
    }

    /// Iterate over records in energy order.
    pub fn iter(&self) -> std::slice::Iter<'_, SampleResult> {
        self.records.iter()
    }
}

impl IntoIterator for SampleSet {
    type Item = SampleResult;
    type IntoIter = std::vec::IntoIter<SampleResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a SampleResult;
    type IntoIter = std::slice::Iter<'a, SampleResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(q: u8, energy: f64, n: u64) -> SampleResult {
        SampleResult::new(Assignment::new().with("q", q), energy, n)
    }

    #[test]
    fn test_records_sorted_by_energy() {
        let set = SampleSet::new(
            VariableTable::new(),
            vec![record(1, 0.5, 1), record(0, -1.0, 2), record(1, 0.0, 3)],
        );
        let energies: Vec<f64> = set.iter().map(|r| r.energy).collect();
        assert_eq!(energies, vec![-1.0, 0.0, 0.5]);
        assert_eq!(set.lowest().unwrap().occurrences, 2);
        assert_eq!(set.total_occurrences(), 6);
    }

    #[test]
    fn test_aggregate_merges_duplicates() {
        let set = SampleSet::new(
            VariableTable::new(),
            vec![record(1, -1.0, 1), record(0, 0.0, 1), record(1, -1.0, 4)],
        )
        .with_timing(Timing::new().with_total_real_time(10.0))
        .aggregate();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].occurrences, 5);
        assert_eq!(set.total_occurrences(), 6);
        assert!(set.timing().is_some());
    }

    #[test]
    fn test_into_iter_consumes() {
        let set = SampleSet::new(VariableTable::new(), vec![record(0, 0.0, 1)]);
        let collected: Vec<SampleResult> = set.into_iter().collect();
        assert_eq!(collected.len(), 1);
    }

    #[test]
    fn test_timing_display() {
        let timing = Timing::new()
            .with_total_real_time(1520.0)
            .with_extra("sweeps", 1000.0)
            .with_extra("bogus", -3.0);
        let text = timing.to_string();
        assert!(text.contains("total real time: 1520 us"));
        assert!(text.contains("access time: not available"));
        assert_eq!(timing.extra["bogus"], 0.0);
    }
}
