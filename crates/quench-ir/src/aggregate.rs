//! Validation and aggregation of sampler output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::assignment::{Assignment, SampleResult};
use crate::constraint::ConstraintSet;
use crate::error::IrResult;

/// One distinct valid solution in an [`AggregateReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    /// The solution restricted to the declared variables.
    pub assignment: Assignment,
    /// Summed occurrences over every sample with this solution.
    pub occurrences: u64,
    /// Lowest energy observed for this solution.
    pub min_energy: f64,
}

/// Valid solutions keyed by bitstring, plus valid and invalid totals.
///
/// Keys concatenate the declared variables' bits in declared order, so the
/// same solution always maps to the same key regardless of which ancilla
/// values the sampler reported alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    variables: Vec<String>,
    entries: BTreeMap<String, AggregateEntry>,
    valid_occurrences: u64,
    invalid_occurrences: u64,
}

impl AggregateReport {
    /// Declared variables that make up each key, in key order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Occurrences of samples satisfying every constraint.
    pub fn valid_occurrences(&self) -> u64 {
        self.valid_occurrences
    }

    /// Occurrences of samples violating at least one constraint.
    pub fn invalid_occurrences(&self) -> u64 {
        self.invalid_occurrences
    }

    /// All occurrences seen.
    pub fn total_occurrences(&self) -> u64 {
        self.valid_occurrences + self.invalid_occurrences
    }

    /// Share of valid occurrences, 0.0 for an empty report.
    pub fn valid_fraction(&self) -> f64 {
        match self.total_occurrences() {
            0 => 0.0,
            total => self.valid_occurrences as f64 / total as f64,
        }
    }

    /// Distinct valid solutions in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &AggregateEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct valid solutions.
    pub fn num_solutions(&self) -> usize {
        self.entries.len()
    }

    /// Entry for a key such as `"0100"`.
    pub fn get(&self, key: &str) -> Option<&AggregateEntry> {
        self.entries.get(key)
    }

    /// The valid solution seen most often. Ties go to the smallest key.
    pub fn most_frequent(&self) -> Option<(&str, &AggregateEntry)> {
        self.entries()
            .fold(None, |best: Option<(&str, &AggregateEntry)>, (k, e)| match best {
                Some((_, b)) if b.occurrences >= e.occurrences => best,
                _ => Some((k, e)),
            })
    }

    /// Whether nothing was aggregated.
    pub fn is_empty(&self) -> bool {
        self.total_occurrences() == 0
    }
}

/// Split samples into valid and invalid, merging identical valid solutions.
///
/// Every sample must cover the set's declared variables; a sample that does
/// not aborts the call with [`crate::IrError::MalformedAssignment`].
pub fn validate_and_aggregate<I>(samples: I, constraints: &ConstraintSet) -> IrResult<AggregateReport>
where
    I: IntoIterator<Item = SampleResult>,
{
    let variables = constraints.variable_names().to_vec();
    let mut report = AggregateReport {
        variables,
        ..AggregateReport::default()
    };

    for sample in samples {
        if !constraints.check(&sample.assignment)? {
            report.invalid_occurrences += sample.occurrences;
            continue;
        }
        report.valid_occurrences += sample.occurrences;
        let key = sample.assignment.bitstring(&report.variables)?;
        let entry = report
            .entries
            .entry(key)
            .or_insert_with(|| AggregateEntry {
                assignment: sample.assignment.restricted_to(&report.variables),
                occurrences: 0,
                min_energy: sample.energy,
            });
        entry.occurrences += sample.occurrences;
        entry.min_energy = entry.min_energy.min(sample.energy);
    }

    debug!(
        valid = report.valid_occurrences,
        invalid = report.invalid_occurrences,
        solutions = report.entries.len(),
        "Aggregated samples"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;
    use crate::gate::Gate;

    fn not_gate() -> ConstraintSet {
        let mut set = ConstraintSet::new();
        set.add_gate(Gate::Not, &["q0", "q4"]).unwrap();
        set
    }

    fn sample(q0: u8, q4: u8, energy: f64, n: u64) -> SampleResult {
        SampleResult::new(Assignment::new().with("q0", q0).with("q4", q4), energy, n)
    }

    #[test]
    fn test_merges_identical_solutions() {
        let samples = vec![
            sample(0, 1, -1.0, 9),
            sample(1, 0, -1.0, 7),
            sample(0, 1, -1.0, 3),
            sample(1, 1, 0.0, 1),
        ];
        let report = validate_and_aggregate(samples, &not_gate()).unwrap();
        assert_eq!(report.valid_occurrences(), 19);
        assert_eq!(report.invalid_occurrences(), 1);
        assert_eq!(report.num_solutions(), 2);
        assert_eq!(report.get("01").unwrap().occurrences, 12);
        assert_eq!(report.most_frequent().unwrap().0, "01");
        assert!((report.valid_fraction() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_empty_report() {
        let report = validate_and_aggregate(Vec::new(), &not_gate()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.valid_fraction(), 0.0);
        assert!(report.most_frequent().is_none());
    }

    #[test]
    fn test_ancillas_are_dropped_from_entries() {
        let mut set = ConstraintSet::new();
        set.add_gate(Gate::Xor, &["a", "b", "s"]).unwrap();
        let with_anc = |anc| {
            SampleResult::new(
                Assignment::new()
                    .with("a", 1)
                    .with("b", 1)
                    .with("s", 0)
                    .with("xor(a,b,s)#0", anc),
                0.0,
                1,
            )
        };
        let report = validate_and_aggregate(vec![with_anc(1), with_anc(0)], &set).unwrap();
        let entry = report.get("110").unwrap();
        assert_eq!(entry.occurrences, 2);
        assert_eq!(entry.assignment.len(), 3);
    }

    #[test]
    fn test_keeps_lowest_energy() {
        let report =
            validate_and_aggregate(vec![sample(1, 0, 0.5, 1), sample(1, 0, -1.0, 1)], &not_gate())
                .unwrap();
        assert_eq!(report.get("10").unwrap().min_energy, -1.0);
    }

    #[test]
    fn test_missing_variable_aborts() {
        let partial = SampleResult::new(Assignment::new().with("q0", 1), 0.0, 1);
        assert_eq!(
            validate_and_aggregate(vec![partial], &not_gate()),
            Err(IrError::MalformedAssignment {
                variable: "q4".into()
            })
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = validate_and_aggregate(vec![sample(0, 1, -1.0, 2)], &not_gate()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid_occurrences"], 2);
        assert_eq!(json["entries"]["01"]["assignment"]["q4"], 1);
    }
}
