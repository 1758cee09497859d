//! Assignments of binary values to named variables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{IrError, IrResult};

/// A valuation of named binary variables.
///
/// Backed by an ordered map so that display and serialization are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    values: BTreeMap<String, u8>,
}

impl Assignment {
    /// Create an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable. Any non-zero value is stored as 1.
    pub fn set(&mut self, name: impl Into<String>, value: u8) {
        self.values.insert(name.into(), u8::from(value != 0));
    }

    /// Pair names with bits position by position.
    pub fn from_bits<S: AsRef<str>>(names: &[S], bits: &[bool]) -> Self {
        names
            .iter()
            .zip(bits)
            .map(|(name, &bit)| (name.as_ref(), u8::from(bit)))
            .collect()
    }

    /// Builder form of [`Assignment::set`].
    pub fn with(mut self, name: impl Into<String>, value: u8) -> Self {
        self.set(name, value);
        self
    }

    /// Value of a variable, if assigned.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).map(|&v| v == 1)
    }

    /// Value of a variable, failing if the assignment does not cover it.
    pub fn require(&self, name: &str) -> IrResult<bool> {
        self.get(name).ok_or_else(|| IrError::MalformedAssignment {
            variable: name.to_string(),
        })
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable is assigned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of variables set to 1.
    pub fn count_ones(&self) -> usize {
        self.values.values().filter(|&&v| v == 1).count()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v == 1))
    }

    /// Keep only the listed variables.
    pub fn restricted_to<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let values = names
            .iter()
            .filter_map(|n| {
                let n = n.as_ref();
                self.values.get(n).map(|&v| (n.to_string(), v))
            })
            .collect();
        Self { values }
    }

    /// Concatenate the bits of `names` in the given order, e.g. `"0110"`.
    pub fn bitstring<S: AsRef<str>>(&self, names: &[S]) -> IrResult<String> {
        names
            .iter()
            .map(|n| self.require(n.as_ref()).map(|b| if b { '1' } else { '0' }))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, u8)>>(iter: I) -> Self {
        let mut assignment = Self::new();
        for (name, value) in iter {
            assignment.set(name, value);
        }
        assignment
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// One distinct result returned by a sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// The sampled valuation.
    pub assignment: Assignment,
    /// Energy of the valuation under the sampled model.
    pub energy: f64,
    /// How many reads produced this record (at least 1).
    pub occurrences: u64,
}

impl SampleResult {
    /// Create a sample result.
    pub fn new(assignment: Assignment, energy: f64, occurrences: u64) -> Self {
        Self {
            assignment,
            energy,
            occurrences,
        }
    }
}

impl fmt::Display for SampleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Energy: {} Occurrences: {}",
            self.assignment, self.energy, self.occurrences
        )
    }
}
