//! Quench energy models and constraints
//!
//! This crate holds everything that happens on either side of a sampler
//! call: building a quadratic energy model (QUBO) from named binary
//! variables, encoding boolean gates and other constraints into it, and
//! validating and aggregating the samples that come back.
//!
//! # Core Components
//!
//! - **Variables**: [`VarId`] and [`VariableTable`] intern names into dense
//!   indices
//! - **Models**: [`EnergyModel`] accumulates biases, couplings and an offset;
//!   [`CompiledModel`] is the dense form samplers iterate over
//! - **Gates**: [`Gate`] encodes NOT, AND, OR, XOR, NAND and the adders
//! - **Constraints**: [`ConstraintSet`] declares relations, checks
//!   assignments and reduces to an [`EnergyModel`]
//! - **Aggregation**: [`validate_and_aggregate`] turns raw samples into an
//!   [`AggregateReport`]
//!
//! # Example: AND gate
//!
//! ```rust
//! use quench_ir::{Assignment, ConstraintSet, Gate, ReductionConfig};
//!
//! let mut constraints = ConstraintSet::new();
//! constraints.add_gate(Gate::And, &["x1", "x2", "z"]).unwrap();
//! let model = constraints.to_energy_model(&ReductionConfig::default()).unwrap();
//!
//! let valid = Assignment::new().with("x1", 1).with("x2", 1).with("z", 1);
//! let invalid = Assignment::new().with("x1", 1).with("x2", 1).with("z", 0);
//! assert_eq!(model.energy(&valid).unwrap(), 0.0);
//! assert!(model.energy(&invalid).unwrap() >= 1.0);
//! assert!(constraints.check(&valid).unwrap());
//! ```

pub mod aggregate;
pub mod assignment;
pub mod constraint;
pub mod error;
pub mod gate;
pub mod model;
pub mod reduce;
pub mod variable;

pub use aggregate::{AggregateEntry, AggregateReport, validate_and_aggregate};
pub use assignment::{Assignment, SampleResult};
pub use constraint::{Constraint, ConstraintKind, ConstraintSet, Predicate};
pub use error::{IrError, IrResult};
pub use gate::{DEFAULT_FIX_STRENGTH, Gate, Penalty, fix_variable};
pub use model::{CompiledModel, EnergyModel};
pub use reduce::ReductionConfig;
pub use variable::{VarId, Variable, VariableTable};
