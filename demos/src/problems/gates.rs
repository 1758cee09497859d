//! Single-gate tutorials written as raw QUBO dictionaries.

use quench_ir::{ConstraintSet, EnergyModel, Gate, IrResult};

/// NOT gate over `q0` (input) and `q4` (output).
///
/// The zero entry for `(q0, q4)` only declares the pair; the coupling sits
/// on `(q4, q0)`.
pub fn not_qubo() -> IrResult<EnergyModel> {
    EnergyModel::from_qubo([
        (("q0", "q0"), -1.0),
        (("q0", "q4"), 0.0),
        (("q4", "q0"), 2.0),
        (("q4", "q4"), -1.0),
    ])
}

/// AND gate `z = x1 ∧ x2`.
pub fn and_qubo() -> IrResult<EnergyModel> {
    EnergyModel::from_qubo([
        (("x1", "x2"), 1.0),
        (("x1", "z"), -2.0),
        (("x2", "z"), -2.0),
        (("z", "z"), 3.0),
    ])
}

/// The rule the NOT QUBO encodes.
pub fn not_constraints() -> IrResult<ConstraintSet> {
    let mut set = ConstraintSet::new();
    set.add_gate(Gate::Not, &["q0", "q4"])?;
    Ok(set)
}

/// The rule the AND QUBO encodes.
pub fn and_constraints() -> IrResult<ConstraintSet> {
    let mut set = ConstraintSet::new();
    set.add_gate(Gate::And, &["x1", "x2", "z"])?;
    Ok(set)
}
