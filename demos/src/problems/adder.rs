//! Full adder built from XOR, AND and OR gates.

use quench_ir::{Assignment, ConstraintSet, Gate, IrResult};

/// `(s, cOut) = a + b + cIn` over intermediates `xor1`, `and1` and `and2`.
pub fn full_adder() -> IrResult<ConstraintSet> {
    let mut set = ConstraintSet::new();
    set.add_gate(Gate::Xor, &["a", "b", "xor1"])?
        .add_gate(Gate::Xor, &["xor1", "cIn", "s"])?
        .add_gate(Gate::And, &["xor1", "cIn", "and1"])?
        .add_gate(Gate::And, &["a", "b", "and2"])?
        .add_gate(Gate::Or, &["and1", "and2", "cOut"])?;
    Ok(set)
}

/// 1 + 1 + 0 with every intermediate filled in.
pub fn sanity_assignment() -> Assignment {
    Assignment::from_iter([
        ("a", 1),
        ("b", 1),
        ("cIn", 0),
        ("xor1", 0),
        ("and1", 0),
        ("and2", 1),
        ("s", 0),
        ("cOut", 1),
    ])
}

/// Inputs and outputs of a solution as `a + b + cIn = cOut s`.
pub fn format_sum(assignment: &Assignment) -> IrResult<String> {
    let bit = |name: &str| assignment.require(name).map(u8::from);
    Ok(format!(
        "{} + {} + {} = {}{}",
        bit("a")?,
        bit("b")?,
        bit("cIn")?,
        bit("cOut")?,
        bit("s")?
    ))
}
