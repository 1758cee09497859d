//! 2 by 2 multiplier used to factor small numbers.

use quench_ir::{Assignment, ConstraintSet, Gate, IrError, IrResult};

/// Largest product that fits the four output bits.
pub const MAX_PRODUCT: u32 = 15;

/// `C = A * B` for two-bit `A = a1a0` and `B = b1b0`, with `C` pinned to
/// `product`.
///
/// Solutions are the factorizations of `product` into two-bit factors.
pub fn multiplier(product: u32) -> IrResult<ConstraintSet> {
    if product > MAX_PRODUCT {
        return Err(IrError::InvalidModel(format!(
            "product {product} does not fit in four bits (max {MAX_PRODUCT})"
        )));
    }
    let mut set = ConstraintSet::new();
    set.add_gate(Gate::And, &["a0", "b1", "and1"])?
        .add_gate(Gate::And, &["a0", "b0", "c0"])?
        .add_gate(Gate::And, &["a1", "b0", "and3"])?
        .add_gate(Gate::And, &["a1", "b1", "and4"])?
        .add_gate(Gate::Xor, &["and1", "and3", "c1"])?
        .add_gate(Gate::And, &["and1", "and3", "and5"])?
        .add_gate(Gate::Xor, &["and5", "and4", "c2"])?
        .add_gate(Gate::And, &["and5", "and4", "c3"])?;
    for bit in 0..4 {
        set.fix_variable(&format!("c{bit}"), (product >> bit) & 1 == 1);
    }
    Ok(set)
}

/// A solution as `(a1a0 * b1b0) = c3c2c1c0`.
pub fn format_product(assignment: &Assignment) -> IrResult<String> {
    Ok(format!(
        "({} * {}) = {}",
        assignment.bitstring(&["a1", "a0"])?,
        assignment.bitstring(&["b1", "b0"])?,
        assignment.bitstring(&["c3", "c2", "c1", "c0"])?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_large_product() {
        assert!(matches!(multiplier(16), Err(IrError::InvalidModel(_))));
        assert!(multiplier(15).is_ok());
    }

    #[test]
    fn test_format_product() {
        let three_by_three = Assignment::from_iter([
            ("a0", 1),
            ("a1", 1),
            ("b0", 1),
            ("b1", 1),
            ("c0", 1),
            ("c1", 0),
            ("c2", 0),
            ("c3", 1),
        ]);
        assert_eq!(format_product(&three_by_three).unwrap(), "(11 * 11) = 1001");
    }

    #[test]
    fn test_product_bits_are_pinned() {
        let set = multiplier(6).unwrap();
        let fixed = set
            .constraints()
            .iter()
            .filter(|c| c.kind().label() == "fixed")
            .count();
        assert_eq!(fixed, 4);
        assert_eq!(set.len(), 12);
    }
}
