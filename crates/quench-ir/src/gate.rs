//! Boolean gates expressed as quadratic penalties.
//!
//! Each [`Gate`] carries a fixed penalty over local variable slots. Encoding
//! a gate onto named wires adds that penalty into an [`EnergyModel`]; wires
//! shared between gates resolve to the same interned variable, so composing
//! a circuit is just encoding its gates into one model.
//!
//! | Gate | Wires | Valid energy | Ancillas |
//! |------|-------|--------------|----------|
//! | `Not` | in, out | -1 | 0 |
//! | `And` | in0, in1, out | 0 | 0 |
//! | `Or` | in0, in1, out | 0 | 0 |
//! | `Xor` | in0, in1, out | 0 | 1 |
//! | `Nand` | in0, in1, out | 0 | 0 |
//! | `HalfAdder` | in0, in1, sum, carry | 0 | 0 |
//! | `FullAdder` | a, b, carry_in, sum, carry_out | 0 | 0 |
//!
//! Every row that violates the truth table sits at least 1 above the valid
//! energy once ancillas are minimised out.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::model::EnergyModel;
use crate::variable::VarId;

/// Default strength of the single bias that pins a fixed variable.
pub const DEFAULT_FIX_STRENGTH: f64 = 2.0;

/// A boolean gate from the encoder catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// `out = !in`
    Not,
    /// `out = in0 & in1`
    And,
    /// `out = in0 | in1`
    Or,
    /// `out = in0 ^ in1`
    Xor,
    /// `out = !(in0 & in1)`
    Nand,
    /// `(sum, carry) = in0 + in1`
    HalfAdder,
    /// `(sum, carry_out) = a + b + carry_in`
    FullAdder,
}

impl Gate {
    /// Every gate in the catalog.
    pub const ALL: [Gate; 7] = [
        Gate::Not,
        Gate::And,
        Gate::Or,
        Gate::Xor,
        Gate::Nand,
        Gate::HalfAdder,
        Gate::FullAdder,
    ];

    /// Lowercase gate name.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Not => "not",
            Gate::And => "and",
            Gate::Or => "or",
            Gate::Xor => "xor",
            Gate::Nand => "nand",
            Gate::HalfAdder => "half_adder",
            Gate::FullAdder => "full_adder",
        }
    }

    /// Number of wires (inputs plus outputs).
    pub fn arity(&self) -> usize {
        match self {
            Gate::Not => 2,
            Gate::And | Gate::Or | Gate::Xor | Gate::Nand => 3,
            Gate::HalfAdder => 4,
            Gate::FullAdder => 5,
        }
    }

    /// Number of input wires; the remaining wires are outputs.
    pub fn num_inputs(&self) -> usize {
        match self {
            Gate::Not => 1,
            Gate::FullAdder => 3,
            _ => 2,
        }
    }

    /// Number of ancilla variables the encoding introduces.
    pub fn num_ancillas(&self) -> usize {
        match self {
            Gate::Xor => 1,
            _ => 0,
        }
    }

    /// Energy shared by every valid row.
    pub fn ground_energy(&self) -> f64 {
        match self {
            Gate::Not => -1.0,
            _ => 0.0,
        }
    }

    /// Compute the outputs for the given inputs.
    pub fn evaluate(&self, inputs: &[bool]) -> Vec<bool> {
        match (self, inputs) {
            (Gate::Not, [a]) => vec![!a],
            (Gate::And, [a, b]) => vec![a & b],
            (Gate::Or, [a, b]) => vec![a | b],
            (Gate::Xor, [a, b]) => vec![a ^ b],
            (Gate::Nand, [a, b]) => vec![!(a & b)],
            (Gate::HalfAdder, [a, b]) => vec![a ^ b, a & b],
            (Gate::FullAdder, [a, b, c]) => {
                let total = u8::from(*a) + u8::from(*b) + u8::from(*c);
                vec![total & 1 == 1, total >= 2]
            }
            _ => panic!(
                "{} takes {} inputs, got {}",
                self.name(),
                self.num_inputs(),
                inputs.len()
            ),
        }
    }

    /// Whether a full row of wire values (inputs then outputs) is on the
    /// truth table.
    pub fn is_valid(&self, wires: &[bool]) -> bool {
        if wires.len() != self.arity() {
            return false;
        }
        let (inputs, outputs) = wires.split_at(self.num_inputs());
        self.evaluate(inputs) == outputs
    }

    /// The penalty over local slots `0..arity + num_ancillas`.
    pub fn penalty(&self) -> Penalty {
        match self {
            Gate::Not => Penalty {
                linear: vec![(0, -1.0), (1, -1.0)],
                quadratic: vec![(0, 1, 2.0)],
                offset: 0.0,
            },
            Gate::And => Penalty {
                linear: vec![(2, 3.0)],
                quadratic: vec![(0, 1, 1.0), (0, 2, -2.0), (1, 2, -2.0)],
                offset: 0.0,
            },
            Gate::Or => Penalty {
                linear: vec![(0, 1.0), (1, 1.0), (2, 1.0)],
                quadratic: vec![(0, 1, 1.0), (0, 2, -2.0), (1, 2, -2.0)],
                offset: 0.0,
            },
            // AND with the output complemented.
            Gate::Nand => Penalty {
                linear: vec![(0, -2.0), (1, -2.0), (2, -3.0)],
                quadratic: vec![(0, 1, 1.0), (0, 2, 2.0), (1, 2, 2.0)],
                offset: 3.0,
            },
            // in0 + in1 = out + 2·carry, carry in slot 3.
            Gate::Xor | Gate::HalfAdder => Penalty::squared_residual(&[1.0, 1.0, -1.0, -2.0]),
            Gate::FullAdder => Penalty::squared_residual(&[1.0, 1.0, 1.0, -1.0, -2.0]),
        }
    }

    /// Add this gate's penalty to `model` over the named wires.
    ///
    /// Ancillas get deterministic names derived from the gate and its wires,
    /// so encoding the same gate twice on the same wires reuses them.
    pub fn encode<S: AsRef<str>>(&self, model: &mut EnergyModel, wires: &[S]) -> IrResult<()> {
        if wires.len() != self.arity() {
            return Err(IrError::ArityMismatch {
                constraint: self.name().to_string(),
                expected: self.arity(),
                got: wires.len(),
            });
        }
        let names: Vec<&str> = wires.iter().map(AsRef::as_ref).collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(IrError::InvalidModel(format!(
                    "{} gate wires must be distinct, '{name}' appears twice",
                    self.name()
                )));
            }
        }

        let mut slots: Vec<VarId> = names.iter().map(|n| model.add_variable(n)).collect();
        for k in 0..self.num_ancillas() {
            let label = format!("{}({})#{k}", self.name(), names.join(","));
            slots.push(model.add_auxiliary(&label));
        }
        self.penalty().apply(model, &slots)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name().to_uppercase())
    }
}

/// Pin `name` to `value` with a single dominant bias.
///
/// Value 1 gets bias `-strength` and offset `+strength`, value 0 gets bias
/// `+strength`, so the pinned value sits at energy 0 and the other at
/// `strength`.
pub fn fix_variable(model: &mut EnergyModel, name: &str, value: bool, strength: f64) -> IrResult<()> {
    if !(strength > 0.0) {
        return Err(IrError::InvalidModel(format!(
            "fix strength must be positive, got {strength}"
        )));
    }
    if value {
        model.add_bias(name, -strength)?;
        model.add_offset(strength)?;
    } else {
        model.add_bias(name, strength)?;
    }
    Ok(())
}

/// Quadratic penalty over local variable slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Penalty {
    /// `(slot, bias)` terms.
    pub linear: Vec<(usize, f64)>,
    /// `(slot, slot, coupling)` terms.
    pub quadratic: Vec<(usize, usize, f64)>,
    /// Constant term.
    pub offset: f64,
}

impl Penalty {
    /// Expand `(Σ w_i·x_i)²` for binary `x`: bias `w_i²`, coupling `2·w_i·w_j`.
    pub fn squared_residual(weights: &[f64]) -> Self {
        let linear = weights.iter().enumerate().map(|(i, w)| (i, w * w)).collect();
        let mut quadratic = Vec::new();
        for i in 0..weights.len() {
            for j in (i + 1)..weights.len() {
                quadratic.push((i, j, 2.0 * weights[i] * weights[j]));
            }
        }
        Self {
            linear,
            quadratic,
            offset: 0.0,
        }
    }

    /// Number of slots referenced.
    pub fn num_slots(&self) -> usize {
        let linear = self.linear.iter().map(|&(i, _)| i + 1);
        let quadratic = self.quadratic.iter().map(|&(i, j, _)| i.max(j) + 1);
        linear.chain(quadratic).max().unwrap_or(0)
    }

    /// Energy of a slot valuation.
    pub fn energy(&self, slots: &[bool]) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .filter(|&&(i, _)| slots[i])
            .map(|&(_, c)| c)
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|&&(i, j, _)| slots[i] && slots[j])
            .map(|&(_, _, c)| c)
            .sum();
        self.offset + linear + quadratic
    }

    fn apply(&self, model: &mut EnergyModel, slots: &[VarId]) -> IrResult<()> {
        for &(i, bias) in &self.linear {
            model.add_bias_by_id(slots[i], bias)?;
        }
        for &(i, j, coupling) in &self.quadratic {
            model.add_coupling_by_id(slots[i], slots[j], coupling)?;
        }
        model.add_offset(self.offset)
    }
}
