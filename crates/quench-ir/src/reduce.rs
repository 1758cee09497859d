//! Reduction of a [`ConstraintSet`] to an [`EnergyModel`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constraint::{Constraint, ConstraintKind, ConstraintSet};
use crate::error::{IrError, IrResult};
use crate::gate::{self, DEFAULT_FIX_STRENGTH, Gate};
use crate::model::EnergyModel;

/// Knobs for [`ConstraintSet::to_energy_model`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// Bias magnitude pinning fixed variables.
    pub fix_strength: f64,
    /// Factor applied to every constraint penalty.
    pub penalty_scale: f64,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            fix_strength: DEFAULT_FIX_STRENGTH,
            penalty_scale: 1.0,
        }
    }
}

impl ReductionConfig {
    /// Set the fix strength.
    pub fn with_fix_strength(mut self, strength: f64) -> Self {
        self.fix_strength = strength;
        self
    }

    /// Set the penalty scale.
    pub fn with_penalty_scale(mut self, scale: f64) -> Self {
        self.penalty_scale = scale;
        self
    }
}

impl ConstraintSet {
    /// Sum the penalties of every constraint into one model.
    ///
    /// Declared variables come first, in declared order, so sample bits line
    /// up with [`ConstraintSet::variable_names`]; ancillas follow.
    pub fn to_energy_model(&self, config: &ReductionConfig) -> IrResult<EnergyModel> {
        if !(config.penalty_scale > 0.0) || !config.penalty_scale.is_finite() {
            return Err(IrError::InvalidModel(format!(
                "penalty scale must be positive, got {}",
                config.penalty_scale
            )));
        }

        let mut model = EnergyModel::new();
        for name in self.variable_names() {
            model.add_variable(name);
        }
        for constraint in self.constraints() {
            let mut penalty = reduce_one(constraint, config)?;
            penalty.scale(config.penalty_scale);
            model.merge(&penalty);
        }
        debug!(
            constraints = self.len(),
            variables = model.num_variables(),
            interactions = model.num_interactions(),
            "Reduced constraint set"
        );
        Ok(model)
    }
}

fn reduce_one(constraint: &Constraint, config: &ReductionConfig) -> IrResult<EnergyModel> {
    let vars = constraint.variables();
    let mut model = EnergyModel::new();
    match constraint.kind() {
        ConstraintKind::Gate(g) => g.encode(&mut model, vars)?,
        ConstraintKind::Fixed(value) => {
            gate::fix_variable(&mut model, &vars[0], *value, config.fix_strength)?;
        }
        ConstraintKind::NotBoth => model.add_coupling(&vars[0], &vars[1], 1.0)?,
        ConstraintKind::ExactlyOne => {
            // (1 - Σx)²
            model.add_offset(1.0)?;
            for (i, a) in vars.iter().enumerate() {
                model.add_bias(a, -1.0)?;
                for b in &vars[i + 1..] {
                    model.add_coupling(a, b, 2.0)?;
                }
            }
        }
        ConstraintKind::AnyOf => {
            let last = or_chain(&mut model, vars)?;
            gate::fix_variable(&mut model, &last, true, config.fix_strength)?;
        }
        ConstraintKind::Custom(_) => {
            return Err(IrError::NotReducible(constraint.name().to_string()));
        }
    }
    Ok(model)
}

/// Fold `vars` through OR gates on auxiliary wires and return the name of
/// the wire carrying the disjunction.
fn or_chain(model: &mut EnergyModel, vars: &[String]) -> IrResult<String> {
    let mut acc = vars[0].clone();
    model.add_variable(&acc);
    let label = vars.join(",");
    for (k, next) in vars[1..].iter().enumerate() {
        let out = format!("any({label})#{k}");
        model.add_auxiliary(&out);
        Gate::Or.encode(model, &[acc.as_str(), next.as_str(), out.as_str()])?;
        acc = out;
    }
    Ok(acc)
}
