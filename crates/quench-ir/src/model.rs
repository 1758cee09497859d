//! Sparse quadratic energy models over binary variables.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::assignment::Assignment;
use crate::error::{IrError, IrResult};
use crate::variable::{VarId, VariableTable};

/// A quadratic unconstrained binary optimization model.
///
/// Energy of a valuation `x`:
///
/// ```text
/// E(x) = offset + Σ bias(i)·x_i + Σ_{i<j} coupling(i,j)·x_i·x_j
/// ```
///
/// Every mutating method accumulates into the existing coefficient; nothing
/// is ever overwritten. Couplings are stored once per unordered pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnergyModel {
    variables: VariableTable,
    linear: Vec<f64>,
    #[serde(with = "quadratic_serde")]
    quadratic: FxHashMap<(VarId, VarId), f64>,
    offset: f64,
}

impl EnergyModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from a raw QUBO dictionary.
    ///
    /// A diagonal key `(v, v)` contributes a bias, any other key a coupling.
    /// Off-diagonal entries of zero still declare both variables.
    pub fn from_qubo<'a, I>(entries: I) -> IrResult<Self>
    where
        I: IntoIterator<Item = ((&'a str, &'a str), f64)>,
    {
        let mut model = Self::new();
        for ((a, b), coefficient) in entries {
            if a == b {
                model.add_bias(a, coefficient)?;
            } else {
                model.add_coupling(a, b, coefficient)?;
            }
        }
        Ok(model)
    }

    /// Declare a variable without changing any coefficient.
    pub fn add_variable(&mut self, name: &str) -> VarId {
        let id = self.variables.intern(name);
        self.grow(id);
        id
    }

    /// Declare an ancilla variable.
    pub fn add_auxiliary(&mut self, name: &str) -> VarId {
        let id = self.variables.intern_auxiliary(name);
        self.grow(id);
        id
    }

    fn grow(&mut self, id: VarId) {
        if self.linear.len() <= id.index() {
            self.linear.resize(id.index() + 1, 0.0);
        }
    }

    /// Add `coefficient` to the bias of `name`.
    pub fn add_bias(&mut self, name: &str, coefficient: f64) -> IrResult<VarId> {
        let id = self.add_variable(name);
        self.add_bias_by_id(id, coefficient)?;
        Ok(id)
    }

    /// Add `coefficient` to the coupling between `a` and `b`.
    ///
    /// Coupling a variable to itself is a usage error; use
    /// [`EnergyModel::add_bias`] instead.
    pub fn add_coupling(&mut self, a: &str, b: &str, coefficient: f64) -> IrResult<()> {
        if a == b {
            return Err(IrError::InvalidModel(format!(
                "cannot couple variable '{a}' to itself; use a bias instead"
            )));
        }
        let ia = self.add_variable(a);
        let ib = self.add_variable(b);
        self.add_coupling_by_id(ia, ib, coefficient)
    }

    /// Add to the constant energy offset.
    pub fn add_offset(&mut self, value: f64) -> IrResult<()> {
        check_finite(value, "offset")?;
        self.offset += value;
        Ok(())
    }

    pub(crate) fn add_bias_by_id(&mut self, id: VarId, coefficient: f64) -> IrResult<()> {
        check_finite(coefficient, self.variables.name(id))?;
        self.linear[id.index()] += coefficient;
        Ok(())
    }

    pub(crate) fn add_coupling_by_id(&mut self, a: VarId, b: VarId, coefficient: f64) -> IrResult<()> {
        if a == b {
            return Err(IrError::InvalidModel(format!(
                "cannot couple variable '{}' to itself; use a bias instead",
                self.variables.name(a)
            )));
        }
        check_finite(coefficient, self.variables.name(a))?;
        *self.quadratic.entry(ordered(a, b)).or_insert(0.0) += coefficient;
        Ok(())
    }

    /// Add every term of `other` into this model, matching variables by name.
    pub fn merge(&mut self, other: &EnergyModel) {
        let mut remap = Vec::with_capacity(other.variables.len());
        for var in other.variables.iter() {
            let id = if var.auxiliary {
                self.add_auxiliary(&var.name)
            } else {
                self.add_variable(&var.name)
            };
            remap.push(id);
        }
        for (i, &bias) in other.linear.iter().enumerate() {
            self.linear[remap[i].index()] += bias;
        }
        for (&(a, b), &coupling) in &other.quadratic {
            let key = ordered(remap[a.index()], remap[b.index()]);
            *self.quadratic.entry(key).or_insert(0.0) += coupling;
        }
        self.offset += other.offset;
        trace!(
            variables = self.num_variables(),
            interactions = self.num_interactions(),
            "merged energy model"
        );
    }

    /// Return a copy with every coefficient (and the offset) multiplied.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.clone();
        out.scale(factor);
        out
    }

    /// Multiply every coefficient (and the offset) in place.
    pub fn scale(&mut self, factor: f64) {
        for bias in &mut self.linear {
            *bias *= factor;
        }
        for coupling in self.quadratic.values_mut() {
            *coupling *= factor;
        }
        self.offset *= factor;
    }

    /// The variable table.
    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Number of declared variables (including ancillas).
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of stored couplings.
    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Constant energy offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Bias of a variable; 0 for unknown names.
    pub fn bias(&self, name: &str) -> f64 {
        self.variables
            .get(name)
            .map_or(0.0, |id| self.linear[id.index()])
    }

    /// Coupling between two variables; 0 for absent pairs.
    pub fn coupling(&self, a: &str, b: &str) -> f64 {
        match (self.variables.get(a), self.variables.get(b)) {
            (Some(ia), Some(ib)) if ia != ib => {
                self.quadratic.get(&ordered(ia, ib)).copied().unwrap_or(0.0)
            }
            _ => 0.0,
        }
    }

    /// Iterate over `(id, bias)` in id order.
    pub fn linear_terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.linear
            .iter()
            .enumerate()
            .map(|(i, &bias)| (VarId::from(i), bias))
    }

    /// Iterate over `((a, b), coupling)` with `a < b`, in no particular order.
    pub fn quadratic_terms(&self) -> impl Iterator<Item = ((VarId, VarId), f64)> + '_ {
        self.quadratic.iter().map(|(&k, &v)| (k, v))
    }

    /// Energy of a named assignment.
    ///
    /// The assignment must cover every model variable.
    pub fn energy(&self, assignment: &Assignment) -> IrResult<f64> {
        let bits = self
            .variables
            .names()
            .iter()
            .map(|name| assignment.require(name))
            .collect::<IrResult<Vec<bool>>>()?;
        Ok(self.energy_of_bits(&bits))
    }

    /// Energy of an index-ordered valuation.
    ///
    /// `bits[i]` is the value of `VarId(i)`; `bits.len()` must equal
    /// [`EnergyModel::num_variables`].
    pub fn energy_of_bits(&self, bits: &[bool]) -> f64 {
        debug_assert_eq!(bits.len(), self.linear.len());
        let mut energy = self.offset;
        for (bias, _) in self.linear.iter().zip(bits).filter(|(_, b)| **b) {
            energy += bias;
        }
        for (&(a, b), &coupling) in &self.quadratic {
            if bits[a.index()] && bits[b.index()] {
                energy += coupling;
            }
        }
        energy
    }

    /// Lower the model into dense arrays for samplers.
    pub fn compile(&self) -> CompiledModel {
        let n = self.num_variables();
        let mut neighbors: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for (&(a, b), &coupling) in &self.quadratic {
            if coupling == 0.0 {
                continue;
            }
            neighbors[a.index()].push((b.index(), coupling));
            neighbors[b.index()].push((a.index(), coupling));
        }
        for list in &mut neighbors {
            list.sort_by_key(|&(j, _)| j);
        }
        CompiledModel {
            linear: self.linear.clone(),
            neighbors,
            offset: self.offset,
        }
    }
}

impl PartialEq for EnergyModel {
    /// Models are equal when they assign the same coefficients to the same
    /// names, regardless of interning order. Zero entries are ignored.
    fn eq(&self, other: &Self) -> bool {
        if self.offset != other.offset || self.num_variables() != other.num_variables() {
            return false;
        }
        let linear_eq = self
            .variables
            .names()
            .iter()
            .all(|name| other.variables.get(name).is_some() && self.bias(name) == other.bias(name));
        let quadratic_eq = |lhs: &EnergyModel, rhs: &EnergyModel| {
            lhs.quadratic.iter().all(|(&(a, b), &c)| {
                rhs.coupling(lhs.variables.name(a), lhs.variables.name(b)) == c
            })
        };
        linear_eq && quadratic_eq(self, other) && quadratic_eq(other, self)
    }
}

/// Dense, index-based form of an [`EnergyModel`].
#[derive(Debug, Clone)]
pub struct CompiledModel {
    /// Bias per variable, indexed by `VarId`.
    pub linear: Vec<f64>,
    /// Sorted `(neighbor, coupling)` lists; each coupling appears in both lists.
    pub neighbors: Vec<Vec<(usize, f64)>>,
    /// Constant offset.
    pub offset: f64,
}

impl CompiledModel {
    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    /// Energy of an index-ordered valuation.
    pub fn energy(&self, bits: &[bool]) -> f64 {
        let mut energy = self.offset;
        for (i, &on) in bits.iter().enumerate() {
            if !on {
                continue;
            }
            energy += self.linear[i];
            for &(j, coupling) in &self.neighbors[i] {
                if j > i && bits[j] {
                    energy += coupling;
                }
            }
        }
        energy
    }

    /// Energy change caused by flipping variable `i`.
    pub fn flip_delta(&self, bits: &[bool], i: usize) -> f64 {
        let mut field = self.linear[i];
        for &(j, coupling) in &self.neighbors[i] {
            if bits[j] {
                field += coupling;
            }
        }
        if bits[i] { -field } else { field }
    }

    /// Largest and smallest non-zero single-flip energy scales.
    ///
    /// Returns `None` for models without any non-zero coefficient.
    pub fn delta_range(&self) -> Option<(f64, f64)> {
        let mut max_delta: f64 = 0.0;
        let mut min_delta = f64::INFINITY;
        for (i, &bias) in self.linear.iter().enumerate() {
            let coupling_mass: f64 = self.neighbors[i].iter().map(|(_, c)| c.abs()).sum();
            max_delta = max_delta.max(bias.abs() + coupling_mass);
            if bias != 0.0 {
                min_delta = min_delta.min(bias.abs());
            }
            for &(_, c) in &self.neighbors[i] {
                min_delta = min_delta.min(c.abs());
            }
        }
        (max_delta > 0.0).then_some((max_delta, min_delta))
    }
}

fn ordered(a: VarId, b: VarId) -> (VarId, VarId) {
    if a < b { (a, b) } else { (b, a) }
}

fn check_finite(value: f64, context: &str) -> IrResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(IrError::InvalidModel(format!(
            "non-finite coefficient {value} for '{context}'"
        )))
    }
}

/// JSON object keys must be strings, so couplings serialize as a list.
mod quadratic_serde {
    use rustc_hash::FxHashMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::variable::VarId;

    pub fn serialize<S: Serializer>(
        map: &FxHashMap<(VarId, VarId), f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = map.iter().map(|(&(a, b), &c)| (a, b, c)).collect();
        entries.sort_by_key(|&(a, b, _)| (a, b));
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<FxHashMap<(VarId, VarId), f64>, D::Error> {
        let entries: Vec<(VarId, VarId, f64)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().map(|(a, b, c)| ((a, b), c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_gate() -> EnergyModel {
        EnergyModel::from_qubo([
            (("q0", "q0"), -1.0),
            (("q0", "q4"), 0.0),
            (("q4", "q0"), 2.0),
            (("q4", "q4"), -1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_qubo_accumulates_symmetric_keys() {
        let model = not_gate();
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.bias("q0"), -1.0);
        assert_eq!(model.bias("q4"), -1.0);
        assert_eq!(model.coupling("q0", "q4"), 2.0);
        assert_eq!(model.coupling("q4", "q0"), 2.0);
    }

    #[test]
    fn test_not_gate_energies() {
        let model = not_gate();
        let e = |q0, q4| {
            model
                .energy(&Assignment::new().with("q0", q0).with("q4", q4))
                .unwrap()
        };
        assert_eq!(e(0, 1), -1.0);
        assert_eq!(e(1, 0), -1.0);
        assert_eq!(e(0, 0), 0.0);
        assert_eq!(e(1, 1), 0.0);
    }

    #[test]
    fn test_self_coupling_rejected() {
        let mut model = EnergyModel::new();
        let err = model.add_coupling("x", "x", 1.0).unwrap_err();
        assert!(matches!(err, IrError::InvalidModel(_)));
        assert_eq!(model.num_interactions(), 0);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut model = EnergyModel::new();
        assert!(model.add_bias("x", f64::NAN).is_err());
        assert!(model.add_coupling("x", "y", f64::INFINITY).is_err());
        assert!(model.add_offset(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_accumulates_never_overwrites() {
        let mut model = EnergyModel::new();
        model.add_bias("a", 1.5).unwrap();
        model.add_bias("a", -0.5).unwrap();
        model.add_coupling("a", "b", 1.0).unwrap();
        model.add_coupling("b", "a", 2.0).unwrap();
        assert_eq!(model.bias("a"), 1.0);
        assert_eq!(model.coupling("a", "b"), 3.0);
        assert_eq!(model.bias("missing"), 0.0);
    }

    #[test]
    fn test_energy_missing_variable() {
        let model = not_gate();
        let err = model.energy(&Assignment::new().with("q0", 1)).unwrap_err();
        assert_eq!(
            err,
            IrError::MalformedAssignment {
                variable: "q4".into()
            }
        );
    }

    #[test]
    fn test_merge_self_doubles() {
        let model = not_gate();
        let mut doubled = model.clone();
        doubled.merge(&model);
        assert_eq!(doubled, model.scaled(2.0));
    }

    #[test]
    fn test_merge_matches_by_name() {
        let mut left = EnergyModel::new();
        left.add_bias("a", 1.0).unwrap();
        let mut right = EnergyModel::new();
        right.add_bias("b", 2.0).unwrap();
        right.add_coupling("b", "a", -1.0).unwrap();
        left.merge(&right);
        assert_eq!(left.num_variables(), 2);
        assert_eq!(left.bias("b"), 2.0);
        assert_eq!(left.coupling("a", "b"), -1.0);
    }

    #[test]
    fn test_compiled_energy_matches() {
        let model = EnergyModel::from_qubo([
            (("x1", "x2"), 1.0),
            (("x1", "z"), -2.0),
            (("x2", "z"), -2.0),
            (("z", "z"), 3.0),
        ])
        .unwrap();
        let compiled = model.compile();
        for state in 0..8_u32 {
            let bits: Vec<bool> = (0..3).map(|i| (state >> i) & 1 == 1).collect();
            assert_eq!(compiled.energy(&bits), model.energy_of_bits(&bits));
            for i in 0..3 {
                let mut flipped = bits.clone();
                flipped[i] = !flipped[i];
                let delta = compiled.energy(&flipped) - compiled.energy(&bits);
                assert!((compiled.flip_delta(&bits, i) - delta).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_delta_range() {
        let compiled = not_gate().compile();
        let (max_delta, min_delta) = compiled.delta_range().unwrap();
        assert_eq!(max_delta, 3.0);
        assert_eq!(min_delta, 1.0);
        assert!(EnergyModel::new().compile().delta_range().is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let model = not_gate();
        let json = serde_json::to_string(&model).unwrap();
        let restored: EnergyModel = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, model);
    }
}
