//! Named relations over variables, used both to build energy models and to
//! validate the samples that come back.

use std::fmt;
use std::sync::Arc;

use crate::assignment::Assignment;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::variable::VariableTable;

/// Predicate of a [`ConstraintKind::Custom`] constraint, called with the
/// constraint's variable values in declared order.
pub type Predicate = Arc<dyn Fn(&[bool]) -> bool + Send + Sync>;

/// The relation a [`Constraint`] enforces.
#[derive(Clone)]
pub enum ConstraintKind {
    /// Wire values must be a row of the gate's truth table.
    Gate(Gate),
    /// The single variable must equal the value.
    Fixed(bool),
    /// At least one variable must be 1.
    AnyOf,
    /// The two variables must not both be 1.
    NotBoth,
    /// Exactly one variable must be 1.
    ExactlyOne,
    /// Arbitrary predicate. Validation only; has no energy encoding.
    Custom(Predicate),
}

impl ConstraintKind {
    /// Short label used as the default constraint name.
    pub fn label(&self) -> &'static str {
        match self {
            ConstraintKind::Gate(gate) => gate.name(),
            ConstraintKind::Fixed(_) => "fixed",
            ConstraintKind::AnyOf => "any_of",
            ConstraintKind::NotBoth => "not_both",
            ConstraintKind::ExactlyOne => "exactly_one",
            ConstraintKind::Custom(_) => "custom",
        }
    }

    fn check_arity(&self, name: &str, got: usize) -> IrResult<()> {
        let expected = match self {
            ConstraintKind::Gate(gate) => Some(gate.arity()),
            ConstraintKind::Fixed(_) => Some(1),
            ConstraintKind::NotBoth => Some(2),
            _ => None,
        };
        match expected {
            Some(expected) if expected != got => Err(IrError::ArityMismatch {
                constraint: name.to_string(),
                expected,
                got,
            }),
            None if got == 0 => Err(IrError::ArityMismatch {
                constraint: name.to_string(),
                expected: 1,
                got,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Gate(gate) => f.debug_tuple("Gate").field(gate).finish(),
            ConstraintKind::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            ConstraintKind::AnyOf => write!(f, "AnyOf"),
            ConstraintKind::NotBoth => write!(f, "NotBoth"),
            ConstraintKind::ExactlyOne => write!(f, "ExactlyOne"),
            ConstraintKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A named relation over an ordered list of variables.
#[derive(Debug, Clone)]
pub struct Constraint {
    name: String,
    variables: Vec<String>,
    kind: ConstraintKind,
}

impl Constraint {
    /// Create a constraint named after its kind.
    pub fn new<S: AsRef<str>>(kind: ConstraintKind, variables: &[S]) -> IrResult<Self> {
        let name = kind.label().to_string();
        Self::named(name, kind, variables)
    }

    /// Create a constraint with an explicit name.
    pub fn named<S: AsRef<str>>(
        name: impl Into<String>,
        kind: ConstraintKind,
        variables: &[S],
    ) -> IrResult<Self> {
        let name = name.into();
        kind.check_arity(&name, variables.len())?;
        Ok(Self {
            name,
            variables: variables.iter().map(|v| v.as_ref().to_string()).collect(),
            kind,
        })
    }

    /// Constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variables in declared order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The enforced relation.
    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Whether the relation holds for the given values (declared order).
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        match &self.kind {
            ConstraintKind::Gate(gate) => gate.is_valid(values),
            ConstraintKind::Fixed(expected) => values == [*expected],
            ConstraintKind::AnyOf => values.iter().any(|&v| v),
            ConstraintKind::NotBoth => !values.iter().all(|&v| v),
            ConstraintKind::ExactlyOne => values.iter().filter(|&&v| v).count() == 1,
            ConstraintKind::Custom(predicate) => predicate(values),
        }
    }

    /// Evaluate against an assignment that must cover every variable.
    pub fn check(&self, assignment: &Assignment) -> IrResult<bool> {
        let values = self
            .variables
            .iter()
            .map(|v| assignment.require(v))
            .collect::<IrResult<Vec<_>>>()?;
        Ok(self.is_satisfied(&values))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.variables.join(", "))
    }
}

/// An ordered collection of constraints sharing one variable namespace.
///
/// Variables are declared in order of first appearance across the added
/// constraints; that order defines report keys and bitstrings.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
    variables: VariableTable,
}

impl ConstraintSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint.
    pub fn add(&mut self, constraint: Constraint) -> &mut Self {
        for name in &constraint.variables {
            self.variables.intern(name);
        }
        self.constraints.push(constraint);
        self
    }

    /// Append a gate over the given wires (inputs then outputs).
    pub fn add_gate<S: AsRef<str>>(&mut self, gate: Gate, wires: &[S]) -> IrResult<&mut Self> {
        let constraint = Constraint::new(ConstraintKind::Gate(gate), wires)?;
        Ok(self.add(constraint))
    }

    /// Pin a variable to a constant.
    pub fn fix_variable(&mut self, name: &str, value: bool) -> &mut Self {
        self.add(Constraint {
            name: ConstraintKind::Fixed(value).label().to_string(),
            variables: vec![name.to_string()],
            kind: ConstraintKind::Fixed(value),
        })
    }

    /// Require at least one of `names` to be 1.
    pub fn any_of<S: AsRef<str>>(&mut self, names: &[S]) -> IrResult<&mut Self> {
        let constraint = Constraint::new(ConstraintKind::AnyOf, names)?;
        Ok(self.add(constraint))
    }

    /// Forbid `a` and `b` from both being 1.
    pub fn not_both(&mut self, a: &str, b: &str) -> IrResult<&mut Self> {
        let constraint = Constraint::new(ConstraintKind::NotBoth, &[a, b])?;
        Ok(self.add(constraint))
    }

    /// Require exactly one of `names` to be 1.
    pub fn exactly_one<S: AsRef<str>>(&mut self, names: &[S]) -> IrResult<&mut Self> {
        let constraint = Constraint::new(ConstraintKind::ExactlyOne, names)?;
        Ok(self.add(constraint))
    }

    /// Attach an arbitrary validation predicate.
    pub fn custom<S, F>(&mut self, name: &str, names: &[S], predicate: F) -> IrResult<&mut Self>
    where
        S: AsRef<str>,
        F: Fn(&[bool]) -> bool + Send + Sync + 'static,
    {
        let constraint = Constraint::named(name, ConstraintKind::Custom(Arc::new(predicate)), names)?;
        Ok(self.add(constraint))
    }

    /// Constraints in insertion order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Declared variables in order of first appearance.
    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Declared variable names in order of first appearance.
    pub fn variable_names(&self) -> &[String] {
        self.variables.names()
    }

    /// Number of constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether the set holds no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Whether every constraint holds.
    ///
    /// Fails with [`IrError::MalformedAssignment`] when the assignment leaves
    /// a declared variable unset. Extra variables (such as ancillas) are
    /// ignored.
    pub fn check(&self, assignment: &Assignment) -> IrResult<bool> {
        for name in self.variables.names() {
            assignment.require(name)?;
        }
        for constraint in &self.constraints {
            if !constraint.check(assignment)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Constraints the assignment breaks.
    pub fn violated(&self, assignment: &Assignment) -> IrResult<Vec<&Constraint>> {
        let mut broken = Vec::new();
        for constraint in &self.constraints {
            if !constraint.check(assignment)? {
                broken.push(constraint);
            }
        }
        Ok(broken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(bits: [u8; 4]) -> Assignment {
        ["x1", "x2", "x3", "x4"].into_iter().zip(bits).collect()
    }

    fn queens_row() -> ConstraintSet {
        let vars = ["x1", "x2", "x3", "x4"];
        let mut set = ConstraintSet::new();
        set.any_of(&vars).unwrap();
        for i in 0..vars.len() {
            for j in (i + 1)..vars.len() {
                set.not_both(vars[i], vars[j]).unwrap();
            }
        }
        set
    }

    #[test]
    fn test_queens_row_accepts_one_hot_only() {
        let set = queens_row();
        assert_eq!(set.len(), 7);
        let mut accepted = Vec::new();
        for r in 0..16_u8 {
            let bits = [r & 1, (r >> 1) & 1, (r >> 2) & 1, (r >> 3) & 1];
            if set.check(&row(bits)).unwrap() {
                accepted.push(bits);
            }
        }
        assert_eq!(
            accepted,
            vec![[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]
        );
    }

    #[test]
    fn test_declared_order_is_first_appearance() {
        let mut set = ConstraintSet::new();
        set.add_gate(Gate::And, &["x1", "x2", "w"]).unwrap();
        set.add_gate(Gate::Not, &["w", "z"]).unwrap();
        assert_eq!(set.variable_names(), ["x1", "x2", "w", "z"]);
    }

    #[test]
    fn test_check_requires_declared_variables() {
        let set = queens_row();
        let partial = Assignment::new().with("x1", 1).with("x2", 0);
        assert!(matches!(
            set.check(&partial),
            Err(IrError::MalformedAssignment { .. })
        ));
    }

    #[test]
    fn test_extra_variables_ignored() {
        let mut set = ConstraintSet::new();
        set.add_gate(Gate::Xor, &["a", "b", "s"]).unwrap();
        let a = Assignment::new()
            .with("a", 1)
            .with("b", 0)
            .with("s", 1)
            .with("xor(a,b,s)#0", 1);
        assert!(set.check(&a).unwrap());
    }

    #[test]
    fn test_arity_checked() {
        let mut set = ConstraintSet::new();
        assert!(matches!(
            set.add_gate(Gate::FullAdder, &["a", "b"]),
            Err(IrError::ArityMismatch {
                expected: 5,
                got: 2,
                ..
            })
        ));
        let empty: [&str; 0] = [];
        assert!(set.any_of(&empty).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_violated_lists_broken_constraints() {
        let set = queens_row();
        let broken = set.violated(&row([1, 1, 0, 1])).unwrap();
        let names: Vec<String> = broken.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec!["not_both(x1, x2)", "not_both(x1, x4)", "not_both(x2, x4)"]
        );
    }

    #[test]
    fn test_custom_and_fixed() {
        let mut set = ConstraintSet::new();
        set.custom("even", &["p", "q"], |v| v.iter().filter(|&&b| b).count() % 2 == 0)
            .unwrap();
        set.fix_variable("p", true);
        assert!(set.check(&Assignment::new().with("p", 1).with("q", 1)).unwrap());
        assert!(!set.check(&Assignment::new().with("p", 0).with("q", 0)).unwrap());
        assert!(!set.check(&Assignment::new().with("p", 1).with("q", 0)).unwrap());
    }

    #[test]
    fn test_exactly_one() {
        let mut set = ConstraintSet::new();
        set.exactly_one(&["a", "b", "c"]).unwrap();
        let assign = |a, b, c| Assignment::new().with("a", a).with("b", b).with("c", c);
        assert!(set.check(&assign(0, 1, 0)).unwrap());
        assert!(!set.check(&assign(0, 0, 0)).unwrap());
        assert!(!set.check(&assign(1, 1, 0)).unwrap());
    }
}
