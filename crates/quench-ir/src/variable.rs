//! Binary variables and the name interner shared by models and constraints.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense index of a variable within one [`VariableTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(pub u32);

impl VarId {
    /// Position of this variable in index-ordered storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for VarId {
    fn from(index: usize) -> Self {
        VarId(u32::try_from(index).expect("VarId overflow: exceeds u32::MAX"))
    }
}

/// A named binary unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    /// The interned identifier.
    pub id: VarId,
    /// The user-facing name.
    pub name: String,
    /// Whether the variable is an ancilla introduced by an encoding.
    pub auxiliary: bool,
}

/// Interns variable names into dense [`VarId`]s.
///
/// Ids are handed out in insertion order and never reused, so index-ordered
/// vectors (sample bits, linear biases) line up with [`VariableTable::iter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableTable {
    names: Vec<String>,
    auxiliary: Vec<bool>,
    #[serde(skip)]
    lookup: FxHashMap<String, VarId>,
}

impl PartialEq for VariableTable {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && self.auxiliary == other.auxiliary
    }
}

impl VariableTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, interning it if it is new.
    pub fn intern(&mut self, name: &str) -> VarId {
        self.intern_with(name, false)
    }

    /// Intern an ancilla variable.
    ///
    /// Interning a name that already exists returns the existing id and
    /// leaves its flag untouched.
    pub fn intern_auxiliary(&mut self, name: &str) -> VarId {
        self.intern_with(name, true)
    }

    fn intern_with(&mut self, name: &str, auxiliary: bool) -> VarId {
        if let Some(id) = self.get(name) {
            return id;
        }
        let id = VarId::from(self.names.len());
        self.names.push(name.to_string());
        self.auxiliary.push(auxiliary);
        self.lookup.insert(name.to_string(), id);
        id
    }

    /// Look up a name without interning it.
    pub fn get(&self, name: &str) -> Option<VarId> {
        if self.lookup.len() == self.names.len() {
            return self.lookup.get(name).copied();
        }
        // Deserialized tables have no lookup map yet.
        self.names.iter().position(|n| n == name).map(VarId::from)
    }

    /// Name of a variable.
    pub fn name(&self, id: VarId) -> &str {
        &self.names[id.index()]
    }

    /// Whether a variable is an ancilla.
    pub fn is_auxiliary(&self, id: VarId) -> bool {
        self.auxiliary[id.index()]
    }

    /// Number of interned variables.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over variables in id order.
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        self.names
            .iter()
            .zip(&self.auxiliary)
            .enumerate()
            .map(|(i, (name, &auxiliary))| Variable {
                id: VarId::from(i),
                name: name.clone(),
                auxiliary,
            })
    }
}
