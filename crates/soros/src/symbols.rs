use core::fmt;

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::Value;

/// Variable storage for one run of a program.
///
/// Names are only ever inserted by assignment; reading a name that was never
/// assigned is an error for the caller to report, never an implicit zero.
/// Iteration is ordered by name so dumps are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    values: BTreeMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    /// Creates or overwrites `name`.
    pub fn assign(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(String::from(name), value);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// One `name :   value` line per variable.
impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name} :   {value}")?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, Value)> for SymbolTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, Value)>>(iter: T) -> Self {
        let mut table = SymbolTable::new();
        for (name, value) in iter {
            table.assign(name, value);
        }
        table
    }
}
