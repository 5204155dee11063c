use std::collections::HashMap;
use std::f64::consts::{E, PI};

/// Named constants recognised by the lexer and substituted before evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantTable {
    constants: HashMap<String, f64>,
}

impl ConstantTable {
    /// An empty table. Most callers want [`ConstantTable::default`].
    pub fn empty() -> Self {
        Self {
            constants: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.constants.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    /// The decimal lexeme a constant is rewritten to, e.g. `3.141592653589793` for `pi`.
    pub fn lexeme(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.to_string())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constants.keys().map(String::as_str)
    }
}

impl Default for ConstantTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("pi", PI);
        table.insert("e", E);
        table.insert("deg2rad", PI / 180.0);
        table.insert("rad2deg", 180.0 / PI);
        table
    }
}
