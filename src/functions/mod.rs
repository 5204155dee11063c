pub mod elementary;
pub mod trig;

use crate::error::FunctionError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type UnaryFunction = Arc<dyn Fn(f64) -> Result<f64, FunctionError> + Send + Sync>;

/// Named unary functions available to expressions.
///
/// The lexer classifies identifiers against this table by exact name; lookups
/// during evaluation fall back to a case-insensitive match.
#[derive(Clone)]
pub struct FunctionTable {
    functions: HashMap<String, UnaryFunction>,
}

impl FunctionTable {
    /// An empty table. Most callers want [`FunctionTable::default`].
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Registers a function, replacing any previous one with the same name.
    pub fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(f64) -> Result<f64, FunctionError> + Send + Sync + 'static,
    {
        self.functions.insert(name.to_string(), Arc::new(function));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&UnaryFunction> {
        self.functions.get(name).or_else(|| {
            self.functions
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, function)| function)
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        let mut table = Self::empty();
        register_functions(&mut table);
        table
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("FunctionTable")
            .field("functions", &names)
            .finish()
    }
}

pub fn register_functions(table: &mut FunctionTable) {
    elementary::register(table);
    trig::register(table);
}
