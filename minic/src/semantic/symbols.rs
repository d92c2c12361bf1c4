use indexmap::IndexMap;
use serde::Serialize;

/// Flat variable -> type table for one program. Branches of an `if` share
/// it; there are no nested scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTable(IndexMap<String, String>);

impl SymbolTable {
    /// Record `name: ty`, replacing any earlier declaration. Returns the type
    /// it replaced.
    pub fn declare(&mut self, name: &str, ty: &str) -> Option<String> {
        self.0.insert(name.to_string(), ty.to_string())
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in first-declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, ty)| (name.as_str(), ty.as_str()))
    }
}
