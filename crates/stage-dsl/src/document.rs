use indexmap::IndexMap;

use crate::declaration::Declaration;

/// Every declaration compiled from one source, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    identifier:   String,
    declarations: IndexMap<String, Declaration>,
}

impl Document {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), declarations: IndexMap::new() }
    }

    /// Where the source came from (a file path or a caller-chosen label).
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Declaration under `name`, created empty if absent.
    pub fn declaration_mut(&mut self, name: &str) -> &mut Declaration {
        self.declarations
            .entry(name.to_string())
            .or_insert_with(|| Declaration::new(name))
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_mut_creates_once() {
        let mut doc = Document::new("t");
        doc.declaration_mut("A").set_property("x", "1", 1);
        doc.declaration_mut("A");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("A").unwrap().property("x").unwrap().value, "1");
        assert!(doc.get("B").is_none());
    }
}
