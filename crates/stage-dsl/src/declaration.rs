use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};

use crate::hierarchy::ViewHierarchy;

/// Property naming the view class to instantiate for a node.
pub const CLASS_PROPERTY: &str = "class";

/// Raw value text of one property and the line its assignment started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyText {
    pub value: String,
    pub line:  usize,
}

/// Named record of property assignments and/or a view tree.
///
/// `interpolants` maps each `#{key}` placeholder to the properties whose text
/// mentions it, and is rebuilt for a property every time it is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    name:         String,
    properties:   IndexMap<String, PropertyText>,
    interpolants: IndexMap<String, IndexSet<String>>,
    hierarchy:    Option<ViewHierarchy>,
}

impl Declaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:         name.into(),
            properties:   IndexMap::new(),
            interpolants: IndexMap::new(),
            hierarchy:    None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn properties(&self) -> &IndexMap<String, PropertyText> {
        &self.properties
    }

    #[inline]
    pub fn property(&self, key: &str) -> Option<&PropertyText> {
        self.properties.get(key)
    }

    #[inline]
    pub fn interpolants(&self) -> &IndexMap<String, IndexSet<String>> {
        &self.interpolants
    }

    #[inline]
    pub fn hierarchy(&self) -> Option<&ViewHierarchy> {
        self.hierarchy.as_ref()
    }

    /// Declared view class, if any.
    pub fn class_name(&self) -> Option<&str> {
        self.property(CLASS_PROPERTY).map(|p| p.value.as_str())
    }

    /// Property keys other than `class`, in declaration order.
    pub fn setter_keys(&self) -> Vec<&str> {
        self.properties
            .keys()
            .map(String::as_str)
            .filter(|k| *k != CLASS_PROPERTY)
            .collect()
    }

    /// Stores a property value. Overwriting warns; last write wins.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>, line: usize) {
        let key = key.into();
        let value = value.into();

        if let Some(old) = self.properties.get(&key) {
            log::warn!(
                "'{}': overriding property '{}' (line {}) with value from line {}",
                self.name, key, old.line, line
            );
        }
        for props in self.interpolants.values_mut() {
            props.shift_remove(&key);
        }
        self.interpolants.retain(|_, props| !props.is_empty());

        for placeholder in interpolants_of(&value) {
            self.interpolants.entry(placeholder).or_default().insert(key.clone());
        }
        self.properties.insert(key, PropertyText { value, line });
    }

    /// Installs a view tree. Replacing an existing one warns.
    pub fn set_hierarchy(&mut self, hierarchy: ViewHierarchy) {
        if self.hierarchy.is_some() {
            log::warn!("'{}' already has a view hierarchy; replacing it", self.name);
        }
        self.hierarchy = Some(hierarchy);
    }

    /// Property text with every bound `#{key}` replaced by its value.
    /// Placeholders without a binding are left as written.
    pub fn interpolated_property(&self, key: &str, data: &BTreeMap<String, String>) -> Option<PropertyText> {
        let property = self.properties.get(key)?;
        let mut value = property.value.clone();
        for placeholder in interpolants_of(&property.value) {
            if let Some(bound) = data.get(&placeholder) {
                value = value.replace(&format!("#{{{placeholder}}}"), bound);
            }
        }
        Some(PropertyText { value, line: property.line })
    }
}

/// Keys of every `#{key}` in `text`. The key is non-empty and has no `{`.
pub fn interpolants_of(text: &str) -> IndexSet<String> {
    let mut keys = IndexSet::new();
    let mut rest = text;
    while let Some(start) = rest.find("#{") {
        let after = &rest[start + 2..];
        match after.find(['{', '}']) {
            Some(end) if after[end..].starts_with('}') => {
                if end > 0 {
                    keys.insert(after[..end].to_string());
                }
                rest = &after[end + 1..];
            }
            Some(_) => rest = &rest[start + 1..],
            None => break,
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_placeholders() {
        let keys = interpolants_of("Hello #{name}, #{greeting}! #{} #{name}");
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), ["name", "greeting"]);
    }

    #[test]
    fn nested_brace_restarts_match() {
        let keys = interpolants_of("#{a{b} #{c");
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), Vec::<String>::new());
        let keys = interpolants_of("#{#{inner}}");
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), ["inner"]);
    }

    #[test]
    fn set_property_indexes_interpolants() {
        let mut d = Declaration::new("Title");
        d.set_property("text", "Hi #{name}", 3);
        d.set_property("tint", "#{color}", 4);
        assert!(d.interpolants()["name"].contains("text"));
        assert!(d.interpolants()["color"].contains("tint"));

        d.set_property("text", "plain", 9);
        assert!(!d.interpolants().contains_key("name"));
        assert_eq!(d.property("text").unwrap().line, 9);
    }

    #[test]
    fn interpolation_leaves_unbound() {
        let mut d = Declaration::new("T");
        d.set_property("text", "#{a} and #{b}", 1);
        let data = BTreeMap::from([("a".to_string(), "x".to_string())]);
        assert_eq!(d.interpolated_property("text", &data).unwrap().value, "x and #{b}");
        assert!(d.interpolated_property("missing", &data).is_none());
    }

    #[test]
    fn setter_keys_skip_class() {
        let mut d = Declaration::new("T");
        d.set_property("class", "Label", 1);
        d.set_property("text", "x", 2);
        assert_eq!(d.setter_keys(), ["text"]);
        assert_eq!(d.class_name(), Some("Label"));
    }
}
