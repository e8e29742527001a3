use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use stage_dsl::{Result, Scanner, StageError};

use crate::converter::{ConverterBuilder, Pass};
use crate::registration::{Properties, PropertyRegistration};
use crate::view::{View, ViewClass, ViewRef};
use crate::widgets::container::Container;

type Factory = Rc<dyn Fn() -> ViewRef>;

/// Registered class: its superclass link and, unless abstract, a factory.
#[derive(Clone)]
pub struct ClassInfo {
    pub superclass: Option<String>,
    factory:        Option<Factory>,
}

impl ClassInfo {
    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.factory.is_none()
    }
}

// ── PropertyRegistrar ─────────────────────────────────────────────────────

/// Class registry plus one property table per class.
///
/// Property lookup walks a view's class chain most-derived first; the first
/// table that declares the property handles it.
#[derive(Clone)]
pub struct PropertyRegistrar {
    classes: IndexMap<String, ClassInfo>,
    tables:  IndexMap<String, PropertyRegistration>,
}

impl Default for PropertyRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyRegistrar {
    /// A registrar that knows only the base class.
    pub fn new() -> Self {
        let mut registrar = Self { classes: IndexMap::new(), tables: IndexMap::new() };
        registrar.register_class::<Container>();
        registrar
    }

    /// Class every instantiated view must descend from, and the fallback
    /// when a declared class is missing or unknown.
    #[inline]
    pub fn base_class(&self) -> &'static str {
        Container::CLASS
    }

    // ── Classes ───────────────────────────────────────────────────────────

    pub fn register_class<V: ViewClass>(&mut self) {
        let factory: Factory = Rc::new(|| -> ViewRef { Rc::new(RefCell::new(V::default())) });
        self.classes.insert(
            V::CLASS.to_string(),
            ClassInfo { superclass: V::SUPERCLASS.map(str::to_string), factory: Some(factory) },
        );
    }

    /// A class that can carry properties but is never instantiated.
    pub fn register_abstract(&mut self, name: &str, superclass: Option<&str>) {
        self.classes.insert(
            name.to_string(),
            ClassInfo { superclass: superclass.map(str::to_string), factory: None },
        );
    }

    #[inline]
    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    #[inline]
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// `class` followed by its registered ancestors.
    pub fn class_chain<'a>(&'a self, class: &'a str) -> Vec<&'a str> {
        let mut chain = vec![class];
        let mut current = class;
        while let Some(next) = self.classes.get(current).and_then(|c| c.superclass.as_deref()) {
            if chain.contains(&next) {
                log::warn!("class chain of '{class}' loops back to '{next}'");
                break;
            }
            chain.push(next);
            current = next;
        }
        chain
    }

    pub fn is_subclass_of(&self, class: &str, ancestor: &str) -> bool {
        self.class_chain(class).contains(&ancestor)
    }

    /// New instance of `class`, or `None` for unknown and abstract classes.
    pub fn instantiate(&self, class: &str) -> Option<ViewRef> {
        self.classes.get(class)?.factory.as_ref().map(|make| make())
    }

    // ── Properties ────────────────────────────────────────────────────────

    /// Typed access to the property table of `V`, created on first use.
    pub fn properties<V: ViewClass>(&mut self) -> Properties<'_, V> {
        let table = self
            .tables
            .entry(V::CLASS.to_string())
            .or_insert_with(|| PropertyRegistration::new(V::CLASS));
        Properties::new(table)
    }

    /// Runs `f` against the table of `V`.
    pub fn register_properties<V: ViewClass>(&mut self, f: impl FnOnce(&mut Properties<'_, V>)) {
        f(&mut self.properties::<V>());
    }

    /// Shorthand for a single converter on `V`.
    pub fn register<V: ViewClass, T: 'static>(
        &mut self,
        name: &str,
        scan: impl Fn(&mut Scanner<'_>) -> Result<T> + 'static,
    ) -> ConverterBuilder<'_, T, V> {
        let table = self
            .tables
            .entry(V::CLASS.to_string())
            .or_insert_with(|| PropertyRegistration::new(V::CLASS));
        ConverterBuilder::new(table, name, scan, crate::view::downcast_mut::<V>)
    }

    #[inline]
    pub fn table(&self, class: &str) -> Option<&PropertyRegistration> {
        self.tables.get(class)
    }

    /// Property tables along the class chain of `class`, most-derived first.
    pub fn registry_for(&self, class: &str) -> Vec<&PropertyRegistration> {
        self.class_chain(class)
            .into_iter()
            .filter_map(|c| self.tables.get(c))
            .collect()
    }

    /// Applies `property` to `view` through the first table in its chain
    /// that declares it.
    pub fn receive(&self, property: &str, scanner: &mut Scanner<'_>, view: &mut dyn View, pass: Pass<'_>) -> Result<()> {
        let class = view.class_name();
        for registration in self.registry_for(class) {
            if registration.receive(property, scanner, view, pass)? {
                log::trace!("'{property}' handled by {} ({} pass)", registration.class(), pass.label());
                return Ok(());
            }
        }
        Err(StageError::unhandled_property(
            format!("Property '{property}' has no setter registered in any ancestor of type {class}"),
            scanner.line(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{button::Button, label::Label};

    fn registrar() -> PropertyRegistrar {
        let mut r = PropertyRegistrar::new();
        r.register_class::<Label>();
        r.register_class::<Button>();
        r.register::<Container, _>("alpha", |s| s.scan_float()).apply(|c, v| c.alpha = v);
        r.register::<Label, _>("text", |s| Ok(s.scan_remainder().to_string()))
            .apply(|l, t| l.text = t);
        r.register::<Button, _>("text", |s| Ok(s.scan_remainder().to_uppercase()))
            .apply(|b, t| b.title = t);
        r
    }

    fn apply(r: &PropertyRegistrar, view: &ViewRef, property: &str, text: &str) -> Result<()> {
        let mut scanner = Scanner::new(text, 3);
        r.receive(property, &mut scanner, &mut *view.borrow_mut(), Pass::Construction)
    }

    #[test]
    fn chain_is_most_derived_first() {
        let r = registrar();
        assert_eq!(r.class_chain("Button"), ["Button", "Label", "Container"]);
        assert_eq!(r.class_chain("Unknown"), ["Unknown"]);
        let tables: Vec<_> = r.registry_for("Button").iter().map(|t| t.class()).collect();
        assert_eq!(tables, ["Button", "Label", "Container"]);
    }

    #[test]
    fn most_derived_converter_wins() {
        let r = registrar();
        let button = r.instantiate("Button").unwrap();
        apply(&r, &button, "text", "go").unwrap();
        let view = button.borrow();
        let b = crate::view::downcast_ref::<Button>(&*view).unwrap();
        assert_eq!(b.title, "GO");
        assert_eq!(b.label.text, "");
    }

    #[test]
    fn inherited_property_reaches_base() {
        let r = registrar();
        let label = r.instantiate("Label").unwrap();
        apply(&r, &label, "alpha", "0.25").unwrap();
        assert_eq!(label.borrow().container().alpha, 0.25);
    }

    #[test]
    fn unhandled_property_names_type_and_line() {
        let r = registrar();
        let label = r.instantiate("Label").unwrap();
        let err = apply(&r, &label, "color", "red").unwrap_err();
        assert_eq!(err.line(), Some(3));
        match err.kind() {
            stage_dsl::ErrorKind::UnhandledProperty { message, .. } => {
                assert!(message.contains("'color'"));
                assert!(message.contains("Label"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn scan_failure_is_unrecognized_content() {
        let r = registrar();
        let c = r.instantiate("Container").unwrap();
        let err = apply(&r, &c, "alpha", "lots").unwrap_err();
        assert!(matches!(err.kind(), stage_dsl::ErrorKind::UnrecognizedContent { line: 3, .. }));
    }

    #[test]
    fn wrong_view_type_is_a_no_op() {
        let r = registrar();
        let table = r.table("Label").unwrap();
        let c = r.instantiate("Container").unwrap();
        let mut scanner = Scanner::new("hello", 1);
        let handled = table.receive("text", &mut scanner, &mut *c.borrow_mut(), Pass::Construction).unwrap();
        assert!(handled);
        assert_eq!(c.borrow().summary(), Container::default().describe());
    }

    #[test]
    fn abstract_classes_are_not_instantiated() {
        let mut r = registrar();
        r.register_abstract("Control", Some("Container"));
        assert!(r.class("Control").unwrap().is_abstract());
        assert!(r.instantiate("Control").is_none());
        assert!(r.is_subclass_of("Control", "Container"));
        assert!(r.instantiate("Nope").is_none());
    }

    #[test]
    fn reregistering_replaces_converter() {
        let mut r = registrar();
        r.register::<Container, _>("alpha", |s| s.scan_float()).apply(|c, v| c.alpha = v / 2.0);
        let c = r.instantiate("Container").unwrap();
        apply(&r, &c, "alpha", "1").unwrap();
        assert_eq!(c.borrow().container().alpha, 0.5);
        assert_eq!(r.table("Container").unwrap().len(), 1);
    }
}
