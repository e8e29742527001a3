//! Realization of one declared view tree.
//!
//! A [`LiveContext`] moves through three states:
//!
//! 1. **Unbuilt**: created from a [`Definition`] and a root declaration.
//! 2. **ViewsConstructed**: every node below the root is instantiated (or
//!    refused with a log entry) and the construction pass has run.
//! 3. **Attached**: the root is bound to a host container, the tree is wired
//!    parent → child, and the attached pass has run with access to sibling
//!    lookups.
//!
//! Data bindings can be changed afterwards through [`LiveContext::update`];
//! only the properties that reference a changed key are applied again.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use stage_dsl::{Annotate, Declaration, NodeId, Result, Scanner, StageError, ViewHierarchy, ROOT_NAME};

use crate::converter::Pass;
use crate::definition::Definition;
use crate::view::{downcast_mut, downcast_ref, ViewClass, ViewRef};

// ── Bindings ──────────────────────────────────────────────────────────────

/// What a node name currently resolves to.
#[derive(Clone)]
pub enum ViewBinding {
    /// Placeholder for the root until a host container is attached.
    Surrogate,
    View(ViewRef),
}

impl ViewBinding {
    #[inline]
    pub fn view(&self) -> Option<&ViewRef> {
        match self {
            ViewBinding::View(view) => Some(view),
            ViewBinding::Surrogate => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveState {
    Unbuilt,
    ViewsConstructed,
    Attached,
}

// ── LiveContext ───────────────────────────────────────────────────────────

pub struct LiveContext {
    definition:    Definition,
    root:          String,
    hierarchy:     ViewHierarchy,
    data_bindings: BTreeMap<String, String>,
    view_bindings: IndexMap<String, ViewBinding>,
    /// Every node below the root, breadth-first.
    child_queue:   Vec<NodeId>,
    state:         LiveState,
}

impl LiveContext {
    /// Builds the views of the hierarchy owned by `root`.
    pub fn new(definition: Definition, root: &str, data: BTreeMap<String, String>) -> Result<Self> {
        Self::with_initial_views(definition, root, data, Vec::new())
    }

    /// Like [`new`](Self::new), but nodes named in `views` are bound to the
    /// given instances instead of being instantiated.
    pub fn with_initial_views(
        definition: Definition,
        root: &str,
        data: BTreeMap<String, String>,
        views: impl IntoIterator<Item = (String, ViewRef)>,
    ) -> Result<Self> {
        let hierarchy = definition
            .document()
            .get(root)
            .and_then(Declaration::hierarchy)
            .cloned()
            .ok_or_else(|| StageError::unknown_hierarchy(format!("Attempt to load unknown view hierarchy: {root}")))?;

        let mut context = Self {
            definition,
            root: root.to_string(),
            hierarchy,
            data_bindings: data,
            view_bindings: views.into_iter().map(|(name, view)| (name, ViewBinding::View(view))).collect(),
            child_queue: Vec::new(),
            state: LiveState::Unbuilt,
        };
        context.build_view_bindings().context("while building views")?;
        Ok(context)
    }

    // ── Construction ──────────────────────────────────────────────────────

    fn build_view_bindings(&mut self) -> Result<()> {
        self.view_bindings.insert(ROOT_NAME.to_string(), ViewBinding::Surrogate);
        self.view_bindings.insert(self.root.clone(), ViewBinding::Surrogate);
        self.child_queue = self.hierarchy.breadth_first();

        let registrar = self.definition.registrar();
        let base = registrar.base_class();
        for &id in &self.child_queue {
            let name = self.hierarchy.name(id);
            if self.is_root_name(name) {
                log::warn!("'{name}' names the root of '{}'; not building it as a child", self.root);
                continue;
            }
            if matches!(self.view_bindings.get(name), Some(ViewBinding::View(_))) {
                continue;
            }

            let class = match self.definition.document().get(name).and_then(Declaration::class_name) {
                Some(class) if registrar.has_class(class) => class,
                Some(class) => {
                    log::warn!("unable to use class '{class}' for view '{name}'; using {base}");
                    base
                }
                None => base,
            };
            if !registrar.is_subclass_of(class, base) {
                log::error!("only classes descending from {base} can be built; refusing to build '{name}' as {class}");
                continue;
            }
            let Some(view) = registrar.instantiate(class) else {
                log::error!("class {class} cannot be instantiated; refusing to build '{name}'");
                continue;
            };
            log::debug!("built '{name}' as {class}");
            self.view_bindings.insert(name.to_string(), ViewBinding::View(view));
        }

        self.apply_all(Pass::Construction)?;
        self.state = LiveState::ViewsConstructed;
        Ok(())
    }

    // ── Attachment ────────────────────────────────────────────────────────

    /// Binds the root to `container`. The first call also wires the tree into
    /// it and runs the attached pass; later calls only re-apply the root
    /// declaration.
    pub fn attach(&mut self, container: ViewRef) -> Result<()> {
        let Some(previous) = self.view_bindings.get(ROOT_NAME).cloned() else {
            return Ok(());
        };
        self.view_bindings.insert(ROOT_NAME.to_string(), ViewBinding::View(Rc::clone(&container)));
        self.view_bindings.insert(self.root.clone(), ViewBinding::View(container));

        let result = self.attach_to_container(&previous);
        if result.is_ok() && matches!(previous, ViewBinding::Surrogate) {
            self.state = LiveState::Attached;
        }
        result.map_err(|err| self.definition.report(err))
    }

    fn attach_to_container(&self, previous: &ViewBinding) -> Result<()> {
        if let Some(declaration) = self.definition.document().get(&self.root) {
            let keys = declaration.setter_keys();
            if !keys.is_empty() {
                self.apply_declaration(declaration, &keys, Pass::Construction)?;
            }
        }
        if matches!(previous, ViewBinding::Surrogate) {
            self.build_ancestry();
            self.apply_all(Pass::Attached(self))?;
        }
        Ok(())
    }

    /// Adds every queued child to its parent. A name that occurs more than
    /// once shares one instance, owned by the parent of its last occurrence.
    fn build_ancestry(&self) {
        for &id in &self.child_queue {
            let Some(parent_id) = self.hierarchy.parent(id) else { continue };
            let name = self.hierarchy.name(id);
            if self.hierarchy.find(name) != Some(id) {
                continue;
            }
            let parent_name = self.hierarchy.name(parent_id);
            let (Some(parent), Some(child)) = (self.bound(parent_name), self.bound(name)) else {
                log::debug!("skipping '{parent_name}' → '{name}': one side is not built");
                continue;
            };
            let is_root = self.bound(ROOT_NAME).is_some_and(|root| Rc::ptr_eq(root, child));
            if is_root || contains_view(child, parent) {
                log::warn!("'{name}' already contains its parent '{parent_name}'; not attaching");
                continue;
            }
            parent.borrow_mut().container_mut().add_subview(Rc::clone(child));
        }
    }

    #[inline]
    fn is_root_name(&self, name: &str) -> bool {
        name == ROOT_NAME || name == self.root
    }

    // ── Property application ──────────────────────────────────────────────

    /// Declarations of the queued nodes that carry setters, each once,
    /// followed by the root declaration.
    fn declarations_with_properties(&self) -> Vec<(&Declaration, Vec<&str>)> {
        let mut names: IndexSet<&str> = self.child_queue.iter().map(|&id| self.hierarchy.name(id)).collect();
        names.insert(self.root.as_str());

        let document = self.definition.document();
        names
            .into_iter()
            .filter_map(|name| document.get(name))
            .map(|declaration| (declaration, declaration.setter_keys()))
            .filter(|(_, keys)| !keys.is_empty())
            .collect()
    }

    fn apply_all(&self, pass: Pass<'_>) -> Result<()> {
        log::debug!("{} pass over '{}'", pass.label(), self.root);
        for (declaration, keys) in self.declarations_with_properties() {
            self.apply_declaration(declaration, &keys, pass)?;
        }
        Ok(())
    }

    /// Feeds the interpolated text of each key to the registrar. Declarations
    /// whose view is not built are skipped.
    fn apply_declaration(&self, declaration: &Declaration, keys: &[&str], pass: Pass<'_>) -> Result<()> {
        let Some(view) = self.bound(declaration.name()) else {
            return Ok(());
        };
        let registrar = self.definition.registrar();
        for &key in keys {
            let Some(text) = declaration.interpolated_property(key, &self.data_bindings) else {
                continue;
            };
            let mut scanner = Scanner::new(&text.value, text.line);
            registrar
                .receive(key, &mut scanner, &mut *view.borrow_mut(), pass)
                .with_context(|| format!("while setting properties for {}", declaration.name()))?;
        }
        Ok(())
    }

    // ── Data bindings ─────────────────────────────────────────────────────

    /// Lets `f` edit the data bindings, then re-applies every property that
    /// references a key whose value changed. The attached pass only runs
    /// once the context is attached.
    pub fn update(&mut self, f: impl FnOnce(&mut BindingMutator)) -> Result<()> {
        let mut mutator = BindingMutator { data: self.data_bindings.clone() };
        f(&mut mutator);

        let changed: BTreeSet<String> = self
            .data_bindings
            .keys()
            .chain(mutator.data.keys())
            .filter(|key| self.data_bindings.get(*key) != mutator.data.get(*key))
            .cloned()
            .collect();
        self.data_bindings = mutator.data;
        if changed.is_empty() {
            return Ok(());
        }
        log::debug!("data bindings changed: {changed:?}");

        self.reapply(&changed)
            .context("while updating data bindings")
            .map_err(|err| self.definition.report(err))
    }

    fn reapply(&self, changed: &BTreeSet<String>) -> Result<()> {
        for (declaration, keys) in self.declarations_with_properties() {
            let interpolants = declaration.interpolants();
            let affected: Vec<&str> = keys
                .into_iter()
                .filter(|key| {
                    changed
                        .iter()
                        .any(|binding| interpolants.get(binding).is_some_and(|props| props.contains(*key)))
                })
                .collect();
            if affected.is_empty() {
                continue;
            }
            self.apply_declaration(declaration, &affected, Pass::Construction)?;
            if self.state == LiveState::Attached {
                self.apply_declaration(declaration, &affected, Pass::Attached(self))?;
            }
        }
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    fn bound(&self, name: &str) -> Option<&ViewRef> {
        self.view_bindings.get(name).and_then(ViewBinding::view)
    }

    /// The view bound to `name`.
    pub fn lookup(&self, name: &str) -> Result<ViewRef> {
        self.bound(name)
            .cloned()
            .ok_or_else(|| StageError::unknown_view(format!("Unknown view {name} in view hierarchy")))
    }

    /// The view bound to `name`, checked to be a `V` (or a subclass of it).
    pub fn lookup_as<V: ViewClass>(&self, name: &str) -> Result<ViewRef> {
        let view = self.lookup(name)?;
        let class = {
            let bound = view.try_borrow().map_err(|_| {
                StageError::invalid_view_type(format!("View named {name} is being configured and cannot be inspected"))
            })?;
            if downcast_ref::<V>(&*bound).is_some() {
                return Ok(Rc::clone(&view));
            }
            bound.class_name()
        };
        Err(StageError::invalid_view_type(format!(
            "Unexpected type {} for view named {name}. Expecting type {class}",
            V::CLASS
        )))
    }

    /// Runs `f` on the view bound to `name` as a `V`.
    pub fn with_view<V: ViewClass, R>(&self, name: &str, f: impl FnOnce(&mut V) -> R) -> Result<R> {
        let view = self.lookup_as::<V>(name)?;
        let mut bound = view.borrow_mut();
        downcast_mut::<V>(&mut *bound)
            .map(f)
            .ok_or_else(|| StageError::invalid_view_type(format!("View named {name} is not a {}", V::CLASS)))
    }

    /// Extracts a typed set of views at once.
    pub fn map<M: ViewMapping>(&self) -> Result<M> {
        M::map(&Mapper { context: self })
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> LiveState {
        self.state
    }

    #[inline]
    pub fn root_name(&self) -> &str {
        &self.root
    }

    #[inline]
    pub fn hierarchy(&self) -> &ViewHierarchy {
        &self.hierarchy
    }

    #[inline]
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    #[inline]
    pub fn data_bindings(&self) -> &BTreeMap<String, String> {
        &self.data_bindings
    }

    /// Names bound to a built view, in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.view_bindings
            .iter()
            .filter(|(_, binding)| binding.view().is_some())
            .map(|(name, _)| name.as_str())
    }
}

impl std::fmt::Debug for LiveContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveContext")
            .field("root", &self.root)
            .field("state", &self.state)
            .field("views", &self.names().collect::<Vec<_>>())
            .field("data_bindings", &self.data_bindings)
            .finish()
    }
}

/// Whether `target` is `view` or sits anywhere below it.
fn contains_view(view: &ViewRef, target: &ViewRef) -> bool {
    if Rc::ptr_eq(view, target) {
        return true;
    }
    let Ok(view) = view.try_borrow() else { return false };
    view.container().subviews().iter().any(|sub| contains_view(sub, target))
}

// ── BindingMutator ────────────────────────────────────────────────────────

/// Scratch copy of the data bindings handed to [`LiveContext::update`].
pub struct BindingMutator {
    data: BTreeMap<String, String>,
}

impl BindingMutator {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

// ── Mapping ───────────────────────────────────────────────────────────────

/// A host-side bundle of named views.
///
/// ```rust,ignore
/// struct Login { user: ViewRef, submit: ViewRef }
///
/// impl ViewMapping for Login {
///     fn map(m: &Mapper<'_>) -> Result<Self> {
///         Ok(Self { user: m.view_as::<TextField>("User")?, submit: m.view_as::<Button>("Submit")? })
///     }
/// }
/// ```
pub trait ViewMapping: Sized {
    fn map(mapper: &Mapper<'_>) -> Result<Self>;
}

pub struct Mapper<'c> {
    context: &'c LiveContext,
}

impl Mapper<'_> {
    pub fn view(&self, name: &str) -> Result<ViewRef> {
        self.context.lookup(name)
    }

    pub fn view_as<V: ViewClass>(&self, name: &str) -> Result<ViewRef> {
        self.context.lookup_as::<V>(name)
    }

    #[inline]
    pub fn context(&self) -> &LiveContext {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{ErrorListener, ErrorLog};
    use crate::registrar::PropertyRegistrar;
    use crate::view::view_ref;
    use crate::widgets::{load_defaults, Button, Container, Label, Stack};
    use stage_dsl::ErrorKind;

    const SCREEN: &str = "\
Main:
  Title
  Body

Title:
  .class = Label
  .text = Hello #{name}
  .alpha = 0.5

Body:
  .class = Label
  .text = static
";

    fn definition(source: &str) -> Definition {
        let mut registrar = PropertyRegistrar::new();
        load_defaults(&mut registrar);
        Definition::compile(source, "test", Rc::new(registrar)).unwrap()
    }

    fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn attached(source: &str) -> (LiveContext, ViewRef) {
        let mut context = definition(source).load("Main").unwrap();
        let container = view_ref(Container::default());
        context.attach(Rc::clone(&container)).unwrap();
        (context, container)
    }

    fn label_text(context: &LiveContext, name: &str) -> String {
        context.with_view::<Label, _>(name, |l| l.text.clone()).unwrap()
    }

    #[test]
    fn construction_applies_properties() {
        let context = definition("Main:\n  Foo\nFoo:\n  .alpha = 0.5\n").load("Main").unwrap();
        assert_eq!(context.state(), LiveState::ViewsConstructed);
        let alpha = context.with_view::<Container, _>("Foo", |c| c.alpha).unwrap();
        assert_eq!(alpha, 0.5);
    }

    #[test]
    fn interpolation_and_rebinding() {
        let mut context = definition(SCREEN).load_templated("Main", data(&[("name", "World")])).unwrap();
        context.attach(view_ref(Container::default())).unwrap();
        assert_eq!(label_text(&context, "Title"), "Hello World");

        // Local edits to unrelated properties must survive the update.
        context.with_view::<Container, _>("Title", |c| c.alpha = 0.25).unwrap();
        context.with_view::<Label, _>("Body", |l| l.text = "edited".into()).unwrap();

        context.update(|m| m.set("name", "Mars")).unwrap();
        assert_eq!(label_text(&context, "Title"), "Hello Mars");
        assert_eq!(context.with_view::<Container, _>("Title", |c| c.alpha).unwrap(), 0.25);
        assert_eq!(label_text(&context, "Body"), "edited");
        assert_eq!(context.data_bindings()["name"], "Mars");
    }

    #[test]
    fn unbound_placeholder_is_applied_verbatim() {
        let context = definition(SCREEN).load("Main").unwrap();
        assert_eq!(label_text(&context, "Title"), "Hello #{name}");
    }

    #[test]
    fn removing_a_binding_restores_the_placeholder() {
        let mut context = definition(SCREEN).load_templated("Main", data(&[("name", "World")])).unwrap();
        context.update(|m| {
            assert_eq!(m.remove("name").as_deref(), Some("World"));
        })
        .unwrap();
        assert_eq!(label_text(&context, "Title"), "Hello #{name}");
    }

    #[test]
    fn unchanged_update_is_a_no_op() {
        let mut context = definition(SCREEN).load_templated("Main", data(&[("name", "World")])).unwrap();
        context.with_view::<Label, _>("Title", |l| l.text = "edited".into()).unwrap();
        context.update(|m| m.set("name", "World")).unwrap();
        assert_eq!(label_text(&context, "Title"), "edited");
    }

    #[test]
    fn unhandled_property_names_property_and_line() {
        let err = definition("Main:\n  Box\nBox:\n  .color = red\n").load("Main").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnhandledProperty { .. }));
        assert_eq!(err.line(), Some(4));
        assert!(err.to_string().contains("'color'"), "{err}");
        assert_eq!(err.trail(), ["while setting properties for Box", "while building views"]);
    }

    #[test]
    fn unrecognized_value_reports_declaring_line() {
        let err = definition("Main:\n  Box\n\nBox:\n  .hidden = maybe\n").load("Main").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnrecognizedContent { .. }));
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn attach_wires_tree_and_root_properties() {
        let source = "\
Main:
  Row
    A
    B
  C

Main:
  .backgroundColor = red

Row:
  .class = Stack
";
        let (context, container) = attached(source);
        assert_eq!(context.state(), LiveState::Attached);

        let root = container.borrow();
        assert_eq!(root.container().subviews().len(), 2);
        assert_eq!(root.container().background, Some(stage_core::paint::Color::named("red").unwrap()));

        let row = context.lookup_as::<Stack>("Row").unwrap();
        assert_eq!(row.borrow().container().subviews().len(), 2);
        assert!(Rc::ptr_eq(&context.lookup("Main").unwrap(), &container));
        assert!(Rc::ptr_eq(&context.lookup(ROOT_NAME).unwrap(), &container));
    }

    #[test]
    fn match_size_reads_sibling_after_attach() {
        let source = "Main:\n  A\n  B\nA:\n  .size = {40, 30}\nB:\n  .matchSize = A\n";
        let mut context = definition(source).load("Main").unwrap();
        let size = |c: &LiveContext| c.with_view::<Container, _>("B", |b| b.frame.size).unwrap();
        assert_eq!(size(&context), stage_core::coords::Vec2::zero());

        context.attach(view_ref(Container::default())).unwrap();
        assert_eq!(size(&context), stage_core::coords::Vec2::new(40.0, 30.0));
    }

    #[test]
    fn attached_failure_reaches_listener() {
        let log = Rc::new(ErrorLog::default());
        let listener: Rc<dyn ErrorListener> = log.clone();
        let definition = definition("Main:\n  B\nB:\n  .matchSize = Nowhere\n").with_listener(listener);

        let mut context = definition.load("Main").unwrap();
        let err = context.attach(view_ref(Container::default())).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownView { .. }));
        assert_eq!(context.state(), LiveState::ViewsConstructed);
        assert_eq!(log.len(), 1);
        assert!(log.entries()[0].contains("while setting properties for B"));
    }

    const REBOUND_SIZE: &str = "\
Main:
  P
  Q
  B

P:
  .size = {10, 10}

Q:
  .size = {40, 30}

B:
  .matchSize = #{src}
";

    fn matched_size(context: &LiveContext) -> stage_core::coords::Vec2 {
        context.with_view::<Container, _>("B", |b| b.frame.size).unwrap()
    }

    #[test]
    fn rebinding_reruns_attached_pass() {
        let mut context = definition(REBOUND_SIZE).load_templated("Main", data(&[("src", "P")])).unwrap();
        context.attach(view_ref(Container::default())).unwrap();
        assert_eq!(matched_size(&context), stage_core::coords::Vec2::new(10.0, 10.0));

        context.update(|m| m.set("src", "Q")).unwrap();
        assert_eq!(matched_size(&context), stage_core::coords::Vec2::new(40.0, 30.0));
    }

    #[test]
    fn rebinding_before_attach_skips_attached_pass() {
        let mut context = definition(REBOUND_SIZE).load_templated("Main", data(&[("src", "P")])).unwrap();
        context.update(|m| m.set("src", "Q")).unwrap();
        assert_eq!(context.state(), LiveState::ViewsConstructed);
        assert_eq!(matched_size(&context), stage_core::coords::Vec2::zero());

        context.attach(view_ref(Container::default())).unwrap();
        assert_eq!(matched_size(&context), stage_core::coords::Vec2::new(40.0, 30.0));
    }

    #[test]
    fn rebinding_failure_reaches_listener() {
        let log = Rc::new(ErrorLog::default());
        let listener: Rc<dyn ErrorListener> = log.clone();
        let mut context = definition(REBOUND_SIZE)
            .with_listener(listener)
            .load_templated("Main", data(&[("src", "P")]))
            .unwrap();
        context.attach(view_ref(Container::default())).unwrap();
        assert!(log.is_empty());

        let err = context.update(|m| m.set("src", "Nowhere")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownView { .. }));
        assert_eq!(err.trail(), ["while setting properties for B", "while updating data bindings"]);
        assert_eq!(log.len(), 1);
        assert!(log.entries()[0].contains("while updating data bindings"));
        assert_eq!(context.data_bindings()["src"], "Nowhere");
    }

    fn subview_count(context: &LiveContext, name: &str) -> usize {
        context.lookup(name).unwrap().borrow().container().subviews().len()
    }

    #[test]
    fn duplicate_node_shares_one_instance() {
        let (context, container) = attached("Main:\n  A\n  A\n");
        assert_eq!(context.hierarchy().children(context.hierarchy().root()).len(), 2);
        assert_eq!(container.borrow().container().subviews().len(), 1);
    }

    #[test]
    fn duplicate_node_belongs_to_last_parent() {
        let (context, _) = attached("Main:\n  A\n    X\n  B\n    X\n");
        assert_eq!(subview_count(&context, "A"), 0);
        assert_eq!(subview_count(&context, "B"), 1);
        let owner = context.lookup("B").unwrap();
        assert!(Rc::ptr_eq(&owner.borrow().container().subviews()[0], &context.lookup("X").unwrap()));
    }

    #[test]
    fn root_named_node_is_not_nested() {
        let (context, container) = attached("Main:\n  X\n    Main\n");
        assert_eq!(subview_count(&context, "X"), 0);
        assert_eq!(container.borrow().container().subviews().len(), 1);
        assert!(Rc::ptr_eq(&context.lookup("Main").unwrap(), &container));
        // Held by the test and the two root bindings.
        assert_eq!(Rc::strong_count(&container), 3);
    }

    #[test]
    fn node_never_contains_its_own_parent() {
        let (context, _) = attached("Main:\n  A\n    B\n      A\n");
        assert_eq!(subview_count(&context, "A"), 1);
        assert_eq!(subview_count(&context, "B"), 0);
    }

    #[test]
    fn refused_classes_stay_unbound() {
        let mut registrar = PropertyRegistrar::new();
        load_defaults(&mut registrar);
        registrar.register_abstract("Gadget", None);
        let source = "Main:\n  C\n  G\n  D\nC:\n  .class = Control\nG:\n  .class = Gadget\n";
        let context = Definition::compile(source, "test", Rc::new(registrar)).unwrap().load("Main").unwrap();

        for name in ["C", "G"] {
            let err = context.lookup(name).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::UnknownView { .. }), "{name}");
        }
        assert!(context.lookup("D").is_ok());
    }

    #[test]
    fn unknown_class_falls_back_to_base() {
        let context = definition("Main:\n  X\nX:\n  .class = Nope\n").load("Main").unwrap();
        assert_eq!(context.lookup("X").unwrap().borrow().class_name(), "Container");
    }

    #[test]
    fn typed_lookup_errors() {
        let context = definition(SCREEN).load("Main").unwrap();
        assert!(context.lookup_as::<Container>("Title").is_ok());

        let err = context.lookup_as::<Button>("Title").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidViewType { .. }));
        assert!(err.to_string().contains("Unexpected type Button for view named Title. Expecting type Label"));

        let err = context.lookup("Missing").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownView { .. }));
    }

    #[test]
    fn initial_views_are_not_rebuilt() {
        let button = view_ref(Button::default());
        let context = LiveContext::with_initial_views(
            definition(SCREEN),
            "Main",
            data(&[("name", "You")]),
            [("Title".to_string(), Rc::clone(&button))],
        )
        .unwrap();

        assert!(Rc::ptr_eq(&context.lookup("Title").unwrap(), &button));
        let title = context.with_view::<Button, _>("Title", |b| b.title.clone()).unwrap();
        assert_eq!(title, "Hello You");
    }

    #[test]
    fn missing_hierarchy_is_rejected() {
        let Err(err) = definition(SCREEN).load("Title") else { panic!("expected an error") };
        assert!(matches!(err.kind(), ErrorKind::UnknownViewHierarchy { .. }));
        assert!(err.to_string().contains("Attempt to load unknown view hierarchy: Title"));
    }

    struct Screen {
        title: ViewRef,
        body:  ViewRef,
    }

    impl ViewMapping for Screen {
        fn map(m: &Mapper<'_>) -> Result<Self> {
            Ok(Self { title: m.view_as::<Label>("Title")?, body: m.view("Body")? })
        }
    }

    #[test]
    fn mapping_extracts_named_views() {
        let (context, _) = attached(SCREEN);
        let screen: Screen = context.map().unwrap();
        assert!(Rc::ptr_eq(&screen.title, &context.lookup("Title").unwrap()));
        assert_eq!(screen.body.borrow().class_name(), "Label");

        let names: Vec<&str> = context.names().collect();
        assert!(names.contains(&"Title") && names.contains(&"Main"));
    }
}
