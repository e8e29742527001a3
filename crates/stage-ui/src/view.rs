use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::widgets::container::Container;

// ── View trait ────────────────────────────────────────────────────────────

/// Object a definition can instantiate and configure.
///
/// Class inheritance is expressed by composition: every view embeds its
/// superclass value (a `Button` holds a `Label`, which holds a `Container`),
/// and [`as_class_mut`](View::as_class_mut) hands out whichever part of the
/// chain a converter was registered against.
///
/// # Implementing a custom view
///
/// ```rust
/// use std::any::Any;
/// use stage_ui::prelude::*;
///
/// #[derive(Default)]
/// pub struct Badge { base: Container, count: i64 }
///
/// impl ViewClass for Badge {
///     const CLASS: &'static str = "Badge";
///     const SUPERCLASS: Option<&'static str> = Some(Container::CLASS);
/// }
///
/// impl View for Badge {
///     fn class_name(&self) -> &'static str { Self::CLASS }
///     fn as_class(&self, class: &str) -> Option<&dyn Any> {
///         if class == Self::CLASS { Some(self) } else { self.base.as_class(class) }
///     }
///     fn as_class_mut(&mut self, class: &str) -> Option<&mut dyn Any> {
///         if class == Self::CLASS { Some(self) } else { self.base.as_class_mut(class) }
///     }
///     fn container(&self) -> &Container { &self.base }
///     fn container_mut(&mut self) -> &mut Container { &mut self.base }
/// }
///
/// let mut registrar = PropertyRegistrar::new();
/// registrar.register_class::<Badge>();
/// registrar.register::<Badge, _>("count", |s| s.scan_int()).apply(|b, n| b.count = n);
/// ```
pub trait View: 'static {
    /// Most-derived class name.
    fn class_name(&self) -> &'static str;

    /// This view seen as `class`, if `class` is in its chain.
    fn as_class(&self, class: &str) -> Option<&dyn Any>;

    fn as_class_mut(&mut self, class: &str) -> Option<&mut dyn Any>;

    /// The base container every view embeds.
    fn container(&self) -> &Container;

    fn container_mut(&mut self) -> &mut Container;

    /// One-line description of the configured state.
    fn summary(&self) -> String {
        self.container().describe()
    }
}

impl std::fmt::Debug for dyn View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.class_name(), self.summary())
    }
}

/// Statically known class data for a view type.
pub trait ViewClass: View + Default {
    const CLASS: &'static str;
    const SUPERCLASS: Option<&'static str>;
}

/// Shared handle to a live view.
pub type ViewRef = Rc<RefCell<dyn View>>;

/// Wraps `view` in a fresh [`ViewRef`].
pub fn view_ref<V: View>(view: V) -> ViewRef {
    Rc::new(RefCell::new(view))
}

/// `view` as `V` if `V` is anywhere in its class chain.
pub fn downcast_mut<V: ViewClass>(view: &mut dyn View) -> Option<&mut V> {
    view.as_class_mut(V::CLASS)?.downcast_mut::<V>()
}

pub fn downcast_ref<V: ViewClass>(view: &dyn View) -> Option<&V> {
    view.as_class(V::CLASS)?.downcast_ref::<V>()
}
