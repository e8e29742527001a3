use std::any::Any;
use std::rc::Rc;

use indexmap::map::Entry;
use stage_dsl::{Result, Scanner};

use crate::context::LiveContext;
use crate::registration::PropertyRegistration;
use crate::view::View;

// ── Pass ──────────────────────────────────────────────────────────────────

/// Which property application is running.
#[derive(Clone, Copy)]
pub enum Pass<'a> {
    /// Right after instantiation; views are not in the tree yet.
    Construction,
    /// After the tree is wired; siblings can be looked up through the context.
    Attached(&'a LiveContext),
}

impl Pass<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Pass::Construction => "construction",
            Pass::Attached(_) => "attached",
        }
    }
}

// ── Converter ─────────────────────────────────────────────────────────────

type ScanFn = dyn Fn(&mut Scanner<'_>) -> Result<Box<dyn Any>>;
type ApplyFn = dyn Fn(&mut dyn View, Box<dyn Any>);
type AttachedFn = dyn Fn(&mut dyn View, Box<dyn Any>, &LiveContext) -> Result<()>;

/// Type-erased scan function plus the callbacks for each pass.
///
/// Callbacks check the concrete view and value types on entry; a mismatch
/// is a no-op.
#[derive(Clone)]
pub struct Converter {
    scan:           Rc<ScanFn>,
    apply:          Option<Rc<ApplyFn>>,
    apply_attached: Option<Rc<AttachedFn>>,
}

impl Converter {
    fn new(scan: Rc<ScanFn>) -> Self {
        Self { scan, apply: None, apply_attached: None }
    }

    #[inline]
    pub fn applies_at_construction(&self) -> bool {
        self.apply.is_some()
    }

    #[inline]
    pub fn applies_when_attached(&self) -> bool {
        self.apply_attached.is_some()
    }

    /// Scans a value from `scanner` and hands it to this pass's callback.
    pub fn execute(&self, scanner: &mut Scanner<'_>, view: &mut dyn View, pass: Pass<'_>) -> Result<()> {
        let value = (self.scan)(scanner)?;
        match pass {
            Pass::Construction => {
                if let Some(apply) = &self.apply {
                    apply(view, value);
                }
            }
            Pass::Attached(context) => {
                if let Some(apply) = &self.apply_attached {
                    apply(view, value, context)?;
                }
            }
        }
        Ok(())
    }
}

// ── ConverterBuilder ──────────────────────────────────────────────────────

/// Returned by `register`; each `apply*` call installs the converter in the
/// owning table under its property name.
pub struct ConverterBuilder<'r, T, V> {
    table:    &'r mut PropertyRegistration,
    name:     String,
    scan:     Rc<ScanFn>,
    project:  fn(&mut dyn View) -> Option<&mut V>,
    inserted: bool,
    _value:   std::marker::PhantomData<fn() -> T>,
}

impl<'r, T: 'static, V: 'static> ConverterBuilder<'r, T, V> {
    pub(crate) fn new(
        table: &'r mut PropertyRegistration,
        name: &str,
        scan: impl Fn(&mut Scanner<'_>) -> Result<T> + 'static,
        project: fn(&mut dyn View) -> Option<&mut V>,
    ) -> Self {
        let scan: Rc<ScanFn> = Rc::new(move |scanner: &mut Scanner<'_>| {
            scan(scanner).map(|value| Box::new(value) as Box<dyn Any>)
        });
        Self {
            table,
            name: name.to_string(),
            scan,
            project,
            inserted: false,
            _value: std::marker::PhantomData,
        }
    }

    /// Converter slot in the table. The first call replaces whatever an
    /// earlier registration left under the same name.
    fn slot(&mut self) -> &mut Converter {
        let fresh = !std::mem::replace(&mut self.inserted, true);
        let scan = &self.scan;
        match self.table.converters_mut().entry(self.name.clone()) {
            Entry::Occupied(mut slot) => {
                if fresh {
                    slot.insert(Converter::new(Rc::clone(scan)));
                }
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(Converter::new(Rc::clone(scan))),
        }
    }

    /// Callback for the construction pass.
    pub fn apply(mut self, f: impl Fn(&mut V, T) + 'static) -> Self {
        let project = self.project;
        self.slot().apply = Some(Rc::new(move |view: &mut dyn View, value: Box<dyn Any>| {
            if let (Some(target), Ok(value)) = (project(view), value.downcast::<T>()) {
                f(target, *value);
            }
        }));
        self
    }

    /// Callback for the attached pass, with access to the live context.
    pub fn apply_attached(mut self, f: impl Fn(&mut V, T, &LiveContext) -> Result<()> + 'static) -> Self {
        let project = self.project;
        self.slot().apply_attached = Some(Rc::new(
            move |view: &mut dyn View, value: Box<dyn Any>, context: &LiveContext| {
                match (project(view), value.downcast::<T>()) {
                    (Some(target), Ok(value)) => f(target, *value, context),
                    _ => Ok(()),
                }
            },
        ));
        self
    }
}
