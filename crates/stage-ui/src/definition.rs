use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use stage_dsl::{parse_str, Declaration, Document, Result, StageError};

use crate::context::{LiveContext, ViewMapping};
use crate::factory::ErrorListener;
use crate::registrar::PropertyRegistrar;

/// A compiled document paired with the registrar its properties resolve
/// against.
///
/// Cloning is cheap: the document and registrar are shared.
#[derive(Clone)]
pub struct Definition {
    document:  Rc<Document>,
    registrar: Rc<PropertyRegistrar>,
    listener:  Option<Rc<dyn ErrorListener>>,
}

impl Definition {
    pub fn new(document: Document, registrar: Rc<PropertyRegistrar>) -> Self {
        Self { document: Rc::new(document), registrar, listener: None }
    }

    /// Parses `source` and wraps the result.
    pub fn compile(source: &str, identifier: &str, registrar: Rc<PropertyRegistrar>) -> Result<Self> {
        Ok(Self::new(parse_str(source, identifier)?, registrar))
    }

    /// Errors from loading and from live contexts created here are passed to
    /// `listener` before being returned.
    pub fn with_listener(mut self, listener: Rc<dyn ErrorListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    pub fn registrar(&self) -> &PropertyRegistrar {
        &self.registrar
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        self.document.identifier()
    }

    #[inline]
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.document.get(name)
    }

    /// Declaration for `name`, created empty if absent. Copies the document
    /// first if a live context still shares it.
    pub fn declaration_mut(&mut self, name: &str) -> &mut Declaration {
        Rc::make_mut(&mut self.document).declaration_mut(name)
    }

    /// Names of the declarations that own a view tree.
    pub fn hierarchy_names(&self) -> impl Iterator<Item = &str> {
        self.document
            .declarations()
            .filter(|d| d.hierarchy().is_some())
            .map(Declaration::name)
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Builds the views of the hierarchy declared by `name`.
    pub fn load(&self, name: &str) -> Result<LiveContext> {
        self.load_templated(name, BTreeMap::new())
    }

    /// Like [`load`](Self::load) with `data` bound before the construction pass.
    pub fn load_templated(&self, name: &str, data: BTreeMap<String, String>) -> Result<LiveContext> {
        log::debug!("loading '{name}' from {}", self.identifier());
        LiveContext::new(self.clone(), name, data).map_err(|err| self.report(err))
    }

    /// Loads `name` and extracts the views `M` asks for.
    pub fn load_with<M: ViewMapping>(&self, name: &str) -> Result<(LiveContext, M)> {
        let context = self.load(name)?;
        let mapping = context.map::<M>().map_err(|err| self.report(err))?;
        Ok((context, mapping))
    }

    /// Hands `err` to the listener, if any, and gives it back.
    pub fn report(&self, err: StageError) -> StageError {
        if let Some(listener) = &self.listener {
            listener.on_error(&err);
        }
        err
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("identifier", &self.identifier())
            .field("declarations", &self.document.names().collect::<Vec<_>>())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
