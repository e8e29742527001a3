use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;

use stage_dsl::{parse_str, Annotate, Result, StageError};

use crate::definition::Definition;
use crate::registrar::PropertyRegistrar;
use crate::widgets::load_defaults;

// ── Listeners ─────────────────────────────────────────────────────────────

/// Receives every error a factory, definition, or live context returns.
pub trait ErrorListener {
    fn on_error(&self, error: &StageError);
}

/// Logs the full report at `error` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorListener;

impl ErrorListener for LogErrorListener {
    fn on_error(&self, error: &StageError) {
        log::error!("{}", error.report());
    }
}

/// Keeps rendered reports in memory, oldest first.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: RefCell<Vec<String>>,
}

impl ErrorLog {
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ErrorListener for ErrorLog {
    fn on_error(&self, error: &StageError) {
        self.entries.borrow_mut().push(error.report());
    }
}

// ── DefinitionFactory ─────────────────────────────────────────────────────

/// Compiles definitions from text, bytes, or files against one registrar.
///
/// ```rust,no_run
/// use stage_ui::prelude::*;
///
/// let factory = DefinitionFactory::new();
/// let definition = factory.build_file("screens/login.stage")?;
/// let mut context = definition.load("Login")?;
/// context.attach(view_ref(Container::default()))?;
/// # Ok::<(), stage_dsl::StageError>(())
/// ```
pub struct DefinitionFactory {
    registrar: Rc<PropertyRegistrar>,
    listener:  Option<Rc<dyn ErrorListener>>,
}

impl Default for DefinitionFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionFactory {
    /// Stock view classes registered; errors are logged.
    pub fn new() -> Self {
        let mut registrar = PropertyRegistrar::new();
        load_defaults(&mut registrar);
        Self::with_registrar(registrar)
    }

    /// Uses `registrar` as is, without the stock classes.
    pub fn with_registrar(registrar: PropertyRegistrar) -> Self {
        Self { registrar: Rc::new(registrar), listener: Some(Rc::new(LogErrorListener)) }
    }

    /// Adds host classes and properties.
    pub fn register_types(mut self, f: impl FnOnce(&mut PropertyRegistrar)) -> Self {
        f(Rc::make_mut(&mut self.registrar));
        self
    }

    pub fn use_listener(mut self, listener: Rc<dyn ErrorListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Errors are returned without being forwarded anywhere.
    pub fn without_listener(mut self) -> Self {
        self.listener = None;
        self
    }

    #[inline]
    pub fn registrar(&self) -> &PropertyRegistrar {
        &self.registrar
    }

    // ── Building ──────────────────────────────────────────────────────────

    pub fn build_str(&self, source: &str, identifier: &str) -> Result<Definition> {
        self.compile(source, identifier).map_err(|err| self.report(err))
    }

    /// `bytes` must be UTF-8.
    pub fn build_bytes(&self, bytes: &[u8], identifier: &str) -> Result<Definition> {
        self.compile_bytes(bytes, identifier).map_err(|err| self.report(err))
    }

    /// Reads and compiles the file at `path`; its file name becomes the
    /// document identifier.
    pub fn build_file(&self, path: impl AsRef<Path>) -> Result<Definition> {
        let path = path.as_ref();
        let identifier = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let bytes = std::fs::read(path)
            .map_err(|err| not_available(path, &err))
            .map_err(|err| self.report(err))?;
        log::debug!("read {} byte(s) from {}", bytes.len(), path.display());
        self.build_bytes(&bytes, &identifier)
    }

    fn compile_bytes(&self, bytes: &[u8], identifier: &str) -> Result<Definition> {
        let source = std::str::from_utf8(bytes).map_err(|err| {
            StageError::invalid_encoding(format!("{identifier} is not valid UTF-8 ({err})"))
        })?;
        self.compile(source, identifier)
    }

    fn compile(&self, source: &str, identifier: &str) -> Result<Definition> {
        let document = parse_str(source, identifier).context("while building definition")?;
        let definition = Definition::new(document, Rc::clone(&self.registrar));
        Ok(match &self.listener {
            Some(listener) => definition.with_listener(Rc::clone(listener)),
            None => definition,
        })
    }

    fn report(&self, err: StageError) -> StageError {
        if let Some(listener) = &self.listener {
            listener.on_error(&err);
        }
        err
    }
}

fn not_available(path: &Path, err: &io::Error) -> StageError {
    let message = match err.kind() {
        io::ErrorKind::NotFound => "no such file".to_string(),
        _ => err.to_string(),
    };
    StageError::resource_not_available(path.display().to_string(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    use crate::view::{view_ref, View, ViewClass};
    use crate::widgets::Container;
    use stage_dsl::ErrorKind;

    fn logged() -> (DefinitionFactory, Rc<ErrorLog>) {
        let log = Rc::new(ErrorLog::default());
        let listener: Rc<dyn ErrorListener> = log.clone();
        (DefinitionFactory::new().use_listener(listener), log)
    }

    #[test]
    fn parse_error_is_annotated_and_forwarded() {
        let (factory, log) = logged();
        let err = factory.build_str("stray text\n", "broken").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnrecognizedContent { line: 1, .. }));
        assert_eq!(err.trail(), ["while parsing broken", "while building definition"]);
        assert_eq!(log.len(), 1);
        assert!(log.entries()[0].ends_with("  ...while building definition"));

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let (factory, log) = logged();
        let err = factory.build_bytes(&[b'M', 0xff, 0xfe, b':'], "bytes").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidDataEncoding { .. }));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn missing_file_is_not_available() {
        let (factory, log) = logged();
        let err = factory.build_file("/definitely/not/here.stage").unwrap_err();
        match err.kind() {
            ErrorKind::ResourceNotAvailable { name, message } => {
                assert_eq!(name, "/definitely/not/here.stage");
                assert_eq!(message, "no such file");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("stage-factory-{}.stage", std::process::id()));
        std::fs::write(&path, "Main:\n  Title\n\nTitle:\n  .class = Label\n  .text = From disk\n").unwrap();

        let definition = DefinitionFactory::new().without_listener().build_file(&path);
        std::fs::remove_file(&path).unwrap();

        let definition = definition.unwrap();
        assert!(definition.identifier().starts_with("stage-factory-"));
        let mut context = definition.load("Main").unwrap();
        context.attach(view_ref(Container::default())).unwrap();
        let text = context.with_view::<crate::widgets::Label, _>("Title", |l| l.text.clone()).unwrap();
        assert_eq!(text, "From disk");
    }

    #[derive(Default)]
    struct Gauge {
        base:  Container,
        level: i64,
    }

    impl ViewClass for Gauge {
        const CLASS: &'static str = "Gauge";
        const SUPERCLASS: Option<&'static str> = Some("Container");
    }

    impl View for Gauge {
        fn class_name(&self) -> &'static str {
            Self::CLASS
        }
        fn as_class(&self, class: &str) -> Option<&dyn Any> {
            if class == Self::CLASS { Some(self) } else { self.base.as_class(class) }
        }
        fn as_class_mut(&mut self, class: &str) -> Option<&mut dyn Any> {
            if class == Self::CLASS { Some(self) } else { self.base.as_class_mut(class) }
        }
        fn container(&self) -> &Container {
            &self.base
        }
        fn container_mut(&mut self) -> &mut Container {
            &mut self.base
        }
    }

    #[test]
    fn host_types_take_part_in_realization() {
        let factory = DefinitionFactory::new().without_listener().register_types(|r| {
            r.register_class::<Gauge>();
            r.register::<Gauge, _>("level", |s| s.scan_int()).apply(|g, v| g.level = v);
        });
        assert!(factory.registrar().has_class("Label"));

        let source = "Main:\n  G\nG:\n  .class = Gauge\n  .level = 7\n  .alpha = 0.5\n";
        let context = factory.build_str(source, "gauge").unwrap().load("Main").unwrap();
        let (level, alpha) = context.with_view::<Gauge, _>("G", |g| (g.level, g.base.alpha)).unwrap();
        assert_eq!((level, alpha), (7, 0.5));
    }
}
