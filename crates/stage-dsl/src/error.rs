use std::fmt;

use thiserror::Error;

/// What went wrong, independent of where it was noticed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Source bytes were not valid text.
    #[error("invalid data encoding: {message}")]
    InvalidDataEncoding { message: String },

    /// A bound view is not of the requested class.
    #[error("invalid view type: {message}")]
    InvalidViewType { message: String },

    /// An external resource (file, bundle) could not be read.
    #[error("resource '{name}' not available: {message}")]
    ResourceNotAvailable { name: String, message: String },

    /// No converter for the property anywhere in the target's class chain.
    #[error("line {line}: {message}")]
    UnhandledProperty { message: String, line: usize },

    /// A live context has no view bound under the requested name.
    #[error("unknown view: {message}")]
    UnknownView { message: String },

    /// The requested declaration does not own a hierarchy.
    #[error("unknown view hierarchy: {message}")]
    UnknownViewHierarchy { message: String },

    /// Text the parser or a value scanner could not make sense of.
    #[error("line {line}: {message}")]
    UnrecognizedContent { message: String, line: usize },
}

/// An [`ErrorKind`] plus the "while X" trail collected while it unwound.
///
/// The trail is ordered innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct StageError {
    kind: ErrorKind,
    trail: Vec<String>,
}

pub type Result<T> = std::result::Result<T, StageError>;

impl StageError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, trail: Vec::new() }
    }

    // ── Constructors ──────────────────────────────────────────────────────

    pub fn unrecognized(message: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::UnrecognizedContent { message: message.into(), line })
    }

    pub fn unhandled_property(message: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::UnhandledProperty { message: message.into(), line })
    }

    pub fn unknown_view(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownView { message: message.into() })
    }

    pub fn unknown_hierarchy(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownViewHierarchy { message: message.into() })
    }

    pub fn invalid_view_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidViewType { message: message.into() })
    }

    pub fn invalid_encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDataEncoding { message: message.into() })
    }

    pub fn resource_not_available(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceNotAvailable { name: name.into(), message: message.into() })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Appends a context line; the kind is untouched.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.trail.push(context.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[inline]
    pub fn trail(&self) -> &[String] {
        &self.trail
    }

    /// Source line for kinds that carry one.
    pub fn line(&self) -> Option<usize> {
        match &self.kind {
            ErrorKind::UnhandledProperty { line, .. } | ErrorKind::UnrecognizedContent { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Message followed by one `  ...while X` line per trail entry.
    pub fn report(&self) -> String {
        Report(self).to_string()
    }
}

struct Report<'e>(&'e StageError);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.kind)?;
        for context in &self.0.trail {
            write!(f, "\n  ...{context}")?;
        }
        Ok(())
    }
}

/// Adds trail entries to the error side of a [`Result`].
pub trait Annotate<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Lazy variant; the message is only built on failure.
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> Annotate<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
