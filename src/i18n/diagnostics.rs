//! Non-fatal diagnostics
//!
//! Malformed source entries and swallowed cache or load failures are
//! reported through a [`DiagnosticSink`] instead of failing the call that
//! encountered them. The default sink writes them to the log; tests and
//! tooling can collect them instead.

use std::fmt;
use parking_lot::Mutex;
use tracing::warn;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A source key flattened to something outside the key grammar.
    InvalidKey { parent: Option<String> },
    /// A source value that cannot become a translation (e.g. a list).
    InvalidValue { key: String },
    /// A selected source document was missing or could not be parsed.
    SourceSkipped { file: String },
    CacheReadFailed,
    CacheCorrupted,
    CacheDeleteFailed,
    CacheWriteFailed,
    /// Loading a language failed during a lookup that then fell through.
    LanguageLoadFailed,
}

/// A single non-fatal issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub language: Option<String>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(language: Option<&str>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            language: language.map(str::to_string),
            kind,
            message: message.into(),
        }
    }

    pub fn for_language(language: &str, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Some(language), kind, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(language) => write!(f, "Language [{}]: {}", language, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Receiver of non-fatal diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Sink that logs every diagnostic at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        warn!(
            language = diagnostic.language.as_deref().unwrap_or("~"),
            kind = ?diagnostic.kind,
            "{}",
            diagnostic.message
        );
    }
}

/// Sink that keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Drain everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }

    /// Number of reported diagnostics matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DiagnosticKind) -> bool) -> usize {
        self.diagnostics.lock().iter().filter(|d| predicate(&d.kind)).count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}
