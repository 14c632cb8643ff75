//! csbind_diagnostics: Diagnostic messages reported by generator passes.
//!
//! Passes do not fail when they drop part of the API. They record why,
//! and the driver decides how to present the collected diagnostics.

use csbind_core::source::{SourceLocation, SourceOrigin};
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code, printed as `CSB<code>`.
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The header the diagnostic refers to, if any.
    pub file: Option<String>,
    pub location: Option<SourceLocation>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info (global diagnostic).
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            location: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a diagnostic located at a declaration's source origin.
    pub fn at_origin(origin: &SourceOrigin, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: Some(origin.file.clone()),
            location: origin.location,
            ..Self::new(message, args)
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(location) = self.location {
                write!(f, "({})", location)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} CSB{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated while running passes.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Number of diagnostics carrying the given code.
    pub fn count_code(&self, code: u32) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort diagnostics by file and position. Diagnostics without a file
    /// come first; the sort is stable so pass order is kept for ties.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| a.file.cmp(&b.file).then_with(|| a.location.cmp(&b.location)));
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Declaration filtering (1000-1099)
    // ========================================================================
    pub const IGNORE_UNKNOWN_PARAMETER_TYPE: DiagnosticMessage = diag!(1001, Message, "Ignore: {0}, unknown parameter type {1}");
    pub const IGNORE_UNKNOWN_RETURN_TYPE: DiagnosticMessage = diag!(1002, Message, "Ignore: {0}, unknown return type {1}");
    pub const IGNORE_OPERATOR: DiagnosticMessage = diag!(1003, Message, "Ignore: {0}, operators not supported.");
    pub const IGNORE_UNKNOWN_VARIABLE_TYPE: DiagnosticMessage = diag!(1004, Message, "Ignore: {0}, unknown type {1}");
    pub const IGNORE_UNKNOWN_CLASS: DiagnosticMessage = diag!(1005, Message, "Ignore: {0}, unknown class.");
}
