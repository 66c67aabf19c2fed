//! Diagnostics and error reporting for settings files
//!
//! Hard errors stop loading. Warnings (such as values pulled back into
//! range) are collected here and shown to the user alongside the result.

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A single message, optionally tied to a 1-based source line
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub line: Option<usize>,
}

impl Diagnostic {
    /// A settings error as shown next to the running simulation
    pub fn from_config_error(error: &ConfigError) -> Self {
        Self::error(error.to_string(), error.line())
    }

    pub fn error(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            line,
        }
    }

    pub fn warning(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            message: message.into(),
            line,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        match self.line {
            Some(line) => write!(f, "{} (line {}): {}", level, line, self.message),
            None => write!(f, "{}: {}", level, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Format a config error with the offending source line
pub fn format_config_error(error: &ConfigError, source: &str) -> String {
    let mut msg = format!("Settings error: {}", error);

    if let Some(line) = error.line() {
        if let Some(text) = source.lines().nth(line.saturating_sub(1)) {
            msg.push_str(&format!("\n  at line {}: {}", line, text.trim_end()));
        }
    }

    msg
}
