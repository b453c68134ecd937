//! Diagnostics produced while resolving a schema.
//!
//! Diagnostics describe schema-authoring problems that do not prevent a
//! model from being built. They carry no source positions, only text.

use std::fmt;

use serde::Serialize;
use tracing::debug;

/// How badly a diagnostic affects the resulting model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The model is likely wrong where this was reported.
    Error,
    /// Cosmetic gap, the model is still meaningful.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// A single message with its severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Ordered, append-only collection of diagnostics for one load.
///
/// # Examples
///
/// ```
/// use build_schema_core::{Diagnostics, Severity};
///
/// let mut diags = Diagnostics::new();
/// diags.warning("unknown key 'foo'");
/// diags.error("custom type 'Color' is not defined");
///
/// assert!(diags.has_errors());
/// assert_eq!(diags.len(), 2);
/// assert_eq!(diags.iter().next().unwrap().severity, Severity::Warning);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        debug!(%severity, %message, "schema diagnostic");
        self.entries.push(Diagnostic { message, severity });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let mut diags = Diagnostics::new();
        diags.error("first");
        diags.warning("second");
        diags.error("third");

        let messages: Vec<&str> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(diags.error_count(), 2);
        assert_eq!(diags.warning_count(), 1);
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic {
            message: "unknown key 'x'".into(),
            severity: Severity::Warning,
        };
        assert_eq!(diag.to_string(), "warning: unknown key 'x'");
    }
}
