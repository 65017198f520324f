//! Diagnostics: failures as values.
//!
//! Nothing in the pipeline panics or logs its way out of trouble; every
//! validation or resolution failure becomes a [`Diagnostic`], and a
//! declaration's failures travel together as one [`Diagnostics`]
//! aggregate.

use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::declaration::Declaration;

/// One validation or resolution failure.
///
/// Carries the offending declaration where there is one; tool-argument
/// failures have none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    declaration: Option<Box<Declaration>>,
    message: String,
}

impl Diagnostic {
    /// A diagnostic attached to a declaration.
    pub fn attached(declaration: &Declaration, message: impl Into<String>) -> Self {
        Self {
            declaration: Some(Box::new(declaration.clone())),
            message: message.into(),
        }
    }

    /// A diagnostic with no originating declaration (tool-argument
    /// errors).
    pub fn detached(message: impl Into<String>) -> Self {
        Self {
            declaration: None,
            message: message.into(),
        }
    }

    /// The offending declaration, if any.
    #[must_use]
    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_deref()
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.declaration {
            Some(declaration) => write!(f, "{}: {}", declaration.describe(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for Diagnostic {}

/// The ordered failures of one pipeline stage or batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// An empty aggregate.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Appends every diagnostic from `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Whether no diagnostics were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of collected diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the collected diagnostics in order.
    #[must_use = "iterators should be consumed to inspect diagnostics"]
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self(diagnostics)
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {diagnostic}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for Diagnostics {}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::Declaration;
    use crate::types::QualifiedName;

    #[test]
    fn display_numbers_entries() {
        let decl = Declaration::annotated_class(QualifiedName::top_level("com.acme", "Point"));
        let mut all = Diagnostics::new();
        all.push(Diagnostic::attached(&decl, "first failure"));
        all.push(Diagnostic::detached("second failure"));

        let rendered = all.to_string();
        assert_eq!(
            rendered,
            "1: class com.acme.Point: first failure\n2: second failure"
        );
    }

    #[test]
    fn detached_diagnostic_has_no_declaration() {
        let diagnostic = Diagnostic::detached("bad tool argument");
        assert!(diagnostic.declaration().is_none());
        assert_eq!(diagnostic.to_string(), "bad tool argument");
    }
}
