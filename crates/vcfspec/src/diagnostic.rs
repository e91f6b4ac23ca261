//! recoverable parse issues
//!
//! Parsing never aborts. Whenever the parser has to guess or drop input it records a [Diagnostic] and moves on.
//! Each diagnostic is also emitted as a `tracing` warning when it is logged.

/// A single recoverable issue
#[derive(derive_new::new, Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line of the assignment (or stray line) the issue belongs to
    pub line: usize,
    /// Variable that was being parsed, if any
    pub variable: Option<String>,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.variable {
            Some(variable) => write!(f, "line {} ({variable}): {}", self.line, self.kind),
            None => write!(f, "line {}: {}", self.line, self.kind),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("could not classify `{0}`, keeping it as a string")]
    UnparsableValue(String),
    #[error("nested value of `{0}` is kept as raw text")]
    NestedValue(String),
    #[error("list is missing its closing `]`")]
    UnclosedList,
    #[error("object is missing its closing `}}`")]
    UnclosedObject,
    #[error("brackets are never closed, value runs to the end of the input")]
    UnbalancedValue,
    #[error("skipped malformed list fragment `{0}`")]
    MalformedFragment(String),
    #[error("skipped object line `{0}`")]
    MalformedObjectLine(String),
    #[error("skipped line outside of any assignment `{0}`")]
    StrayLine(String),
}

/// Collected diagnostics of one parse, in the order they were found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    issues: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn log(&mut self, issue: Diagnostic) {
        tracing::warn!(%issue, "parse issue");
        self.issues.push(issue);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.issues.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &DiagnosticKind> {
        self.issues.iter().map(|issue| &issue.kind)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_names_line_and_variable() {
        let issue = Diagnostic::new(
            3,
            Some("vm_size".into()),
            DiagnosticKind::UnparsableValue("medium".into()),
        );
        assert_eq!(
            issue.to_string(),
            "line 3 (vm_size): could not classify `medium`, keeping it as a string"
        );

        let issue = Diagnostic::new(1, None, DiagnosticKind::StrayLine("oops".into()));
        assert_eq!(
            issue.to_string(),
            "line 1: skipped line outside of any assignment `oops`"
        );
    }

    #[test]
    fn unclosed_object_message_escapes_brace() {
        assert_eq!(
            DiagnosticKind::UnclosedObject.to_string(),
            "object is missing its closing `}`"
        );
    }
}
