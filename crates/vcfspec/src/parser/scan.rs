//! character level scanning: comments, string literals and assignment boundaries
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};

/// Tracks whether we are inside a `"…"` literal
///
/// A backslash escapes the character after it, inside and outside of literals. An escaped backslash therefore
/// does not escape a following quote.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Scanner {
    in_string: bool,
    escape_next: bool,
}

impl Scanner {
    /// Feed the next character
    ///
    /// Returns the character if it is structural: outside of a literal, not escaped and not a quote or backslash.
    pub(crate) fn feed(&mut self, c: char) -> Option<char> {
        if self.escape_next {
            self.escape_next = false;
            return None;
        }

        match c {
            '\\' => {
                self.escape_next = true;
                None
            }
            '"' => {
                self.in_string = !self.in_string;
                None
            }
            _ if self.in_string => None,
            _ => Some(c),
        }
    }
}

/// Remove `#` comments and surrounding whitespace from every line
///
/// The number of lines does not change.
pub(crate) fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| strip_line_comment(line).trim())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line_comment(line: &str) -> &str {
    let mut scanner = Scanner::default();
    for (index, c) in line.char_indices() {
        if scanner.feed(c) == Some('#') {
            return &line[..index];
        }
    }

    line
}

/// Raw text of one top level assignment
#[derive(Debug, PartialEq)]
pub(crate) struct Assignment<'a> {
    /// 1-based line the assignment starts on
    pub line: usize,
    pub name: &'a str,
    /// Everything after `=`, possibly spanning several lines
    pub value: String,
}

/// Split comment-free text into top level `name = value` assignments
///
/// A line only starts a new assignment while all brackets of the previous value are closed, so the
/// `key = value` lines inside a multi-line object stay part of that object. Brackets are only counted for values
/// that start with `[` or `{`.
///
/// A value whose brackets never close is cut back to the lines before the next `name =` line and reported, the
/// assignments after it are segmented as usual.
pub(crate) fn segment<'a>(text: &'a str, diagnostics: &mut Diagnostics) -> Vec<Assignment<'a>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut assignments: Vec<Assignment> = vec![];
    let mut from = 0;

    while let Some(open) = split(&lines, from, &mut assignments, diagnostics) {
        let Some(unbalanced) = assignments.last_mut() else {
            break;
        };
        diagnostics.log(Diagnostic::new(
            unbalanced.line,
            Some(unbalanced.name.to_string()),
            DiagnosticKind::UnbalancedValue,
        ));

        let first_line = unbalanced.value.find('\n').unwrap_or(unbalanced.value.len());
        unbalanced.value.truncate(first_line);

        from = open + 1;
        while let Some(line) = lines.get(from).filter(|line| assignment_start(line).is_none()) {
            unbalanced.value.push('\n');
            unbalanced.value.push_str(line);
            from += 1;
        }
        tracing::debug!(
            name = unbalanced.name,
            line = unbalanced.line,
            resume = from + 1,
            "unbalanced value cut at next assignment"
        );
    }

    assignments
}

/// Depth-aware segmentation of `lines[from..]`
///
/// Returns the index of the line that started the last assignment if its brackets are still open at the end.
fn split<'a>(
    lines: &[&'a str],
    from: usize,
    assignments: &mut Vec<Assignment<'a>>,
    diagnostics: &mut Diagnostics,
) -> Option<usize> {
    let mut depth = 0;
    let mut open = None;

    for (index, line) in lines.iter().enumerate().skip(from) {
        let line_number = index + 1;

        if depth == 0 {
            if let Some((name, value)) = assignment_start(line) {
                tracing::trace!(name, line = line_number, "assignment");
                depth = if opens_brackets(value) {
                    nesting(value, 0)
                } else {
                    0
                };
                open = Some(index);
                assignments.push(Assignment {
                    line: line_number,
                    name,
                    value: value.to_string(),
                });
                continue;
            }
        }

        match assignments.last_mut() {
            Some(current) => {
                current.value.push('\n');
                current.value.push_str(line);
                if depth > 0 {
                    depth = nesting(line, depth);
                }
            }
            None if !line.is_empty() => diagnostics.log(Diagnostic::new(
                line_number,
                None,
                DiagnosticKind::StrayLine(line.to_string()),
            )),
            None => {}
        }
    }

    open.filter(|_| depth > 0)
}

fn opens_brackets(value: &str) -> bool {
    let value = value.trim_start();
    value.starts_with('[') || value.starts_with('{')
}

/// Match `identifier =` at the start of a line, returns the identifier and the text after `=`
fn assignment_start(line: &str) -> Option<(&str, &str)> {
    let mut chars = line.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return None,
    }

    let end = chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(index, _)| index)
        .unwrap_or(line.len());

    let name = &line[..end];
    let rest = line[end..].trim_start();
    let value = rest.strip_prefix('=')?;
    if value.starts_with('=') {
        return None;
    }

    Some((name, value))
}

/// Bracket depth after `line`, starting at `depth`
///
/// Literals do not carry over between lines. Stray closing brackets never take the depth below zero.
fn nesting(line: &str, mut depth: usize) -> usize {
    let mut scanner = Scanner::default();
    for c in line.chars() {
        match scanner.feed(c) {
            Some('[' | '{') => depth += 1,
            Some(']' | '}') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    depth
}
