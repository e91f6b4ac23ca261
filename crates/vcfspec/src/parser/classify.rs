//! turning right-hand side text into [Value]s
use super::scan::Scanner;
use super::Reporter;
use crate::diagnostic::DiagnosticKind;
use crate::value::{Number, Object, Value};

/// Classify the right-hand side of a top level assignment
///
/// Precedence: bool, null, quoted string, list, object, number. Anything left over becomes a string.
pub(crate) fn classify(text: &str, reporter: &mut Reporter) -> Value {
    let text = text.trim();

    if let Some(flag) = keyword_bool(text) {
        return Value::Bool(flag);
    }

    if text.eq_ignore_ascii_case("null") {
        return Value::Null;
    }

    if let Some(inner) = unquote(text) {
        return Value::String(inner.to_string());
    }

    if text.starts_with('[') {
        return list(text, reporter);
    }

    if text.starts_with('{') {
        return Value::Object(object(text, reporter));
    }

    if let Some(number) = Number::parse(text) {
        return Value::Number(number);
    }

    reporter.report(DiagnosticKind::UnparsableValue(text.to_string()));
    Value::String(text.trim_matches('"').to_string())
}

fn keyword_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Strip exactly one layer of surrounding quotes, the content is kept verbatim
fn unquote(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// `[…]`
///
/// If a `{` appears anywhere inside, the list is read as a list of objects. Otherwise it is a list of strings.
fn list(text: &str, reporter: &mut Reporter) -> Value {
    let inner = text.strip_prefix('[').unwrap_or(text);
    let inner = inner.strip_suffix(']').unwrap_or_else(|| {
        reporter.report(DiagnosticKind::UnclosedList);
        inner
    });

    if inner.contains('{') {
        Value::List(objects(inner, reporter))
    } else {
        Value::List(strings(inner))
    }
}

/// Split on top level commas, elements are not classified any further
fn strings(inner: &str) -> Vec<Value> {
    let mut items = vec![];
    let mut current = String::new();
    let mut scanner = Scanner::default();
    let mut depth = 0usize;

    for c in inner.chars() {
        match scanner.feed(c) {
            Some('{') => depth += 1,
            Some('}') => depth = depth.saturating_sub(1),
            Some(',') if depth == 0 => {
                push_string(&mut items, &current);
                current.clear();
                continue;
            }
            _ => {}
        }

        current.push(c);
    }
    push_string(&mut items, &current);

    items
}

fn push_string(items: &mut Vec<Value>, raw: &str) {
    let item = raw.trim();
    let item = unquote(item).unwrap_or(item);
    if !item.is_empty() {
        items.push(Value::String(item.to_string()));
    }
}

/// Collect balanced `{…}` chunks, everything between them is dropped
fn objects(inner: &str, reporter: &mut Reporter) -> Vec<Value> {
    let mut objects = vec![];
    let mut current = String::new();
    let mut scanner = Scanner::default();
    let mut depth = 0i64;

    for c in inner.chars() {
        match scanner.feed(c) {
            Some('{') => depth += 1,
            Some('}') => depth -= 1,
            _ => {}
        }

        current.push(c);

        if depth == 0 && !current.trim().is_empty() {
            let chunk = current.trim();
            let chunk = chunk.strip_suffix(',').unwrap_or(chunk).trim_end();
            if chunk.starts_with('{') {
                let object = object(chunk, reporter);
                if object.is_empty() {
                    tracing::trace!(chunk, "dropping empty object");
                } else {
                    objects.push(Value::Object(object));
                }
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        reporter.report(DiagnosticKind::MalformedFragment(rest.to_string()));
    }

    objects
}

/// `{…}`, one `key = value` per line
///
/// Values are scalars only. A value starting with `[` or `{` is kept as its raw text.
fn object(text: &str, reporter: &mut Reporter) -> Object {
    let inner = text.strip_prefix('{').unwrap_or(text);
    let inner = inner.strip_suffix('}').unwrap_or_else(|| {
        reporter.report(DiagnosticKind::UnclosedObject);
        inner
    });

    let mut object = Object::new();
    for line in inner.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            reporter.report(DiagnosticKind::MalformedObjectLine(line.to_string()));
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            reporter.report(DiagnosticKind::MalformedObjectLine(line.to_string()));
            continue;
        }

        let value = value.trim();
        let value = value.strip_suffix(',').unwrap_or(value).trim_end();
        let value = entry(key, value, reporter);
        object.insert(key.to_string(), value);
    }

    object
}

fn entry(key: &str, text: &str, reporter: &mut Reporter) -> Value {
    if let Some(inner) = unquote(text) {
        return Value::String(inner.to_string());
    }

    if let Some(flag) = keyword_bool(text) {
        return Value::Bool(flag);
    }

    if text.eq_ignore_ascii_case("null") {
        return Value::Null;
    }

    if let Some(number) = Number::parse(text) {
        return Value::Number(number);
    }

    if text.starts_with('[') || text.starts_with('{') {
        reporter.report(DiagnosticKind::NestedValue(key.to_string()));
    } else {
        reporter.report(DiagnosticKind::UnparsableValue(text.to_string()));
    }

    Value::String(text.to_string())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diagnostic::Diagnostics;
    use pretty_assertions::assert_eq;

    fn classify_with_diagnostics(text: &str) -> (Value, Diagnostics) {
        let mut diagnostics = Diagnostics::default();
        let value = classify(text, &mut Reporter::new(1, "test", &mut diagnostics));
        (value, diagnostics)
    }

    fn classified(text: &str) -> Value {
        classify_with_diagnostics(text).0
    }

    fn object_of(entries: &[(&str, Value)]) -> Value {
        Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn scalars() {
        assert_eq!(classified("true"), Value::Bool(true));
        assert_eq!(classified("FALSE"), Value::Bool(false));
        assert_eq!(classified("Null"), Value::Null);
        assert_eq!(classified(r#""x""#), Value::from("x"));
        assert_eq!(classified("42"), Value::from(42_i64));
        assert_eq!(classified("0.5"), Value::from(0.5));
        assert_eq!(classified(r#""""#), Value::from(""));
    }

    #[test]
    fn quoted_strings_are_not_unescaped() {
        assert_eq!(classified(r#""a\"b""#), Value::from(r#"a\"b"#));
        assert_eq!(classified(r#""true""#), Value::from("true"));
        assert_eq!(classified(r#""""x""""#), Value::from(r#"""x"""#));
    }

    #[test]
    fn unparsable_value_falls_back_to_string() {
        let (value, diagnostics) = classify_with_diagnostics("medium");
        assert_eq!(value, Value::from("medium"));
        assert_eq!(
            diagnostics.kinds().collect::<Vec<_>>(),
            [&DiagnosticKind::UnparsableValue("medium".into())]
        );

        assert_eq!(classified(r#""half"#), Value::from("half"));
        assert_eq!(classified("10.1.1.1"), Value::from("10.1.1.1"));
    }

    #[test]
    fn simple_list() {
        assert_eq!(
            classified(r#"["a", "b", "c"]"#),
            Value::from(vec!["a", "b", "c"])
        );
        assert_eq!(classified("[]"), Value::List(vec![]));
        assert_eq!(
            classified("[\n\"a\",\n\"b\",\n]"),
            Value::from(vec!["a", "b"])
        );
    }

    #[test]
    fn simple_list_elements_stay_strings() {
        assert_eq!(
            classified(r#"[1, true, "x,y", null]"#),
            Value::from(vec!["1", "true", "x,y", "null"])
        );
    }

    #[test]
    fn simple_list_keeps_escapes() {
        assert_eq!(
            classified(r#"["a\"b", "c"]"#),
            Value::from(vec![r#"a\"b"#, "c"])
        );
    }

    #[test]
    fn unclosed_list_is_reported() {
        let (value, diagnostics) = classify_with_diagnostics(r#"["a", "b""#);
        assert_eq!(value, Value::from(vec!["a", "b"]));
        assert_eq!(
            diagnostics.kinds().collect::<Vec<_>>(),
            [&DiagnosticKind::UnclosedList]
        );
    }

    #[test]
    fn list_of_one_object() {
        assert_eq!(
            classified("[{ name = \"x\"\nvalue = 1 }]"),
            Value::List(vec![object_of(&[
                ("name", "x".into()),
                ("value", 1_i64.into())
            ])])
        );
    }

    #[test]
    fn list_of_objects() {
        let text = "[\n{\nhostname = \"esx01\"\npassword = \"p#1\"\n},\n{\nhostname = \"esx02\"\n}\n]";
        assert_eq!(
            classified(text),
            Value::List(vec![
                object_of(&[("hostname", "esx01".into()), ("password", "p#1".into())]),
                object_of(&[("hostname", "esx02".into())]),
            ])
        );
    }

    #[test]
    fn list_with_any_object_drops_scalars() {
        assert_eq!(
            classified("[\"a\", {\nname = \"x\"\n}, {}]"),
            Value::List(vec![object_of(&[("name", "x".into())])])
        );
    }

    #[test]
    fn braces_in_strings_do_not_split_objects() {
        assert_eq!(
            classified("[{\nname = \"}{\"\n}]"),
            Value::List(vec![object_of(&[("name", "}{".into())])])
        );
    }

    #[test]
    fn unbalanced_object_fragment_is_reported() {
        let (value, diagnostics) = classify_with_diagnostics("[{\nname = \"x\"\n]");
        assert_eq!(value, Value::List(vec![]));
        assert_eq!(
            diagnostics.kinds().collect::<Vec<_>>(),
            [&DiagnosticKind::MalformedFragment("{\nname = \"x\"".into())]
        );
    }

    #[test]
    fn object_entries() {
        let text = "{\nname = \"mgmt\"\nenabled = TRUE\nmtu = 9000,\nratio = 0.5\nnothing = null\n}";
        assert_eq!(
            classified(text),
            object_of(&[
                ("name", "mgmt".into()),
                ("enabled", true.into()),
                ("mtu", 9000_i64.into()),
                ("ratio", 0.5.into()),
                ("nothing", Value::Null),
            ])
        );
    }

    #[test]
    fn object_splits_on_first_equals() {
        assert_eq!(
            classified("{\nquery = \"a=b\"\n}"),
            object_of(&[("query", "a=b".into())])
        );
    }

    #[test]
    fn nested_values_stay_raw() {
        let text = "{\nuplinks = [\"uplink1\", \"uplink2\"]\n}";
        let (value, diagnostics) = classify_with_diagnostics(text);
        assert_eq!(
            value,
            object_of(&[("uplinks", r#"["uplink1", "uplink2"]"#.into())])
        );
        assert_eq!(
            diagnostics.kinds().collect::<Vec<_>>(),
            [&DiagnosticKind::NestedValue("uplinks".into())]
        );
    }

    #[test]
    fn malformed_object_lines_are_skipped() {
        let (value, diagnostics) = classify_with_diagnostics("{\njunk\n= 1\nok = 1\n}");
        assert_eq!(value, object_of(&[("ok", 1_i64.into())]));
        assert_eq!(
            diagnostics.kinds().collect::<Vec<_>>(),
            [
                &DiagnosticKind::MalformedObjectLine("junk".into()),
                &DiagnosticKind::MalformedObjectLine("= 1".into()),
            ]
        );
    }
}
