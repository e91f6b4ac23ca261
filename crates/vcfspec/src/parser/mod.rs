//! tfvars parser
//!
//! Parsing happens in three steps:
//! 1. `#` comments are stripped line by line ([scan::strip_comments])
//! 2. the text is split into top level `name = value` assignments ([scan::segment])
//! 3. each right-hand side is classified into a [Value] ([classify::classify])
//!
//! The parser never fails. Input it cannot make sense of ends up as a string value or is skipped, in both cases a
//! [Diagnostic] is recorded.
mod classify;
mod scan;

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::variables::Variables;

/// Result of [parse]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub variables: Variables,
    pub diagnostics: Diagnostics,
}

/// Parse a tfvars document
///
/// A variable assigned more than once keeps the last value.
#[tracing::instrument(level = "trace", skip_all)]
pub fn parse(text: &str) -> Parsed {
    let mut parsed = Parsed::default();

    let cleaned = scan::strip_comments(text);
    let assignments = scan::segment(&cleaned, &mut parsed.diagnostics);

    for assignment in assignments {
        let mut reporter = Reporter::new(
            assignment.line,
            assignment.name,
            &mut parsed.diagnostics,
        );
        let value = classify::classify(&assignment.value, &mut reporter);
        tracing::trace!(name = assignment.name, kind = value.kind(), "classified");

        if let Some(previous) = parsed.variables.insert(assignment.name, value) {
            tracing::debug!(
                name = assignment.name,
                line = assignment.line,
                previous = previous.kind(),
                "variable reassigned"
            );
        }
    }

    parsed
}

/// Records diagnostics for the assignment currently being classified
#[derive(derive_new::new)]
pub(crate) struct Reporter<'a> {
    line: usize,
    variable: &'a str,
    diagnostics: &'a mut Diagnostics,
}

impl Reporter<'_> {
    pub(crate) fn report(&mut self, kind: DiagnosticKind) {
        self.diagnostics.log(Diagnostic::new(
            self.line,
            Some(self.variable.to_string()),
            kind,
        ));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar_assignments() {
        let parsed = parse("name = \"x\"\ncount = 42\nratio = 3.5\nflag = true\nnothing = null");

        let expected: Variables = [
            ("name", Value::from("x")),
            ("count", 42_i64.into()),
            ("ratio", 3.5.into()),
            ("flag", true.into()),
            ("nothing", Value::Null),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        assert_eq!(parsed.variables, expected);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn hash_inside_string_is_kept() {
        let parsed = parse("foo = \"a#b\" # trailing");
        assert_eq!(parsed.variables.get("foo"), Some(&"a#b".into()));
    }

    #[test]
    fn last_assignment_wins() {
        let parsed = parse("a = 1\na = 2");
        assert_eq!(parsed.variables.len(), 1);
        assert_eq!(parsed.variables.get("a"), Some(&2_i64.into()));
    }

    #[test]
    fn empty_and_comment_only_input() {
        assert_eq!(parse(""), Parsed::default());
        assert_eq!(parse("# nothing\n\n   \n# here"), Parsed::default());
    }

    #[test]
    fn multi_line_list_of_objects() {
        let text = r#"
mgmt_esxi_hosts = [
  {
    hostname       = "esx01.vcf.lab"   # first
    password       = "VMware123!"
    ssl_thumbprint = ""
  },
  {
    hostname = "esx02.vcf.lab"
  },
]
ntp_servers = ["10.1.1.1", "10.1.1.2"]
"#;
        let parsed = parse(text);
        assert!(parsed.diagnostics.is_empty());

        let hosts = parsed.variables.get("mgmt_esxi_hosts").unwrap();
        let hosts = hosts.as_list().unwrap();
        assert_eq!(hosts.len(), 2);

        let first = hosts[0].as_object().unwrap();
        assert_eq!(first.get("hostname"), Some(&"esx01.vcf.lab".into()));
        assert_eq!(first.get("ssl_thumbprint"), Some(&"".into()));
        assert_eq!(
            parsed.variables.get("ntp_servers"),
            Some(&vec!["10.1.1.1", "10.1.1.2"].into())
        );
    }

    #[test]
    fn top_level_object() {
        let parsed = parse("pool = {\n  name = \"tep\"\n  size = 4\n}\nafter = 1");
        let pool = parsed.variables.get("pool").and_then(Value::as_object).unwrap();

        assert_eq!(pool.get("name"), Some(&"tep".into()));
        assert_eq!(pool.get("size"), Some(&4_i64.into()));
        assert_eq!(parsed.variables.get("after"), Some(&1_i64.into()));
    }

    #[test]
    fn diagnostics_point_at_the_assignment() {
        let parsed = parse("a = 1\n\nsize = medium\nb = 2");

        assert_eq!(parsed.variables.get("size"), Some(&"medium".into()));
        assert_eq!(parsed.variables.get("b"), Some(&2_i64.into()));

        let issues: Vec<_> = parsed.diagnostics.iter().collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 3);
        assert_eq!(issues[0].variable.as_deref(), Some("size"));
    }

    #[test]
    fn unclosed_list_does_not_swallow_later_assignments() {
        let parsed = parse(
            "ntp_servers = [\"10.0.0.2\", \"10.0.0.3\"\ninstance_id = \"lab01\"\nmgmt_vcenter_hostname = \"vc01\"\n",
        );

        assert_eq!(
            parsed.variables.get("ntp_servers"),
            Some(&vec!["10.0.0.2", "10.0.0.3"].into())
        );
        assert_eq!(parsed.variables.get("instance_id"), Some(&"lab01".into()));
        assert_eq!(
            parsed.variables.get("mgmt_vcenter_hostname"),
            Some(&"vc01".into())
        );
        assert_eq!(
            parsed.diagnostics.kinds().collect::<Vec<_>>(),
            [&DiagnosticKind::UnbalancedValue, &DiagnosticKind::UnclosedList]
        );
    }

    #[test]
    fn brace_in_bare_word_is_not_nesting() {
        let parsed = parse("mgmt_vcenter_vm_size = medium{\ninstance_id = \"lab01\"\n");

        assert_eq!(
            parsed.variables.get("mgmt_vcenter_vm_size"),
            Some(&"medium{".into())
        );
        assert_eq!(parsed.variables.get("instance_id"), Some(&"lab01".into()));
    }
}
