
use crate::parser::{Parse, SyntaxKind, parse};

impl Parse {
    #[track_caller]
    pub fn expect_valid_cst(src: &str) -> String {
        let parse = Self::expect_valid(src);
        parse.printer().dump()
    }

    #[track_caller]
    pub fn expect_valid_cst_full(src: &str) -> String {
        let parse = Self::expect_valid(src);
        parse.printer().with_trivia(true).with_spans(true).dump()
    }

    /// Dump of the first node of `kind`, for tests that only care about one construct.
    #[track_caller]
    pub fn expect_valid_node(src: &str, kind: SyntaxKind) -> String {
        let parse = Self::expect_valid(src);
        let node = parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == kind)
            .unwrap_or_else(|| panic!("no {:?} node in:\n{}", kind, parse.printer().dump()));
        parse.printer().dump_node(&node)
    }

    /// Filtered diagnostics, one per line.
    #[track_caller]
    pub fn expect_invalid(src: &str) -> String {
        let parse = parse(src);
        if parse.diagnostics().is_empty() {
            panic!(
                "Expected diagnostics, got a clean tree:\n{}",
                parse.printer().dump()
            );
        }
        assert_eq!(parse.syntax().to_string(), src, "tree must cover the input");
        parse
            .diagnostics()
            .filtered()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rendered report, as the CLI prints it.
    #[track_caller]
    pub fn expect_invalid_rendered(src: &str) -> String {
        let parse = parse(src);
        if parse.diagnostics().is_empty() {
            panic!("Expected diagnostics, got a clean tree");
        }
        parse.diagnostics().render_filtered(src)
    }

    #[track_caller]
    fn expect_valid(src: &str) -> Parse {
        let parse = parse(src);
        if !parse.diagnostics().is_empty() {
            panic!(
                "Expected valid source, got error:\n{}",
                parse.diagnostics()
            );
        }
        assert_eq!(parse.syntax().to_string(), src, "tree must cover the input");
        parse
    }
}

/// Wraps statements in a free function so statement tests stay short.
pub(crate) fn in_function(body: &str) -> String {
    format!("function f() {{\n{}\n}}\n", body)
}
