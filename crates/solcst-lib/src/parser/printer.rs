//! Indented text dump of a parse tree.

use std::fmt::Write;

use rowan::NodeOrToken;

use super::Parse;
use super::cst::{SyntaxElement, SyntaxNode};

/// ```text
/// SourceFile
///   ContractDeclaration
///     ContractKw "contract"
///     name: Identifier "C"
/// ```
pub struct CstPrinter<'p> {
    parse: &'p Parse,
    trivia: bool,
    spans: bool,
    fields: bool,
}

impl<'p> CstPrinter<'p> {
    pub fn new(parse: &'p Parse) -> Self {
        Self {
            parse,
            trivia: false,
            spans: false,
            fields: true,
        }
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn with_fields(mut self, value: bool) -> Self {
        self.fields = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    /// Dumps the subtree rooted at `node`, which must belong to this parse.
    pub fn dump_node(&self, node: &SyntaxNode) -> String {
        let mut out = String::new();
        self.format_cst(node, 0, &mut out)
            .expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_cst(&self.parse.syntax(), 0, w)
    }

    fn format_cst(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let label = self.field_label(&NodeOrToken::Node(node.clone()));
        let span = self.span_str(node.text_range());

        writeln!(w, "{}{}{:?}{}", prefix, label, node.kind(), span)?;

        for child in node.children_with_tokens() {
            match &child {
                NodeOrToken::Node(n) => self.format_cst(n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        let child_prefix = "  ".repeat(indent + 1);
                        let child_span = self.span_str(t.text_range());
                        writeln!(
                            w,
                            "{}{}{:?}{} {:?}",
                            child_prefix,
                            self.field_label(&child),
                            t.kind(),
                            child_span,
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn field_label(&self, element: &SyntaxElement) -> String {
        if !self.fields {
            return String::new();
        }
        self.parse
            .field(element)
            .map(|field| format!("{}: ", field))
            .unwrap_or_default()
    }

    fn span_str(&self, range: rowan::TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(
            " [{}..{}]",
            u32::from(range.start()),
            u32::from(range.end())
        )
    }
}
