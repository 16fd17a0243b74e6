//! Parser infrastructure for Solidity and inline Yul.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy lexing: tokens carry spans, text is sliced only when building the tree
//! - Trivia buffering: whitespace and comments are collected, then attached as leading trivia
//! - Checkpoint-based wrapping: binary operators and postfix chains wrap their left side
//!   retroactively
//! - Fields in a side table: a child's role (`left`, `body`, `name`) is recorded against its
//!   kind and range, since Rowan nodes carry no per-child data
//! - Bounded lookahead: ambiguous prefixes are settled by scanning tokens before any node of
//!   either alternative is opened
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree covering every input byte.
//!
//! 1. Unexpected tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Statement, member and top-level loops resynchronize at their own keyword sets
//! 4. On recursion limit, remaining input goes into a single Error node

pub mod ast;
pub mod cst;
pub mod fields;
pub mod keywords;
pub mod lexer;
pub mod printer;

mod core;
mod grammar;
mod invariants;
mod lookahead;

#[cfg(test)]
mod tests;

pub use cst::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use fields::{Field, FieldTable};
pub use lexer::{Token, lex};
pub use lookahead::Conflict;
pub use printer::CstPrinter;

use rowan::GreenNode;

use crate::diagnostics::Diagnostics;
use core::Parser;

/// Resource limits for one parse. No dialect switches: every supported version parses at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of statements, expressions and types.
    pub recursion_limit: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recursion_limit: 256,
        }
    }
}

/// Parse result: the green tree, its field table and the diagnostics.
///
/// The tree is always complete, diagnostics are returned separately.
/// Error nodes in the tree represent recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    fields: FieldTable,
    diagnostics: Diagnostics,
}

impl Parse {
    pub fn as_cst(&self) -> &GreenNode {
        &self.green
    }

    /// Creates a typed view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn source_file(&self) -> Option<ast::SourceFile> {
        ast::SourceFile::cast(self.syntax())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// The field `element` fills in its parent, if any.
    pub fn field(&self, element: &SyntaxElement) -> Option<Field> {
        self.fields.of(element)
    }

    pub fn child_by_field(&self, node: &SyntaxNode, field: Field) -> Option<SyntaxElement> {
        self.children_by_field(node, field).next()
    }

    pub fn children_by_field<'a>(
        &'a self,
        node: &SyntaxNode,
        field: Field,
    ) -> impl Iterator<Item = SyntaxElement> + 'a {
        node.children_with_tokens()
            .filter(move |child| self.field(child) == Some(field))
    }

    /// Warnings for repeated or contradicting modifiers. The tree itself accepts any order.
    pub fn validate_modifiers(&self) -> Diagnostics {
        grammar::validate_modifiers(&self.syntax())
    }

    pub fn printer(&self) -> CstPrinter<'_> {
        CstPrinter::new(self)
    }

    /// Strict view: `Err` when the tree contains syntax errors. Warnings pass.
    pub fn into_result(self) -> crate::Result<Parse> {
        if self.diagnostics.has_errors() {
            return Err(crate::Error::SyntaxErrors(self.diagnostics));
        }
        Ok(self)
    }
}

/// Main entry point with default options.
pub fn parse(source: &str) -> Parse {
    parse_with(source, ParseOptions::default())
}

pub fn parse_with(source: &str, options: ParseOptions) -> Parse {
    let tokens = lex(source);
    tracing::debug!(bytes = source.len(), tokens = tokens.len(), "parse start");

    let mut parser = Parser::new(source, tokens).with_recursion_limit(options.recursion_limit);
    parser.parse_root();
    let (green, fields, diagnostics) = parser.finish();

    tracing::debug!(
        fields = fields.len(),
        diagnostics = diagnostics.len(),
        "parse end"
    );
    Parse {
        green,
        fields,
        diagnostics,
    }
}
