//! Solcst: lossless concrete syntax trees for Solidity and inline Yul.
//!
//! # Example
//!
//! ```
//! use solcst_lib::{Field, SyntaxKind};
//!
//! let source = "contract C { uint256 public x; }";
//! let parse = solcst_lib::parse(source);
//! assert!(parse.diagnostics().is_empty());
//!
//! let contract = parse.syntax().first_child().unwrap();
//! assert_eq!(contract.kind(), SyntaxKind::ContractDeclaration);
//!
//! let name = parse.child_by_field(&contract, Field::Name).unwrap();
//! assert_eq!(name.to_string(), "C");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use parser::{
    CstPrinter, Field, Parse, ParseOptions, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken,
    lex, parse, parse_with,
};

/// Errors surfaced to callers that want a strict result instead of a tree with diagnostics.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The source parsed, but the tree contains syntax errors.
    #[error("parsing failed with {} errors", .0.error_count())]
    SyntaxErrors(Diagnostics),
}

/// Result type for strict parsing.
pub type Result<T> = std::result::Result<T, Error>;
