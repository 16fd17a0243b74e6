//! File level: pragmas, imports and top-level declarations.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{Completed, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::VERSION_OPERATORS;
use crate::parser::fields::Field;
use crate::parser::keywords;
use crate::parser::lookahead;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_root(SyntaxKind::SourceFile);
        while !self.should_stop() {
            self.parse_source_unit();
        }
        self.eat_trivia();
        self.finish_node();
    }

    fn parse_source_unit(&mut self) {
        if !self.currently_is(SyntaxKind::Identifier) {
            self.recover_source_unit();
            return;
        }
        let next = self.nth(1);
        match self.current_text() {
            "pragma" => {
                self.parse_pragma_directive();
            }
            "import" => {
                self.parse_import_directive();
            }
            "contract" => {
                self.parse_contract_declaration();
            }
            "abstract" if self.nth_is_keyword(1, SyntaxKind::ContractKw) => {
                self.parse_contract_declaration();
            }
            "interface" if next == SyntaxKind::Identifier => {
                self.parse_interface_declaration();
            }
            "library" if next == SyntaxKind::Identifier => {
                self.parse_library_declaration();
            }
            "struct" if next == SyntaxKind::Identifier => {
                self.parse_struct_declaration();
            }
            "enum" if next == SyntaxKind::Identifier => {
                self.parse_enum_declaration();
            }
            "event" if next == SyntaxKind::Identifier => {
                self.parse_event_definition();
            }
            "error" if next == SyntaxKind::Identifier && self.nth(2) == SyntaxKind::ParenOpen => {
                self.parse_error_declaration();
            }
            "function" if next == SyntaxKind::Identifier => {
                self.parse_function_definition();
            }
            "using" => {
                self.parse_using_directive();
            }
            "type" if next == SyntaxKind::Identifier && self.nth_is_keyword(2, SyntaxKind::IsKw) => {
                self.parse_user_defined_type_definition();
            }
            _ if lookahead::is_constant_declaration(self) => {
                self.parse_constant_variable_declaration();
            }
            _ => self.recover_source_unit(),
        }
    }

    /// Skips to the next top-level keyword. Lexical error tokens get an `Error` node each.
    fn recover_source_unit(&mut self) {
        if self.current().is_error() {
            self.error_and_bump(DiagnosticKind::ExpectedSourceUnit);
            return;
        }
        tracing::trace!(at = ?self.current_span(), "recovering source unit");
        self.start_node(SyntaxKind::Error);
        self.error(DiagnosticKind::ExpectedSourceUnit);
        self.bump();
        while !self.should_stop()
            && !self.current().is_error()
            && self.at_any_keyword(keywords::TOP_LEVEL).is_none()
        {
            self.bump();
        }
        self.finish_node();
    }

    /// `pragma solidity ^0.8.0;` or a vendor pragma such as `pragma abicoder v2;`.
    fn parse_pragma_directive(&mut self) -> Completed {
        self.start_node(SyntaxKind::PragmaDirective);
        self.bump_keyword(SyntaxKind::PragmaKw);
        if self.at_keyword(SyntaxKind::SolidityKw) {
            self.parse_solidity_pragma_token();
        } else if self.currently_is(SyntaxKind::Identifier) {
            self.parse_any_pragma_token();
        } else {
            self.error(DiagnosticKind::ExpectedIdentifier);
        }
        self.expect_semicolon();
        self.finish_node()
    }

    /// `solidity` followed by constraints, optionally joined by `||` or `-`.
    fn parse_solidity_pragma_token(&mut self) {
        self.start_node(SyntaxKind::SolidityPragmaToken);
        self.bump_keyword(SyntaxKind::SolidityKw);

        let mut constraints = 0;
        while !self.should_stop() {
            let operator = if self.currently_is_one_of(VERSION_OPERATORS) {
                self.start_node(SyntaxKind::SolidityVersionComparisonOperator);
                self.bump();
                Some(self.finish_node())
            } else {
                None
            };
            let Some(version) = self.parse_solidity_version() else {
                if operator.is_some() {
                    self.error(DiagnosticKind::ExpectedVersion);
                }
                break;
            };
            self.tag(Field::VersionConstraint, operator);
            self.tag(Field::VersionConstraint, Some(version));
            constraints += 1;

            if self.currently_is(SyntaxKind::PipePipe) || self.currently_is(SyntaxKind::Minus) {
                self.bump();
            }
        }
        if constraints == 0 {
            self.error(DiagnosticKind::ExpectedVersion);
        }
        self.finish_node();
    }

    /// Glues the pieces the lexer splits a version into: `0.8` `.0`, `0.8` `.` `*`, or
    /// a quoted `"0.4.24"`.
    fn parse_solidity_version(&mut self) -> Option<Completed> {
        match self.current() {
            SyntaxKind::QuotedString => {
                self.start_node(SyntaxKind::SolidityVersion);
                self.bump();
                return Some(self.finish_node());
            }
            SyntaxKind::DecimalNumber | SyntaxKind::Star => {}
            _ => return None,
        }

        self.start_node(SyntaxKind::SolidityVersion);
        let mut after_dot = self.current_text().ends_with('.');
        self.bump();
        loop {
            let kind = self.current();
            let text = self.current_text();
            let glue = if after_dot {
                matches!(kind, SyntaxKind::DecimalNumber | SyntaxKind::Star)
                    || (kind == SyntaxKind::Identifier && matches!(text, "x" | "X"))
            } else {
                kind == SyntaxKind::Dot || (kind == SyntaxKind::DecimalNumber && text.starts_with('.'))
            };
            if !glue {
                break;
            }
            after_dot = kind == SyntaxKind::Dot || text.ends_with('.');
            self.bump();
        }
        Some(self.finish_node())
    }

    /// Vendor pragma: an identifier, then everything up to `;` as `pragma_value`.
    fn parse_any_pragma_token(&mut self) {
        self.start_node(SyntaxKind::AnyPragmaToken);
        self.bump();
        if !self.currently_is(SyntaxKind::Semicolon) && !self.at_pragma_end() {
            self.start_node(SyntaxKind::PragmaValue);
            while !self.currently_is(SyntaxKind::Semicolon) && !self.at_pragma_end() {
                self.bump();
            }
            self.finish_node();
        }
        self.finish_node();
    }

    fn at_pragma_end(&mut self) -> bool {
        self.should_stop() || self.at_any_keyword(keywords::TOP_LEVEL).is_some()
    }

    /// All four import shapes:
    /// `"a.sol" [as A]`, `* as A from "a.sol"`, `X [as Y] from "a.sol"`, `{X, Y as Z} from "a.sol"`.
    fn parse_import_directive(&mut self) -> Completed {
        self.start_node(SyntaxKind::ImportDirective);
        self.bump_keyword(SyntaxKind::ImportKw);

        if self.currently_is(SyntaxKind::QuotedString) {
            self.bump_field(Field::Source);
            self.parse_import_alias();
        } else {
            match self.current() {
                SyntaxKind::Star => {
                    self.bump();
                    self.parse_import_alias();
                }
                SyntaxKind::Identifier => {
                    self.bump_field(Field::ImportName);
                    self.parse_import_alias();
                }
                SyntaxKind::BraceOpen => {
                    self.parse_delimited_list(
                        SyntaxKind::BraceOpen,
                        SyntaxKind::BraceClose,
                        false,
                        "an imported name",
                        Self::parse_import_declaration,
                    );
                }
                _ => self.error_msg(DiagnosticKind::ExpectedString, "import path"),
            }
            if self.expect_keyword(SyntaxKind::FromKw) {
                self.parse_import_source();
            }
        }

        self.expect_semicolon();
        self.finish_node()
    }

    fn parse_import_declaration(&mut self) -> Option<Completed> {
        if !self.currently_is(SyntaxKind::Identifier) {
            return None;
        }
        let name = self.bump_field(Field::ImportName);
        self.parse_import_alias();
        Some(name)
    }

    fn parse_import_alias(&mut self) {
        if self.eat_keyword(SyntaxKind::AsKw) {
            self.expect_identifier(Some(Field::Alias));
        }
    }

    fn parse_import_source(&mut self) {
        if self.currently_is(SyntaxKind::QuotedString) {
            self.bump_field(Field::Source);
        } else {
            self.error_msg(DiagnosticKind::ExpectedString, "import path");
        }
    }
}
