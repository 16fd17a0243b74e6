//! Type names, parameters and the bracket suffix shared with expressions.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{Completed, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::fields::Field;
use crate::parser::keywords;
use crate::parser::lookahead::Conflict;

/// Where a `[` suffix appears; decides what the shared suffix routine builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BracketPosition {
    /// `uint[3]`: array type, optional length expression.
    Type,
    /// `a[i]`, `a[]`, `a[i:j]`: access or slice.
    Expression,
}

impl Parser<'_> {
    pub(super) fn at_type_start(&mut self) -> bool {
        self.currently_is(SyntaxKind::Identifier)
            && !matches!(
                self.current_text(),
                "delete" | "new" | "true" | "false" | "payable" | "type"
            )
    }

    /// `type_name`, arrays included. Reports `ExpectedTypeName` without consuming on failure.
    pub(super) fn parse_type_name(&mut self) -> Option<Completed> {
        if !self.at_type_start() {
            self.error(DiagnosticKind::ExpectedTypeName);
            return None;
        }
        if !self.enter_recursion() {
            return None;
        }

        let m = self.checkpoint();
        self.start_node(SyntaxKind::TypeName);
        if self.at_keyword(SyntaxKind::MappingKw) {
            self.parse_mapping();
        } else if self.at_keyword(SyntaxKind::FunctionKw) {
            self.parse_function_type();
        } else if self.at_primitive_type() {
            self.parse_primitive_type();
        } else {
            self.parse_user_defined_type();
        }
        let mut done = self.finish_node();

        while self.currently_is(SyntaxKind::BracketOpen) && !self.should_stop() {
            let kind = self.parse_bracket_suffix(BracketPosition::Type);
            self.start_node_at(m, kind);
            done = self.finish_node();
        }

        self.exit_recursion();
        Some(done)
    }

    pub(super) fn at_primitive_type(&mut self) -> bool {
        self.at_keyword(SyntaxKind::VarKw)
            || (self.currently_is(SyntaxKind::Identifier)
                && keywords::is_primitive_type(self.current_text()))
    }

    /// `uint256`, `address payable`, legacy `var`.
    pub(super) fn parse_primitive_type(&mut self) -> Completed {
        self.start_node(SyntaxKind::PrimitiveType);
        if self.at_keyword(SyntaxKind::VarKw) {
            self.bump_keyword(SyntaxKind::VarKw);
        } else {
            let is_address = self.current_text() == "address";
            self.bump();
            if is_address && self.at_keyword(SyntaxKind::PayableKw) {
                self.bump_keyword(SyntaxKind::PayableKw);
            }
        }
        self.finish_node()
    }

    /// Dotted path, flattened into the caller's node.
    pub(super) fn parse_identifier_path(&mut self) {
        self.expect_identifier(None);
        while self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Identifier) {
            self.bump();
            self.bump();
        }
    }

    pub(super) fn parse_user_defined_type(&mut self) -> Completed {
        Conflict::PathVsMemberExpression.resolve(SyntaxKind::UserDefinedType);
        self.start_node(SyntaxKind::UserDefinedType);
        self.parse_identifier_path();
        self.finish_node()
    }

    fn parse_mapping(&mut self) {
        self.bump_keyword(SyntaxKind::MappingKw);
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::MissingToken, "`(` after `mapping`");
            return;
        }
        self.open_delimiter(SyntaxKind::ParenOpen);

        let key = if self.at_primitive_type() {
            Some(self.parse_primitive_type())
        } else if self.at_type_start() {
            Some(self.parse_user_defined_type())
        } else {
            self.error_msg(DiagnosticKind::ExpectedTypeName, "mapping key");
            None
        };
        self.tag(Field::KeyType, key);
        if self.currently_is(SyntaxKind::Identifier) {
            self.bump_field(Field::KeyIdentifier);
        }

        self.expect(SyntaxKind::FatArrow, "`=>`");

        let value = self.parse_type_name();
        self.tag(Field::ValueType, value);
        if self.currently_is(SyntaxKind::Identifier) {
            self.bump_field(Field::ValueIdentifier);
        }

        self.close_delimiter(SyntaxKind::ParenClose);
    }

    /// `function (params) (visibility | state_mutability)* [returns (return_parameter, ...)]`
    fn parse_function_type(&mut self) {
        self.bump_keyword(SyntaxKind::FunctionKw);
        self.parse_parameter_list();
        loop {
            if self.at_any_keyword(keywords::VISIBILITY).is_some() {
                self.parse_visibility();
            } else if self.at_any_keyword(keywords::STATE_MUTABILITY).is_some() {
                self.parse_state_mutability();
            } else {
                break;
            }
        }
        if self.at_keyword(SyntaxKind::ReturnsKw) {
            self.bump_keyword(SyntaxKind::ReturnsKw);
            self.parse_delimited_list(
                SyntaxKind::ParenOpen,
                SyntaxKind::ParenClose,
                false,
                "a return parameter",
                Self::parse_return_parameter,
            );
        }
    }

    /// `(parameter, ...)`, flattened into the caller's node.
    pub(super) fn parse_parameter_list(&mut self) {
        self.parse_delimited_list(
            SyntaxKind::ParenOpen,
            SyntaxKind::ParenClose,
            false,
            "a parameter",
            Self::parse_parameter,
        );
    }

    pub(super) fn parse_parameter(&mut self) -> Option<Completed> {
        if !self.at_type_start() {
            self.error(DiagnosticKind::ExpectedTypeName);
            return None;
        }
        self.start_node(SyntaxKind::Parameter);
        let ty = self.parse_type_name();
        self.tag(Field::Type, ty);
        self.parse_data_location();
        if self.currently_is(SyntaxKind::Identifier) {
            self.bump_field(Field::Name);
        }
        Some(self.finish_node())
    }

    fn parse_return_parameter(&mut self) -> Option<Completed> {
        if !self.at_type_start() {
            self.error(DiagnosticKind::ExpectedTypeName);
            return None;
        }
        self.start_node(SyntaxKind::ReturnParameter);
        let ty = self.parse_type_name();
        self.tag(Field::Type, ty);
        self.parse_data_location();
        Some(self.finish_node())
    }

    /// Optional `memory` / `storage` / `calldata`, tagged `location`.
    pub(super) fn parse_data_location(&mut self) -> Option<Completed> {
        let location = self.at_any_keyword(keywords::DATA_LOCATIONS)?;
        let done = self.bump_keyword(location);
        self.tag(Field::Location, Some(done));
        Some(done)
    }

    pub(super) fn parse_visibility(&mut self) -> Completed {
        self.start_node(SyntaxKind::Visibility);
        if let Some(kw) = self.at_any_keyword(keywords::VISIBILITY) {
            self.bump_keyword(kw);
        }
        self.finish_node()
    }

    pub(super) fn parse_state_mutability(&mut self) -> Completed {
        self.start_node(SyntaxKind::StateMutability);
        if let Some(kw) = self.at_any_keyword(keywords::STATE_MUTABILITY) {
            self.bump_keyword(kw);
        }
        self.finish_node()
    }

    /// The `[...]` suffix for both array types and index/slice access.
    ///
    /// Returns the kind the caller wraps the base and suffix in. Positioned at `[`.
    pub(super) fn parse_bracket_suffix(&mut self, position: BracketPosition) -> SyntaxKind {
        self.assert_current(SyntaxKind::BracketOpen);
        self.open_delimiter(SyntaxKind::BracketOpen);

        let kind = match position {
            BracketPosition::Type => {
                if !self.currently_is(SyntaxKind::BracketClose) {
                    self.parse_expression_or_error();
                }
                SyntaxKind::TypeName
            }
            BracketPosition::Expression => self.parse_access_suffix(),
        };

        self.close_delimiter(SyntaxKind::BracketClose);
        kind
    }

    fn parse_access_suffix(&mut self) -> SyntaxKind {
        if self.currently_is(SyntaxKind::BracketClose) {
            return SyntaxKind::ArrayAccess;
        }
        let first = if self.currently_is(SyntaxKind::Colon) {
            None
        } else {
            self.parse_expression_or_error()
        };
        if !self.currently_is(SyntaxKind::Colon) {
            self.tag(Field::Index, first);
            return SyntaxKind::ArrayAccess;
        }
        self.tag(Field::From, first);
        self.bump();
        if !self.currently_is(SyntaxKind::BracketClose) {
            let to = self.parse_expression_or_error();
            self.tag(Field::To, to);
        }
        SyntaxKind::SliceAccess
    }
}
