//! Expressions: precedence climbing over binary operators, prefix and postfix
//! operators, and primaries.
//!
//! Every expression position holds an `Expression` node wrapping the concrete
//! form. The one exception is a plain identifier used as a member access object,
//! which stays a bare `Identifier` token.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{Completed, Marker, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{ASSIGNMENT_OPS, NUMBERS};
use crate::parser::fields::Field;
use crate::parser::keywords;
use crate::parser::lookahead::{self, Conflict};

use super::types::BracketPosition;

/// Binding power and associativity of a binary operator.
fn binary_precedence(kind: SyntaxKind) -> Option<(u8, bool)> {
    use SyntaxKind::*;
    let prec = match kind {
        PipePipe => 1,
        AmpAmp => 2,
        EqEq | NotEq => 3,
        Lt | Gt | LtEq | GtEq => 4,
        Pipe => 5,
        Caret => 6,
        Amp => 7,
        Shl | Shr => 8,
        Plus | Minus => 9,
        Star | Slash | Percent => 10,
        StarStar => return Some((11, true)),
        _ => return None,
    };
    Some((prec, false))
}

/// Which postfix forms a chain may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PostfixMode {
    Full,
    /// `a.b.c` only: event and error names after `emit` / `revert`.
    MembersOnly,
}

impl Parser<'_> {
    /// Full expression, assignment and ternary included.
    pub(super) fn parse_expression(&mut self) -> Option<Completed> {
        if !self.enter_recursion() {
            return None;
        }
        let m = self.checkpoint();
        let result = self.parse_binary(1).map(|lhs| self.parse_expression_tail(m, lhs));
        self.exit_recursion();
        result
    }

    pub(super) fn parse_expression_or_error(&mut self) -> Option<Completed> {
        let done = self.parse_expression();
        if done.is_none() {
            if self.current().is_error() {
                self.error_and_bump(DiagnosticKind::ExpectedExpression);
            } else {
                self.error(DiagnosticKind::ExpectedExpression);
            }
        }
        done
    }

    /// `?:` and assignment operators, both right-associative at the lowest level.
    fn parse_expression_tail(&mut self, m: Marker, lhs: Completed) -> Completed {
        if self.currently_is(SyntaxKind::Question) {
            self.tag(Field::Condition, Some(lhs));
            self.bump();
            let consequence = self.parse_expression_or_error();
            self.tag(Field::Consequence, consequence);
            self.expect(SyntaxKind::Colon, "`:` in conditional expression");
            let alternative = self.parse_expression_or_error();
            self.tag(Field::Alternative, alternative);
            return self.wrap_expression(m, SyntaxKind::TernaryExpression);
        }

        if self.currently_is_one_of(ASSIGNMENT_OPS) {
            self.tag(Field::Left, Some(lhs));
            let kind = if self.currently_is(SyntaxKind::Equals) {
                self.bump();
                SyntaxKind::AssignmentExpression
            } else {
                self.bump_field(Field::Operator);
                SyntaxKind::AugmentedAssignmentExpression
            };
            let rhs = self.parse_expression_or_error();
            self.tag(Field::Right, rhs);
            return self.wrap_expression(m, kind);
        }

        lhs
    }

    /// Wraps everything since `m` in `kind`, then in `Expression`.
    fn wrap_expression(&mut self, m: Marker, kind: SyntaxKind) -> Completed {
        self.start_node_at(m, kind);
        self.finish_node();
        self.start_node_at(m, SyntaxKind::Expression);
        self.finish_node()
    }

    fn parse_binary(&mut self, min_prec: u8) -> Option<Completed> {
        let m = self.checkpoint();
        let mut lhs = self.parse_unary()?;

        while let Some((prec, right_assoc)) = binary_precedence(self.current()) {
            if prec < min_prec || self.should_stop() {
                break;
            }
            self.tag(Field::Left, Some(lhs));
            self.bump_field(Field::Operator);
            let next_min = if right_assoc { prec } else { prec + 1 };
            // `**` chains nest one level per operator.
            let rhs = if self.enter_recursion() {
                let rhs = self.parse_binary(next_min);
                self.exit_recursion();
                rhs
            } else {
                None
            };
            if rhs.is_none() {
                self.error(DiagnosticKind::ExpectedExpression);
            }
            self.tag(Field::Right, rhs);
            lhs = self.wrap_expression(m, SyntaxKind::BinaryExpression);
        }

        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Completed> {
        let kind = match self.current() {
            SyntaxKind::Minus | SyntaxKind::Bang | SyntaxKind::Tilde => SyntaxKind::UnaryExpression,
            SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => SyntaxKind::UpdateExpression,
            _ if self.at_keyword(SyntaxKind::DeleteKw) => SyntaxKind::UnaryExpression,
            _ => return self.parse_postfix(PostfixMode::Full),
        };
        if !self.enter_recursion() {
            return None;
        }

        let m = self.checkpoint();
        let operator = if self.at_keyword(SyntaxKind::DeleteKw) {
            self.bump_keyword(SyntaxKind::DeleteKw)
        } else {
            self.bump()
        };
        self.tag(Field::Operator, Some(operator));
        let argument = self.parse_unary();
        if argument.is_none() {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        self.tag(Field::Argument, argument);
        let done = self.wrap_expression(m, kind);

        self.exit_recursion();
        Some(done)
    }

    /// Primary followed by calls, member access, indexing, struct literals and `++`/`--`.
    pub(super) fn parse_postfix(&mut self, mode: PostfixMode) -> Option<Completed> {
        let m = self.checkpoint();
        let mut inner = match mode {
            PostfixMode::Full => self.parse_primary()?,
            PostfixMode::MembersOnly => {
                if !self.currently_is(SyntaxKind::Identifier) {
                    return None;
                }
                self.bump()
            }
        };

        loop {
            let kind = match self.current() {
                SyntaxKind::Dot => {
                    let object = if inner.kind == SyntaxKind::Identifier {
                        inner
                    } else {
                        self.operand(m, inner)
                    };
                    self.tag(Field::Object, Some(object));
                    self.bump();
                    self.expect_identifier(Some(Field::Property));
                    SyntaxKind::MemberExpression
                }
                _ if mode == PostfixMode::MembersOnly => break,
                SyntaxKind::ParenOpen => {
                    let function = self.operand(m, inner);
                    self.tag(Field::Function, Some(function));
                    self.parse_call_arguments();
                    SyntaxKind::CallExpression
                }
                SyntaxKind::BracketOpen => {
                    let base = self.operand(m, inner);
                    self.tag(Field::Base, Some(base));
                    self.parse_bracket_suffix(BracketPosition::Expression)
                }
                SyntaxKind::BraceOpen
                    if lookahead::is_struct_literal(self)
                        && !(self.no_empty_struct_literal && self.nth(1) == SyntaxKind::BraceClose) =>
                {
                    let ty = self.operand(m, inner);
                    self.tag(Field::Type, Some(ty));
                    self.parse_delimited_list(
                        SyntaxKind::BraceOpen,
                        SyntaxKind::BraceClose,
                        false,
                        "a field assignment",
                        Self::parse_struct_field_assignment,
                    );
                    SyntaxKind::StructExpression
                }
                SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => {
                    let argument = self.operand(m, inner);
                    self.tag(Field::Argument, Some(argument));
                    self.bump_field(Field::Operator);
                    SyntaxKind::UpdateExpression
                }
                _ => break,
            };
            self.start_node_at(m, kind);
            inner = self.finish_node();
            if self.should_stop() {
                break;
            }
        }

        Some(self.operand(m, inner))
    }

    /// The `Expression` wrapper around the unwrapped `inner` that started at `m`.
    fn operand(&mut self, m: Marker, inner: Completed) -> Completed {
        if inner.kind == SyntaxKind::Expression {
            return inner;
        }
        self.start_node_at(m, SyntaxKind::Expression);
        self.finish_node()
    }

    /// Unwrapped primary, or `None` without consuming or reporting.
    fn parse_primary(&mut self) -> Option<Completed> {
        match self.current() {
            SyntaxKind::Identifier => Some(self.parse_word_primary()),
            kind if NUMBERS.contains(kind) => Some(self.parse_number_literal()),
            SyntaxKind::QuotedString => {
                Some(self.parse_string_family(SyntaxKind::QuotedString, SyntaxKind::StringLiteral))
            }
            SyntaxKind::HexString => {
                Some(self.parse_string_family(SyntaxKind::HexString, SyntaxKind::HexStringLiteral))
            }
            SyntaxKind::UnicodeString => Some(
                self.parse_string_family(SyntaxKind::UnicodeString, SyntaxKind::UnicodeStringLiteral),
            ),
            SyntaxKind::ParenOpen => Some(self.parse_tuple_or_parenthesized()),
            SyntaxKind::BracketOpen => Some(self.parse_inline_array()),
            _ => None,
        }
    }

    fn parse_word_primary(&mut self) -> Completed {
        match self.current_text() {
            "true" | "false" => {
                self.start_node(SyntaxKind::BooleanLiteral);
                let kw = if self.current_text() == "true" {
                    SyntaxKind::TrueKw
                } else {
                    SyntaxKind::FalseKw
                };
                self.bump_keyword(kw);
                self.finish_node()
            }
            "new" => self.parse_new_expression(),
            "payable" if self.next_is(SyntaxKind::ParenOpen) => {
                self.start_node(SyntaxKind::PayableConversionExpression);
                self.bump_keyword(SyntaxKind::PayableKw);
                self.parse_call_arguments();
                self.finish_node()
            }
            "type" if self.next_is(SyntaxKind::ParenOpen) => {
                self.start_node(SyntaxKind::MetaTypeExpression);
                self.bump_keyword(SyntaxKind::TypeKw);
                self.open_delimiter(SyntaxKind::ParenOpen);
                self.parse_type_name();
                self.close_delimiter(SyntaxKind::ParenClose);
                self.finish_node()
            }
            text if keywords::is_primitive_type(text) => {
                let cast = Conflict::PrimaryVsTypeCast.resolve(self.is_type_cast());
                if !cast {
                    return self.parse_primitive_type();
                }
                self.start_node(SyntaxKind::TypeCastExpression);
                self.parse_primitive_type();
                self.parse_call_arguments();
                self.finish_node()
            }
            _ => self.bump(),
        }
    }

    /// `uint(x)` and `address payable(x)`; the primitive is the current token.
    fn is_type_cast(&self) -> bool {
        let after = if self.nth_text(0) == "address" && self.nth_is_keyword(1, SyntaxKind::PayableKw)
        {
            2
        } else {
            1
        };
        self.nth(after) == SyntaxKind::ParenOpen
    }

    fn parse_new_expression(&mut self) -> Completed {
        self.start_node(SyntaxKind::NewExpression);
        self.bump_keyword(SyntaxKind::NewKw);
        let ty = self.parse_type_name();
        self.tag(Field::Name, ty);
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_call_arguments();
        }
        self.finish_node()
    }

    /// Number with an optional unit suffix such as `ether` or `days`.
    fn parse_number_literal(&mut self) -> Completed {
        self.start_node(SyntaxKind::NumberLiteral);
        self.bump();
        if self.currently_is(SyntaxKind::Identifier) && keywords::is_number_unit(self.current_text())
        {
            self.start_node(SyntaxKind::NumberUnit);
            self.bump();
            self.finish_node();
        }
        self.finish_node()
    }

    /// Adjacent literals of one family concatenate: `"a" "b"`.
    fn parse_string_family(&mut self, token: SyntaxKind, node: SyntaxKind) -> Completed {
        self.start_node(node);
        while self.currently_is(token) {
            self.bump();
        }
        self.finish_node()
    }

    /// `(a)` is parenthesized; `()`, `(a,)`, `(, b)` and `(a, b)` are tuples.
    fn parse_tuple_or_parenthesized(&mut self) -> Completed {
        let m = self.checkpoint();
        self.open_delimiter(SyntaxKind::ParenOpen);
        let mut elements = 0;
        let mut commas = 0;
        while !self.should_stop() && !self.currently_is(SyntaxKind::ParenClose) {
            if self.eat_token(SyntaxKind::Comma) {
                commas += 1;
                continue;
            }
            if self.parse_expression().is_none() {
                break;
            }
            elements += 1;
            if !self.currently_is(SyntaxKind::ParenClose) && !self.currently_is(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_delimiter(SyntaxKind::ParenClose);

        let kind = if elements == 1 && commas == 0 {
            SyntaxKind::ParenthesizedExpression
        } else {
            SyntaxKind::TupleExpression
        };
        self.start_node_at(m, kind);
        self.finish_node()
    }

    fn parse_inline_array(&mut self) -> Completed {
        self.start_node(SyntaxKind::InlineArrayExpression);
        self.parse_delimited_list(
            SyntaxKind::BracketOpen,
            SyntaxKind::BracketClose,
            false,
            "an expression",
            Self::parse_expression,
        );
        self.finish_node()
    }

    /// `(arg, ...)` flattened into the caller, each argument a `call_argument`.
    pub(super) fn parse_call_arguments(&mut self) {
        self.parse_delimited_list(
            SyntaxKind::ParenOpen,
            SyntaxKind::ParenClose,
            false,
            "an argument",
            Self::parse_call_argument,
        );
    }

    fn parse_call_argument(&mut self) -> Option<Completed> {
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.start_node(SyntaxKind::CallArgument);
            self.parse_delimited_list(
                SyntaxKind::BraceOpen,
                SyntaxKind::BraceClose,
                false,
                "a named argument",
                Self::parse_call_struct_argument,
            );
            return Some(self.finish_node());
        }

        let m = self.checkpoint();
        self.parse_expression()?;
        self.start_node_at(m, SyntaxKind::CallArgument);
        Some(self.finish_node())
    }

    fn parse_call_struct_argument(&mut self) -> Option<Completed> {
        self.parse_name_value(SyntaxKind::CallStructArgument)
    }

    fn parse_struct_field_assignment(&mut self) -> Option<Completed> {
        self.parse_name_value(SyntaxKind::StructFieldAssignment)
    }

    /// `name: value`
    fn parse_name_value(&mut self, kind: SyntaxKind) -> Option<Completed> {
        if !self.currently_is(SyntaxKind::Identifier) {
            self.error(DiagnosticKind::ExpectedIdentifier);
            return None;
        }
        self.start_node(kind);
        self.bump_field(Field::Name);
        self.expect(SyntaxKind::Colon, "`:`");
        let value = self.parse_expression_or_error();
        self.tag(Field::Value, value);
        Some(self.finish_node())
    }
}
