//! Inline assembly (Yul).
//!
//! Solidity keywords have no meaning here: `memory` or `payable` are plain
//! `yul_identifier`s. Only the Yul words below are remapped to keyword kinds.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{Completed, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::fields::Field;
use crate::parser::keywords;
use crate::parser::lookahead;

impl Parser<'_> {
    /// Yul statements up to `}`; the caller owns the braces.
    pub(super) fn parse_yul_statements(&mut self) {
        while !self.should_stop() && !self.currently_is(SyntaxKind::BraceClose) {
            if self.parse_yul_statement().is_none() {
                self.error_and_bump(DiagnosticKind::ExpectedYulStatement);
            }
        }
    }

    fn parse_yul_statement(&mut self) -> Option<Completed> {
        if !self.enter_recursion() {
            return None;
        }
        let done = self.parse_yul_statement_kind();
        self.exit_recursion();
        done
    }

    fn parse_yul_statement_kind(&mut self) -> Option<Completed> {
        match self.current() {
            SyntaxKind::BraceOpen => return Some(self.parse_yul_block()),
            SyntaxKind::Identifier => {}
            _ => return self.parse_yul_literal(),
        }

        let done = match self.current_text() {
            "let" => self.parse_yul_variable_declaration(),
            "if" => self.parse_yul_if_statement(),
            "for" => self.parse_yul_for_statement(),
            "switch" => self.parse_yul_switch_statement(),
            "function" if self.next_is(SyntaxKind::Identifier) => {
                self.parse_yul_function_definition()
            }
            "leave" => self.parse_yul_word(SyntaxKind::LeaveKw, SyntaxKind::YulLeave),
            "break" => self.parse_yul_word(SyntaxKind::BreakKw, SyntaxKind::YulBreak),
            "continue" => self.parse_yul_word(SyntaxKind::ContinueKw, SyntaxKind::YulContinue),
            "true" | "false" => self.parse_yul_boolean(),
            _ if lookahead::is_yul_label(self) => self.parse_yul_label(),
            _ if lookahead::is_yul_assignment(self) => self.parse_yul_assignment(),
            text if keywords::is_yul_builtin(text) || self.next_is(SyntaxKind::ParenOpen) => {
                self.parse_yul_function_call()
            }
            _ => self.parse_yul_assignment(),
        };
        Some(done)
    }

    pub(super) fn parse_yul_block(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulBlock);
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.open_delimiter(SyntaxKind::BraceOpen);
            self.parse_yul_statements();
            self.close_delimiter(SyntaxKind::BraceClose);
        } else {
            self.error_msg(DiagnosticKind::MissingToken, "`{`");
        }
        self.finish_node()
    }

    fn parse_yul_word(&mut self, keyword: SyntaxKind, kind: SyntaxKind) -> Completed {
        self.start_node(kind);
        self.bump_keyword(keyword);
        self.finish_node()
    }

    fn parse_yul_identifier(&mut self) -> Option<Completed> {
        if !self.currently_is(SyntaxKind::Identifier) {
            self.error(DiagnosticKind::ExpectedIdentifier);
            return None;
        }
        self.start_node(SyntaxKind::YulIdentifier);
        self.bump();
        Some(self.finish_node())
    }

    /// `let a := e`, `let a, b := f()`, `let (a, b) := f()`, `let a`.
    fn parse_yul_variable_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulVariableDeclaration);
        self.bump_keyword(SyntaxKind::LetKw);

        let parenthesized = self.currently_is(SyntaxKind::ParenOpen);
        if parenthesized {
            self.open_delimiter(SyntaxKind::ParenOpen);
        }
        let mut targets = 0;
        loop {
            let left = self.parse_yul_identifier();
            self.tag(Field::Left, left);
            targets += 1;
            if left.is_none() || !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        if parenthesized {
            self.close_delimiter(SyntaxKind::ParenClose);
        }

        if self.eat_yul_assign_operator() {
            let right = self.parse_yul_expression_or_error();
            self.tag(Field::Right, right);
            if parenthesized || targets > 1 {
                self.expect_yul_call_result(right);
            }
        }
        self.finish_node()
    }

    /// Several targets can only be filled by a call returning several values.
    fn expect_yul_call_result(&mut self, right: Option<Completed>) {
        if let Some(right) = right
            && right.kind != SyntaxKind::YulFunctionCall
        {
            self.error_at(
                DiagnosticKind::ExpectedYulExpression,
                right.range,
                "a function call to assign several variables",
            );
        }
    }

    /// `:=`, or the legacy two-token `: =`.
    fn eat_yul_assign_operator(&mut self) -> bool {
        if self.eat_token(SyntaxKind::ColonEquals) {
            return true;
        }
        if self.currently_is(SyntaxKind::Colon) && self.next_is(SyntaxKind::Equals) {
            self.bump();
            self.bump();
            return true;
        }
        false
    }

    /// `p := e`, `p1, p2 := f()`; a bare path list is accepted too.
    fn parse_yul_assignment(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulAssignment);
        let mut targets = 0;
        loop {
            let path = self.parse_yul_path();
            targets += 1;
            if path.is_none() || !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        if self.eat_yul_assign_operator() {
            let right = self.parse_yul_expression_or_error();
            self.tag(Field::Right, right);
            if targets > 1 {
                self.expect_yul_call_result(right);
            }
        }
        self.finish_node()
    }

    fn parse_yul_path(&mut self) -> Option<Completed> {
        if !self.currently_is(SyntaxKind::Identifier) {
            self.error(DiagnosticKind::ExpectedIdentifier);
            return None;
        }
        self.start_node(SyntaxKind::YulPath);
        self.parse_yul_identifier();
        while self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Identifier) {
            self.bump();
            self.parse_yul_identifier();
        }
        Some(self.finish_node())
    }

    fn parse_yul_label(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulLabel);
        self.bump();
        self.bump();
        self.finish_node()
    }

    /// `f(args)`, `add(1, 2)`, or a legacy bare builtin such as `pop`.
    fn parse_yul_function_call(&mut self) -> Completed {
        let m = self.checkpoint();
        let builtin = keywords::is_yul_builtin(self.current_text());
        let callee = if builtin {
            self.start_node(SyntaxKind::YulEvmBuiltin);
            self.bump();
            self.finish_node()
        } else {
            self.start_node(SyntaxKind::YulIdentifier);
            self.bump();
            self.finish_node()
        };
        self.tag(Field::Function, Some(callee));

        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_delimited_list(
                SyntaxKind::ParenOpen,
                SyntaxKind::ParenClose,
                false,
                "a Yul expression",
                Self::parse_yul_expression,
            );
        } else if !builtin {
            self.error_msg(DiagnosticKind::MissingToken, "`(`");
        }

        self.start_node_at(m, SyntaxKind::YulFunctionCall);
        self.finish_node()
    }

    fn parse_yul_expression(&mut self) -> Option<Completed> {
        if !self.enter_recursion() {
            return None;
        }
        let done = if self.currently_is(SyntaxKind::Identifier) {
            match self.current_text() {
                "true" | "false" => Some(self.parse_yul_boolean()),
                text if keywords::is_yul_builtin(text) || self.next_is(SyntaxKind::ParenOpen) => {
                    Some(self.parse_yul_function_call())
                }
                _ => self.parse_yul_path(),
            }
        } else {
            self.parse_yul_literal()
        };
        self.exit_recursion();
        done
    }

    fn parse_yul_expression_or_error(&mut self) -> Option<Completed> {
        let done = self.parse_yul_expression();
        if done.is_none() {
            self.error(DiagnosticKind::ExpectedYulExpression);
        }
        done
    }

    fn parse_yul_literal(&mut self) -> Option<Completed> {
        let kind = match self.current() {
            SyntaxKind::DecimalNumber => SyntaxKind::YulDecimalNumber,
            SyntaxKind::HexNumber => SyntaxKind::YulHexNumber,
            SyntaxKind::QuotedString | SyntaxKind::HexString => SyntaxKind::YulStringLiteral,
            SyntaxKind::Identifier if matches!(self.current_text(), "true" | "false") => {
                return Some(self.parse_yul_boolean());
            }
            _ => return None,
        };
        self.start_node(kind);
        self.bump();
        Some(self.finish_node())
    }

    fn parse_yul_boolean(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulBoolean);
        let kw = if self.current_text() == "true" {
            SyntaxKind::TrueKw
        } else {
            SyntaxKind::FalseKw
        };
        self.bump_keyword(kw);
        self.finish_node()
    }

    fn parse_yul_if_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulIfStatement);
        self.bump_keyword(SyntaxKind::IfKw);
        self.parse_yul_expression_or_error();
        self.parse_yul_block();
        self.finish_node()
    }

    /// `for { init } condition { post } { body }`
    fn parse_yul_for_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulForStatement);
        self.bump_keyword(SyntaxKind::ForKw);
        self.parse_yul_block();
        self.parse_yul_expression_or_error();
        self.parse_yul_block();
        self.parse_yul_block();
        self.finish_node()
    }

    fn parse_yul_switch_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulSwitchStatement);
        self.bump_keyword(SyntaxKind::SwitchKw);
        self.parse_yul_expression_or_error();

        let mut arms = 0;
        while self.eat_keyword(SyntaxKind::CaseKw) {
            if self.parse_yul_literal().is_none() {
                self.error_msg(DiagnosticKind::ExpectedYulExpression, "`case` takes a literal");
            }
            self.parse_yul_block();
            arms += 1;
        }
        if self.eat_keyword(SyntaxKind::DefaultKw) {
            self.parse_yul_block();
            arms += 1;
        }
        if arms == 0 {
            self.error_msg(DiagnosticKind::MissingToken, "`case` or `default`");
        }
        self.finish_node()
    }

    /// `function f(a, b) -> r, s { ... }`
    fn parse_yul_function_definition(&mut self) -> Completed {
        self.start_node(SyntaxKind::YulFunctionDefinition);
        self.bump_keyword(SyntaxKind::FunctionKw);
        self.parse_yul_identifier();
        self.parse_delimited_list(
            SyntaxKind::ParenOpen,
            SyntaxKind::ParenClose,
            false,
            "a parameter name",
            Self::parse_yul_identifier,
        );
        if self.eat_token(SyntaxKind::Arrow) {
            loop {
                if self.parse_yul_identifier().is_none() || !self.eat_token(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.parse_yul_block();
        self.finish_node()
    }
}
