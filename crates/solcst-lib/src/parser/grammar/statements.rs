//! Statements inside function and modifier bodies.
//!
//! Every element of a statement list is wrapped in a `Statement` node. Statement
//! slots with a field (`if` body, `else` branch, loop bodies) hold that wrapper.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{Completed, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::EXPR_FIRST;
use crate::parser::fields::Field;
use crate::parser::keywords;
use crate::parser::lookahead;

use super::expressions::PostfixMode;

impl Parser<'_> {
    /// Statements up to `}`; the caller owns the braces.
    ///
    /// A declaration keyword from an enclosing scope ends the list early, so an unclosed
    /// function body gives its following siblings back to the contract body.
    pub(super) fn parse_statement_list(&mut self) {
        while !self.should_stop() && !self.currently_is(SyntaxKind::BraceClose) {
            if self.at_declaration_boundary() {
                break;
            }
            if self.parse_statement().is_none() {
                self.error_and_bump(DiagnosticKind::ExpectedStatement);
            }
        }
    }

    pub(super) fn at_declaration_boundary(&mut self) -> bool {
        if self.at_any_keyword(keywords::CLOSES_CONTRACT_BODY).is_some() {
            return true;
        }
        if !self.currently_is(SyntaxKind::Identifier) {
            return false;
        }
        match self.current_text() {
            "function" | "modifier" | "event" | "struct" | "enum" => {
                self.next_is(SyntaxKind::Identifier)
            }
            "constructor" => self.next_is(SyntaxKind::ParenOpen),
            _ => false,
        }
    }

    fn at_statement_start(&mut self) -> bool {
        if self.currently_is(SyntaxKind::BraceOpen) {
            return true;
        }
        if self.currently_is(SyntaxKind::Identifier) {
            return !matches!(self.current_text(), "else" | "catch" | "returns");
        }
        self.currently_is_one_of(EXPR_FIRST)
    }

    /// One `Statement`, or `None` without consuming when nothing here starts a statement.
    pub(super) fn parse_statement(&mut self) -> Option<Completed> {
        if !self.at_statement_start() || !self.enter_recursion() {
            return None;
        }
        self.start_node(SyntaxKind::Statement);
        self.parse_statement_kind();
        let done = self.finish_node();
        self.exit_recursion();
        Some(done)
    }

    fn parse_statement_or_error(&mut self) -> Option<Completed> {
        let done = self.parse_statement();
        if done.is_none() {
            self.error(DiagnosticKind::ExpectedStatement);
        }
        done
    }

    fn parse_statement_kind(&mut self) -> Completed {
        if self.currently_is(SyntaxKind::BraceOpen)
            || (self.at_keyword(SyntaxKind::UncheckedKw) && self.next_is(SyntaxKind::BraceOpen))
        {
            return self.parse_block_statement();
        }

        let word = if self.currently_is(SyntaxKind::Identifier) {
            self.current_text()
        } else {
            ""
        };
        match word {
            "if" => self.parse_if_statement(),
            "for" => self.parse_for_statement(),
            "while" => self.parse_while_statement(),
            "do" => self.parse_do_while_statement(),
            "continue" => self.parse_jump_statement(SyntaxKind::ContinueKw, SyntaxKind::ContinueStatement),
            "break" => self.parse_jump_statement(SyntaxKind::BreakKw, SyntaxKind::BreakStatement),
            "return" => self.parse_return_statement(),
            "try" => self.parse_try_statement(),
            "emit" if self.next_is(SyntaxKind::Identifier) => self.parse_emit_statement(),
            "revert"
                if matches!(
                    self.nth(1),
                    SyntaxKind::ParenOpen | SyntaxKind::Semicolon | SyntaxKind::Identifier
                ) =>
            {
                self.parse_revert_statement()
            }
            "assembly"
                if matches!(
                    self.nth(1),
                    SyntaxKind::BraceOpen | SyntaxKind::ParenOpen | SyntaxKind::QuotedString
                ) =>
            {
                self.parse_assembly_statement()
            }
            _ if self.at_variable_declaration() => self.parse_variable_declaration_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn at_variable_declaration(&mut self) -> bool {
        if self.at_keyword(SyntaxKind::VarKw) && self.next_is(SyntaxKind::ParenOpen) {
            return true;
        }
        if self.currently_is(SyntaxKind::ParenOpen) {
            return lookahead::is_declaration_tuple(self);
        }
        lookahead::is_variable_declaration(self)
    }

    /// `{ ... }` or `unchecked { ... }`.
    pub(super) fn parse_block_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::BlockStatement);
        if self.at_keyword(SyntaxKind::UncheckedKw) {
            self.start_node(SyntaxKind::Unchecked);
            self.bump_keyword(SyntaxKind::UncheckedKw);
            self.finish_node();
        }
        self.parse_braced_statements();
        self.finish_node()
    }

    /// `{ statement* }` flattened into the caller's node.
    pub(super) fn parse_braced_statements(&mut self) {
        if !self.currently_is(SyntaxKind::BraceOpen) {
            self.error_msg(DiagnosticKind::MissingToken, "`{`");
            return;
        }
        self.open_delimiter(SyntaxKind::BraceOpen);
        self.parse_statement_list();
        self.close_delimiter(SyntaxKind::BraceClose);
    }

    /// Required block in `try` and `catch`.
    fn parse_block_field(&mut self) {
        if self.currently_is(SyntaxKind::BraceOpen) {
            let body = self.parse_block_statement();
            self.tag(Field::Body, Some(body));
        } else {
            self.error_msg(DiagnosticKind::MissingToken, "a block");
        }
    }

    /// `( expression )` tagged `condition`. A missing `(` is reported and the
    /// expression is still parsed.
    fn parse_condition(&mut self) {
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::MissingToken, "`(`");
            let condition = self.parse_expression_or_error();
            self.tag(Field::Condition, condition);
            return;
        }
        self.open_delimiter(SyntaxKind::ParenOpen);
        let condition = self.parse_expression_or_error();
        self.tag(Field::Condition, condition);
        self.close_delimiter(SyntaxKind::ParenClose);
    }

    fn parse_body_field(&mut self, field: Field) {
        let body = self.parse_statement_or_error();
        self.tag(field, body);
    }

    fn parse_if_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::IfStatement);
        self.bump_keyword(SyntaxKind::IfKw);
        self.parse_condition();
        self.parse_body_field(Field::Body);
        // the innermost open `if` takes the `else`
        if self.eat_keyword(SyntaxKind::ElseKw) {
            self.parse_body_field(Field::Else);
        }
        self.finish_node()
    }

    /// `for (initial condition update) body`, where `initial` and `condition` carry
    /// their own `;`.
    fn parse_for_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::ForStatement);
        self.bump_keyword(SyntaxKind::ForKw);
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::MissingToken, "`(`");
            return self.finish_node();
        }
        self.open_delimiter(SyntaxKind::ParenOpen);

        let initial = if self.currently_is(SyntaxKind::Semicolon) {
            Some(self.bump())
        } else if self.at_variable_declaration() {
            Some(self.parse_variable_declaration_statement())
        } else {
            Some(self.parse_expression_statement())
        };
        self.tag(Field::Initial, initial);

        let condition = if self.currently_is(SyntaxKind::Semicolon) {
            Some(self.bump())
        } else {
            Some(self.parse_expression_statement())
        };
        self.tag(Field::Condition, condition);

        if !self.currently_is(SyntaxKind::ParenClose) {
            let update = self.parse_expression_or_error();
            self.tag(Field::Update, update);
        }
        self.close_delimiter(SyntaxKind::ParenClose);

        self.parse_body_field(Field::Body);
        self.finish_node()
    }

    fn parse_while_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::WhileStatement);
        self.bump_keyword(SyntaxKind::WhileKw);
        self.parse_condition();
        self.parse_body_field(Field::Body);
        self.finish_node()
    }

    fn parse_do_while_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::DoWhileStatement);
        self.bump_keyword(SyntaxKind::DoKw);
        self.parse_body_field(Field::Body);
        if self.expect_keyword(SyntaxKind::WhileKw) {
            self.parse_condition();
        }
        self.expect_semicolon();
        self.finish_node()
    }

    fn parse_jump_statement(&mut self, keyword: SyntaxKind, kind: SyntaxKind) -> Completed {
        self.start_node(kind);
        self.bump_keyword(keyword);
        self.expect_semicolon();
        self.finish_node()
    }

    fn parse_return_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::ReturnStatement);
        self.bump_keyword(SyntaxKind::ReturnKw);
        if !self.currently_is(SyntaxKind::Semicolon) {
            self.parse_expression_or_error();
        }
        self.expect_semicolon();
        self.finish_node()
    }

    /// `emit Path.To.Event(args);`
    fn parse_emit_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::EmitStatement);
        self.bump_keyword(SyntaxKind::EmitKw);
        let name = self.parse_postfix(PostfixMode::MembersOnly);
        self.tag(Field::Name, name);
        self.parse_call_arguments();
        self.expect_semicolon();
        self.finish_node()
    }

    /// `revert;`, `revert("reason");` and `revert Path.Error(args);`.
    fn parse_revert_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::RevertStatement);
        self.bump_keyword(SyntaxKind::RevertKw);
        if self.currently_is(SyntaxKind::Identifier) {
            let error = self.parse_postfix(PostfixMode::MembersOnly);
            self.tag(Field::Error, error);
        }
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.start_node(SyntaxKind::RevertArguments);
            self.parse_call_arguments();
            self.finish_node();
        }
        self.expect_semicolon();
        self.finish_node()
    }

    fn parse_try_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::TryStatement);
        self.bump_keyword(SyntaxKind::TryKw);

        let outer = std::mem::replace(&mut self.no_empty_struct_literal, true);
        let attempt = self.parse_expression_or_error();
        self.no_empty_struct_literal = outer;
        self.tag(Field::Attempt, attempt);

        if self.eat_keyword(SyntaxKind::ReturnsKw) {
            self.parse_parameter_list();
        }
        self.parse_block_field();

        if !self.at_keyword(SyntaxKind::CatchKw) {
            self.error_msg(DiagnosticKind::MissingToken, "`catch`");
        }
        while self.at_keyword(SyntaxKind::CatchKw) && !self.should_stop() {
            self.parse_catch_clause();
        }
        self.finish_node()
    }

    /// `catch [Name] [(params)] { ... }`
    fn parse_catch_clause(&mut self) -> Completed {
        self.start_node(SyntaxKind::CatchClause);
        self.bump_keyword(SyntaxKind::CatchKw);
        if self.currently_is(SyntaxKind::Identifier) && self.next_is(SyntaxKind::ParenOpen) {
            self.bump();
        }
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_parameter_list();
        }
        self.parse_block_field();
        self.finish_node()
    }

    /// `assembly ["evmasm"] [("flag", ...)] { yul* }`
    fn parse_assembly_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::AssemblyStatement);
        self.bump_keyword(SyntaxKind::AssemblyKw);
        if self.currently_is(SyntaxKind::QuotedString) {
            self.bump_field(Field::Dialect);
        }
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.start_node(SyntaxKind::AssemblyFlags);
            self.parse_delimited_list(
                SyntaxKind::ParenOpen,
                SyntaxKind::ParenClose,
                false,
                "a flag string",
                Self::parse_assembly_flag,
            );
            self.finish_node();
        }
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.open_delimiter(SyntaxKind::BraceOpen);
            self.parse_yul_statements();
            self.close_delimiter(SyntaxKind::BraceClose);
        } else {
            self.error_msg(DiagnosticKind::MissingToken, "`{`");
        }
        self.finish_node()
    }

    fn parse_assembly_flag(&mut self) -> Option<Completed> {
        if self.currently_is(SyntaxKind::QuotedString) {
            return Some(self.bump());
        }
        self.error(DiagnosticKind::ExpectedString);
        None
    }

    /// Declaration with an optional initializer, or a declaration tuple with a
    /// required one, then `;`.
    fn parse_variable_declaration_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::VariableDeclarationStatement);
        let is_tuple = self.currently_is(SyntaxKind::ParenOpen)
            || (self.at_keyword(SyntaxKind::VarKw) && self.next_is(SyntaxKind::ParenOpen));
        if is_tuple {
            self.parse_variable_declaration_tuple();
            self.expect(SyntaxKind::Equals, "`=`");
            let value = self.parse_expression_or_error();
            self.tag(Field::Value, value);
        } else {
            self.parse_variable_declaration();
            if self.eat_token(SyntaxKind::Equals) {
                let value = self.parse_expression_or_error();
                self.tag(Field::Value, value);
            }
        }
        self.expect_semicolon();
        self.finish_node()
    }

    fn parse_variable_declaration(&mut self) -> Option<Completed> {
        if !self.at_type_start() {
            self.error(DiagnosticKind::ExpectedTypeName);
            return None;
        }
        self.start_node(SyntaxKind::VariableDeclaration);
        let ty = self.parse_type_name();
        self.tag(Field::Type, ty);
        self.parse_data_location();
        self.expect_identifier(Some(Field::Name));
        Some(self.finish_node())
    }

    /// `(decl?, decl?, ...)` or legacy `var (name?, name?, ...)`.
    fn parse_variable_declaration_tuple(&mut self) -> Completed {
        self.start_node(SyntaxKind::VariableDeclarationTuple);
        if self.eat_keyword(SyntaxKind::VarKw) {
            self.parse_delimited_list(
                SyntaxKind::ParenOpen,
                SyntaxKind::ParenClose,
                true,
                "a name",
                |p| p.expect_identifier(None),
            );
        } else {
            self.parse_delimited_list(
                SyntaxKind::ParenOpen,
                SyntaxKind::ParenClose,
                true,
                "a variable declaration",
                Self::parse_variable_declaration,
            );
        }
        self.finish_node()
    }

    fn parse_expression_statement(&mut self) -> Completed {
        self.start_node(SyntaxKind::ExpressionStatement);
        self.parse_expression_or_error();
        self.expect_semicolon();
        self.finish_node()
    }
}
