//! Contracts, interfaces, libraries and the declarations they contain.
//!
//! Struct, enum, event, error, `type` and `using` declarations are also valid at
//! file level; the source unit grammar calls into the same routines.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{Completed, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::fields::Field;
use crate::parser::keywords;
use crate::parser::lookahead;

/// Words that open a contract member; member recovery stops in front of them.
const MEMBER_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::FunctionKw,
    SyntaxKind::ModifierKw,
    SyntaxKind::ConstructorKw,
    SyntaxKind::FallbackKw,
    SyntaxKind::ReceiveKw,
    SyntaxKind::StructKw,
    SyntaxKind::EnumKw,
    SyntaxKind::EventKw,
    SyntaxKind::ErrorKw,
    SyntaxKind::UsingKw,
];

impl Parser<'_> {
    /// `[abstract] contract Name [is A, B(1)] { ... }`
    pub(super) fn parse_contract_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::ContractDeclaration);
        self.eat_keyword(SyntaxKind::AbstractKw);
        self.expect_keyword(SyntaxKind::ContractKw);
        self.expect_identifier(Some(Field::Name));
        self.parse_inheritance();
        self.parse_contract_body();
        self.finish_node()
    }

    pub(super) fn parse_interface_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::InterfaceDeclaration);
        self.bump_keyword(SyntaxKind::InterfaceKw);
        self.expect_identifier(Some(Field::Name));
        self.parse_inheritance();
        self.parse_contract_body();
        self.finish_node()
    }

    pub(super) fn parse_library_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::LibraryDeclaration);
        self.bump_keyword(SyntaxKind::LibraryKw);
        self.expect_identifier(Some(Field::Name));
        self.parse_contract_body();
        self.finish_node()
    }

    fn parse_inheritance(&mut self) {
        if !self.eat_keyword(SyntaxKind::IsKw) {
            return;
        }
        loop {
            if !self.at_type_start() {
                self.error_msg(DiagnosticKind::ExpectedTypeName, "base contract");
                break;
            }
            self.start_node(SyntaxKind::InheritanceSpecifier);
            let ancestor = self.parse_user_defined_type();
            self.tag(Field::Ancestor, Some(ancestor));
            if self.currently_is(SyntaxKind::ParenOpen) {
                self.parse_call_arguments();
            }
            self.finish_node();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
    }

    fn parse_contract_body(&mut self) {
        if !self.currently_is(SyntaxKind::BraceOpen) {
            self.error_msg(DiagnosticKind::MissingToken, "`{`");
            return;
        }
        self.start_node(SyntaxKind::ContractBody);
        self.open_delimiter(SyntaxKind::BraceOpen);
        while !self.should_stop() && !self.currently_is(SyntaxKind::BraceClose) {
            if self.at_any_keyword(keywords::CLOSES_CONTRACT_BODY).is_some() {
                break;
            }
            self.parse_contract_member();
        }
        self.close_delimiter(SyntaxKind::BraceClose);
        let body = self.finish_node();
        self.tag(Field::Body, Some(body));
    }

    fn parse_contract_member(&mut self) {
        if !self.currently_is(SyntaxKind::Identifier) {
            self.recover_member();
            return;
        }
        let next = self.nth(1);
        match self.current_text() {
            "function" if next == SyntaxKind::Identifier => {
                self.parse_function_definition();
            }
            "function" if next == SyntaxKind::ParenOpen && lookahead::is_legacy_fallback(self) => {
                self.parse_fallback_receive_definition();
            }
            "fallback" | "receive" if next == SyntaxKind::ParenOpen => {
                self.parse_fallback_receive_definition();
            }
            "constructor" if next == SyntaxKind::ParenOpen => {
                self.parse_constructor_definition();
            }
            "modifier" if next == SyntaxKind::Identifier => {
                self.parse_modifier_definition();
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
            "using" => {
                self.parse_using_directive();
            }
            "type" if next == SyntaxKind::Identifier && self.nth_is_keyword(2, SyntaxKind::IsKw) => {
                self.parse_user_defined_type_definition();
            }
            _ if lookahead::is_variable_declaration(self) => {
                self.parse_state_variable_declaration();
            }
            _ => self.recover_member(),
        }
    }

    /// Skips to the end of the broken member: past `;`, or up to `}` or a member keyword.
    fn recover_member(&mut self) {
        if self.current().is_error() {
            self.error_and_bump(DiagnosticKind::ExpectedMember);
            return;
        }
        tracing::trace!(at = ?self.current_span(), "recovering contract member");
        self.start_node(SyntaxKind::Error);
        self.error(DiagnosticKind::ExpectedMember);
        let semicolon = self.currently_is(SyntaxKind::Semicolon);
        self.bump();
        while !semicolon && !self.should_stop() {
            if self.currently_is(SyntaxKind::Semicolon) {
                self.bump();
                break;
            }
            if self.currently_is(SyntaxKind::BraceClose)
                || self.at_any_keyword(MEMBER_KEYWORDS).is_some()
                || self.at_any_keyword(keywords::CLOSES_CONTRACT_BODY).is_some()
            {
                break;
            }
            self.bump();
        }
        self.finish_node();
    }

    /// Type, then modifiers in any order, then name and optional initializer.
    fn parse_state_variable_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::StateVariableDeclaration);
        let ty = self.parse_type_name();
        self.tag(Field::Type, ty);

        loop {
            if self.at_any_keyword(keywords::VISIBILITY).is_some() {
                let visibility = self.parse_visibility();
                self.tag(Field::Visibility, Some(visibility));
            } else if self.at_keyword(SyntaxKind::ConstantKw) {
                self.bump_keyword(SyntaxKind::ConstantKw);
            } else if self.at_keyword(SyntaxKind::OverrideKw) {
                self.parse_override_specifier();
            } else if self.at_keyword(SyntaxKind::ImmutableKw) {
                self.start_node(SyntaxKind::Immutable);
                self.bump_keyword(SyntaxKind::ImmutableKw);
                self.finish_node();
            } else if self.at_keyword(SyntaxKind::TransientKw) && self.next_is(SyntaxKind::Identifier)
            {
                self.start_node(SyntaxKind::StateLocation);
                self.bump_keyword(SyntaxKind::TransientKw);
                let location = self.finish_node();
                self.tag(Field::Location, Some(location));
            } else {
                break;
            }
        }

        self.expect_identifier(Some(Field::Name));
        if self.eat_token(SyntaxKind::Equals) {
            let value = self.parse_expression_or_error();
            self.tag(Field::Value, value);
        }
        self.expect_semicolon();
        self.finish_node()
    }

    /// `override` or `override(A, B.C)`.
    fn parse_override_specifier(&mut self) -> Completed {
        self.start_node(SyntaxKind::OverrideSpecifier);
        self.bump_keyword(SyntaxKind::OverrideKw);
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_delimited_list(
                SyntaxKind::ParenOpen,
                SyntaxKind::ParenClose,
                false,
                "a base contract",
                |p| {
                    if !p.at_type_start() {
                        return None;
                    }
                    Some(p.parse_user_defined_type())
                },
            );
        }
        self.finish_node()
    }

    fn at_member_keyword(&mut self) -> bool {
        self.at_any_keyword(MEMBER_KEYWORDS).is_some()
            && matches!(self.nth(1), SyntaxKind::Identifier | SyntaxKind::ParenOpen)
    }

    /// Visibility, mutability, `virtual`, `override` and modifier invocations in any order.
    fn parse_function_modifiers(&mut self) {
        while !self.should_stop() {
            if self.at_any_keyword(keywords::VISIBILITY).is_some() {
                self.parse_visibility();
            } else if self.at_any_keyword(keywords::STATE_MUTABILITY).is_some() {
                self.parse_state_mutability();
            } else if self.at_keyword(SyntaxKind::VirtualKw) {
                self.start_node(SyntaxKind::Virtual);
                self.bump_keyword(SyntaxKind::VirtualKw);
                self.finish_node();
            } else if self.at_keyword(SyntaxKind::OverrideKw) {
                self.parse_override_specifier();
            } else if self.currently_is(SyntaxKind::Identifier)
                && !self.at_keyword(SyntaxKind::ReturnsKw)
                && !self.at_member_keyword()
                && !self.at_declaration_boundary()
            {
                self.parse_modifier_invocation();
            } else {
                break;
            }
        }
    }

    fn parse_modifier_invocation(&mut self) -> Completed {
        self.start_node(SyntaxKind::ModifierInvocation);
        self.parse_identifier_path();
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_call_arguments();
        }
        self.finish_node()
    }

    fn parse_return_type_definition(&mut self) {
        if !self.at_keyword(SyntaxKind::ReturnsKw) {
            return;
        }
        self.start_node(SyntaxKind::ReturnTypeDefinition);
        self.bump_keyword(SyntaxKind::ReturnsKw);
        self.parse_parameter_list();
        let returns = self.finish_node();
        self.tag(Field::ReturnType, Some(returns));
    }

    /// `{ statements }` tagged `body`, or `;` for a declaration without one.
    fn parse_function_body_or_semicolon(&mut self) {
        if !self.currently_is(SyntaxKind::BraceOpen) {
            self.expect_semicolon();
            return;
        }
        self.start_node(SyntaxKind::FunctionBody);
        self.parse_braced_statements();
        let body = self.finish_node();
        self.tag(Field::Body, Some(body));
    }

    /// Named function, inside a contract or at file level.
    pub(super) fn parse_function_definition(&mut self) -> Completed {
        self.start_node(SyntaxKind::FunctionDefinition);
        self.bump_keyword(SyntaxKind::FunctionKw);
        self.expect_identifier(Some(Field::Name));
        self.parse_parameter_list();
        self.parse_function_modifiers();
        self.parse_return_type_definition();
        self.parse_function_body_or_semicolon();
        self.finish_node()
    }

    /// `fallback(...)`, `receive()` and the legacy unnamed `function()`.
    fn parse_fallback_receive_definition(&mut self) -> Completed {
        self.start_node(SyntaxKind::FallbackReceiveDefinition);
        if let Some(kw) = self.at_any_keyword(&[
            SyntaxKind::FallbackKw,
            SyntaxKind::ReceiveKw,
            SyntaxKind::FunctionKw,
        ]) {
            self.bump_keyword(kw);
        }
        self.parse_parameter_list();
        self.parse_function_modifiers();
        self.parse_return_type_definition();
        self.parse_function_body_or_semicolon();
        self.finish_node()
    }

    fn parse_constructor_definition(&mut self) -> Completed {
        self.start_node(SyntaxKind::ConstructorDefinition);
        self.bump_keyword(SyntaxKind::ConstructorKw);
        self.parse_parameter_list();
        self.parse_function_modifiers();
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_function_body_or_semicolon();
        } else {
            self.error_msg(DiagnosticKind::MissingToken, "a constructor body");
        }
        self.finish_node()
    }

    /// `modifier name[(params)] (virtual | override)* (; | body)`
    fn parse_modifier_definition(&mut self) -> Completed {
        self.start_node(SyntaxKind::ModifierDefinition);
        self.bump_keyword(SyntaxKind::ModifierKw);
        self.expect_identifier(Some(Field::Name));
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_parameter_list();
        }
        loop {
            if self.at_keyword(SyntaxKind::VirtualKw) {
                self.start_node(SyntaxKind::Virtual);
                self.bump_keyword(SyntaxKind::VirtualKw);
                self.finish_node();
            } else if self.at_keyword(SyntaxKind::OverrideKw) {
                self.parse_override_specifier();
            } else {
                break;
            }
        }
        self.parse_function_body_or_semicolon();
        self.finish_node()
    }

    pub(super) fn parse_struct_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::StructDeclaration);
        self.bump_keyword(SyntaxKind::StructKw);
        self.expect_identifier(Some(Field::Name));

        if self.currently_is(SyntaxKind::BraceOpen) {
            self.start_node(SyntaxKind::StructBody);
            self.open_delimiter(SyntaxKind::BraceOpen);
            while !self.should_stop() && !self.currently_is(SyntaxKind::BraceClose) {
                if self.at_any_keyword(keywords::CLOSES_CONTRACT_BODY).is_some() {
                    break;
                }
                if self.parse_struct_member().is_none() {
                    self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected a struct member");
                }
            }
            self.close_delimiter(SyntaxKind::BraceClose);
            let body = self.finish_node();
            self.tag(Field::Body, Some(body));
        } else {
            self.error_msg(DiagnosticKind::MissingToken, "`{`");
        }
        self.finish_node()
    }

    fn parse_struct_member(&mut self) -> Option<Completed> {
        if !self.at_type_start() {
            return None;
        }
        self.start_node(SyntaxKind::StructMember);
        let ty = self.parse_type_name();
        self.tag(Field::Type, ty);
        self.expect_identifier(Some(Field::Name));
        self.expect_semicolon();
        Some(self.finish_node())
    }

    pub(super) fn parse_enum_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::EnumDeclaration);
        self.bump_keyword(SyntaxKind::EnumKw);
        self.expect_identifier(Some(Field::Name));

        if self.currently_is(SyntaxKind::BraceOpen) {
            self.start_node(SyntaxKind::EnumBody);
            self.parse_delimited_list(
                SyntaxKind::BraceOpen,
                SyntaxKind::BraceClose,
                false,
                "an enum value",
                Self::parse_enum_value,
            );
            let body = self.finish_node();
            self.tag(Field::Body, Some(body));
        } else {
            self.error_msg(DiagnosticKind::MissingToken, "`{`");
        }
        self.finish_node()
    }

    fn parse_enum_value(&mut self) -> Option<Completed> {
        if !self.currently_is(SyntaxKind::Identifier) {
            return None;
        }
        self.start_node(SyntaxKind::EnumValue);
        self.bump();
        Some(self.finish_node())
    }

    /// `event Name(T indexed a, U b) [anonymous];`
    pub(super) fn parse_event_definition(&mut self) -> Completed {
        self.start_node(SyntaxKind::EventDefinition);
        self.bump_keyword(SyntaxKind::EventKw);
        self.expect_identifier(Some(Field::Name));
        self.parse_delimited_list(
            SyntaxKind::ParenOpen,
            SyntaxKind::ParenClose,
            false,
            "an event parameter",
            Self::parse_event_parameter,
        );
        self.eat_keyword(SyntaxKind::AnonymousKw);
        self.expect_semicolon();
        self.finish_node()
    }

    fn parse_event_parameter(&mut self) -> Option<Completed> {
        if !self.at_type_start() {
            return None;
        }
        self.start_node(SyntaxKind::EventParameter);
        let ty = self.parse_type_name();
        self.tag(Field::Type, ty);
        self.eat_keyword(SyntaxKind::IndexedKw);
        if self.currently_is(SyntaxKind::Identifier) {
            self.bump_field(Field::Name);
        }
        Some(self.finish_node())
    }

    /// `error Name(T a, U);`
    pub(super) fn parse_error_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::ErrorDeclaration);
        self.bump_keyword(SyntaxKind::ErrorKw);
        self.expect_identifier(Some(Field::Name));
        self.parse_delimited_list(
            SyntaxKind::ParenOpen,
            SyntaxKind::ParenClose,
            false,
            "an error parameter",
            Self::parse_error_parameter,
        );
        self.expect_semicolon();
        self.finish_node()
    }

    fn parse_error_parameter(&mut self) -> Option<Completed> {
        if !self.at_type_start() {
            return None;
        }
        self.start_node(SyntaxKind::ErrorParameter);
        let ty = self.parse_type_name();
        self.tag(Field::Type, ty);
        if self.currently_is(SyntaxKind::Identifier) {
            self.bump_field(Field::Name);
        }
        Some(self.finish_node())
    }

    /// `type Name is uint256;`
    pub(super) fn parse_user_defined_type_definition(&mut self) -> Completed {
        self.start_node(SyntaxKind::UserDefinedTypeDefinition);
        self.bump_keyword(SyntaxKind::TypeKw);
        self.expect_identifier(Some(Field::Name));
        self.expect_keyword(SyntaxKind::IsKw);
        if self.at_primitive_type() {
            self.parse_primitive_type();
        } else {
            self.error_msg(DiagnosticKind::ExpectedTypeName, "an elementary type");
        }
        self.expect_semicolon();
        self.finish_node()
    }

    /// File-level `T constant NAME = value;`
    pub(super) fn parse_constant_variable_declaration(&mut self) -> Completed {
        self.start_node(SyntaxKind::ConstantVariableDeclaration);
        let ty = self.parse_type_name();
        self.tag(Field::Type, ty);
        self.expect_keyword(SyntaxKind::ConstantKw);
        self.expect_identifier(Some(Field::Name));
        self.expect(SyntaxKind::Equals, "`=`");
        let value = self.parse_expression_or_error();
        self.tag(Field::Value, value);
        self.expect_semicolon();
        self.finish_node()
    }

    /// `using L for T;`, `using {f, g as +} for T global;`, `using L for *;`
    pub(super) fn parse_using_directive(&mut self) -> Completed {
        self.start_node(SyntaxKind::UsingDirective);
        self.bump_keyword(SyntaxKind::UsingKw);

        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_delimited_list(
                SyntaxKind::BraceOpen,
                SyntaxKind::BraceClose,
                false,
                "a function name",
                Self::parse_using_alias,
            );
        } else if self.parse_type_alias().is_none() {
            self.error(DiagnosticKind::ExpectedIdentifier);
        }

        if self.expect_keyword(SyntaxKind::ForKw) {
            if self.currently_is(SyntaxKind::Star) {
                self.start_node(SyntaxKind::AnySourceType);
                self.bump();
                let source = self.finish_node();
                self.tag(Field::Source, Some(source));
            } else {
                let source = self.parse_type_name();
                self.tag(Field::Source, source);
            }
        }
        self.eat_keyword(SyntaxKind::GlobalKw);
        self.expect_semicolon();
        self.finish_node()
    }

    fn parse_type_alias(&mut self) -> Option<Completed> {
        if !self.currently_is(SyntaxKind::Identifier) {
            return None;
        }
        self.start_node(SyntaxKind::TypeAlias);
        self.parse_identifier_path();
        Some(self.finish_node())
    }

    /// `f` or `f as +` inside the braces of a `using` directive.
    fn parse_using_alias(&mut self) -> Option<Completed> {
        let alias = self.parse_type_alias()?;
        if self.eat_keyword(SyntaxKind::AsKw) {
            let op = self.current();
            if op.punct_text().is_some() && !matches!(op, SyntaxKind::Comma | SyntaxKind::BraceClose)
            {
                self.bump_field(Field::Operator);
            } else {
                self.error_msg(DiagnosticKind::MissingToken, "an operator");
            }
        }
        Some(alias)
    }
}
