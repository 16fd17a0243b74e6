//! Grammar productions for Solidity and inline Yul.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Productions return the [`Completed`] node they built so callers can label it
//! with a field after the fact.

mod contracts;
mod expressions;
mod source_unit;
mod statements;
mod types;
mod validation;
mod yul;

pub(crate) use validation::validate_modifiers;

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{Completed, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::CLOSERS;

impl Parser<'_> {
    /// Comma-separated items up to `close`; the opener is already bumped.
    /// `what` names one item (`"a parameter"`).
    ///
    /// An item that consumes nothing is reported and skipped as an `Error` node, unless the
    /// current token closes an enclosing construct, in which case the list ends.
    pub(super) fn parse_comma_list(
        &mut self,
        close: SyntaxKind,
        allow_empty_slots: bool,
        what: &str,
        item: fn(&mut Self) -> Option<Completed>,
    ) {
        while !self.should_stop() && !self.currently_is(close) {
            if self.currently_is(SyntaxKind::Comma) {
                if !allow_empty_slots {
                    self.error_msg(DiagnosticKind::MissingToken, what);
                }
                self.bump();
                continue;
            }

            let before = self.token_index();
            item(self);
            if self.token_index() == before {
                if self.currently_is_one_of(CLOSERS)
                    || self.currently_is(SyntaxKind::Semicolon)
                    || self.currently_is(SyntaxKind::BraceOpen)
                {
                    break;
                }
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, format!("expected {}", what));
                continue;
            }

            if self.currently_is(close) {
                break;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                if self.currently_is_one_of(CLOSERS) || self.currently_is(SyntaxKind::Semicolon) {
                    break;
                }
                self.error_msg(DiagnosticKind::MissingToken, "`,`");
            }
        }
    }

    /// `open item, item close` with the delimiter tracked for unclosed reporting.
    pub(super) fn parse_delimited_list(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
        allow_empty_slots: bool,
        what: &str,
        item: fn(&mut Self) -> Option<Completed>,
    ) {
        if !self.currently_is(open) {
            self.error_msg(DiagnosticKind::MissingToken, format!("`{}`", open));
            return;
        }
        self.open_delimiter(open);
        self.parse_comma_list(close, allow_empty_slots, what, item);
        self.close_delimiter(close);
    }
}
