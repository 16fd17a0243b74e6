//! Parser state machine and low-level operations.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::fields::{Field, FieldTable};
use super::lexer::{Token, token_text};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

const DEBUG_FUEL: u32 = 1024;

#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

/// Position where a node may later be wrapped retroactively.
#[derive(Debug, Clone, Copy)]
pub(super) struct Marker {
    checkpoint: Checkpoint,
    start: TextSize,
}

/// A finished node or bumped token, identified the same way the field table keys it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Completed {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

/// Trivia tokens are buffered and flushed when starting a new node or token.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) trivia_buffer: Vec<Token>,
    pub(super) builder: GreenNodeBuilder<'static>,
    /// Offset of the builder's end: everything flushed so far.
    text_pos: TextSize,
    open_nodes: Vec<(SyntaxKind, TextSize)>,
    pub(super) fields: FieldTable,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    recursion_limit: u32,
    recursion_exhausted: bool,
    pub(super) last_diagnostic_pos: Option<TextSize>,
    pub(super) delimiter_stack: Vec<OpenDelimiter>,
    pub(super) debug_fuel: std::cell::Cell<u32>,
    /// Set while parsing a `try` attempt: `{}` there opens the success block, while
    /// `{name: value}` can only be call options.
    pub(super) no_empty_struct_literal: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            text_pos: TextSize::from(0),
            open_nodes: Vec::with_capacity(32),
            fields: FieldTable::default(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            recursion_limit: u32::MAX,
            recursion_exhausted: false,
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(8),
            debug_fuel: std::cell::Cell::new(DEBUG_FUEL),
            no_empty_struct_literal: false,
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub(super) fn finish(mut self) -> (GreenNode, FieldTable, Diagnostics) {
        self.eat_trivia();
        debug_assert!(self.open_nodes.is_empty(), "unbalanced start/finish");
        (self.builder.finish(), self.fields, self.diagnostics)
    }

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        self.nth_raw(0)
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(DEBUG_FUEL);
    }

    pub(super) fn nth_raw(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Eof, |t| t.kind)
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.skip_trivia_to_buffer();
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    /// Text of the current non-trivia token; empty at EOF.
    pub(super) fn current_text(&mut self) -> &'src str {
        self.skip_trivia_to_buffer();
        let source = self.source;
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(source, t))
    }

    /// Cursor position past pending trivia; equal before and after means nothing was consumed.
    pub(super) fn token_index(&mut self) -> usize {
        self.skip_trivia_to_buffer();
        self.pos
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    /// True when only trivia (or nothing) is left.
    pub(super) fn eof(&self) -> bool {
        self.nth_index(0).is_none()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.recursion_exhausted
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Index of the `n`-th non-trivia token at or after the cursor.
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(i, _)| self.pos + i)
    }

    /// LL(k) lookahead past trivia. `nth(0)` is the current token.
    pub(super) fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map_or(SyntaxKind::Eof, |i| self.tokens[i].kind)
    }

    pub(super) fn nth_text(&self, n: usize) -> &'src str {
        let source = self.source;
        self.nth_index(n)
            .map_or("", |i| token_text(source, &self.tokens[i]))
    }

    pub(super) fn next_is(&self, kind: SyntaxKind) -> bool {
        self.nth(1) == kind
    }

    /// Tokens from the cursor onward, trivia included, for scanning lookahead.
    pub(super) fn remaining(&self) -> &[Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    pub(super) fn skip_trivia_to_buffer(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.trivia_buffer.push(self.tokens[self.pos]);
            self.pos += 1;
        }
    }

    pub(super) fn drain_trivia(&mut self) {
        for token in self.trivia_buffer.drain(..) {
            let text = token_text(self.source, &token);
            self.builder.token(token.kind.into(), text);
            self.text_pos += token.span.len();
        }
    }

    pub(super) fn eat_trivia(&mut self) {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
        self.open_nodes.push((kind, self.text_pos));
    }

    /// Opens the root before any trivia is flushed, so leading comments land inside it.
    pub(super) fn start_root(&mut self, kind: SyntaxKind) {
        debug_assert!(self.open_nodes.is_empty());
        self.builder.start_node(kind.into());
        self.open_nodes.push((kind, self.text_pos));
    }

    pub(super) fn start_node_at(&mut self, marker: Marker, kind: SyntaxKind) {
        self.builder.start_node_at(marker.checkpoint, kind.into());
        self.open_nodes.push((kind, marker.start));
    }

    pub(super) fn finish_node(&mut self) -> Completed {
        self.builder.finish_node();
        let (kind, start) = self
            .open_nodes
            .pop()
            .unwrap_or((SyntaxKind::Error, self.text_pos));
        Completed {
            kind,
            range: TextRange::new(start, self.text_pos),
        }
    }

    /// Checkpoint after pending trivia, so wrapped nodes start at a real token.
    pub(super) fn checkpoint(&mut self) -> Marker {
        self.eat_trivia();
        Marker {
            checkpoint: self.builder.checkpoint(),
            start: self.text_pos,
        }
    }

    /// Labels a finished child. Empty nodes are never labeled.
    pub(super) fn tag(&mut self, field: Field, element: Option<Completed>) {
        if let Some(done) = element
            && !done.range.is_empty()
        {
            self.fields.insert(done.kind, done.range, field);
        }
    }

    pub(super) fn bump(&mut self) -> Completed {
        let kind = self.current();
        self.bump_remap(kind)
    }

    /// Bumps the current token under a different kind (keyword remapping).
    pub(super) fn bump_remap(&mut self, kind: SyntaxKind) -> Completed {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();

        self.eat_trivia();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(kind.into(), text);
        let start = self.text_pos;
        self.text_pos += token.span.len();
        self.pos += 1;
        Completed {
            kind,
            range: TextRange::new(start, self.text_pos),
        }
    }

    pub(super) fn bump_field(&mut self, field: Field) -> Completed {
        let done = self.bump();
        self.tag(field, Some(done));
        done
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        self.error_msg(DiagnosticKind::MissingToken, what);
        false
    }

    pub(super) fn at_keyword(&mut self, keyword: SyntaxKind) -> bool {
        self.current() == SyntaxKind::Identifier && keyword.keyword_text() == Some(self.current_text())
    }

    pub(super) fn at_any_keyword(&mut self, keywords: &[SyntaxKind]) -> Option<SyntaxKind> {
        keywords.iter().copied().find(|&kw| self.at_keyword(kw))
    }

    pub(super) fn nth_is_keyword(&self, n: usize, keyword: SyntaxKind) -> bool {
        self.nth(n) == SyntaxKind::Identifier && keyword.keyword_text() == Some(self.nth_text(n))
    }

    pub(super) fn bump_keyword(&mut self, keyword: SyntaxKind) -> Completed {
        debug_assert!(self.at_keyword(keyword), "expected keyword {:?}", keyword);
        self.bump_remap(keyword)
    }

    pub(super) fn eat_keyword(&mut self, keyword: SyntaxKind) -> bool {
        if self.at_keyword(keyword) {
            self.bump_remap(keyword);
            true
        } else {
            false
        }
    }

    pub(super) fn expect_keyword(&mut self, keyword: SyntaxKind) -> bool {
        if self.eat_keyword(keyword) {
            return true;
        }
        let text = keyword.keyword_text().unwrap_or("keyword");
        self.error_msg(DiagnosticKind::MissingToken, format!("`{}`", text));
        false
    }

    /// Bumps an identifier, tagging it with `field`; reports `ExpectedIdentifier` otherwise.
    pub(super) fn expect_identifier(&mut self, field: Option<Field>) -> Option<Completed> {
        if self.currently_is(SyntaxKind::Identifier) {
            let done = self.bump();
            if let Some(field) = field {
                self.tag(field, Some(done));
            }
            return Some(done);
        }
        self.error(DiagnosticKind::ExpectedIdentifier);
        None
    }

    pub(super) fn current_suppression_span(&mut self) -> TextRange {
        self.delimiter_stack
            .last()
            .map(|d| TextRange::new(d.span.start(), self.eof_offset()))
            .unwrap_or_else(|| self.current_span())
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.recursion_exhausted || self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(super) fn bump_as_error(&mut self) -> Option<Completed> {
        if self.eof() {
            return None;
        }
        self.start_node(SyntaxKind::Error);
        self.bump();
        Some(self.finish_node())
    }

    fn get_error_ranges(&mut self) -> Option<(TextRange, TextRange)> {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return None;
        }
        let suppression = self.current_suppression_span();
        Some((range, suppression))
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let Some((range, suppression)) = self.get_error_ranges() else {
            return;
        };
        self.diagnostics
            .report(kind, range)
            .suppression_range(suppression)
            .emit();
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let Some((range, suppression)) = self.get_error_ranges() else {
            return;
        };
        self.diagnostics
            .report(kind, range)
            .message(message)
            .suppression_range(suppression)
            .emit();
    }

    /// Reports over an element that was already built.
    pub(super) fn error_at(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
    ) {
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).message(message).emit();
    }

    /// Lexical error tokens are reported as what they are, whatever the caller expected.
    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind) {
        let kind = lexical_error_kind(self.current()).unwrap_or(kind);
        self.error(kind);
        self.bump_as_error();
    }

    pub(super) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        match lexical_error_kind(self.current()) {
            Some(lexical) => self.error(lexical),
            None => self.error_msg(kind, message),
        }
        self.bump_as_error();
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.recursion_exhausted {
            return false;
        }
        if self.depth >= self.recursion_limit {
            self.exhaust_recursion();
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    /// Reports once, then swallows the remaining input into a single `Error` node.
    fn exhaust_recursion(&mut self) {
        tracing::debug!(depth = self.depth, "recursion limit exceeded");
        let range = self.current_span();
        self.diagnostics
            .report(DiagnosticKind::RecursionLimitExceeded, range)
            .message(format!("more than {} levels", self.recursion_limit))
            .emit();
        self.recursion_exhausted = true;
        if !self.eof() {
            self.start_node(SyntaxKind::Error);
            while !self.eof() {
                self.bump();
            }
            self.finish_node();
        }
    }

    pub(super) fn push_delimiter(&mut self, kind: SyntaxKind) {
        let span = self.current_span();
        self.delimiter_stack.push(OpenDelimiter { kind, span });
    }

    pub(super) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Bumps an opening delimiter, remembering where it was for later reporting.
    pub(super) fn open_delimiter(&mut self, kind: SyntaxKind) {
        debug_assert!(self.currently_is(kind));
        self.push_delimiter(kind);
        self.bump();
    }

    /// Bumps the matching closing delimiter, or reports the unclosed opener.
    pub(super) fn close_delimiter(&mut self, close: SyntaxKind) -> bool {
        let open = self.pop_delimiter();
        if self.eat_token(close) {
            return true;
        }
        let Some(open) = open else {
            self.error_msg(DiagnosticKind::MissingToken, format!("`{}`", close));
            return false;
        };
        let (kind, what) = match open.kind {
            SyntaxKind::ParenOpen => (DiagnosticKind::UnclosedParen, "parenthesis"),
            SyntaxKind::BracketOpen => (DiagnosticKind::UnclosedBracket, "bracket"),
            _ => (DiagnosticKind::UnclosedBrace, "brace"),
        };
        let found = if self.eof() {
            "reached end of input".to_string()
        } else {
            format!("found `{}`", self.current_text())
        };
        self.error_unclosed_delimiter(kind, found, format!("{} opened here", what), open.span);
        false
    }

    pub(super) fn error_unclosed_delimiter(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        related_msg: impl Into<String>,
        open_range: TextRange,
    ) {
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        // Use full range for easier downstream error suppression
        let full_range = TextRange::new(open_range.start(), current.end());
        self.diagnostics
            .report(kind, full_range)
            .message(message)
            .related_to(related_msg, open_range)
            .emit();
    }

    pub(super) fn last_non_trivia_end(&self) -> Option<TextSize> {
        self.tokens[..self.pos]
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.span.end())
    }

    /// Reports a missing `;` right after the previous token, with an insertion fix.
    pub(super) fn expect_semicolon(&mut self) -> bool {
        if self.eat_token(SyntaxKind::Semicolon) {
            return true;
        }
        let at = self
            .last_non_trivia_end()
            .unwrap_or_else(|| self.current_span().start());
        self.error_with_fix(
            DiagnosticKind::MissingToken,
            TextRange::empty(at),
            "`;`",
            "insert `;`",
            ";",
        );
        false
    }

    pub(super) fn error_with_fix(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
        fix_description: impl Into<String>,
        fix_replacement: impl Into<String>,
    ) {
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics
            .report(kind, range)
            .message(message)
            .fix(fix_description, fix_replacement)
            .emit();
    }
}

fn lexical_error_kind(kind: SyntaxKind) -> Option<DiagnosticKind> {
    match kind {
        SyntaxKind::Garbage => Some(DiagnosticKind::InvalidCharacters),
        SyntaxKind::UnterminatedString => Some(DiagnosticKind::UnterminatedString),
        SyntaxKind::UnterminatedBlockComment => Some(DiagnosticKind::UnterminatedComment),
        _ => None,
    }
}
