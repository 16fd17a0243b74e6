//! Bounded token scanning for ambiguous prefixes.
//!
//! The green builder cannot roll back, so every ambiguity is settled by scanning
//! ahead over raw tokens before the first node of either alternative is opened.
//! Scans never touch the builder and never consume parser fuel.

use super::core::Parser;
use super::cst::SyntaxKind::{self, *};
use super::keywords;
use super::lexer::{Token, token_text};

/// Every place where two productions share a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// `a.b[2] x;` declares, `a.b[2] = x;` assigns.
    TypeVsExpression,
    /// `a.b` is a `user_defined_type` in type position, a `member_expression` elsewhere.
    PathVsMemberExpression,
    /// `(uint a, ) = f()` declares, `(a, ) = f()` destructures.
    DeclarationTupleVsTuple,
    /// `uint(x)` is a cast, a lone `uint` is a primitive value.
    PrimaryVsTypeCast,
    /// `name:` is a legacy label unless `=` follows.
    YulLabelVsIdentifier,
    /// `a, b := f()` and `a := 1` assign, `a` alone is an expression.
    YulExpressionVsAssignment,
    /// `function() payable {}` is a fallback, `function(uint) external f;` a variable.
    FallbackVsFunctionType,
}

impl Conflict {
    pub fn name(self) -> &'static str {
        match self {
            Conflict::TypeVsExpression => "type-vs-expression",
            Conflict::PathVsMemberExpression => "path-vs-member-expression",
            Conflict::DeclarationTupleVsTuple => "declaration-tuple-vs-tuple",
            Conflict::PrimaryVsTypeCast => "primary-vs-type-cast",
            Conflict::YulLabelVsIdentifier => "yul-label-vs-identifier",
            Conflict::YulExpressionVsAssignment => "yul-expression-vs-assignment",
            Conflict::FallbackVsFunctionType => "fallback-vs-function-type",
        }
    }

    /// Records a resolution and passes it through.
    pub(super) fn resolve<T: std::fmt::Debug>(self, choice: T) -> T {
        tracing::trace!(conflict = self.name(), ?choice, "resolved");
        choice
    }
}

/// Read-only cursor over the tokens after the parser position.
#[derive(Clone)]
pub(super) struct Scan<'p> {
    source: &'p str,
    tokens: &'p [Token],
    pos: usize,
}

impl<'p> Scan<'p> {
    pub(super) fn new(p: &'p Parser<'_>) -> Self {
        let mut scan = Self {
            source: p.source,
            tokens: p.remaining(),
            pos: 0,
        };
        scan.skip_trivia();
        scan
    }

    fn skip_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.pos += 1;
        }
    }

    pub(super) fn peek(&self) -> SyntaxKind {
        self.tokens.get(self.pos).map_or(Eof, |t| t.kind)
    }

    pub(super) fn text(&self) -> &'p str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
            self.skip_trivia();
        }
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.peek() == kind {
            self.bump();
            return true;
        }
        false
    }

    pub(super) fn at_word(&self, word: &str) -> bool {
        self.peek() == Identifier && self.text() == word
    }

    pub(super) fn at_keyword(&self, keyword: SyntaxKind) -> bool {
        keyword.keyword_text().is_some_and(|text| self.at_word(text))
    }

    /// Skips a balanced group starting at the current opener. Fails on EOF or a mismatched closer.
    pub(super) fn skip_group(&mut self) -> bool {
        let mut stack = Vec::new();
        loop {
            match self.peek() {
                ParenOpen => stack.push(ParenClose),
                BracketOpen => stack.push(BracketClose),
                BraceOpen => stack.push(BraceClose),
                close @ (ParenClose | BracketClose | BraceClose) => {
                    if stack.pop() != Some(close) {
                        return false;
                    }
                }
                Eof => return false,
                _ => {}
            }
            self.bump();
            if stack.is_empty() {
                return true;
            }
        }
    }

    /// Skips a type-shaped run: a primitive (`address payable` included) or a dotted path,
    /// followed by any number of bracket groups. `mapping(..)` and `function(..)` are not
    /// covered; callers check those words first.
    pub(super) fn skip_type(&mut self) -> bool {
        if self.peek() != Identifier || !can_start_type(self.text()) {
            return false;
        }
        if keywords::is_primitive_type(self.text()) {
            let is_address = self.text() == "address";
            self.bump();
            if is_address && self.at_keyword(PayableKw) {
                self.bump();
            }
        } else {
            self.bump();
            while self.peek() == Dot {
                self.bump();
                if !self.eat(Identifier) {
                    return false;
                }
            }
        }
        while self.peek() == BracketOpen {
            if !self.skip_group() {
                return false;
            }
        }
        true
    }
}

/// Words that look like identifiers but always start an expression or another statement.
fn can_start_type(text: &str) -> bool {
    !matches!(
        text,
        "delete" | "new" | "true" | "false" | "payable" | "type" | "return" | "emit" | "revert"
    )
}

/// A type-shaped run followed by a name (or a data location) declares a variable.
pub(super) fn is_variable_declaration(p: &Parser<'_>) -> bool {
    let mut scan = Scan::new(p);
    if scan.at_keyword(MappingKw) || (scan.at_keyword(FunctionKw) && peek_second(&scan) == ParenOpen)
    {
        return Conflict::TypeVsExpression.resolve(true);
    }
    let declares = scan.skip_type() && scan.peek() == Identifier;
    Conflict::TypeVsExpression.resolve(declares)
}

/// `T constant NAME = ...` at file level.
pub(super) fn is_constant_declaration(p: &Parser<'_>) -> bool {
    let mut scan = Scan::new(p);
    let declares = scan.skip_type() && scan.at_keyword(ConstantKw);
    Conflict::TypeVsExpression.resolve(declares)
}

/// At `(`: the first non-empty element decides between a declaration tuple and a tuple.
pub(super) fn is_declaration_tuple(p: &Parser<'_>) -> bool {
    let mut scan = Scan::new(p);
    if !scan.eat(ParenOpen) {
        return false;
    }
    while scan.eat(Comma) {}
    let declares = if scan.at_keyword(MappingKw) {
        true
    } else {
        scan.skip_type() && scan.peek() == Identifier
    };
    Conflict::DeclarationTupleVsTuple.resolve(declares)
}

/// At `function (` in a contract body: a legacy fallback ends at a body or at `;` right
/// after a modifier, a function-typed variable ends with a name.
pub(super) fn is_legacy_fallback(p: &Parser<'_>) -> bool {
    let mut scan = Scan::new(p);
    scan.bump();
    if scan.peek() != ParenOpen || !scan.skip_group() {
        return false;
    }
    let mut last_word: Option<&str> = None;
    loop {
        match scan.peek() {
            BraceOpen => return Conflict::FallbackVsFunctionType.resolve(true),
            Equals | Eof => return Conflict::FallbackVsFunctionType.resolve(false),
            Semicolon => {
                let variable = last_word.is_some_and(|word| !is_function_modifier_word(word));
                return Conflict::FallbackVsFunctionType.resolve(!variable);
            }
            ParenOpen => {
                if !scan.skip_group() {
                    return false;
                }
                last_word = None;
            }
            Identifier => {
                last_word = Some(scan.text());
                scan.bump();
            }
            _ => {
                last_word = None;
                scan.bump();
            }
        }
    }
}

fn is_function_modifier_word(word: &str) -> bool {
    keywords::VISIBILITY
        .iter()
        .chain(keywords::STATE_MUTABILITY)
        .chain(&[VirtualKw, OverrideKw])
        .any(|kw| kw.keyword_text() == Some(word))
}

fn peek_second(scan: &Scan<'_>) -> SyntaxKind {
    let mut ahead = scan.clone();
    ahead.bump();
    ahead.peek()
}

/// `ident :` (not `:=`, not `: =`) opens a legacy Yul label.
pub(super) fn is_yul_label(p: &Parser<'_>) -> bool {
    let label = p.nth(0) == Identifier && p.nth(1) == Colon && p.nth(2) != Equals;
    Conflict::YulLabelVsIdentifier.resolve(label)
}

/// A Yul path list followed by `:=` (or `:` `=`) is an assignment.
pub(super) fn is_yul_assignment(p: &Parser<'_>) -> bool {
    let mut scan = Scan::new(p);
    loop {
        if !scan.eat(Identifier) {
            return false;
        }
        while scan.peek() == Dot {
            scan.bump();
            if !scan.eat(Identifier) {
                return false;
            }
        }
        if !scan.eat(Comma) {
            break;
        }
    }
    let assigns = match scan.peek() {
        ColonEquals => true,
        Colon => {
            scan.bump();
            scan.peek() == Equals
        }
        _ => false,
    };
    Conflict::YulExpressionVsAssignment.resolve(assigns)
}

/// A struct literal brace is `{` followed by `ident :` or `}`.
pub(super) fn is_struct_literal(p: &Parser<'_>) -> bool {
    p.nth(0) == BraceOpen
        && (p.nth(1) == BraceClose || (p.nth(1) == Identifier && p.nth(2) == Colon))
}
