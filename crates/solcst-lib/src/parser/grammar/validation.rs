//! Modifier checks over a finished tree.
//!
//! The grammar accepts modifiers in any order and any number. This pass reports
//! repeats and contradictions as warnings without touching the tree.

use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::cst::{SyntaxElement, SyntaxKind, SyntaxNode};

/// Modifier groups where at most one member may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Visibility,
    StateMutability,
    /// `constant`, `immutable`, `virtual`, `override`, `transient`: each at most once.
    Flag,
}

struct Seen {
    group: Group,
    text: String,
    range: TextRange,
}

pub(crate) fn validate_modifiers(root: &SyntaxNode) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for node in root.descendants() {
        let applies = match node.kind() {
            SyntaxKind::StateVariableDeclaration
            | SyntaxKind::FunctionDefinition
            | SyntaxKind::FallbackReceiveDefinition
            | SyntaxKind::ModifierDefinition
            | SyntaxKind::ConstructorDefinition => true,
            SyntaxKind::TypeName => node
                .children_with_tokens()
                .find(|el| !el.kind().is_trivia())
                .is_some_and(|el| el.kind() == SyntaxKind::FunctionKw),
            _ => false,
        };
        if applies {
            check_declaration(&node, &mut diagnostics);
        }
    }
    diagnostics
}

fn check_declaration(node: &SyntaxNode, diagnostics: &mut Diagnostics) {
    let mut seen: Vec<Seen> = Vec::new();
    for child in node.children_with_tokens() {
        let group = match child.kind() {
            SyntaxKind::Visibility => Group::Visibility,
            SyntaxKind::StateMutability => Group::StateMutability,
            // legacy `constant` on a state variable is a token, not a mutability node
            SyntaxKind::ConstantKw
            | SyntaxKind::Immutable
            | SyntaxKind::Virtual
            | SyntaxKind::OverrideSpecifier
            | SyntaxKind::StateLocation => Group::Flag,
            _ => continue,
        };
        let text = modifier_word(&child);
        let range = child.text_range();

        if let Some(first) = seen.iter().find(|s| s.group == group && s.text == text) {
            diagnostics
                .report(DiagnosticKind::DuplicateModifier, range)
                .message(text.as_str())
                .related_to("first specified here", first.range)
                .emit();
            continue;
        }
        if group != Group::Flag
            && let Some(first) = seen.iter().find(|s| s.group == group)
        {
            diagnostics
                .report(DiagnosticKind::ConflictingModifiers, range)
                .message(format!("`{}` and `{}`", first.text, text))
                .related_to("first specified here", first.range)
                .emit();
            continue;
        }
        seen.push(Seen { group, text, range });
    }
}

/// The keyword a modifier starts with: `override(A, B)` counts as `override`.
fn modifier_word(element: &SyntaxElement) -> String {
    match element {
        rowan::NodeOrToken::Token(token) => token.text().to_string(),
        rowan::NodeOrToken::Node(node) => node
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .find(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
            .unwrap_or_default(),
    }
}
