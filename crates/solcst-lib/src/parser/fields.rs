//! Field labels for CST children.
//!
//! Rowan trees carry no per-child metadata, so fields live in a side table keyed by the
//! child's kind and range. Both are unique within one tree: two distinct elements of the
//! same kind never share a range, because the parser never emits empty tagged nodes and
//! never wraps a node in another node of the same kind with the same extent.

use indexmap::IndexMap;
use rowan::TextRange;

use super::cst::{SyntaxElement, SyntaxKind};

/// Role of a child within its parent production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Alias,
    Alternative,
    Ancestor,
    Argument,
    Attempt,
    Base,
    Body,
    Condition,
    Consequence,
    Dialect,
    Else,
    Error,
    From,
    Function,
    ImportName,
    Index,
    Initial,
    KeyIdentifier,
    KeyType,
    Left,
    Location,
    Name,
    Object,
    Operator,
    Property,
    ReturnType,
    Right,
    Source,
    To,
    Type,
    Update,
    Value,
    ValueIdentifier,
    ValueType,
    VersionConstraint,
    Visibility,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Alias => "alias",
            Field::Alternative => "alternative",
            Field::Ancestor => "ancestor",
            Field::Argument => "argument",
            Field::Attempt => "attempt",
            Field::Base => "base",
            Field::Body => "body",
            Field::Condition => "condition",
            Field::Consequence => "consequence",
            Field::Dialect => "dialect",
            Field::Else => "else",
            Field::Error => "error",
            Field::From => "from",
            Field::Function => "function",
            Field::ImportName => "import_name",
            Field::Index => "index",
            Field::Initial => "initial",
            Field::KeyIdentifier => "key_identifier",
            Field::KeyType => "key_type",
            Field::Left => "left",
            Field::Location => "location",
            Field::Name => "name",
            Field::Object => "object",
            Field::Operator => "operator",
            Field::Property => "property",
            Field::ReturnType => "return_type",
            Field::Right => "right",
            Field::Source => "source",
            Field::To => "to",
            Field::Type => "type",
            Field::Update => "update",
            Field::Value => "value",
            Field::ValueIdentifier => "value_identifier",
            Field::ValueType => "value_type",
            Field::VersionConstraint => "version_constraint",
            Field::Visibility => "visibility",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side table mapping tagged children to their field, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    entries: IndexMap<(SyntaxKind, TextRange), Field>,
}

impl FieldTable {
    pub(crate) fn insert(&mut self, kind: SyntaxKind, range: TextRange, field: Field) {
        debug_assert!(!kind.is_trivia(), "trivia never carries a field");
        self.entries.insert((kind, range), field);
    }

    pub fn get(&self, kind: SyntaxKind, range: TextRange) -> Option<Field> {
        self.entries.get(&(kind, range)).copied()
    }

    pub fn of(&self, element: &SyntaxElement) -> Option<Field> {
        self.get(element.kind(), element.text_range())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SyntaxKind, TextRange, Field)> + '_ {
        self.entries
            .iter()
            .map(|(&(kind, range), &field)| (kind, range, field))
    }
}
