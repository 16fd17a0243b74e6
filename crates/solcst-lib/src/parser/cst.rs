//! Syntax kinds for Solidity and Yul.
//!
//! `SyntaxKind` serves three roles: token kinds (from the lexer), contextual keyword kinds
//! (identifiers remapped by the parser) and node kinds. Logos derives token recognition;
//! keyword and node kinds lack token/regex attributes.
//! `SolLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Lexer tokens first, then keywords, then nodes, then `__LAST`.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("?")]
    Question,

    /// Yul assignment `:=`
    #[token(":=")]
    ColonEquals,

    #[token(":")]
    Colon,

    /// Yul return list `->`
    #[token("->")]
    Arrow,

    /// Mapping arrow `=>`
    #[token("=>")]
    FatArrow,

    #[token("==")]
    EqEq,

    #[token("=")]
    Equals,

    #[token("!=")]
    NotEq,

    #[token("!")]
    Bang,

    #[token("<=")]
    LtEq,

    #[token("<<=")]
    ShlEq,

    #[token("<<")]
    Shl,

    #[token("<")]
    Lt,

    #[token(">=")]
    GtEq,

    #[token(">>=")]
    ShrEq,

    #[token(">>")]
    Shr,

    #[token(">")]
    Gt,

    #[token("++")]
    PlusPlus,

    #[token("+=")]
    PlusEq,

    #[token("+")]
    Plus,

    #[token("--")]
    MinusMinus,

    #[token("-=")]
    MinusEq,

    #[token("-")]
    Minus,

    #[token("**")]
    StarStar,

    #[token("*=")]
    StarEq,

    #[token("*")]
    Star,

    #[token("/=")]
    SlashEq,

    #[token("/")]
    Slash,

    #[token("%=")]
    PercentEq,

    #[token("%")]
    Percent,

    #[token("&&")]
    AmpAmp,

    #[token("&=")]
    AmpEq,

    #[token("&")]
    Amp,

    #[token("||")]
    PipePipe,

    #[token("|=")]
    PipeEq,

    #[token("|")]
    Pipe,

    #[token("^=")]
    CaretEq,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,

    #[regex(r"0[xX][0-9a-fA-F_]*")]
    HexNumber,

    /// Underscores are digit separators; unit suffixes are separate identifiers.
    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?([eE]-?[0-9_]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE]-?[0-9_]+)?")]
    DecimalNumber,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n]|\\\r?\n)*""#)]
    #[regex(r"'([^'\\\r\n]|\\[^\r\n]|\\\r?\n)*'")]
    QuotedString,

    #[regex(r#"hex"[0-9a-fA-F_]*""#)]
    #[regex(r"hex'[0-9a-fA-F_]*'")]
    HexString,

    #[regex(r#"unicode"([^"\\\r\n]|\\[^\r\n]|\\\r?\n)*""#)]
    #[regex(r"unicode'([^'\\\r\n]|\\[^\r\n]|\\\r?\n)*'")]
    UnicodeString,

    /// Contextual keywords are lexed as identifiers and remapped by the parser.
    #[regex(r"[a-zA-Z$_][a-zA-Z0-9$_]*")]
    Identifier,

    /// Every non-newline character of JavaScript's `\s`, plus zero-width and word joiners.
    #[regex(r"[ \t\x0B\x0C\u{00A0}\u{1680}\u{2000}-\u{200B}\u{2028}\u{2029}\u{202F}\u{205F}\u{2060}\u{3000}\u{FEFF}]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    Newline,

    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    /// String missing its closing quote, cut at the end of the line.
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*"#, allow_greedy = true)]
    #[regex(r"'([^'\\\r\n]|\\[^\r\n])*", allow_greedy = true)]
    UnterminatedString,

    /// Block comment running to the end of input.
    #[regex(r"/\*([^*]|\*+[^*/])*\**", allow_greedy = true)]
    UnterminatedBlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,
    /// Returned by lookahead past the last token; never stored in a tree.
    Eof,

    // --- Contextual keywords (remapped identifiers) ---
    AbstractKw,
    AnonymousKw,
    AsKw,
    AssemblyKw,
    BreakKw,
    CalldataKw,
    CaseKw,
    CatchKw,
    ConstantKw,
    ConstructorKw,
    ContinueKw,
    ContractKw,
    DefaultKw,
    DeleteKw,
    DoKw,
    ElseKw,
    EmitKw,
    EnumKw,
    ErrorKw,
    EventKw,
    ExternalKw,
    FallbackKw,
    FalseKw,
    ForKw,
    FromKw,
    FunctionKw,
    GlobalKw,
    IfKw,
    ImmutableKw,
    ImportKw,
    IndexedKw,
    InterfaceKw,
    InternalKw,
    IsKw,
    LeaveKw,
    LetKw,
    LibraryKw,
    MappingKw,
    MemoryKw,
    ModifierKw,
    NewKw,
    OverrideKw,
    PayableKw,
    PragmaKw,
    PrivateKw,
    PublicKw,
    PureKw,
    ReceiveKw,
    ReturnKw,
    ReturnsKw,
    RevertKw,
    SolidityKw,
    StorageKw,
    StructKw,
    SwitchKw,
    TransientKw,
    TrueKw,
    TryKw,
    TypeKw,
    UncheckedKw,
    UsingKw,
    VarKw,
    ViewKw,
    VirtualKw,
    WhileKw,

    // --- Node kinds (non-terminals) ---
    SourceFile,
    PragmaDirective,
    SolidityPragmaToken,
    SolidityVersionComparisonOperator,
    SolidityVersion,
    AnyPragmaToken,
    PragmaValue,
    ImportDirective,
    UserDefinedTypeDefinition,
    ConstantVariableDeclaration,
    ContractDeclaration,
    InterfaceDeclaration,
    LibraryDeclaration,
    InheritanceSpecifier,
    ContractBody,
    StructDeclaration,
    StructBody,
    StructMember,
    EnumDeclaration,
    EnumBody,
    EnumValue,
    EventDefinition,
    EventParameter,
    ErrorDeclaration,
    ErrorParameter,
    UsingDirective,
    TypeAlias,
    AnySourceType,
    StateVariableDeclaration,
    StateLocation,
    Visibility,
    StateMutability,
    Immutable,
    Virtual,
    OverrideSpecifier,
    ModifierDefinition,
    ConstructorDefinition,
    FallbackReceiveDefinition,
    FunctionDefinition,
    ReturnTypeDefinition,
    ModifierInvocation,
    FunctionBody,
    Parameter,
    ReturnParameter,

    Statement,
    BlockStatement,
    Unchecked,
    VariableDeclarationStatement,
    VariableDeclaration,
    VariableDeclarationTuple,
    ExpressionStatement,
    IfStatement,
    ForStatement,
    WhileStatement,
    DoWhileStatement,
    ContinueStatement,
    BreakStatement,
    TryStatement,
    CatchClause,
    ReturnStatement,
    EmitStatement,
    RevertStatement,
    RevertArguments,
    AssemblyStatement,
    AssemblyFlags,

    Expression,
    BinaryExpression,
    UnaryExpression,
    UpdateExpression,
    AssignmentExpression,
    AugmentedAssignmentExpression,
    TernaryExpression,
    CallExpression,
    CallArgument,
    CallStructArgument,
    MemberExpression,
    ArrayAccess,
    SliceAccess,
    StructExpression,
    StructFieldAssignment,
    ParenthesizedExpression,
    TupleExpression,
    InlineArrayExpression,
    NewExpression,
    MetaTypeExpression,
    PayableConversionExpression,
    TypeCastExpression,
    NumberLiteral,
    NumberUnit,
    BooleanLiteral,
    StringLiteral,
    HexStringLiteral,
    UnicodeStringLiteral,

    TypeName,
    PrimitiveType,
    UserDefinedType,

    YulBlock,
    YulVariableDeclaration,
    YulAssignment,
    YulFunctionCall,
    YulIfStatement,
    YulForStatement,
    YulSwitchStatement,
    YulFunctionDefinition,
    YulLeave,
    YulBreak,
    YulContinue,
    YulLabel,
    YulIdentifier,
    YulPath,
    YulEvmBuiltin,
    YulDecimalNumber,
    YulHexNumber,
    YulStringLiteral,
    YulBoolean,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Error | Garbage | UnterminatedString | UnterminatedBlockComment
        )
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= AbstractKw && self <= WhileKw
    }

    /// Stable grammar name, e.g. `contract_declaration` or `>>=`.
    pub fn name(self) -> String {
        self.to_string()
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self >= SourceFile && self < __LAST
    }

    /// Source spelling of a contextual keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            AbstractKw => "abstract",
            AnonymousKw => "anonymous",
            AsKw => "as",
            AssemblyKw => "assembly",
            BreakKw => "break",
            CalldataKw => "calldata",
            CaseKw => "case",
            CatchKw => "catch",
            ConstantKw => "constant",
            ConstructorKw => "constructor",
            ContinueKw => "continue",
            ContractKw => "contract",
            DefaultKw => "default",
            DeleteKw => "delete",
            DoKw => "do",
            ElseKw => "else",
            EmitKw => "emit",
            EnumKw => "enum",
            ErrorKw => "error",
            EventKw => "event",
            ExternalKw => "external",
            FallbackKw => "fallback",
            FalseKw => "false",
            ForKw => "for",
            FromKw => "from",
            FunctionKw => "function",
            GlobalKw => "global",
            IfKw => "if",
            ImmutableKw => "immutable",
            ImportKw => "import",
            IndexedKw => "indexed",
            InterfaceKw => "interface",
            InternalKw => "internal",
            IsKw => "is",
            LeaveKw => "leave",
            LetKw => "let",
            LibraryKw => "library",
            MappingKw => "mapping",
            MemoryKw => "memory",
            ModifierKw => "modifier",
            NewKw => "new",
            OverrideKw => "override",
            PayableKw => "payable",
            PragmaKw => "pragma",
            PrivateKw => "private",
            PublicKw => "public",
            PureKw => "pure",
            ReceiveKw => "receive",
            ReturnKw => "return",
            ReturnsKw => "returns",
            RevertKw => "revert",
            SolidityKw => "solidity",
            StorageKw => "storage",
            StructKw => "struct",
            SwitchKw => "switch",
            TransientKw => "transient",
            TrueKw => "true",
            TryKw => "try",
            TypeKw => "type",
            UncheckedKw => "unchecked",
            UsingKw => "using",
            VarKw => "var",
            ViewKw => "view",
            VirtualKw => "virtual",
            WhileKw => "while",
            _ => return None,
        };
        Some(text)
    }

    /// Fixed spelling of punctuation and operator tokens.
    pub fn punct_text(self) -> Option<&'static str> {
        let text = match self {
            ParenOpen => "(",
            ParenClose => ")",
            BracketOpen => "[",
            BracketClose => "]",
            BraceOpen => "{",
            BraceClose => "}",
            Semicolon => ";",
            Comma => ",",
            Dot => ".",
            Question => "?",
            ColonEquals => ":=",
            Colon => ":",
            Arrow => "->",
            FatArrow => "=>",
            EqEq => "==",
            Equals => "=",
            NotEq => "!=",
            Bang => "!",
            LtEq => "<=",
            ShlEq => "<<=",
            Shl => "<<",
            Lt => "<",
            GtEq => ">=",
            ShrEq => ">>=",
            Shr => ">>",
            Gt => ">",
            PlusPlus => "++",
            PlusEq => "+=",
            Plus => "+",
            MinusMinus => "--",
            MinusEq => "-=",
            Minus => "-",
            StarStar => "**",
            StarEq => "*=",
            Star => "*",
            SlashEq => "/=",
            Slash => "/",
            PercentEq => "%=",
            Percent => "%",
            AmpAmp => "&&",
            AmpEq => "&=",
            Amp => "&",
            PipePipe => "||",
            PipeEq => "|=",
            Pipe => "|",
            CaretEq => "^=",
            Caret => "^",
            Tilde => "~",
            _ => return None,
        };
        Some(text)
    }
}

/// Grammar-level name: the spelling for fixed tokens, snake_case otherwise
/// (`ContractDeclaration` displays as `contract_declaration`).
impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(text) = self.punct_text().or_else(|| self.keyword_text()) {
            return f.write_str(text);
        }
        let debug = format!("{:?}", self);
        for (i, c) in debug.chars().enumerate() {
            if c.is_ascii_uppercase() {
                if i > 0 {
                    f.write_char('_')?;
                }
                f.write_char(c.to_ascii_lowercase())?;
            } else {
                f.write_char(c)?;
            }
        }
        Ok(())
    }
}

use std::fmt::Write as _;

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SolLang {}

impl Language for SolLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<SolLang>;
pub type SyntaxToken = rowan::SyntaxToken<SolLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of lexer `SyntaxKind`s for O(1) membership testing.
///
/// Keyword and node kinds never appear in a set: keywords are matched by text.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind = SolLang::kind_from_raw(rowan::SyntaxKind(i));
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const NUMBERS: TokenSet = TokenSet::new(&[DecimalNumber, HexNumber]);

    /// Tokens (besides identifiers and keywords) that can start an expression.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        ParenOpen,
        BracketOpen,
        Identifier,
        DecimalNumber,
        HexNumber,
        QuotedString,
        HexString,
        UnicodeString,
        Minus,
        Bang,
        Tilde,
        PlusPlus,
        MinusMinus,
    ]);

    pub const ASSIGNMENT_OPS: TokenSet = TokenSet::new(&[
        Equals, PlusEq, MinusEq, StarEq, SlashEq, PercentEq, AmpEq, PipeEq, CaretEq, ShlEq, ShrEq,
    ]);

    pub const VERSION_OPERATORS: TokenSet = TokenSet::new(&[LtEq, Lt, Caret, Gt, GtEq, Tilde, Equals]);

    /// Closing tokens where list parsing gives up.
    pub const CLOSERS: TokenSet = TokenSet::new(&[ParenClose, BracketClose, BraceClose]);
}
