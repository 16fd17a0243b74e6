//! Word tables for contextual keywords.
//!
//! Solidity has no reserved words at the lexical level. These tables are consulted by
//! the grammar at the positions where a word acts as a keyword, builtin or unit.

use super::cst::SyntaxKind::{self, *};

/// Words after which a dangling keyword sequence resynchronizes at the top level.
pub const TOP_LEVEL: &[SyntaxKind] = &[
    PragmaKw,
    ImportKw,
    ContractKw,
    InterfaceKw,
    LibraryKw,
    AbstractKw,
    StructKw,
    EnumKw,
    FunctionKw,
    EventKw,
    ErrorKw,
    UsingKw,
    TypeKw,
];

/// Top-level words that cannot start a contract member, so they close an unclosed body.
pub const CLOSES_CONTRACT_BODY: &[SyntaxKind] = &[
    PragmaKw,
    ImportKw,
    ContractKw,
    InterfaceKw,
    LibraryKw,
    AbstractKw,
];

pub const VISIBILITY: &[SyntaxKind] = &[PublicKw, PrivateKw, InternalKw, ExternalKw];

/// `constant` is the pre-0.5 spelling of `view`.
pub const STATE_MUTABILITY: &[SyntaxKind] = &[PureKw, ViewKw, PayableKw, ConstantKw];

pub const DATA_LOCATIONS: &[SyntaxKind] = &[MemoryKw, StorageKw, CalldataKw];

pub const NUMBER_UNITS: &[&str] = &[
    "wei", "szabo", "finney", "gwei", "ether", "seconds", "minutes", "hours", "days", "weeks",
    "years",
];

pub const YUL_BUILTINS: &[&str] = &[
    "stop",
    "add",
    "sub",
    "mul",
    "div",
    "sdiv",
    "mod",
    "smod",
    "exp",
    "not",
    "lt",
    "gt",
    "slt",
    "sgt",
    "eq",
    "iszero",
    "and",
    "or",
    "xor",
    "byte",
    "shl",
    "shr",
    "sar",
    "addmod",
    "mulmod",
    "signextend",
    "keccak256",
    "pop",
    "mload",
    "mcopy",
    "tload",
    "tstore",
    "mstore",
    "mstore8",
    "sload",
    "sstore",
    "msize",
    "gas",
    "address",
    "balance",
    "selfbalance",
    "caller",
    "callvalue",
    "calldataload",
    "calldatasize",
    "calldatacopy",
    "extcodesize",
    "extcodecopy",
    "returndatasize",
    "returndatacopy",
    "extcodehash",
    "create",
    "create2",
    "call",
    "callcode",
    "delegatecall",
    "staticcall",
    "return",
    "revert",
    "selfdestruct",
    "invalid",
    "log0",
    "log1",
    "log2",
    "log3",
    "log4",
    "chainid",
    "origin",
    "gasprice",
    "blockhash",
    "blobhash",
    "basefee",
    "blobfee",
    "blobbasefee",
    "coinbase",
    "timestamp",
    "number",
    "difficulty",
    "prevrandao",
    "gaslimit",
    "codesize",
    "codecopy",
];

pub fn is_number_unit(text: &str) -> bool {
    NUMBER_UNITS.contains(&text)
}

pub fn is_yul_builtin(text: &str) -> bool {
    YUL_BUILTINS.contains(&text)
}

/// Elementary type names, excluding `var` (a keyword kind of its own).
pub fn is_primitive_type(text: &str) -> bool {
    match text {
        "address" | "bool" | "string" | "byte" | "bytes" | "int" | "uint" | "fixed"
        | "ufixed" => true,
        _ => {
            if let Some(bits) = text.strip_prefix("uint").or_else(|| text.strip_prefix("int")) {
                return sized(bits, 8, 256, 8);
            }
            if let Some(len) = text.strip_prefix("bytes") {
                return sized(len, 1, 32, 1);
            }
            if let Some(dims) = text
                .strip_prefix("ufixed")
                .or_else(|| text.strip_prefix("fixed"))
            {
                return dims.split_once('x').is_some_and(|(m, n)| digits(m) && digits(n));
            }
            false
        }
    }
}

fn digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn sized(text: &str, min: u32, max: u32, step: u32) -> bool {
    if !digits(text) || text.starts_with('0') {
        return false;
    }
    text.parse::<u32>()
        .is_ok_and(|n| n >= min && n <= max && n % step == 0)
}

/// Keyword kind for a word in Solidity position, if it is one of the contextual keywords.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    ALL_KEYWORDS
        .iter()
        .copied()
        .find(|kind| kind.keyword_text() == Some(text))
}

const ALL_KEYWORDS: &[SyntaxKind] = &[
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
];
