//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("solcst")
        .about("Lossless syntax trees for Solidity and inline Yul")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tree_command())
        .subcommand(tokens_command())
        .subcommand(check_command())
}

/// Print the concrete syntax tree of one file.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Print the syntax tree of a Solidity file")
        .override_usage(
            "\
  solcst tree <FILE>
  solcst tree -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  solcst tree Token.sol                 # fields and kinds
  solcst tree Token.sol --raw --spans   # with trivia and byte ranges
  cat Token.sol | solcst tree -         # from stdin
  solcst tree -s 'contract C {}'        # inline source"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(color_arg())
}

/// Print the token stream of one file.
pub fn tokens_command() -> Command {
    Command::new("tokens")
        .about("Print the token stream of a Solidity file")
        .override_usage(
            "\
  solcst tokens <FILE>
  solcst tokens -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  solcst tokens Token.sol               # significant tokens
  solcst tokens -s 'uint x;' --raw      # whitespace included"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(raw_arg())
        .arg(spans_arg())
}

/// Parse files and report diagnostics.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check Solidity files for syntax errors")
        .override_usage(
            "\
  solcst check <FILE>...
  solcst check <FILE>... --strict",
        )
        .after_help(
            r#"EXAMPLES:
  solcst check src/*.sol                # syntax errors only
  solcst check src/*.sol --strict       # also repeated or conflicting modifiers
  solcst check Token.sol --json         # one JSON object per diagnostic"#,
        )
        .arg(source_paths_arg())
        .arg(strict_arg())
        .arg(json_arg())
        .arg(color_arg())
}
