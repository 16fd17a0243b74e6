use std::fmt::Write;
use std::path::PathBuf;

use solcst_lib::parser::keywords::keyword_kind;
use solcst_lib::parser::lexer::token_text;
use solcst_lib::{SyntaxKind, lex};

use super::source_loader::load_or_exit;

pub struct TokensArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
}

pub fn run(args: TokensArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());
    print!("{}", dump_tokens(&source, args.raw, args.spans));
}

/// One token per line. Words that can act as keywords show the kind the parser may give them.
pub fn dump_tokens(source: &str, raw: bool, spans: bool) -> String {
    let mut out = String::new();
    for token in lex(source) {
        if !raw && token.kind.is_trivia() {
            continue;
        }
        let text = token_text(source, &token);
        write!(out, "{:?}", token.kind).expect("String write never fails");
        if spans {
            write!(
                out,
                " [{}..{}]",
                u32::from(token.span.start()),
                u32::from(token.span.end())
            )
            .expect("String write never fails");
        }
        write!(out, " {:?}", text).expect("String write never fails");
        if token.kind == SyntaxKind::Identifier
            && let Some(keyword) = keyword_kind(text)
        {
            write!(out, " ({:?})", keyword).expect("String write never fails");
        }
        out.push('\n');
    }
    out
}
