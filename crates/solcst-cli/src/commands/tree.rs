use std::path::PathBuf;

use solcst_lib::parse;

use super::source_loader::load_or_exit;

pub struct TreeArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());
    let parse = parse(&source);

    print!(
        "{}",
        parse
            .printer()
            .with_trivia(args.raw)
            .with_spans(args.spans)
            .dump()
    );

    // The tree is printed either way; errors only decide the exit code.
    if !parse.diagnostics().is_empty() {
        eprint!(
            "{}",
            parse
                .diagnostics()
                .render_filtered_colored(&source, args.color)
        );
    }
    if parse.diagnostics().has_errors() {
        std::process::exit(1);
    }
}
