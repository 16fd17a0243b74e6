use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use solcst_lib::diagnostics::DiagnosticMessage;
use solcst_lib::{Diagnostics, parse};

use super::source_loader::{display_name, load_path};

pub struct CheckArgs {
    pub source_paths: Vec<PathBuf>,
    pub strict: bool,
    pub json: bool,
    pub color: bool,
}

/// Outcome for one file, in the order the files were given.
pub struct FileReport {
    pub name: String,
    pub source: String,
    pub diagnostics: Diagnostics,
    pub failed: bool,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    file: &'a str,
    #[serde(flatten)]
    diagnostic: &'a DiagnosticMessage,
}

pub fn run(args: CheckArgs) {
    let reports: Vec<Result<FileReport, String>> = args
        .source_paths
        .par_iter()
        .map(|path| -> Result<FileReport, String> {
            let name = display_name(path);
            let source = load_path(path).map_err(|e| e.to_string())?;
            Ok(check_source(name, source, args.strict))
        })
        .collect();

    let mut failed = false;
    for report in &reports {
        let report = match report {
            Ok(report) => report,
            Err(msg) => {
                eprintln!("error: {}", msg);
                failed = true;
                continue;
            }
        };
        failed |= report.failed;
        if args.json {
            for line in json_lines(report) {
                println!("{}", line);
            }
        } else if !report.diagnostics.is_empty() {
            eprint!(
                "{}",
                report
                    .diagnostics
                    .filtered_printer(&report.source)
                    .path(&report.name)
                    .colored(args.color)
                    .render()
            );
            eprintln!();
        }
    }

    // Silent on success (like cargo check)
    if failed {
        std::process::exit(1);
    }
}

/// Parses one file. Modifier validation only runs in strict mode, where warnings fail too.
pub fn check_source(name: String, source: String, strict: bool) -> FileReport {
    let parse = parse(&source);
    let mut diagnostics = parse.diagnostics().clone();
    if strict {
        diagnostics.extend(parse.validate_modifiers());
    }
    let failed = diagnostics.has_errors() || (strict && diagnostics.has_warnings());
    tracing::debug!(
        file = %name,
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "checked"
    );
    FileReport {
        name,
        source,
        diagnostics,
        failed,
    }
}

/// Filtered diagnostics as one JSON object per line.
pub fn json_lines(report: &FileReport) -> Vec<String> {
    report
        .diagnostics
        .filtered()
        .iter()
        .filter_map(|diagnostic| {
            serde_json::to_string(&JsonDiagnostic {
                file: &report.name,
                diagnostic,
            })
            .ok()
        })
        .collect()
}
