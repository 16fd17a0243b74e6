use crate::diagnostics::DiagnosticKind;
use crate::parser::tests::in_function;
use crate::parser::{Parse, SyntaxKind, parse};

#[test]
fn contract_body_at_end_of_input() {
    let res = Parse::expect_invalid("contract A {");

    insta::assert_snapshot!(res, @"error at 11..12: missing closing `}`; reached end of input (related: brace opened here at 11..12)");
}

#[test]
fn contract_body_closed_by_next_declaration() {
    let input = "contract A {\n    uint x;\ncontract B {}\n";
    let parse = parse(input);

    let kinds: Vec<_> = parse.diagnostics().filtered().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::UnclosedBrace]);

    let contracts = parse
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ContractDeclaration)
        .count();
    assert_eq!(contracts, 2);
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn condition_paren() {
    let res = Parse::expect_invalid(&in_function("if (a return;"));

    insta::assert_snapshot!(res, @"error at 18..27: missing closing `)`; found `return` (related: parenthesis opened here at 18..19)");
}

#[test]
fn function_body_at_end_of_input() {
    let input = in_function("uint x = 1;").trim_end().trim_end_matches('}').to_string();
    let parse = parse(&input);

    let unclosed: Vec<_> = parse
        .diagnostics()
        .filtered()
        .into_iter()
        .filter(|d| d.kind() == DiagnosticKind::UnclosedBrace)
        .collect();
    assert_eq!(unclosed.len(), 1);
    assert_eq!(u32::from(unclosed[0].range().start()), 13);
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn index_bracket() {
    let parse = parse(&in_function("x[1 = 2;"));

    let kinds: Vec<_> = parse.diagnostics().filtered().iter().map(|d| d.kind()).collect();
    assert!(kinds.contains(&DiagnosticKind::UnclosedBracket), "{kinds:?}");
}
