use crate::parser::tests::in_function;
use crate::parser::tests::recovery::error_nodes;
use crate::parser::{Parse, SyntaxKind, parse};

#[test]
fn garbage_between_members() {
    let input = "contract C { # }";
    let res = Parse::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 13..14: invalid characters");
    assert_eq!(error_nodes(&parse(input)), 1);
}

#[test]
fn stray_top_level_tokens_resync_at_keyword() {
    let input = "42 +;\ncontract C {}\n";
    let parse = parse(input);

    insta::assert_snapshot!(Parse::expect_invalid(input), @"error at 0..2: expected a directive or declaration (hint: top level accepts pragmas, imports and declarations)");
    assert_eq!(error_nodes(&parse), 1);

    let contract = parse
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::ContractDeclaration)
        .unwrap();
    assert_eq!(contract.text().to_string().trim(), "contract C {}");
}

#[test]
fn stray_closer_in_function_body() {
    let input = in_function(") x = 1;");
    let res = Parse::expect_invalid(&input);

    insta::assert_snapshot!(res, @"error at 15..16: expected a statement");
    assert_eq!(error_nodes(&parse(&input)), 1);
}

#[test]
fn missing_initializer() {
    let res = Parse::expect_invalid(&in_function("uint x = ;\nreturn;"));

    insta::assert_snapshot!(res, @"error at 24..25: expected an expression");
}

#[test]
fn missing_semicolon_after_state_variable() {
    let res = Parse::expect_invalid("contract C { uint x }");

    insta::assert_snapshot!(res, @"error at 19..19: expected `;` (fix: insert `;`)");
}

#[test]
fn missing_semicolon_offers_insertion() {
    let res = Parse::expect_invalid_rendered("contract C { uint x }");

    assert!(res.starts_with("error: expected `;`"), "{res}");
    assert!(res.contains("help: insert `;`"), "{res}");
}

#[test]
fn broken_member_does_not_swallow_next_function() {
    let input = "contract C {\n    = 1;\n    function f() {}\n}\n";
    let parse = parse(input);

    assert_eq!(parse.diagnostics().filtered().len(), 1);
    assert_eq!(error_nodes(&parse), 1);
    assert!(
        parse
            .syntax()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::FunctionDefinition)
    );
}

#[test]
fn into_result_rejects_errors() {
    let err = parse("contract {").into_result().unwrap_err();
    assert!(err.to_string().starts_with("parsing failed with"), "{err}");
}

#[test]
fn into_result_passes_clean_source() {
    assert!(parse("contract C {}").into_result().is_ok());
}
