use crate::diagnostics::DiagnosticKind;
use crate::parser::tests::in_function;
use crate::parser::tests::recovery::error_nodes;
use crate::parser::{ParseOptions, parse, parse_with};

#[test]
fn deeply_nested_parentheses_hit_the_limit() {
    let depth = 100;
    let body = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let input = in_function(&body);

    let parse = parse_with(&input, ParseOptions { recursion_limit: 32 });

    let kinds: Vec<_> = parse.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::RecursionLimitExceeded]);
    assert_eq!(
        parse.diagnostics().iter().next().unwrap().message(),
        "nesting is too deep: more than 32 levels"
    );
    assert_eq!(error_nodes(&parse), 1);
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn deeply_nested_blocks_hit_the_default_limit() {
    let depth = 300;
    let input = in_function(&format!("{}{}", "{".repeat(depth), "}".repeat(depth)));

    let parse = parse(&input);

    assert_eq!(parse.diagnostics().len(), 1);
    assert_eq!(
        parse.diagnostics().iter().next().unwrap().kind(),
        DiagnosticKind::RecursionLimitExceeded
    );
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn nesting_under_the_limit_is_clean() {
    let input = in_function(&format!("x = {}1{};", "(".repeat(20), ")".repeat(20)));

    assert!(parse(&input).diagnostics().is_empty());
}

fn power_chain(operators: usize) -> String {
    in_function(&format!("x = a{};", " ** a".repeat(operators)))
}

#[test]
fn long_power_chain_hits_the_limit() {
    let input = power_chain(100);

    let parse = parse_with(&input, ParseOptions { recursion_limit: 32 });

    let kinds: Vec<_> = parse.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::RecursionLimitExceeded]);
    assert_eq!(error_nodes(&parse), 1);
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn very_long_power_chain_is_reported_not_fatal() {
    let input = power_chain(5000);

    let parse = parse(&input);

    assert_eq!(parse.diagnostics().len(), 1);
    assert_eq!(
        parse.diagnostics().iter().next().unwrap().kind(),
        DiagnosticKind::RecursionLimitExceeded
    );
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn power_chain_under_the_limit_is_clean() {
    assert!(parse(&power_chain(150)).diagnostics().is_empty());
}

#[test]
fn long_left_associative_chain_is_clean() {
    let input = in_function(&format!("x = a{};", " + a".repeat(2000)));

    let parse = parse(&input);

    assert!(parse.diagnostics().is_empty(), "{}", parse.diagnostics());
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn deep_yul_blocks_hit_the_limit() {
    let depth = 80;
    let input = in_function(&format!(
        "assembly {}{}",
        "{".repeat(depth),
        "}".repeat(depth)
    ));

    let parse = parse_with(&input, ParseOptions { recursion_limit: 64 });

    assert!(
        parse
            .diagnostics()
            .iter()
            .any(|d| d.kind() == DiagnosticKind::RecursionLimitExceeded)
    );
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn broken_inputs_cover_every_byte() {
    let inputs = [
        "",
        "}",
        "contract",
        "contract C { function",
        "pragma solidity ^;",
        "import {A as} from;",
        "function f() { assembly { let x := } }",
        "contract C { mapping(uint => ) m; }",
        "contract C { function f() { try } }",
        "/* unterminated",
        "\"unterminated",
        "contract C { event E(uint indexed indexed); }",
        "library L { using for; }",
        "function f() { (uint a, = b; }",
    ];
    for input in inputs {
        let parse = parse(input);
        assert_eq!(parse.syntax().to_string(), input, "{input:?}");
    }
}
