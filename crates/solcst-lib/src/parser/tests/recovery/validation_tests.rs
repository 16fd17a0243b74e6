use crate::parser::parse;

#[test]
fn duplicate_visibility() {
    let parse = parse("contract C { uint public public x; }");
    assert!(parse.diagnostics().is_empty());

    let warnings = parse.validate_modifiers();
    insta::assert_snapshot!(warnings.to_string(), @"warning at 25..31: `public` is specified more than once (related: first specified here at 18..24) (hint: remove the repeated modifier)");
}

#[test]
fn conflicting_visibility() {
    let parse = parse("function f() public private {}");

    let warnings = parse.validate_modifiers();
    insta::assert_snapshot!(warnings.to_string(), @"warning at 20..27: conflicting modifiers: `public` and `private` (related: first specified here at 13..19)");
}

#[test]
fn conflicting_mutability_in_function_type() {
    let parse = parse("contract C { function () pure view f; }");

    let warnings = parse.validate_modifiers();
    assert_eq!(warnings.warning_count(), 1, "{warnings}");
}

#[test]
fn distinct_modifiers_are_fine() {
    let parse = parse("contract C { function f() external view virtual override returns (uint) {} }");

    assert!(parse.validate_modifiers().is_empty());
}

#[test]
fn warnings_do_not_fail_strict_parse() {
    let parse = parse("contract C { uint constant constant X = 1; }");
    assert!(parse.validate_modifiers().has_warnings());
    assert!(parse.into_result().is_ok());
}
