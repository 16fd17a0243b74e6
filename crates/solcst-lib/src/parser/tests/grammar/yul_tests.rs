use crate::parser::tests::in_function;
use crate::parser::{Parse, SyntaxKind};
use indoc::indoc;

#[test]
fn solidity_keywords_are_plain_identifiers() {
    let input = in_function("assembly { let memory := payable contract := library }");

    let res = Parse::expect_valid_node(&input, SyntaxKind::AssemblyStatement);

    insta::assert_snapshot!(res, @r#"
    AssemblyStatement
      AssemblyKw "assembly"
      BraceOpen "{"
      YulVariableDeclaration
        LetKw "let"
        left: YulIdentifier
          Identifier "memory"
        ColonEquals ":="
        right: YulPath
          YulIdentifier
            Identifier "payable"
      YulAssignment
        YulPath
          YulIdentifier
            Identifier "contract"
        ColonEquals ":="
        right: YulPath
          YulIdentifier
            Identifier "library"
      BraceClose "}"
    "#);
}

#[test]
fn dialect_flags_and_control_flow() {
    let input = in_function(indoc! {r#"
    assembly "evmasm" ("memory-safe") {
        function double(x) -> r { r := mul(x, 2) }
        for { let i := 0 } lt(i, 4) { i := add(i, 1) } { sstore(i, double(i)) }
        switch calldatasize()
        case 0 { revert(0, 0) }
        default { leave }
    }
    "#});

    let res = Parse::expect_valid_node(&input, SyntaxKind::AssemblyStatement);

    insta::assert_snapshot!(res, @r#"
    AssemblyStatement
      AssemblyKw "assembly"
      dialect: QuotedString "\"evmasm\""
      AssemblyFlags
        ParenOpen "("
        QuotedString "\"memory-safe\""
        ParenClose ")"
      BraceOpen "{"
      YulFunctionDefinition
        FunctionKw "function"
        YulIdentifier
          Identifier "double"
        ParenOpen "("
        YulIdentifier
          Identifier "x"
        ParenClose ")"
        Arrow "->"
        YulIdentifier
          Identifier "r"
        YulBlock
          BraceOpen "{"
          YulAssignment
            YulPath
              YulIdentifier
                Identifier "r"
            ColonEquals ":="
            right: YulFunctionCall
              function: YulEvmBuiltin
                Identifier "mul"
              ParenOpen "("
              YulPath
                YulIdentifier
                  Identifier "x"
              Comma ","
              YulDecimalNumber
                DecimalNumber "2"
              ParenClose ")"
          BraceClose "}"
      YulForStatement
        ForKw "for"
        YulBlock
          BraceOpen "{"
          YulVariableDeclaration
            LetKw "let"
            left: YulIdentifier
              Identifier "i"
            ColonEquals ":="
            right: YulDecimalNumber
              DecimalNumber "0"
          BraceClose "}"
        YulFunctionCall
          function: YulEvmBuiltin
            Identifier "lt"
          ParenOpen "("
          YulPath
            YulIdentifier
              Identifier "i"
          Comma ","
          YulDecimalNumber
            DecimalNumber "4"
          ParenClose ")"
        YulBlock
          BraceOpen "{"
          YulAssignment
            YulPath
              YulIdentifier
                Identifier "i"
            ColonEquals ":="
            right: YulFunctionCall
              function: YulEvmBuiltin
                Identifier "add"
              ParenOpen "("
              YulPath
                YulIdentifier
                  Identifier "i"
              Comma ","
              YulDecimalNumber
                DecimalNumber "1"
              ParenClose ")"
          BraceClose "}"
        YulBlock
          BraceOpen "{"
          YulFunctionCall
            function: YulEvmBuiltin
              Identifier "sstore"
            ParenOpen "("
            YulPath
              YulIdentifier
                Identifier "i"
            Comma ","
            YulFunctionCall
              function: YulIdentifier
                Identifier "double"
              ParenOpen "("
              YulPath
                YulIdentifier
                  Identifier "i"
              ParenClose ")"
            ParenClose ")"
          BraceClose "}"
      YulSwitchStatement
        SwitchKw "switch"
        YulFunctionCall
          function: YulEvmBuiltin
            Identifier "calldatasize"
          ParenOpen "("
          ParenClose ")"
        CaseKw "case"
        YulDecimalNumber
          DecimalNumber "0"
        YulBlock
          BraceOpen "{"
          YulFunctionCall
            function: YulEvmBuiltin
              Identifier "revert"
            ParenOpen "("
            YulDecimalNumber
              DecimalNumber "0"
            Comma ","
            YulDecimalNumber
              DecimalNumber "0"
            ParenClose ")"
          BraceClose "}"
        DefaultKw "default"
        YulBlock
          BraceOpen "{"
          YulLeave
            LeaveKw "leave"
          BraceClose "}"
      BraceClose "}"
    "#);
}

#[test]
fn multi_target_assignment() {
    let input = in_function("assembly { x, y := f() }");

    let res = Parse::expect_valid_node(&input, SyntaxKind::YulAssignment);

    insta::assert_snapshot!(res, @r#"
    YulAssignment
      YulPath
        YulIdentifier
          Identifier "x"
      Comma ","
      YulPath
        YulIdentifier
          Identifier "y"
      ColonEquals ":="
      right: YulFunctionCall
        function: YulIdentifier
          Identifier "f"
        ParenOpen "("
        ParenClose ")"
    "#);
}

#[test]
fn member_path() {
    let input = in_function("assembly { let v := s.slot }");

    let res = Parse::expect_valid_node(&input, SyntaxKind::YulVariableDeclaration);

    insta::assert_snapshot!(res, @r#"
    YulVariableDeclaration
      LetKw "let"
      left: YulIdentifier
        Identifier "v"
      ColonEquals ":="
      right: YulPath
        YulIdentifier
          Identifier "s"
        Dot "."
        YulIdentifier
          Identifier "slot"
    "#);
}

#[test]
fn literal_kinds() {
    let input = in_function(r#"assembly { if eq(a, true) { sstore(0x20, "ok") } }"#);

    let res = Parse::expect_valid_node(&input, SyntaxKind::YulIfStatement);

    insta::assert_snapshot!(res, @r#"
    YulIfStatement
      IfKw "if"
      YulFunctionCall
        function: YulEvmBuiltin
          Identifier "eq"
        ParenOpen "("
        YulPath
          YulIdentifier
            Identifier "a"
        Comma ","
        YulBoolean
          TrueKw "true"
        ParenClose ")"
      YulBlock
        BraceOpen "{"
        YulFunctionCall
          function: YulEvmBuiltin
            Identifier "sstore"
          ParenOpen "("
          YulHexNumber
            HexNumber "0x20"
          Comma ","
          YulStringLiteral
            QuotedString "\"ok\""
          ParenClose ")"
        BraceClose "}"
    "#);
}

#[test]
fn legacy_two_token_assign() {
    let input = in_function("assembly { let x : = 1 }");

    let res = Parse::expect_valid_node(&input, SyntaxKind::YulVariableDeclaration);

    insta::assert_snapshot!(res, @r#"
    YulVariableDeclaration
      LetKw "let"
      left: YulIdentifier
        Identifier "x"
      Colon ":"
      Equals "="
      right: YulDecimalNumber
        DecimalNumber "1"
    "#);
}

#[test]
fn top_level_words_do_not_end_assembly() {
    let input = in_function("assembly { let pragma := 1 import := interface }\nuint after;");

    let res = Parse::expect_valid_node(&input, SyntaxKind::AssemblyStatement);

    assert!(res.contains(r#"Identifier "interface""#), "{res}");
    assert!(!res.contains("after"), "{res}");
}

#[test]
fn multi_target_let_with_call() {
    let input = in_function("assembly { let a, b := f() let (c, d) := g() }");

    Parse::expect_valid_node(&input, SyntaxKind::AssemblyStatement);
}

#[test]
fn multi_target_needs_a_call() {
    let input = in_function("assembly { let a, b := 1 }");

    insta::assert_snapshot!(Parse::expect_invalid(&input), @"error at 38..39: expected a Yul expression: a function call to assign several variables");
}

#[test]
fn multi_target_assignment_needs_a_call() {
    let input = in_function("assembly { x, y := z }");

    insta::assert_snapshot!(Parse::expect_invalid(&input), @"error at 34..35: expected a Yul expression: a function call to assign several variables");
}

#[test]
fn single_target_takes_any_expression() {
    let input = in_function("assembly { let a := 1 a := b }");

    Parse::expect_valid_node(&input, SyntaxKind::AssemblyStatement);
}
