use crate::parser::tests::in_function;
use crate::parser::{Field, Parse, SyntaxKind, SyntaxNode, parse};

#[test]
fn array_declaration_versus_index_assignment() {
    let input = in_function("uint[5] x;\nx[5] = 1;");

    let res = Parse::expect_valid_node(&input, SyntaxKind::FunctionBody);

    insta::assert_snapshot!(res, @r#"
    body: FunctionBody
      BraceOpen "{"
      Statement
        VariableDeclarationStatement
          VariableDeclaration
            type: TypeName
              TypeName
                PrimitiveType
                  Identifier "uint"
              BracketOpen "["
              Expression
                NumberLiteral
                  DecimalNumber "5"
              BracketClose "]"
            name: Identifier "x"
          Semicolon ";"
      Statement
        ExpressionStatement
          Expression
            AssignmentExpression
              left: Expression
                ArrayAccess
                  base: Expression
                    Identifier "x"
                  BracketOpen "["
                  index: Expression
                    NumberLiteral
                      DecimalNumber "5"
                  BracketClose "]"
              Equals "="
              right: Expression
                NumberLiteral
                  DecimalNumber "1"
          Semicolon ";"
      BraceClose "}"
    "#);
}

#[test]
fn if_with_else_block() {
    let input = in_function("if (a) return; else { b(); }");

    let res = Parse::expect_valid_node(&input, SyntaxKind::Statement);

    insta::assert_snapshot!(res, @r#"
    Statement
      IfStatement
        IfKw "if"
        ParenOpen "("
        condition: Expression
          Identifier "a"
        ParenClose ")"
        body: Statement
          ReturnStatement
            ReturnKw "return"
            Semicolon ";"
        ElseKw "else"
        else: Statement
          BlockStatement
            BraceOpen "{"
            Statement
              ExpressionStatement
                Expression
                  CallExpression
                    function: Expression
                      Identifier "b"
                    ParenOpen "("
                    ParenClose ")"
                Semicolon ";"
            BraceClose "}"
    "#);
}

#[test]
fn else_binds_to_innermost_if() {
    let input = in_function("if (a) if (b) x(); else y();");
    let parse = parse(&input);
    assert!(parse.diagnostics().is_empty());

    let ifs: Vec<SyntaxNode> = parse
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::IfStatement)
        .collect();
    assert_eq!(ifs.len(), 2);

    let else_branch = |node: &SyntaxNode| parse.child_by_field(node, Field::Else);
    assert!(else_branch(&ifs[0]).is_none());
    assert!(else_branch(&ifs[1]).is_some());
}

#[test]
fn for_loop() {
    let input = in_function("for (uint i = 0; i < n; i++) {}");

    let res = Parse::expect_valid_node(&input, SyntaxKind::Statement);

    insta::assert_snapshot!(res, @r#"
    Statement
      ForStatement
        ForKw "for"
        ParenOpen "("
        initial: VariableDeclarationStatement
          VariableDeclaration
            type: TypeName
              PrimitiveType
                Identifier "uint"
            name: Identifier "i"
          Equals "="
          value: Expression
            NumberLiteral
              DecimalNumber "0"
          Semicolon ";"
        condition: ExpressionStatement
          Expression
            BinaryExpression
              left: Expression
                Identifier "i"
              operator: Lt "<"
              right: Expression
                Identifier "n"
          Semicolon ";"
        update: Expression
          UpdateExpression
            argument: Expression
              Identifier "i"
            operator: PlusPlus "++"
        ParenClose ")"
        body: Statement
          BlockStatement
            BraceOpen "{"
            BraceClose "}"
    "#);
}

#[test]
fn empty_for_header() {
    let input = in_function("for (;;) {}");

    let res = Parse::expect_valid_node(&input, SyntaxKind::ForStatement);

    insta::assert_snapshot!(res, @r#"
    ForStatement
      ForKw "for"
      ParenOpen "("
      initial: Semicolon ";"
      condition: Semicolon ";"
      ParenClose ")"
      body: Statement
        BlockStatement
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn while_and_do_while() {
    let input = in_function("while (true) break;\ndo continue; while (false);");

    let res = Parse::expect_valid_node(&input, SyntaxKind::FunctionBody);

    insta::assert_snapshot!(res, @r#"
    body: FunctionBody
      BraceOpen "{"
      Statement
        WhileStatement
          WhileKw "while"
          ParenOpen "("
          condition: Expression
            BooleanLiteral
              TrueKw "true"
          ParenClose ")"
          body: Statement
            BreakStatement
              BreakKw "break"
              Semicolon ";"
      Statement
        DoWhileStatement
          DoKw "do"
          body: Statement
            ContinueStatement
              ContinueKw "continue"
              Semicolon ";"
          WhileKw "while"
          ParenOpen "("
          condition: Expression
            BooleanLiteral
              FalseKw "false"
          ParenClose ")"
          Semicolon ";"
      BraceClose "}"
    "#);
}

#[test]
fn emit_and_revert() {
    let input = in_function("emit Transfer(a, 1);\nrevert Errors.Bad(2);\nrevert();");

    let res = Parse::expect_valid_node(&input, SyntaxKind::FunctionBody);

    insta::assert_snapshot!(res, @r#"
    body: FunctionBody
      BraceOpen "{"
      Statement
        EmitStatement
          EmitKw "emit"
          name: Expression
            Identifier "Transfer"
          ParenOpen "("
          CallArgument
            Expression
              Identifier "a"
          Comma ","
          CallArgument
            Expression
              NumberLiteral
                DecimalNumber "1"
          ParenClose ")"
          Semicolon ";"
      Statement
        RevertStatement
          RevertKw "revert"
          error: Expression
            MemberExpression
              object: Identifier "Errors"
              Dot "."
              property: Identifier "Bad"
          RevertArguments
            ParenOpen "("
            CallArgument
              Expression
                NumberLiteral
                  DecimalNumber "2"
            ParenClose ")"
          Semicolon ";"
      Statement
        RevertStatement
          RevertKw "revert"
          RevertArguments
            ParenOpen "("
            ParenClose ")"
          Semicolon ";"
      BraceClose "}"
    "#);
}

#[test]
fn try_with_returns_and_catch_clauses() {
    let input = in_function("try t.f() returns (uint v) {} catch Error(string memory r) {} catch {}");

    let res = Parse::expect_valid_node(&input, SyntaxKind::TryStatement);

    insta::assert_snapshot!(res, @r#"
    TryStatement
      TryKw "try"
      attempt: Expression
        CallExpression
          function: Expression
            MemberExpression
              object: Identifier "t"
              Dot "."
              property: Identifier "f"
          ParenOpen "("
          ParenClose ")"
      ReturnsKw "returns"
      ParenOpen "("
      Parameter
        type: TypeName
          PrimitiveType
            Identifier "uint"
        name: Identifier "v"
      ParenClose ")"
      body: BlockStatement
        BraceOpen "{"
        BraceClose "}"
      CatchClause
        CatchKw "catch"
        Identifier "Error"
        ParenOpen "("
        Parameter
          type: TypeName
            PrimitiveType
              Identifier "string"
          location: MemoryKw "memory"
          name: Identifier "r"
        ParenClose ")"
        body: BlockStatement
          BraceOpen "{"
          BraceClose "}"
      CatchClause
        CatchKw "catch"
        body: BlockStatement
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn try_block_is_not_a_struct_literal() {
    let input = in_function("try f() {} catch {}");

    let res = Parse::expect_valid_node(&input, SyntaxKind::TryStatement);

    insta::assert_snapshot!(res, @r#"
    TryStatement
      TryKw "try"
      attempt: Expression
        CallExpression
          function: Expression
            Identifier "f"
          ParenOpen "("
          ParenClose ")"
      body: BlockStatement
        BraceOpen "{"
        BraceClose "}"
      CatchClause
        CatchKw "catch"
        body: BlockStatement
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn try_attempt_with_call_options() {
    let input = in_function("try c.f{value: 1}() returns (uint v) {} catch {}");

    let res = Parse::expect_valid_node(&input, SyntaxKind::TryStatement);

    insta::assert_snapshot!(res, @r#"
    TryStatement
      TryKw "try"
      attempt: Expression
        CallExpression
          function: Expression
            StructExpression
              type: Expression
                MemberExpression
                  object: Identifier "c"
                  Dot "."
                  property: Identifier "f"
              BraceOpen "{"
              StructFieldAssignment
                name: Identifier "value"
                Colon ":"
                value: Expression
                  NumberLiteral
                    DecimalNumber "1"
              BraceClose "}"
          ParenOpen "("
          ParenClose ")"
      ReturnsKw "returns"
      ParenOpen "("
      Parameter
        type: TypeName
          PrimitiveType
            Identifier "uint"
        name: Identifier "v"
      ParenClose ")"
      body: BlockStatement
        BraceOpen "{"
        BraceClose "}"
      CatchClause
        CatchKw "catch"
        body: BlockStatement
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn try_attempt_with_gas_and_value() {
    let input = in_function(
        "try c.f{gas: 1000, value: 2}(x) {} catch Error(string memory r) {} catch (bytes memory) {}",
    );

    let parse = parse(&input);
    assert!(parse.diagnostics().is_empty(), "{}", parse.diagnostics());

    let try_statement = parse
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::TryStatement)
        .unwrap();
    let options = try_statement
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::StructFieldAssignment)
        .count();
    let catches = try_statement
        .children()
        .filter(|n| n.kind() == SyntaxKind::CatchClause)
        .count();
    assert_eq!(options, 2);
    assert_eq!(catches, 2);
    assert!(parse.child_by_field(&try_statement, Field::Body).is_some());
}

#[test]
fn unchecked_block_and_tuples() {
    let input = in_function("unchecked { i--; }\n(uint a, , bool c) = f();\n(x, y) = (y, x);");

    let res = Parse::expect_valid_node(&input, SyntaxKind::FunctionBody);

    insta::assert_snapshot!(res, @r#"
    body: FunctionBody
      BraceOpen "{"
      Statement
        BlockStatement
          Unchecked
            UncheckedKw "unchecked"
          BraceOpen "{"
          Statement
            ExpressionStatement
              Expression
                UpdateExpression
                  argument: Expression
                    Identifier "i"
                  operator: MinusMinus "--"
              Semicolon ";"
          BraceClose "}"
      Statement
        VariableDeclarationStatement
          VariableDeclarationTuple
            ParenOpen "("
            VariableDeclaration
              type: TypeName
                PrimitiveType
                  Identifier "uint"
              name: Identifier "a"
            Comma ","
            Comma ","
            VariableDeclaration
              type: TypeName
                PrimitiveType
                  Identifier "bool"
              name: Identifier "c"
            ParenClose ")"
          Equals "="
          value: Expression
            CallExpression
              function: Expression
                Identifier "f"
              ParenOpen "("
              ParenClose ")"
          Semicolon ";"
      Statement
        ExpressionStatement
          Expression
            AssignmentExpression
              left: Expression
                TupleExpression
                  ParenOpen "("
                  Expression
                    Identifier "x"
                  Comma ","
                  Expression
                    Identifier "y"
                  ParenClose ")"
              Equals "="
              right: Expression
                TupleExpression
                  ParenOpen "("
                  Expression
                    Identifier "y"
                  Comma ","
                  Expression
                    Identifier "x"
                  ParenClose ")"
          Semicolon ";"
      BraceClose "}"
    "#);
}

#[test]
fn legacy_var_tuple() {
    let input = in_function("var (a, , c) = f();");

    let res = Parse::expect_valid_node(&input, SyntaxKind::VariableDeclarationTuple);

    insta::assert_snapshot!(res, @r#"
    VariableDeclarationTuple
      VarKw "var"
      ParenOpen "("
      Identifier "a"
      Comma ","
      Comma ","
      Identifier "c"
      ParenClose ")"
    "#);
}

#[test]
fn memory_local_with_initializer() {
    let input = in_function("bytes memory data = new bytes(32);");

    let res = Parse::expect_valid_node(&input, SyntaxKind::VariableDeclarationStatement);

    insta::assert_snapshot!(res, @r#"
    VariableDeclarationStatement
      VariableDeclaration
        type: TypeName
          PrimitiveType
            Identifier "bytes"
        location: MemoryKw "memory"
        name: Identifier "data"
      Equals "="
      value: Expression
        NewExpression
          NewKw "new"
          name: TypeName
            PrimitiveType
              Identifier "bytes"
          ParenOpen "("
          CallArgument
            Expression
              NumberLiteral
                DecimalNumber "32"
          ParenClose ")"
      Semicolon ";"
    "#);
}
