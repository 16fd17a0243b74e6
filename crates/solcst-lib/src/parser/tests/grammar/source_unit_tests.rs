use crate::parser::{Parse, SyntaxKind};
use indoc::indoc;

#[test]
fn pragma_contract_and_function() {
    let input = indoc! {r#"
    pragma solidity ^0.8.0;
    contract C {
        uint256 public x;
        function f() public returns (uint256) {
            return x;
        }
    }
    "#};

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    SourceFile
      PragmaDirective
        PragmaKw "pragma"
        SolidityPragmaToken
          SolidityKw "solidity"
          version_constraint: SolidityVersionComparisonOperator
            Caret "^"
          version_constraint: SolidityVersion
            DecimalNumber "0.8"
            DecimalNumber ".0"
        Semicolon ";"
      ContractDeclaration
        ContractKw "contract"
        name: Identifier "C"
        body: ContractBody
          BraceOpen "{"
          StateVariableDeclaration
            type: TypeName
              PrimitiveType
                Identifier "uint256"
            visibility: Visibility
              PublicKw "public"
            name: Identifier "x"
            Semicolon ";"
          FunctionDefinition
            FunctionKw "function"
            name: Identifier "f"
            ParenOpen "("
            ParenClose ")"
            Visibility
              PublicKw "public"
            return_type: ReturnTypeDefinition
              ReturnsKw "returns"
              ParenOpen "("
              Parameter
                type: TypeName
                  PrimitiveType
                    Identifier "uint256"
              ParenClose ")"
            body: FunctionBody
              BraceOpen "{"
              Statement
                ReturnStatement
                  ReturnKw "return"
                  Expression
                    Identifier "x"
                  Semicolon ";"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn leading_comment_stays_inside_root() {
    let input = "// SPDX\ncontract C {}\n";

    let res = Parse::expect_valid_cst_full(input);

    insta::assert_snapshot!(res, @r#"
    SourceFile [0..22]
      LineComment [0..7] "// SPDX"
      Newline [7..8] "\n"
      ContractDeclaration [8..21]
        ContractKw [8..16] "contract"
        Whitespace [16..17] " "
        name: Identifier [17..18] "C"
        Whitespace [18..19] " "
        body: ContractBody [19..21]
          BraceOpen [19..20] "{"
          BraceClose [20..21] "}"
      Newline [21..22] "\n"
    "#);
}

#[test]
fn empty_source() {
    insta::assert_snapshot!(Parse::expect_valid_cst(""), @"SourceFile");
    insta::assert_snapshot!(Parse::expect_valid_cst("  \n// only a comment\n"), @"SourceFile");
}

#[test]
fn version_ranges_and_vendor_pragma() {
    let input = indoc! {r#"
    pragma solidity >=0.4.22 <0.9.0;
    pragma abicoder v2;
    "#};

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    SourceFile
      PragmaDirective
        PragmaKw "pragma"
        SolidityPragmaToken
          SolidityKw "solidity"
          version_constraint: SolidityVersionComparisonOperator
            GtEq ">="
          version_constraint: SolidityVersion
            DecimalNumber "0.4"
            DecimalNumber ".22"
          version_constraint: SolidityVersionComparisonOperator
            Lt "<"
          version_constraint: SolidityVersion
            DecimalNumber "0.9"
            DecimalNumber ".0"
        Semicolon ";"
      PragmaDirective
        PragmaKw "pragma"
        AnyPragmaToken
          Identifier "abicoder"
          PragmaValue
            Identifier "v2"
        Semicolon ";"
    "#);
}

#[test]
fn wildcard_version_and_alternatives() {
    let input = "pragma solidity 0.4.* || ^0.5.0;";

    let res = Parse::expect_valid_node(input, SyntaxKind::SolidityPragmaToken);

    insta::assert_snapshot!(res, @r#"
    SolidityPragmaToken
      SolidityKw "solidity"
      version_constraint: SolidityVersion
        DecimalNumber "0.4"
        Dot "."
        Star "*"
      PipePipe "||"
      version_constraint: SolidityVersionComparisonOperator
        Caret "^"
      version_constraint: SolidityVersion
        DecimalNumber "0.5"
        DecimalNumber ".0"
    "#);
}

#[test]
fn hyphen_range_version() {
    let input = "pragma solidity 0.6.0 - 0.8.0;";

    let res = Parse::expect_valid_node(input, SyntaxKind::SolidityPragmaToken);

    insta::assert_snapshot!(res, @r#"
    SolidityPragmaToken
      SolidityKw "solidity"
      version_constraint: SolidityVersion
        DecimalNumber "0.6"
        DecimalNumber ".0"
      Minus "-"
      version_constraint: SolidityVersion
        DecimalNumber "0.8"
        DecimalNumber ".0"
    "#);
}

#[test]
fn import_shapes() {
    let input = indoc! {r#"
    import "a.sol";
    import "b.sol" as B;
    import * as C from "c.sol";
    import {X, Y as Z} from "d.sol";
    "#};

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    SourceFile
      ImportDirective
        ImportKw "import"
        source: QuotedString "\"a.sol\""
        Semicolon ";"
      ImportDirective
        ImportKw "import"
        source: QuotedString "\"b.sol\""
        AsKw "as"
        alias: Identifier "B"
        Semicolon ";"
      ImportDirective
        ImportKw "import"
        Star "*"
        AsKw "as"
        alias: Identifier "C"
        FromKw "from"
        source: QuotedString "\"c.sol\""
        Semicolon ";"
      ImportDirective
        ImportKw "import"
        BraceOpen "{"
        import_name: Identifier "X"
        Comma ","
        import_name: Identifier "Y"
        AsKw "as"
        alias: Identifier "Z"
        BraceClose "}"
        FromKw "from"
        source: QuotedString "\"d.sol\""
        Semicolon ";"
    "#);
}

#[test]
fn file_level_declarations() {
    let input = indoc! {r#"
    type Price is uint128;
    uint256 constant MAX = 10;
    error Unauthorized(address caller);
    using Lib for uint256 global;
    "#};

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    SourceFile
      UserDefinedTypeDefinition
        TypeKw "type"
        name: Identifier "Price"
        IsKw "is"
        PrimitiveType
          Identifier "uint128"
        Semicolon ";"
      ConstantVariableDeclaration
        type: TypeName
          PrimitiveType
            Identifier "uint256"
        ConstantKw "constant"
        name: Identifier "MAX"
        Equals "="
        value: Expression
          NumberLiteral
            DecimalNumber "10"
        Semicolon ";"
      ErrorDeclaration
        ErrorKw "error"
        name: Identifier "Unauthorized"
        ParenOpen "("
        ErrorParameter
          type: TypeName
            PrimitiveType
              Identifier "address"
          name: Identifier "caller"
        ParenClose ")"
        Semicolon ";"
      UsingDirective
        UsingKw "using"
        TypeAlias
          Identifier "Lib"
        ForKw "for"
        source: TypeName
          PrimitiveType
            Identifier "uint256"
        GlobalKw "global"
        Semicolon ";"
    "#);
}

#[test]
fn free_function() {
    let input = "function add(uint a, uint b) pure returns (uint) { return a + b; }";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    SourceFile
      FunctionDefinition
        FunctionKw "function"
        name: Identifier "add"
        ParenOpen "("
        Parameter
          type: TypeName
            PrimitiveType
              Identifier "uint"
          name: Identifier "a"
        Comma ","
        Parameter
          type: TypeName
            PrimitiveType
              Identifier "uint"
          name: Identifier "b"
        ParenClose ")"
        StateMutability
          PureKw "pure"
        return_type: ReturnTypeDefinition
          ReturnsKw "returns"
          ParenOpen "("
          Parameter
            type: TypeName
              PrimitiveType
                Identifier "uint"
          ParenClose ")"
        body: FunctionBody
          BraceOpen "{"
          Statement
            ReturnStatement
              ReturnKw "return"
              Expression
                BinaryExpression
                  left: Expression
                    Identifier "a"
                  operator: Plus "+"
                  right: Expression
                    Identifier "b"
              Semicolon ";"
          BraceClose "}"
    "#);
}
