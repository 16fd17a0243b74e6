use crate::parser::{Field, SyntaxKind, parse};
use indoc::indoc;

const TOKEN: &str = indoc! {r#"
pragma solidity ^0.8.20;

import {IERC20} from "./IERC20.sol";

contract Token is IERC20 {
    mapping(address => uint256) private balances;
    uint256 public totalSupply;

    event Transfer(address indexed from, address indexed to, uint256 value);

    function transfer(address to, uint256 amount) external returns (bool) {
        balances[msg.sender] -= amount;
        balances[to] += amount;
        emit Transfer(msg.sender, to, amount);
        return true;
    }
}
"#};

#[test]
fn every_field_entry_labels_exactly_one_element() {
    let parse = parse(TOKEN);
    assert!(parse.diagnostics().is_empty(), "{}", parse.diagnostics());

    let labeled = parse
        .syntax()
        .descendants_with_tokens()
        .filter(|el| parse.field(el).is_some())
        .count();
    assert_eq!(labeled, parse.fields().len());
}

#[test]
fn fields_never_label_trivia_or_empty_ranges() {
    let parse = parse(TOKEN);
    for (kind, range, field) in parse.fields().iter() {
        assert!(!kind.is_trivia(), "{field} labels trivia");
        assert!(!range.is_empty(), "{field} labels an empty {kind:?}");
    }
}

#[test]
fn child_by_field_navigation() {
    let parse = parse(TOKEN);
    let function = parse
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::FunctionDefinition)
        .unwrap();

    let name = parse.child_by_field(&function, Field::Name).unwrap();
    assert_eq!(name.to_string(), "transfer");

    let returns = parse.child_by_field(&function, Field::ReturnType).unwrap();
    assert_eq!(returns.kind(), SyntaxKind::ReturnTypeDefinition);

    let body = parse.child_by_field(&function, Field::Body).unwrap();
    assert_eq!(body.kind(), SyntaxKind::FunctionBody);

    assert!(parse.child_by_field(&function, Field::Value).is_none());
}

#[test]
fn repeated_fields_keep_source_order() {
    let parse = parse("pragma solidity >=0.8.0 <0.9.0;");
    let token = parse
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::SolidityPragmaToken)
        .unwrap();

    let constraints: Vec<String> = parse
        .children_by_field(&token, Field::VersionConstraint)
        .map(|el| el.to_string())
        .collect();
    assert_eq!(constraints, [">=", "0.8.0", "<", "0.9.0"]);
}

#[test]
fn field_names() {
    assert_eq!(Field::ReturnType.to_string(), "return_type");
    assert_eq!(Field::VersionConstraint.as_str(), "version_constraint");
    assert_eq!(Field::Else.to_string(), "else");
}
