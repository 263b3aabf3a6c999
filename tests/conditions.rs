//! Tests for condition tree compilation, scoring and validation.
mod common;
use common::*;
use flowql::condition::{escape_literal, quote_literal, unescape_literal};
use flowql::prelude::*;

fn cond(id: &str, field: &str, op: Operator, value: &str) -> WhereItem {
    Condition::new(id, field, op, value).into()
}

fn incomplete(id: &str, field: &str, operator: Option<Operator>) -> WhereItem {
    Condition {
        id: id.to_string(),
        field: field.to_string(),
        operator,
        value: None,
        logical_op: None,
    }
    .into()
}

#[test]
fn test_compile_simple_tree() {
    let compiler = WhereCompiler::new();
    assert_eq!(
        compiler.compile(&create_simple_tree()),
        "ds = '2026-01-01' AND (level > '10')"
    );
}

#[test]
fn test_compile_escapes_quotes() {
    let tree = vec![cond("c1", "name", Operator::Eq, "O'Brien")];
    assert_eq!(WhereCompiler::new().compile(&tree), "name = 'O''Brien'");
}

#[test]
fn test_compile_empty_tree_is_empty() {
    assert_eq!(WhereCompiler::new().compile(&[]), "");
}

#[test]
fn test_compile_comparison_operators() {
    let compiler = WhereCompiler::new();
    let cases = [
        (Operator::Eq, "a = 'x'"),
        (Operator::NotEq, "a != 'x'"),
        (Operator::Gt, "a > 'x'"),
        (Operator::Lt, "a < 'x'"),
        (Operator::GtEq, "a >= 'x'"),
        (Operator::LtEq, "a <= 'x'"),
        (Operator::Like, "a LIKE 'x'"),
        (Operator::NotLike, "a NOT LIKE 'x'"),
    ];
    for (op, expected) in cases {
        assert_eq!(compiler.compile(&[cond("c", "a", op, "x")]), expected);
    }
}

#[test]
fn test_compile_in_list() {
    let tree: Vec<WhereItem> =
        vec![Condition::new("c1", "country", Operator::In, vec!["US", "C'A"]).into()];
    assert_eq!(
        WhereCompiler::new().compile(&tree),
        "country IN ('US', 'C''A')"
    );
}

#[test]
fn test_compile_in_with_scalar_value() {
    let tree = vec![cond("c1", "country", Operator::NotIn, "US")];
    assert_eq!(WhereCompiler::new().compile(&tree), "country NOT IN ('US')");
}

#[test]
fn test_compile_between() {
    let tree: Vec<WhereItem> =
        vec![Condition::new("c1", "amount", Operator::Between, vec![1i64, 10]).into()];
    assert_eq!(
        WhereCompiler::new().compile(&tree),
        "amount BETWEEN '1' AND '10'"
    );

    // A half-filled range still renders, validation reports the gap.
    let partial: Vec<WhereItem> =
        vec![Condition::new("c2", "amount", Operator::NotBetween, vec!["5"]).into()];
    assert_eq!(
        WhereCompiler::new().compile(&partial),
        "amount NOT BETWEEN '5' AND ''"
    );
}

#[test]
fn test_compile_null_checks_ignore_value() {
    let tree: Vec<WhereItem> = vec![
        Condition::unary("c1", "email", Operator::IsNull).into(),
        Condition::new("c2", "phone", Operator::IsNotNull, "ignored").into(),
    ];
    assert_eq!(
        WhereCompiler::new().compile(&tree),
        "email IS NULL AND phone IS NOT NULL"
    );
}

#[test]
fn test_compile_non_text_scalars() {
    let tree: Vec<WhereItem> = vec![
        Condition::new("c1", "level", Operator::Gt, 10i64).into(),
        Condition::new("c2", "vip", Operator::Eq, true).into(),
    ];
    assert_eq!(
        WhereCompiler::new().compile(&tree),
        "level > '10' AND vip = 'true'"
    );
}

#[test]
fn test_compile_uses_or_connective() {
    let tree: Vec<WhereItem> = vec![
        cond("c1", "a", Operator::Eq, "1"),
        Condition::new("c2", "b", Operator::Eq, "2")
            .with_logical_op(LogicalOp::Or)
            .into(),
    ];
    assert_eq!(WhereCompiler::new().compile(&tree), "a = '1' OR b = '2'");
}

#[test]
fn test_first_item_connective_is_ignored() {
    let tree: Vec<WhereItem> = vec![
        Condition::new("c1", "a", Operator::Eq, "1")
            .with_logical_op(LogicalOp::Or)
            .into(),
        cond("c2", "b", Operator::Eq, "2"),
    ];
    assert_eq!(WhereCompiler::new().compile(&tree), "a = '1' AND b = '2'");
}

#[test]
fn test_missing_connective_uses_default() {
    let tree = vec![
        cond("c1", "a", Operator::Eq, "1"),
        cond("c2", "b", Operator::Eq, "2"),
    ];
    assert_eq!(WhereCompiler::new().compile(&tree), "a = '1' AND b = '2'");

    let compiler = WhereCompiler::builder()
        .with_default_connective(LogicalOp::Or)
        .build();
    assert_eq!(compiler.compile(&tree), "a = '1' OR b = '2'");
}

#[test]
fn test_incomplete_items_are_skipped_with_their_connective() {
    let tree: Vec<WhereItem> = vec![
        incomplete("c1", "a", None),
        Group::new("g1", vec![]).with_logical_op(LogicalOp::Or).into(),
        cond("c2", "b", Operator::Eq, "2"),
        incomplete("c3", "  ", Some(Operator::Eq)),
        Group::new("g2", vec![incomplete("c4", "", None)])
            .with_logical_op(LogicalOp::And)
            .into(),
    ];
    assert_eq!(WhereCompiler::new().compile(&tree), "b = '2'");
}

#[test]
fn test_wrapping_in_a_group_adds_one_pair_of_parens() {
    let compiler = WhereCompiler::new();
    let tree = create_simple_tree();
    let flat = compiler.compile(&tree);

    let wrapped = compiler.compile(&[Group::new("outer", tree).into()]);
    assert_eq!(wrapped, format!("({})", flat));
}

#[test]
fn test_nested_groups() {
    let tree: Vec<WhereItem> = vec![
        cond("c1", "ds", Operator::Eq, "2026-01-01"),
        Group::new(
            "g1",
            vec![
                cond("c2", "level", Operator::Gt, "10"),
                Group::new(
                    "g2",
                    vec![
                        cond("c3", "channel", Operator::Eq, "ios"),
                        Condition::new("c4", "channel", Operator::Eq, "android")
                            .with_logical_op(LogicalOp::Or)
                            .into(),
                    ],
                )
                .into(),
            ],
        )
        .into(),
    ];
    assert_eq!(
        WhereCompiler::new().compile(&tree),
        "ds = '2026-01-01' AND (level > '10' AND (channel = 'ios' OR channel = 'android'))"
    );
}

#[test]
fn test_escape_literal_round_trip() {
    let raw = r"it's C:\temp\'x'";
    let escaped = escape_literal(raw);
    assert_eq!(escaped, r"it''s C:\\temp\\''x''");
    assert_eq!(unescape_literal(&escaped), raw);
    assert_eq!(quote_literal("plain"), "'plain'");
}

#[test]
fn test_complexity_scores_depth() {
    let compiler = WhereCompiler::new();
    assert_eq!(compiler.complexity(&[]), 0);
    assert_eq!(compiler.complexity(&[cond("c", "a", Operator::Eq, "1")]), 1);
    // c1 at depth 1, g1 at depth 1, c2 at depth 2.
    assert_eq!(compiler.complexity(&create_simple_tree()), 4);
    // nest1 at 1, nest0 at 2, the condition at 3.
    let nested = nest(vec![cond("c", "a", Operator::Eq, "1")], 2);
    assert_eq!(compiler.complexity(&nested), 6);
    assert_eq!(compiler.complexity(&[Group::new("g", vec![]).into()]), 1);
}

#[test]
fn test_validate_accepts_complete_tree() {
    let report = WhereCompiler::new().validate(&create_simple_tree());
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn test_validate_reports_incomplete_conditions() {
    let tree: Vec<WhereItem> = vec![
        cond("c1", " ", Operator::Eq, "1"),
        Condition {
            id: "c2".to_string(),
            field: "a".to_string(),
            operator: None,
            value: Some("1".into()),
            logical_op: None,
        }
        .into(),
        cond("c3", "a", Operator::Eq, ""),
        Condition::new("c4", "a", Operator::In, Vec::<String>::new()).into(),
    ];
    let report = WhereCompiler::new().validate(&tree);
    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec![
            ValidationError::MissingField("c1".to_string()),
            ValidationError::MissingOperator("c2".to_string()),
            ValidationError::MissingValue("c3".to_string()),
            ValidationError::MissingValue("c4".to_string()),
        ]
    );
    assert_eq!(report.messages()[0], "Condition 'c1' is missing a field");
}

#[test]
fn test_validate_range_needs_two_values() {
    let tree: Vec<WhereItem> =
        vec![Condition::new("c1", "amount", Operator::Between, vec!["1"]).into()];
    let report = WhereCompiler::new().validate(&tree);
    assert_eq!(
        report.errors,
        vec![ValidationError::RangeArity {
            id: "c1".to_string(),
            operator: "BETWEEN".to_string(),
            found: 1,
        }]
    );
}

#[test]
fn test_validate_null_check_value_rule() {
    let tree: Vec<WhereItem> = vec![Condition::unary("c1", "email", Operator::IsNull).into()];

    let strict = WhereCompiler::new().validate(&tree);
    assert_eq!(
        strict.errors,
        vec![ValidationError::MissingValue("c1".to_string())]
    );

    let relaxed = WhereCompiler::builder()
        .allow_valueless_null_checks(true)
        .build()
        .validate(&tree);
    assert!(relaxed.valid);
}

#[test]
fn test_validate_reports_empty_groups() {
    let tree: Vec<WhereItem> = vec![
        cond("c1", "a", Operator::Eq, "1"),
        Group::new("g1", vec![Group::new("g2", vec![]).into()]).into(),
    ];
    let report = WhereCompiler::new().validate(&tree);
    assert_eq!(report.errors, vec![ValidationError::EmptyGroup("g2".to_string())]);
}

#[test]
fn test_validate_depth_limit() {
    let compiler = WhereCompiler::new();
    let leaf = || vec![cond("c", "a", Operator::Eq, "1")];

    assert!(compiler.validate(&nest(leaf(), 5)).valid);

    let report = compiler.validate(&nest(leaf(), 6));
    assert_eq!(
        report.errors,
        vec![ValidationError::TooDeep {
            group_id: "nest0".to_string(),
            max_depth: 5,
        }]
    );

    let shallow = WhereCompiler::builder().with_max_depth(1).build();
    assert!(shallow.validate(&nest(leaf(), 1)).valid);
    assert!(!shallow.validate(&nest(leaf(), 2)).valid);
}

#[test]
fn test_validate_stops_descending_past_depth_limit() {
    // The incomplete condition sits under eight groups; only the first group
    // past the limit is reported and nothing below it is inspected.
    let mut tree = nest(vec![incomplete("hidden", "", None)], 8);
    tree.push(incomplete("visible", "", None));

    let report = WhereCompiler::new().validate(&tree);
    assert_eq!(
        report.errors,
        vec![
            ValidationError::TooDeep {
                group_id: "nest2".to_string(),
                max_depth: 5,
            },
            ValidationError::MissingField("visible".to_string()),
            ValidationError::MissingOperator("visible".to_string()),
            ValidationError::MissingValue("visible".to_string()),
        ]
    );
    let too_deep = report
        .errors
        .iter()
        .filter(|e| matches!(e, ValidationError::TooDeep { .. }))
        .count();
    assert_eq!(too_deep, 1);
    assert!(!report.messages().iter().any(|m| m.contains("hidden")));
}

#[test]
fn test_compile_ignores_validation_problems() {
    // Too deep and incomplete, but the preview still renders what it can.
    let mut tree = nest(vec![cond("c", "a", Operator::Eq, "1")], 6);
    tree.push(incomplete("c2", "b", None));
    let compiler = WhereCompiler::new();
    assert!(!compiler.validate(&tree).valid);
    assert_eq!(compiler.compile(&tree), "((((((a = '1'))))))");
}

#[test]
fn test_tree_deserializes_from_editor_json() {
    let json = r#"[
        {"type": "condition", "id": "c1", "field": "ds", "operator": "=", "value": "2026-01-01"},
        {"type": "group", "id": "g1", "logicalOp": "AND", "children": [
            {"type": "condition", "id": "c2", "field": "level", "operator": ">", "value": 10},
            {"type": "condition", "id": "c3", "field": "country", "operator": "IN",
             "value": ["US", "CA"], "logicalOp": "OR"},
            {"type": "condition", "id": "c4", "field": "tier", "operator": "<>", "value": "free"}
        ]}
    ]"#;
    let tree: Vec<WhereItem> = serde_json::from_str(json).unwrap();
    assert_eq!(
        WhereCompiler::new().compile(&tree),
        "ds = '2026-01-01' AND (level > '10' OR country IN ('US', 'CA') AND tier != 'free')"
    );
}

#[test]
fn test_partial_condition_deserializes() {
    let json = r#"[{"type": "condition", "id": "draft"}]"#;
    let tree: Vec<WhereItem> = serde_json::from_str(json).unwrap();
    assert_eq!(WhereCompiler::new().compile(&tree), "");
    assert_eq!(WhereCompiler::new().validate(&tree).errors.len(), 3);
}

#[test]
fn test_unknown_operator_is_rejected() {
    let json = r#"[{"type": "condition", "id": "c1", "field": "a", "operator": "~=", "value": "1"}]"#;
    let result: Result<Vec<WhereItem>, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_display_tree_outline() {
    let compiler = WhereCompiler::new();
    let mut tree = create_simple_tree();
    tree.push(incomplete("c9", "", None));

    let rendered = DisplayWhereTree {
        items: &tree,
        compiler: &compiler,
    }
    .to_string();
    assert_eq!(
        rendered,
        "├── ds = '2026-01-01'\n\
         ├── AND Group g1\n\
         │   └── level > '10'\n\
         └── <incomplete condition c9>\n"
    );

    let empty = DisplayWhereTree {
        items: &[],
        compiler: &compiler,
    };
    assert_eq!(empty.to_string(), "(empty)\n");
}
