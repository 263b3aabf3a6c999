//! Unit tests for small pieces of the flowql model.
use flowql::prelude::*;

#[test]
fn test_node_kind_input_rules() {
    assert_eq!(NodeKind::Event.min_inbound(), 0);
    assert_eq!(NodeKind::UnionAll.min_inbound(), 2);
    assert_eq!(NodeKind::Join.min_inbound(), 2);
    assert_eq!(NodeKind::Output.min_inbound(), 1);

    assert_eq!(NodeKind::Event.max_inbound(), Some(0));
    assert_eq!(NodeKind::Join.max_inbound(), Some(2));
    assert_eq!(NodeKind::UnionAll.max_inbound(), None);
    assert!(!NodeKind::Output.has_outputs());
}

#[test]
fn test_node_kind_names() {
    for kind in [
        NodeKind::Event,
        NodeKind::UnionAll,
        NodeKind::Join,
        NodeKind::Output,
    ] {
        assert_eq!(NodeKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(NodeKind::UnionAll.to_string(), "union_all");
    assert_eq!(NodeKind::parse("UNION"), None);
}

#[test]
fn test_node_constructors() {
    let node = Node::event("login", "evt_login", &["uid", "ds"]).at(12.0, 34.0);
    assert_eq!(node.id(), "login");
    assert_eq!(node.kind(), NodeKind::Event);
    assert_eq!(node.position, Position::new(12.0, 34.0));
    match node.config() {
        NodeConfig::Event(config) => {
            let names: Vec<&str> = config.fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["uid", "ds"]);
        }
        other => panic!("expected event config, got {:?}", other),
    }
    assert_eq!(
        Node::join("j").config(),
        &NodeConfig::default_for(NodeKind::Join)
    );
}

#[test]
fn test_edge_between_derives_id() {
    let edge = Edge::between("a", "b");
    assert_eq!(edge.id, "a->b");
    assert!(edge.touches("a"));
    assert!(edge.touches("b"));
    assert!(!edge.touches("c"));
}

#[test]
fn test_join_sql_names() {
    assert_eq!(JoinType::default(), JoinType::Inner);
    assert_eq!(JoinType::Full.as_sql(), "FULL OUTER JOIN");
    assert_eq!(JoinOperator::GtEq.as_sql(), ">=");
}

#[test]
fn test_operator_serde_names() {
    let op: Operator = serde_json::from_str(r#""NOT BETWEEN""#).unwrap();
    assert_eq!(op, Operator::NotBetween);
    assert!(op.is_range());
    assert_eq!(serde_json::to_string(&Operator::IsNotNull).unwrap(), r#""IS NOT NULL""#);
    assert!(Operator::IsNull.is_null_check());
    assert_eq!(serde_json::to_string(&LogicalOp::Or).unwrap(), r#""OR""#);
}

#[test]
fn test_condition_value_shapes() {
    let single: ConditionValue = serde_json::from_str(r#""x""#).unwrap();
    assert_eq!(single, ConditionValue::from("x"));
    assert_eq!(single.len(), 1);

    let list: ConditionValue = serde_json::from_str(r#"["a", 2, true]"#).unwrap();
    assert_eq!(list.len(), 3);
    let rendered: Vec<String> = list.scalars().iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["a", "2", "true"]);

    assert!(ConditionValue::from("").is_empty());
    assert!(ConditionValue::from(Vec::<Scalar>::new()).is_empty());
    assert!(!ConditionValue::from(0i64).is_empty());
}

#[test]
fn test_error_messages() {
    let err = GraphError::from(InvalidEdgeError::OutOfSink {
        source_id: "out".to_string(),
    });
    assert_eq!(
        err.to_string(),
        "Node 'out' is an output sink and cannot feed other nodes"
    );

    let err = GraphError::KindMismatch {
        node_id: "j".to_string(),
        expected: NodeKind::Join,
        found: NodeKind::Output,
    };
    assert_eq!(
        err.to_string(),
        "Node 'j' is a join node and cannot take output configuration"
    );

    assert_eq!(
        ValidationError::TooDeep {
            group_id: "g".to_string(),
            max_depth: 5
        }
        .to_string(),
        "Group 'g' nests deeper than the maximum depth of 5"
    );
    assert_eq!(
        EditorError::NoActiveGraph.to_string(),
        "No graph is loaded in this session"
    );
}
