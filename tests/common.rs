//! Common test utilities for building graphs and condition trees.
use flowql::prelude::*;

/// Two events joined, sunk into an output.
///
/// Shape: `login, pay -> join -> out`
#[allow(dead_code)]
pub fn create_join_flow() -> FlowGraph {
    FlowGraph::from_parts(
        vec![
            Node::event("login", "evt_login", &["uid", "ds"]),
            Node::event("pay", "evt_pay", &["uid", "amount"]),
            Node::join("join"),
            Node::output("out"),
        ],
        vec![
            Edge::between("login", "join"),
            Edge::between("pay", "join"),
            Edge::between("join", "out"),
        ],
    )
    .expect("join flow is consistent")
}

/// A wider pipeline with a union feeding a join.
///
/// Shape: `a, b, c -> union`, `union, d -> join`, `join -> out`
#[allow(dead_code)]
pub fn create_union_join_flow() -> FlowGraph {
    FlowGraph::from_parts(
        vec![
            Node::event("a", "evt_a", &["uid"]),
            Node::event("b", "evt_b", &["uid"]),
            Node::event("c", "evt_c", &["uid"]),
            Node::event("d", "evt_d", &["uid", "level"]),
            Node::union_all("union"),
            Node::join("join"),
            Node::output("out"),
        ],
        vec![
            Edge::between("a", "union"),
            Edge::between("b", "union"),
            Edge::between("c", "union"),
            Edge::between("union", "join"),
            Edge::between("d", "join"),
            Edge::between("join", "out"),
        ],
    )
    .expect("union/join flow is consistent")
}

/// `ds = '2026-01-01' AND (level > '10')`
#[allow(dead_code)]
pub fn create_simple_tree() -> Vec<WhereItem> {
    vec![
        Condition::new("c1", "ds", Operator::Eq, "2026-01-01").into(),
        Group::new(
            "g1",
            vec![Condition::new("c2", "level", Operator::Gt, "10").into()],
        )
        .with_logical_op(LogicalOp::And)
        .into(),
    ]
}

/// Wraps `items` in `levels` nested single-child groups.
#[allow(dead_code)]
pub fn nest(items: Vec<WhereItem>, levels: usize) -> Vec<WhereItem> {
    (0..levels).fold(items, |inner, level| {
        vec![Group::new(format!("nest{}", level), inner).into()]
    })
}
