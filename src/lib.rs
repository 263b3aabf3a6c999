//! # flowql - Pipeline Canvas Core
//!
//! **flowql** is the editing core behind a visual data-warehouse pipeline
//! builder. Users drop event sources on a canvas, combine them through JOIN and
//! UNION ALL nodes, and attach an output sink. Separately they build filter
//! predicates in a nested condition editor. This crate holds the parts of that
//! tool that keep invariants across edits:
//!
//! 1.  **Flow graph** ([`graph`]): typed nodes and directed edges, with the
//!     source/sink direction rules enforced on every connection.
//! 2.  **Cascade delete** ([`cascade`]): deleting a node also removes every
//!     node left without its required inputs, transitively, with a preview
//!     before anything is mutated.
//! 3.  **History** ([`history`]): bounded, debounced snapshot undo/redo.
//! 4.  **Conditions** ([`condition`]): a condition tree compiled into a SQL
//!     fragment that can be dropped after `WHERE`, plus validation and a
//!     complexity score.
//!
//! [`editor::FlowEditorController`] ties the graph pieces together for a UI,
//! and [`persist`] defines the wire shape exchanged with storage.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowql::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = FlowGraph::new();
//! graph.add_node(Node::event("login", "evt_login", &["uid", "ds"]))?;
//! graph.add_node(Node::event("pay", "evt_pay", &["uid", "amount"]))?;
//! graph.add_node(Node::join("j"))?;
//! graph.add_node(Node::output("out"))?;
//! graph.add_edge(Edge::between("login", "j"))?;
//! graph.add_edge(Edge::between("pay", "j"))?;
//! graph.add_edge(Edge::between("j", "out"))?;
//!
//! // Removing one join input takes the join and the sink with it.
//! let preview = CascadeDeleteEngine::new().preview(&graph, &["login"])?;
//! assert_eq!(preview.affected_nodes, vec!["login", "j", "out"]);
//! assert_eq!(preview.cascading_count, 2);
//!
//! let tree = vec![
//!     WhereItem::from(Condition::new("c1", "ds", Operator::Eq, "2026-01-01")),
//!     WhereItem::from(
//!         Group::new("g1", vec![Condition::new("c2", "level", Operator::Gt, "10").into()])
//!             .with_logical_op(LogicalOp::And),
//!     ),
//! ];
//! let compiler = WhereCompiler::new();
//! assert!(compiler.validate(&tree).valid);
//! assert_eq!(compiler.compile(&tree), "ds = '2026-01-01' AND (level > '10')");
//! # Ok(())
//! # }
//! ```

pub mod cascade;
pub mod condition;
pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod history;
pub mod persist;
pub mod prelude;
