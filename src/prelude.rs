//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowql crate.
//!
//! # Example
//!
//! ```rust
//! use flowql::prelude::*;
//!
//! let tree = vec![WhereItem::from(Condition::new("c1", "name", Operator::Eq, "O'Brien"))];
//! assert_eq!(WhereCompiler::new().compile(&tree), "name = 'O''Brien'");
//! ```

// Flow graph model
pub use crate::graph::{
    Edge, EdgeId, EventConfig, FieldDefinition, FlowGraph, GraphSnapshot, JoinCondition,
    JoinConfig, JoinOperator, JoinType, Node, NodeConfig, NodeId, NodeKind, OutputConfig,
    Position,
};

// Engines
pub use crate::cascade::{CascadeDeleteEngine, CascadeOutcome, CascadePreview, DeletionSummary};
pub use crate::history::{HistoryEngine, HistoryStack, ManualScheduler, Scheduler};

// Condition trees
pub use crate::condition::{
    Condition, ConditionValue, DisplayWhereTree, Group, LogicalOp, Operator, Scalar,
    ValidationReport, WhereCompiler, WhereItem,
};

// Editor, persistence and configuration
pub use crate::config::{ConditionConfig, EditorConfig, HistoryConfig};
pub use crate::editor::{EditorSession, FlowEditorController};
pub use crate::persist::{FlowStore, IntoFlowGraph, JsonFileStore, MemoryStore, WireGraph};

// Error types
pub use crate::error::{
    CascadeError, ConversionError, EditorError, GraphError, InvalidEdgeError, StoreError,
    ValidationError,
};
