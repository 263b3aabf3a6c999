use crate::graph::NodeKind;
use thiserror::Error;

/// Reasons an edge is refused by the flow graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidEdgeError {
    #[error("Edge '{edge_id}' references node '{node_id}', which is not part of the graph")]
    MissingEndpoint { edge_id: String, node_id: String },

    #[error("Node '{target}' is an event source and cannot receive connections")]
    IntoSource { target: String },

    #[error("Node '{source_id}' is an output sink and cannot feed other nodes")]
    OutOfSink { source_id: String },

    #[error("Nodes '{source_id}' and '{target}' are already connected")]
    Duplicate { source_id: String, target: String },

    #[error("Edge id '{0}' is already in use")]
    DuplicateId(String),

    #[error("Node '{0}' cannot be connected to itself")]
    SelfLoop(String),

    #[error("Node '{target}' accepts at most {max} inputs")]
    TooManyInputs { target: String, max: usize },
}

/// Errors raised by structural mutations of a `FlowGraph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error(transparent)]
    InvalidEdge(#[from] InvalidEdgeError),

    #[error("A node with id '{0}' already exists")]
    DuplicateNode(String),

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found")]
    EdgeNotFound(String),

    #[error("Node '{node_id}' is a {expected} node and cannot take {found} configuration")]
    KindMismatch {
        node_id: String,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("Join '{node_id}' needs exactly 2 inputs before it can be configured, it has {inputs}")]
    JoinNotReady { node_id: String, inputs: usize },
}

/// Errors returned by the cascade delete engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CascadeError {
    #[error("Select a node first")]
    NothingSelected,

    #[error("Selected node '{0}' is not part of the graph")]
    UnknownNode(String),
}

/// A single advisory problem found by `WhereCompiler::validate`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Condition '{0}' is missing a field")]
    MissingField(String),

    #[error("Condition '{0}' is missing an operator")]
    MissingOperator(String),

    #[error("Condition '{0}' is missing a value")]
    MissingValue(String),

    #[error("Condition '{id}' uses {operator}, which needs exactly 2 values but got {found}")]
    RangeArity {
        id: String,
        operator: String,
        found: usize,
    },

    #[error("Group '{0}' is empty")]
    EmptyGroup(String),

    #[error("Group '{group_id}' nests deeper than the maximum depth of {max_depth}")]
    TooDeep { group_id: String, max_depth: usize },
}

/// Errors that can occur when converting a wire-format graph into a `FlowGraph`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Node '{node_id}' has an unknown type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Node '{node_id}' has invalid data: {message}")]
    InvalidNodeData { node_id: String, message: String },

    #[error("Persisted graph is inconsistent: {0}")]
    Graph(#[from] GraphError),
}

/// Errors raised by a persistence collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Graph '{0}' not found in store")]
    NotFound(String),

    #[error("Graph id '{0}' cannot be stored; use ASCII letters, digits, '_' or '-'")]
    InvalidGraphId(String),

    #[error("I/O failure on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot encoding failed: {0}")]
    Encoding(String),
}

/// Errors raised while loading an `EditorConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced by the flow editor controller.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Cascade(#[from] CascadeError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No graph is loaded in this session")]
    NoActiveGraph,
}
