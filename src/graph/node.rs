use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type NodeId = String;

/// Canvas coordinates of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The closed set of pipeline node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Event,
    UnionAll,
    Join,
    Output,
}

impl NodeKind {
    /// Inbound connections a node of this kind needs to be considered configured.
    pub fn min_inbound(self) -> usize {
        match self {
            NodeKind::Event => 0,
            NodeKind::UnionAll => 2,
            NodeKind::Join => 2,
            NodeKind::Output => 1,
        }
    }

    /// Upper bound on inbound connections, if the kind has one.
    pub fn max_inbound(self) -> Option<usize> {
        match self {
            NodeKind::Event => Some(0),
            NodeKind::Join => Some(2),
            NodeKind::UnionAll | NodeKind::Output => None,
        }
    }

    /// Whether nodes of this kind may feed other nodes.
    pub fn has_outputs(self) -> bool {
        !matches!(self, NodeKind::Output)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Event => "event",
            NodeKind::UnionAll => "union_all",
            NodeKind::Join => "join",
            NodeKind::Output => "output",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "event" => Some(NodeKind::Event),
            "union_all" => Some(NodeKind::UnionAll),
            "join" => Some(NodeKind::Join),
            "output" => Some(NodeKind::Output),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field exposed by an event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default, alias = "type", alias = "data_type")]
    pub data_type: Option<String>,
}

/// Configuration of an `event` source node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventConfig {
    /// Id of the event definition in the external catalog.
    #[serde(alias = "event_id")]
    pub event_id: String,
    /// Cached list of the fields the event exposes.
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL OUTER JOIN",
        }
    }
}

/// Comparison used between the two sides of a join condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOperator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
}

impl JoinOperator {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinOperator::Eq => "=",
            JoinOperator::NotEq => "!=",
            JoinOperator::Gt => ">",
            JoinOperator::Lt => "<",
            JoinOperator::GtEq => ">=",
            JoinOperator::LtEq => "<=",
        }
    }
}

/// One `left_field OP right_field` pair between the two join inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCondition {
    #[serde(alias = "left_field")]
    pub left_field: String,
    #[serde(default)]
    pub operator: JoinOperator,
    #[serde(alias = "right_field")]
    pub right_field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinConfig {
    #[serde(alias = "join_type")]
    pub join_type: JoinType,
    pub conditions: Vec<JoinCondition>,
}

/// Optional naming of the sink table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub table: Option<String>,
}

/// Kind-specific payload of a node. The variant determines the node's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeConfig {
    Event(EventConfig),
    UnionAll,
    Join(JoinConfig),
    Output(OutputConfig),
}

impl NodeConfig {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeConfig::Event(_) => NodeKind::Event,
            NodeConfig::UnionAll => NodeKind::UnionAll,
            NodeConfig::Join(_) => NodeKind::Join,
            NodeConfig::Output(_) => NodeKind::Output,
        }
    }

    /// The empty configuration for a freshly dropped node of `kind`.
    pub fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Event => NodeConfig::Event(EventConfig::default()),
            NodeKind::UnionAll => NodeConfig::UnionAll,
            NodeKind::Join => NodeConfig::Join(JoinConfig::default()),
            NodeKind::Output => NodeConfig::Output(OutputConfig::default()),
        }
    }
}

/// A node on the pipeline canvas.
///
/// `id` and kind are fixed at construction; only the position and a config
/// of the same kind can change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    pub position: Position,
    config: NodeConfig,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Position, config: NodeConfig) -> Self {
        Self {
            id: id.into(),
            position,
            config,
        }
    }

    pub fn event(id: impl Into<NodeId>, event_id: impl Into<String>, fields: &[&str]) -> Self {
        let config = EventConfig {
            event_id: event_id.into(),
            fields: fields
                .iter()
                .map(|name| FieldDefinition {
                    name: name.to_string(),
                    data_type: None,
                })
                .collect(),
        };
        Self::new(id, Position::default(), NodeConfig::Event(config))
    }

    pub fn union_all(id: impl Into<NodeId>) -> Self {
        Self::new(id, Position::default(), NodeConfig::UnionAll)
    }

    pub fn join(id: impl Into<NodeId>) -> Self {
        Self::new(id, Position::default(), NodeConfig::default_for(NodeKind::Join))
    }

    pub fn output(id: impl Into<NodeId>) -> Self {
        Self::new(id, Position::default(), NodeConfig::default_for(NodeKind::Output))
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.config.kind()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Replaces the configuration, refusing any change of kind.
    pub fn set_config(&mut self, config: NodeConfig) -> Result<(), GraphError> {
        if config.kind() != self.kind() {
            return Err(GraphError::KindMismatch {
                node_id: self.id.clone(),
                expected: self.kind(),
                found: config.kind(),
            });
        }
        self.config = config;
        Ok(())
    }
}
