use crate::error::ConversionError;
use crate::graph::{Edge, FlowGraph, Node, NodeConfig, NodeKind, Position};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Node as exchanged with the persistence layer: `{id, type, position, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Edge as exchanged with the persistence layer: `{id, source, target}`.
/// An edge without an id gets one derived from its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Complete persisted graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireGraph {
    pub nodes: Vec<WireNode>,
    pub edges: Vec<WireEdge>,
}

impl WireGraph {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A trait for persisted or custom graph formats that can become a `FlowGraph`.
///
/// Implement it on your own structs to feed the editor from a different
/// storage format; `WireGraph` is the built-in implementation.
pub trait IntoFlowGraph {
    /// Consumes the object and converts it into a consistent flow graph.
    fn into_flow_graph(self) -> Result<FlowGraph, ConversionError>;
}

impl IntoFlowGraph for WireGraph {
    fn into_flow_graph(self) -> Result<FlowGraph, ConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(WireNode::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        let edges = self
            .edges
            .into_iter()
            .map(|e| {
                if e.id.is_empty() {
                    Edge::between(e.source, e.target)
                } else {
                    Edge::new(e.id, e.source, e.target)
                }
            })
            .collect();
        Ok(FlowGraph::from_parts(nodes, edges)?)
    }
}

impl WireNode {
    fn into_node(self) -> Result<Node, ConversionError> {
        let kind =
            NodeKind::parse(&self.node_type).ok_or_else(|| ConversionError::UnknownNodeType {
                node_id: self.id.clone(),
                type_name: self.node_type.clone(),
            })?;
        let config = match kind {
            NodeKind::Event => NodeConfig::Event(parse_data(&self.id, self.data)?),
            NodeKind::UnionAll => NodeConfig::UnionAll,
            NodeKind::Join => NodeConfig::Join(parse_data(&self.id, self.data)?),
            NodeKind::Output => NodeConfig::Output(parse_data(&self.id, self.data)?),
        };
        Ok(Node::new(self.id, self.position, config))
    }

    fn from_node(node: &Node) -> Result<Self, serde_json::Error> {
        let data = match node.config() {
            NodeConfig::Event(config) => serde_json::to_value(config)?,
            NodeConfig::UnionAll => serde_json::Value::Object(Default::default()),
            NodeConfig::Join(config) => serde_json::to_value(config)?,
            NodeConfig::Output(config) => serde_json::to_value(config)?,
        };
        Ok(Self {
            id: node.id().to_string(),
            node_type: node.kind().as_str().to_string(),
            position: node.position,
            data,
        })
    }
}

fn parse_data<T: DeserializeOwned + Default>(
    node_id: &str,
    data: serde_json::Value,
) -> Result<T, ConversionError> {
    if data.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(data).map_err(|e| ConversionError::InvalidNodeData {
        node_id: node_id.to_string(),
        message: e.to_string(),
    })
}

impl TryFrom<&FlowGraph> for WireGraph {
    type Error = serde_json::Error;

    fn try_from(graph: &FlowGraph) -> Result<Self, Self::Error> {
        Ok(Self {
            nodes: graph
                .nodes()
                .iter()
                .map(WireNode::from_node)
                .collect::<Result<Vec<_>, _>>()?,
            edges: graph
                .edges()
                .iter()
                .map(|e| WireEdge {
                    id: e.id.clone(),
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
                .collect(),
        })
    }
}

impl FlowGraph {
    /// The persistence shape of this graph.
    pub fn to_wire(&self) -> Result<WireGraph, serde_json::Error> {
        WireGraph::try_from(self)
    }
}
