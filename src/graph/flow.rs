use super::{Edge, FieldDefinition, Node, NodeConfig, NodeKind, Position};
use crate::error::{GraphError, InvalidEdgeError};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// An immutable deep copy of a graph's nodes and edges, used by undo/redo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// The pipeline graph being edited on the canvas.
///
/// Nodes and edges live in flat vectors and edges refer to nodes by id only.
/// Every mutation keeps the invariants: edge endpoints exist, no duplicate
/// `(source, target)` pair, nothing flows into an event or out of an output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from raw parts, checking every node and edge on the way in.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.contains_node(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().to_string()));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Adds an edge after checking endpoints, direction rules, and uniqueness.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.check_edge(&edge)?;
        self.edges.push(edge);
        Ok(())
    }

    fn check_edge(&self, edge: &Edge) -> Result<(), InvalidEdgeError> {
        // Checked before the id: derived ids collide exactly when the pair does.
        if self
            .edges
            .iter()
            .any(|e| e.source == edge.source && e.target == edge.target)
        {
            return Err(InvalidEdgeError::Duplicate {
                source_id: edge.source.clone(),
                target: edge.target.clone(),
            });
        }
        if self.edge(&edge.id).is_some() {
            return Err(InvalidEdgeError::DuplicateId(edge.id.clone()));
        }
        let missing = |node_id: &str| InvalidEdgeError::MissingEndpoint {
            edge_id: edge.id.clone(),
            node_id: node_id.to_string(),
        };
        let source = self.node(&edge.source).ok_or_else(|| missing(&edge.source))?;
        let target = self.node(&edge.target).ok_or_else(|| missing(&edge.target))?;

        if edge.source == edge.target {
            return Err(InvalidEdgeError::SelfLoop(edge.source.clone()));
        }
        if target.kind() == NodeKind::Event {
            return Err(InvalidEdgeError::IntoSource {
                target: edge.target.clone(),
            });
        }
        if !source.kind().has_outputs() {
            return Err(InvalidEdgeError::OutOfSink {
                source_id: edge.source.clone(),
            });
        }
        if let Some(max) = target.kind().max_inbound() {
            if self.inbound_count(&edge.target) >= max {
                return Err(InvalidEdgeError::TooManyInputs {
                    target: edge.target.clone(),
                    max,
                });
            }
        }
        Ok(())
    }

    /// Removes a node together with every edge touching it.
    ///
    /// This is a local removal only; nodes left below their input minimum stay
    /// in the graph. Use `CascadeDeleteEngine` for the transitive version.
    pub fn remove_node(&mut self, id: &str) -> Result<(Node, Vec<Edge>), GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id() == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        let node = self.nodes.remove(index);
        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            self.edges.drain(..).partition(|e| e.touches(id));
        self.edges = kept;
        Ok((node, removed))
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.to_string()))?;
        Ok(self.edges.remove(index))
    }

    pub fn inbound_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.target == node_id).collect()
    }

    pub fn outbound_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.source == node_id).collect()
    }

    pub fn inbound_count(&self, node_id: &str) -> usize {
        self.edges.iter().filter(|e| e.target == node_id).count()
    }

    /// A node is configured when its inbound count satisfies its kind.
    /// Joins need exactly two inputs.
    pub fn is_configured(&self, node_id: &str) -> bool {
        let Some(node) = self.node(node_id) else {
            return false;
        };
        let kind = node.kind();
        let inputs = self.inbound_count(node_id);
        inputs >= kind.min_inbound() && kind.max_inbound().is_none_or(|max| inputs <= max)
    }

    pub fn unconfigured_nodes(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| !self.is_configured(n.id()))
            .collect()
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        node.position = position;
        Ok(())
    }

    /// Replaces a node's configuration. Kinds cannot change, and a join only
    /// accepts configuration once both of its inputs are connected.
    pub fn apply_config(&mut self, id: &str, config: NodeConfig) -> Result<(), GraphError> {
        if let NodeConfig::Join(_) = config {
            let inputs = self.inbound_count(id);
            if self.node(id).map(Node::kind) == Some(NodeKind::Join) && inputs != 2 {
                return Err(GraphError::JoinNotReady {
                    node_id: id.to_string(),
                    inputs,
                });
            }
        }
        self.node_mut(id)?.set_config(config)
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node, GraphError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    /// Fields of every event source feeding `node_id`, in upstream visiting order.
    pub fn upstream_fields(&self, node_id: &str) -> Vec<FieldDefinition> {
        let mut visited = AHashSet::new();
        let mut fields = Vec::new();
        self.collect_upstream_fields(node_id, &mut visited, &mut fields);
        fields
    }

    fn collect_upstream_fields(
        &self,
        node_id: &str,
        visited: &mut AHashSet<String>,
        fields: &mut Vec<FieldDefinition>,
    ) {
        for edge in self.inbound_edges(node_id) {
            if !visited.insert(edge.source.clone()) {
                continue;
            }
            match self.node(&edge.source).map(Node::config) {
                Some(NodeConfig::Event(event)) => fields.extend(event.fields.iter().cloned()),
                Some(_) => self.collect_upstream_fields(&edge.source, visited, fields),
                None => {}
            }
        }
    }

    /// A copy of the graph without the given nodes and edges.
    /// Edges touching a dropped node are dropped as well.
    pub(crate) fn without(&self, nodes: &AHashSet<String>, edges: &AHashSet<String>) -> Self {
        Self {
            nodes: self
                .nodes
                .iter()
                .filter(|n| !nodes.contains(n.id()))
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| {
                    !edges.contains(&e.id) && !nodes.contains(&e.source) && !nodes.contains(&e.target)
                })
                .cloned()
                .collect(),
        }
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Rebuilds a graph from a snapshot recorded by the history engine.
    /// Those are only ever taken from consistent graphs, so they are taken
    /// as-is. Snapshots from anywhere else go through `TryFrom`.
    pub(crate) fn restore(snapshot: &GraphSnapshot) -> Self {
        Self {
            nodes: snapshot.nodes.clone(),
            edges: snapshot.edges.clone(),
        }
    }
}

/// Checks every node and edge of a snapshot that did not come from history,
/// such as one decoded from a `GraphArtifact`.
impl TryFrom<GraphSnapshot> for FlowGraph {
    type Error = GraphError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self, Self::Error> {
        Self::from_parts(snapshot.nodes, snapshot.edges)
    }
}
