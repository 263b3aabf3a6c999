//! Transitive node deletion.
//!
//! Deleting a node removes its edges, which can leave downstream nodes below
//! the input minimum of their kind (a join with one input, an output with
//! none). [`CascadeDeleteEngine`] computes the closure of such removals so the
//! UI can show the full impact before the user confirms.

use crate::error::CascadeError;
use crate::graph::{EdgeId, FlowGraph, NodeId};
use ahash::{AHashMap, AHashSet};
use std::fmt;

/// What a deletion would remove, computed before anything is mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadePreview {
    /// Every node that would be removed, in graph order.
    pub affected_nodes: Vec<NodeId>,
    /// Every edge that would be removed, in graph order.
    pub affected_edges: Vec<EdgeId>,
    /// Nodes removed beyond the requested selection.
    pub cascading_count: usize,
    surviving: FlowGraph,
}

impl CascadePreview {
    /// The graph as it would look after the deletion.
    pub fn surviving_graph(&self) -> &FlowGraph {
        &self.surviving
    }

    pub fn into_surviving_graph(self) -> FlowGraph {
        self.surviving
    }
}

/// User-facing summary of an applied deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionSummary {
    pub deleted_nodes: Vec<NodeId>,
    pub deleted_edges: Vec<EdgeId>,
    pub cascading_count: usize,
}

impl fmt::Display for DeletionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deleted {} node(s) and {} edge(s)",
            self.deleted_nodes.len(),
            self.deleted_edges.len()
        )?;
        if self.cascading_count > 0 {
            write!(f, ", {} removed because they lost required inputs", self.cascading_count)?;
        }
        Ok(())
    }
}

/// Result of `CascadeDeleteEngine::apply`.
#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    pub graph: FlowGraph,
    pub summary: DeletionSummary,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CascadeDeleteEngine;

impl CascadeDeleteEngine {
    pub fn new() -> Self {
        Self
    }

    /// Computes the full set of nodes and edges removed by deleting `selection`.
    ///
    /// A node is cascaded only when it loses an inbound edge during the
    /// deletion and ends up below its kind's minimum. Nodes that were already
    /// under-connected before the deletion stay untouched.
    pub fn preview<S: AsRef<str>>(
        &self,
        graph: &FlowGraph,
        selection: &[S],
    ) -> Result<CascadePreview, CascadeError> {
        if selection.is_empty() {
            return Err(CascadeError::NothingSelected);
        }

        let mut to_delete: AHashSet<String> = AHashSet::new();
        for id in selection {
            let id = id.as_ref();
            if !graph.contains_node(id) {
                return Err(CascadeError::UnknownNode(id.to_string()));
            }
            to_delete.insert(id.to_string());
        }
        let requested = to_delete.len();

        let mut to_delete_edges: AHashSet<String> = AHashSet::new();
        let mut lost_input: AHashSet<String> = AHashSet::new();
        let mut frontier: AHashSet<String> = to_delete.clone();
        let mut round = 0usize;

        loop {
            round += 1;
            for edge in graph.edges() {
                if to_delete_edges.contains(&edge.id)
                    || !(frontier.contains(&edge.source) || frontier.contains(&edge.target))
                {
                    continue;
                }
                to_delete_edges.insert(edge.id.clone());
                if !to_delete.contains(&edge.target) {
                    lost_input.insert(edge.target.clone());
                }
            }

            let mut inbound: AHashMap<&str, usize> = AHashMap::new();
            for edge in graph.edges() {
                if !to_delete_edges.contains(&edge.id) {
                    *inbound.entry(edge.target.as_str()).or_default() += 1;
                }
            }

            let orphaned: AHashSet<String> = graph
                .nodes()
                .iter()
                .filter(|n| !to_delete.contains(n.id()) && lost_input.contains(n.id()))
                .filter(|n| {
                    let remaining = inbound.get(n.id()).copied().unwrap_or(0);
                    remaining < n.kind().min_inbound()
                })
                .map(|n| n.id().to_string())
                .collect();

            tracing::debug!(round, orphaned = orphaned.len(), "cascade round");
            if orphaned.is_empty() {
                break;
            }
            to_delete.extend(orphaned.iter().cloned());
            frontier = orphaned;
        }

        let affected_nodes: Vec<NodeId> = graph
            .nodes()
            .iter()
            .filter(|n| to_delete.contains(n.id()))
            .map(|n| n.id().to_string())
            .collect();
        let affected_edges: Vec<EdgeId> = graph
            .edges()
            .iter()
            .filter(|e| to_delete_edges.contains(&e.id))
            .map(|e| e.id.clone())
            .collect();

        Ok(CascadePreview {
            cascading_count: to_delete.len() - requested,
            surviving: graph.without(&to_delete, &to_delete_edges),
            affected_nodes,
            affected_edges,
        })
    }

    /// Performs the deletion computed by [`preview`](Self::preview).
    pub fn apply<S: AsRef<str>>(
        &self,
        graph: &FlowGraph,
        selection: &[S],
    ) -> Result<CascadeOutcome, CascadeError> {
        let preview = self.preview(graph, selection)?;
        let summary = DeletionSummary {
            deleted_nodes: preview.affected_nodes.clone(),
            deleted_edges: preview.affected_edges.clone(),
            cascading_count: preview.cascading_count,
        };
        tracing::info!(
            nodes = summary.deleted_nodes.len(),
            edges = summary.deleted_edges.len(),
            cascaded = summary.cascading_count,
            "cascade delete applied"
        );
        Ok(CascadeOutcome {
            graph: preview.into_surviving_graph(),
            summary,
        })
    }
}
