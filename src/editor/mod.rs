//! The controller the canvas talks to.
//!
//! [`FlowEditorController`] owns one graph for the length of an editing
//! session. It applies edit intents, records history after each accepted
//! mutation, and hands the graph to a [`FlowStore`] on explicit save.

use crate::cascade::{CascadeDeleteEngine, CascadePreview, DeletionSummary};
use crate::config::EditorConfig;
use crate::error::{CascadeError, EditorError, StoreError};
use crate::graph::{Edge, EdgeId, FlowGraph, GraphSnapshot, Node, NodeConfig, NodeId, Position};
use crate::history::{HistoryEngine, Scheduler};
use crate::persist::{FlowStore, IntoFlowGraph};
use std::rc::Rc;

/// Per-editor state that would otherwise be ambient UI globals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    graph_id: Option<String>,
    selection: Vec<NodeId>,
}

impl EditorSession {
    pub fn graph_id(&self) -> Option<&str> {
        self.graph_id.as_deref()
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.selection.clear();
        for id in ids {
            let id = id.into();
            if !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drops selected ids that no longer exist in `graph`.
    fn retain_existing(&mut self, graph: &FlowGraph) {
        self.selection.retain(|id| graph.contains_node(id));
    }
}

pub struct FlowEditorController<S: FlowStore> {
    graph: FlowGraph,
    session: EditorSession,
    history: HistoryEngine,
    cascade: CascadeDeleteEngine,
    store: S,
}

impl<S: FlowStore> FlowEditorController<S> {
    /// Creates a controller with an empty, unnamed graph.
    ///
    /// `restore` is called with the snapshot a successful undo or redo lands on,
    /// so the host can re-render.
    pub fn new(
        config: &EditorConfig,
        scheduler: Rc<dyn Scheduler>,
        store: S,
        restore: impl FnMut(&GraphSnapshot) + 'static,
    ) -> Self {
        let graph = FlowGraph::new();
        let history = HistoryEngine::new(&config.history, scheduler, restore);
        history.reset(&graph.snapshot());
        Self {
            graph,
            session: EditorSession::default(),
            history,
            cascade: CascadeDeleteEngine::new(),
            store,
        }
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn history(&self) -> &HistoryEngine {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Starts editing a new, empty graph under `graph_id`.
    pub fn start_new(&mut self, graph_id: impl Into<String>) {
        self.replace_graph(graph_id.into(), FlowGraph::new());
    }

    /// Loads `graph_id` from the store and starts a fresh history for it.
    pub fn load(&mut self, graph_id: &str) -> Result<(), EditorError> {
        let graph = self.store.load(graph_id)?.into_flow_graph()?;
        tracing::info!(
            graph = %graph_id,
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            "graph loaded"
        );
        self.replace_graph(graph_id.to_string(), graph);
        Ok(())
    }

    fn replace_graph(&mut self, graph_id: String, graph: FlowGraph) {
        self.graph = graph;
        self.session = EditorSession {
            graph_id: Some(graph_id),
            selection: Vec::new(),
        };
        // A snapshot still pending from the previous graph must not land here.
        self.history.reset(&self.graph.snapshot());
    }

    /// Writes the current graph to the store.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let graph_id = self
            .session
            .graph_id
            .clone()
            .ok_or(EditorError::NoActiveGraph)?;
        self.history.flush();
        let wire = self.graph.to_wire().map_err(StoreError::from)?;
        self.store.save(&graph_id, &wire)?;
        tracing::info!(graph = %graph_id, "graph saved");
        Ok(())
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), EditorError> {
        self.graph.add_node(node)?;
        self.record();
        Ok(())
    }

    /// Connects two nodes. Rejected edges leave the graph and history untouched.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<EdgeId, EditorError> {
        let edge = Edge::between(source, target);
        let id = edge.id.clone();
        if let Err(e) = self.graph.add_edge(edge) {
            tracing::warn!(source = %source, target = %target, error = %e, "edge rejected");
            return Err(e.into());
        }
        self.record();
        Ok(id)
    }

    pub fn disconnect(&mut self, edge_id: &str) -> Result<Edge, EditorError> {
        let edge = self.graph.remove_edge(edge_id)?;
        self.record();
        Ok(edge)
    }

    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), EditorError> {
        self.graph.move_node(node_id, position)?;
        self.record();
        Ok(())
    }

    pub fn apply_config(&mut self, node_id: &str, config: NodeConfig) -> Result<(), EditorError> {
        self.graph.apply_config(node_id, config)?;
        self.record();
        Ok(())
    }

    pub fn select<I, T>(&mut self, ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        self.session.select(ids);
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    /// What deleting the current selection would remove, for the confirmation dialog.
    pub fn preview_delete(&self) -> Result<CascadePreview, CascadeError> {
        self.cascade.preview(&self.graph, self.session.selection())
    }

    /// Deletes the current selection along with everything it orphans.
    pub fn delete_selected(&mut self) -> Result<DeletionSummary, EditorError> {
        let outcome = self.cascade.apply(&self.graph, self.session.selection())?;
        self.graph = outcome.graph;
        self.session.clear_selection();
        self.record();
        Ok(outcome.summary)
    }

    /// Returns `true` if a previous state was restored.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore_snapshot(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if an undone state was re-applied.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore_snapshot(&snapshot);
                true
            }
            None => false,
        }
    }

    fn restore_snapshot(&mut self, snapshot: &GraphSnapshot) {
        self.graph = FlowGraph::restore(snapshot);
        self.session.retain_existing(&self.graph);
    }

    fn record(&self) {
        self.history.push_history(&self.graph.snapshot());
    }
}
