use super::wire::WireGraph;
use crate::error::StoreError;
use ahash::AHashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The persistence collaborator: stores and loads graphs in wire format.
pub trait FlowStore {
    fn load(&self, graph_id: &str) -> Result<WireGraph, StoreError>;
    fn save(&mut self, graph_id: &str, graph: &WireGraph) -> Result<(), StoreError>;
}

/// Keeps graphs in memory. Useful for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    graphs: AHashMap<String, WireGraph>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, graph_id: impl Into<String>, graph: WireGraph) {
        self.graphs.insert(graph_id.into(), graph);
    }

    pub fn get(&self, graph_id: &str) -> Option<&WireGraph> {
        self.graphs.get(graph_id)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl FlowStore for MemoryStore {
    fn load(&self, graph_id: &str) -> Result<WireGraph, StoreError> {
        self.graphs
            .get(graph_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(graph_id.to_string()))
    }

    fn save(&mut self, graph_id: &str, graph: &WireGraph) -> Result<(), StoreError> {
        self.graphs.insert(graph_id.to_string(), graph.clone());
        Ok(())
    }
}

/// Stores each graph as `<root>/<graph_id>.json`.
///
/// Graph ids must be non-empty and made of ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file for `graph_id`. Ids are used verbatim as file stems, so
    /// anything beyond ASCII letters, digits, `_` and `-` is refused.
    fn path_for(&self, graph_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !graph_id.is_empty()
            && graph_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidGraphId(graph_id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", graph_id)))
    }
}

impl FlowStore for JsonFileStore {
    fn load(&self, graph_id: &str) -> Result<WireGraph, StoreError> {
        let path = self.path_for(graph_id)?;
        let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound(graph_id.to_string()),
            _ => StoreError::Io {
                path: path.display().to_string(),
                source,
            },
        })?;
        Ok(WireGraph::from_json_str(&content)?)
    }

    fn save(&mut self, graph_id: &str, graph: &WireGraph) -> Result<(), StoreError> {
        let path = self.path_for(graph_id)?;
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.display().to_string(),
            source,
        })?;
        let json = graph.to_json_pretty()?;
        fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "graph written");
        Ok(())
    }
}
