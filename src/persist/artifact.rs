use crate::error::StoreError;
use crate::graph::GraphSnapshot;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;

const ARTIFACT_VERSION: u32 = 1;

/// A graph snapshot in compact binary form, e.g. for crash-recovery drafts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GraphArtifact {
    pub version: u32,
    pub snapshot: GraphSnapshot,
}

impl GraphArtifact {
    pub fn new(snapshot: GraphSnapshot) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            snapshot,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        encode_to_vec(self, standard())
            .map_err(|e| StoreError::Encoding(format!("Serialization failed: {}", e)))
    }

    /// Deserializes an artifact, rejecting any version other than the current one.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let artifact: Self = decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact) // bincode 2 returns (data, bytes_read)
            .map_err(|e| StoreError::Encoding(format!("Deserialization failed: {}", e)))?;
        if artifact.version != ARTIFACT_VERSION {
            return Err(StoreError::Encoding(format!(
                "Unsupported artifact version {}",
                artifact.version
            )));
        }
        Ok(artifact)
    }

    /// Saves the artifact to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), StoreError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|source| StoreError::Io {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_file(path: &str) -> Result<Self, StoreError> {
        let bytes = fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }
}
