//! BoolNet Engine: Network
//!
//! A topology and its mask, validated once at construction.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::invariants::{check_mask, check_topology};
use crate::matrix::BoolMatrix;

/// Topology plus per-edge mask over N nodes.
///
/// Indexing convention: `adjacency[i][j] == true` means node `j` is an
/// input to node `i`. Rows are receiving nodes, columns are sources.
/// Transposing the matrix reverses every edge.
///
/// `mask[i][j]` only matters where `adjacency[i][j]` holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Network {
    adjacency: BoolMatrix,
    mask: BoolMatrix,
}

impl Network {
    pub fn new(adjacency: BoolMatrix, mask: BoolMatrix) -> Result<Self> {
        check_topology(&adjacency)?;
        check_mask(&adjacency, &mask)?;
        Ok(Self { adjacency, mask })
    }

    pub fn from_bit_rows<S: AsRef<str>>(adjacency: &[S], mask: &[S]) -> Result<Self> {
        Self::new(
            BoolMatrix::from_bit_rows(adjacency)?,
            BoolMatrix::from_bit_rows(mask)?,
        )
    }

    /// Network with no edges.
    pub fn empty(nodes: usize) -> Self {
        Self {
            adjacency: BoolMatrix::zeros(nodes, nodes),
            mask: BoolMatrix::zeros(nodes, nodes),
        }
    }

    pub fn nodes(&self) -> usize {
        self.adjacency.rows()
    }

    pub fn adjacency(&self) -> &BoolMatrix {
        &self.adjacency
    }

    pub fn mask(&self) -> &BoolMatrix {
        &self.mask
    }

    pub fn into_parts(self) -> (BoolMatrix, BoolMatrix) {
        (self.adjacency, self.mask)
    }

    /// Number of active inbound edges of node `i`, or None when `i` is
    /// not a node.
    pub fn in_degree(&self, i: usize) -> Option<usize> {
        self.adjacency.row(i).map(|row| row.iter().filter(|&&e| e).count())
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.as_flat().iter().filter(|&&e| e).count()
    }

    /// Nodes with no active inbound edge. These always decay to false.
    pub fn isolated_nodes(&self) -> Vec<usize> {
        self.adjacency
            .iter_rows()
            .enumerate()
            .filter(|(_, row)| !row.contains(&true))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNetwork {
    adjacency: BoolMatrix,
    mask: BoolMatrix,
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawNetwork::deserialize(deserializer)?;
        Network::new(raw.adjacency, raw.mask).map_err(serde::de::Error::custom)
    }
}
