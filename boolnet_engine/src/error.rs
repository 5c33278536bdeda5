//! BoolNet Engine: Error Types
//!
//! Every rejected call maps to one `ShapeMismatch` case. Validation
//! runs before any computation, so an error always means "no output".

use thiserror::Error;

/// Which shape check failed, with the dimensions that were seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    /// Topology is not N×N.
    #[error("topology must be square, got {rows}x{cols}")]
    NonSquareTopology { rows: usize, cols: usize },

    /// A nested-row matrix had a row of the wrong width.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A flat buffer does not hold exactly rows * cols cells.
    #[error("flat buffer of {len} cells cannot form a {rows}x{cols} matrix")]
    FlatLength { rows: usize, cols: usize, len: usize },

    /// Mask shape differs from topology shape.
    #[error("mask must be {}x{}, got {}x{}", expected.0, expected.1, found.0, found.1)]
    MaskShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// State vector length differs from node count.
    #[error("state must have {expected} entries, got {found}")]
    StateLength { expected: usize, found: usize },

    /// Step count below zero.
    #[error("stepcount must be non-negative, got {0}")]
    NegativeStepCount(i64),
}

/// Engine error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(#[from] ShapeMismatch),

    /// Textual bit rows accept only '0' and '1'.
    #[error("invalid bit {ch:?} at row {row}, column {col}")]
    InvalidBit { ch: char, row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// True for every failure of the shape contract.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, EngineError::ShapeMismatch(_))
    }
}
