//! Error types for doosabin.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three corners.
    #[error("face {face} has {order} vertices, at least 3 are required")]
    FaceTooSmall {
        /// The face index.
        face: usize,
        /// Number of corners found.
        order: usize,
    },

    /// A face repeats a vertex on consecutive corners.
    #[error("face {face} is degenerate (has repeated consecutive vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A face is larger than the weight table ceiling.
    ///
    /// Recoverable: rebuild the table with a larger ceiling and retry.
    #[error("face order {order} exceeds the weight table ceiling {max}")]
    FaceOrderTooLarge {
        /// Order of the offending face.
        order: usize,
        /// Current ceiling.
        max: usize,
    },

    /// A vertex with a closed fan has fewer than three incident faces.
    #[error("vertex {vertex} has only {faces} incident faces and is not on a boundary")]
    NonManifoldVertex {
        /// The vertex index.
        vertex: usize,
        /// Number of incident faces.
        faces: usize,
    },

    /// The edge/face counts around a vertex match no known configuration.
    #[error("unresolvable topology defect at vertex {vertex} ({edges} edges, {faces} faces)")]
    UnresolvableDefect {
        /// The vertex index.
        vertex: usize,
        /// Number of distinct edge neighbors.
        edges: usize,
        /// Number of distinct incident faces.
        faces: usize,
    },

    /// The faces around a vertex could not be ordered into a fan.
    #[error("faces do not form a fan around vertex {vertex}: {reason}")]
    FanReconstructionFailure {
        /// The vertex index.
        vertex: usize,
        /// What went wrong.
        reason: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this error was raised by the subdivision pass itself.
    ///
    /// These are the failures a caller should report before falling back to
    /// the mesh it had before attempting subdivision.
    pub fn is_subdivision_error(&self) -> bool {
        matches!(
            self,
            MeshError::FaceOrderTooLarge { .. }
                | MeshError::NonManifoldVertex { .. }
                | MeshError::UnresolvableDefect { .. }
                | MeshError::FanReconstructionFailure { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::FaceOrderTooLarge { order: 120, max: 100 };
        let msg = err.to_string();
        assert!(msg.contains("120"));
        assert!(msg.contains("100"));

        let err = MeshError::UnresolvableDefect {
            vertex: 7,
            edges: 5,
            faces: 2,
        };
        assert_eq!(
            err.to_string(),
            "unresolvable topology defect at vertex 7 (5 edges, 2 faces)"
        );
    }

    #[test]
    fn test_subdivision_error_kinds() {
        assert!(MeshError::NonManifoldVertex { vertex: 0, faces: 2 }.is_subdivision_error());
        assert!(MeshError::FanReconstructionFailure {
            vertex: 0,
            reason: String::new()
        }
        .is_subdivision_error());
        assert!(!MeshError::EmptyMesh.is_subdivision_error());
        assert!(!MeshError::invalid_param("iterations", 0, "must be positive").is_subdivision_error());
    }
}
