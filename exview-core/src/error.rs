/// Error types for mesh loading
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors raised while loading or validating a mesh.
///
/// The transform itself never fails; every variant here is produced at load time.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no triangle list under the expected key.
    #[error("document has no triangle array under key \"{key}\"")]
    MissingKey { key: String },

    /// A triangle does not have exactly three vertices.
    #[error("triangle {triangle} has {found} vertices, expected 3")]
    VertexCount { triangle: usize, found: usize },

    /// A vertex does not have exactly three coordinates.
    #[error("triangle {triangle}, vertex {vertex} has {found} coordinates, expected [x, y, z]")]
    CoordinateCount {
        triangle: usize,
        vertex: usize,
        found: usize,
    },

    /// A coordinate is not a finite number.
    #[error("triangle {triangle}, vertex {vertex}: coordinate {axis} is not a finite number")]
    InvalidCoordinate {
        triangle: usize,
        vertex: usize,
        axis: usize,
    },

    /// An assembly piece has a bad colour or a face indexing past its vertices.
    #[error("piece {piece}: {reason}")]
    InvalidPiece { piece: usize, reason: String },

    #[error("STL parse error: {0}")]
    Stl(String),

    #[error("unsupported mesh format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}
