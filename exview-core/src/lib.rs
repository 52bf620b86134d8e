/// exview Core Library - exploded-view geometry shared by every front end
///
/// This library provides the stateless core: mesh loading (JSON triangle soup
/// and STL), the flattened mesh representation, the explosion transform,
/// viewer controls, cameras, the Plotly figure output and the piece-by-piece
/// assembly guide.

pub mod assembly;
pub mod command;
pub mod controls;
pub mod error;
pub mod explode;
pub mod figure;
pub mod flat;
pub mod geometry;
pub mod json;
pub mod loader;
pub mod projection;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use assembly::{AssemblyGuide, AssemblyMesh, Piece};
pub use controls::{Action, ExplosionLevel, ExplosionRange, ViewerState};
pub use error::{MeshError, Result};
pub use explode::{explode, Coordinates, EXPLOSION_SCALE};
pub use figure::{assembly_figure, Figure, FigureBuilder, Layout};
pub use flat::{Bounds, FlatMesh};
pub use geometry::{Mesh, Triangle};
pub use projection::{Camera, ProjectionMode, ViewPreset};
pub use transform::Orientation;
