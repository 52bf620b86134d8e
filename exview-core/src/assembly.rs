//! Piece-by-piece assembly guide.
//!
//! A scene document lists the pieces of a model, each with its own vertex
//! and face lists, a hex colour and an optional priority. The guide sorts
//! them by priority and reveals them one step at a time; the pieces shown
//! so far are merged into one indexed mesh with a colour per face.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{MeshError, Result};

#[derive(Debug, Deserialize)]
struct SceneDocument {
    scene_configuration: SceneConfiguration,
}

#[derive(Debug, Deserialize)]
struct SceneConfiguration {
    pieces: Vec<PieceEntry>,
}

#[derive(Debug, Deserialize)]
struct PieceEntry {
    #[serde(default)]
    name: Option<String>,
    mesh: PieceMesh,
    color: String,
    #[serde(default, rename = "prioridad", alias = "priority")]
    priority: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PieceMesh {
    vertices: Vec<[f64; 3]>,
    faces: Vec<[usize; 3]>,
}

/// One validated piece of the assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub name: Option<String>,
    pub vertices: Vec<[f64; 3]>,
    /// Triangles as indices into this piece's own `vertices`
    pub faces: Vec<[usize; 3]>,
    pub color: [u8; 3],
    pub priority: Option<f64>,
}

impl Piece {
    fn from_entry(index: usize, entry: PieceEntry) -> Result<Self> {
        let color = parse_hex_color(&entry.color).ok_or_else(|| MeshError::InvalidPiece {
            piece: index,
            reason: format!("color {:?} is not #rrggbb", entry.color),
        })?;

        let count = entry.mesh.vertices.len();
        if let Some(face) = entry.mesh.faces.iter().find(|f| f.iter().any(|&v| v >= count)) {
            return Err(MeshError::InvalidPiece {
                piece: index,
                reason: format!("face {:?} indexes past {} vertices", face, count),
            });
        }

        Ok(Self {
            name: entry.name,
            vertices: entry.mesh.vertices,
            faces: entry.mesh.faces,
            color,
            priority: entry.priority,
        })
    }

    /// Colour as `[r, g, b]` in `0..=1`
    pub fn color_normalized(&self) -> [f64; 3] {
        self.color.map(|c| c as f64 / 255.0)
    }
}

fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Pieces shown so far, merged into one indexed mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyMesh {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub k: Vec<usize>,
    /// One colour per face, `[r, g, b]` in `0..=1`
    pub facecolor: Vec<[f64; 3]>,
}

/// Step-through state over the priority-ordered pieces.
#[derive(Debug, Clone)]
pub struct AssemblyGuide {
    pieces: Vec<Piece>,
    shown: usize,
}

impl AssemblyGuide {
    /// Sort `pieces` by ascending priority; pieces without one go last and
    /// ties keep their document order. Nothing is shown initially.
    pub fn new(mut pieces: Vec<Piece>) -> Self {
        pieces.sort_by(|a, b| match (a.priority, b.priority) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { pieces, shown: 0 }
    }

    /// Parse a `{"scene_configuration": {"pieces": [...]}}` document
    pub fn from_json(text: &str) -> Result<Self> {
        let document: SceneDocument = serde_json::from_str(text)?;
        let pieces = document
            .scene_configuration
            .pieces
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Piece::from_entry(index, entry))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("assembly with {} pieces", pieces.len());
        Ok(Self::new(pieces))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let guide = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("loaded {} pieces from {}", guide.len(), path.display());
        Ok(guide)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces in assembly order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Number of pieces currently shown
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Reveal the next piece. Returns `false` when everything is shown.
    pub fn step_forward(&mut self) -> bool {
        if self.shown < self.pieces.len() {
            self.shown += 1;
            true
        } else {
            false
        }
    }

    /// Hide the most recent piece. The first piece stays once shown, so
    /// this returns `false` with one or no pieces visible.
    pub fn step_back(&mut self) -> bool {
        if self.shown > 1 {
            self.shown -= 1;
            true
        } else {
            false
        }
    }

    /// Show every piece
    pub fn complete(&mut self) {
        self.shown = self.pieces.len();
    }

    pub fn is_complete(&self) -> bool {
        self.shown == self.pieces.len()
    }

    /// Merge the shown pieces, offsetting each piece's face indices by the
    /// vertices of the pieces before it
    pub fn merged(&self) -> AssemblyMesh {
        let mut mesh = AssemblyMesh::default();
        for piece in &self.pieces[..self.shown] {
            let offset = mesh.x.len();
            for v in &piece.vertices {
                mesh.x.push(v[0]);
                mesh.y.push(v[1]);
                mesh.z.push(v[2]);
            }

            let color = piece.color_normalized();
            for face in &piece.faces {
                mesh.i.push(face[0] + offset);
                mesh.j.push(face[1] + offset);
                mesh.k.push(face[2] + offset);
                mesh.facecolor.push(color);
            }
        }
        mesh
    }

    pub fn status(&self) -> String {
        if self.is_complete() && !self.is_empty() {
            format!("Model complete - {} pieces", self.shown)
        } else {
            format!("Pieces shown: {} of {}", self.shown, self.pieces.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three pieces listed out of priority order; "trim" has no priority
    const SCENE: &str = r##"{
        "scene_configuration": {
            "pieces": [
                {"name": "seat", "color": "#FF0000", "prioridad": 2,
                 "mesh": {"vertices": [[0,0,1],[1,0,1],[0,1,1]], "faces": [[0,1,2]]}},
                {"name": "trim", "color": "00ff00",
                 "mesh": {"vertices": [[0,0,2],[1,0,2],[0,1,2],[1,1,2]], "faces": [[0,1,2],[1,3,2]]}},
                {"name": "legs", "color": "#0000ff", "prioridad": 1,
                 "mesh": {"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[0,1,2]]}}
            ]
        }
    }"##;

    fn names(guide: &AssemblyGuide) -> Vec<&str> {
        guide
            .pieces()
            .iter()
            .map(|p| p.name.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_priority_order_with_missing_last() {
        let guide = AssemblyGuide::from_json(SCENE).unwrap();
        assert_eq!(names(&guide), ["legs", "seat", "trim"]);
        assert_eq!(guide.shown(), 0);
        assert_eq!(guide.status(), "Pieces shown: 0 of 3");
    }

    #[test]
    fn test_stepping_stops_at_both_ends() {
        let mut guide = AssemblyGuide::from_json(SCENE).unwrap();
        assert!(!guide.step_back());

        assert!(guide.step_forward());
        assert!(!guide.step_back());
        assert_eq!(guide.shown(), 1);

        assert!(guide.step_forward());
        assert!(guide.step_forward());
        assert!(!guide.step_forward());
        assert!(guide.is_complete());
        assert_eq!(guide.status(), "Model complete - 3 pieces");

        assert!(guide.step_back());
        assert_eq!(guide.shown(), 2);
    }

    #[test]
    fn test_merged_faces_are_offset() {
        let mut guide = AssemblyGuide::from_json(SCENE).unwrap();
        guide.complete();
        let mesh = guide.merged();

        assert_eq!(mesh.x.len(), 10);
        assert_eq!(mesh.i, [0, 3, 6, 7]);
        assert_eq!(mesh.j, [1, 4, 7, 9]);
        assert_eq!(mesh.k, [2, 5, 8, 8]);
        assert_eq!(mesh.z[3], 1.0);
        assert_eq!(mesh.facecolor[0], [0.0, 0.0, 1.0]);
        assert_eq!(mesh.facecolor[1], [1.0, 0.0, 0.0]);
        assert_eq!(mesh.facecolor[3], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_partial_merge_shows_only_revealed_pieces() {
        let mut guide = AssemblyGuide::from_json(SCENE).unwrap();
        assert!(guide.merged().x.is_empty());
        guide.step_forward();
        let mesh = guide.merged();
        assert_eq!(mesh.z, [0.0, 0.0, 0.0]);
        assert_eq!(mesh.facecolor.len(), 1);
    }

    #[test]
    fn test_bad_color_names_piece() {
        let text = SCENE.replace("#FF0000", "red");
        let err = AssemblyGuide::from_json(&text).unwrap_err();
        assert!(matches!(err, MeshError::InvalidPiece { piece: 0, .. }));
    }

    #[test]
    fn test_face_out_of_range() {
        let text = SCENE.replace("[[0,1,2],[1,3,2]]", "[[0,1,2],[1,4,2]]");
        let err = AssemblyGuide::from_json(&text).unwrap_err();
        assert!(matches!(err, MeshError::InvalidPiece { piece: 1, .. }));
    }

    #[test]
    fn test_missing_pieces_is_json_error() {
        let err = AssemblyGuide::from_json(r#"{"scene_configuration": {}}"#).unwrap_err();
        assert!(matches!(err, MeshError::Json(_)));
    }
}
