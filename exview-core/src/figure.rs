//! Plotly `mesh3d` figure output.
//!
//! Builds the JSON a browser hands to `Plotly.react`: one mesh trace with the
//! (possibly exploded) coordinates, the triangle index columns, a per-vertex
//! intensity taken from height, and a scene layout with the camera of the
//! selected [`ViewPreset`].

use serde::Serialize;

use crate::assembly::AssemblyGuide;
use crate::explode::{explode, Coordinates};
use crate::flat::FlatMesh;
use crate::projection::ViewPreset;

/// Page layout the figure is sized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Desktop,
    /// Narrow screens: fixed height, automatic width, touch-friendly dragging
    Compact,
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure<T = MeshTrace> {
    pub data: Vec<T>,
    pub layout: FigureLayout,
}

impl<T: Serialize> Figure<T> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MeshTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub k: Vec<usize>,
    pub intensity: Vec<f64>,
    pub colorscale: &'static str,
    pub opacity: f64,
    pub showscale: bool,
    pub hovertemplate: &'static str,
    pub name: String,
}

/// Assembly trace: flat colour per face instead of a height colorscale
#[derive(Debug, Clone, Serialize)]
pub struct FacetedTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub k: Vec<usize>,
    pub facecolor: Vec<String>,
    pub opacity: f64,
    pub showscale: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureLayout {
    pub title: Title,
    pub scene: Scene,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    pub height: u32,
    pub margin: Margin,
    pub showlegend: bool,
    pub autosize: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragmode: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
    pub camera: SceneCamera,
    pub aspectmode: &'static str,
    pub bgcolor: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<nalgebra::Vector3<f64>> for Xyz {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneCamera {
    pub eye: Xyz,
    pub center: Xyz,
    pub up: Xyz,
}

impl From<ViewPreset> for SceneCamera {
    fn from(preset: ViewPreset) -> Self {
        Self {
            eye: preset.eye().into(),
            center: Xyz {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            up: preset.up().into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

const HOVER_TEMPLATE: &str =
    "<b>Coordinates:</b><br>X: %{x:.1f}<br>Y: %{y:.1f}<br>Z: %{z:.1f}<br><extra></extra>";

/// Assembles [`Figure`]s for one mesh.
#[derive(Debug, Clone)]
pub struct FigureBuilder<'a> {
    mesh: &'a FlatMesh,
    title: String,
    layout: Layout,
    view: ViewPreset,
}

impl<'a> FigureBuilder<'a> {
    pub fn new(mesh: &'a FlatMesh) -> Self {
        Self {
            mesh,
            title: "3D Model Viewer".to_string(),
            layout: Layout::Desktop,
            view: ViewPreset::Default,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn view(mut self, view: ViewPreset) -> Self {
        self.view = view;
        self
    }

    /// Explode the mesh by `factor` and wrap it in a figure
    pub fn build(&self, factor: f64) -> Figure {
        let coords = explode(self.mesh, factor);
        Figure {
            data: vec![self.trace(coords, factor > 0.0)],
            layout: self.figure_layout(factor > 0.0),
        }
    }

    fn trace(&self, coords: Coordinates, exploded: bool) -> MeshTrace {
        let triangles = self.mesh.triangles();
        let (colorscale, opacity) = if exploded {
            ("Reds", 0.8)
        } else {
            ("Blues", 0.7)
        };

        MeshTrace {
            kind: "mesh3d",
            i: triangles.iter().map(|t| t[0]).collect(),
            j: triangles.iter().map(|t| t[1]).collect(),
            k: triangles.iter().map(|t| t[2]).collect(),
            intensity: coords.z.clone(),
            x: coords.x,
            y: coords.y,
            z: coords.z,
            colorscale,
            opacity,
            showscale: false,
            hovertemplate: HOVER_TEMPLATE,
            name: format!("Mesh ({})", if exploded { "Exploded" } else { "Normal" }),
        }
    }

    fn figure_layout(&self, exploded: bool) -> FigureLayout {
        let (width, height, margin, font_size) = match self.layout {
            Layout::Desktop => (Some(900), 700, Margin { l: 0, r: 0, t: 50, b: 0 }, 20),
            Layout::Compact => (None, 400, Margin { l: 10, r: 10, t: 40, b: 10 }, 14),
        };
        let mode = match (self.layout, exploded) {
            (Layout::Desktop, true) => "Exploded Mode",
            (Layout::Desktop, false) => "Normal Mode",
            (Layout::Compact, true) => "Exploded",
            (Layout::Compact, false) => "Normal",
        };

        FigureLayout {
            title: Title {
                text: format!("{} - {}", self.title, mode),
                x: 0.5,
                font: Font {
                    size: font_size,
                    color: "darkblue",
                },
            },
            scene: Scene {
                xaxis: Axis { title: "X" },
                yaxis: Axis { title: "Y" },
                zaxis: Axis { title: "Z" },
                camera: self.view.into(),
                aspectmode: "cube",
                bgcolor: "rgba(240, 240, 240, 0.8)",
            },
            width,
            height,
            margin,
            showlegend: false,
            autosize: self.layout == Layout::Compact,
            dragmode: (self.layout == Layout::Compact).then_some("orbit"),
        }
    }
}

/// Figure of the pieces `guide` currently shows
pub fn assembly_figure(guide: &AssemblyGuide, title: &str) -> Figure<FacetedTrace> {
    let mesh = guide.merged();
    let facecolor = mesh
        .facecolor
        .iter()
        .map(|c| {
            let [r, g, b] = c.map(|v| (v * 255.0).round() as u8);
            format!("rgb({}, {}, {})", r, g, b)
        })
        .collect();

    Figure {
        data: vec![FacetedTrace {
            kind: "mesh3d",
            x: mesh.x,
            y: mesh.y,
            z: mesh.z,
            i: mesh.i,
            j: mesh.j,
            k: mesh.k,
            facecolor,
            opacity: 0.7,
            showscale: false,
        }],
        layout: FigureLayout {
            title: Title {
                text: format!("{} - {}", title, guide.status()),
                x: 0.5,
                font: Font {
                    size: 20,
                    color: "darkblue",
                },
            },
            scene: Scene {
                xaxis: Axis { title: "X" },
                yaxis: Axis { title: "Y" },
                zaxis: Axis { title: "Z" },
                camera: ViewPreset::Default.into(),
                aspectmode: "data",
                bgcolor: "rgba(240, 240, 240, 0.8)",
            },
            width: None,
            height: 700,
            margin: Margin { l: 0, r: 0, t: 40, b: 0 },
            showlegend: false,
            autosize: true,
            dragmode: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use serde_json::Value;

    #[test]
    fn test_normal_figure() {
        let flat = FlatMesh::new(&Mesh::cube(2.0));
        let figure = FigureBuilder::new(&flat).build(0.0);
        let trace = &figure.data[0];

        assert_eq!(trace.colorscale, "Blues");
        assert_eq!(trace.opacity, 0.7);
        assert_eq!(trace.x, flat.x());
        assert_eq!(trace.intensity, trace.z);
        assert_eq!(trace.i.len(), 12);
        assert_eq!((trace.i[1], trace.j[1], trace.k[1]), (3, 4, 5));
        assert_eq!(figure.layout.title.text, "3D Model Viewer - Normal Mode");
    }

    #[test]
    fn test_exploded_figure_json() {
        let flat = FlatMesh::new(&Mesh::cube(2.0));
        let json = FigureBuilder::new(&flat)
            .title("Chair")
            .view(ViewPreset::Top)
            .build(5.0)
            .to_json()
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["data"][0]["type"], "mesh3d");
        assert_eq!(value["data"][0]["colorscale"], "Reds");
        assert_eq!(value["data"][0]["name"], "Mesh (Exploded)");
        assert_eq!(value["layout"]["title"]["text"], "Chair - Exploded Mode");
        assert_eq!(value["layout"]["scene"]["camera"]["eye"]["z"], 2.5);
        assert_eq!(value["layout"]["scene"]["camera"]["up"]["y"], 1.0);
        assert_eq!(value["layout"]["width"], 900);
        assert!(value["layout"].get("dragmode").is_none());
    }

    #[test]
    fn test_compact_layout() {
        let flat = FlatMesh::new(&Mesh::cube(2.0));
        let figure = FigureBuilder::new(&flat).layout(Layout::Compact).build(1.0);
        assert_eq!(figure.layout.width, None);
        assert_eq!(figure.layout.height, 400);
        assert_eq!(figure.layout.title.font.size, 14);
        assert_eq!(figure.layout.dragmode, Some("orbit"));
        assert!(figure.layout.autosize);
    }

    #[test]
    fn test_assembly_figure_colors_each_face() {
        let mut guide = AssemblyGuide::from_json(
            r##"{"scene_configuration": {"pieces": [
                {"color": "#ff8000", "mesh": {"vertices": [[0,0,0],[1,0,0],[0,1,0],[1,1,0]],
                                              "faces": [[0,1,2],[1,3,2]]}}
            ]}}"##,
        )
        .unwrap();
        guide.step_forward();

        let value: Value =
            serde_json::from_str(&assembly_figure(&guide, "Chair").to_json().unwrap()).unwrap();
        let trace = &value["data"][0];
        assert_eq!(trace["type"], "mesh3d");
        assert_eq!(trace["facecolor"][1], "rgb(255, 128, 0)");
        assert_eq!(trace["opacity"], 0.7);
        assert!(trace.get("colorscale").is_none());
        assert_eq!(value["layout"]["title"]["text"], "Chair - Model complete - 1 pieces");
    }
}
