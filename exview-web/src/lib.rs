/// exview Web - WASM bindings for the exploded-view transform
///
/// The page owns the Plotly plot; this module owns the mesh. Each slider or
/// button event calls into `ExplodedViewer`, which recomputes the explosion
/// from the original coordinates and returns a figure for `Plotly.react`.
/// `AssemblyViewer` does the same for the piece-by-piece assembly guide.

use exview_core::command;
use exview_core::{
    assembly_figure, explode, json, Action, AssemblyGuide, FigureBuilder, FlatMesh, Layout,
    MeshError, ViewPreset, ViewerState,
};
use wasm_bindgen::prelude::*;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(target_arch = "wasm32")]
fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn console_log(message: &str) {
    log::info!("{}", message);
}

#[wasm_bindgen]
pub struct ExplodedViewer {
    mesh: FlatMesh,
    state: ViewerState,
    layout: Layout,
    title: String,
    last_intent: Option<command::Intent>,
}

#[wasm_bindgen]
impl ExplodedViewer {
    /// Parse a `{"v": [...]}` document. Malformed input is rejected whole.
    #[wasm_bindgen(constructor)]
    pub fn new(document: &str) -> Result<ExplodedViewer, JsValue> {
        let viewer = Self::from_document(document).map_err(js_error)?;

        let center = viewer.mesh.center();
        console_log(&format!(
            "exview: {} triangles, center ({:.1}, {:.1}, {:.1})",
            viewer.mesh.triangle_count(),
            center.x,
            center.y,
            center.z
        ));
        Ok(viewer)
    }

    /// Switch between the desktop and compact (mobile) figure layouts
    pub fn set_compact(&mut self, compact: bool) {
        self.layout = if compact {
            Layout::Compact
        } else {
            Layout::Desktop
        };
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Slider input; the value is clamped to 0..=10 and snapped to 0.5
    pub fn set_factor(&mut self, factor: f64) {
        self.state.apply(Action::SetFactor(factor));
    }

    pub fn max_explosion(&mut self) {
        self.state.apply(Action::MaxExplosion);
    }

    pub fn reset(&mut self) {
        self.state.apply(Action::Reset);
    }

    /// Select a view by name (`default`, `top`, `front`, `side`)
    pub fn set_view(&mut self, name: &str) -> Result<(), JsValue> {
        self.select_view(name).map_err(js_error)
    }

    /// Run free text through the command detector and return the
    /// assistant's reply. Viewer intents are applied immediately.
    pub fn apply_command(&mut self, text: &str, lang: &str) -> String {
        let detection = command::detect_with_code(text, lang);
        if let Some(action) = detection.intent.action() {
            self.state.apply(action);
        }
        self.last_intent = Some(detection.intent);
        detection.reply().to_string()
    }

    /// Intent of the last `apply_command`, e.g. `"Explosion"`
    pub fn last_intent(&self) -> Option<String> {
        self.last_intent.map(|intent| format!("{:?}", intent))
    }

    pub fn factor(&self) -> f64 {
        self.state.factor()
    }

    pub fn status(&self) -> String {
        match self.layout {
            Layout::Desktop => self.state.status().to_string(),
            Layout::Compact => self.state.compact_status().to_string(),
        }
    }

    /// Plotly figure JSON for the current factor and view
    pub fn figure_json(&self) -> Result<String, JsValue> {
        self.figure().map_err(js_error)
    }

    /// Exploded positions as an interleaved `[x, y, z, ...]` array
    pub fn coordinates(&self) -> Vec<f64> {
        explode(&self.mesh, self.state.factor()).interleaved()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Global centre as `[x, y, z]`
    pub fn center(&self) -> Vec<f64> {
        let c = self.mesh.center();
        vec![c.x, c.y, c.z]
    }

    /// Model size along each axis as `[dx, dy, dz]`
    pub fn dimensions(&self) -> Vec<f64> {
        let d = self.mesh.bounds().dimensions();
        vec![d.x, d.y, d.z]
    }
}

impl ExplodedViewer {
    fn from_document(document: &str) -> Result<Self, MeshError> {
        let mesh = json::parse(document)?;
        Ok(Self {
            mesh: FlatMesh::new(&mesh),
            state: ViewerState::default(),
            layout: Layout::Desktop,
            title: "3D Model Viewer".to_string(),
            last_intent: None,
        })
    }

    fn select_view(&mut self, name: &str) -> Result<(), String> {
        let preset =
            ViewPreset::from_name(name).ok_or_else(|| format!("unknown view: {}", name))?;
        self.state.apply(Action::View(preset));
        Ok(())
    }

    fn figure(&self) -> serde_json::Result<String> {
        FigureBuilder::new(&self.mesh)
            .title(self.title.as_str())
            .layout(self.layout)
            .view(self.state.view())
            .build(self.state.factor())
            .to_json()
    }
}

/// Step-through viewer for a `scene_configuration` pieces document
#[wasm_bindgen]
pub struct AssemblyViewer {
    guide: AssemblyGuide,
    title: String,
}

#[wasm_bindgen]
impl AssemblyViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(document: &str) -> Result<AssemblyViewer, JsValue> {
        let guide = AssemblyGuide::from_json(document).map_err(js_error)?;
        console_log(&format!("exview: assembly with {} pieces", guide.len()));
        Ok(AssemblyViewer {
            guide,
            title: "3D Model".to_string(),
        })
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Reveal the next piece; `false` once every piece is shown
    pub fn next_piece(&mut self) -> bool {
        self.guide.step_forward()
    }

    /// Hide the last revealed piece; the first piece always stays
    pub fn previous_piece(&mut self) -> bool {
        self.guide.step_back()
    }

    pub fn complete(&mut self) {
        self.guide.complete();
    }

    pub fn shown(&self) -> usize {
        self.guide.shown()
    }

    pub fn piece_count(&self) -> usize {
        self.guide.len()
    }

    pub fn status(&self) -> String {
        self.guide.status()
    }

    pub fn figure_json(&self) -> Result<String, JsValue> {
        assembly_figure(&self.guide, &self.title)
            .to_json()
            .map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLES: &str = r#"{"v": [
        [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
        [[10, 0, 0], [11, 0, 0], [10, 1, 0]]
    ]}"#;

    #[test]
    fn test_from_document() {
        let viewer = ExplodedViewer::from_document(TRIANGLES).unwrap();
        assert_eq!(viewer.triangle_count(), 2);
        assert_eq!(viewer.vertex_count(), 6);
        assert_eq!(viewer.dimensions(), vec![11.0, 1.0, 0.0]);
        assert_eq!(viewer.status(), "Normal Mode - No Explosion");
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        let err = ExplodedViewer::from_document(r#"{"v": [[[0, 0], [1, 0, 0], [0, 1, 0]]]}"#);
        assert!(matches!(err, Err(MeshError::CoordinateCount { triangle: 0, .. })));
    }

    #[test]
    fn test_slider_is_clamped_and_snapped() {
        let mut viewer = ExplodedViewer::from_document(TRIANGLES).unwrap();
        viewer.set_factor(42.0);
        assert_eq!(viewer.factor(), 10.0);
        viewer.set_factor(2.3);
        assert_eq!(viewer.factor(), 2.5);

        viewer.set_compact(true);
        assert_eq!(viewer.status(), "Light - 2.5");
    }

    #[test]
    fn test_unknown_view_is_an_error() {
        let mut viewer = ExplodedViewer::from_document(TRIANGLES).unwrap();
        assert_eq!(
            viewer.select_view("isometric"),
            Err("unknown view: isometric".to_string())
        );
        assert!(viewer.select_view("top").is_ok());
        assert_eq!(viewer.state.view(), ViewPreset::Top);
    }

    #[test]
    fn test_command_applies_action_and_replies() {
        let mut viewer = ExplodedViewer::from_document(TRIANGLES).unwrap();
        let reply = viewer.apply_command("exploser le modèle", "fr");
        assert!(reply.starts_with("Parfait !"));
        assert_eq!(viewer.factor(), 5.0);
        assert_eq!(viewer.last_intent().as_deref(), Some("Explosion"));

        let reply = viewer.apply_command("what is this?", "en");
        assert!(reply.starts_with("I understand"));
        assert_eq!(viewer.factor(), 5.0);
    }

    #[test]
    fn test_figure_follows_state() {
        let mut viewer = ExplodedViewer::from_document(TRIANGLES).unwrap();
        viewer.max_explosion();
        let figure: serde_json::Value = serde_json::from_str(&viewer.figure().unwrap()).unwrap();
        assert_eq!(figure["data"][0]["colorscale"], "Reds");
        assert_eq!(viewer.coordinates().len(), 18);
    }

    #[test]
    fn test_assembly_stepping() {
        let mut viewer = AssemblyViewer {
            guide: AssemblyGuide::from_json(
                r##"{"scene_configuration": {"pieces": [
                    {"color": "#112233", "mesh": {"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[0,1,2]]}},
                    {"color": "#445566", "mesh": {"vertices": [[0,0,1],[1,0,1],[0,1,1]], "faces": [[0,1,2]]}}
                ]}}"##,
            )
            .unwrap(),
            title: "Chair".to_string(),
        };
        assert!(viewer.next_piece());
        assert!(!viewer.previous_piece());
        viewer.complete();
        assert_eq!(viewer.shown(), viewer.piece_count());
        assert!(!viewer.next_piece());
    }
}
