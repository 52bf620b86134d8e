//! exview terminal viewer.
//!
//! Loads a mesh (JSON triangle soup or STL) and shows it with interactive
//! exploded-view controls, or writes the Plotly figure for a given factor.
//! With `--assembly` it writes the figure of a piece-by-piece assembly step.
//!
//! Usage: exview-terminal [MESH] [OPTIONS]
//!
//! Set `RUST_LOG=debug` for per-interaction logging.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use exview_core::command::Language;
use exview_core::{
    assembly_figure, loader, Action, AssemblyGuide, ExplosionRange, FigureBuilder, FlatMesh,
    Layout, Mesh, ViewPreset, ViewerState,
};
use exview_terminal::TerminalApp;

#[derive(Parser)]
#[command(name = "exview-terminal")]
#[command(author, version, about = "Exploded-view mesh viewer", long_about = None)]
struct Cli {
    /// Mesh file (.json or .stl); a cube is shown when omitted
    mesh: Option<PathBuf>,

    /// JSON key holding the triangle list
    #[arg(short, long, default_value = "v")]
    key: String,

    /// Initial explosion factor (0 to 10, snapped to 0.5 steps)
    #[arg(short, long, default_value = "0")]
    factor: f64,

    /// Initial camera view
    #[arg(long, value_enum, default_value = "default")]
    view: View,

    /// Write the Plotly figure JSON to this file and exit
    #[arg(long)]
    figure: Option<PathBuf>,

    /// Figure title
    #[arg(long, default_value = "3D Model Viewer")]
    title: String,

    /// Size the figure for narrow screens
    #[arg(long)]
    compact: bool,

    /// Assembly document (scene_configuration pieces); writes its figure to
    /// --figure instead of viewing a mesh
    #[arg(long, requires = "figure")]
    assembly: Option<PathBuf>,

    /// Number of assembly pieces to show; all when omitted
    #[arg(long, requires = "assembly")]
    pieces: Option<usize>,

    /// Language for typed commands (es, en, fr)
    #[arg(long, default_value = "en")]
    lang: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    Default,
    Top,
    Front,
    Side,
}

impl From<View> for ViewPreset {
    fn from(view: View) -> Self {
        match view {
            View::Default => ViewPreset::Default,
            View::Top => ViewPreset::Top,
            View::Front => ViewPreset::Front,
            View::Side => ViewPreset::Side,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(path), Some(out)) = (&cli.assembly, &cli.figure) {
        let mut guide = AssemblyGuide::load(path)?;
        match cli.pieces {
            Some(n) => {
                for _ in 0..n {
                    if !guide.step_forward() {
                        break;
                    }
                }
            }
            None => guide.complete(),
        }
        fs::write(out, assembly_figure(&guide, &cli.title).to_json()?)?;
        println!("{} -> {}", guide.status(), out.display());
        return Ok(());
    }

    let mesh = match &cli.mesh {
        Some(path) => loader::load_with_key(path, &cli.key)?,
        None => {
            log::info!("no mesh given, using a cube");
            Mesh::cube(200.0)
        }
    };

    let flat = FlatMesh::new(&mesh);
    let dims = flat.bounds().dimensions();
    let center = flat.center();
    log::info!(
        "{} vertices, {} triangles, center ({:.1}, {:.1}, {:.1}), size {:.1} x {:.1} x {:.1}",
        flat.vertex_count(),
        flat.triangle_count(),
        center.x,
        center.y,
        center.z,
        dims.x,
        dims.y,
        dims.z
    );

    let mut state = ViewerState::new(ExplosionRange::UI);
    state.apply(Action::View(cli.view.into()));
    state.apply(Action::SetFactor(cli.factor));

    if let Some(out) = &cli.figure {
        let layout = if cli.compact {
            Layout::Compact
        } else {
            Layout::Desktop
        };
        let figure = FigureBuilder::new(&flat)
            .title(cli.title.as_str())
            .layout(layout)
            .view(state.view())
            .build(state.factor());
        fs::write(out, figure.to_json()?)?;
        println!("{} -> {}", state.status(), out.display());
        return Ok(());
    }

    let language = Language::from_code(&cli.lang).unwrap_or_else(|| {
        log::warn!("unsupported language {:?}, using English", cli.lang);
        Language::English
    });

    let mut app = TerminalApp::new(flat, state, language)?;
    app.run()?;
    Ok(())
}
