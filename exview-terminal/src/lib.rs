/// Terminal-based exploded-view viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use exview_core::command::{self, Language};
use exview_core::{
    explode, Action, Camera, Coordinates, FlatMesh, Orientation, ViewPreset, ViewerState,
    EXPLOSION_SCALE,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 0.5;

/// Rows reserved for the header and status lines
const OVERLAY_ROWS: u16 = 2;

const ROTATE_STEP: f64 = 0.1;

/// Keyboard input state: navigating, or typing an assistant command
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    Navigate,
    Command(String),
}

/// Main application struct for the interactive exploded view
pub struct TerminalApp {
    mesh: FlatMesh,
    state: ViewerState,
    language: Language,
    orientation: Orientation,
    camera: Camera,
    renderer: AsciiRenderer,
    coords: Coordinates,
    input: InputMode,
    message: Option<String>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: FlatMesh, state: ViewerState, language: Language) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let rows = height.saturating_sub(OVERLAY_ROWS).max(1);
        let coords = explode(&mesh, state.factor());

        let mut app = Self {
            mesh,
            state,
            language,
            orientation: Orientation::default(),
            camera: Camera::new(width as u32, rows as u32),
            renderer: AsciiRenderer::new(width as usize, rows as usize),
            coords,
            input: InputMode::Navigate,
            message: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.frame_camera();
        Ok(app)
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
                    Event::Resize(width, height) => self.resize(width, height),
                    _ => {}
                }
            }

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let InputMode::Command(ref mut line) = self.input {
            match key.code {
                KeyCode::Enter => {
                    let text = std::mem::take(line);
                    self.input = InputMode::Navigate;
                    self.run_command(&text);
                }
                KeyCode::Esc => self.input = InputMode::Navigate,
                KeyCode::Backspace => {
                    line.pop();
                }
                KeyCode::Char(c) => line.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char(':') => self.input = InputMode::Command(String::new()),
            KeyCode::Char('+') | KeyCode::Char('=') => self.apply(Action::Increase),
            KeyCode::Char('-') => self.apply(Action::Decrease),
            KeyCode::Char('x') => self.apply(Action::MaxExplosion),
            KeyCode::Char('0') => self.apply(Action::Reset),
            KeyCode::Char('1') => self.apply(Action::View(ViewPreset::Default)),
            KeyCode::Char('t') => self.apply(Action::View(ViewPreset::Top)),
            KeyCode::Char('f') => self.apply(Action::View(ViewPreset::Front)),
            KeyCode::Char('l') => self.apply(Action::View(ViewPreset::Side)),
            KeyCode::Char('w') | KeyCode::Up => self.orientation.rotate(0.0, ROTATE_STEP),
            KeyCode::Char('s') | KeyCode::Down => self.orientation.rotate(0.0, -ROTATE_STEP),
            KeyCode::Char('a') | KeyCode::Left => self.orientation.rotate(-ROTATE_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.orientation.rotate(ROTATE_STEP, 0.0),
            _ => {}
        }
    }

    fn run_command(&mut self, text: &str) {
        let detection = command::detect(text, self.language);
        log::debug!("command {:?} -> {:?}", text, detection);

        if let Some(action) = detection.intent.action() {
            self.apply(action);
        }
        self.message = Some(single_line(detection.reply()));
    }

    /// Update the controls and recompute the explosion from the original mesh
    fn apply(&mut self, action: Action) {
        let previous_view = self.state.view();
        self.state.apply(action);

        if matches!(action, Action::Reset | Action::View(_)) {
            self.orientation.reset();
        }
        if self.state.view() != previous_view {
            self.frame_camera();
        }
        self.coords = explode(&self.mesh, self.state.factor());
    }

    fn resize(&mut self, width: u16, height: u16) {
        let rows = height.saturating_sub(OVERLAY_ROWS).max(1);
        self.renderer = AsciiRenderer::new(width as usize, rows as usize);
        self.frame_camera();
    }

    /// Fit the camera to the mesh plus the largest possible explosion
    fn frame_camera(&mut self) {
        let width = self.renderer.width() as f64;
        let height = self.renderer.height().max(1) as f64;
        self.camera.aspect = width / height * CELL_ASPECT;

        let padding = self.state.range().max * EXPLOSION_SCALE;
        self.camera.frame_bounds(
            self.state.view(),
            &self.mesh.bounds(),
            self.mesh.center(),
            padding,
        );
    }

    fn render(&mut self) -> io::Result<()> {
        let model = self.orientation.model_matrix(self.mesh.center());

        self.renderer.clear();
        self.renderer.render_mesh(
            &self.mesh,
            &self.coords,
            &model,
            &self.camera,
            self.state.is_exploded(),
        );

        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "exview | {} triangles | FPS: {:.1} | +/- explode  x max  0 reset  1/t/f/l views  WASD rotate  : command  q quit",
                self.mesh.triangle_count(),
                self.fps
            )),
            terminal::Clear(ClearType::UntilNewLine),
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Green),
            Print(self.status_line()),
            terminal::Clear(ClearType::UntilNewLine),
            ResetColor,
            cursor::MoveTo(0, OVERLAY_ROWS)
        )?;

        self.renderer.draw(&mut stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        match (&self.input, &self.message) {
            (InputMode::Command(line), _) => format!(":{}", line),
            (InputMode::Navigate, Some(message)) => format!("{} | {}", self.state.status(), message),
            (InputMode::Navigate, None) => self.state.status().to_string(),
        }
    }
}

/// The status bar is one row high
fn single_line(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use exview_core::command::{detect, Language};

    #[test]
    fn test_help_reply_fits_status_row() {
        let reply = detect("help", Language::English).reply();
        let line = single_line(reply);
        assert!(!line.contains('\n'));
        assert!(line.contains("with: - Explore 3D models"));
    }
}
