/// Terminal host for the Wire3D wireframe pipeline
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use std::collections::VecDeque;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use wire3d_core::{CameraCommand, CameraInfo, ClientBuffer, LineSink, Size, Vector3};

pub mod config;
pub mod input;
pub mod renderer;
pub mod scenes;

pub use config::ViewerArgs;
pub use input::{Action, InputMapper};
pub use renderer::PixelSurface;
pub use scenes::{Scene, SceneKind};

/// Frame rate measured over fixed windows
#[derive(Debug)]
pub struct FpsCounter {
    window: Duration,
    window_start: Instant,
    frames: u32,
    fps: f64,
}

impl FpsCounter {
    pub const WINDOW: Duration = Duration::from_millis(500);

    pub fn new(now: Instant) -> Self {
        Self {
            window: Self::WINDOW,
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one presented frame
    pub fn tick(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= self.window {
            self.fps = f64::from(self.frames) / elapsed.as_secs_f64();
            self.frames = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// Fold queued commands into one camera transition. Rejected commands are
/// logged and skipped; the camera they were applied to carries on.
pub fn apply_commands(
    camera: &CameraInfo,
    commands: impl IntoIterator<Item = CameraCommand>,
) -> CameraInfo {
    commands
        .into_iter()
        .fold(camera.clone(), |current, command| match current.apply(command) {
            Ok(next) => next,
            Err(error) => {
                warn!(?command, %error, "Camera command rejected");
                current
            }
        })
}

/// Draw every polyline of `scene` at `elapsed` seconds into `sink`
pub fn render_scene(
    scene: &Scene,
    camera: &CameraInfo,
    elapsed: f64,
    sink: &mut impl LineSink,
) -> wire3d_core::Result<usize> {
    let mut segments = 0;
    for (space, polyline) in scene.frame(elapsed)? {
        segments += polyline.draw(space, camera, sink);
    }
    Ok(segments)
}

/// Status line, cut to `columns` characters so it never wraps onto the
/// pixel rows below it
pub fn hud_line(scene: &Scene, fps: f64, segments: usize, eye: Vector3, columns: usize) -> String {
    format!(
        "Wire3D | {} | FPS: {:.1} | segments: {} | eye ({:.2}, {:.2}, {:.2}) | Arrows/WASD move, drag orbit/look/pan, wheel zoom, Tab scene, R reset, Q quit",
        scene, fps, segments, eye.x, eye.y, eye.z
    )
    .chars()
    .take(columns)
    .collect()
}

/// Main application struct for terminal wireframe rendering
pub struct App {
    scenes: Vec<Scene>,
    current: usize,
    home: CameraInfo,
    camera: CameraInfo,
    surface: PixelSurface,
    input: InputMapper,
    commands: VecDeque<CameraCommand>,
    frame_time: Duration,
    started: Instant,
    fps: FpsCounter,
    running: bool,
}

impl App {
    pub fn new(args: &ViewerArgs) -> anyhow::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let surface = PixelSurface::for_terminal(columns, rows);
        let buffer = ClientBuffer::from_size(
            Size::new(surface.width() as u32, surface.height() as u32).at_least_one(),
        );
        let camera = args.camera(buffer)?;
        let (scenes, current) = args.scenes()?;
        let now = Instant::now();

        info!(scene = %scenes[current], columns, rows, "Viewer starting");
        Ok(Self {
            scenes,
            current,
            home: camera.clone(),
            camera,
            surface,
            input: InputMapper::new(),
            commands: VecDeque::new(),
            frame_time: Duration::from_secs_f64(1.0 / f64::from(args.fps)),
            started: now,
            fps: FpsCounter::new(now),
            running: true,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain input; camera changes wait in the queue
            while event::poll(Duration::ZERO)? {
                let event = event::read()?;
                self.handle_event(&event);
            }

            // One camera transition between frames
            if !self.commands.is_empty() {
                self.camera = apply_commands(&self.camera, self.commands.drain(..));
            }

            self.render()?;
            self.fps.tick(Instant::now());

            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &event::Event) {
        let Some(action) = self.input.map(event, &self.camera) else {
            return;
        };
        match action {
            Action::Camera(command) => self.commands.push_back(command),
            Action::Resize { columns, rows } => {
                self.surface = PixelSurface::for_terminal(columns, rows);
                self.commands.push_back(CameraCommand::Resize {
                    width: self.surface.width() as u32,
                    height: self.surface.height() as u32,
                });
            }
            Action::NextScene => {
                self.current = (self.current + 1) % self.scenes.len();
                debug!(scene = %self.scenes[self.current], "Scene switched");
            }
            Action::ResetCamera => {
                self.commands.clear();
                let size = self.camera.buffer_size();
                self.camera = apply_commands(
                    &self.home,
                    [CameraCommand::Resize {
                        width: size.width,
                        height: size.height,
                    }],
                );
            }
            Action::Quit => self.running = false,
        }
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let elapsed = self.started.elapsed().as_secs_f64();

        self.surface.clear();
        let scene = &self.scenes[self.current];
        let segments = render_scene(scene, &self.camera, elapsed, &mut self.surface)?;

        let mut stdout = stdout();
        self.surface.draw(&mut stdout)?;

        let hud = hud_line(
            scene,
            self.fps.fps(),
            segments,
            self.camera.eye(),
            self.surface.width(),
        );
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            SetBackgroundColor(Color::Black),
            Print(hud),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
