/// Terminal events to camera commands
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use wire3d_core::{CameraCommand, CameraInfo, MoveDirection};

/// Radians of orbit per unit of NDC drag
const ORBIT_SPEED: f64 = FRAC_PI_2;
/// Radians of look per unit of NDC drag
const LOOK_SPEED: f64 = FRAC_PI_4;

/// What the app should do in response to one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Camera(CameraCommand),
    /// Terminal resized to this many cells
    Resize { columns: u16, rows: u16 },
    NextScene,
    ResetCamera,
    Quit,
}

/// Stateful mapper: remembers the button and position of an active drag
#[derive(Debug, Default)]
pub struct InputMapper {
    drag: Option<(MouseButton, (f64, f64))>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map one event. `camera` converts mouse pixels into view space.
    pub fn map(&mut self, event: &Event, camera: &CameraInfo) -> Option<Action> {
        match event {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse, camera),
            Event::Resize(columns, rows) => Some(Action::Resize {
                columns: *columns,
                rows: *rows,
            }),
            _ => None,
        }
    }

    fn map_mouse(&mut self, mouse: &MouseEvent, camera: &CameraInfo) -> Option<Action> {
        let position = cell_to_pixel(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => {
                self.drag = Some((button, position));
                None
            }
            MouseEventKind::Up(_) => {
                self.drag = None;
                None
            }
            MouseEventKind::Drag(button) => {
                let (_, last) = self.drag.filter(|(b, _)| *b == button)?;
                self.drag = Some((button, position));
                Some(Action::Camera(drag_command(button, last, position, camera)))
            }
            MouseEventKind::ScrollUp => Some(Action::Camera(CameraCommand::Zoom { delta: 1.0 })),
            MouseEventKind::ScrollDown => {
                Some(Action::Camera(CameraCommand::Zoom { delta: -1.0 }))
            }
            _ => None,
        }
    }
}

fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let step = |direction| Some(Action::Camera(CameraCommand::Move(direction)));

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up => step(MoveDirection::Up),
        KeyCode::Down => step(MoveDirection::Down),
        KeyCode::Left | KeyCode::Char('a') => step(MoveDirection::Left),
        KeyCode::Right | KeyCode::Char('d') => step(MoveDirection::Right),
        KeyCode::Char('w') | KeyCode::PageUp => step(MoveDirection::Forward),
        KeyCode::Char('s') | KeyCode::PageDown => step(MoveDirection::Backward),
        KeyCode::Char('r') => Some(Action::ResetCamera),
        KeyCode::Tab => Some(Action::NextScene),
        _ => None,
    }
}

/// Center of the upper pixel of a terminal cell
fn cell_to_pixel(column: u16, row: u16) -> (f64, f64) {
    (f64::from(column) + 0.5, f64::from(row) * 2.0 + 0.5)
}

fn drag_command(
    button: MouseButton,
    from: (f64, f64),
    to: (f64, f64),
    camera: &CameraInfo,
) -> CameraCommand {
    if button == MouseButton::Middle {
        return CameraCommand::DragPan { from, to };
    }

    let delta = camera.screen_to_view(to.0, to.1) - camera.screen_to_view(from.0, from.1);
    match button {
        MouseButton::Right => CameraCommand::Look {
            delta_yaw: -delta.x * LOOK_SPEED,
            delta_pitch: delta.y * LOOK_SPEED,
        },
        _ => CameraCommand::Orbit {
            delta_yaw: -delta.x * ORBIT_SPEED,
            delta_pitch: -delta.y * ORBIT_SPEED,
        },
    }
}
