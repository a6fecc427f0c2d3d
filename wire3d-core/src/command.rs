/// Camera-delta commands.
///
/// Input layers never touch a camera directly. They translate events into
/// [`CameraCommand`]s and the frame loop applies them between frames with
/// [`CameraInfo::apply`], which always returns a brand-new snapshot.
use crate::buffer::Size;
use crate::camera::CameraInfo;
use crate::error::Result;
use crate::picking::Plane;
use crate::projection::Projection;
use crate::vector::Vector3;

/// Fraction of a step used by keyboard moves and zoom
pub const STEP: f64 = 0.05;

/// Orbit and look cannot push pitch past this many radians either side.
/// A camera already beyond it may swing back but never further out.
pub const PITCH_LIMIT: f64 = 1.0;

const MOVE_AXIS: Vector3 = Vector3::new(0.0, -1.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Keyboard step relative to the current eye
    Move(MoveDirection),
    /// Shift the eye by a world offset, target stays put
    Translate(Vector3),
    /// Positive moves toward the target, negative away
    Zoom { delta: f64 },
    /// Swing the eye around the target
    Orbit { delta_yaw: f64, delta_pitch: f64 },
    /// Swing the target around the eye
    Look { delta_yaw: f64, delta_pitch: f64 },
    /// Drag the ground plane from one pixel to another
    DragPan { from: (f64, f64), to: (f64, f64) },
    Resize { width: u32, height: u32 },
    SetProjection(Projection),
}

impl CameraInfo {
    /// Apply one command. On error `self` is untouched and the caller keeps it.
    pub fn apply(&self, command: CameraCommand) -> Result<CameraInfo> {
        match command {
            CameraCommand::Move(direction) => self.apply_move(direction),
            CameraCommand::Translate(offset) => self.with_eye(self.eye() + offset),
            CameraCommand::Zoom { delta } => {
                let factor = if delta > 0.0 {
                    1.0 - STEP
                } else if delta < 0.0 {
                    1.0 + STEP
                } else {
                    1.0
                };
                self.scale_eye_vector(factor)
            }
            CameraCommand::Orbit {
                delta_yaw,
                delta_pitch,
            } => {
                let offset = swing(self.eye() - self.target(), delta_yaw, delta_pitch);
                self.with_eye(self.target() + offset)
            }
            CameraCommand::Look {
                delta_yaw,
                delta_pitch,
            } => {
                let offset = swing(self.eye_vector(), delta_yaw, delta_pitch);
                self.with_look_at(self.eye(), self.eye() + offset)
            }
            CameraCommand::DragPan { from, to } => self.apply_drag_pan(from, to),
            CameraCommand::Resize { width, height } => {
                let size = Size::new(width, height).at_least_one();
                let client_buffer = self.client_buffer().resized(size);
                let projection = self
                    .projection()
                    .with_aspect_ratio(client_buffer.aspect_ratio())?;
                self.with_buffers(projection, size, client_buffer)
            }
            CameraCommand::SetProjection(projection) => self.with_projection(projection),
        }
    }

    fn apply_move(&self, direction: MoveDirection) -> Result<CameraInfo> {
        let eye = self.eye();
        match direction {
            MoveDirection::Up => self.with_eye(eye - MOVE_AXIS * STEP),
            MoveDirection::Down => self.with_eye(eye + MOVE_AXIS * STEP),
            MoveDirection::Left => {
                let side = eye.cross(&MOVE_AXIS).normalize()?;
                self.with_eye(eye - side * STEP)
            }
            MoveDirection::Right => {
                let side = MOVE_AXIS.cross(&eye).normalize()?;
                self.with_eye(eye - side * STEP)
            }
            MoveDirection::Forward => self.scale_eye_vector(1.0 - STEP),
            MoveDirection::Backward => self.scale_eye_vector(1.0 + STEP),
        }
    }

    fn scale_eye_vector(&self, factor: f64) -> Result<CameraInfo> {
        self.with_eye(self.target() - self.eye_vector() * factor)
    }

    fn apply_drag_pan(&self, from: (f64, f64), to: (f64, f64)) -> Result<CameraInfo> {
        let from_ray = self.screen_ray(from.0, from.1)?;
        let to_ray = self.screen_ray(to.0, to.1)?;
        let hits = Plane::GROUND.intersect(&from_ray).zip(Plane::GROUND.intersect(&to_ray));

        match hits {
            Some((hit_from, hit_to)) => {
                let offset = hit_from - hit_to;
                self.with_look_at(self.eye() + offset, self.target() + offset)
            }
            None => Ok(self.clone()),
        }
    }
}

/// Rotate `offset` by yaw about +Y and pitch toward +Y, keeping its length
fn swing(offset: Vector3, delta_yaw: f64, delta_pitch: f64) -> Vector3 {
    let distance = offset.length();
    if distance == 0.0 {
        return offset;
    }
    let yaw = offset.x.atan2(offset.z) + delta_yaw;
    let current = (offset.y / distance).clamp(-1.0, 1.0).asin();
    let (low, high) = (current.min(-PITCH_LIMIT), current.max(PITCH_LIMIT));
    let pitch = (current + delta_pitch).clamp(low, high);

    Vector3::new(
        distance * pitch.cos() * yaw.sin(),
        distance * pitch.sin(),
        distance * pitch.cos() * yaw.cos(),
    )
}
