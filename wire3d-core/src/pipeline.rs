/// Space-aware polyline drawing.
///
/// The one drawing primitive: take points in a [`Space`], push them through
/// the matching materialized matrix with a perspective divide, and hand
/// consecutive pairs to a caller-owned [`LineSink`].
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::camera::{CameraInfo, MaterializedCameraInfo};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::vector::Vector3;

/// Coordinate space a polyline is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    /// World units, drawn through view · projection · client
    World,
    /// Normalized view space, drawn through the client matrix only
    View,
    /// Pixels, drawn as given
    Screen,
}

impl Space {
    pub const ALL: [Space; 3] = [Space::World, Space::View, Space::Screen];

    /// Matrix that takes this space to screen pixels
    pub fn to_screen(self, materialization: &MaterializedCameraInfo) -> Matrix {
        match self {
            Space::World => materialization.view_projection_client,
            Space::View => materialization.client_view,
            Space::Screen => Matrix::IDENTITY,
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Space::World => "world",
            Space::View => "view",
            Space::Screen => "screen",
        };
        f.write_str(name)
    }
}

impl FromStr for Space {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "world" => Ok(Space::World),
            "view" => Ok(Space::View),
            "screen" => Ok(Space::Screen),
            _ => Err(Error::UnsupportedSpace(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Space {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Space::World),
            1 => Ok(Space::View),
            2 => Ok(Space::Screen),
            other => Err(Error::UnsupportedSpace(format!("tag {other}"))),
        }
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const AQUA: Self = Self::rgb(0, 255, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pen {
    pub color: Color,
}

impl Pen {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl From<Color> for Pen {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

/// Screen position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector3> for Point2 {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y)
    }
}

/// One screen-space line with its pen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point2,
    pub to: Point2,
    pub pen: Pen,
}

/// Anything that accepts screen-space lines
pub trait LineSink {
    fn draw_line(&mut self, from: Point2, to: Point2, pen: Pen);
}

impl LineSink for Vec<Segment> {
    fn draw_line(&mut self, from: Point2, to: Point2, pen: Pen) {
        self.push(Segment { from, to, pen });
    }
}

/// Points plus the pen they are drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vector3>,
    pub pen: Pen,
}

impl Polyline {
    pub fn new(points: Vec<Vector3>, pen: Pen) -> Self {
        Self { points, pen }
    }

    /// Same polyline with every point pushed through `matrix`
    pub fn transformed(&self, matrix: &Matrix) -> Self {
        Self {
            points: matrix
                .transform_points(self.points.iter().copied())
                .map(|p| p.truncate())
                .collect(),
            pen: self.pen,
        }
    }

    pub fn draw(&self, space: Space, camera: &CameraInfo, sink: &mut impl LineSink) -> usize {
        draw_polyline(&self.points, space, camera, self.pen, sink)
    }
}

/// Transform `points` from `space` to pixels and connect consecutive points.
///
/// Returns the number of segments emitted. A segment is skipped when either
/// endpoint is not finite, which happens for points on the camera plane.
pub fn draw_polyline(
    points: &[Vector3],
    space: Space,
    camera: &CameraInfo,
    pen: Pen,
    sink: &mut impl LineSink,
) -> usize {
    let matrix = space.to_screen(camera.materialization());
    let mut screen = matrix
        .transform_points(points.iter().copied())
        .map(|p| Point2::new(p.x, p.y));

    let mut emitted = 0;
    if let Some(mut previous) = screen.next() {
        for current in screen {
            if previous.is_finite() && current.is_finite() {
                sink.draw_line(previous, current, pen);
                emitted += 1;
            }
            previous = current;
        }
    }

    trace!(%space, points = points.len(), segments = emitted, "Polyline drawn");
    emitted
}
