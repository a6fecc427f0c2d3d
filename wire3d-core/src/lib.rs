//! Wire3D Core Library - wireframe transformation pipeline
//!
//! This library provides the stateless core of the renderer: 4×4 matrix and
//! vector algebra, the camera model with its cached matrices, and the
//! space-aware polyline primitive that turns world, view or screen points
//! into screen-space line segments. STL loading and ready-made shapes feed
//! that primitive.

pub mod buffer;
pub mod camera;
pub mod command;
pub mod error;
pub mod interop;
pub mod matrix;
pub mod model;
pub mod picking;
pub mod pipeline;
pub mod projection;
pub mod shapes;
pub mod vector;

// Re-export commonly used types
pub use buffer::{ClientBuffer, Location, Rectangle, Size};
pub use camera::{CameraInfo, MaterializedCameraInfo};
pub use command::{CameraCommand, MoveDirection};
pub use error::{Error, Result};
pub use matrix::{ElementOrder, Matrix};
pub use model::{load_stl, parse_stl, Mesh, Triangle};
pub use picking::{Plane, Ray};
pub use pipeline::{draw_polyline, Color, LineSink, Pen, Point2, Polyline, Segment, Space};
pub use projection::Projection;
pub use vector::{Vector3, Vector4};
