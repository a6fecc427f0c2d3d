/// Perspective projection parameters
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::picking::Ray;
use crate::vector::Vector3;

/// Immutable perspective frustum description.
///
/// Invariants: 0 < fov_y ≤ π, aspect_ratio > 0, 0 < z_near < z_far.
/// `aspect_ratio` is height / width, matching [`crate::ClientBuffer::aspect_ratio`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov_y: f64,
    aspect_ratio: f64,
    z_near: f64,
    z_far: f64,
}

impl Projection {
    pub fn new(fov_y: f64, aspect_ratio: f64, z_near: f64, z_far: f64) -> Result<Self> {
        if !(fov_y > 0.0 && fov_y <= std::f64::consts::PI) {
            return Err(Error::InvalidArgument {
                name: "fov_y",
                value: fov_y,
                reason: "must be in (0, pi]",
            });
        }
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return Err(Error::InvalidArgument {
                name: "aspect_ratio",
                value: aspect_ratio,
                reason: "must be positive",
            });
        }
        if z_near.is_nan() || z_near <= 0.0 {
            return Err(Error::InvalidArgument {
                name: "z_near",
                value: z_near,
                reason: "must be positive",
            });
        }
        if !(z_far > z_near && z_far.is_finite()) {
            return Err(Error::InvalidArgument {
                name: "z_far",
                value: z_far,
                reason: "must be greater than z_near",
            });
        }

        Ok(Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        })
    }

    pub fn fov_y(&self) -> f64 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f64 {
        self.z_near
    }

    pub fn z_far(&self) -> f64 {
        self.z_far
    }

    /// Same frustum with a new aspect ratio (used on resize)
    pub fn with_aspect_ratio(&self, aspect_ratio: f64) -> Result<Self> {
        Self::new(self.fov_y, aspect_ratio, self.z_near, self.z_far)
    }

    pub fn perspective_matrix(&self) -> Result<Matrix> {
        Matrix::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// Ray from the camera toward a mouse position already in world space
    pub fn mouse_ray(&self, camera_position: Vector3, world_mouse: Vector3) -> Result<Ray> {
        let direction = (world_mouse - camera_position).normalize()?;
        Ok(Ray::new(camera_position, direction))
    }
}

impl Default for Projection {
    /// 45° vertical field of view, square aspect, depth range [0.1, 100]
    fn default() -> Self {
        Self {
            fov_y: std::f64::consts::FRAC_PI_4,
            aspect_ratio: 1.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}
