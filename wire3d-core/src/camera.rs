/// Camera snapshot and its eagerly materialized matrices.
///
/// A [`CameraInfo`] is never patched in place. Every change goes through a
/// constructor or a `with_*` builder, which recomputes the full
/// [`MaterializedCameraInfo`] from the new snapshot, so the ten cached
/// matrices always describe the same eye/target/up/projection/buffer.
use tracing::debug;

use crate::buffer::{ClientBuffer, Size};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::picking::Ray;
use crate::projection::Projection;
use crate::vector::{Vector3, Vector4};

/// The ten matrices derived from one camera snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterializedCameraInfo {
    pub view: Matrix,
    pub view_inv: Matrix,
    pub projection: Matrix,
    pub projection_inv: Matrix,
    pub client_view: Matrix,
    pub client_view_inv: Matrix,
    pub view_projection: Matrix,
    pub view_projection_inv: Matrix,
    pub view_projection_client: Matrix,
    pub view_projection_client_inv: Matrix,
}

impl MaterializedCameraInfo {
    /// Compute all ten matrices. Any singular or degenerate step aborts the
    /// whole materialization.
    pub fn new(
        eye: Vector3,
        target: Vector3,
        up: Vector3,
        projection: &Projection,
        client_buffer: &ClientBuffer,
    ) -> Result<Self> {
        let view = Matrix::view_matrix(eye, target, up)?;
        let view_inv = view.invert()?;

        let projection = projection.perspective_matrix()?;
        let projection_inv = projection.invert()?;

        let client_view = Matrix::ndc_to_screen(client_buffer);
        let client_view_inv = client_view.invert()?;

        let view_projection = view * projection;
        let view_projection_inv = view_projection.invert()?;

        let view_projection_client = view_projection * client_view;
        let view_projection_client_inv = view_projection_client.invert()?;

        Ok(Self {
            view,
            view_inv,
            projection,
            projection_inv,
            client_view,
            client_view_inv,
            view_projection,
            view_projection_inv,
            view_projection_client,
            view_projection_client_inv,
        })
    }

    /// All ten matrices in declaration order
    pub fn matrices(&self) -> [&Matrix; 10] {
        [
            &self.view,
            &self.view_inv,
            &self.projection,
            &self.projection_inv,
            &self.client_view,
            &self.client_view_inv,
            &self.view_projection,
            &self.view_projection_inv,
            &self.view_projection_client,
            &self.view_projection_client_inv,
        ]
    }
}

/// Immutable camera snapshot plus its materialization
#[derive(Debug, Clone, PartialEq)]
pub struct CameraInfo {
    eye: Vector3,
    target: Vector3,
    up: Vector3,
    projection: Projection,
    buffer_size: Size,
    client_buffer: ClientBuffer,
    materialization: MaterializedCameraInfo,
}

impl CameraInfo {
    pub fn new(
        eye: Vector3,
        target: Vector3,
        up: Vector3,
        projection: Projection,
        buffer_size: Size,
        client_buffer: ClientBuffer,
    ) -> Result<Self> {
        let materialization =
            MaterializedCameraInfo::new(eye, target, up, &projection, &client_buffer)?;
        debug!(
            eye = %eye,
            target = %target,
            width = client_buffer.width(),
            height = client_buffer.height(),
            "Camera materialized"
        );

        Ok(Self {
            eye,
            target,
            up,
            projection,
            buffer_size,
            client_buffer,
            materialization,
        })
    }

    /// Default camera: eye (0, 0, 5) looking at the origin, +Y up, 45° fov,
    /// depth range [0.1, 100], aspect taken from the buffer.
    pub fn looking_at_origin(client_buffer: ClientBuffer) -> Result<Self> {
        let projection = Projection::default().with_aspect_ratio(client_buffer.aspect_ratio())?;
        Self::new(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::ZERO,
            Vector3::Y_AXIS,
            projection,
            client_buffer.size(),
            client_buffer,
        )
    }

    pub fn eye(&self) -> Vector3 {
        self.eye
    }

    pub fn target(&self) -> Vector3 {
        self.target
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn buffer_size(&self) -> Size {
        self.buffer_size
    }

    pub fn client_buffer(&self) -> &ClientBuffer {
        &self.client_buffer
    }

    pub fn materialization(&self) -> &MaterializedCameraInfo {
        &self.materialization
    }

    // ===== BUILDERS: each one rebuilds the materialization =====

    pub fn with_eye(&self, eye: Vector3) -> Result<Self> {
        self.with_look_at(eye, self.target)
    }

    pub fn with_look_at(&self, eye: Vector3, target: Vector3) -> Result<Self> {
        Self::new(
            eye,
            target,
            self.up,
            self.projection,
            self.buffer_size,
            self.client_buffer,
        )
    }

    pub fn with_projection(&self, projection: Projection) -> Result<Self> {
        Self::new(
            self.eye,
            self.target,
            self.up,
            projection,
            self.buffer_size,
            self.client_buffer,
        )
    }

    pub fn with_buffers(
        &self,
        projection: Projection,
        buffer_size: Size,
        client_buffer: ClientBuffer,
    ) -> Result<Self> {
        Self::new(
            self.eye,
            self.target,
            self.up,
            projection,
            buffer_size,
            client_buffer,
        )
    }

    // ===== DERIVED QUERIES =====

    /// target − eye
    pub fn eye_vector(&self) -> Vector3 {
        self.target - self.eye
    }

    pub fn eye_direction(&self) -> Result<Vector3> {
        self.eye_vector().normalize()
    }

    /// Ray from the eye toward a world-space mouse position
    pub fn mouse_ray(&self, world_mouse: Vector3) -> Result<Ray> {
        self.projection.mouse_ray(self.eye, world_mouse)
    }

    /// Unproject a pixel through the inverse world-to-screen chain and
    /// return the ray from the eye through it.
    pub fn screen_ray(&self, x: f64, y: f64) -> Result<Ray> {
        let screen = Vector4::new(x, y, self.client_buffer.min_z(), 1.0);
        let world = self
            .materialization
            .view_projection_client_inv
            .transform(screen)
            .truncate();
        self.mouse_ray(world)
    }

    /// Screen pixel to view (NDC) space through the inverse client matrix
    pub fn screen_to_view(&self, x: f64, y: f64) -> Vector3 {
        self.materialization
            .client_view_inv
            .transform_point(Vector3::new(x, y, 0.0))
    }
}
