/// Rays and planes used to turn screen positions back into world positions
use crate::error::Result;
use crate::vector::Vector3;

/// Half-line from `source` along `direction`.
///
/// The direction is stored as given; callers that build rays from screen
/// points normalize it first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub source: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(source: Vector3, direction: Vector3) -> Self {
        Self { source, direction }
    }

    pub fn point_at(&self, t: f64) -> Vector3 {
        self.source + self.direction * t
    }
}

/// Plane of points `p` with `normal · p = offset`; `normal` is unit length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3,
    offset: f64,
}

impl Plane {
    /// The y = 0 ground plane, facing up
    pub const GROUND: Self = Self {
        normal: Vector3::Y_AXIS,
        offset: 0.0,
    };

    /// Plane with the given normal at signed distance `offset` from the
    /// origin. The normal is normalized; a zero normal is degenerate.
    pub fn new(normal: Vector3, offset: f64) -> Result<Self> {
        Ok(Self {
            normal: normal.normalize()?,
            offset,
        })
    }

    pub fn from_point_normal(root_point: Vector3, normal: Vector3) -> Result<Self> {
        let normal = normal.normalize()?;
        Ok(Self {
            normal,
            offset: normal.dot(&root_point),
        })
    }

    /// Plane `a·x + b·y + c·z + d = 0`
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        let normal = Vector3::new(a, b, c);
        let length = normal.length();
        let normal = normal.normalize()?;
        Ok(Self {
            normal,
            offset: -d / length,
        })
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Point of the plane closest to the origin
    pub fn root_point(&self) -> Vector3 {
        self.normal * self.offset
    }

    pub fn signed_distance_to(&self, point: Vector3) -> f64 {
        self.normal.dot(&point) - self.offset
    }

    pub fn absolute_distance_to(&self, point: Vector3) -> f64 {
        self.signed_distance_to(point).abs()
    }

    /// Orthogonal projection onto the plane
    pub fn project(&self, point: Vector3) -> Vector3 {
        point - self.normal * self.signed_distance_to(point)
    }

    /// Projection along `direction`; `None` when the direction is parallel
    /// to the plane.
    pub fn project_along(&self, point: Vector3, direction: Vector3) -> Option<Vector3> {
        let denom = direction.dot(&self.normal);
        if denom.abs() < f64::EPSILON {
            return None;
        }
        let t = -self.signed_distance_to(point) / denom;
        Some(point + direction * t)
    }

    /// Where the ray crosses the plane. `None` when the ray is parallel to
    /// the plane or the crossing lies behind the ray source.
    pub fn intersect(&self, ray: &Ray) -> Option<Vector3> {
        let denom = ray.direction.dot(&self.normal);
        if denom.abs() < f64::EPSILON {
            return None;
        }
        let t = -self.signed_distance_to(ray.source) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ray.point_at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_plane_constructors_agree() {
        let a = Plane::new(Vector3::new(0.0, 2.0, 0.0), 3.0).unwrap();
        let b = Plane::from_point_normal(Vector3::new(5.0, 3.0, -1.0), Vector3::Y_AXIS).unwrap();
        let c = Plane::from_coefficients(0.0, 1.0, 0.0, -3.0).unwrap();
        assert_eq!(a.normal(), Vector3::Y_AXIS);
        assert!((a.offset() - 3.0).abs() < 1e-12);
        assert_eq!(b, c);
        assert_abs_diff_eq!(a.root_point(), Vector3::new(0.0, 3.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_normal_is_degenerate() {
        assert!(Plane::new(Vector3::ZERO, 1.0).is_err());
        assert!(Plane::from_coefficients(0.0, 0.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_distances_and_projection() {
        let plane = Plane::GROUND;
        let p = Vector3::new(1.0, -4.0, 2.0);
        assert_eq!(plane.signed_distance_to(p), -4.0);
        assert_eq!(plane.absolute_distance_to(p), 4.0);
        assert_eq!(plane.project(p), Vector3::new(1.0, 0.0, 2.0));

        let along = plane
            .project_along(Vector3::new(0.0, 2.0, 0.0), Vector3::new(1.0, -1.0, 0.0))
            .unwrap();
        assert_abs_diff_eq!(along, Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert!(plane.project_along(p, Vector3::X_AXIS).is_none());
    }

    #[test]
    fn test_ray_intersection() {
        let plane = Plane::GROUND;
        let ray = Ray::new(
            Vector3::new(0.0, 5.0, 5.0),
            Vector3::new(0.0, -1.0, -1.0).normalize().unwrap(),
        );
        let hit = plane.intersect(&ray).unwrap();
        assert_abs_diff_eq!(hit, Vector3::new(0.0, 0.0, 0.0), epsilon = 1e-12);

        // pointing away from the plane
        let away = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::Y_AXIS);
        assert!(plane.intersect(&away).is_none());

        // parallel
        let flat = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::X_AXIS);
        assert!(plane.intersect(&flat).is_none());
    }
}
