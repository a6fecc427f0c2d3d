/// 4×4 matrix algebra and the named transformation builders
///
/// Convention: row vectors. A point `v` is transformed as `v · M`, so the
/// translation lives in row 3 and a chain `A · B · C` applies `A` first.
/// Every builder in this module follows that convention.
use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};

use crate::buffer::ClientBuffer;
use crate::error::{Error, Result};
use crate::vector::{Vector3, Vector4};

/// Storage order of a flat 16-element array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementOrder {
    #[default]
    RowMajor,
    ColumnMajor,
}

/// 4×4 matrix stored as four row vectors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    rows: [Vector4; 4],
}

impl Matrix {
    pub const SIZE: usize = 4;

    pub const IDENTITY: Self = Self::from_rows([
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    ]);

    pub const ZERO: Self = Self::from_rows([Vector4::ZERO; 4]);

    /// Flattens onto the x = 0 plane
    pub const PROJECTION_ORTHO_X: Self = Self::from_rows([
        Vector4::ZERO,
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    ]);

    /// Flattens onto the y = 0 plane
    pub const PROJECTION_ORTHO_Y: Self = Self::from_rows([
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::ZERO,
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    ]);

    /// Flattens onto the z = 0 plane
    pub const PROJECTION_ORTHO_Z: Self = Self::from_rows([
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::ZERO,
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    ]);

    pub const fn from_rows(rows: [Vector4; 4]) -> Self {
        Self { rows }
    }

    pub fn from_columns(columns: [Vector4; 4]) -> Self {
        Self::from_rows(columns).transpose()
    }

    /// Build from exactly four row vectors
    pub fn from_row_vectors(rows: &[Vector4]) -> Result<Self> {
        match rows {
            [r0, r1, r2, r3] => Ok(Self::from_rows([*r0, *r1, *r2, *r3])),
            _ => Err(Error::WrongElementCount {
                expected: Self::SIZE,
                actual: rows.len(),
            }),
        }
    }

    /// Build from 16 scalars in the given order
    pub fn from_slice(values: &[f64], order: ElementOrder) -> Result<Self> {
        if values.len() != Self::SIZE * Self::SIZE {
            return Err(Error::WrongElementCount {
                expected: Self::SIZE * Self::SIZE,
                actual: values.len(),
            });
        }

        let mut rows = [Vector4::ZERO; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            let at = |c: usize| match order {
                ElementOrder::RowMajor => values[r * 4 + c],
                ElementOrder::ColumnMajor => values[c * 4 + r],
            };
            *row = Vector4::new(at(0), at(1), at(2), at(3));
        }
        Ok(Self::from_rows(rows))
    }

    pub fn from_row_major(values: [f64; 16]) -> Self {
        let v = values;
        Self::from_rows([
            Vector4::new(v[0], v[1], v[2], v[3]),
            Vector4::new(v[4], v[5], v[6], v[7]),
            Vector4::new(v[8], v[9], v[10], v[11]),
            Vector4::new(v[12], v[13], v[14], v[15]),
        ])
    }

    /// Row-major flat copy
    pub fn to_array(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        for (r, row) in self.rows.iter().enumerate() {
            out[r * 4..r * 4 + 4].copy_from_slice(&row.to_array());
        }
        out
    }

    pub fn to_rows(&self) -> [Vector4; 4] {
        self.rows
    }

    pub fn row(&self, index: usize) -> Result<Vector4> {
        self.rows.get(index).copied().ok_or(Error::IndexOutOfRange {
            index,
            len: Self::SIZE,
        })
    }

    pub fn column(&self, index: usize) -> Result<Vector4> {
        if index >= Self::SIZE {
            return Err(Error::IndexOutOfRange {
                index,
                len: Self::SIZE,
            });
        }
        Ok(self.column_unchecked(index))
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.row(row)?.component(col)
    }

    fn column_unchecked(&self, c: usize) -> Vector4 {
        let pick = |row: &Vector4| match c {
            0 => row.x,
            1 => row.y,
            2 => row.z,
            _ => row.w,
        };
        Vector4::new(
            pick(&self.rows[0]),
            pick(&self.rows[1]),
            pick(&self.rows[2]),
            pick(&self.rows[3]),
        )
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows([
            self.column_unchecked(0),
            self.column_unchecked(1),
            self.column_unchecked(2),
            self.column_unchecked(3),
        ])
    }

    pub fn trace(&self) -> f64 {
        self.rows[0].x + self.rows[1].y + self.rows[2].z + self.rows[3].w
    }

    /// 2×2 minors of the top and bottom row pairs, shared by the
    /// determinant and the adjugate.
    fn minors(&self) -> ([f64; 6], [f64; 6]) {
        let [a0, a1, a2, a3] = self.rows;

        let s = [
            a0.x * a1.y - a1.x * a0.y,
            a0.x * a1.z - a1.x * a0.z,
            a0.x * a1.w - a1.x * a0.w,
            a0.y * a1.z - a1.y * a0.z,
            a0.y * a1.w - a1.y * a0.w,
            a0.z * a1.w - a1.z * a0.w,
        ];
        let c = [
            a2.x * a3.y - a3.x * a2.y,
            a2.x * a3.z - a3.x * a2.z,
            a2.x * a3.w - a3.x * a2.w,
            a2.y * a3.z - a3.y * a2.z,
            a2.y * a3.w - a3.y * a2.w,
            a2.z * a3.w - a3.z * a2.w,
        ];
        (s, c)
    }

    fn determinant_from(s: &[f64; 6], c: &[f64; 6]) -> f64 {
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    pub fn determinant(&self) -> f64 {
        let (s, c) = self.minors();
        Self::determinant_from(&s, &c)
    }

    /// Closed-form inverse: adjugate divided by the determinant.
    ///
    /// Fails with [`Error::SingularMatrix`] when |det| < `f64::EPSILON`.
    pub fn invert(&self) -> Result<Self> {
        let (s, c) = self.minors();
        let det = Self::determinant_from(&s, &c);
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return Err(Error::SingularMatrix { determinant: det });
        }
        let inv = 1.0 / det;
        let [a0, a1, a2, a3] = self.rows;

        let r0 = Vector4::new(
            a1.y * c[5] - a1.z * c[4] + a1.w * c[3],
            -a0.y * c[5] + a0.z * c[4] - a0.w * c[3],
            a3.y * s[5] - a3.z * s[4] + a3.w * s[3],
            -a2.y * s[5] + a2.z * s[4] - a2.w * s[3],
        );
        let r1 = Vector4::new(
            -a1.x * c[5] + a1.z * c[2] - a1.w * c[1],
            a0.x * c[5] - a0.z * c[2] + a0.w * c[1],
            -a3.x * s[5] + a3.z * s[2] - a3.w * s[1],
            a2.x * s[5] - a2.z * s[2] + a2.w * s[1],
        );
        let r2 = Vector4::new(
            a1.x * c[4] - a1.y * c[2] + a1.w * c[0],
            -a0.x * c[4] + a0.y * c[2] - a0.w * c[0],
            a3.x * s[4] - a3.y * s[2] + a3.w * s[0],
            -a2.x * s[4] + a2.y * s[2] - a2.w * s[0],
        );
        let r3 = Vector4::new(
            -a1.x * c[3] + a1.y * c[1] - a1.z * c[0],
            a0.x * c[3] - a0.y * c[1] + a0.z * c[0],
            -a3.x * s[3] + a3.y * s[1] - a3.z * s[0],
            a2.x * s[3] - a2.y * s[1] + a2.z * s[0],
        );

        Ok(Self::from_rows([r0 * inv, r1 * inv, r2 * inv, r3 * inv]))
    }

    /// Divide every element by the determinant
    pub fn normalized(&self) -> Result<Self> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON {
            return Err(Error::SingularMatrix { determinant: det });
        }
        Ok(*self / det)
    }

    // ===== POINT TRANSFORMS =====

    /// Raw product `v · M`, no divide
    pub fn transform_homogeneous(&self, v: Vector4) -> Vector4 {
        let [r0, r1, r2, r3] = self.rows;
        r0 * v.x + r1 * v.y + r2 * v.z + r3 * v.w
    }

    /// `v · M` followed by the perspective divide: all four components are
    /// divided by the resulting w.
    ///
    /// Not associative with matrix composition once a projection is
    /// involved; compose first, then transform once.
    pub fn transform(&self, v: Vector4) -> Vector4 {
        self.transform_homogeneous(v).perspective_divide()
    }

    /// Transform a point (w = 1) and return the Cartesian result
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        self.transform(p.into()).truncate()
    }

    /// Transform a free direction (w = 0); translation is ignored
    pub fn transform_direction(&self, d: Vector3) -> Vector3 {
        self.transform_homogeneous(d.extend(0.0)).truncate()
    }

    /// Lazily transform a sequence of points with an explicit divide.
    ///
    /// The returned iterator is restartable (`Clone`) whenever the input
    /// iterator is.
    pub fn transform_points<I>(&self, points: I) -> TransformPoints<I::IntoIter>
    where
        I: IntoIterator<Item = Vector3>,
    {
        TransformPoints {
            matrix: *self,
            points: points.into_iter(),
        }
    }

    /// Transform a point batch across the rayon pool. Partitions are
    /// disjoint and joined before returning.
    #[cfg(feature = "parallel")]
    pub fn transform_points_par(&self, points: &[Vector3]) -> Vec<Vector4> {
        use rayon::prelude::*;

        points
            .par_iter()
            .map(|p| self.transform((*p).into()))
            .collect()
    }

    // ===== BUILDERS =====

    pub fn translate(v: Vector3) -> Self {
        Self::from_rows([
            Vector4::X_AXIS,
            Vector4::Y_AXIS,
            Vector4::Z_AXIS,
            Vector4::new(v.x, v.y, v.z, 1.0),
        ])
    }

    pub fn scale(v: Vector3) -> Self {
        Self::from_rows([
            Vector4::new(v.x, 0.0, 0.0, 0.0),
            Vector4::new(0.0, v.y, 0.0, 0.0),
            Vector4::new(0.0, 0.0, v.z, 0.0),
            Vector4::W_AXIS,
        ])
    }

    pub fn scale_uniform(factor: f64) -> Self {
        Self::scale(Vector3::new(factor, factor, factor))
    }

    /// Rotation of `angle` radians about `axis` (right-handed, so a positive
    /// angle about +Z takes +X toward +Y).
    ///
    /// Built from the unit quaternion of the axis/angle pair and expanded
    /// into the upper 3×3 block. The quaternion angle is negated because the
    /// expansion below is the column-vector form.
    pub fn rotate(angle: f64, axis: Vector3) -> Result<Self> {
        let axis = axis.normalize()?;
        let (sin, cos) = (-angle * 0.5).sin_cos();
        let (x, y, z, w) = (axis.x * sin, axis.y * sin, axis.z * sin, cos);

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let xw = x * w;
        let wy = w * y;
        let wz = w * z;

        Ok(Self::from_rows([
            Vector4::new(1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy), 0.0),
            Vector4::new(2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - xw), 0.0),
            Vector4::new(2.0 * (xz - wy), 2.0 * (yz + xw), 1.0 - 2.0 * (xx + yy), 0.0),
            Vector4::W_AXIS,
        ]))
    }

    /// Look-at view matrix.
    ///
    /// z = normalize(eye − target), x = normalize(up × z), y = z × x; the
    /// basis vectors form the columns and row 3 holds
    /// (−x·eye, −y·eye, −z·eye, 1). Fails with [`Error::DegenerateVector`]
    /// when eye == target or `up` is parallel to the view direction.
    pub fn view_matrix(eye: Vector3, target: Vector3, up: Vector3) -> Result<Self> {
        let z = (eye - target).normalize()?;
        let x = up.cross(&z).normalize()?;
        let y = z.cross(&x);

        Ok(Self::from_rows([
            Vector4::new(x.x, y.x, z.x, 0.0),
            Vector4::new(x.y, y.y, z.y, 0.0),
            Vector4::new(x.z, y.z, z.z, 0.0),
            Vector4::new(-x.dot(&eye), -y.dot(&eye), -z.dot(&eye), 1.0),
        ]))
    }

    /// Perspective projection. `aspect` is height / width.
    ///
    /// Camera-space depth −z ends up in w, so the divide after this matrix
    /// yields NDC.
    pub fn perspective(fov_y: f64, aspect: f64, z_near: f64, z_far: f64) -> Result<Self> {
        if !(fov_y > 0.0 && fov_y <= std::f64::consts::PI) {
            return Err(Error::InvalidArgument {
                name: "fov_y",
                value: fov_y,
                reason: "must be in (0, pi]",
            });
        }
        if aspect.is_nan() || aspect <= 0.0 {
            return Err(Error::InvalidArgument {
                name: "aspect",
                value: aspect,
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
        if z_far.is_nan() || z_far <= 0.0 {
            return Err(Error::InvalidArgument {
                name: "z_far",
                value: z_far,
                reason: "must be positive",
            });
        }

        let fov_scale = 1.0 / (fov_y * 0.5).tan();
        let x = fov_scale * aspect;
        let y = fov_scale;
        let z_scale = z_far / (z_near - z_far);
        let w_scale = z_scale * z_near;

        Ok(Self::from_rows([
            Vector4::new(x, 0.0, 0.0, 0.0),
            Vector4::new(0.0, y, 0.0, 0.0),
            Vector4::new(0.0, 0.0, z_scale, -1.0),
            Vector4::new(0.0, 0.0, w_scale, 0.0),
        ]))
    }

    /// Maps the NDC square [-1, 1]² onto the buffer's pixel rectangle with
    /// y pointing down, and NDC z into [min_z, max_z].
    pub fn ndc_to_screen(buffer: &ClientBuffer) -> Self {
        let half_w = f64::from(buffer.width()) * 0.5;
        let half_h = f64::from(buffer.height()) * 0.5;

        Self::from_rows([
            Vector4::new(half_w, 0.0, 0.0, 0.0),
            Vector4::new(0.0, -half_h, 0.0, 0.0),
            Vector4::new(0.0, 0.0, buffer.max_z() - buffer.min_z(), 0.0),
            Vector4::new(
                f64::from(buffer.x()) + half_w,
                f64::from(buffer.y()) + half_h,
                buffer.min_z(),
                1.0,
            ),
        ])
    }

    /// Apply `transform` about `pivot` instead of the origin:
    /// Translate(pivot)⁻¹ · transform · Translate(pivot)
    pub fn transform_around(transform: &Matrix, pivot: Vector3) -> Self {
        Self::translate(-pivot) * *transform * Self::translate(pivot)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Lazy point transform produced by [`Matrix::transform_points`]
#[derive(Debug, Clone)]
pub struct TransformPoints<I> {
    matrix: Matrix,
    points: I,
}

impl<I> Iterator for TransformPoints<I>
where
    I: Iterator<Item = Vector3>,
{
    type Item = Vector4;

    fn next(&mut self) -> Option<Vector4> {
        self.points.next().map(|p| self.matrix.transform(p.into()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl<I> ExactSizeIterator for TransformPoints<I> where I: ExactSizeIterator<Item = Vector3> {}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let cols = [
            rhs.column_unchecked(0),
            rhs.column_unchecked(1),
            rhs.column_unchecked(2),
            rhs.column_unchecked(3),
        ];
        let mut rows = [Vector4::ZERO; 4];
        for (out, row) in rows.iter_mut().zip(self.rows.iter()) {
            *out = Vector4::new(
                row.dot(&cols[0]),
                row.dot(&cols[1]),
                row.dot(&cols[2]),
                row.dot(&cols[3]),
            );
        }
        Self::from_rows(rows)
    }
}

/// Same as [`Matrix::transform`]: product followed by the perspective divide
impl Mul<Vector4> for Matrix {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        self.transform(rhs)
    }
}

impl Mul<f64> for Matrix {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::from_rows(self.rows.map(|r| r * rhs))
    }
}

impl Div<f64> for Matrix {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::from_rows(self.rows.map(|r| r / rhs))
    }
}

impl Add for Matrix {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let [a0, a1, a2, a3] = self.rows;
        let [b0, b1, b2, b3] = rhs.rows;
        Self::from_rows([a0 + b0, a1 + b1, a2 + b2, a3 + b3])
    }
}

impl Sub for Matrix {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Matrix {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_rows(self.rows.map(|r| -r))
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample() -> Matrix {
        Matrix::from_row_major([
            2.0, 0.5, -1.0, 0.0, //
            1.0, 3.0, 0.25, 0.0, //
            -0.5, 1.5, 4.0, 0.0, //
            3.0, -2.0, 1.0, 1.0,
        ])
    }

    #[test]
    fn test_identity_product() {
        let m = sample();
        assert_eq!(m * Matrix::IDENTITY, m);
        assert_eq!(Matrix::IDENTITY * m, m);
    }

    #[test]
    fn test_product_is_row_times_column() {
        let a = Matrix::from_row_major([
            1.0, 2.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let b = Matrix::from_row_major([
            1.0, 0.0, 0.0, 0.0, //
            3.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let ab = a * b;
        assert_eq!(ab.get(0, 0).unwrap(), 7.0);
        assert_eq!(ab.get(0, 1).unwrap(), 2.0);
        assert_eq!(ab.get(1, 0).unwrap(), 3.0);
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = sample();
        let inv = m.invert().unwrap();
        assert_abs_diff_eq!(m * inv, Matrix::IDENTITY, epsilon = 1e-9);
        assert_abs_diff_eq!(inv * m, Matrix::IDENTITY, epsilon = 1e-9);
    }

    #[test]
    fn test_determinant_matches_nalgebra() {
        let m = Matrix::from_row_major([
            4.0, 3.0, 2.0, 1.0, //
            0.0, 1.0, -1.0, 2.0, //
            1.0, 0.0, 3.0, -2.0, //
            2.0, 2.0, 0.0, 5.0,
        ]);
        let reference = nalgebra::Matrix4::from_row_slice(&m.to_array());
        assert!((m.determinant() - reference.determinant()).abs() < 1e-9);

        let inv = m.invert().unwrap();
        let reference_inv = reference.try_inverse().unwrap();
        let expected =
            Matrix::from_slice(reference_inv.as_slice(), ElementOrder::ColumnMajor).unwrap();
        assert_abs_diff_eq!(inv, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_singular_matrix_fails() {
        let flat = Matrix::PROJECTION_ORTHO_Z;
        assert_eq!(flat.determinant(), 0.0);
        assert!(matches!(flat.invert(), Err(Error::SingularMatrix { .. })));
        assert!(Matrix::ZERO.invert().is_err());
    }

    #[test]
    fn test_from_slice_orders() {
        let values: Vec<f64> = (0..16).map(f64::from).collect();
        let rows = Matrix::from_slice(&values, ElementOrder::RowMajor).unwrap();
        let cols = Matrix::from_slice(&values, ElementOrder::ColumnMajor).unwrap();
        assert_eq!(rows.transpose(), cols);
        assert_eq!(rows.get(1, 2).unwrap(), 6.0);
        assert_eq!(cols.get(1, 2).unwrap(), 9.0);
    }

    #[test]
    fn test_columns_and_rows() {
        let m = sample();
        let columns = [0, 1, 2, 3].map(|c| m.column(c).unwrap());
        assert_eq!(Matrix::from_columns(columns), m);
        assert_eq!(Matrix::from_rows(m.to_rows()), m);
        assert_eq!(m.to_rows()[3], Vector4::new(3.0, -2.0, 1.0, 1.0));
        assert_eq!(columns[0], Vector4::new(2.0, 1.0, -0.5, 3.0));
    }

    #[test]
    fn test_wrong_element_count() {
        assert!(matches!(
            Matrix::from_slice(&[0.0; 15], ElementOrder::RowMajor),
            Err(Error::WrongElementCount { expected: 16, actual: 15 })
        ));
        assert!(matches!(
            Matrix::from_row_vectors(&[Vector4::ZERO; 3]),
            Err(Error::WrongElementCount { expected: 4, actual: 3 })
        ));
        assert!(Matrix::IDENTITY.row(4).is_err());
        assert!(Matrix::IDENTITY.column(7).is_err());
    }

    #[test]
    fn test_transpose_and_trace() {
        let m = sample();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().get(3, 0).unwrap(), m.get(0, 3).unwrap());
        assert_eq!(m.trace(), 2.0 + 3.0 + 4.0 + 1.0);
    }

    #[test]
    fn test_translate_moves_points_not_directions() {
        let t = Matrix::translate(Vector3::new(1.0, 2.0, 3.0));
        let p = t.transform_point(Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vector3::new(2.0, 3.0, 4.0));
        let d = t.transform_direction(Vector3::X_AXIS);
        assert_eq!(d, Vector3::X_AXIS);
    }

    #[test]
    fn test_scale_then_translate_order() {
        let m = Matrix::scale_uniform(2.0) * Matrix::translate(Vector3::new(1.0, 0.0, 0.0));
        let p = m.transform_point(Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vector3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotate_is_counter_clockwise() {
        let r = Matrix::rotate(FRAC_PI_2, Vector3::Z_AXIS).unwrap();
        let p = r.transform_point(Vector3::X_AXIS);
        assert_abs_diff_eq!(p, Vector3::Y_AXIS, epsilon = 1e-12);

        let r = Matrix::rotate(FRAC_PI_2, Vector3::new(0.0, 0.0, 10.0)).unwrap();
        let p = r.transform_point(Vector3::Y_AXIS);
        assert_abs_diff_eq!(p, -Vector3::X_AXIS, epsilon = 1e-12);

        let full = Matrix::rotate(2.0 * PI, Vector3::new(1.0, 1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(full, Matrix::IDENTITY, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_zero_axis_fails() {
        assert!(matches!(
            Matrix::rotate(1.0, Vector3::ZERO),
            Err(Error::DegenerateVector)
        ));
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let r = Matrix::rotate(0.7, Vector3::new(1.0, 2.0, 3.0)).unwrap();
        assert_abs_diff_eq!(r * r.transpose(), Matrix::IDENTITY, epsilon = 1e-12);
        assert!((r.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_around_keeps_pivot() {
        let pivot = Vector3::new(1.0, 1.0, 0.0);
        let rot = Matrix::rotate(FRAC_PI_2, Vector3::Z_AXIS).unwrap();
        let m = Matrix::transform_around(&rot, pivot);
        assert_abs_diff_eq!(m.transform_point(pivot), pivot, epsilon = 1e-12);
        let p = m.transform_point(Vector3::new(2.0, 1.0, 0.0));
        assert_abs_diff_eq!(p, Vector3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_perspective_preconditions() {
        assert!(Matrix::perspective(0.0, 1.0, 0.1, 10.0).is_err());
        assert!(Matrix::perspective(PI + 0.01, 1.0, 0.1, 10.0).is_err());
        assert!(Matrix::perspective(1.0, 0.0, 0.1, 10.0).is_err());
        assert!(Matrix::perspective(1.0, 1.0, 0.0, 10.0).is_err());
        assert!(Matrix::perspective(1.0, 1.0, 0.1, -1.0).is_err());
        assert!(Matrix::perspective(f64::NAN, 1.0, 0.1, 10.0).is_err());
        assert!(Matrix::perspective(1.0, f64::NAN, 0.1, 10.0).is_err());
        assert!(Matrix::perspective(1.0, 1.0, f64::NAN, 10.0).is_err());
        assert!(Matrix::perspective(PI, 1.0, 0.1, 10.0).is_ok());
    }

    #[test]
    fn test_perspective_divide_puts_depth_in_w() {
        let p = Matrix::perspective(FRAC_PI_2, 1.0, 1.0, 10.0).unwrap();
        let raw = p.transform_homogeneous(Vector4::new(0.0, 0.0, -1.0, 1.0));
        assert_eq!(raw.w, 1.0);
        // near plane lands on NDC z = 0
        let ndc = p.transform(Vector4::new(0.0, 0.0, -1.0, 1.0));
        assert_abs_diff_eq!(ndc.z, 0.0, epsilon = 1e-12);
        // far plane lands on NDC z = 1
        let ndc = p.transform(Vector4::new(0.0, 0.0, -10.0, 1.0));
        assert_abs_diff_eq!(ndc.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_points_divides_and_restarts() {
        let p = Matrix::perspective(FRAC_PI_2, 1.0, 0.5, 50.0).unwrap();
        let points = vec![
            Vector3::new(1.0, 1.0, -2.0),
            Vector3::new(-3.0, 0.5, -7.0),
            Vector3::new(0.0, 0.0, -1.0),
        ];
        let iter = p.transform_points(points.iter().copied());
        assert_eq!(iter.len(), 3);

        let first: Vec<Vector4> = iter.clone().collect();
        let second: Vec<Vector4> = iter.collect();
        assert_eq!(first, second);
        for v in &first {
            assert_abs_diff_eq!(v.w, 1.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(first[0].x, 0.5, epsilon = 1e-12);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let m = Matrix::rotate(0.3, Vector3::Y_AXIS).unwrap()
            * Matrix::translate(Vector3::new(0.0, 0.0, -4.0))
            * Matrix::perspective(1.0, 0.75, 0.1, 100.0).unwrap();
        let points: Vec<Vector3> = (0..256)
            .map(|i| Vector3::new(f64::from(i) * 0.01, 0.5, -f64::from(i % 7)))
            .collect();
        let sequential: Vec<Vector4> = m.transform_points(points.iter().copied()).collect();
        assert_eq!(m.transform_points_par(&points), sequential);
    }

    #[test]
    fn test_operator_mul_vector_divides() {
        let m = Matrix::IDENTITY * 2.0;
        let v = m * Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(v, Vector4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_normalized_has_unit_scale() {
        let m = Matrix::scale_uniform(2.0);
        let n = m.normalized().unwrap();
        assert_eq!(n.get(0, 0).unwrap(), 2.0 / 8.0);
        assert!(Matrix::ZERO.normalized().is_err());
    }

    #[test]
    fn test_componentwise_arithmetic() {
        let m = sample();
        assert_eq!(m - m, Matrix::ZERO);
        assert_eq!(m + m, m * 2.0);
        assert_eq!((m * 2.0) / 2.0, m);
    }
}
