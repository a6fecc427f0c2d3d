/// Conversions to and from nalgebra types.
///
/// Element positions are kept: row r, column c of a [`Matrix`] is row r,
/// column c of the `Matrix4`. Under the row-vector convention used here a
/// nalgebra user applies the transpose to column vectors.
use nalgebra as na;

use crate::matrix::Matrix;
use crate::vector::{Vector3, Vector4};

impl From<na::Vector3<f64>> for Vector3 {
    fn from(v: na::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for na::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        na::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<na::Point3<f64>> for Vector3 {
    fn from(p: na::Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vector3> for na::Point3<f64> {
    fn from(v: Vector3) -> Self {
        na::Point3::new(v.x, v.y, v.z)
    }
}

impl From<na::Vector4<f64>> for Vector4 {
    fn from(v: na::Vector4<f64>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for na::Vector4<f64> {
    fn from(v: Vector4) -> Self {
        na::Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<na::Matrix4<f64>> for Matrix {
    fn from(m: na::Matrix4<f64>) -> Self {
        let row = |r: usize| Vector4::new(m[(r, 0)], m[(r, 1)], m[(r, 2)], m[(r, 3)]);
        Self::from_rows([row(0), row(1), row(2), row(3)])
    }
}

impl From<Matrix> for na::Matrix4<f64> {
    fn from(m: Matrix) -> Self {
        na::Matrix4::from_row_slice(&m.to_array())
    }
}
