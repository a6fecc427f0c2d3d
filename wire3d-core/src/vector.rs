/// Vector primitives: 3D points/directions and homogeneous 4D coordinates
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};

use crate::buffer::{Location, Size};
use crate::error::{Error, Result};

/// A 3D vector. Used both as a point and as a free direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A homogeneous 4D vector (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X_AXIS: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y_AXIS: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z_AXIS: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from exactly three values
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(Error::WrongElementCount {
                expected: 3,
                actual: values.len(),
            }),
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector with the same direction. `self` is left untouched.
    pub fn normalize(&self) -> Result<Self> {
        let len = self.length();
        if len <= 0.0 || !len.is_finite() {
            return Err(Error::DegenerateVector);
        }
        Ok(*self * (1.0 / len))
    }

    /// Axis access: 0 = x, 1 = y, 2 = z
    pub fn component(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(Error::IndexOutOfRange { index, len: 3 }),
        }
    }

    pub fn set_component(&mut self, index: usize, value: f64) -> Result<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(Error::IndexOutOfRange { index, len: 3 }),
        }
        Ok(())
    }

    /// Homogeneous extension with an explicit `w`
    pub fn extend(self, w: f64) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Pixel offset to NDC-scaled units (no recentering, y kept as is)
    pub fn to_view_space_scaled(self, size: Size, offset: Location) -> Self {
        let vx = (self.x - f64::from(offset.x)) * 2.0 / f64::from(size.width);
        let vy = (self.y + f64::from(offset.y)) * 2.0 / f64::from(size.height);
        Self::new(vx, vy, self.z)
    }

    /// NDC point to pixel coordinates with the y axis flipped
    pub fn to_screen_space_scaled(self, size: Size, offset: Location) -> Self {
        let cx = (self.x + 1.0) * 0.5 * f64::from(size.width) + f64::from(offset.x);
        let cy = (1.0 - self.y) * 0.5 * f64::from(size.height) + f64::from(offset.y);
        Self::new(cx, cy, self.z)
    }
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const X_AXIS: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const Y_AXIS: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    pub const Z_AXIS: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    pub const W_AXIS: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Build from exactly four values
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [x, y, z, w] => Ok(Self::new(*x, *y, *z, *w)),
            _ => Err(Error::WrongElementCount {
                expected: 4,
                actual: values.len(),
            }),
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn normalize(&self) -> Result<Self> {
        let len = self.length();
        if len <= 0.0 || !len.is_finite() {
            return Err(Error::DegenerateVector);
        }
        Ok(*self * (1.0 / len))
    }

    /// Axis access: 0 = x, 1 = y, 2 = z, 3 = w
    pub fn component(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(Error::IndexOutOfRange { index, len: 4 }),
        }
    }

    pub fn set_component(&mut self, index: usize, value: f64) -> Result<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(Error::IndexOutOfRange { index, len: 4 }),
        }
        Ok(())
    }

    /// Drop `w` without dividing
    pub fn truncate(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Divide every component by `w`. `w` becomes 1 for finite, non-zero w
    /// and NaN otherwise.
    pub fn perspective_divide(self) -> Self {
        let w = self.w;
        let unit = if w != 0.0 && w.is_finite() { 1.0 } else { f64::NAN };
        Self::new(self.x / w, self.y / w, self.z / w, unit)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

/// Points extend with w = 1
impl From<Vector3> for Vector4 {
    fn from(v: Vector3) -> Self {
        v.extend(1.0)
    }
}

impl From<Vector4> for Vector3 {
    fn from(v: Vector4) -> Self {
        v.truncate()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 4]> for Vector4 {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

/// Component-wise arithmetic with vectors and scalars
macro_rules! impl_componentwise_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul for $ty {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl Div for $ty {
            type Output = Self;
            fn div(self, rhs: Self) -> Self {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl Add<f64> for $ty {
            type Output = Self;
            fn add(self, rhs: f64) -> Self {
                Self { $($field: self.$field + rhs),+ }
            }
        }

        impl Sub<f64> for $ty {
            type Output = Self;
            fn sub(self, rhs: f64) -> Self {
                Self { $($field: self.$field - rhs),+ }
            }
        }

        impl Mul<f64> for $ty {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$ty> for f64 {
            type Output = $ty;
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl Div<f64> for $ty {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl AbsDiffEq for $ty {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                f64::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                $(self.$field.abs_diff_eq(&other.$field, epsilon))&&+
            }
        }

        impl RelativeEq for $ty {
            fn default_max_relative() -> f64 {
                f64::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
                $(self.$field.relative_eq(&other.$field, epsilon, max_relative))&&+
            }
        }
    };
}

impl_componentwise_ops!(Vector3 { x, y, z });
impl_componentwise_ops!(Vector4 { x, y, z, w });

impl std::fmt::Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl std::fmt::Display for Vector4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x, self.y, self.z, self.w)
    }
}
