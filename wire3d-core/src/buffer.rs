// Viewport geometry handed over by the host on every resize

/// Pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Clamp both sides to at least one pixel
    pub fn at_least_one(self) -> Self {
        Self::new(self.width.max(1), self.height.max(1))
    }
}

/// Pixel offset of the viewport inside the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub location: Location,
    pub size: Size,
}

/// Viewport descriptor: pixel rectangle plus the depth range NDC z maps into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientBuffer {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    min_z: f64,
    max_z: f64,
}

impl ClientBuffer {
    pub fn new(x: i32, y: i32, width: u32, height: u32, min_z: f64, max_z: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min_z,
            max_z,
        }
    }

    /// Buffer at the origin with the default [0, 1] depth range
    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height, 0.0, 1.0)
    }

    /// Same offset and depth range, new pixel size
    pub fn resized(&self, size: Size) -> Self {
        Self::new(
            self.x,
            self.y,
            size.width,
            size.height,
            self.min_z,
            self.max_z,
        )
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn min_z(&self) -> f64 {
        self.min_z
    }

    pub fn max_z(&self) -> f64 {
        self.max_z
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn location(&self) -> Location {
        Location::new(self.x, self.y)
    }

    /// height / width, the convention the projection's x scale expects
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    pub fn client_rectangle(&self) -> Rectangle {
        Rectangle {
            location: self.location(),
            size: self.size(),
        }
    }
}

impl Default for ClientBuffer {
    fn default() -> Self {
        Self::from_size(Size::new(800, 600))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_geometry() {
        let buffer = ClientBuffer::new(10, 20, 800, 600, 0.0, 1.0);
        assert_eq!(buffer.size(), Size::new(800, 600));
        assert_eq!(buffer.location(), Location::new(10, 20));
        assert!((buffer.aspect_ratio() - 0.75).abs() < 1e-12);
        assert_eq!(
            buffer.client_rectangle(),
            Rectangle {
                location: Location::new(10, 20),
                size: Size::new(800, 600),
            }
        );
    }

    #[test]
    fn test_resized_keeps_offset_and_depth() {
        let buffer = ClientBuffer::new(5, 6, 100, 100, 0.25, 0.75);
        let resized = buffer.resized(Size::new(40, 30));
        assert_eq!(resized.location(), Location::new(5, 6));
        assert_eq!(resized.size(), Size::new(40, 30));
        assert_eq!(resized.min_z(), 0.25);
        assert_eq!(resized.max_z(), 0.75);
    }

    #[test]
    fn test_size_clamp() {
        assert_eq!(Size::new(0, 7).at_least_one(), Size::new(1, 7));
    }
}
