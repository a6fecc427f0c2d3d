/// Triangle meshes and the STL loader (binary and ASCII).
use std::path::Path;

use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::double,
    sequence::preceded,
    IResult,
};
use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::pipeline::{Pen, Polyline};
use crate::vector::Vector3;

const BINARY_HEADER_LEN: usize = 80;
const BINARY_FACET_LEN: usize = 50;

/// A triangle face with its facet normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector3; 3],
    pub normal: Vector3,
}

impl Triangle {
    pub fn new(v0: Vector3, v1: Vector3, v2: Vector3, normal: Vector3) -> Self {
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Normal from the winding order; degenerate triangles have none
    pub fn calculate_normal(&self) -> Result<Vector3> {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(&(v2 - v0)).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Cube of edge `size` centered on the origin, two triangles per face
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let v = |x: f64, y: f64, z: f64| Vector3::new(x * h, y * h, z * h);
        // (normal, four corners counter-clockwise seen from outside)
        #[rustfmt::skip]
        let faces = [
            (Vector3::Z_AXIS, [v(-1., -1., 1.), v(1., -1., 1.), v(1., 1., 1.), v(-1., 1., 1.)]),
            (-Vector3::Z_AXIS, [v(-1., -1., -1.), v(-1., 1., -1.), v(1., 1., -1.), v(1., -1., -1.)]),
            (Vector3::Y_AXIS, [v(-1., 1., -1.), v(-1., 1., 1.), v(1., 1., 1.), v(1., 1., -1.)]),
            (-Vector3::Y_AXIS, [v(-1., -1., -1.), v(1., -1., -1.), v(1., -1., 1.), v(-1., -1., 1.)]),
            (Vector3::X_AXIS, [v(1., -1., -1.), v(1., 1., -1.), v(1., 1., 1.), v(1., -1., 1.)]),
            (-Vector3::X_AXIS, [v(-1., -1., -1.), v(-1., -1., 1.), v(-1., 1., 1.), v(-1., 1., -1.)]),
        ];

        let mut mesh = Self::with_capacity(12);
        for (normal, [a, b, c, d]) in faces {
            mesh.add_triangle(Triangle::new(a, b, c, normal));
            mesh.add_triangle(Triangle::new(a, c, d, normal));
        }
        mesh
    }

    /// Axis-aligned (min, max) corners, `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vector3, Vector3)> {
        let mut points = self.triangles.iter().flat_map(|t| t.vertices.iter().copied());
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| {
            (
                Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    pub fn transformed(&self, matrix: &Matrix) -> Self {
        Self {
            triangles: self
                .triangles
                .iter()
                .map(|t| Triangle {
                    vertices: t.vertices.map(|v| matrix.transform_point(v)),
                    normal: matrix
                        .transform_direction(t.normal)
                        .normalize()
                        .unwrap_or(t.normal),
                })
                .collect(),
        }
    }

    /// Centered on the origin and scaled so the longest side is 1
    pub fn normalized(&self) -> Self {
        let Some((min, max)) = self.bounds() else {
            return self.clone();
        };
        let extent = max - min;
        let longest = extent.x.max(extent.y).max(extent.z);
        let center = (min + max) * 0.5;
        let scale = if longest > 0.0 { 1.0 / longest } else { 1.0 };

        self.transformed(&(Matrix::translate(-center) * Matrix::scale_uniform(scale)))
    }

    /// Every triangle as a closed polyline
    pub fn wireframe(&self, pen: Pen) -> Vec<Polyline> {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices;
                Polyline::new(vec![a, b, c, a], pen)
            })
            .collect()
    }
}

/// Read and parse an STL file
pub fn load_stl(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let mesh = parse_stl(&data)?;
    debug!(path = %path.display(), triangles = mesh.len(), "STL loaded");
    Ok(mesh)
}

/// Detect and parse STL data (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    // Binary files may also start with "solid", so fall back when the text
    // parse fails.
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }

    parse_binary_stl(data)
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    if data.len() < BINARY_HEADER_LEN + 4 {
        return Err(Error::InvalidModel(
            "file too small to be a valid STL".to_string(),
        ));
    }

    let body = &data[BINARY_HEADER_LEN..];
    let triangle_count = u32::from_le_bytes([body[0], body[1], body[2], body[3]]) as usize;
    let facets = &body[4..];

    let expected = triangle_count
        .checked_mul(BINARY_FACET_LEN)
        .ok_or_else(|| Error::InvalidModel("triangle count overflows".to_string()))?;
    if facets.len() < expected {
        return Err(Error::InvalidModel(format!(
            "unexpected end of file: {triangle_count} triangles need {expected} bytes, found {}",
            facets.len()
        )));
    }

    let mut mesh = Mesh::with_capacity(triangle_count);
    for facet in facets.chunks_exact(BINARY_FACET_LEN).take(triangle_count) {
        // normal, three vertices, then a 2-byte attribute count we ignore
        let normal = read_vector(&facet[0..12]);
        let v0 = read_vector(&facet[12..24]);
        let v1 = read_vector(&facet[24..36]);
        let v2 = read_vector(&facet[36..48]);
        mesh.add_triangle(Triangle::new(v0, v1, v2, normal));
    }

    Ok(mesh)
}

fn read_vector(bytes: &[u8]) -> Vector3 {
    let component = |i: usize| {
        let b = &bytes[i * 4..i * 4 + 4];
        f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    };
    Vector3::new(component(0), component(1), component(2))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    match parse_ascii_stl_impl(input) {
        Ok((_, mesh)) => Ok(mesh),
        Err(e) => Err(Error::InvalidModel(format!(
            "failed to parse ASCII STL: {e:?}"
        ))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Mesh> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    // optional solid name
    let (input, _) = not_line_ending(input)?;
    let (input, triangles) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = not_line_ending(input)?;
    let (input, _) = multispace0(input)?;

    Ok((input, Mesh { triangles }))
}

fn parse_facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v0) = parse_vertex(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, Triangle::new(v0, v1, v2, normal)))
}

fn parse_vertex(input: &str) -> IResult<&str, Vector3> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vector3(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_TRIANGLE: &str = "solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1.5 0
    endloop
  endfacet
endsolid tri
";

    fn binary_stl(triangles: &[[f32; 12]]) -> Vec<u8> {
        let mut data = vec![0u8; 80];
        data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for t in triangles {
            for value in t {
                data.extend_from_slice(&value.to_le_bytes());
            }
            data.extend_from_slice(&[0, 0]);
        }
        data
    }

    #[test]
    fn test_parse_binary_header() {
        let data = binary_stl(&[]);
        let mesh = parse_binary_stl(&data).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_parse_binary_triangle() {
        let data = binary_stl(&[[0., 0., 1., 0., 0., 0., 2., 0., 0., 0., 2., 0.]]);
        let mesh = parse_stl(&data).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.triangles[0].normal, Vector3::Z_AXIS);
        assert_eq!(mesh.triangles[0].vertices[2], Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_truncated_binary_is_rejected() {
        let mut data = binary_stl(&[[0.0; 12]]);
        data.truncate(data.len() - 10);
        assert!(matches!(
            parse_binary_stl(&data),
            Err(Error::InvalidModel(_))
        ));
        assert!(matches!(parse_stl(&[0u8; 10]), Err(Error::InvalidModel(_))));
    }

    #[test]
    fn test_parse_ascii_with_name() {
        let mesh = parse_stl(ASCII_TRIANGLE.as_bytes()).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.triangles[0].vertices[2], Vector3::new(0.0, 1.5, 0.0));
        assert_eq!(mesh.triangles[0].calculate_normal().unwrap(), Vector3::Z_AXIS);
    }

    #[test]
    fn test_cube_bounds_and_normals() {
        let mesh = Mesh::cube(2.0);
        assert_eq!(mesh.len(), 12);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Vector3::new(1.0, 1.0, 1.0));
        for triangle in &mesh.triangles {
            assert_eq!(triangle.calculate_normal().unwrap(), triangle.normal);
        }
    }

    #[test]
    fn test_normalized_fits_unit_cube() {
        let shift = Matrix::translate(Vector3::new(10.0, 0.0, 0.0));
        let mesh = Mesh::cube(4.0).transformed(&shift);
        let (min, max) = mesh.normalized().bounds().unwrap();
        assert!((min.x + 0.5).abs() < 1e-12 && (max.x - 0.5).abs() < 1e-12);
        assert!((min.y + 0.5).abs() < 1e-12 && (max.z - 0.5).abs() < 1e-12);
        assert!(Mesh::new().normalized().is_empty());
    }

    #[test]
    fn test_wireframe_closes_triangles() {
        let lines = Mesh::cube(1.0).wireframe(Pen::default());
        assert_eq!(lines.len(), 12);
        assert!(lines
            .iter()
            .all(|l| l.points.len() == 4 && l.points[0] == l.points[3]));
    }
}
