/// Ready-made polylines for the demo scenes
use crate::pipeline::{Color, Pen, Polyline};
use crate::vector::Vector3;

/// Cube wireframe of edge `size` centered on the origin, one closed
/// polyline per face.
pub fn cube(size: f64, pen: Pen) -> Vec<Polyline> {
    let h = size / 2.0;
    let corner = |x: f64, y: f64, z: f64| Vector3::new(x * h, y * h, z * h);

    let faces = [
        // front, back
        [(-1., -1., 1.), (1., -1., 1.), (1., 1., 1.), (-1., 1., 1.)],
        [(-1., -1., -1.), (-1., 1., -1.), (1., 1., -1.), (1., -1., -1.)],
        // top, bottom
        [(-1., 1., -1.), (-1., 1., 1.), (1., 1., 1.), (1., 1., -1.)],
        [(-1., -1., -1.), (1., -1., -1.), (1., -1., 1.), (-1., -1., 1.)],
        // right, left
        [(1., -1., -1.), (1., 1., -1.), (1., 1., 1.), (1., -1., 1.)],
        [(-1., -1., -1.), (-1., -1., 1.), (-1., 1., 1.), (-1., 1., -1.)],
    ];

    faces
        .iter()
        .map(|face| {
            let mut points: Vec<Vector3> = face.iter().map(|&(x, y, z)| corner(x, y, z)).collect();
            points.push(points[0]);
            Polyline::new(points, pen)
        })
        .collect()
}

/// Unit axis gizmo at the origin: X aqua, Y red, Z blue
pub fn axes(length: f64) -> [Polyline; 3] {
    let axis = |tip: Vector3, color: Color| {
        Polyline::new(vec![Vector3::ZERO, tip * length], Pen::new(color))
    };
    [
        axis(Vector3::X_AXIS, Color::AQUA),
        axis(Vector3::Y_AXIS, Color::RED),
        axis(Vector3::Z_AXIS, Color::BLUE),
    ]
}

/// Right-pointing arrow outline in pixels, tail at the origin
pub fn screen_arrow(pen: Pen) -> Polyline {
    arrow(&[(0., 0.), (40., 0.), (35., 10.), (50., 0.), (35., -10.), (40., 0.)], pen)
}

/// The same arrow in normalized view units
pub fn view_arrow(pen: Pen) -> Polyline {
    arrow(
        &[(0., 0.), (0.08, 0.), (0.07, 0.02), (0.1, 0.), (0.07, -0.02), (0.08, 0.)],
        pen,
    )
}

fn arrow(points: &[(f64, f64)], pen: Pen) -> Polyline {
    Polyline::new(
        points.iter().map(|&(x, y)| Vector3::new(x, y, 0.0)).collect(),
        pen,
    )
}
