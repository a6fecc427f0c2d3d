use std::f64::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use wire3d_core::{
    draw_polyline, CameraCommand, CameraInfo, ClientBuffer, Error, Matrix, Pen, Projection,
    Segment, Size, Space, Vector3, Vector4,
};

fn sample_matrices() -> Vec<Matrix> {
    vec![
        Matrix::translate(Vector3::new(1.0, -2.0, 3.0)),
        Matrix::scale(Vector3::new(2.0, 0.5, 4.0)),
        Matrix::rotate(1.1, Vector3::new(0.3, -1.0, 0.2)).unwrap(),
        Matrix::view_matrix(
            Vector3::new(3.0, 4.0, 5.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::Y_AXIS,
        )
        .unwrap(),
        Matrix::perspective(FRAC_PI_2, 0.75, 0.1, 100.0).unwrap(),
        Matrix::ndc_to_screen(&ClientBuffer::new(10, 20, 640, 480, 0.0, 1.0)),
        Matrix::from_row_major([
            2.0, 1.0, 0.0, 3.0, //
            0.0, 1.0, 4.0, 1.0, //
            1.0, 0.0, 2.0, 0.0, //
            3.0, 1.0, 1.0, 1.0,
        ]),
    ]
}

fn camera(eye: Vector3) -> CameraInfo {
    let buffer = ClientBuffer::from_size(Size::new(800, 600));
    let projection = Projection::new(FRAC_PI_2, buffer.aspect_ratio(), 0.1, 100.0).unwrap();
    CameraInfo::new(
        eye,
        Vector3::ZERO,
        Vector3::Y_AXIS,
        projection,
        buffer.size(),
        buffer,
    )
    .unwrap()
}

#[test]
fn test_matrix_times_inverse_is_identity() {
    for m in sample_matrices() {
        let inverse = m.invert().unwrap();
        assert_abs_diff_eq!(m * inverse, Matrix::IDENTITY, epsilon = 1e-9);
        assert_abs_diff_eq!(inverse * m, Matrix::IDENTITY, epsilon = 1e-9);
    }
}

#[test]
fn test_normalize_yields_unit_length() {
    let vectors = [
        Vector3::new(3.0, 4.0, 0.0),
        Vector3::new(-1e-3, 2e-3, 5e-4),
        Vector3::new(1e6, -1e6, 1.0),
    ];
    for v in vectors {
        assert!((v.normalize().unwrap().length() - 1.0).abs() < 1e-12);
    }
    assert!(matches!(Vector3::ZERO.normalize(), Err(Error::DegenerateVector)));
    assert!(matches!(Vector4::ZERO.normalize(), Err(Error::DegenerateVector)));
}

#[test]
fn test_transform_points_have_unit_w() {
    let points = [
        Vector3::new(0.0, 0.0, -1.0),
        Vector3::new(1.0, 2.0, -3.0),
        Vector3::new(-4.0, 0.5, -20.0),
    ];
    for m in sample_matrices() {
        for p in m.transform_points(points) {
            assert!((p.w - 1.0).abs() < 1e-12, "w = {} for {m}", p.w);
        }
    }
}

#[test]
fn test_look_at_basis() {
    let view = Matrix::view_matrix(Vector3::Z_AXIS, Vector3::ZERO, Vector3::Y_AXIS).unwrap();
    // basis vectors are the columns
    assert_eq!(view.column(0).unwrap().truncate(), Vector3::X_AXIS);
    assert_eq!(view.column(1).unwrap().truncate(), Vector3::Y_AXIS);
    assert_eq!(view.column(2).unwrap().truncate(), Vector3::Z_AXIS);
    assert_eq!(view.row(3).unwrap(), Vector4::new(0.0, 0.0, -1.0, 1.0));
}

#[test]
fn test_perspective_values() {
    let m = Matrix::perspective(FRAC_PI_2, 1.0, 0.001, 1000.0).unwrap();
    assert_abs_diff_eq!(m.get(0, 0).unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(m.get(1, 1).unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(m.get(2, 2).unwrap(), -1.000001, epsilon = 1e-9);
    assert_abs_diff_eq!(m.get(3, 2).unwrap(), -0.001000001, epsilon = 1e-12);
    assert_eq!(m.get(2, 3).unwrap(), -1.0);

    for (fov, aspect, near) in [(0.0, 1.0, 0.001), (FRAC_PI_2, 0.0, 0.001), (FRAC_PI_2, 1.0, 0.0)] {
        assert!(matches!(
            Matrix::perspective(fov, aspect, near, 1000.0),
            Err(Error::InvalidArgument { .. })
        ));
    }
}

#[test]
fn test_ndc_to_screen_flips_y() {
    let m = Matrix::ndc_to_screen(&ClientBuffer::new(0, 0, 800, 600, 0.0, 1.0));
    assert_eq!(
        m.transform(Vector4::new(-1.0, -1.0, 0.0, 1.0)),
        Vector4::new(0.0, 600.0, 0.0, 1.0)
    );
    assert_eq!(
        m.transform(Vector4::new(1.0, 1.0, 0.0, 1.0)),
        Vector4::new(800.0, 0.0, 0.0, 1.0)
    );
}

#[test]
fn test_rebuilt_camera_has_no_stale_matrices() {
    let before = camera(Vector3::new(0.0, 0.0, 5.0));
    let after = before
        .apply(CameraCommand::Translate(Vector3::new(1.0, 0.5, 0.0)))
        .unwrap()
        .apply(CameraCommand::Resize {
            width: 1024,
            height: 768,
        })
        .unwrap();

    let old = before.materialization();
    let new = after.materialization();

    // every eye-dependent matrix changed
    assert_ne!(new.view, old.view);
    assert_ne!(new.view_projection, old.view_projection);
    assert_ne!(new.view_projection_client, old.view_projection_client);
    // every buffer-dependent matrix changed
    assert_ne!(new.client_view, old.client_view);

    // and every matrix agrees with a fresh build from the new tuple
    let fresh = CameraInfo::new(
        after.eye(),
        after.target(),
        after.up(),
        *after.projection(),
        after.buffer_size(),
        *after.client_buffer(),
    )
    .unwrap();
    for (a, b) in new.matrices().iter().zip(fresh.materialization().matrices()) {
        assert_eq!(*a, b);
    }
    assert_eq!(new.view_projection, new.view * new.projection);
    assert_eq!(new.view_projection_client, new.view_projection * new.client_view);
}

#[test]
fn test_world_origin_draws_at_center_pixel() {
    let camera = camera(Vector3::new(0.0, 0.0, 5.0));
    let mut segments: Vec<Segment> = Vec::new();
    let points = [Vector3::ZERO, Vector3::new(0.0, 1.0, 0.0)];
    draw_polyline(&points, Space::World, &camera, Pen::default(), &mut segments);

    assert_eq!(segments.len(), 1);
    assert_abs_diff_eq!(segments[0].from.x, 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(segments[0].from.y, 300.0, epsilon = 1e-9);
    // +Y in the world is up on screen
    assert!(segments[0].to.y < 300.0);
}
