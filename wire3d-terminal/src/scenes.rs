/// Demo scenes: each one is a pure function from elapsed time to polylines
use std::f64::consts::TAU;
use std::fmt;

use clap::ValueEnum;
use wire3d_core::{shapes, Color, Matrix, Mesh, Pen, Polyline, Result, Space, Vector3};

/// Scenes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    Axes,
    Cubes,
    Transforms,
    Model,
}

#[derive(Debug, Clone)]
pub enum Scene {
    Axes,
    Cubes,
    Transforms,
    Model(Mesh),
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Axes => "axes",
            Scene::Cubes => "cubes",
            Scene::Transforms => "transforms",
            Scene::Model(_) => "model",
        }
    }

    /// Polylines for the frame `elapsed` seconds into the scene
    pub fn frame(&self, elapsed: f64) -> Result<Vec<(Space, Polyline)>> {
        let mut lines: Vec<(Space, Polyline)> = shapes::axes(1.0)
            .into_iter()
            .map(|axis| (Space::World, axis))
            .collect();

        match self {
            Scene::Axes => {}
            Scene::Cubes => {
                let (large, small) = cube_transforms(elapsed)?;
                let cube = shapes::cube(1.0, Pen::new(Color::WHITE));
                lines.extend(cube.iter().map(|face| (Space::World, face.transformed(&large))));
                lines.extend(cube.iter().map(|face| (Space::World, face.transformed(&small))));
            }
            Scene::Transforms => {
                let t = phase(elapsed, 4.0);

                // pixels: slide right and back
                let slide = (t * TAU).sin() * 100.0 + 160.0;
                let screen = shapes::screen_arrow(Pen::new(Color::YELLOW))
                    .transformed(&Matrix::translate(Vector3::new(slide, 40.0, 0.0)));
                lines.push((Space::Screen, screen));

                // normalized view: pulse and spin about its tail
                let pulse = 1.0 + 0.5 * (t * TAU).sin();
                let view = shapes::view_arrow(Pen::new(Color::MAGENTA)).transformed(
                    &(Matrix::scale_uniform(pulse)
                        * Matrix::rotate(t * TAU, Vector3::Z_AXIS)?
                        * Matrix::translate(Vector3::new(-0.5, -0.5, 0.0))),
                );
                lines.push((Space::View, view));
            }
            Scene::Model(mesh) => {
                let spin = Matrix::rotate(phase(elapsed, 8.0) * TAU, Vector3::Y_AXIS)?;
                lines.extend(
                    mesh.transformed(&spin)
                        .wireframe(Pen::new(Color::GREEN))
                        .into_iter()
                        .map(|line| (Space::World, line)),
                );
            }
        }

        Ok(lines)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fraction of `period` seconds elapsed, in [0, 1)
pub fn phase(elapsed: f64, period: f64) -> f64 {
    elapsed.rem_euclid(period) / period
}

/// World matrices of the two animated cubes. The small cube is parented to
/// the large one, so its matrix ends with the large cube's.
pub fn cube_transforms(elapsed: f64) -> Result<(Matrix, Matrix)> {
    let large = Matrix::scale_uniform(0.5)
        * Matrix::rotate(phase(elapsed, 5.0) * TAU, Vector3::X_AXIS)?
        * Matrix::translate(Vector3::new(1.0, 0.0, 0.0));
    let small = Matrix::scale_uniform(0.5)
        * Matrix::rotate(phase(elapsed, 1.0) * TAU, Vector3::Y_AXIS)?
        * Matrix::translate(Vector3::new(0.0, 1.0, 0.0))
        * large;
    Ok((large, small))
}
