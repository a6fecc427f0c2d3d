/// Command-line configuration for the terminal viewer
use std::path::PathBuf;

use clap::Parser;
use wire3d_core::{load_stl, CameraInfo, ClientBuffer, Error, Projection, Result, Vector3};

use crate::scenes::{Scene, SceneKind};

#[derive(Debug, Clone, Parser)]
#[command(name = "wire3d-terminal", version, about = "Wireframe 3D viewer for the terminal")]
pub struct ViewerArgs {
    /// Scene shown at startup (Tab cycles through the others)
    #[arg(long, value_enum, default_value_t = SceneKind::Cubes)]
    pub scene: SceneKind,

    /// STL file for the model scene
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 45.0)]
    pub fov: f64,

    /// Camera position as x,y,z
    #[arg(long, value_parser = parse_vector, default_value = "0,0,5", allow_hyphen_values = true)]
    pub eye: Vector3,

    /// Near clip distance
    #[arg(long, default_value_t = 0.1)]
    pub near: f64,

    /// Far clip distance
    #[arg(long, default_value_t = 100.0)]
    pub far: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Write logs here instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl ViewerArgs {
    /// Camera at `--eye` looking at the origin with the configured frustum
    pub fn camera(&self, client_buffer: ClientBuffer) -> Result<CameraInfo> {
        let projection = Projection::new(
            self.fov.to_radians(),
            client_buffer.aspect_ratio(),
            self.near,
            self.far,
        )?;
        CameraInfo::new(
            self.eye,
            Vector3::ZERO,
            Vector3::Y_AXIS,
            projection,
            client_buffer.size(),
            client_buffer,
        )
    }

    /// Scenes available to Tab, and the index of the startup one
    pub fn scenes(&self) -> Result<(Vec<Scene>, usize)> {
        let mut scenes = vec![Scene::Axes, Scene::Cubes, Scene::Transforms];
        if let Some(path) = &self.model {
            scenes.push(Scene::Model(load_stl(path)?.normalized()));
        }

        let start = match self.scene {
            SceneKind::Axes => 0,
            SceneKind::Cubes => 1,
            SceneKind::Transforms => 2,
            SceneKind::Model if self.model.is_some() => 3,
            SceneKind::Model => {
                return Err(Error::InvalidModel(
                    "the model scene needs --model <file.stl>".to_string(),
                ))
            }
        };
        Ok((scenes, start))
    }
}

fn parse_vector(s: &str) -> std::result::Result<Vector3, String> {
    let values = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in `{s}`: {e}"))?;
    Vector3::from_slice(&values).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::Size;

    #[test]
    fn test_defaults() {
        let args = ViewerArgs::parse_from(["wire3d-terminal"]);
        assert_eq!(args.scene, SceneKind::Cubes);
        assert_eq!(args.eye, Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(args.fps, 30);

        let camera = args
            .camera(ClientBuffer::from_size(Size::new(80, 48)))
            .unwrap();
        assert!((camera.projection().fov_y() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((camera.projection().aspect_ratio() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_eye_and_scene_flags() {
        let args = ViewerArgs::parse_from([
            "wire3d-terminal",
            "--eye",
            "-1, 2.5,3",
            "--scene",
            "transforms",
        ]);
        assert_eq!(args.eye, Vector3::new(-1.0, 2.5, 3.0));
        let (scenes, start) = args.scenes().unwrap();
        assert_eq!(scenes[start].name(), "transforms");
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(ViewerArgs::try_parse_from(["wire3d-terminal", "--eye", "1,2"]).is_err());
        assert!(ViewerArgs::try_parse_from(["wire3d-terminal", "--fps", "0"]).is_err());

        let args = ViewerArgs::parse_from(["wire3d-terminal", "--near", "0"]);
        assert!(matches!(
            args.camera(ClientBuffer::default()),
            Err(Error::InvalidArgument { name: "z_near", .. })
        ));

        let args = ViewerArgs::parse_from(["wire3d-terminal", "--scene", "model"]);
        assert!(matches!(args.scenes(), Err(Error::InvalidModel(_))));
    }
}
