/// Wire3D Terminal Viewer
///
/// Renders the wireframe demo scenes with half-block pixels.
/// Controls:
///   - Arrow Keys / A,D: Move the eye
///   - W/S, Mouse Wheel: Move toward / away from the target
///   - Left drag: Orbit, Right drag: Look, Middle drag: Pan
///   - Tab: Next scene, R: Reset camera
///   - Q/ESC: Quit
use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wire3d_terminal::{App, ViewerArgs};

fn main() -> anyhow::Result<()> {
    let args = ViewerArgs::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    let mut app = App::new(&args).context("starting viewer")?;
    app.run()?;

    println!("Thank you for using Wire3D Terminal Viewer!");
    Ok(())
}
