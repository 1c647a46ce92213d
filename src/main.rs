//=========================================================================
// Pavilion — Binary Entry Point
//
// Thin CLI wrapper: parses window options, sets up logging, and runs
// the bundled gallery scene.
//
//=========================================================================

use std::path::PathBuf;

use clap::Parser;

use pavilion::gallery::StripScene;
use pavilion::Viewer;

/// Desktop 3D picture browser.
#[derive(Parser, Debug)]
#[command(name = "pavilion", version, about)]
struct Args {
    /// Directory of pictures to browse; can also be dropped onto the
    /// window later.
    directory: Option<PathBuf>,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Window title.
    #[arg(long, default_value = "3D Picture Browser")]
    title: String,

    /// Redraw rate cap in frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Multisample count; 0 disables antialiasing.
    #[arg(long, default_value_t = 2)]
    msaa: u8,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let viewer = Viewer::builder()
        .with_size(args.width, args.height)
        .with_title(args.title)
        .with_fps(args.fps)
        .with_msaa(args.msaa)
        .build();

    viewer.run(StripScene::new(args.directory))?;
    Ok(())
}
