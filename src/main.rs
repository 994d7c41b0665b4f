use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use kernelcraft::view::{ImageTextureProvider, TextureAtlas};
use kernelcraft::{logging, AppConfig, FrameInput, FrameLoop};

#[derive(Parser, Debug)]
#[command(name = "kernelcraft")]
#[command(about = "Generate a voxel world and run the culling/render loop headless")]
struct Args {
    /// YAML config file; defaults are used when it does not exist
    #[arg(short, long, default_value = "kernelcraft.yaml")]
    config: PathBuf,

    /// Number of frames to simulate
    #[arg(short, long, default_value = "120")]
    frames: u32,

    /// Mouse pixels of yaw per frame, spins the camera in place
    #[arg(long, default_value = "20.0")]
    turn: f32,

    /// Pack the block textures into an atlas PNG at this path and exit
    #[arg(long)]
    atlas: Option<PathBuf>,
}

const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = AppConfig::load(Some(&args.config))?;
    logging::init(&config.log);

    if let Some(out) = args.atlas {
        let atlas = TextureAtlas::from_dir(
            &config.render.texture_dir,
            TextureAtlas::DEFAULT_TILE_SIZE,
            TextureAtlas::DEFAULT_TILES_PER_ROW,
        )?;
        atlas.save(&out)?;
        return Ok(());
    }

    let mut provider = ImageTextureProvider::new();
    let mut frame_loop = FrameLoop::new(&config, &mut provider);

    let mut last_hud = Vec::new();
    for i in 0..args.frames {
        let input = FrameInput {
            look: (args.turn, 0.0),
            dt: FRAME_TIME,
            ..FrameInput::default()
        };
        let out = frame_loop.frame(input, Duration::from_secs_f32(i as f32 * FRAME_TIME));
        last_hud = out.hud;
    }

    for line in &last_hud {
        info!("{line}");
    }
    frame_loop.shutdown();
    Ok(())
}
