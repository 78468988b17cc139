//! Image viewer entry point
//!
//! Loads one PNG, draws it into the configured rectangle over a white
//! background and presents a single frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
async fn run() -> Result<(), JsValue> {
    use blit_pong::DemoConfig;
    use blit_pong::assets::fetch_sprite;
    use blit_pong::consts::CANVAS_ID;
    use blit_pong::platform::{init_logging, web};
    use blit_pong::viewer::show_image;

    init_logging();

    let config = DemoConfig::load();
    let viewport = (config.view_width, config.view_height);
    let element = web::canvas(CANVAS_ID, viewport)?;
    let mut canvas = web::gpu_canvas(&element, viewport).await;

    let sprite = fetch_sprite(&config.viewer_image)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let width = show_image(&mut canvas, &sprite, config.viewer_dest, config.background)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    log::info!("Image width {}", width);
    log::info!("you should see an image.");

    // Dropping the surface unconfigures the canvas and blanks it
    std::mem::forget(canvas);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::PathBuf;

    use clap::Parser;

    use blit_pong::DemoConfig;
    use blit_pong::assets::load_sprite;
    use blit_pong::renderer::SoftwareCanvas;
    use blit_pong::viewer::show_image;

    /// Draw one image into a frame and save it
    #[derive(Debug, Parser)]
    #[command(name = "hello-image", version)]
    pub struct Args {
        /// JSON config file; defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Image to show, overriding the configured one
        #[arg(long)]
        image: Option<String>,

        /// Where to write the frame
        #[arg(long, default_value = "hello_image.png")]
        output: PathBuf,
    }

    pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
        let mut config = match &args.config {
            Some(path) => DemoConfig::load_file(path)?,
            None => DemoConfig::default(),
        };
        if let Some(image) = args.image {
            config.viewer_image = image;
        }

        let sprite = load_sprite(&config.viewer_image)?;
        let mut canvas = SoftwareCanvas::new(config.view_width, config.view_height);
        let width = show_image(&mut canvas, &sprite, config.viewer_dest, config.background)?;
        canvas.save_png(&args.output)?;

        log::info!("Image width {}, wrote {}", width, args.output.display());
        log::info!("you should see an image.");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    blit_pong::platform::init_logging();

    match native::run(native::Args::parse()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
