//! Blit Pong entry point
//!
//! In the browser the frame driver runs on `requestAnimationFrame` against a
//! WebGPU canvas. Natively it runs a fixed number of frames on a software
//! canvas and writes the last one to a PNG.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use blit_pong::assets::PongAssets;
    use blit_pong::consts::CANVAS_ID;
    use blit_pong::platform::{init_logging, web};
    use blit_pong::renderer::GpuCanvas;
    use blit_pong::sim::{Direction, KeyEvent};
    use blit_pong::{DemoConfig, FramePacer, PongApp};

    /// Game instance holding all state
    struct Game {
        app: PongApp<GpuCanvas>,
        canvas: GpuCanvas,
        /// Key events received since the last frame
        pending: Vec<KeyEvent>,
        pacer: FramePacer,
    }

    impl Game {
        fn step(&mut self) {
            match self.app.frame(&mut self.canvas, self.pending.drain(..)) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        init_logging();
        log::info!("Blit Pong starting...");

        let config = DemoConfig::load();
        let viewport = (config.view_width, config.view_height);
        let element = web::canvas(CANVAS_ID, viewport)?;
        let mut canvas = web::gpu_canvas(&element, viewport).await;

        let assets = PongAssets::fetch(&config)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let app = PongApp::new(&mut canvas, &config, assets)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            app,
            canvas,
            pending: Vec::new(),
            pacer: FramePacer::new(config.fps),
        }));

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Blit Pong running at {} fps", config.fps);
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Arrow keys
        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(key) = Direction::from_key_name(&event.key()) else {
                    return;
                };
                // Keep arrows from scrolling the page
                event.prevent_default();
                let event = if pressed {
                    KeyEvent::pressed(key)
                } else {
                    KeyEvent::released(key)
                };
                game.borrow_mut().pending.push(event);
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.pending.clear();
                g.app.release_keys();
                log::info!("Released keys (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        web::request_animation_frame(move |time: f64| game_loop(game, time));
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if g.pacer.should_run(time) {
                g.step();
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::PathBuf;

    use clap::Parser;

    use blit_pong::assets::PongAssets;
    use blit_pong::renderer::SoftwareCanvas;
    use blit_pong::sim::{Direction, KeyEvent};
    use blit_pong::{DemoConfig, PongApp};

    fn parse_direction(name: &str) -> Result<Direction, String> {
        match name.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Direction::from_key_name(name).ok_or_else(|| {
                format!("unknown direction {:?} (expected up, down, left or right)", name)
            }),
        }
    }

    /// Run the Pong loop headless and save the last frame
    #[derive(Debug, Parser)]
    #[command(name = "blit-pong", version)]
    pub struct Args {
        /// JSON config file; defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of frames to simulate
        #[arg(long, default_value_t = 300)]
        frames: u64,

        /// Arrow direction held down for the whole run (repeatable)
        #[arg(long, value_parser = parse_direction)]
        hold: Vec<Direction>,

        /// Where to write the final frame
        #[arg(long, default_value = "pong.png")]
        output: PathBuf,
    }

    pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
        let config = match &args.config {
            Some(path) => DemoConfig::load_file(path)?,
            None => DemoConfig::default(),
        };

        let assets = PongAssets::load(&config)?;
        let mut canvas = SoftwareCanvas::new(config.view_width, config.view_height);
        let mut app = PongApp::new(&mut canvas, &config, assets)?;

        let held: Vec<KeyEvent> = args.hold.iter().copied().map(KeyEvent::pressed).collect();
        for frame in 0..args.frames {
            let events = if frame == 0 { held.clone() } else { Vec::new() };
            app.frame(&mut canvas, events)?;
        }

        canvas.save_png(&args.output)?;
        log::info!(
            "Ran {} frames, ball at {}; wrote {}",
            app.state().frame,
            app.state().status_text(),
            args.output.display()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    blit_pong::platform::init_logging();
    log::info!("Blit Pong (native) starting...");

    match native::run(native::Args::parse()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
