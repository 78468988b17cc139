//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging setup
//! - Canvas and WebGPU surface creation
//! - Asset fetching
//! - Animation frame scheduling

/// Route `log` output to the console (browser) or stderr (native)
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Inline style fixing a canvas to `viewport` CSS pixels
pub fn css_size(viewport: (u32, u32)) -> String {
    format!("width:{}px;height:{}px", viewport.0, viewport.1)
}

/// Physical pixel size of a canvas showing `viewport` CSS pixels
pub fn backing_size(viewport: (u32, u32), device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    (
        (viewport.0 as f64 * dpr).round() as u32,
        (viewport.1 as f64 * dpr).round() as u32,
    )
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlCanvasElement;

    use crate::renderer::GpuCanvas;

    /// Look up the demo canvas, pin its CSS size to the logical viewport and
    /// size its backing store for the device pixel ratio
    pub fn canvas(id: &str, viewport: (u32, u32)) -> Result<HtmlCanvasElement, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| format!("no #{} element", id))?
            .dyn_into()?;

        canvas.set_attribute("style", &super::css_size(viewport))?;
        let (width, height) = super::backing_size(viewport, window.device_pixel_ratio());
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(canvas)
    }

    /// Create a WebGPU canvas drawing the logical `viewport` onto `canvas`
    pub async fn gpu_canvas(canvas: &HtmlCanvasElement, viewport: (u32, u32)) -> GpuCanvas {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        GpuCanvas::new(surface, &adapter, canvas.width(), canvas.height(), viewport).await
    }

    /// GET `path` relative to the page and return the body
    pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, String> {
        let window = web_sys::window().ok_or("no window")?;
        let response: web_sys::Response = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|e| format!("{:?}", e))?
            .dyn_into()
            .map_err(|e| format!("{:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP {}", response.status()));
        }

        let buffer = JsFuture::from(response.array_buffer().map_err(|e| format!("{:?}", e))?)
            .await
            .map_err(|e| format!("{:?}", e))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    /// Call `f` with the frame timestamp (ms) on the next animation frame
    pub fn request_animation_frame(f: impl FnOnce(f64) + 'static) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(f);
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
