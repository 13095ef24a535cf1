use demo_core::{SurfaceHandle, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(document: &web::Document, selector: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .query_selector(selector)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", selector))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Decoded `key=value` pairs of the page query string, in order.
pub fn query_pairs(window: &web::Window) -> anyhow::Result<Vec<(String, String)>> {
    let js_err = |e: wasm_bindgen::JsValue| anyhow::anyhow!(format!("{:?}", e));
    let search = window.location().search().map_err(js_err)?;
    let params = web::UrlSearchParams::new_with_str(&search).map_err(js_err)?;
    let mut pairs = Vec::new();
    if let Some(entries) = js_sys::try_iter(&params).map_err(js_err)? {
        for entry in entries {
            let entry: js_sys::Array = entry.map_err(js_err)?.dyn_into().map_err(js_err)?;
            let key = entry.get(0).as_string().unwrap_or_default();
            let value = entry.get(1).as_string().unwrap_or_default();
            pairs.push((key, value));
        }
    }
    Ok(pairs)
}

/// Window inner size in CSS pixels plus `devicePixelRatio`.
pub fn window_viewport() -> Viewport {
    let Some(w) = web::window() else {
        return Viewport::default();
    };
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    Viewport::new(px(w.inner_width()), px(w.inner_height()), w.device_pixel_ratio())
}

/// Full-window canvas; the browser window is the size source.
pub struct CanvasSurface {
    pub canvas: web::HtmlCanvasElement,
}

impl SurfaceHandle for CanvasSurface {
    fn viewport(&self) -> Viewport {
        window_viewport()
    }
}

/// CSS size follows the viewport, backing store follows CSS size times the
/// capped pixel ratio, shrunk to the renderer's texture limit.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let style = canvas.style();
    style
        .set_property("width", &format!("{}px", viewport.width))
        .ok();
    style
        .set_property("height", &format!("{}px", viewport.height))
        .ok();
    let (w_px, h_px) =
        viewport.physical_size_within(wgpu::Limits::default().max_texture_dimension_2d);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
}

#[inline]
pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(w) = web::window() {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = w.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
