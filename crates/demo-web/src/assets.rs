use demo_core::{AppConfig, AssetRequest};
use demo_render::DemoApp;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        anyhow::bail!("{} returned HTTP {}", url, response.status());
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetch every asset the demo asked for and hand each one over as it
/// arrives. Failed loads are logged and leave the fallback in place.
pub fn load_all(config: &AppConfig, app: Rc<RefCell<DemoApp<'static>>>) {
    let requests: Vec<AssetRequest> = app.borrow().asset_requests();
    log::info!("[assets] loading {} files", requests.len());
    for request in requests {
        let url = config.asset_url(request.path());
        let app = app.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = match fetch_bytes(&url).await {
                Ok(bytes) => app.borrow_mut().install_asset(&request, &bytes),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => log::debug!("[assets] {} ready", url),
                Err(e) => log::warn!("[assets] {}: {:#}", url, e),
            }
        });
    }
}
