#![cfg(target_arch = "wasm32")]
use demo_core::{AppConfig, Experience};
use demo_render::DemoApp;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod dom;
mod frame;
mod input;
mod panel;

const CANVAS_SELECTOR: &str = "canvas.webgl";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Trace).ok();
    log::set_max_level(log::LevelFilter::Info);
    log::info!("demo-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn read_config(window: &web::Window) -> AppConfig {
    match dom::query_pairs(window).and_then(|pairs| Ok(AppConfig::from_pairs(pairs)?)) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            AppConfig::default()
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = read_config(&window);
    log::set_max_level(config.log_level);
    log::info!("[config] demo={} seed={:?}", config.demo, config.seed);

    let canvas = dom::find_canvas(&document, CANVAS_SELECTOR)?;
    let viewport = dom::window_viewport();
    dom::sync_canvas_backing_size(&canvas, &viewport);

    let app = DemoApp::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), viewport, &config).await?;
    let experience = Rc::new(RefCell::new(Experience::new(
        dom::CanvasSurface {
            canvas: canvas.clone(),
        },
        app,
    )));
    let app = experience.borrow().hooks().clone();

    {
        let experience = experience.clone();
        dom::add_window_listener("resize", move || {
            let mut experience = experience.borrow_mut();
            let viewport = dom::window_viewport();
            dom::sync_canvas_backing_size(&experience.canvas().canvas, &viewport);
            experience.sync_size();
        });
    }

    input::attach(&canvas, app.clone());
    if let Err(e) = panel::build(&document, app.clone()) {
        log::warn!("[panel] {:#}", e);
    }
    assets::load_all(&config, app.clone());

    app.borrow_mut().start();
    frame::start_loop(experience);
    Ok(())
}
