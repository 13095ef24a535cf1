use clap::Parser;
use demo_core::{AppConfig, Experience, SurfaceHandle, Viewport};
use demo_render::DemoApp;
use glam::Vec2;
use std::sync::Arc;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

/// Pixels per wheel "line", matching what browsers report for one notch.
const WHEEL_LINE_PX: f32 = 100.0;

#[derive(Parser)]
#[command(name = "demo-native")]
#[command(about = "Galaxy, materials and textures demos on wgpu", long_about = None)]
struct Cli {
    /// Which demo to run: galaxy, materials or textures
    #[arg(short, long, default_value = "galaxy")]
    demo: String,

    /// Directory asset paths are resolved against
    #[arg(short, long, default_value = "static")]
    assets: String,

    /// Fixed seed for the galaxy generator
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log: String,

    /// Parameter override, e.g. --set count=5000 (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<AppConfig> {
        let mut config = AppConfig::default();
        config.set("demo", &self.demo)?;
        config.set("assets", &self.assets)?;
        config.set("log", &self.log)?;
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        for pair in &self.overrides {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected NAME=VALUE, got `{}`", pair))?;
            config.overrides.push((name.to_string(), value.to_string()));
        }
        Ok(config)
    }
}

/// The window reports its size in physical pixels; the viewport wants CSS-style
/// logical pixels plus the scale factor.
struct WindowSurface(Arc<Window>);

impl SurfaceHandle for WindowSurface {
    fn viewport(&self) -> Viewport {
        let size = self.0.inner_size();
        let scale = self.0.scale_factor();
        Viewport::new(
            ((size.width as f64 / scale).round() as u32).max(1),
            ((size.height as f64 / scale).round() as u32).max(1),
            scale,
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
}

fn load_assets(config: &AppConfig, app: &mut DemoApp<'_>) {
    for request in app.asset_requests() {
        let path = config.asset_url(request.path());
        let result = std::fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| app.install_asset(&request, &bytes));
        match result {
            Ok(()) => log::debug!("[assets] {} ready", path),
            Err(e) => log::warn!("[assets] {}: {:#}", path, e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;
    env_logger::builder()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();
    log::info!("[config] demo={} seed={:?}", config.demo, config.seed);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!("{} demo", config.demo))
            .build(&event_loop)?,
    );
    let surface = WindowSurface(window.clone());
    let viewport = surface.viewport();

    let mut app = pollster::block_on(DemoApp::new(window.clone(), viewport, &config))?;
    load_assets(&config, &mut app);
    app.start();
    let mut experience = Experience::new(surface, app);
    let app = experience.hooks().clone();

    let mut drag: Option<Drag> = None;
    let mut shift = false;
    let mut cursor: Option<Vec2> = None;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape)
                {
                    elwt.exit();
                }
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                experience.sync_size();
            }
            WindowEvent::ModifiersChanged(modifiers) => shift = modifiers.state().shift_key(),
            WindowEvent::MouseInput { state, button, .. } => {
                drag = match (state, button) {
                    (ElementState::Pressed, MouseButton::Left) if shift => Some(Drag::Pan),
                    (ElementState::Pressed, MouseButton::Left) => Some(Drag::Rotate),
                    (ElementState::Pressed, MouseButton::Right) => Some(Drag::Pan),
                    (ElementState::Released, _) => None,
                    _ => drag,
                };
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = window.scale_factor();
                let pos = Vec2::new((position.x / scale) as f32, (position.y / scale) as f32);
                if let (Some(mode), Some(last)) = (drag, cursor) {
                    let delta = pos - last;
                    let mut app = app.borrow_mut();
                    match mode {
                        Drag::Rotate => app.orbit(delta.x, delta.y),
                        Drag::Pan => app.pan(delta.x, delta.y),
                    }
                }
                cursor = Some(pos);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scroll-up as positive; browsers the opposite
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => -(p.y / window.scale_factor()) as f32,
                };
                app.borrow_mut().zoom(dy);
            }
            _ => {}
        },
        Event::AboutToWait => {
            experience.tick();
            if app.borrow().is_surface_lost() {
                log::error!("[render] surface lost; exiting");
                elwt.exit();
            } else {
                window.request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}
