//! wgpu renderer and the three demo scenes, shared by the web and native
//! front-ends. Front-ends own the window/canvas, input and asset fetching;
//! everything GPU-side lives here behind [`DemoApp`].

mod app;
mod demos;
mod gpu;
mod helpers;
mod mesh;
mod pipelines;
mod points;
mod scene;
mod textures;
mod uniforms;

pub use app::DemoApp;
pub use gpu::GpuState;
pub use mesh::{GpuGeometry, GpuMaterial, GpuMesh};
pub use points::GpuPoints;
pub use scene::{RenderObject, RenderScene};
