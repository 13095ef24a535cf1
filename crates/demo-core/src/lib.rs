pub mod camera;
pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod controls;
pub mod demo;
pub mod error;
pub mod events;
pub mod experience;
pub mod galaxy;
pub mod geometry;
pub mod image_data;
pub mod lifecycle;
pub mod material;
pub mod params;
pub mod scene;
pub mod texture;
pub mod viewport;

pub use camera::*;
pub use clock::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use controls::*;
pub use demo::*;
pub use error::DemoError;
pub use events::*;
pub use experience::*;
pub use galaxy::*;
pub use geometry::*;
pub use image_data::*;
pub use lifecycle::*;
pub use material::*;
pub use params::*;
pub use scene::*;
pub use texture::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static BACKGROUND_WGSL: &str = include_str!("../shaders/background.wgsl");
