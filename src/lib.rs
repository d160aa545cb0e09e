pub mod camera;
pub mod color;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod logging;
pub mod ray;
pub mod render;
pub mod vec3;

pub use config::Config;
pub use error::RenderError;
pub use render::{render, Presented, Renderer};
