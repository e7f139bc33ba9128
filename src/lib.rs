#[cfg(feature = "desktop")]
pub mod camera;
pub mod config;
pub mod pipeline;
pub mod pose;
pub mod render;
