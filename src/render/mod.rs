pub mod primitive;
pub mod raster;
pub mod renderer;
pub mod skeleton;
pub mod style;
pub mod viewport;
#[cfg(feature = "desktop")]
pub mod window;

pub use primitive::RenderPrimitive;
pub use raster::Canvas;
pub use renderer::{render, Primitives};
pub use skeleton::{BoneEdge, SKELETON_CONNECTIONS};
pub use style::{Color, SharedStyle, StyleConfig};
pub use viewport::{flip_vertical, map_skeleton, to_display, AspectFillViewport, ViewportTransform};
#[cfg(feature = "desktop")]
pub use window::MinifbRenderer;
