mod component;
mod render;
mod state;

pub use component::{ForceGraphCanvas, window_viewport};
