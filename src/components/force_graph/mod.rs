mod component;
mod render;
mod scheduler;
mod state;

pub use component::ForceGraphCanvas;
