//! Credits graph: works and the people credited on them, laid out as an
//! interactive force-directed diagram.
//!
//! [`graph::build`] turns a [`dataset::Dataset`] into deduplicated nodes and
//! links; [`layout::LayoutEngine`] keeps them positioned and handles drags;
//! [`layout::FrameLoop`] steps the engine once per frame. On `wasm32` the
//! crate also carries the Leptos app that draws it all on a canvas.

#[cfg(test)]
use proptest as _;

pub mod dataset;
pub mod error;
pub mod graph;
pub mod layout;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod pages;
#[cfg(target_arch = "wasm32")]
pub mod source;

#[cfg(target_arch = "wasm32")]
pub use app::{App, init_logging};
