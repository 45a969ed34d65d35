//! Browser entry point. Build for `wasm32-unknown-unknown` (e.g. with Trunk).

// Only mounts the app; the library owns every other dependency.
#![allow(unused_crate_dependencies)]

#[cfg(target_arch = "wasm32")]
fn main() {
	credits_graph_canvas::init_logging();
	leptos::mount::mount_to_body(credits_graph_canvas::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
	eprintln!("credits-graph-canvas runs in the browser; build it for wasm32-unknown-unknown");
}
