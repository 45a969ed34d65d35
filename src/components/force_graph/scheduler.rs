use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::layout::FrameScheduler;

/// Frames from the browser's `requestAnimationFrame`.
pub struct AnimationFrameScheduler;

impl FrameScheduler for AnimationFrameScheduler {
	fn on_frame(&self, callback: Box<dyn FnOnce()>) {
		let Some(window) = web_sys::window() else {
			warn!("no window, frame dropped");
			return;
		};
		let callback = Closure::once_into_js(move || callback());
		if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
			warn!("requestAnimationFrame failed: {err:?}");
		}
	}
}
