use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scheduler::AnimationFrameScheduler;
use super::state::{CanvasState, FRAME_DT};
use crate::graph::Graph;
use crate::layout::{FrameLoop, LayoutConfig, LayoutEngine};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Canvas view of a credits graph. Every new `graph` value rebuilds the
/// layout; the layout is stepped once per animation frame and redrawn.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] graph: Signal<Option<Graph>>,
	#[prop(optional)] config: LayoutConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine = Rc::new(RefCell::new(LayoutEngine::new(
		config,
		FALLBACK_SIZE.0,
		FALLBACK_SIZE.1,
	)));
	let view_state = Rc::new(RefCell::new(CanvasState::new(FALLBACK_SIZE.0, FALLBACK_SIZE.1)));
	let frame_loop: Rc<RefCell<Option<FrameLoop<AnimationFrameScheduler>>>> =
		Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (engine_init, view_init) = (engine.clone(), view_state.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("no window; canvas not started");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or(FALLBACK_SIZE)
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map_or(FALLBACK_SIZE.0, |p| p.client_width() as f64)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map_or(FALLBACK_SIZE.1, |p| p.client_height() as f64)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		engine_init.borrow_mut().resize(w, h);
		view_init.borrow_mut().resize(w, h);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("canvas has no 2d context");
				return;
			}
		};

		if fullscreen {
			let (engine_resize, view_resize, canvas_resize) =
				(engine_init.clone(), view_init.clone(), canvas.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				engine_resize.borrow_mut().resize(nw, nh);
				view_resize.borrow_mut().resize(nw, nh);
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let view_frame = view_init.clone();
		let frames = FrameLoop::new(engine_init.clone(), AnimationFrameScheduler, move |engine| {
			let mut view = view_frame.borrow_mut();
			view.advance(FRAME_DT);
			render::render(engine, &view, &ctx);
		});
		frames.start();
		debug!("canvas {w}x{h} started");
		*frame_loop.borrow_mut() = Some(frames);
	});

	let (engine_load, view_load) = (engine.clone(), view_state.clone());
	Effect::new(move |_| {
		let Some(graph) = graph.get() else {
			return;
		};
		let mut engine = engine_load.borrow_mut();
		engine.load(graph);
		view_load.borrow_mut().set_hover(None, &engine);
	});

	let (engine_md, view_md) = (engine.clone(), view_state.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas.into(), &ev);
		let mut view = view_md.borrow_mut();
		let hit = view.hit(&engine_md.borrow(), x, y);
		match hit {
			Some(id) => {
				let (gx, gy) = view.screen_to_graph(x, y);
				engine_md.borrow_mut().drag_start(&id, gx, gy);
			}
			None => {
				view.pan.active = true;
				view.pan.start_x = x;
				view.pan.start_y = y;
				view.pan.transform_start_x = view.transform.x;
				view.pan.transform_start_y = view.transform.y;
			}
		}
	};

	let (engine_mm, view_mm) = (engine.clone(), view_state.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas.into(), &ev);
		let mut view = view_mm.borrow_mut();
		let dragging = engine_mm.borrow().dragging().cloned();

		if let Some(id) = dragging {
			let (gx, gy) = view.screen_to_graph(x, y);
			engine_mm.borrow_mut().drag_move(&id, gx, gy);
		} else {
			let engine = engine_mm.borrow();
			let hovered = view.hit(&engine, x, y);
			view.set_hover(hovered, &engine);
			if view.pan.active {
				view.transform.x = view.pan.transform_start_x + (x - view.pan.start_x);
				view.transform.y = view.pan.transform_start_y + (y - view.pan.start_y);
			}
		}
	};

	let (engine_mu, view_mu) = (engine.clone(), view_state.clone());
	let on_mouseup = move |_: MouseEvent| {
		let dragging = engine_mu.borrow().dragging().cloned();
		if let Some(id) = dragging {
			engine_mu.borrow_mut().drag_end(&id);
		}
		view_mu.borrow_mut().pan.active = false;
	};

	let (engine_ml, view_ml) = (engine.clone(), view_state.clone());
	let on_mouseleave = move |_: MouseEvent| {
		let dragging = engine_ml.borrow().dragging().cloned();
		if let Some(id) = dragging {
			engine_ml.borrow_mut().drag_end(&id);
		}
		let mut view = view_ml.borrow_mut();
		view.pan.active = false;
		view.set_hover(None, &engine_ml.borrow());
	};

	let view_wh = view_state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas.into(), &ev);
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		view_wh.borrow_mut().zoom_at(x, y, factor);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
