use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;
use crate::graph::{Node, NodeKind, Relation, Role};
use crate::layout::LayoutEngine;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn role_color(role: Role) -> &'static str {
	match role {
		Role::Work => "#f4a261",
		Role::Actor => "#4ea8de",
		Role::Director => "#e76f51",
		Role::CastingDirector => "#8ac926",
	}
}

fn role_radius(role: Role) -> f64 {
	match role {
		Role::Work => 10.0,
		_ => 7.0,
	}
}

fn label(node: &Node) -> String {
	match &node.kind {
		NodeKind::Work { year, .. } => format!("{} ({year})", node.name),
		_ => node.name.clone(),
	}
}

pub fn render(engine: &LayoutEngine, state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(engine, state, ctx);
	draw_nodes(engine, state, ctx);
	ctx.restore();
}

fn draw_links(engine: &LayoutEngine, state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 6.0 / k, 4.0 / k, 7.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	for link in engine.links() {
		let (Some(source), Some(target)) = (engine.node(&link.source), engine.node(&link.target))
		else {
			continue;
		};
		let (dx, dy) = (target.x - source.x, target.y - source.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted = state.is_highlighted(&source.id) && state.is_highlighted(&target.id);
		let (alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		let rgb = match link.relation {
			Relation::Cast => "100, 180, 255",
			Relation::Director => "240, 140, 110",
			Relation::CastingDirector => "160, 210, 90",
		};
		ctx.set_stroke_style_str(&format!("rgba({rgb}, {alpha})"));
		ctx.set_line_width(match link.relation {
			Relation::Director => width * 1.5,
			_ => width,
		});
		// Casting credits are drawn dashed and flowing.
		if link.relation == Relation::CastingDirector {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (source_r, target_r) = (role_radius(source.role()), role_radius(target.role()));
		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(source.x + ux * source_r, source.y + uy * source_r);
		ctx.line_to(
			target.x - ux * (target_r + arrow_size),
			target.y - uy * (target_r + arrow_size),
		);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(&format!("rgba({rgb}, {})", (alpha + 0.2).min(1.0)));
		let (tip_x, tip_y) = (target.x - ux * target_r, target.y - uy * target_r);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(engine: &LayoutEngine, state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));
	let dragging = engine.dragging();

	// Dimmed nodes first so highlighted ones draw on top.
	for pass_highlighted in [false, true] {
		for node in engine.nodes() {
			let highlighted = has_highlight && state.is_highlighted(&node.id);
			if highlighted != pass_highlighted {
				continue;
			}
			let base = role_radius(node.role());
			let (alpha, radius) = if !has_highlight {
				(1.0, base)
			} else if highlighted && state.is_hovered(&node.id) {
				(1.0, base * (1.0 + 0.35 * t))
			} else if highlighted {
				(1.0, base * (1.0 + 0.2 * t))
			} else {
				(1.0 - 0.7 * t, base * (1.0 - 0.15 * t))
			};

			ctx.set_global_alpha(alpha);
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(role_color(node.role()));
			ctx.fill();
			ctx.set_global_alpha(1.0);

			if node.pin.is_pinned() || dragging == Some(&node.id) {
				ctx.begin_path();
				let _ = ctx.arc(node.x, node.y, radius + 2.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
			}

			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.85));
			ctx.set_font(&font);
			let _ = ctx.fill_text(&label(node), node.x + radius + 3.0, node.y + 3.0);
		}
	}
}
