//! Canvas rendering for the force graph.
//!
//! A pure projection of the latest layout snapshot onto the 2D canvas, in
//! three passes for correct z-ordering: link lines, node circles, labels.
//! Nothing here mutates simulation state.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

/// Stroke width for a link of the given weight.
pub fn link_stroke_width(value: f64) -> f64 {
	value.max(0.0).sqrt()
}

/// Renders the complete graph to the canvas.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_labels(state, ctx);

	ctx.restore();
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("#999999");
	ctx.set_global_alpha(0.6);

	for link in &state.simulation.links {
		let (x1, y1) = state.layout.positions[link.source];
		let (x2, y2) = state.layout.positions[link.target];

		ctx.set_line_width(link_stroke_width(link.value));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(1.5);

	for (idx, info) in state.nodes.iter().enumerate() {
		let (x, y) = state.layout.positions[idx];
		let radius = state.view.node_radius(info.degree);

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.stroke();
	}
}

fn draw_labels(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#000000");
	ctx.set_font(&format!("{}px sans-serif", state.view.label_font_size));

	for (idx, info) in state.nodes.iter().enumerate() {
		// Low-degree labels stay hidden unless the node is hovered.
		if !state.view.label_visible(info.degree) && state.hover != Some(idx) {
			continue;
		}
		let (x, y) = state.layout.positions[idx];
		let _ = ctx.fill_text(&info.id, x + state.view.label_offset_x, y);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stroke_width_is_the_square_root_of_the_weight() {
		assert_eq!(link_stroke_width(4.0), 2.0);
		assert_eq!(link_stroke_width(9.0), 3.0);
		assert_eq!(link_stroke_width(1.0), 1.0);
	}

	#[test]
	fn negative_weights_clamp_to_zero_width() {
		assert_eq!(link_stroke_width(-3.0), 0.0);
	}
}
