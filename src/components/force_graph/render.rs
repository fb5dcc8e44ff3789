use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::GraphViewState;
use crate::graph::Role;
use crate::relations::RelationKind;

const BACKGROUND: &str = "#1a1a2e";

fn node_color(role: Role) -> &'static str {
	match role {
		Role::Center => "#f59e0b",
		Role::Synonym => "#22c55e",
		Role::Antonym => "#ef4444",
	}
}

fn link_color(kind: RelationKind) -> &'static str {
	match kind {
		RelationKind::Synonym => "rgba(34, 197, 94, 0.3)",
		RelationKind::Antonym => "rgba(239, 68, 68, 0.3)",
	}
}

/// Shortens `word` to fit a bubble of `radius`.
pub(super) fn truncate_word(word: &str, radius: f64) -> String {
	let max = (radius / 5.0).floor() as usize;
	if word.chars().count() > max {
		let kept: String = word.chars().take(max.saturating_sub(1)).collect();
		format!("{kept}...")
	} else {
		word.to_string()
	}
}

pub fn render(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.viewport.width, state.viewport.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_tooltip(state, ctx);
}

fn draw_links(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_width(2.0);
	for link in &state.graph.links {
		let (Some(s), Some(t)) = (
			state.graph.index_of(&link.source),
			state.graph.index_of(&link.target),
		) else {
			continue;
		};
		let (a, b) = (state.positions[s], state.positions[t]);
		ctx.set_stroke_style_str(link_color(link.kind));
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for (idx, node) in state.graph.nodes.iter().enumerate() {
		let p = state.positions[idx];
		let hovered = state.hover == Some(idx) || state.drag.node_idx == Some(idx);

		// Glow
		ctx.set_global_alpha(if hovered { 0.45 } else { 0.25 });
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, node.radius + 6.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_color(node.role));
		ctx.fill();
		ctx.set_global_alpha(1.0);

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, node.radius, 0.0, 2.0 * PI);
		ctx.fill();

		if hovered {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, node.radius + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		let font = if node.role == Role::Center {
			"600 14px sans-serif"
		} else {
			"500 11px sans-serif"
		};
		ctx.set_font(font);
		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text(&truncate_word(&node.label, node.radius), p.x, p.y);
	}
}

fn draw_tooltip(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	if state.drag.moved {
		return;
	}
	let Some(word) = state.hovered_leaf() else {
		return;
	};
	let text = format!("Clicca per esplorare \"{word}\"");
	let (x, y) = (state.pointer.x + 15.0, state.pointer.y - 10.0);
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("left");
	let width = ctx
		.measure_text(&text)
		.map(|m| m.width())
		.unwrap_or(text.len() as f64 * 6.0);
	ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
	ctx.fill_rect(x - 6.0, y - 12.0, width + 12.0, 24.0);
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(&text, x, y);
}
