use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleSystem;
use super::rope::RopePath;
use super::state::{RopeKind, WiringState};
use super::theme::Theme;

pub fn render(
	state: &WiringState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	particles: Option<&ParticleSystem>,
) {
	let viewport = state.viewport();
	ctx.set_fill_style_str(&theme.background);
	ctx.fill_rect(0.0, 0.0, viewport.x, viewport.y);
	if let Some(ps) = particles {
		draw_particles(ps, ctx, theme);
	}
	draw_ropes(state, ctx, theme);
}

fn draw_particles(ps: &ParticleSystem, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.particles.color);
	for p in ps.particles() {
		ctx.begin_path();
		let _ = ctx.arc(p.pos.x, p.pos.y, p.radius, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn trace_path(path: &RopePath, ctx: &CanvasRenderingContext2d) {
	ctx.begin_path();
	ctx.move_to(path.start.x, path.start.y);
	for c in &path.curves {
		ctx.quadratic_curve_to(c.control.x, c.control.y, c.to.x, c.to.y);
	}
}

fn draw_ropes(state: &WiringState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (dash, gap) = theme.dash;
	let dash_offset = -(state.flow_time() * theme.dash_speed) % (dash + gap);
	ctx.set_line_cap("round");
	ctx.set_line_join("round");

	for rope in state.ropes() {
		let color = match (rope.active, rope.kind) {
			(true, _) => &theme.active_rope,
			(false, RopeKind::Hub) => &theme.hub_rope,
			(false, RopeKind::Child | RopeKind::Free) => &theme.child_rope,
		};
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(if rope.active {
			theme.rope_width * 1.5
		} else {
			theme.rope_width
		});

		if rope.kind == RopeKind::Hub {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		trace_path(&rope.path, ctx);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}
