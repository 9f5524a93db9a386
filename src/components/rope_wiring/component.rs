//! Leptos component hosting the wiring overlay.
//!
//! Nodes are absolutely positioned buttons; ropes and background particles
//! are drawn on a full-viewport canvas behind them. A single
//! `requestAnimationFrame` loop measures the DOM when the geometry cache is
//! stale, advances the simulation and redraws. Pointer moves redraw
//! immediately so ropes never lag the dragged node by a frame.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::DVec2;
use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, PointerEvent, Window,
};

use super::config::WiringConfig;
use super::geometry::Rect;
use super::particles::ParticleSystem;
use super::render;
use super::state::{NodeLayout, Outcome, WiringCommand, WiringState};
use super::theme::Theme;

/// Simulation state bundled with what it takes to draw it.
struct WiringContext {
	state: WiringState,
	theme: Theme,
	particles: Option<ParticleSystem>,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl WiringContext {
	fn redraw(&self) {
		render::render(&self.state, &self.ctx, &self.theme, self.particles.as_ref());
	}
}

type SharedContext = Rc<RefCell<Option<WiringContext>>>;

fn node_dom_id(id: &str) -> String {
	format!("wiring-node-{id}")
}

fn viewport_size(window: &Window) -> DVec2 {
	DVec2::new(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn rect_of(el: &Element) -> Rect {
	let r = el.get_bounding_client_rect();
	Rect::from_xywh(r.left(), r.top(), r.width(), r.height())
}

fn container_rect(container: NodeRef<leptos::html::Div>) -> Option<Rect> {
	container.get_untracked().map(|el| rect_of(&el))
}

/// Pushes rendered node sizes and the container rectangle into the state.
/// Elements that are missing are skipped.
fn measure(c: &mut WiringContext, container: Option<Rect>) {
	if let Some(document) = web_sys::window().and_then(|w| w.document()) {
		for layout in c.state.layouts() {
			let Some(el) = document.get_element_by_id(&node_dom_id(&layout.id)) else {
				continue;
			};
			let r = rect_of(&el);
			c.state.dispatch(WiringCommand::NodeMeasured {
				node: layout.id,
				width: r.size.x,
				height: r.size.y,
			});
		}
	}
	c.state.dispatch(WiringCommand::ContainerMeasured(container));
}

fn dispatch(
	context: &SharedContext,
	layouts: RwSignal<Vec<NodeLayout>>,
	command: WiringCommand,
) -> Outcome {
	let mut guard = context.borrow_mut();
	let Some(c) = guard.as_mut() else {
		return Outcome::Ignored;
	};
	let outcome = c.state.dispatch(command);
	if outcome.changes_layout() {
		layouts.set(c.state.layouts());
	}
	if outcome == Outcome::Moved {
		c.redraw();
	}
	outcome
}

fn node_style(layout: Option<&NodeLayout>) -> String {
	match layout {
		Some(l) => format!(
			"position: fixed; z-index: 3; left: {:.1}px; top: {:.1}px; touch-action: none; opacity: {}; pointer-events: {};",
			l.position.x,
			l.position.y,
			if l.visible { 1 } else { 0 },
			if l.visible { "auto" } else { "none" },
		),
		None => "position: fixed; visibility: hidden;".into(),
	}
}

fn node_class(layout: Option<&NodeLayout>) -> String {
	let mut class = String::from("wiring-node");
	if let Some(l) = layout {
		if l.active {
			class.push_str(" active");
		}
		if l.dragging {
			class.push_str(" dragging");
		}
	}
	class
}

fn event_element(ev: &PointerEvent) -> Option<Element> {
	ev.current_target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Draggable function nodes wired to the `container` element by simulated
/// ropes.
///
/// Clicking a node with a prompt hands the prompt to `on_prompt`. Setting
/// `activate` to a node id marks that node active and opens its group.
#[component]
pub fn RopeWiring(
	config: WiringConfig,
	container: NodeRef<leptos::html::Div>,
	#[prop(into)] activate: Signal<Option<String>>,
	#[prop(into)] on_prompt: Callback<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let relayout_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let layouts = RwSignal::new(Vec::<NodeLayout>::new());
	let descriptors = config.nodes.clone();
	let (context_init, animate_init, relayout_cb_init) =
		(context.clone(), animate.clone(), relayout_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		let size = viewport_size(&window);
		canvas.set_width(size.x as u32);
		canvas.set_height(size.y as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let theme = Theme::default();
		let particles = theme
			.particles
			.enabled
			.then(|| ParticleSystem::new(&theme.particles, size.x, size.y));
		let mut c = WiringContext {
			state: WiringState::new(&config, size, container_rect(container)),
			theme,
			particles,
			canvas: canvas.clone(),
			ctx,
		};
		measure(&mut c, container_rect(container));
		layouts.set(c.state.layouts());
		*context_init.borrow_mut() = Some(c);
		info!("rope-wiring: overlay mounted at {}x{}", size.x, size.y);

		let context_relayout = context_init.clone();
		*relayout_cb_init.borrow_mut() = Some(Closure::new(move || {
			let size = viewport_size(&web_sys::window().unwrap());
			if let Some(ref mut c) = *context_relayout.borrow_mut() {
				c.canvas.set_width(size.x as u32);
				c.canvas.set_height(size.y as u32);
				c.state.dispatch(WiringCommand::Resize {
					width: size.x,
					height: size.y,
				});
				if let Some(ref mut ps) = c.particles {
					ps.resize(size.x, size.y);
				}
				measure(c, container_rect(container));
				layouts.set(c.state.layouts());
				c.redraw();
			}
		}));
		if let Some(ref cb) = *relayout_cb_init.borrow() {
			for event in ["resize", "scroll"] {
				let _ = window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = 0.016;
				if c.state.needs_measure() {
					measure(c, container_rect(container));
					layouts.set(c.state.layouts());
				}
				c.state.tick(dt);
				if let Some(ref mut ps) = c.particles {
					ps.update(dt);
				}
				c.redraw();
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_act = context.clone();
	Effect::new(move |_| {
		let Some(node) = activate.get() else {
			return;
		};
		dispatch(&context_act, layouts, WiringCommand::Activate { node });
	});

	let nodes = descriptors
		.into_iter()
		.map(|desc| {
			let id = desc.id.clone();
			let (id_style, id_class) = (id.clone(), id.clone());
			let style = move || {
				layouts.with(|all| node_style(all.iter().find(|l| l.id == id_style)))
			};
			let class = move || {
				layouts.with(|all| node_class(all.iter().find(|l| l.id == id_class)))
			};

			let (context_pd, id_pd) = (context.clone(), id.clone());
			let on_pointerdown = move |ev: PointerEvent| {
				if let Some(el) = event_element(&ev) {
					let _ = el.set_pointer_capture(ev.pointer_id());
				}
				dispatch(
					&context_pd,
					layouts,
					WiringCommand::PointerDown {
						node: id_pd.clone(),
						pointer_id: ev.pointer_id(),
						x: ev.client_x() as f64,
						y: ev.client_y() as f64,
						time_ms: ev.time_stamp(),
					},
				);
			};

			let (context_pm, id_pm) = (context.clone(), id.clone());
			let on_pointermove = move |ev: PointerEvent| {
				dispatch(
					&context_pm,
					layouts,
					WiringCommand::PointerMove {
						node: id_pm.clone(),
						pointer_id: ev.pointer_id(),
						x: ev.client_x() as f64,
						y: ev.client_y() as f64,
						time_ms: ev.time_stamp(),
					},
				);
			};

			let (context_pu, id_pu) = (context.clone(), id.clone());
			let on_pointerup = move |ev: PointerEvent| {
				if let Some(el) = event_element(&ev) {
					let _ = el.release_pointer_capture(ev.pointer_id());
				}
				let command = WiringCommand::PointerUp {
					node: id_pu.clone(),
					pointer_id: ev.pointer_id(),
				};
				if let Outcome::Released { .. } = dispatch(&context_pu, layouts, command) {
					// The click that follows this pointer-up must still see the flag.
					let (context_settle, node) = (context_pu.clone(), id_pu.clone());
					set_timeout(
						move || {
							dispatch(&context_settle, layouts, WiringCommand::SettleMoved { node });
						},
						Duration::ZERO,
					);
				}
			};

			let (context_pc, id_pc) = (context.clone(), id.clone());
			let on_pointercancel = move |ev: PointerEvent| {
				dispatch(
					&context_pc,
					layouts,
					WiringCommand::PointerCancel {
						node: id_pc.clone(),
						pointer_id: ev.pointer_id(),
					},
				);
			};

			let (context_click, id_click) = (context.clone(), id.clone());
			let on_click = move |_: MouseEvent| {
				let command = WiringCommand::Click {
					node: id_click.clone(),
				};
				if let Outcome::Prompt(prompt) = dispatch(&context_click, layouts, command) {
					on_prompt.run(prompt);
				}
			};

			view! {
				<button
					type="button"
					id=node_dom_id(&id)
					class=class
					data-side=desc.side.as_str()
					style=style
					on:pointerdown=on_pointerdown
					on:pointermove=on_pointermove
					on:pointerup=on_pointerup
					on:pointercancel=on_pointercancel
					on:click=on_click
				>
					{desc.label}
				</button>
			}
		})
		.collect_view();

	view! {
		<canvas
			node_ref=canvas_ref
			class="rope-wiring-canvas"
			style="position: fixed; inset: 0; z-index: 0; display: block; pointer-events: none;"
		/>
		<div class="rope-wiring-nodes">{nodes}</div>
	}
}
