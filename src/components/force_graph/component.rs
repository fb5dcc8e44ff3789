use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::render;
use super::state::GraphViewState;
use crate::layout::{Point, Viewport};
use crate::session::ActiveGraph;

/// Current size of the browser window, or 800x600 outside a browser.
pub fn window_viewport() -> Viewport {
	let Some(window) = web_sys::window() else {
		return Viewport::new(800.0, 600.0);
	};
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	Viewport::new(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

type Slot<T> = Rc<RefCell<Option<T>>>;

/// Cancels the pending frame and removes the resize listener, handing both
/// closures back to the caller.
fn detach(
	window: &Window,
	animate: &Slot<Closure<dyn FnMut(f64)>>,
	resize_cb: &Slot<Closure<dyn FnMut()>>,
	frame: &Cell<Option<i32>>,
) -> (Option<Closure<dyn FnMut(f64)>>, Option<Closure<dyn FnMut()>>) {
	if let Some(id) = frame.take() {
		let _ = window.cancel_animation_frame(id);
	}
	let resize_cb = resize_cb.borrow_mut().take();
	if let Some(cb) = resize_cb.as_ref() {
		let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
	(animate.borrow_mut().take(), resize_cb)
}

fn cursor(grabbing: bool, over_node: bool) -> &'static str {
	match (grabbing, over_node) {
		(true, _) => "grabbing",
		(false, true) => "pointer",
		(false, false) => "default",
	}
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Full-window canvas animating `active` until its simulation stops.
///
/// Clicking a leaf without dragging it hands the leaf's word to
/// `on_explore`.
#[component]
pub fn ForceGraphCanvas(active: ActiveGraph, on_explore: Callback<String>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(GraphViewState::new(active)));
	let animate: Slot<Closure<dyn FnMut(f64)>> = Rc::new(RefCell::new(None));
	let resize_cb: Slot<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (state_init, animate_init, resize_cb_init, frame_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), frame.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let viewport = state_init.borrow().viewport;
		canvas.set_width(viewport.width as u32);
		canvas.set_height(viewport.height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let mut s = state_resize.borrow_mut();
			if !s.is_running() {
				return;
			}
			let vp = window_viewport();
			canvas_resize.set_width(vp.width as u32);
			canvas_resize.set_height(vp.height as u32);
			s.resize(vp);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, frame_inner) =
			(state_init.clone(), animate_init.clone(), frame_init.clone());
		let last_frame = Cell::new(None::<f64>);
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			let dt = last_frame
				.replace(Some(now))
				.map_or(1.0 / 60.0, |prev| ((now - prev) / 1000.0).clamp(0.0, 0.25));
			{
				let mut s = state_anim.borrow_mut();
				if !s.is_running() {
					debug!("simulation stopped, ending animation loop");
					frame_inner.set(None);
					return;
				}
				s.tick(dt);
				render::render(&s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				frame_inner.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	// The closures live on the window past this component, so detach them
	// when the canvas unmounts. Dropping the frame closure also breaks its
	// self-reference.
	let teardown = SendWrapper::new((animate.clone(), resize_cb.clone(), frame.clone()));
	on_cleanup(move || {
		let (animate, resize_cb, frame) = teardown.take();
		if let Some(window) = web_sys::window() {
			drop(detach(&window, &animate, &resize_cb, &frame));
			debug!("force graph canvas unmounted");
		}
	});

	let point = move |ev: &MouseEvent| -> Option<Point> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		Some(canvas_point(&canvas, ev))
	};

	let set_cursor = move |grabbing: bool, over_node: bool| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = HtmlElement::style(&canvas).set_property("cursor", cursor(grabbing, over_node));
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = point(&ev) else {
			return;
		};
		if state_md.borrow_mut().press(p) {
			set_cursor(true, true);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = point(&ev) else {
			return;
		};
		let mut s = state_mm.borrow_mut();
		if s.drag.node_idx.is_some() {
			s.drag_to(p);
		} else {
			s.hover(p);
			set_cursor(false, s.hover.is_some());
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let picked = state_mu.borrow_mut().release();
		set_cursor(false, true);
		if let Some(word) = picked {
			on_explore.run(word);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.release();
		s.hover = None;
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}
