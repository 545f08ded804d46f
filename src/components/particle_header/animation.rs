//! Lifecycle and frame loop for one header's particle background.
//!
//! [`HeaderAnimation::start`] binds to a canvas, sizes it to its parent,
//! watches the parent with a `ResizeObserver` and drives the field through
//! `requestAnimationFrame`. [`HeaderAnimation::stop`] tears all of that down.
//! State shared with the browser callbacks lives behind `Rc<RefCell<_>>`;
//! callbacks are serialized on the event loop so borrows never overlap.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ResizeObserver, Window};

use super::clock::FrameClock;
use super::field::ParticleField;
use super::render;
use super::style::FieldStyle;
use super::surface::SurfaceSize;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Everything the running loop mutates. Exists only between start and stop.
struct Scene {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	field: ParticleField,
	clock: FrameClock,
}

impl Scene {
	/// Matches the backing buffer to the parent's size and reseeds the field.
	fn resize(&mut self, window: &Window) {
		let (width, height) = logical_size(&self.canvas);
		let size = SurfaceSize::measure(
			width,
			height,
			window.device_pixel_ratio(),
			self.field.style().max_pixel_ratio,
		);

		self.canvas.set_width(size.buffer_width);
		self.canvas.set_height(size.buffer_height);
		let css = self.canvas.style();
		let _ = css.set_property("width", &format!("{}px", size.logical_width));
		let _ = css.set_property("height", &format!("{}px", size.logical_height));
		// Resizing the buffer resets the context, so the transform goes last.
		let _ = self
			.ctx
			.set_transform(size.ratio, 0.0, 0.0, size.ratio, 0.0, 0.0);

		self.field
			.seed(&mut rand::thread_rng(), size.logical_width, size.logical_height);
		debug!(
			"particle-header: resized to {}x{} @{}x, {} particles",
			size.logical_width,
			size.logical_height,
			size.ratio,
			self.field.particles.len()
		);
	}

	fn frame(&mut self, now_ms: f64) {
		let dt = self.clock.tick(now_ms);
		self.field.update(dt);
		render::render(
			&self.ctx,
			&self.field,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
	}
}

/// Drives the particle background of a single header instance.
pub struct HeaderAnimation {
	style: FieldStyle,
	scene: Rc<RefCell<Option<Scene>>>,
	animate: Rc<RefCell<Option<FrameCallback>>>,
	frame_id: Rc<Cell<Option<i32>>>,
	frames: Rc<Cell<u64>>,
	observer: Option<ResizeObserver>,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

impl HeaderAnimation {
	pub fn new(style: FieldStyle) -> Self {
		Self {
			style,
			scene: Rc::new(RefCell::new(None)),
			animate: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
			frames: Rc::new(Cell::new(0)),
			observer: None,
			resize_cb: None,
		}
	}

	/// Whether a scene is bound: start succeeded, and neither stop nor a
	/// detached canvas has ended the loop since.
	pub fn is_running(&self) -> bool {
		self.scene.borrow().is_some()
	}

	/// Whether a frame request is waiting on the browser.
	pub fn has_pending_frame(&self) -> bool {
		self.frame_id.get().is_some()
	}

	/// Frames painted since the last successful start.
	pub fn frames_drawn(&self) -> u64 {
		self.frames.get()
	}

	/// Starts animating `canvas`. Without a 2D context the header simply has
	/// no background; nothing is reported to the caller. Calling this on a
	/// running animation does nothing. A canvas that is not in the document
	/// is not animated; once it is attached, `start` can be called again.
	pub fn start(&mut self, canvas: HtmlCanvasElement) {
		if self.is_running() {
			return;
		}
		// Drops whatever a loop that ended on a detached canvas left behind.
		self.stop();

		if !canvas.is_connected() {
			debug!("particle-header: canvas not in document, not starting");
			return;
		}
		let Some(window) = web_sys::window() else {
			debug!("particle-header: no window, background disabled");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			debug!("particle-header: 2d context unavailable, background disabled");
			return;
		};

		let mut scene = Scene {
			canvas: canvas.clone(),
			ctx,
			field: ParticleField::new(self.style.clone()),
			clock: FrameClock::new(self.style.max_frame_step),
		};
		scene.resize(&window);
		*self.scene.borrow_mut() = Some(scene);

		self.observe(&canvas);

		if let Some(ref mut scene) = *self.scene.borrow_mut() {
			let (width, height) = scene.field.bounds();
			scene.field.clear();
			scene.field.seed(&mut rand::thread_rng(), width, height);
			scene.clock.reset(now_ms(&window));
		}

		self.frames.set(0);
		self.run_loop();
		info!("particle-header: animation started");
	}

	/// Cancels the pending frame, disconnects the resize observer and drops
	/// the scene. Safe to call any number of times, started or not.
	pub fn stop(&mut self) {
		if let Some(id) = self.frame_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		if let Some(observer) = self.observer.take() {
			observer.disconnect();
		}
		self.resize_cb = None;
		// Breaks the closure's reference back to its own slot.
		self.animate.borrow_mut().take();

		if self.scene.borrow_mut().take().is_some() {
			info!(
				"particle-header: animation stopped after {} frames",
				self.frames.get()
			);
		}
	}

	fn observe(&mut self, canvas: &HtmlCanvasElement) {
		let Some(parent) = canvas.parent_element() else {
			debug!("particle-header: canvas has no parent, size is fixed");
			return;
		};

		let scene = self.scene.clone();
		let cb = Closure::<dyn FnMut()>::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref mut s) = *scene.borrow_mut() {
				s.resize(&window);
			}
		});

		match ResizeObserver::new(cb.as_ref().unchecked_ref::<js_sys::Function>()) {
			Ok(observer) => {
				observer.observe(&parent);
				self.observer = Some(observer);
				self.resize_cb = Some(cb);
			}
			Err(e) => warn!("particle-header: ResizeObserver unavailable: {:?}", e),
		}
	}

	fn run_loop(&mut self) {
		let (scene, animate, frame_id, frames) = (
			self.scene.clone(),
			self.animate.clone(),
			self.frame_id.clone(),
			self.frames.clone(),
		);

		*self.animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			frame_id.set(None);
			{
				let mut guard = scene.borrow_mut();
				// Stopped between scheduling and firing.
				let Some(s) = guard.as_mut() else {
					return;
				};
				if !s.canvas.is_connected() {
					// Ends the animation; a later start binds afresh.
					debug!("particle-header: canvas detached, stopping");
					*guard = None;
					return;
				}
				s.frame(now);
				frames.set(frames.get() + 1);
			}
			request_frame(&animate, &frame_id);
		}));

		request_frame(&self.animate, &self.frame_id);
	}
}

impl Drop for HeaderAnimation {
	fn drop(&mut self) {
		self.stop();
	}
}

fn request_frame(animate: &RefCell<Option<FrameCallback>>, frame_id: &Cell<Option<i32>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *animate.borrow() {
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(id) => frame_id.set(Some(id)),
			Err(e) => warn!("particle-header: requestAnimationFrame failed: {:?}", e),
		}
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	let ctx = canvas.get_context("2d").ok()??;
	ctx.dyn_into().ok()
}

/// Size of the container the canvas covers, in CSS pixels.
fn logical_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	match canvas.parent_element() {
		Some(parent) => (parent.client_width() as f64, parent.client_height() as f64),
		None => (canvas.client_width() as f64, canvas.client_height() as f64),
	}
}

fn now_ms(window: &Window) -> f64 {
	window.performance().map(|p| p.now()).unwrap_or(0.0)
}
