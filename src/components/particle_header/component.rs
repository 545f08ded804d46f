//! Leptos component wrapping the particle header.
//!
//! The component lays a decorative canvas behind its children. Once the
//! canvas is mounted an effect starts the [`HeaderAnimation`]; the owner's
//! cleanup stops it again when the header is unmounted.

use leptos::prelude::*;
use web_sys::HtmlCanvasElement;

use super::animation::HeaderAnimation;
use super::style::{CANVAS_CSS, FieldStyle, HEADER_CSS};

/// A full-width header with drifting, interconnected particles behind its
/// children.
///
/// The canvas is `aria-hidden` and ignores pointer events, so the projected
/// content behaves exactly as it would without the background.
#[component]
pub fn ParticleHeader(children: Children) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animation = StoredValue::new_local(HeaderAnimation::new(FieldStyle::default()));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		animation.update_value(|a| a.start(canvas));
	});

	on_cleanup(move || {
		let _ = animation.try_update_value(|a| a.stop());
	});

	view! {
		<div class="particle-header" style=HEADER_CSS>
			<canvas
				node_ref=canvas_ref
				class="particle-header-canvas"
				aria-hidden="true"
				style=CANVAS_CSS
			/>
			{children()}
		</div>
	}
}
