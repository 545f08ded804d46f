//! particle-header: Header banner with an animated particle background.
//!
//! This crate provides a WASM-based Leptos component that draws drifting,
//! interconnected particles on a canvas behind arbitrary header content,
//! plus a small demo page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

// Only referenced for its `js` feature, which wires randomness to the browser.
use getrandom as _;

pub mod components;

pub use components::particle_header::{FieldStyle, HeaderAnimation, ParticleHeader};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-header: logging initialized");
}

/// Demo host page: a single header with a greeting projected over it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let title = "particle-header-demo";

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Particle Header Demo" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleHeader>
			<h1>"Hello, " {title}</h1>
		</ParticleHeader>
	}
}
