//! Particle header banner component.
//!
//! Renders a header whose background is a field of slowly drifting particles
//! on an HTML canvas, with faint lines joining neighbours:
//! - Particle count follows the header's area, within fixed bounds
//! - Constant-velocity drift that wraps around the edges
//! - Buffer scaled to the device pixel ratio, resized with the container
//! - One `requestAnimationFrame` loop per header, torn down on unmount
//!
//! # Example
//!
//! ```ignore
//! use particle_header::ParticleHeader;
//!
//! view! {
//!     <ParticleHeader>
//!         <h1>"Welcome"</h1>
//!     </ParticleHeader>
//! }
//! ```

mod animation;
mod clock;
mod component;
pub mod field;
pub mod render;
pub mod style;
pub mod surface;

pub use animation::HeaderAnimation;
pub use clock::FrameClock;
pub use component::ParticleHeader;
pub use field::{Particle, ParticleField};
pub use style::FieldStyle;
