//! UI components.

pub mod particle_header;
