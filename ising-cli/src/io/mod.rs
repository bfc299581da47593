//! Input/Output for the Ising host
//!
//! This module handles logging setup and text rendering of lattice frames.

mod output;
mod render;

pub use output::{open_frames, setup_output};
pub use render::TextRenderer;
