//! Fractal tree growth and geometry library.
//!
//! Main components:
//! - [`node`]: points with the polar offset used to grow branches.
//! - [`config`]: tree parameters and named presets.
//! - [`tree`]: the per-level node storage and the grow step.
//! - [`geometry`]: bounding box, size, branch list and closed-form counts.
//! - [`render`]: the [`render::Canvas`] adapter trait and age-based styling.
//! - [`vector`]: an SVG [`render::Canvas`].
//! - [`error`]: the crate error type.
//! - [`types`]: shared geometric value types.

pub mod config;
pub mod error;
pub mod geometry;
pub mod node;
pub mod render;
pub mod tree;
pub mod types;
pub mod vector;

pub use config::{Origin, Sigma, TreeConfig};
pub use error::{Result, TreeError};
pub use node::Node;
pub use render::{BranchStyle, Canvas, ColorSpec, Rgb, draw_tree};
pub use tree::Tree;
pub use types::{Age, Rect, Segment};
pub use vector::SvgCanvas;
