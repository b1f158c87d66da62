//! Comparison charts
//!
//! Renders an SVG with three stacked panels: both note distributions, both
//! pitch contours, and the per-class agreement with the scores printed.

pub mod renderer;

pub use renderer::{render_comparison, visualize_comparison, ComparisonChart};
