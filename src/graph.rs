//! Commit graph layout.
//!
//! [`assign_lanes`] places every commit of a children-first history on one of
//! [`MAX_LANES`] vertical lanes; [`build_rows`] turns that placement into the
//! per-row edge records a renderer draws; [`render_graph`] is the terminal
//! renderer.

pub mod lanes;
pub mod render;
pub mod rows;

pub use lanes::{assign_lanes, LaneLayout, MAX_LANES};
pub use render::{lane_color, render_graph};
pub use rows::{build_rows, EdgeShape, GraphEdge, GraphRow};
