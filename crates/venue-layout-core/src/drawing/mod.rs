//! Hand-drawn venue geometry: the boundary rectangle and line paths.

pub mod boundary;
pub mod handles;
pub mod lines;
pub mod paths;

pub use boundary::{boundary_from_drag, move_boundary, resize_boundary};
pub use handles::{Corner, Edge, Handle, ResizeHandle, boundary_handles, hit_test_edge, hit_test_handles};
pub use lines::{
    hit_test_endpoint, hit_test_segment, line_from_drag, move_endpoint, point_to_segment_dist,
    translate_lines,
};
pub use paths::{PathIndex, new_line_id, new_path_id};
