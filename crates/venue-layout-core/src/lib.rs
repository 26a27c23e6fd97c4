//! Venue Layout Core Library
//!
//! Headless editing logic for venue floor plans: placing tables from a palette,
//! moving them with edge snapping, aligning and distributing selections, and
//! drawing the venue boundary and wall lines when no background image exists.
//!
//! Positions are stored as percentages of the canvas; table sizes stay in
//! unscaled pixels. [`CanvasMetrics`] converts between the two.

pub mod align;
pub mod config;
pub mod drag;
pub mod drawing;
pub mod editor;
pub mod error;
pub mod host;
pub mod input;
pub mod metrics;
pub mod model;
pub mod selection;
pub mod snap;
pub mod viewport;

pub use align::{AlignMode, SelectedPosition, align, distribute};
pub use config::EditorConfig;
pub use drag::{DragSession, PenContinuation};
pub use editor::{EditorMode, LayoutEditor};
pub use error::{LayoutError, LayoutResult};
pub use host::{LayoutHost, SaveTracker};
pub use input::{Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use metrics::CanvasMetrics;
pub use model::{
    DrawnVenueLayout, Endpoint, FloorPlan, Section, SectionPatch, TablePosition, TableShape,
    VenueBoundary, VenueLayout, VenueLine,
};
pub use selection::{Selection, TableKey};
pub use snap::{AlignmentGuide, Axis, GuideOrientation, SnapResult};
pub use viewport::Viewport;
