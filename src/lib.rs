//! dockspace - dockable window layout management
//!
//! A recursive five-way layout tree that arranges content panes across a
//! main container, floating windows, and edge-docked auto-hide panels, with
//! drag-and-drop targeting and JSON layout persistence. The crate is pure
//! state and geometry: the embedder owns the windows and widgets, registers
//! each piece of content once, and renders whatever [`DockSpace`] computes.

pub mod active;
pub mod drag;
pub mod error;
pub mod events;
pub mod geometry;
pub mod hosts;
pub mod layout;
pub mod location;
pub mod logging;
pub mod model;
pub mod persist;
pub mod tree;

// Re-export commonly used types
pub use error::DockError;
pub use events::DockEvent;
pub use geometry::{Point, Rect};
pub use hit_test::{DropTarget, DropZones};
pub use layout::{HostLayout, PaneLayout, SplitterBar};
pub use location::DockLocation;
pub use model::{
    BranchId, ControlId, DockMask, DockSite, DockSizeData, DockSpace, HostId, HostKind, PaneId,
    SlotNode,
};
pub use persist::{LayoutDocument, LAYOUT_VERSION};
