//! Notifications drained by the embedding application
//!
//! The layout core never calls back into its owner; mutations enqueue events
//! and the embedder drains them once per loop turn with
//! [`DockSpace::take_events`](crate::model::DockSpace::take_events). This
//! keeps delivery order deterministic and the core testable.

use crate::geometry::Rect;
use crate::model::{ControlId, DockSite, PaneId};

#[derive(Debug, Clone, PartialEq)]
pub enum DockEvent {
    /// Content was closed by the user or the owner; the content itself is
    /// never disposed by the layout
    ContentClosed { control: ControlId },

    /// Content moved to a different pane (`None` = detached)
    ContentPaneChanged {
        control: ControlId,
        pane: Option<PaneId>,
    },

    /// Content gained or lost global activation
    ContentActiveChanged { control: ControlId, active: bool },

    /// The globally active pane changed
    ActivePaneChanged {
        old: Option<PaneId>,
        new: Option<PaneId>,
    },

    /// The globally active content changed
    ActiveContentChanged {
        old: Option<ControlId>,
        new: Option<ControlId>,
    },

    FloatingWindowCreated { id: u32, bounds: Rect },

    FloatingWindowBoundsChanged { id: u32, bounds: Rect },

    FloatingWindowClosed { id: u32 },

    /// An auto-hide panel popped out over the main area or slid back
    AutoHidePopOutChanged { site: DockSite, popped_out: bool },
}
