//! Per-content docking adapter

use serde_json::Value;

use crate::location::DockLocation;

use super::pane::PaneId;

/// Unique identifier for a registered piece of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u64);

/// Docking state for one piece of content.
///
/// The control never owns the content's lifetime; it is the content owner's
/// handle into the layout. Whether a control is "floating" or "auto-hidden"
/// is derived from which tree host currently owns its pane, never stored.
#[derive(Debug, Clone)]
pub struct DockControl {
    pub id: ControlId,
    /// Layout key used to match saved entries on reload
    pub persist_name: String,
    /// Owner-supplied type tag, round-tripped through the layout document
    /// for the content factory
    pub type_name: String,
    /// Where this content docks when nothing has been remembered for a host
    pub default_location: DockLocation,
    /// Opaque owner-supplied blob, round-tripped through the layout document
    pub user_data: Option<Value>,
    /// The pane currently hosting this control, if attached
    pub(crate) pane: Option<PaneId>,
}

impl DockControl {
    /// The pane currently hosting this control, if any
    pub fn pane(&self) -> Option<PaneId> {
        self.pane
    }

    pub fn is_attached(&self) -> bool {
        self.pane.is_some()
    }
}
