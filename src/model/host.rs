//! Tree host descriptors: the main container, floating windows, auto-hide panels

use crate::geometry::Rect;

use super::branch::BranchId;
use super::site::DockSite;

/// Identity of a tree host. Every branch and pane records the host that owns
/// its tree, so cross-host moves are explicit detach/attach pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostId {
    Main,
    Floating(u32),
    AutoHide(DockSite),
}

impl HostId {
    pub fn kind(self) -> HostKind {
        match self {
            HostId::Main => HostKind::Main,
            HostId::Floating(_) => HostKind::Floating,
            HostId::AutoHide(_) => HostKind::AutoHide,
        }
    }
}

/// Host kind, used as the key of the per-control last-address cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    Main,
    Floating,
    AutoHide,
}

/// Default bounds for a floating window created without an explicit position
pub const DEFAULT_FLOAT_BOUNDS: Rect = Rect {
    x: 120.0,
    y: 120.0,
    width: 420.0,
    height: 320.0,
};

/// A lazily created top-level window holding its own dock tree.
/// Torn down by pruning once its tree holds no content.
#[derive(Debug, Clone)]
pub struct FloatingWindow {
    pub id: u32,
    pub root: BranchId,
    pub bounds: Rect,
    pub visible: bool,
}

/// An edge-docked panel hidden until its content is active, then popped out
/// over the main area. Its branch only ever uses the Centre slot.
#[derive(Debug, Clone)]
pub struct AutoHidePanel {
    pub site: DockSite,
    pub root: BranchId,
    pub popped_out: bool,
}
