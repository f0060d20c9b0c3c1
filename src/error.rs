//! Library error type
//!
//! Programmer-misuse failures (unknown ids, double-docking, operating during a
//! drag) surface as `Err` immediately. Expected no-ops (removing absent
//! content, re-activating the active item) are silent successes and never
//! appear here. Persistence failures are caught at the document boundary and
//! leave the in-memory tree unchanged.

use thiserror::Error;

use crate::model::{BranchId, ControlId, PaneId};

#[derive(Debug, Error)]
pub enum DockError {
    #[error("unknown control {0:?}")]
    UnknownControl(ControlId),

    #[error("unknown pane {0:?}")]
    UnknownPane(PaneId),

    #[error("unknown branch {0:?}")]
    UnknownBranch(BranchId),

    #[error("no floating window with id {0}")]
    UnknownFloatingWindow(u32),

    #[error("control {0:?} is already docked in pane {1:?}")]
    AlreadyInPane(ControlId, PaneId),

    #[error("control {0:?} is not a member of pane {1:?}")]
    NotInPane(ControlId, PaneId),

    #[error("control {0:?} is not attached to any pane")]
    Detached(ControlId),

    #[error("a drag is already in progress")]
    DragInProgress,

    #[error("no drag in progress")]
    NoDrag,

    #[error("invalid location descriptor {0:?}")]
    BadLocation(String),

    #[error("corrupt layout tree: {0}")]
    Corrupted(String),

    #[error("layout document i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("layout document parse: {0}")]
    Parse(#[from] serde_json::Error),
}
