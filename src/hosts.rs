//! Host-level operations: floating windows, auto-hide round trips, and
//! bringing registered content back on screen.
//!
//! Float / unfloat / auto-hide / restore are all expressed as "recall the
//! last address for the target host kind, then re-add there", so content
//! returns to where the user last had it.

use tracing::debug;

use crate::error::DockError;
use crate::events::DockEvent;
use crate::geometry::Rect;
use crate::model::{
    ControlId, DockSite, DockSpace, FloatingWindow, HostId, HostKind, PaneId, DEFAULT_FLOAT_BOUNDS,
};

impl DockSpace {
    // =========================================================================
    // Floating windows
    // =========================================================================

    /// Create an empty floating window and return its runtime id. Ids are
    /// never reused within a session.
    pub fn create_floating(&mut self, bounds: Rect) -> u32 {
        let id = self.next_floating_id;
        self.next_floating_id += 1;
        let root = self.new_host_root(HostId::Floating(id));
        self.floating.insert(
            id,
            FloatingWindow {
                id,
                root,
                bounds,
                visible: true,
            },
        );
        debug!(id, ?bounds, "floating window created");
        self.push_event(DockEvent::FloatingWindowCreated { id, bounds });
        id
    }

    pub fn set_floating_bounds(&mut self, id: u32, bounds: Rect) -> Result<(), DockError> {
        self.floating
            .get_mut(&id)
            .ok_or(DockError::UnknownFloatingWindow(id))?
            .bounds = bounds;
        self.push_event(DockEvent::FloatingWindowBoundsChanged { id, bounds });
        Ok(())
    }

    /// Show or hide a floating window without touching its tree.
    pub fn set_floating_visible(&mut self, id: u32, visible: bool) -> Result<(), DockError> {
        self.floating
            .get_mut(&id)
            .ok_or(DockError::UnknownFloatingWindow(id))?
            .visible = visible;
        Ok(())
    }

    /// Whether a control currently lives in a floating window
    pub fn is_floating(&self, control: ControlId) -> bool {
        self.host_of(control)
            .is_some_and(|h| h.kind() == HostKind::Floating)
    }

    /// Whether a control currently lives in an auto-hide panel
    pub fn is_auto_hidden(&self, control: ControlId) -> bool {
        self.host_of(control)
            .is_some_and(|h| h.kind() == HostKind::AutoHide)
    }

    pub fn host_of(&self, control: ControlId) -> Option<HostId> {
        let pane = self.controls.get(&control)?.pane()?;
        Some(self.panes.get(&pane)?.host())
    }

    /// Float or unfloat a control. Floating moves it to its last floating
    /// address (creating a fresh window if that window is gone); unfloating
    /// returns it to its last main address. Already-there is a silent no-op.
    pub fn set_floating(&mut self, control: ControlId, floating: bool) -> Result<(), DockError> {
        self.ensure_no_drag()?;
        self.ctl(control)?;
        if self.is_floating(control) == floating {
            return Ok(());
        }

        if floating {
            let recalled = self.recall(control, HostKind::Floating);
            let window = recalled
                .floating_window
                .filter(|id| self.floating.contains_key(id))
                .unwrap_or_else(|| self.create_floating(DEFAULT_FLOAT_BOUNDS));
            let pane = self.add_to_host(
                HostId::Floating(window),
                control,
                Some(recalled.index),
                &recalled.address,
            )?;
            self.set_active_pane(Some(pane));
        } else {
            let recalled = self.recall(control, HostKind::Main);
            let pane = self.add_to_host(
                HostId::Main,
                control,
                Some(recalled.index),
                &recalled.address,
            )?;
            self.set_active_pane(Some(pane));
        }
        Ok(())
    }

    // =========================================================================
    // Auto-hide
    // =========================================================================

    /// Move a control into an edge auto-hide panel, or back to its last main
    /// address. The target edge is the last remembered one, falling back to
    /// the control's default location, then Left.
    pub fn set_auto_hidden(&mut self, control: ControlId, hidden: bool) -> Result<(), DockError> {
        self.ensure_no_drag()?;
        self.ctl(control)?;
        if self.is_auto_hidden(control) == hidden {
            return Ok(());
        }

        if hidden {
            let recalled = self.recall(control, HostKind::AutoHide);
            let site = recalled.auto_hide_site.unwrap_or(DockSite::Left);
            self.add_to_host(
                HostId::AutoHide(site),
                control,
                Some(recalled.index),
                &[DockSite::Centre],
            )?;
            // Collapsed until activated.
        } else {
            let recalled = self.recall(control, HostKind::Main);
            let pane = self.add_to_host(
                HostId::Main,
                control,
                Some(recalled.index),
                &recalled.address,
            )?;
            self.set_active_pane(Some(pane));
        }
        Ok(())
    }

    // =========================================================================
    // Showing content
    // =========================================================================

    /// Bring a registered control on screen and focus it: re-add it at its
    /// most recent address if detached, select its tab, activate its pane,
    /// and make its host visible (window shown, auto-hide popped out).
    pub fn find_and_show(&mut self, control: ControlId) -> Result<PaneId, DockError> {
        self.ensure_no_drag()?;
        self.ctl(control)?;

        let pane = match self.ctl(control)?.pane() {
            Some(pane) => pane,
            None => {
                let recalled = self.recall_last(control);
                let host = match recalled.host() {
                    HostId::Floating(id) if !self.floating.contains_key(&id) => HostId::Main,
                    host => host,
                };
                self.add_to_host(host, control, Some(recalled.index), &recalled.address)?
            }
        };

        self.set_active_content(control)?;

        match self.pane_ref(pane)?.host() {
            HostId::Floating(id) => {
                if let Some(window) = self.floating.get_mut(&id) {
                    window.visible = true;
                }
            }
            HostId::AutoHide(site) => {
                // Activation above already popped the panel out.
                debug!(%site, ?control, "auto-hide content shown");
            }
            HostId::Main => {}
        }
        Ok(pane)
    }
}
