//! Active-content tracking
//!
//! One pane (and through it, one control) is "active" across the whole space
//! at any time. Activation drives the auto-hide pop-out state: an auto-hide
//! pane's flyout shows exactly while that pane is active.

use tracing::trace;

use crate::error::DockError;
use crate::events::DockEvent;
use crate::model::{ControlId, DockSite, DockSpace, HostId, PaneId};

/// Active pane/content state plus the one-level history needed by
/// [`DockSpace::activate_previous`].
#[derive(Debug, Default)]
pub(crate) struct ActiveContentManager {
    pub active_pane: Option<PaneId>,
    pub previous_pane: Option<PaneId>,
    pub last_content: Option<ControlId>,
    /// Re-entrancy guard: activation changes from inside an activation
    /// change are ignored.
    pub changing: bool,
}

impl DockSpace {
    pub fn active_pane(&self) -> Option<PaneId> {
        self.active.active_pane
    }

    /// The visible content of the active pane
    pub fn active_content(&self) -> Option<ControlId> {
        self.active.last_content
    }

    /// Make a control the active content: its pane is brought to the
    /// visible tab and activated. Errs if the control is not attached
    /// anywhere.
    pub fn set_active_content(&mut self, control: ControlId) -> Result<(), DockError> {
        let pane_id = self.ctl(control)?.pane().ok_or(DockError::Detached(control))?;
        self.panes
            .get_mut(&pane_id)
            .ok_or(DockError::UnknownPane(pane_id))?
            .make_visible(control)?;
        self.set_active_pane(Some(pane_id));
        Ok(())
    }

    /// Change the active pane, emitting deactivation before activation and
    /// deriving the content-level change from the panes' visible items.
    pub fn set_active_pane(&mut self, pane: Option<PaneId>) {
        if self.active.changing {
            return;
        }
        self.active.changing = true;
        self.set_active_pane_inner(pane);
        self.active.changing = false;
    }

    fn set_active_pane_inner(&mut self, pane: Option<PaneId>) {
        let pane = pane.filter(|p| self.panes.contains_key(p));
        let old = self.active.active_pane;
        if old == pane {
            // Idempotent at the pane level, but the pane's visible tab may
            // have changed underneath us.
            self.sync_active_content();
            return;
        }

        self.active.previous_pane = old;
        self.active.active_pane = pane;
        trace!(?old, new = ?pane, "active pane changed");

        if let Some(visible) = old
            .and_then(|p| self.panes.get(&p))
            .and_then(|p| p.visible_content())
        {
            self.push_event(DockEvent::ContentActiveChanged {
                control: visible,
                active: false,
            });
        }
        if let Some(visible) = pane
            .and_then(|p| self.panes.get(&p))
            .and_then(|p| p.visible_content())
        {
            self.push_event(DockEvent::ContentActiveChanged {
                control: visible,
                active: true,
            });
        }
        self.push_event(DockEvent::ActivePaneChanged { old, new: pane });

        self.sync_active_content();
        self.update_auto_hide_popout();
    }

    /// Re-activate whatever pane was active before the current one. Silent
    /// no-op when the remembered pane no longer exists.
    pub fn activate_previous(&mut self) {
        let previous = self.active.previous_pane;
        if previous.is_some_and(|p| self.panes.contains_key(&p)) {
            self.set_active_pane(previous);
        }
    }

    /// Derive the content-level active change from pane state
    fn sync_active_content(&mut self) {
        let current = self
            .active
            .active_pane
            .and_then(|p| self.panes.get(&p))
            .and_then(|p| p.visible_content());
        let old = self.active.last_content;
        if old != current {
            self.active.last_content = current;
            self.push_event(DockEvent::ActiveContentChanged { old, new: current });
        }
    }

    /// Re-derive active bookkeeping after a structural change: a vanished
    /// active pane clears activation, otherwise the visible content and
    /// pop-out state are refreshed.
    pub(crate) fn refresh_active(&mut self) {
        let stale = self
            .active
            .active_pane
            .is_some_and(|p| !self.panes.contains_key(&p));
        if stale {
            self.set_active_pane(None);
            return;
        }
        if self
            .active
            .previous_pane
            .is_some_and(|p| !self.panes.contains_key(&p))
        {
            self.active.previous_pane = None;
        }
        self.sync_active_content();
        self.update_auto_hide_popout();
    }

    /// An auto-hide panel pops out exactly while a pane inside it is active.
    pub(crate) fn update_auto_hide_popout(&mut self) {
        let active_host = self
            .active
            .active_pane
            .and_then(|p| self.panes.get(&p))
            .map(|p| p.host());

        let mut changes = Vec::new();
        for site in DockSite::EDGES {
            let Some(panel) = &self.auto_hide[site] else {
                continue;
            };
            let popped_out = active_host == Some(HostId::AutoHide(site));
            if panel.popped_out != popped_out {
                changes.push((site, popped_out));
            }
        }
        for (site, popped_out) in changes {
            if let Some(panel) = self.auto_hide[site].as_mut() {
                panel.popped_out = popped_out;
            }
            self.push_event(DockEvent::AutoHidePopOutChanged { site, popped_out });
        }
    }

    /// Force an auto-hide panel's pop-out state, as when the user pins or
    /// clicks its strip tab. Popping out activates the panel's innermost
    /// pane so the derived state agrees.
    pub fn set_auto_hide_popped_out(
        &mut self,
        site: DockSite,
        popped_out: bool,
    ) -> Result<(), DockError> {
        let panel = self.auto_hide[site]
            .as_ref()
            .ok_or(DockError::Corrupted(format!(
                "auto-hide panel {site} does not exist"
            )))?;
        if panel.popped_out == popped_out {
            return Ok(());
        }
        if popped_out {
            let pane = self.pane_at(HostId::AutoHide(site), &[DockSite::Centre]);
            self.set_active_pane(pane);
        } else if self
            .active
            .active_pane
            .and_then(|p| self.panes.get(&p))
            .is_some_and(|p| p.host() == HostId::AutoHide(site))
        {
            self.set_active_pane(None);
        }
        // set_active_pane re-derives pop-out state and emits the event.
        Ok(())
    }
}
