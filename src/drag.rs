//! Modal drag controller
//!
//! A drag is exclusive: once started, every other mutating entry point fails
//! with [`DockError::DragInProgress`] until the drag is dropped or cancelled.
//! Nothing moves while tracking; the tree is only touched at drop time, so
//! cancellation unwinds with zero mutation.

use tracing::{debug, trace};

use crate::error::DockError;
use crate::events::DockEvent;
use crate::geometry::{Point, Rect};
use crate::hit_test::{DropTarget, DropZones};
use crate::model::{
    ControlId, DockSite, DockSpace, HostId, PaneId, DEFAULT_FLOAT_BOUNDS,
};

#[derive(Debug)]
pub(crate) struct DragState {
    pub control: ControlId,
    source_pane: Option<PaneId>,
    source_index: Option<usize>,
    /// Hit-testing order: floating windows topmost first, main container last
    zones: Vec<DropZones>,
    ghost: Rect,
    current: Option<DropTarget>,
}

impl DockSpace {
    /// Begin dragging a control. Auto-hide flyouts retract (they are not
    /// valid targets), the current geometry of every host is snapshotted,
    /// and the source tab is excluded from targeting. The tree itself stays
    /// untouched until [`drop_drag`](DockSpace::drop_drag).
    pub fn start_drag(
        &mut self,
        control: ControlId,
        main_rect: Rect,
        point: Point,
    ) -> Result<(), DockError> {
        self.ensure_no_drag()?;
        self.ctl(control)?;

        self.retract_auto_hide();

        let source_pane = self.ctl(control)?.pane();
        let source_index =
            source_pane.and_then(|p| self.panes.get(&p).and_then(|pane| pane.index_of(control)));

        // Later-created windows stack above earlier ones.
        let mut zones = Vec::new();
        for (&id, window) in self.floating.iter().rev() {
            if !window.visible {
                continue;
            }
            let mut z = DropZones::build(self, HostId::Floating(id), window.bounds, false);
            z.exclude_tab(self, control);
            zones.push(z);
        }
        let mut main = DropZones::build(self, HostId::Main, main_rect, true);
        main.exclude_tab(self, control);
        zones.push(main);

        let ghost = Rect::new(
            point.x - DEFAULT_FLOAT_BOUNDS.width / 2.0,
            point.y,
            DEFAULT_FLOAT_BOUNDS.width,
            DEFAULT_FLOAT_BOUNDS.height,
        );

        debug!(?control, "drag started");
        self.drag = Some(DragState {
            control,
            source_pane,
            source_index,
            zones,
            ghost,
            current: None,
        });
        Ok(())
    }

    /// Track the cursor: move the ghost and re-resolve the drop target.
    /// Returns the current target, `None` meaning "float here".
    pub fn drag_move(&mut self, point: Point) -> Result<Option<DropTarget>, DockError> {
        let drag = self.drag.as_mut().ok_or(DockError::NoDrag)?;
        let target = drag.zones.iter().find_map(|z| z.hit(point));
        trace!(?point, ?target, "drag tracked");

        drag.ghost = Rect::new(
            point.x - drag.ghost.width / 2.0,
            point.y,
            drag.ghost.width,
            drag.ghost.height,
        );
        drag.current = target.clone();
        Ok(target)
    }

    /// Release the drag, materializing the move. No target (or an explicit
    /// float target) puts the item in a new floating window at the ghost's
    /// last position. The moved content ends up active.
    pub fn drop_drag(&mut self) -> Result<(), DockError> {
        let drag = self.drag.take().ok_or(DockError::NoDrag)?;
        debug!(control = ?drag.control, target = ?drag.current, "drag dropped");

        match drag.current {
            None | Some(DropTarget::Float) => {
                let window = self.create_floating(drag.ghost);
                self.add_to_host(
                    HostId::Floating(window),
                    drag.control,
                    None,
                    &[DockSite::Centre],
                )?;
            }
            Some(DropTarget::Dock {
                host,
                address,
                index,
            }) => {
                // Reordering within the same pane past the item's own prior
                // position: the detach shifts everything after it left one.
                let index = match (index, drag.source_pane, drag.source_index) {
                    (Some(i), Some(source), Some(from))
                        if self.pane_at(host, &address) == Some(source) && from < i =>
                    {
                        Some(i - 1)
                    }
                    (i, _, _) => i,
                };
                self.add_to_host(host, drag.control, index, &address)?;
            }
        }

        self.set_active_content(drag.control)?;
        self.flush_pending();
        Ok(())
    }

    /// Abandon the drag with zero tree mutation.
    pub fn cancel_drag(&mut self) -> Result<(), DockError> {
        let drag = self.drag.take().ok_or(DockError::NoDrag)?;
        debug!(control = ?drag.control, "drag cancelled");
        self.refresh_active();
        Ok(())
    }

    /// Current ghost rectangle, if a drag is in progress
    pub fn drag_ghost(&self) -> Option<Rect> {
        self.drag.as_ref().map(|d| d.ghost)
    }

    /// Current resolved drop target, if a drag is in progress
    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.drag.as_ref().and_then(|d| d.current.as_ref())
    }

    fn retract_auto_hide(&mut self) {
        let mut changes = Vec::new();
        for site in DockSite::EDGES {
            if let Some(panel) = &self.auto_hide[site] {
                if panel.popped_out {
                    changes.push(site);
                }
            }
        }
        for site in changes {
            if let Some(panel) = self.auto_hide[site].as_mut() {
                panel.popped_out = false;
            }
            self.push_event(DockEvent::AutoHidePopOutChanged {
                site,
                popped_out: false,
            });
        }
    }
}
