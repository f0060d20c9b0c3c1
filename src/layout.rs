//! Rectangle computation: turning a host tree plus a container rect into
//! screen-space pane, tab, and splitter rectangles.
//!
//! Pure with respect to the space: computing a layout mutates nothing, so the
//! embedder can lay out per frame. Sizes come from each branch's
//! [`DockSizeData`], resolved against the branch rect with the centre floor.

use crate::geometry::Rect;
use crate::model::{
    BranchId, ControlId, DockSite, DockSizeData, DockSpace, HostId, PaneId, SlotNode,
    MIN_CENTRE_SIZE,
};

pub const SPLITTER_WIDTH: f32 = 6.0;
pub const TITLE_HEIGHT: f32 = 24.0;
pub const TAB_HEIGHT: f32 = 22.0;
pub const TAB_WIDTH: f32 = 96.0;

/// Screen regions of one pane
#[derive(Debug, Clone)]
pub struct PaneLayout {
    pub pane: PaneId,
    pub rect: Rect,
    /// Grab/activation strip along the top
    pub title_bar: Rect,
    /// Tab strip under the title bar; zero-height when the pane holds at
    /// most one item
    pub tab_strip: Rect,
    pub tabs: Vec<(ControlId, Rect)>,
    pub body: Rect,
}

/// A draggable divider between a branch's edge region and its remainder
#[derive(Debug, Clone, Copy)]
pub struct SplitterBar {
    pub branch: BranchId,
    pub site: DockSite,
    pub rect: Rect,
}

/// Complete geometry of one host for a frame
#[derive(Debug, Clone)]
pub struct HostLayout {
    pub host: HostId,
    pub rect: Rect,
    pub panes: Vec<PaneLayout>,
    pub splitters: Vec<SplitterBar>,
}

impl DockSpace {
    /// Replace a branch's size data, as when the embedder finishes a
    /// splitter drag.
    pub fn set_branch_sizes(
        &mut self,
        branch: BranchId,
        sizes: DockSizeData,
    ) -> Result<(), crate::error::DockError> {
        self.ensure_no_drag()?;
        self.branches
            .get_mut(&branch)
            .ok_or(crate::error::DockError::UnknownBranch(branch))?
            .sizes = sizes;
        Ok(())
    }

    /// Compute the full geometry of a host within `rect`.
    pub fn compute_layout(&self, host: HostId, rect: Rect) -> HostLayout {
        let mut layout = HostLayout {
            host,
            rect,
            panes: Vec::new(),
            splitters: Vec::new(),
        };
        if let Ok(root) = self.root_of(host) {
            self.layout_branch(root, rect, &mut layout);
        }
        layout
    }

    fn layout_branch(&self, branch_id: BranchId, rect: Rect, out: &mut HostLayout) {
        let Some(branch) = self.branch(branch_id) else {
            return;
        };
        let resolved = branch
            .sizes()
            .resolve(rect.width, rect.height, MIN_CENTRE_SIZE);

        // Edge regions carve in a fixed order: left and right take full
        // height, top and bottom span what remains, centre gets the rest.
        // Each occupied edge also carves one splitter bar.
        let mut x0 = rect.x;
        let mut x1 = rect.x + rect.width;
        let mut y0 = rect.y;
        let mut y1 = rect.y + rect.height;

        if let Some(node) = branch.child(DockSite::Left) {
            let w = resolved.left.min((x1 - x0 - SPLITTER_WIDTH).max(0.0));
            self.layout_node(node, Rect::new(x0, y0, w, y1 - y0), out);
            out.splitters.push(SplitterBar {
                branch: branch_id,
                site: DockSite::Left,
                rect: Rect::new(x0 + w, y0, SPLITTER_WIDTH, y1 - y0),
            });
            x0 += w + SPLITTER_WIDTH;
        }
        if let Some(node) = branch.child(DockSite::Right) {
            let w = resolved.right.min((x1 - x0 - SPLITTER_WIDTH).max(0.0));
            self.layout_node(node, Rect::new(x1 - w, y0, w, y1 - y0), out);
            out.splitters.push(SplitterBar {
                branch: branch_id,
                site: DockSite::Right,
                rect: Rect::new(x1 - w - SPLITTER_WIDTH, y0, SPLITTER_WIDTH, y1 - y0),
            });
            x1 -= w + SPLITTER_WIDTH;
        }
        if let Some(node) = branch.child(DockSite::Top) {
            let h = resolved.top.min((y1 - y0 - SPLITTER_WIDTH).max(0.0));
            self.layout_node(node, Rect::new(x0, y0, x1 - x0, h), out);
            out.splitters.push(SplitterBar {
                branch: branch_id,
                site: DockSite::Top,
                rect: Rect::new(x0, y0 + h, x1 - x0, SPLITTER_WIDTH),
            });
            y0 += h + SPLITTER_WIDTH;
        }
        if let Some(node) = branch.child(DockSite::Bottom) {
            let h = resolved.bottom.min((y1 - y0 - SPLITTER_WIDTH).max(0.0));
            self.layout_node(node, Rect::new(x0, y1 - h, x1 - x0, h), out);
            out.splitters.push(SplitterBar {
                branch: branch_id,
                site: DockSite::Bottom,
                rect: Rect::new(x0, y1 - h - SPLITTER_WIDTH, x1 - x0, SPLITTER_WIDTH),
            });
            y1 -= h + SPLITTER_WIDTH;
        }
        if let Some(node) = branch.child(DockSite::Centre) {
            self.layout_node(
                node,
                Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0)),
                out,
            );
        }
    }

    fn layout_node(&self, node: SlotNode, rect: Rect, out: &mut HostLayout) {
        match node {
            SlotNode::Branch(b) => self.layout_branch(b, rect, out),
            SlotNode::Pane(p) => {
                if let Some(layout) = self.layout_pane(p, rect) {
                    out.panes.push(layout);
                }
            }
        }
    }

    fn layout_pane(&self, pane_id: PaneId, rect: Rect) -> Option<PaneLayout> {
        let pane = self.pane(pane_id)?;
        let title_bar = Rect::new(rect.x, rect.y, rect.width, TITLE_HEIGHT.min(rect.height));

        let show_tabs = pane.len() > 1;
        let tab_strip = if show_tabs {
            Rect::new(
                rect.x,
                rect.y + title_bar.height,
                rect.width,
                TAB_HEIGHT.min((rect.height - title_bar.height).max(0.0)),
            )
        } else {
            Rect::new(rect.x, rect.y + title_bar.height, rect.width, 0.0)
        };

        let mut tabs = Vec::new();
        if show_tabs {
            let count = pane.len() as f32;
            let tab_width = TAB_WIDTH.min(rect.width / count.max(1.0));
            for (i, &control) in pane.contents().iter().enumerate() {
                tabs.push((
                    control,
                    Rect::new(
                        rect.x + i as f32 * tab_width,
                        tab_strip.y,
                        tab_width,
                        tab_strip.height,
                    ),
                ));
            }
        }

        let body_top = tab_strip.y + tab_strip.height;
        let body = Rect::new(
            rect.x,
            body_top,
            rect.width,
            (rect.y + rect.height - body_top).max(0.0),
        );

        Some(PaneLayout {
            pane: pane_id,
            rect,
            title_bar,
            tab_strip,
            tabs,
            body,
        })
    }
}
