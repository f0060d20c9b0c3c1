//! Tree operations: the address walk, detach/close, pruning, validation
//!
//! Mutations follow a strict order: content hosted elsewhere is detached
//! first, then attached — never the reverse, so a control can never be
//! double-parented. Every edit bubbles a change notification from the edit
//! point up through its ancestors to the owning host, which refreshes the
//! registry and active-content bookkeeping.

use tracing::{debug, trace};

use crate::error::DockError;
use crate::events::DockEvent;
use crate::location::DockLocation;
use crate::model::{
    BranchId, ControlId, DockSite, DockSizeData, DockSpace, HostId, PaneId, SlotNode,
};

impl DockSpace {
    // =========================================================================
    // Adding content
    // =========================================================================

    /// Add content to the main container at the given address.
    /// See [`add_to_host`](DockSpace::add_to_host).
    pub fn add(
        &mut self,
        control: ControlId,
        index: Option<usize>,
        address: &[DockSite],
    ) -> Result<PaneId, DockError> {
        self.add_to_host(HostId::Main, control, index, address)
    }

    /// Add content to a host, walking the address site-by-site from the
    /// host's root branch.
    ///
    /// Intermediate branches are allocated as needed: half-splits when the
    /// walk passes an edge site, quarter-splits for nested centres. A pane
    /// occupying a slot with address remaining is demoted to the Centre of a
    /// freshly inserted branch so existing content is preserved. Once the
    /// address is exhausted, descent continues through any chain of
    /// Centre-held branches to the innermost non-branch slot, so repeated
    /// Centre-adds land in the innermost pane.
    ///
    /// An empty address is treated as `[Centre]`; auto-hide hosts only ever
    /// use their Centre slot, whatever the address says.
    pub fn add_to_host(
        &mut self,
        host: HostId,
        control: ControlId,
        index: Option<usize>,
        address: &[DockSite],
    ) -> Result<PaneId, DockError> {
        self.ensure_no_drag()?;
        self.ctl(control)?;

        // Detach first, attach second.
        self.detach_inner(control)?;

        let root = self.ensure_root(host)?;
        let centre_only = [DockSite::Centre];
        let address: &[DockSite] = match host {
            HostId::AutoHide(_) => &centre_only,
            _ if address.is_empty() => &centre_only,
            _ => address,
        };

        let pane_id = self.walk_address(host, root, address)?;

        self.panes
            .get_mut(&pane_id)
            .ok_or(DockError::UnknownPane(pane_id))?
            .insert(control, index)?;
        if let Some(ctl) = self.controls.get_mut(&control) {
            ctl.pane = Some(pane_id);
        }
        debug!(?control, ?host, ?pane_id, "content attached");
        self.push_event(DockEvent::ContentPaneChanged {
            control,
            pane: Some(pane_id),
        });

        let parent = self.pane_ref(pane_id)?.parent().map(|(b, _)| b);
        if let Some(branch) = parent {
            self.bubble_change(branch);
        }
        Ok(pane_id)
    }

    /// Resolve (and build) the pane at `address` below `root`
    fn walk_address(
        &mut self,
        host: HostId,
        root: BranchId,
        address: &[DockSite],
    ) -> Result<PaneId, DockError> {
        let mut cur = root;
        for (i, &site) in address.iter().enumerate() {
            let last = i + 1 == address.len();
            let slot = self.branch_ref(cur)?.child(site);

            if !last {
                cur = match slot {
                    None => {
                        let sizes = if site.is_edge() {
                            DockSizeData::halves()
                        } else {
                            DockSizeData::quarters()
                        };
                        let b = self.new_branch(host, Some((cur, site)), sizes);
                        if let Some(parent) = self.branches.get_mut(&cur) {
                            parent.set_child(site, Some(SlotNode::Branch(b)));
                        }
                        b
                    }
                    Some(SlotNode::Branch(b)) => b,
                    Some(SlotNode::Pane(p)) => self.demote_pane(cur, site, p),
                };
                continue;
            }

            // Final site.
            match slot {
                None => {
                    return Ok(self.new_pane(host, (cur, site)));
                }
                Some(SlotNode::Pane(p)) => return Ok(p),
                Some(SlotNode::Branch(b)) => {
                    // Descend through the Centre chain to the innermost
                    // non-branch slot.
                    let mut inner = b;
                    loop {
                        match self.branch_ref(inner)?.child(DockSite::Centre) {
                            Some(SlotNode::Branch(next)) => inner = next,
                            Some(SlotNode::Pane(p)) => return Ok(p),
                            None => {
                                return Ok(self.new_pane(host, (inner, DockSite::Centre)));
                            }
                        }
                    }
                }
            }
        }
        unreachable!("walk_address requires a non-empty address")
    }

    /// Demote the pane at `(branch, site)` into the Centre of a fresh branch
    /// inserted in its place; returns the new branch.
    fn demote_pane(&mut self, branch: BranchId, site: DockSite, pane: PaneId) -> BranchId {
        let host = self.panes[&pane].host;
        let b = self.new_branch(host, Some((branch, site)), DockSizeData::quarters());
        if let Some(parent) = self.branches.get_mut(&branch) {
            parent.set_child(site, Some(SlotNode::Branch(b)));
        }
        if let Some(fresh) = self.branches.get_mut(&b) {
            fresh.set_child(DockSite::Centre, Some(SlotNode::Pane(pane)));
        }
        if let Some(p) = self.panes.get_mut(&pane) {
            p.parent = Some((b, DockSite::Centre));
        }
        trace!(?pane, new_branch = ?b, "pane demoted to nested centre");
        b
    }

    // =========================================================================
    // Removing content
    // =========================================================================

    /// Detach a control from whatever pane hosts it. Detaching already
    /// detached content is a silent no-op. Never disposes the content.
    pub fn detach(&mut self, control: ControlId) -> Result<Option<PaneId>, DockError> {
        self.ensure_no_drag()?;
        self.detach_inner(control)
    }

    pub(crate) fn detach_inner(&mut self, control: ControlId) -> Result<Option<PaneId>, DockError> {
        let Some(pane_id) = self.ctl(control)?.pane else {
            return Ok(None);
        };

        // Remember the address before it disappears.
        if let Some(location) = self.location_of(control) {
            self.remember(control, location);
        }

        let parent = {
            let pane = self
                .panes
                .get_mut(&pane_id)
                .ok_or(DockError::UnknownPane(pane_id))?;
            pane.remove(control);
            pane.parent()
        };
        if let Some(ctl) = self.controls.get_mut(&control) {
            ctl.pane = None;
        }
        debug!(?control, ?pane_id, "content detached");
        self.push_event(DockEvent::ContentPaneChanged {
            control,
            pane: None,
        });
        self.request_prune();

        if let Some((branch, _)) = parent {
            self.bubble_change(branch);
        }
        Ok(Some(pane_id))
    }

    /// Close content: detach it and notify the owner. The registry keeps the
    /// control so it can be shown again later.
    pub fn close_content(&mut self, control: ControlId) -> Result<(), DockError> {
        self.ensure_no_drag()?;
        self.detach_inner(control)?;
        self.push_event(DockEvent::ContentClosed { control });
        Ok(())
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    /// Site address of a pane from its host root, root-first
    pub fn address_of_pane(&self, pane: PaneId) -> Option<Vec<DockSite>> {
        let (mut branch, site) = self.panes.get(&pane)?.parent()?;
        let mut address = vec![site];
        while let Some((up, up_site)) = self.branches.get(&branch)?.parent() {
            address.push(up_site);
            branch = up;
        }
        address.reverse();
        Some(address)
    }

    /// Current full location of an attached control
    pub fn location_of(&self, control: ControlId) -> Option<DockLocation> {
        let pane_id = self.controls.get(&control)?.pane?;
        let pane = self.panes.get(&pane_id)?;
        let index = pane.index_of(control)?;
        let address = self.address_of_pane(pane_id)?;
        Some(match pane.host() {
            HostId::Main => DockLocation::main(address, index),
            HostId::Floating(id) => DockLocation::floating(id, address, index),
            HostId::AutoHide(site) => DockLocation::auto_hide(site, index),
        })
    }

    /// Resolve an existing address to its pane without mutating anything,
    /// following Centre chains the way [`add_to_host`](DockSpace::add_to_host)
    /// would. Returns `None` when the chain does not reach a pane.
    pub fn pane_at(&self, host: HostId, address: &[DockSite]) -> Option<PaneId> {
        let root = self.root_of(host).ok()?;
        let centre_only = [DockSite::Centre];
        let address: &[DockSite] = if address.is_empty() {
            &centre_only
        } else {
            address
        };

        let mut cur = root;
        for (i, &site) in address.iter().enumerate() {
            let last = i + 1 == address.len();
            match self.branches.get(&cur)?.child(site) {
                None => return None,
                Some(SlotNode::Pane(p)) => {
                    return if last { Some(p) } else { None };
                }
                Some(SlotNode::Branch(b)) => {
                    if !last {
                        cur = b;
                        continue;
                    }
                    let mut inner = b;
                    loop {
                        match self.branches.get(&inner)?.child(DockSite::Centre) {
                            Some(SlotNode::Branch(next)) => inner = next,
                            Some(SlotNode::Pane(p)) => return Some(p),
                            None => return None,
                        }
                    }
                }
            }
        }
        None
    }

    /// Every pane of a host, depth-first in site order
    pub fn all_panes(&self, host: HostId) -> Vec<PaneId> {
        let Ok(root) = self.root_of(host) else {
            return Vec::new();
        };
        let mut panes = Vec::new();
        self.collect_panes(root, &mut panes);
        panes
    }

    fn collect_panes(&self, branch: BranchId, out: &mut Vec<PaneId>) {
        let Some(b) = self.branches.get(&branch) else {
            return;
        };
        for (_, node) in b.occupied() {
            match node {
                SlotNode::Pane(p) => out.push(p),
                SlotNode::Branch(inner) => self.collect_panes(inner, out),
            }
        }
    }

    /// Every control attached anywhere under a host
    pub fn controls_in_host(&self, host: HostId) -> Vec<ControlId> {
        self.all_panes(host)
            .into_iter()
            .flat_map(|p| {
                self.panes
                    .get(&p)
                    .map(|pane| pane.contents().to_vec())
                    .unwrap_or_default()
            })
            .collect()
    }

    // =========================================================================
    // Change bubbling
    // =========================================================================

    /// Walk from an edited branch up to its host, then let the host refresh
    /// registry and active-content bookkeeping. Deterministic
    /// child → parent → host order.
    pub(crate) fn bubble_change(&mut self, from: BranchId) {
        let mut cursor = from;
        let host = loop {
            let Some(branch) = self.branches.get(&cursor) else {
                return;
            };
            match branch.parent() {
                Some((up, _)) => cursor = up,
                None => break branch.host(),
            }
        };
        self.host_changed(host);
    }

    pub(crate) fn host_changed(&mut self, host: HostId) {
        // Registry bookkeeping: refresh the last-address cache for every
        // control attached under this host.
        let mut updates = Vec::new();
        for control in self.controls_in_host(host) {
            if let Some(location) = self.location_of(control) {
                updates.push((control, location));
            }
        }
        for (control, location) in updates {
            self.remember(control, location);
        }
        self.refresh_active();
    }

    // =========================================================================
    // Pruning
    // =========================================================================

    /// Run a prune pass immediately, regardless of the debounce flag.
    pub fn prune(&mut self) {
        self.prune_pending = false;
        self.prune_all();
    }

    /// One full prune pass over every host. Runs each host's pass to a fixed
    /// point, so an immediately repeated call changes nothing.
    pub(crate) fn prune_all(&mut self) {
        let mut hosts = vec![HostId::Main];
        hosts.extend(self.floating.keys().map(|id| HostId::Floating(*id)));
        hosts.extend(
            DockSite::EDGES
                .into_iter()
                .filter(|s| self.auto_hide[*s].is_some())
                .map(HostId::AutoHide),
        );

        for host in hosts {
            let Ok(root) = self.root_of(host) else {
                continue;
            };
            while self.prune_branch(root) {}
        }
        self.teardown_empty_floating();
        self.refresh_active();
    }

    /// Recursive prune of one branch. Depth-first: recurse into children;
    /// delete empty non-Centre panes; collapse any child branch with at most
    /// one descendant into that descendant; move a lone off-Centre child to
    /// Centre; replace an empty Centre pane with its only sibling; finally
    /// guarantee a Centre child exists. Returns whether anything changed.
    fn prune_branch(&mut self, branch_id: BranchId) -> bool {
        let mut changed = false;

        let child_branches: Vec<BranchId> = self
            .branches
            .get(&branch_id)
            .map(|b| {
                b.occupied()
                    .into_iter()
                    .filter_map(|(_, node)| match node {
                        SlotNode::Branch(id) => Some(id),
                        SlotNode::Pane(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        for child in child_branches {
            changed |= self.prune_branch(child);
        }

        // Empty non-Centre panes go away.
        for site in DockSite::EDGES {
            let empty_pane = match self.branches.get(&branch_id).and_then(|b| b.child(site)) {
                Some(SlotNode::Pane(p)) => self.panes.get(&p).is_some_and(|pane| pane.is_empty()),
                _ => false,
            };
            if empty_pane {
                if let Some(SlotNode::Pane(p)) =
                    self.branches.get(&branch_id).and_then(|b| b.child(site))
                {
                    self.panes.remove(&p);
                    if let Some(b) = self.branches.get_mut(&branch_id) {
                        b.set_child(site, None);
                    }
                    trace!(?p, %site, "empty pane pruned");
                    changed = true;
                }
            }
        }

        // Child branches with at most one descendant collapse into it.
        for site in DockSite::ALL {
            let Some(SlotNode::Branch(child)) =
                self.branches.get(&branch_id).and_then(|b| b.child(site))
            else {
                continue;
            };
            let occupied = match self.branches.get(&child) {
                Some(b) => b.occupied(),
                None => continue,
            };
            match occupied.len() {
                0 => {
                    self.branches.remove(&child);
                    if let Some(b) = self.branches.get_mut(&branch_id) {
                        b.set_child(site, None);
                    }
                    changed = true;
                }
                1 => {
                    let (_, node) = occupied[0];
                    self.branches.remove(&child);
                    if let Some(b) = self.branches.get_mut(&branch_id) {
                        b.set_child(site, Some(node));
                    }
                    self.relink(node, (branch_id, site));
                    trace!(collapsed = ?child, %site, "single-descendant branch collapsed");
                    changed = true;
                }
                _ => {}
            }
        }

        // A lone off-Centre child moves to Centre.
        if let Some(branch) = self.branches.get(&branch_id) {
            let occupied = branch.occupied();
            if occupied.len() == 1 && occupied[0].0 != DockSite::Centre {
                let (site, node) = occupied[0];
                if let Some(b) = self.branches.get_mut(&branch_id) {
                    b.set_child(site, None);
                    b.set_child(DockSite::Centre, Some(node));
                }
                self.relink(node, (branch_id, DockSite::Centre));
                changed = true;
            }
        }

        // An empty Centre pane with exactly one sibling yields Centre to it.
        let centre_empty_pane = match self
            .branches
            .get(&branch_id)
            .and_then(|b| b.child(DockSite::Centre))
        {
            Some(SlotNode::Pane(p)) => self
                .panes
                .get(&p)
                .is_some_and(|pane| pane.is_empty())
                .then_some(p),
            _ => None,
        };
        if let Some(centre_pane) = centre_empty_pane {
            let siblings: Vec<(DockSite, SlotNode)> = self
                .branches
                .get(&branch_id)
                .map(|b| {
                    b.occupied()
                        .into_iter()
                        .filter(|(site, _)| *site != DockSite::Centre)
                        .collect()
                })
                .unwrap_or_default();
            if siblings.len() == 1 {
                let (site, node) = siblings[0];
                self.panes.remove(&centre_pane);
                if let Some(b) = self.branches.get_mut(&branch_id) {
                    b.set_child(site, None);
                    b.set_child(DockSite::Centre, Some(node));
                }
                self.relink(node, (branch_id, DockSite::Centre));
                trace!(promoted = ?node, "sibling promoted into empty centre");
                changed = true;
            }
        }

        // Centre must exist.
        let needs_centre = self
            .branches
            .get(&branch_id)
            .is_some_and(|b| b.child(DockSite::Centre).is_none());
        if needs_centre {
            let host = self.branches[&branch_id].host();
            self.new_pane(host, (branch_id, DockSite::Centre));
            changed = true;
        }

        changed
    }

    fn relink(&mut self, node: SlotNode, parent: (BranchId, DockSite)) {
        match node {
            SlotNode::Pane(p) => {
                if let Some(pane) = self.panes.get_mut(&p) {
                    pane.parent = Some(parent);
                }
            }
            SlotNode::Branch(b) => {
                if let Some(branch) = self.branches.get_mut(&b) {
                    branch.parent = Some(parent);
                }
            }
        }
    }

    /// Floating windows whose trees emptied are torn down; their remaining
    /// nodes are disposed (content never is).
    fn teardown_empty_floating(&mut self) {
        let empty: Vec<u32> = self
            .floating
            .keys()
            .copied()
            .filter(|id| self.controls_in_host(HostId::Floating(*id)).is_empty())
            .collect();
        for id in empty {
            if let Some(window) = self.floating.remove(&id) {
                self.dispose_subtree(SlotNode::Branch(window.root));
                debug!(id, "empty floating window closed");
                self.push_event(DockEvent::FloatingWindowClosed { id });
            }
        }
    }

    /// Remove a subtree's nodes from the arenas. Controls are never disposed.
    pub(crate) fn dispose_subtree(&mut self, node: SlotNode) {
        match node {
            SlotNode::Pane(p) => {
                self.panes.remove(&p);
            }
            SlotNode::Branch(b) => {
                if let Some(branch) = self.branches.remove(&b) {
                    for (_, child) in branch.occupied() {
                        self.dispose_subtree(child);
                    }
                }
            }
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Diagnostic structural check over every host tree. Failure indicates a
    /// core bug, never a runtime condition to handle.
    pub fn validate(&self) -> Result<(), DockError> {
        let mut hosts = vec![HostId::Main];
        hosts.extend(self.floating.keys().map(|id| HostId::Floating(*id)));
        hosts.extend(
            DockSite::EDGES
                .into_iter()
                .filter(|s| self.auto_hide[*s].is_some())
                .map(HostId::AutoHide),
        );

        let mut seen_panes = std::collections::HashSet::new();
        let mut seen_branches = std::collections::HashSet::new();

        for host in hosts {
            let root = self.root_of(host)?;
            self.validate_branch(host, root, None, &mut seen_panes, &mut seen_branches)?;
        }
        Ok(())
    }

    fn validate_branch(
        &self,
        host: HostId,
        branch_id: BranchId,
        expected_parent: Option<(BranchId, DockSite)>,
        seen_panes: &mut std::collections::HashSet<PaneId>,
        seen_branches: &mut std::collections::HashSet<BranchId>,
    ) -> Result<(), DockError> {
        if !seen_branches.insert(branch_id) {
            return Err(DockError::Corrupted(format!(
                "branch {branch_id:?} reachable from two slots"
            )));
        }
        let branch = self.branch_ref(branch_id)?;
        if branch.parent() != expected_parent {
            return Err(DockError::Corrupted(format!(
                "branch {branch_id:?} parent link {:?} does not match slot {:?}",
                branch.parent(),
                expected_parent,
            )));
        }
        if branch.host() != host {
            return Err(DockError::Corrupted(format!(
                "branch {branch_id:?} recorded host {:?}, reached via {host:?}",
                branch.host(),
            )));
        }

        for (site, node) in branch.occupied() {
            match node {
                SlotNode::Branch(child) => {
                    self.validate_branch(
                        host,
                        child,
                        Some((branch_id, site)),
                        seen_panes,
                        seen_branches,
                    )?;
                }
                SlotNode::Pane(p) => {
                    if !seen_panes.insert(p) {
                        return Err(DockError::Corrupted(format!(
                            "pane {p:?} reachable from two slots"
                        )));
                    }
                    let pane = self.pane_ref(p)?;
                    if pane.parent() != Some((branch_id, site)) {
                        return Err(DockError::Corrupted(format!(
                            "pane {p:?} parent link {:?} does not match slot ({branch_id:?}, {site})",
                            pane.parent(),
                        )));
                    }
                    if pane.host() != host {
                        return Err(DockError::Corrupted(format!(
                            "pane {p:?} recorded host {:?}, reached via {host:?}",
                            pane.host(),
                        )));
                    }
                    if let Some(visible) = pane.visible_content() {
                        if !pane.contains(visible) {
                            return Err(DockError::Corrupted(format!(
                                "pane {p:?} visible selection is not a member"
                            )));
                        }
                    } else if !pane.is_empty() {
                        return Err(DockError::Corrupted(format!(
                            "pane {p:?} has contents but no visible selection"
                        )));
                    }
                    for control in pane.contents() {
                        let ctl = self.ctl(*control)?;
                        if ctl.pane() != Some(p) {
                            return Err(DockError::Corrupted(format!(
                                "control {control:?} back-reference {:?} does not match pane {p:?}",
                                ctl.pane(),
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
