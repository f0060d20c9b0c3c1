//! Core data model: the dock space, its arenas, and the tree node types
//!
//! All branches, panes, and controls live in id-keyed arenas owned by a single
//! [`DockSpace`], with parent links stored as plain ids. This keeps the deep
//! tree free of ownership cycles and makes cross-host moves (main ↔ floating ↔
//! auto-hide) explicit detach/attach pairs inside one allocator.

pub mod branch;
pub mod control;
pub mod host;
pub mod pane;
pub mod site;
pub mod size;

use std::collections::{BTreeMap, HashMap, VecDeque};

pub use branch::{Branch, BranchId, SlotNode};
pub use control::{ControlId, DockControl};
pub use host::{AutoHidePanel, FloatingWindow, HostId, HostKind, DEFAULT_FLOAT_BOUNDS};
pub use pane::{DockPane, PaneId};
pub use site::{DockMask, DockSite, SiteMap};
pub use size::{DockSizeData, ResolvedSizes, MIN_CENTRE_SIZE};

use serde_json::Value;

use crate::active::ActiveContentManager;
use crate::drag::DragState;
use crate::error::DockError;
use crate::events::DockEvent;
use crate::location::DockLocation;

/// Per-control last-address cache, one slot per host kind. Enables
/// float / auto-hide / redock round trips.
#[derive(Debug, Clone, Default)]
pub(crate) struct ControlMemory {
    pub main: Option<DockLocation>,
    pub floating: Option<DockLocation>,
    pub auto_hide: Option<DockLocation>,
    /// Most recently remembered location across all hosts
    pub last: Option<DockLocation>,
}

impl ControlMemory {
    pub fn slot(&self, kind: HostKind) -> &Option<DockLocation> {
        match kind {
            HostKind::Main => &self.main,
            HostKind::Floating => &self.floating,
            HostKind::AutoHide => &self.auto_hide,
        }
    }

    pub fn set(&mut self, location: DockLocation) {
        let slot = match location.host_kind() {
            HostKind::Main => &mut self.main,
            HostKind::Floating => &mut self.floating,
            HostKind::AutoHide => &mut self.auto_hide,
        };
        *slot = Some(location.clone());
        self.last = Some(location);
    }
}

/// The dock space: canonical content registry, node arenas, tree hosts,
/// active-content authority, and event queue. One per application.
///
/// Single-threaded, cooperative: the embedder calls in from its UI loop and
/// drains [`DockEvent`]s afterwards. The only deferred behavior is debounced
/// pruning via [`flush_pending`](DockSpace::flush_pending).
#[derive(Debug)]
pub struct DockSpace {
    pub(crate) controls: HashMap<ControlId, DockControl>,
    pub(crate) branches: HashMap<BranchId, Branch>,
    pub(crate) panes: HashMap<PaneId, DockPane>,

    pub(crate) main_root: BranchId,
    pub(crate) floating: BTreeMap<u32, FloatingWindow>,
    pub(crate) auto_hide: SiteMap<Option<AutoHidePanel>>,

    pub(crate) memory: HashMap<ControlId, ControlMemory>,
    pub(crate) active: ActiveContentManager,
    pub(crate) events: VecDeque<DockEvent>,
    pub(crate) prune_pending: bool,
    pub(crate) drag: Option<DragState>,

    next_control_id: u64,
    next_pane_id: u64,
    next_branch_id: u64,
    pub(crate) next_floating_id: u32,
}

impl Default for DockSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl DockSpace {
    /// Create an empty dock space: a main host whose root branch holds one
    /// empty Centre pane.
    pub fn new() -> Self {
        let mut space = Self {
            controls: HashMap::new(),
            branches: HashMap::new(),
            panes: HashMap::new(),
            main_root: BranchId(0),
            floating: BTreeMap::new(),
            auto_hide: SiteMap::default(),
            memory: HashMap::new(),
            active: ActiveContentManager::default(),
            events: VecDeque::new(),
            prune_pending: false,
            drag: None,
            next_control_id: 1,
            next_pane_id: 1,
            next_branch_id: 1,
            next_floating_id: 1,
        };
        space.main_root = space.new_host_root(HostId::Main);
        space
    }

    // =========================================================================
    // Content registry
    // =========================================================================

    /// Register content with the space. Registration alone does not attach
    /// anything to a tree; use [`add`](DockSpace::add) or
    /// [`find_and_show`](DockSpace::find_and_show) for that.
    pub fn register_content(
        &mut self,
        persist_name: impl Into<String>,
        type_name: impl Into<String>,
        default_location: DockLocation,
        user_data: Option<Value>,
    ) -> ControlId {
        let id = ControlId(self.next_control_id);
        self.next_control_id += 1;
        let control = DockControl {
            id,
            persist_name: persist_name.into(),
            type_name: type_name.into(),
            default_location,
            user_data,
            pane: None,
        };
        tracing::debug!(?id, name = %control.persist_name, "content registered");
        self.controls.insert(id, control);
        self.memory.insert(id, ControlMemory::default());
        id
    }

    /// Drop a control from the registry entirely, detaching it first.
    /// The content itself is never disposed.
    pub fn unregister_content(&mut self, control: ControlId) -> Result<(), DockError> {
        self.ensure_no_drag()?;
        self.detach(control)?;
        self.controls.remove(&control);
        self.memory.remove(&control);
        Ok(())
    }

    /// Every registered control, for building a generic "show window" menu
    pub fn registered_contents(&self) -> Vec<ControlId> {
        let mut ids: Vec<ControlId> = self.controls.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn content_by_name(&self, persist_name: &str) -> Option<ControlId> {
        self.controls
            .values()
            .find(|c| c.persist_name == persist_name)
            .map(|c| c.id)
    }

    // =========================================================================
    // Arena access
    // =========================================================================

    pub fn control(&self, id: ControlId) -> Option<&DockControl> {
        self.controls.get(&id)
    }

    pub fn pane(&self, id: PaneId) -> Option<&DockPane> {
        self.panes.get(&id)
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(&id)
    }

    pub(crate) fn ctl(&self, id: ControlId) -> Result<&DockControl, DockError> {
        self.controls.get(&id).ok_or(DockError::UnknownControl(id))
    }

    pub(crate) fn pane_ref(&self, id: PaneId) -> Result<&DockPane, DockError> {
        self.panes.get(&id).ok_or(DockError::UnknownPane(id))
    }

    pub(crate) fn branch_ref(&self, id: BranchId) -> Result<&Branch, DockError> {
        self.branches.get(&id).ok_or(DockError::UnknownBranch(id))
    }

    // =========================================================================
    // Hosts
    // =========================================================================

    pub fn main_root(&self) -> BranchId {
        self.main_root
    }

    pub fn floating_window(&self, id: u32) -> Option<&FloatingWindow> {
        self.floating.get(&id)
    }

    pub fn floating_windows(&self) -> impl Iterator<Item = &FloatingWindow> {
        self.floating.values()
    }

    pub fn auto_hide_panel(&self, site: DockSite) -> Option<&AutoHidePanel> {
        self.auto_hide[site].as_ref()
    }

    /// The root branch of a host. Auto-hide hosts are created lazily on
    /// first use; floating hosts must already exist.
    pub(crate) fn ensure_root(&mut self, host: HostId) -> Result<BranchId, DockError> {
        match host {
            HostId::Main => Ok(self.main_root),
            HostId::Floating(id) => self
                .floating
                .get(&id)
                .map(|w| w.root)
                .ok_or(DockError::UnknownFloatingWindow(id)),
            HostId::AutoHide(site) => {
                if let Some(panel) = &self.auto_hide[site] {
                    return Ok(panel.root);
                }
                let root = self.new_host_root(host);
                self.auto_hide[site] = Some(AutoHidePanel {
                    site,
                    root,
                    popped_out: false,
                });
                tracing::debug!(%site, "auto-hide panel created");
                Ok(root)
            }
        }
    }

    pub(crate) fn root_of(&self, host: HostId) -> Result<BranchId, DockError> {
        match host {
            HostId::Main => Ok(self.main_root),
            HostId::Floating(id) => self
                .floating
                .get(&id)
                .map(|w| w.root)
                .ok_or(DockError::UnknownFloatingWindow(id)),
            HostId::AutoHide(site) => self.auto_hide[site]
                .as_ref()
                .map(|p| p.root)
                .ok_or(DockError::Corrupted(format!(
                    "auto-hide panel {site} does not exist"
                ))),
        }
    }

    // =========================================================================
    // Node allocation
    // =========================================================================

    pub(crate) fn new_branch(
        &mut self,
        host: HostId,
        parent: Option<(BranchId, DockSite)>,
        sizes: DockSizeData,
    ) -> BranchId {
        let id = BranchId(self.next_branch_id);
        self.next_branch_id += 1;
        self.branches
            .insert(id, Branch::new(id, host, parent, sizes));
        id
    }

    pub(crate) fn new_pane(&mut self, host: HostId, parent: (BranchId, DockSite)) -> PaneId {
        let id = PaneId(self.next_pane_id);
        self.next_pane_id += 1;
        self.panes.insert(id, DockPane::new(id, host, Some(parent)));
        if let Some(branch) = self.branches.get_mut(&parent.0) {
            branch.set_child(parent.1, Some(SlotNode::Pane(id)));
        }
        id
    }

    /// A fresh host root: a branch with one empty Centre pane, so the
    /// mandatory-Centre invariant holds from the start.
    pub(crate) fn new_host_root(&mut self, host: HostId) -> BranchId {
        let root = self.new_branch(host, None, DockSizeData::quarters());
        self.new_pane(host, (root, DockSite::Centre));
        root
    }

    // =========================================================================
    // Registry memory
    // =========================================================================

    pub(crate) fn remember(&mut self, control: ControlId, location: DockLocation) {
        self.memory.entry(control).or_default().set(location);
    }

    /// Last known address of a control for a host kind, defaulting to the
    /// control's default location on first encounter of that host kind.
    pub(crate) fn recall(&self, control: ControlId, kind: HostKind) -> DockLocation {
        if let Some(loc) = self.memory.get(&control).and_then(|m| m.slot(kind).clone()) {
            return loc;
        }
        let default = self
            .controls
            .get(&control)
            .map(|c| c.default_location.clone())
            .unwrap_or_default();
        if default.host_kind() == kind {
            return default;
        }
        match kind {
            HostKind::Main => DockLocation::main(vec![DockSite::Centre], 0),
            HostKind::Floating => DockLocation {
                address: vec![DockSite::Centre],
                index: 0,
                auto_hide_site: None,
                floating_window: None,
            },
            HostKind::AutoHide => {
                DockLocation::auto_hide(default.auto_hide_site.unwrap_or(DockSite::Left), 0)
            }
        }
    }

    /// Most recently remembered location across all hosts, defaulting to the
    /// control's default location.
    pub(crate) fn recall_last(&self, control: ControlId) -> DockLocation {
        self.memory
            .get(&control)
            .and_then(|m| m.last.clone())
            .or_else(|| {
                self.controls
                    .get(&control)
                    .map(|c| c.default_location.clone())
            })
            .unwrap_or_default()
    }

    // =========================================================================
    // Events and deferred work
    // =========================================================================

    /// Drain all queued notifications, oldest first
    pub fn take_events(&mut self) -> Vec<DockEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn push_event(&mut self, event: DockEvent) {
        self.events.push_back(event);
    }

    /// Signal that pruning is needed. Repeated signals before the next
    /// [`flush_pending`](DockSpace::flush_pending) coalesce into one pass.
    pub(crate) fn request_prune(&mut self) {
        self.prune_pending = true;
    }

    /// Whether a prune pass is queued
    pub fn prune_pending(&self) -> bool {
        self.prune_pending
    }

    /// Run deferred work once per UI-loop turn: a single coalesced,
    /// idempotent prune pass over every host.
    pub fn flush_pending(&mut self) {
        if !self.prune_pending {
            return;
        }
        self.prune_pending = false;
        self.prune_all();
    }

    pub(crate) fn ensure_no_drag(&self) -> Result<(), DockError> {
        if self.drag.is_some() {
            Err(DockError::DragInProgress)
        } else {
            Ok(())
        }
    }

    /// The control currently being dragged, if a drag is in progress
    pub fn dragging(&self) -> Option<ControlId> {
        self.drag.as_ref().map(|d| d.control)
    }
}
