//! Internal tree node: five slots, one per dock site

use super::host::HostId;
use super::pane::PaneId;
use super::site::{DockMask, DockSite, SiteMap};
use super::size::DockSizeData;

/// Unique identifier for a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(pub u64);

/// What a branch slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotNode {
    Pane(PaneId),
    Branch(BranchId),
}

/// Recursive 5-ary tree node. Invariants maintained by pruning: the Centre
/// slot is non-null once settled, and no branch survives with a single
/// descendant.
#[derive(Debug, Clone)]
pub struct Branch {
    pub id: BranchId,
    pub(crate) parent: Option<(BranchId, DockSite)>,
    pub(crate) host: HostId,
    pub(crate) slots: SiteMap<Option<SlotNode>>,
    pub(crate) sizes: DockSizeData,
}

impl Branch {
    pub(crate) fn new(
        id: BranchId,
        host: HostId,
        parent: Option<(BranchId, DockSite)>,
        sizes: DockSizeData,
    ) -> Self {
        Self {
            id,
            parent,
            host,
            slots: SiteMap::default(),
            sizes,
        }
    }

    pub fn host(&self) -> HostId {
        self.host
    }

    /// The branch slot holding this branch; `None` for a host root
    pub fn parent(&self) -> Option<(BranchId, DockSite)> {
        self.parent
    }

    pub fn sizes(&self) -> DockSizeData {
        self.sizes
    }

    pub fn child(&self, site: DockSite) -> Option<SlotNode> {
        self.slots[site]
    }

    pub(crate) fn set_child(&mut self, site: DockSite, node: Option<SlotNode>) {
        self.slots[site] = node;
    }

    /// Occupied slots in site order
    pub fn occupied(&self) -> Vec<(DockSite, SlotNode)> {
        self.slots
            .iter()
            .filter_map(|(site, slot)| slot.map(|node| (site, node)))
            .collect()
    }

    pub fn child_count(&self) -> usize {
        self.slots.iter().filter(|(_, slot)| slot.is_some()).count()
    }

    /// Mask of occupied slots
    pub fn occupied_mask(&self) -> DockMask {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.is_some())
            .map(|(site, _)| site)
            .collect()
    }

    /// The slot a given node sits in, if it is a direct child
    pub fn site_of(&self, node: SlotNode) -> Option<DockSite> {
        self.slots
            .iter()
            .find(|(_, slot)| **slot == Some(node))
            .map(|(site, _)| site)
    }
}
