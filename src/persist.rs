//! Layout persistence
//!
//! The whole space serializes to a versioned JSON document: explicit tree
//! records per host plus a per-content location line, keyed by persist name.
//! Loading validates everything up front and only then swaps the live trees,
//! so a malformed document leaves the space exactly as it was.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DockError;
use crate::geometry::Rect;
use crate::location::DockLocation;
use crate::model::{
    ControlId, DockSite, DockSizeData, DockSpace, FloatingWindow, HostId, HostKind, SlotNode,
};

pub const LAYOUT_VERSION: u32 = 1;

/// Serialized form of the entire dock space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub version: u32,
    pub contents: Vec<ContentEntry>,
    pub main: NodeRecord,
    #[serde(default)]
    pub auto_hide: Vec<AutoHideRecord>,
    #[serde(default)]
    pub floating: Vec<FloatingRecord>,
    #[serde(default)]
    pub active_content: Option<String>,
}

/// One registered content: identity, factory hint, and location descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub persist_name: String,
    pub type_name: String,
    /// Descriptor string, e.g. `main:Left,Centre:0` or `autohide(Bottom):Centre:2`
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoHideRecord {
    pub site: DockSite,
    pub tree: NodeRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingRecord {
    pub id: u32,
    pub bounds: Rect,
    pub visible: bool,
    pub tree: NodeRecord,
}

/// One tree node: panes carry member persist names, branches carry sizes and
/// occupied slots in site order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeRecord {
    Pane {
        items: Vec<String>,
        #[serde(default)]
        visible: Option<String>,
    },
    Branch {
        sizes: DockSizeData,
        slots: Vec<(DockSite, NodeRecord)>,
    },
}

/// Reject documents whose tree records place one persist name in more than
/// one pane (or twice in the same pane). Rebuilding such a tree would leave
/// the control's pane back-reference matching only one of its occurrences.
fn check_tree_names(doc: &LayoutDocument) -> Result<(), DockError> {
    let mut seen = std::collections::HashSet::new();
    let mut records: Vec<&NodeRecord> = Vec::with_capacity(1 + doc.floating.len());
    records.push(&doc.main);
    records.extend(doc.auto_hide.iter().map(|r| &r.tree));
    records.extend(doc.floating.iter().map(|r| &r.tree));
    while let Some(record) = records.pop() {
        match record {
            NodeRecord::Pane { items, .. } => {
                for name in items {
                    if !seen.insert(name.as_str()) {
                        return Err(DockError::Corrupted(format!(
                            "content {name:?} appears in more than one saved pane"
                        )));
                    }
                }
            }
            NodeRecord::Branch { slots, .. } => {
                records.extend(slots.iter().map(|(_, node)| node));
            }
        }
    }
    Ok(())
}

impl DockSpace {
    // =========================================================================
    // Saving
    // =========================================================================

    /// Serialize the current layout. Floating windows holding content are
    /// renumbered 1..n in creation order so saved ids are stable across
    /// sessions; empty windows are not recorded.
    pub fn save_layout(&self) -> LayoutDocument {
        let mut renumber = std::collections::HashMap::new();
        let mut floating = Vec::new();
        for window in self.floating.values() {
            if self.controls_in_host(HostId::Floating(window.id)).is_empty() {
                continue;
            }
            let id = renumber.len() as u32 + 1;
            renumber.insert(window.id, id);
            floating.push(FloatingRecord {
                id,
                bounds: window.bounds,
                visible: window.visible,
                tree: self.record_branch(window.root),
            });
        }

        let contents = self
            .registered_contents()
            .into_iter()
            .filter_map(|id| {
                let control = self.control(id)?;
                let mut location = self
                    .location_of(id)
                    .unwrap_or_else(|| self.recall_last(id));
                if let Some(old) = location.floating_window {
                    match renumber.get(&old) {
                        Some(new) => location.floating_window = Some(*new),
                        // The remembered window is empty or gone and won't be
                        // in the document; fall back to main-host memory.
                        None => location = self.recall(id, HostKind::Main),
                    }
                }
                Some(ContentEntry {
                    persist_name: control.persist_name.clone(),
                    type_name: control.type_name.clone(),
                    location: location.to_string(),
                    user_data: control.user_data.clone(),
                })
            })
            .collect();

        let auto_hide = DockSite::EDGES
            .into_iter()
            .filter_map(|site| {
                let panel = self.auto_hide_panel(site)?;
                if self.controls_in_host(HostId::AutoHide(site)).is_empty() {
                    return None;
                }
                Some(AutoHideRecord {
                    site,
                    tree: self.record_branch(panel.root),
                })
            })
            .collect();

        LayoutDocument {
            version: LAYOUT_VERSION,
            contents,
            main: self.record_branch(self.main_root),
            auto_hide,
            floating,
            active_content: self
                .active_content()
                .and_then(|c| self.control(c))
                .map(|c| c.persist_name.clone()),
        }
    }

    fn record_branch(&self, branch: crate::model::BranchId) -> NodeRecord {
        let Some(b) = self.branch(branch) else {
            return NodeRecord::Branch {
                sizes: DockSizeData::quarters(),
                slots: Vec::new(),
            };
        };
        let slots = b
            .occupied()
            .into_iter()
            .map(|(site, node)| (site, self.record_node(node)))
            .collect();
        NodeRecord::Branch {
            sizes: b.sizes(),
            slots,
        }
    }

    fn record_node(&self, node: SlotNode) -> NodeRecord {
        match node {
            SlotNode::Branch(b) => self.record_branch(b),
            SlotNode::Pane(p) => {
                let Some(pane) = self.pane(p) else {
                    return NodeRecord::Pane {
                        items: Vec::new(),
                        visible: None,
                    };
                };
                let name = |id: ControlId| self.control(id).map(|c| c.persist_name.clone());
                NodeRecord::Pane {
                    items: pane.contents().iter().copied().filter_map(name).collect(),
                    visible: pane.visible_content().and_then(name),
                }
            }
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace the current layout with a saved document.
    ///
    /// All location descriptors are parsed and the tree records checked for
    /// duplicated names before anything is touched; any failure aborts with
    /// the space unchanged. Entries naming unregistered
    /// content are offered to `factory` (persist name, type name, user data);
    /// a `true` return registers the entry, otherwise it is skipped. Skipped
    /// names in tree records are dropped and the resulting holes pruned.
    pub fn load_layout(
        &mut self,
        doc: &LayoutDocument,
        mut factory: Option<&mut dyn FnMut(&str, &str, Option<&Value>) -> bool>,
    ) -> Result<(), DockError> {
        if doc.version != LAYOUT_VERSION {
            return Err(DockError::Corrupted(format!(
                "unsupported layout version {}",
                doc.version
            )));
        }
        self.ensure_no_drag()?;

        // Validate every descriptor and tree record up front.
        check_tree_names(doc)?;
        let mut locations = Vec::with_capacity(doc.contents.len());
        for entry in &doc.contents {
            let location: DockLocation = entry.location.parse()?;
            locations.push(location);
        }

        // Register entries the embedder can construct.
        for (entry, location) in doc.contents.iter().zip(&locations) {
            if self.content_by_name(&entry.persist_name).is_some() {
                continue;
            }
            let wanted = match factory.as_mut() {
                Some(f) => f(&entry.persist_name, &entry.type_name, entry.user_data.as_ref()),
                None => false,
            };
            if wanted {
                self.register_content(
                    entry.persist_name.clone(),
                    entry.type_name.clone(),
                    location.clone(),
                    entry.user_data.clone(),
                );
            } else {
                debug!(name = %entry.persist_name, "layout entry skipped");
            }
        }

        // Point of no return: tear down the live trees.
        self.set_active_pane(None);
        let detached: Vec<ControlId> = self
            .controls
            .values()
            .filter(|c| c.is_attached())
            .map(|c| c.id)
            .collect();
        for control in &detached {
            if let Some(c) = self.controls.get_mut(control) {
                c.pane = None;
            }
        }
        self.branches.clear();
        self.panes.clear();
        self.floating.clear();
        self.auto_hide = Default::default();
        self.main_root = self.new_host_root(HostId::Main);

        // Rebuild each host directly from its record, preserving saved
        // sizes, tab order, and visible selections.
        self.rebuild_root(HostId::Main, self.main_root, &doc.main);
        for record in &doc.auto_hide {
            let root = self.ensure_root(HostId::AutoHide(record.site))?;
            self.rebuild_root(HostId::AutoHide(record.site), root, &record.tree);
        }
        let mut max_floating = 0;
        for record in &doc.floating {
            let host = HostId::Floating(record.id);
            let root = self.new_host_root(host);
            self.floating.insert(
                record.id,
                FloatingWindow {
                    id: record.id,
                    root,
                    bounds: record.bounds,
                    visible: record.visible,
                },
            );
            self.rebuild_root(host, root, &record.tree);
            max_floating = max_floating.max(record.id);
        }
        self.next_floating_id = self.next_floating_id.max(max_floating + 1);

        // Seed the registry's address memory from the saved locations.
        for (entry, location) in doc.contents.iter().zip(&locations) {
            if let Some(control) = self.content_by_name(&entry.persist_name) {
                self.remember(control, location.clone());
            }
        }

        self.request_prune();
        self.flush_pending();

        if let Some(name) = &doc.active_content {
            if let Some(control) = self.content_by_name(name) {
                // Stale names (content skipped or left detached) are ignored.
                let _ = self.set_active_content(control);
            }
        }

        self.validate()?;
        debug!(contents = doc.contents.len(), "layout loaded");
        Ok(())
    }

    /// Replace a host root's contents from a branch record. Pane records at
    /// the root land in the root's Centre slot.
    fn rebuild_root(&mut self, host: HostId, root: crate::model::BranchId, record: &NodeRecord) {
        match record {
            NodeRecord::Branch { sizes, slots } => {
                // The fresh root came with an empty Centre pane; drop it
                // before rebuilding the slots.
                self.drop_default_centre(root);
                if let Some(b) = self.branches.get_mut(&root) {
                    b.sizes = *sizes;
                }
                for (site, node) in slots {
                    self.rebuild_node(host, root, *site, node);
                }
            }
            NodeRecord::Pane { .. } => {
                self.drop_default_centre(root);
                self.rebuild_node(host, root, DockSite::Centre, record);
            }
        }
    }

    fn drop_default_centre(&mut self, root: crate::model::BranchId) {
        let centre = self
            .branches
            .get(&root)
            .and_then(|b| b.child(DockSite::Centre));
        if let Some(SlotNode::Pane(p)) = centre {
            self.panes.remove(&p);
        }
        if let Some(b) = self.branches.get_mut(&root) {
            b.set_child(DockSite::Centre, None);
        }
    }

    fn rebuild_node(
        &mut self,
        host: HostId,
        parent: crate::model::BranchId,
        site: DockSite,
        record: &NodeRecord,
    ) {
        match record {
            NodeRecord::Pane { items, visible } => {
                let pane = self.new_pane(host, (parent, site));
                for name in items {
                    let Some(control) = self.content_by_name(name) else {
                        warn!(%name, "saved pane references unknown content");
                        continue;
                    };
                    if self
                        .panes
                        .get_mut(&pane)
                        .and_then(|p| p.insert(control, None).ok())
                        .is_some()
                    {
                        if let Some(c) = self.controls.get_mut(&control) {
                            c.pane = Some(pane);
                        }
                    }
                }
                if let Some(name) = visible {
                    if let Some(control) = self.content_by_name(name) {
                        if let Some(p) = self.panes.get_mut(&pane) {
                            let _ = p.make_visible(control);
                        }
                    }
                }
            }
            NodeRecord::Branch { sizes, slots } => {
                let branch = self.new_branch(host, Some((parent, site)), *sizes);
                if let Some(b) = self.branches.get_mut(&parent) {
                    b.set_child(site, Some(SlotNode::Branch(branch)));
                }
                for (child_site, node) in slots {
                    self.rebuild_node(host, branch, *child_site, node);
                }
            }
        }
    }

    // =========================================================================
    // Files
    // =========================================================================

    pub fn save_to_path(&self, path: &Path) -> Result<(), DockError> {
        let doc = self.save_layout();
        let json = serde_json::to_string_pretty(&doc)?;
        fs::write(path, json)?;
        debug!(path = %path.display(), "layout saved");
        Ok(())
    }

    pub fn load_from_path(
        &mut self,
        path: &Path,
        factory: Option<&mut dyn FnMut(&str, &str, Option<&Value>) -> bool>,
    ) -> Result<(), DockError> {
        let json = fs::read_to_string(path)?;
        let doc: LayoutDocument = serde_json::from_str(&json)?;
        self.load_layout(&doc, factory)
    }
}
