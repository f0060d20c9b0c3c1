//! Leaf node: an ordered content list with one visible selection

use crate::error::DockError;

use super::branch::BranchId;
use super::control::ControlId;
use super::host::HostId;
use super::site::DockSite;

/// Unique identifier for a pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(pub u64);

/// A leaf of the dock tree. Holds an ordered list of controls and the single
/// visible selection, which is `None` iff the list is empty and otherwise
/// always a list member. A pane never owns its controls; removal never
/// disposes content.
#[derive(Debug, Clone)]
pub struct DockPane {
    pub id: PaneId,
    pub(crate) parent: Option<(BranchId, DockSite)>,
    pub(crate) host: HostId,
    pub(crate) contents: Vec<ControlId>,
    pub(crate) visible: Option<ControlId>,
}

impl DockPane {
    pub(crate) fn new(id: PaneId, host: HostId, parent: Option<(BranchId, DockSite)>) -> Self {
        Self {
            id,
            parent,
            host,
            contents: Vec::new(),
            visible: None,
        }
    }

    pub fn host(&self) -> HostId {
        self.host
    }

    /// The branch slot holding this pane
    pub fn parent(&self) -> Option<(BranchId, DockSite)> {
        self.parent
    }

    pub fn contents(&self) -> &[ControlId] {
        &self.contents
    }

    pub fn visible_content(&self) -> Option<ControlId> {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn contains(&self, control: ControlId) -> bool {
        self.contents.contains(&control)
    }

    pub fn index_of(&self, control: ControlId) -> Option<usize> {
        self.contents.iter().position(|c| *c == control)
    }

    /// Insert at a clamped index (append when `None`) and make visible.
    /// The caller is responsible for detaching the control from any prior
    /// pane first; double-adding to one pane is a fail-fast misuse.
    pub(crate) fn insert(
        &mut self,
        control: ControlId,
        index: Option<usize>,
    ) -> Result<(), DockError> {
        if self.contains(control) {
            return Err(DockError::AlreadyInPane(control, self.id));
        }
        let at = index.unwrap_or(self.contents.len()).min(self.contents.len());
        self.contents.insert(at, control);
        self.visible = Some(control);
        Ok(())
    }

    /// Remove a control. Removing the visible item promotes the nearest
    /// remaining item by index, or clears the selection when the pane
    /// empties. Removing absent content is a silent no-op; returns whether
    /// anything changed.
    pub(crate) fn remove(&mut self, control: ControlId) -> bool {
        let Some(idx) = self.index_of(control) else {
            return false;
        };
        self.contents.remove(idx);

        if self.visible == Some(control) {
            self.visible = if self.contents.is_empty() {
                None
            } else {
                Some(self.contents[idx.min(self.contents.len() - 1)])
            };
        }
        true
    }

    /// Make a member control the visible selection. No-op when already
    /// visible; fails fast when the control is not a member.
    pub(crate) fn make_visible(&mut self, control: ControlId) -> Result<bool, DockError> {
        if !self.contains(control) {
            return Err(DockError::NotInPane(control, self.id));
        }
        if self.visible == Some(control) {
            return Ok(false);
        }
        self.visible = Some(control);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane() -> DockPane {
        DockPane::new(PaneId(1), HostId::Main, None)
    }

    #[test]
    fn test_insert_appends_and_shows() {
        let mut p = pane();
        p.insert(ControlId(1), None).unwrap();
        p.insert(ControlId(2), None).unwrap();
        assert_eq!(p.contents(), &[ControlId(1), ControlId(2)]);
        assert_eq!(p.visible_content(), Some(ControlId(2)));
    }

    #[test]
    fn test_insert_at_index_clamps() {
        let mut p = pane();
        p.insert(ControlId(1), None).unwrap();
        p.insert(ControlId(2), Some(0)).unwrap();
        p.insert(ControlId(3), Some(99)).unwrap();
        assert_eq!(p.contents(), &[ControlId(2), ControlId(1), ControlId(3)]);
    }

    #[test]
    fn test_double_insert_fails_fast() {
        let mut p = pane();
        p.insert(ControlId(1), None).unwrap();
        assert!(matches!(
            p.insert(ControlId(1), None),
            Err(DockError::AlreadyInPane(..))
        ));
    }

    #[test]
    fn test_remove_visible_promotes_neighbour() {
        let mut p = pane();
        for i in 1..=3 {
            p.insert(ControlId(i), None).unwrap();
        }
        p.make_visible(ControlId(2)).unwrap();
        assert!(p.remove(ControlId(2)));
        // Item that slid into index 1 is promoted
        assert_eq!(p.visible_content(), Some(ControlId(3)));
    }

    #[test]
    fn test_remove_last_clears_visible() {
        let mut p = pane();
        p.insert(ControlId(1), None).unwrap();
        p.remove(ControlId(1));
        assert!(p.is_empty());
        assert_eq!(p.visible_content(), None);
    }

    #[test]
    fn test_remove_absent_is_silent() {
        let mut p = pane();
        p.insert(ControlId(1), None).unwrap();
        assert!(!p.remove(ControlId(9)));
        assert_eq!(p.visible_content(), Some(ControlId(1)));
    }

    #[test]
    fn test_visible_member_invariant() {
        let mut p = pane();
        assert_eq!(p.visible_content(), None);
        p.insert(ControlId(1), None).unwrap();
        let v = p.visible_content().unwrap();
        assert!(p.contains(v));
    }
}
