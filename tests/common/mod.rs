//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockspace::{ControlId, DockLocation, DockSite, DockSpace, Rect};

pub const CONTAINER: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1000.0,
    height: 700.0,
};

/// A space with `names.len()` registered (but unattached) controls
pub fn space_with_contents(names: &[&str]) -> (DockSpace, Vec<ControlId>) {
    let mut space = DockSpace::new();
    let ids = names
        .iter()
        .map(|name| space.register_content(*name, "test-panel", DockLocation::default(), None))
        .collect();
    (space, ids)
}

/// Register a control and dock it at the given main-host address
pub fn docked(space: &mut DockSpace, name: &str, address: &[DockSite]) -> ControlId {
    let id = space.register_content(name, "test-panel", DockLocation::default(), None);
    space.add(id, None, address).unwrap();
    id
}

/// Names of the controls in a pane, in tab order
pub fn pane_names(space: &DockSpace, pane: dockspace::PaneId) -> Vec<String> {
    space
        .pane(pane)
        .map(|p| {
            p.contents()
                .iter()
                .filter_map(|c| space.control(*c).map(|c| c.persist_name.clone()))
                .collect()
        })
        .unwrap_or_default()
}
