//! Integration tests for tree mutations: adding, detaching, address walks,
//! and deferred pruning.

mod common;

use common::{docked, pane_names, space_with_contents};

use dockspace::{DockError, DockEvent, DockSite, DockSpace, HostId};

// ============================================================================
// Adding
// ============================================================================

#[test]
fn test_add_to_left_of_empty_container_keeps_empty_centre() {
    let (mut space, ids) = space_with_contents(&["a"]);
    space.add(ids[0], None, &[DockSite::Left]).unwrap();

    let panes = space.all_panes(HostId::Main);
    assert_eq!(panes.len(), 2);

    let left = space.pane_at(HostId::Main, &[DockSite::Left]).unwrap();
    assert_eq!(pane_names(&space, left), vec!["a"]);

    let centre = space.pane_at(HostId::Main, &[DockSite::Centre]).unwrap();
    assert!(space.pane(centre).unwrap().is_empty());

    let root = space.branch(space.main_root()).unwrap();
    let expected: dockspace::DockMask = [DockSite::Centre, DockSite::Left].into_iter().collect();
    assert_eq!(root.occupied_mask(), expected);
}

#[test]
fn test_add_at_index_zero_prepends_and_becomes_visible() {
    let (mut space, ids) = space_with_contents(&["a", "b"]);
    space.add(ids[0], None, &[DockSite::Centre]).unwrap();
    space.add(ids[1], Some(0), &[DockSite::Centre]).unwrap();

    let centre = space.pane_at(HostId::Main, &[DockSite::Centre]).unwrap();
    assert_eq!(pane_names(&space, centre), vec!["b", "a"]);
    assert_eq!(space.pane(centre).unwrap().visible_content(), Some(ids[1]));
}

#[test]
fn test_empty_address_means_centre() {
    let (mut space, ids) = space_with_contents(&["a"]);
    let pane = space.add(ids[0], None, &[]).unwrap();
    assert_eq!(space.pane_at(HostId::Main, &[DockSite::Centre]), Some(pane));
}

#[test]
fn test_adding_past_a_pane_demotes_it_to_nested_centre() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Left]);
    let b = docked(&mut space, "b", &[DockSite::Left, DockSite::Bottom]);

    // "a" kept its content but now lives one level deeper.
    assert_eq!(
        space.location_of(a).unwrap().address,
        vec![DockSite::Left, DockSite::Centre]
    );
    assert_eq!(
        space.location_of(b).unwrap().address,
        vec![DockSite::Left, DockSite::Bottom]
    );
}

#[test]
fn test_centre_add_follows_centre_chain_to_innermost_pane() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Left]);
    docked(&mut space, "b", &[DockSite::Left, DockSite::Bottom]);
    // [Left] now resolves to a branch; adding there must land in the
    // innermost centre pane next to "a".
    let c = docked(&mut space, "c", &[DockSite::Left]);

    assert_eq!(space.control(a).unwrap().pane(), space.control(c).unwrap().pane());
}

#[test]
fn test_adding_twice_moves_rather_than_duplicates() {
    let (mut space, ids) = space_with_contents(&["a"]);
    space.add(ids[0], None, &[DockSite::Centre]).unwrap();
    space.add(ids[0], None, &[DockSite::Right]).unwrap();

    let right = space.pane_at(HostId::Main, &[DockSite::Right]).unwrap();
    assert_eq!(pane_names(&space, right), vec!["a"]);
    space.flush_pending();
    // Exactly one pane contains it anywhere.
    let holders = space
        .all_panes(HostId::Main)
        .into_iter()
        .filter(|p| space.pane(*p).unwrap().contains(ids[0]))
        .count();
    assert_eq!(holders, 1);
    space.validate().unwrap();
}

#[test]
fn test_add_unknown_control_fails_fast() {
    let mut space = DockSpace::new();
    let err = space
        .add(dockspace::ControlId(99), None, &[DockSite::Centre])
        .unwrap_err();
    assert!(matches!(err, DockError::UnknownControl(_)));
}

// ============================================================================
// Detaching and closing
// ============================================================================

#[test]
fn test_detach_is_silent_for_already_detached_content() {
    let (mut space, ids) = space_with_contents(&["a"]);
    assert_eq!(space.detach(ids[0]).unwrap(), None);
}

#[test]
fn test_detach_emits_pane_changed_and_requests_prune() {
    let (mut space, ids) = space_with_contents(&["a"]);
    space.add(ids[0], None, &[DockSite::Left]).unwrap();
    space.take_events();

    space.detach(ids[0]).unwrap();
    assert!(space.prune_pending());
    let events = space.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        DockEvent::ContentPaneChanged { control, pane: None } if *control == ids[0]
    )));
}

#[test]
fn test_close_detaches_and_notifies() {
    let (mut space, ids) = space_with_contents(&["a"]);
    space.add(ids[0], None, &[DockSite::Centre]).unwrap();
    space.close_content(ids[0]).unwrap();

    assert!(!space.control(ids[0]).unwrap().is_attached());
    let events = space.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, DockEvent::ContentClosed { control } if *control == ids[0])));
    // Still registered: closing hides, it does not forget.
    assert!(space.registered_contents().contains(&ids[0]));
}

#[test]
fn test_removing_visible_item_promotes_neighbour() {
    let (mut space, ids) = space_with_contents(&["a", "b", "c"]);
    for id in &ids {
        space.add(*id, None, &[DockSite::Centre]).unwrap();
    }
    let pane = space.pane_at(HostId::Main, &[DockSite::Centre]).unwrap();
    space.set_active_content(ids[1]).unwrap();
    assert_eq!(space.pane(pane).unwrap().visible_content(), Some(ids[1]));

    space.detach(ids[1]).unwrap();
    // Nearest remaining item by index takes over.
    assert_eq!(space.pane(pane).unwrap().visible_content(), Some(ids[2]));
}

// ============================================================================
// Pruning
// ============================================================================

#[test]
fn test_emptied_edge_pane_is_pruned_and_sibling_promoted() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Left, DockSite::Left]);
    let b = docked(&mut space, "b", &[DockSite::Left, DockSite::Centre]);

    space.detach(b).unwrap();
    space.flush_pending();

    // The nested branch collapsed: "a" is exposed directly at [Left].
    assert_eq!(space.location_of(a).unwrap().address, vec![DockSite::Left]);
    space.validate().unwrap();
}

#[test]
fn test_left_and_centre_branch_collapses_when_centre_empties() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Bottom, DockSite::Left]);
    let b = docked(&mut space, "b", &[DockSite::Bottom, DockSite::Centre]);
    space.detach(b).unwrap();
    space.flush_pending();

    assert_eq!(
        space.location_of(a).unwrap().address,
        vec![DockSite::Bottom]
    );
    space.validate().unwrap();
}

#[test]
fn test_prune_is_idempotent() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Left, DockSite::Top]);
    docked(&mut space, "b", &[DockSite::Right]);
    space.detach(a).unwrap();

    space.prune();
    let first = space.save_layout();
    // Re-trigger with no intervening mutation.
    space.prune();
    let second = space.save_layout();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_prune_signals_coalesce() {
    let (mut space, ids) = space_with_contents(&["a", "b", "c"]);
    for (i, id) in ids.iter().enumerate() {
        let site = [DockSite::Left, DockSite::Right, DockSite::Top][i];
        space.add(*id, None, &[site]).unwrap();
    }
    for id in &ids {
        space.detach(*id).unwrap();
    }
    assert!(space.prune_pending());
    space.flush_pending();
    assert!(!space.prune_pending());

    // Everything collapsed back to the single empty centre pane.
    assert_eq!(space.all_panes(HostId::Main).len(), 1);
    space.validate().unwrap();
}

#[test]
fn test_centre_slot_always_repopulated() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    docked(&mut space, "b", &[DockSite::Left]);
    space.detach(a).unwrap();
    space.flush_pending();

    // Post-settlement the root still has a Centre child.
    assert!(space.pane_at(HostId::Main, &[DockSite::Centre]).is_some());
    space.validate().unwrap();
}

// ============================================================================
// Registry memory
// ============================================================================

#[test]
fn test_detached_content_remembers_its_address() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Right, DockSite::Bottom]);
    space.detach(a).unwrap();
    space.flush_pending();

    let pane = space.find_and_show(a).unwrap();
    assert_eq!(
        space.address_of_pane(pane).unwrap(),
        vec![DockSite::Right, DockSite::Bottom]
    );
}

#[test]
fn test_unregister_detaches_and_forgets() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    space.unregister_content(a).unwrap();
    assert!(space.control(a).is_none());
    assert!(space.registered_contents().is_empty());
    space.flush_pending();
    space.validate().unwrap();
}
