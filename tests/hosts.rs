//! Integration tests for host coordination: floating windows, auto-hide
//! panels, and active-content tracking across hosts.

mod common;

use common::{docked, space_with_contents};

use dockspace::{DockEvent, DockSite, DockSpace, HostId, HostKind, Rect};

// ============================================================================
// Floating round trips
// ============================================================================

#[test]
fn test_float_and_unfloat_restores_exact_address() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Left, DockSite::Bottom]);
    let before = space.location_of(a).unwrap();

    space.set_floating(a, true).unwrap();
    assert!(space.is_floating(a));
    space.flush_pending();

    space.set_floating(a, false).unwrap();
    space.flush_pending();
    assert!(!space.is_floating(a));
    assert_eq!(space.location_of(a).unwrap().address, before.address);
    assert_eq!(space.location_of(a).unwrap().index, before.index);
    space.validate().unwrap();
}

#[test]
fn test_set_floating_is_a_no_op_when_already_there() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    space.set_floating(a, false).unwrap();
    assert_eq!(space.location_of(a).unwrap().address, vec![DockSite::Centre]);
    assert_eq!(space.floating_windows().count(), 0);
}

#[test]
fn test_floating_creates_window_and_emits_event() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    space.take_events();

    space.set_floating(a, true).unwrap();
    let events = space.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, DockEvent::FloatingWindowCreated { .. })));
    assert_eq!(space.host_of(a).unwrap().kind(), HostKind::Floating);
}

#[test]
fn test_emptied_floating_window_is_torn_down() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    space.set_floating(a, true).unwrap();
    let window = match space.host_of(a).unwrap() {
        HostId::Floating(id) => id,
        other => panic!("unexpected host {other:?}"),
    };
    space.take_events();

    space.set_floating(a, false).unwrap();
    space.flush_pending();
    assert!(space.floating_window(window).is_none());
    let events = space.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, DockEvent::FloatingWindowClosed { id } if *id == window)));
}

#[test]
fn test_refloat_reuses_last_floating_window_while_it_lives() {
    let (mut space, ids) = space_with_contents(&["a", "b"]);
    let (a, b) = (ids[0], ids[1]);
    space.add(a, None, &[DockSite::Centre]).unwrap();
    space.add(b, None, &[DockSite::Centre]).unwrap();

    space.set_floating(a, true).unwrap();
    space.set_floating(b, true).unwrap();
    let window_a = space.host_of(a).unwrap();

    // "b" floated into its own window; moving "a" home and out again while
    // its old window still exists puts it back in that window.
    space.set_floating(a, false).unwrap();
    space.set_floating(a, true).unwrap();
    assert_eq!(space.host_of(a).unwrap(), window_a);
}

// ============================================================================
// Auto-hide round trips
// ============================================================================

#[test]
fn test_auto_hide_and_restore_round_trip() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Right]);

    space.set_auto_hidden(a, true).unwrap();
    assert!(space.is_auto_hidden(a));
    space.flush_pending();

    space.set_auto_hidden(a, false).unwrap();
    space.flush_pending();
    assert!(!space.is_auto_hidden(a));
    assert_eq!(space.location_of(a).unwrap().address, vec![DockSite::Right]);
    space.validate().unwrap();
}

#[test]
fn test_auto_hide_panel_is_collapsed_until_its_content_activates() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    let b = docked(&mut space, "b", &[DockSite::Centre]);
    let _ = a;
    space.set_auto_hidden(b, true).unwrap();

    let site = match space.host_of(b).unwrap() {
        HostId::AutoHide(site) => site,
        other => panic!("unexpected host {other:?}"),
    };
    assert!(!space.auto_hide_panel(site).unwrap().popped_out);

    space.set_active_content(b).unwrap();
    assert!(space.auto_hide_panel(site).unwrap().popped_out);

    // Activating main content again retracts the flyout.
    space.set_active_content(a).unwrap();
    assert!(!space.auto_hide_panel(site).unwrap().popped_out);
}

#[test]
fn test_popout_changes_are_announced() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    space.set_auto_hidden(a, true).unwrap();
    space.take_events();

    space.set_active_content(a).unwrap();
    let events = space.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        DockEvent::AutoHidePopOutChanged { popped_out: true, .. }
    )));
}

// ============================================================================
// Active content
// ============================================================================

#[test]
fn test_activation_emits_deactivate_then_activate() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Left]);
    let b = docked(&mut space, "b", &[DockSite::Right]);
    space.set_active_content(a).unwrap();
    space.take_events();

    space.set_active_content(b).unwrap();
    let events = space.take_events();
    let deactivated = events.iter().position(|e| {
        matches!(e, DockEvent::ContentActiveChanged { control, active: false } if *control == a)
    });
    let activated = events.iter().position(|e| {
        matches!(e, DockEvent::ContentActiveChanged { control, active: true } if *control == b)
    });
    assert!(deactivated.unwrap() < activated.unwrap());
    assert!(events
        .iter()
        .any(|e| matches!(e, DockEvent::ActiveContentChanged { .. })));
}

#[test]
fn test_activating_detached_content_fails() {
    let (mut space, ids) = space_with_contents(&["a"]);
    assert!(space.set_active_content(ids[0]).is_err());
}

#[test]
fn test_reactivating_active_content_is_silent() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    space.set_active_content(a).unwrap();
    space.take_events();

    space.set_active_content(a).unwrap();
    assert!(space.take_events().is_empty());
}

#[test]
fn test_activate_previous_round_trips() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Left]);
    let b = docked(&mut space, "b", &[DockSite::Right]);
    space.set_active_content(a).unwrap();
    space.set_active_content(b).unwrap();

    space.activate_previous();
    assert_eq!(space.active_content(), Some(a));
}

#[test]
fn test_vanished_active_pane_clears_activation() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Left]);
    docked(&mut space, "b", &[DockSite::Right]);
    space.set_active_content(a).unwrap();

    space.detach(a).unwrap();
    space.flush_pending();
    assert_eq!(space.active_content(), None);
    assert_eq!(space.active_pane(), None);
}

// ============================================================================
// find_and_show
// ============================================================================

#[test]
fn test_find_and_show_selects_tab_and_activates() {
    let (mut space, ids) = space_with_contents(&["a", "b"]);
    space.add(ids[0], None, &[DockSite::Centre]).unwrap();
    space.add(ids[1], None, &[DockSite::Centre]).unwrap();

    let pane = space.find_and_show(ids[0]).unwrap();
    assert_eq!(space.pane(pane).unwrap().visible_content(), Some(ids[0]));
    assert_eq!(space.active_content(), Some(ids[0]));
}

#[test]
fn test_find_and_show_falls_back_to_main_when_saved_window_is_gone() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    let b = docked(&mut space, "b", &[DockSite::Centre]);
    space.set_floating(a, true).unwrap();
    space.detach(a).unwrap();
    space.flush_pending(); // tears the empty window down
    let _ = b;

    let pane = space.find_and_show(a).unwrap();
    assert_eq!(space.pane(pane).unwrap().host(), HostId::Main);
}

#[test]
fn test_find_and_show_unhides_its_floating_window() {
    let mut space = DockSpace::new();
    let a = docked(&mut space, "a", &[DockSite::Centre]);
    space.set_floating(a, true).unwrap();
    let id = match space.host_of(a).unwrap() {
        HostId::Floating(id) => id,
        other => panic!("unexpected host {other:?}"),
    };
    space
        .set_floating_bounds(id, Rect::new(10.0, 10.0, 300.0, 200.0))
        .unwrap();
    space.set_floating_visible(id, false).unwrap();

    space.find_and_show(a).unwrap();
    assert!(space.floating_window(id).unwrap().visible);
}
