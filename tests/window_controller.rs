use hud_overlay::controller::WindowController;
use hud_overlay::lifecycle::{CloseOutcome, ShutdownDecision, ShutdownPolicy, WindowState};
use hud_overlay::relay::MouseIgnoreOptions;

use mock_surface::{overlay_spec, MockFactory, MockSurface};

fn controller(stay_resident: bool) -> WindowController<MockSurface> {
    WindowController::new(overlay_spec(), ShutdownPolicy { stay_resident })
}

#[test]
fn ready_creates_window_with_fixed_flags() {
    let mut factory = MockFactory::default();
    let mut ctl = controller(false);
    assert_eq!(ctl.state(), WindowState::Absent);

    ctl.on_ready(&mut factory).unwrap();

    assert_eq!(ctl.state(), WindowState::Active);
    let window = ctl.current().unwrap();
    assert_eq!((window.spec.width, window.spec.height), (800, 150));
    assert!(window.spec.transparent);
    assert!(!window.spec.decorations);
    assert!(window.spec.always_on_top);
    assert_eq!(ctl.passthrough(), Some(false));
}

#[test]
fn ready_only_fires_once() {
    let mut factory = MockFactory::default();
    let mut ctl = controller(false);
    ctl.on_ready(&mut factory).unwrap();
    ctl.on_ready(&mut factory).unwrap();
    assert_eq!(factory.created, 1);
    assert!(ctl.is_ready());
}

#[test]
fn activate_with_active_window_creates_nothing() {
    let mut factory = MockFactory::default();
    let mut ctl = controller(true);
    ctl.on_ready(&mut factory).unwrap();

    assert!(!ctl.on_activate(&mut factory).unwrap());
    assert_eq!(ctl.window_count(), 1);
    assert_eq!(factory.created, 1);
}

#[test]
fn activate_when_absent_recreates_exactly_one() {
    let mut factory = MockFactory::default();
    let mut ctl = controller(true);
    ctl.on_ready(&mut factory).unwrap();
    assert_eq!(
        ctl.close_window(),
        CloseOutcome::AllClosed(ShutdownDecision::StayResident)
    );

    assert!(ctl.on_activate(&mut factory).unwrap());
    assert_eq!(ctl.window_count(), 1);
    assert_eq!(ctl.state(), WindowState::Active);
    assert!(!ctl.on_activate(&mut factory).unwrap());
    assert_eq!(factory.created, 2);
}

#[test]
fn create_while_active_adds_independent_window() {
    let mut factory = MockFactory::default();
    let mut ctl = controller(false);
    ctl.create_window(&mut factory).unwrap();
    ctl.create_window(&mut factory).unwrap();

    assert_eq!(ctl.window_count(), 2);
    assert_eq!(ctl.current().unwrap().id, 2);

    assert_eq!(ctl.close_window(), CloseOutcome::Closed { remaining: 1 });
    assert_eq!(ctl.current().unwrap().id, 1);
    assert_eq!(ctl.state(), WindowState::Active);
}

#[test]
fn passthrough_reflects_last_value_set() {
    let mut factory = MockFactory::default();
    let mut ctl = controller(false);
    ctl.create_window(&mut factory).unwrap();
    let opts = MouseIgnoreOptions { forward: true };

    assert_eq!(ctl.set_ignore_mouse_events(true, &opts), Some(true));
    assert_eq!(ctl.passthrough(), Some(true));
    assert_eq!(ctl.set_ignore_mouse_events(true, &opts), Some(true));
    assert_eq!(ctl.passthrough(), Some(true));
    assert_eq!(ctl.set_ignore_mouse_events(false, &MouseIgnoreOptions::default()), Some(true));
    assert_eq!(ctl.passthrough(), Some(false));
    assert_eq!(ctl.current().unwrap().calls.len(), 3);
    assert_eq!(ctl.state(), WindowState::Active);
}

#[test]
fn passthrough_without_window_is_noop() {
    let mut ctl = controller(false);
    for ignore in [true, false, true] {
        assert_eq!(ctl.set_ignore_mouse_events(ignore, &MouseIgnoreOptions::default()), None);
    }
    assert_eq!(ctl.passthrough(), None);
    assert_eq!(ctl.state(), WindowState::Absent);
}

#[test]
fn rejected_passthrough_keeps_previous_state() {
    let mut factory = MockFactory {
        reject_passthrough: true,
        ..Default::default()
    };
    let mut ctl = controller(false);
    ctl.create_window(&mut factory).unwrap();

    assert_eq!(ctl.set_ignore_mouse_events(true, &MouseIgnoreOptions::default()), Some(false));
    assert_eq!(ctl.passthrough(), Some(false));
}

#[test]
fn close_transitions_to_absent_once() {
    let mut factory = MockFactory::default();
    let closed = factory.closed.clone();
    let mut ctl = controller(false);
    ctl.create_window(&mut factory).unwrap();

    assert_eq!(ctl.close_window(), CloseOutcome::AllClosed(ShutdownDecision::Exit));
    assert_eq!(ctl.state(), WindowState::Absent);
    assert_eq!(ctl.close_window(), CloseOutcome::NoWindow);
    assert_eq!(*closed.borrow(), vec![1]);
}

#[test]
fn platform_close_removes_matching_window() {
    let mut factory = MockFactory::default();
    let mut ctl = controller(false);
    ctl.create_window(&mut factory).unwrap();
    ctl.create_window(&mut factory).unwrap();

    assert_eq!(ctl.on_window_closed(1), CloseOutcome::Closed { remaining: 1 });
    assert_eq!(ctl.current().unwrap().id, 2);
    assert_eq!(ctl.on_window_closed(1), CloseOutcome::NoWindow);
    assert_eq!(ctl.on_window_closed(2), CloseOutcome::AllClosed(ShutdownDecision::Exit));
}

#[test]
fn all_closed_follows_policy() {
    assert_eq!(controller(false).on_all_windows_closed(), ShutdownDecision::Exit);
    assert_eq!(
        controller(true).on_all_windows_closed(),
        ShutdownDecision::StayResident
    );
}

#[test]
fn creation_failure_leaves_window_absent() {
    let mut factory = MockFactory {
        fail: true,
        ..Default::default()
    };
    let mut ctl = controller(false);
    assert!(ctl.on_ready(&mut factory).is_err());
    assert_eq!(ctl.state(), WindowState::Absent);
}

#[test]
fn resumed_is_ready_first_then_activate() {
    let mut factory = MockFactory::default();
    let mut ctl = controller(true);

    assert!(ctl.on_resumed(&mut factory).unwrap());
    assert!(ctl.is_ready());
    assert_eq!(ctl.window_count(), 1);

    // Later resumes are re-activation: nothing new while a window is up.
    assert!(!ctl.on_resumed(&mut factory).unwrap());
    assert_eq!(factory.created, 1);

    ctl.close_window();
    assert!(ctl.on_resumed(&mut factory).unwrap());
    assert_eq!(ctl.window_count(), 1);
    assert_eq!(factory.created, 2);
}
