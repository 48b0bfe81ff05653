// Host-side tests for the desktop control mapping.
// The front-end is a binary, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod controls {
    include!("../src/controls.rs");
}

use controls::*;
use glam::Vec3;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn centred_pointer_puts_hand_straight_ahead() {
    let controls = DesktopControls::default();
    assert!(approx_vec(
        controls.hand_offset(),
        Vec3::new(0.0, 0.0, -HAND_DEPTH_DEFAULT)
    ));
}

#[test]
fn pointer_corners_span_the_reach() {
    let mut controls = DesktopControls::default();
    controls.pointer_moved([0.0, 0.0]);
    assert!(approx_vec(
        controls.hand_offset(),
        Vec3::new(-HAND_REACH_X * 0.5, HAND_REACH_Y * 0.5, -HAND_DEPTH_DEFAULT)
    ));
    controls.pointer_moved([1.0, 1.0]);
    assert!(approx_vec(
        controls.hand_offset(),
        Vec3::new(HAND_REACH_X * 0.5, -HAND_REACH_Y * 0.5, -HAND_DEPTH_DEFAULT)
    ));
}

#[test]
fn pointer_outside_window_is_clamped() {
    let mut controls = DesktopControls::default();
    controls.pointer_moved([-3.0, 7.0]);
    assert_eq!(controls.pointer_uv, [0.0, 1.0]);
}

#[test]
fn leaving_and_returning_tracks_pointer_presence() {
    let mut controls = DesktopControls::default();
    assert!(controls.pointer_inside);
    controls.pointer_left();
    assert!(!controls.pointer_inside);
    controls.pointer_moved([0.3, 0.3]);
    assert!(controls.pointer_inside);
}

#[test]
fn trigger_from_key_or_mouse() {
    let mut controls = DesktopControls::default();
    assert!(!controls.trigger_touched());
    controls.key(ControlKey::Trigger, true);
    assert!(controls.trigger_touched());
    controls.mouse_button(true);
    controls.key(ControlKey::Trigger, false);
    assert!(controls.trigger_touched());
    controls.mouse_button(false);
    assert!(!controls.trigger_touched());
}

#[test]
fn release_all_drops_held_inputs() {
    let mut controls = DesktopControls::default();
    controls.key(ControlKey::Trigger, true);
    controls.key(ControlKey::Grab, true);
    controls.key(ControlKey::TurnLeft, true);
    controls.release_all();
    assert!(!controls.trigger_touched());
    assert!(!controls.grab_held());
    controls.advance(1.0);
    assert_eq!(controls.yaw, 0.0);
}

#[test]
fn recenter_and_quit_fire_on_press_only() {
    let mut controls = DesktopControls::default();
    controls.yaw = 0.7;
    controls.pitch = -0.2;
    assert_eq!(controls.key(ControlKey::Recenter, false), ControlAction::None);
    assert_eq!(controls.yaw, 0.7);
    assert_eq!(controls.key(ControlKey::Recenter, true), ControlAction::Recenter);
    // the headset performs the reset when the action reaches it
    assert_eq!((controls.yaw, controls.pitch), (0.7, -0.2));
    controls.reset_view();
    assert_eq!((controls.yaw, controls.pitch), (0.0, 0.0));

    assert_eq!(controls.key(ControlKey::Quit, false), ControlAction::None);
    assert_eq!(controls.key(ControlKey::Quit, true), ControlAction::Quit);
    assert_eq!(controls.key(ControlKey::Grab, true), ControlAction::None);
}

#[test]
fn scroll_changes_depth_within_limits() {
    let mut controls = DesktopControls::default();
    controls.scroll(2.0);
    assert!((controls.depth - (HAND_DEPTH_DEFAULT - 2.0 * HAND_DEPTH_PER_LINE)).abs() < 1e-6);
    controls.scroll(1000.0);
    assert_eq!(controls.depth, HAND_DEPTH_MIN);
    controls.scroll(-1000.0);
    assert_eq!(controls.depth, HAND_DEPTH_MAX);
}

#[test]
fn pixel_scroll_matches_line_scroll() {
    let mut by_lines = DesktopControls::default();
    let mut by_pixels = DesktopControls::default();
    by_lines.scroll(3.0);
    by_pixels.scroll_pixels(3.0 * PIXELS_PER_SCROLL_LINE);
    assert!((by_lines.depth - by_pixels.depth).abs() < 1e-6);
}

#[test]
fn turning_keys_rotate_head_and_pitch_is_limited() {
    let mut controls = DesktopControls::default();
    controls.key(ControlKey::TurnLeft, true);
    controls.advance(0.5);
    assert!((controls.yaw - TURN_RATE * 0.5).abs() < 1e-6);
    controls.key(ControlKey::TurnLeft, false);

    controls.key(ControlKey::LookUp, true);
    controls.advance(100.0);
    assert_eq!(controls.pitch, PITCH_LIMIT);

    // turned left, so straight ahead now points towards -X
    controls.pitch = 0.0;
    controls.yaw = std::f32::consts::FRAC_PI_2;
    let forward = controls.head_orientation() * Vec3::new(0.0, 0.0, -1.0);
    assert!(approx_vec(forward, Vec3::new(-1.0, 0.0, 0.0)));
}
