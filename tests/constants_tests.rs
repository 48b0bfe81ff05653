// Host-side tests for tuning constants and their relationships.

use std::time::Duration;
use whack_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert_eq!(SPHERE_COUNT, 125);
    assert_eq!(ROUND_LENGTH, Duration::from_secs(60));
    assert!(GRID_SPACING > 0.0);
    assert!(HIT_RADIUS > 0.0);
    assert!(PREVIEW_DIVISOR > 0);
    assert!(MAX_PICK_ATTEMPTS > 0);
    assert!(NEAR_PLANE > 0.0 && FAR_PLANE > NEAR_PLANE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_have_logical_relationships() {
    // neighbouring spheres must not overlap, nor their hit zones
    assert!(SPHERE_SCALE * 2.0 < GRID_SPACING);
    assert!(HIT_RADIUS * 2.0 < GRID_SPACING);

    // the cursor is drawn smaller than a target
    assert!(CURSOR_SCALE < SPHERE_SCALE);
}

#[test]
fn default_config_mirrors_constants() {
    let config = GameConfig::default();
    assert_eq!(config.grid_size, GRID_SIZE);
    assert_eq!(config.grid_spacing, GRID_SPACING);
    assert_eq!(config.hit_radius, HIT_RADIUS);
    assert_eq!(config.round_length, ROUND_LENGTH);
    assert_eq!(config.seed, None);
    assert_eq!(GameConfig::default().with_seed(4).seed, Some(4));

    let clip = ClipPlanes::default();
    assert_eq!((clip.near, clip.far), (NEAR_PLANE, FAR_PLANE));
}
