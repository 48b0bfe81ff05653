use std::time::Duration;

// Shared gameplay and layout tuning used by the core and the native front-end.

// Scene layout
pub const GRID_SIZE: usize = 5; // spheres per lattice axis
pub const GRID_SPACING: f32 = 0.14; // metres between neighbouring sphere centres
pub const SPHERE_COUNT: usize = GRID_SIZE * GRID_SIZE * GRID_SIZE;

// Visual sizing
pub const SPHERE_SCALE: f32 = 0.035; // uniform scale applied to the unit mesh
pub const CURSOR_SCALE: f32 = 0.02;

// Interaction
pub const HIT_RADIUS: f32 = 0.055; // strict upper bound on cursor-to-target distance
pub const ROUND_LENGTH: Duration = Duration::from_secs(60);
pub const MAX_PICK_ATTEMPTS: usize = 64; // rejection-sampling bound for new targets

// Projection
pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 1000.0;

// Presentation
pub const PREVIEW_DIVISOR: u32 = 4; // on-screen preview is the eye target shrunk by this per axis
pub const CLEAR_COLOR: [f64; 4] = [0.86, 0.86, 0.94, 0.0];

// Mesh tessellation for the shared sphere
pub const SPHERE_RINGS: u32 = 16;
pub const SPHERE_SEGMENTS: u32 = 24;
