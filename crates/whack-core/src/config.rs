use std::time::Duration;

use crate::constants::*;
use crate::error::SetupError;

/// Gameplay and layout parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub grid_size: usize,
    pub grid_spacing: f32,
    pub sphere_scale: f32,
    pub cursor_scale: f32,
    pub hit_radius: f32,
    pub round_length: Duration,
    /// Fixed seed for target selection; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            grid_spacing: GRID_SPACING,
            sphere_scale: SPHERE_SCALE,
            cursor_scale: CURSOR_SCALE,
            hit_radius: HIT_RADIUS,
            round_length: ROUND_LENGTH,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Near/far distances shared by both eye projections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPlanes {
    pub near: f32,
    pub far: f32,
}

impl Default for ClipPlanes {
    fn default() -> Self {
        Self {
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }
}

impl ClipPlanes {
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.near > 0.0 && self.far > self.near && self.far.is_finite() {
            Ok(())
        } else {
            Err(SetupError::InvalidClipPlanes {
                near: self.near,
                far: self.far,
            })
        }
    }
}
