//! Rigid poses and the per-frame tracking snapshot delivered by the headset runtime.

use glam::{Mat4, Quat, Vec3};

/// Position plus orientation in tracking space (metres).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// `translate(position) * rotate(orientation)`.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Apply `offset` in this pose's local frame.
    pub fn compose(&self, offset: &Pose) -> Pose {
        Pose {
            position: self.position + self.orientation * offset.position,
            orientation: (self.orientation * offset.orientation).normalize(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One hand as reported by the runtime this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandSample {
    pub pose: Pose,
    pub tracked: bool,
}

impl HandSample {
    pub fn tracked(pose: Pose) -> Self {
        Self {
            pose,
            tracked: true,
        }
    }

    pub fn untracked() -> Self {
        Self::default()
    }
}

/// Controller button/touch state relevant to the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerInput {
    /// Dominant-hand index finger resting on the trigger.
    pub trigger_touched: bool,
    /// Off-hand grab button held.
    pub grab_held: bool,
}

/// Everything the runtime reports for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackingState {
    pub head: Pose,
    pub hands: [HandSample; 2],
    pub input: ControllerInput,
}

/// Substitutes the last tracked pose for a hand the runtime lost.
///
/// A hand that has never been tracked resolves to the identity pose.
#[derive(Clone, Debug, Default)]
pub struct HandTracker {
    last_known: [Pose; 2],
}

impl HandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve this frame's samples into usable poses, remembering tracked ones.
    pub fn resolve(&mut self, hands: &[HandSample; 2]) -> [Pose; 2] {
        for hand in Hand::BOTH {
            let sample = &hands[hand.index()];
            if sample.tracked {
                self.last_known[hand.index()] = sample.pose;
            }
        }
        self.last_known
    }
}
