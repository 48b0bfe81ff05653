use glam::{Quat, UVec2, Vec3};
use whack_core::{
    ControllerInput, EyeCalibration, FovPort, FrameSubmission, HandSample, HmdRuntime, Pose,
    TrackingState,
};

use crate::controls::DesktopControls;

// Headset stand-in roughly matching a first-generation consumer HMD.
const EYE_TARGET_SIZE: UVec2 = UVec2::new(1332, 1586);
const HALF_IPD: f32 = 0.032;
const FOV_UP_TAN: f32 = 1.3316;
const FOV_DOWN_TAN: f32 = 1.3316;
const FOV_INNER_TAN: f32 = 1.0586;
const FOV_OUTER_TAN: f32 = 1.0924;

/// Where the simulated viewer stands: in front of the lattice, level with its centre.
const HEAD_POSITION: Vec3 = Vec3::new(0.28, 0.28, 1.0);
/// Off-hand rest position in head space.
const OFF_HAND_OFFSET: Vec3 = Vec3::new(-0.25, -0.2, -0.4);

/// Simulated headset driven by mouse and keyboard through [`DesktopControls`].
pub struct DesktopHmd {
    controls: DesktopControls,
    last_submitted: u64,
}

impl DesktopHmd {
    pub fn new() -> Self {
        log::info!("using desktop headset simulation");
        Self {
            controls: DesktopControls::default(),
            last_submitted: 0,
        }
    }

    pub fn controls_mut(&mut self) -> &mut DesktopControls {
        &mut self.controls
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.controls.advance(dt_sec);
    }

    fn head(&self) -> Pose {
        Pose::new(HEAD_POSITION, self.controls.head_orientation())
    }
}

impl Default for DesktopHmd {
    fn default() -> Self {
        Self::new()
    }
}

impl HmdRuntime for DesktopHmd {
    fn calibration(&self) -> [EyeCalibration; 2] {
        let left = EyeCalibration {
            fov: FovPort {
                up_tan: FOV_UP_TAN,
                down_tan: FOV_DOWN_TAN,
                left_tan: FOV_OUTER_TAN,
                right_tan: FOV_INNER_TAN,
            },
            eye_offset: Pose::from_position(Vec3::new(-HALF_IPD, 0.0, 0.0)),
            recommended_size: EYE_TARGET_SIZE,
        };
        let right = EyeCalibration {
            fov: FovPort {
                left_tan: FOV_INNER_TAN,
                right_tan: FOV_OUTER_TAN,
                ..left.fov
            },
            eye_offset: Pose::from_position(Vec3::new(HALF_IPD, 0.0, 0.0)),
            recommended_size: EYE_TARGET_SIZE,
        };
        [left, right]
    }

    fn poll_tracking(&mut self, _frame_index: u64) -> Option<TrackingState> {
        let head = self.head();
        let dominant = if self.controls.pointer_inside {
            HandSample::tracked(head.compose(&Pose::from_position(self.controls.hand_offset())))
        } else {
            HandSample::untracked()
        };
        let off_hand = HandSample::tracked(head.compose(&Pose::new(OFF_HAND_OFFSET, Quat::IDENTITY)));
        Some(TrackingState {
            head,
            hands: [off_hand, dominant],
            input: ControllerInput {
                trigger_touched: self.controls.trigger_touched(),
                grab_held: self.controls.grab_held(),
            },
        })
    }

    fn submit_frame(&mut self, frame_index: u64, submission: &FrameSubmission) {
        log::trace!(
            "frame {} submitted, left eye at {:?}",
            frame_index,
            submission.render_poses[0].position
        );
        self.last_submitted = frame_index;
    }

    fn recenter(&mut self) {
        self.controls.reset_view();
        log::debug!("desktop headset recentered after frame {}", self.last_submitted);
    }
}
