//! Frame pump: poll tracking, update the game, draw both eyes, submit, preview.
//!
//! The pump owns its collaborators and talks to the headset and the GPU only
//! through [`HmdRuntime`] and [`StereoPresenter`], so the whole per-frame
//! sequence runs without a window in tests.

use std::time::Duration;

use crate::config::GameConfig;
use crate::error::{FrameError, SetupError};
use crate::game::{FrameInput, Game, GameEvent, RoundState};
use crate::pose::{Hand, HandSample, HandTracker, Pose, TrackingState};
use crate::scene::{grab_transform, DrawItem, SceneContent};
use crate::stereo::{Eye, EyeCalibration, EyeTransform, StereoLayout, Viewport};

/// What the headset receives once both eyes are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSubmission {
    pub viewports: [Viewport; 2],
    /// Eye poses the frame was rendered with.
    pub render_poses: [Pose; 2],
}

/// Headset runtime: calibration, tracking and frame hand-off.
pub trait HmdRuntime {
    fn calibration(&self) -> [EyeCalibration; 2];

    /// Predicted tracking for `frame_index`; `None` if the query failed.
    fn poll_tracking(&mut self, frame_index: u64) -> Option<TrackingState>;

    fn submit_frame(&mut self, frame_index: u64, submission: &FrameSubmission);

    fn recenter(&mut self);
}

/// Draws the shared stereo target and the on-screen preview.
///
/// The shared target never depends on the window, so only the preview can fail.
pub trait StereoPresenter {
    /// Upload this frame's draws and clear the shared target.
    fn begin_frame(&mut self, draws: &[DrawItem]);

    /// Draw every item uploaded by `begin_frame` into `viewport`.
    fn draw_eye(&mut self, eye: Eye, viewport: Viewport, transform: &EyeTransform);

    /// Finish the shared target so it can be handed to the headset.
    fn end_frame(&mut self);

    /// Copy a downsampled view of the finished target to the window.
    fn present_preview(&mut self) -> Result<(), FrameError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub event: Option<GameEvent>,
    /// Whether the window preview was updated. The headset gets every frame.
    pub presented: bool,
}

pub struct FramePump<R, P> {
    runtime: R,
    presenter: P,
    layout: StereoLayout,
    scene: SceneContent,
    game: Game,
    hands: HandTracker,
    last_head: Pose,
    frame_index: u64,
}

impl<R: HmdRuntime, P: StereoPresenter> FramePump<R, P> {
    pub fn new(
        runtime: R,
        presenter: P,
        layout: StereoLayout,
        config: &GameConfig,
    ) -> Result<Self, SetupError> {
        let scene = SceneContent::new(config)?;
        let game = Game::new(scene.positions(), config);
        Ok(Self {
            runtime,
            presenter,
            layout,
            scene,
            game,
            hands: HandTracker::new(),
            last_head: Pose::IDENTITY,
            frame_index: 0,
        })
    }

    pub fn round(&self) -> &RoundState {
        self.game.round()
    }

    pub fn layout(&self) -> &StereoLayout {
        &self.layout
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn recenter(&mut self) {
        log::info!("recentering tracking origin");
        self.runtime.recenter();
    }

    /// Run one full frame. `now` comes from the caller's monotonic clock.
    pub fn frame(&mut self, now: Duration) -> FrameReport {
        self.frame_index += 1;
        let tracking = match self.runtime.poll_tracking(self.frame_index) {
            Some(tracking) => {
                self.last_head = tracking.head;
                tracking
            }
            None => {
                log::debug!("frame {}: no tracking, treating as no input", self.frame_index);
                TrackingState {
                    head: self.last_head,
                    hands: [HandSample::untracked(); 2],
                    ..Default::default()
                }
            }
        };

        let hands = self.hands.resolve(&tracking.hands);
        let grab = grab_transform(&hands[Hand::Left.index()], tracking.input.grab_held);
        let input = FrameInput {
            now,
            cursor: hands[Hand::Right.index()].position,
            grab,
            trigger_touched: tracking.input.trigger_touched,
        };
        let event = self.game.update(&input);

        let draws = self.scene.draw_list(self.game.round(), input.cursor, grab);
        self.presenter.begin_frame(&draws);
        let transforms = self.layout.eye_transforms(&tracking.head);
        for eye in Eye::BOTH {
            self.presenter
                .draw_eye(eye, self.layout.viewport(eye), &transforms[eye.index()]);
        }
        self.presenter.end_frame();

        let submission = FrameSubmission {
            viewports: Eye::BOTH.map(|eye| self.layout.viewport(eye)),
            render_poses: self.layout.eye_poses(&tracking.head),
        };
        self.runtime.submit_frame(self.frame_index, &submission);

        let presented = match self.presenter.present_preview() {
            Ok(()) => true,
            Err(err) => {
                log::debug!("frame {}: preview skipped: {}", self.frame_index, err);
                false
            }
        };
        FrameReport { event, presented }
    }
}
