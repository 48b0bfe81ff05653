//! The reaction game: idle until the trigger is touched, then a timed round of
//! "touch the highlighted sphere".

use std::time::Duration;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::constants::MAX_PICK_ATTEMPTS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Active,
}

/// Round bookkeeping. Read-only outside of [`Game`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundState {
    phase: Phase,
    target: Option<usize>,
    elapsed: Duration,
    score: u32,
    collided: bool,
}

impl RoundState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The sphere drawn with the highlighted style, if a round is running.
    pub fn highlighted(&self) -> Option<usize> {
        if self.is_active() {
            self.target
        } else {
            None
        }
    }
}

/// What the game reacts to in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Monotonic time since the owning clock started.
    pub now: Duration,
    /// Dominant-hand position in tracking space.
    pub cursor: Vec3,
    /// Off-hand grab transform applied to every sphere.
    pub grab: Mat4,
    pub trigger_touched: bool,
}

impl FrameInput {
    pub fn new(now: Duration, cursor: Vec3, trigger_touched: bool) -> Self {
        Self {
            now,
            cursor,
            grab: Mat4::IDENTITY,
            trigger_touched,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted { target: usize },
    Hit { score: u32, next_target: usize },
    RoundOver { final_score: u32 },
}

/// Center-distance test. A distance equal to `radius` is a miss.
#[inline]
pub fn is_hit(target: Vec3, cursor: Vec3, radius: f32) -> bool {
    target.distance(cursor) < radius
}

pub struct Game {
    round: RoundState,
    positions: Vec<Vec3>,
    hit_radius: f32,
    round_length: Duration,
    started_at: Duration,
    trigger_was_touched: bool,
    rng: StdRng,
}

impl Game {
    pub fn new(positions: Vec<Vec3>, config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            round: RoundState::default(),
            positions,
            hit_radius: config.hit_radius,
            round_length: config.round_length,
            started_at: Duration::ZERO,
            trigger_was_touched: false,
            rng,
        }
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Advance one frame. At most one transition happens per call.
    ///
    /// The round timeout is checked before hit detection, so a touch landing
    /// on the same update as the timeout does not score.
    pub fn update(&mut self, input: &FrameInput) -> Option<GameEvent> {
        let trigger_pressed = input.trigger_touched && !self.trigger_was_touched;
        self.trigger_was_touched = input.trigger_touched;

        match self.round.phase {
            Phase::Idle => {
                if trigger_pressed {
                    self.start_round(input.now)
                } else {
                    None
                }
            }
            Phase::Active => {
                self.round.elapsed = input.now.saturating_sub(self.started_at);
                if self.round.elapsed >= self.round_length {
                    return Some(self.end_round());
                }

                if let Some(target) = self.round.target {
                    let target_pos = input.grab.transform_point3(self.positions[target]);
                    if input.trigger_touched && is_hit(target_pos, input.cursor, self.hit_radius) {
                        self.round.collided = true;
                    }
                }

                if self.round.collided {
                    self.round.score += 1;
                    let next_target = self.pick_new_target()?;
                    log::info!("hit! score {}", self.round.score);
                    Some(GameEvent::Hit {
                        score: self.round.score,
                        next_target,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Move the highlight to a random sphere other than the current one.
    pub fn pick_new_target(&mut self) -> Option<usize> {
        let count = self.positions.len();
        let rng = &mut self.rng;
        let draws = (0..MAX_PICK_ATTEMPTS).map(|_| rng.gen_range(0..count));
        let next = choose_target(count, self.round.target, draws);
        self.round.target = next;
        self.round.collided = false;
        log::debug!("target -> {:?}", next);
        next
    }

    fn start_round(&mut self, now: Duration) -> Option<GameEvent> {
        self.round.phase = Phase::Active;
        self.round.score = 0;
        self.round.elapsed = Duration::ZERO;
        self.started_at = now;
        let target = self.pick_new_target()?;
        log::info!("round started, {} spheres", self.positions.len());
        Some(GameEvent::RoundStarted { target })
    }

    fn end_round(&mut self) -> GameEvent {
        let final_score = self.round.score;
        log::info!("round over, final score {}", final_score);
        self.round = RoundState::default();
        self.started_at = Duration::ZERO;
        GameEvent::RoundOver { final_score }
    }
}

/// First of `draws` that differs from `current`.
///
/// If every draw repeats `current` the next index in order is taken instead.
/// A single-sphere scene keeps index 0 and an empty one has no target; `draws`
/// is not consumed in either case.
pub fn choose_target(
    count: usize,
    current: Option<usize>,
    draws: impl IntoIterator<Item = usize>,
) -> Option<usize> {
    match count {
        0 => None,
        1 => Some(0),
        _ => {
            let drawn = draws
                .into_iter()
                .find(|&candidate| Some(candidate) != current);
            Some(drawn.unwrap_or_else(|| current.map_or(0, |c| (c + 1) % count)))
        }
    }
}
