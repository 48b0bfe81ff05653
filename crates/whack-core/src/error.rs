use thiserror::Error;

use crate::stereo::Eye;

/// Fatal problems detected while building the scene or the stereo layout.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SetupError {
    #[error("{eye:?} eye reports an empty render target ({width}x{height})")]
    EmptyEyeTarget { eye: Eye, width: u32, height: u32 },
    #[error("{eye:?} eye field of view is degenerate")]
    DegenerateFov { eye: Eye },
    #[error("clip planes must satisfy 0 < near < far (near={near}, far={far})")]
    InvalidClipPlanes { near: f32, far: f32 },
    #[error("sphere grid needs at least one sphere per axis")]
    EmptyGrid,
}

/// Per-frame host failures. These never end the loop; the frame is skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("presentation surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("presentation surface must be reconfigured")]
    SurfaceLost,
}
