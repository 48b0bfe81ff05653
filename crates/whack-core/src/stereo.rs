//! Per-eye projection, view and viewport arithmetic for a side-by-side stereo target.

use glam::{Mat4, UVec2, Vec4};

use crate::config::ClipPlanes;
use crate::constants::PREVIEW_DIVISOR;
use crate::error::SetupError;
use crate::pose::Pose;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Field of view as tangents of the half-angles from the eye's forward axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FovPort {
    pub up_tan: f32,
    pub down_tan: f32,
    pub left_tan: f32,
    pub right_tan: f32,
}

impl FovPort {
    /// Symmetric port from full horizontal and vertical angles in radians.
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        let h = (horizontal * 0.5).tan();
        let v = (vertical * 0.5).tan();
        Self {
            up_tan: v,
            down_tan: v,
            left_tan: h,
            right_tan: h,
        }
    }

    fn is_valid(&self) -> bool {
        let horizontal = self.left_tan + self.right_tan;
        let vertical = self.up_tan + self.down_tan;
        horizontal.is_finite() && vertical.is_finite() && horizontal > 0.0 && vertical > 0.0
    }
}

/// Right-handed off-axis perspective with depth mapped to \[0, 1\].
pub fn projection_from_fov(fov: &FovPort, near: f32, far: f32) -> Mat4 {
    let x_scale = 2.0 / (fov.left_tan + fov.right_tan);
    let x_offset = (fov.right_tan - fov.left_tan) / (fov.left_tan + fov.right_tan);
    let y_scale = 2.0 / (fov.up_tan + fov.down_tan);
    let y_offset = (fov.up_tan - fov.down_tan) / (fov.up_tan + fov.down_tan);
    let depth = far / (near - far);
    Mat4::from_cols(
        Vec4::new(x_scale, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y_scale, 0.0, 0.0),
        Vec4::new(x_offset, y_offset, depth, -1.0),
        Vec4::new(0.0, 0.0, near * depth, 0.0),
    )
}

/// Fixed per-eye data reported by the headset at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeCalibration {
    pub fov: FovPort,
    /// Head-to-eye offset.
    pub eye_offset: Pose,
    /// Render target size the runtime recommends for this eye's FOV.
    pub recommended_size: UVec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The (projection, view) pair used to draw one eye.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeTransform {
    pub projection: Mat4,
    pub view: Mat4,
}

impl EyeTransform {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Everything about the stereo target that is fixed after startup.
#[derive(Clone, Debug, PartialEq)]
pub struct StereoLayout {
    calibration: [EyeCalibration; 2],
    projections: [Mat4; 2],
    viewports: [Viewport; 2],
    target_size: UVec2,
    preview_size: UVec2,
}

impl StereoLayout {
    pub fn new(calibration: [EyeCalibration; 2], clip: ClipPlanes) -> Result<Self, SetupError> {
        clip.validate()?;

        let mut projections = [Mat4::IDENTITY; 2];
        let mut viewports = [Viewport::default(); 2];
        let mut target_size = UVec2::ZERO;
        for eye in Eye::BOTH {
            let cal = &calibration[eye.index()];
            let size = cal.recommended_size;
            if size.x == 0 || size.y == 0 {
                return Err(SetupError::EmptyEyeTarget {
                    eye,
                    width: size.x,
                    height: size.y,
                });
            }
            if !cal.fov.is_valid() {
                return Err(SetupError::DegenerateFov { eye });
            }
            projections[eye.index()] = projection_from_fov(&cal.fov, clip.near, clip.far);
            viewports[eye.index()] = Viewport {
                x: target_size.x,
                y: 0,
                width: size.x,
                height: size.y,
            };
            target_size.x += size.x;
            target_size.y = target_size.y.max(size.y);
        }
        let preview_size = (target_size / PREVIEW_DIVISOR).max(UVec2::ONE);

        log::debug!(
            "stereo target {}x{}, preview {}x{}",
            target_size.x,
            target_size.y,
            preview_size.x,
            preview_size.y
        );
        Ok(Self {
            calibration,
            projections,
            viewports,
            target_size,
            preview_size,
        })
    }

    pub fn target_size(&self) -> UVec2 {
        self.target_size
    }

    pub fn preview_size(&self) -> UVec2 {
        self.preview_size
    }

    pub fn viewport(&self, eye: Eye) -> Viewport {
        self.viewports[eye.index()]
    }

    pub fn projection(&self, eye: Eye) -> Mat4 {
        self.projections[eye.index()]
    }

    /// World-space pose of each eye for the given head pose.
    pub fn eye_poses(&self, head: &Pose) -> [Pose; 2] {
        Eye::BOTH.map(|eye| head.compose(&self.calibration[eye.index()].eye_offset))
    }

    /// Recompute both eye transforms from this frame's head pose.
    pub fn eye_transforms(&self, head: &Pose) -> [EyeTransform; 2] {
        let poses = self.eye_poses(head);
        Eye::BOTH.map(|eye| EyeTransform {
            projection: self.projections[eye.index()],
            view: poses[eye.index()].to_mat4().inverse(),
        })
    }
}
