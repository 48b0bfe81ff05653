use glam::UVec2;

use super::helpers;

/// Shared stereo target: both eyes side by side in one color + depth pair.
///
/// The color view is also sampled when the preview is copied to the window.
pub(crate) struct EyeTargets {
    pub(crate) size: UVec2,
    pub(crate) color_view: wgpu::TextureView,
    pub(crate) depth_view: wgpu::TextureView,
}

impl EyeTargets {
    pub(crate) const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    pub(crate) fn new(device: &wgpu::Device, size: UVec2) -> Self {
        let color_view = helpers::create_target_view(
            device,
            "eye_color",
            size.x,
            size.y,
            Self::COLOR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let depth_view = helpers::create_target_view(
            device,
            "eye_depth",
            size.x,
            size.y,
            helpers::DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self {
            size,
            color_view,
            depth_view,
        }
    }
}
