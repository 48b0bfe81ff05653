//! Static sphere lattice plus the hand cursor.
//!
//! The scene holds no per-frame state. Each frame the caller supplies the
//! round (for the highlighted target), the cursor position and the optional
//! grab transform, and gets back a flat list of draws that both eyes share.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::GameConfig;
use crate::error::SetupError;
use crate::game::RoundState;
use crate::pose::Pose;

/// Which fragment variant a draw uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Highlighted,
    Unhighlighted,
}

/// One sphere of the lattice. Immutable after scene setup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectInstance {
    pub position: Vec3,
    /// `translate(position) * scale(sphere_scale)`.
    pub placement: Mat4,
}

/// A single mesh draw: model matrix plus fragment style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub model: Mat4,
    pub style: Style,
}

/// GPU-side layout of a draw; one per instance in the instance buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&DrawItem> for InstanceRaw {
    fn from(item: &DrawItem) -> Self {
        Self {
            model: item.model.to_cols_array_2d(),
        }
    }
}

/// Positions of a `size`^3 lattice, x fastest, then y, then z.
pub fn lattice_positions(size: usize, spacing: f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(size * size * size);
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                out.push(Vec3::new(x as f32, y as f32, z as f32) * spacing);
            }
        }
    }
    out
}

/// Rigid transform attaching the whole lattice to the off-hand while grabbing.
#[inline]
pub fn grab_transform(off_hand: &Pose, grab_held: bool) -> Mat4 {
    if grab_held {
        off_hand.to_mat4()
    } else {
        Mat4::IDENTITY
    }
}

pub struct SceneContent {
    objects: Vec<ObjectInstance>,
    cursor_scale: f32,
}

impl SceneContent {
    pub fn new(config: &GameConfig) -> Result<Self, SetupError> {
        if config.grid_size == 0 {
            return Err(SetupError::EmptyGrid);
        }
        let scale = Mat4::from_scale(Vec3::splat(config.sphere_scale));
        let objects = lattice_positions(config.grid_size, config.grid_spacing)
            .into_iter()
            .map(|position| ObjectInstance {
                position,
                placement: Mat4::from_translation(position) * scale,
            })
            .collect();
        Ok(Self {
            objects,
            cursor_scale: config.cursor_scale,
        })
    }

    pub fn objects(&self) -> &[ObjectInstance] {
        &self.objects
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.objects.iter().map(|o| o.position).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Placement of the cursor at the dominant hand.
    pub fn cursor_placement(&self, hand_position: Vec3) -> Mat4 {
        Mat4::from_translation(hand_position) * Mat4::from_scale(Vec3::splat(self.cursor_scale))
    }

    /// Cursor first, then every sphere in index order.
    pub fn draw_list(&self, round: &RoundState, cursor: Vec3, grab: Mat4) -> Vec<DrawItem> {
        let highlighted = round.highlighted();
        let mut items = Vec::with_capacity(self.objects.len() + 1);
        items.push(DrawItem {
            model: self.cursor_placement(cursor),
            style: Style::Highlighted,
        });
        for (i, object) in self.objects.iter().enumerate() {
            let style = if highlighted == Some(i) {
                Style::Highlighted
            } else {
                Style::Unhighlighted
            };
            items.push(DrawItem {
                model: grab * object.placement,
                style,
            });
        }
        items
    }
}
