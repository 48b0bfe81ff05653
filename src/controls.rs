use glam::{Quat, Vec3};

// Desktop stand-ins for controller input. Kept free of winit types so the
// mapping can be exercised without a window.

pub const HAND_REACH_X: f32 = 0.8; // metres covered by the full window width
pub const HAND_REACH_Y: f32 = 0.5;
pub const HAND_DEPTH_DEFAULT: f32 = 0.6;
pub const HAND_DEPTH_MIN: f32 = 0.2;
pub const HAND_DEPTH_MAX: f32 = 1.5;
pub const HAND_DEPTH_PER_LINE: f32 = 0.05;
pub const PIXELS_PER_SCROLL_LINE: f32 = 40.0; // touchpads report pixels, wheels report lines
pub const TURN_RATE: f32 = 1.2; // radians per second while a turn key is held
pub const PITCH_LIMIT: f32 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKey {
    Trigger,
    Grab,
    Recenter,
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
    Quit,
}

/// One-shot requests that the owner of the loop has to carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    None,
    Recenter,
    Quit,
}

#[derive(Clone, Debug)]
pub struct DesktopControls {
    pub pointer_uv: [f32; 2],
    pub pointer_inside: bool,
    pub depth: f32,
    pub yaw: f32,
    pub pitch: f32,
    trigger_key: bool,
    trigger_button: bool,
    grab: bool,
    turning: [bool; 4], // left, right, up, down
}

impl Default for DesktopControls {
    fn default() -> Self {
        Self {
            pointer_uv: [0.5, 0.5],
            pointer_inside: true,
            depth: HAND_DEPTH_DEFAULT,
            yaw: 0.0,
            pitch: 0.0,
            trigger_key: false,
            trigger_button: false,
            grab: false,
            turning: [false; 4],
        }
    }
}

impl DesktopControls {
    pub fn key(&mut self, key: ControlKey, pressed: bool) -> ControlAction {
        match key {
            ControlKey::Trigger => self.trigger_key = pressed,
            ControlKey::Grab => self.grab = pressed,
            ControlKey::TurnLeft => self.turning[0] = pressed,
            ControlKey::TurnRight => self.turning[1] = pressed,
            ControlKey::LookUp => self.turning[2] = pressed,
            ControlKey::LookDown => self.turning[3] = pressed,
            ControlKey::Recenter if pressed => return ControlAction::Recenter,
            ControlKey::Quit if pressed => return ControlAction::Quit,
            ControlKey::Recenter | ControlKey::Quit => {}
        }
        ControlAction::None
    }

    pub fn mouse_button(&mut self, pressed: bool) {
        self.trigger_button = pressed;
    }

    /// Pointer position normalised to the window, origin top-left.
    pub fn pointer_moved(&mut self, uv: [f32; 2]) {
        self.pointer_uv = [uv[0].clamp(0.0, 1.0), uv[1].clamp(0.0, 1.0)];
        self.pointer_inside = true;
    }

    pub fn pointer_left(&mut self) {
        self.pointer_inside = false;
    }

    pub fn scroll(&mut self, lines: f32) {
        self.depth = (self.depth - lines * HAND_DEPTH_PER_LINE).clamp(HAND_DEPTH_MIN, HAND_DEPTH_MAX);
    }

    pub fn scroll_pixels(&mut self, pixels: f32) {
        self.scroll(pixels / PIXELS_PER_SCROLL_LINE);
    }

    /// Look straight ahead again.
    pub fn reset_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    /// Drop every held input, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.trigger_key = false;
        self.trigger_button = false;
        self.grab = false;
        self.turning = [false; 4];
    }

    pub fn advance(&mut self, dt_sec: f32) {
        let step = TURN_RATE * dt_sec;
        if self.turning[0] {
            self.yaw += step;
        }
        if self.turning[1] {
            self.yaw -= step;
        }
        if self.turning[2] {
            self.pitch += step;
        }
        if self.turning[3] {
            self.pitch -= step;
        }
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn trigger_touched(&self) -> bool {
        self.trigger_key || self.trigger_button
    }

    pub fn grab_held(&self) -> bool {
        self.grab
    }

    pub fn head_orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Dominant hand relative to the head, in head space.
    pub fn hand_offset(&self) -> Vec3 {
        let [u, v] = self.pointer_uv;
        Vec3::new((u - 0.5) * HAND_REACH_X, (0.5 - v) * HAND_REACH_Y, -self.depth)
    }
}
