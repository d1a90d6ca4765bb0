//! Camera description plus the rig that turns the raw pointing signal into
//! a smoothed eye position.

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{
    CAMERA_BASE_Y, CAMERA_BASE_Z, CAMERA_EASE_RATE_PER_SEC, CAMERA_FOV_RADIANS, CAMERA_LOOK_AT,
    CAMERA_X_SWING, CAMERA_Y_SWING, CAMERA_ZFAR, CAMERA_ZNEAR, CAMERA_Z_PULL,
    POINTING_RATE_PER_SEC,
};
use crate::ease::approach;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Smooths the 2D pointing signal and derives the camera eye from it.
///
/// The rig owns its own replica of the signal; the sampler's raw values are
/// read once per frame and never shared mutably. Smoothing happens twice:
/// raw signal -> smoothed signal -> smoothed eye position, which keeps
/// noisy per-sample jumps out of the final camera motion. Orientation is a
/// fixed look-at, not derived from the signal.
pub struct CameraRig {
    pointing: Vec2,
    eye: Vec3,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            pointing: Vec2::ZERO,
            eye: Vec3::new(0.0, CAMERA_BASE_Y, CAMERA_BASE_Z),
        }
    }

    /// Smoothed copy of the pointing signal, each axis in [-1, 1].
    #[inline]
    pub fn pointing(&self) -> Vec2 {
        self.pointing
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Advance one frame toward the latest raw signal.
    pub fn tick(&mut self, raw: Vec2, dt_sec: f32) {
        let raw = raw.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        self.pointing.x = approach(self.pointing.x, raw.x, dt_sec, POINTING_RATE_PER_SEC);
        self.pointing.y = approach(self.pointing.y, raw.y, dt_sec, POINTING_RATE_PER_SEC);

        // Horizontal arc, raised/lowered with y, pulled inward at the sides
        // so the tree stays in frame when pointing hard left or right.
        let desired = Vec3::new(
            self.pointing.x * CAMERA_X_SWING,
            CAMERA_BASE_Y + self.pointing.y * CAMERA_Y_SWING,
            CAMERA_BASE_Z - self.pointing.x.abs() * CAMERA_Z_PULL,
        );
        self.eye.x = approach(self.eye.x, desired.x, dt_sec, CAMERA_EASE_RATE_PER_SEC);
        self.eye.y = approach(self.eye.y, desired.y, dt_sec, CAMERA_EASE_RATE_PER_SEC);
        self.eye.z = approach(self.eye.z, desired.z, dt_sec, CAMERA_EASE_RATE_PER_SEC);
    }

    /// Camera for the current rig state.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye,
            target: CAMERA_LOOK_AT,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}
