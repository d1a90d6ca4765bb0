use glam::Vec3;

// Shared tuning constants for the installation. All of these are aesthetic
// parameters fixed at compile time; none are runtime-configurable.

// Population sizes
pub const FOLIAGE_COUNT: usize = 15_000;
pub const ORNAMENT_COUNT: usize = 150;
pub const TILE_COUNT: usize = 20;

// Scene shape
pub const CHAOS_RADIUS: f32 = 25.0; // sphere radius for the scattered state
pub const TREE_HEIGHT: f32 = 18.0; // formed-cone height
pub const TREE_RADIUS: f32 = 7.0; // formed-cone base radius
pub const ORNAMENT_CHAOS_SPREAD: f32 = 1.2; // ornaments scatter a little wider than foliage
pub const TILE_CHAOS_SPREAD: f32 = 1.5; // tiles scatter widest of all
pub const TILE_SPIRAL_WRAPS: f32 = 10.0; // full spiral turns from base to apex
pub const TILE_SPIRAL_OFFSET: f32 = 1.5; // radial clearance outside the cone surface
pub const SCENE_Y_OFFSET: f32 = -2.0; // world-space drop applied to every population

// Smoothing rates (per second, first-order exponential approach)
pub const PROGRESS_RATE_PER_SEC: f32 = 0.8; // chaos <-> formed transition speed
pub const POINTING_RATE_PER_SEC: f32 = 3.0; // pointing-signal replica
pub const CAMERA_EASE_RATE_PER_SEC: f32 = 3.0; // second stage applied to the eye position

// Camera
pub const CAMERA_BASE_Y: f32 = 2.0;
pub const CAMERA_BASE_Z: f32 = 22.0;
pub const CAMERA_X_SWING: f32 = 10.0; // horizontal eye offset per unit of pointing x
pub const CAMERA_Y_SWING: f32 = 5.0; // vertical eye offset per unit of pointing y
pub const CAMERA_Z_PULL: f32 = 2.0; // dolly-in per unit of |pointing x|
pub const CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 2.0, 0.0); // fixed look-at above the origin
pub const CAMERA_FOV_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Gesture sampling
pub const SAMPLE_INTERVAL_MS: u64 = 800; // classifier cadence

// Animation details
pub const FORMED_GATE: f32 = 0.95; // eased progress above this counts as fully formed
pub const BREATHE_AMPLITUDE: f32 = 0.05; // sideways sway of formed foliage
pub const ORNAMENT_FLOAT_AMPLITUDE: f32 = 0.1; // per-ornament vertical bob
pub const TILE_CHAOS_SPIN_RATE: f32 = 0.2; // rad/s about the per-tile axis while scattered
pub const TILE_SCALE: f32 = 0.8;

// Point sizing (pre-attenuation; the shader divides by view depth)
pub const POINT_BASE_SIZE: f32 = 4.0;
pub const POINT_CHAOS_GROWTH: f32 = 2.0; // points swell toward the scattered state

// Palette
pub const EMERALD: [f32; 3] = [0.016, 0.388, 0.027]; // #046307
pub const DARK_EMERALD: [f32; 3] = [0.004, 0.196, 0.012]; // #013203
pub const GOLD: [f32; 3] = [1.0, 0.843, 0.0]; // #FFD700
pub const DARK_RED: [f32; 3] = [0.545, 0.0, 0.0]; // #8B0000

pub const FOLIAGE_PALETTE: [[f32; 3]; 3] = [EMERALD, DARK_EMERALD, GOLD];
pub const ORNAMENT_PALETTE: [[f32; 3]; 2] = [GOLD, DARK_RED];
