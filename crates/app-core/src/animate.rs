//! Per-frame transform solvers for the three populations.
//!
//! Each solver is a pure function of (element records, progress, wall-clock
//! time) writing into a caller-owned buffer; nothing here keeps state
//! between frames. All three consume the same progress scalar but apply
//! their own easing curve and secondary motion.

use glam::{EulerRot, Quat};

use crate::constants::{
    BREATHE_AMPLITUDE, FORMED_GATE, ORNAMENT_FLOAT_AMPLITUDE, POINT_BASE_SIZE, POINT_CHAOS_GROWTH,
    SCENE_Y_OFFSET, TILE_CHAOS_SPIN_RATE, TILE_SCALE,
};
use crate::ease::{cubic_in_out, quad_in_out};
use crate::geometry::{FoliageSet, OrnamentSeed, TileSeed};

/// GPU-ready point sprite instance.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// GPU-ready rigid-body instance: position, uniform scale, orientation
/// quaternion (xyzw), color.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub rotation: [f32; 4],
    pub color: [f32; 4],
}

/// Solve the fine particle population.
///
/// Cubic-eased lerp between the two layouts; once the eased factor passes
/// the formed gate an additive sinusoidal displacement makes the canopy
/// breathe. Point size swells toward the scattered state and shrinks as the
/// tree forms (final depth attenuation happens in the shader).
pub fn foliage_transforms(set: &FoliageSet, progress: f32, time_sec: f32, out: &mut Vec<PointInstance>) {
    debug_assert!((0.0..=1.0).contains(&progress));
    out.clear();
    out.reserve(set.len());

    let t = cubic_in_out(progress);
    let breathing = t > FORMED_GATE;
    let size = POINT_BASE_SIZE * (1.0 + (1.0 - t) * POINT_CHAOS_GROWTH);

    for i in 0..set.len() {
        let mut pos = set.chaos[i].lerp(set.target[i], t);
        if breathing {
            pos.x += (time_sec * 2.0 + pos.y).sin() * BREATHE_AMPLITUDE;
            pos.z += (time_sec * 1.5 + pos.y).cos() * BREATHE_AMPLITUDE;
        }
        pos.y += SCENE_Y_OFFSET;
        let c = set.colors[i];
        out.push(PointInstance {
            position: pos.to_array(),
            size,
            color: [c[0], c[1], c[2], 1.0],
        });
    }
}

/// Solve the ornament population.
///
/// Cubic-eased lerp plus an independent per-element vertical float. The
/// two-axis spin never stops; scattered and formed ornaments both rotate.
/// Scale grows from half-size to full-size as the tree forms.
pub fn ornament_transforms(
    seeds: &[OrnamentSeed],
    progress: f32,
    time_sec: f32,
    out: &mut Vec<BodyInstance>,
) {
    debug_assert!((0.0..=1.0).contains(&progress));
    out.clear();
    out.reserve(seeds.len());

    let t = cubic_in_out(progress);
    for seed in seeds {
        let mut pos = seed.chaos_pos.lerp(seed.target_pos, t);
        pos.y += (time_sec + seed.float_phase).sin() * ORNAMENT_FLOAT_AMPLITUDE;
        pos.y += SCENE_Y_OFFSET;

        let spin = time_sec * seed.spin_rate;
        let rotation = Quat::from_euler(EulerRot::XYZ, spin, spin, 0.0);
        let scale = seed.base_scale * (0.5 + 0.5 * t);
        let c = seed.color;
        out.push(BodyInstance {
            position: pos.to_array(),
            scale,
            rotation: rotation.to_array(),
            color: [c[0], c[1], c[2], 1.0],
        });
    }
}

/// Solve the tile population.
///
/// Quadratic ease on the raw progress for both position and the
/// orientation blend. Orientation runs between two poses: a continuous
/// spin about the per-tile random axis while scattered, and a face-outward
/// yaw once formed. The yaw is taken from the tile's current blended
/// position — not its spiral slot — so the facing swings with the tile as
/// it travels; the two poses are combined with a shortest-arc slerp.
pub fn tile_transforms(seeds: &[TileSeed], progress: f32, time_sec: f32, out: &mut Vec<BodyInstance>) {
    debug_assert!((0.0..=1.0).contains(&progress));
    out.clear();
    out.reserve(seeds.len());

    let ease = quad_in_out(progress);
    for seed in seeds {
        let mut pos = seed.chaos_pos.lerp(seed.target_pos, ease);

        let chaos_rot = Quat::from_axis_angle(
            seed.spin_axis,
            seed.spin_phase + time_sec * TILE_CHAOS_SPIN_RATE,
        );
        let formed_rot = Quat::from_rotation_y(pos.x.atan2(pos.z));
        let rotation = chaos_rot.slerp(formed_rot, ease);

        pos.y += SCENE_Y_OFFSET;
        out.push(BodyInstance {
            position: pos.to_array(),
            scale: TILE_SCALE,
            rotation: rotation.to_array(),
            color: [1.0, 1.0, 1.0, 1.0],
        });
    }
}
