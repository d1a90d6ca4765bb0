// Per-population animator behavior: easing, secondary motion, and the
// tile orientation blend.

use app_core::animate::{
    foliage_transforms, ornament_transforms, tile_transforms, BodyInstance, PointInstance,
};
use app_core::constants::{
    BREATHE_AMPLITUDE, ORNAMENT_FLOAT_AMPLITUDE, POINT_BASE_SIZE, POINT_CHAOS_GROWTH,
    SCENE_Y_OFFSET, TILE_CHAOS_SPIN_RATE, TILE_SCALE,
};
use app_core::ease::quad_in_out;
use app_core::geometry::{FoliageSet, OrnamentSeed, TileSeed};
use glam::{Quat, Vec3};

fn tiny_foliage() -> FoliageSet {
    FoliageSet {
        chaos: vec![Vec3::new(10.0, 4.0, -3.0), Vec3::new(-8.0, -2.0, 6.0)],
        target: vec![Vec3::new(1.0, 5.0, 0.5), Vec3::new(-0.5, -6.0, 1.0)],
        colors: vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    }
}

fn one_ornament() -> OrnamentSeed {
    OrnamentSeed {
        chaos_pos: Vec3::new(12.0, 3.0, -7.0),
        target_pos: Vec3::new(2.0, -4.0, 1.0),
        color: [1.0, 0.843, 0.0],
        base_scale: 0.4,
        spin_rate: 0.7,
        float_phase: 0.0,
    }
}

fn one_tile(chaos_pos: Vec3, target_pos: Vec3) -> TileSeed {
    TileSeed {
        chaos_pos,
        target_pos,
        spin_axis: Vec3::new(1.0, 2.0, 0.5).normalize(),
        spin_phase: 1.2,
    }
}

fn rotate_z(instance: &BodyInstance) -> Vec3 {
    Quat::from_array(instance.rotation) * Vec3::Z
}

#[test]
fn foliage_sits_on_chaos_layout_at_zero_progress() {
    let set = tiny_foliage();
    let mut out: Vec<PointInstance> = Vec::new();
    foliage_transforms(&set, 0.0, 3.7, &mut out);
    assert_eq!(out.len(), 2);
    for (i, inst) in out.iter().enumerate() {
        let expected = set.chaos[i] + Vec3::Y * SCENE_Y_OFFSET;
        let got = Vec3::from_array(inst.position);
        assert!(
            (got - expected).length() < 1e-5,
            "foliage {i} not on chaos layout at P=0"
        );
        assert_eq!(inst.size, POINT_BASE_SIZE * (1.0 + POINT_CHAOS_GROWTH));
    }
}

#[test]
fn foliage_breathes_only_when_formed() {
    let set = tiny_foliage();
    let mut a: Vec<PointInstance> = Vec::new();
    let mut b: Vec<PointInstance> = Vec::new();

    // Mid-transition: time must not move anything.
    foliage_transforms(&set, 0.5, 1.0, &mut a);
    foliage_transforms(&set, 0.5, 9.0, &mut b);
    for (p, q) in a.iter().zip(&b) {
        assert_eq!(p.position, q.position, "mid-transition foliage moved with time");
    }

    // Fully formed: the breathing displacement kicks in, bounded by its
    // amplitude, and the points sit within it of the target layout.
    foliage_transforms(&set, 1.0, 1.0, &mut a);
    foliage_transforms(&set, 1.0, 2.3, &mut b);
    let mut moved = false;
    for (i, (p, q)) in a.iter().zip(&b).enumerate() {
        moved |= p.position != q.position;
        let expected = set.target[i] + Vec3::Y * SCENE_Y_OFFSET;
        let got = Vec3::from_array(p.position);
        assert!(
            (got - expected).length() <= 2.0 * BREATHE_AMPLITUDE + 1e-4,
            "formed foliage {i} strayed past the breathing envelope"
        );
        assert_eq!(p.size, POINT_BASE_SIZE);
    }
    assert!(moved, "formed foliage did not breathe over time");
}

#[test]
fn foliage_size_shrinks_as_the_tree_forms() {
    let set = tiny_foliage();
    let mut out: Vec<PointInstance> = Vec::new();
    let mut prev = f32::MAX;
    for step in 0..=10 {
        let p = step as f32 / 10.0;
        foliage_transforms(&set, p, 0.0, &mut out);
        assert!(out[0].size <= prev + 1e-6, "point size grew toward formed");
        prev = out[0].size;
    }
}

#[test]
fn ornament_scale_grows_from_half_to_full() {
    let seed = one_ornament();
    let mut out: Vec<BodyInstance> = Vec::new();

    ornament_transforms(std::slice::from_ref(&seed), 0.0, 0.0, &mut out);
    assert!((out[0].scale - seed.base_scale * 0.5).abs() < 1e-6);

    ornament_transforms(std::slice::from_ref(&seed), 1.0, 0.0, &mut out);
    assert!((out[0].scale - seed.base_scale).abs() < 1e-6);
}

#[test]
fn ornament_float_is_bounded_and_spin_never_stops() {
    let seed = one_ornament();
    let mut out: Vec<BodyInstance> = Vec::new();

    // Vertical float stays inside its amplitude around the lerped height.
    for step in 0..50 {
        let time = step as f32 * 0.13;
        ornament_transforms(std::slice::from_ref(&seed), 1.0, time, &mut out);
        let y = out[0].position[1];
        let base = seed.target_pos.y + SCENE_Y_OFFSET;
        assert!(
            (y - base).abs() <= ORNAMENT_FLOAT_AMPLITUDE + 1e-5,
            "float escaped its amplitude at t={time}"
        );
    }

    // Orientation keeps changing at both ends of the progress range.
    for progress in [0.0, 1.0] {
        ornament_transforms(std::slice::from_ref(&seed), progress, 1.0, &mut out);
        let early = rotate_z(&out[0]);
        ornament_transforms(std::slice::from_ref(&seed), progress, 2.0, &mut out);
        let late = rotate_z(&out[0]);
        assert!(
            (early - late).length() > 1e-4,
            "ornament spin stopped at P={progress}"
        );
    }
}

#[test]
fn formed_tiles_face_outward_regardless_of_chaos_spin() {
    let mut out: Vec<BodyInstance> = Vec::new();
    for (chaos, target) in [
        (Vec3::new(30.0, 5.0, -2.0), Vec3::new(4.0, -3.0, 3.0)),
        (Vec3::new(-11.0, -8.0, 14.0), Vec3::new(-6.0, 2.0, -1.5)),
    ] {
        let seed = one_tile(chaos, target);
        tile_transforms(std::slice::from_ref(&seed), 1.0, 123.4, &mut out);
        let expected = Quat::from_rotation_y(target.x.atan2(target.z));
        let got = rotate_z(&out[0]);
        assert!(
            (got - expected * Vec3::Z).length() < 1e-4,
            "formed tile does not face outward from its position"
        );
    }
}

#[test]
fn scattered_tiles_spin_about_their_own_axis() {
    let seed = one_tile(Vec3::new(20.0, 1.0, 5.0), Vec3::new(3.0, 0.0, 3.0));
    let mut out: Vec<BodyInstance> = Vec::new();
    let time = 4.2_f32;
    tile_transforms(std::slice::from_ref(&seed), 0.0, time, &mut out);
    let expected = Quat::from_axis_angle(
        seed.spin_axis,
        seed.spin_phase + time * TILE_CHAOS_SPIN_RATE,
    );
    let got = rotate_z(&out[0]);
    assert!(
        (got - expected * Vec3::Z).length() < 1e-4,
        "scattered tile ignored its chaos spin"
    );
    assert_eq!(out[0].scale, TILE_SCALE);
}

#[test]
fn tile_facing_tracks_the_live_blended_position() {
    // Chaos and target on opposite sides of the trunk: mid-transition the
    // outward yaw differs sharply from the yaw at the spiral slot, and the
    // blend must use the former.
    let seed = one_tile(Vec3::new(-18.0, 2.0, -9.0), Vec3::new(6.0, -1.0, 2.0));
    let ease = quad_in_out(0.5);
    let blended = seed.chaos_pos.lerp(seed.target_pos, ease);

    let chaos_rot = Quat::from_axis_angle(
        seed.spin_axis,
        seed.spin_phase + 2.0 * TILE_CHAOS_SPIN_RATE,
    );
    let live = chaos_rot.slerp(Quat::from_rotation_y(blended.x.atan2(blended.z)), ease);
    let stale = chaos_rot.slerp(
        Quat::from_rotation_y(seed.target_pos.x.atan2(seed.target_pos.z)),
        ease,
    );

    let mut out: Vec<BodyInstance> = Vec::new();
    tile_transforms(std::slice::from_ref(&seed), 0.5, 2.0, &mut out);
    let got = rotate_z(&out[0]);
    assert!(
        (got - live * Vec3::Z).length() < 1e-4,
        "tile orientation not derived from the live position"
    );
    assert!(
        (got - stale * Vec3::Z).length() > 1e-2,
        "test positions failed to distinguish live from static facing"
    );
}

#[test]
fn tile_position_uses_the_quadratic_ease() {
    let seed = one_tile(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
    let mut out: Vec<BodyInstance> = Vec::new();
    let progress = 0.3;
    tile_transforms(std::slice::from_ref(&seed), progress, 0.0, &mut out);
    let expected =
        seed.chaos_pos.lerp(seed.target_pos, quad_in_out(progress)) + Vec3::Y * SCENE_Y_OFFSET;
    assert!((Vec3::from_array(out[0].position) - expected).length() < 1e-5);
}
