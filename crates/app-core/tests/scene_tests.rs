// End-to-end behavior of the composed scene: gesture-driven mode changes,
// manual override, and simultaneous migration of all three populations.

use app_core::constants::{CAMERA_BASE_Y, CAMERA_BASE_Z, CAMERA_LOOK_AT};
use app_core::progress::Mode;
use app_core::sampler::GestureSample;
use app_core::scene::{FrameTransforms, SceneState};
use glam::Vec3;

const FRAME: f32 = 1.0 / 60.0;

fn open_hand() -> GestureSample {
    GestureSample {
        is_open: true,
        x: 0.5,
        y: -0.3,
    }
}

#[test]
fn starts_formed_with_no_load_animation() {
    let scene = SceneState::with_counts(100, 10, 5);
    assert_eq!(scene.mode(), Mode::Formed);
    assert_eq!(scene.progress(), 1.0);
}

#[test]
fn open_hand_scatters_everything_at_once() {
    let mut scene = SceneState::with_counts(300, 30, 10);
    let mut formed = FrameTransforms::default();
    scene.write_transforms(0.0, &mut formed);

    scene.apply_sample(open_hand());
    assert_eq!(scene.mode(), Mode::Chaos);

    for _ in 0..120 {
        scene.tick(FRAME);
    }
    assert!(
        scene.progress() < 1.0 && scene.progress() > 0.0,
        "progress should be mid-decay, got {}",
        scene.progress()
    );

    // The camera rig chases the pointing signal asymptotically.
    let pointing = scene.pointing();
    assert!(pointing.x > 0.1 && pointing.x < 0.5, "x not tracking: {pointing}");
    assert!(pointing.y < -0.05 && pointing.y > -0.3, "y not tracking: {pointing}");

    // All three populations drift outward together: the scattered layouts
    // are far larger than the cone, so mean distance from the trunk grows.
    let mut scattered = FrameTransforms::default();
    scene.write_transforms(2.0, &mut scattered);
    let spread = |t: &FrameTransforms| {
        [
            mean_spread(t.foliage.iter().map(|i| i.position)),
            mean_spread(t.ornaments.iter().map(|i| i.position)),
            mean_spread(t.tiles.iter().map(|i| i.position)),
        ]
    };
    let before = spread(&formed);
    let after = spread(&scattered);
    for (population, (b, a)) in ["foliage", "ornaments", "tiles"]
        .iter()
        .zip(before.iter().zip(after.iter()))
    {
        assert!(
            a > b,
            "{population} did not migrate toward the chaos layout: {b} -> {a}"
        );
    }
}

fn mean_spread(points: impl Iterator<Item = [f32; 3]>) -> f32 {
    let mut sum = 0.0;
    let mut n = 0;
    for p in points {
        let v = Vec3::from_array(p);
        sum += (v.x * v.x + v.z * v.z).sqrt();
        n += 1;
    }
    sum / n.max(1) as f32
}

#[test]
fn closed_hand_reforms_the_tree() {
    let mut scene = SceneState::with_counts(50, 5, 3);
    scene.apply_sample(open_hand());
    for _ in 0..300 {
        scene.tick(FRAME);
    }
    let scattered_progress = scene.progress();

    scene.apply_sample(GestureSample::NEUTRAL);
    assert_eq!(scene.mode(), Mode::Formed);
    for _ in 0..300 {
        scene.tick(FRAME);
    }
    assert!(
        scene.progress() > scattered_progress,
        "progress did not climb back toward formed"
    );
}

#[test]
fn double_override_returns_to_the_original_trajectory() {
    let mut scene = SceneState::with_counts(50, 5, 3);
    scene.apply_sample(open_hand());
    for _ in 0..60 {
        scene.tick(FRAME);
    }
    let mode_before = scene.mode();
    let progress_before = scene.progress();

    scene.toggle_mode();
    scene.toggle_mode();
    assert_eq!(scene.mode(), mode_before);

    scene.tick(FRAME);
    assert!(
        scene.progress() < progress_before,
        "trajectory did not resume after double override"
    );
}

#[test]
fn override_holds_until_a_new_sample_arrives() {
    let mut scene = SceneState::with_counts(10, 2, 2);
    scene.apply_sample(GestureSample::NEUTRAL);
    assert_eq!(scene.mode(), Mode::Formed);

    scene.toggle_mode();
    assert_eq!(scene.mode(), Mode::Chaos);

    // Frames pass with no fresh sample: the override stays in force.
    for _ in 0..30 {
        scene.tick(FRAME);
    }
    assert_eq!(scene.mode(), Mode::Chaos);

    // The next completed sample reasserts the classifier's verdict.
    scene.apply_sample(GestureSample::NEUTRAL);
    assert_eq!(scene.mode(), Mode::Formed);
}

#[test]
fn camera_starts_at_base_and_looks_at_the_fixed_point() {
    let scene = SceneState::with_counts(10, 2, 2);
    let camera = scene.camera(16.0 / 9.0);
    assert_eq!(camera.target, CAMERA_LOOK_AT);
    assert_eq!(camera.eye, Vec3::new(0.0, CAMERA_BASE_Y, CAMERA_BASE_Z));
    assert_eq!(camera.aspect, 16.0 / 9.0);
}

#[test]
fn camera_pulls_inward_when_pointing_sideways() {
    let mut scene = SceneState::with_counts(10, 2, 2);
    scene.apply_sample(GestureSample {
        is_open: false,
        x: 1.0,
        y: 0.0,
    });
    for _ in 0..2000 {
        scene.tick(FRAME);
    }
    let camera = scene.camera(1.0);
    assert!(camera.eye.x > 9.0, "eye did not swing sideways: {}", camera.eye);
    assert!(
        camera.eye.z < CAMERA_BASE_Z - 1.5,
        "eye did not dolly in at the side: {}",
        camera.eye
    );
}

#[test]
fn overlay_reflects_the_latest_state() {
    let mut scene = SceneState::with_counts(10, 2, 2);
    let overlay = scene.overlay(false);
    assert_eq!(overlay.mode_label, "FORMED");
    assert!(!overlay.hand_open);
    assert!(!overlay.sampling);

    scene.apply_sample(open_hand());
    let overlay = scene.overlay(true);
    assert_eq!(overlay.mode_label, "CHAOS");
    assert!(overlay.hand_open);
    assert!(overlay.sampling);
}
