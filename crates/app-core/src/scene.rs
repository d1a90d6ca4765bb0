//! Composition root for the core: owns the element records, the progress
//! controller, and the camera rig, and produces the per-frame transform
//! arrays the renderer consumes.

use glam::Vec2;

use crate::animate::{
    foliage_transforms, ornament_transforms, tile_transforms, BodyInstance, PointInstance,
};
use crate::camera::{Camera, CameraRig};
use crate::constants::{FOLIAGE_COUNT, ORNAMENT_COUNT, TILE_COUNT};
use crate::geometry::{
    generate_foliage, generate_ornaments, generate_tiles, FoliageSet, OrnamentSeed, TileSeed,
};
use crate::progress::{Mode, ProgressController};
use crate::sampler::GestureSample;

/// Read-only snapshot for the UI layer, refreshed every frame.
#[derive(Clone, Debug)]
pub struct OverlayState {
    pub mode_label: &'static str,
    pub hand_open: bool,
    pub pointing: Vec2,
    pub sampling: bool,
}

/// Per-frame transform arrays, rebuilt every frame and handed straight to
/// draw submission. Kept around between frames only to reuse allocations.
#[derive(Default)]
pub struct FrameTransforms {
    pub foliage: Vec<PointInstance>,
    pub ornaments: Vec<BodyInstance>,
    pub tiles: Vec<BodyInstance>,
}

/// Everything the render loop needs to drive the installation, minus the
/// renderer itself. The render loop is the sole mutator; the sampler hands
/// in immutable snapshots via [`apply_sample`].
///
/// [`apply_sample`]: SceneState::apply_sample
pub struct SceneState {
    foliage: FoliageSet,
    ornaments: Vec<OrnamentSeed>,
    tiles: Vec<TileSeed>,
    progress: ProgressController,
    rig: CameraRig,
    last_sample: GestureSample,
}

impl SceneState {
    /// Generate the full-size populations and start fully formed.
    pub fn new() -> Self {
        Self::with_counts(FOLIAGE_COUNT, ORNAMENT_COUNT, TILE_COUNT)
    }

    /// Same as [`new`] with explicit population sizes.
    ///
    /// [`new`]: SceneState::new
    pub fn with_counts(foliage: usize, ornaments: usize, tiles: usize) -> Self {
        Self {
            foliage: generate_foliage(foliage),
            ornaments: generate_ornaments(ornaments),
            tiles: generate_tiles(tiles),
            progress: ProgressController::new(Mode::Formed),
            rig: CameraRig::new(),
            last_sample: GestureSample::NEUTRAL,
        }
    }

    /// Feed one completed sampler snapshot: an open hand scatters the tree,
    /// a closed hand forms it, and the pointing signal becomes the camera
    /// target. Call only for genuinely new samples so a manual override
    /// stays in force until the classifier reports again.
    pub fn apply_sample(&mut self, sample: GestureSample) {
        self.last_sample = sample.clamped();
        self.progress.set_mode(if sample.is_open {
            Mode::Chaos
        } else {
            Mode::Formed
        });
    }

    /// Manual override: flip the mode immediately.
    pub fn toggle_mode(&mut self) {
        self.progress.toggle();
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.progress.mode()
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    #[inline]
    pub fn pointing(&self) -> Vec2 {
        self.rig.pointing()
    }

    /// Advance the smoothed scalars one frame. The raw pointing target
    /// holds steady between samples; only smoothing advances here.
    pub fn tick(&mut self, dt_sec: f32) {
        self.progress.tick(dt_sec);
        self.rig.tick(
            Vec2::new(self.last_sample.x, self.last_sample.y),
            dt_sec,
        );
    }

    /// Rebuild all three populations' transforms for this frame.
    pub fn write_transforms(&self, time_sec: f32, out: &mut FrameTransforms) {
        let p = self.progress.value();
        foliage_transforms(&self.foliage, p, time_sec, &mut out.foliage);
        ornament_transforms(&self.ornaments, p, time_sec, &mut out.ornaments);
        tile_transforms(&self.tiles, p, time_sec, &mut out.tiles);
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        self.rig.camera(aspect)
    }

    pub fn overlay(&self, sampling: bool) -> OverlayState {
        OverlayState {
            mode_label: self.progress.mode().label(),
            hand_open: self.last_sample.is_open,
            pointing: self.rig.pointing(),
            sampling,
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}
