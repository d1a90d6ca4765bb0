//! One-shot generation of the two fixed layouts (chaos sphere, formed cone)
//! and the static per-element attributes carried alongside them.
//!
//! Everything here runs once at startup. The resulting records are immutable
//! for the lifetime of the application; only a full restart regenerates them.
//! Layouts are deterministic in distribution, not in concrete placement:
//! each run draws fresh randomness.

use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

use crate::constants::{
    CHAOS_RADIUS, FOLIAGE_PALETTE, ORNAMENT_CHAOS_SPREAD, ORNAMENT_PALETTE, TILE_CHAOS_SPREAD,
    TILE_SPIRAL_OFFSET, TILE_SPIRAL_WRAPS, TREE_HEIGHT, TREE_RADIUS,
};

/// Fine particle population, stored column-wise so the animator can walk
/// the arrays without chasing pointers.
pub struct FoliageSet {
    pub chaos: Vec<Vec3>,
    pub target: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
}

impl FoliageSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.chaos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chaos.is_empty()
    }
}

/// Static per-ornament record. All fields are fixed at creation.
#[derive(Clone, Debug)]
pub struct OrnamentSeed {
    pub chaos_pos: Vec3,
    pub target_pos: Vec3,
    pub color: [f32; 3],
    pub base_scale: f32,
    pub spin_rate: f32,
    pub float_phase: f32,
}

/// Static per-tile record. Tiles are uncolored; their orientation state
/// (spin axis + phase) is what distinguishes them.
#[derive(Clone, Debug)]
pub struct TileSeed {
    pub chaos_pos: Vec3,
    pub target_pos: Vec3,
    pub spin_axis: Vec3,
    pub spin_phase: f32,
}

/// Uniform random point inside a solid sphere of radius `radius`.
///
/// The cube root on the radial draw keeps volumetric density uniform
/// (a plain uniform draw would bias points toward the surface) and the
/// arccos draw on the polar angle avoids clustering at the poles.
pub fn chaos_point(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let r = rng.gen::<f32>().cbrt() * radius;
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Radius of the formed cone at normalized height `h_norm` in [0, 1].
/// Linear taper: wide at the base, zero at the apex.
#[inline]
pub fn cone_radius_at(h_norm: f32) -> f32 {
    (1.0 - h_norm) * TREE_RADIUS
}

/// Random point inside the tree cone, uniform over each horizontal disc.
pub fn cone_point(rng: &mut impl Rng) -> Vec3 {
    let y = rng.gen::<f32>() * TREE_HEIGHT - TREE_HEIGHT / 2.0;
    let h_norm = (y + TREE_HEIGHT / 2.0) / TREE_HEIGHT;
    let angle = rng.gen::<f32>() * TAU;
    let r = rng.gen::<f32>().sqrt() * cone_radius_at(h_norm);
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Cone point with the radial distance biased into the outer 20% of the
/// local radius, so ornaments sit near the surface of the tree.
pub fn cone_surface_point(rng: &mut impl Rng) -> Vec3 {
    let y = rng.gen::<f32>() * TREE_HEIGHT - TREE_HEIGHT / 2.0;
    let h_norm = (y + TREE_HEIGHT / 2.0) / TREE_HEIGHT;
    let angle = rng.gen::<f32>() * TAU;
    let r = cone_radius_at(h_norm) * (0.8 + 0.2 * rng.gen::<f32>());
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Deterministic spiral slot for tile `index` of `count`: index fraction
/// maps linearly to height, the radius follows the cone taper plus a fixed
/// clearance, and the angle winds [`TILE_SPIRAL_WRAPS`] full turns.
pub fn spiral_point(index: usize, count: usize) -> Vec3 {
    let f = index as f32 / count.max(1) as f32;
    let y = -TREE_HEIGHT / 2.0 + f * TREE_HEIGHT;
    let radius = (1.0 - f) * TREE_RADIUS + TILE_SPIRAL_OFFSET;
    let angle = f * TILE_SPIRAL_WRAPS * TAU;
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Generate the fine particle population.
pub fn generate_foliage(count: usize) -> FoliageSet {
    let mut rng = rand::thread_rng();
    let mut chaos = Vec::with_capacity(count);
    let mut target = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        chaos.push(chaos_point(&mut rng, CHAOS_RADIUS));
        target.push(cone_point(&mut rng));
        colors.push(FOLIAGE_PALETTE[rng.gen_range(0..FOLIAGE_PALETTE.len())]);
    }
    FoliageSet {
        chaos,
        target,
        colors,
    }
}

/// Generate the ornament population.
pub fn generate_ornaments(count: usize) -> Vec<OrnamentSeed> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| OrnamentSeed {
            chaos_pos: chaos_point(&mut rng, CHAOS_RADIUS * ORNAMENT_CHAOS_SPREAD),
            target_pos: cone_surface_point(&mut rng),
            color: ORNAMENT_PALETTE[usize::from(rng.gen::<bool>())],
            base_scale: 0.2 + rng.gen::<f32>() * 0.3,
            spin_rate: (rng.gen::<f32>() - 0.5) * 2.0,
            float_phase: rng.gen::<f32>() * TAU,
        })
        .collect()
}

/// Generate the tile population along the spiral.
pub fn generate_tiles(count: usize) -> Vec<TileSeed> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| TileSeed {
            chaos_pos: chaos_point(&mut rng, CHAOS_RADIUS * TILE_CHAOS_SPREAD),
            target_pos: spiral_point(i, count),
            spin_axis: Vec3::new(rng.gen(), rng.gen(), rng.gen())
                .try_normalize()
                .unwrap_or(Vec3::Y),
            spin_phase: rng.gen::<f32>() * std::f32::consts::PI,
        })
        .collect()
}
