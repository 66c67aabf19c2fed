//! Spawn and delete requests

use crate::engine::{Material, Particle, Shape, World};
use crate::settings::{GasParams, WaterParams, MAX_SOLID_RADIUS, MIN_SOLID_RADIUS};
use glam::Vec2;
use std::f32::consts::TAU;

/// Default reach added to a particle's radius when deleting under the cursor
pub const DELETE_MARGIN: f32 = 15.0;

pub const MAX_CLUSTER: usize = 50;

/// A particle to append at the start of the next frame.
/// The caller is responsible for a positive radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec2,
    pub radius: f32,
    pub shape: Shape,
    pub material: Material,
}

impl SpawnRequest {
    /// Request whose material follows from the shape
    pub fn new(position: Vec2, radius: f32, shape: Shape) -> Self {
        Self {
            position,
            radius,
            shape,
            material: shape.default_material(),
        }
    }

    pub fn particle(&self) -> Particle {
        Particle {
            pos: self.position,
            vel: Vec2::ZERO,
            radius: self.radius,
            shape: self.shape,
            material: self.material,
        }
    }
}

/// Remove everything within `margin` of the particle's edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteRequest {
    pub position: Vec2,
    pub margin: f32,
}

impl DeleteRequest {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            margin: DELETE_MARGIN,
        }
    }

    pub fn hits(&self, particle: &Particle) -> bool {
        let reach = particle.radius + self.margin;
        particle.pos.distance_squared(self.position) < reach * reach
    }
}

/// Radius limits for a material
pub fn radius_bounds(material: Material) -> (f32, f32) {
    match material {
        Material::Water => (WaterParams::MIN_RADIUS, WaterParams::MAX_RADIUS),
        Material::Gas => (GasParams::MIN_RADIUS, GasParams::MAX_RADIUS),
        Material::Solid | Material::Static => (MIN_SOLID_RADIUS, MAX_SOLID_RADIUS),
    }
}

pub fn clamp_radius(radius: f32, material: Material) -> f32 {
    let (lo, hi) = radius_bounds(material);
    radius.clamp(lo, hi)
}

/// Fraction of the radius used as ring offset when spawning a cluster
fn ring_scale(material: Material) -> f32 {
    match material {
        Material::Water => 0.5,
        Material::Gas => 0.4,
        Material::Solid | Material::Static => 0.6,
    }
}

/// `count` particles of `shape` arranged on a ring around `center`.
///
/// The radius is clamped to the material's range and the count to
/// `1..=MAX_CLUSTER`. A cluster of one sits exactly on the center.
pub fn spawn_cluster(center: Vec2, radius: f32, shape: Shape, count: usize) -> Vec<SpawnRequest> {
    let count = count.clamp(1, MAX_CLUSTER);
    let material = shape.default_material();
    let radius = clamp_radius(radius, material);
    let offset = if count > 1 {
        radius * ring_scale(material)
    } else {
        0.0
    };

    (0..count)
        .map(|n| {
            let angle = TAU * n as f32 / count as f32;
            let position = center + Vec2::from_angle(angle) * offset;
            SpawnRequest {
                position,
                radius,
                shape,
                material,
            }
        })
        .collect()
}

/// Append spawned particles and drop deleted ones. Returns (spawned, deleted).
pub fn apply_requests(
    world: &mut World,
    spawns: &[SpawnRequest],
    deletes: &[DeleteRequest],
) -> (usize, usize) {
    let mut deleted = 0;
    for request in deletes {
        deleted += world.remove_where(|p| request.hits(p));
    }
    world.particles.extend(spawns.iter().map(SpawnRequest::particle));
    (spawns.len(), deleted)
}
