//! Water as a double density relaxation particle fluid.
//!
//! Pass one estimates each water particle's density and near-density from
//! neighbors inside the interaction radius. Pass two turns the density
//! excess into pairwise pressure impulses and damps relative normal motion
//! with viscosity. A last pass keeps water off solid and static obstacles.

use crate::engine::{pair_mut, Material, Particle, MIN_SEPARATION};
use crate::grid::{CellCoord, SpatialGrid};
use crate::settings::WaterParams;
use crate::solids::{apply_boundary, BoundaryResponse, SolidIndex};

/// Density every particle contributes to itself
pub const SELF_DENSITY: f32 = 1.0;

/// Density and near-density of one water particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensitySample {
    pub density: f32,
    pub near_density: f32,
}

/// Falloff `1 - d/h`, or `None` outside the radius or when coincident
#[inline]
pub(crate) fn kernel(dist_sq: f32, radius: f32) -> Option<(f32, f32)> {
    if dist_sq >= radius * radius || dist_sq < MIN_SEPARATION * MIN_SEPARATION {
        return None;
    }
    let dist = dist_sq.sqrt();
    if dist <= 0.0 {
        return None;
    }
    Some((1.0 - dist / radius, dist))
}

/// Water force model with its own grid and density buffers
#[derive(Debug, Clone)]
pub struct WaterModel {
    params: WaterParams,
    grid: SpatialGrid,
    /// Particle index of each water slot, ascending
    indices: Vec<usize>,
    cells: Vec<CellCoord>,
    density: Vec<f32>,
    near_density: Vec<f32>,
}

impl WaterModel {
    pub fn new(params: WaterParams) -> Self {
        Self {
            params,
            grid: SpatialGrid::new(params.grid_cell_size()),
            indices: Vec::new(),
            cells: Vec::new(),
            density: Vec::new(),
            near_density: Vec::new(),
        }
    }

    pub fn params(&self) -> &WaterParams {
        &self.params
    }

    /// Number of water particles seen by the last pass
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Density sample for a particle index from the last pass
    pub fn density_of(&self, particle: usize) -> Option<DensitySample> {
        let slot = self.indices.binary_search(&particle).ok()?;
        Some(DensitySample {
            density: self.density[slot],
            near_density: self.near_density[slot],
        })
    }

    /// Run all three passes over the water particles
    pub fn apply(&mut self, particles: &mut [Particle], solids: &SolidIndex) {
        self.rebuild(particles);
        if self.indices.is_empty() {
            return;
        }
        self.compute_density(particles);
        self.apply_pressure(particles);
        apply_boundary(
            particles,
            &self.indices,
            solids,
            BoundaryResponse {
                rest_distance: self.params.rest_distance,
                push: self.params.boundary_push,
                drag: self.params.boundary_drag,
                reaction: WaterParams::REACTION,
            },
        );
    }

    /// Collect water particles and bucket their slots
    fn rebuild(&mut self, particles: &[Particle]) {
        self.grid.clear();
        self.indices.clear();
        self.cells.clear();
        for (i, p) in particles.iter().enumerate() {
            if p.material == Material::Water {
                let slot = self.indices.len();
                let cell = self.grid.coord_of(p.pos.x, p.pos.y);
                self.indices.push(i);
                self.cells.push(cell);
                self.grid.insert(slot, cell.x, cell.y);
            }
        }
    }

    /// Density estimation only, for inspection without moving anything
    pub fn estimate_density(&mut self, particles: &[Particle]) {
        self.rebuild(particles);
        self.compute_density(particles);
    }

    fn compute_density(&mut self, particles: &[Particle]) {
        let h = self.params.interaction_radius();
        self.density.clear();
        self.near_density.clear();

        for (slot, &pi) in self.indices.iter().enumerate() {
            let pos = particles[pi].pos;
            let mut density = 0.0;
            let mut near_density = 0.0;
            for cell in self.cells[slot].neighborhood() {
                for &other in self.grid.neighbors(cell.x, cell.y) {
                    if other == slot {
                        continue;
                    }
                    let dist_sq = (particles[self.indices[other]].pos - pos).length_squared();
                    if let Some((q, _)) = kernel(dist_sq, h) {
                        density += q * q;
                        near_density += q * q * q;
                    }
                }
            }
            self.density.push(density + SELF_DENSITY);
            self.near_density.push(near_density);
        }
    }

    fn pressure_of(&self, slot: usize) -> (f32, f32) {
        (
            self.params.pressure_stiffness * (self.density[slot] - self.params.rest_density),
            self.params.near_stiffness * self.near_density[slot],
        )
    }

    fn apply_pressure(&self, particles: &mut [Particle]) {
        let h = self.params.interaction_radius();
        let viscosity = self.params.viscosity;

        for slot in 0..self.indices.len() {
            let pi = self.indices[slot];
            let (pressure, near_pressure) = self.pressure_of(slot);

            for cell in self.cells[slot].neighborhood() {
                for &other in self.grid.neighbors(cell.x, cell.y) {
                    if other <= slot {
                        continue;
                    }
                    let pj = self.indices[other];
                    let (a, b) = pair_mut(particles, pi, pj);
                    let delta = b.pos - a.pos;
                    let Some((q, dist)) = kernel(delta.length_squared(), h) else {
                        continue;
                    };
                    let normal = delta / dist;

                    let (other_pressure, other_near) = self.pressure_of(other);
                    let avg_pressure = (pressure + other_pressure) * 0.5;
                    let avg_near = (near_pressure + other_near) * 0.5;
                    let force = q * avg_pressure + q * q * avg_near;
                    if force != 0.0 {
                        let impulse = normal * force;
                        a.vel -= impulse;
                        b.vel += impulse;
                    }

                    let rel_normal = (b.vel - a.vel).dot(normal);
                    let visc = normal * (rel_normal * viscosity * q * 0.5);
                    a.vel += visc;
                    b.vel -= visc;
                }
            }
        }
    }
}
