//! Gas: buoyant, loosely repelling particles.
//!
//! Lighter than the water model. There is no density estimate, just a
//! constant lift, anisotropic drag, pairwise repulsion with viscosity and a
//! softer obstacle boundary.

use crate::engine::{pair_mut, Material, Particle};
use crate::fluid::kernel;
use crate::grid::{CellCoord, SpatialGrid};
use crate::settings::GasParams;
use crate::solids::{apply_boundary, BoundaryResponse, SolidIndex};

#[derive(Debug, Clone)]
pub struct GasModel {
    params: GasParams,
    grid: SpatialGrid,
    indices: Vec<usize>,
    cells: Vec<CellCoord>,
}

impl GasModel {
    pub fn new(params: GasParams) -> Self {
        Self {
            params,
            grid: SpatialGrid::new(params.grid_cell_size()),
            indices: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn params(&self) -> &GasParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn apply(&mut self, particles: &mut [Particle], solids: &SolidIndex) {
        self.rebuild(particles);
        if self.indices.is_empty() {
            return;
        }
        self.apply_lift_and_drag(particles);
        self.apply_repulsion(particles);
        apply_boundary(
            particles,
            &self.indices,
            solids,
            BoundaryResponse {
                rest_distance: self.params.rest_distance,
                push: self.params.boundary_push,
                drag: self.params.boundary_drag,
                reaction: GasParams::REACTION,
            },
        );
    }

    fn rebuild(&mut self, particles: &[Particle]) {
        self.grid.clear();
        self.indices.clear();
        self.cells.clear();
        for (i, p) in particles.iter().enumerate() {
            if p.material == Material::Gas {
                let cell = self.grid.coord_of(p.pos.x, p.pos.y);
                self.grid.insert(i, cell.x, cell.y);
                self.indices.push(i);
                self.cells.push(cell);
            }
        }
    }

    /// Buoyancy first, then drag that is twice as strong horizontally
    fn apply_lift_and_drag(&self, particles: &mut [Particle]) {
        let drag_x = 1.0 - self.params.drag;
        let drag_y = 1.0 - self.params.drag * 0.5;
        for &i in &self.indices {
            let vel = &mut particles[i].vel;
            vel.y -= self.params.buoyancy;
            vel.x *= drag_x;
            vel.y *= drag_y;
        }
    }

    fn apply_repulsion(&self, particles: &mut [Particle]) {
        let h = self.params.interaction_radius();

        for (slot, &i) in self.indices.iter().enumerate() {
            for cell in self.cells[slot].neighborhood() {
                for &j in self.grid.neighbors(cell.x, cell.y) {
                    if j <= i {
                        continue;
                    }
                    let (a, b) = pair_mut(particles, i, j);
                    let delta = b.pos - a.pos;
                    let Some((q, dist)) = kernel(delta.length_squared(), h) else {
                        continue;
                    };
                    let normal = delta / dist;

                    let impulse = normal * (self.params.pressure * q * q);
                    a.vel -= impulse;
                    b.vel += impulse;

                    let rel_normal = (b.vel - a.vel).dot(normal);
                    let visc = normal * (rel_normal * self.params.viscosity * q * 0.5);
                    a.vel += visc;
                    b.vel -= visc;
                }
            }
        }
    }
}
