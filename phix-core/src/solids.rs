use crate::engine::{normal_and_distance, Particle, MIN_SEPARATION};
use crate::grid::SpatialGrid;
use crate::settings::{GasParams, Settings, WaterParams, MAX_SOLID_RADIUS};

/// Grid over solid and static particles, rebuilt once per frame and shared
/// by the water and gas boundary passes.
#[derive(Debug, Clone)]
pub struct SolidIndex {
    grid: SpatialGrid,
    count: usize,
}

impl Default for SolidIndex {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl SolidIndex {
    /// Index whose cells cover the boundary reach of both fluids
    pub fn new(settings: &Settings) -> Self {
        Self {
            grid: SpatialGrid::new(obstacle_cell_size(settings)),
            count: 0,
        }
    }

    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.grid.clear();
        self.count = 0;
        for (i, p) in particles.iter().enumerate() {
            if p.material.is_obstacle() {
                let cell = self.grid.coord_of(p.pos.x, p.pos.y);
                self.grid.insert(i, cell.x, cell.y);
                self.count += 1;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }
}

/// Cell size of the obstacle grid.
///
/// A fluid particle reaches an obstacle up to `radius + rest_distance +
/// obstacle radius` away, so one cell must span the largest such reach.
pub fn obstacle_cell_size(settings: &Settings) -> f32 {
    let water_reach = WaterParams::MAX_RADIUS + settings.water.rest_distance;
    let gas_reach = GasParams::MAX_RADIUS + settings.gas.rest_distance;
    (MAX_SOLID_RADIUS * 2.0).max(water_reach.max(gas_reach) + MAX_SOLID_RADIUS)
}

/// Coefficients of a fluid-against-obstacle boundary pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryResponse {
    /// Extra reach beyond the two radii
    pub rest_distance: f32,
    pub push: f32,
    pub drag: f32,
    /// Share of push and drag handed back to a mobile obstacle
    pub reaction: f32,
}

/// Push each fluid particle in `fluid` away from nearby obstacles and damp
/// its sliding along them.
pub(crate) fn apply_boundary(
    particles: &mut [Particle],
    fluid: &[usize],
    solids: &SolidIndex,
    response: BoundaryResponse,
) {
    if solids.is_empty() {
        return;
    }
    let grid = solids.grid();

    for &fi in fluid {
        let reach = particles[fi].radius + response.rest_distance;
        let cell = grid.coord_of(particles[fi].pos.x, particles[fi].pos.y);

        for neighbor in cell.neighborhood() {
            for &si in grid.neighbors(neighbor.x, neighbor.y) {
                let obstacle = &particles[si];
                let delta = particles[fi].pos - obstacle.pos;
                let allowed = obstacle.radius + reach;
                let dist_sq = delta.length_squared();
                if dist_sq >= allowed * allowed || dist_sq < MIN_SEPARATION * MIN_SEPARATION {
                    continue;
                }
                let (normal, dist) = normal_and_distance(delta);
                let obstacle_mobile = !obstacle.material.is_static();

                let push = normal * ((allowed - dist) * response.push);
                particles[fi].vel += push;
                if obstacle_mobile {
                    particles[si].vel -= push * response.reaction;
                }

                let tangent = normal.perp();
                let rel_tangential = (particles[fi].vel - particles[si].vel).dot(tangent);
                let drag = tangent * (rel_tangential * response.drag);
                particles[fi].vel -= drag;
                if obstacle_mobile {
                    particles[si].vel += drag * response.reaction;
                }
            }
        }
    }
}
