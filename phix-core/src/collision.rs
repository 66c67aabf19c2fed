//! Narrow-phase contact resolution between overlapping particles.
//!
//! Mass is replaced by a binary mobility: every mobile particle counts as
//! unit mass and static particles never move. Each sweep rebuilds the grid,
//! pushes overlapping pairs apart and applies restitution and friction
//! impulses. Sweeps repeat until one finds nothing to resolve or the
//! iteration cap is hit, so dense piles may keep a small residual overlap.

use crate::engine::{normal_and_distance, pair_mut, Material, Particle, MIN_SEPARATION};
use crate::grid::{CellCoord, SpatialGrid};
use crate::settings::MAX_SOLID_RADIUS;

pub const MAX_COLLISION_ITERATIONS: usize = 4;

/// Extra separation so resting contacts do not jitter
pub const PENETRATION_SLOP: f32 = 0.001;

/// Friction used between solid bodies
pub const SOLID_FRICTION: f32 = 0.5;

/// Restitution and friction for one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResponse {
    pub restitution: f32,
    pub friction: f32,
}

/// Response for a material pair, or `None` when generic collision is skipped.
///
/// Water-water and gas-gas contacts belong to the fluid models. Two static
/// bodies cannot move, so they are skipped too.
pub fn contact_response(a: Material, b: Material, restitution: f32) -> Option<ContactResponse> {
    use Material::*;
    let (scale, friction) = match (a, b) {
        (Water, Water) | (Gas, Gas) | (Static, Static) => return None,
        (Water, Gas) | (Gas, Water) => (0.2, 0.04),
        (Water, _) | (_, Water) => (0.25, 0.05),
        (Gas, _) | (_, Gas) => (0.3, 0.02),
        (Solid, Solid) | (Solid, Static) | (Static, Solid) => (1.0, SOLID_FRICTION),
    };
    Some(ContactResponse {
        restitution: restitution * scale,
        friction,
    })
}

/// Separate one overlapping pair and exchange impulses.
///
/// Returns `false` when the pair does not overlap.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, response: ContactResponse) -> bool {
    let delta = b.pos - a.pos;
    let combined = a.radius + b.radius;
    if delta.length_squared() >= combined * combined {
        return false;
    }

    let (normal, distance) = normal_and_distance(delta);
    let overlap = combined - distance;
    if overlap <= 0.0 {
        return false;
    }

    let mob_a = a.mobility();
    let mob_b = b.mobility();
    let mob_sum = mob_a + mob_b;
    if mob_sum == 0.0 {
        return false;
    }

    let separation = overlap + PENETRATION_SLOP;
    a.pos -= normal * (separation * mob_a / mob_sum);
    b.pos += normal * (separation * mob_b / mob_sum);

    let rel_vel = b.vel - a.vel;
    let along_normal = rel_vel.dot(normal);
    if along_normal >= 0.0 {
        return true;
    }

    let impulse = normal * (-(1.0 + response.restitution) * along_normal / mob_sum);
    a.vel -= impulse * mob_a;
    b.vel += impulse * mob_b;

    if response.friction != 0.0 {
        let tangent = normal.perp();
        let rel_tangential = rel_vel.dot(tangent);
        let friction = tangent * (rel_tangential * response.friction / mob_sum);
        a.vel += friction * mob_a;
        b.vel -= friction * mob_b;
    }

    true
}

/// What the iterative solve did this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Sweeps run, at most [`MAX_COLLISION_ITERATIONS`]
    pub iterations: usize,
    /// Contacts resolved by the last sweep
    pub resolved_last: usize,
    /// The last sweep found no overlap
    pub converged: bool,
}

/// Iterative contact solver with its own reusable grid
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    grid: SpatialGrid,
    cells: Vec<CellCoord>,
    max_iterations: usize,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionResolver {
    /// Cell size covers two of the largest solids touching
    pub fn new() -> Self {
        Self::with_cell_size(MAX_SOLID_RADIUS * 2.0)
    }

    pub fn with_cell_size(cell_size: f32) -> Self {
        Self {
            grid: SpatialGrid::new(cell_size),
            cells: Vec::new(),
            max_iterations: MAX_COLLISION_ITERATIONS,
        }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Run sweeps until no overlap is left or the iteration cap is reached
    pub fn resolve(&mut self, particles: &mut [Particle], restitution: f32) -> CollisionOutcome {
        let mut outcome = CollisionOutcome {
            converged: true,
            ..CollisionOutcome::default()
        };
        if particles.len() < 2 {
            return outcome;
        }

        for _ in 0..self.max_iterations {
            self.rebuild(particles);
            let resolved = self.sweep(particles, restitution);
            outcome.iterations += 1;
            outcome.resolved_last = resolved;
            outcome.converged = resolved == 0;
            if outcome.converged {
                break;
            }
        }

        if !outcome.converged {
            log::debug!(
                "collision solver stopped at {} iterations with {} contacts still resolving",
                outcome.iterations,
                outcome.resolved_last
            );
        }
        outcome
    }

    fn rebuild(&mut self, particles: &[Particle]) {
        self.grid.clear();
        self.cells.clear();
        for (i, p) in particles.iter().enumerate() {
            let cell = self.grid.coord_of(p.pos.x, p.pos.y);
            self.cells.push(cell);
            self.grid.insert(i, cell.x, cell.y);
        }
    }

    /// One pass over every candidate pair. Returns the number resolved.
    fn sweep(&self, particles: &mut [Particle], restitution: f32) -> usize {
        let mut resolved = 0;
        for i in 0..particles.len() {
            for cell in self.cells[i].neighborhood() {
                for &j in self.grid.neighbors(cell.x, cell.y) {
                    if j <= i {
                        continue;
                    }
                    let (a, b) = pair_mut(particles, i, j);
                    let Some(response) = contact_response(a.material, b.material, restitution)
                    else {
                        continue;
                    };
                    if resolve_pair(a, b, response) {
                        resolved += 1;
                    }
                }
            }
        }
        resolved
    }
}

/// Whether any pair the solver handles still overlaps by more than `tolerance`
pub fn has_overlap(particles: &[Particle], tolerance: f32) -> bool {
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let (a, b) = (&particles[i], &particles[j]);
            if contact_response(a.material, b.material, 0.0).is_none() {
                continue;
            }
            let dist = a.pos.distance(b.pos).max(MIN_SEPARATION);
            if a.radius + b.radius - dist > tolerance {
                return true;
            }
        }
    }
    false
}
