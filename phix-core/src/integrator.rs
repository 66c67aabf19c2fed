use crate::engine::Particle;
use crate::settings::{Arena, Settings};

/// Advance every mobile particle by one frame (explicit Euler, no substeps).
///
/// Gravity, air drag and the speed cap act on velocity first, then the
/// position moves and is reflected back inside the arena. Static particles
/// are skipped entirely.
pub fn integrate(particles: &mut [Particle], settings: &Settings, arena: &Arena) {
    let drag_factor = 1.0 - settings.air_drag;
    let max_speed_sq = settings.max_speed * settings.max_speed;

    for particle in particles.iter_mut() {
        if particle.material.is_static() {
            continue;
        }

        particle.vel.y += settings.gravity;
        particle.vel *= drag_factor;

        let speed_sq = particle.vel.length_squared();
        if speed_sq > max_speed_sq {
            particle.vel *= settings.max_speed / speed_sq.sqrt();
        }

        particle.pos += particle.vel;

        enforce_boundaries(particle, settings, arena);
    }
}

/// Clamp a particle inside the arena, reflecting the normal velocity
pub fn enforce_boundaries(particle: &mut Particle, settings: &Settings, arena: &Arena) {
    let r = particle.radius;
    let bounce = -settings.ground_restitution;

    if settings.has_top_barrier && particle.pos.y - r < arena.ceiling() {
        particle.pos.y = arena.ceiling() + r;
        particle.vel.y *= bounce;
    }

    if particle.pos.y + r > arena.floor() {
        particle.pos.y = arena.floor() - r;
        particle.vel.y *= bounce;
        particle.vel.x *= settings.ground_friction;
    }

    if particle.pos.x - r < 0.0 {
        particle.pos.x = r;
        particle.vel.x *= bounce;
    }

    let right = arena.width - r;
    if particle.pos.x > right {
        particle.pos.x = right;
        particle.vel.x *= bounce;
    }
}
