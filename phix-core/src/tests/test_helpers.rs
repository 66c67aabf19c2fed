//! Test helper utilities for phix tests

use crate::engine::Particle;
use crate::runtime::SimulationContext;
use crate::settings::{Arena, Settings};
use glam::Vec2;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Check if two vectors are approximately equal component-wise
pub fn approx_eq_vec2(a: Vec2, b: Vec2, tol: f32) -> bool {
    approx_eq_f32(a.x, b.x, tol) && approx_eq_f32(a.y, b.y, tol)
}

/// Arena big enough that walls never matter for particles near the middle
pub fn roomy_arena() -> Arena {
    Arena {
        width: 10_000.0,
        height: 10_000.0,
        padding: 50.0,
    }
}

/// Default settings with gravity and air drag switched off
pub fn weightless_settings() -> Settings {
    Settings {
        gravity: 0.0,
        air_drag: 0.0,
        ..Settings::default()
    }
}

/// Context holding `particles`, with default settings and arena
pub fn context_with(particles: Vec<Particle>) -> SimulationContext {
    context_with_settings(particles, Settings::default(), Arena::default())
}

pub fn context_with_settings(
    particles: Vec<Particle>,
    settings: Settings,
    arena: Arena,
) -> SimulationContext {
    let mut ctx = SimulationContext::new(settings, arena);
    ctx.world.particles = particles;
    ctx
}

/// Square block of water particles with the given spacing, top-left at `origin`
pub fn water_block(
    origin: Vec2,
    columns: usize,
    rows: usize,
    spacing: f32,
    radius: f32,
) -> Vec<Particle> {
    let mut out = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            let pos = origin + Vec2::new(col as f32 * spacing, row as f32 * spacing);
            out.push(Particle::water(pos, radius));
        }
    }
    out
}

/// Largest speed among mobile particles
pub fn max_mobile_speed(particles: &[Particle]) -> f32 {
    particles
        .iter()
        .filter(|p| !p.material.is_static())
        .map(Particle::speed)
        .fold(0.0, f32::max)
}

/// True if every position and velocity is finite
pub fn all_finite(particles: &[Particle]) -> bool {
    particles
        .iter()
        .all(|p| p.pos.is_finite() && p.vel.is_finite())
}
