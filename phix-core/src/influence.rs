//! Cursor influences: radial impulses applied before integration

use crate::engine::{Particle, MIN_SEPARATION};
use crate::settings::Settings;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfluenceMode {
    Attract,
    Repel,
}

/// A point influence active for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Influence {
    pub position: Vec2,
    pub radius: f32,
    pub strength: f32,
    pub mode: InfluenceMode,
}

impl Influence {
    /// Push particles away using the configured repel distance and strength
    pub fn repel(position: Vec2, settings: &Settings) -> Self {
        Self {
            position,
            radius: settings.move_away_distance,
            strength: settings.move_away_strength,
            mode: InfluenceMode::Repel,
        }
    }

    /// Pull particles in using the configured attract distance and strength
    pub fn attract(position: Vec2, settings: &Settings) -> Self {
        Self {
            position,
            radius: settings.move_attract_distance,
            strength: settings.move_attract_strength,
            mode: InfluenceMode::Attract,
        }
    }

    /// Velocity change this influence gives a particle at `pos`
    pub fn impulse_at(&self, pos: Vec2) -> Vec2 {
        let delta = pos - self.position;
        let dist_sq = delta.length_squared();
        if dist_sq >= self.radius * self.radius || dist_sq < MIN_SEPARATION * MIN_SEPARATION {
            return Vec2::ZERO;
        }
        let dir = delta / dist_sq.sqrt();
        match self.mode {
            InfluenceMode::Repel => dir * self.strength,
            InfluenceMode::Attract => -dir * self.strength,
        }
    }
}

/// Apply every influence to every mobile particle in range
pub fn apply_influences(influences: &[Influence], particles: &mut [Particle]) {
    for influence in influences {
        for particle in particles.iter_mut() {
            if particle.material.is_static() {
                continue;
            }
            particle.vel += influence.impulse_at(particle.pos);
        }
    }
}
