//! Built-in starting scenes for the headless runner and the viewer

use clap::ValueEnum;
use glam::Vec2;
use phix_core::{Arena, Particle, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// A ramp of obstacles with solids, a pool of water and a gas pocket
    Mixed,
    /// A column of water released against the left wall
    DamBreak,
    /// Gas rising from the floor around a shelf
    GasPlume,
    /// Staggered rows of solids dropping onto the floor
    Pile,
}

impl Scenario {
    pub fn build(self, arena: &Arena) -> Vec<Particle> {
        match self {
            Scenario::Mixed => mixed(arena),
            Scenario::DamBreak => dam_break(arena),
            Scenario::GasPlume => gas_plume(arena),
            Scenario::Pile => pile(arena),
        }
    }
}

/// `columns` x `rows` particles of `shape`, top-left at `origin`
fn block(
    origin: Vec2,
    columns: usize,
    rows: usize,
    spacing: f32,
    radius: f32,
    shape: Shape,
) -> Vec<Particle> {
    let mut out = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            let pos = origin + Vec2::new(col as f32, row as f32) * spacing;
            out.push(Particle::new(pos, radius, shape));
        }
    }
    out
}

fn pile(arena: &Arena) -> Vec<Particle> {
    const RADIUS: f32 = 12.0;
    const SPACING: f32 = 28.0;
    let shapes = [Shape::Circle, Shape::Square, Shape::Triangle];
    let columns = 14;
    let left = arena.width * 0.5 - columns as f32 * SPACING * 0.5;

    let mut out = Vec::new();
    for row in 0..8 {
        let stagger = if row % 2 == 1 { SPACING * 0.5 } else { 0.0 };
        for col in 0..columns {
            let pos = Vec2::new(
                left + stagger + col as f32 * SPACING,
                arena.ceiling() + 40.0 + row as f32 * SPACING,
            );
            out.push(Particle::new(pos, RADIUS, shapes[(row + col) % shapes.len()]));
        }
    }
    out
}

fn dam_break(arena: &Arena) -> Vec<Particle> {
    let spacing = 10.0;
    let rows = 30;
    let origin = Vec2::new(10.0, arena.floor() - rows as f32 * spacing);
    block(origin, 18, rows, spacing, 5.0, Shape::Water)
}

fn gas_plume(arena: &Arena) -> Vec<Particle> {
    let spacing = 14.0;
    let columns = 12;
    let origin = Vec2::new(
        arena.width * 0.5 - columns as f32 * spacing * 0.5,
        arena.floor() - 100.0,
    );
    let mut out = block(origin, columns, 6, spacing, 7.0, Shape::Gas);

    // Shelf the plume has to flow around
    let shelf_y = arena.height * 0.4;
    for n in 0..8 {
        let x = arena.width * 0.5 - 105.0 + n as f32 * 30.0;
        out.push(Particle::fixed(Vec2::new(x, shelf_y), 15.0, Shape::Static));
    }
    out
}

fn mixed(arena: &Arena) -> Vec<Particle> {
    let mut out = Vec::new();

    // Ramp falling toward the right
    for n in 0..10 {
        let pos = Vec2::new(
            arena.width * 0.15 + n as f32 * 34.0,
            arena.height * 0.35 + n as f32 * 12.0,
        );
        out.push(Particle::fixed(pos, 18.0, Shape::Square));
    }

    out.extend(block(
        Vec2::new(arena.width * 0.15, arena.ceiling() + 20.0),
        6,
        3,
        30.0,
        12.0,
        Shape::Circle,
    ));
    out.extend(block(
        Vec2::new(arena.width * 0.6, arena.floor() - 150.0),
        16,
        14,
        10.0,
        5.0,
        Shape::Water,
    ));
    out.extend(block(
        Vec2::new(arena.width * 0.85, arena.floor() - 60.0),
        5,
        3,
        14.0,
        7.0,
        Shape::Gas,
    ));
    out
}
