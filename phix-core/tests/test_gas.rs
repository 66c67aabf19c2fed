//! Unit tests for the gas model

use glam::Vec2;
use phix_core::engine::Particle;
use phix_core::gas::GasModel;
use phix_core::integrator::integrate;
use phix_core::settings::{Arena, GasParams, Settings};
use phix_core::solids::SolidIndex;
use phix_core::tests::test_helpers::approx_eq_f32;

fn apply_gas(particles: &mut [Particle]) {
    let mut solids = SolidIndex::default();
    solids.rebuild(particles);
    GasModel::new(GasParams::default()).apply(particles, &solids);
}

#[test]
fn test_resting_gas_rises_after_one_frame() {
    let settings = Settings::default();
    let mut particles = vec![Particle::gas(Vec2::new(400.0, 300.0), 8.0)];

    integrate(&mut particles, &settings, &Arena::default());
    let before_gas = particles[0].vel;
    apply_gas(&mut particles);

    let vel = particles[0].vel;
    assert!(vel.y < 0.0);
    // (0.196 - 0.25) * (1 - 0.05 * 0.5)
    assert!(approx_eq_f32(vel.y, (before_gas.y - 0.25) * 0.975, 1e-6));
    assert_eq!(vel.x, 0.0);
}

#[test]
fn test_drag_is_stronger_horizontally() {
    let mut particles =
        vec![Particle::gas(Vec2::new(400.0, 300.0), 8.0).with_velocity(Vec2::new(2.0, 0.0))];

    apply_gas(&mut particles);

    assert!(approx_eq_f32(particles[0].vel.x, 1.9, 1e-6));
    assert!(approx_eq_f32(particles[0].vel.y, -0.25 * 0.975, 1e-6));
}

#[test]
fn test_neighbors_repel_symmetrically() {
    let mut particles = vec![
        Particle::gas(Vec2::new(400.0, 300.0), 8.0),
        Particle::gas(Vec2::new(412.0, 300.0), 8.0),
    ];

    apply_gas(&mut particles);

    assert!(particles[0].vel.x < 0.0);
    assert!(particles[1].vel.x > 0.0);
    assert!(approx_eq_f32(particles[0].vel.x, -particles[1].vel.x, 1e-6));
    assert!(approx_eq_f32(particles[0].vel.y, particles[1].vel.y, 1e-6));
}

#[test]
fn test_far_apart_gas_only_feels_lift() {
    let mut particles = vec![
        Particle::gas(Vec2::new(100.0, 300.0), 8.0),
        Particle::gas(Vec2::new(200.0, 300.0), 8.0),
    ];

    apply_gas(&mut particles);

    for p in &particles {
        assert_eq!(p.vel.x, 0.0);
        assert!(approx_eq_f32(p.vel.y, -0.25 * 0.975, 1e-6));
    }
}

#[test]
fn test_boundary_reaction_is_lighter_than_water() {
    let mut particles = vec![
        Particle::gas(Vec2::new(100.0, 100.0), 5.0),
        Particle::solid(Vec2::new(100.0, 130.0), 10.0),
    ];

    apply_gas(&mut particles);

    // reach = 10 + 5 + 16 = 31, distance 30, push = 1 * 0.12
    assert!(approx_eq_f32(particles[0].vel.y, -0.25 * 0.975 - 0.12, 1e-5));
    assert!(approx_eq_f32(particles[1].vel.y, 0.12 * 0.15, 1e-6));
}

#[test]
fn test_gas_ignores_water_and_solids_as_neighbors() {
    let mut particles = vec![
        Particle::gas(Vec2::new(400.0, 300.0), 8.0),
        Particle::water(Vec2::new(405.0, 300.0), 8.0),
    ];

    apply_gas(&mut particles);

    assert_eq!(particles[1].vel, Vec2::ZERO);
    assert_eq!(particles[0].vel.x, 0.0);
}
