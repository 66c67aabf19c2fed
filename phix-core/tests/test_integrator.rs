//! Unit tests for the integrator and arena boundaries

use glam::Vec2;
use phix_core::engine::{Particle, Shape};
use phix_core::integrator::integrate;
use phix_core::settings::{Arena, Settings};
use phix_core::tests::test_helpers::{approx_eq_f32, weightless_settings};

#[test]
fn test_gravity_then_drag() {
    let settings = Settings::default();
    let arena = Arena::default();
    let mut particles = vec![Particle::solid(Vec2::new(640.0, 300.0), 10.0)];

    integrate(&mut particles, &settings, &arena);

    // vy = (0 + 0.2) * (1 - 0.02)
    assert!(approx_eq_f32(particles[0].vel.y, 0.196, 1e-6));
    assert!(approx_eq_f32(particles[0].pos.y, 300.196, 1e-4));
    assert_eq!(particles[0].vel.x, 0.0);
}

#[test]
fn test_speed_is_capped_preserving_direction() {
    let settings = weightless_settings();
    let arena = Arena::default();
    let mut particles =
        vec![Particle::solid(Vec2::new(640.0, 300.0), 10.0).with_velocity(Vec2::new(30.0, 40.0))];

    integrate(&mut particles, &settings, &arena);

    let vel = particles[0].vel;
    assert!(approx_eq_f32(vel.length(), settings.max_speed, 1e-4));
    assert!(approx_eq_f32(vel.x / vel.y, 0.75, 1e-5));
}

#[test]
fn test_static_particles_are_untouched() {
    let settings = Settings::default();
    let arena = Arena::default();
    let fixed = Particle::fixed(Vec2::new(100.0, 100.0), 20.0, Shape::Static)
        .with_velocity(Vec2::new(3.0, -2.0));
    let mut particles = vec![fixed.clone()];

    for _ in 0..10 {
        integrate(&mut particles, &settings, &arena);
    }

    assert_eq!(particles[0], fixed);
}

#[test]
fn test_floor_reflects_and_applies_friction() {
    let settings = Settings::default();
    let arena = Arena::default();
    let mut particles =
        vec![Particle::solid(Vec2::new(100.0, 665.0), 10.0).with_velocity(Vec2::new(2.0, 3.0))];

    integrate(&mut particles, &settings, &arena);

    let p = &particles[0];
    // Floor sits at 720 - 50
    assert!(approx_eq_f32(p.pos.y, 660.0, 1e-4));
    assert!(approx_eq_f32(p.vel.y, -0.65 * 3.136, 1e-4));
    assert!(approx_eq_f32(p.vel.x, 1.96 * 0.8, 1e-4));
}

#[test]
fn test_side_walls_reflect_without_friction() {
    let settings = weightless_settings();
    let arena = Arena::default();
    let mut particles = vec![
        Particle::solid(Vec2::new(5.0, 300.0), 10.0).with_velocity(Vec2::new(-3.0, 0.0)),
        Particle::solid(Vec2::new(1268.0, 300.0), 10.0).with_velocity(Vec2::new(4.0, 0.0)),
    ];

    integrate(&mut particles, &settings, &arena);

    assert!(approx_eq_f32(particles[0].pos.x, 10.0, 1e-5));
    assert!(approx_eq_f32(particles[0].vel.x, 1.95, 1e-5));
    assert!(approx_eq_f32(particles[1].pos.x, 1270.0, 1e-4));
    assert!(approx_eq_f32(particles[1].vel.x, -2.6, 1e-5));
}

#[test]
fn test_top_barrier_only_when_enabled() {
    let arena = Arena::default();
    let start = Particle::solid(Vec2::new(300.0, 55.0), 10.0).with_velocity(Vec2::new(0.0, -4.0));

    let mut open = vec![start.clone()];
    integrate(&mut open, &weightless_settings(), &arena);
    assert!(approx_eq_f32(open[0].pos.y, 51.0, 1e-5));
    assert!(open[0].vel.y < 0.0);

    let closed_settings = Settings {
        has_top_barrier: true,
        ..weightless_settings()
    };
    let mut closed = vec![start];
    integrate(&mut closed, &closed_settings, &arena);
    assert!(approx_eq_f32(closed[0].pos.y, 60.0, 1e-5));
    assert!(approx_eq_f32(closed[0].vel.y, 2.6, 1e-5));
}
