//! Property-based tests for the sandbox solver using proptest
//!
//! These tests check invariants across random scenes:
//! - Speed never exceeds the cap after integration
//! - Mobile particles stay inside the arena after integration
//! - Static particles never move
//! - The contact solver always stops within its iteration budget

use glam::Vec2;
use phix_core::collision::{
    contact_response, resolve_pair, CollisionResolver, MAX_COLLISION_ITERATIONS,
    PENETRATION_SLOP,
};
use phix_core::engine::{Particle, Shape};
use phix_core::integrator::integrate;
use phix_core::runtime::{step_simulation, FrameInput};
use phix_core::settings::{Arena, Settings};
use phix_core::tests::test_helpers::{all_finite, context_with};
use proptest::prelude::*;

const ARENA_WIDTH: f32 = 1280.0;
const ARENA_HEIGHT: f32 = 720.0;

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Circle),
        Just(Shape::Square),
        Just(Shape::Triangle),
        Just(Shape::Water),
        Just(Shape::Gas),
        Just(Shape::Static),
    ]
}

fn mobile_shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Circle),
        Just(Shape::Square),
        Just(Shape::Water),
        Just(Shape::Gas),
    ]
}

/// Position inside the playable part of the default arena
fn position() -> impl Strategy<Value = Vec2> {
    (40.0f32..ARENA_WIDTH - 40.0, 90.0f32..ARENA_HEIGHT - 90.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn velocity(limit: f32) -> impl Strategy<Value = Vec2> {
    (-limit..limit, -limit..limit).prop_map(|(x, y)| Vec2::new(x, y))
}

fn particle(shape: impl Strategy<Value = Shape>) -> impl Strategy<Value = Particle> {
    (position(), velocity(30.0), 3.0f32..30.0, shape).prop_map(|(pos, vel, radius, shape)| {
        let p = Particle::new(pos, radius, shape);
        if p.material.is_static() {
            p
        } else {
            p.with_velocity(vel)
        }
    })
}

fn scene(max: usize) -> impl Strategy<Value = Vec<Particle>> {
    prop::collection::vec(particle(shape()), 1..max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_integrate_caps_speed(
        mut particles in prop::collection::vec(particle(mobile_shape()), 1..40),
        max_speed in 0.5f32..20.0,
        gravity in 0.0f32..2.0,
    ) {
        let settings = Settings { max_speed, gravity, ..Settings::default() };
        integrate(&mut particles, &settings, &Arena::default());

        for p in &particles {
            prop_assert!(
                p.speed() <= max_speed * (1.0 + 1e-4),
                "speed {} exceeds cap {}", p.speed(), max_speed
            );
        }
    }

    #[test]
    fn prop_integrate_keeps_particles_in_arena(
        mut particles in prop::collection::vec(particle(mobile_shape()), 1..40),
        barrier in any::<bool>(),
    ) {
        let settings = Settings { has_top_barrier: barrier, ..Settings::default() };
        let arena = Arena::default();
        integrate(&mut particles, &settings, &arena);

        for p in &particles {
            prop_assert!(p.pos.x >= p.radius - 1e-3);
            prop_assert!(p.pos.x <= arena.width - p.radius + 1e-3);
            prop_assert!(p.pos.y <= arena.floor() - p.radius + 1e-3);
            if barrier {
                prop_assert!(p.pos.y >= arena.ceiling() + p.radius - 1e-3);
            }
        }
    }

    #[test]
    fn prop_static_particles_never_move(particles in scene(60), frames in 1usize..20) {
        let fixed: Vec<(usize, Particle)> = particles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.material.is_static())
            .map(|(i, p)| (i, p.clone()))
            .collect();
        let count = particles.len();

        let mut ctx = context_with(particles);
        let idle = FrameInput::default();
        for _ in 0..frames {
            step_simulation(&mut ctx, &idle);
        }

        prop_assert_eq!(ctx.particles().len(), count);
        for (i, before) in fixed {
            prop_assert_eq!(&ctx.particles()[i], &before);
        }
        prop_assert!(all_finite(ctx.particles()));
    }

    #[test]
    fn prop_collision_solve_is_bounded(mut particles in scene(80), restitution in 0.0f32..1.0) {
        let count = particles.len();
        let outcome = CollisionResolver::new().resolve(&mut particles, restitution);

        prop_assert_eq!(outcome.iterations >= 1, count >= 2);
        prop_assert!(outcome.iterations <= MAX_COLLISION_ITERATIONS);
        prop_assert_eq!(outcome.converged, outcome.resolved_last == 0);
        prop_assert!(all_finite(&particles));
    }

    #[test]
    fn prop_pair_separation_is_exact(
        a_pos in position(),
        angle in 0.0f32..std::f32::consts::TAU,
        fraction in 0.05f32..0.99,
        ra in 4.0f32..40.0,
        rb in 4.0f32..40.0,
        vel_a in velocity(10.0),
        vel_b in velocity(10.0),
    ) {
        let combined = ra + rb;
        let b_pos = a_pos + Vec2::from_angle(angle) * (combined * fraction);
        let mut a = Particle::solid(a_pos, ra).with_velocity(vel_a);
        let mut b = Particle::solid(b_pos, rb).with_velocity(vel_b);
        let response = contact_response(a.material, b.material, 0.85);
        prop_assume!(response.is_some());

        let resolved = response.map(|r| resolve_pair(&mut a, &mut b, r)).unwrap_or(false);

        prop_assert!(resolved);
        let distance = a.pos.distance(b.pos);
        prop_assert!(
            (distance - (combined + PENETRATION_SLOP)).abs() < 1e-2,
            "distance {} after separating radii {} + {}", distance, ra, rb
        );
        // Impulses never make the pair approach faster along the normal
        let normal = (b.pos - a.pos) / distance;
        prop_assert!((b.vel - a.vel).dot(normal) >= -1e-3);
    }
}
