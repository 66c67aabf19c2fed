//! Tests for settings adjustment and spawn helpers

use glam::Vec2;
use phix_core::engine::{Material, Shape};
use phix_core::settings::{Settings, SettingsField};
use phix_core::spawn::{clamp_radius, spawn_cluster, MAX_CLUSTER};
use phix_core::tests::test_helpers::approx_eq_f32;

#[test]
fn test_adjust_clamps_like_the_menu() {
    let mut settings = Settings::default();

    settings.adjust(SettingsField::Gravity, -5.0);
    assert_eq!(settings.gravity, 0.0);

    settings.adjust(SettingsField::MaxSpeed, -100.0);
    assert_eq!(settings.max_speed, 0.1);

    settings.adjust(SettingsField::AirDrag, 3.0);
    assert_eq!(settings.air_drag, 1.0);

    settings.adjust(SettingsField::GroundRestitution, -0.05);
    assert!(approx_eq_f32(settings.ground_restitution, 0.6, 1e-6));
}

#[test]
fn test_distances_move_in_larger_steps() {
    let mut settings = Settings::default();
    settings.adjust(SettingsField::MoveAwayDistance, 0.5);
    assert!(approx_eq_f32(settings.move_away_distance, 105.0, 1e-4));

    settings.adjust(SettingsField::MoveAwayDistance, -100.0);
    assert_eq!(settings.move_away_distance, 10.0);
}

#[test]
fn test_top_barrier_toggles_on_any_delta() {
    let mut settings = Settings::default();
    settings.adjust(SettingsField::TopBarrier, 0.0);
    assert!(!settings.has_top_barrier);
    settings.adjust(SettingsField::TopBarrier, -1.0);
    assert!(settings.has_top_barrier);
    settings.adjust(SettingsField::TopBarrier, 0.01);
    assert!(!settings.has_top_barrier);
}

#[test]
fn test_clamped_reports_nothing_out_of_range() {
    let settings = Settings {
        collision_restitution: 4.0,
        move_attract_strength: 0.0,
        ..Settings::default()
    };
    assert_eq!(
        settings.out_of_range(),
        vec![
            SettingsField::MoveAttractStrength,
            SettingsField::CollisionRestitution
        ]
    );
    let clamped = settings.clamped();
    assert!(clamped.out_of_range().is_empty());
    assert_eq!(clamped.collision_restitution, 1.0);
    assert_eq!(clamped.move_attract_strength, 0.1);
}

#[test]
fn test_radius_clamps_per_material() {
    assert_eq!(clamp_radius(1.0, Material::Solid), 4.0);
    assert_eq!(clamp_radius(500.0, Material::Static), 120.0);
    assert_eq!(clamp_radius(50.0, Material::Water), 20.0);
    assert_eq!(clamp_radius(1.0, Material::Water), 3.0);
    assert_eq!(clamp_radius(50.0, Material::Gas), 30.0);
}

#[test]
fn test_single_spawn_sits_on_center() {
    let center = Vec2::new(300.0, 200.0);
    let requests = spawn_cluster(center, 10.0, Shape::Circle, 1);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].position, center);
    assert_eq!(requests[0].material, Material::Solid);
}

#[test]
fn test_cluster_forms_ring_scaled_by_material() {
    let center = Vec2::new(300.0, 200.0);

    let water = spawn_cluster(center, 50.0, Shape::Water, 4);
    assert_eq!(water.len(), 4);
    for r in &water {
        assert_eq!(r.radius, 20.0);
        assert_eq!(r.material, Material::Water);
        assert!(approx_eq_f32(r.position.distance(center), 10.0, 1e-4));
    }

    let gas = spawn_cluster(center, 10.0, Shape::Gas, 5);
    assert!(gas
        .iter()
        .all(|r| approx_eq_f32(r.position.distance(center), 4.0, 1e-4)));

    let fixed = spawn_cluster(center, 10.0, Shape::Static, 3);
    assert!(fixed.iter().all(|r| r.material == Material::Static));
    assert!(approx_eq_f32(fixed[0].position.distance(center), 6.0, 1e-4));
}

#[test]
fn test_cluster_count_is_clamped() {
    let center = Vec2::ZERO;
    assert_eq!(spawn_cluster(center, 10.0, Shape::Circle, 0).len(), 1);
    assert_eq!(
        spawn_cluster(center, 10.0, Shape::Circle, 500).len(),
        MAX_CLUSTER
    );
}
