pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod fluid;
pub mod gas;
pub mod grid;
pub mod influence;
pub mod integrator;
pub mod runtime;
pub mod settings;
pub mod solids;
pub mod spawn;

pub use collision::{CollisionOutcome, CollisionResolver};
pub use config::{load_settings, parse_settings, render_settings, ConfigError, SettingsFile};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use engine::{Material, Particle, Shape, World};
pub use fluid::WaterModel;
pub use gas::GasModel;
pub use grid::SpatialGrid;
pub use influence::{Influence, InfluenceMode};
pub use runtime::{
    build_simulation_context, build_simulation_context_from_source, get_particle_states,
    run_frames, step_simulation, FrameInput, ParticleState, SimulationContext, StepStats,
};
pub use settings::{Arena, GasParams, Settings, SettingsField, WaterParams};
pub use spawn::{spawn_cluster, DeleteRequest, SpawnRequest};

// Shared builders for the phix-core/tests scenarios, compiled into the
// library so the integration test crates can import them
pub mod tests;
