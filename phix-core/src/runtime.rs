use crate::collision::{CollisionOutcome, CollisionResolver};
use crate::config::{load_settings, ConfigError};
use crate::diagnostics::Diagnostics;
use crate::engine::{Material, MaterialCounts, Particle, Shape, World};
use crate::fluid::WaterModel;
use crate::gas::GasModel;
use crate::influence::{apply_influences, Influence};
use crate::integrator::integrate;
use crate::settings::{Arena, Settings};
use crate::solids::SolidIndex;
use crate::spawn::{apply_requests, DeleteRequest, SpawnRequest};
use glam::Vec2;

/// Everything the caller hands the core for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub spawns: Vec<SpawnRequest>,
    pub deletes: Vec<DeleteRequest>,
    pub influences: Vec<Influence>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty() && self.deletes.is_empty() && self.influences.is_empty()
    }

    pub fn clear(&mut self) {
        self.spawns.clear();
        self.deletes.clear();
        self.influences.clear();
    }
}

/// Bookkeeping from the most recent frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub frame: u64,
    pub spawned: usize,
    pub deleted: usize,
    pub collision: CollisionOutcome,
    pub counts: MaterialCounts,
}

/// Drawable snapshot of a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub shape: Shape,
    pub material: Material,
}

impl From<&Particle> for ParticleState {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            vel: p.vel,
            radius: p.radius,
            shape: p.shape,
            material: p.material,
        }
    }
}

/// Owned simulation state plus the per-material solver scratch space
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub world: World,
    pub arena: Arena,
    settings: Settings,
    collision: CollisionResolver,
    water: WaterModel,
    gas: GasModel,
    solids: SolidIndex,
    last_step: StepStats,
}

impl SimulationContext {
    pub fn new(settings: Settings, arena: Arena) -> Self {
        log::info!(
            "simulation context {}x{} (water cell {}, gas cell {})",
            arena.width,
            arena.height,
            settings.water.grid_cell_size(),
            settings.gas.grid_cell_size()
        );
        Self {
            world: World::new(),
            arena,
            collision: CollisionResolver::new(),
            water: WaterModel::new(settings.water),
            gas: GasModel::new(settings.gas),
            solids: SolidIndex::new(&settings),
            settings,
            last_step: StepStats::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings between frames. Grids whose fluid constants
    /// changed are rebuilt with new cell sizes.
    pub fn set_settings(&mut self, settings: Settings) {
        let water_changed = settings.water != *self.water.params();
        let gas_changed = settings.gas != *self.gas.params();
        if water_changed {
            self.water = WaterModel::new(settings.water);
        }
        if gas_changed {
            self.gas = GasModel::new(settings.gas);
        }
        if water_changed || gas_changed {
            self.solids = SolidIndex::new(&settings);
        }
        self.settings = settings;
    }

    pub fn solid_index(&self) -> &SolidIndex {
        &self.solids
    }

    /// Edit settings in place, e.g. from a slider
    pub fn update_settings(&mut self, f: impl FnOnce(&mut Settings)) {
        let mut next = self.settings.clone();
        f(&mut next);
        self.set_settings(next);
    }

    pub fn last_step(&self) -> &StepStats {
        &self.last_step
    }

    pub fn water_model(&self) -> &WaterModel {
        &self.water
    }

    pub fn particles(&self) -> &[Particle] {
        &self.world.particles
    }
}

/// Build a context with default settings
pub fn build_simulation_context(arena: Arena) -> SimulationContext {
    SimulationContext::new(Settings::default(), arena)
}

/// Build a context from a settings file
pub fn build_simulation_context_from_source(
    source: &str,
) -> Result<(SimulationContext, Diagnostics), ConfigError> {
    let (file, diagnostics) = load_settings(source)?;
    for warning in diagnostics.warnings() {
        log::warn!("{}", warning);
    }
    Ok((SimulationContext::new(file.settings, file.arena), diagnostics))
}

/// Advance the sandbox by one frame.
///
/// Requests and influences are applied first, then integration, the water
/// and gas force models, and finally the iterative collision solve.
pub fn step_simulation(ctx: &mut SimulationContext, input: &FrameInput) {
    let (spawned, deleted) = apply_requests(&mut ctx.world, &input.spawns, &input.deletes);
    let particles = ctx.world.particles.as_mut_slice();

    apply_influences(&input.influences, particles);
    integrate(particles, &ctx.settings, &ctx.arena);

    ctx.solids.rebuild(particles);
    ctx.water.apply(particles, &ctx.solids);
    ctx.gas.apply(particles, &ctx.solids);

    let collision = ctx
        .collision
        .resolve(particles, ctx.settings.collision_restitution);

    ctx.last_step = StepStats {
        frame: ctx.last_step.frame + 1,
        spawned,
        deleted,
        collision,
        counts: ctx.world.counts(),
    };
    log::trace!(
        "frame {}: {} particles, {} collision iterations",
        ctx.last_step.frame,
        ctx.last_step.counts.total(),
        collision.iterations
    );
}

/// Run `frames` frames with no input
pub fn run_frames(ctx: &mut SimulationContext, frames: usize) {
    let idle = FrameInput::default();
    for _ in 0..frames {
        step_simulation(ctx, &idle);
    }
}

/// Snapshot of every particle for drawing
pub fn get_particle_states(ctx: &SimulationContext) -> Vec<ParticleState> {
    ctx.world.particles.iter().map(ParticleState::from).collect()
}
