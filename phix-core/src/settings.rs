//! Tunable parameters read by the solver each frame.
//!
//! The solver never mutates these. Front-ends change them between frames,
//! either through [`Settings::adjust`] or by reloading a settings file.

/// Largest radius a solid may be spawned with
pub const MAX_SOLID_RADIUS: f32 = 120.0;
pub const MIN_SOLID_RADIUS: f32 = 4.0;

/// Bounded play area. +y points down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            padding: 50.0,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn floor(&self) -> f32 {
        self.height - self.padding
    }

    pub fn ceiling(&self) -> f32 {
        self.padding
    }
}

/// Constants of the water model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterParams {
    pub rest_distance: f32,
    pub rest_density: f32,
    pub pressure_stiffness: f32,
    pub near_stiffness: f32,
    pub viscosity: f32,
    pub boundary_push: f32,
    pub boundary_drag: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            rest_distance: 12.0,
            rest_density: 4.5,
            pressure_stiffness: 0.32,
            near_stiffness: 1.1,
            viscosity: 0.55,
            boundary_push: 0.22,
            boundary_drag: 0.05,
        }
    }
}

impl WaterParams {
    pub const MIN_RADIUS: f32 = 3.0;
    pub const MAX_RADIUS: f32 = 20.0;
    /// Share of a boundary push passed back to a mobile obstacle
    pub const REACTION: f32 = 0.25;

    pub fn interaction_radius(&self) -> f32 {
        self.rest_distance * 1.8
    }

    pub fn grid_cell_size(&self) -> f32 {
        self.rest_distance * 2.0
    }
}

/// Constants of the gas model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasParams {
    pub rest_distance: f32,
    pub pressure: f32,
    pub viscosity: f32,
    pub buoyancy: f32,
    pub drag: f32,
    pub boundary_push: f32,
    pub boundary_drag: f32,
}

impl Default for GasParams {
    fn default() -> Self {
        Self {
            rest_distance: 16.0,
            pressure: 0.12,
            viscosity: 0.08,
            buoyancy: 0.25,
            drag: 0.05,
            boundary_push: 0.12,
            boundary_drag: 0.04,
        }
    }
}

impl GasParams {
    pub const MIN_RADIUS: f32 = 4.0;
    pub const MAX_RADIUS: f32 = 30.0;
    pub const REACTION: f32 = 0.15;

    pub fn interaction_radius(&self) -> f32 {
        self.rest_distance * 1.5
    }

    pub fn grid_cell_size(&self) -> f32 {
        self.rest_distance * 2.0
    }
}

/// Everything a front-end can tune
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub gravity: f32,
    pub max_speed: f32,
    pub move_away_distance: f32,
    pub move_away_strength: f32,
    pub move_attract_distance: f32,
    pub move_attract_strength: f32,
    pub ground_restitution: f32,
    pub collision_restitution: f32,
    pub air_drag: f32,
    pub ground_friction: f32,
    pub has_top_barrier: bool,
    pub water: WaterParams,
    pub gas: GasParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            max_speed: 10.0,
            move_away_distance: 100.0,
            move_away_strength: 5.0,
            move_attract_distance: 200.0,
            move_attract_strength: 10.0,
            ground_restitution: 0.65,
            collision_restitution: 0.85,
            air_drag: 0.02,
            ground_friction: 0.8,
            has_top_barrier: false,
            water: WaterParams::default(),
            gas: GasParams::default(),
        }
    }
}

/// Fields exposed to interactive adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Gravity,
    MaxSpeed,
    MoveAwayDistance,
    MoveAwayStrength,
    MoveAttractDistance,
    MoveAttractStrength,
    GroundRestitution,
    CollisionRestitution,
    AirDrag,
    GroundFriction,
    TopBarrier,
}

impl SettingsField {
    pub const ALL: [SettingsField; 11] = [
        SettingsField::Gravity,
        SettingsField::MaxSpeed,
        SettingsField::MoveAwayDistance,
        SettingsField::MoveAwayStrength,
        SettingsField::MoveAttractDistance,
        SettingsField::MoveAttractStrength,
        SettingsField::GroundRestitution,
        SettingsField::CollisionRestitution,
        SettingsField::AirDrag,
        SettingsField::GroundFriction,
        SettingsField::TopBarrier,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Gravity => "Gravity",
            SettingsField::MaxSpeed => "Max Speed",
            SettingsField::MoveAwayDistance => "Move Away Distance",
            SettingsField::MoveAwayStrength => "Move Away Strength",
            SettingsField::MoveAttractDistance => "Move Attract Distance",
            SettingsField::MoveAttractStrength => "Move Attract Strength",
            SettingsField::GroundRestitution => "Ground Restitution",
            SettingsField::CollisionRestitution => "Collision Restitution",
            SettingsField::AirDrag => "Air Drag",
            SettingsField::GroundFriction => "Ground Friction",
            SettingsField::TopBarrier => "Top Barrier",
        }
    }

    /// Lower and upper bound enforced on the field (booleans have none)
    pub fn bounds(self) -> Option<(f32, f32)> {
        match self {
            SettingsField::Gravity => Some((0.0, f32::INFINITY)),
            SettingsField::MaxSpeed => Some((0.1, f32::INFINITY)),
            SettingsField::MoveAwayDistance | SettingsField::MoveAttractDistance => {
                Some((10.0, f32::INFINITY))
            }
            SettingsField::MoveAwayStrength | SettingsField::MoveAttractStrength => {
                Some((0.1, f32::INFINITY))
            }
            SettingsField::GroundRestitution
            | SettingsField::CollisionRestitution
            | SettingsField::AirDrag
            | SettingsField::GroundFriction => Some((0.0, 1.0)),
            SettingsField::TopBarrier => None,
        }
    }

    /// Distances move in bigger steps than coefficients
    fn step_scale(self) -> f32 {
        match self {
            SettingsField::MoveAwayDistance | SettingsField::MoveAttractDistance => 10.0,
            _ => 1.0,
        }
    }
}

impl Settings {
    /// Current value of a numeric field; booleans read as 0 or 1
    pub fn get(&self, field: SettingsField) -> f32 {
        match field {
            SettingsField::Gravity => self.gravity,
            SettingsField::MaxSpeed => self.max_speed,
            SettingsField::MoveAwayDistance => self.move_away_distance,
            SettingsField::MoveAwayStrength => self.move_away_strength,
            SettingsField::MoveAttractDistance => self.move_attract_distance,
            SettingsField::MoveAttractStrength => self.move_attract_strength,
            SettingsField::GroundRestitution => self.ground_restitution,
            SettingsField::CollisionRestitution => self.collision_restitution,
            SettingsField::AirDrag => self.air_drag,
            SettingsField::GroundFriction => self.ground_friction,
            SettingsField::TopBarrier => {
                if self.has_top_barrier {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    fn slot_mut(&mut self, field: SettingsField) -> Option<&mut f32> {
        match field {
            SettingsField::Gravity => Some(&mut self.gravity),
            SettingsField::MaxSpeed => Some(&mut self.max_speed),
            SettingsField::MoveAwayDistance => Some(&mut self.move_away_distance),
            SettingsField::MoveAwayStrength => Some(&mut self.move_away_strength),
            SettingsField::MoveAttractDistance => Some(&mut self.move_attract_distance),
            SettingsField::MoveAttractStrength => Some(&mut self.move_attract_strength),
            SettingsField::GroundRestitution => Some(&mut self.ground_restitution),
            SettingsField::CollisionRestitution => Some(&mut self.collision_restitution),
            SettingsField::AirDrag => Some(&mut self.air_drag),
            SettingsField::GroundFriction => Some(&mut self.ground_friction),
            SettingsField::TopBarrier => None,
        }
    }

    /// Set a numeric field, clamped to its bounds
    pub fn set(&mut self, field: SettingsField, value: f32) {
        if field == SettingsField::TopBarrier {
            self.has_top_barrier = value != 0.0;
            return;
        }
        let (lo, hi) = field.bounds().unwrap_or((f32::NEG_INFINITY, f32::INFINITY));
        if let Some(slot) = self.slot_mut(field) {
            *slot = value.clamp(lo, hi);
        }
    }

    /// Nudge a field by `delta` the way the in-game menu does.
    ///
    /// Any non-zero delta toggles the top barrier.
    pub fn adjust(&mut self, field: SettingsField, delta: f32) {
        if field == SettingsField::TopBarrier {
            if delta != 0.0 {
                self.has_top_barrier = !self.has_top_barrier;
            }
            return;
        }
        let next = self.get(field) + delta * field.step_scale();
        self.set(field, next);
    }

    /// Copy with every adjustable field pulled into its bounds
    pub fn clamped(&self) -> Settings {
        let mut out = self.clone();
        for field in SettingsField::ALL {
            if field != SettingsField::TopBarrier {
                out.set(field, self.get(field));
            }
        }
        out
    }

    /// Fields whose value lies outside the allowed range
    pub fn out_of_range(&self) -> Vec<SettingsField> {
        SettingsField::ALL
            .into_iter()
            .filter(|&field| match field.bounds() {
                Some((lo, hi)) => {
                    let v = self.get(field);
                    !(lo..=hi).contains(&v)
                }
                None => false,
            })
            .collect()
    }
}
