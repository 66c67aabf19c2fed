use glam::Vec2;

/// Distances below this are treated as coincident
pub const MIN_SEPARATION: f32 = 0.0001;

/// Visual shape of a particle. Only drawing and spawn defaults look at this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Water,
    Gas,
    Static,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Water,
        Shape::Gas,
        Shape::Static,
    ];

    /// Material a particle of this shape is spawned with
    pub fn default_material(self) -> Material {
        match self {
            Shape::Water => Material::Water,
            Shape::Gas => Material::Gas,
            Shape::Static => Material::Static,
            Shape::Circle | Shape::Square | Shape::Triangle => Material::Solid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shape::Circle => "Circle",
            Shape::Square => "Square",
            Shape::Triangle => "Triangle",
            Shape::Water => "Water",
            Shape::Gas => "Gas",
            Shape::Static => "Static",
        }
    }
}

/// Physics classification of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Solid,
    Water,
    Gas,
    Static,
}

impl Material {
    /// Binary stand-in for inverse mass: static bodies never move
    #[inline]
    pub fn mobility(self) -> f32 {
        match self {
            Material::Static => 0.0,
            Material::Solid | Material::Water | Material::Gas => 1.0,
        }
    }

    #[inline]
    pub fn is_static(self) -> bool {
        self == Material::Static
    }

    /// Solids and statics act as obstacles for the fluid boundary passes
    #[inline]
    pub fn is_obstacle(self) -> bool {
        matches!(self, Material::Solid | Material::Static)
    }
}

/// A particle in the sandbox
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub shape: Shape,
    pub material: Material,
}

impl Particle {
    /// A particle at rest whose material follows from its shape
    pub fn new(pos: Vec2, radius: f32, shape: Shape) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            shape,
            material: shape.default_material(),
        }
    }

    pub fn solid(pos: Vec2, radius: f32) -> Self {
        Self::new(pos, radius, Shape::Circle)
    }

    pub fn water(pos: Vec2, radius: f32) -> Self {
        Self::new(pos, radius, Shape::Water)
    }

    pub fn gas(pos: Vec2, radius: f32) -> Self {
        Self::new(pos, radius, Shape::Gas)
    }

    /// Immovable obstacle drawn with the given shape
    pub fn fixed(pos: Vec2, radius: f32, shape: Shape) -> Self {
        Self {
            material: Material::Static,
            ..Self::new(pos, radius, shape)
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn mobility(&self) -> f32 {
        self.material.mobility()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Unit direction and length of `d`, falling back to the +x axis and the
/// minimum separation when the vector is degenerate.
#[inline]
pub fn normal_and_distance(d: Vec2) -> (Vec2, f32) {
    let dist_sq = d.length_squared();
    if dist_sq < MIN_SEPARATION * MIN_SEPARATION {
        return (Vec2::X, MIN_SEPARATION);
    }
    let dist = dist_sq.sqrt();
    (d / dist, dist)
}

/// Mutable references to two distinct particles, `i < j`
#[inline]
pub fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (lo, hi) = particles.split_at_mut(j);
    (&mut lo[i], &mut hi[0])
}

/// Per-material particle counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialCounts {
    pub solid: usize,
    pub water: usize,
    pub gas: usize,
    pub fixed: usize,
}

impl MaterialCounts {
    pub fn total(&self) -> usize {
        self.solid + self.water + self.gas + self.fixed
    }
}

/// The sandbox contents: one flat particle collection.
///
/// Indices are stable for the duration of a frame. Spawning appends and
/// deleting shifts survivors down, so indices may change between frames.
#[derive(Debug, Default, Clone)]
pub struct World {
    pub particles: Vec<Particle>,
}

impl World {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn with_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Remove every particle matching `pred`, returning how many were removed
    pub fn remove_where(&mut self, mut pred: impl FnMut(&Particle) -> bool) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !pred(p));
        before - self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn counts(&self) -> MaterialCounts {
        let mut counts = MaterialCounts::default();
        for p in &self.particles {
            match p.material {
                Material::Solid => counts.solid += 1,
                Material::Water => counts.water += 1,
                Material::Gas => counts.gas += 1,
                Material::Static => counts.fixed += 1,
            }
        }
        counts
    }
}
