//! Uniform-grid bucket index for neighbor queries.
//!
//! Every solver pass rebuilds its grid from scratch. Buckets live in a
//! slot arena that survives `clear`, so steady-state frames do not allocate.

use rustc_hash::FxHashMap;

/// The 3x3 neighborhood: the cell itself plus its eight neighbors.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Integer cell coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Iterate the 3x3 block of cells centred on this one
    pub fn neighborhood(self) -> impl Iterator<Item = CellCoord> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| CellCoord::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy)))
    }
}

/// Pack two signed 32-bit cell coordinates into one key without collisions
#[inline]
pub fn cell_key(x: i32, y: i32) -> u64 {
    ((x as u32 as u64) << 32) | (y as u32 as u64)
}

/// Spatial bucket grid with a fixed cell size
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    inv_cell_size: f64,
    /// cell key -> slot in `buckets`
    slots: FxHashMap<u64, usize>,
    buckets: Vec<Vec<usize>>,
    used: usize,
}

impl SpatialGrid {
    /// Create a grid. Non-positive sizes fall back to 1.
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size as f64,
            slots: FxHashMap::default(),
            buckets: Vec::new(),
            used: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Empty every bucket, keeping the allocations for reuse
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets[..self.used] {
            bucket.clear();
        }
        self.slots.clear();
        self.used = 0;
    }

    /// Cell index of a scalar coordinate (floor division by cell size)
    #[inline]
    pub fn cell_of(&self, value: f32) -> i32 {
        (value as f64 * self.inv_cell_size).floor() as i32
    }

    #[inline]
    pub fn coord_of(&self, x: f32, y: f32) -> CellCoord {
        CellCoord::new(self.cell_of(x), self.cell_of(y))
    }

    /// Append `index` to the bucket for cell (x, y)
    pub fn insert(&mut self, index: usize, x: i32, y: i32) {
        let key = cell_key(x, y);
        let slot = match self.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.used;
                if slot == self.buckets.len() {
                    self.buckets.push(Vec::with_capacity(8));
                }
                self.used += 1;
                self.slots.insert(key, slot);
                slot
            }
        };
        self.buckets[slot].push(index);
    }

    /// Indices stored in exactly this cell (empty if the cell is unused)
    #[inline]
    pub fn neighbors(&self, x: i32, y: i32) -> &[usize] {
        match self.slots.get(&cell_key(x, y)) {
            Some(&slot) => &self.buckets[slot],
            None => &[],
        }
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.used
    }
}
