//! Simulation state and state hashing.

use crate::grid::Grid;

/// Tick counter type.
pub type Ticks = u64;

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Mutable simulation state tracked by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimState {
    /// Number of steps run so far.
    pub tick: Ticks,
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// FNV-1a (64-bit) fingerprint of the grid, used to check that two runs
/// stepped identically and that an edit changed something. Not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHash(pub u64);

impl StateHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    /// Hash the persistent part of every cell. The per-tick `item_updated`
    /// marker is excluded.
    pub fn write_grid(&mut self, grid: &Grid) {
        self.write_u32(grid.size());
        for (_, cell) in grid.iter() {
            self.write(&[
                cell.cell_type as u8,
                cell.item.tag(),
                cell.transmutator as u8,
                cell.direction as u8,
            ]);
        }
    }

    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for StateHash {
    fn default() -> Self {
        Self::new()
    }
}
