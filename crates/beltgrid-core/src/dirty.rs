use crate::grid::GridPosition;
use std::collections::BTreeSet;

/// Tracks which cells have changed since the last clean point.
///
/// Moves, transmutations and edits mark cells. Renderers read the set, redraw
/// only those cells, then call [`mark_clean`](DirtyTracker::mark_clean).
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_cells: BTreeSet<GridPosition>,
    /// Set when the whole grid must be redrawn (e.g. after a bulk rebuild).
    all_dirty: bool,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_cell(&mut self, pos: GridPosition) {
        self.dirty_cells.insert(pos);
    }

    pub fn mark_all(&mut self) {
        self.all_dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.all_dirty || !self.dirty_cells.is_empty()
    }

    pub fn is_all_dirty(&self) -> bool {
        self.all_dirty
    }

    pub fn is_cell_dirty(&self, pos: GridPosition) -> bool {
        self.all_dirty || self.dirty_cells.contains(&pos)
    }

    pub fn dirty_cells(&self) -> &BTreeSet<GridPosition> {
        &self.dirty_cells
    }

    pub fn mark_clean(&mut self) {
        self.dirty_cells.clear();
        self.all_dirty = false;
    }
}
