//! Grid store: a fixed-size square array of cells addressed by `(x, y)`.
//!
//! The grid is allocated once and never resized. Cells are stored row-major
//! (`y * size + x`), which is also the propagation scan order.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Item};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A position on the grid. Signed so that off-grid targets can be expressed
/// before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`. May leave the grid.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Errors from grid access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("position ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: u32 },
    #[error("grid size must be at least 1")]
    ZeroSize,
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// The simulation grid. Owned by the engine; tests build their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a `size * size` grid of grass.
    pub fn new(size: u32) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        let len = size as usize * size as usize;
        Ok(Self {
            size,
            cells: vec![Cell::grass(); len],
        })
    }

    /// Side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.size && (pos.y as u32) < self.size
    }

    fn index_of(&self, pos: GridPosition) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.size as usize + pos.x as usize)
    }

    fn out_of_bounds(&self, pos: GridPosition) -> GridError {
        GridError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            size: self.size,
        }
    }

    pub fn get(&self, pos: GridPosition) -> Option<&Cell> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: GridPosition) -> Option<&mut Cell> {
        self.index_of(pos).map(|i| &mut self.cells[i])
    }

    /// Replace the cell at `pos`.
    pub fn set(&mut self, pos: GridPosition, cell: Cell) -> Result<(), GridError> {
        let slot = self
            .index_of(pos)
            .ok_or_else(|| self.out_of_bounds(pos))?;
        self.cells[slot] = cell;
        Ok(())
    }

    /// Every position in scan order: `y` outer, `x` inner.
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| GridPosition::new(x, y)))
    }

    /// Cells paired with their positions, in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, &Cell)> {
        self.positions().zip(self.cells.iter())
    }

    /// Number of cells holding a non-empty item.
    pub fn item_count(&self) -> usize {
        self.cells.iter().filter(|c| c.has_item()).count()
    }

    /// Number of cells holding exactly `item`.
    pub fn count_of(&self, item: Item) -> usize {
        self.cells.iter().filter(|c| c.item == item).count()
    }

    /// Reset every per-tick `item_updated` marker.
    pub fn clear_update_markers(&mut self) {
        for cell in &mut self.cells {
            cell.item_updated = false;
        }
    }
}

impl Index<GridPosition> for Grid {
    type Output = Cell;

    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    fn index(&self, pos: GridPosition) -> &Cell {
        match self.index_of(pos) {
            Some(i) => &self.cells[i],
            None => panic!("{}", self.out_of_bounds(pos)),
        }
    }
}

impl IndexMut<GridPosition> for Grid {
    fn index_mut(&mut self, pos: GridPosition) -> &mut Cell {
        match self.index_of(pos) {
            Some(i) => &mut self.cells[i],
            None => panic!("{}", self.out_of_bounds(pos)),
        }
    }
}
