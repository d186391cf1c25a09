//! Edit commands: the only way front-ends change the grid.
//!
//! Edits apply immediately, independent of tick timing, and are visible to
//! the next step. Out-of-range targets are ignored.

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Direction, Item};
use crate::grid::{Grid, GridPosition};

/// A single-cell mutation requested by a front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Overwrite the cell with an empty conveyor.
    PlaceConveyor {
        direction: Direction,
        transmutator: bool,
    },
    /// Change only the item, whatever the cell type.
    PlaceItem(Item),
    /// Reset the cell to bare grass.
    Clear,
}

impl EditCommand {
    /// The cell that results from applying this command to `cell`.
    pub fn apply_to(self, cell: Cell) -> Cell {
        match self {
            EditCommand::PlaceConveyor {
                direction,
                transmutator,
            } => Cell::conveyor(direction, transmutator),
            EditCommand::PlaceItem(item) => cell.with_item(item),
            EditCommand::Clear => Cell::grass(),
        }
    }
}

/// Apply `cmd` at `pos`. Returns `false` (and changes nothing) when `pos` is
/// outside the grid.
pub fn apply_edit(grid: &mut Grid, pos: GridPosition, cmd: EditCommand) -> bool {
    match grid.get_mut(pos) {
        Some(cell) => {
            *cell = cmd.apply_to(*cell);
            true
        }
        None => {
            log::debug!("ignoring {cmd:?} at ({}, {}): off grid", pos.x, pos.y);
            false
        }
    }
}

/// Convert a world-space point (y grows downward) into the cell under it.
///
/// Returns `None` for negative or non-finite coordinates. Positions past the
/// far edge are returned as-is; the grid rejects them on write.
pub fn world_to_cell(world_x: f32, world_y: f32, block_size: f32) -> Option<GridPosition> {
    if !(block_size > 0.0) || !world_x.is_finite() || !world_y.is_finite() {
        return None;
    }
    if world_x < 0.0 || world_y < 0.0 {
        return None;
    }
    let x = (world_x / block_size).floor();
    let y = (world_y / block_size).floor();
    if x > i32::MAX as f32 || y > i32::MAX as f32 {
        return None;
    }
    Some(GridPosition::new(x as i32, y as i32))
}
