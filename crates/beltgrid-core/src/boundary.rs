//! Boundary policy: every computed destination is clamped onto the grid.
//!
//! A conveyor on the edge pointing outward therefore targets its own cell,
//! and the item halts there instead of leaving the grid or wrapping.

use crate::cell::Direction;
use crate::grid::GridPosition;

/// Clamp `pos` component-wise to `[0, size - 1]`.
pub fn clamp_to_grid(pos: GridPosition, size: u32) -> GridPosition {
    let max = size.saturating_sub(1).min(i32::MAX as u32) as i32;
    GridPosition::new(pos.x.clamp(0, max), pos.y.clamp(0, max))
}

/// The neighbour of `pos` in `direction`, clamped onto the grid.
pub fn step_toward(pos: GridPosition, direction: Direction, size: u32) -> GridPosition {
    let (dx, dy) = direction.offset();
    clamp_to_grid(pos.offset(dx, dy), size)
}
