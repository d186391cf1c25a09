//! Built-in starting layouts.

use crate::cell::{Cell, Direction, Item};
use crate::grid::{Grid, GridError, GridPosition};

/// A clockwise ring of eight conveyors around `(4, 4)`, with three wood
/// items queued along the top edge.
///
/// ```text
///   x: 3 4 5
/// y=3  > > v
/// y=4  ^ . v
/// y=5  ^ < <
/// ```
pub fn demo_loop(grid: &mut Grid) -> Result<(), GridError> {
    use Direction::*;

    let ring = [
        ((3, 3), Right, Item::Wood),
        ((4, 3), Right, Item::Wood),
        ((5, 3), Down, Item::Wood),
        ((5, 4), Down, Item::Empty),
        ((5, 5), Left, Item::Empty),
        ((4, 5), Left, Item::Empty),
        ((3, 5), Up, Item::Empty),
        ((3, 4), Up, Item::Empty),
    ];
    for ((x, y), direction, item) in ring {
        grid.set(
            GridPosition::new(x, y),
            Cell::conveyor(direction, false).with_item(item),
        )?;
    }
    Ok(())
}
