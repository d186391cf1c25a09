//! Read-only views for renderers.
//!
//! All types are owned copies; nothing here borrows engine storage.

use crate::cell::{Cell, CellType, Direction, Item};
use crate::grid::{Grid, GridPosition};

/// What a renderer needs to draw one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSnapshot {
    pub pos: GridPosition,
    pub cell_type: CellType,
    pub item: Item,
    pub direction: Direction,
    pub transmutator: bool,
}

impl CellSnapshot {
    pub fn new(pos: GridPosition, cell: &Cell) -> Self {
        Self {
            pos,
            cell_type: cell.cell_type,
            item: cell.item,
            direction: cell.direction,
            transmutator: cell.transmutator,
        }
    }

    /// Glyph to draw on top of the cell, if any.
    pub fn glyph(&self) -> Option<char> {
        (self.cell_type == CellType::Conveyor).then(|| self.direction.glyph())
    }
}

/// Snapshots of every cell that draws something: typed cells and any cell
/// carrying an item.
pub fn snapshot_visible(grid: &Grid) -> Vec<CellSnapshot> {
    grid.iter()
        .filter(|(_, c)| c.cell_type != CellType::Empty || c.has_item())
        .map(|(p, c)| CellSnapshot::new(p, c))
        .collect()
}

/// Render the square window `[0, size)` of `grid` as text, one row per line.
///
/// Items win over terrain: `w` wood, `g` gold. Conveyors show their glyph,
/// grass is `.`, empty cells are a space.
pub fn render_ascii(grid: &Grid, size: u32) -> String {
    let size = size.min(grid.size()) as i32;
    let mut out = String::with_capacity((size as usize + 1) * size as usize);
    for y in 0..size {
        for x in 0..size {
            let cell = &grid[GridPosition::new(x, y)];
            let ch = match (cell.item, cell.cell_type) {
                (Item::Wood, _) => 'w',
                (Item::Gold, _) => 'g',
                (Item::Empty, CellType::Conveyor) => cell.direction.glyph(),
                (Item::Empty, CellType::Grass) => '.',
                (Item::Empty, CellType::Empty) => ' ',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
