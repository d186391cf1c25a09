//! Cell data model: terrain type, carried item, and conveyor configuration.
//!
//! All kinds are closed sets. A cell is a small `Copy` value; the grid stores
//! them inline and mutates them in place.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// Terrain kind of a cell. Only conveyors move items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellType {
    /// Nothing is drawn and nothing moves.
    Empty,
    /// Inert ground.
    #[default]
    Grass,
    /// Pushes its item one step per tick toward `direction`.
    Conveyor,
}

/// The item occupying a cell. At most one per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Item {
    #[default]
    Empty,
    Wood,
    Gold,
}

impl Item {
    pub fn is_empty(self) -> bool {
        self == Item::Empty
    }

    /// The item produced by a transmutator: Wood and Gold swap, anything else
    /// passes through unchanged.
    pub fn transmuted(self) -> Self {
        match self {
            Item::Wood => Item::Gold,
            Item::Gold => Item::Wood,
            other => other,
        }
    }

    /// Stable byte tag used for state hashing.
    pub(crate) fn tag(self) -> u8 {
        match self {
            Item::Empty => 0,
            Item::Wood => 1,
            Item::Gold => 2,
        }
    }
}

/// Conveyor heading. The y axis grows downward, so `Up` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ]
    }

    /// Unit offset for this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Arrow glyph drawn on top of a conveyor.
    pub fn glyph(self) -> char {
        match self {
            Direction::Left => '<',
            Direction::Right => '>',
            Direction::Up => '^',
            Direction::Down => 'v',
        }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One grid element.
///
/// `transmutator` and `direction` only mean something on conveyors.
/// `item_updated` is a per-tick marker owned by the propagation step: it is
/// cleared for every cell at the start of a step and set on a cell once an
/// item has been moved into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    pub item: Item,
    #[serde(skip)]
    pub item_updated: bool,
    pub transmutator: bool,
    pub direction: Direction,
}

impl Cell {
    /// Plain grass, no item.
    pub fn grass() -> Self {
        Self::default()
    }

    /// An empty-typed cell.
    pub fn empty() -> Self {
        Self {
            cell_type: CellType::Empty,
            ..Self::default()
        }
    }

    /// A conveyor with no item.
    pub fn conveyor(direction: Direction, transmutator: bool) -> Self {
        Self {
            cell_type: CellType::Conveyor,
            item: Item::Empty,
            item_updated: false,
            transmutator,
            direction,
        }
    }

    /// Same cell carrying `item`.
    pub fn with_item(mut self, item: Item) -> Self {
        self.item = item;
        self
    }

    pub fn is_conveyor(&self) -> bool {
        self.cell_type == CellType::Conveyor
    }

    pub fn has_item(&self) -> bool {
        !self.item.is_empty()
    }
}
