//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use std::cell::Cell as StdCell;

use crate::cell::{Cell, Direction, Item};
use crate::config::SimConfig;
use crate::engine::Engine;
use crate::grid::{Grid, GridPosition};
use crate::scheduler::Clock;

// ===========================================================================
// Positions and cells
// ===========================================================================

pub fn pos(x: i32, y: i32) -> GridPosition {
    GridPosition::new(x, y)
}

pub fn belt(direction: Direction) -> Cell {
    Cell::conveyor(direction, false)
}

pub fn transmuting_belt(direction: Direction) -> Cell {
    Cell::conveyor(direction, true)
}

// ===========================================================================
// Grid builders
// ===========================================================================

pub fn grid(size: u32) -> Grid {
    Grid::new(size).expect("test grid size must be non-zero")
}

/// Place a straight run of `len` conveyors starting at `start`, all facing
/// `direction`, laid out along that direction.
pub fn place_line(grid: &mut Grid, start: GridPosition, direction: Direction, len: u32) {
    let (dx, dy) = direction.offset();
    for i in 0..len as i32 {
        grid.set(start.offset(dx * i, dy * i), belt(direction)).expect("line must fit on the grid");
    }
}

/// Put `item` on the cell at `at`, keeping its configuration.
pub fn put(grid: &mut Grid, at: GridPosition, item: Item) {
    grid[at].item = item;
}

/// Items along a straight run, in the order they are laid out.
pub fn items_along(grid: &Grid, start: GridPosition, direction: Direction, len: u32) -> Vec<Item> {
    let (dx, dy) = direction.offset();
    (0..len as i32)
        .map(|i| grid[start.offset(dx * i, dy * i)].item)
        .collect()
}

/// Build a closed rectangular loop with corners `(x0, y0)` and `(x1, y1)`,
/// running clockwise. Returns the loop cells in travel order.
pub fn place_ring(grid: &mut Grid, x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<GridPosition> {
    let mut path = Vec::new();
    for x in x0..x1 {
        path.push((pos(x, y0), Direction::Right));
    }
    for y in y0..y1 {
        path.push((pos(x1, y), Direction::Down));
    }
    for x in (x0 + 1..=x1).rev() {
        path.push((pos(x, y1), Direction::Left));
    }
    for y in (y0 + 1..=y1).rev() {
        path.push((pos(x0, y), Direction::Up));
    }
    for &(p, dir) in &path {
        grid.set(p, belt(dir)).expect("ring must fit on the grid");
    }
    path.into_iter().map(|(p, _)| p).collect()
}

pub fn small_engine(size: u32) -> Engine {
    let config = SimConfig {
        world_size: size,
        ..SimConfig::default()
    };
    Engine::new(&config).expect("test engine size must be non-zero")
}

// ===========================================================================
// Clock
// ===========================================================================

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: StdCell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: StdCell::new(start),
        }
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}
