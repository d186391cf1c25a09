//! Item propagation: one simulation step over the whole grid.
//!
//! A step clears every `item_updated` marker, then visits cells in row-major
//! order (`y` outer, `x` inner) and tries to advance each conveyor's item one
//! cell toward its heading.
//!
//! # Chain resolution
//!
//! When the destination of a move is occupied, the occupant gets a chance to
//! move first, in the same step. Resolution is a depth-first walk along the
//! chain of occupied conveyors:
//!
//! 1. Walk forward from the starting cell while each cell can move and its
//!    destination is occupied, recording the cells on the current path.
//! 2. Stop at an empty destination (the chain can drain), at an occupant
//!    that cannot move (the chain is blocked), or at a destination already on
//!    the path (the chain is a closed loop).
//! 3. Unwind from the tail: each cell whose destination is now empty moves.
//!
//! A closed loop of full conveyors is unresolvable for that step and its items
//! stay in place. The walk uses an explicit stack, so chain length is bounded
//! only by grid size.
//!
//! # Markers
//!
//! A cell that receives an item is marked `item_updated` and is skipped for
//! the rest of the step. An item therefore moves at most one cell per step,
//! and a freshly arrived item is never pushed on by its new cell in the same
//! step.
//!
//! # Edges
//!
//! Destinations are clamped onto the grid. A conveyor on the edge pointing
//! outward targets itself; its item halts there, is marked as updated, and is
//! not transmuted.

use std::collections::HashSet;

use crate::boundary::step_toward;
use crate::cell::{Cell, Item};
use crate::event::{Event, EventSink};
use crate::grid::{Grid, GridPosition};
use crate::sim::Ticks;

// ---------------------------------------------------------------------------
// Step report
// ---------------------------------------------------------------------------

/// Outcome of a single step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Items that moved one cell.
    pub moved: u32,
    /// Items whose kind changed on departure.
    pub transmuted: u32,
    /// Chain walks that closed on themselves and were left in place.
    pub blocked_chains: u32,
    /// Cells whose item changed, in the order the changes happened.
    pub changed: Vec<GridPosition>,
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// Run one propagation step over `grid`. `tick` is stamped on emitted events.
pub fn step(grid: &mut Grid, tick: Ticks, sink: &mut impl EventSink) -> StepReport {
    grid.clear_update_markers();

    let mut stepper = Stepper {
        grid,
        tick,
        sink,
        chain: Vec::new(),
        on_path: HashSet::new(),
        report: StepReport::default(),
    };
    for pos in stepper.grid.positions() {
        stepper.advance(pos);
    }

    let report = stepper.report;
    log::trace!(
        "tick {tick}: {} moved, {} transmuted, {} blocked",
        report.moved,
        report.transmuted,
        report.blocked_chains
    );
    report
}

/// Whether the cell's item is eligible to move this step.
fn can_move(cell: &Cell) -> bool {
    cell.is_conveyor() && cell.has_item() && !cell.item_updated
}

struct Stepper<'a, S: EventSink> {
    grid: &'a mut Grid,
    tick: Ticks,
    sink: &'a mut S,
    /// Cells on the current walk, head first. Reused across walks.
    chain: Vec<GridPosition>,
    on_path: HashSet<GridPosition>,
    report: StepReport,
}

impl<S: EventSink> Stepper<'_, S> {
    /// Try to move the item at `start`, clearing its path first if needed.
    fn advance(&mut self, start: GridPosition) {
        if !can_move(&self.grid[start]) {
            return;
        }

        self.chain.clear();
        self.on_path.clear();
        self.chain.push(start);
        self.on_path.insert(start);

        let size = self.grid.size();
        while let Some(&current) = self.chain.last() {
            let cell = self.grid[current];
            if !can_move(&cell) {
                // An occupant that cannot move blocks everything behind it.
                self.chain.pop();
                break;
            }

            let dest = step_toward(current, cell.direction, size);
            if dest == current {
                self.grid[current].item_updated = true;
                self.chain.pop();
                break;
            }
            if !self.grid[dest].has_item() {
                break;
            }
            if self.on_path.contains(&dest) {
                log::debug!("conveyor loop at ({}, {}) is full", current.x, current.y);
                self.report.blocked_chains += 1;
                self.sink.emit(Event::ChainBlocked {
                    at: current,
                    tick: self.tick,
                });
                break;
            }

            self.chain.push(dest);
            self.on_path.insert(dest);
        }

        // Unwind from the tail. Each move empties the destination of the
        // cell before it.
        while let Some(current) = self.chain.pop() {
            let cell = self.grid[current];
            let dest = step_toward(current, cell.direction, size);
            if dest != current && !self.grid[dest].has_item() {
                self.move_item(current, dest);
            }
        }
    }

    fn move_item(&mut self, from: GridPosition, to: GridPosition) {
        let source = self.grid[from];
        let mut item = source.item;

        if source.transmutator {
            let transmuted = item.transmuted();
            if transmuted != item {
                self.report.transmuted += 1;
                self.sink.emit(Event::ItemTransmuted {
                    at: from,
                    from_item: item,
                    to_item: transmuted,
                    tick: self.tick,
                });
            }
            item = transmuted;
        }

        self.grid[from].item = Item::Empty;
        let dest = &mut self.grid[to];
        dest.item = item;
        dest.item_updated = true;

        self.report.moved += 1;
        self.report.changed.push(from);
        self.report.changed.push(to);
        self.sink.emit(Event::ItemMoved {
            from,
            to,
            item,
            tick: self.tick,
        });
    }
}
