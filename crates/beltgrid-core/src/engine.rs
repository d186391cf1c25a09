//! The engine: owns the grid and everything that drives it.
//!
//! # Architecture
//!
//! The `Engine` owns:
//! - The [`Grid`] of cells
//! - A [`TickScheduler`] deciding when a step is due
//! - A [`SimState`] (tick counter)
//! - An [`EventBus`] for typed simulation events
//! - A [`DirtyTracker`] of cells changed since the renderer last looked
//!
//! # Frame loop
//!
//! A front-end calls [`Engine::update`] once per frame with the current time.
//! When the scheduler says a step is due, the engine runs:
//! 1. **Propagate** -- clear markers and advance every conveyor item
//! 2. **Post-step** -- mark changed cells dirty, deliver buffered events
//! 3. **Bookkeeping** -- increment the tick counter, compute the state hash
//!
//! Edits go through [`Engine::set_cell`] / [`Engine::apply_edit`] and take
//! effect immediately, outside the tick.

use crate::cell::{Cell, Item};
use crate::config::SimConfig;
use crate::dirty::DirtyTracker;
use crate::editor::{self, EditCommand};
use crate::event::{Event, EventBus, EventKind, EventSink, PassiveListener};
use crate::grid::{Grid, GridError, GridPosition};
use crate::layout;
use crate::propagation::{self, StepReport};
use crate::query::{self, CellSnapshot};
use crate::scheduler::TickScheduler;
use crate::sim::{SimState, StateHash, Ticks};

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Engine {
    grid: Grid,
    scheduler: TickScheduler,
    pub sim_state: SimState,
    paused: bool,
    pub event_bus: EventBus,
    dirty: DirtyTracker,
    last_report: StepReport,
    last_state_hash: u64,
}

impl Engine {
    /// An all-grass world sized by `config`.
    pub fn new(config: &SimConfig) -> Result<Self, GridError> {
        Ok(Self::with_grid(Grid::new(config.world_size)?, config))
    }

    /// Wrap an existing grid. The scheduler starts at time zero.
    pub fn with_grid(grid: Grid, config: &SimConfig) -> Self {
        let mut engine = Self {
            grid,
            scheduler: TickScheduler::new(config.tick_interval_secs, 0.0),
            sim_state: SimState::new(),
            paused: false,
            event_bus: EventBus::new(config.event_capacity),
            dirty: DirtyTracker::new(),
            last_report: StepReport::default(),
            last_state_hash: 0,
        };
        engine.dirty.mark_all();
        engine.last_state_hash = engine.compute_state_hash();
        engine
    }

    /// The default world: grass with the demonstration conveyor loop.
    pub fn demo(config: &SimConfig) -> Result<Self, GridError> {
        let mut grid = Grid::new(config.world_size)?;
        layout::demo_loop(&mut grid)?;
        Ok(Self::with_grid(grid, config))
    }

    // -----------------------------------------------------------------------
    // Grid access
    // -----------------------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The cell at `(x, y)`, or `None` off the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.grid.get(GridPosition::new(x, y))
    }

    pub fn get_cell(&self, pos: GridPosition) -> Option<&Cell> {
        self.grid.get(pos)
    }

    pub fn world_size(&self) -> u32 {
        self.grid.size()
    }

    // -----------------------------------------------------------------------
    // Mutation interface
    // -----------------------------------------------------------------------

    /// Replace the cell at `(x, y)`. Off-grid writes are ignored and return
    /// `false`.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        let pos = GridPosition::new(x, y);
        match self.grid.set(pos, cell) {
            Ok(()) => {
                self.record_edit(pos);
                true
            }
            Err(e) => {
                log::debug!("set_cell ignored: {e}");
                false
            }
        }
    }

    /// Change only the item at `(x, y)`.
    pub fn set_item(&mut self, x: i32, y: i32, item: Item) -> bool {
        self.apply_edit(GridPosition::new(x, y), EditCommand::PlaceItem(item))
    }

    /// Apply an editor command at `pos`.
    pub fn apply_edit(&mut self, pos: GridPosition, cmd: EditCommand) -> bool {
        let applied = editor::apply_edit(&mut self.grid, pos, cmd);
        if applied {
            self.record_edit(pos);
        }
        applied
    }

    fn record_edit(&mut self, pos: GridPosition) {
        self.dirty.mark_cell(pos);
        self.event_bus.emit(Event::CellEdited {
            at: pos,
            tick: self.sim_state.tick,
        });
        self.last_state_hash = self.compute_state_hash();
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Per-frame entry point. Runs one step if the tick interval has elapsed
    /// since the last one; never more than one. Returns whether a step ran.
    pub fn update(&mut self, now_secs: f64) -> bool {
        if self.paused {
            self.event_bus.deliver();
            return false;
        }
        if !self.scheduler.poll(now_secs) {
            // Deliver edit events even on frames without a step.
            self.event_bus.deliver();
            return false;
        }
        self.step();
        true
    }

    /// Run one step now, bypassing the scheduler.
    pub fn step(&mut self) -> &StepReport {
        let tick = self.sim_state.tick + 1;
        let report = propagation::step(&mut self.grid, tick, &mut self.event_bus);

        for &pos in &report.changed {
            self.dirty.mark_cell(pos);
        }
        self.event_bus.deliver();

        self.sim_state.tick = tick;
        self.last_state_hash = self.compute_state_hash();
        self.last_report = report;
        &self.last_report
    }

    /// Report from the most recent step.
    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    pub fn tick(&self) -> Ticks {
        self.sim_state.tick
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// While paused, `update()` never steps. Edits still apply.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume and restart the tick interval from `now_secs`, so the time
    /// spent paused does not trigger an immediate step.
    pub fn resume(&mut self, now_secs: f64) {
        self.paused = false;
        self.scheduler.reset(now_secs);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Number of cells carrying an item.
    pub fn item_count(&self) -> usize {
        self.grid.item_count()
    }

    pub fn snapshot_cells(&self) -> Vec<CellSnapshot> {
        query::snapshot_visible(&self.grid)
    }

    pub fn snapshot_cell(&self, pos: GridPosition) -> Option<CellSnapshot> {
        self.grid.get(pos).map(|c| CellSnapshot::new(pos, c))
    }

    // -----------------------------------------------------------------------
    // Dirty tracking
    // -----------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    pub fn dirty_tracker(&self) -> &DirtyTracker {
        &self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty.mark_clean();
    }

    // -----------------------------------------------------------------------
    // State hash
    // -----------------------------------------------------------------------

    /// Hash of the grid after the most recent step or edit.
    pub fn state_hash(&self) -> u64 {
        self.last_state_hash
    }

    fn compute_state_hash(&self) -> u64 {
        let mut hash = StateHash::new();
        hash.write_u64(self.sim_state.tick);
        hash.write_grid(&self.grid);
        hash.finish()
    }

    // -----------------------------------------------------------------------
    // Event system
    // -----------------------------------------------------------------------

    /// Suppress an event kind. Suppressed events are never allocated or buffered.
    pub fn suppress_event(&mut self, kind: EventKind) {
        self.event_bus.suppress(kind);
    }

    /// Register a passive listener for an event kind.
    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener) {
        self.event_bus.on_passive(kind, listener);
    }
}
