//! Beltgrid Core -- the simulation engine for a conveyor-belt grid sandbox.
//!
//! A fixed-size square grid of cells. Conveyor cells push the item they carry
//! one cell per tick toward their heading; transmutator conveyors swap Wood
//! and Gold as items leave them. Front-ends paint cells through a narrow
//! mutation interface and read cells back for drawing.
//!
//! # Tick
//!
//! [`engine::Engine::update`] is called once per frame with the current time.
//! The [`scheduler::TickScheduler`] lets at most one step through per call,
//! once per tick interval, and never catches up on missed intervals.
//!
//! Each step (see [`propagation`]):
//!
//! 1. Clears every cell's `item_updated` marker.
//! 2. Visits cells row by row and advances each conveyor item, first clearing
//!    an occupied destination by advancing its occupant (chain resolution).
//!
//! # Invariants
//!
//! - A cell holds at most one item.
//! - Steps never create or destroy items; transmutation changes the kind only.
//! - An item moves at most one cell per step.
//! - Destinations are clamped onto the grid; items halt at the edge.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- owns the grid, scheduler, events and dirty tracking.
//! - [`grid::Grid`] -- the cell store.
//! - [`cell::Cell`] -- type, item, heading and transmutator flag of one cell.
//! - [`editor::EditCommand`] -- single-cell edits issued by front-ends.
//! - [`config::Config`] -- simulation and view settings loaded from disk.

pub mod boundary;
pub mod cell;
pub mod config;
pub mod dirty;
pub mod editor;
pub mod engine;
pub mod event;
pub mod grid;
pub mod layout;
pub mod propagation;
pub mod query;
pub mod scheduler;
pub mod sim;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
