//! End-to-end behaviour of the engine: scheduling, propagation, editing.

use std::cell::RefCell;
use std::rc::Rc;

use beltgrid_core::cell::{Cell, CellType, Direction, Item};
use beltgrid_core::config::SimConfig;
use beltgrid_core::editor::EditCommand;
use beltgrid_core::engine::Engine;
use beltgrid_core::event::{Event, EventKind, NullSink};
use beltgrid_core::grid::Grid;
use beltgrid_core::propagation::step;
use beltgrid_core::scheduler::{Clock, TickScheduler};
use beltgrid_core::test_utils::*;

// ===========================================================================
// Straight lines
// ===========================================================================

#[test]
fn four_belts_one_item_moves_one_cell_per_tick() {
    let mut g = grid(10);
    let start = pos(2, 4);
    place_line(&mut g, start, Direction::Right, 4);
    put(&mut g, start, Item::Wood);

    step(&mut g, 1, &mut NullSink);
    assert_eq!(
        items_along(&g, start, Direction::Right, 4),
        vec![Item::Empty, Item::Wood, Item::Empty, Item::Empty]
    );

    step(&mut g, 2, &mut NullSink);
    assert_eq!(
        items_along(&g, start, Direction::Right, 4),
        vec![Item::Empty, Item::Empty, Item::Wood, Item::Empty]
    );
}

#[test]
fn line_against_scan_order_moves_one_cell_per_tick() {
    // Leftward: the scan reaches the destination before the source, but the
    // item still only advances once per tick.
    let mut g = grid(10);
    let start = pos(7, 0);
    place_line(&mut g, start, Direction::Left, 4);
    put(&mut g, start, Item::Gold);

    step(&mut g, 1, &mut NullSink);
    assert_eq!(
        items_along(&g, start, Direction::Left, 4),
        vec![Item::Empty, Item::Gold, Item::Empty, Item::Empty]
    );
}

#[test]
fn packed_line_with_free_tail_shifts_whole_line() {
    let mut g = grid(10);
    let start = pos(0, 0);
    place_line(&mut g, start, Direction::Down, 5);
    for i in 0..4 {
        put(&mut g, pos(0, i), Item::Wood);
    }

    let report = step(&mut g, 1, &mut NullSink);

    assert_eq!(report.moved, 4);
    assert_eq!(
        items_along(&g, start, Direction::Down, 5),
        vec![Item::Empty, Item::Wood, Item::Wood, Item::Wood, Item::Wood]
    );
}

#[test]
fn packed_line_into_edge_never_moves() {
    let mut g = grid(4);
    place_line(&mut g, pos(0, 1), Direction::Right, 4);
    for x in 0..4 {
        put(&mut g, pos(x, 1), Item::Wood);
    }
    let before = g.clone();

    for tick in 1..=5 {
        assert_eq!(step(&mut g, tick, &mut NullSink).moved, 0);
    }
    for (p, cell) in before.iter() {
        assert_eq!(g[p].item, cell.item);
    }
}

// ===========================================================================
// Transmutation
// ===========================================================================

#[test]
fn two_transmutators_round_trip_the_kind() {
    let mut g = grid(10);
    g.set(pos(0, 0), transmuting_belt(Direction::Right)).unwrap();
    g.set(pos(1, 0), belt(Direction::Right)).unwrap();
    g.set(pos(2, 0), transmuting_belt(Direction::Right)).unwrap();
    g.set(pos(3, 0), belt(Direction::Right)).unwrap();
    put(&mut g, pos(0, 0), Item::Wood);

    step(&mut g, 1, &mut NullSink);
    assert_eq!(g[pos(1, 0)].item, Item::Gold);

    step(&mut g, 2, &mut NullSink);
    assert_eq!(g[pos(2, 0)].item, Item::Gold);

    step(&mut g, 3, &mut NullSink);
    assert_eq!(g[pos(3, 0)].item, Item::Wood);
}

#[test]
fn transmutator_only_acts_on_departure() {
    let mut g = grid(6);
    g.set(pos(0, 0), belt(Direction::Right)).unwrap();
    g.set(pos(1, 0), transmuting_belt(Direction::Right)).unwrap();
    put(&mut g, pos(0, 0), Item::Wood);

    step(&mut g, 1, &mut NullSink);
    assert_eq!(g[pos(1, 0)].item, Item::Wood, "arriving items are untouched");
}

// ===========================================================================
// Edges and inert cells
// ===========================================================================

#[test]
fn left_edge_conveyor_holds_item_indefinitely() {
    let mut g = grid(5);
    g.set(pos(0, 3), belt(Direction::Left).with_item(Item::Gold)).unwrap();

    for tick in 1..=20 {
        step(&mut g, tick, &mut NullSink);
    }
    assert_eq!(g[pos(0, 3)].item, Item::Gold);
}

#[test]
fn each_edge_clamps() {
    let size = 5;
    let cases = [
        (pos(0, 2), Direction::Left),
        (pos(4, 2), Direction::Right),
        (pos(2, 0), Direction::Up),
        (pos(2, 4), Direction::Down),
    ];
    for (at, dir) in cases {
        let mut g = grid(size);
        g.set(at, belt(dir).with_item(Item::Wood)).unwrap();
        for tick in 1..=3 {
            step(&mut g, tick, &mut NullSink);
        }
        assert_eq!(g[at].item, Item::Wood, "{dir:?} edge at {at:?}");
        assert_eq!(g.item_count(), 1);
    }
}

#[test]
fn grass_and_empty_cells_are_inert() {
    let mut g = grid(6);
    put(&mut g, pos(1, 1), Item::Wood);
    g.set(pos(3, 3), Cell::empty().with_item(Item::Gold)).unwrap();

    for tick in 1..=10 {
        step(&mut g, tick, &mut NullSink);
    }
    assert_eq!(g[pos(1, 1)].item, Item::Wood);
    assert_eq!(g[pos(3, 3)].item, Item::Gold);
}

// ===========================================================================
// No double-step
// ===========================================================================

#[test]
fn arrival_is_not_pushed_on_by_its_new_cell() {
    // (1,0) points down and is scanned after (0,0) moves an item into it.
    let mut g = grid(6);
    g.set(pos(0, 0), belt(Direction::Right).with_item(Item::Wood)).unwrap();
    g.set(pos(1, 0), belt(Direction::Down)).unwrap();
    g.set(pos(1, 1), belt(Direction::Down)).unwrap();

    step(&mut g, 1, &mut NullSink);
    assert_eq!(g[pos(1, 0)].item, Item::Wood);
    assert_eq!(g[pos(1, 1)].item, Item::Empty);

    step(&mut g, 2, &mut NullSink);
    assert_eq!(g[pos(1, 1)].item, Item::Wood);
}

#[test]
fn chain_cleared_cell_does_not_move_twice() {
    // A packed down-column scanned from the top: the lower item clears first,
    // the upper item fills its cell, and the scan does not push it again.
    let mut g = grid(6);
    place_line(&mut g, pos(2, 0), Direction::Down, 4);
    put(&mut g, pos(2, 0), Item::Wood);
    put(&mut g, pos(2, 1), Item::Gold);

    step(&mut g, 1, &mut NullSink);
    assert_eq!(
        items_along(&g, pos(2, 0), Direction::Down, 4),
        vec![Item::Empty, Item::Wood, Item::Gold, Item::Empty]
    );
}

// ===========================================================================
// Loops
// ===========================================================================

#[test]
fn demo_loop_circulates_forever() {
    let mut engine = Engine::demo(&SimConfig::default()).unwrap();
    for _ in 0..100 {
        engine.step();
        assert_eq!(engine.grid().count_of(Item::Wood), 3);
    }
}

#[test]
fn full_ring_stalls_but_ring_with_gap_turns() {
    let mut g = grid(8);
    let ring = place_ring(&mut g, 1, 1, 3, 3);
    for &p in &ring {
        put(&mut g, p, Item::Wood);
    }
    let report = step(&mut g, 1, &mut NullSink);
    assert_eq!(report.moved, 0);
    assert!(report.blocked_chains > 0);

    // Open one gap; next tick the whole ring rotates by one.
    put(&mut g, ring[4], Item::Empty);
    let report = step(&mut g, 2, &mut NullSink);
    assert_eq!(report.moved, 7);
    assert_eq!(report.blocked_chains, 0);
    assert_eq!(g[ring[5]].item, Item::Empty);
}

// ===========================================================================
// Engine + scheduler
// ===========================================================================

#[test]
fn engine_paced_by_manual_clock() {
    let clock = ManualClock::new(0.0);
    let mut engine = Engine::demo(&SimConfig::default()).unwrap();

    let mut steps = 0;
    for _ in 0..80 {
        clock.advance(0.125);
        if engine.update(clock.now_secs()) {
            steps += 1;
        }
    }
    // 10 seconds at 0.5 s per tick.
    assert_eq!(steps, 20);
    assert_eq!(engine.tick(), 20);
}

#[test]
fn stall_runs_a_single_step() {
    let clock = ManualClock::new(0.0);
    let mut scheduler = TickScheduler::new(0.5, 0.0);
    clock.advance(30.0);
    assert!(scheduler.poll_clock(&clock));
    assert!(!scheduler.poll_clock(&clock));
}

#[test]
fn edits_apply_between_ticks() {
    let mut engine = small_engine(10);
    engine.apply_edit(
        pos(4, 4),
        EditCommand::PlaceConveyor {
            direction: Direction::Up,
            transmutator: true,
        },
    );
    engine.apply_edit(pos(4, 4), EditCommand::PlaceItem(Item::Wood));
    assert_eq!(engine.cell(4, 4).unwrap().item, Item::Wood);

    assert!(engine.update(0.5));
    assert_eq!(engine.cell(4, 3).unwrap().item, Item::Gold);

    engine.apply_edit(pos(4, 3), EditCommand::Clear);
    let cleared = engine.cell(4, 3).unwrap();
    assert_eq!(cleared.cell_type, CellType::Grass);
    assert_eq!(cleared.item, Item::Empty);
}

#[test]
fn move_events_reach_listeners() {
    let moves = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&moves);

    let mut engine = small_engine(6);
    for x in 0..3 {
        engine.set_cell(x, 0, belt(Direction::Right));
    }
    engine.set_item(0, 0, Item::Wood);
    engine.on_passive(
        EventKind::ItemMoved,
        Box::new(move |e: &Event| {
            if let Event::ItemMoved { from, to, tick, .. } = e {
                sink.borrow_mut().push((*from, *to, *tick));
            }
        }),
    );

    engine.step();
    engine.step();

    assert_eq!(
        *moves.borrow(),
        vec![(pos(0, 0), pos(1, 0), 1), (pos(1, 0), pos(2, 0), 2)]
    );
}

#[test]
fn independent_grids_do_not_interact() {
    let mut a = Grid::new(5).unwrap();
    let b = Grid::new(5).unwrap();
    a.set(pos(1, 1), belt(Direction::Right).with_item(Item::Wood)).unwrap();
    step(&mut a, 1, &mut NullSink);
    assert_eq!(b.item_count(), 0);
    assert_eq!(a.item_count(), 1);
}
