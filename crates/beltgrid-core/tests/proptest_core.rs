//! Property-based tests for the propagation step.
//!
//! Uses proptest to generate random grids of mixed cells and items, then
//! checks that stepping preserves the structural invariants.

use std::collections::HashSet;

use beltgrid_core::cell::{Cell, CellType, Direction, Item};
use beltgrid_core::event::{Event, NullSink};
use beltgrid_core::grid::Grid;
use beltgrid_core::propagation::step;
use beltgrid_core::sim::StateHash;
use beltgrid_core::test_utils::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
    ]
}

fn arb_item() -> impl Strategy<Value = Item> {
    prop_oneof![
        2 => Just(Item::Empty),
        1 => Just(Item::Wood),
        1 => Just(Item::Gold),
    ]
}

/// Conveyors are weighted up so most grids have long interacting chains.
fn arb_cell() -> impl Strategy<Value = Cell> {
    let conveyor = (arb_direction(), any::<bool>(), arb_item())
        .prop_map(|(dir, trans, item)| Cell::conveyor(dir, trans).with_item(item));
    prop_oneof![
        1 => arb_item().prop_map(|item| Cell::grass().with_item(item)),
        1 => arb_item().prop_map(|item| Cell::empty().with_item(item)),
        6 => conveyor,
    ]
}

/// A random square grid of side 1 through `max_size`.
fn arb_grid(max_size: u32) -> impl Strategy<Value = Grid> {
    (1..=max_size).prop_flat_map(|size| {
        proptest::collection::vec(arb_cell(), (size * size) as usize).prop_map(move |cells| {
            let mut g = grid(size);
            for (i, cell) in cells.into_iter().enumerate() {
                let p = pos(i as i32 % size as i32, i as i32 / size as i32);
                g.set(p, cell).unwrap();
            }
            g
        })
    })
}

fn hash_of(g: &Grid) -> u64 {
    let mut h = StateHash::new();
    h.write_grid(g);
    h.finish()
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Steps never create or destroy items.
    #[test]
    fn item_count_is_conserved(mut g in arb_grid(12), ticks in 1..20u64) {
        let before = g.item_count();
        for tick in 1..=ticks {
            step(&mut g, tick, &mut NullSink);
            prop_assert_eq!(g.item_count(), before);
        }
    }

    /// Every move is to a neighbouring cell, and no cell sends or receives
    /// twice in one step.
    #[test]
    fn moves_are_single_adjacent_hops(mut g in arb_grid(12)) {
        let mut events: Vec<Event> = Vec::new();
        step(&mut g, 1, &mut events);

        let mut sources = HashSet::new();
        let mut destinations = HashSet::new();
        for e in &events {
            if let Event::ItemMoved { from, to, .. } = e {
                let distance = (from.x - to.x).abs() + (from.y - to.y).abs();
                prop_assert_eq!(distance, 1);
                prop_assert!(sources.insert(*from), "{:?} sent twice", from);
                prop_assert!(destinations.insert(*to), "{:?} received twice", to);
            }
        }
    }

    /// Items resting on grass or empty cells stay where they are.
    #[test]
    fn inert_cells_keep_their_items(mut g in arb_grid(10)) {
        let inert: Vec<_> = g
            .iter()
            .filter(|(_, c)| c.cell_type != CellType::Conveyor && c.has_item())
            .map(|(p, c)| (p, c.item))
            .collect();

        for tick in 1..=5 {
            step(&mut g, tick, &mut NullSink);
        }

        for (p, item) in inert {
            prop_assert_eq!(g[p].item, item);
        }
    }

    /// Kind changes are exactly those reported as transmutations.
    #[test]
    fn wood_count_changes_only_by_transmutation(mut g in arb_grid(12)) {
        let wood_before = g.count_of(Item::Wood) as i64;
        let mut events: Vec<Event> = Vec::new();
        step(&mut g, 1, &mut events);

        let mut delta = 0i64;
        for e in &events {
            if let Event::ItemTransmuted { from_item, to_item, .. } = e {
                match (from_item, to_item) {
                    (Item::Wood, Item::Gold) => delta -= 1,
                    (Item::Gold, Item::Wood) => delta += 1,
                    other => prop_assert!(false, "unexpected transmutation {:?}", other),
                }
            }
        }
        prop_assert_eq!(g.count_of(Item::Wood) as i64, wood_before + delta);
    }

    /// Determinism: two copies of the same grid evolve identically.
    #[test]
    fn stepping_is_deterministic(g in arb_grid(12), ticks in 1..20u64) {
        let mut a = g.clone();
        let mut b = g;
        for tick in 1..=ticks {
            step(&mut a, tick, &mut NullSink);
            step(&mut b, tick, &mut NullSink);
        }
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    /// Every reported move really happened: the destination holds an item
    /// marked as updated this step.
    #[test]
    fn destinations_are_marked_updated(mut g in arb_grid(12)) {
        let mut events: Vec<Event> = Vec::new();
        let report = step(&mut g, 1, &mut events);

        let mut moves = 0;
        for e in &events {
            if let Event::ItemMoved { to, .. } = e {
                prop_assert!(g[*to].item_updated);
                prop_assert!(g[*to].has_item());
                moves += 1;
            }
        }
        prop_assert_eq!(moves, report.moved);
    }
}
