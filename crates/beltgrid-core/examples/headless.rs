//! Headless run of the demo world, printed as text after every step.
//!
//! Loads an optional config file, places the demonstration loop plus a
//! transmutator, and runs a fixed number of ticks against the wall clock.
//!
//! Run with: `RUST_LOG=debug cargo run -p beltgrid-core --example headless -- [config.ron] [ticks]`

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use beltgrid_core::cell::{Direction, Item};
use beltgrid_core::config::load_or_default;
use beltgrid_core::editor::EditCommand;
use beltgrid_core::engine::Engine;
use beltgrid_core::event::{Event, EventKind};
use beltgrid_core::grid::GridPosition;
use beltgrid_core::query::render_ascii;
use beltgrid_core::scheduler::{Clock, SystemClock};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);

    let config = match load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let mut engine = match Engine::demo(&config.sim) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Make the bottom-right corner of the loop a transmutator so the wood
    // turns to gold on its way round.
    engine.apply_edit(
        GridPosition::new(5, 5),
        EditCommand::PlaceConveyor {
            direction: Direction::Left,
            transmutator: true,
        },
    );

    let transmuted = Rc::new(RefCell::new(0u32));
    let counter = Rc::clone(&transmuted);
    engine.on_passive(
        EventKind::ItemTransmuted,
        Box::new(move |_: &Event| {
            *counter.borrow_mut() += 1;
        }),
    );

    let clock = SystemClock::new();
    engine.resume(clock.now_secs());

    println!("tick 0\n{}", render_ascii(engine.grid(), 10));
    while engine.tick() < ticks {
        if engine.update(clock.now_secs()) {
            let report = engine.last_report();
            println!(
                "tick {} ({} moved, {} transmuted)\n{}",
                engine.tick(),
                report.moved,
                report.transmuted,
                render_ascii(engine.grid(), 10)
            );
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    println!(
        "{} transmutations; {} wood, {} gold",
        transmuted.borrow(),
        engine.grid().count_of(Item::Wood),
        engine.grid().count_of(Item::Gold)
    );
}
