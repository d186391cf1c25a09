use bevy::prelude::*;

use crate::state::WorldState;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, tick_simulation);
    }
}

/// The engine paces itself; we only hand it the clock once per frame.
fn tick_simulation(time: Res<Time>, mut world: NonSendMut<WorldState>) {
    if world.engine.update(time.elapsed_secs_f64()) {
        let report = world.engine.last_report();
        if report.blocked_chains > 0 {
            log::debug!(
                "tick {}: {} full conveyor loops",
                world.engine.tick(),
                report.blocked_chains
            );
        }
    }
}
