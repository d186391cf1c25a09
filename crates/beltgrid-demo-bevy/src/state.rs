use std::path::PathBuf;

use beltgrid_core::config::{Config, ConfigError, SimConfig, ViewConfig, load_or_default};
use beltgrid_core::engine::Engine;
use beltgrid_core::grid::GridError;
use bevy::prelude::*;

/// Environment variable naming a config file, used when no path is given on
/// the command line.
pub const CONFIG_ENV: &str = "BELTGRID_CONFIG";

/// The simulation.
/// Not `Send + Sync` because the event bus holds boxed `FnMut` listeners,
/// so we use `NonSend` / `NonSendMut` to access this resource.
pub struct WorldState {
    pub engine: Engine,
}

impl WorldState {
    pub fn new(config: &SimConfig) -> Result<Self, GridError> {
        Ok(Self {
            engine: Engine::demo(config)?,
        })
    }
}

/// Window, player and camera parameters.
#[derive(Resource, Debug, Clone)]
pub struct ViewSettings(pub ViewConfig);

/// Config from the first command-line argument, else `BELTGRID_CONFIG`,
/// else defaults.
pub fn load_startup_config() -> Result<Config, ConfigError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from);
    load_or_default(path.as_deref())
}
