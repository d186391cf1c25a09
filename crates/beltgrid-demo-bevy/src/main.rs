mod camera;
mod editor;
mod player;
mod rendering;
mod simulation;
mod state;
mod ui;

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

use crate::state::{ViewSettings, WorldState};

fn main() {
    let config = match state::load_startup_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let world = match WorldState::new(&config.sim) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let view = config.view;
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "factory".into(),
                resolution: (view.screen_width as f32, view.screen_height as f32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(ViewSettings(view))
        .insert_non_send_resource(world)
        .add_plugins((
            player::PlayerPlugin,
            camera::CameraPlugin,
            rendering::RenderingPlugin,
            editor::EditorPlugin,
            simulation::SimulationPlugin,
            ui::UiPlugin,
        ))
        .run();
}
