use beltgrid_core::cell::{Direction, Item};
use beltgrid_core::editor::{EditCommand, world_to_cell};
use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::state::{ViewSettings, WorldState};

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, edit_under_cursor);
    }
}

/// Arrow key, heading it places, and whether holding it repeats the edit.
const ARROWS: [(KeyCode, Direction, bool); 4] = [
    (KeyCode::ArrowLeft, Direction::Left, false),
    (KeyCode::ArrowRight, Direction::Right, false),
    (KeyCode::ArrowUp, Direction::Up, true),
    (KeyCode::ArrowDown, Direction::Down, false),
];

/// Edits requested by keys pressed this frame, in a fixed order.
fn commands_for(keys: &ButtonInput<KeyCode>) -> Vec<EditCommand> {
    let transmutator = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let mut commands: Vec<EditCommand> = ARROWS
        .iter()
        .filter(|&&(key, _, held)| {
            if held {
                keys.pressed(key)
            } else {
                keys.just_pressed(key)
            }
        })
        .map(|&(_, direction, _)| EditCommand::PlaceConveyor {
            direction,
            transmutator,
        })
        .collect();
    if keys.just_pressed(KeyCode::Digit1) {
        commands.push(EditCommand::PlaceItem(Item::Wood));
    }
    if keys.just_pressed(KeyCode::Digit2) {
        commands.push(EditCommand::Clear);
    }
    commands
}

fn edit_under_cursor(
    keys: Res<ButtonInput<KeyCode>>,
    view: Res<ViewSettings>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut world: NonSendMut<WorldState>,
) {
    let commands = commands_for(&keys);
    if commands.is_empty() {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok(scene_pos) = camera.viewport_to_world_2d(cam_transform, cursor_pos) else {
        return;
    };
    // Scene space is y-up; the grid counts rows downward.
    let Some(cell) = world_to_cell(scene_pos.x, -scene_pos.y, view.0.block_size) else {
        return;
    };

    for cmd in commands {
        world.engine.apply_edit(cell, cmd);
    }
}
