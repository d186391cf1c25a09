//! The player: a square walking over the world with WASD.
//!
//! Positions are in world units with y pointing down, matching grid rows.
//! [`to_scene`] converts to bevy's y-up space for drawing.

use bevy::prelude::*;

use crate::state::{ViewSettings, WorldState};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player)
            .add_systems(Update, (move_player, sync_player_sprite).chain());
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub position: Vec2,
    pub size: f32,
    /// World units per second.
    pub speed: f32,
}

impl Player {
    /// A player standing in the middle of a world of `world_size` cells.
    pub fn centred(world_size: u32, view: &ViewSettings) -> Self {
        let half = world_size as f32 * view.0.block_size / 2.0;
        Self {
            position: Vec2::splat(half),
            size: view.0.player_size,
            speed: view.0.player_speed,
        }
    }

    /// Move along `input` for `dt` seconds. Diagonals are no faster than
    /// straight lines.
    pub fn walk(&mut self, input: Vec2, dt: f32) {
        self.position += input.normalize_or_zero() * self.speed * dt;
    }

    pub fn centre(&self) -> Vec2 {
        self.position + Vec2::splat(self.size / 2.0)
    }
}

/// World (y-down) to scene (y-up) coordinates.
pub fn to_scene(world: Vec2) -> Vec2 {
    Vec2::new(world.x, -world.y)
}

/// WASD as a y-down direction.
fn wasd(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let axis = |neg: KeyCode, pos: KeyCode| {
        (keys.pressed(pos) as i8 - keys.pressed(neg) as i8) as f32
    };
    Vec2::new(axis(KeyCode::KeyA, KeyCode::KeyD), axis(KeyCode::KeyW, KeyCode::KeyS))
}

fn spawn_player(mut commands: Commands, view: Res<ViewSettings>, world: NonSend<WorldState>) {
    let player = Player::centred(world.engine.world_size(), &view);
    let centre = to_scene(player.centre());
    commands.spawn((
        Sprite::from_color(Color::srgb_u8(230, 41, 55), Vec2::splat(player.size)),
        Transform::from_xyz(centre.x, centre.y, 10.0),
        player,
    ));
}

fn move_player(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut player_q: Query<&mut Player>,
) {
    if let Ok(mut player) = player_q.get_single_mut() {
        player.walk(wasd(&keys), time.delta_secs());
    }
}

fn sync_player_sprite(mut player_q: Query<(&Player, &mut Transform), Changed<Player>>) {
    for (player, mut transform) in &mut player_q {
        let centre = to_scene(player.centre());
        transform.translation.x = centre.x;
        transform.translation.y = centre.y;
    }
}
