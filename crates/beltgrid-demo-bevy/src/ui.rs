use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::state::WorldState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud);
    }
}

#[derive(Component)]
struct FpsText;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("FPS"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb_u8(0, 158, 47)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(0.0),
            left: Val::Px(0.0),
            ..default()
        },
        FpsText,
    ));
}

fn update_hud(
    diagnostics: Res<DiagnosticsStore>,
    world: NonSend<WorldState>,
    mut text_q: Query<&mut Text, With<FpsText>>,
) {
    let Ok(mut text) = text_q.get_single_mut() else {
        return;
    };
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    text.0 = format!("{fps:.0} FPS  tick {}", world.engine.tick());
}
