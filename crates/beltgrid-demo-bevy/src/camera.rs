use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::player::{Player, to_scene};
use crate::state::ViewSettings;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_follow).chain());
    }
}

/// Magnification: 1.0 is one pixel per world unit.
#[derive(Component)]
pub struct MainCamera {
    pub zoom: f32,
}

fn setup_camera(mut commands: Commands, view: Res<ViewSettings>) {
    let zoom = view.0.zoom.clamp(view.0.zoom_min, view.0.zoom_max);
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / zoom,
            ..OrthographicProjection::default_2d()
        },
        MainCamera { zoom },
    ));
}

/// Pixel-unit wheels report far larger deltas than line-unit ones.
const PIXELS_PER_LINE: f32 = 100.0;

fn camera_zoom(
    mut scroll: EventReader<MouseWheel>,
    view: Res<ViewSettings>,
    mut camera_q: Query<(&mut MainCamera, &mut OrthographicProjection)>,
) {
    let lines: f32 = scroll
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        })
        .sum();
    if lines == 0.0 {
        return;
    }

    if let Ok((mut camera, mut proj)) = camera_q.get_single_mut() {
        camera.zoom = zoom_by(camera.zoom, lines, &view);
        proj.scale = 1.0 / camera.zoom;
    }
}

fn zoom_by(zoom: f32, lines: f32, view: &ViewSettings) -> f32 {
    (zoom + lines * view.0.zoom_step).clamp(view.0.zoom_min, view.0.zoom_max)
}

fn camera_follow(
    player_q: Query<&Player>,
    mut camera_q: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(player) = player_q.get_single() else {
        return;
    };
    if let Ok(mut transform) = camera_q.get_single_mut() {
        let target = to_scene(player.centre());
        transform.translation.x = target.x;
        transform.translation.y = target.y;
    }
}
