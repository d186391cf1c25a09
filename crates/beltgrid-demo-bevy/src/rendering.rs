use beltgrid_core::cell::{CellType, Item};
use beltgrid_core::grid::GridPosition;
use beltgrid_core::query::CellSnapshot;
use bevy::prelude::*;

use crate::player::to_scene;
use crate::state::{ViewSettings, WorldState};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_cells).add_systems(
            PostUpdate,
            (paint_cells, paint_items, paint_glyphs, finish_paint).chain(),
        );
    }
}

/// Terrain square of one cell.
#[derive(Component)]
pub struct CellTile(pub GridPosition);

/// Item square drawn inset on top of a cell.
#[derive(Component)]
pub struct ItemTile(pub GridPosition);

/// Heading glyph of a conveyor.
#[derive(Component)]
pub struct GlyphLabel(pub GridPosition);

/// Gap between an item square and its cell edge.
const ITEM_INSET: f32 = 2.0;
const GLYPH_FONT_SIZE: f32 = 12.0;

fn spawn_cells(mut commands: Commands, view: Res<ViewSettings>, world: NonSend<WorldState>) {
    let block = view.0.block_size;
    let grid = world.engine.grid();

    for pos in grid.positions() {
        let corner = Vec2::new(pos.x as f32, pos.y as f32) * block;
        let centre = to_scene(corner + Vec2::splat(block / 2.0));

        commands
            .spawn((
                Sprite::from_color(Color::NONE, Vec2::splat(block)),
                Transform::from_xyz(centre.x, centre.y, 0.0),
                Visibility::Hidden,
                CellTile(pos),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite::from_color(Color::NONE, Vec2::splat(block - 2.0 * ITEM_INSET)),
                    Transform::from_xyz(0.0, 0.0, 1.0),
                    Visibility::Hidden,
                    ItemTile(pos),
                ));
                parent.spawn((
                    Text2d::new(""),
                    TextFont {
                        font_size: GLYPH_FONT_SIZE,
                        ..default()
                    },
                    TextColor(sky_blue()),
                    Transform::from_xyz(0.0, 0.0, 2.0),
                    Visibility::Hidden,
                    GlyphLabel(pos),
                ));
            });
    }
}

/// Whether `pos` needs repainting this frame.
fn needs_paint(world: &WorldState, pos: GridPosition) -> bool {
    let dirty = world.engine.dirty_tracker();
    dirty.is_all_dirty() || dirty.is_cell_dirty(pos)
}

fn snapshot(world: &WorldState, pos: GridPosition) -> Option<CellSnapshot> {
    if !needs_paint(world, pos) {
        return None;
    }
    world.engine.snapshot_cell(pos)
}

fn paint_cells(
    world: NonSend<WorldState>,
    mut tiles: Query<(&CellTile, &mut Sprite, &mut Visibility)>,
) {
    if !world.engine.is_dirty() {
        return;
    }
    for (tile, mut sprite, mut visibility) in &mut tiles {
        let Some(snap) = snapshot(&world, tile.0) else {
            continue;
        };
        match terrain_color(&snap) {
            Some(color) => {
                sprite.color = color;
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

fn paint_items(
    world: NonSend<WorldState>,
    mut tiles: Query<(&ItemTile, &mut Sprite, &mut Visibility)>,
) {
    if !world.engine.is_dirty() {
        return;
    }
    for (tile, mut sprite, mut visibility) in &mut tiles {
        let Some(snap) = snapshot(&world, tile.0) else {
            continue;
        };
        match item_color(snap.item) {
            Some(color) => {
                sprite.color = color;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

fn paint_glyphs(
    world: NonSend<WorldState>,
    mut labels: Query<(&GlyphLabel, &mut Text2d, &mut Visibility)>,
) {
    if !world.engine.is_dirty() {
        return;
    }
    for (label, mut text, mut visibility) in &mut labels {
        let Some(snap) = snapshot(&world, label.0) else {
            continue;
        };
        match snap.glyph() {
            Some(glyph) => {
                text.0 = glyph.to_string();
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

fn finish_paint(mut world: NonSendMut<WorldState>) {
    if world.engine.is_dirty() {
        world.engine.mark_clean();
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// `None` for cells that are not drawn.
fn terrain_color(snap: &CellSnapshot) -> Option<Color> {
    match snap.cell_type {
        CellType::Empty => None,
        CellType::Grass => Some(Color::srgb_u8(0, 228, 48)),
        CellType::Conveyor if snap.transmutator => Some(Color::srgb_u8(124, 124, 170)),
        CellType::Conveyor => Some(Color::srgb_u8(124, 124, 124)),
    }
}

fn item_color(item: Item) -> Option<Color> {
    match item {
        Item::Empty => None,
        Item::Wood => Some(Color::srgb_u8(127, 106, 79)),
        Item::Gold => Some(Color::srgb_u8(253, 249, 0)),
    }
}

fn sky_blue() -> Color {
    Color::srgb_u8(102, 191, 255)
}
