use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use launcher_helpers::primary_window_size;

use crate::config::LauncherConfig;
use crate::geometry::TileGeometry;
use crate::tile::{TileState, TileSystems, TileTransition, TileVisuals};

pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_grid).add_systems(
            Update,
            sync_grid_config.before(TileSystems::Animate),
        );
    }
}

/// Layout of the launcher grid, derived from [`LauncherConfig`] and the screen.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub rows: u16,
    pub columns: u16,
    pub icon_size: f32,
    pub corner_radius: f32,
    /// Logical size of the screen the tiles expand into.
    pub screen_size: Vec2,
}

impl GridConfig {
    pub const fn new(config: &LauncherConfig, screen_size: Vec2) -> Self {
        Self {
            rows: config.rows,
            columns: config.columns,
            icon_size: config.icon_size,
            corner_radius: config.corner_radius,
            screen_size,
        }
    }

    /// Scale that stretches a tile to the full screen on each axis.
    pub fn fill_factor(&self) -> Vec2 {
        self.screen_size / self.icon_size
    }

    pub fn screen_center(&self) -> Vec2 {
        self.screen_size / 2.0
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: u16,
    pub column: u16,
}

/// Root node holding every tile, so `ZIndex` orders tiles against each other.
#[derive(Component)]
pub struct LauncherGrid;

fn spawn_grid(mut commands: Commands, config: Res<LauncherConfig>, grid: Res<GridConfig>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.),
                height: Val::Percent(100.),
                display: Display::Grid,
                grid_template_columns: RepeatedGridTrack::px(grid.columns, grid.icon_size),
                grid_template_rows: RepeatedGridTrack::px(grid.rows, grid.icon_size),
                justify_content: JustifyContent::Center,
                align_content: AlignContent::Center,
                ..default()
            },
            LauncherGrid,
        ))
        .with_children(|parent| {
            for row in 0..grid.rows {
                for column in 0..grid.columns {
                    spawn_tile(parent, &config, &grid, GridCell { row, column });
                }
            }
        });

    info!(
        "Spawned {} tiles in a {}x{} grid",
        config.tile_count(),
        grid.rows,
        grid.columns
    );
}

fn spawn_tile(
    parent: &mut ChildBuilder,
    config: &LauncherConfig,
    grid: &GridConfig,
    cell: GridCell,
) {
    let rest = TileVisuals::collapsed(grid.corner_radius);

    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(grid.icon_size),
                height: Val::Px(grid.icon_size),
                position_type: PositionType::Relative,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(config.tile_color),
            BorderRadius::all(Val::Px(rest.corner_radius)),
            ZIndex(rest.draw_order()),
            cell,
            TileState::Collapsed,
            TileGeometry::default(),
            TileTransition::new(rest),
        ))
        .with_child((
            Text::new(config.label.clone()),
            TextFont {
                font_size: grid.icon_size * 0.3,
                ..default()
            },
            TextColor(Color::BLACK),
            TextLayout::new_with_justify(JustifyText::Center),
        ));
}

fn sync_grid_config(windows: Query<&Window, With<PrimaryWindow>>, mut grid: ResMut<GridConfig>) {
    let Some(screen_size) = primary_window_size(&windows) else {
        return;
    };

    if grid.screen_size != screen_size {
        info!(
            "Screen resized to {screen_size}, fill factor {}",
            screen_size / grid.icon_size
        );
        grid.screen_size = screen_size;
    }
}
