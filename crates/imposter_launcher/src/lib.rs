use bevy::prelude::*;
use launcher_helpers::DEFAULT_SCREEN_SIZE;

mod config;
mod geometry;
mod grid;
mod input;
mod spring;
mod tile;

pub use config::{ConfigError, LauncherConfig};
use geometry::GeometryPlugin;
pub use geometry::TileGeometry;
use grid::GridPlugin;
pub use grid::{GridCell, GridConfig};
use input::InputPlugin;
pub use spring::{SpringChannel, SpringSpec};
use tile::TilePlugin;
pub use tile::{TileState, TileTransition, TileVisuals};

pub fn run() -> AppExit {
    run_with(LauncherConfig::default())
}

pub fn run_with(config: LauncherConfig) -> AppExit {
    // Checked before the window exists; there is no log subscriber yet either.
    if let Err(err) = config.validate() {
        eprintln!("Invalid launcher configuration: {err}");
        return AppExit::error();
    }

    launcher_helpers::get_default_app(env!("CARGO_PKG_NAME"))
        .add_plugins(LauncherPlugin::new(config))
        .add_systems(Startup, setup)
        .run()
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Everything the launcher screen needs on top of a windowed app.
pub struct LauncherPlugin {
    config: LauncherConfig,
}

impl LauncherPlugin {
    pub const fn new(config: LauncherConfig) -> Self {
        Self { config }
    }
}

impl Plugin for LauncherPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GridConfig::new(&self.config, DEFAULT_SCREEN_SIZE))
            .insert_resource(self.config.clone())
            .add_plugins((GridPlugin, InputPlugin, TilePlugin, GeometryPlugin));
    }
}
