use bevy::prelude::*;

use crate::grid::GridCell;
use crate::tile::{TileState, TileSystems};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_tile_taps.in_set(TileSystems::Input));
    }
}

/// Flips a tile whenever it is pressed. Taps are not debounced: a tap during an
/// animation just points the tile at the other state again.
fn handle_tile_taps(
    mut tiles: Query<(&Interaction, &GridCell, &mut TileState), Changed<Interaction>>,
) {
    for (interaction, cell, mut state) in &mut tiles {
        if *interaction != Interaction::Pressed {
            continue;
        }

        *state = state.toggled();
        debug!(
            "Tile at row {}, column {} is now {}",
            cell.row, cell.column, *state
        );
    }
}
