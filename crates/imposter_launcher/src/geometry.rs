use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy::ui::UiSystem;

use crate::tile::{TileState, TileTransition};

pub struct GeometryPlugin;

impl Plugin for GeometryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            measure_tiles::<ComputedNode>
                .after(UiSystem::Layout)
                .after(TransformSystem::TransformPropagate),
        );
    }
}

/// Where a tile sits on screen while it rests in the grid.
///
/// The center is in logical pixels with the origin at the top left corner of
/// the window. It stays `None` until the tile has been laid out at least once.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct TileGeometry {
    center: Option<Vec2>,
}

impl TileGeometry {
    pub const fn measured(center: Vec2) -> Self {
        Self {
            center: Some(center),
        }
    }

    pub const fn center(&self) -> Option<Vec2> {
        self.center
    }

    /// Records a fresh layout measurement.
    ///
    /// Measurements are only taken while the tile rests collapsed. During an
    /// animation, or while expanded, the node's position includes the
    /// animated offset, and feeding that back would move the home position.
    /// Returns whether the measurement was kept.
    pub fn record_layout(
        &mut self,
        state: TileState,
        transition: &TileTransition,
        center: Vec2,
    ) -> bool {
        if state != TileState::Collapsed || !transition.is_idle_at(TileState::Collapsed) {
            return false;
        }

        self.center = Some(center);
        true
    }
}

/// Layout results of a node, in physical pixels.
pub trait LaidOutNode: Component {
    fn physical_size(&self) -> Vec2;
    fn inverse_scale_factor(&self) -> f32;
}

impl LaidOutNode for ComputedNode {
    fn physical_size(&self) -> Vec2 {
        self.size()
    }

    fn inverse_scale_factor(&self) -> f32 {
        Self::inverse_scale_factor(self)
    }
}

fn measure_tiles<T: LaidOutNode>(
    mut tiles: Query<(
        &TileState,
        &TileTransition,
        &T,
        &GlobalTransform,
        &mut TileGeometry,
    )>,
) {
    for (state, transition, node, global_transform, mut geometry) in &mut tiles {
        // Not laid out yet.
        if node.physical_size() == Vec2::ZERO {
            continue;
        }

        let center = global_transform.translation().truncate() * node.inverse_scale_factor();
        if geometry.center() == Some(center) {
            continue;
        }

        if geometry.record_layout(*state, transition, center) {
            trace!("Tile measured at {center}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileVisuals;

    fn resting() -> TileTransition {
        TileTransition::new(TileVisuals::collapsed(18.0))
    }

    /// Stand-in for the UI layout results of a node.
    #[derive(Component)]
    struct FakeLayout {
        size: Vec2,
        inverse_scale_factor: f32,
    }

    impl LaidOutNode for FakeLayout {
        fn physical_size(&self) -> Vec2 {
            self.size
        }

        fn inverse_scale_factor(&self) -> f32 {
            self.inverse_scale_factor
        }
    }

    fn measuring_app() -> App {
        let mut app = App::new();
        app.add_systems(Update, measure_tiles::<FakeLayout>);
        app
    }

    // Scale factor 2: one logical pixel is two physical ones.
    fn spawn_unlaid_tile(app: &mut App, physical_center: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                TileState::Collapsed,
                resting(),
                FakeLayout {
                    size: Vec2::ZERO,
                    inverse_scale_factor: 0.5,
                },
                GlobalTransform::from_translation(physical_center.extend(0.0)),
                TileGeometry::default(),
            ))
            .id()
    }

    fn lay_out(app: &mut App, tile: Entity, physical_center: Vec2) {
        let mut entity = app.world_mut().entity_mut(tile);
        entity.insert(GlobalTransform::from_translation(physical_center.extend(0.0)));
        if let Some(mut layout) = entity.get_mut::<FakeLayout>() {
            layout.size = Vec2::splat(144.0);
        }
        app.update();
    }

    fn center_of(app: &App, tile: Entity) -> Option<Vec2> {
        app.world()
            .get::<TileGeometry>(tile)
            .and_then(TileGeometry::center)
    }

    #[test]
    fn skips_nodes_before_their_first_layout() {
        let mut app = measuring_app();
        let tile = spawn_unlaid_tile(&mut app, Vec2::new(72.0, 72.0));
        app.update();
        assert_eq!(center_of(&app, tile), None, "zero sized nodes are not measured");
    }

    #[test]
    fn first_layout_is_captured_in_logical_pixels() {
        let mut app = measuring_app();
        let tile = spawn_unlaid_tile(&mut app, Vec2::ZERO);
        app.update();

        lay_out(&mut app, tile, Vec2::new(72.0, 72.0));
        assert_eq!(
            center_of(&app, tile),
            Some(Vec2::new(36.0, 36.0)),
            "cell (0, 0) of 72 px icons, converted from physical pixels"
        );

        lay_out(&mut app, tile, Vec2::new(216.0, 72.0));
        assert_eq!(
            center_of(&app, tile),
            Some(Vec2::new(108.0, 36.0)),
            "later layouts while collapsed refresh the position"
        );
    }

    #[test]
    fn expanded_tile_keeps_its_home_position() {
        let mut app = measuring_app();
        let tile = spawn_unlaid_tile(&mut app, Vec2::ZERO);
        lay_out(&mut app, tile, Vec2::new(72.0, 72.0));

        let mut transition = resting();
        transition.animate_to(
            TileState::Expanded,
            TileVisuals {
                corner_radius: 0.0,
                offset: Vec2::new(144.0, 284.0),
                scale: Vec2::new(5.0, 8.0),
                z_index: 7.0,
            },
        );
        app.world_mut()
            .entity_mut(tile)
            .insert((TileState::Expanded, transition));

        for frame in 1..=3_u8 {
            let shifted = Vec2::new(72.0, 72.0) + Vec2::new(96.0, 190.0) * f32::from(frame);
            lay_out(&mut app, tile, shifted);
            assert_eq!(
                center_of(&app, tile),
                Some(Vec2::new(36.0, 36.0)),
                "layout pass {frame} must not move the home position"
            );
        }
    }

    #[test]
    fn starts_unmeasured() {
        assert_eq!(TileGeometry::default().center(), None, "no layout yet");
    }

    #[test]
    fn records_while_collapsed_and_idle() {
        let mut geometry = TileGeometry::default();
        let recorded =
            geometry.record_layout(TileState::Collapsed, &resting(), Vec2::new(36.0, 36.0));
        assert!(recorded, "idle collapsed tiles are measured");
        assert_eq!(geometry.center(), Some(Vec2::new(36.0, 36.0)), "center kept");
    }

    #[test]
    fn refreshes_on_later_layouts() {
        let mut geometry = TileGeometry::measured(Vec2::new(36.0, 36.0));
        geometry.record_layout(TileState::Collapsed, &resting(), Vec2::new(108.0, 36.0));
        assert_eq!(
            geometry.center(),
            Some(Vec2::new(108.0, 36.0)),
            "later measurements replace earlier ones"
        );
    }

    #[test]
    fn ignores_layout_once_tapped() {
        let mut geometry = TileGeometry::measured(Vec2::new(36.0, 36.0));
        let recorded =
            geometry.record_layout(TileState::Expanded, &resting(), Vec2::new(180.0, 320.0));
        assert!(!recorded, "an expanded tile is not at its home position");
        assert_eq!(geometry.center(), Some(Vec2::new(36.0, 36.0)), "unchanged");
    }

    #[test]
    fn ignores_layout_while_animating_home() {
        let mut transition = resting();
        let expanded = TileVisuals {
            corner_radius: 0.0,
            offset: Vec2::new(144.0, 284.0),
            scale: Vec2::new(5.0, 8.0),
            z_index: 7.0,
        };
        transition.animate_to(TileState::Expanded, expanded);
        for _ in 0..120 {
            transition.tick(1.0 / 60.0);
        }
        transition.animate_to(TileState::Collapsed, TileVisuals::collapsed(18.0));
        transition.tick(1.0 / 60.0);
        assert!(transition.is_running(), "collapse still in flight");

        let mut geometry = TileGeometry::measured(Vec2::new(36.0, 36.0));
        let recorded =
            geometry.record_layout(TileState::Collapsed, &transition, Vec2::new(170.0, 300.0));
        assert!(!recorded, "mid-animation positions are rejected");
    }
}
