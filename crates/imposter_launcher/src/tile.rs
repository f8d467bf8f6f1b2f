use bevy::prelude::*;

use crate::geometry::TileGeometry;
use crate::grid::GridConfig;
use crate::spring::{PIXEL_THRESHOLD, STIFFNESS_LOW, SpringChannel, SpringSpec, UNIT_THRESHOLD};

/// Draw order of a fully expanded tile, above every collapsed sibling.
pub const EXPANDED_Z_INDEX: f32 = 7.0;

// Collapsing settles with a little bounce, everything else glides in.
const COLLAPSE_SPRING: SpringSpec = SpringSpec::new(0.9, STIFFNESS_LOW);
const DEFAULT_SPRING: SpringSpec = SpringSpec::new(1.0, STIFFNESS_LOW);

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum TileSystems {
    Input,
    Animate,
    Apply,
}

pub struct TilePlugin;

impl Plugin for TilePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (TileSystems::Input, TileSystems::Animate, TileSystems::Apply).chain(),
        )
        .add_systems(
            Update,
            (
                animate_tiles.in_set(TileSystems::Animate),
                apply_tile_visuals.in_set(TileSystems::Apply),
            ),
        );
    }
}

#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TileState {
    #[default]
    Collapsed,
    Expanded,
}

impl TileState {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// The four properties a tile animates between its two states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileVisuals {
    pub corner_radius: f32,
    /// Translation away from the tile's grid cell, in logical pixels.
    pub offset: Vec2,
    pub scale: Vec2,
    pub z_index: f32,
}

impl TileVisuals {
    pub const fn collapsed(corner_radius: f32) -> Self {
        Self {
            corner_radius,
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
            z_index: 0.0,
        }
    }

    /// Square, screen-filling and centered.
    ///
    /// A tile that was never measured has no known home position, so it
    /// grows in place instead of moving toward the center.
    pub fn expanded(grid: &GridConfig, geometry: &TileGeometry) -> Self {
        let offset = geometry
            .center()
            .map_or(Vec2::ZERO, |center| grid.screen_center() - center);

        Self {
            corner_radius: 0.0,
            offset,
            scale: grid.fill_factor(),
            z_index: EXPANDED_Z_INDEX,
        }
    }

    pub fn for_state(state: TileState, grid: &GridConfig, geometry: &TileGeometry) -> Self {
        match state {
            TileState::Collapsed => Self::collapsed(grid.corner_radius),
            TileState::Expanded => Self::expanded(grid, geometry),
        }
    }

    /// Integer stacking order for these values.
    pub fn draw_order(&self) -> i32 {
        self.z_index.ceil() as i32
    }
}

/// Drives every animated property of one tile from a single transition.
#[derive(Component, Debug, Clone)]
pub struct TileTransition {
    origin: TileState,
    target: TileState,
    spec: SpringSpec,
    corner_radius: SpringChannel,
    offset_x: SpringChannel,
    offset_y: SpringChannel,
    scale_x: SpringChannel,
    scale_y: SpringChannel,
    z_index: SpringChannel,
}

impl TileTransition {
    /// A transition resting collapsed at `rest`.
    pub const fn new(rest: TileVisuals) -> Self {
        Self {
            origin: TileState::Collapsed,
            target: TileState::Collapsed,
            spec: DEFAULT_SPRING,
            corner_radius: SpringChannel::at_rest(rest.corner_radius, UNIT_THRESHOLD),
            offset_x: SpringChannel::at_rest(rest.offset.x, PIXEL_THRESHOLD),
            offset_y: SpringChannel::at_rest(rest.offset.y, PIXEL_THRESHOLD),
            scale_x: SpringChannel::at_rest(rest.scale.x, UNIT_THRESHOLD),
            scale_y: SpringChannel::at_rest(rest.scale.y, UNIT_THRESHOLD),
            z_index: SpringChannel::at_rest(rest.z_index, UNIT_THRESHOLD),
        }
    }

    /// The state the transition is leaving. A retarget mid-flight makes the
    /// previous target the new origin.
    pub const fn origin(&self) -> TileState {
        self.origin
    }

    pub const fn target_state(&self) -> TileState {
        self.target
    }

    pub const fn spec(&self) -> SpringSpec {
        self.spec
    }

    fn channels(&self) -> [&SpringChannel; 6] {
        [
            &self.corner_radius,
            &self.offset_x,
            &self.offset_y,
            &self.scale_x,
            &self.scale_y,
            &self.z_index,
        ]
    }

    pub fn is_running(&self) -> bool {
        self.channels().iter().any(|channel| !channel.is_settled())
    }

    /// Whether the tile rests in `state` with nothing in flight.
    pub fn is_idle_at(&self, state: TileState) -> bool {
        self.origin == state && self.target == state && !self.is_running()
    }

    pub const fn visuals(&self) -> TileVisuals {
        TileVisuals {
            corner_radius: self.corner_radius.value(),
            offset: Vec2::new(self.offset_x.value(), self.offset_y.value()),
            scale: Vec2::new(self.scale_x.value(), self.scale_y.value()),
            z_index: self.z_index.value(),
        }
    }

    /// Stacking order of the tile right now. Any tile that is expanded or
    /// still moving stays above the resting ones, even once its own z channel
    /// has already reached zero on the way back down.
    pub fn draw_order(&self) -> i32 {
        let order = self.visuals().draw_order();
        if self.target == TileState::Expanded || self.is_running() {
            order.max(1)
        } else {
            order
        }
    }

    pub const fn targets(&self) -> TileVisuals {
        TileVisuals {
            corner_radius: self.corner_radius.target(),
            offset: Vec2::new(self.offset_x.target(), self.offset_y.target()),
            scale: Vec2::new(self.scale_x.target(), self.scale_y.target()),
            z_index: self.z_index.target(),
        }
    }

    /// Heads toward `state`, whose resting look is `targets`.
    ///
    /// Anything already in flight keeps its current value and velocity and
    /// bends toward the new targets.
    pub fn animate_to(&mut self, state: TileState, targets: TileVisuals) {
        if state != self.target {
            self.origin = self.target;
            self.target = state;
            self.spec = match (self.origin, state) {
                (TileState::Expanded, TileState::Collapsed) => COLLAPSE_SPRING,
                _ => DEFAULT_SPRING,
            };
        }

        self.corner_radius.retarget(targets.corner_radius);
        self.offset_x.retarget(targets.offset.x);
        self.offset_y.retarget(targets.offset.y);
        self.scale_x.retarget(targets.scale.x);
        self.scale_y.retarget(targets.scale.y);
        self.z_index.retarget(targets.z_index);
    }

    pub fn tick(&mut self, dt: f32) {
        let spec = self.spec;
        for channel in [
            &mut self.corner_radius,
            &mut self.offset_x,
            &mut self.offset_y,
            &mut self.scale_x,
            &mut self.scale_y,
            &mut self.z_index,
        ] {
            channel.tick(&spec, dt);
        }

        if !self.is_running() {
            self.origin = self.target;
        }
    }
}

fn animate_tiles(
    time: Res<Time>,
    grid: Res<GridConfig>,
    mut tiles: Query<(&TileState, &TileGeometry, &mut TileTransition)>,
) {
    let dt = time.delta_secs();

    for (state, geometry, mut transition) in &mut tiles {
        let targets = TileVisuals::for_state(*state, &grid, geometry);
        if transition.target_state() != *state || transition.targets() != targets {
            if transition.target_state() != *state {
                debug!("Tile heading from {} to {state}", transition.origin());
            }
            transition.animate_to(*state, targets);
        }

        if transition.is_running() {
            transition.tick(dt);
        }
    }
}

fn apply_tile_visuals(
    mut tiles: Query<
        (
            &TileTransition,
            &mut Node,
            &mut Transform,
            &mut BorderRadius,
            &mut ZIndex,
        ),
        Changed<TileTransition>,
    >,
) {
    for (transition, mut node, mut transform, mut border_radius, mut z_index) in &mut tiles {
        let visuals = transition.visuals();

        node.left = Val::Px(visuals.offset.x);
        node.top = Val::Px(visuals.offset.y);
        transform.scale = visuals.scale.extend(1.0);
        *border_radius = BorderRadius::all(Val::Px(visuals.corner_radius));
        *z_index = ZIndex(transition.draw_order());
    }
}
