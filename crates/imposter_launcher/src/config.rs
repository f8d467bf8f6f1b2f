use bevy::prelude::*;
use thiserror::Error;

pub const GRID_ROWS: u16 = 8;
pub const GRID_COLUMNS: u16 = 5;
pub const ICON_SIZE: f32 = 72.0;
pub const ICON_CORNER_RADIUS: f32 = 18.0;
pub const ICON_LABEL: &str = "CH";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Grid needs at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: u16, columns: u16 },

    #[error("Icon size must be a positive number of pixels, got {0}")]
    InvalidIconSize(f32),

    #[error("Corner radius {radius} does not fit an icon of size {icon_size}")]
    InvalidCornerRadius { radius: f32, icon_size: f32 },
}

/// Static layout settings for the launcher screen.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LauncherConfig {
    pub rows: u16,
    pub columns: u16,
    /// Edge length of a collapsed tile, in logical pixels.
    pub icon_size: f32,
    /// Corner radius of a collapsed tile, in logical pixels.
    pub corner_radius: f32,
    pub tile_color: Color,
    pub label: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            columns: GRID_COLUMNS,
            icon_size: ICON_SIZE,
            corner_radius: ICON_CORNER_RADIUS,
            tile_color: Color::srgb(0.0, 1.0, 1.0),
            label: ICON_LABEL.to_string(),
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if !self.icon_size.is_finite() || self.icon_size <= 0.0 {
            return Err(ConfigError::InvalidIconSize(self.icon_size));
        }

        if !(0.0..=self.icon_size / 2.0).contains(&self.corner_radius) {
            return Err(ConfigError::InvalidCornerRadius {
                radius: self.corner_radius,
                icon_size: self.icon_size,
            });
        }

        Ok(())
    }

    pub const fn tile_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }
}
