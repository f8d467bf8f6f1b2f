#[cfg(target_arch = "wasm32")]
use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use bevy::window::PrimaryWindow;

// Surfaces larger than this fail to configure on most browser GPUs.
#[cfg(target_arch = "wasm32")]
const MAX_SURFACE_EXTENT: f32 = 2048.0;

/// Keeps the primary window in step with the browser viewport.
///
/// The launcher grid derives its fill factor from the window size, so this runs
/// before `Update` to let the tiles see the new size in the same frame.
#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(mut primary_query: Query<&mut Window, With<PrimaryWindow>>) {
    let Some(viewport) = browser_viewport_size() else {
        return;
    };

    for mut window in &mut primary_query {
        let target = viewport.min(Vec2::splat(MAX_SURFACE_EXTENT));
        let current = Vec2::new(window.resolution.width(), window.resolution.height());
        if current.abs_diff_eq(target, f32::EPSILON) {
            continue;
        }

        debug!("Resizing window from {current} to {target}");
        window.resolution.set(target.x, target.y);
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_viewport_size() -> Option<Vec2> {
    let wasm_window = web_sys::window()?;
    let width = wasm_window.inner_width().ok()?.as_f64()?;
    let height = wasm_window.inner_height().ok()?.as_f64()?;
    Some(Vec2::new(width as f32, height as f32))
}
