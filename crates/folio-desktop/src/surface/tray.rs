//! Minimized tray layout
//!
//! Minimized windows collapse to small tiles stacked upward from the
//! bottom-right corner, one row per minimized window in registry order.

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size};

/// Tray geometry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrayStyle {
    /// Distance of the first tile from the right and bottom edges
    pub margin: f32,
    /// Vertical distance between successive tiles
    pub step: f32,
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Default for TrayStyle {
    fn default() -> Self {
        Self {
            margin: 16.0,
            step: 60.0,
            tile_width: 180.0,
            tile_height: 40.0,
        }
    }
}

/// Placement of one minimized window's tile
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrayTile {
    /// Minimized rank, 0 at the bottom
    pub rank: usize,
    /// CSS `right` offset
    pub right: f32,
    /// CSS `bottom` offset
    pub bottom: f32,
    /// Same placement in viewport coordinates
    pub rect: Rect,
    /// Always one above the owning window
    pub z_index: u32,
}

/// Lay out the tile for the window at minimized `rank`
pub fn tray_tile(style: &TrayStyle, viewport: Size, rank: usize, window_z: u32) -> TrayTile {
    let bottom = style.margin + rank as f32 * style.step;
    let right = style.margin;
    TrayTile {
        rank,
        right,
        bottom,
        rect: Rect::new(
            viewport.width - right - style.tile_width,
            viewport.height - bottom - style.tile_height,
            style.tile_width,
            style.tile_height,
        ),
        z_index: window_z + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_stack_upward() {
        let style = TrayStyle::default();
        let viewport = Size::new(1920.0, 1080.0);

        let first = tray_tile(&style, viewport, 0, 100);
        assert!((first.bottom - 16.0).abs() < 0.001);
        assert!((first.right - 16.0).abs() < 0.001);
        assert_eq!(first.rect, Rect::new(1724.0, 1024.0, 180.0, 40.0));
        assert_eq!(first.z_index, 101);

        let third = tray_tile(&style, viewport, 2, 105);
        assert!((third.bottom - 136.0).abs() < 0.001);
        assert!((first.rect.y - third.rect.y - 120.0).abs() < 0.001);
        assert_eq!(third.z_index, 106);
    }
}
