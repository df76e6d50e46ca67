//! Desktop configuration
//!
//! Every field has a default matching the portfolio site's stock behavior,
//! so the host may pass a partial JSON object (or none at all).

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};
use crate::math::Size;
use crate::surface::TrayStyle;
use crate::transition::{CLOSE_DURATION_MS, OPEN_DURATION_MS, SNAP_DURATION_MS};

/// Corner radii for the three resting shapes of a surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CornerRadii {
    /// Radius of the originating project card
    pub card: f32,
    pub windowed: f32,
    pub fullscreen: f32,
}

impl Default for CornerRadii {
    fn default() -> Self {
        Self {
            card: 8.0,
            windowed: 12.0,
            fullscreen: 0.0,
        }
    }
}

/// Tunables for the floating window manager
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesktopConfig {
    /// Size of a freshly opened window
    pub default_window_size: Size,
    /// Resize floor
    pub min_window_size: Size,
    /// Pointer travel (px) before a press becomes a drag or resize
    pub drag_threshold: f32,
    /// Viewports narrower than this open projects in a new tab instead
    pub external_breakpoint: f32,
    /// Lowest z-index handed out to windows
    pub z_index_base: u32,
    /// Fraction of the free viewport space used for random placement
    pub placement_bias: f32,
    pub open_duration_ms: f32,
    pub close_duration_ms: f32,
    pub snap_duration_ms: f32,
    /// Scale reached at the end of the close animation
    pub close_scale: f32,
    pub radii: CornerRadii,
    pub tray: TrayStyle,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            default_window_size: Size::new(1200.0, 800.0),
            min_window_size: Size::new(400.0, 300.0),
            drag_threshold: 3.0,
            external_breakpoint: 600.0,
            z_index_base: 100,
            placement_bias: 0.3,
            open_duration_ms: OPEN_DURATION_MS,
            close_duration_ms: CLOSE_DURATION_MS,
            snap_duration_ms: SNAP_DURATION_MS,
            close_scale: 0.95,
            radii: CornerRadii::default(),
            tray: TrayStyle::default(),
        }
    }
}

impl DesktopConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json(json: &str) -> FolioResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| FolioError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DesktopConfig::default();
        assert_eq!(config.default_window_size, Size::new(1200.0, 800.0));
        assert_eq!(config.min_window_size, Size::new(400.0, 300.0));
        assert_eq!(config.z_index_base, 100);
        assert!((config.drag_threshold - 3.0).abs() < 0.001);
        assert!((config.external_breakpoint - 600.0).abs() < 0.001);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            DesktopConfig::from_json(r#"{ "dragThreshold": 5, "tray": { "step": 72 } }"#).unwrap();
        assert!((config.drag_threshold - 5.0).abs() < 0.001);
        assert!((config.tray.step - 72.0).abs() < 0.001);
        assert!((config.tray.margin - 16.0).abs() < 0.001);
        assert_eq!(config.default_window_size, Size::new(1200.0, 800.0));
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(DesktopConfig::from_json("  ").unwrap(), DesktopConfig::default());
        assert_eq!(DesktopConfig::from_json("{}").unwrap(), DesktopConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = DesktopConfig::from_json(r#"{ "zIndexBase": "high" }"#).unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }
}
