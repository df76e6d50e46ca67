use serde::Serialize;

use crate::math::Rect;
use crate::window::{ViewMode, WindowId};

use super::TrayTile;

/// Lifecycle phase of a surface, as seen by the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfacePhase {
    Opening,
    Steady,
    Closing,
}

/// Everything the host needs to position and style one window for a frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowFrame {
    pub id: WindowId,
    pub title: String,
    /// URL for the embedded frame; `about:blank` once closing
    pub content_url: String,
    pub image_src: String,
    pub phase: SurfacePhase,
    pub mode: ViewMode,
    /// Surface rectangle in viewport coordinates
    pub rect: Rect,
    pub opacity: f32,
    pub scale: f32,
    pub corner_radius: f32,
    pub z_index: u32,
    /// Surface accepts pointer events (open and not minimized)
    pub interactive: bool,
    /// Embedded content accepts pointer events (false while resizing)
    pub content_interactive: bool,
    /// Resize handles are shown (not in fullscreen)
    pub resizable: bool,
    /// Header is being dragged
    pub dragging: bool,
    /// Cursor for the full-surface overlay shown while resizing
    pub overlay_cursor: Option<&'static str>,
    /// Loading overlay is shown until the content reports it has loaded
    pub loading: bool,
    /// Tray tile, present while minimized
    pub tray: Option<TrayTile>,
}
