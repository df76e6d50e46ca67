use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::content::Project;
use crate::math::{Rect, Size, Vec2};

use super::WindowId;

/// How a window is presented
///
/// A single enum instead of independent minimized/fullscreen flags, so a
/// window can never be both at once. A window minimized from fullscreen
/// remembers it and goes back to fullscreen on restore.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewMode {
    /// Floating window with its own size and position
    #[default]
    Windowed,
    /// Covers the whole viewport; stored geometry is kept untouched
    Fullscreen,
    /// Hidden surface, shown as a tray tile
    Minimized {
        #[serde(rename = "fromFullscreen")]
        from_fullscreen: bool,
    },
}

impl ViewMode {
    /// Check if the window is minimized
    pub fn is_minimized(self) -> bool {
        matches!(self, ViewMode::Minimized { .. })
    }

    /// Check if the window is fullscreen
    pub fn is_fullscreen(self) -> bool {
        matches!(self, ViewMode::Fullscreen)
    }

    /// Mode after a minimize request
    pub fn minimized(self) -> ViewMode {
        match self {
            ViewMode::Windowed => ViewMode::Minimized {
                from_fullscreen: false,
            },
            ViewMode::Fullscreen => ViewMode::Minimized {
                from_fullscreen: true,
            },
            minimized @ ViewMode::Minimized { .. } => minimized,
        }
    }

    /// Mode after a restore request
    pub fn restored(self) -> ViewMode {
        match self {
            ViewMode::Minimized {
                from_fullscreen: true,
            } => ViewMode::Fullscreen,
            ViewMode::Minimized {
                from_fullscreen: false,
            } => ViewMode::Windowed,
            other => other,
        }
    }

    /// Mode after the fullscreen button is pressed
    ///
    /// A minimized window flips the mode it will restore to.
    pub fn toggled_fullscreen(self) -> ViewMode {
        match self {
            ViewMode::Windowed => ViewMode::Fullscreen,
            ViewMode::Fullscreen => ViewMode::Windowed,
            ViewMode::Minimized { from_fullscreen } => ViewMode::Minimized {
                from_fullscreen: !from_fullscreen,
            },
        }
    }
}

/// One open project overlay
#[derive(Clone, Debug)]
pub struct WindowDescriptor {
    /// Unique identifier, never reused
    pub id: WindowId,
    /// Content shown in the window (owned by the site's static data)
    pub project: Rc<Project>,
    /// Card rectangle captured at open time; anchor for open/close animations
    pub source_rect: Rect,
    /// False once closing has started
    pub is_open: bool,
    pub mode: ViewMode,
    /// Windowed size
    pub size: Size,
    /// Windowed top-left corner
    pub position: Vec2,
    /// Stacking order
    pub z_index: u32,
}

impl WindowDescriptor {
    /// Geometry in windowed mode
    pub fn windowed_rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Open and not minimized
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.mode.is_minimized()
    }

    /// Open and minimized (occupies a tray slot)
    pub fn in_tray(&self) -> bool {
        self.is_open && self.mode.is_minimized()
    }
}

/// Partial descriptor update; `None` fields are left unchanged
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowUpdate {
    pub size: Option<Size>,
    pub position: Option<Vec2>,
    pub mode: Option<ViewMode>,
    pub source_rect: Option<Rect>,
}

impl WindowUpdate {
    /// Update only the position
    pub fn position(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// Update position and size together
    pub fn geometry(position: Vec2, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Default::default()
        }
    }

    /// Update only the view mode
    pub fn mode(mode: ViewMode) -> Self {
        Self {
            mode: Some(mode),
            ..Default::default()
        }
    }

    /// Shallow-merge into a descriptor
    pub fn apply_to(&self, window: &mut WindowDescriptor) {
        if let Some(size) = self.size {
            window.size = size;
        }
        if let Some(position) = self.position {
            window.position = position;
        }
        if let Some(mode) = self.mode {
            window.mode = mode;
        }
        if let Some(rect) = self.source_rect {
            window.source_rect = rect;
        }
    }
}
