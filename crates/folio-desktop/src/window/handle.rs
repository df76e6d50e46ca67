use serde::{Deserialize, Serialize};

/// One of the eight resize handles around a windowed surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    /// Every handle, edges first
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    /// Parse a handle name as used in markup (`"top-left"`) or its compass
    /// shorthand (`"nw"`)
    pub fn from_name(name: &str) -> Option<Self> {
        let handle = match name {
            "top" | "n" => ResizeHandle::Top,
            "bottom" | "s" => ResizeHandle::Bottom,
            "left" | "w" => ResizeHandle::Left,
            "right" | "e" => ResizeHandle::Right,
            "top-left" | "nw" => ResizeHandle::TopLeft,
            "top-right" | "ne" => ResizeHandle::TopRight,
            "bottom-left" | "sw" => ResizeHandle::BottomLeft,
            "bottom-right" | "se" => ResizeHandle::BottomRight,
            _ => return None,
        };
        Some(handle)
    }

    /// CSS cursor shown over the handle and during the resize
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::Top => "n-resize",
            ResizeHandle::Bottom => "s-resize",
            ResizeHandle::Left => "w-resize",
            ResizeHandle::Right => "e-resize",
            ResizeHandle::TopLeft => "nw-resize",
            ResizeHandle::TopRight => "ne-resize",
            ResizeHandle::BottomLeft => "sw-resize",
            ResizeHandle::BottomRight => "se-resize",
        }
    }

    /// Moves the top edge
    pub fn top(self) -> bool {
        matches!(
            self,
            ResizeHandle::Top | ResizeHandle::TopLeft | ResizeHandle::TopRight
        )
    }

    /// Moves the bottom edge
    pub fn bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::Bottom | ResizeHandle::BottomLeft | ResizeHandle::BottomRight
        )
    }

    /// Moves the left edge
    pub fn left(self) -> bool {
        matches!(
            self,
            ResizeHandle::Left | ResizeHandle::TopLeft | ResizeHandle::BottomLeft
        )
    }

    /// Moves the right edge
    pub fn right(self) -> bool {
        matches!(
            self,
            ResizeHandle::Right | ResizeHandle::TopRight | ResizeHandle::BottomRight
        )
    }
}
