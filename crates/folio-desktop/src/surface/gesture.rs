//! Drag and resize gestures
//!
//! A gesture lives from pointer-down to pointer-up (or blur). It records
//! where it started, holds the document effects it needs, and turns pointer
//! positions into committed window geometry once the pointer has travelled
//! past the drag threshold.

use crate::lock::{DocumentEffect, InteractionLock, LockGuard};
use crate::math::{Size, Vec2};
use crate::window::ResizeHandle;

/// What the gesture does to the window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Header drag
    Move,
    /// Edge or corner drag
    Resize(ResizeHandle),
}

/// Constraints a gesture update is evaluated against
#[derive(Clone, Copy, Debug)]
pub struct GestureLimits {
    pub threshold: f32,
    pub viewport: Size,
    pub min_size: Size,
}

/// In-progress drag or resize
#[derive(Debug)]
pub struct Gesture {
    kind: GestureKind,
    start_pointer: Vec2,
    start_position: Vec2,
    start_size: Size,
    moved: bool,
    _selection: LockGuard,
    _capture: LockGuard,
}

impl Gesture {
    /// Start a gesture, suppressing text selection and capturing the pointer
    pub fn begin(
        kind: GestureKind,
        pointer: Vec2,
        position: Vec2,
        size: Size,
        lock: &InteractionLock,
    ) -> Self {
        Self {
            kind,
            start_pointer: pointer,
            start_position: position,
            start_size: size,
            moved: false,
            _selection: lock.acquire(DocumentEffect::SuppressSelection),
            _capture: lock.acquire(DocumentEffect::CapturePointer),
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Check if the pointer has crossed the threshold
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Geometry for the pointer at `pointer`, or `None` while still under
    /// the threshold
    ///
    /// `current_size` is the window's size right now; moves keep it and
    /// clamp against it.
    pub fn update(
        &mut self,
        pointer: Vec2,
        current_size: Size,
        limits: &GestureLimits,
    ) -> Option<(Vec2, Size)> {
        let delta = pointer - self.start_pointer;
        if !self.moved && delta.length() < limits.threshold {
            return None;
        }
        self.moved = true;

        Some(match self.kind {
            GestureKind::Move => {
                let position =
                    clamp_to_viewport(self.start_position + delta, current_size, limits.viewport);
                (position, current_size)
            }
            GestureKind::Resize(handle) => calculate_resize(
                handle,
                self.start_position,
                self.start_size,
                delta,
                limits.min_size,
            ),
        })
    }
}

/// Keep a window of `size` inside `[0, viewport - size]` on both axes
///
/// A window larger than the viewport on an axis is pinned to 0 there.
pub fn clamp_to_viewport(position: Vec2, size: Size, viewport: Size) -> Vec2 {
    let max_x = viewport.width - size.width;
    let max_y = viewport.height - size.height;
    Vec2::new(position.x.min(max_x).max(0.0), position.y.min(max_y).max(0.0))
}

/// New position and size after dragging `handle` by `delta`
///
/// Right and bottom handles only change the size. Left and top handles also
/// move the window so the opposite edge stays put, including when the size
/// hits the `min` floor.
pub fn calculate_resize(
    handle: ResizeHandle,
    start_pos: Vec2,
    start_size: Size,
    delta: Vec2,
    min: Size,
) -> (Vec2, Size) {
    let mut pos = start_pos;
    let mut size = start_size;

    if handle.right() {
        size.width = (start_size.width + delta.x).max(min.width);
    }
    if handle.left() {
        size.width = (start_size.width - delta.x).max(min.width);
        pos.x = start_pos.x + (start_size.width - size.width);
    }
    if handle.bottom() {
        size.height = (start_size.height + delta.y).max(min.height);
    }
    if handle.top() {
        size.height = (start_size.height - delta.y).max(min.height);
        pos.y = start_pos.y + (start_size.height - size.height);
    }

    (pos, size)
}
