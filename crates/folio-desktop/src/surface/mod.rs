//! Window surfaces
//!
//! A [`Surface`] is the per-window controller. It owns no geometry of its
//! own: size, position and view mode live in the [`WindowRegistry`], and the
//! surface only keeps what is transient (the current animation, the gesture
//! in progress, the scroll lock held while fullscreen).
//!
//! ```text
//! Opening ──▶ Steady ──▶ Closing ──▶ (removed by the engine)
//!               │ ▲
//!               ▼ │  minimize / restore / fullscreen (snap)
//! ```

mod frame;
mod gesture;
mod tray;

pub use frame::{SurfacePhase, WindowFrame};
pub use gesture::{calculate_resize, clamp_to_viewport, Gesture, GestureKind, GestureLimits};
pub use tray::{tray_tile, TrayStyle, TrayTile};

use crate::config::DesktopConfig;
use crate::lock::{DocumentEffect, InteractionLock, LockGuard};
use crate::math::{Rect, Size, Vec2};
use crate::transition::{Easing, GeometryAnimation, Keyframe};
use crate::window::{
    ResizeHandle, ViewMode, WindowDescriptor, WindowId, WindowRegistry, WindowUpdate,
};

/// Shared, read-only inputs every surface operation needs
#[derive(Clone, Copy, Debug)]
pub struct SurfaceEnv<'a> {
    pub config: &'a DesktopConfig,
    pub viewport: Size,
    pub lock: &'a InteractionLock,
}

/// Result of advancing a surface's animations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickState {
    /// Nothing is moving
    Idle,
    /// An animation is still running
    Animating,
    /// The close animation has finished; the window can be removed
    Finished,
}

#[derive(Debug)]
enum Phase {
    Opening(GeometryAnimation),
    Steady,
    Closing(GeometryAnimation),
}

/// Interaction state machine for one window
#[derive(Debug)]
pub struct Surface {
    id: WindowId,
    phase: Phase,
    snap: Option<GeometryAnimation>,
    gesture: Option<Gesture>,
    scroll_lock: Option<LockGuard>,
    content_loaded: bool,
}

/// Where a window rests in its current mode, ignoring animations
fn resting_keyframe(window: &WindowDescriptor, env: &SurfaceEnv<'_>) -> Keyframe {
    let radii = &env.config.radii;
    let mut key = match window.mode.restored() {
        ViewMode::Fullscreen => Keyframe::solid(Rect::from_size(env.viewport), radii.fullscreen),
        _ => Keyframe::solid(window.windowed_rect(), radii.windowed),
    };
    if window.mode.is_minimized() {
        key.opacity = 0.0;
    }
    key
}

impl Surface {
    /// Create the surface for a freshly registered window and start the
    /// opening animation from its source rectangle
    ///
    /// An axis whose stored position is exactly 0 is centered in the
    /// viewport, and the centered position is written back to the registry.
    pub fn open(
        registry: &mut WindowRegistry,
        id: WindowId,
        env: &SurfaceEnv<'_>,
        now: f64,
    ) -> Option<Surface> {
        let window = registry.get(id)?;
        if !window.mode.is_fullscreen() {
            let mut position = window.position;
            if position.x == 0.0 {
                position.x = ((env.viewport.width - window.size.width) / 2.0).max(0.0);
            }
            if position.y == 0.0 {
                position.y = ((env.viewport.height - window.size.height) / 2.0).max(0.0);
            }
            if position != window.position {
                registry.update(id, WindowUpdate::position(position));
            }
        }

        let window = registry.get(id)?;
        let from = Keyframe::solid(window.source_rect, env.config.radii.card);
        let to = resting_keyframe(window, env);
        let mut surface = Surface {
            id,
            phase: Phase::Opening(GeometryAnimation::new(
                from,
                to,
                now,
                env.config.open_duration_ms,
                Easing::Window,
            )),
            snap: None,
            gesture: None,
            scroll_lock: None,
            content_loaded: false,
        };
        surface.sync_scroll_lock(window, env);
        Some(surface)
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Lifecycle phase
    pub fn phase(&self) -> SurfacePhase {
        match self.phase {
            Phase::Opening(_) => SurfacePhase::Opening,
            Phase::Steady => SurfacePhase::Steady,
            Phase::Closing(_) => SurfacePhase::Closing,
        }
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, Phase::Closing(_))
    }

    /// Kind of the gesture in progress, if any
    pub fn gesture(&self) -> Option<GestureKind> {
        self.gesture.as_ref().map(Gesture::kind)
    }

    /// Check if the surface holds the background scroll lock
    pub fn holds_scroll_lock(&self) -> bool {
        self.scroll_lock.is_some()
    }

    /// Record that the embedded content finished loading
    pub fn mark_loaded(&mut self) {
        self.content_loaded = true;
    }

    /// Visual state at `now`
    pub fn keyframe(&self, window: &WindowDescriptor, env: &SurfaceEnv<'_>, now: f64) -> Keyframe {
        match &self.phase {
            Phase::Opening(anim) | Phase::Closing(anim) => anim.current(now),
            Phase::Steady => match (&self.gesture, &self.snap) {
                (None, Some(snap)) if !snap.is_complete(now) => snap.current(now),
                _ => resting_keyframe(window, env),
            },
        }
    }

    /// Gestures are refused while closing or outside windowed mode. A press
    /// during the opening animation settles it first.
    fn can_start_gesture(&mut self, window: &WindowDescriptor, button: i16) -> bool {
        if button != 0 || !window.is_open || window.mode != ViewMode::Windowed {
            return false;
        }
        match self.phase {
            Phase::Closing(_) => false,
            Phase::Opening(_) => {
                self.phase = Phase::Steady;
                true
            }
            Phase::Steady => true,
        }
    }

    /// Header press: start moving the window and raise it
    pub fn begin_move(
        &mut self,
        registry: &mut WindowRegistry,
        pointer: Vec2,
        button: i16,
        env: &SurfaceEnv<'_>,
    ) -> bool {
        let Some(window) = registry.get(self.id) else {
            return false;
        };
        if !self.can_start_gesture(window, button) {
            return false;
        }
        self.snap = None;
        self.gesture = Some(Gesture::begin(
            GestureKind::Move,
            pointer,
            window.position,
            window.size,
            env.lock,
        ));
        registry.bring_to_front(self.id);
        tracing::debug!(id = self.id, "drag started");
        true
    }

    /// Handle press: start resizing from `handle`
    pub fn begin_resize(
        &mut self,
        registry: &mut WindowRegistry,
        handle: ResizeHandle,
        pointer: Vec2,
        button: i16,
        env: &SurfaceEnv<'_>,
    ) -> bool {
        let Some(window) = registry.get(self.id) else {
            return false;
        };
        if !self.can_start_gesture(window, button) {
            return false;
        }
        self.snap = None;
        self.gesture = Some(Gesture::begin(
            GestureKind::Resize(handle),
            pointer,
            window.position,
            window.size,
            env.lock,
        ));
        tracing::debug!(id = self.id, ?handle, "resize started");
        true
    }

    /// Feed a pointer position to the gesture in progress
    ///
    /// Returns true when new geometry was committed to the registry.
    pub fn pointer_move(
        &mut self,
        registry: &mut WindowRegistry,
        pointer: Vec2,
        env: &SurfaceEnv<'_>,
    ) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        let Some(window) = registry.get(self.id) else {
            return false;
        };
        let limits = GestureLimits {
            threshold: env.config.drag_threshold,
            viewport: env.viewport,
            min_size: env.config.min_window_size,
        };
        match gesture.update(pointer, window.size, &limits) {
            Some((position, size)) => {
                registry.update(self.id, WindowUpdate::geometry(position, size))
            }
            None => false,
        }
    }

    /// Finish the gesture in progress, releasing its document effects
    pub fn end_gesture(&mut self) -> bool {
        match self.gesture.take() {
            Some(gesture) => {
                tracing::debug!(
                    id = self.id,
                    kind = ?gesture.kind(),
                    moved = gesture.has_moved(),
                    "gesture ended"
                );
                true
            }
            None => false,
        }
    }

    /// Switch view mode with a short snap from the current geometry
    fn change_mode(
        &mut self,
        registry: &mut WindowRegistry,
        mode: ViewMode,
        env: &SurfaceEnv<'_>,
        now: f64,
    ) -> bool {
        if self.is_closing() {
            return false;
        }
        let Some(window) = registry.get(self.id) else {
            return false;
        };
        if !window.is_open || window.mode == mode {
            return false;
        }

        let from = self.keyframe(window, env, now);
        self.gesture = None;
        self.phase = Phase::Steady;
        registry.update(self.id, WindowUpdate::mode(mode));

        let Some(window) = registry.get(self.id) else {
            return false;
        };
        self.snap = Some(GeometryAnimation::new(
            from,
            resting_keyframe(window, env),
            now,
            env.config.snap_duration_ms,
            Easing::EaseOut,
        ));
        self.sync_scroll_lock(window, env);
        tracing::debug!(id = self.id, ?mode, "view mode changed");
        true
    }

    /// Collapse into the tray
    pub fn minimize(
        &mut self,
        registry: &mut WindowRegistry,
        env: &SurfaceEnv<'_>,
        now: f64,
    ) -> bool {
        let Some(mode) = registry.get(self.id).map(|w| w.mode.minimized()) else {
            return false;
        };
        self.change_mode(registry, mode, env, now)
    }

    /// Come back from the tray to the mode the window was minimized from
    pub fn restore(
        &mut self,
        registry: &mut WindowRegistry,
        env: &SurfaceEnv<'_>,
        now: f64,
    ) -> bool {
        let Some(mode) = registry.get(self.id).map(|w| w.mode.restored()) else {
            return false;
        };
        self.change_mode(registry, mode, env, now)
    }

    /// Toggle between windowed and fullscreen
    pub fn toggle_fullscreen(
        &mut self,
        registry: &mut WindowRegistry,
        env: &SurfaceEnv<'_>,
        now: f64,
    ) -> bool {
        let Some(mode) = registry.get(self.id).map(|w| w.mode.toggled_fullscreen()) else {
            return false;
        };
        self.change_mode(registry, mode, env, now)
    }

    /// Start the close animation back to the cached source rectangle
    ///
    /// The source rectangle is not re-measured; if the card moved since the
    /// window opened, the window collapses onto its old location.
    pub fn close(&mut self, registry: &mut WindowRegistry, env: &SurfaceEnv<'_>, now: f64) -> bool {
        if self.is_closing() {
            return false;
        }
        let Some(window) = registry.get(self.id) else {
            return false;
        };

        let from = self.keyframe(window, env, now);
        let to = Keyframe {
            rect: window.source_rect,
            opacity: 0.0,
            scale: env.config.close_scale,
            corner_radius: env.config.radii.card,
        };
        registry.close(self.id);

        self.gesture = None;
        self.snap = None;
        self.scroll_lock = None;
        self.phase = Phase::Closing(GeometryAnimation::new(
            from,
            to,
            now,
            env.config.close_duration_ms,
            Easing::Window,
        ));
        true
    }

    /// Catch up with a descriptor edited outside the surface
    ///
    /// A mode change ends the gesture in progress and drops any snap, so the
    /// window renders at rest in its new mode.
    pub fn sync_with(
        &mut self,
        previous_mode: ViewMode,
        window: &WindowDescriptor,
        env: &SurfaceEnv<'_>,
    ) {
        if window.mode != previous_mode {
            self.end_gesture();
            self.snap = None;
        }
        self.sync_scroll_lock(window, env);
    }

    /// Hold the scroll lock exactly while open, fullscreen and not closing
    pub fn sync_scroll_lock(&mut self, window: &WindowDescriptor, env: &SurfaceEnv<'_>) {
        let wanted = window.is_open && window.mode.is_fullscreen() && !self.is_closing();
        match (wanted, self.scroll_lock.is_some()) {
            (true, false) => self.scroll_lock = Some(env.lock.acquire(DocumentEffect::LockScroll)),
            (false, true) => self.scroll_lock = None,
            _ => {}
        }
    }

    /// Advance animations to `now`
    pub fn tick(&mut self, now: f64) -> TickState {
        match &self.phase {
            Phase::Closing(anim) => {
                return if anim.is_complete(now) {
                    TickState::Finished
                } else {
                    TickState::Animating
                };
            }
            Phase::Opening(anim) => {
                if anim.is_complete(now) {
                    self.phase = Phase::Steady;
                } else {
                    return TickState::Animating;
                }
            }
            Phase::Steady => {}
        }

        match &self.snap {
            Some(snap) if snap.is_complete(now) => {
                self.snap = None;
                TickState::Idle
            }
            Some(_) => TickState::Animating,
            None => TickState::Idle,
        }
    }

    /// Build the render model for this surface
    pub fn frame(
        &self,
        window: &WindowDescriptor,
        minimized_rank: Option<usize>,
        env: &SurfaceEnv<'_>,
        now: f64,
    ) -> WindowFrame {
        let key = self.keyframe(window, env, now);
        let resizing = match self.gesture() {
            Some(GestureKind::Resize(handle)) => Some(handle),
            _ => None,
        };
        let tray = match (window.in_tray(), minimized_rank) {
            (true, Some(rank)) => Some(tray_tile(
                &env.config.tray,
                env.viewport,
                rank,
                window.z_index,
            )),
            _ => None,
        };

        WindowFrame {
            id: self.id,
            title: window.project.title.clone(),
            content_url: if window.is_open {
                window.project.url.clone()
            } else {
                "about:blank".to_string()
            },
            image_src: window.project.image_src.clone(),
            phase: self.phase(),
            mode: window.mode,
            rect: key.rect,
            opacity: key.opacity,
            scale: key.scale,
            corner_radius: key.corner_radius,
            z_index: window.z_index,
            interactive: window.is_visible(),
            content_interactive: resizing.is_none(),
            resizable: !window.mode.is_fullscreen(),
            dragging: self.gesture() == Some(GestureKind::Move),
            overlay_cursor: resizing.map(ResizeHandle::cursor),
            loading: !self.content_loaded,
            tray,
        }
    }
}
