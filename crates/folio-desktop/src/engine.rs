//! Desktop engine
//!
//! [`Desktop`] ties the registry, the per-window surfaces and the interaction
//! lock together and is the only type a host talks to. Every entry point
//! takes the current time so animations stay deterministic under test.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::config::DesktopConfig;
use crate::content::Project;
use crate::lock::{DocumentHost, InteractionLock, NullHost};
use crate::math::{Rect, Size, Vec2};
use crate::surface::{Surface, SurfaceEnv, SurfacePhase, TickState, WindowFrame};
use crate::window::{OsRandom, RandomSource, ResizeHandle, WindowId, WindowRegistry, WindowUpdate};

/// What opening a project resulted in
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A floating window was created
    Window(WindowId),
    /// The viewport is too narrow; the host should open the URL in a new tab
    External(String),
    /// Nothing to anchor the window to; nothing was created
    Ignored,
}

/// Whether an input event was consumed by the window manager
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Handled,
    Unhandled,
}

impl InputResult {
    fn from_bool(handled: bool) -> Self {
        if handled {
            InputResult::Handled
        } else {
            InputResult::Unhandled
        }
    }

    pub fn is_handled(self) -> bool {
        self == InputResult::Handled
    }
}

/// The floating project window manager
pub struct Desktop {
    config: DesktopConfig,
    viewport: Size,
    registry: WindowRegistry,
    surfaces: BTreeMap<WindowId, Surface>,
    lock: InteractionLock,
    rng: Box<dyn RandomSource>,
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new(DesktopConfig::default(), NullHost)
    }
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("viewport", &self.viewport)
            .field("windows", &self.registry.len())
            .field("lock", &self.lock)
            .finish()
    }
}

impl Desktop {
    /// Create an engine that applies document effects through `host`
    pub fn new(config: DesktopConfig, host: impl DocumentHost + 'static) -> Self {
        Self {
            registry: WindowRegistry::new(&config),
            config,
            viewport: Size::new(0.0, 0.0),
            surfaces: BTreeMap::new(),
            lock: InteractionLock::new(host),
            rng: Box::new(OsRandom),
        }
    }

    /// Replace the placement randomness
    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport size; fullscreen windows follow it on the next frame
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn lock(&self) -> &InteractionLock {
        &self.lock
    }

    /// Lifecycle phase of a window's surface
    pub fn phase(&self, id: WindowId) -> Option<SurfacePhase> {
        self.surfaces.get(&id).map(Surface::phase)
    }

    fn parts(&mut self) -> (SurfaceEnv<'_>, &mut WindowRegistry, &mut BTreeMap<WindowId, Surface>) {
        (
            SurfaceEnv {
                config: &self.config,
                viewport: self.viewport,
                lock: &self.lock,
            },
            &mut self.registry,
            &mut self.surfaces,
        )
    }

    // =========================================================================
    // Window lifecycle
    // =========================================================================

    /// Open `project` from the card at `source_rect`
    ///
    /// Narrow viewports get the project's URL back for a new tab. A missing
    /// or degenerate source rectangle creates nothing.
    pub fn open_project(
        &mut self,
        project: Rc<Project>,
        source_rect: Option<Rect>,
        now: f64,
    ) -> OpenOutcome {
        if self.viewport.width < self.config.external_breakpoint && project.has_url() {
            tracing::debug!(project = %project.id, "narrow viewport, opening externally");
            return OpenOutcome::External(project.url.clone());
        }

        let Some(source_rect) = source_rect.filter(|r| !r.is_degenerate()) else {
            tracing::debug!(project = %project.id, "open ignored: no source rectangle");
            return OpenOutcome::Ignored;
        };

        let id = self
            .registry
            .open(project, source_rect, self.viewport, self.rng.as_mut());
        let (env, registry, surfaces) = self.parts();
        match Surface::open(registry, id, &env, now) {
            Some(surface) => {
                surfaces.insert(id, surface);
                OpenOutcome::Window(id)
            }
            None => OpenOutcome::Ignored,
        }
    }

    /// Start closing a window; it is removed by [`tick`](Self::tick) once
    /// the close animation has finished
    pub fn close(&mut self, id: WindowId, now: f64) -> bool {
        let (env, registry, surfaces) = self.parts();
        match surfaces.get_mut(&id) {
            Some(surface) => surface.close(registry, &env, now),
            None => false,
        }
    }

    /// Merge `update` into a window's descriptor
    pub fn update(&mut self, id: WindowId, update: WindowUpdate) -> bool {
        let (env, registry, surfaces) = self.parts();
        let Some(previous_mode) = registry.get(id).map(|w| w.mode) else {
            return false;
        };
        registry.update(id, update);
        if let (Some(surface), Some(window)) = (surfaces.get_mut(&id), registry.get(id)) {
            surface.sync_with(previous_mode, window, &env);
        }
        true
    }

    pub fn bring_to_front(&mut self, id: WindowId) -> Option<u32> {
        self.registry.bring_to_front(id)
    }

    pub fn minimized_index_of(&self, id: WindowId) -> Option<usize> {
        self.registry.minimized_index_of(id)
    }

    pub fn minimize(&mut self, id: WindowId, now: f64) -> bool {
        let (env, registry, surfaces) = self.parts();
        match surfaces.get_mut(&id) {
            Some(surface) => surface.minimize(registry, &env, now),
            None => false,
        }
    }

    /// Restore a minimized window and raise it
    pub fn restore(&mut self, id: WindowId, now: f64) -> bool {
        let (env, registry, surfaces) = self.parts();
        let Some(surface) = surfaces.get_mut(&id) else {
            return false;
        };
        if !surface.restore(registry, &env, now) {
            return false;
        }
        registry.bring_to_front(id);
        true
    }

    pub fn toggle_fullscreen(&mut self, id: WindowId, now: f64) -> bool {
        let (env, registry, surfaces) = self.parts();
        match surfaces.get_mut(&id) {
            Some(surface) => surface.toggle_fullscreen(registry, &env, now),
            None => false,
        }
    }

    /// The embedded content of a window finished loading
    pub fn content_loaded(&mut self, id: WindowId) -> bool {
        match self.surfaces.get_mut(&id) {
            Some(surface) => {
                surface.mark_loaded();
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Input handling
    // =========================================================================

    /// Header press on a window
    pub fn begin_move(&mut self, id: WindowId, pointer: Vec2, button: i16, now: f64) -> bool {
        let (env, registry, surfaces) = self.parts();
        let Some(surface) = surfaces.get_mut(&id) else {
            return false;
        };
        surface.tick(now);
        surface.begin_move(registry, pointer, button, &env)
    }

    /// Resize handle press on a window
    pub fn begin_resize(
        &mut self,
        id: WindowId,
        handle: ResizeHandle,
        pointer: Vec2,
        button: i16,
        now: f64,
    ) -> bool {
        let (env, registry, surfaces) = self.parts();
        let Some(surface) = surfaces.get_mut(&id) else {
            return false;
        };
        surface.tick(now);
        surface.begin_resize(registry, handle, pointer, button, &env)
    }

    /// Check if any window has a gesture in progress
    pub fn is_gesturing(&self) -> bool {
        self.surfaces.values().any(|s| s.gesture().is_some())
    }

    /// Global pointer move
    pub fn pointer_move(&mut self, pointer: Vec2) -> InputResult {
        let (env, registry, surfaces) = self.parts();
        let mut handled = false;
        for surface in surfaces.values_mut().filter(|s| s.gesture().is_some()) {
            surface.pointer_move(registry, pointer, &env);
            handled = true;
        }
        InputResult::from_bool(handled)
    }

    /// Global pointer release; ends every gesture
    pub fn pointer_up(&mut self) -> InputResult {
        InputResult::from_bool(self.end_gestures())
    }

    /// The page lost focus; ends every gesture
    pub fn blur(&mut self) -> InputResult {
        InputResult::from_bool(self.end_gestures())
    }

    fn end_gestures(&mut self) -> bool {
        let mut ended = false;
        for surface in self.surfaces.values_mut() {
            ended |= surface.end_gesture();
        }
        ended
    }

    /// Global key press; Escape closes every visible window
    pub fn key_down(&mut self, key: &str, now: f64) -> InputResult {
        if key != "Escape" {
            return InputResult::Unhandled;
        }
        let targets: Vec<WindowId> = self
            .registry
            .iter()
            .filter(|w| w.is_visible())
            .map(|w| w.id)
            .collect();
        let mut closed = false;
        for id in targets {
            closed |= self.close(id, now);
        }
        InputResult::from_bool(closed)
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advance animations and drop windows whose close animation finished
    ///
    /// Returns true while anything is still animating.
    pub fn tick(&mut self, now: f64) -> bool {
        let mut animating = false;
        let mut finished = Vec::new();
        for (&id, surface) in self.surfaces.iter_mut() {
            match surface.tick(now) {
                TickState::Idle => {}
                TickState::Animating => animating = true,
                TickState::Finished => finished.push(id),
            }
        }
        for id in finished {
            self.surfaces.remove(&id);
            self.registry.remove(id);
        }
        animating
    }

    /// Render model for every registered window, in registry order
    pub fn frames(&self, now: f64) -> Vec<WindowFrame> {
        let env = SurfaceEnv {
            config: &self.config,
            viewport: self.viewport,
            lock: &self.lock,
        };
        self.registry
            .iter()
            .filter_map(|window| {
                let surface = self.surfaces.get(&window.id)?;
                let rank = self.registry.minimized_index_of(window.id);
                Some(surface.frame(window, rank, &env, now))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::DocumentEffect;
    use crate::window::{FixedRandom, ViewMode};

    fn project(id: &str, url: &str) -> Rc<Project> {
        Rc::new(Project {
            id: id.to_string(),
            title: id.to_string(),
            url: url.to_string(),
            image_src: String::new(),
            description: String::new(),
        })
    }

    fn desktop() -> Desktop {
        let mut desktop = Desktop::default().with_random_source(FixedRandom(0.5));
        desktop.set_viewport(Size::new(1920.0, 1080.0));
        desktop
    }

    fn card() -> Option<Rect> {
        Some(Rect::new(50.0, 400.0, 500.0, 400.0))
    }

    fn open(desktop: &mut Desktop) -> WindowId {
        match desktop.open_project(project("p", "https://p.example.com"), card(), 0.0) {
            OpenOutcome::Window(id) => id,
            other => panic!("expected a window, got {:?}", other),
        }
    }

    #[test]
    fn test_open_outcomes() {
        let mut desktop = desktop();
        assert_eq!(
            desktop.open_project(project("p", "https://p.example.com"), None, 0.0),
            OpenOutcome::Ignored
        );
        assert_eq!(
            desktop.open_project(
                project("p", "https://p.example.com"),
                Some(Rect::new(0.0, 0.0, 0.0, 0.0)),
                0.0
            ),
            OpenOutcome::Ignored
        );
        assert!(desktop.registry().is_empty());

        desktop.set_viewport(Size::new(390.0, 844.0));
        assert_eq!(
            desktop.open_project(project("p", "https://p.example.com"), card(), 0.0),
            OpenOutcome::External("https://p.example.com".to_string())
        );
        assert!(desktop.registry().is_empty());
    }

    #[test]
    fn test_placement_uses_random_source() {
        let mut desktop = desktop();
        let id = open(&mut desktop);
        let window = desktop.registry().get(id).unwrap();
        // 0.5 * 0.3 * (1920 - 1200), 0.5 * 0.3 * (1080 - 800)
        assert!((window.position.x - 108.0).abs() < 0.01);
        assert!((window.position.y - 42.0).abs() < 0.01);
    }

    #[test]
    fn test_escape_closes_visible_windows_only() {
        let mut desktop = desktop();
        let a = open(&mut desktop);
        let b = open(&mut desktop);
        desktop.minimize(b, 0.0);

        assert_eq!(desktop.key_down("Enter", 0.0), InputResult::Unhandled);
        assert!(desktop.key_down("Escape", 0.0).is_handled());
        assert_eq!(desktop.phase(a), Some(SurfacePhase::Closing));
        assert_eq!(desktop.phase(b), Some(SurfacePhase::Steady));
        assert_eq!(desktop.key_down("Escape", 10.0), InputResult::Unhandled);
    }

    #[test]
    fn test_tick_removes_after_close_duration() {
        let mut desktop = desktop();
        let id = open(&mut desktop);
        desktop.tick(1000.0);

        desktop.close(id, 1000.0);
        assert!(desktop.tick(1599.0));
        assert!(desktop.registry().get(id).is_some());
        assert!(!desktop.tick(1600.0));
        assert!(desktop.registry().get(id).is_none());
        assert!(desktop.frames(1600.0).is_empty());
    }

    #[test]
    fn test_restore_raises_window() {
        let mut desktop = desktop();
        let a = open(&mut desktop);
        let b = open(&mut desktop);
        desktop.minimize(a, 0.0);

        assert!(desktop.restore(a, 10.0));
        assert_eq!(desktop.registry().front().unwrap().id, a);
        assert!(desktop.registry().get(b).is_some());
        assert!(!desktop.restore(a, 20.0));
    }

    #[test]
    fn test_update_through_engine_syncs_scroll_lock() {
        let mut desktop = desktop();
        let id = open(&mut desktop);

        assert!(desktop.update(id, WindowUpdate::mode(ViewMode::Fullscreen)));
        assert!(desktop.lock().is_active(DocumentEffect::LockScroll));
        assert!(desktop.update(id, WindowUpdate::mode(ViewMode::Windowed)));
        assert!(!desktop.lock().is_active(DocumentEffect::LockScroll));
        assert!(!desktop.update(999, WindowUpdate::mode(ViewMode::Windowed)));
    }

    #[test]
    fn test_frames_in_registry_order() {
        let mut desktop = desktop();
        let a = open(&mut desktop);
        let b = open(&mut desktop);
        desktop.bring_to_front(a);

        let ids: Vec<_> = desktop.frames(0.0).iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![a, b]);
    }
}
