//! Window registry: the authoritative list of open project windows
//!
//! Descriptors are kept in opening order. The registry allocates ids and
//! z-indices; every other component reads and writes window state through it.
//! Operations on unknown ids do nothing, so stale callbacks from a window
//! that has already been removed are harmless.

use std::rc::Rc;

use crate::config::DesktopConfig;
use crate::content::Project;
use crate::math::{Rect, Size};

use super::placement::{initial_position, RandomSource};
use super::{WindowDescriptor, WindowId, WindowUpdate};

/// Ordered collection of window descriptors
#[derive(Clone, Debug)]
pub struct WindowRegistry {
    windows: Vec<WindowDescriptor>,
    next_id: WindowId,
    z_base: u32,
    default_size: Size,
    placement_bias: f32,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new(&DesktopConfig::default())
    }
}

impl WindowRegistry {
    /// Create an empty registry using the config's window defaults
    pub fn new(config: &DesktopConfig) -> Self {
        Self {
            windows: Vec::new(),
            next_id: 1,
            z_base: config.z_index_base,
            default_size: config.default_window_size,
            placement_bias: config.placement_bias,
        }
    }

    /// Register a new window for `project`, anchored at `source_rect`
    pub fn open(
        &mut self,
        project: Rc<Project>,
        source_rect: Rect,
        viewport: Size,
        rng: &mut dyn RandomSource,
    ) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;

        let size = self.default_size;
        let position = initial_position(viewport, size, self.placement_bias, rng);
        let z_index = self.next_z_index();

        tracing::debug!(
            id,
            project = %project.id,
            x = position.x,
            y = position.y,
            z_index,
            "window opened"
        );

        self.windows.push(WindowDescriptor {
            id,
            project,
            source_rect,
            is_open: true,
            mode: Default::default(),
            size,
            position,
            z_index,
        });

        id
    }

    /// Z-index for a new window: `base + count`, bumped above the current
    /// maximum so new windows open in front and indices stay unique
    fn next_z_index(&self) -> u32 {
        let by_count = self.z_base + self.windows.len() as u32;
        match self.max_z_index() {
            Some(max) => by_count.max(max + 1),
            None => by_count,
        }
    }

    fn max_z_index(&self) -> Option<u32> {
        self.windows.iter().map(|w| w.z_index).max()
    }

    /// Mark a window as closing; it stays registered until [`remove`](Self::remove)
    pub fn close(&mut self, id: WindowId) -> bool {
        match self.get_mut(id) {
            Some(window) if window.is_open => {
                window.is_open = false;
                tracing::debug!(id, "window closing");
                true
            }
            Some(_) => false,
            None => {
                tracing::debug!(id, "close ignored: unknown window");
                false
            }
        }
    }

    /// Drop a descriptor from the registry
    pub fn remove(&mut self, id: WindowId) -> Option<WindowDescriptor> {
        let index = self.windows.iter().position(|w| w.id == id)?;
        tracing::debug!(id, "window removed");
        Some(self.windows.remove(index))
    }

    /// Shallow-merge `update` into the window; no-op for unknown ids
    pub fn update(&mut self, id: WindowId, update: WindowUpdate) -> bool {
        match self.get_mut(id) {
            Some(window) => {
                update.apply_to(window);
                true
            }
            None => false,
        }
    }

    /// Raise a window above every other registered window
    pub fn bring_to_front(&mut self, id: WindowId) -> Option<u32> {
        let top = self.max_z_index().unwrap_or(self.z_base).max(self.z_base) + 1;
        let window = self.get_mut(id)?;
        window.z_index = top;
        Some(top)
    }

    /// Rank of `id` among open, minimized windows in registry order
    pub fn minimized_index_of(&self, id: WindowId) -> Option<usize> {
        self.windows
            .iter()
            .filter(|w| w.in_tray())
            .position(|w| w.id == id)
    }

    /// Get a window by id
    pub fn get(&self, id: WindowId) -> Option<&WindowDescriptor> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowDescriptor> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    /// Windows in registry (opening) order
    pub fn iter(&self) -> impl Iterator<Item = &WindowDescriptor> {
        self.windows.iter()
    }

    /// The window with the highest z-index
    pub fn front(&self) -> Option<&WindowDescriptor> {
        self.windows.iter().max_by_key(|w| w.z_index)
    }

    /// Number of registered windows, closing ones included
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Check if no windows are registered
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
