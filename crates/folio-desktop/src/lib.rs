//! Floating project windows for the Folio portfolio site
//!
//! This crate is the browser-independent core of the project viewer:
//! clicking a project card opens the deployed project in a floating window
//! that grows out of the card, can be dragged, resized, minimized to a tray,
//! toggled fullscreen, and closes back into the card.
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`)
//! - [`window`]: Window descriptors, the registry, resize handles, placement
//! - [`surface`]: Per-window state machine, gestures, tray layout, frames
//! - [`transition`]: Keyframe animations and easing curves
//! - [`lock`]: Reference-counted page effects (selection, scroll, capture)
//! - [`content`]: Project records from the portfolio JSON
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use folio_desktop::{
//!     Desktop, DesktopConfig, FixedRandom, NullHost, OpenOutcome, Project, Rect, Size,
//! };
//!
//! let mut desktop = Desktop::new(DesktopConfig::default(), NullHost)
//!     .with_random_source(FixedRandom(0.0));
//! desktop.set_viewport(Size::new(1920.0, 1080.0));
//!
//! let project = Rc::new(Project {
//!     id: "atlas".to_string(),
//!     title: "Atlas".to_string(),
//!     url: "https://atlas.example.com".to_string(),
//!     image_src: String::new(),
//!     description: String::new(),
//! });
//! let card = Rect::new(40.0, 500.0, 600.0, 400.0);
//!
//! let OpenOutcome::Window(id) = desktop.open_project(project, Some(card), 0.0) else {
//!     panic!("wide viewports open windows");
//! };
//! desktop.tick(800.0);
//! assert_eq!(desktop.frames(800.0)[0].id, id);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: No browser types; the page is reached through [`DocumentHost`]
//! 2. **Injected Time**: Every animated operation takes `now` in milliseconds
//! 3. **Scoped Effects**: Page-wide changes are guards released on drop

pub mod content;
pub mod lock;
pub mod math;
pub mod surface;
pub mod transition;
pub mod window;

mod config;
mod engine;
mod error;
mod types;

pub use config::{CornerRadii, DesktopConfig};
pub use content::{Portfolio, Project};
pub use engine::{Desktop, InputResult, OpenOutcome};
pub use error::{FolioError, FolioResult};
pub use lock::{DocumentEffect, DocumentHost, InteractionLock, LockGuard, NullHost};
pub use math::{Rect, Size, Vec2};
pub use surface::{SurfacePhase, TrayStyle, TrayTile, WindowFrame};
pub use transition::{Easing, CLOSE_DURATION_MS, OPEN_DURATION_MS, SNAP_DURATION_MS};
pub use window::{
    FixedRandom, OsRandom, RandomSource, ResizeHandle, ViewMode, WindowDescriptor, WindowId,
    WindowRegistry, WindowUpdate,
};
