//! Window registry module
//!
//! Window descriptors, the registry that owns them, resize handles and
//! random initial placement.

mod descriptor;
mod handle;
mod placement;
mod registry;

pub use descriptor::{ViewMode, WindowDescriptor, WindowUpdate};
pub use handle::ResizeHandle;
pub use placement::{initial_position, FixedRandom, OsRandom, RandomSource};
pub use registry::WindowRegistry;

pub use crate::types::WindowId;
