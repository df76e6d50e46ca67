//! Core type definitions shared across modules

/// Unique window identifier
///
/// Windows are identified by a monotonically increasing 64-bit integer
/// starting at 1. Ids are never reused within a `Desktop` instance.
pub type WindowId = u64;
