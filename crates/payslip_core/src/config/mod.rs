//! Startup configuration: plant sources and backend location.
//!
//! Both are loaded once and treated as read-only values passed to callers;
//! nothing here is global mutable state.

pub mod backend;
pub mod plant_registry;
