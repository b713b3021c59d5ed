//! Core engine types shared by the Glow Letters crates.
//!
//! This crate provides the foundational pieces the gameplay layer drives:
//! - Transform and mesh-range components
//! - A named-object scene on top of `hecs`
//! - Frame time measurement

pub mod components;
pub mod scene;
pub mod time;
pub mod transform;

pub use components::*;
pub use scene::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{UVec2, Vec2, Vec3};
pub use hecs::Entity;
