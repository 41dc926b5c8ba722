//! Shared data types
//!
//! Организация:
//! - world: SceneHandle, EntityId, HandleAllocator, CameraRig, AimRay
//! - targets: Crystal, Barrier, PowerUp, Obstacle (+ EntityKind)

pub mod targets;
pub mod world;

pub use targets::*;
pub use world::*;
