//! Collision module — dispatch of host-reported overlaps
//!
//! ECS ответственность:
//! - CollisionDispatcher: канонизация пар, флаги broken/destroyed, cooldown
//! - Эффекты: score/ammo в GameState, Shatter/FX в SceneCommand, HUD сообщения
//!
//! Host ответственность:
//! - collision traversal, CollisionPair для каждого overlap в тике
//!
//! Dispatcher работает в `GallerySet::Resolve`, после host traversal.

use bevy::prelude::*;

pub mod dispatcher;
pub mod events;
pub mod systems;


pub use dispatcher::{CollisionContext, CollisionDispatcher, CollisionOutcome, Participant};
pub use events::CollisionPair;

use crate::config::GalleryConfig;
use crate::game::GallerySet;

/// Collision Plugin
pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        let scoring = app
            .world()
            .get_resource::<GalleryConfig>()
            .map(|config| config.scoring.clone())
            .unwrap_or_default();

        app.add_event::<CollisionPair>()
            .insert_resource(CollisionDispatcher::new(scoring));

        app.add_systems(
            FixedUpdate,
            systems::resolve_collisions.in_set(GallerySet::Resolve),
        );
    }
}
