//! Headless scene host — stand-in for the render engine
//!
//! Делает то же, что делал бы engine host, без рендера:
//! - зеркалит SceneCommand в `HeadlessScene` (visible/collidable per handle)
//! - sphere-overlap traversal → CollisionPair (GallerySet::Traverse)
//! - опционально autopilot: стреляет в ближайшую цель впереди
//!
//! Используется бинарником и integration тестами.

use bevy::prelude::*;

pub mod autopilot;
pub mod host;

pub use autopilot::Autopilot;
pub use host::{ColliderRadii, HeadlessScene, HeadlessVisual};

use crate::config::GalleryConfig;
use crate::game::{gameplay_active, GallerySet};

/// Headless host: scene mirror + overlap traversal
pub struct HeadlessHostPlugin;

impl Plugin for HeadlessHostPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GalleryConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(ColliderRadii::from_config(&config))
            .init_resource::<HeadlessScene>();

        app.add_systems(
            FixedUpdate,
            (
                host::detect_overlaps.in_set(GallerySet::Traverse),
                host::apply_scene_commands.in_set(GallerySet::Report),
            ),
        );
    }
}

/// Autopilot: FireIntent at the nearest target ahead
pub struct AutopilotPlugin;

impl Plugin for AutopilotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Autopilot>();
        app.add_systems(
            FixedUpdate,
            autopilot::autopilot_fire
                .run_if(gameplay_active)
                .in_set(GallerySet::Input),
        );
    }
}
