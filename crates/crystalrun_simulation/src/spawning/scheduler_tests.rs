//! Tests for the spawn scheduler (gates, cleanup, patterns).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::components::{Barrier, Crystal, HandleAllocator};
    use crate::config::SpawnConfig;
    use crate::scene::SceneCommand;
    use crate::spawning::{SpawnContext, SpawnScheduler};

    struct Harness {
        scheduler: SpawnScheduler,
        rng: ChaCha8Rng,
        handles: HandleAllocator,
        scene: Vec<SceneCommand>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_config(SpawnConfig::default())
        }

        fn with_config(config: SpawnConfig) -> Self {
            Self {
                scheduler: SpawnScheduler::new(config, -5.0),
                rng: ChaCha8Rng::seed_from_u64(42),
                handles: HandleAllocator::default(),
                scene: Vec::new(),
            }
        }

        fn tick(&mut self, now: f32, camera_y: f32) -> crate::spawning::SpawnReport {
            let mut ctx = SpawnContext {
                now,
                camera_y,
                rng: &mut self.rng,
                handles: &mut self.handles,
                scene: &mut self.scene,
            };
            self.scheduler.tick_spawns(&mut ctx)
        }
    }

    #[test]
    fn test_first_tick_spawns_time_gated_categories() {
        let mut h = Harness::new();
        let report = h.tick(0.0, -5.0);

        assert_eq!(report.crystals, 2);
        assert_eq!(report.barriers, 1);
        // Distance gates ждут, пока камера пройдёт spacing
        assert_eq!(report.obstacles, 0);
        assert_eq!(report.power_ups, 0);
    }

    #[test]
    fn test_crystal_placement_ranges() {
        let mut h = Harness::new();
        for step in 0..20 {
            let now = step as f32 * 3.0;
            h.tick(now, now * 10.0);
        }

        for (index, entry) in h.scheduler.registries.crystals.iter().enumerate() {
            let p = entry.data.position;
            let camera_y = (index / 2) as f32 * 30.0;
            assert!((-4.0..=4.0).contains(&p.x), "x out of range: {p:?}");
            assert!((1.5..=3.5).contains(&p.z), "z out of range: {p:?}");
            assert!(p.y >= camera_y + 20.0 && p.y <= camera_y + 25.0, "y out of range: {p:?}");
        }
    }

    #[test]
    fn test_barrier_lane_and_distance() {
        let mut h = Harness::new();
        h.tick(0.0, 12.0);

        let barrier = &h.scheduler.registries.barriers.iter().next().unwrap().data;
        assert!([-2.0, 0.0, 2.0].contains(&barrier.position.x));
        assert!((2.0..=3.5).contains(&barrier.position.z));
        assert_eq!(barrier.position.y, 42.0);
    }

    #[test]
    fn test_time_gates_independent_of_frame_count() {
        let mut h = Harness::new();
        let mut crystal_batches = 0;
        let mut barriers = 0;

        // 8 секунд при 60 Hz
        for frame in 0..480 {
            let now = frame as f32 / 60.0;
            let report = h.tick(now, -5.0);
            crystal_batches += report.crystals / 2;
            barriers += report.barriers;
        }

        // t = 0, 3, 6 → 3 batch'а; barrier только на t = 0
        assert_eq!(crystal_batches, 3);
        assert_eq!(barriers, 1);
    }

    #[test]
    fn test_long_hitch_spawns_single_batch() {
        let mut h = Harness::new();
        h.tick(0.0, -5.0);
        let before = h.scheduler.registries.crystals.len();

        let report = h.tick(30.0, 295.0);
        assert_eq!(report.crystals, 2);
        assert_eq!(report.barriers, 1);
        assert!(report.obstacles > 0);
        assert_eq!(h.scheduler.registries.crystals.len(), before + 2);
    }

    #[test]
    fn test_obstacles_follow_camera_distance() {
        let mut h = Harness::new();
        let mut triggers = 0;

        // Камера от -5 до 95, шаг 0.5
        for step in 0..=200 {
            let camera_y = -5.0 + step as f32 * 0.5;
            if h.tick(0.0, camera_y).obstacles > 0 {
                triggers += 1;
            }
        }

        // mark: -5 → 5.5 → 16 → ... → строго больше spacing каждый раз
        assert_eq!(triggers, 9);
        for entry in h.scheduler.registries.obstacles.iter() {
            assert!(entry.data.position.y >= 35.5);
        }
    }

    #[test]
    fn test_unvalidated_negative_jitter_does_not_panic() {
        let mut config = SpawnConfig::default();
        config.crystals.ahead_jitter = -1.0;
        let mut h = Harness::with_config(config);

        assert_eq!(h.tick(0.0, -5.0).crystals, 2);
        for entry in h.scheduler.registries.crystals.iter() {
            assert_eq!(entry.data.position.y, 15.0);
        }
    }

    #[test]
    fn test_first_obstacle_after_spacing_from_camera_start() {
        let mut h = Harness::new();

        // Старт камеры -5: ровно 10 units пути ещё не хватает
        assert_eq!(h.tick(0.0, -5.0).obstacles, 0);
        assert_eq!(h.tick(0.0, 5.0).obstacles, 0);
        assert!(h.tick(0.0, 5.5).obstacles > 0);
    }

    #[test]
    fn test_power_up_carries_configured_bonus() {
        let mut h = Harness::new();
        h.tick(0.0, -5.0);
        let report = h.tick(0.0, 56.0);
        assert_eq!(report.power_ups, 1);

        let power_up = &h.scheduler.registries.power_ups.iter().next().unwrap().data;
        assert!([3, 5, 7].contains(&power_up.ammo_bonus));
        assert_eq!(power_up.position.y, 91.0);
        assert!(!power_up.destroyed);
    }

    #[test]
    fn test_power_ups_can_be_disabled() {
        let mut config = SpawnConfig::default();
        config.power_ups.enabled = false;
        let mut h = Harness::with_config(config);

        let report = h.tick(0.0, 500.0);
        assert_eq!(report.power_ups, 0);
        assert!(h.scheduler.registries.power_ups.is_empty());
    }

    #[test]
    fn test_unbroken_barrier_penalized_once_on_cleanup() {
        let mut h = Harness::new();
        h.scheduler
            .registries
            .insert(Barrier::new(Vec3::new(0.0, 40.0, 2.5)), &mut h.handles, &mut h.scene);

        let mut penalties = 0;
        let report = h.scheduler.cleanup_behind(100.0, &mut h.scene, |_| penalties += 1);
        assert_eq!(report.barriers, 1);
        assert_eq!(report.missed_barriers, 1);
        assert!(h.scheduler.registries.barriers.is_empty());

        // Следующие кадры — barrier уже удалён
        for camera_y in [100.0, 110.0, 200.0] {
            h.scheduler.cleanup_behind(camera_y, &mut h.scene, |_| penalties += 1);
        }
        assert_eq!(penalties, 1);
    }

    #[test]
    fn test_broken_barrier_removed_without_penalty() {
        let mut h = Harness::new();
        let entity = h
            .scheduler
            .registries
            .insert(Barrier::new(Vec3::new(0.0, 40.0, 2.5)), &mut h.handles, &mut h.scene);
        h.scheduler
            .registries
            .get_mut::<Barrier>(entity.id)
            .unwrap()
            .data
            .try_break();

        let mut penalties = 0;
        let report = h.scheduler.cleanup_behind(100.0, &mut h.scene, |_| penalties += 1);
        assert_eq!(report.barriers, 1);
        assert_eq!(penalties, 0);
    }

    #[test]
    fn test_cleanup_distances_per_category() {
        let mut h = Harness::new();
        let registries = &mut h.scheduler.registries;
        // camera 100: barrier cutoff 90, crystal cutoff 50
        registries.insert(Barrier::new(Vec3::new(0.0, 85.0, 2.0)), &mut h.handles, &mut h.scene);
        registries.insert(Crystal::new(Vec3::new(0.0, 85.0, 2.0)), &mut h.handles, &mut h.scene);
        registries.insert(Crystal::new(Vec3::new(0.0, 45.0, 2.0)), &mut h.handles, &mut h.scene);

        let report = h.scheduler.cleanup_behind(100.0, &mut h.scene, |_| {});
        assert_eq!(report.barriers, 1);
        assert_eq!(report.crystals, 1);
        assert_eq!(h.scheduler.registries.crystals.len(), 1);
    }

    #[test]
    fn test_freshly_spawned_entities_survive_cleanup() {
        let mut h = Harness::new();
        h.tick(0.0, 1000.0);
        let total = h.scheduler.registries.total();

        h.scheduler.cleanup_behind(1000.0, &mut h.scene, |_| {});
        assert_eq!(h.scheduler.registries.total(), total);
    }

    #[test]
    fn test_gauntlet_layout() {
        let mut h = Harness::new();
        h.scheduler.spawn_gauntlet(100.0, &mut h.handles, &mut h.scene);

        let crystals: Vec<Vec3> = h
            .scheduler
            .registries
            .crystals
            .iter()
            .map(|e| e.data.position)
            .collect();
        assert_eq!(crystals, vec![Vec3::new(-3.0, 100.0, 2.0), Vec3::new(3.0, 105.0, 2.5)]);

        let barrier = &h.scheduler.registries.barriers.iter().next().unwrap().data;
        assert_eq!(barrier.position, Vec3::new(0.0, 102.5, 2.5));
    }

    #[test]
    fn test_active_crystal_count_ignores_broken() {
        let mut h = Harness::new();
        h.scheduler.spawn_opening_crystals(&mut h.handles, &mut h.scene);
        assert_eq!(h.scheduler.active_crystal_count(), 2);

        let first = h.scheduler.registries.crystals.iter().next().unwrap().id;
        h.scheduler
            .registries
            .get_mut::<Crystal>(first)
            .unwrap()
            .data
            .try_break();
        assert_eq!(h.scheduler.active_crystal_count(), 1);
    }

    #[test]
    fn test_clear_all_rearms_gates() {
        let mut h = Harness::new();
        h.tick(0.0, -5.0);
        h.scheduler.clear_all(-5.0, &mut h.scene);
        assert_eq!(h.scheduler.registries.total(), 0);

        let report = h.tick(0.5, -5.0);
        assert_eq!(report.crystals, 2);
        assert_eq!(report.barriers, 1);
    }

    #[test]
    fn test_same_seed_same_world() {
        let mut a = Harness::new();
        let mut b = Harness::new();
        for step in 0..40 {
            let now = step as f32 * 0.5;
            a.tick(now, now * 10.0);
            b.tick(now, now * 10.0);
        }
        assert_eq!(a.scene, b.scene);
    }
}
