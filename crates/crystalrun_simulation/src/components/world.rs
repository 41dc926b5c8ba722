//! World context: scene handles + camera rig
//!
//! Engine host владеет визуалами и коллайдерами, симуляция знает только
//! opaque `SceneHandle`. Handles выдаёт `HandleAllocator` (монотонно,
//! никогда не переиспользуются — stale handle не может "ожить").

use bevy::prelude::*;

/// Opaque id of a host-side visual/collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneHandle(pub u64);

/// Logical id of a registry entry (crystal, barrier, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Monotonic allocator for scene handles
#[derive(Resource, Debug, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn allocate(&mut self) -> SceneHandle {
        let handle = SceneHandle(self.next);
        self.next += 1;
        handle
    }

    /// Number of handles handed out so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// Aim ray in world space (pointer → camera lens extrusion, computed by host)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Camera rig — read-only world context for scheduler/dispatcher
///
/// Игрок привязан к камере: позиция камеры = позиция игрока,
/// `player` — handle его коллайдера на стороне host.
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub position: Vec3,
    /// Units per second along `forward`
    pub speed: f32,
    pub forward: Vec3,
    pub player: SceneHandle,
}

impl CameraRig {
    pub fn new(position: Vec3, speed: f32, player: SceneHandle) -> Self {
        Self {
            position,
            speed,
            forward: Vec3::Y,
            player,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.forward * self.speed * dt;
    }

    /// Corridor depth of the camera (world Y)
    pub fn depth(&self) -> f32 {
        self.position.y
    }

    /// Pointer aim if the host has one, camera forward otherwise
    pub fn aim_or_forward(&self, aim: Option<AimRay>) -> AimRay {
        aim.unwrap_or(AimRay {
            origin: self.position,
            direction: self.forward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut handles = HandleAllocator::default();
        let a = handles.allocate();
        let b = handles.allocate();
        assert_ne!(a, b);
        assert_eq!(handles.issued(), 2);
    }

    #[test]
    fn test_camera_advances_along_forward() {
        let mut rig = CameraRig::new(Vec3::new(0.0, -5.0, 2.0), 10.0, SceneHandle(0));
        rig.advance(0.5);
        assert_eq!(rig.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(rig.depth(), 0.0);
    }

    #[test]
    fn test_aim_falls_back_to_forward() {
        let rig = CameraRig::new(Vec3::new(1.0, 2.0, 3.0), 10.0, SceneHandle(0));
        let ray = rig.aim_or_forward(None);
        assert_eq!(ray.origin, rig.position);
        assert_eq!(ray.direction, Vec3::Y);

        let custom = AimRay {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        assert_eq!(rig.aim_or_forward(Some(custom)), custom);
    }
}
