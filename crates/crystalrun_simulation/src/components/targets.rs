//! Corridor entities: Crystal, Barrier, PowerUp, Obstacle
//!
//! Lifecycle: `Alive → (hit) → Broken/Destroyed → (cleanup) → Removed`.
//! Флаг `broken`/`destroyed` — one-way latch, переключается только через
//! `try_break` / `try_collect`, второй вызов всегда no-op.

use bevy::prelude::*;

/// Registry category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Crystal,
    Barrier,
    PowerUp,
    Obstacle,
}

/// Breakable crystal target
#[derive(Debug, Clone, PartialEq)]
pub struct Crystal {
    pub position: Vec3,
    pub broken: bool,
}

impl Crystal {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            broken: false,
        }
    }

    /// Alive → Broken. Returns false if it was already broken.
    pub fn try_break(&mut self) -> bool {
        if self.broken {
            return false;
        }
        self.broken = true;
        true
    }
}

/// Breakable barrier blocking the corridor
///
/// Unbroken barrier, ушедший за камеру, штрафует игрока один раз
/// (cleanup удаляет его из registry сразу после штрафа).
#[derive(Debug, Clone, PartialEq)]
pub struct Barrier {
    pub position: Vec3,
    pub broken: bool,
}

impl Barrier {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            broken: false,
        }
    }

    pub fn try_break(&mut self) -> bool {
        if self.broken {
            return false;
        }
        self.broken = true;
        true
    }
}

/// Ammo pickup box
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub position: Vec3,
    pub ammo_bonus: u32,
    pub destroyed: bool,
}

impl PowerUp {
    pub fn new(position: Vec3, ammo_bonus: u32) -> Self {
        Self {
            position,
            ammo_bonus,
            destroyed: false,
        }
    }

    /// Alive → Destroyed, returns the carried bonus on the first call only
    pub fn try_collect(&mut self) -> Option<u32> {
        if self.destroyed {
            return None;
        }
        self.destroyed = true;
        Some(self.ammo_bonus)
    }
}

/// Shape of one decorative piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleShape {
    Column { height: f32 },
    Beam,
    ArchPillar,
    ArchTop,
    Pillar,
}

/// Decorative obstacle (no gameplay effect, cleanup only)
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub position: Vec3,
    pub shape: ObstacleShape,
}

impl Obstacle {
    pub fn new(position: Vec3, shape: ObstacleShape) -> Self {
        Self { position, shape }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crystal_breaks_once() {
        let mut crystal = Crystal::new(Vec3::new(0.0, 20.0, 2.0));
        assert!(crystal.try_break());
        assert!(crystal.broken);
        assert!(!crystal.try_break());
        assert!(crystal.broken);
    }

    #[test]
    fn test_barrier_breaks_once() {
        let mut barrier = Barrier::new(Vec3::ZERO);
        assert!(barrier.try_break());
        assert!(!barrier.try_break());
    }

    #[test]
    fn test_power_up_collected_once() {
        let mut power_up = PowerUp::new(Vec3::ZERO, 5);
        assert_eq!(power_up.try_collect(), Some(5));
        assert_eq!(power_up.try_collect(), None);
        assert!(power_up.destroyed);
    }
}
