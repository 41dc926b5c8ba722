//! Decorative obstacle patterns (columns / beam / arch / pillar cluster)

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Obstacle, ObstacleShape};

const COLUMN_X: f32 = 6.0;
const COLUMN_HEIGHTS: [f32; 3] = [4.0, 5.0, 6.0];
const BEAM_Z: f32 = 5.0;
const ARCH_PILLAR_X: f32 = 5.0;
const ARCH_TOP_Z: f32 = 4.0;
const CLUSTER_X: [f32; 4] = [-7.0, -6.0, 6.0, 7.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstaclePattern {
    Columns,
    Beam,
    Arch,
    PillarCluster,
}

impl ObstaclePattern {
    pub const ALL: [ObstaclePattern; 4] = [
        ObstaclePattern::Columns,
        ObstaclePattern::Beam,
        ObstaclePattern::Arch,
        ObstaclePattern::PillarCluster,
    ];

    /// Uniform choice over all patterns
    pub fn pick(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Constituent shapes of this pattern at corridor depth `y`
    pub fn build(self, y: f32, rng: &mut impl Rng) -> Vec<Obstacle> {
        match self {
            ObstaclePattern::Columns => [-COLUMN_X, COLUMN_X]
                .into_iter()
                .map(|x| {
                    let height = COLUMN_HEIGHTS.choose(rng).copied().unwrap_or(COLUMN_HEIGHTS[0]);
                    Obstacle::new(Vec3::new(x, y, 0.0), ObstacleShape::Column { height })
                })
                .collect(),

            ObstaclePattern::Beam => {
                vec![Obstacle::new(Vec3::new(0.0, y, BEAM_Z), ObstacleShape::Beam)]
            }

            ObstaclePattern::Arch => vec![
                Obstacle::new(Vec3::new(-ARCH_PILLAR_X, y, 0.0), ObstacleShape::ArchPillar),
                Obstacle::new(Vec3::new(ARCH_PILLAR_X, y, 0.0), ObstacleShape::ArchPillar),
                Obstacle::new(Vec3::new(0.0, y, ARCH_TOP_Z), ObstacleShape::ArchTop),
            ],

            ObstaclePattern::PillarCluster => {
                let count: usize = rng.gen_range(2..=3);
                (0..count)
                    .map(|_| {
                        let x = CLUSTER_X.choose(rng).copied().unwrap_or(CLUSTER_X[0]);
                        let z: f32 = rng.gen_range(0.5..=2.0);
                        let offset: f32 = rng.gen_range(0.0..=5.0);
                        Obstacle::new(Vec3::new(x, y + offset, z), ObstacleShape::Pillar)
                    })
                    .collect()
            }
        }
    }
}
