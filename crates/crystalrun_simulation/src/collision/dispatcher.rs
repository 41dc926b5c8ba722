//! CollisionDispatcher — raw handle pairs → gameplay effects
//!
//! # Architecture
//! - Host присылает неупорядоченную пару handles (from, into)
//! - Dispatcher канонизирует её в (actor, target): projectile/player × entity
//! - Alive → Broken/Destroyed: check-and-set флага внутри одного resolve
//! - Player × Barrier: cooldown окно на gameplay clock, не зависит от флагов
//! - Stale/unknown handles, inactive projectiles, obstacles → Ignored

use bevy::prelude::*;

use crate::collision::CollisionPair;
use crate::components::{Barrier, Crystal, EntityKind, PowerUp, SceneHandle};
use crate::config::{BarrierReward, ScoringConfig};
use crate::game::{GameState, HudUpdate, PenaltyKind};
use crate::projectile::ProjectilePool;
use crate::scene::{EffectKind, SceneCommand};
use crate::spawning::{EntityRef, Registries};

/// One side of a collision pair after handle lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Projectile(usize),
    Player,
    Target(EntityRef),
    Unknown,
}

/// What a single resolution did
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionOutcome {
    CrystalBroken { score: u32, ammo: u32 },
    BarrierBroken { reward: BarrierReward },
    PowerUpCollected { ammo: u32, score: u32 },
    PlayerHitBarrier { penalty: u32, score: u32 },
    /// Player still inside the cooldown window
    PlayerHitCooldown,
    /// Projectile hit a target that was already broken/destroyed
    TargetAlreadyBroken,
    Ignored,
}

/// Mutable world the dispatcher applies effects to
pub struct CollisionContext<'a> {
    pub now: f32,
    pub player: SceneHandle,
    pub pool: &'a mut ProjectilePool,
    pub registries: &'a mut Registries,
    pub state: &'a mut GameState,
    pub scene: &'a mut Vec<SceneCommand>,
    pub hud: &'a mut Vec<HudUpdate>,
}

impl CollisionContext<'_> {
    fn classify(&self, handle: SceneHandle) -> Participant {
        if handle == self.player {
            return Participant::Player;
        }
        if let Some(slot) = self.pool.slot_for(handle) {
            return Participant::Projectile(slot);
        }
        match self.registries.resolve(handle) {
            Some(entity) => Participant::Target(entity),
            None => Participant::Unknown,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CollisionDispatcher {
    scoring: ScoringConfig,
    last_player_hit: Option<f32>,
}

impl CollisionDispatcher {
    pub fn new(scoring: ScoringConfig) -> Self {
        Self {
            scoring,
            last_player_hit: None,
        }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn last_player_hit(&self) -> Option<f32> {
        self.last_player_hit
    }

    pub fn reset(&mut self) {
        self.last_player_hit = None;
    }

    /// Resolve one collision pair, applying at most one effect
    pub fn resolve(&mut self, pair: &CollisionPair, ctx: &mut CollisionContext) -> CollisionOutcome {
        let from = ctx.classify(pair.from);
        let into = ctx.classify(pair.into);

        match (from, into) {
            (Participant::Projectile(slot), Participant::Target(target))
            | (Participant::Target(target), Participant::Projectile(slot)) => {
                self.projectile_hit(slot, target, ctx)
            }
            (Participant::Player, Participant::Target(target))
            | (Participant::Target(target), Participant::Player) => self.player_hit(target, ctx),
            _ => CollisionOutcome::Ignored,
        }
    }

    fn projectile_hit(
        &mut self,
        slot: usize,
        target: EntityRef,
        ctx: &mut CollisionContext,
    ) -> CollisionOutcome {
        // Inactive projectile не участвует в коллизиях
        if !ctx.pool.get(slot).is_some_and(|p| p.active) {
            return CollisionOutcome::Ignored;
        }
        if target.kind == EntityKind::Obstacle {
            return CollisionOutcome::Ignored;
        }

        ctx.pool.deactivate(slot, ctx.scene);

        match target.kind {
            EntityKind::Crystal => self.break_crystal(target, ctx),
            EntityKind::Barrier => self.break_barrier(target, ctx),
            EntityKind::PowerUp => self.collect_power_up(target, ctx),
            EntityKind::Obstacle => CollisionOutcome::Ignored,
        }
    }

    fn break_crystal(&self, target: EntityRef, ctx: &mut CollisionContext) -> CollisionOutcome {
        let Some(entry) = ctx.registries.get_mut::<Crystal>(target.id) else {
            return CollisionOutcome::Ignored;
        };
        if !entry.data.try_break() {
            return CollisionOutcome::TargetAlreadyBroken;
        }

        ctx.scene.push(SceneCommand::Shatter {
            handle: entry.handle,
        });
        ctx.scene.push(SceneCommand::PlayEffect {
            effect: EffectKind::CrystalShatter,
            position: entry.data.position,
        });

        let score = self.scoring.crystal_score;
        let ammo = self.scoring.crystal_ammo_refund;
        ctx.state.add_score(score);
        ctx.state.add_ammo(ammo);

        CollisionOutcome::CrystalBroken { score, ammo }
    }

    fn break_barrier(&self, target: EntityRef, ctx: &mut CollisionContext) -> CollisionOutcome {
        let Some(entry) = ctx.registries.get_mut::<Barrier>(target.id) else {
            return CollisionOutcome::Ignored;
        };
        if !entry.data.try_break() {
            return CollisionOutcome::TargetAlreadyBroken;
        }

        ctx.scene.push(SceneCommand::Shatter {
            handle: entry.handle,
        });
        ctx.scene.push(SceneCommand::PlayEffect {
            effect: EffectKind::BarrierShatter,
            position: entry.data.position,
        });

        let reward = self.scoring.barrier_reward;
        match reward {
            BarrierReward::Ammo(amount) => ctx.state.add_ammo(amount),
            BarrierReward::Score(points) => ctx.state.add_score(points),
        }

        CollisionOutcome::BarrierBroken { reward }
    }

    fn collect_power_up(&self, target: EntityRef, ctx: &mut CollisionContext) -> CollisionOutcome {
        let Some(entry) = ctx.registries.get_mut::<PowerUp>(target.id) else {
            return CollisionOutcome::Ignored;
        };
        let Some(ammo) = entry.data.try_collect() else {
            return CollisionOutcome::TargetAlreadyBroken;
        };

        ctx.scene.push(SceneCommand::Shatter {
            handle: entry.handle,
        });
        ctx.scene.push(SceneCommand::PlayEffect {
            effect: EffectKind::PowerUpBurst,
            position: entry.data.position,
        });

        let score = self.scoring.power_up_score;
        ctx.state.add_ammo(ammo);
        ctx.state.add_score(score);
        ctx.hud.push(HudUpdate::TransientMessage {
            text: format!("+{} AMMO", ammo),
            seconds: self.scoring.pickup_message_seconds,
        });

        CollisionOutcome::PowerUpCollected { ammo, score }
    }

    /// Player × Barrier with cooldown (sustained overlap ≠ penalty every frame)
    fn player_hit(&mut self, target: EntityRef, ctx: &mut CollisionContext) -> CollisionOutcome {
        if target.kind != EntityKind::Barrier {
            return CollisionOutcome::Ignored;
        }
        let Some(entry) = ctx.registries.get::<Barrier>(target.id) else {
            return CollisionOutcome::Ignored;
        };
        if entry.data.broken {
            return CollisionOutcome::Ignored;
        }

        if let Some(last) = self.last_player_hit {
            if ctx.now - last < self.scoring.player_hit_cooldown {
                return CollisionOutcome::PlayerHitCooldown;
            }
        }
        self.last_player_hit = Some(ctx.now);

        let penalty = self.scoring.barrier_collision_penalty;
        let score = ctx.state.apply_penalty(penalty, PenaltyKind::BarrierCollision);

        CollisionOutcome::PlayerHitBarrier { penalty, score }
    }
}
