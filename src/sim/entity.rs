//! The entity model
//!
//! A closed set of variants shares one lifecycle contract: prepare (fallible,
//! before the entity may enter any frame), update (once per frame while
//! live), dispose (exactly once, after the disposal sweep picks the entity
//! up). Only one level of specialization ever exists, so dispatch is a match
//! per hook rather than a trait object.

use glam::Vec3;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::bullet::Bullet;
use super::collision::Sphere;
use super::effects::{Explosion, MuzzleFlash};
use super::map::{TileField, Wall};
use super::player::Player;
use super::registry::FrameCtx;
use crate::assets::{AssetError, Assets};
use crate::input::InputFlags;

/// Closed classification used to filter collision candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Generic,
    Player,
    Projectile,
}

/// Stable entity identifier; doubles as the render pairing key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Entity preparation failures
///
/// Fatal to the entity being constructed: a failed entity must never enter
/// the registry. No retries - a missing asset stays missing.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("model not found: {0}")]
    MissingModel(&'static str),
    #[error("model part not found: {0}")]
    MissingPart(&'static str),
    #[error("texture not found: {0}")]
    MissingTexture(&'static str),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Anything that participates in the frame loop
#[derive(Debug)]
pub enum Entity {
    Player(Player),
    Bullet(Bullet),
    Wall(Wall),
    Tiles(TileField),
    MuzzleFlash(MuzzleFlash),
    Explosion(Explosion),
}

impl Entity {
    pub fn player(id: EntityId, position: Vec3, flags: std::sync::Arc<InputFlags>) -> Self {
        Self::Player(Player::new(id, position, flags))
    }

    pub fn bullet(id: EntityId, position: Vec3, angle: f32) -> Self {
        Self::Bullet(Bullet::new(id, position, angle))
    }

    pub fn wall(id: EntityId, position: Vec3) -> Self {
        Self::Wall(Wall::new(id, position))
    }

    pub fn tiles(id: EntityId, origin: Vec3, size: usize) -> Self {
        Self::Tiles(TileField::new(id, origin, size))
    }

    pub fn muzzle_flash(id: EntityId, position: Vec3, angle: f32) -> Self {
        Self::MuzzleFlash(MuzzleFlash::new(id, position, angle))
    }

    pub fn explosion(id: EntityId, position: Vec3, scale: f32) -> Self {
        Self::Explosion(Explosion::new(id, position, scale))
    }

    pub fn id(&self) -> EntityId {
        match self {
            Self::Player(e) => e.id,
            Self::Bullet(e) => e.id,
            Self::Wall(e) => e.id,
            Self::Tiles(e) => e.id,
            Self::MuzzleFlash(e) => e.id,
            Self::Explosion(e) => e.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Player(_) => EntityKind::Player,
            Self::Bullet(_) => EntityKind::Projectile,
            _ => EntityKind::Generic,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Self::Player(e) => e.position,
            Self::Bullet(e) => e.position,
            Self::Wall(e) => e.position,
            Self::Tiles(e) => e.origin,
            Self::MuzzleFlash(e) => e.position,
            Self::Explosion(e) => e.position,
        }
    }

    /// Bounding volume; `None` means the entity never collides
    pub fn collider(&self) -> Option<&Sphere> {
        match self {
            Self::Player(e) => e.collider.as_ref(),
            Self::Bullet(e) => e.collider.as_ref(),
            Self::Wall(e) => e.collider.as_ref(),
            Self::Tiles(_) | Self::MuzzleFlash(_) | Self::Explosion(_) => None,
        }
    }

    pub fn disposal_requested(&self) -> bool {
        match self {
            Self::Player(e) => e.should_dispose,
            Self::Bullet(e) => e.should_dispose,
            Self::Wall(e) => e.should_dispose,
            Self::Tiles(e) => e.should_dispose,
            Self::MuzzleFlash(e) => e.should_dispose,
            Self::Explosion(e) => e.should_dispose,
        }
    }

    /// Flag the entity for the next disposal sweep. It stays in the registry
    /// until then but is inert to gameplay.
    pub fn request_disposal(&mut self) {
        match self {
            Self::Player(e) => e.should_dispose = true,
            Self::Bullet(e) => e.should_dispose = true,
            Self::Wall(e) => e.should_dispose = true,
            Self::Tiles(e) => e.should_dispose = true,
            Self::MuzzleFlash(e) => e.should_dispose = true,
            Self::Explosion(e) => e.should_dispose = true,
        }
    }

    /// Build collider, resolve required assets, scatter effect particles.
    /// Must succeed before the entity participates in any frame tick.
    pub fn prepare(&mut self, assets: &Assets, rng: &mut Pcg32) -> Result<(), PrepareError> {
        match self {
            Self::Player(e) => e.prepare(assets),
            Self::Bullet(e) => {
                e.prepare();
                Ok(())
            }
            Self::Wall(e) => e.prepare(assets),
            Self::Tiles(e) => e.prepare(assets, rng),
            Self::MuzzleFlash(e) => {
                e.prepare(rng);
                Ok(())
            }
            Self::Explosion(e) => {
                e.prepare(rng);
                Ok(())
            }
        }
    }

    /// Advance one frame. A disposal-flagged entity no longer acts.
    pub fn update(&mut self, dt: f32, ctx: &mut FrameCtx<'_>) {
        if self.disposal_requested() {
            return;
        }
        match self {
            Self::Player(e) => e.update(dt, ctx),
            Self::Bullet(e) => e.update(dt, ctx),
            Self::MuzzleFlash(e) => e.update(dt),
            Self::Explosion(e) => e.update(dt),
            Self::Wall(_) | Self::Tiles(_) => {}
        }
    }

    /// Release owned resources. Called exactly once, by the disposal sweep.
    pub fn dispose(&mut self) {
        match self {
            Self::Player(e) => e.dispose(),
            Self::Bullet(e) => e.dispose(),
            Self::Wall(e) => e.dispose(),
            Self::Tiles(e) => e.dispose(),
            Self::MuzzleFlash(e) => e.dispose(),
            Self::Explosion(e) => e.dispose(),
        }
    }
}
