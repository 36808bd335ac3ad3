//! The player-controlled tank
//!
//! Input flags are sampled once per frame. Rotation always commits;
//! translation commits only when the moved collider is clear of every
//! non-projectile candidate. The asymmetry is deliberate: turning while
//! pressed against a wall must never feel stuck.

use std::sync::Arc;

use glam::Vec3;

use super::collision::{Aabb, Sphere};
use super::entity::{EntityId, EntityKind, PrepareError};
use super::registry::FrameCtx;
use crate::assets::Assets;
use crate::consts::{MOVE_SPEED, PLAYER_COLLIDER_SCALE, TURN_RATE};
use crate::input::InputFlags;
use crate::{heading, wrap_angle};

/// The player tank
#[derive(Debug)]
pub struct Player {
    pub(crate) id: EntityId,
    pub(crate) position: Vec3,
    /// Facing angle in [0, 2π)
    pub(crate) rotation: f32,
    pub(crate) collider: Option<Sphere>,
    pub(crate) should_dispose: bool,
    disposed: bool,
    flags: Arc<InputFlags>,
}

impl Player {
    pub fn new(id: EntityId, position: Vec3, flags: Arc<InputFlags>) -> Self {
        Self {
            id,
            position,
            rotation: 0.0,
            collider: None,
            should_dispose: false,
            disposed: false,
            flags,
        }
    }

    /// Resolve the tank model and textures, then build the collider: the
    /// model box's world-space bounding sphere, shrunk so the hull can brush
    /// walls.
    pub(crate) fn prepare(&mut self, assets: &Assets) -> Result<(), PrepareError> {
        let model = assets
            .model("tank")
            .ok_or(PrepareError::MissingModel("tank"))?;
        model.part("Body").ok_or(PrepareError::MissingPart("Body"))?;
        model
            .part("Turret")
            .ok_or(PrepareError::MissingPart("Turret"))?;
        assets
            .texture("tank-body")
            .ok_or(PrepareError::MissingTexture("tank-body"))?;
        assets
            .texture("tank-turret")
            .ok_or(PrepareError::MissingTexture("tank-turret"))?;

        let bounds = Aabb::from_center_size(self.position, model.bounds);
        let mut collider = bounds.bounding_sphere();
        collider.radius *= PLAYER_COLLIDER_SCALE;
        self.collider = Some(collider);
        Ok(())
    }

    pub(crate) fn update(&mut self, dt: f32, ctx: &mut FrameCtx<'_>) {
        // Left wins when both turn keys are held.
        let mut rotation = self.rotation;
        if self.flags.left() {
            rotation += TURN_RATE * dt;
        } else if self.flags.right() {
            rotation -= TURN_RATE * dt;
        }
        let rotation = wrap_angle(rotation);

        // Translation derives from the candidate rotation: facing updates
        // apply before the movement direction within the same frame.
        let mut movement = Vec3::ZERO;
        if self.flags.up() {
            movement = heading(rotation) * MOVE_SPEED * dt;
        } else if self.flags.down() {
            movement = -(heading(rotation) * MOVE_SPEED * dt);
        }

        // Rotation commits regardless of the collision outcome.
        self.rotation = rotation;

        if let Some(collider) = &self.collider {
            let probe = collider.translated(movement);
            if ctx.collides(&probe, EntityKind::Projectile) {
                // Any overlap vetoes the whole translation - no sliding.
                return;
            }
        }

        self.position += movement;
        if let Some(collider) = &mut self.collider {
            collider.center += movement;
        }
        ctx.follow_camera(self.position);
    }

    pub(crate) fn dispose(&mut self) {
        debug_assert!(!self.disposed, "player disposed twice");
        self.disposed = true;
    }
}
