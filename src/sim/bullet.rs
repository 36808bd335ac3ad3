//! Ballistic bullets
//!
//! A bullet's angle is fixed at spawn and never changes. Each frame it
//! advances along that angle, then probes the live set with its own small
//! sphere, excluding player-kind entities (the tank that fired it). Any hit
//! flags the bullet for the next disposal sweep and leaves an explosion at
//! the impact point. Walls count as hits. A bullet that hits nothing expires
//! silently once it exhausts its travel budget.

use glam::Vec3;

use super::collision::Sphere;
use super::entity::{EntityId, EntityKind};
use super::registry::FrameCtx;
use crate::consts::{BULLET_MAX_RANGE, BULLET_RADIUS, BULLET_SPEED};
use crate::heading;

/// A fired shell
#[derive(Debug)]
pub struct Bullet {
    pub(crate) id: EntityId,
    pub(crate) position: Vec3,
    /// Firing angle, fixed at construction
    pub(crate) angle: f32,
    pub(crate) collider: Option<Sphere>,
    pub(crate) should_dispose: bool,
    traveled: f32,
    disposed: bool,
}

impl Bullet {
    pub fn new(id: EntityId, position: Vec3, angle: f32) -> Self {
        Self {
            id,
            position,
            angle,
            collider: None,
            should_dispose: false,
            traveled: 0.0,
            disposed: false,
        }
    }

    /// Bullets are procedural geometry; preparation only builds the
    /// point-like collider.
    pub(crate) fn prepare(&mut self) {
        self.collider = Some(Sphere::new(self.position, BULLET_RADIUS));
    }

    pub(crate) fn update(&mut self, dt: f32, ctx: &mut FrameCtx<'_>) {
        let step = heading(self.angle) * BULLET_SPEED * dt;
        self.position += step;
        self.traveled += step.length();
        if let Some(collider) = &mut self.collider {
            collider.center = self.position;
        }

        if self.traveled > BULLET_MAX_RANGE {
            // Out of range: expire without an explosion.
            self.should_dispose = true;
            return;
        }

        let Some(collider) = &self.collider else {
            return;
        };
        if ctx.collides(collider, EntityKind::Player) {
            self.should_dispose = true;
            ctx.spawn_explosion(self.position);
        }
    }

    pub(crate) fn dispose(&mut self) {
        debug_assert!(!self.disposed, "bullet disposed twice");
        self.disposed = true;
    }
}
