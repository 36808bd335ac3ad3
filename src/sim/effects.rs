//! Muzzle flash and explosion effects
//!
//! Opaque animated sub-entities: the registry only cares that they update
//! and eventually flag their own disposal. Neither carries a collider, so
//! they are invisible to every collision query. Particle scatter is drawn
//! from the registry's seeded RNG at prepare time, keeping headless runs
//! reproducible.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::EntityId;
use crate::consts::{EXPLOSION_DURATION, MUZZLE_FLASH_DURATION};
use crate::heading;

/// Particle base size for the muzzle flash
const FLASH_SIZE: f32 = 0.1;

/// One fire spark in a muzzle flash
#[derive(Debug)]
pub struct Spark {
    pub offset: Vec3,
    pub angle: f32,
    pub speed: f32,
    pub scale: f32,
}

/// One smoke puff in a muzzle flash
#[derive(Debug)]
pub struct Puff {
    pub offset: Vec3,
    pub opacity: f32,
}

/// Short-lived cone of sparks and smoke at the muzzle
#[derive(Debug)]
pub struct MuzzleFlash {
    pub(crate) id: EntityId,
    pub(crate) position: Vec3,
    pub(crate) angle: f32,
    pub(crate) should_dispose: bool,
    remaining: f32,
    sparks: Vec<Spark>,
    smoke: Vec<Puff>,
    disposed: bool,
}

impl MuzzleFlash {
    pub fn new(id: EntityId, position: Vec3, angle: f32) -> Self {
        Self {
            id,
            position,
            angle,
            should_dispose: false,
            remaining: MUZZLE_FLASH_DURATION,
            sparks: Vec::new(),
            smoke: Vec::new(),
            disposed: false,
        }
    }

    /// Scatter 4-9 spark/puff pairs around the firing angle
    pub(crate) fn prepare(&mut self, rng: &mut Pcg32) {
        let count = rng.random_range(4..=9);
        for _ in 0..count {
            let angle_offset =
                std::f32::consts::PI * 0.08 * rng.random::<f32>() * random_sign(rng);
            let speed = 1.75 * rng.random::<f32>() * 3.0;
            self.sparks.push(Spark {
                offset: Vec3::ZERO,
                angle: self.angle + angle_offset,
                speed,
                scale: 1.0,
            });

            self.smoke.push(Puff {
                offset: Vec3::new(
                    rng.random::<f32>() * FLASH_SIZE * random_sign(rng),
                    rng.random::<f32>() * FLASH_SIZE * random_sign(rng),
                    rng.random::<f32>() * FLASH_SIZE * random_sign(rng),
                ),
                opacity: 1.0,
            });
        }
    }

    pub(crate) fn update(&mut self, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.should_dispose = true;
            return;
        }

        // Sparks fan out along their own angles and shrink as the effect
        // winds down; smoke rises and fades.
        for spark in &mut self.sparks {
            spark.offset += heading(spark.angle) * spark.speed * dt * self.remaining * 0.75;
            spark.scale = self.remaining;
        }
        for puff in &mut self.smoke {
            puff.opacity = self.remaining;
            puff.offset.z += 3.0 * dt;
        }
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub(crate) fn dispose(&mut self) {
        debug_assert!(!self.disposed, "muzzle flash disposed twice");
        self.sparks.clear();
        self.smoke.clear();
        self.disposed = true;
    }
}

/// One debris particle in an explosion
#[derive(Debug)]
pub struct Debris {
    pub offset: Vec3,
    pub direction: Vec3,
    pub speed: f32,
}

/// Radial debris burst left behind by a bullet impact
#[derive(Debug)]
pub struct Explosion {
    pub(crate) id: EntityId,
    pub(crate) position: Vec3,
    pub(crate) should_dispose: bool,
    pub(crate) remaining: f32,
    scale: f32,
    debris: Vec<Debris>,
    disposed: bool,
}

impl Explosion {
    pub fn new(id: EntityId, position: Vec3, scale: f32) -> Self {
        Self {
            id,
            position,
            should_dispose: false,
            remaining: EXPLOSION_DURATION,
            scale,
            debris: Vec::new(),
            disposed: false,
        }
    }

    pub(crate) fn prepare(&mut self, rng: &mut Pcg32) {
        let count = rng.random_range(8..=16);
        for _ in 0..count {
            let direction = Vec3::new(
                rng.random::<f32>() - 0.5,
                rng.random::<f32>() - 0.5,
                rng.random::<f32>() - 0.5,
            )
            .try_normalize()
            .unwrap_or(Vec3::X);
            self.debris.push(Debris {
                offset: Vec3::ZERO,
                direction,
                speed: self.scale * (0.5 + 1.5 * rng.random::<f32>()),
            });
        }
    }

    pub(crate) fn update(&mut self, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.should_dispose = true;
            return;
        }
        for debris in &mut self.debris {
            debris.offset += debris.direction * debris.speed * dt * self.remaining;
        }
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    pub(crate) fn dispose(&mut self) {
        debug_assert!(!self.disposed, "explosion disposed twice");
        self.debris.clear();
        self.disposed = true;
    }
}

fn random_sign(rng: &mut Pcg32) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_muzzle_flash_particle_budget() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut flash = MuzzleFlash::new(EntityId(1), Vec3::ZERO, 0.0);
        flash.prepare(&mut rng);
        let n = flash.sparks().len();
        assert!((4..=9).contains(&n));
    }

    #[test]
    fn test_muzzle_flash_expires() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut flash = MuzzleFlash::new(EntityId(1), Vec3::ZERO, 0.0);
        flash.prepare(&mut rng);

        flash.update(MUZZLE_FLASH_DURATION * 0.5);
        assert!(!flash.should_dispose);
        flash.update(MUZZLE_FLASH_DURATION * 0.6);
        assert!(flash.should_dispose);
    }

    #[test]
    fn test_explosion_debris_moves_outward() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut explosion = Explosion::new(EntityId(1), Vec3::ZERO, 1.0);
        explosion.prepare(&mut rng);
        assert!(!explosion.debris().is_empty());

        explosion.update(0.1);
        assert!(
            explosion
                .debris()
                .iter()
                .all(|d| d.offset.length() > 0.0)
        );
    }

    #[test]
    fn test_scatter_is_seed_deterministic() {
        let scatter = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut flash = MuzzleFlash::new(EntityId(1), Vec3::ZERO, 0.3);
            flash.prepare(&mut rng);
            flash
                .sparks()
                .iter()
                .map(|s| (s.angle, s.speed))
                .collect::<Vec<_>>()
        };
        assert_eq!(scatter(77), scatter(77));
    }
}
