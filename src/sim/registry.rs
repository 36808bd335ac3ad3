//! The entity registry and frame driver
//!
//! Single shared mutable collection of live entities plus camera state. Each
//! frame runs two sweeps in a fixed order: disposal first (entities flagged
//! during the previous frame are disposed exactly once, dropped from the
//! display list, and removed from the live set), then update over a snapshot
//! of the slots taken before the sweep begins. Spawns that happen mid-sweep
//! land beyond the snapshot: they are immediately visible to collision
//! queries and to the renderer, but first update on the next frame.
//!
//! Disposal-before-update is a policy decision, applied consistently: an
//! entity flagged in frame N is gone before any frame N+1 query runs, so a
//! dead entity can never be returned as a collision candidate.
//!
//! During its own update an entity is moved out of its slot, so registry
//! queries it performs can never return the entity itself - "excluding self"
//! falls out of the ownership model instead of an identity check.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Sphere;
use super::entity::{Entity, EntityId, EntityKind, PrepareError};
use crate::assets::Assets;
use crate::muzzle_offset;
use crate::render::{DisplayList, RenderHandle};

/// Camera/view state following the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
        }
    }
}

impl Camera {
    /// Track a target in the ground plane, keeping the current height
    pub fn follow(&mut self, target: Vec3) {
        self.position.x = target.x;
        self.position.y = target.y;
    }
}

/// Owns every live entity and drives the per-frame simulation
#[derive(Debug)]
pub struct Registry {
    /// `None` only transiently, while an entity is out for its own update
    slots: Vec<Option<Entity>>,
    camera: Camera,
    display: DisplayList,
    rng: Pcg32,
    next_id: u32,
    disposed_total: u64,
}

impl Registry {
    pub fn new(seed: u64) -> Self {
        Self {
            slots: Vec::new(),
            camera: Camera::default(),
            display: DisplayList::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            disposed_total: 0,
        }
    }

    /// Allocate a fresh entity id
    pub fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an already-prepared entity to the live set and the display
    /// list. No ordering guarantee relative to the current frame's remaining
    /// updates; the entity first updates next frame.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        log::debug!("spawn {:?} ({:?})", id, entity.kind());
        self.display.add(RenderHandle(id.0));
        self.slots.push(Some(entity));
        id
    }

    /// Prepare then spawn. A failed prepare surfaces to the caller and the
    /// entity never enters the registry.
    pub fn prepare_and_spawn(
        &mut self,
        assets: &Assets,
        mut entity: Entity,
    ) -> Result<EntityId, PrepareError> {
        entity.prepare(assets, &mut self.rng)?;
        Ok(self.spawn(entity))
    }

    /// One full frame: disposal sweep, then update sweep
    pub fn frame_tick(&mut self, dt: f32, assets: &Assets) {
        self.disposal_sweep();
        self.update_sweep(dt, assets);
    }

    fn disposal_sweep(&mut self) {
        for i in 0..self.slots.len() {
            let flagged = self.slots[i]
                .as_ref()
                .is_some_and(Entity::disposal_requested);
            if !flagged {
                continue;
            }
            if let Some(mut entity) = self.slots[i].take() {
                log::debug!("dispose {:?} ({:?})", entity.id(), entity.kind());
                entity.dispose();
                self.display.remove(RenderHandle(entity.id().0));
                self.disposed_total += 1;
            }
        }
        self.slots.retain(Option::is_some);
    }

    fn update_sweep(&mut self, dt: f32, assets: &Assets) {
        // Snapshot the slot count: entities appended during the sweep are
        // not updated until the next frame.
        let snapshot = self.slots.len();
        for i in 0..snapshot {
            let Some(mut entity) = self.slots[i].take() else {
                continue;
            };
            let mut ctx = FrameCtx {
                registry: &mut *self,
                assets,
            };
            entity.update(dt, &mut ctx);
            self.slots[i] = Some(entity);
        }
    }

    /// True if any query-eligible entity's sphere intersects `probe`,
    /// skipping entities of the excluded kind. Never fails: a disjoint or
    /// empty live set is simply no hit.
    pub fn collides(&self, probe: &Sphere, exclude: EntityKind) -> bool {
        self.candidates(exclude)
            .any(|e| e.collider().is_some_and(|c| c.intersects(probe)))
    }

    /// Ids of all query-eligible entities intersecting `probe`
    pub fn colliding_ids(&self, probe: &Sphere, exclude: EntityKind) -> Vec<EntityId> {
        self.candidates(exclude)
            .filter(|e| e.collider().is_some_and(|c| c.intersects(probe)))
            .map(Entity::id)
            .collect()
    }

    fn candidates(&self, exclude: EntityKind) -> impl Iterator<Item = &Entity> {
        // Disposal-flagged entities are inert: the sweep order already keeps
        // them out of cross-frame queries, and the filter keeps them out of
        // same-frame ones.
        self.iter()
            .filter(move |e| e.kind() != exclude && !e.disposal_requested())
    }

    /// Discrete fire trigger, not gated by the frame loop
    ///
    /// Reads the player's pose at the instant of the trigger, then
    /// constructs, prepares and spawns one bullet and one muzzle flash at
    /// the muzzle position. Preparation failure aborts the whole shot and
    /// spawns nothing.
    pub fn fire(&mut self, assets: &Assets) -> Result<Option<EntityId>, PrepareError> {
        let Some((position, rotation)) = self.iter().find_map(|e| match e {
            Entity::Player(p) if !p.should_dispose => Some((p.position, p.rotation)),
            _ => None,
        }) else {
            log::warn!("fire trigger with no live player");
            return Ok(None);
        };

        let muzzle = position + muzzle_offset(rotation);

        let mut bullet = Entity::bullet(self.alloc_id(), muzzle, rotation);
        bullet.prepare(assets, &mut self.rng)?;
        let mut flash = Entity::muzzle_flash(self.alloc_id(), muzzle, rotation);
        flash.prepare(assets, &mut self.rng)?;

        self.spawn(flash);
        Ok(Some(self.spawn(bullet)))
    }

    pub(crate) fn spawn_explosion(
        &mut self,
        assets: &Assets,
        position: Vec3,
    ) -> Result<EntityId, PrepareError> {
        let mut explosion = Entity::explosion(self.alloc_id(), position, 1.0);
        explosion.prepare(assets, &mut self.rng)?;
        Ok(self.spawn(explosion))
    }

    /// All entities still in the registry, disposal-flagged included
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().flatten()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.iter_mut().flatten().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    /// Total entities disposed over the registry's lifetime
    pub fn disposed_total(&self) -> u64 {
        self.disposed_total
    }
}

/// Mutable registry access handed to an entity during its update
///
/// The updating entity is out of its slot for the duration, so queries made
/// through the context can never return the entity itself.
pub struct FrameCtx<'a> {
    registry: &'a mut Registry,
    assets: &'a Assets,
}

impl FrameCtx<'_> {
    pub fn collides(&self, probe: &Sphere, exclude: EntityKind) -> bool {
        self.registry.collides(probe, exclude)
    }

    pub fn colliding_ids(&self, probe: &Sphere, exclude: EntityKind) -> Vec<EntityId> {
        self.registry.colliding_ids(probe, exclude)
    }

    /// Spawn an explosion at `position`. Effect preparation takes no assets
    /// today, so a failure here is unexpected; it is logged and the effect
    /// skipped rather than unwound through the updating entity.
    pub fn spawn_explosion(&mut self, position: Vec3) {
        if let Err(err) = self.registry.spawn_explosion(self.assets, position) {
            log::warn!("explosion effect skipped: {err}");
        }
    }

    pub fn follow_camera(&mut self, target: Vec3) {
        self.registry.camera.follow(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderHandle;

    fn loaded_assets() -> Assets {
        let mut assets = Assets::new();
        assets.load_all().unwrap();
        assets
    }

    fn spawn_wall(registry: &mut Registry, assets: &Assets, position: Vec3) -> EntityId {
        let id = registry.alloc_id();
        registry
            .prepare_and_spawn(assets, Entity::wall(id, position))
            .unwrap()
    }

    #[test]
    fn test_spawn_adds_to_live_and_display() {
        let assets = loaded_assets();
        let mut registry = Registry::new(1);
        let id = spawn_wall(&mut registry, &assets, Vec3::ZERO);

        assert_eq!(registry.len(), 1);
        assert!(registry.display().contains(RenderHandle(id.0)));
    }

    #[test]
    fn test_spawn_is_immediately_query_visible() {
        // Queries read the live set directly, so a spawn is visible to any
        // query issued after it - including queries by entities updated
        // later in the same sweep.
        let assets = loaded_assets();
        let mut registry = Registry::new(1);
        let probe = Sphere::new(Vec3::ZERO, 0.5);
        assert!(!registry.collides(&probe, EntityKind::Projectile));

        spawn_wall(&mut registry, &assets, Vec3::ZERO);
        assert!(registry.collides(&probe, EntityKind::Projectile));
    }

    #[test]
    fn test_disposal_is_deferred_then_exact() {
        let assets = loaded_assets();
        let mut registry = Registry::new(1);
        let id = spawn_wall(&mut registry, &assets, Vec3::ZERO);

        registry.get_mut(id).unwrap().request_disposal();
        // Still in the registry until the next frame's sweep...
        assert_eq!(registry.len(), 1);
        // ...but already inert to queries.
        let probe = Sphere::new(Vec3::ZERO, 0.5);
        assert!(!registry.collides(&probe, EntityKind::Projectile));

        registry.frame_tick(0.016, &assets);
        assert!(registry.is_empty());
        assert!(registry.display().is_empty());
        assert_eq!(registry.disposed_total(), 1);
    }

    #[test]
    fn test_flagged_entity_absent_from_next_frame_queries() {
        // A bullet heading into a wall that was flagged last frame must fly
        // through: the disposal sweep runs before any update-phase query.
        let assets = loaded_assets();
        let mut registry = Registry::new(1);
        let wall_id = spawn_wall(&mut registry, &assets, Vec3::ZERO);

        let bullet_id = registry.alloc_id();
        registry
            .prepare_and_spawn(
                &assets,
                Entity::bullet(bullet_id, Vec3::new(0.0, 0.9, 0.0), 0.0),
            )
            .unwrap();

        registry.get_mut(wall_id).unwrap().request_disposal();
        registry.frame_tick(0.016, &assets);

        assert!(registry.get(wall_id).is_none());
        match registry.get(bullet_id) {
            Some(Entity::Bullet(b)) => assert!(!b.should_dispose),
            other => panic!("expected bullet, got {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_disposes_each_once() {
        let assets = loaded_assets();
        let mut registry = Registry::new(1);
        let n = 12;
        let ids: Vec<_> = (0..n)
            .map(|i| spawn_wall(&mut registry, &assets, Vec3::new(i as f32 * 2.0, 0.0, 0.0)))
            .collect();
        assert_eq!(registry.len(), n);

        for id in &ids {
            registry.get_mut(*id).unwrap().request_disposal();
        }
        registry.frame_tick(0.016, &assets);

        assert!(registry.is_empty());
        assert!(registry.display().is_empty());
        assert_eq!(registry.disposed_total(), n as u64);

        // A further tick over the empty set is a no-op, not a double
        // dispose.
        registry.frame_tick(0.016, &assets);
        assert_eq!(registry.disposed_total(), n as u64);
    }

    #[test]
    fn test_mid_sweep_spawn_updates_next_frame() {
        // A bullet impact spawns an explosion during the update sweep; the
        // explosion is live and render-added immediately but its own timer
        // only starts running on the following frame.
        let assets = loaded_assets();
        let mut registry = Registry::new(1);
        spawn_wall(&mut registry, &assets, Vec3::ZERO);
        let bullet_id = registry.alloc_id();
        registry
            .prepare_and_spawn(
                &assets,
                Entity::bullet(bullet_id, Vec3::new(0.0, 0.9, 0.0), 0.0),
            )
            .unwrap();

        registry.frame_tick(0.016, &assets);

        let remaining_after_spawn_frame = registry
            .iter()
            .find_map(|e| match e {
                Entity::Explosion(x) => Some(x.remaining),
                _ => None,
            })
            .expect("explosion should be live in the spawn frame");
        assert_eq!(remaining_after_spawn_frame, crate::consts::EXPLOSION_DURATION);

        registry.frame_tick(0.016, &assets);
        let remaining_next_frame = registry
            .iter()
            .find_map(|e| match e {
                Entity::Explosion(x) => Some(x.remaining),
                _ => None,
            })
            .unwrap();
        assert!(remaining_next_frame < crate::consts::EXPLOSION_DURATION);
    }

    #[test]
    fn test_fire_spawns_exactly_one_bullet_and_one_flash() {
        let assets = loaded_assets();
        let flags = std::sync::Arc::new(crate::input::InputFlags::default());
        let mut registry = Registry::new(1);
        let player_id = registry.alloc_id();
        registry
            .prepare_and_spawn(
                &assets,
                Entity::player(player_id, Vec3::new(4.0, 4.0, 0.0), flags),
            )
            .unwrap();

        let bullet_id = registry.fire(&assets).unwrap().expect("player is live");
        assert_eq!(registry.len(), 3);

        let expected = Vec3::new(4.0, 4.0, 0.0) + muzzle_offset(0.0);
        match registry.get(bullet_id) {
            Some(Entity::Bullet(b)) => {
                assert!((b.position - expected).length() < 1e-6);
                assert_eq!(b.angle, 0.0);
            }
            other => panic!("expected bullet, got {other:?}"),
        }
        let flash = registry
            .iter()
            .find_map(|e| match e {
                Entity::MuzzleFlash(f) => Some(f),
                _ => None,
            })
            .expect("exactly one flash");
        assert!((flash.position - expected).length() < 1e-6);
        assert_eq!(flash.angle, 0.0);
    }

    #[test]
    fn test_fire_without_player_is_a_noop() {
        let assets = loaded_assets();
        let mut registry = Registry::new(1);
        assert!(registry.fire(&assets).unwrap().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failed_prepare_never_enters_registry() {
        let empty = Assets::new();
        let mut registry = Registry::new(1);
        let id = registry.alloc_id();
        let result = registry.prepare_and_spawn(&empty, Entity::wall(id, Vec3::ZERO));
        assert!(matches!(result, Err(PrepareError::MissingTexture("wall"))));
        assert!(registry.is_empty());
        assert!(registry.display().is_empty());
    }

    #[test]
    fn test_effects_expire_and_registry_drains() {
        let assets = loaded_assets();
        let mut registry = Registry::new(1);
        spawn_wall(&mut registry, &assets, Vec3::ZERO);
        let bullet_id = registry.alloc_id();
        registry
            .prepare_and_spawn(
                &assets,
                Entity::bullet(bullet_id, Vec3::new(0.0, 0.9, 0.0), 0.0),
            )
            .unwrap();

        // Run well past the explosion lifetime; only the wall survives.
        for _ in 0..200 {
            registry.frame_tick(0.016, &assets);
        }
        assert_eq!(registry.len(), 1);
        assert!(matches!(registry.iter().next(), Some(Entity::Wall(_))));
        // Bullet + explosion both disposed exactly once.
        assert_eq!(registry.disposed_total(), 2);
    }
}
