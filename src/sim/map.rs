//! Walls and the tiled ground
//!
//! Pure collision candidates and scenery: neither has per-frame behavior. A
//! wall is a unit box whose world-space bounding sphere is derived once at
//! prepare time; after that every test against it is sphere-sphere. The tile
//! field is one entity holding the whole ground plane, each tile textured at
//! random from the asset store's ground set.

use std::sync::Arc;

use glam::Vec3;
use rand_pcg::Pcg32;

use super::collision::{Aabb, Sphere};
use super::entity::{Entity, EntityId, PrepareError};
use super::registry::Registry;
use crate::assets::{Assets, Texture};
use crate::input::InputFlags;

/// A static obstacle: one unit box on the grid
#[derive(Debug)]
pub struct Wall {
    pub(crate) id: EntityId,
    pub(crate) position: Vec3,
    pub(crate) collider: Option<Sphere>,
    pub(crate) should_dispose: bool,
    texture: Option<Texture>,
    disposed: bool,
}

impl Wall {
    pub fn new(id: EntityId, position: Vec3) -> Self {
        Self {
            id,
            position,
            collider: None,
            should_dispose: false,
            texture: None,
            disposed: false,
        }
    }

    pub(crate) fn prepare(&mut self, assets: &Assets) -> Result<(), PrepareError> {
        let texture = assets
            .texture("wall")
            .ok_or(PrepareError::MissingTexture("wall"))?;
        self.texture = Some(texture.clone());

        let bounds = Aabb::from_center_size(self.position, Vec3::ONE);
        self.collider = Some(bounds.bounding_sphere());
        Ok(())
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub(crate) fn dispose(&mut self) {
        debug_assert!(!self.disposed, "wall disposed twice");
        self.texture = None;
        self.disposed = true;
    }
}

/// One ground tile within the field
#[derive(Debug)]
pub struct Tile {
    pub position: Vec3,
    pub texture: Option<Texture>,
}

/// The whole ground plane as a single entity; never collides
#[derive(Debug)]
pub struct TileField {
    pub(crate) id: EntityId,
    pub(crate) origin: Vec3,
    pub(crate) should_dispose: bool,
    tiles: Vec<Tile>,
    disposed: bool,
}

impl TileField {
    pub fn new(id: EntityId, origin: Vec3, size: usize) -> Self {
        let mut tiles = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                tiles.push(Tile {
                    position: origin + Vec3::new(i as f32, j as f32, 0.0),
                    texture: None,
                });
            }
        }
        Self {
            id,
            origin,
            should_dispose: false,
            tiles,
            disposed: false,
        }
    }

    pub(crate) fn prepare(&mut self, assets: &Assets, rng: &mut Pcg32) -> Result<(), PrepareError> {
        for tile in &mut self.tiles {
            tile.texture = Some(assets.random_ground_texture(rng)?.clone());
        }
        Ok(())
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn dispose(&mut self) {
        debug_assert!(!self.disposed, "tile field disposed twice");
        self.tiles.clear();
        self.disposed = true;
    }
}

/// Build the standard arena: a size x size tile field, the player at the
/// center, and a ring of walls along the perimeter. Returns the player id.
pub fn build_arena(
    registry: &mut Registry,
    assets: &Assets,
    flags: Arc<InputFlags>,
    size: usize,
) -> Result<EntityId, PrepareError> {
    let tiles_id = registry.alloc_id();
    registry.prepare_and_spawn(
        assets,
        Entity::tiles(tiles_id, Vec3::new(0.0, 0.0, -0.5), size),
    )?;

    let center = (size / 2) as f32;
    let player_id = registry.alloc_id();
    registry.prepare_and_spawn(
        assets,
        Entity::player(player_id, Vec3::new(center, center, 0.0), flags),
    )?;
    registry.camera_mut().position = Vec3::new(center, center, 10.0);

    let edge = (size - 1) as f32;
    for i in 0..(size - 1) {
        let i = i as f32;
        for position in [
            Vec3::new(0.0, i, 0.0),
            Vec3::new(i, 0.0, 0.0),
            Vec3::new(edge, i, 0.0),
            Vec3::new(i, edge, 0.0),
        ] {
            let id = registry.alloc_id();
            registry.prepare_and_spawn(assets, Entity::wall(id, position))?;
        }
    }
    let id = registry.alloc_id();
    registry.prepare_and_spawn(assets, Entity::wall(id, Vec3::new(edge, edge, 0.0)))?;

    log::info!(
        "arena built: size {size}, {} entities live",
        registry.len()
    );
    Ok(player_id)
}
