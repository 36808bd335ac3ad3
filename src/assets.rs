//! Asset store collaborator
//!
//! Holds named handles for models and textures. Decoding bytes into GPU
//! resources is the renderer's problem; the sim only needs to know that an
//! asset exists and what footprint it occupies, so `load_all` registers the
//! standard set of handles and entity preparation fails fast when a required
//! lookup comes back empty.

use std::collections::HashMap;

use glam::Vec3;
use rand::Rng;
use thiserror::Error;

/// Asset store errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("no ground textures loaded")]
    NoGroundTextures,
}

/// Texture handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
}

impl Texture {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Model handle: named parts plus a world-space footprint for collider
/// construction
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub parts: Vec<String>,
    pub bounds: Vec3,
}

impl Model {
    pub fn new(name: impl Into<String>, parts: &[&str], bounds: Vec3) -> Self {
        Self {
            name: name.into(),
            parts: parts.iter().map(|p| (*p).to_string()).collect(),
            bounds,
        }
    }

    /// Look up a named sub-mesh
    pub fn part(&self, name: &str) -> Option<&str> {
        self.parts.iter().find(|p| *p == name).map(String::as_str)
    }
}

/// The asset store shared by all entity preparation
#[derive(Debug, Default)]
pub struct Assets {
    models: HashMap<String, Model>,
    textures: HashMap<String, Texture>,
    ground: Vec<Texture>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the standard asset set
    pub fn load_all(&mut self) -> Result<(), AssetError> {
        self.add_model(Model::new(
            "tank",
            &["Body", "Turret"],
            Vec3::new(1.0, 1.0, 0.7),
        ));

        self.add_texture(Texture::new("tank-body"));
        self.add_texture(Texture::new("tank-turret"));
        self.add_texture(Texture::new("wall"));

        for i in 1..=4 {
            self.add_ground_texture(Texture::new(format!("ground-{i:02}")));
        }

        log::info!(
            "assets loaded: {} models, {} textures, {} ground variants",
            self.models.len(),
            self.textures.len(),
            self.ground.len()
        );
        Ok(())
    }

    pub fn add_model(&mut self, model: Model) {
        self.models.insert(model.name.clone(), model);
    }

    pub fn add_texture(&mut self, texture: Texture) {
        self.textures.insert(texture.name.clone(), texture);
    }

    pub fn add_ground_texture(&mut self, texture: Texture) {
        self.ground.push(texture);
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    /// Pick a ground texture at random (seeded RNG keeps runs reproducible)
    pub fn random_ground_texture(&self, rng: &mut impl Rng) -> Result<&Texture, AssetError> {
        if self.ground.is_empty() {
            return Err(AssetError::NoGroundTextures);
        }
        let index = rng.random_range(0..self.ground.len());
        Ok(&self.ground[index])
    }
}
