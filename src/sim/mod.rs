//! Deterministic simulation module
//!
//! The entity/collision/update core. Single-threaded cooperative frame loop:
//! correctness rests on strict sweep ordering (disposal before update) and
//! on deferred removal, never on locks. Seeded RNG only, no rendering or
//! platform dependencies.

pub mod bullet;
pub mod collision;
pub mod effects;
pub mod entity;
pub mod map;
pub mod player;
pub mod registry;

pub use collision::{Aabb, Sphere};
pub use entity::{Entity, EntityId, EntityKind, PrepareError};
pub use map::build_arena;
pub use registry::{Camera, FrameCtx, Registry};
