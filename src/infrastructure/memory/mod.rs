//! In-memory collaborator implementations.

mod seed;
mod store;

pub use seed::{Seed, SeedUser};
pub use store::InMemoryStore;
