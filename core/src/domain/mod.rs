//! Domain layer containing the entities of the token lifecycle.

pub mod entities;

pub use entities::*;
