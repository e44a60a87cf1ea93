//! Refresh-token record store interface and mock implementation

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

// The in-memory mock is compiled unconditionally so downstream crates
// can drive their own tests with it.
pub mod mock;

pub use mock::MockTokenRepository;
pub use r#trait::TokenRepository;

#[cfg(test)]
mod tests;
