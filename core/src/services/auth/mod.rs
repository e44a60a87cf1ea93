//! Authentication service orchestrating the user directory and the
//! token lifecycle engine

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
