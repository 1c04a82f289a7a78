//! Credential secrets and the bearer token model.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
