//! Shared types for keyview: the zeroizing secret wrapper and config errors.

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
