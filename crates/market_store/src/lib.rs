//! Marketplace storage for NC Service
//!
//! This crate provides a storage abstraction for service requests, artisan
//! responses, chat messages and the user directory they reference, with an
//! in-memory implementation.

mod error;
mod memory;
mod seed;
mod traits;

pub use error::*;
pub use memory::*;
pub use seed::*;
pub use traits::*;
