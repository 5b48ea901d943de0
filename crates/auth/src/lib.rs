//! Session management for NC Service.
//!
//! This crate provides:
//! - The auth store (login, registration, profile edits, account deletion)
//! - Session storage backends standing in for browser local storage
//!
//! Authentication is simulated: no credential is ever verified.

mod error;
mod profile;
mod session;
mod storage;

pub use error::*;
pub use profile::*;
pub use session::*;
pub use storage::*;
