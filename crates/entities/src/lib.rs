//! Core entity definitions for NC Service.
//!
//! This crate defines the data types shared by the stores and the front-end:
//! users (artisans and particuliers), service requests, responses and chat
//! messages.

mod message;
mod service;
mod user;

pub use message::*;
pub use service::*;
pub use user::*;
