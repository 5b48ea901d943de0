//! View models.
//!
//! Every view is a pure function of the session, a snapshot of the market
//! store and some local UI state. Rendering lives in [`crate::shell`].

use std::collections::HashMap;

use entities::User;
use uuid::Uuid;

mod auth_forms;
mod chat;
mod dashboard;
mod form;
mod navigation;
mod profile;
mod service_form;
mod service_list;

pub use auth_forms::*;
pub use chat::*;
pub use dashboard::*;
pub use form::*;
pub use navigation::*;
pub use profile::*;
pub use service_form::*;
pub use service_list::*;

/// Users referenced by the requests being displayed, keyed by ID.
pub type Directory = HashMap<Uuid, User>;

/// "First Last" for `id`, or a placeholder when the user is unknown.
pub fn display_name(directory: &Directory, id: Uuid) -> String {
    directory
        .get(&id)
        .map(User::full_name)
        .unwrap_or_else(|| "Utilisateur inconnu".to_string())
}
