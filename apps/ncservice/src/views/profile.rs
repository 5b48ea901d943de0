//! Profile editing and account deletion.

use auth::ProfileUpdate;
use chrono::{DateTime, Utc};
use entities::{ArtisanProfile, User, UserType};

/// Read-only profile card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub verified: bool,
    pub description: Option<String>,
    pub artisan: Option<ArtisanProfile>,
    pub member_since: DateTime<Utc>,
}

impl ProfileView {
    pub fn build(user: &User) -> Self {
        Self {
            full_name: user.full_name(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            user_type: user.user_type(),
            verified: user.verified,
            description: user.description.clone(),
            artisan: user.artisan_profile().cloned(),
            member_since: user.created_at,
        }
    }
}

/// Editable copy of the profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub description: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            description: user.description.clone().unwrap_or_default(),
        }
    }

    /// Update carrying only the fields that differ from `user`.
    pub fn changes(&self, user: &User) -> ProfileUpdate {
        let changed = |new: &str, old: &str| (new != old).then(|| new.to_string());
        ProfileUpdate {
            first_name: changed(&self.first_name, &user.first_name),
            last_name: changed(&self.last_name, &user.last_name),
            phone: changed(&self.phone, &user.phone),
            description: changed(
                self.description.trim(),
                user.description.as_deref().unwrap_or_default(),
            ),
            profile_photo: None,
        }
    }
}

/// Two-step confirmation guarding account deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletionPrompt {
    #[default]
    Idle,
    FirstWarning,
    FinalWarning,
}

impl DeletionPrompt {
    /// Starts the confirmation sequence.
    pub fn request(self) -> Self {
        Self::FirstWarning
    }

    /// Advances one step. Returns true once both warnings were confirmed.
    pub fn confirm(&mut self) -> bool {
        match self {
            Self::Idle => false,
            Self::FirstWarning => {
                *self = Self::FinalWarning;
                false
            }
            Self::FinalWarning => {
                *self = Self::Idle;
                true
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_pending(&self) -> bool {
        *self != Self::Idle
    }

    /// Question to ask at the current step.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::FirstWarning => Some(
                "Êtes-vous sûr de vouloir supprimer votre compte ? Cette action est irréversible. (oui/non)",
            ),
            Self::FinalWarning => Some(
                "Dernière confirmation : votre compte sera définitivement supprimé. (oui/non)",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use entities::UserKind;

    use super::*;

    fn marie() -> User {
        User::new("marie@example.nc", "Marie", "Martin", "+687 1", UserKind::Particulier)
    }

    #[test]
    fn test_unchanged_form_yields_empty_update() {
        let user = marie();
        let form = ProfileForm::from_user(&user);
        assert!(form.changes(&user).is_empty());
    }

    #[test]
    fn test_changes_only_edited_fields() {
        let user = marie();
        let mut form = ProfileForm::from_user(&user);
        form.phone = "+687 999999".to_string();
        form.description = "Propriétaire à Koné".to_string();

        let update = form.changes(&user);
        assert_eq!(update.phone.as_deref(), Some("+687 999999"));
        assert_eq!(update.description.as_deref(), Some("Propriétaire à Koné"));
        assert!(update.first_name.is_none());
        assert!(update.last_name.is_none());
    }

    #[test]
    fn test_blank_description_clears_profile() {
        let mut user = marie();
        user.description = Some("Propriétaire à Koné".to_string());
        let mut form = ProfileForm::from_user(&user);
        form.description = "  ".to_string();

        let update = form.changes(&user);
        assert_eq!(update.description.as_deref(), Some(""));
        update.apply(&mut user);
        assert_eq!(user.description, None);

        // Nothing to clear
        assert!(ProfileForm::from_user(&user).changes(&user).is_empty());
    }

    #[test]
    fn test_deletion_needs_two_confirmations() {
        let mut prompt = DeletionPrompt::default().request();
        assert!(prompt.message().is_some());
        assert!(!prompt.confirm());
        assert_eq!(prompt, DeletionPrompt::FinalWarning);
        assert!(prompt.confirm());
        assert!(!prompt.is_pending());
    }

    #[test]
    fn test_deletion_cancel_resets() {
        let mut prompt = DeletionPrompt::default().request();
        prompt.cancel();
        assert!(!prompt.confirm());
        assert_eq!(prompt.message(), None);
    }
}
