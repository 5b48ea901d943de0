//! Registration and profile-edit payloads

use std::fmt;

use entities::{ArtisanProfile, ServiceCategory, User, UserKind, UserType};
use serde::{Deserialize, Serialize};

/// Fields collected by the registration form
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterData {
    /// Email address
    pub email: String,

    /// Password. Never stored.
    pub password: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Phone number
    pub phone: String,

    /// Account type
    pub user_type: UserType,

    /// RIDET number (artisans)
    #[serde(default)]
    pub ridet_number: Option<String>,

    /// RC number (artisans)
    #[serde(default)]
    pub rc_number: Option<String>,

    /// Specialties (artisans)
    #[serde(default)]
    pub specialties: Vec<ServiceCategory>,
}

impl fmt::Debug for RegisterData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterData")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .field("user_type", &self.user_type)
            .field("ridet_number", &self.ridet_number)
            .field("rc_number", &self.rc_number)
            .field("specialties", &self.specialties)
            .finish()
    }
}

impl RegisterData {
    /// Builds the new, unverified account
    pub fn into_user(self) -> User {
        let kind = match self.user_type {
            UserType::Artisan => UserKind::Artisan(
                ArtisanProfile::new(
                    self.ridet_number.unwrap_or_default(),
                    self.rc_number.unwrap_or_default(),
                )
                .with_specialties(self.specialties),
            ),
            UserType::Particulier => UserKind::Particulier,
        };
        User::new(self.email, self.first_name, self.last_name, self.phone, kind)
    }
}

/// Partial profile edit. `None` leaves a field untouched.
///
/// The account type is deliberately absent: it cannot change after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// A blank description clears the field.
    pub description: Option<String>,
    pub profile_photo: Option<String>,
}

impl ProfileUpdate {
    /// Returns true if the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.description.is_none()
            && self.profile_photo.is_none()
    }

    /// Merges the update into `user`
    pub fn apply(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
        if let Some(description) = &self.description {
            let description = description.trim();
            user.description = (!description.is_empty()).then(|| description.to_string());
        }
        if let Some(photo) = &self.profile_photo {
            user.profile_photo = Some(photo.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_data(user_type: UserType) -> RegisterData {
        RegisterData {
            email: "paul@example.com".to_string(),
            password: "hunter22".to_string(),
            first_name: "Paul".to_string(),
            last_name: "Dubois".to_string(),
            phone: "+687 456789".to_string(),
            user_type,
            ridet_number: Some("0987654.001".to_string()),
            rc_number: Some("RC 2019 A 42".to_string()),
            specialties: vec![ServiceCategory::Menuiserie],
        }
    }

    #[test]
    fn test_particulier_drops_artisan_fields() {
        let user = register_data(UserType::Particulier).into_user();

        assert_eq!(user.user_type(), UserType::Particulier);
        assert!(user.artisan_profile().is_none());
        assert!(!user.verified);
    }

    #[test]
    fn test_artisan_keeps_business_details() {
        let user = register_data(UserType::Artisan).into_user();

        let profile = user.artisan_profile().unwrap();
        assert_eq!(profile.ridet_number, "0987654.001");
        assert_eq!(profile.rc_number, "RC 2019 A 42");
        assert!(profile.specialties.contains(&ServiceCategory::Menuiserie));
        assert_eq!(profile.completed_jobs, 0);
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", register_data(UserType::Particulier));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn test_profile_update_merges_only_set_fields() {
        let mut user = register_data(UserType::Particulier).into_user();
        let update = ProfileUpdate {
            phone: Some("+687 111111".to_string()),
            description: Some("Propriétaire à Dumbéa".to_string()),
            ..Default::default()
        };

        update.apply(&mut user);

        assert_eq!(user.phone, "+687 111111");
        assert_eq!(user.description.as_deref(), Some("Propriétaire à Dumbéa"));
        assert_eq!(user.first_name, "Paul");
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_blank_description_clears_it() {
        let mut user = register_data(UserType::Particulier).into_user();
        user.description = Some("Propriétaire à Dumbéa".to_string());

        ProfileUpdate {
            description: Some("   ".to_string()),
            ..Default::default()
        }
        .apply(&mut user);
        assert_eq!(user.description, None);

        ProfileUpdate {
            description: Some(" Villa à Koné ".to_string()),
            ..Default::default()
        }
        .apply(&mut user);
        assert_eq!(user.description.as_deref(), Some("Villa à Koné"));
    }
}
