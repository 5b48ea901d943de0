//! User-related entity definitions.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ServiceCategory;

/// Kind of account, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Tradesperson answering service requests.
    Artisan,
    /// Individual posting service requests.
    Particulier,
}

impl UserType {
    /// Converts the user type to its identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artisan => "artisan",
            Self::Particulier => "particulier",
        }
    }

    /// Parses a user type from its identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "artisan" => Some(Self::Artisan),
            "particulier" => Some(Self::Particulier),
            _ => None,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business details carried only by artisan accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArtisanProfile {
    /// RIDET business registration number.
    pub ridet_number: String,
    /// Trade register (RC) number.
    pub rc_number: String,
    /// Trades the artisan works in.
    pub specialties: BTreeSet<ServiceCategory>,
    /// Average rating.
    pub rating: f32,
    /// Number of jobs completed through the marketplace.
    pub completed_jobs: u32,
}

impl ArtisanProfile {
    /// Creates a profile with no rating and no completed jobs.
    pub fn new(ridet_number: impl Into<String>, rc_number: impl Into<String>) -> Self {
        Self {
            ridet_number: ridet_number.into(),
            rc_number: rc_number.into(),
            ..Default::default()
        }
    }

    /// Sets the specialties.
    pub fn with_specialties(mut self, specialties: impl IntoIterator<Item = ServiceCategory>) -> Self {
        self.specialties = specialties.into_iter().collect();
        self
    }
}

/// Account variant. Serialized inline with the user record under `userType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "userType", rename_all = "lowercase")]
pub enum UserKind {
    Artisan(ArtisanProfile),
    Particulier,
}

impl UserKind {
    /// Returns the plain user type.
    pub fn user_type(&self) -> UserType {
        match self {
            Self::Artisan(_) => UserType::Artisan,
            Self::Particulier => UserType::Particulier,
        }
    }
}

/// A marketplace account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
    /// Profile photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    /// Free-form presentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Account variant.
    #[serde(flatten)]
    pub kind: UserKind,
    /// Whether the account has been verified.
    pub verified: bool,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, unverified user.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        kind: UserKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            profile_photo: None,
            description: None,
            kind,
            verified: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the account as verified.
    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }

    /// Returns the account type.
    pub fn user_type(&self) -> UserType {
        self.kind.user_type()
    }

    /// Returns true for artisan accounts.
    pub fn is_artisan(&self) -> bool {
        matches!(self.kind, UserKind::Artisan(_))
    }

    /// Returns the artisan details, if any.
    pub fn artisan_profile(&self) -> Option<&ArtisanProfile> {
        match &self.kind {
            UserKind::Artisan(profile) => Some(profile),
            UserKind::Particulier => None,
        }
    }

    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            "marie@example.com",
            "Marie",
            "Martin",
            "+687 987654",
            UserKind::Particulier,
        );

        assert_eq!(user.email, "marie@example.com");
        assert_eq!(user.full_name(), "Marie Martin");
        assert_eq!(user.user_type(), UserType::Particulier);
        assert!(!user.verified);
        assert!(user.artisan_profile().is_none());
    }

    #[test]
    fn test_artisan_serializes_inline() {
        let profile = ArtisanProfile::new("1234567.001", "RC 2020 B 1234")
            .with_specialties([ServiceCategory::Plomberie, ServiceCategory::Electricite]);
        let user = User::new(
            "jean@example.com",
            "Jean",
            "Dupont",
            "+687 123456",
            UserKind::Artisan(profile),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["userType"], "artisan");
        assert_eq!(json["ridetNumber"], "1234567.001");
        assert_eq!(json["firstName"], "Jean");
        assert!(json.get("description").is_none());

        let parsed: User = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, user);
        assert!(parsed.is_artisan());
    }

    #[test]
    fn test_particulier_has_no_artisan_fields() {
        let user = User::new("paul@example.com", "Paul", "Dubois", "+687 456789", UserKind::Particulier);

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["userType"], "particulier");
        assert!(json.get("ridetNumber").is_none());
    }

    #[test]
    fn test_user_type_parse() {
        assert_eq!(UserType::parse("artisan"), Some(UserType::Artisan));
        assert_eq!(UserType::parse("particulier"), Some(UserType::Particulier));
        assert_eq!(UserType::parse("admin"), None);
    }
}
