//! Service request and response entity definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trade a service request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Jardinage,
    Plomberie,
    Menuiserie,
    Electricite,
    Peinture,
    Nettoyage,
}

impl ServiceCategory {
    /// Every category, in menu order.
    pub const ALL: [ServiceCategory; 6] = [
        Self::Plomberie,
        Self::Electricite,
        Self::Jardinage,
        Self::Menuiserie,
        Self::Peinture,
        Self::Nettoyage,
    ];

    /// Converts the category to its identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jardinage => "jardinage",
            Self::Plomberie => "plomberie",
            Self::Menuiserie => "menuiserie",
            Self::Electricite => "electricite",
            Self::Peinture => "peinture",
            Self::Nettoyage => "nettoyage",
        }
    }

    /// Parses a category from its identifier.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Jardinage => "Jardinage",
            Self::Plomberie => "Plomberie",
            Self::Menuiserie => "Menuiserie",
            Self::Electricite => "Électricité",
            Self::Peinture => "Peinture",
            Self::Nettoyage => "Nettoyage",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How soon the client needs the job done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Basse,
    #[default]
    Moyenne,
    Haute,
}

impl Urgency {
    /// Converts the urgency to its identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basse => "basse",
            Self::Moyenne => "moyenne",
            Self::Haute => "haute",
        }
    }

    /// Parses an urgency from its identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basse" => Some(Self::Basse),
            "moyenne" => Some(Self::Moyenne),
            "haute" => Some(Self::Haute),
            _ => None,
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Accepting responses.
    #[default]
    Ouvert,
    /// An artisan has been retained.
    EnCours,
    /// Job finished.
    Termine,
    /// Withdrawn by the client.
    Annule,
}

impl RequestStatus {
    /// Converts the status to its identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ouvert => "ouvert",
            Self::EnCours => "en_cours",
            Self::Termine => "termine",
            Self::Annule => "annule",
        }
    }

    /// Parses a status from its identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ouvert" => Some(Self::Ouvert),
            "en_cours" => Some(Self::EnCours),
            "termine" => Some(Self::Termine),
            "annule" => Some(Self::Annule),
            _ => None,
        }
    }

    /// Returns true if a request may move from `self` to `next`.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Ouvert, Self::EnCours)
                | (Self::Ouvert, Self::Annule)
                | (Self::EnCours, Self::Termine)
                | (Self::EnCours, Self::Annule)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an artisan's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    #[default]
    EnAttente,
    Accepte,
    Refuse,
}

impl ResponseStatus {
    /// Converts the status to its identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnAttente => "en_attente",
            Self::Accepte => "accepte",
            Self::Refuse => "refuse",
        }
    }

    /// Parses a status from its identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "en_attente" => Some(Self::EnAttente),
            "accepte" => Some(Self::Accepte),
            "refuse" => Some(Self::Refuse),
            _ => None,
        }
    }

    /// Only pending responses can be decided.
    pub fn can_transition_to(&self, next: ResponseStatus) -> bool {
        matches!(
            (self, next),
            (Self::EnAttente, Self::Accepte) | (Self::EnAttente, Self::Refuse)
        )
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An artisan's bid on a service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    /// Unique identifier.
    pub id: Uuid,
    /// Artisan making the offer.
    pub artisan_id: Uuid,
    /// Request this response belongs to.
    pub service_request_id: Uuid,
    /// Message to the client.
    pub message: String,
    /// Proposed price in XPF.
    pub proposed_price: i64,
    /// Free-text duration estimate.
    pub estimated_duration: String,
    /// Current status.
    pub status: ResponseStatus,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied part of a [`ServiceResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceResponse {
    pub artisan_id: Uuid,
    pub message: String,
    pub proposed_price: i64,
    pub estimated_duration: String,
}

impl NewServiceResponse {
    /// Turns the draft into a pending response on `service_request_id`.
    pub fn into_response(self, service_request_id: Uuid) -> ServiceResponse {
        ServiceResponse {
            id: Uuid::new_v4(),
            artisan_id: self.artisan_id,
            service_request_id,
            message: self.message,
            proposed_price: self.proposed_price,
            estimated_duration: self.estimated_duration,
            status: ResponseStatus::EnAttente,
            created_at: Utc::now(),
        }
    }
}

/// A job posted by a particulier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Trade.
    pub category: ServiceCategory,
    /// Posting client.
    pub client_id: Uuid,
    /// Free-text location.
    pub location: String,
    /// Budget in XPF.
    pub budget: i64,
    /// Urgency.
    pub urgency: Urgency,
    /// Current status.
    pub status: RequestStatus,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// Responses in arrival order.
    pub responses: Vec<ServiceResponse>,
}

impl ServiceRequest {
    /// Returns true while the request accepts responses.
    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Ouvert
    }

    /// Looks up one of this request's responses.
    pub fn response(&self, response_id: Uuid) -> Option<&ServiceResponse> {
        self.responses.iter().find(|r| r.id == response_id)
    }
}

/// Caller-supplied part of a [`ServiceRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceRequest {
    pub title: String,
    pub description: String,
    pub category: ServiceCategory,
    pub client_id: Uuid,
    pub location: String,
    pub budget: i64,
    pub urgency: Urgency,
    #[serde(default)]
    pub status: RequestStatus,
}

impl NewServiceRequest {
    /// Assigns an id and creation time; the request starts with no responses.
    pub fn into_request(self) -> ServiceRequest {
        ServiceRequest {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            category: self.category,
            client_id: self.client_id,
            location: self.location,
            budget: self.budget,
            urgency: self.urgency,
            status: self.status,
            created_at: Utc::now(),
            responses: Vec::new(),
        }
    }
}
