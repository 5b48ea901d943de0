//! "Nouvelle demande" form.

use entities::{NewServiceRequest, RequestStatus, ServiceCategory, Urgency};
use uuid::Uuid;

use super::form::{FormResult, positive_amount, required};

/// Field buffers of the request form.
#[derive(Debug, Clone)]
pub struct ServiceRequestForm {
    pub title: String,
    pub description: String,
    pub category: ServiceCategory,
    pub location: String,
    /// Raw text, parsed on submit.
    pub budget: String,
    pub urgency: Urgency,
}

impl Default for ServiceRequestForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: ServiceCategory::Plomberie,
            location: String::new(),
            budget: String::new(),
            urgency: Urgency::Moyenne,
        }
    }
}

impl ServiceRequestForm {
    /// Checks the buffers and builds an open request posted by `client_id`.
    pub fn validate(&self, client_id: Uuid) -> FormResult<NewServiceRequest> {
        Ok(NewServiceRequest {
            title: required("titre", &self.title)?,
            description: required("description", &self.description)?,
            category: self.category,
            client_id,
            location: required("localisation", &self.location)?,
            budget: positive_amount("budget", &self.budget)?,
            urgency: self.urgency,
            status: RequestStatus::Ouvert,
        })
    }
}
