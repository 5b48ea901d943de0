//! Request listings and the artisan response form.

use chrono::{DateTime, Utc};
use entities::{
    NewServiceResponse, RequestStatus, ResponseStatus, ServiceCategory, ServiceRequest, Urgency,
    User,
};
use uuid::Uuid;

use super::form::{FormError, FormResult, positive_amount, required};
use super::{Directory, display_name};

/// Which requests a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every open request.
    All,
    /// Open requests of one trade.
    Category(ServiceCategory),
    /// The viewer's own requests, whatever their status.
    Mine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLine {
    pub id: Uuid,
    pub artisan_name: String,
    pub message: String,
    pub proposed_price: i64,
    pub estimated_duration: String,
    pub status: ResponseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceListItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ServiceCategory,
    pub urgency: Urgency,
    pub status: RequestStatus,
    pub client_name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub budget: i64,
    pub response_count: usize,
    pub can_respond: bool,
    /// Filled for [`ListScope::Mine`] so the client can decide on offers.
    pub responses: Vec<ResponseLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceListView {
    pub heading: String,
    pub summary: String,
    pub items: Vec<ServiceListItem>,
    pub empty_message: Option<&'static str>,
}

impl ServiceListView {
    /// Builds a listing of `requests`, already selected for `scope`.
    pub fn build(
        scope: ListScope,
        requests: &[ServiceRequest],
        directory: &Directory,
        viewer: &User,
    ) -> Self {
        let heading = match scope {
            ListScope::All => "Tous les services disponibles".to_string(),
            ListScope::Category(category) => format!("Services - {}", category.label()),
            ListScope::Mine => "Mes demandes".to_string(),
        };
        let summary = match (scope, requests.len()) {
            (ListScope::Mine, 1) => "1 demande".to_string(),
            (ListScope::Mine, n) => format!("{n} demandes"),
            (_, 1) => "1 service disponible".to_string(),
            (_, n) => format!("{n} services disponibles"),
        };
        let empty_message = requests.is_empty().then_some(match scope {
            ListScope::Mine => "Vous n'avez encore publié aucune demande",
            _ => "Aucun service disponible dans cette catégorie pour le moment",
        });

        let items = requests
            .iter()
            .map(|request| ServiceListItem {
                id: request.id,
                title: request.title.clone(),
                description: request.description.clone(),
                category: request.category,
                urgency: request.urgency,
                status: request.status,
                client_name: display_name(directory, request.client_id),
                location: request.location.clone(),
                created_at: request.created_at,
                budget: request.budget,
                response_count: request.responses.len(),
                can_respond: viewer.is_artisan() && request.is_open(),
                responses: if scope == ListScope::Mine {
                    request
                        .responses
                        .iter()
                        .map(|response| ResponseLine {
                            id: response.id,
                            artisan_name: display_name(directory, response.artisan_id),
                            message: response.message.clone(),
                            proposed_price: response.proposed_price,
                            estimated_duration: response.estimated_duration.clone(),
                            status: response.status,
                        })
                        .collect()
                } else {
                    Vec::new()
                },
            })
            .collect();

        Self {
            heading,
            summary,
            items,
            empty_message,
        }
    }
}

/// An artisan's offer on a request.
#[derive(Debug, Clone, Default)]
pub struct ResponseForm {
    pub message: String,
    /// Raw text, parsed on submit.
    pub proposed_price: String,
    pub estimated_duration: String,
}

impl ResponseForm {
    /// Checks the buffers and builds a response draft from `artisan`.
    pub fn validate(&self, artisan: &User) -> FormResult<NewServiceResponse> {
        if !artisan.is_artisan() {
            return Err(FormError::ArtisanOnly);
        }
        Ok(NewServiceResponse {
            artisan_id: artisan.id,
            message: required("message", &self.message)?,
            proposed_price: positive_amount("prix proposé", &self.proposed_price)?,
            estimated_duration: required("durée estimée", &self.estimated_duration)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use entities::{ArtisanProfile, NewServiceRequest, UserKind};

    use super::*;

    fn artisan() -> User {
        User::new(
            "jean@example.nc",
            "Jean",
            "Dupont",
            "+687 123456",
            UserKind::Artisan(ArtisanProfile::new("R", "C")),
        )
    }

    fn particulier() -> User {
        User::new("marie@example.nc", "Marie", "Martin", "+687 1", UserKind::Particulier)
    }

    fn request(client_id: Uuid) -> ServiceRequest {
        NewServiceRequest {
            title: "Réparation robinet".to_string(),
            description: "Fuite".to_string(),
            category: ServiceCategory::Plomberie,
            client_id,
            location: "Nouméa Centre".to_string(),
            budget: 15000,
            urgency: Urgency::Haute,
            status: RequestStatus::Ouvert,
        }
        .into_request()
    }

    #[test]
    fn test_artisan_can_respond_to_open_requests() {
        let marie = particulier();
        let jean = artisan();
        let directory = Directory::from([(marie.id, marie.clone())]);
        let mut closed = request(marie.id);
        closed.status = RequestStatus::EnCours;
        let requests = vec![request(marie.id), closed];

        let view = ServiceListView::build(ListScope::All, &requests, &directory, &jean);
        assert_eq!(view.summary, "2 services disponibles");
        assert_eq!(view.items[0].client_name, "Marie Martin");
        assert!(view.items[0].can_respond);
        assert!(!view.items[1].can_respond);
        assert!(view.items[0].responses.is_empty());
        assert!(view.empty_message.is_none());

        let view = ServiceListView::build(ListScope::All, &requests, &directory, &marie);
        assert!(view.items.iter().all(|i| !i.can_respond));
    }

    #[test]
    fn test_category_heading_and_empty_state() {
        let jean = artisan();
        let view = ServiceListView::build(
            ListScope::Category(ServiceCategory::Electricite),
            &[],
            &Directory::new(),
            &jean,
        );
        assert_eq!(view.heading, "Services - Électricité");
        assert_eq!(view.summary, "0 services disponibles");
        assert!(view.empty_message.is_some());
    }

    #[test]
    fn test_mine_lists_responses() {
        let marie = particulier();
        let jean = artisan();
        let directory = Directory::from([(marie.id, marie.clone()), (jean.id, jean.clone())]);
        let mut own = request(marie.id);
        let draft = ResponseForm {
            message: "Je passe demain".to_string(),
            proposed_price: "14000".to_string(),
            estimated_duration: "2h".to_string(),
        }
        .validate(&jean)
        .unwrap();
        own.responses.push(draft.into_response(own.id));

        let view = ServiceListView::build(ListScope::Mine, &[own], &directory, &marie);
        assert_eq!(view.summary, "1 demande");
        let responses = &view.items[0].responses;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].artisan_name, "Jean Dupont");
        assert_eq!(responses[0].status, ResponseStatus::EnAttente);
    }

    #[test]
    fn test_unknown_client_placeholder() {
        let jean = artisan();
        let view = ServiceListView::build(
            ListScope::All,
            &[request(Uuid::new_v4())],
            &Directory::new(),
            &jean,
        );
        assert_eq!(view.items[0].client_name, "Utilisateur inconnu");
    }

    #[test]
    fn test_response_form_validation() {
        let jean = artisan();
        let mut form = ResponseForm {
            message: "Disponible".to_string(),
            proposed_price: "abc".to_string(),
            estimated_duration: "1 jour".to_string(),
        };
        assert_eq!(
            form.validate(&jean).unwrap_err(),
            FormError::InvalidAmount("prix proposé")
        );

        form.proposed_price = "9000".to_string();
        let draft = form.validate(&jean).unwrap();
        assert_eq!(draft.artisan_id, jean.id);
        assert_eq!(draft.proposed_price, 9000);

        assert_eq!(
            form.validate(&particulier()).unwrap_err(),
            FormError::ArtisanOnly
        );
    }
}
