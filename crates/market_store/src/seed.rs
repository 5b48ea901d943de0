//! Demo marketplace content.

use entities::{
    NewServiceRequest, RequestStatus, ServiceCategory, ServiceRequest, Urgency, User, UserKind,
};

/// Users and requests used to pre-fill a store.
#[derive(Debug, Clone, Default)]
pub struct Marketplace {
    pub users: Vec<User>,
    pub service_requests: Vec<ServiceRequest>,
}

/// Two open requests from two verified particuliers.
pub fn sample_marketplace() -> Marketplace {
    let marie = User::new(
        "marie@example.com",
        "Marie",
        "Martin",
        "+687 987654",
        UserKind::Particulier,
    )
    .verified();
    let paul = User::new(
        "paul@example.com",
        "Paul",
        "Dubois",
        "+687 456789",
        UserKind::Particulier,
    )
    .verified();

    let service_requests = vec![
        NewServiceRequest {
            title: "Réparation robinet cuisine".to_string(),
            description: "Mon robinet de cuisine fuit depuis plusieurs jours. \
                          Il faut le réparer ou le remplacer."
                .to_string(),
            category: ServiceCategory::Plomberie,
            client_id: marie.id,
            location: "Nouméa Centre".to_string(),
            budget: 15000,
            urgency: Urgency::Haute,
            status: RequestStatus::Ouvert,
        }
        .into_request(),
        NewServiceRequest {
            title: "Entretien jardin".to_string(),
            description: "Besoin de tailler les haies et tondre la pelouse. \
                          Jardin de taille moyenne."
                .to_string(),
            category: ServiceCategory::Jardinage,
            client_id: paul.id,
            location: "Dumbéa".to_string(),
            budget: 8000,
            urgency: Urgency::Moyenne,
            status: RequestStatus::Ouvert,
        }
        .into_request(),
    ];

    Marketplace {
        users: vec![marie, paul],
        service_requests,
    }
}
