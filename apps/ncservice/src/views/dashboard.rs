//! Landing page: greeting, activity counters and recent requests.

use chrono::{DateTime, Utc};
use entities::{RequestStatus, ResponseStatus, ServiceRequest, Urgency, User, UserType};
use uuid::Uuid;

const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

impl StatCard {
    fn count(title: &'static str, value: usize) -> Self {
        Self {
            title,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentService {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub budget: i64,
    pub urgency: Urgency,
    /// Shown to artisans only.
    pub response_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub greeting: String,
    pub subtitle: &'static str,
    pub stats: Vec<StatCard>,
    pub recent_heading: &'static str,
    pub recent: Vec<RecentService>,
    pub empty_message: &'static str,
}

impl DashboardView {
    /// Builds the dashboard of `viewer` from every stored request.
    pub fn build(viewer: &User, requests: &[ServiceRequest]) -> Self {
        match viewer.user_type() {
            UserType::Artisan => Self::for_artisan(viewer, requests),
            UserType::Particulier => Self::for_particulier(viewer, requests),
        }
    }

    fn for_artisan(viewer: &User, requests: &[ServiceRequest]) -> Self {
        let open: Vec<&ServiceRequest> = requests.iter().filter(|r| r.is_open()).collect();
        let sent: Vec<ResponseStatus> = requests
            .iter()
            .flat_map(|r| &r.responses)
            .filter(|resp| resp.artisan_id == viewer.id)
            .map(|resp| resp.status)
            .collect();
        let accepted = sent.iter().filter(|s| **s == ResponseStatus::Accepte).count();
        let pending = sent.iter().filter(|s| **s == ResponseStatus::EnAttente).count();

        Self {
            greeting: format!("Bonjour, {} !", viewer.first_name),
            subtitle: "Découvrez les nouvelles opportunités de travail",
            stats: vec![
                StatCard::count("Services disponibles", open.len()),
                StatCard::count("Réponses envoyées", sent.len()),
                StatCard {
                    title: "Taux de réussite",
                    value: format!("{}%", success_rate(accepted, sent.len())),
                },
                StatCard::count("En attente", pending),
            ],
            recent_heading: "Services récents",
            recent: recent(open.into_iter(), true),
            empty_message: "Aucun service disponible pour le moment",
        }
    }

    fn for_particulier(viewer: &User, requests: &[ServiceRequest]) -> Self {
        let mine: Vec<&ServiceRequest> = requests
            .iter()
            .filter(|r| r.client_id == viewer.id)
            .collect();
        let received = mine.iter().map(|r| r.responses.len()).sum();
        let completed = mine
            .iter()
            .filter(|r| r.status == RequestStatus::Termine)
            .count();
        let pending = mine
            .iter()
            .flat_map(|r| &r.responses)
            .filter(|resp| resp.status == ResponseStatus::EnAttente)
            .count();

        Self {
            greeting: format!("Bonjour, {} !", viewer.first_name),
            subtitle: "Gérez vos demandes de services",
            stats: vec![
                StatCard::count("Mes demandes", mine.len()),
                StatCard::count("Réponses reçues", received),
                StatCard::count("Services terminés", completed),
                StatCard::count("En attente", pending),
            ],
            recent_heading: "Mes demandes récentes",
            recent: recent(mine.into_iter(), false),
            empty_message: "Aucune demande pour le moment",
        }
    }
}

/// Accepted share of `sent`, rounded to the nearest percent.
fn success_rate(accepted: usize, sent: usize) -> usize {
    if sent == 0 {
        return 0;
    }
    (accepted * 100 + sent / 2) / sent
}

fn recent<'a>(
    requests: impl Iterator<Item = &'a ServiceRequest>,
    with_response_count: bool,
) -> Vec<RecentService> {
    requests
        .take(RECENT_LIMIT)
        .map(|r| RecentService {
            id: r.id,
            title: r.title.clone(),
            location: r.location.clone(),
            created_at: r.created_at,
            budget: r.budget,
            urgency: r.urgency,
            response_count: with_response_count.then_some(r.responses.len()),
        })
        .collect()
}
