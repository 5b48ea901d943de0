//! Plain-text rendering of the view models.

use std::fmt;

use chrono::{DateTime, Utc};
use entities::ServiceCategory;

use crate::config::AppConfig;
use crate::views::{
    ChatPane, DashboardView, Header, ProfileView, ServiceListView, Sidebar,
};

/// "15 000 XPF"
pub fn format_xpf(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} XPF")
}

fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

fn format_time(at: &DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NC Service | {}", self.display_name)?;
        if self.unread_messages > 0 {
            write!(f, " | {} message(s) non lu(s)", self.unread_messages)?;
        }
        Ok(())
    }
}

impl fmt::Display for Sidebar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for item in &self.items {
            let marker = if item.active { ">" } else { " " };
            write!(f, "\n {marker} {} ({})", item.tab.label(), item.tab.id())?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.greeting)?;
        writeln!(f, "{}", self.subtitle)?;
        writeln!(f)?;
        for card in &self.stats {
            writeln!(f, "  {:<22} {}", card.title, card.value)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.recent_heading)?;
        if self.recent.is_empty() {
            return write!(f, "\n  {}", self.empty_message);
        }
        for (i, service) in self.recent.iter().enumerate() {
            write!(
                f,
                "\n  {}. {} | {} | {} | {} | {}",
                i + 1,
                service.title,
                service.location,
                format_date(&service.created_at),
                format_xpf(service.budget),
                service.urgency
            )?;
            if let Some(count) = service.response_count {
                write!(f, " | {count} réponse(s)")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ServiceListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        write!(f, "{}", self.summary)?;
        if let Some(empty) = self.empty_message {
            return write!(f, "\n  {empty}");
        }
        for (i, item) in self.items.iter().enumerate() {
            write!(
                f,
                "\n\n  {}. {} [{}, {}, {}]",
                i + 1,
                item.title,
                item.category.label(),
                item.urgency,
                item.status
            )?;
            write!(f, "\n     {}", item.description)?;
            write!(
                f,
                "\n     {} | {} | {} | {}",
                item.client_name,
                item.location,
                format_date(&item.created_at),
                format_xpf(item.budget)
            )?;
            write!(f, "\n     {} réponse(s)", item.response_count)?;
            if item.can_respond {
                write!(f, " | respond {} pour proposer vos services", i + 1)?;
            }
            for (r, response) in item.responses.iter().enumerate() {
                write!(
                    f,
                    "\n     {}.{} {} : {} | {} | {} [{}]",
                    i + 1,
                    r + 1,
                    response.artisan_name,
                    response.message,
                    format_xpf(response.proposed_price),
                    response.estimated_duration,
                    response.status
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ChatPane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = match self {
            Self::NoSelection => {
                return write!(
                    f,
                    "Sélectionnez une conversation\n  chat <n> depuis une liste de demandes"
                );
            }
            Self::Conversation(view) => view,
        };
        write!(f, "Conversation : {}", view.title)?;
        if let Some(name) = &view.counterpart {
            write!(f, " avec {name}")?;
        }
        if view.lines.is_empty() {
            return write!(f, "\n  Aucun message. Commencez la conversation avec say <texte>");
        }
        for line in &view.lines {
            let arrow = if line.outgoing { ">" } else { "<" };
            write!(
                f,
                "\n  {} {} {}",
                format_time(&line.timestamp),
                arrow,
                line.content
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mon profil")?;
        writeln!(f, "  Nom          {}", self.full_name)?;
        writeln!(f, "  Email        {}", self.email)?;
        writeln!(f, "  Téléphone    {}", self.phone)?;
        writeln!(f, "  Type         {}", self.user_type)?;
        writeln!(f, "  Vérifié      {}", if self.verified { "oui" } else { "non" })?;
        if let Some(description) = &self.description {
            writeln!(f, "  Description  {description}")?;
        }
        if let Some(artisan) = &self.artisan {
            let specialties: Vec<&str> = artisan.specialties.iter().map(|c| c.label()).collect();
            writeln!(f, "  RIDET        {}", artisan.ridet_number)?;
            writeln!(f, "  RC           {}", artisan.rc_number)?;
            writeln!(f, "  Spécialités  {}", specialties.join(", "))?;
            writeln!(
                f,
                "  Note         {:.1} ({} travaux terminés)",
                artisan.rating, artisan.completed_jobs
            )?;
        }
        writeln!(f, "  Membre depuis {}", format_date(&self.member_since))?;
        f.write_str("profile key=value… pour modifier, delete-account pour supprimer le compte")
    }
}

pub fn welcome() -> &'static str {
    "NC Service\n\
     La plateforme qui met en relation particuliers et artisans en Nouvelle-Calédonie.\n\
     Connectez-vous avec login <email> <mot de passe> ou créez un compte avec register."
}

pub fn request_form_help() -> String {
    let categories: Vec<&str> = ServiceCategory::ALL.iter().map(|c| c.as_str()).collect();
    format!(
        "Nouvelle demande de service\n  \
         post title=… description=… category=… location=… budget=… urgency=…\n  \
         catégories : {}\n  \
         urgence : basse, moyenne (défaut), haute",
        categories.join(", ")
    )
}

pub fn settings(config: &AppConfig) -> String {
    let session = if config.in_memory_session {
        "mémoire".to_string()
    } else {
        config.session_dir.display().to_string()
    };
    format!(
        "Paramètres\n  \
         Session          {session}\n  \
         Données de démo  {}\n  \
         Latence (ms)     connexion {}, inscription {}, profil {}\n  \
         Journalisation   {}",
        if config.seed_sample_data { "oui" } else { "non" },
        config.login_latency_ms,
        config.register_latency_ms,
        config.profile_latency_ms,
        config.log_level
    )
}
