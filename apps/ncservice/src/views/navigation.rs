//! Sidebar tabs and header.

use entities::{ServiceCategory, User, UserType};

/// A sidebar destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    CreateService,
    MyServices,
    AllServices,
    Category(ServiceCategory),
    Messages,
    Profile,
    Settings,
}

impl Tab {
    /// Identifier typed in the shell.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::CreateService => "create-service",
            Self::MyServices => "my-services",
            Self::AllServices => "all-services",
            Self::Category(category) => category.as_str(),
            Self::Messages => "messages",
            Self::Profile => "profile",
            Self::Settings => "settings",
        }
    }

    /// Parses a tab from its identifier.
    pub fn parse(id: &str) -> Option<Self> {
        let tab = match id {
            "dashboard" => Self::Dashboard,
            "create-service" => Self::CreateService,
            "my-services" => Self::MyServices,
            "all-services" => Self::AllServices,
            "messages" => Self::Messages,
            "profile" => Self::Profile,
            "settings" => Self::Settings,
            other => Self::Category(ServiceCategory::parse(other)?),
        };
        Some(tab)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Tableau de bord",
            Self::CreateService => "Nouvelle demande",
            Self::MyServices => "Mes demandes",
            Self::AllServices => "Tous les services",
            Self::Category(category) => category.label(),
            Self::Messages => "Messages",
            Self::Profile => "Profil",
            Self::Settings => "Paramètres",
        }
    }
}

/// Tabs offered to `user_type`, in display order.
pub fn menu_for(user_type: UserType) -> Vec<Tab> {
    let mut tabs = vec![Tab::Dashboard];
    match user_type {
        UserType::Particulier => {
            tabs.push(Tab::CreateService);
            tabs.push(Tab::MyServices);
        }
        UserType::Artisan => {
            tabs.push(Tab::AllServices);
            tabs.extend(ServiceCategory::ALL.into_iter().map(Tab::Category));
        }
    }
    tabs.extend([Tab::Messages, Tab::Profile, Tab::Settings]);
    tabs
}

/// Returns `requested` if `user_type` may open it, the dashboard otherwise.
pub fn resolve_tab(user_type: UserType, requested: Tab) -> Tab {
    if menu_for(user_type).contains(&requested) {
        requested
    } else {
        Tab::Dashboard
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub tab: Tab,
    pub active: bool,
}

/// Sidebar contents for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub title: &'static str,
    pub items: Vec<NavItem>,
}

impl Sidebar {
    pub fn build(user_type: UserType, active: Tab) -> Self {
        let title = match user_type {
            UserType::Artisan => "Espace Artisan",
            UserType::Particulier => "Espace Particulier",
        };
        let items = menu_for(user_type)
            .into_iter()
            .map(|tab| NavItem {
                tab,
                active: tab == active,
            })
            .collect();
        Self { title, items }
    }
}

/// Top bar: who is signed in and how many messages wait for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub display_name: String,
    pub unread_messages: usize,
}

impl Header {
    pub fn build(user: &User, unread_messages: usize) -> Self {
        Self {
            display_name: user.full_name(),
            unread_messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_ids_round_trip() {
        for tab in menu_for(UserType::Artisan)
            .into_iter()
            .chain(menu_for(UserType::Particulier))
        {
            assert_eq!(Tab::parse(tab.id()), Some(tab));
        }
        assert_eq!(Tab::parse("nowhere"), None);
    }

    #[test]
    fn test_particulier_menu_has_no_categories() {
        let menu = menu_for(UserType::Particulier);
        assert!(menu.contains(&Tab::CreateService));
        assert!(menu.contains(&Tab::MyServices));
        assert!(!menu.contains(&Tab::AllServices));
        assert!(!menu.iter().any(|t| matches!(t, Tab::Category(_))));
    }

    #[test]
    fn test_artisan_menu_has_every_category() {
        let menu = menu_for(UserType::Artisan);
        let categories = menu
            .iter()
            .filter(|t| matches!(t, Tab::Category(_)))
            .count();
        assert_eq!(categories, ServiceCategory::ALL.len());
        assert!(!menu.contains(&Tab::CreateService));
        assert_eq!(menu.first(), Some(&Tab::Dashboard));
        assert_eq!(menu.last(), Some(&Tab::Settings));
    }

    #[test]
    fn test_disallowed_tab_falls_back_to_dashboard() {
        assert_eq!(
            resolve_tab(UserType::Artisan, Tab::CreateService),
            Tab::Dashboard
        );
        assert_eq!(
            resolve_tab(UserType::Particulier, Tab::Category(ServiceCategory::Peinture)),
            Tab::Dashboard
        );
        assert_eq!(
            resolve_tab(UserType::Particulier, Tab::MyServices),
            Tab::MyServices
        );
    }

    #[test]
    fn test_sidebar_marks_active_tab() {
        let sidebar = Sidebar::build(UserType::Particulier, Tab::Messages);
        assert_eq!(sidebar.title, "Espace Particulier");
        let active: Vec<_> = sidebar.items.iter().filter(|i| i.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].tab, Tab::Messages);
    }
}
