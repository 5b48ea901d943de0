//! Interactive terminal front end.
//!
//! One command per line. Every command re-renders the current tab, and the
//! numbered entries of the last rendered listing become the targets of
//! `respond`, `chat`, `decide` and `status`.

mod command;
mod render;

pub use command::{Command, CommandError, Fields, HELP, tokenize};
pub use render::format_xpf;

use auth::SessionStorage;
use entities::{RequestStatus, ResponseStatus, ServiceCategory, ServiceRequest, Urgency, UserType};
use market_store::{MarketStore, ServiceFilter};
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{
    ChatPane, DashboardView, DeletionPrompt, FormError, Header, ListScope, LoginForm,
    MessageForm, ProfileForm, ProfileView, RegisterForm, ResponseForm, ServiceListView,
    ServiceRequestForm, Sidebar, Tab, resolve_tab,
};

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and read the next line.
    Continue(String),
    Quit,
}

pub struct Shell<S: SessionStorage, M: MarketStore> {
    state: AppState<S, M>,
    tab: Tab,
    /// Request IDs of the last rendered listing, in display order.
    listing: Vec<Uuid>,
    deletion: DeletionPrompt,
}

impl<S: SessionStorage, M: MarketStore> Shell<S, M> {
    pub fn new(state: AppState<S, M>) -> Self {
        Self {
            state,
            tab: Tab::Dashboard,
            listing: Vec::new(),
            deletion: DeletionPrompt::default(),
        }
    }

    pub fn state(&self) -> &AppState<S, M> {
        &self.state
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Restores the previous session and renders the first screen.
    pub async fn start(&mut self) -> AppResult<String> {
        self.state.restore_session().await?;
        self.render().await
    }

    /// Handles one input line. Errors are turned into messages.
    pub async fn execute(&mut self, line: &str) -> Outcome {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Continue(String::new()),
            Err(e) => return Outcome::Continue(format!("Erreur : {e}")),
        };
        debug!(command = command.name(), "Executing command");

        match self.dispatch(command).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_user_facing() => Outcome::Continue(format!("Erreur : {e}")),
            Err(e) => {
                error!(error = %e, "Command failed");
                Outcome::Continue(format!("Une erreur est survenue : {e}"))
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> AppResult<Outcome> {
        if self.deletion.is_pending() {
            match command {
                Command::Confirm(true) => return self.confirm_deletion().await,
                Command::Confirm(false) => {
                    self.deletion.cancel();
                    return Ok(Outcome::Continue("Suppression annulée".to_string()));
                }
                _ => self.deletion.cancel(),
            }
        }

        let text = match command {
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Confirm(_) => "Rien à confirmer".to_string(),
            Command::Login { email, password } => {
                let (email, password) = LoginForm { email, password }.validate()?;
                self.state.login(&email, &password).await?;
                self.open(Tab::Dashboard).await?
            }
            Command::Register(fields) => {
                let data = register_form(&fields)?.validate()?;
                self.state.register(data).await?;
                self.open(Tab::Dashboard).await?
            }
            Command::Logout => {
                self.state.logout().await?;
                self.tab = Tab::Dashboard;
                self.listing.clear();
                let welcome = self.render().await?;
                format!("Déconnecté\n\n{welcome}")
            }
            Command::WhoAmI => {
                let auth = self.state.auth.state().await;
                match auth.user {
                    Some(user) => format!(
                        "{} <{}> ({}) {}",
                        user.full_name(),
                        user.email,
                        user.user_type(),
                        user.id
                    ),
                    None => "Non connecté".to_string(),
                }
            }
            Command::Tab(id) => {
                let tab = Tab::parse(&id).unwrap_or(Tab::Dashboard);
                self.open(tab).await?
            }
            Command::Show => self.render().await?,
            Command::Post(fields) => self.post(&fields).await?,
            Command::Respond { index, fields } => self.respond(index, &fields).await?,
            Command::Decide {
                index,
                response,
                decision,
            } => self.decide(index, response, &decision).await?,
            Command::Status { index, status } => self.change_status(index, &status).await?,
            Command::Chat(index) => {
                let request = self.listed_request(index).await?;
                self.state.market.set_active_chat(Some(request.id)).await?;
                self.open(Tab::Messages).await?
            }
            Command::Say(content) => self.say(content).await?,
            Command::Profile(fields) => self.edit_profile(&fields).await?,
            Command::DeleteAccount => {
                self.state.require_user().await?;
                self.deletion = self.deletion.request();
                self.deletion.message().unwrap_or_default().to_string()
            }
        };
        Ok(Outcome::Continue(text))
    }

    async fn open(&mut self, tab: Tab) -> AppResult<String> {
        self.tab = tab;
        self.render().await
    }

    /// Renders the header, sidebar and current tab.
    async fn render(&mut self) -> AppResult<String> {
        let Some(user) = self.state.auth.current_user().await else {
            self.listing.clear();
            return Ok(render::welcome().to_string());
        };
        self.tab = resolve_tab(user.user_type(), self.tab);

        let unread = self.state.market.unread_count(user.id).await?;
        let mut out = format!(
            "{}\n{}\n\n",
            Header::build(&user, unread),
            Sidebar::build(user.user_type(), self.tab)
        );

        let body = match self.tab {
            Tab::Dashboard => {
                let (requests, _) = self
                    .state
                    .market
                    .list_service_requests(ServiceFilter::default())
                    .await?;
                let view = DashboardView::build(&user, &requests);
                self.listing = view.recent.iter().map(|r| r.id).collect();
                view.to_string()
            }
            Tab::CreateService => render::request_form_help(),
            Tab::MyServices => {
                let requests = self.state.market.my_service_requests(user.id).await?;
                self.list(ListScope::Mine, &requests, &user).await?
            }
            Tab::AllServices => {
                let (requests, _) = self
                    .state
                    .market
                    .list_service_requests(ServiceFilter::open())
                    .await?;
                self.list(ListScope::All, &requests, &user).await?
            }
            Tab::Category(category) => {
                let requests = self.state.market.services_by_category(category).await?;
                self.list(ListScope::Category(category), &requests, &user)
                    .await?
            }
            Tab::Messages => self.chat_pane(&user).await?.to_string(),
            Tab::Profile => ProfileView::build(&user).to_string(),
            Tab::Settings => render::settings(&self.state.config),
        };
        out.push_str(&body);
        Ok(out)
    }

    async fn list(
        &mut self,
        scope: ListScope,
        requests: &[ServiceRequest],
        user: &entities::User,
    ) -> AppResult<String> {
        let directory = self.state.directory_for(requests).await?;
        self.listing = requests.iter().map(|r| r.id).collect();
        Ok(ServiceListView::build(scope, requests, &directory, user).to_string())
    }

    async fn chat_pane(&self, user: &entities::User) -> AppResult<ChatPane> {
        let market = &self.state.market;
        let active = match market.active_chat().await? {
            Some(id) => market.get_service_request(id).await?,
            None => None,
        };
        let Some(request) = active else {
            return Ok(ChatPane::NoSelection);
        };

        market.mark_conversation_read(request.id, user.id).await?;
        let messages = market.conversation(request.id).await?;
        let mut directory = self.state.directory_for(std::slice::from_ref(&request)).await?;
        for message in &messages {
            if directory.contains_key(&message.sender_id) {
                continue;
            }
            if let Some(sender) = market.get_user(message.sender_id).await? {
                directory.insert(sender.id, sender);
            }
        }
        Ok(ChatPane::build(Some(&request), &messages, user, &directory))
    }

    /// Request at 0-based `index` of the last listing.
    async fn listed_request(&self, index: usize) -> AppResult<ServiceRequest> {
        let not_listed = || AppError::from(FormError::NotListed(index + 1));
        let id = self.listing.get(index).copied().ok_or_else(not_listed)?;
        self.state
            .market
            .get_service_request(id)
            .await?
            .ok_or_else(not_listed)
    }

    async fn post(&mut self, fields: &Fields) -> AppResult<String> {
        let user = self.state.require_user().await?;
        if user.user_type() != UserType::Particulier {
            return Err(AppError::PermissionDenied(
                "seuls les particuliers publient des demandes".to_string(),
            ));
        }
        let draft = request_form(fields)?.validate(user.id)?;
        let request = self.state.market.add_service_request(draft).await?;
        let listing = self.open(Tab::MyServices).await?;
        Ok(format!(
            "Demande de service « {} » créée avec succès !\n\n{listing}",
            request.title
        ))
    }

    async fn respond(&mut self, index: usize, fields: &Fields) -> AppResult<String> {
        let user = self.state.require_user().await?;
        let request = self.listed_request(index).await?;
        let draft = ResponseForm {
            message: fields.text("message"),
            proposed_price: fields.text("price"),
            estimated_duration: fields.text("duration"),
        }
        .validate(&user)?;
        if !request.is_open() {
            return Err(AppError::PermissionDenied(
                "cette demande n'accepte plus de réponses".to_string(),
            ));
        }

        if self
            .state
            .market
            .respond_to_service(request.id, draft)
            .await?
            .is_none()
        {
            return Ok("Demande introuvable, réponse ignorée".to_string());
        }
        let listing = self.render().await?;
        Ok(format!(
            "Votre réponse à « {} » a été envoyée !\n\n{listing}",
            request.title
        ))
    }

    async fn decide(&mut self, index: usize, response: usize, decision: &str) -> AppResult<String> {
        let request = self.owned_request(index).await?;
        let status = ResponseStatus::parse(decision)
            .filter(|s| *s != ResponseStatus::EnAttente)
            .ok_or_else(|| FormError::UnknownChoice {
                field: "décision",
                value: decision.to_string(),
            })?;
        let target = request
            .responses
            .get(response)
            .ok_or(FormError::NoSuchResponse(response + 1))?;

        self.state
            .market
            .update_response_status(request.id, target.id, status)
            .await?;
        let listing = self.render().await?;
        Ok(format!("Réponse {status}\n\n{listing}"))
    }

    async fn change_status(&mut self, index: usize, status: &str) -> AppResult<String> {
        let request = self.owned_request(index).await?;
        let status = RequestStatus::parse(status).ok_or_else(|| FormError::UnknownChoice {
            field: "statut",
            value: status.to_string(),
        })?;
        self.state
            .market
            .update_request_status(request.id, status)
            .await?;
        let listing = self.render().await?;
        Ok(format!("Demande « {} » : {status}\n\n{listing}", request.title))
    }

    /// Listed request that the session user posted.
    async fn owned_request(&self, index: usize) -> AppResult<ServiceRequest> {
        let user = self.state.require_user().await?;
        let request = self.listed_request(index).await?;
        if request.client_id != user.id {
            return Err(AppError::PermissionDenied(
                "cette demande ne vous appartient pas".to_string(),
            ));
        }
        Ok(request)
    }

    async fn say(&mut self, content: String) -> AppResult<String> {
        let user = self.state.require_user().await?;
        let market = &self.state.market;
        let request = match market.active_chat().await? {
            Some(id) => market.get_service_request(id).await?,
            None => None,
        };
        let Some(request) = request else {
            return Ok(ChatPane::NoSelection.to_string());
        };

        let conversation = market.conversation(request.id).await?;
        let form = MessageForm { content };
        if let Some(draft) = form.validate(&user, &request, &conversation)? {
            market.send_message(draft).await?;
        }
        self.open(Tab::Messages).await
    }

    async fn edit_profile(&mut self, fields: &Fields) -> AppResult<String> {
        let user = self.state.require_user().await?;
        let mut form = ProfileForm::from_user(&user);
        if let Some(value) = fields.get("first_name") {
            form.first_name = value.to_string();
        }
        if let Some(value) = fields.get("last_name") {
            form.last_name = value.to_string();
        }
        if let Some(value) = fields.get("phone") {
            form.phone = value.to_string();
        }
        if let Some(value) = fields.get("description") {
            form.description = value.to_string();
        }

        let update = form.changes(&user);
        if update.is_empty() {
            return self.open(Tab::Profile).await;
        }
        self.state.update_profile(update).await?;
        let profile = self.open(Tab::Profile).await?;
        Ok(format!("Profil mis à jour avec succès !\n\n{profile}"))
    }

    async fn confirm_deletion(&mut self) -> AppResult<Outcome> {
        if !self.deletion.confirm() {
            let question = self.deletion.message().unwrap_or_default();
            return Ok(Outcome::Continue(question.to_string()));
        }
        self.state.delete_account().await?;
        self.tab = Tab::Dashboard;
        self.listing.clear();
        let welcome = self.render().await?;
        Ok(Outcome::Continue(format!("Compte supprimé\n\n{welcome}")))
    }
}

fn register_form(fields: &Fields) -> Result<RegisterForm, FormError> {
    let user_type = match fields.get("type") {
        None => UserType::Particulier,
        Some(value) => UserType::parse(value).ok_or_else(|| FormError::UnknownChoice {
            field: "type",
            value: value.to_string(),
        })?,
    };
    let mut form = RegisterForm {
        email: fields.text("email"),
        password: fields.text("password"),
        confirm_password: fields.text("confirm"),
        first_name: fields.text("first_name"),
        last_name: fields.text("last_name"),
        phone: fields.text("phone"),
        user_type,
        ridet_number: fields.text("ridet"),
        rc_number: fields.text("rc"),
        specialties: Vec::new(),
    };
    for name in fields
        .get("specialties")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let category = ServiceCategory::parse(name).ok_or_else(|| FormError::UnknownChoice {
            field: "specialties",
            value: name.to_string(),
        })?;
        if !form.specialties.contains(&category) {
            form.toggle_specialty(category);
        }
    }
    Ok(form)
}

fn request_form(fields: &Fields) -> Result<ServiceRequestForm, FormError> {
    let mut form = ServiceRequestForm {
        title: fields.text("title"),
        description: fields.text("description"),
        location: fields.text("location"),
        budget: fields.text("budget"),
        ..Default::default()
    };
    if let Some(value) = fields.get("category") {
        form.category = ServiceCategory::parse(value).ok_or_else(|| FormError::UnknownChoice {
            field: "category",
            value: value.to_string(),
        })?;
    }
    if let Some(value) = fields.get("urgency") {
        form.urgency = Urgency::parse(value).ok_or_else(|| FormError::UnknownChoice {
            field: "urgency",
            value: value.to_string(),
        })?;
    }
    Ok(form)
}
