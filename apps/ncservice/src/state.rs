//! Application state.

use auth::{AuthState, AuthStore, ProfileUpdate, RegisterData, SessionStorage};
use entities::{ServiceRequest, User};
use market_store::MarketStore;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::views::Directory;

/// Everything the shell works on: configuration, session and marketplace.
///
/// Session changes are mirrored into the market store's user directory so
/// the session owner's name shows up next to what they post.
pub struct AppState<S: SessionStorage, M: MarketStore> {
    /// Application configuration.
    pub config: AppConfig,
    /// Session store.
    pub auth: AuthStore<S>,
    /// Marketplace store.
    pub market: M,
}

impl<S: SessionStorage, M: MarketStore> AppState<S, M> {
    /// Creates new application state. The session starts in `loading`.
    pub fn new(config: AppConfig, storage: S, market: M) -> Self {
        let auth = AuthStore::new(storage, config.latency());
        Self {
            config,
            auth,
            market,
        }
    }

    /// Resolves the session left by a previous run.
    pub async fn restore_session(&self) -> AppResult<AuthState> {
        let state = self.auth.restore().await?;
        self.sync_directory(&state).await?;
        Ok(state)
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthState> {
        let state = self.auth.login(email, password).await?;
        self.sync_directory(&state).await?;
        Ok(state)
    }

    pub async fn register(&self, data: RegisterData) -> AppResult<AuthState> {
        let state = self.auth.register(data).await?;
        self.sync_directory(&state).await?;
        Ok(state)
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> AppResult<AuthState> {
        let state = self.auth.update_profile(update).await?;
        self.sync_directory(&state).await?;
        Ok(state)
    }

    /// Ends the session and closes any open conversation.
    pub async fn logout(&self) -> AppResult<AuthState> {
        let state = self.auth.logout().await?;
        self.market.set_active_chat(None).await?;
        Ok(state)
    }

    /// Forgets the account. Its requests and directory entry remain.
    pub async fn delete_account(&self) -> AppResult<AuthState> {
        let state = self.auth.delete_account().await?;
        self.market.set_active_chat(None).await?;
        Ok(state)
    }

    /// Returns the session owner or fails with [`AppError::AuthenticationRequired`].
    pub async fn require_user(&self) -> AppResult<User> {
        self.auth
            .current_user()
            .await
            .ok_or(AppError::AuthenticationRequired)
    }

    /// Looks up every client and responding artisan of `requests`.
    pub async fn directory_for(&self, requests: &[ServiceRequest]) -> AppResult<Directory> {
        let mut directory = Directory::new();
        let ids = requests.iter().flat_map(|r| {
            std::iter::once(r.client_id).chain(r.responses.iter().map(|resp| resp.artisan_id))
        });
        for id in ids {
            if directory.contains_key(&id) {
                continue;
            }
            if let Some(user) = self.market.get_user(id).await? {
                directory.insert(id, user);
            }
        }
        Ok(directory)
    }

    async fn sync_directory(&self, state: &AuthState) -> AppResult<()> {
        if let Some(user) = &state.user {
            debug!(user_id = %user.id, "Syncing session user into directory");
            self.market.upsert_user(user.clone()).await?;
        }
        Ok(())
    }
}
