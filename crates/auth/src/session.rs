//! Session state and the auth store
//!
//! The store never talks to a server: each operation waits for a simulated
//! round trip, then mirrors the resulting user into [`SessionStorage`] under
//! [`SESSION_KEY`].

use std::time::Duration;

use entities::{ArtisanProfile, ServiceCategory, User, UserKind};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{AuthResult, ProfileUpdate, RegisterData, SessionStorage};

/// Storage key holding the serialized session user.
pub const SESSION_KEY: &str = "ncservice_user";

/// Identifier of the sample account fabricated by [`AuthStore::login`].
pub const SAMPLE_USER_ID: Uuid = Uuid::from_u128(1);

/// Snapshot of the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    /// Session owner.
    pub user: Option<User>,
    /// Whether a session is active.
    pub is_authenticated: bool,
    /// True until the initial storage read has resolved.
    pub loading: bool,
}

impl AuthState {
    fn loading() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: true,
        }
    }

    fn signed_out() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: false,
        }
    }

    fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }
}

/// Simulated round-trip durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub login: Duration,
    pub register: Duration,
    /// Used by profile updates and account deletion.
    pub profile: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            register: Duration::from_millis(1500),
            profile: Duration::from_millis(1000),
        }
    }
}

impl Latency {
    /// No delay at all.
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            register: Duration::ZERO,
            profile: Duration::ZERO,
        }
    }
}

async fn simulate_round_trip(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// The account every login resolves to, carrying the given email.
pub fn sample_user(email: impl Into<String>) -> User {
    let profile = ArtisanProfile::new("1234567.001", "RC 2015 B 0001")
        .with_specialties([ServiceCategory::Plomberie, ServiceCategory::Electricite]);
    User::new(
        email,
        "Jean",
        "Dupont",
        "+687 123456",
        UserKind::Artisan(profile),
    )
    .with_id(SAMPLE_USER_ID)
    .with_description("Artisan expérimenté en plomberie et électricité.")
    .verified()
}

/// Owns the current session and its durable copy.
#[derive(Debug)]
pub struct AuthStore<S: SessionStorage> {
    storage: S,
    latency: Latency,
    state: RwLock<AuthState>,
}

impl<S: SessionStorage> AuthStore<S> {
    /// Creates a store in the `loading` state. Call [`AuthStore::restore`]
    /// to resolve it.
    pub fn new(storage: S, latency: Latency) -> Self {
        Self {
            storage,
            latency,
            state: RwLock::new(AuthState::loading()),
        }
    }

    /// Returns the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a snapshot of the session.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Returns the session owner, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// Probes storage for a previous session.
    ///
    /// A stored value that does not parse is removed and the session starts
    /// signed out.
    pub async fn restore(&self) -> AuthResult<AuthState> {
        let next = match self.storage.get(SESSION_KEY).await? {
            None => AuthState::signed_out(),
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!(user_id = %user.id, "Restored session");
                    AuthState::signed_in(user)
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable session entry");
                    self.storage.remove(SESSION_KEY).await?;
                    AuthState::signed_out()
                }
            },
        };
        Ok(self.replace(next).await)
    }

    /// Signs in as the sample artisan. Credentials are not checked.
    pub async fn login(&self, email: &str, _password: &str) -> AuthResult<AuthState> {
        simulate_round_trip(self.latency.login).await;

        let user = sample_user(email);
        self.persist(&user).await?;
        info!(user_id = %user.id, "Logged in");
        Ok(self.replace(AuthState::signed_in(user)).await)
    }

    /// Creates an unverified account and signs in as it.
    pub async fn register(&self, data: RegisterData) -> AuthResult<AuthState> {
        simulate_round_trip(self.latency.register).await;

        let user = data.into_user();
        self.persist(&user).await?;
        info!(user_id = %user.id, user_type = %user.user_type(), "Registered");
        Ok(self.replace(AuthState::signed_in(user)).await)
    }

    /// Ends the session.
    pub async fn logout(&self) -> AuthResult<AuthState> {
        self.storage.remove(SESSION_KEY).await?;
        info!("Logged out");
        Ok(self.replace(AuthState::signed_out()).await)
    }

    /// Merges `update` into the session user. Does nothing without a session.
    pub async fn update_profile(&self, update: ProfileUpdate) -> AuthResult<AuthState> {
        let user_id = self.state.read().await.user.as_ref().map(|u| u.id);
        let Some(user_id) = user_id else {
            debug!("Profile update without a session; ignoring");
            return Ok(self.state().await);
        };

        simulate_round_trip(self.latency.profile).await;

        let mut state = self.state.write().await;
        let mut updated = match &state.user {
            Some(user) if user.id == user_id => user.clone(),
            // Session ended while the update was in flight.
            _ => return Ok(state.clone()),
        };
        update.apply(&mut updated);
        self.persist(&updated).await?;
        state.user = Some(updated);
        debug!(user_id = %user_id, "Profile updated");
        Ok(state.clone())
    }

    /// Ends the session and forgets the stored account.
    ///
    /// Only the session is affected; requests posted by the account stay.
    pub async fn delete_account(&self) -> AuthResult<AuthState> {
        simulate_round_trip(self.latency.profile).await;

        self.storage.remove(SESSION_KEY).await?;
        info!("Account deleted");
        Ok(self.replace(AuthState::signed_out()).await)
    }

    async fn persist(&self, user: &User) -> AuthResult<()> {
        let raw = serde_json::to_string(user)?;
        self.storage.set(SESSION_KEY, &raw).await
    }

    async fn replace(&self, next: AuthState) -> AuthState {
        let mut state = self.state.write().await;
        *state = next;
        state.clone()
    }
}
