//! In-memory market store implementation.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{
    ChatMessage, NewChatMessage, NewServiceRequest, NewServiceResponse, RequestStatus,
    ResponseStatus, ServiceRequest, ServiceResponse, User,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{MarketStore, MarketStoreError, MarketStoreResult, Marketplace, ServiceFilter};

/// In-memory market store. Clones share the same data.
#[derive(Debug, Default, Clone)]
pub struct MemoryMarketStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    service_requests: Arc<RwLock<Vec<ServiceRequest>>>,
    chat_messages: Arc<RwLock<Vec<ChatMessage>>>,
    active_chat: Arc<RwLock<Option<Uuid>>>,
}

impl MemoryMarketStore {
    /// Creates an empty in-memory market store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `marketplace`.
    pub fn with_marketplace(marketplace: Marketplace) -> Self {
        let users = marketplace
            .users
            .into_iter()
            .map(|u| (u.id, u))
            .collect::<HashMap<_, _>>();
        Self {
            users: Arc::new(RwLock::new(users)),
            service_requests: Arc::new(RwLock::new(marketplace.service_requests)),
            ..Self::default()
        }
    }
}

#[async_trait]
impl MarketStore for MemoryMarketStore {
    // =========================================================================
    // User directory
    // =========================================================================

    async fn upsert_user(&self, user: User) -> MarketStoreResult<User> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> MarketStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    // =========================================================================
    // Service request operations
    // =========================================================================

    async fn add_service_request(
        &self,
        draft: NewServiceRequest,
    ) -> MarketStoreResult<ServiceRequest> {
        let request = draft.into_request();
        let mut requests = self.service_requests.write().await;
        requests.push(request.clone());
        debug!(request_id = %request.id, category = %request.category, "Service request added");
        Ok(request)
    }

    async fn get_service_request(&self, id: Uuid) -> MarketStoreResult<Option<ServiceRequest>> {
        let requests = self.service_requests.read().await;
        Ok(requests.iter().find(|r| r.id == id).cloned())
    }

    async fn list_service_requests(
        &self,
        filter: ServiceFilter,
    ) -> MarketStoreResult<(Vec<ServiceRequest>, u32)> {
        let requests = self.service_requests.read().await;
        let mut result: Vec<ServiceRequest> = requests
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        let total = result.len() as u32;

        if let Some(offset) = filter.offset {
            result = result.into_iter().skip(offset as usize).collect();
        }
        if let Some(limit) = filter.limit {
            result = result.into_iter().take(limit as usize).collect();
        }

        Ok((result, total))
    }

    async fn respond_to_service(
        &self,
        request_id: Uuid,
        draft: NewServiceResponse,
    ) -> MarketStoreResult<Option<ServiceResponse>> {
        let mut requests = self.service_requests.write().await;
        let Some(request) = requests.iter_mut().find(|r| r.id == request_id) else {
            debug!(request_id = %request_id, "Response to unknown service request ignored");
            return Ok(None);
        };
        let response = draft.into_response(request_id);
        request.responses.push(response.clone());
        debug!(
            request_id = %request_id,
            response_id = %response.id,
            "Response added"
        );
        Ok(Some(response))
    }

    async fn update_request_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> MarketStoreResult<ServiceRequest> {
        let mut requests = self.service_requests.write().await;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| MarketStoreError::not_found("ServiceRequest", id.to_string()))?;
        if !request.status.can_transition_to(status) {
            return Err(MarketStoreError::invalid_transition(request.status, status));
        }
        request.status = status;
        debug!(request_id = %id, status = %status, "Service request status changed");
        Ok(request.clone())
    }

    async fn update_response_status(
        &self,
        request_id: Uuid,
        response_id: Uuid,
        status: ResponseStatus,
    ) -> MarketStoreResult<ServiceResponse> {
        let mut requests = self.service_requests.write().await;
        let request = requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| MarketStoreError::not_found("ServiceRequest", request_id.to_string()))?;
        let response = request
            .responses
            .iter_mut()
            .find(|r| r.id == response_id)
            .ok_or_else(|| {
                MarketStoreError::not_found("ServiceResponse", response_id.to_string())
            })?;
        if !response.status.can_transition_to(status) {
            return Err(MarketStoreError::invalid_transition(response.status, status));
        }
        response.status = status;
        let response = response.clone();

        if status == ResponseStatus::Accepte && request.status == RequestStatus::Ouvert {
            request.status = RequestStatus::EnCours;
        }
        debug!(
            request_id = %request_id,
            response_id = %response_id,
            status = %status,
            "Response status changed"
        );
        Ok(response)
    }

    // =========================================================================
    // Chat operations
    // =========================================================================

    async fn send_message(&self, draft: NewChatMessage) -> MarketStoreResult<ChatMessage> {
        let message = draft.into_message();
        let mut messages = self.chat_messages.write().await;
        messages.push(message.clone());
        debug!(
            message_id = %message.id,
            request_id = %message.service_request_id,
            "Message sent"
        );
        Ok(message)
    }

    async fn conversation(&self, service_request_id: Uuid) -> MarketStoreResult<Vec<ChatMessage>> {
        let messages = self.chat_messages.read().await;
        Ok(messages
            .iter()
            .filter(|m| m.service_request_id == service_request_id)
            .cloned()
            .collect())
    }

    async fn unread_count(&self, user_id: Uuid) -> MarketStoreResult<usize> {
        let messages = self.chat_messages.read().await;
        Ok(messages
            .iter()
            .filter(|m| m.receiver_id == user_id && !m.read)
            .count())
    }

    async fn mark_conversation_read(
        &self,
        service_request_id: Uuid,
        reader_id: Uuid,
    ) -> MarketStoreResult<usize> {
        let mut messages = self.chat_messages.write().await;
        let mut changed = 0;
        for message in messages.iter_mut().filter(|m| {
            m.service_request_id == service_request_id && m.receiver_id == reader_id && !m.read
        }) {
            message.read = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn set_active_chat(&self, service_request_id: Option<Uuid>) -> MarketStoreResult<()> {
        let mut active = self.active_chat.write().await;
        *active = service_request_id;
        Ok(())
    }

    async fn active_chat(&self) -> MarketStoreResult<Option<Uuid>> {
        Ok(*self.active_chat.read().await)
    }
}
