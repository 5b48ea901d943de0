//! Market store trait definitions.

use async_trait::async_trait;
use entities::{
    ChatMessage, NewChatMessage, NewServiceRequest, NewServiceResponse, RequestStatus,
    ResponseStatus, ServiceCategory, ServiceRequest, ServiceResponse, User,
};
use uuid::Uuid;

use crate::MarketStoreResult;

/// Filter options for listing service requests.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    /// Filter by category.
    pub category: Option<ServiceCategory>,
    /// Filter by status.
    pub status: Option<RequestStatus>,
    /// Filter by posting client.
    pub client_id: Option<Uuid>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl ServiceFilter {
    /// Open requests only.
    pub fn open() -> Self {
        Self {
            status: Some(RequestStatus::Ouvert),
            ..Default::default()
        }
    }

    /// Returns true if `request` passes the category/status/client criteria.
    pub fn matches(&self, request: &ServiceRequest) -> bool {
        let mut matches = true;
        if let Some(category) = self.category {
            matches = matches && request.category == category;
        }
        if let Some(status) = self.status {
            matches = matches && request.status == status;
        }
        if let Some(client_id) = self.client_id {
            matches = matches && request.client_id == client_id;
        }
        matches
    }
}

/// Trait for marketplace storage operations.
///
/// Requests keep their insertion order; every listing is returned in that
/// order.
#[async_trait]
pub trait MarketStore: Send + Sync {
    // =========================================================================
    // User directory
    // =========================================================================

    /// Inserts or replaces a user record.
    async fn upsert_user(&self, user: User) -> MarketStoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> MarketStoreResult<Option<User>>;

    // =========================================================================
    // Service request operations
    // =========================================================================

    /// Assigns an ID and creation time and appends the request.
    async fn add_service_request(&self, draft: NewServiceRequest)
        -> MarketStoreResult<ServiceRequest>;

    /// Gets a service request by ID.
    async fn get_service_request(&self, id: Uuid) -> MarketStoreResult<Option<ServiceRequest>>;

    /// Lists service requests with optional filters, plus the unpaginated total.
    async fn list_service_requests(
        &self,
        filter: ServiceFilter,
    ) -> MarketStoreResult<(Vec<ServiceRequest>, u32)>;

    /// Open requests in `category`.
    async fn services_by_category(
        &self,
        category: ServiceCategory,
    ) -> MarketStoreResult<Vec<ServiceRequest>> {
        let filter = ServiceFilter {
            category: Some(category),
            ..ServiceFilter::open()
        };
        Ok(self.list_service_requests(filter).await?.0)
    }

    /// Requests posted by `client_id`, whatever their status.
    async fn my_service_requests(&self, client_id: Uuid) -> MarketStoreResult<Vec<ServiceRequest>> {
        let filter = ServiceFilter {
            client_id: Some(client_id),
            ..Default::default()
        };
        Ok(self.list_service_requests(filter).await?.0)
    }

    /// Appends a pending response to the request.
    ///
    /// Returns `None`, leaving every request untouched, when no request has
    /// that ID.
    async fn respond_to_service(
        &self,
        request_id: Uuid,
        draft: NewServiceResponse,
    ) -> MarketStoreResult<Option<ServiceResponse>>;

    /// Moves a request to `status` if the transition is allowed.
    async fn update_request_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> MarketStoreResult<ServiceRequest>;

    /// Decides a pending response. Accepting one puts an open request in
    /// progress.
    async fn update_response_status(
        &self,
        request_id: Uuid,
        response_id: Uuid,
        status: ResponseStatus,
    ) -> MarketStoreResult<ServiceResponse>;

    // =========================================================================
    // Chat operations
    // =========================================================================

    /// Appends a message. Stored messages always start unread.
    async fn send_message(&self, draft: NewChatMessage) -> MarketStoreResult<ChatMessage>;

    /// Messages about one service request, in send order.
    async fn conversation(&self, service_request_id: Uuid) -> MarketStoreResult<Vec<ChatMessage>>;

    /// Number of unread messages addressed to `user_id`.
    async fn unread_count(&self, user_id: Uuid) -> MarketStoreResult<usize>;

    /// Marks the messages of a conversation addressed to `reader_id` as read.
    /// Returns how many changed.
    async fn mark_conversation_read(
        &self,
        service_request_id: Uuid,
        reader_id: Uuid,
    ) -> MarketStoreResult<usize>;

    /// Selects the conversation shown by the chat view.
    async fn set_active_chat(&self, service_request_id: Option<Uuid>) -> MarketStoreResult<()>;

    /// Currently selected conversation.
    async fn active_chat(&self) -> MarketStoreResult<Option<Uuid>>;
}
