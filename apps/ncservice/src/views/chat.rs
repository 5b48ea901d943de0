//! Per-request conversation pane.

use chrono::{DateTime, Utc};
use entities::{ChatMessage, NewChatMessage, ServiceRequest, User};
use uuid::Uuid;

use super::form::{FormError, FormResult};
use super::{Directory, display_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Sent by the viewer.
    pub outgoing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub service_request_id: Uuid,
    pub title: String,
    pub counterpart: Option<String>,
    pub lines: Vec<ChatLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatPane {
    NoSelection,
    Conversation(ChatView),
}

impl ChatPane {
    /// Builds the pane for the active conversation, if one is selected.
    pub fn build(
        active: Option<&ServiceRequest>,
        messages: &[ChatMessage],
        viewer: &User,
        directory: &Directory,
    ) -> Self {
        let Some(request) = active else {
            return Self::NoSelection;
        };

        let lines = messages
            .iter()
            .filter(|m| m.service_request_id == request.id)
            .map(|m| ChatLine {
                id: m.id,
                content: m.content.clone(),
                timestamp: m.timestamp,
                outgoing: m.sender_id == viewer.id,
            })
            .collect();

        Self::Conversation(ChatView {
            service_request_id: request.id,
            title: request.title.clone(),
            counterpart: counterpart_id(request, messages, viewer.id)
                .map(|id| display_name(directory, id)),
            lines,
        })
    }
}

/// Who receives what `viewer_id` writes about `request`.
///
/// Anyone but the client talks to the client. The client answers whoever
/// last wrote in the conversation, or the artisan of the latest response
/// while nobody has written yet.
pub fn counterpart_id(
    request: &ServiceRequest,
    messages: &[ChatMessage],
    viewer_id: Uuid,
) -> Option<Uuid> {
    if request.client_id != viewer_id {
        return Some(request.client_id);
    }
    messages
        .iter()
        .rev()
        .filter(|m| m.service_request_id == request.id)
        .find(|m| m.sender_id != viewer_id)
        .map(|m| m.sender_id)
        .or_else(|| request.responses.last().map(|r| r.artisan_id))
}

/// Send box.
#[derive(Debug, Clone, Default)]
pub struct MessageForm {
    pub content: String,
}

impl MessageForm {
    /// Builds the message to send, or `None` for blank input.
    ///
    /// `conversation` holds the messages already exchanged about `request`.
    pub fn validate(
        &self,
        sender: &User,
        request: &ServiceRequest,
        conversation: &[ChatMessage],
    ) -> FormResult<Option<NewChatMessage>> {
        let content = self.content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        let receiver_id = counterpart_id(request, conversation, sender.id)
            .ok_or(FormError::NoRecipient)?;
        Ok(Some(NewChatMessage {
            sender_id: sender.id,
            receiver_id,
            service_request_id: request.id,
            content: content.to_string(),
            read: false,
        }))
    }
}

#[cfg(test)]
mod tests {
    use entities::{
        ArtisanProfile, NewServiceRequest, NewServiceResponse, RequestStatus, ServiceCategory,
        Urgency, UserKind,
    };

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
            title: "Entretien jardin".to_string(),
            description: "Tonte".to_string(),
            category: ServiceCategory::Jardinage,
            client_id,
            location: "Dumbéa".to_string(),
            budget: 8000,
            urgency: Urgency::Moyenne,
            status: RequestStatus::Ouvert,
        }
        .into_request()
    }

    fn add_response(request: &mut ServiceRequest, artisan_id: Uuid) {
        let response = NewServiceResponse {
            artisan_id,
            message: "OK".to_string(),
            proposed_price: 7000,
            estimated_duration: "3h".to_string(),
        }
        .into_response(request.id);
        request.responses.push(response);
    }

    #[test]
    fn test_no_selection() {
        let pane = ChatPane::build(None, &[], &particulier(), &Directory::new());
        assert_eq!(pane, ChatPane::NoSelection);
    }

    #[test]
    fn test_counterpart_resolution() {
        let marie = particulier();
        let jean = artisan();
        let mut req = request(marie.id);

        assert_eq!(counterpart_id(&req, &[], jean.id), Some(marie.id));
        assert_eq!(counterpart_id(&req, &[], marie.id), None);

        let later = Uuid::new_v4();
        add_response(&mut req, jean.id);
        add_response(&mut req, later);
        assert_eq!(counterpart_id(&req, &[], marie.id), Some(later));
    }

    #[test]
    fn test_client_answers_the_last_writer() {
        let marie = particulier();
        let jean = artisan();
        let bidder = Uuid::new_v4();
        let mut req = request(marie.id);
        add_response(&mut req, bidder);

        let hello = MessageForm {
            content: "Bonjour de Jean".to_string(),
        }
        .validate(&jean, &req, &[])
        .unwrap()
        .unwrap();
        let mut elsewhere = hello.clone();
        elsewhere.service_request_id = Uuid::new_v4();
        elsewhere.sender_id = Uuid::new_v4();
        let messages = vec![hello.into_message(), elsewhere.into_message()];

        let reply = MessageForm {
            content: "Merci Jean".to_string(),
        }
        .validate(&marie, &req, &messages)
        .unwrap()
        .unwrap();
        assert_eq!(reply.receiver_id, jean.id);

        // Her own messages do not change the recipient
        let mut history = messages.clone();
        history.push(reply.into_message());
        assert_eq!(counterpart_id(&req, &history, marie.id), Some(jean.id));
    }

    #[test]
    fn test_client_can_answer_without_responses() {
        let marie = particulier();
        let jean = artisan();
        let req = request(marie.id);
        let hello = MessageForm {
            content: "Intéressé".to_string(),
        }
        .validate(&jean, &req, &[])
        .unwrap()
        .unwrap();

        let messages = vec![hello.into_message()];
        assert_eq!(counterpart_id(&req, &messages, marie.id), Some(jean.id));
    }

    #[test]
    fn test_lines_flag_direction() {
        let marie = particulier();
        let jean = artisan();
        let req = request(marie.id);
        let outgoing = MessageForm {
            content: "  Bonjour  ".to_string(),
        }
        .validate(&jean, &req, &[])
        .unwrap()
        .unwrap();
        assert_eq!(outgoing.content, "Bonjour");
        assert_eq!(outgoing.receiver_id, marie.id);

        let mut reply = outgoing.clone();
        reply.sender_id = marie.id;
        reply.receiver_id = jean.id;
        let messages = vec![outgoing.into_message(), reply.into_message()];

        let directory = Directory::from([(marie.id, marie.clone())]);
        let ChatPane::Conversation(view) = ChatPane::build(Some(&req), &messages, &jean, &directory)
        else {
            panic!("expected a conversation");
        };
        assert_eq!(view.counterpart.as_deref(), Some("Marie Martin"));
        assert_eq!(
            view.lines.iter().map(|l| l.outgoing).collect::<Vec<_>>(),
            vec![true, false]
        );
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let marie = particulier();
        let form = MessageForm {
            content: "   ".to_string(),
        };
        assert_eq!(form.validate(&artisan(), &request(marie.id), &[]), Ok(None));
    }

    #[test]
    fn test_client_without_responses_has_no_recipient() {
        let marie = particulier();
        let form = MessageForm {
            content: "Quelqu'un ?".to_string(),
        };
        assert_eq!(
            form.validate(&marie, &request(marie.id), &[]),
            Err(FormError::NoRecipient)
        );
    }
}
