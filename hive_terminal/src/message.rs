//! Conversation messages and the append-only log that holds them.

use hive_portal::Page;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Rendering hint for a message. Carries no behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// Ordinary chat bubble.
    #[default]
    Plain,
    /// Raw terminal output.
    CommandOutput,
    /// Full-width special effect (matrix mode).
    SpecialEffect,
}

/// Button that sends the visitor to a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub label: String,
    pub page: Page,
}

impl Action {
    pub fn new(label: impl Into<String>, page: Page) -> Self {
        Self {
            label: label.into(),
            page,
        }
    }
}

/// External link rendered under a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    pub icon: String,
    /// Icon comes from the brand icon set.
    #[serde(default)]
    pub is_brand: bool,
}

impl Link {
    pub fn brand(label: impl Into<String>, url: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            icon: icon.into(),
            is_brand: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Attachments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub links: Vec<Link>,
}

impl Attachments {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.action.is_none() && self.links.is_empty()
    }
}

/// One entry of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub kind: MessageKind,
    #[serde(default)]
    pub attachments: Attachments,
}

impl Message {
    /// A message typed by the visitor.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, MessageKind::Plain)
    }

    /// A plain assistant chat bubble.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text, MessageKind::Plain)
    }

    /// Assistant output rendered as terminal text.
    pub fn output(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text, MessageKind::CommandOutput)
    }

    pub fn new(role: Role, text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            role,
            text: text.into(),
            kind,
            attachments: Attachments::default(),
        }
    }

    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.attachments.image = Some(url.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.attachments.action = Some(action);
        self
    }

    pub fn with_links(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        self.attachments.links.extend(links);
        self
    }
}

/// Append-only record of a conversation.
///
/// Messages are never edited once appended; the only removal is a full
/// [`clear`](ConversationLog::clear).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}
