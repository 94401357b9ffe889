use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::null_as_default;

fn unix_seconds(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
}

/// GroupMe Group object from API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// "private" or "public"
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub group_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator_user_id: String,
    /// Unix time (seconds)
    pub created_at: i64,
    /// Unix time (seconds)
    pub updated_at: i64,
    /// Empty when the listing was requested with memberships omitted
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<Member>,
    /// Link other users can follow to join the group
    #[serde(default, deserialize_with = "null_as_default")]
    pub share_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Messages,
}

impl Group {
    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        unix_seconds(self.created_at)
    }

    pub fn updated_at_time(&self) -> Option<DateTime<Utc>> {
        unix_seconds(self.updated_at)
    }

    /// Find a member by user ID
    pub fn member(&self, user_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.user_id == user_id)
    }
}

/// Membership of a user in a group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    /// Display name within this group
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    /// Mentions still notify a muted member
    #[serde(default)]
    pub muted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

/// Summary of a group's message history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default)]
    pub count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_message_id: String,
    /// Unix time (seconds)
    #[serde(default)]
    pub last_message_created_at: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preview: MessagePreview,
}

impl Messages {
    pub fn last_message_time(&self) -> Option<DateTime<Utc>> {
        unix_seconds(self.last_message_created_at)
    }
}

/// Preview of the most recent message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePreview {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
}

/// Message attachment
///
/// Every attachment decodes the same way whatever its `type` tag says;
/// optional fields the service did not send stay `None`, and a missing
/// `charmap` is an empty grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub attachment_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub charmap: Vec<Vec<i64>>,
}

impl Attachment {
    /// Interpret the `type` tag
    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::from_tag(&self.attachment_type)
    }
}

/// Known attachment type tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Location,
    Split,
    Emoji,
    Mentions,
    File,
    Other(String),
}

impl AttachmentKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "image" => AttachmentKind::Image,
            "location" => AttachmentKind::Location,
            "split" => AttachmentKind::Split,
            "emoji" => AttachmentKind::Emoji,
            "mentions" => AttachmentKind::Mentions,
            "file" => AttachmentKind::File,
            other => AttachmentKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Location => "location",
            AttachmentKind::Split => "split",
            AttachmentKind::Emoji => "emoji",
            AttachmentKind::Mentions => "mentions",
            AttachmentKind::File => "file",
            AttachmentKind::Other(tag) => tag,
        }
    }
}
