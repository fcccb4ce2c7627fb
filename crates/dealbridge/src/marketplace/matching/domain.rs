use crate::marketplace::profiles::{ParticipantId, PartySide};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for proposed buyer-seller pairings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub String);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    File,
    System,
}

/// One entry in a match's conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: ParticipantId,
    pub content: String,
    pub kind: MessageKind,
    pub sent_at: DateTime<Utc>,
    pub read: bool,
}

/// A proposed buyer-seller pairing, tracked prior to (and alongside) an
/// acquisition process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub buyer: ParticipantId,
    pub seller: ParticipantId,
    pub status: MatchStatus,
    pub initiated_by: PartySide,
    pub compatibility: u8,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub messages: Vec<Message>,
}

impl Match {
    pub fn proposed(
        id: MatchId,
        buyer: ParticipantId,
        seller: ParticipantId,
        initiated_by: PartySide,
        compatibility: u8,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            buyer,
            seller,
            status: MatchStatus::Pending,
            initiated_by,
            compatibility,
            created_at: now,
            accepted_at: None,
            rejected_at: None,
            messages: Vec::new(),
        }
    }

    pub fn unread_count(&self, reader: &ParticipantId) -> usize {
        self.messages
            .iter()
            .filter(|message| !message.read && &message.sender != reader)
            .count()
    }
}
