use crate::marketplace::profiles::ParticipantId;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier wrapper for acquisition processes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub String);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for steps within a process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub String);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for documents attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for tasks attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overall state of a deal pipeline. Any transition between these states
/// is permitted; the store applies no validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    InProgress,
    Completed,
    Cancelled,
    OnHold,
}

impl ProcessStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::OnHold => "On Hold",
        }
    }
}

/// Per-step status. Transitions only move forward (pending, in progress,
/// completed); blocked is reachable from any non-terminal state and has no
/// modeled exit, so it behaves as terminal-pending until external
/// unblocking logic exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl StepStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    pub const fn may_block(self) -> bool {
        !self.is_terminal()
    }
}

/// Review state a document moves through after upload. Everything else on
/// a document is immutable once uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    PendingReview,
    Approved,
    NeedsRevision,
}

impl DocumentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingReview => "Pending Review",
            Self::Approved => "Approved",
            Self::NeedsRevision => "Needs Revision",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Task ownership: a single participant, or both sides of the deal.
///
/// Serialized as the participant id, or the literal string `"both"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignee {
    Both,
    Participant(ParticipantId),
}

impl Serialize for Assignee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Assignee::Both => serializer.serialize_str("both"),
            Assignee::Participant(id) => serializer.serialize_str(&id.0),
        }
    }
}

impl<'de> Deserialize<'de> for Assignee {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(D::Error::custom("assignee must not be empty"));
        }
        Ok(if raw == "both" {
            Assignee::Both
        } else {
            Assignee::Participant(ParticipantId(raw))
        })
    }
}

/// A file exchanged during a step. Immutable after upload except for the
/// review status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub content_type: String,
    pub url: String,
    pub uploaded_by: ParticipantId,
    pub uploaded_at: DateTime<Utc>,
    pub size_bytes: u64,
    pub status: DocumentStatus,
}

/// An action item owned by a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Assignee,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
}

/// One stage of a deal pipeline. Steps are created with the process and
/// exclusively own their documents and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionStep {
    pub id: StepId,
    pub key: String,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub documents: Vec<Document>,
    pub tasks: Vec<Task>,
    pub notes: Option<String>,
}

impl AcquisitionStep {
    pub fn document_mut(&mut self, id: &DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|doc| &doc.id == id)
    }

    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignee_round_trips_through_serde() {
        let both: Assignee = serde_json::from_str("\"both\"").expect("deserializes");
        assert_eq!(both, Assignee::Both);
        assert_eq!(serde_json::to_string(&both).expect("serializes"), "\"both\"");

        let participant: Assignee = serde_json::from_str("\"buyer-2\"").expect("deserializes");
        assert_eq!(
            participant,
            Assignee::Participant(ParticipantId("buyer-2".to_string()))
        );

        let empty: Result<Assignee, _> = serde_json::from_str("\"\"");
        assert!(empty.is_err());
    }

    #[test]
    fn blocked_is_reachable_from_non_terminal_states_only() {
        assert!(StepStatus::Pending.may_block());
        assert!(StepStatus::InProgress.may_block());
        assert!(StepStatus::Blocked.may_block());
        assert!(!StepStatus::Completed.may_block());
    }
}
