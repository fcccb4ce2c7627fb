use super::domain::{Match, MatchId, MatchStatus, Message};
use crate::marketplace::profiles::ParticipantId;
use chrono::{DateTime, Utc};

/// Error enumeration for match board lookups.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("match {0} not found")]
    NotFound(MatchId),
}

/// In-memory board of proposed pairings.
///
/// Alongside the authoritative list the board keeps a cached current match
/// and categorized pending/accepted views. Every mutation that touches a
/// match by id re-syncs those redundant copies so read views stay coherent.
#[derive(Debug, Default, Clone)]
pub struct MatchBoard {
    list: Vec<Match>,
    current: Option<Match>,
    pending: Vec<Match>,
    accepted: Vec<Match>,
}

impl MatchBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self) -> &[Match] {
        &self.list
    }

    pub fn current(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    pub fn pending(&self) -> &[Match] {
        &self.pending
    }

    pub fn accepted(&self) -> &[Match] {
        &self.accepted
    }

    pub fn get(&self, id: &MatchId) -> Option<&Match> {
        self.list.iter().find(|entry| &entry.id == id)
    }

    /// Replace the whole board content and rebuild the categorized views.
    pub fn set_matches(&mut self, matches: Vec<Match>) {
        self.list = matches;
        self.rebuild_views();
        if let Some(current) = &self.current {
            let id = current.id.clone();
            self.current = self.get(&id).cloned();
        }
    }

    pub fn add_match(&mut self, entry: Match) {
        match entry.status {
            MatchStatus::Pending => self.pending.push(entry.clone()),
            MatchStatus::Accepted => self.accepted.push(entry.clone()),
            _ => {}
        }
        self.list.push(entry);
    }

    /// Full replacement of a match record by id.
    pub fn replace_match(&mut self, entry: Match) -> Result<(), MatchError> {
        let slot = self
            .list
            .iter_mut()
            .find(|candidate| candidate.id == entry.id)
            .ok_or_else(|| MatchError::NotFound(entry.id.clone()))?;
        *slot = entry.clone();

        self.rebuild_views();
        self.sync_current(&entry.id);
        Ok(())
    }

    /// Point the cached current view at a match, or clear it with `None`.
    pub fn select(&mut self, id: Option<&MatchId>) -> Result<(), MatchError> {
        match id {
            Some(id) => {
                let entry = self
                    .get(id)
                    .cloned()
                    .ok_or_else(|| MatchError::NotFound(id.clone()))?;
                self.current = Some(entry);
                Ok(())
            }
            None => {
                self.current = None;
                Ok(())
            }
        }
    }

    pub fn accept(&mut self, id: &MatchId, now: DateTime<Utc>) -> Result<&Match, MatchError> {
        let index = self
            .list
            .iter()
            .position(|candidate| &candidate.id == id)
            .ok_or_else(|| MatchError::NotFound(id.clone()))?;
        self.list[index].status = MatchStatus::Accepted;
        self.list[index].accepted_at = Some(now);

        self.rebuild_views();
        self.sync_current(id);
        Ok(&self.list[index])
    }

    pub fn reject(&mut self, id: &MatchId, now: DateTime<Utc>) -> Result<&Match, MatchError> {
        let index = self
            .list
            .iter()
            .position(|candidate| &candidate.id == id)
            .ok_or_else(|| MatchError::NotFound(id.clone()))?;
        self.list[index].status = MatchStatus::Rejected;
        self.list[index].rejected_at = Some(now);

        self.rebuild_views();
        self.sync_current(id);
        Ok(&self.list[index])
    }

    pub fn add_message(&mut self, id: &MatchId, message: Message) -> Result<(), MatchError> {
        let entry = self
            .list
            .iter_mut()
            .find(|candidate| &candidate.id == id)
            .ok_or_else(|| MatchError::NotFound(id.clone()))?;
        entry.messages.push(message);

        self.sync_current(id);
        Ok(())
    }

    /// Mark every message not authored by `reader` as read.
    pub fn mark_messages_read(
        &mut self,
        id: &MatchId,
        reader: &ParticipantId,
    ) -> Result<(), MatchError> {
        let entry = self
            .list
            .iter_mut()
            .find(|candidate| &candidate.id == id)
            .ok_or_else(|| MatchError::NotFound(id.clone()))?;
        for message in &mut entry.messages {
            if &message.sender != reader {
                message.read = true;
            }
        }

        self.sync_current(id);
        Ok(())
    }

    fn rebuild_views(&mut self) {
        self.pending = self
            .list
            .iter()
            .filter(|entry| entry.status == MatchStatus::Pending)
            .cloned()
            .collect();
        self.accepted = self
            .list
            .iter()
            .filter(|entry| entry.status == MatchStatus::Accepted)
            .cloned()
            .collect();
    }

    fn sync_current(&mut self, id: &MatchId) {
        if let Some(current) = &self.current {
            if &current.id == id {
                self.current = self.get(id).cloned();
            }
        }
    }
}
