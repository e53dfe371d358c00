//! Transcript service wrapping the chat record repository.
//!
//! Keeps the handlers free of repository details and logs persistence
//! failures server-side; callers only learn success or failure.

use relaychat_types::chat::{ChatRecord, NewChatRecord};
use relaychat_types::error::RepositoryError;
use tracing::{debug, error};

use crate::transcript::repository::ChatRecordRepository;

/// Appends and lists transcript records.
pub struct TranscriptService<R: ChatRecordRepository> {
    repo: R,
}

impl<R: ChatRecordRepository> TranscriptService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the record repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Persist one record. The role string is stored as given.
    pub async fn append(&self, role: &str, text: &str) -> Result<ChatRecord, RepositoryError> {
        let record = NewChatRecord::new(role, text);
        match self.repo.append_record(&record).await {
            Ok(saved) => {
                debug!(id = %saved.id, role = %saved.role, "Chat record saved");
                Ok(saved)
            }
            Err(e) => {
                error!(role = %role, error = %e, "Failed to save chat record");
                Err(e)
            }
        }
    }

    /// Every record, oldest first.
    pub async fn list(&self) -> Result<Vec<ChatRecord>, RepositoryError> {
        self.repo.list_records_by_time().await.inspect_err(|e| {
            error!(error = %e, "Failed to list chat records");
        })
    }
}
