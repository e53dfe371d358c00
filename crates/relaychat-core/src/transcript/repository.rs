//! ChatRecordRepository trait definition.
//!
//! An append-only store of chat records. Follows the RPITIT pattern used by
//! every repository trait in this crate.

use relaychat_types::chat::{ChatRecord, NewChatRecord};
use relaychat_types::error::RepositoryError;

/// Repository trait for transcript persistence.
///
/// Implementations live in relaychat-infra (e.g., `SqliteChatRecordRepository`).
/// The store assigns `id` and `created_at`; callers supply role and text only.
pub trait ChatRecordRepository: Send + Sync {
    /// Insert one record stamped with the store's clock.
    fn append_record(
        &self,
        record: &NewChatRecord,
    ) -> impl std::future::Future<Output = Result<ChatRecord, RepositoryError>> + Send;

    /// All records ordered by `created_at` ascending (insertion order on ties).
    fn list_records_by_time(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatRecord>, RepositoryError>> + Send;
}
