//! SQLite chat record repository.
//!
//! Implements `ChatRecordRepository` from `relaychat-core` with raw sqlx
//! queries, a private Row struct, and the split reader/writer pool.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use relaychat_core::transcript::repository::ChatRecordRepository;
use relaychat_types::chat::{ChatRecord, NewChatRecord};
use relaychat_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRecordRepository`.
#[derive(Clone)]
pub struct SqliteChatRecordRepository {
    pool: DatabasePool,
}

impl SqliteChatRecordRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

struct ChatRecordRow {
    id: String,
    role: String,
    text: String,
    created_at: String,
}

impl ChatRecordRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            role: row.try_get("role")?,
            text: row.try_get("text")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_record(self) -> Result<ChatRecord, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid record id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatRecord {
            id,
            role: self.role,
            text: self.text,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 so that ordering by the TEXT column is chronological.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl ChatRecordRepository for SqliteChatRecordRepository {
    async fn append_record(&self, record: &NewChatRecord) -> Result<ChatRecord, RepositoryError> {
        let saved = ChatRecord {
            id: Uuid::now_v7(),
            role: record.role.clone(),
            text: record.text.clone(),
            created_at: Utc::now().trunc_subsecs(6),
        };

        sqlx::query("INSERT INTO chat_records (id, role, text, created_at) VALUES (?, ?, ?, ?)")
            .bind(saved.id.to_string())
            .bind(&saved.role)
            .bind(&saved.text)
            .bind(format_datetime(&saved.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(saved)
    }

    async fn list_records_by_time(&self) -> Result<Vec<ChatRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, role, text, created_at FROM chat_records ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let record_row =
                ChatRecordRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            records.push(record_row.into_record()?);
        }

        Ok(records)
    }
}
