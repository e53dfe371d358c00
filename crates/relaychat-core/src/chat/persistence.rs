//! Background queue for transcript saves.
//!
//! The conversation enqueues a save for every turn and moves on; a single
//! worker task drains the queue in order. Each save yields a [`SaveHandle`]
//! so its outcome can be observed, and [`PersistenceQueue::flush`] waits for
//! everything enqueued so far.

use relaychat_types::chat::NewChatRecord;
use relaychat_types::error::ClientError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::chat::client::TranscriptSink;

enum Job {
    Save {
        record: NewChatRecord,
        done: oneshot::Sender<Result<(), ClientError>>,
    },
    Flush(oneshot::Sender<()>),
}

/// Completion handle for one enqueued save.
///
/// Dropping it is fine; the save still runs.
#[derive(Debug)]
pub struct SaveHandle {
    rx: oneshot::Receiver<Result<(), ClientError>>,
}

impl SaveHandle {
    /// Wait for the save to finish and return its result.
    pub async fn outcome(self) -> Result<(), ClientError> {
        self.rx.await.unwrap_or(Err(ClientError::QueueClosed))
    }
}

/// Handle to the save worker. Cheap to clone.
#[derive(Clone)]
pub struct PersistenceQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl PersistenceQueue {
    /// Start the worker on the current tokio runtime.
    pub fn spawn<S: TranscriptSink + 'static>(sink: S) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                match job {
                    Job::Save { record, done } => {
                        let result = sink.save(&record).await;
                        match &result {
                            Ok(()) => debug!(role = %record.role, "Transcript record saved"),
                            Err(e) => warn!(role = %record.role, error = %e, "Transcript save failed"),
                        }
                        let _ = done.send(result);
                    }
                    Job::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!("Persistence queue closed");
        });

        Self { tx }
    }

    /// Queue a record for saving. Never blocks.
    pub fn enqueue(&self, record: NewChatRecord) -> SaveHandle {
        let (done, rx) = oneshot::channel();
        if let Err(mpsc::error::SendError(job)) = self.tx.send(Job::Save { record, done }) {
            if let Job::Save { done, .. } = job {
                let _ = done.send(Err(ClientError::QueueClosed));
            }
        }
        SaveHandle { rx }
    }

    /// Wait until every save enqueued before this call has finished.
    pub async fn flush(&self) {
        let (done, rx) = oneshot::channel();
        if self.tx.send(Job::Flush(done)).is_ok() {
            let _ = rx.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingSink {
        saved: Arc<Mutex<Vec<NewChatRecord>>>,
        fail_role: Option<&'static str>,
        delay: Option<Duration>,
    }

    impl TranscriptSink for RecordingSink {
        async fn save(&self, record: &NewChatRecord) -> Result<(), ClientError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_role == Some(record.role.as_str()) {
                return Err(ClientError::Status {
                    status: 500,
                    message: "store unreachable".to_string(),
                });
            }
            self.saved.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_save_outcome_is_observable() {
        let sink = RecordingSink::default();
        let queue = PersistenceQueue::spawn(sink.clone());

        let handle = queue.enqueue(NewChatRecord::new("user", "Hello"));
        handle.outcome().await.unwrap();

        assert_eq!(sink.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_reports_error() {
        let sink = RecordingSink {
            fail_role: Some("model"),
            ..RecordingSink::default()
        };
        let queue = PersistenceQueue::spawn(sink.clone());

        let ok = queue.enqueue(NewChatRecord::new("user", "Hello"));
        let bad = queue.enqueue(NewChatRecord::new("model", "Hi"));

        assert!(ok.outcome().await.is_ok());
        assert!(matches!(bad.outcome().await, Err(ClientError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_flush_waits_for_pending_saves() {
        let sink = RecordingSink {
            delay: Some(Duration::from_millis(20)),
            ..RecordingSink::default()
        };
        let queue = PersistenceQueue::spawn(sink.clone());

        for i in 0..3 {
            // Handles dropped on purpose: saves still run.
            let _ = queue.enqueue(NewChatRecord::new("user", format!("m{i}")));
        }
        queue.flush().await;

        let saved = sink.saved.lock().unwrap();
        let texts: Vec<&str> = saved.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["m0", "m1", "m2"]);
    }
}
