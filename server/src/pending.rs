//! # Pending Submissions
//!
//! Durable queue for affiliation forms that failed mail delivery.
//!
//! The whole queue lives under one Redis key as a JSON array, mirroring how
//! small and non-critical this data is: a handful of records at most,
//! read-modify-written as a unit. A corrupt or unreadable value degrades to
//! an empty queue instead of an error, and a failed write is logged and
//! dropped. The queue is a fallback cache, not a system of record.
//!
//! Mutations are serialized behind one lock because the HTTP layer is
//! concurrent and every mutation is a read-modify-write of the single key.
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use crate::affiliation::AffiliationForm;

pub const STORAGE_KEY: &str = "mnu:pending-submissions";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PendingSubmission {
    pub id: String,
    pub form: AffiliationForm,
    pub submitted_at: DateTime<Utc>,
    pub attempts: u32,
}

impl PendingSubmission {
    pub fn new(form: AffiliationForm) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            form,
            submitted_at: Utc::now(),
            attempts: 0,
        }
    }
}

enum Backend {
    Redis(ConnectionManager),
    /// Plain in-process storage so the queue and the handlers above it can
    /// be exercised without a live Redis.
    #[cfg(test)]
    Memory(std::sync::Mutex<Option<String>>),
}

pub struct PendingStore {
    backend: Backend,
    write_lock: Mutex<()>,
}

impl PendingStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            backend: Backend::Redis(connection),
            write_lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(std::sync::Mutex::new(None)),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn all(&self) -> Vec<PendingSubmission> {
        decode_list(self.read_raw().await)
    }

    pub async fn find(&self, id: &str) -> Option<PendingSubmission> {
        self.all().await.into_iter().find(|s| s.id == id)
    }

    /// Appends the form as a fresh record and returns it, id assigned.
    pub async fn push(&self, form: AffiliationForm) -> PendingSubmission {
        let _guard = self.write_lock.lock().await;

        let mut list = self.all().await;
        let submission = PendingSubmission::new(form);
        list.push(submission.clone());
        self.write(&list).await;

        submission
    }

    /// Removes the record; false when the id is unknown.
    pub async fn remove(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().await;

        let mut list = self.all().await;
        if !remove_by_id(&mut list, id) {
            return false;
        }
        self.write(&list).await;

        true
    }

    /// Bumps the record's attempt counter; false when the id is unknown.
    pub async fn record_attempt(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().await;

        let mut list = self.all().await;
        if !bump_attempts(&mut list, id) {
            return false;
        }
        self.write(&list).await;

        true
    }

    async fn read_raw(&self) -> Option<String> {
        match &self.backend {
            Backend::Redis(connection) => {
                let mut connection = connection.clone();

                match connection.get(STORAGE_KEY).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!("Failed to read pending submissions: {e}");
                        None
                    }
                }
            }
            #[cfg(test)]
            Backend::Memory(cell) => cell.lock().unwrap().clone(),
        }
    }

    async fn write(&self, list: &[PendingSubmission]) {
        let raw = match serde_json::to_string(list) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode pending submissions: {e}");
                return;
            }
        };

        match &self.backend {
            Backend::Redis(connection) => {
                let mut connection = connection.clone();

                if let Err(e) = connection.set::<_, _, ()>(STORAGE_KEY, raw).await {
                    warn!("Failed to persist pending submissions: {e}");
                }
            }
            #[cfg(test)]
            Backend::Memory(cell) => *cell.lock().unwrap() = Some(raw),
        }

        #[cfg(feature = "verbose")]
        println!("Persisted {} pending submissions", list.len());
    }
}

fn decode_list(raw: Option<String>) -> Vec<PendingSubmission> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Discarding corrupt pending submission list: {e}");
        Vec::new()
    })
}

fn remove_by_id(list: &mut Vec<PendingSubmission>, id: &str) -> bool {
    let before = list.len();
    list.retain(|submission| submission.id != id);
    list.len() != before
}

fn bump_attempts(list: &mut [PendingSubmission], id: &str) -> bool {
    match list.iter_mut().find(|submission| submission.id == id) {
        Some(submission) => {
            submission.attempts += 1;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliation::tests::sample_form;

    fn sample_list(n: usize) -> Vec<PendingSubmission> {
        (0..n).map(|_| PendingSubmission::new(sample_form())).collect()
    }

    #[test]
    fn fresh_records_start_at_zero_attempts() {
        let submission = PendingSubmission::new(sample_form());
        assert_eq!(submission.attempts, 0);
        assert!(!submission.id.is_empty());
    }

    #[test]
    fn record_ids_are_unique() {
        let list = sample_list(3);
        assert_ne!(list[0].id, list[1].id);
        assert_ne!(list[1].id, list[2].id);
    }

    #[test]
    fn missing_storage_reads_as_empty() {
        assert!(decode_list(None).is_empty());
    }

    #[test]
    fn corrupt_storage_reads_as_empty() {
        assert!(decode_list(Some("{not json".to_string())).is_empty());
        assert!(decode_list(Some("[{\"id\":42}]".to_string())).is_empty());
    }

    #[test]
    fn stored_list_round_trips() {
        let list = sample_list(2);
        let raw = serde_json::to_string(&list).unwrap();

        let decoded = decode_list(Some(raw));
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].id, list[0].id);
        assert_eq!(decoded[1].form.surname, "Mokoena");
    }

    #[test]
    fn remove_targets_only_the_matching_id() {
        let mut list = sample_list(3);
        let target = list[1].id.clone();

        assert!(remove_by_id(&mut list, &target));
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|s| s.id != target));

        assert!(!remove_by_id(&mut list, "no-such-id"));
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn store_operations_round_trip_in_memory() {
        let store = PendingStore::in_memory();
        assert!(store.all().await.is_empty());

        let queued = store.push(sample_form()).await;
        assert_eq!(store.all().await.len(), 1);
        assert_eq!(queued.attempts, 0);

        assert!(store.record_attempt(&queued.id).await);
        assert_eq!(store.find(&queued.id).await.unwrap().attempts, 1);

        assert!(store.remove(&queued.id).await);
        assert!(store.all().await.is_empty());
        assert!(!store.remove(&queued.id).await);
    }

    #[test]
    fn attempts_increment_only_the_matching_id() {
        let mut list = sample_list(2);
        let target = list[0].id.clone();

        assert!(bump_attempts(&mut list, &target));
        assert!(bump_attempts(&mut list, &target));
        assert_eq!(list[0].attempts, 2);
        assert_eq!(list[1].attempts, 0);

        assert!(!bump_attempts(&mut list, "no-such-id"));
    }
}
