//! Bounded in-memory session store.
//!
//! Session records live in a `moka` cache. Each entry expires at its
//! record's own expiry date and the cache holds at most a fixed number of
//! sessions, so abandoned carts are reclaimed instead of accumulating for
//! the life of the process.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tower_sessions::{
    SessionStore,
    cookie::time::OffsetDateTime,
    session::{Id, Record},
    session_store,
};

/// Expires each cached record at its `expiry_date`.
struct RecordExpiry;

/// Time left before `record` expires; zero once it has passed.
fn remaining(record: &Record) -> Duration {
    Duration::try_from(record.expiry_date - OffsetDateTime::now_utc()).unwrap_or(Duration::ZERO)
}

impl Expiry<Id, Record> for RecordExpiry {
    fn expire_after_create(&self, _id: &Id, record: &Record, _created_at: Instant) -> Option<Duration> {
        Some(remaining(record))
    }

    fn expire_after_update(
        &self,
        _id: &Id,
        record: &Record,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(remaining(record))
    }
}

/// Session store backed by a size-bounded, expiring `moka` cache.
#[derive(Debug, Clone)]
pub struct SessionCache {
    cache: Cache<Id, Record>,
}

impl SessionCache {
    /// Create a store holding at most `max_sessions` records.
    #[must_use]
    pub fn new(max_sessions: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_sessions)
            .expire_after(RecordExpiry)
            .build();
        Self { cache }
    }

    /// Number of records currently held.
    ///
    /// Eviction is applied lazily; call [`Self::run_pending_tasks`] first
    /// for an exact count.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Apply pending evictions and expirations.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

fn is_active(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}

#[async_trait]
impl SessionStore for SessionCache {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.save(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        if is_active(record) {
            self.cache.insert(record.id, record.clone()).await;
        } else {
            self.cache.invalidate(&record.id).await;
        }
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self.cache.get(session_id).await.filter(is_active))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}
