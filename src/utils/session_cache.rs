use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::session::Session;

/// Live sessions keyed by token id. Entries expire with the token.
pub struct SessionCache {
    cache: Cache<String, Arc<Session>>,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(100_000) // tune based on memory
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn insert(&self, session: Arc<Session>) {
        self.cache.insert(session.id.clone(), session).await;
    }

    pub async fn get(&self, session_id: &str) -> Option<Arc<Session>> {
        self.cache.get(session_id).await
    }

    /// Returns the session that was removed, if it was still live.
    pub async fn remove(&self, session_id: &str) -> Option<Arc<Session>> {
        self.cache.remove(session_id).await
    }
}
