//! In-memory operator sessions.
//!
//! Each session owns at most one finished [`PromoArtifact`]. A new
//! generation drops the previous artifact before it starts; deleting or
//! expiring the session drops it too.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use promo_core::artifact::{ArtifactDetails, PromoArtifact};
use promo_core::error::CoreError;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Shared handle to one session. Holding the lock serializes generation.
pub type SessionHandle = Arc<Mutex<Session>>;

/// One operator's working state.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    artifact: Option<PromoArtifact>,
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub artifact_ready: bool,
    pub artifact: Option<ArtifactDetails>,
}

impl Session {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_seen: now,
            artifact: None,
        }
    }

    /// Mark the session as active.
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    pub fn artifact(&self) -> Option<&PromoArtifact> {
        self.artifact.as_ref()
    }

    /// Drop the held artifact, if any. Returns whether one was held.
    pub fn clear_artifact(&mut self) -> bool {
        self.artifact.take().is_some()
    }

    pub fn store_artifact(&mut self, artifact: PromoArtifact) {
        self.artifact = Some(artifact);
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            created_at: self.created_at,
            last_seen: self.last_seen,
            artifact_ready: self.artifact.is_some(),
            artifact: self.artifact.as_ref().map(PromoArtifact::details),
        }
    }
}

/// All live sessions.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions expire after `ttl` of inactivity.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Start a new session and return its info.
    pub async fn create(&self) -> SessionInfo {
        let session = Session::new();
        let info = session.info();
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::new(Mutex::new(session)));
        tracing::debug!(session_id = %info.id, "Session created");
        info
    }

    /// Look up a session.
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, CoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "Session",
                id: id.to_string(),
            })
    }

    /// End a session, dropping its artifact.
    pub async fn remove(&self, id: Uuid) -> Result<(), CoreError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::debug!(session_id = %id, "Session removed");
                Ok(())
            }
            None => Err(CoreError::NotFound {
                entity: "Session",
                id: id.to_string(),
            }),
        }
    }

    /// Drop sessions idle since before `now - ttl`. Returns how many were
    /// dropped.
    ///
    /// Sessions that are currently locked (mid-generation) are never evicted.
    pub async fn evict_idle_at(&self, now: DateTime<Utc>) -> usize {
        let ttl = chrono::Duration::from_std(self.ttl)
            .unwrap_or_else(|_| chrono::Duration::days(365 * 100));
        let cutoff = now.checked_sub_signed(ttl).unwrap_or(DateTime::<Utc>::MIN_UTC);

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.last_seen >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }

    pub async fn evict_idle(&self) -> usize {
        self.evict_idle_at(Utc::now()).await
    }

    /// Return the current number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
