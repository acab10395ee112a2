//! In-memory registry of running quiz sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::controller::WizardController;
use super::registration::Registrar;
use crate::config::QuizConfig;

/// How often the background task looks for idle sessions.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct SessionEntry {
    controller: Arc<WizardController>,
    last_seen: Instant,
}

/// One wizard per visitor, keyed by session id. Nothing outlives the process.
///
/// Sessions untouched for longer than `session_ttl` are discarded, both
/// when a new session is created and by [`spawn_expiry_task`].
pub struct QuizSessions {
    config: QuizConfig,
    registrar: Arc<dyn Registrar>,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl QuizSessions {
    pub fn new(config: QuizConfig, registrar: Arc<dyn Registrar>) -> Arc<Self> {
        Arc::new(Self {
            config,
            registrar,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Start a fresh wizard.
    pub async fn create(&self) -> (Uuid, Arc<WizardController>) {
        let id = Uuid::new_v4();
        let controller = WizardController::new(&self.config, Arc::clone(&self.registrar));
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        let expired = prune(&mut sessions, now, self.config.session_ttl);
        if expired > 0 {
            debug!(expired, "Idle quiz sessions discarded");
        }
        sessions.insert(
            id,
            SessionEntry {
                controller: Arc::clone(&controller),
                last_seen: now,
            },
        );
        info!(session_id = %id, "Quiz session started");
        (id, controller)
    }

    /// Look up a session and mark it as active.
    pub async fn get(&self, id: Uuid) -> Option<Arc<WizardController>> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(Arc::clone(&entry.controller))
    }

    /// Drop a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            debug!(session_id = %id, "Quiz session discarded");
        }
        removed
    }

    /// Discard every session idle for longer than the configured TTL.
    /// Returns how many were removed.
    pub async fn expire_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let expired = prune(&mut sessions, Instant::now(), self.config.session_ttl);
        if expired > 0 {
            info!(expired, remaining = sessions.len(), "Expired idle quiz sessions");
        }
        expired
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

fn prune(sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= ttl);
    before - sessions.len()
}

/// Spawn a background task that periodically expires idle sessions.
pub fn spawn_expiry_task(sessions: Arc<QuizSessions>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.expire_idle().await;
        }
    })
}
