use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::{management::TokenManager, management::WorkflowCache, utils};

/// Sessions untouched for this long are dropped.
const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Authorization request in flight, remembered until the callback arrives.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub code_verifier: String,
    pub state: String,
}

/// Everything the web app remembers about one browser.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub login: Option<PendingLogin>,
    pub token: Option<TokenManager>,
    pub user_id: Option<String>,
    /// Names of the user's playlists, for rejecting name collisions.
    pub playlist_names: Vec<String>,
    pub workflow: Option<WorkflowCache>,
    /// Message shown once on the next rendered page.
    pub flash: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }
}

struct Entry {
    session: Session,
    last_seen: Instant,
}

/// In-memory session storage shared by all handlers.
///
/// Handlers take a copy with [`SessionStore::get`], release the lock while
/// talking to Spotify, and write their changes back with
/// [`SessionStore::update`]. The lock is never held across network calls.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty session and returns its id. Idle sessions are purged
    /// on the way.
    pub async fn create(&self) -> String {
        let id = utils::generate_session_id();
        let mut sessions = self.inner.lock().await;
        let now = Instant::now();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < SESSION_IDLE_TIMEOUT);
        sessions.insert(
            id.clone(),
            Entry {
                session: Session::default(),
                last_seen: now,
            },
        );
        id
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.inner.lock().await.contains_key(id)
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        let mut sessions = self.inner.lock().await;
        sessions.get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            entry.session.clone()
        })
    }

    /// Applies `f` to the session in place, if it exists.
    pub async fn update<F, R>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self.inner.lock().await;
        sessions.get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            f(&mut entry.session)
        })
    }

    pub async fn remove(&self, id: &str) {
        self.inner.lock().await.remove(id);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
