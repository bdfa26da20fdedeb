use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::config::Config;

/// Process-wide lock shared by the bots.
///
/// Handed to each bot through [`AppState`]; there is no global instance.
#[derive(Clone, Debug, Default)]
pub struct SharedLock {
    inner: Arc<Mutex<()>>,
}

impl SharedLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }

    /// True when both handles guard the same lock.
    pub fn same_as(&self, other: &SharedLock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Context passed explicitly to every bot.
#[derive(Clone, Debug)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub lock: SharedLock,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg: Arc::new(cfg),
            lock: SharedLock::new(),
        }
    }
}
