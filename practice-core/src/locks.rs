use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

/// Per-session async locks. Entries are dropped once nobody holds or waits on them.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

pub struct SessionGuard<'a> {
    owner: &'a SessionLocks,
    session_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, session_id: Uuid) -> SessionGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(session_id).or_default().clone()
        };

        let guard = lock.lock_owned().await;
        SessionGuard {
            owner: self,
            session_id,
            guard: Some(guard),
        }
    }

    /// Number of sessions with a live lock entry
    pub fn active(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut locks = self.owner.locks.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(lock) = locks.get(&self.session_id) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(&self.session_id);
            }
        }
    }
}
