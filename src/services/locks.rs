//! Per-key async locks

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<i64, Arc<AsyncMutex<()>>>;

/// Serializes work per key (book or reservation id) inside this process.
///
/// An entry lives only while its key is held or awaited.
#[derive(Clone, Default)]
pub struct KeyedLocks {
    inner: Arc<Mutex<LockMap>>,
}

/// Held lock on one key. Dropping it releases the key.
pub struct KeyGuard {
    key: i64,
    map: Arc<Mutex<LockMap>>,
    guard: Option<OwnedMutexGuard<()>>,
}

fn lock_map(map: &Mutex<LockMap>) -> MutexGuard<'_, LockMap> {
    map.lock().unwrap_or_else(|e| e.into_inner())
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: i64) -> KeyGuard {
        let mutex = lock_map(&self.inner).entry(key).or_default().clone();
        let guard = mutex.lock_owned().await;

        KeyGuard {
            key,
            map: self.inner.clone(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        lock_map(&self.inner).len()
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        // Waiters clone the entry under the map lock, so a count of one
        // (the map's own copy) means nobody else holds or awaits this key.
        let mut map = lock_map(&self.map);
        drop(self.guard.take());

        if map.get(&self.key).is_some_and(|m| Arc::strong_count(m) == 1) {
            map.remove(&self.key);
        }
    }
}
