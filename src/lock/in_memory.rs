use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use super::{Lock, LockError, LockManager};

/// In-memory lock backed by `Mutex<bool>` + `Condvar`.
pub struct InMemoryLock {
    state: Mutex<bool>,
    wake: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        InMemoryLock {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        while *locked {
            locked = self
                .wake
                .wait(locked)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
        }
        *locked = true;
        Ok(())
    }

    fn try_lock(&self) -> Result<bool, LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if *locked {
            Ok(false)
        } else {
            *locked = true;
            Ok(true)
        }
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if *locked {
            *locked = false;
            self.wake.notify_one();
        }
        Ok(())
    }
}

/// In-memory lock manager keyed by scope.
///
/// Lazily creates one `InMemoryLock` per unique key and returns the same
/// lock for repeated lookups.
pub struct InMemoryLockManager {
    locks: Mutex<HashMap<String, Arc<InMemoryLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        InMemoryLockManager {
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryLockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LockManager for InMemoryLockManager {
    fn scope_lock(&self, key: &str) -> Result<Arc<dyn Lock>, LockError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))?;
        let lock = locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(InMemoryLock::new()))
            .clone();
        Ok(lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocked_by_default() {
        let lock = InMemoryLock::new();
        assert!(lock.try_lock().unwrap());
        lock.unlock().unwrap();
    }

    #[test]
    fn lock_excludes_try_lock() {
        let lock = InMemoryLock::new();
        lock.lock().unwrap();
        assert!(!lock.try_lock().unwrap());
        lock.unlock().unwrap();
    }

    #[test]
    fn unlock_makes_lock_available_again() {
        let lock = InMemoryLock::new();
        lock.lock().unwrap();
        lock.unlock().unwrap();
        assert!(lock.try_lock().unwrap());
        lock.unlock().unwrap();
    }

    #[test]
    fn same_key_returns_same_lock() {
        let manager = InMemoryLockManager::new();
        let lock1 = manager.scope_lock("group-1").unwrap();
        let lock2 = manager.scope_lock("group-1").unwrap();

        lock1.lock().unwrap();
        assert!(!lock2.try_lock().unwrap());
        lock1.unlock().unwrap();
    }

    #[test]
    fn different_keys_are_independent() {
        let manager = InMemoryLockManager::new();
        let lock1 = manager.scope_lock("group-1").unwrap();
        let lock2 = manager.scope_lock("group-2").unwrap();

        lock1.lock().unwrap();
        assert!(lock2.try_lock().unwrap());
        lock1.unlock().unwrap();
        lock2.unlock().unwrap();
    }
}
