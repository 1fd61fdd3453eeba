use std::sync::Arc;

use dashmap::DashSet;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::AppError;

/// Set of currently valid, unredeemed order keys.
///
/// A key present in the set has never been redeemed; absence means it was
/// either never issued or already spent. State is process-local; a restart
/// invalidates every outstanding key.
#[derive(Clone, Default)]
pub struct KeyRegistry {
    keys: Arc<DashSet<String>>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh order key (16 OS-random bytes, hex-encoded) and
    /// register it as valid.
    pub fn issue(&self) -> Result<String, AppError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AppError::KeyGeneration(e.to_string()))?;

        let key = hex::encode(bytes);
        self.keys.insert(key.clone());
        Ok(key)
    }

    /// Atomically check membership and remove the key. Returns whether the
    /// key was valid. At most one of any number of concurrent calls for the
    /// same key sees `true`.
    pub fn redeem(&self, key: &str) -> bool {
        self.keys.remove(key).is_some()
    }

    /// Number of outstanding keys (for diagnostics).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn issued_keys_are_32_char_hex() {
        let registry = KeyRegistry::new();
        let key = registry.issue().unwrap();
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn issued_keys_are_unique() {
        let registry = KeyRegistry::new();
        let keys: HashSet<String> = (0..100).map(|_| registry.issue().unwrap()).collect();
        assert_eq!(keys.len(), 100);
        assert_eq!(registry.len(), 100);
    }

    #[test]
    fn redeem_succeeds_exactly_once() {
        let registry = KeyRegistry::new();
        let key = registry.issue().unwrap();

        assert!(registry.redeem(&key));
        assert!(!registry.redeem(&key));
        assert!(registry.is_empty());
    }

    #[test]
    fn never_issued_key_fails_redemption() {
        let registry = KeyRegistry::new();
        assert!(!registry.redeem("deadbeefdeadbeefdeadbeefdeadbeef"));
    }

    #[test]
    fn registry_size_tracks_issue_and_redeem() {
        let registry = KeyRegistry::new();
        let first = registry.issue().unwrap();
        let second = registry.issue().unwrap();
        assert_eq!(registry.len(), 2);

        assert!(registry.redeem(&first));
        assert_eq!(registry.len(), 1);

        // Failed redemption must not mutate the set.
        assert!(!registry.redeem(&first));
        assert_eq!(registry.len(), 1);

        assert!(registry.redeem(&second));
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_redemption_succeeds_exactly_once() {
        let registry = KeyRegistry::new();
        let key = registry.issue().unwrap();
        let successes = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                let key = key.clone();
                let successes = successes.clone();
                std::thread::spawn(move || {
                    if registry.redeem(&key) {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }
}
