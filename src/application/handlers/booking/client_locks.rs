//! Per-client serialization for reservation creation.
//!
//! Two creates for the same client must not interleave between the
//! overlap read and the reservation write, or overlapping bookings
//! could sneak past each other. Creates for different clients never
//! contend, and session capacity has its own serialization point in
//! the ledger.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::ClientId;

/// Keyed async mutexes, one per client.
///
/// Single-process scope; a multi-node deployment would move this
/// serialization into the storage engine (advisory locks or a
/// serializable transaction).
#[derive(Debug, Clone, Default)]
pub struct ClientLocks {
    inner: Arc<Mutex<HashMap<ClientId, Arc<Mutex<()>>>>>,
}

impl ClientLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire this client's lock, waiting behind any in-flight create.
    pub async fn acquire(&self, client_id: &ClientId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().await;
            Arc::clone(locks.entry(*client_id).or_default())
        };
        lock.lock_owned().await
    }
}
