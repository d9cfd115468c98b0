// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Tracks live client sessions so shutdown can join every outstanding task.

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use tokio::sync::Mutex;
use uuid::Uuid;

/// What the registry keeps per session: just enough to log and to count.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    /// The session's peer address, kept for diagnostics.
    pub peer: SocketAddr,
}

/// Shared, mutex-guarded map of live client sessions, keyed by session id.
#[derive(Clone, Debug, Default)]
pub struct ClientRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, SessionHandle>>>,
}

impl ClientRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session, returning a guard that removes it on drop.
    pub async fn register(&self, id: Uuid, peer: SocketAddr) -> RegistrationGuard {
        let mut sessions = self.sessions.lock().await;
        let _ = sessions.insert(id, SessionHandle { peer });
        RegistrationGuard {
            registry: self.clone(),
            id,
        }
    }

    /// Remove a session by id. Idempotent — removing an id twice is a no-op.
    pub async fn deregister(&self, id: Uuid) {
        let mut sessions = self.sessions.lock().await;
        let _ = sessions.remove(&id);
    }

    /// Number of sessions currently registered.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// `true` when no sessions are registered.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

/// RAII handle returned by [`ClientRegistry::register`]. Deregisters the session when
/// dropped, so a panicking session task still leaves the registry consistent.
pub struct RegistrationGuard {
    registry: ClientRegistry,
    id: Uuid,
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        let registry = self.registry.clone();
        let id = self.id;
        tokio::spawn(async move {
            registry.deregister(id).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use uuid::Uuid;

    use super::ClientRegistry;

    fn addr() -> SocketAddr {
        "127.0.0.1:9999".parse().unwrap()
    }

    #[tokio::test]
    async fn register_then_deregister_drains_to_empty() {
        let registry = ClientRegistry::new();
        let id = Uuid::new_v4();
        let guard = registry.register(id, addr()).await;
        assert_eq!(registry.len().await, 1);

        registry.deregister(id).await;
        assert!(registry.is_empty().await);
        drop(guard);
    }

    #[tokio::test]
    async fn dropping_guard_deregisters_session() {
        let registry = ClientRegistry::new();
        let id = Uuid::new_v4();
        let guard = registry.register(id, addr()).await;
        assert_eq!(registry.len().await, 1);

        drop(guard);
        // The guard's drop spawns a task to deregister; yield so it runs.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn multiple_sessions_tracked_independently() {
        let registry = ClientRegistry::new();
        let id1 = Uuid::new_v4();
        let id2 = Uuid::new_v4();
        let guard1 = registry.register(id1, addr()).await;
        let guard2 = registry.register(id2, addr()).await;
        assert_eq!(registry.len().await, 2);

        registry.deregister(id1).await;
        assert_eq!(registry.len().await, 1);
        drop(guard1);
        drop(guard2);
    }
}
