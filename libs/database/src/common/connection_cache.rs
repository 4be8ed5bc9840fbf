//! Process-wide, lazily established connection handle.
//!
//! A [`ConnectionCache`] moves through three states:
//!
//! ```text
//! Empty --ensure_connected--> Connecting --ok--> Ready
//!   ^                             |
//!   +------------ error ----------+
//! ```
//!
//! Callers arriving while an attempt is in flight join that attempt instead
//! of starting another one, so there is at most one outstanding connect per
//! cache. A failed attempt resets the cache to `Empty`, which makes the
//! next call retry.

use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use strum::Display;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::error::{ConnectionError, DatabaseError};

type Attempt<T> = Shared<BoxFuture<'static, Result<T, ConnectionError>>>;
type Connector<T> = dyn Fn() -> BoxFuture<'static, Result<T, DatabaseError>> + Send + Sync;

/// Observable lifecycle of a [`ConnectionCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionState {
    Empty,
    Connecting,
    Ready,
}

enum Slot<T> {
    Empty,
    Connecting { generation: u64, attempt: Attempt<T> },
    Ready(T),
}

struct Inner<T> {
    slot: Slot<T>,
    generation: u64,
}

/// Single-flight cache around an async connector.
///
/// `T` is the cheap-to-clone handle the connector produces (for MongoDB, a
/// `mongodb::Database`). The cache is meant to live for the whole process,
/// usually behind an `Arc` in application state.
pub struct ConnectionCache<T> {
    name: &'static str,
    connector: Box<Connector<T>>,
    inner: Mutex<Inner<T>>,
}

impl<T> ConnectionCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty cache. `connector` is not invoked until the first
    /// call to [`ensure_connected`](Self::ensure_connected).
    pub fn new<F, Fut>(name: &'static str, connector: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, DatabaseError>> + Send + 'static,
    {
        Self {
            name,
            connector: Box::new(move || connector().boxed()),
            inner: Mutex::new(Inner {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    /// Return the cached handle, connecting first if necessary.
    ///
    /// Concurrent callers during an in-flight attempt all receive the outcome
    /// of that one attempt, success or failure.
    pub async fn ensure_connected(&self) -> Result<T, ConnectionError> {
        let (generation, attempt) = {
            let mut inner = self.inner.lock().await;
            match &inner.slot {
                Slot::Ready(handle) => return Ok(handle.clone()),
                Slot::Connecting {
                    generation,
                    attempt,
                } => {
                    debug!(cache = self.name, generation, "Joining in-flight connection attempt");
                    (*generation, attempt.clone())
                }
                Slot::Empty => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    info!(cache = self.name, generation, "Opening connection");

                    let attempt = (self.connector)()
                        .map(|result| result.map_err(ConnectionError::from))
                        .boxed()
                        .shared();
                    inner.slot = Slot::Connecting {
                        generation,
                        attempt: attempt.clone(),
                    };
                    (generation, attempt)
                }
            }
        };

        let outcome = attempt.await;

        let mut inner = self.inner.lock().await;
        let still_current = matches!(
            &inner.slot,
            Slot::Connecting { generation: current, .. } if *current == generation
        );
        if still_current {
            match &outcome {
                Ok(handle) => {
                    info!(cache = self.name, generation, "Connection established");
                    inner.slot = Slot::Ready(handle.clone());
                }
                Err(err) => {
                    warn!(cache = self.name, generation, error = %err, "Connection attempt failed, cache reset");
                    inner.slot = Slot::Empty;
                }
            }
        }

        outcome
    }

    /// Current lifecycle state
    pub async fn state(&self) -> ConnectionState {
        match self.inner.lock().await.slot {
            Slot::Empty => ConnectionState::Empty,
            Slot::Connecting { .. } => ConnectionState::Connecting,
            Slot::Ready(_) => ConnectionState::Ready,
        }
    }

    /// The cached handle, without connecting.
    pub async fn get(&self) -> Option<T> {
        match &self.inner.lock().await.slot {
            Slot::Ready(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Drop whatever the cache holds and return to `Empty`.
    ///
    /// Returns the previously cached handle so the caller can close it. An
    /// in-flight attempt is abandoned; its callers still get its outcome but
    /// it is no longer stored.
    pub async fn reset(&self) -> Option<T> {
        let mut inner = self.inner.lock().await;
        match std::mem::replace(&mut inner.slot, Slot::Empty) {
            Slot::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for ConnectionCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionCache")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
