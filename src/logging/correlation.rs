//! Per-request correlation context.
//!
//! # Responsibilities
//! - Hold the current request's correlation id in task-local storage
//! - Expose `set`/`get`/`clear` without threading the id through signatures
//! - Isolate the value between concurrently running request tasks
//!
//! # Design Decisions
//! - Task-local storage, never a process global: writes by one task must
//!   not be visible to any other task
//! - `set`/`clear` outside an active scope are no-ops, so library code can
//!   log safely from background tasks

use std::cell::RefCell;
use std::fmt;
use std::future::Future;

use uuid::Uuid;

tokio::task_local! {
    static CORRELATION_ID: RefCell<Option<RequestId>>;
}

/// Opaque per-request correlation identifier: 8 hex characters drawn from a
/// UUID v4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Run a future with its own empty correlation slot installed. Every task
/// entered through this function observes an independent slot.
pub async fn scope<F>(fut: F) -> F::Output
where
    F: Future,
{
    CORRELATION_ID.scope(RefCell::new(None), fut).await
}

/// Install `id` as the calling task's correlation identifier.
pub fn set(id: RequestId) {
    let _ = CORRELATION_ID.try_with(|slot| {
        *slot.borrow_mut() = Some(id);
    });
}

/// The calling task's correlation identifier, if one is installed.
pub fn get() -> Option<RequestId> {
    CORRELATION_ID
        .try_with(|slot| slot.borrow().clone())
        .ok()
        .flatten()
}

/// Remove the installed identifier, restoring the absent state.
pub fn clear() {
    let _ = CORRELATION_ID.try_with(|slot| {
        slot.borrow_mut().take();
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Barrier;

    use super::*;

    #[test]
    fn test_request_id_is_short_hex() {
        let id = RequestId::generate();
        assert_eq!(id.as_str().len(), 8);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, RequestId::generate());
    }

    #[tokio::test]
    async fn test_get_outside_scope_is_none() {
        assert_eq!(get(), None);
        // And set/clear are harmless no-ops.
        set(RequestId::from("ab12cd34"));
        assert_eq!(get(), None);
        clear();
    }

    #[tokio::test]
    async fn test_set_get_clear_within_scope() {
        scope(async {
            assert_eq!(get(), None);
            set(RequestId::from("ab12cd34"));
            assert_eq!(get(), Some(RequestId::from("ab12cd34")));
            clear();
            assert_eq!(get(), None);
        })
        .await;
    }

    #[tokio::test]
    async fn test_concurrent_tasks_are_isolated() {
        let barrier = Arc::new(Barrier::new(2));

        let left = {
            let barrier = barrier.clone();
            tokio::spawn(scope(async move {
                set(RequestId::from("ab12cd34"));
                barrier.wait().await;
                get()
            }))
        };
        let right = {
            let barrier = barrier.clone();
            tokio::spawn(scope(async move {
                set(RequestId::from("ef56gh78"));
                barrier.wait().await;
                get()
            }))
        };

        let (left, right) = (left.await.unwrap(), right.await.unwrap());
        assert_eq!(left, Some(RequestId::from("ab12cd34")));
        assert_eq!(right, Some(RequestId::from("ef56gh78")));
    }

    #[tokio::test]
    async fn test_scope_does_not_leak_to_later_use() {
        scope(async {
            set(RequestId::from("stale000"));
        })
        .await;
        scope(async {
            assert_eq!(get(), None);
        })
        .await;
    }
}
