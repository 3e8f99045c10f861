//! Ties in-flight fetches to the lifetime of a view.
//!
//! A view owns a [`Mount`]. Every fetch it starts runs inside
//! [`Mount::run`]; once the mount is unmounted (explicitly, or because every
//! handle was dropped) pending fetches resolve to `None` and their results are
//! never applied to view state.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug)]
struct Lifetime {
    unmounted: watch::Sender<bool>,
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.unmounted.send_replace(true);
    }
}

/// Cloneable lifetime handle of a view.
#[derive(Debug, Clone)]
pub struct Mount {
    lifetime: Arc<Lifetime>,
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

impl Mount {
    pub fn new() -> Self {
        let (unmounted, _) = watch::channel(false);
        Self {
            lifetime: Arc::new(Lifetime { unmounted }),
        }
    }

    /// Mark the view as gone. Idempotent.
    pub fn unmount(&self) {
        self.lifetime.unmounted.send_replace(true);
    }

    pub fn is_mounted(&self) -> bool {
        !*self.lifetime.unmounted.borrow()
    }

    /// Drive `fut` unless the view is unmounted first. Returns `None` when the
    /// result must be discarded.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let mut unmounted = self.lifetime.unmounted.subscribe();
        if *unmounted.borrow() {
            return None;
        }

        tokio::select! {
            output = fut => self.is_mounted().then_some(output),
            _ = unmounted.wait_for(|gone| *gone) => None,
        }
    }
}
