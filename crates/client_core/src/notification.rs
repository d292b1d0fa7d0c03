use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;

/// How long a transient notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    /// Bumped every time a notification is raised, so an expiry only clears the
    /// message it was scheduled for.
    pub seq: u64,
}

/// Single pending expiry. Restarting aborts the previous task.
#[derive(Default)]
pub(crate) struct ExpiryTimer {
    handle: Option<JoinHandle<()>>,
}

impl ExpiryTimer {
    pub(crate) fn restart<F>(&mut self, ttl: Duration, on_expire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            on_expire.await;
        }));
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn restart_aborts_the_previous_expiry() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = ExpiryTimer::default();

        let first = fired.clone();
        timer.restart(NOTIFICATION_TTL, async move {
            first.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_secs(3)).await;

        let second = fired.clone();
        timer.restart(NOTIFICATION_TTL, async move {
            second.fetch_add(10, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(timer.is_armed());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 10);
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timer_cancels_expiry() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = ExpiryTimer::default();
        let counter = fired.clone();
        timer.restart(Duration::from_millis(10), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(timer);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
