use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::{signal, sync::Notify};
use tracing::info;

/// Cooperative shutdown flag shared between the signal handlers and the
/// HTTP server's graceful-shutdown future.
#[derive(Clone, Debug, Default)]
pub struct StopFlag {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        self.notify.notified().await;
    }
}

pub fn register_signal_handler(stop_flag: &StopFlag) {
    {
        let stop_flag = stop_flag.clone();
        tokio::spawn(async move {
            let _ = signal::ctrl_c().await;
            info!("Ctrl-C received, initiating graceful shutdown...");
            stop_flag.stop();
        });
    }
    #[cfg(unix)]
    {
        let stop_flag = stop_flag.clone();
        tokio::spawn(async move {
            if let Ok(mut term) = signal::unix::signal(signal::unix::SignalKind::terminate()) {
                term.recv().await;
                info!("Terminate signal received, initiating graceful shutdown...");
                stop_flag.stop();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_flag_wakes_waiters() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());

        let waiter = {
            let flag = flag.clone();
            tokio::spawn(async move {
                flag.wait().await;
            })
        };

        // Give the waiter a chance to park before stopping.
        tokio::task::yield_now().await;
        flag.stop();

        waiter.await.unwrap();
        assert!(flag.is_stopped());
    }
}
