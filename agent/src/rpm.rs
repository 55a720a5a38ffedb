//! Requests-per-minute controller shared with the executor.
//!
//! Up to `max_rpm` requests are admitted per window; the next one sleeps until the
//! window ends. A background task resets the count at every window boundary and
//! runs until [`RpmController::stop_rpm_counter`] is called.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use squad_core::RequestLimiter;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const MINUTE: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct RpmController {
    max_rpm: u32,
    window: Duration,
    current_rpm: Arc<Mutex<u32>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl RpmController {
    pub fn new(max_rpm: u32) -> Self {
        Self::with_window(max_rpm, MINUTE)
    }

    /// Controller with a custom window length instead of one minute.
    pub fn with_window(max_rpm: u32, window: Duration) -> Self {
        Self {
            max_rpm,
            window,
            current_rpm: Arc::new(Mutex::new(0)),
            timer: Mutex::new(None),
        }
    }

    pub fn max_rpm(&self) -> u32 {
        self.max_rpm
    }

    pub async fn current_rpm(&self) -> u32 {
        *self.current_rpm.lock().await
    }

    /// Whether the reset timer is running.
    pub async fn is_running(&self) -> bool {
        self.timer.lock().await.is_some()
    }

    /// Admits one request, sleeping until the next window when the limit is reached.
    pub async fn check_or_wait(&self) {
        self.ensure_timer().await;

        {
            let mut current = self.current_rpm.lock().await;
            if *current < self.max_rpm {
                *current += 1;
                return;
            }
        }

        warn!(max_rpm = self.max_rpm, "Max RPM reached, waiting for next minute to start.");
        tokio::time::sleep(self.window).await;
        *self.current_rpm.lock().await = 1;
    }

    /// Cancels the reset timer. A later `check_or_wait` starts a new one.
    pub async fn stop_rpm_counter(&self) {
        if let Some(handle) = self.timer.lock().await.take() {
            handle.abort();
            debug!("RPM counter stopped");
        }
    }

    async fn ensure_timer(&self) {
        let mut timer = self.timer.lock().await;
        if timer.is_some() {
            return;
        }
        let current = self.current_rpm.clone();
        let window = self.window;
        *timer = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(window).await;
                *current.lock().await = 0;
            }
        }));
    }
}

#[async_trait]
impl RequestLimiter for RpmController {
    async fn check_or_wait(&self) {
        RpmController::check_or_wait(self).await
    }
}
