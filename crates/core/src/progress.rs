use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::info;

/// Periodic progress logger for the scan loop.
///
/// The scan thread calls [`ProgressReport::next_file`]; a background thread
/// wakes up every `period` and logs the counter. The counter is the only
/// state shared between the two, and [`ProgressReport::stop`] joins the
/// background thread before logging the final summary.
#[derive(Debug)]
pub struct ProgressReport {
    period: Duration,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

#[derive(Debug, Default)]
struct Shared {
    analyzed: AtomicUsize,
    total: AtomicUsize,
    stopping: Mutex<bool>,
    wakeup: Condvar,
}

impl ProgressReport {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            shared: Arc::new(Shared::default()),
            worker: None,
        }
    }

    /// Spawns the ticker. Must be called at most once.
    pub fn start(&mut self, total: usize) {
        debug_assert!(self.worker.is_none(), "progress report started twice");
        self.shared.total.store(total, Ordering::Relaxed);
        info!("{total} source files to be analyzed");

        let shared = Arc::clone(&self.shared);
        let period = self.period;
        let worker = std::thread::Builder::new()
            .name("progress-report".into())
            .spawn(move || shared.run(period));
        match worker {
            Ok(handle) => self.worker = Some(handle),
            // A failed spawn only costs the periodic log lines.
            Err(err) => info!(%err, "progress report thread unavailable"),
        }
    }

    /// Records one more analyzed file. Safe to call while the ticker reads
    /// the counter from its own thread. Not supported after [`stop`].
    ///
    /// [`stop`]: ProgressReport::stop
    pub fn next_file(&self) {
        self.shared.analyzed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn analyzed(&self) -> usize {
        self.shared.analyzed.load(Ordering::Relaxed)
    }

    /// Cancels the ticker, waits for it to exit, and logs the final summary.
    /// A second call is a no-op.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        {
            let mut stopping = self
                .shared
                .stopping
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *stopping = true;
        }
        self.shared.wakeup.notify_all();
        // A panicked ticker thread must not take the scan down with it.
        let _ = worker.join();

        let total = self.shared.total.load(Ordering::Relaxed);
        info!("{total}/{total} source files have been analyzed");
    }
}

impl Drop for ProgressReport {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Shared {
    fn run(&self, period: Duration) {
        let mut stopping = self
            .stopping
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        loop {
            let (guard, timeout) = match self.wakeup.wait_timeout(stopping, period) {
                Ok(woken) => woken,
                Err(poisoned) => poisoned.into_inner(),
            };
            stopping = guard;
            if *stopping {
                return;
            }
            if timeout.timed_out() {
                let analyzed = self.analyzed.load(Ordering::Relaxed);
                let total = self.total.load(Ordering::Relaxed);
                info!("{analyzed} of {total} files analyzed");
            }
        }
    }
}
