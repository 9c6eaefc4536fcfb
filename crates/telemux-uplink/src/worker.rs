use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::connection::{Connection, ConnectionState};
use crate::error::{Result, UplinkError};
use crate::mux;
use crate::registry::Channel;

/// How long one wait-for-data pass blocks before re-checking shutdown.
const READY_POLL: Duration = Duration::from_millis(100);

/// Granularity at which the retry sleep observes shutdown.
const SHUTDOWN_SLICE: Duration = Duration::from_millis(50);

/// Handle to the running uplink worker thread.
///
/// Dropping the handle stops the worker. There is no graceful drain:
/// records still queued when the worker stops are lost.
#[derive(Debug)]
pub struct UplinkWorker {
    shutdown: Arc<AtomicBool>,
    attempts: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl UplinkWorker {
    pub(crate) fn spawn(
        channels: Vec<Channel>,
        connection: Connection,
        retry_delay: Duration,
    ) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let attempts = connection.attempt_counter();

        let worker = Worker {
            channels,
            connection,
            retry_delay,
            shutdown: Arc::clone(&shutdown),
        };
        let handle = thread::Builder::new()
            .name("telemux-uplink".to_string())
            .spawn(move || worker.run())
            .map_err(UplinkError::Spawn)?;

        Ok(Self {
            shutdown,
            attempts,
            handle: Some(handle),
        })
    }

    /// Stop the worker and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    /// Connect attempts made so far (successful or not).
    pub fn connect_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    fn stop_and_join(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for UplinkWorker {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

/// The worker loop: retry-connect while disconnected, drain channels while
/// connected. Sole owner of the socket; producers never touch it.
struct Worker {
    channels: Vec<Channel>,
    connection: Connection,
    retry_delay: Duration,
    shutdown: Arc<AtomicBool>,
}

impl Worker {
    fn run(mut self) {
        while !self.shutdown.load(Ordering::Relaxed) {
            match self.connection.state() {
                ConnectionState::Disconnected => {
                    if let Err(err) = self.connection.try_connect() {
                        debug!(%err, "connect attempt failed");
                        self.sleep_retry();
                    }
                }
                ConnectionState::Connected => {
                    if !mux::wait_any_ready(&self.channels, READY_POLL) {
                        continue;
                    }
                    // Connected implies a live writer; the match keeps that
                    // invariant local instead of unwrapping.
                    let result = match self.connection.writer_mut() {
                        Some(writer) => mux::drain_ready(&self.channels, writer),
                        None => continue,
                    };
                    if let Err(err) = result {
                        warn!(%err, "write failed, dropping connection");
                        self.connection.disconnect();
                    }
                }
            }
        }
        debug!("uplink worker stopped");
    }

    /// Wait out the fixed retry delay, in slices so shutdown stays
    /// responsive. The total wait equals the configured delay.
    fn sleep_retry(&self) {
        let mut remaining = self.retry_delay;
        while !remaining.is_zero() && !self.shutdown.load(Ordering::Relaxed) {
            let step = remaining.min(SHUTDOWN_SLICE);
            thread::sleep(step);
            remaining -= step;
        }
    }
}
