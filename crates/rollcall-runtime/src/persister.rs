use rollcall_store::KeyValueStore;
use rollcall_types::{CLASSES_KEY, ClassMap, encode_classes};
use serde_json::Value;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;
use tracing::{debug, warn};

use crate::{Error, Result};

/// A write that did not reach storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushFailure {
    pub message: String,
}

enum Job {
    Write(Value),
    Sync(Sender<()>),
}

/// Owns the store on a background writer thread.
///
/// `flush` serializes the whole mapping and returns without waiting for the
/// write. Dropping the persister drains the queue and joins the writer.
pub struct Persister {
    tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
    failures: Receiver<FlushFailure>,
}

impl Persister {
    pub fn spawn<S>(store: S) -> Result<Self>
    where
        S: KeyValueStore + 'static,
    {
        let (tx, rx) = channel();
        let (failure_tx, failures) = channel();

        let handle = std::thread::Builder::new()
            .name("rollcall-writer".to_string())
            .spawn(move || run_writer(store, rx, failure_tx))?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
            failures,
        })
    }

    /// Enqueue a full snapshot of the mapping
    pub fn flush(&self, classes: &ClassMap) -> Result<()> {
        let value = encode_classes(classes)?;
        self.send(Job::Write(value))
    }

    /// Block until every flush enqueued so far has been attempted
    pub fn sync(&self) -> Result<()> {
        let (done_tx, done_rx) = channel();
        self.send(Job::Sync(done_tx))?;
        done_rx
            .recv()
            .map_err(|_| Error::Persister("writer stopped before sync".to_string()))
    }

    /// Failures reported since the last call, without blocking
    pub fn take_failures(&self) -> Vec<FlushFailure> {
        self.failures.try_iter().collect()
    }

    fn send(&self, job: Job) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| Error::Persister("writer already closed".to_string()))?;
        tx.send(job)
            .map_err(|_| Error::Persister("writer thread is not running".to_string()))
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("writer thread panicked");
        }
    }
}

fn run_writer<S: KeyValueStore>(
    mut store: S,
    jobs: Receiver<Job>,
    failures: Sender<FlushFailure>,
) {
    for job in jobs {
        match job {
            Job::Write(value) => match store.set(CLASSES_KEY, &value) {
                Ok(()) => debug!("roster flushed"),
                Err(err) => {
                    warn!(error = %err, "flush failed");
                    let _ = failures.send(FlushFailure {
                        message: err.to_string(),
                    });
                }
            },
            Job::Sync(done) => {
                let _ = done.send(());
            }
        }
    }
}
