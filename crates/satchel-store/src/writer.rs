//! # Persist Writer
//!
//! The background task that mirrors cart state to durable storage.
//!
//! ## Write Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Persist Writer Flow                                  │
//! │                                                                         │
//! │  mutation 1 ──► encode full sequence ──► queue ┐                       │
//! │  mutation 2 ──► encode full sequence ──► queue ┤  FIFO mpsc channel    │
//! │  mutation 3 ──► encode full sequence ──► queue ┘                       │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                                 ┌─────────────────────┐                 │
//! │                                 │    PersistWriter    │                 │
//! │                                 │                     │                 │
//! │                                 │  recv ─► put ─► ack │ one write in    │
//! │                                 │  recv ─► put ─► ack │ flight at a     │
//! │                                 │  recv ─► put ─► ack │ time, never     │
//! │                                 └─────────────────────┘ coalesced       │
//! │                                                                         │
//! │  WHY: each write encodes the FULL current sequence, so a stale write   │
//! │  landing after a newer one would silently roll cart state back. The    │
//! │  queue pins storage order to mutation order regardless of what the     │
//! │  backing store guarantees.                                              │
//! │                                                                         │
//! │  FAILURES: logged and counted, never fatal. In-memory state stays      │
//! │  authoritative; the next successful write converges storage. A write   │
//! │  that never completes leaves memory and storage diverged until then -  │
//! │  a documented risk, acceptable for cart data.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use satchel_kv::KvStore;

/// A unit of work for the persist writer.
pub(crate) enum WriteJob {
    /// Write this fully serialized cart sequence under the storage key.
    Persist(Vec<u8>),

    /// Acknowledge once every job queued before this one has completed.
    /// Used by `CartStore::flush` and the shutdown path.
    Flush(oneshot::Sender<()>),
}

/// Drains the write queue, one storage write in flight at a time.
pub(crate) struct PersistWriter {
    /// Storage backend.
    kv: Arc<dyn KvStore>,

    /// Fixed key the cart blob lives under.
    storage_key: String,

    /// Job queue receiver; the engine side holds the sender.
    job_rx: mpsc::Receiver<WriteJob>,

    /// Running count of failed writes, shared with the engine.
    write_failures: Arc<AtomicU64>,
}

impl PersistWriter {
    pub(crate) fn new(
        kv: Arc<dyn KvStore>,
        storage_key: String,
        job_rx: mpsc::Receiver<WriteJob>,
        write_failures: Arc<AtomicU64>,
    ) -> Self {
        PersistWriter {
            kv,
            storage_key,
            job_rx,
            write_failures,
        }
    }

    /// Runs the writer loop until the engine drops the sending side.
    ///
    /// This should be spawned as a background task.
    pub(crate) async fn run(mut self) {
        info!(key = %self.storage_key, "Persist writer starting");

        while let Some(job) = self.job_rx.recv().await {
            match job {
                WriteJob::Persist(bytes) => match self.kv.put(&self.storage_key, &bytes).await {
                    Ok(()) => {
                        debug!(bytes = bytes.len(), "Cart blob persisted");
                    }
                    Err(e) => {
                        self.write_failures.fetch_add(1, Ordering::Relaxed);
                        error!(
                            error = %e,
                            "Cart persistence write failed; in-memory state remains \
                             authoritative until the next successful write"
                        );
                    }
                },
                WriteJob::Flush(ack) => {
                    // All previously queued writes have completed by the time
                    // this job is reached. A dropped receiver just means the
                    // flusher stopped waiting.
                    let _ = ack.send(());
                }
            }
        }

        info!("Persist writer stopped");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use satchel_kv::KvResult;

    /// Records every put in arrival order.
    #[derive(Default)]
    struct RecordingKv {
        puts: Mutex<Vec<Vec<u8>>>,
    }

    #[async_trait]
    impl KvStore for RecordingKv {
        async fn get(&self, _key: &str) -> KvResult<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn put(&self, _key: &str, value: &[u8]) -> KvResult<()> {
            self.puts.lock().unwrap().push(value.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_writes_land_in_queue_order() {
        let kv = Arc::new(RecordingKv::default());
        let (job_tx, job_rx) = mpsc::channel(8);
        let failures = Arc::new(AtomicU64::new(0));

        let writer = PersistWriter::new(kv.clone(), "products".to_string(), job_rx, failures);
        let task = tokio::spawn(writer.run());

        for i in 0..5u8 {
            job_tx.send(WriteJob::Persist(vec![i])).await.unwrap();
        }
        let (ack_tx, ack_rx) = oneshot::channel();
        job_tx.send(WriteJob::Flush(ack_tx)).await.unwrap();
        ack_rx.await.unwrap();

        let puts = kv.puts.lock().unwrap().clone();
        assert_eq!(puts, vec![vec![0], vec![1], vec![2], vec![3], vec![4]]);

        drop(job_tx);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_writer_stops_when_sender_drops() {
        let kv = Arc::new(RecordingKv::default());
        let (job_tx, job_rx) = mpsc::channel(1);
        let failures = Arc::new(AtomicU64::new(0));

        let writer = PersistWriter::new(kv, "products".to_string(), job_rx, failures);
        let task = tokio::spawn(writer.run());

        drop(job_tx);
        task.await.unwrap();
    }
}
