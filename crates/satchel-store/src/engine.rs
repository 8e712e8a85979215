//! # Cart Store
//!
//! The authoritative owner of cart state and its persistence lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore Lifecycle                                │
//! │                                                                         │
//! │  CartStore::open(kv, config)                                           │
//! │       │                                                                 │
//! │       ├── read blob under the storage key                              │
//! │       │      absent          ──► empty cart                            │
//! │       │      valid blob      ──► decoded cart                          │
//! │       │      corrupt blob    ──► empty cart + warn! diagnostic         │
//! │       │      read error      ──► Err(StoreError::Load)                 │
//! │       │                                                                 │
//! │       ├── spawn the persist writer                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ready: mutations served                                               │
//! │       │                                                                 │
//! │       │   add_to_cart / increment / decrement                          │
//! │       │     lock ─► mutate ─► publish snapshot ─► enqueue write        │
//! │       │     (enqueued while locked, so storage order = mutation order) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close / drop: queue drains, writer stops, handles see ScopeEnded      │
//! │                                                                         │
//! │  NOTE: there is no observable "loading" state - no CartStore value     │
//! │  exists before open resolves, so mutations during the load window are  │
//! │  unrepresentable rather than queued or rejected.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Contract
//! Every invocation of a mutation persists the authoritative post-mutation
//! sequence - including no-ops. An `increment` of an unknown id leaves state
//! untouched but still writes the (unchanged) sequence: callers rely on
//! storage always reflecting the operation's outcome. The blob written is
//! always the final state after the mutation, never a stale pre-append
//! snapshot - the same locked value is mutated, published and enqueued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::{mpsc, oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use satchel_core::{codec, Cart, LineItem, ProductMetadata};
use satchel_kv::KvStore;

use crate::error::{StoreError, StoreResult};
use crate::writer::{PersistWriter, WriteJob};

// =============================================================================
// Constants
// =============================================================================

/// Fixed storage key the cart blob lives under.
pub const DEFAULT_STORAGE_KEY: &str = "products";

/// Default capacity of the persist queue.
const DEFAULT_WRITE_QUEUE_CAPACITY: usize = 64;

// =============================================================================
// Configuration
// =============================================================================

/// Cart store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::default().storage_key("cart:primary");
/// let store = CartStore::open(kv, config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key the serialized cart is stored under.
    /// Default: [`DEFAULT_STORAGE_KEY`]
    pub storage_key: String,

    /// Persist queue capacity. A full queue applies backpressure to
    /// mutations rather than dropping or coalescing writes.
    /// Default: 64
    pub write_queue_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            write_queue_capacity: DEFAULT_WRITE_QUEUE_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Sets the storage key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the persist queue capacity.
    pub fn write_queue_capacity(mut self, capacity: usize) -> Self {
        self.write_queue_capacity = capacity;
        self
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of the cart at one point in time.
///
/// Cheap to clone and impossible to mutate: subscribers can never perturb
/// the engine's invariants through a snapshot. Items appear in insertion
/// order.
pub type CartSnapshot = Arc<[LineItem]>;

// =============================================================================
// Shared State
// =============================================================================

/// State shared between the store and its handles.
struct Inner {
    /// The authoritative cart. The lock is held across publish + enqueue so
    /// subscribers and storage observe mutations in the same order they were
    /// applied, and never a mid-mutation sequence.
    cart: Mutex<Cart>,

    /// Snapshot channel; one new value per completed mutation.
    snapshot_tx: watch::Sender<CartSnapshot>,

    /// Persist queue sender.
    job_tx: mpsc::Sender<WriteJob>,

    /// Running count of failed persistence writes.
    write_failures: Arc<AtomicU64>,
}

impl Inner {
    async fn add_to_cart(&self, item: ProductMetadata) -> StoreResult<()> {
        item.validate()?;

        let mut cart = self.cart.lock().await;
        let outcome = cart.add(item);
        debug!(?outcome, items = cart.len(), "add_to_cart");
        self.commit(&cart).await
    }

    async fn increment(&self, id: &str) -> StoreResult<()> {
        let mut cart = self.cart.lock().await;
        let found = cart.increment(id);
        if !found {
            debug!(id, "increment on absent id; state unchanged");
        }
        self.commit(&cart).await
    }

    async fn decrement(&self, id: &str) -> StoreResult<()> {
        let mut cart = self.cart.lock().await;
        let outcome = cart.decrement(id);
        debug!(id, ?outcome, "decrement");
        self.commit(&cart).await
    }

    /// Publishes the post-mutation snapshot and enqueues its persistence.
    ///
    /// Called with the cart lock held. Runs unconditionally after every
    /// mutation invocation, including no-ops, so storage and subscribers
    /// always reflect the operation's outcome.
    async fn commit(&self, cart: &Cart) -> StoreResult<()> {
        let bytes = codec::encode(cart)?;
        let snapshot: CartSnapshot = cart.items().to_vec().into();

        self.snapshot_tx.send_replace(snapshot);
        self.job_tx
            .send(WriteJob::Persist(bytes))
            .await
            .map_err(|_| StoreError::Closed)?;
        Ok(())
    }

    async fn flush(&self) -> StoreResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.job_tx
            .send(WriteJob::Flush(ack_tx))
            .await
            .map_err(|_| StoreError::Closed)?;
        ack_rx.await.map_err(|_| StoreError::Closed)
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The cart store: loads persisted state on open, serves mutations, and
/// keeps storage eventually consistent with memory after every mutation.
///
/// ## Ownership Model
/// One `CartStore` per process instance - the single logical writer. Pass it
/// by reference (or hand out [`CartHandle`]s) to whatever owns the UI tree;
/// there is deliberately no global singleton.
pub struct CartStore {
    inner: Arc<Inner>,
    writer: JoinHandle<()>,
}

impl CartStore {
    /// Opens the store: loads any previously persisted cart, then starts
    /// serving mutations.
    ///
    /// ## Load Policy
    /// - No blob under the key: start empty
    /// - Valid blob: decoded cart
    /// - Corrupt blob (malformed JSON or invariant-violating content):
    ///   start empty with a `warn!` diagnostic - cart data is not worth
    ///   failing startup over
    /// - Storage read error: propagated as [`StoreError::Load`] - starting
    ///   empty over readable data that momentarily failed to load would
    ///   clobber a live cart on the next write
    pub async fn open(kv: Arc<dyn KvStore>, config: StoreConfig) -> StoreResult<Self> {
        let cart = match kv.get(&config.storage_key).await? {
            Some(bytes) => match codec::decode(&bytes) {
                Ok(cart) => {
                    info!(items = cart.len(), "Loaded persisted cart");
                    cart
                }
                Err(e) => {
                    warn!(error = %e, "Persisted cart blob is corrupt; starting empty");
                    Cart::new()
                }
            },
            None => {
                info!("No persisted cart found; starting empty");
                Cart::new()
            }
        };

        let (job_tx, job_rx) = mpsc::channel(config.write_queue_capacity);
        let write_failures = Arc::new(AtomicU64::new(0));

        let writer = PersistWriter::new(
            kv,
            config.storage_key.clone(),
            job_rx,
            write_failures.clone(),
        );
        let writer = tokio::spawn(writer.run());

        let snapshot: CartSnapshot = cart.items().to_vec().into();
        let (snapshot_tx, _) = watch::channel(snapshot);

        Ok(CartStore {
            inner: Arc::new(Inner {
                cart: Mutex::new(cart),
                snapshot_tx,
                job_tx,
                write_failures,
            }),
            writer,
        })
    }

    /// Adds a product to the cart, or increments its quantity if already
    /// present. Quantity is engine-assigned: first add starts at 1.
    ///
    /// ## Returns
    /// * `Ok(())` - state updated, snapshot published, write enqueued
    /// * `Err(StoreError::Input)` - metadata has no id; nothing changed
    pub async fn add_to_cart(&self, item: ProductMetadata) -> StoreResult<()> {
        self.inner.add_to_cart(item).await
    }

    /// Increments the quantity of an item by id.
    ///
    /// An unknown id is a no-op on state, but the (unchanged) sequence is
    /// still persisted - persistence is unconditional per invocation.
    pub async fn increment(&self, id: &str) -> StoreResult<()> {
        self.inner.increment(id).await
    }

    /// Decrements the quantity of an item by id; quantity reaching zero
    /// removes the entry. An unknown id is a no-op on state.
    ///
    /// As with [`increment`](Self::increment), the resulting sequence is
    /// persisted unconditionally.
    pub async fn decrement(&self, id: &str) -> StoreResult<()> {
        self.inner.decrement(id).await
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Subscribes to snapshot updates: one new value observed per completed
    /// mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Returns a detachable handle for the UI binding layer.
    ///
    /// The handle is only usable while this store is alive; afterwards every
    /// operation on it fails with [`StoreError::ScopeEnded`].
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Number of persistence writes that have failed so far.
    ///
    /// Failed writes are logged and tolerated (memory stays authoritative);
    /// this counter is the "reported" half of that contract.
    pub fn write_failures(&self) -> u64 {
        self.inner.write_failures.load(Ordering::Relaxed)
    }

    /// Waits until every persistence write queued so far has completed.
    pub async fn flush(&self) -> StoreResult<()> {
        self.inner.flush().await
    }

    /// Flushes the persist queue and shuts the store down.
    ///
    /// Outstanding [`CartHandle`]s observe [`StoreError::ScopeEnded`] from
    /// this point on. Dropping the store without calling `close` also stops
    /// the writer after draining the queue, but without waiting for it.
    pub async fn close(self) -> StoreResult<()> {
        let CartStore { inner, writer } = self;

        let flushed = inner.flush().await;
        // Dropping the last Inner reference closes the job channel, which
        // ends the writer loop.
        drop(inner);
        if writer.await.is_err() {
            error!("Persist writer task panicked");
        }

        flushed
    }
}

// =============================================================================
// Cart Handle
// =============================================================================

/// The accessor the UI binding layer holds.
///
/// ## Scope Contract
/// A handle is valid exactly as long as its [`CartStore`] is alive. Using
/// it afterwards is a programming error and fails fast with
/// [`StoreError::ScopeEnded`] - never a silent default.
#[derive(Clone)]
pub struct CartHandle {
    inner: Weak<Inner>,
}

impl CartHandle {
    fn inner(&self) -> StoreResult<Arc<Inner>> {
        self.inner.upgrade().ok_or(StoreError::ScopeEnded)
    }

    /// See [`CartStore::add_to_cart`].
    pub async fn add_to_cart(&self, item: ProductMetadata) -> StoreResult<()> {
        self.inner()?.add_to_cart(item).await
    }

    /// See [`CartStore::increment`].
    pub async fn increment(&self, id: &str) -> StoreResult<()> {
        self.inner()?.increment(id).await
    }

    /// See [`CartStore::decrement`].
    pub async fn decrement(&self, id: &str) -> StoreResult<()> {
        self.inner()?.decrement(id).await
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> StoreResult<CartSnapshot> {
        Ok(self.inner()?.snapshot_tx.borrow().clone())
    }

    /// Subscribes to snapshot updates.
    pub fn subscribe(&self) -> StoreResult<watch::Receiver<CartSnapshot>> {
        Ok(self.inner()?.snapshot_tx.subscribe())
    }
}

// =============================================================================
// Tests
// =============================================================================
