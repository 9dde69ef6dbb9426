#![forbid(unsafe_code)]

//! Persistence contract and fire-and-forget dispatch.
//!
//! The coordinator applies every arrangement change to local state first and
//! then hands the matching request to a [`LibraryStore`]. Nothing here
//! waits: failures are logged and counted, never retried, never rolled back,
//! and never surfaced to classification. A stale arrangement is corrected by
//! the next list refresh from the source of truth.
//!
//! The reference backend maps [`LibraryStore::move_item`] to a per-item
//! `PATCH` and [`LibraryStore::reorder`] to a batch `POST`; the payload
//! types here serialize to exactly those request bodies. Response bodies are
//! ignored either way.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use shelfdrop_core::{ItemId, ItemKind, LibraryItem};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Monotonic counters
// ---------------------------------------------------------------------------

static PERSIST_DISPATCH_TOTAL: AtomicU64 = AtomicU64::new(0);
static PERSIST_FAILURE_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Total persistence requests dispatched (monotonic counter).
#[must_use]
pub fn persist_dispatch_total() -> u64 {
    PERSIST_DISPATCH_TOTAL.load(Ordering::Relaxed)
}

/// Total persistence requests that failed (monotonic counter).
#[must_use]
pub fn persist_failure_total() -> u64 {
    PERSIST_FAILURE_TOTAL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Errors and wire payloads
// ---------------------------------------------------------------------------

/// Failure reported by a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request never reached the server.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server rejected the request with status {0}")]
    Rejected(u16),
}

/// Body of the per-item move request.
///
/// Only the destination container is sent. The item's rank inside it is
/// server-side policy (appended after the container's current last item);
/// the client does not own that number and must not guess it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Destination folder; `None` moves the item back to the library root.
    pub container_id: Option<ItemId>,
}

/// One entry of the reorder batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub id: ItemId,
    pub kind: ItemKind,
    pub order: u32,
}

impl OrderEntry {
    /// Snapshot an item's current rank.
    #[must_use]
    pub fn from_item(item: &LibraryItem) -> Self {
        Self {
            id: item.id.clone(),
            kind: item.kind,
            order: item.order,
        }
    }
}

/// Body of the batch reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<OrderEntry>,
}

// ---------------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------------

/// Backend consuming arrangement changes.
///
/// Implementations are free to enqueue work internally (a worker thread, a
/// browser fetch, a test log); the coordinator treats both calls as
/// fire-and-forget and only ever logs their results.
pub trait LibraryStore {
    /// Re-parent one item.
    fn move_item(&mut self, item: &ItemId, request: &MoveRequest) -> Result<(), StoreError>;

    /// Replace the persisted order of every item in the affected list.
    fn reorder(&mut self, request: &ReorderRequest) -> Result<(), StoreError>;
}

/// A store that accepts and drops every request. For hosts without a
/// backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl LibraryStore for NullStore {
    fn move_item(&mut self, _item: &ItemId, _request: &MoveRequest) -> Result<(), StoreError> {
        Ok(())
    }

    fn reorder(&mut self, _request: &ReorderRequest) -> Result<(), StoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fire-and-forget dispatch
// ---------------------------------------------------------------------------

/// Dispatch a move request, swallowing and logging any failure.
pub fn dispatch_move<S: LibraryStore + ?Sized>(
    store: &mut S,
    item: &ItemId,
    container: Option<&ItemId>,
) {
    PERSIST_DISPATCH_TOTAL.fetch_add(1, Ordering::Relaxed);
    let request = MoveRequest {
        container_id: container.cloned(),
    };
    tracing::debug!(
        target: "shelfdrop.persist",
        item = %item,
        container = ?request.container_id,
        "dispatching move"
    );
    if let Err(err) = store.move_item(item, &request) {
        PERSIST_FAILURE_TOTAL.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            target: "shelfdrop.persist",
            item = %item,
            error = %err,
            "move request failed; keeping optimistic state"
        );
    }
}

/// Dispatch a reorder batch covering `items`, swallowing and logging any
/// failure.
pub fn dispatch_reorder<S: LibraryStore + ?Sized>(store: &mut S, items: &[LibraryItem]) {
    PERSIST_DISPATCH_TOTAL.fetch_add(1, Ordering::Relaxed);
    let request = ReorderRequest {
        items: items.iter().map(OrderEntry::from_item).collect(),
    };
    tracing::debug!(
        target: "shelfdrop.persist",
        batch = request.items.len(),
        "dispatching reorder"
    );
    if let Err(err) = store.reorder(&request) {
        PERSIST_FAILURE_TOTAL.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            target: "shelfdrop.persist",
            error = %err,
            "reorder request failed; keeping optimistic state"
        );
    }
}
