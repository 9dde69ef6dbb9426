#![forbid(unsafe_code)]

//! Shelfdrop Grid
//!
//! The state-facing half of Shelfdrop: the ordered item list behind one
//! library view, the coordinator that resolves each drag gesture's end
//! against it, and the fire-and-forget persistence contract.
//!
//! # Key Components
//!
//! - [`LibraryGrid`] - Ordered items for one view plus drop resolution
//! - [`DropOutcome`] - Terminal state of a gesture
//! - [`LibraryStore`] - Backend contract for move and reorder requests
//!
//! # Role in Shelfdrop
//! `shelfdrop-core` classifies while the pointer moves; this crate acts when
//! it releases. [`LibraryGrid::finish_drag`] consumes the engine session's
//! final hover target, mutates local state first, and dispatches the matching
//! persistence request without awaiting it. Failures are logged and left for
//! the next refresh from the source of truth to correct.

pub mod grid;
pub mod persist;

pub use grid::{DropOutcome, LibraryGrid};
pub use persist::{
    LibraryStore, MoveRequest, NullStore, OrderEntry, ReorderRequest, StoreError, dispatch_move,
    dispatch_reorder, persist_dispatch_total, persist_failure_total,
};
