#![forbid(unsafe_code)]

//! Shelfdrop Core
//!
//! Spatial classification for library-grid drag gestures: given a
//! continuously moving pointer, decide on every evaluation tick whether the
//! dragged card is hovering a sibling slot for reordering, deep enough inside
//! a folder card to mean "move into folder", or neither.
//!
//! # Key Components
//!
//! - [`Rect`] / [`Point`] - Layout-unit geometry with the capture-zone math
//! - [`DropCandidate`] / [`DropTarget`] - Typed droppable regions and results
//! - [`CollisionClassifier`] - The per-tick decision function with its
//!   folder-capture fast path and sibling settle gate
//! - [`KeepaliveDispatcher`] - Synthetic pointer replay that keeps the host
//!   sensor's drag loop live while output is suppressed
//! - [`DragEngine`] - Per-gesture facade threading session, memory, and
//!   keepalive state for embedding hosts
//!
//! # Role in Shelfdrop
//! `shelfdrop-core` is the sensor-facing half: it plugs into the host's
//! pointer/drag sensor as its collision-detection strategy. The state-facing
//! half (`shelfdrop-grid`) consumes the final decision at gesture end and
//! applies it to the ordered item list.
//!
//! No clock is read anywhere in this crate; every time-sensitive call takes
//! an injected `now` so gestures replay deterministically under test.

pub mod candidate;
pub mod classifier;
pub mod engine;
pub mod geometry;
pub mod item;
pub mod keepalive;

pub use candidate::{CandidateTarget, DropCandidate, DropTarget};
pub use classifier::{
    ClassifierConfig, CollisionClassifier, PendingTarget, SensorFrame, closest_center,
};
pub use engine::{DragEngine, DragSession};
pub use geometry::{Point, Rect};
pub use item::{ItemId, ItemKind, LibraryItem};
pub use keepalive::{KeepaliveDispatcher, SensorChannel};
