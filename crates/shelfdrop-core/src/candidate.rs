#![forbid(unsafe_code)]

//! Drop candidates and classification targets.
//!
//! The host sensor advertises one [`DropCandidate`] per droppable region on
//! every evaluation tick; the classifier answers with ranked [`DropTarget`]s.
//! Both sides are typed — nothing about a region's role is encoded in its id
//! string.
//!
//! ```
//! use shelfdrop_core::candidate::{CandidateTarget, DropCandidate};
//! use shelfdrop_core::geometry::Rect;
//! use shelfdrop_core::item::ItemKind;
//!
//! let folder = DropCandidate::folder("f1", Rect::new(0.0, 0.0, 200.0, 200.0));
//! assert!(matches!(
//!     folder.target,
//!     CandidateTarget::Card { kind: ItemKind::Folder, .. }
//! ));
//! ```

use crate::geometry::Rect;
use crate::item::{ItemId, ItemKind, LibraryItem};

/// What a droppable region stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateTarget {
    /// A sortable grid card (book or folder).
    Card { id: ItemId, kind: ItemKind },
    /// The "move back to library root" dropzone offered inside folder views.
    RootZone,
}

/// A droppable region advertised by the host for one evaluation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DropCandidate {
    pub target: CandidateTarget,
    /// Measured bounds. `None` while the host has not laid the region out
    /// yet; such candidates are skipped, never classified.
    pub rect: Option<Rect>,
}

impl DropCandidate {
    /// A sortable card with measured bounds.
    pub fn card(id: impl Into<ItemId>, kind: ItemKind, rect: Rect) -> Self {
        Self {
            target: CandidateTarget::Card {
                id: id.into(),
                kind,
            },
            rect: Some(rect),
        }
    }

    /// A book card with measured bounds.
    pub fn book(id: impl Into<ItemId>, rect: Rect) -> Self {
        Self::card(id, ItemKind::Book, rect)
    }

    /// A folder card with measured bounds.
    pub fn folder(id: impl Into<ItemId>, rect: Rect) -> Self {
        Self::card(id, ItemKind::Folder, rect)
    }

    /// The root dropzone with measured bounds.
    pub fn root_zone(rect: Rect) -> Self {
        Self {
            target: CandidateTarget::RootZone,
            rect: Some(rect),
        }
    }

    /// A card the host has registered but not laid out yet.
    pub fn unmeasured(id: impl Into<ItemId>, kind: ItemKind) -> Self {
        Self {
            target: CandidateTarget::Card {
                id: id.into(),
                kind,
            },
            rect: None,
        }
    }

    /// Build a card candidate for a grid item with its measured bounds.
    pub fn from_item(item: &LibraryItem, rect: Rect) -> Self {
        Self::card(item.id.clone(), item.kind, rect)
    }

    /// The target this candidate classifies as when chosen.
    #[must_use]
    pub fn to_target(&self) -> DropTarget {
        match &self.target {
            CandidateTarget::Card { id, .. } => DropTarget::Sibling(id.clone()),
            CandidateTarget::RootZone => DropTarget::RootZone,
        }
    }
}

/// The classifier's answer for one droppable region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Hovering a sortable sibling's slot.
    Sibling(ItemId),
    /// Deep inside a folder card's capture zone: move into this folder.
    FolderZone(ItemId),
    /// The root dropzone: move back to the library root.
    RootZone,
}
