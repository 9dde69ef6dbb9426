#![forbid(unsafe_code)]

//! Library item model: ids, kinds, and the grid record.
//!
//! Items are created and deleted by outside collaborators (upload, folder
//! management). This engine mutates only `order` and `container`.

use std::fmt;

/// Opaque unique identifier for a library item.
///
/// Ids come from the backing store (opaque strings); the engine never
/// inspects their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What a grid card holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemKind {
    Book,
    Folder,
}

impl ItemKind {
    /// True for [`ItemKind::Book`].
    #[inline]
    #[must_use]
    pub const fn is_book(self) -> bool {
        matches!(self, ItemKind::Book)
    }

    /// True for [`ItemKind::Folder`].
    #[inline]
    #[must_use]
    pub const fn is_folder(self) -> bool {
        matches!(self, ItemKind::Folder)
    }
}

/// One entry of the library grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LibraryItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub title: String,
    /// Sibling rank within the containing view. Persisted values are dense
    /// and zero-based; in-memory gaps are tolerated until the next reorder.
    pub order: u32,
    /// Owning folder; `None` means the library root.
    #[cfg_attr(feature = "serde", serde(rename = "containerId"))]
    pub container: Option<ItemId>,
}

impl LibraryItem {
    /// Create an item at order 0 in the library root.
    pub fn new(id: impl Into<ItemId>, kind: ItemKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            order: 0,
            container: None,
        }
    }

    /// Convenience constructor for a book card.
    pub fn book(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self::new(id, ItemKind::Book, title)
    }

    /// Convenience constructor for a folder card.
    pub fn folder(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self::new(id, ItemKind::Folder, title)
    }

    /// Set the sibling rank.
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Set the owning folder.
    #[must_use]
    pub fn with_container(mut self, container: Option<ItemId>) -> Self {
        self.container = container;
        self
    }
}
