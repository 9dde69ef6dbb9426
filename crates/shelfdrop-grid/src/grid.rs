#![forbid(unsafe_code)]

//! Drop resolution for one library view.
//!
//! [`LibraryGrid`] owns the ordered item list behind a single grid view (the
//! library root or the inside of one folder) and resolves the end of each
//! drag gesture against it: the dragged card takes a sibling's slot, a book
//! disappears into a folder, a book leaves a folder view for the root, or
//! nothing happens. Resolution is local-state-first: the list mutates before
//! the matching persistence request is handed to the [`LibraryStore`], and
//! the caller never waits on the network to reflect the new arrangement.
//!
//! # State Machine
//!
//! One gesture runs `Idle -> Dragging -> terminal -> Idle`. The
//! `Idle`/`Dragging` half lives in the engine (`shelfdrop-core`); the
//! terminal states are this module's [`DropOutcome`] variants.
//!
//! # Invariants
//!
//! 1. After [`DropOutcome::Reordered`], `order` values are dense, zero-based,
//!    and sequential in display order, and one reorder batch covering the
//!    whole list has been dispatched.
//! 2. An optimistic removal (folder or root move) keeps the remaining items'
//!    `order` values; the gap lasts until the next reorder commit or refresh.
//! 3. [`DropOutcome::Cancelled`] leaves the list untouched and dispatches
//!    nothing.
//! 4. A failed persistence request never rolls the list back; the next
//!    [`refresh`](LibraryGrid::refresh) from the source of truth wins.
//!
//! # Failure Modes
//!
//! - Stale ids (the active card or the target deleted mid-gesture, a folder
//!   zone naming a non-folder) resolve to `Cancelled`, never a panic.
//! - A root-zone drop reported while the grid is already at root is stale and
//!   cancels; the host never offers that zone there.

use shelfdrop_core::{DropTarget, ItemId, LibraryItem};

use crate::persist::{LibraryStore, dispatch_move, dispatch_reorder};

/// Terminal state of one drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The dragged card took a sibling's slot; the list was renumbered and a
    /// reorder batch dispatched.
    Reordered,
    /// The dragged book left this view into the given folder.
    MovedToFolder(ItemId),
    /// The dragged book left this folder view for the library root.
    MovedToRoot,
    /// No valid target; the list is untouched and nothing was dispatched.
    Cancelled,
}

impl DropOutcome {
    /// True if the gesture ended without changing anything.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DropOutcome::Cancelled)
    }
}

/// The ordered item list behind one grid view, plus its drop coordinator.
///
/// Construct with [`new`](LibraryGrid::new) for the library root or
/// [`in_folder`](LibraryGrid::in_folder) for a folder's contents; feed the
/// engine session's final hover into [`finish_drag`](LibraryGrid::finish_drag)
/// on release.
#[derive(Debug, Clone)]
pub struct LibraryGrid {
    /// Folder whose contents this view shows; `None` at the library root.
    view: Option<ItemId>,
    items: Vec<LibraryItem>,
}

impl LibraryGrid {
    /// Grid showing the library root.
    ///
    /// Items are stable-sorted by `order` (equal orders keep the given
    /// sequence), so hosts can hand over unordered query results.
    #[must_use]
    pub fn new(items: Vec<LibraryItem>) -> Self {
        Self::with_view(None, items)
    }

    /// Grid showing the contents of one folder.
    #[must_use]
    pub fn in_folder(folder: impl Into<ItemId>, items: Vec<LibraryItem>) -> Self {
        Self::with_view(Some(folder.into()), items)
    }

    fn with_view(view: Option<ItemId>, mut items: Vec<LibraryItem>) -> Self {
        items.sort_by_key(|item| item.order);
        Self { view, items }
    }

    /// Whether this grid shows the inside of a folder.
    ///
    /// The "move back to library root" dropzone is offered only here.
    #[inline]
    #[must_use]
    pub fn in_folder_view(&self) -> bool {
        self.view.is_some()
    }

    /// Folder whose contents this view shows, if any.
    #[inline]
    #[must_use]
    pub fn view(&self) -> Option<&ItemId> {
        self.view.as_ref()
    }

    /// The items, in display order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[LibraryItem] {
        &self.items
    }

    /// Number of items currently in the view.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the view holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LibraryItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Replace the list with a fresh snapshot from the source of truth.
    ///
    /// This is the recovery path for optimistic divergence: failed moves and
    /// reorders are never rolled back locally, the next refresh wins instead.
    pub fn refresh(&mut self, items: Vec<LibraryItem>) {
        self.items = items;
        self.items.sort_by_key(|item| item.order);
    }

    fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Resolve the end of a drag gesture.
    ///
    /// `over` is the target the gesture released on (the engine session's
    /// final hover); `None` cancels, as does any target the current list
    /// cannot honor. Local state mutates first, then exactly one matching
    /// request goes to `store` fire-and-forget.
    pub fn finish_drag<S: LibraryStore + ?Sized>(
        &mut self,
        active: &ItemId,
        over: Option<&DropTarget>,
        store: &mut S,
    ) -> DropOutcome {
        let outcome = self.resolve(active, over, store);
        tracing::debug!(
            target: "shelfdrop.grid",
            item = %active,
            over = ?over,
            outcome = ?outcome,
            "drop resolved"
        );
        outcome
    }

    fn resolve<S: LibraryStore + ?Sized>(
        &mut self,
        active: &ItemId,
        over: Option<&DropTarget>,
        store: &mut S,
    ) -> DropOutcome {
        let Some(over) = over else {
            return DropOutcome::Cancelled;
        };
        let Some(from) = self.index_of(active) else {
            return DropOutcome::Cancelled;
        };

        match over {
            DropTarget::FolderZone(folder) => {
                // Only books move into folders, and only into a folder this
                // view still knows about.
                if !self.items[from].kind.is_book() {
                    return DropOutcome::Cancelled;
                }
                if !self.get(folder).is_some_and(|item| item.kind.is_folder()) {
                    return DropOutcome::Cancelled;
                }
                let moved = self.items.remove(from);
                dispatch_move(store, &moved.id, Some(folder));
                DropOutcome::MovedToFolder(folder.clone())
            }
            DropTarget::RootZone => {
                if !self.items[from].kind.is_book() || !self.in_folder_view() {
                    return DropOutcome::Cancelled;
                }
                let moved = self.items.remove(from);
                dispatch_move(store, &moved.id, None);
                DropOutcome::MovedToRoot
            }
            DropTarget::Sibling(target) => {
                if target == active {
                    return DropOutcome::Cancelled;
                }
                let Some(to) = self.index_of(target) else {
                    return DropOutcome::Cancelled;
                };
                // Stable array-move: everything between the two slots shifts
                // by one.
                let moved = self.items.remove(from);
                self.items.insert(to, moved);
                for (index, item) in self.items.iter_mut().enumerate() {
                    item.order = index as u32;
                }
                dispatch_reorder(store, &self.items);
                DropOutcome::Reordered
            }
        }
    }
}
