#![forbid(unsafe_code)]

//! Per-tick collision classification for grid drag gestures.
//!
//! [`CollisionClassifier`] is the decision function the host pointer sensor
//! calls on every evaluation tick: given the dragged card's rectangle and the
//! advertised candidate set, it answers with the ranked list of drop targets
//! the sensor should act on. Raw nearest-neighbor classification would reflow
//! the grid on every minor jitter across a slot boundary, so sibling results
//! pass through a settle gate: a newly-favored target is withheld until it
//! has stayed nearest for a continuous dwell window. Dropping a book into a
//! folder must feel instantaneous, so the folder-capture check runs first and
//! bypasses the gate entirely.
//!
//! # Decision priority
//!
//! 1. **Folder capture** (books only): if the dragged card's center is inside
//!    any folder card's capture zone (the folder's bounds shrunk to 85%,
//!    centered), that folder's [`DropTarget::FolderZone`] is the sole result,
//!    immediately.
//! 2. **Self hover**: if the nearest candidate is the dragged card itself,
//!    the settle memory is cleared and the ranked list is returned as-is.
//! 3. **Settle gate**: a nearest candidate that differs from the remembered
//!    one restarts the dwell clock. Until the dwell reaches the settle delay
//!    the result is the empty list and a keepalive replay is armed; from the
//!    delay onward the ranked list is returned.
//! 4. **Nothing ranked**: the memory is cleared and the empty list returned.
//!
//! # Invariants
//!
//! 1. Folder capture neither consults nor mutates the settle memory.
//! 2. An empty candidate set yields an empty result, never a panic.
//! 3. Suppression always arms the keepalive; the nothing-ranked path never
//!    does.
//! 4. Classifying the same frame twice at the same instant yields the same
//!    result twice.
//!
//! # Failure Modes
//!
//! - Candidates without a measured rectangle are skipped silently; they can
//!   neither capture nor rank.
//! - Equal center distances keep candidate order (the ranking sort is
//!   stable).
//!
//! Folder capture zones are derived here from folder card candidates; hosts
//! never advertise them as separate droppable regions.

use std::time::Duration;

use web_time::Instant;

use crate::candidate::{CandidateTarget, DropCandidate, DropTarget};
use crate::geometry::{Point, Rect};
use crate::item::{ItemId, ItemKind};
use crate::keepalive::KeepaliveDispatcher;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for collision classification.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Fraction of a folder card's bounds forming its capture zone
    /// (default: 0.85). The dragged card's center must be inside the zone,
    /// not merely over the folder's edge, to classify as a folder move.
    pub folder_zone_shrink: f32,
    /// Continuous dwell required before a newly-nearest sibling becomes the
    /// active target (default: 400ms). Also the keepalive replay delay.
    pub settle_delay: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            folder_zone_shrink: 0.85,
            settle_delay: Duration::from_millis(400),
        }
    }
}

impl ClassifierConfig {
    /// Set the folder capture-zone fraction.
    #[must_use]
    pub fn with_folder_zone_shrink(mut self, factor: f32) -> Self {
        self.folder_zone_shrink = factor;
        self
    }

    /// Set the sibling settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

// ---------------------------------------------------------------------------
// Settle memory
// ---------------------------------------------------------------------------

/// Settle-gate memory: the target currently on probation and when the
/// pointer started favoring it.
///
/// One cell lives per drag gesture, owned by the session (or the embedding
/// host) and threaded into every classify call; nothing here is global, so a
/// half-elapsed dwell can never leak into the next gesture.
#[derive(Debug, Clone, Default)]
pub struct PendingTarget {
    target: Option<DropTarget>,
    entered_at: Option<Instant>,
}

impl PendingTarget {
    /// Fresh, empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&DropTarget> {
        self.target.as_ref()
    }

    /// Forget the remembered target and its dwell clock.
    pub fn clear(&mut self) {
        self.target = None;
        self.entered_at = None;
    }

    fn is(&self, target: &DropTarget) -> bool {
        self.target.as_ref() == Some(target)
    }

    fn arm(&mut self, target: DropTarget, now: Instant) {
        self.target = Some(target);
        self.entered_at = Some(now);
    }

    /// Time continuously spent favoring the remembered target.
    fn dwell(&self, now: Instant) -> Duration {
        self.entered_at
            .map_or(Duration::ZERO, |entered| now.duration_since(entered))
    }
}

// ---------------------------------------------------------------------------
// Sensor frame
// ---------------------------------------------------------------------------

/// One evaluation tick's worth of input from the host sensor.
#[derive(Debug)]
pub struct SensorFrame<'a> {
    /// Id of the card being dragged.
    pub active_id: &'a ItemId,
    /// Kind of the card being dragged.
    pub active_kind: ItemKind,
    /// The dragged card's current rectangle.
    pub collision_rect: Rect,
    /// Last known physical pointer position, when the sensor tracks one.
    /// Keepalive replays fall back to the collision rectangle's center.
    pub pointer: Option<Point>,
    /// Every droppable region the host currently advertises.
    pub candidates: &'a [DropCandidate],
}

// ---------------------------------------------------------------------------
// Nearest-target heuristic
// ---------------------------------------------------------------------------

/// Rank candidates by distance between rectangle centers, nearest first.
///
/// Unmeasured candidates are skipped. The sort is stable, so equal distances
/// keep candidate order.
#[must_use]
pub fn closest_center(collision_rect: &Rect, candidates: &[DropCandidate]) -> Vec<DropTarget> {
    let center = collision_rect.center();
    let mut ranked: Vec<(f32, DropTarget)> = candidates
        .iter()
        .filter_map(|candidate| {
            let rect = candidate.rect?;
            Some((center.distance_squared(rect.center()), candidate.to_target()))
        })
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().map(|(_, target)| target).collect()
}

// ---------------------------------------------------------------------------
// CollisionClassifier
// ---------------------------------------------------------------------------

/// The per-tick drop-target decision function.
///
/// Stateless apart from its configuration: the settle memory and keepalive
/// state are threaded in by the caller, so the classifier can be shared
/// across gestures (and hosts) freely.
#[derive(Debug, Clone)]
pub struct CollisionClassifier {
    config: ClassifierConfig,
}

impl CollisionClassifier {
    /// Create a classifier with the given configuration.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: ClassifierConfig) {
        self.config = config;
    }

    /// Classify one sensor frame.
    ///
    /// Returns the ranked target list the host should act on; empty means
    /// "no active target this tick". Side effects are limited to `memory`
    /// and, on suppression, arming `keepalive`.
    pub fn classify(
        &self,
        frame: &SensorFrame<'_>,
        memory: &mut PendingTarget,
        keepalive: &mut KeepaliveDispatcher,
        now: Instant,
    ) -> Vec<DropTarget> {
        // Folder capture wins over everything and is never debounced.
        if frame.active_kind.is_book() {
            let center = frame.collision_rect.center();
            for candidate in frame.candidates {
                if let CandidateTarget::Card {
                    id,
                    kind: ItemKind::Folder,
                } = &candidate.target
                    && let Some(rect) = candidate.rect
                    && rect
                        .shrink_centered(self.config.folder_zone_shrink)
                        .contains(center)
                {
                    tracing::trace!(target: "shelfdrop.classify", folder = %id, "folder capture");
                    return vec![DropTarget::FolderZone(id.clone())];
                }
            }
        }

        let ranked = closest_center(&frame.collision_rect, frame.candidates);
        let Some(nearest) = ranked.first() else {
            memory.clear();
            return ranked;
        };

        // Hovering one's own slot is a no-op; dwell tracking starts over.
        if matches!(nearest, DropTarget::Sibling(id) if id == frame.active_id) {
            memory.clear();
            return ranked;
        }

        if !memory.is(nearest) {
            tracing::trace!(target: "shelfdrop.classify", over = ?nearest, "dwell restarted");
            memory.arm(nearest.clone(), now);
        }

        if memory.dwell(now) < self.config.settle_delay {
            // Withhold the result while the target settles, and make sure
            // the sensor re-evaluates once the window elapses even if the
            // physical pointer never moves again.
            let pointer = frame
                .pointer
                .unwrap_or_else(|| frame.collision_rect.center());
            keepalive.schedule(pointer, now);
            return Vec::new();
        }

        tracing::trace!(target: "shelfdrop.classify", over = ?nearest, "target settled");
        ranked
    }
}
