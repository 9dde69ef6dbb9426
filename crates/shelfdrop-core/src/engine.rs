#![forbid(unsafe_code)]

//! Per-gesture drag engine.
//!
//! [`DragEngine`] bundles the classifier, the keepalive dispatcher, and one
//! [`DragSession`] at a time, so an embedding host drives a single object:
//! `begin_drag` on the sensor's drag-start, `evaluate` on every sensor tick,
//! `pump_keepalive` from its timer source, and `end_drag` on release. The
//! per-gesture settle memory and pointer bookkeeping live in the session and
//! die with it; nothing carries over from one gesture to the next.
//!
//! The engine also mirrors the host sensor's notion of the current over
//! target: [`hover`](DragEngine::hover) is the head of the last evaluation's
//! ranked result, and `None` while classification is suppressed or nothing
//! ranks. Releasing during suppression therefore resolves to a cancelled
//! gesture downstream.

use web_time::Instant;

use crate::candidate::{DropCandidate, DropTarget};
use crate::classifier::{ClassifierConfig, CollisionClassifier, PendingTarget, SensorFrame};
use crate::geometry::{Point, Rect};
use crate::item::{ItemId, ItemKind};
use crate::keepalive::{KeepaliveDispatcher, SensorChannel};

/// Ephemeral state for one drag gesture.
#[derive(Debug)]
pub struct DragSession {
    item: ItemId,
    kind: ItemKind,
    memory: PendingTarget,
    hover: Option<DropTarget>,
    last_pointer: Option<Point>,
    started_at: Instant,
}

impl DragSession {
    /// Id of the card being dragged.
    #[inline]
    #[must_use]
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    /// Kind of the card being dragged.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The current over target, as of the last evaluation.
    #[inline]
    #[must_use]
    pub fn hover(&self) -> Option<&DropTarget> {
        self.hover.as_ref()
    }

    /// Last physical pointer position seen in any frame of this gesture.
    #[inline]
    #[must_use]
    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    /// When the gesture began.
    #[inline]
    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}

/// Drives classification, keepalive, and session lifecycle for a host.
#[derive(Debug)]
pub struct DragEngine {
    classifier: CollisionClassifier,
    keepalive: KeepaliveDispatcher,
    session: Option<DragSession>,
}

impl DragEngine {
    /// Create an engine with the given classifier tuning. The keepalive
    /// replay delay follows the settle delay.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        let keepalive = KeepaliveDispatcher::new(config.settle_delay);
        Self {
            classifier: CollisionClassifier::new(config),
            keepalive,
            session: None,
        }
    }

    /// The classifier tuning in effect.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        self.classifier.config()
    }

    /// Whether a gesture is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The in-progress session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// The current over target, if any.
    #[inline]
    #[must_use]
    pub fn hover(&self) -> Option<&DropTarget> {
        self.session.as_ref().and_then(DragSession::hover)
    }

    /// Whether a keepalive replay is armed.
    #[inline]
    #[must_use]
    pub fn keepalive_pending(&self) -> bool {
        self.keepalive.is_pending()
    }

    /// Start a gesture for `item`, resetting all per-gesture state.
    ///
    /// A gesture already in progress is discarded; the sensor owns gesture
    /// boundaries and a missed release must not wedge the engine.
    pub fn begin_drag(&mut self, item: ItemId, kind: ItemKind, now: Instant) {
        if let Some(stale) = self.session.take() {
            tracing::debug!(target: "shelfdrop.engine", item = %stale.item, "discarding unfinished gesture");
        }
        tracing::debug!(target: "shelfdrop.engine", item = %item, kind = ?kind, "drag started");
        self.keepalive.reset();
        self.session = Some(DragSession {
            item,
            kind,
            memory: PendingTarget::new(),
            hover: None,
            last_pointer: None,
            started_at: now,
        });
    }

    /// Evaluate one sensor tick.
    ///
    /// Returns the ranked target list; empty means "no active target this
    /// tick" (suppression or nothing ranked). Ticks outside a gesture are
    /// ignored and yield the empty list.
    pub fn evaluate(
        &mut self,
        collision_rect: Rect,
        pointer: Option<Point>,
        candidates: &[DropCandidate],
        now: Instant,
    ) -> Vec<DropTarget> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if pointer.is_some() {
            session.last_pointer = pointer;
        }
        let frame = SensorFrame {
            active_id: &session.item,
            active_kind: session.kind,
            collision_rect,
            pointer: pointer.or(session.last_pointer),
            candidates,
        };
        let ranked = self
            .classifier
            .classify(&frame, &mut session.memory, &mut self.keepalive, now);
        session.hover = ranked.first().cloned();
        ranked
    }

    /// Fire a due keepalive replay into the host's sensor channel.
    ///
    /// Call from the host's tick/timer source; returns `true` if a replay
    /// fired (the host should follow up with a fresh [`evaluate`] call, which
    /// is exactly what the replayed pointer-move produces in a wired-up
    /// sensor).
    ///
    /// [`evaluate`]: DragEngine::evaluate
    pub fn pump_keepalive(&mut self, now: Instant, channel: &mut impl SensorChannel) -> bool {
        self.keepalive.pump(now, channel)
    }

    /// End the gesture, returning its final session.
    ///
    /// The session's [`hover`](DragSession::hover) is what the coordinator
    /// resolves the drop against; `None` there means the gesture cancels.
    pub fn end_drag(&mut self, now: Instant) -> Option<DragSession> {
        let session = self.session.take()?;
        tracing::debug!(
            target: "shelfdrop.engine",
            item = %session.item,
            over = ?session.hover,
            held_ms = now.duration_since(session.started_at).as_millis() as u64,
            "drag ended"
        );
        Some(session)
    }
}
