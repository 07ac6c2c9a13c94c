use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::core::{Frame, FrameDefinition, FrameStore};
use crate::render::TransitionRenderer;

use super::events::EventSink;
use super::queue::TransitionQueue;
use super::request::RequestHandle;

/// Scheduling phase of one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Phase {
    Idle,
    Running,
}

/// Mutable per-instance scheduling state.
///
/// All mutation happens synchronously between renderer awaits; no borrow
/// is ever held across a suspension point.
pub(super) struct AnimationState {
    pub(super) queue: TransitionQueue,
    pub(super) phase: Phase,
    /// True while some caller future owns the drain loop.
    pub(super) draining: bool,
    /// Request whose transition the renderer is currently executing.
    pub(super) current: Option<Rc<RequestHandle>>,
}

impl AnimationState {
    fn new() -> Self {
        Self {
            queue: TransitionQueue::default(),
            phase: Phase::Idle,
            draining: false,
            current: None,
        }
    }
}

/// Per-chart-instance animation facade and state machine.
///
/// The controller owns the frame store and the transition queue for one
/// chart instance; instances are fully independent. It schedules
/// [`animate`] and [`transition`] calls onto a single logical timeline:
/// requests execute in the order they became eligible, exactly one
/// renderer transition is in flight at any moment, and lifecycle events
/// are delivered through the injected [`EventSink`] strictly before the
/// corresponding caller future settles.
///
/// [`animate`]: AnimationController::animate
/// [`transition`]: AnimationController::transition
pub struct AnimationController<R: TransitionRenderer, S: EventSink> {
    pub(super) renderer: R,
    pub(super) sink: S,
    pub(super) frames: RefCell<FrameStore>,
    pub(super) state: RefCell<AnimationState>,
}

impl<R: TransitionRenderer, S: EventSink> AnimationController<R, S> {
    #[must_use]
    pub fn new(renderer: R, sink: S) -> Self {
        Self {
            renderer,
            sink,
            frames: RefCell::new(FrameStore::new()),
            state: RefCell::new(AnimationState::new()),
        }
    }

    /// Upserts frame definitions into this instance's store.
    ///
    /// No rendering side effects; running animations keep the frames they
    /// resolved at enqueue time.
    pub fn add_frames(&self, definitions: Vec<FrameDefinition>) {
        debug!(count = definitions.len(), "add frames");
        self.frames.borrow_mut().add_frames(definitions);
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Snapshot of a stored frame, if present.
    #[must_use]
    pub fn frame(&self, name: &str) -> Option<Frame> {
        self.frames.borrow().frame(name).cloned()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.borrow().frame_count()
    }

    /// Member frame names of `group`, in first-submission order.
    #[must_use]
    pub fn group(&self, group: &str) -> Option<Vec<String>> {
        self.frames.borrow().group(group).map(<[String]>::to_vec)
    }

    /// True when no request is executing and nothing is queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.borrow().phase == Phase::Idle
    }

    /// Number of queued, not-yet-started transitions.
    #[must_use]
    pub fn pending_transitions(&self) -> usize {
        self.state.borrow().queue.len()
    }
}
