use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;

use crate::error::AnimationResult;
use crate::render::TransitionDirective;

/// The unit of scheduling: one caller invocation's resolved transition
/// sequence, its interruption flag, and the completion channel bound to
/// the originating call.
pub(super) struct TransitionRequest {
    pub(super) directives: Vec<TransitionDirective>,
    pub(super) immediate: bool,
    pub(super) handle: Rc<RequestHandle>,
}

impl TransitionRequest {
    pub(super) fn new(
        directives: Vec<TransitionDirective>,
        immediate: bool,
    ) -> (Self, oneshot::Receiver<AnimationResult<()>>) {
        let (sender, receiver) = oneshot::channel();
        let handle = Rc::new(RequestHandle {
            completion: RefCell::new(Some(sender)),
            remaining: Cell::new(directives.len()),
        });
        (
            Self {
                directives,
                immediate,
                handle,
            },
            receiver,
        )
    }
}

/// Shared completion bookkeeping for one request.
///
/// Queue items and the runner hold `Rc` clones of the handle; whichever
/// path settles first wins and later settlements are ignored.
pub(super) struct RequestHandle {
    completion: RefCell<Option<oneshot::Sender<AnimationResult<()>>>>,
    /// Transitions of this request not yet finished by the runner.
    remaining: Cell<usize>,
}

impl RequestHandle {
    /// Settles the caller future exactly once.
    ///
    /// The receiver may already be dropped by a caller that lost interest;
    /// completion is best-effort.
    pub(super) fn settle(&self, result: AnimationResult<()>) {
        if let Some(sender) = self.completion.borrow_mut().take() {
            let _ = sender.send(result);
        }
    }

    /// Marks one transition finished; returns `true` when it was the last.
    pub(super) fn finish_one(&self) -> bool {
        let remaining = self.remaining.get().saturating_sub(1);
        self.remaining.set(remaining);
        remaining == 0
    }
}
