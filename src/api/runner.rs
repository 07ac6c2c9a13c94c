use std::rc::Rc;

use futures::channel::oneshot;
use tracing::{trace, warn};

use crate::error::{AnimationError, AnimationResult};
use crate::render::{TransitionDirective, TransitionRenderer};

use super::controller::{AnimationController, Phase};
use super::events::{AnimationEvent, EventSink};
use super::request::RequestHandle;

/// Executes queued transitions strictly in sequence.
///
/// One renderer call is in flight at a time; the runner awaits each before
/// dispatching the next and brackets every call with the per-frame
/// notifications.
pub(super) struct TransitionRunner;

impl TransitionRunner {
    pub(super) async fn run<R: TransitionRenderer, S: EventSink>(
        controller: &AnimationController<R, S>,
        directive: TransitionDirective,
    ) -> AnimationResult<()> {
        trace!(traces = ?directive.traces, "dispatch transition");
        controller.sink.notify(AnimationEvent::Transitioning);
        let result = controller.renderer.transition(directive).await;
        if result.is_ok() {
            controller.sink.notify(AnimationEvent::Transitioned);
        }
        result
    }
}

impl<R: TransitionRenderer, S: EventSink> AnimationController<R, S> {
    /// Awaits the request bound to `receiver`, driving the shared queue if
    /// no other caller future currently does.
    ///
    /// The first future polled while no drain is active becomes the drain
    /// loop and keeps executing queued work (its own and later callers')
    /// until the queue empties; every other future merely awaits its
    /// completion channel.
    pub(super) async fn drive(
        &self,
        mut receiver: oneshot::Receiver<AnimationResult<()>>,
    ) -> AnimationResult<()> {
        if let Some(result) = settled(&mut receiver) {
            return result;
        }

        let claimed = {
            let mut state = self.state.borrow_mut();
            if state.draining {
                false
            } else {
                state.draining = true;
                true
            }
        };

        if claimed {
            self.drain().await;
            // The drain ran until the queue emptied, so this request was
            // either executed or displaced; both settle the channel.
            settled(&mut receiver).unwrap_or(Err(AnimationError::Interrupted))
        } else {
            match receiver.await {
                Ok(result) => result,
                Err(oneshot::Canceled) => Err(AnimationError::Interrupted),
            }
        }
    }

    /// The coordinating loop: dequeues and runs transitions until the
    /// queue is empty, settling each request as its last frame finishes.
    async fn drain(&self) {
        let guard = DrainGuard {
            controller: self,
            armed: true,
        };

        loop {
            let next = self.state.borrow_mut().queue.dequeue_next();
            let Some(item) = next else {
                break;
            };
            self.state.borrow_mut().current = Some(Rc::clone(&item.request));
            let result = TransitionRunner::run(self, item.directive).await;
            self.state.borrow_mut().current = None;
            self.finish_transition(&item.request, result);
        }

        guard.release();
    }

    fn finish_transition(&self, request: &Rc<RequestHandle>, result: AnimationResult<()>) {
        match result {
            Ok(()) => {
                let last_of_request = request.finish_one();
                let drained = self.leave_running_if_drained();
                if drained {
                    self.sink.notify(AnimationEvent::Animated);
                }
                if last_of_request {
                    request.settle(Ok(()));
                }
            }
            Err(error) => {
                warn!(error = %error, "transition failed; skipping request remainder");
                self.state.borrow_mut().queue.discard_request(request);
                let drained = self.leave_running_if_drained();
                if drained {
                    self.sink.notify(AnimationEvent::Animated);
                }
                request.settle(Err(error));
            }
        }
    }

    /// Running -> Idle edge; returns true when it fired.
    fn leave_running_if_drained(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.queue.is_empty() && state.phase == Phase::Running {
            state.phase = Phase::Idle;
            true
        } else {
            false
        }
    }
}

/// Restores scheduler invariants when a driving future is dropped
/// mid-flight: the aborted in-flight request rejects as interrupted and
/// the drain lock is released so the next call resumes the queue.
struct DrainGuard<'a, R: TransitionRenderer, S: EventSink> {
    controller: &'a AnimationController<R, S>,
    armed: bool,
}

impl<R: TransitionRenderer, S: EventSink> DrainGuard<'_, R, S> {
    fn release(mut self) {
        self.armed = false;
        self.controller.state.borrow_mut().draining = false;
    }
}

impl<R: TransitionRenderer, S: EventSink> Drop for DrainGuard<'_, R, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let aborted = {
            let mut state = self.controller.state.borrow_mut();
            state.draining = false;
            if state.queue.is_empty() {
                state.phase = Phase::Idle;
            }
            state.current.take()
        };
        if let Some(request) = aborted {
            self.controller
                .sink
                .notify(AnimationEvent::AnimationInterrupted);
            request.settle(Err(AnimationError::Interrupted));
        }
    }
}

fn settled(
    receiver: &mut oneshot::Receiver<AnimationResult<()>>,
) -> Option<AnimationResult<()>> {
    match receiver.try_recv() {
        Ok(Some(result)) => Some(result),
        Ok(None) => None,
        Err(oneshot::Canceled) => Some(Err(AnimationError::Interrupted)),
    }
}
