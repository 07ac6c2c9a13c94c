use std::future::Future;

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{FrameSelector, TransitionOptions, TransitionPlan};
use crate::error::{AnimationError, AnimationResult};
use crate::render::{TransitionDirective, TransitionRenderer};

use super::controller::{AnimationController, Phase};
use super::events::{AnimationEvent, EventSink};
use super::request::TransitionRequest;

/// Per-call scheduling options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Discard every queued-but-unstarted request in favor of this one.
    /// The transition currently executing always runs to completion.
    pub immediate: bool,
}

impl AnimationOptions {
    #[must_use]
    pub fn immediate() -> Self {
        Self { immediate: true }
    }
}

impl<R: TransitionRenderer, S: EventSink> AnimationController<R, S> {
    /// Animates to the selected frames, in resolved order.
    ///
    /// Resolution happens synchronously at call time: an unknown frame or
    /// group fails with [`AnimationError::NotFound`] before anything is
    /// queued, and an immediate request displaces pending work before this
    /// call returns. The returned future settles once this call's frames
    /// have all transitioned (or the request is interrupted or a renderer
    /// error occurs), and must be polled for the queue to make progress.
    #[must_use = "animations run only while the returned future is polled"]
    pub fn animate(
        &self,
        frames: impl Into<FrameSelector>,
        options: impl Into<TransitionPlan>,
        animation: AnimationOptions,
    ) -> impl Future<Output = AnimationResult<()>> + '_ {
        let outcome = self.resolve_and_enqueue(frames.into(), options.into(), animation);
        async move {
            match outcome {
                Ok(receiver) => self.drive(receiver).await,
                Err(error) => Err(error),
            }
        }
    }

    /// Single-shot transition over one implicit frame not drawn from the
    /// store; identical queuing and interruption rules as [`animate`].
    ///
    /// [`animate`]: AnimationController::animate
    #[must_use = "transitions run only while the returned future is polled"]
    pub fn transition(
        &self,
        data: Option<Vec<Value>>,
        layout: Option<Value>,
        traces: Option<Vec<usize>>,
        options: TransitionOptions,
    ) -> impl Future<Output = AnimationResult<()>> + '_ {
        let directive = TransitionDirective {
            data,
            layout,
            traces,
            options,
        };
        let receiver = self.enqueue(vec![directive], false);
        async move { self.drive(receiver).await }
    }

    fn resolve_and_enqueue(
        &self,
        selector: FrameSelector,
        plan: TransitionPlan,
        animation: AnimationOptions,
    ) -> AnimationResult<oneshot::Receiver<AnimationResult<()>>> {
        let resolved = self.frames.borrow().resolve(&selector)?;
        let directives = resolved
            .into_iter()
            .enumerate()
            .map(|(index, frame)| {
                let options = frame
                    .transition
                    .unwrap_or_else(|| plan.options_for(index));
                TransitionDirective {
                    data: frame.data,
                    layout: frame.layout,
                    traces: frame.traces,
                    options,
                }
            })
            .collect();
        Ok(self.enqueue(directives, animation.immediate))
    }

    /// Synchronous half of scheduling: queue reshaping, interruption
    /// rejections and the Idle -> Running edge all happen here, at call
    /// time, before the caller ever polls.
    fn enqueue(
        &self,
        directives: Vec<TransitionDirective>,
        immediate: bool,
    ) -> oneshot::Receiver<AnimationResult<()>> {
        let (request, receiver) = TransitionRequest::new(directives, immediate);

        if request.directives.is_empty() {
            // Nothing to schedule; settle without touching queue or events.
            request.handle.settle(Ok(()));
            return receiver;
        }

        debug!(
            transitions = request.directives.len(),
            immediate, "enqueue transition request"
        );

        let (displaced, entered_running) = {
            let mut state = self.state.borrow_mut();
            let displaced = state.queue.enqueue(request);
            let entered_running = state.phase == Phase::Idle;
            if entered_running {
                state.phase = Phase::Running;
            }
            (displaced, entered_running)
        };

        if !displaced.is_empty() {
            debug!(requests = displaced.len(), "displacing queued requests");
        }
        for request in displaced {
            self.sink.notify(AnimationEvent::AnimationInterrupted);
            request.settle(Err(AnimationError::Interrupted));
        }
        if entered_running {
            self.sink.notify(AnimationEvent::Animating);
        }

        receiver
    }
}
