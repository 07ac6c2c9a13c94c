use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::LocalBoxFuture;

use crate::error::{AnimationError, AnimationResult};

use super::{TransitionDirective, TransitionRenderer};

/// No-op renderer used by tests and headless scheduling.
///
/// Records every directive it receives and completes after a configurable
/// number of cooperative yields, so schedulers can be observed and
/// interrupted while a transition is still in flight. Individual calls can
/// be scripted to fail for error-path coverage.
#[derive(Debug, Default)]
pub struct NullTransitionRenderer {
    calls: RefCell<Vec<TransitionDirective>>,
    yields_per_call: Cell<usize>,
    failing_calls: RefCell<Vec<usize>>,
}

impl NullTransitionRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes each transition only after `yields` pending polls.
    #[must_use]
    pub fn with_yields(self, yields: usize) -> Self {
        self.yields_per_call.set(yields);
        self
    }

    /// Scripts the zero-based call `index` to fail with a renderer error.
    pub fn fail_call(&self, index: usize) {
        self.failing_calls.borrow_mut().push(index);
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<TransitionDirective> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn call(&self, index: usize) -> Option<TransitionDirective> {
        self.calls.borrow().get(index).cloned()
    }
}

impl TransitionRenderer for NullTransitionRenderer {
    fn transition(&self, directive: TransitionDirective) -> LocalBoxFuture<'_, AnimationResult<()>> {
        let index = {
            let mut calls = self.calls.borrow_mut();
            calls.push(directive);
            calls.len() - 1
        };
        let fails = self.failing_calls.borrow().contains(&index);
        let yields = self.yields_per_call.get();

        Box::pin(async move {
            for _ in 0..yields {
                yield_once().await;
            }
            if fails {
                Err(AnimationError::Renderer(format!(
                    "scripted failure on call {index}"
                )))
            } else {
                Ok(())
            }
        })
    }
}

/// Returns `Pending` exactly once, waking immediately, then completes.
async fn yield_once() {
    struct YieldOnce {
        yielded: bool,
    }

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.yielded {
                Poll::Ready(())
            } else {
                self.yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    YieldOnce { yielded: false }.await;
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use crate::core::TransitionOptions;
    use crate::error::AnimationError;
    use crate::render::{TransitionDirective, TransitionRenderer};

    use super::NullTransitionRenderer;

    fn directive(tag: &str) -> TransitionDirective {
        TransitionDirective {
            data: Some(vec![json!({ "frame": tag })]),
            layout: None,
            traces: None,
            options: TransitionOptions::default(),
        }
    }

    #[test]
    fn records_directives_in_call_order() {
        let renderer = NullTransitionRenderer::new();
        block_on(renderer.transition(directive("a"))).expect("transition succeeds");
        block_on(renderer.transition(directive("b"))).expect("transition succeeds");

        assert_eq!(renderer.call_count(), 2);
        assert_eq!(renderer.call(0), Some(directive("a")));
        assert_eq!(renderer.call(1), Some(directive("b")));
    }

    #[test]
    fn scripted_call_fails_with_renderer_error() {
        let renderer = NullTransitionRenderer::new();
        renderer.fail_call(1);

        block_on(renderer.transition(directive("a"))).expect("first call succeeds");
        let err = block_on(renderer.transition(directive("b"))).expect_err("second call fails");
        assert!(matches!(err, AnimationError::Renderer(_)));
    }

    #[test]
    fn yielding_transition_still_completes_under_an_executor() {
        let renderer = NullTransitionRenderer::new().with_yields(3);
        block_on(renderer.transition(directive("slow"))).expect("transition completes");
        assert_eq!(renderer.call_count(), 1);
    }
}
