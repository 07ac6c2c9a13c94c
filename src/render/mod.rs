mod null_renderer;

pub use null_renderer::NullTransitionRenderer;

use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::core::TransitionOptions;
use crate::error::AnimationResult;

/// Fully resolved input for one renderer transition call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionDirective {
    /// One patch value per affected trace, in `traces` order.
    pub data: Option<Vec<Value>>,
    pub layout: Option<Value>,
    /// Trace indices the data patch applies to; `None` means every trace.
    pub traces: Option<Vec<usize>>,
    pub options: TransitionOptions,
}

/// Contract implemented by any rendering backend.
///
/// The engine awaits the returned future before dispatching the next
/// transition, so backends own interpolation, elapsed-time handling and
/// redraw behavior. Exactly one transition future is in flight per
/// controller at any moment.
pub trait TransitionRenderer {
    fn transition(&self, directive: TransitionDirective) -> LocalBoxFuture<'_, AnimationResult<()>>;
}
