use std::cell::RefCell;

/// Lifecycle notification delivered at a state-machine transition point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The queue left the idle state.
    Animating,
    /// The queue drained back to empty.
    Animated,
    /// Emitted immediately before each renderer transition call.
    Transitioning,
    /// Emitted immediately after each successful renderer transition call.
    Transitioned,
    /// A queued request was displaced by an immediate request.
    AnimationInterrupted,
}

impl AnimationEvent {
    /// Wire name used by host event buses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Animating => "animating",
            Self::Animated => "animated",
            Self::Transitioning => "transitioning",
            Self::Transitioned => "transitioned",
            Self::AnimationInterrupted => "animationinterrupted",
        }
    }
}

/// Injectable notification seam for lifecycle events.
///
/// Implementations must be fire-and-forget: the controller delivers events
/// synchronously at state transitions, strictly before the corresponding
/// caller future settles, and never awaits the sink.
pub trait EventSink {
    fn notify(&self, event: AnimationEvent);
}

/// Sink for hosts that do not observe lifecycle events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&self, _event: AnimationEvent) {}
}

/// Records events in delivery order; used by tests and diagnostics to
/// assert event/future ordering independently of renderer completion.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<AnimationEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<AnimationEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn count(&self, event: AnimationEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|recorded| **recorded == event)
            .count()
    }
}

impl EventSink for RecordingSink {
    fn notify(&self, event: AnimationEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimationEvent, EventSink, RecordingSink};

    #[test]
    fn wire_names_match_host_event_bus_vocabulary() {
        assert_eq!(AnimationEvent::Animating.as_str(), "animating");
        assert_eq!(AnimationEvent::Animated.as_str(), "animated");
        assert_eq!(AnimationEvent::Transitioning.as_str(), "transitioning");
        assert_eq!(AnimationEvent::Transitioned.as_str(), "transitioned");
        assert_eq!(
            AnimationEvent::AnimationInterrupted.as_str(),
            "animationinterrupted"
        );
    }

    #[test]
    fn recording_sink_preserves_delivery_order() {
        let sink = RecordingSink::new();
        sink.notify(AnimationEvent::Animating);
        sink.notify(AnimationEvent::Transitioning);
        sink.notify(AnimationEvent::Transitioned);
        sink.notify(AnimationEvent::Animated);

        assert_eq!(
            sink.events(),
            [
                AnimationEvent::Animating,
                AnimationEvent::Transitioning,
                AnimationEvent::Transitioned,
                AnimationEvent::Animated,
            ]
        );
        assert_eq!(sink.count(AnimationEvent::Animated), 1);
    }
}
