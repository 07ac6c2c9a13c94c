mod controller;
mod events;
mod queue;
mod request;
mod runner;
mod schedule;

pub use controller::AnimationController;
pub use events::{AnimationEvent, EventSink, NullSink, RecordingSink};
pub use schedule::AnimationOptions;
