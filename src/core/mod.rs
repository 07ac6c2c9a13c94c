mod frame;
mod frame_store;
mod transition;

pub use frame::{Frame, FrameDefinition};
pub use frame_store::{FrameSelector, FrameStore};
pub use transition::{Easing, TransitionOptions, TransitionPlan};
