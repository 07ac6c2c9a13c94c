use serde::{Deserialize, Serialize};

/// Easing curve vocabulary forwarded, opaque, to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    #[default]
    CubicInOut,
    ElasticInOut,
    BounceInOut,
}

impl Easing {
    /// Wire name of the curve (`"cubic-in-out"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::QuadIn => "quad-in",
            Self::QuadOut => "quad-out",
            Self::QuadInOut => "quad-in-out",
            Self::CubicIn => "cubic-in",
            Self::CubicOut => "cubic-out",
            Self::CubicInOut => "cubic-in-out",
            Self::ElasticInOut => "elastic-in-out",
            Self::BounceInOut => "bounce-in-out",
        }
    }
}

/// Timing and interpolation parameters for one renderer transition call.
///
/// The scheduling engine never interprets these values; the renderer is
/// solely responsible for honoring elapsed time and redraw behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionOptions {
    /// Total per-frame duration in milliseconds, including the transition.
    pub frame_duration: f64,
    /// Interpolation duration in milliseconds.
    pub transition_duration: f64,
    pub ease: Easing,
    /// Whether the renderer should perform a full redraw once the
    /// transition lands.
    pub redraw: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            frame_duration: 500.0,
            transition_duration: 500.0,
            ease: Easing::CubicInOut,
            redraw: true,
        }
    }
}

impl TransitionOptions {
    #[must_use]
    pub fn with_frame_duration(mut self, milliseconds: f64) -> Self {
        self.frame_duration = milliseconds;
        self
    }

    #[must_use]
    pub fn with_transition_duration(mut self, milliseconds: f64) -> Self {
        self.transition_duration = milliseconds;
        self
    }

    #[must_use]
    pub fn with_ease(mut self, ease: Easing) -> Self {
        self.ease = ease;
        self
    }

    #[must_use]
    pub fn with_redraw(mut self, redraw: bool) -> Self {
        self.redraw = redraw;
        self
    }
}

/// Caller-supplied transition options for a multi-frame animation.
///
/// Options are resolved once per request: a uniform value applies to every
/// frame; a per-frame list uses `options[i]` for position `i`, falling back
/// to `options[0]` when the list is shorter than the frame sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransitionPlan {
    Uniform(TransitionOptions),
    PerFrame(Vec<TransitionOptions>),
}

impl Default for TransitionPlan {
    fn default() -> Self {
        Self::Uniform(TransitionOptions::default())
    }
}

impl From<TransitionOptions> for TransitionPlan {
    fn from(options: TransitionOptions) -> Self {
        Self::Uniform(options)
    }
}

impl From<Vec<TransitionOptions>> for TransitionPlan {
    fn from(options: Vec<TransitionOptions>) -> Self {
        Self::PerFrame(options)
    }
}

impl TransitionPlan {
    /// Options applying to the frame at `index`.
    ///
    /// An empty per-frame list behaves like defaults for every position.
    #[must_use]
    pub fn options_for(&self, index: usize) -> TransitionOptions {
        match self {
            Self::Uniform(options) => options.clone(),
            Self::PerFrame(list) => list
                .get(index)
                .or_else(|| list.first())
                .cloned()
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Easing, TransitionOptions, TransitionPlan};

    #[test]
    fn default_options_match_supply_defaults() {
        let options = TransitionOptions::default();
        assert_eq!(options.frame_duration, 500.0);
        assert_eq!(options.transition_duration, 500.0);
        assert_eq!(options.ease, Easing::CubicInOut);
        assert!(options.redraw);
    }

    #[test]
    fn provided_values_pass_through_deserialization() {
        let options: TransitionOptions = serde_json::from_value(serde_json::json!({
            "frame_duration": 200.0,
            "transition_duration": 100.0,
            "ease": "quad-in-out",
            "redraw": false
        }))
        .expect("valid options document");

        assert_eq!(options.frame_duration, 200.0);
        assert_eq!(options.transition_duration, 100.0);
        assert_eq!(options.ease, Easing::QuadInOut);
        assert!(!options.redraw);
    }

    #[test]
    fn partial_document_fills_remaining_defaults() {
        let options: TransitionOptions =
            serde_json::from_value(serde_json::json!({ "transition_duration": 80.0 }))
                .expect("valid options document");

        assert_eq!(options.transition_duration, 80.0);
        assert_eq!(options.frame_duration, 500.0);
        assert_eq!(options.ease, Easing::CubicInOut);
    }

    #[test]
    fn uniform_plan_applies_to_every_position() {
        let plan = TransitionPlan::from(TransitionOptions::default().with_transition_duration(1.5));
        assert_eq!(plan.options_for(0).transition_duration, 1.5);
        assert_eq!(plan.options_for(7).transition_duration, 1.5);
    }

    #[test]
    fn short_per_frame_plan_pads_from_first_entry() {
        let plan = TransitionPlan::from(vec![
            TransitionOptions::default().with_transition_duration(1.123),
        ]);
        assert_eq!(plan.options_for(0).transition_duration, 1.123);
        assert_eq!(plan.options_for(1).transition_duration, 1.123);
    }

    #[test]
    fn per_frame_plan_uses_positional_entries() {
        let plan = TransitionPlan::from(vec![
            TransitionOptions::default().with_transition_duration(1.123),
            TransitionOptions::default().with_transition_duration(1.456),
        ]);
        assert_eq!(plan.options_for(0).transition_duration, 1.123);
        assert_eq!(plan.options_for(1).transition_duration, 1.456);
    }

    #[test]
    fn empty_per_frame_plan_falls_back_to_defaults() {
        let plan = TransitionPlan::PerFrame(Vec::new());
        assert_eq!(plan.options_for(0), TransitionOptions::default());
    }

    #[test]
    fn easing_serializes_to_kebab_case() {
        let value = serde_json::to_value(Easing::CubicInOut).expect("serialize easing");
        assert_eq!(value, serde_json::json!("cubic-in-out"));
        assert_eq!(Easing::ElasticInOut.as_str(), "elastic-in-out");
    }
}
