use chart_motion::core::{TransitionOptions, TransitionPlan};
use proptest::prelude::*;

fn options_with_duration(duration: f64) -> TransitionOptions {
    TransitionOptions::default().with_transition_duration(duration)
}

proptest! {
    #[test]
    fn per_frame_plan_pads_from_the_first_entry(
        durations in proptest::collection::vec(0.0f64..10_000.0, 1..8),
        index in 0usize..32
    ) {
        let plan = TransitionPlan::from(
            durations
                .iter()
                .copied()
                .map(options_with_duration)
                .collect::<Vec<_>>(),
        );

        let expected = durations.get(index).copied().unwrap_or(durations[0]);
        prop_assert_eq!(plan.options_for(index).transition_duration, expected);
    }

    #[test]
    fn uniform_plan_is_position_independent(
        duration in 0.0f64..10_000.0,
        index in 0usize..64
    ) {
        let plan = TransitionPlan::from(options_with_duration(duration));
        prop_assert_eq!(plan.options_for(index).transition_duration, duration);
    }

    #[test]
    fn padding_never_invents_values_outside_the_plan(
        durations in proptest::collection::vec(0.0f64..10_000.0, 1..8),
        index in 0usize..32
    ) {
        let plan = TransitionPlan::from(
            durations
                .iter()
                .copied()
                .map(options_with_duration)
                .collect::<Vec<_>>(),
        );

        let resolved = plan.options_for(index).transition_duration;
        prop_assert!(durations.contains(&resolved));
    }
}
