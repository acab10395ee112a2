//! Progress bar position for each step.

use super::steps::Step;

/// Denominator of the progress fraction.
///
/// Eight, not nine: Result already reads as 100% and Register clamps there.
pub const TOTAL_STEPS: u32 = 8;

/// Ordinal position of a step. Phase follow-ups share one slot.
pub fn ordinal(step: Step) -> u32 {
    use Step::*;
    match step {
        Welcome => 0,
        Phase => 1,
        MenstruationFeeling | FollicularFeeling | OvulationFeeling | LutealFeeling => 2,
        CycleFeeling => 3,
        Goals => 4,
        Stress => 5,
        Selfcare => 6,
        Content => 7,
        Result => 8,
        Register => 9,
    }
}

/// Fraction of the quiz completed, clamped to `[0.0, 1.0]`.
pub fn progress_fraction(step: Step) -> f64 {
    (f64::from(ordinal(step)) / f64::from(TOTAL_STEPS)).min(1.0)
}
