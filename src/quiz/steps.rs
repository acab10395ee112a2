//! Step graph: the quiz screens and the transitions between them.
//!
//! Forward: Welcome → Phase → {one phase follow-up} → CycleFeeling → Goals →
//! Stress → Selfcare → Content → Result → Register.
//!
//! The phase follow-ups are alternatives: exactly one is visited, chosen by
//! the recorded phase answer. Back navigation is derived from the recorded
//! answers rather than from a history stack.

use serde::{Deserialize, Serialize};

use super::answers::{AnswerSet, MultiField, Phase, SingleField};
use super::catalog;

/// Every screen of the quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Welcome,
    Phase,
    MenstruationFeeling,
    FollicularFeeling,
    OvulationFeeling,
    LutealFeeling,
    CycleFeeling,
    Goals,
    Stress,
    Selfcare,
    Content,
    Result,
    Register,
}

/// What kind of input a step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// No answer, just an explicit "continue".
    Info,
    /// One answer, advances on its own after a short delay.
    SingleSelect(SingleField),
    /// Any subset of options, advancing needs at least one.
    MultiSelect(MultiField),
    /// Final account form, no forward transition.
    Register,
}

impl Step {
    pub const ALL: [Step; 13] = [
        Step::Welcome,
        Step::Phase,
        Step::MenstruationFeeling,
        Step::FollicularFeeling,
        Step::OvulationFeeling,
        Step::LutealFeeling,
        Step::CycleFeeling,
        Step::Goals,
        Step::Stress,
        Step::Selfcare,
        Step::Content,
        Step::Result,
        Step::Register,
    ];

    pub fn kind(&self) -> StepKind {
        use Step::*;
        match self {
            Welcome | Result => StepKind::Info,
            Phase => StepKind::SingleSelect(SingleField::Phase),
            MenstruationFeeling | FollicularFeeling | OvulationFeeling | LutealFeeling => {
                StepKind::SingleSelect(SingleField::PhaseFeeling)
            }
            CycleFeeling => StepKind::SingleSelect(SingleField::CycleFeeling),
            Goals => StepKind::MultiSelect(MultiField::Goals),
            Stress => StepKind::MultiSelect(MultiField::Stress),
            Selfcare => StepKind::MultiSelect(MultiField::Selfcare),
            Content => StepKind::MultiSelect(MultiField::Content),
            Register => StepKind::Register,
        }
    }

    /// Whether this step is terminal (no forward transition).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Register)
    }

    /// The follow-up shown for a given phase.
    pub fn followup_for(phase: Phase) -> Step {
        match phase {
            Phase::Menstruation => Step::MenstruationFeeling,
            Phase::Follicular => Step::FollicularFeeling,
            Phase::Ovulation => Step::OvulationFeeling,
            Phase::Luteal => Step::LutealFeeling,
        }
    }

    /// The step after `self`, given the answers recorded so far.
    ///
    /// Ignores gating; see [`Step::can_advance`]. An unset phase at the fork
    /// skips straight to the generic cycle question.
    pub fn next(&self, answers: &AnswerSet) -> Option<Step> {
        use Step::*;
        let next = match self {
            Welcome => Phase,
            Phase => match answers.phase {
                Some(phase) => Step::followup_for(phase),
                None => CycleFeeling,
            },
            MenstruationFeeling | FollicularFeeling | OvulationFeeling | LutealFeeling => {
                CycleFeeling
            }
            CycleFeeling => Goals,
            Goals => Stress,
            Stress => Selfcare,
            Selfcare => Content,
            Content => Result,
            Result => Register,
            Register => return None,
        };
        Some(next)
    }

    /// The step before `self`.
    ///
    /// At the merge point this reconstructs the follow-up that was actually
    /// shown from the recorded phase, falling back to the phase question.
    pub fn previous(&self, answers: &AnswerSet) -> Option<Step> {
        use Step::*;
        let previous = match self {
            Welcome => return None,
            Phase => Welcome,
            MenstruationFeeling | FollicularFeeling | OvulationFeeling | LutealFeeling => Phase,
            CycleFeeling => answers.phase.map(Step::followup_for).unwrap_or(Phase),
            Goals => CycleFeeling,
            Stress => Goals,
            Selfcare => Stress,
            Content => Selfcare,
            Result => Content,
            Register => Result,
        };
        Some(previous)
    }

    /// Whether an explicit forward action is currently allowed.
    ///
    /// Multi-select steps need a non-empty answer. Single-select steps need
    /// a recorded answer that is one of this step's own options, so a
    /// follow-up answered under a different phase does not count.
    pub fn can_advance(&self, answers: &AnswerSet) -> bool {
        match self.kind() {
            StepKind::Info => true,
            StepKind::SingleSelect(field) => answers
                .single(field)
                .is_some_and(|value| catalog::is_offered(*self, value)),
            StepKind::MultiSelect(field) => !answers.multi(field).is_empty(),
            StepKind::Register => false,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::Phase => "phase",
            Self::MenstruationFeeling => "menstruation_feeling",
            Self::FollicularFeeling => "follicular_feeling",
            Self::OvulationFeeling => "ovulation_feeling",
            Self::LutealFeeling => "luteal_feeling",
            Self::CycleFeeling => "cycle_feeling",
            Self::Goals => "goals",
            Self::Stress => "stress",
            Self::Selfcare => "selfcare",
            Self::Content => "content",
            Self::Result => "result",
            Self::Register => "register",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::answers::SingleAnswer;

    fn with_phase(phase: Phase) -> AnswerSet {
        let mut answers = AnswerSet::new();
        answers.set_single(SingleAnswer::Phase(phase));
        answers
    }

    #[test]
    fn phase_branches_to_matching_followup() {
        let expected = [
            (Phase::Menstruation, Step::MenstruationFeeling),
            (Phase::Follicular, Step::FollicularFeeling),
            (Phase::Ovulation, Step::OvulationFeeling),
            (Phase::Luteal, Step::LutealFeeling),
        ];
        for (phase, followup) in expected {
            assert_eq!(Step::Phase.next(&with_phase(phase)), Some(followup));
        }
    }

    #[test]
    fn ovulation_never_lands_on_another_followup() {
        let next = Step::Phase.next(&with_phase(Phase::Ovulation)).unwrap();
        assert_eq!(next, Step::OvulationFeeling);
        for other in [Step::MenstruationFeeling, Step::FollicularFeeling, Step::LutealFeeling] {
            assert_ne!(next, other);
        }
    }

    #[test]
    fn unset_phase_skips_to_cycle_feeling() {
        assert_eq!(Step::Phase.next(&AnswerSet::new()), Some(Step::CycleFeeling));
    }

    #[test]
    fn followups_converge() {
        let answers = AnswerSet::new();
        for step in [
            Step::MenstruationFeeling,
            Step::FollicularFeeling,
            Step::OvulationFeeling,
            Step::LutealFeeling,
        ] {
            assert_eq!(step.next(&answers), Some(Step::CycleFeeling));
            assert_eq!(step.previous(&answers), Some(Step::Phase));
        }
    }

    #[test]
    fn linear_chain_walks_to_register() {
        let answers = with_phase(Phase::Luteal);
        let expected = [
            Step::Phase,
            Step::LutealFeeling,
            Step::CycleFeeling,
            Step::Goals,
            Step::Stress,
            Step::Selfcare,
            Step::Content,
            Step::Result,
            Step::Register,
        ];
        let mut current = Step::Welcome;
        for expected_next in expected {
            current = current.next(&answers).unwrap();
            assert_eq!(current, expected_next);
        }
        assert!(current.is_terminal());
        assert!(current.next(&answers).is_none());
    }

    #[test]
    fn back_from_cycle_feeling_uses_recorded_phase() {
        let answers = with_phase(Phase::Luteal);
        assert_eq!(Step::CycleFeeling.previous(&answers), Some(Step::LutealFeeling));
        assert_eq!(
            Step::CycleFeeling.previous(&AnswerSet::new()),
            Some(Step::Phase)
        );
    }

    #[test]
    fn back_is_inverse_of_forward_along_visited_path() {
        for phase in Phase::ALL {
            let answers = with_phase(phase);
            let mut current = Step::Welcome;
            while let Some(next) = current.next(&answers) {
                assert_eq!(next.previous(&answers), Some(current), "back from {next}");
                current = next;
            }
        }
        assert!(Step::Welcome.previous(&AnswerSet::new()).is_none());
    }

    #[test]
    fn goals_gated_on_selection() {
        let mut answers = AnswerSet::new();
        assert!(!Step::Goals.can_advance(&answers));
        answers.toggle_multi(MultiField::Goals, "health");
        assert!(Step::Goals.can_advance(&answers));
        answers.toggle_multi(MultiField::Goals, "health");
        assert!(!Step::Goals.can_advance(&answers));
    }

    #[test]
    fn each_multi_step_gates_on_its_own_field() {
        let mut answers = AnswerSet::new();
        answers.toggle_multi(MultiField::Goals, "energy");
        assert!(Step::Goals.can_advance(&answers));
        assert!(!Step::Stress.can_advance(&answers));
        assert!(!Step::Selfcare.can_advance(&answers));
        assert!(!Step::Content.can_advance(&answers));
    }

    #[test]
    fn followup_gate_ignores_answer_from_another_phase() {
        let mut answers = with_phase(Phase::Luteal);
        answers.set_single(SingleAnswer::PhaseFeeling("meditation".into()));
        assert!(Step::LutealFeeling.can_advance(&answers));

        answers.set_single(SingleAnswer::Phase(Phase::Ovulation));
        assert!(!Step::OvulationFeeling.can_advance(&answers));
        assert!(Step::Phase.can_advance(&answers));
        assert!(!Step::CycleFeeling.can_advance(&answers));
    }

    #[test]
    fn default_step_is_welcome() {
        assert_eq!(Step::default(), Step::Welcome);
    }

    #[test]
    fn info_steps_always_advance_and_register_never() {
        let answers = AnswerSet::new();
        assert!(Step::Welcome.can_advance(&answers));
        assert!(Step::Result.can_advance(&answers));
        assert!(!Step::Register.can_advance(&answers));
    }

    #[test]
    fn display_matches_serde() {
        for step in Step::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json, "Display and serde should match for {step:?}");
        }
    }
}
