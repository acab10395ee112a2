//! Answer store: the accumulating set of quiz answers.

use serde::{Deserialize, Serialize};

/// The four cycle phases the quiz branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Menstruation,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Menstruation,
        Phase::Follicular,
        Phase::Ovulation,
        Phase::Luteal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menstruation => "menstruation",
            Self::Follicular => "follicular",
            Self::Ovulation => "ovulation",
            Self::Luteal => "luteal",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown phase: {s}"))
    }
}

/// Single-valued answer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleField {
    Phase,
    PhaseFeeling,
    CycleFeeling,
}

impl std::fmt::Display for SingleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Phase => "phase",
            Self::PhaseFeeling => "phase_feeling",
            Self::CycleFeeling => "cycle_feeling",
        };
        write!(f, "{s}")
    }
}

/// Set-valued answer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiField {
    Goals,
    Stress,
    Selfcare,
    Content,
}

impl std::fmt::Display for MultiField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Goals => "goals",
            Self::Stress => "stress",
            Self::Selfcare => "selfcare",
            Self::Content => "content",
        };
        write!(f, "{s}")
    }
}

/// A value for one of the single-valued fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleAnswer {
    Phase(Phase),
    PhaseFeeling(String),
    CycleFeeling(String),
}

impl SingleAnswer {
    pub fn field(&self) -> SingleField {
        match self {
            Self::Phase(_) => SingleField::Phase,
            Self::PhaseFeeling(_) => SingleField::PhaseFeeling,
            Self::CycleFeeling(_) => SingleField::CycleFeeling,
        }
    }

    /// The option identifier as offered by the question catalog.
    pub fn value(&self) -> &str {
        match self {
            Self::Phase(p) => p.as_str(),
            Self::PhaseFeeling(v) | Self::CycleFeeling(v) => v,
        }
    }
}

/// Which membership transition a toggle performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Inserted,
    Removed,
}

impl Toggle {
    pub fn inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Everything the user has answered so far.
///
/// Set-valued fields keep insertion order for display and never hold the
/// same identifier twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_feeling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_feeling: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub stress: Vec<String>,
    #[serde(default)]
    pub selfcare: Vec<String>,
    #[serde(default)]
    pub content: Vec<String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a single-valued field. Any previous value is discarded.
    pub fn set_single(&mut self, answer: SingleAnswer) {
        match answer {
            SingleAnswer::Phase(phase) => self.phase = Some(phase),
            SingleAnswer::PhaseFeeling(v) => self.phase_feeling = Some(v),
            SingleAnswer::CycleFeeling(v) => self.cycle_feeling = Some(v),
        }
    }

    /// Deselect `value` if present, select it otherwise.
    pub fn toggle_multi(&mut self, field: MultiField, value: &str) -> Toggle {
        let values = self.multi_mut(field);
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
            Toggle::Removed
        } else {
            values.push(value.to_string());
            Toggle::Inserted
        }
    }

    pub fn is_selected(&self, field: MultiField, value: &str) -> bool {
        self.multi(field).iter().any(|v| v == value)
    }

    pub fn multi(&self, field: MultiField) -> &[String] {
        match field {
            MultiField::Goals => &self.goals,
            MultiField::Stress => &self.stress,
            MultiField::Selfcare => &self.selfcare,
            MultiField::Content => &self.content,
        }
    }

    /// The recorded option identifier for a single-valued field.
    pub fn single(&self, field: SingleField) -> Option<&str> {
        match field {
            SingleField::Phase => self.phase.as_ref().map(Phase::as_str),
            SingleField::PhaseFeeling => self.phase_feeling.as_deref(),
            SingleField::CycleFeeling => self.cycle_feeling.as_deref(),
        }
    }

    pub fn is_answered(&self, field: SingleField) -> bool {
        self.single(field).is_some()
    }

    fn multi_mut(&mut self, field: MultiField) -> &mut Vec<String> {
        match field {
            MultiField::Goals => &mut self.goals,
            MultiField::Stress => &mut self.stress,
            MultiField::Selfcare => &mut self.selfcare,
            MultiField::Content => &mut self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_inserts_then_removes() {
        let mut answers = AnswerSet::new();
        assert_eq!(answers.toggle_multi(MultiField::Goals, "health"), Toggle::Inserted);
        assert!(answers.is_selected(MultiField::Goals, "health"));
        assert_eq!(answers.toggle_multi(MultiField::Goals, "health"), Toggle::Removed);
        assert!(!answers.is_selected(MultiField::Goals, "health"));
        assert!(answers.goals.is_empty());
    }

    #[test]
    fn toggle_sequence_matches_insert_remove_semantics() {
        let mut answers = AnswerSet::new();
        let ops = ["work", "health", "work", "social", "health", "work"];
        for op in ops {
            answers.toggle_multi(MultiField::Stress, op);
        }
        // work toggled 3x (in), health 2x (out), social 1x (in)
        assert_eq!(answers.stress, vec!["social".to_string(), "work".to_string()]);
    }

    #[test]
    fn even_toggles_restore_membership() {
        let mut answers = AnswerSet::new();
        answers.toggle_multi(MultiField::Content, "recipes");
        let before = answers.clone();
        for _ in 0..4 {
            answers.toggle_multi(MultiField::Content, "community");
        }
        assert_eq!(answers, before);
    }

    #[test]
    fn toggle_never_duplicates() {
        let mut answers = AnswerSet::new();
        for _ in 0..5 {
            answers.toggle_multi(MultiField::Selfcare, "yoga");
            answers.toggle_multi(MultiField::Selfcare, "walk");
        }
        // Odd number of toggles each: both present, once.
        assert_eq!(answers.selfcare.iter().filter(|v| *v == "yoga").count(), 1);
        assert_eq!(answers.selfcare.iter().filter(|v| *v == "walk").count(), 1);
    }

    #[test]
    fn is_selected_false_for_untouched_fields() {
        let answers = AnswerSet::new();
        assert!(!answers.is_selected(MultiField::Goals, "health"));
        assert!(!answers.is_selected(MultiField::Content, "recipes"));
    }

    #[test]
    fn set_single_overwrites() {
        let mut answers = AnswerSet::new();
        answers.set_single(SingleAnswer::Phase(Phase::Luteal));
        answers.set_single(SingleAnswer::Phase(Phase::Ovulation));
        assert_eq!(answers.phase, Some(Phase::Ovulation));

        answers.set_single(SingleAnswer::CycleFeeling("lost".into()));
        answers.set_single(SingleAnswer::CycleFeeling("informed".into()));
        assert_eq!(answers.cycle_feeling.as_deref(), Some("informed"));
        assert!(answers.is_answered(SingleField::CycleFeeling));
        assert!(!answers.is_answered(SingleField::PhaseFeeling));
        assert_eq!(answers.single(SingleField::Phase), Some("ovulation"));
        assert_eq!(answers.single(SingleField::CycleFeeling), Some("informed"));
    }

    #[test]
    fn phase_parses_and_displays() {
        for phase in Phase::ALL {
            let parsed: Phase = phase.to_string().parse().unwrap();
            assert_eq!(parsed, phase);
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{phase}\""));
        }
        assert!("spring".parse::<Phase>().is_err());
    }

    #[test]
    fn answer_set_serializes_unset_fields_sparsely() {
        let mut answers = AnswerSet::new();
        answers.set_single(SingleAnswer::Phase(Phase::Follicular));
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["phase"], "follicular");
        assert!(json.get("phase_feeling").is_none());
        assert_eq!(json["goals"], serde_json::json!([]));
    }
}
