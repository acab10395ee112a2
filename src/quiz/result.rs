//! Personalized result bundles keyed by cycle phase.

use serde::Serialize;

use super::answers::{AnswerSet, Phase};

/// Content shown at the end of the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultBundle {
    pub phase: Phase,
    pub emoji: &'static str,
    pub title: &'static str,
    pub tips: [&'static str; 4],
}

/// Phase used when the quiz reaches the result without a phase answer.
pub const DEFAULT_PHASE: Phase = Phase::Menstruation;

static MENSTRUATION: ResultBundle = ResultBundle {
    phase: Phase::Menstruation,
    emoji: "🌙",
    title: "Fase de Menstruação - Autocuidado Intensivo",
    tips: [
        "Receitas anti-inflamatórias para aliviar cólicas",
        "Exercícios de yoga suaves e alongamentos",
        "Playlist relaxante para meditação",
        "Dicas de chás calmantes e nutritivos",
    ],
};

static FOLLICULAR: ResultBundle = ResultBundle {
    phase: Phase::Follicular,
    emoji: "🌱",
    title: "Fase Folicular - Energia e Novos Começos",
    tips: [
        "Plano de treinos energizantes e dinâmicos",
        "Receitas ricas em proteínas e vitaminas",
        "Dicas para iniciar novos projetos",
        "Atividades sociais e networking",
    ],
};

static OVULATION: ResultBundle = ResultBundle {
    phase: Phase::Ovulation,
    emoji: "✨",
    title: "Ovulação - Confiança e Conexão",
    tips: [
        "Dicas de autoestima e empoderamento",
        "Sugestões para conexão com parceiro(a)",
        "Atividades que potencializam sua energia",
        "Receitas afrodisíacas e nutritivas",
    ],
};

static LUTEAL: ResultBundle = ResultBundle {
    phase: Phase::Luteal,
    emoji: "🍂",
    title: "Fase Lútea - Equilíbrio e Relaxamento",
    tips: [
        "Exercícios de relaxamento e respiração",
        "Playlist de músicas calmantes",
        "Receitas que combatem TPM",
        "Técnicas de mindfulness e meditação",
    ],
};

/// The bundle for a phase.
pub fn bundle_for(phase: Phase) -> &'static ResultBundle {
    match phase {
        Phase::Menstruation => &MENSTRUATION,
        Phase::Follicular => &FOLLICULAR,
        Phase::Ovulation => &OVULATION,
        Phase::Luteal => &LUTEAL,
    }
}

/// Resolve the result for a finished answer set.
///
/// Only the phase matters. An unanswered phase gets the menstruation bundle.
pub fn resolve(answers: &AnswerSet) -> &'static ResultBundle {
    bundle_for(answers.phase.unwrap_or(DEFAULT_PHASE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::answers::{MultiField, SingleAnswer};

    #[test]
    fn resolves_by_phase() {
        let emojis = [
            (Phase::Menstruation, "🌙"),
            (Phase::Follicular, "🌱"),
            (Phase::Ovulation, "✨"),
            (Phase::Luteal, "🍂"),
        ];
        for (phase, emoji) in emojis {
            let mut answers = AnswerSet::new();
            answers.set_single(SingleAnswer::Phase(phase));
            let bundle = resolve(&answers);
            assert_eq!(bundle.phase, phase);
            assert_eq!(bundle.emoji, emoji);
            assert_eq!(bundle.tips.len(), 4);
        }
    }

    #[test]
    fn unanswered_phase_falls_back_to_menstruation() {
        let bundle = resolve(&AnswerSet::new());
        assert_eq!(bundle.phase, Phase::Menstruation);
        assert_eq!(bundle.emoji, "🌙");
    }

    #[test]
    fn other_answers_do_not_change_the_bundle() {
        let mut plain = AnswerSet::new();
        plain.set_single(SingleAnswer::Phase(Phase::Luteal));
        let mut busy = plain.clone();
        busy.set_single(SingleAnswer::CycleFeeling("lost".into()));
        busy.toggle_multi(MultiField::Goals, "fertility");
        busy.toggle_multi(MultiField::Content, "recipes");
        assert_eq!(resolve(&plain), resolve(&busy));
    }

    #[test]
    fn tips_are_distinct_per_phase() {
        for phase in Phase::ALL {
            let tips = bundle_for(phase).tips;
            for (i, tip) in tips.iter().enumerate() {
                assert!(!tip.is_empty());
                assert!(!tips[i + 1..].contains(tip), "duplicate tip for {phase}");
            }
        }
    }
}
