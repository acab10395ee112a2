//! Question catalog: prompts and the closed option list for each step.

use serde::Serialize;

use super::steps::Step;

/// One selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
}

const fn opt(value: &'static str, label: &'static str, emoji: &'static str) -> QuestionOption {
    QuestionOption { value, label, emoji }
}

const PHASE: &[QuestionOption] = &[
    opt("menstruation", "Menstruação", "🌙"),
    opt("follicular", "Fase Folicular", "🌱"),
    opt("ovulation", "Ovulação", "✨"),
    opt("luteal", "Fase Lútea", "🍂"),
];

const MENSTRUATION_FEELING: &[QuestionOption] = &[
    opt("tired", "Cansada", "😴"),
    opt("emotional", "Emocional", "😢"),
    opt("comfortable", "Confortável", "😌"),
    opt("neutral", "Não me importo", "😐"),
];

const FOLLICULAR_FEELING: &[QuestionOption] = &[
    opt("projects", "Começar novos projetos", "🚀"),
    opt("sports", "Praticar esportes", "🏃‍♀️"),
    opt("social", "Conectar-se socialmente", "👭"),
    opt("meditate", "Meditar", "🧘‍♀️"),
];

const OVULATION_FEELING: &[QuestionOption] = &[
    opt("attractive", "Sim, estou mais atraente", "💃"),
    opt("stable", "Não, me sinto estável", "😊"),
    opt("depends", "Depende", "🤔"),
];

const LUTEAL_FEELING: &[QuestionOption] = &[
    opt("exercise", "Exercícios físicos", "🏋️‍♀️"),
    opt("comfort-food", "Comida comfort", "🍫"),
    opt("meditation", "Meditação", "🧘‍♀️"),
    opt("ignore", "Ignoro", "🤷‍♀️"),
];

const CYCLE_FEELING: &[QuestionOption] = &[
    opt("informed", "Estou bem informada", "🎓"),
    opt("learn", "Quero aprender mais", "📚"),
    opt("doubts", "Tenho algumas dúvidas", "🤔"),
    opt("lost", "Me sinto perdida", "😕"),
];

const GOALS: &[QuestionOption] = &[
    opt("health", "Melhorar a saúde geral", "💪"),
    opt("emotions", "Equilibrar emoções", "🧘‍♀️"),
    opt("energy", "Aumentar energia", "⚡"),
    opt("fertility", "Aprender sobre fertilidade", "👶"),
];

const STRESS: &[QuestionOption] = &[
    opt("work", "Trabalho", "💼"),
    opt("personal", "Vida pessoal", "🏠"),
    opt("health", "Saúde", "🏥"),
    opt("social", "Relações sociais", "👥"),
];

const SELFCARE: &[QuestionOption] = &[
    opt("yoga", "Praticar yoga", "🧘‍♀️"),
    opt("walk", "Fazer caminhadas", "🚶‍♀️"),
    opt("cook", "Cozinhar", "👩‍🍳"),
    opt("alone", "Ter tempo sozinha", "🛀"),
];

const CONTENT: &[QuestionOption] = &[
    opt("health", "Dicas de saúde", "💊"),
    opt("recipes", "Receitas", "🥗"),
    opt("exercises", "Exercícios", "🏃‍♀️"),
    opt("community", "Comunidade de suporte", "👭"),
];

/// Options offered on a step. Empty for steps without a question.
pub fn options(step: Step) -> &'static [QuestionOption] {
    use Step::*;
    match step {
        Phase => PHASE,
        MenstruationFeeling => MENSTRUATION_FEELING,
        FollicularFeeling => FOLLICULAR_FEELING,
        OvulationFeeling => OVULATION_FEELING,
        LutealFeeling => LUTEAL_FEELING,
        CycleFeeling => CYCLE_FEELING,
        Goals => GOALS,
        Stress => STRESS,
        Selfcare => SELFCARE,
        Content => CONTENT,
        Welcome | Result | Register => &[],
    }
}

/// Whether `value` is one of the options offered on `step`.
pub fn is_offered(step: Step, value: &str) -> bool {
    options(step).iter().any(|o| o.value == value)
}

/// Question text for a step.
pub fn prompt(step: Step) -> &'static str {
    use Step::*;
    match step {
        Welcome => "Bem-vinda ao Cycly!",
        Phase => "Qual é a sua fase atual do ciclo menstrual?",
        MenstruationFeeling => "Como você se sente durante a menstruação?",
        FollicularFeeling => "O que você mais gosta de fazer na fase folicular?",
        OvulationFeeling => "Você costuma sentir mudanças no desejo?",
        LutealFeeling => "Como você lida com a TPM?",
        CycleFeeling => "Como você se sente em relação ao seu ciclo menstrual?",
        Goals => "Quais são os seus principais objetivos relacionados ao ciclo?",
        Stress => "Quais fatores influenciam seu estresse durante o ciclo?",
        Selfcare => "O que você faz para se cuidar?",
        Content => "Qual tipo de conteúdo você gostaria de receber?",
        Result => "Seu plano personalizado",
        Register => "Crie sua conta",
    }
}
