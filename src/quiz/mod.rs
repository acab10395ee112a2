//! Onboarding quiz: a branching questionnaire that scores each answer and
//! ends in a phase-specific content bundle.
//!
//! The wizard walks Welcome → Phase → a phase follow-up → the generic
//! questions → Result → Register. On submit the answers and the score are
//! handed to a `Registrar`.

pub mod answers;
pub mod catalog;
pub mod controller;
pub mod progress;
pub mod registration;
pub mod result;
pub mod routes;
pub mod scoring;
pub mod sessions;
pub mod steps;

pub use answers::{AnswerSet, MultiField, Phase, SingleAnswer, SingleField, Toggle};
pub use controller::{WizardCommand, WizardController, WizardEvent, WizardSnapshot};
pub use registration::{LogRegistrar, Registrar, RegistrationForm, Submission};
pub use result::ResultBundle;
pub use routes::{QuizRouteState, quiz_routes};
pub use scoring::{Score, ScoringEngine};
pub use sessions::{QuizSessions, spawn_expiry_task};
pub use steps::{Step, StepKind};
