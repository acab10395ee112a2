//! Error types for the quiz wizard.

use crate::quiz::answers::{MultiField, SingleField};
use crate::quiz::steps::Step;

/// Input the wizard refused to apply.
///
/// A blocked forward transition is not an error: it shows up as
/// `can_advance: false` on the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Field {field} is not collected on step {step}")]
    SingleFieldNotOnStep { field: SingleField, step: Step },

    #[error("Field {field} is not collected on step {step}")]
    MultiFieldNotOnStep { field: MultiField, step: Step },

    #[error("Unknown option {value:?} for step {step}")]
    UnknownOption { step: Step, value: String },

    #[error("Submission is only accepted on the register step, currently on {step}")]
    NotAtRegistration { step: Step },

    #[error("Required field {0} is empty")]
    MissingField(&'static str),

    #[error("Quiz already submitted")]
    AlreadySubmitted,

    #[error("Registration failed: {0}")]
    Registration(#[from] RegistrationError),
}

/// Failures reported by a registration collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Registration rejected: {reason}")]
    Rejected { reason: String },

    #[error("Registration backend unavailable: {0}")]
    Unavailable(String),
}
