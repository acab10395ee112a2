//! Registration hand-off: the account form and the collaborator that
//! receives the finished quiz.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::answers::AnswerSet;
use super::scoring::Score;
use crate::error::{QuizError, RegistrationError};

/// Account details entered on the register step.
#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl RegistrationForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Only non-emptiness is checked; format validation belongs to the
    /// registration backend.
    pub fn validate(&self) -> Result<(), QuizError> {
        use secrecy::ExposeSecret;

        if self.name.trim().is_empty() {
            return Err(QuizError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(QuizError::MissingField("email"));
        }
        if self.password.expose_secret().is_empty() {
            return Err(QuizError::MissingField("password"));
        }
        Ok(())
    }
}

/// Everything handed to the registration collaborator.
#[derive(Debug)]
pub struct Submission {
    pub id: Uuid,
    pub form: RegistrationForm,
    pub answers: AnswerSet,
    pub score: Score,
    pub submitted_at: DateTime<Utc>,
}

/// Receives a completed quiz. How it is stored or transmitted is up to the
/// implementation.
#[async_trait]
pub trait Registrar: Send + Sync {
    async fn register(&self, submission: Submission) -> Result<(), RegistrationError>;
}

/// Registrar that only logs the submission. Used by the binary until a real
/// account backend is wired.
#[derive(Debug, Default)]
pub struct LogRegistrar;

#[async_trait]
impl Registrar for LogRegistrar {
    async fn register(&self, submission: Submission) -> Result<(), RegistrationError> {
        let answers = serde_json::to_string(&submission.answers)
            .map_err(|e| RegistrationError::Rejected { reason: e.to_string() })?;
        info!(
            submission_id = %submission.id,
            name = %submission.form.name,
            email = %submission.form.email,
            score = submission.score.value(),
            answers = %answers,
            "Quiz registration received"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_all_fields() {
        assert!(RegistrationForm::new("Ana", "ana@example.com", "pw").validate().is_ok());

        let err = RegistrationForm::new("  ", "ana@example.com", "pw").validate().unwrap_err();
        assert!(matches!(err, QuizError::MissingField("name")));

        let err = RegistrationForm::new("Ana", "", "pw").validate().unwrap_err();
        assert!(matches!(err, QuizError::MissingField("email")));

        let err = RegistrationForm::new("Ana", "ana@example.com", "").validate().unwrap_err();
        assert!(matches!(err, QuizError::MissingField("password")));
    }

    #[test]
    fn email_format_is_not_checked() {
        assert!(RegistrationForm::new("Ana", "not-an-email", "x").validate().is_ok());
    }

    #[test]
    fn form_deserializes_and_redacts_password() {
        let form: RegistrationForm = serde_json::from_str(
            r#"{"name": "Ana", "email": "ana@example.com", "password": "hunter2"}"#,
        )
        .unwrap();
        assert_eq!(form.name, "Ana");
        let debug = format!("{form:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn log_registrar_accepts() {
        let submission = Submission {
            id: Uuid::new_v4(),
            form: RegistrationForm::new("Ana", "ana@example.com", "pw"),
            answers: AnswerSet::new(),
            score: Score::new(),
            submitted_at: Utc::now(),
        };
        assert!(LogRegistrar.register(submission).await.is_ok());
    }
}
