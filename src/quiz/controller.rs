//! WizardController: applies user input to the answers, score and current
//! step, and broadcasts the resulting changes.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::answers::{AnswerSet, MultiField, Phase, SingleAnswer, SingleField, Toggle};
use super::catalog::{self, QuestionOption};
use super::progress;
use super::registration::{Registrar, RegistrationForm, Submission};
use super::result::{self, ResultBundle};
use super::scoring::{Score, ScoringEngine};
use super::steps::{Step, StepKind};
use crate::config::QuizConfig;
use crate::error::QuizError;

/// Observable changes, fanned out to every subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    StepChanged { from: Step, to: Step, progress: f64 },
    ScoreChanged { score: Score, delta: u32 },
    Submitted { submission_id: Uuid, score: Score },
}

/// Inputs accepted from the presentation layer over a live connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardCommand {
    Select { field: SingleField, value: String },
    Toggle { field: MultiField, value: String },
    Advance,
    Back,
}

/// Read-only view of the wizard for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub step: Step,
    pub position: u32,
    pub progress: f64,
    pub score: Score,
    pub answers: AnswerSet,
    pub can_advance: bool,
    pub prompt: &'static str,
    pub options: &'static [QuestionOption],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'static ResultBundle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_step: Option<Step>,
    pub submitted: bool,
}

/// A deferred single-select transition that has not fired yet.
#[derive(Debug)]
struct PendingTransition {
    id: Uuid,
    target: Step,
    handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct WizardState {
    step: Step,
    answers: AnswerSet,
    score: Score,
    pending: Option<PendingTransition>,
    submitted: bool,
}

impl WizardState {
    /// Abort any scheduled transition. Returns its target if one was pending.
    fn cancel_pending(&mut self) -> Option<Step> {
        let pending = self.pending.take()?;
        pending.handle.abort();
        debug!(request_id = %pending.id, target = %pending.target, "Pending transition cancelled");
        Some(pending.target)
    }

    fn move_to(&mut self, to: Step, tx: &broadcast::Sender<WizardEvent>) {
        let from = self.step;
        self.step = to;
        let progress = progress::progress_fraction(to);
        info!(from = %from, to = %to, progress, "Quiz step changed");
        let _ = tx.send(WizardEvent::StepChanged { from, to, progress });
    }

    fn award(&mut self, delta: u32, tx: &broadcast::Sender<WizardEvent>) {
        if delta == 0 {
            return;
        }
        let score = self.score.add(delta);
        debug!(delta, score, "Quiz score changed");
        let _ = tx.send(WizardEvent::ScoreChanged {
            score: self.score,
            delta,
        });
    }
}

/// Drives one run through the quiz.
///
/// Single-select answers move to the next step after `advance_delay`. Each
/// scheduled move carries a request id; a newer answer, an explicit
/// navigation or a submission cancels the older one, so the most recently
/// scheduled request is the only one that can land.
pub struct WizardController {
    state: Arc<RwLock<WizardState>>,
    tx: broadcast::Sender<WizardEvent>,
    registrar: Arc<dyn Registrar>,
    scoring: ScoringEngine,
    advance_delay: Duration,
}

impl WizardController {
    pub fn new(config: &QuizConfig, registrar: Arc<dyn Registrar>) -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(config.event_capacity);
        Arc::new(Self {
            state: Arc::new(RwLock::new(WizardState::default())),
            tx,
            registrar,
            scoring: ScoringEngine,
            advance_delay: config.advance_delay,
        })
    }

    /// Subscribe to wizard events.
    pub fn subscribe(&self) -> broadcast::Receiver<WizardEvent> {
        self.tx.subscribe()
    }

    pub async fn current_step(&self) -> Step {
        self.state.read().await.step
    }

    pub async fn score(&self) -> Score {
        self.state.read().await.score
    }

    pub async fn answers(&self) -> AnswerSet {
        self.state.read().await.answers.clone()
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        let state = self.state.read().await;
        let step = state.step;
        let result = matches!(step, Step::Result | Step::Register)
            .then(|| result::resolve(&state.answers));
        WizardSnapshot {
            step,
            position: progress::ordinal(step),
            progress: progress::progress_fraction(step),
            score: state.score,
            answers: state.answers.clone(),
            can_advance: !state.submitted && step.can_advance(&state.answers),
            prompt: catalog::prompt(step),
            options: catalog::options(step),
            result,
            pending_step: state.pending.as_ref().map(|p| p.target),
            submitted: state.submitted,
        }
    }

    /// Record a single-select answer and schedule the automatic transition.
    ///
    /// Returns the step the wizard will land on once the delay elapses.
    pub async fn select(&self, field: SingleField, value: &str) -> Result<Step, QuizError> {
        let mut state = self.state.write().await;
        if state.submitted {
            return Err(QuizError::AlreadySubmitted);
        }

        let step = state.step;
        if step.kind() != StepKind::SingleSelect(field) {
            return Err(QuizError::SingleFieldNotOnStep { field, step });
        }
        let answer = single_answer(step, field, value)?;

        state.answers.set_single(answer);
        let delta = self.scoring.on_single_select();
        state.award(delta, &self.tx);

        // Computed from the answer just recorded, not the one the step was
        // entered with.
        let Some(target) = step.next(&state.answers) else {
            return Ok(step);
        };

        if let Some(previous) = state.cancel_pending() {
            debug!(previous = %previous, target = %target, "Answer superseded earlier selection");
        }
        let id = Uuid::new_v4();
        let handle = self.spawn_transition(id, target);
        state.pending = Some(PendingTransition { id, target, handle });

        info!(step = %step, field = %field, value, target = %target, request_id = %id, "Answer recorded");
        Ok(target)
    }

    /// Select or deselect a multi-select option. Never changes the step.
    pub async fn toggle(&self, field: MultiField, value: &str) -> Result<Toggle, QuizError> {
        let mut state = self.state.write().await;
        if state.submitted {
            return Err(QuizError::AlreadySubmitted);
        }

        let step = state.step;
        if step.kind() != StepKind::MultiSelect(field) {
            return Err(QuizError::MultiFieldNotOnStep { field, step });
        }
        if !catalog::is_offered(step, value) {
            return Err(QuizError::UnknownOption {
                step,
                value: value.to_string(),
            });
        }

        let toggle = state.answers.toggle_multi(field, value);
        // Deselecting keeps the points already earned.
        let delta = self.scoring.on_multi_toggle(toggle.inserted());
        state.award(delta, &self.tx);

        debug!(step = %step, field = %field, value, ?toggle, "Option toggled");
        Ok(toggle)
    }

    /// Explicit "next". Returns the new step, or `None` when the current step
    /// does not allow moving forward yet.
    pub async fn advance(&self) -> Option<Step> {
        let mut state = self.state.write().await;
        if state.submitted {
            return None;
        }

        let step = state.step;
        if !step.can_advance(&state.answers) {
            debug!(step = %step, "Forward transition blocked");
            return None;
        }
        let next = step.next(&state.answers)?;
        state.cancel_pending();
        state.move_to(next, &self.tx);
        Some(next)
    }

    /// Go back one step. Answers are kept.
    pub async fn back(&self) -> Option<Step> {
        let mut state = self.state.write().await;
        if state.submitted {
            return None;
        }

        let previous = state.step.previous(&state.answers)?;
        state.cancel_pending();
        state.move_to(previous, &self.tx);
        Some(previous)
    }

    /// Hand the finished quiz to the registration collaborator.
    pub async fn submit(&self, form: RegistrationForm) -> Result<Uuid, QuizError> {
        // Write lock held across the registrar call: at most one submission
        // is in flight.
        let mut state = self.state.write().await;
        if state.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        if state.step != Step::Register {
            return Err(QuizError::NotAtRegistration { step: state.step });
        }
        form.validate()?;
        state.cancel_pending();

        let submission = Submission {
            id: Uuid::new_v4(),
            form,
            answers: state.answers.clone(),
            score: state.score,
            submitted_at: chrono::Utc::now(),
        };
        let submission_id = submission.id;
        let score = submission.score;

        if let Err(e) = self.registrar.register(submission).await {
            warn!(submission_id = %submission_id, error = %e, "Registration failed");
            return Err(e.into());
        }

        state.submitted = true;
        info!(submission_id = %submission_id, score = score.value(), "Quiz submitted");
        let _ = self.tx.send(WizardEvent::Submitted {
            submission_id,
            score,
        });
        Ok(submission_id)
    }

    /// Apply a command received over a live connection.
    pub async fn apply(&self, command: WizardCommand) -> Result<(), QuizError> {
        match command {
            WizardCommand::Select { field, value } => {
                self.select(field, &value).await?;
            }
            WizardCommand::Toggle { field, value } => {
                self.toggle(field, &value).await?;
            }
            WizardCommand::Advance => {
                self.advance().await;
            }
            WizardCommand::Back => {
                self.back().await;
            }
        }
        Ok(())
    }

    fn spawn_transition(&self, id: Uuid, target: Step) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let tx = self.tx.clone();
        let delay = self.advance_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.write().await;
            // An abort can race with the wake-up; the id decides.
            if state.pending.as_ref().map(|p| p.id) != Some(id) {
                debug!(request_id = %id, "Stale transition ignored");
                return;
            }
            state.pending = None;
            state.move_to(target, &tx);
        })
    }
}

fn single_answer(step: Step, field: SingleField, value: &str) -> Result<SingleAnswer, QuizError> {
    let unknown = || QuizError::UnknownOption {
        step,
        value: value.to_string(),
    };
    if !catalog::is_offered(step, value) {
        return Err(unknown());
    }
    let answer = match field {
        SingleField::Phase => SingleAnswer::Phase(value.parse::<Phase>().map_err(|_| unknown())?),
        SingleField::PhaseFeeling => SingleAnswer::PhaseFeeling(value.to_string()),
        SingleField::CycleFeeling => SingleAnswer::CycleFeeling(value.to_string()),
    };
    Ok(answer)
}
