//! Turn orchestration.
//!
//! Sequences one round of play:
//!
//! ```text
//! AwaitingSelection --select_category--> AwaitingTurn
//! AwaitingTurn --request_question(active player)--> Generating
//! Generating --ok--> Displaying --acknowledge_question--> AwaitingTurn (turn advanced)
//! Generating --err--> AwaitingTurn (nothing changed, failure surfaced)
//! ```
//!
//! The session store is the only owner of history and the active player; the
//! orchestrator holds just the transient phase, the displayed question, and
//! the last surfaced failure.
//!
//! All methods take `&self`. The state lock is never held across the
//! generation await, so a shared orchestrator observes `Generating` and a
//! duplicate request made meanwhile is ignored instead of queued.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use closer_domain::{
    Category, DomainError, Player, Question, SessionState, Theme, PROMPT_HISTORY_WINDOW,
};

use crate::infrastructure::ports::{ClockPort, GenerationError, GenerationPort};
use crate::use_cases::prompt::build_prompt;
use crate::use_cases::session::SessionStore;


/// Shown when no provider credential is configured.
pub const MISSING_CONFIGURATION_MESSAGE: &str =
    "Question generation is not configured. Set CLOSER_API_TOKEN and try again.";

/// Shown for every other generation failure.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Couldn't get a question right now. Check your connection and configuration, then try again.";

/// Where the session is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    AwaitingSelection,
    AwaitingTurn,
    Generating,
    Displaying,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingSelection => "awaiting selection",
            Self::AwaitingTurn => "awaiting turn",
            Self::Generating => "generating",
            Self::Displaying => "displaying",
        };
        f.write_str(name)
    }
}

/// User-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingConfiguration,
    GenerationFailed,
}

/// The last failure as the presentation layer should show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&GenerationError> for TurnFailure {
    fn from(error: &GenerationError) -> Self {
        match error {
            GenerationError::MissingCredential => Self {
                kind: FailureKind::MissingConfiguration,
                message: MISSING_CONFIGURATION_MESSAGE.to_string(),
            },
            GenerationError::TransportFailure(_)
            | GenerationError::HttpStatusFailure { .. }
            | GenerationError::MalformedResponse(_) => Self {
                kind: FailureKind::GenerationFailed,
                message: GENERATION_FAILED_MESSAGE.to_string(),
            },
        }
    }
}

/// Why a `request_question` event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Stale UI event from the seat that is not up.
    NotYourTurn { requested: Player, active: Player },
    /// Duplicate or premature event.
    WrongPhase(TurnPhase),
    /// The session was reset while the question was being generated.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Displayed(Question),
    Ignored(IgnoreReason),
}

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("{event} is not valid while {phase}")]
    InvalidTransition {
        event: &'static str,
        phase: TurnPhase,
    },

    #[error(transparent)]
    InvalidCategory(#[from] DomainError),

    #[error("{}", .failure.message)]
    Generation {
        failure: TurnFailure,
        source: GenerationError,
    },
}

/// Everything the presentation layer reads.
#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub phase: TurnPhase,
    pub session: SessionState,
    pub question: Option<Question>,
    pub error: Option<TurnFailure>,
}

/// Mutable part of the orchestrator, guarded by one lock.
struct TurnInner {
    store: SessionStore,
    phase: TurnPhase,
    current_question: Option<Question>,
    last_error: Option<TurnFailure>,
    /// Bumped when a request starts and on every reset, so a late result
    /// can tell whether it still belongs to the current round.
    epoch: u64,
}

impl TurnInner {
    fn resting_phase(&self) -> TurnPhase {
        if self.store.state().category.is_some() {
            TurnPhase::AwaitingTurn
        } else {
            TurnPhase::AwaitingSelection
        }
    }

    fn owns_generation(&self, epoch: u64) -> bool {
        self.phase == TurnPhase::Generating && self.epoch == epoch
    }
}

/// Puts the phase back to `AwaitingTurn` if the request future is dropped
/// while its generation is still in flight.
struct GeneratingGuard<'a> {
    inner: &'a Mutex<TurnInner>,
    epoch: u64,
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.owns_generation(self.epoch) {
            inner.phase = TurnPhase::AwaitingTurn;
        }
    }
}

pub struct TurnOrchestrator {
    inner: Mutex<TurnInner>,
    generator: Arc<dyn GenerationPort>,
    clock: Arc<dyn ClockPort>,
}

impl TurnOrchestrator {
    /// Resume from whatever the store restored: a saved category puts the
    /// session straight into `AwaitingTurn`.
    pub fn new(
        store: SessionStore,
        generator: Arc<dyn GenerationPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let mut inner = TurnInner {
            store,
            phase: TurnPhase::AwaitingSelection,
            current_question: None,
            last_error: None,
            epoch: 0,
        };
        inner.phase = inner.resting_phase();
        Self {
            inner: Mutex::new(inner),
            generator,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TurnInner> {
        // No invariant spans a panic point inside the lock.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> TurnPhase {
        self.lock().phase
    }

    pub fn session(&self) -> SessionState {
        self.lock().store.state().clone()
    }

    pub fn current_question(&self) -> Option<Question> {
        self.lock().current_question.clone()
    }

    pub fn last_error(&self) -> Option<TurnFailure> {
        self.lock().last_error.clone()
    }

    /// Theme of the chosen category, if one is chosen.
    pub fn theme(&self) -> Option<&'static Theme> {
        self.lock().store.state().category.map(Theme::for_category)
    }

    pub fn view(&self) -> TurnView {
        let inner = self.lock();
        TurnView {
            phase: inner.phase,
            session: inner.store.state().clone(),
            question: inner.current_question.clone(),
            error: inner.last_error.clone(),
        }
    }

    pub fn select_category(&self, category: Category) -> Result<(), TurnError> {
        let mut inner = self.lock();
        expect_phase(&inner, "select_category", TurnPhase::AwaitingSelection)?;

        inner.store.select_category(category);
        inner.last_error = None;
        inner.phase = TurnPhase::AwaitingTurn;
        tracing::info!(category = %category, "Category selected");
        Ok(())
    }

    /// Parse a raw identifier (e.g. from a button or command) and select it.
    pub fn select_category_str(&self, raw: &str) -> Result<(), TurnError> {
        let category: Category = raw.parse()?;
        self.select_category(category)
    }

    /// Generate a question for `player` if it is their turn.
    ///
    /// Stale or duplicate events, including a second request while one is
    /// generating, come back as [`RequestOutcome::Ignored`] and leave
    /// everything untouched. A generation failure leaves the session in
    /// `AwaitingTurn` with history and active player unchanged.
    pub async fn request_question(&self, player: Player) -> Result<RequestOutcome, TurnError> {
        let (category, prompt, epoch) = {
            let mut inner = self.lock();
            if inner.phase != TurnPhase::AwaitingTurn {
                tracing::debug!(player = %player, phase = %inner.phase, "Ignoring question request");
                return Ok(RequestOutcome::Ignored(IgnoreReason::WrongPhase(inner.phase)));
            }

            let state = inner.store.state();
            let active = state.active_player;
            if player != active {
                tracing::debug!(player = %player, active = %active, "Ignoring stale question request");
                return Ok(RequestOutcome::Ignored(IgnoreReason::NotYourTurn {
                    requested: player,
                    active,
                }));
            }

            let Some(category) = state.category else {
                inner.phase = TurnPhase::AwaitingSelection;
                return Ok(RequestOutcome::Ignored(IgnoreReason::WrongPhase(inner.phase)));
            };

            let prompt = build_prompt(category, state.recent_history(PROMPT_HISTORY_WINDOW));
            tracing::debug!(
                player = %player,
                category = %category,
                history_len = state.history.len(),
                "Requesting question"
            );

            inner.epoch += 1;
            inner.phase = TurnPhase::Generating;
            (category, prompt, inner.epoch)
        };

        let _guard = GeneratingGuard {
            inner: &self.inner,
            epoch,
        };
        let result = self.generator.generate(&prompt).await;

        // Declared after `_guard`, so it is released before the guard locks.
        let mut inner = self.lock();
        if !inner.owns_generation(epoch) {
            tracing::info!(player = %player, "Discarding question for a reset session");
            return Ok(RequestOutcome::Ignored(IgnoreReason::Superseded));
        }

        match result {
            Ok(text) => {
                if inner.store.state().has_seen(&text) {
                    tracing::warn!(category = %category, "Generated question repeats recent history");
                }

                let question = Question::new(category, text, self.clock.now());
                inner.store.record_question(question.content.clone());
                inner.current_question = Some(question.clone());
                inner.last_error = None;
                inner.phase = TurnPhase::Displaying;
                tracing::info!(player = %player, question_id = %question.id, "Question ready");
                Ok(RequestOutcome::Displayed(question))
            }
            Err(source) => {
                tracing::warn!(
                    player = %player,
                    error_kind = source.kind(),
                    error = %source,
                    "Question generation failed"
                );
                let failure = TurnFailure::from(&source);
                inner.last_error = Some(failure.clone());
                inner.phase = TurnPhase::AwaitingTurn;
                Err(TurnError::Generation { failure, source })
            }
        }
    }

    /// The displayed question has been read; pass the turn.
    pub fn acknowledge_question(&self) -> Result<(), TurnError> {
        let mut inner = self.lock();
        expect_phase(&inner, "acknowledge_question", TurnPhase::Displaying)?;

        inner.store.advance_turn();
        inner.current_question = None;
        inner.last_error = None;
        inner.phase = TurnPhase::AwaitingTurn;
        tracing::debug!(active = %inner.store.state().active_player, "Turn advanced");
        Ok(())
    }

    /// Start over with the same category: player A, empty history.
    pub fn reset_round(&self) {
        let mut inner = self.lock();
        inner.store.reset_keeping_category();
        inner.current_question = None;
        inner.last_error = None;
        inner.epoch += 1;
        inner.phase = inner.resting_phase();
        tracing::info!("Round reset");
    }

    /// Forget everything, including the category.
    pub fn full_reset(&self) {
        let mut inner = self.lock();
        inner.store.full_reset();
        inner.current_question = None;
        inner.last_error = None;
        inner.epoch += 1;
        inner.phase = TurnPhase::AwaitingSelection;
        tracing::info!("Session fully reset");
    }

    pub async fn check_availability(&self) -> bool {
        self.generator.check_availability().await
    }
}

fn expect_phase(
    inner: &TurnInner,
    event: &'static str,
    expected: TurnPhase,
) -> Result<(), TurnError> {
    if inner.phase == expected {
        Ok(())
    } else {
        tracing::debug!(event, phase = %inner.phase, "Rejecting out-of-phase event");
        Err(TurnError::InvalidTransition {
            event,
            phase: inner.phase,
        })
    }
}
