//! One run through a fixed list of flags.
//!
//! ## Lifecycle
//!
//! ```text
//! AwaitingStart --start()--> InProgress --last answer--> Finished
//!       ^                                                   |
//!       +-------------------- restart() --------------------+
//! ```
//!
//! Every submission updates tally, points, feedback and index as one unit,
//! so `tally.correct + tally.incorrect == index` holds between calls.
//!
//! ## Deferred advance
//!
//! After a non-final answer the logical index moves on at once, but the flag
//! on screen stays on the answered question (with its feedback) until an
//! [`AdvanceTicket`] fires. Tickets carry the session generation; a ticket
//! issued before a `restart()` is ignored.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::quiz_engine::{
    error::{QuizError, Result},
    helpers,
    models::{AnswerMode, AnswerOutcome, Country, Feedback, SessionPhase, SessionSummary, Tally},
    normalize::answers_match,
    pool::CountryPool,
};

/// Smallest number of questions a session accepts.
pub const MIN_QUESTIONS: usize = 5;
/// Size of a multiple-choice option set, correct name included.
pub const OPTION_COUNT: usize = 4;
/// Points for a correct typed answer.
pub const FREE_TEXT_POINTS: u32 = 2;
/// Points for a correct multiple-choice answer.
pub const CHOICE_POINTS: u32 = 1;

/// A scheduled switch to the next flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    generation: u64,
    due_at: Instant,
}

impl AdvanceTicket {
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at
    }

    /// Time left until the ticket is due, zero if already due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due_at.saturating_duration_since(now)
    }
}

#[derive(Debug, Clone)]
pub struct QuestionSession {
    phase: SessionPhase,
    questions: Vec<Country>,
    index: usize,
    tally: Tally,
    points: u32,
    mode: AnswerMode,
    options: Vec<String>,
    options_requested: bool,
    feedback: Feedback,
    advance_delay: Duration,
    pending: Option<AdvanceTicket>,
    generation: u64,
}

impl QuestionSession {
    pub fn new(advance_delay: Duration) -> Self {
        QuestionSession {
            phase: SessionPhase::AwaitingStart,
            questions: Vec::new(),
            index: 0,
            tally: Tally::default(),
            points: 0,
            mode: AnswerMode::FreeText,
            options: Vec::new(),
            options_requested: false,
            feedback: Feedback::None,
            advance_delay,
            pending: None,
            generation: 0,
        }
    }

    /// Begin a run over `questions`, in the given order.
    pub fn start(&mut self, questions: Vec<Country>) -> Result<()> {
        if self.phase != SessionPhase::AwaitingStart {
            return Err(QuizError::SessionAlreadyStarted);
        }
        if questions.len() < MIN_QUESTIONS {
            return Err(QuizError::TooFewQuestions { got: questions.len(), min: MIN_QUESTIONS });
        }
        for (i, c) in questions.iter().enumerate() {
            if questions[..i].iter().any(|prev| prev.code == c.code) {
                return Err(QuizError::DuplicateQuestion(c.code.clone()));
            }
        }

        info!("session started with {} questions", questions.len());
        self.questions = questions;
        self.index = 0;
        self.tally = Tally::default();
        self.points = 0;
        self.clear_question_state();
        self.feedback = Feedback::None;
        self.pending = None;
        self.phase = SessionPhase::InProgress;
        Ok(())
    }

    /// The question the next answer will be scored against.
    pub fn current_question(&self) -> Result<&Country> {
        self.ensure_in_progress()?;
        Ok(&self.questions[self.index])
    }

    /// The flag the player is looking at. While an advance is pending this is
    /// the question just answered.
    pub fn displayed_question(&self) -> Option<&Country> {
        match self.phase {
            SessionPhase::InProgress if self.pending.is_some() => self.questions.get(self.index - 1),
            SessionPhase::InProgress => self.questions.get(self.index),
            _ => None,
        }
    }

    pub fn submit_free_text(&mut self, input: &str, now: Instant) -> Result<AnswerOutcome> {
        self.submit(input, AnswerMode::FreeText, now)
    }

    pub fn submit_choice(&mut self, option: &str, now: Instant) -> Result<AnswerOutcome> {
        self.submit(option, AnswerMode::MultipleChoice, now)
    }

    /// Build the option set for the current question and switch to
    /// multiple-choice. A repeat request returns the existing set untouched.
    pub fn request_multiple_choice<R: Rng>(&mut self, pool: &CountryPool, rng: &mut R) -> Result<&[String]> {
        self.ensure_in_progress()?;
        if self.options_requested {
            debug!("options already shown for question {}, not re-rolling", self.index + 1);
            return Ok(&self.options);
        }

        let correct = self.questions[self.index].name.clone();
        let mut options = pool.distractor_names(&correct, OPTION_COUNT - 1, rng)?;
        options.push(correct);
        helpers::shuffle(&mut options, rng);

        self.options = options;
        self.options_requested = true;
        self.mode = AnswerMode::MultipleChoice;
        Ok(&self.options)
    }

    fn submit(&mut self, input: &str, mode: AnswerMode, now: Instant) -> Result<AnswerOutcome> {
        self.ensure_in_progress()?;
        if self.mode != mode {
            return Err(QuizError::WrongAnswerMode { current: self.mode, submitted: mode });
        }

        let correct_name = self.questions[self.index].name.clone();
        let is_correct = answers_match(input, &correct_name);
        let points_awarded = match (is_correct, mode) {
            (false, _)                         => 0,
            (true, AnswerMode::FreeText)       => FREE_TEXT_POINTS,
            (true, AnswerMode::MultipleChoice) => CHOICE_POINTS,
        };

        if is_correct {
            self.tally.correct += 1;
        } else {
            self.tally.incorrect += 1;
        }
        self.points += points_awarded;
        self.index += 1;
        self.clear_question_state();

        let finished = self.index == self.questions.len();
        if finished {
            self.phase = SessionPhase::Finished;
            self.pending = None;
            self.feedback = Feedback::Finished {
                points: self.points,
                correct: self.tally.correct,
                incorrect: self.tally.incorrect,
            };
            info!(points = self.points, "session finished: {}", self.tally);
        } else {
            self.feedback = if is_correct {
                Feedback::Correct
            } else {
                Feedback::Incorrect { correct_name: correct_name.clone() }
            };
            self.pending = Some(AdvanceTicket {
                generation: self.generation,
                due_at: now + self.advance_delay,
            });
        }

        debug!(
            question = self.index,
            %mode,
            is_correct,
            points = self.points,
            "answer scored"
        );
        Ok(AnswerOutcome {
            is_correct,
            correct_name,
            points_awarded,
            points_total: self.points,
            finished,
        })
    }

    /// Fire the pending advance if it is due at `now`.
    pub fn poll_advance(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(ticket) if ticket.is_due(now) => self.complete_advance(ticket),
            _ => false,
        }
    }

    /// Fire `ticket` regardless of its due time. Stale or unknown tickets are
    /// ignored and return `false`.
    pub fn complete_advance(&mut self, ticket: AdvanceTicket) -> bool {
        if self.pending != Some(ticket) {
            if ticket.generation != self.generation {
                warn!("ignoring advance ticket from a previous session");
            }
            return false;
        }
        self.pending = None;
        self.feedback = Feedback::None;
        debug!("advanced to question {}", self.index + 1);
        true
    }

    /// Drop all session state and cancel any pending advance.
    pub fn restart(&mut self) {
        let generation = self.generation + 1;
        *self = QuestionSession::new(self.advance_delay);
        self.generation = generation;
    }

    fn clear_question_state(&mut self) {
        self.mode = AnswerMode::FreeText;
        self.options.clear();
        self.options_requested = false;
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.phase == SessionPhase::InProgress {
            Ok(())
        } else {
            Err(QuizError::NotInProgress)
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Number of questions answered so far.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn remaining(&self) -> usize {
        self.questions.len() - self.index
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn points_total(&self) -> u32 {
        self.points
    }

    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Finished {
            return None;
        }
        Some(SessionSummary {
            question_count: self.questions.len(),
            tally: self.tally,
            points: self.points,
            max_points: self.questions.len() as u32 * FREE_TEXT_POINTS,
        })
    }
}
