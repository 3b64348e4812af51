//! Engine error types.
//!
//! Every fallible operation in the crate returns [`QuizError`]. Pool and
//! question-count errors block a game from starting; mode errors reject a
//! single action and leave the session untouched.

use thiserror::Error;

use crate::quiz_engine::models::AnswerMode;

/// Errors raised by the quiz engine.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The data source produced no usable countries.
    #[error("no countries loaded")]
    EmptyPool,

    /// Fewer unused countries remain than the game asked for.
    #[error("requested {requested} questions but only {available} unused countries remain")]
    InsufficientPool { requested: usize, available: usize },

    /// Requested question count is outside `min..=max`.
    #[error("question count {requested} is outside the allowed range {min}..={max}")]
    InvalidQuestionCount { requested: usize, min: usize, max: usize },

    #[error("a session needs at least {min} questions, got {got}")]
    TooFewQuestions { got: usize, min: usize },

    #[error("country '{0}' appears more than once in the question list")]
    DuplicateQuestion(String),

    #[error("a session is already running or finished; restart it first")]
    SessionAlreadyStarted,

    #[error("no question is being asked right now")]
    NotInProgress,

    #[error("question is in {current} mode, got a {submitted} answer")]
    WrongAnswerMode { current: AnswerMode, submitted: AnswerMode },

    #[error("need {needed} distractor names but the pool only offers {available}")]
    NotEnoughDistractors { needed: usize, available: usize },

    /// The external country list could not be read or parsed.
    #[error("country data source failed: {0}")]
    DataSource(String),

    /// The best-score store could not be read or written.
    #[error("score storage failed: {0}")]
    Storage(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl QuizError {
    /// Returns `true` if the error means a game cannot be started at all.
    pub fn blocks_start(&self) -> bool {
        matches!(
            self,
            QuizError::EmptyPool
                | QuizError::InsufficientPool { .. }
                | QuizError::InvalidQuestionCount { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
