use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Country primitives
// ---------------------------------------------------------------------------

/// One candidate country. Immutable once loaded into the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Lowercase ISO-style code, unique within a pool (e.g. "mx").
    pub code: String,
    /// Display name; also the expected answer.
    pub name: String,
    /// Locator of the flag asset, derived from `code`.
    pub image_ref: String,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Country {
            code: code.into(),
            name: name.into(),
            image_ref: image_ref.into(),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

// ---------------------------------------------------------------------------
// Session state types
// ---------------------------------------------------------------------------

/// Raw correct / incorrect counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub incorrect: u32,
}

impl Tally {
    pub fn answered(self) -> u32 {
        self.correct + self.incorrect
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} correct / {} incorrect", self.correct, self.incorrect)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerMode {
    #[default]
    FreeText,
    MultipleChoice,
}

impl fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerMode::FreeText       => write!(f, "free-text"),
            AnswerMode::MultipleChoice => write!(f, "multiple-choice"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    AwaitingStart,
    InProgress,
    Finished,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::AwaitingStart => write!(f, "Awaiting start"),
            SessionPhase::InProgress    => write!(f, "In progress"),
            SessionPhase::Finished      => write!(f, "Finished"),
        }
    }
}

/// What the player sees about their last answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    /// Carries the expected name so the UI can show it.
    Incorrect { correct_name: String },
    /// Terminal message shown once the last question is answered.
    Finished { points: u32, correct: u32, incorrect: u32 },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::None => Ok(()),
            Feedback::Correct => write!(f, "Correct!"),
            Feedback::Incorrect { correct_name } => {
                write!(f, "Incorrect! The answer was {}", correct_name)
            }
            Feedback::Finished { points, correct, incorrect } => write!(
                f,
                "Game over! You scored {} points ({} correct, {} incorrect)",
                points, correct, incorrect
            ),
        }
    }
}

/// Result of one answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_name: String,
    pub points_awarded: u32,
    pub points_total: u32,
    /// True when this answer completed the session.
    pub finished: bool,
}

/// Final numbers of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub question_count: usize,
    pub tally: Tally,
    pub points: u32,
    /// Points had every question been answered correctly by typing.
    pub max_points: u32,
}

// ---------------------------------------------------------------------------
// Rendering boundary
// ---------------------------------------------------------------------------

/// Read-only view state handed to the presentation layer after every action.
///
/// Holds plain values only; pool and session internals never leak through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub phase: SessionPhase,
    /// Flag currently on screen, if any.
    pub image_ref: Option<String>,
    /// 1-based position of the flag on screen; 0 before a game starts.
    pub question_number: usize,
    pub question_count: usize,
    /// Questions not yet answered in this session.
    pub remaining: usize,
    pub mode: AnswerMode,
    pub options: Vec<String>,
    pub feedback: Feedback,
    pub score: Tally,
    pub points: u32,
    pub best_score: u32,
    /// An inter-question delay is running.
    pub advance_pending: bool,
    /// Countries not yet drawn by any session since the last pool reset.
    pub pool_remaining: usize,
}
