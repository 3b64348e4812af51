//! Core quiz engine: country pool, question sessions, scoring and persistence.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: countries, tally, feedback, view snapshot |
//! | `error`      | `QuizError` and the crate `Result` alias |
//! | `config`     | `QuizConfig`: delay, flag URL template, storage key, seed |
//! | `normalize`  | Accent/case/whitespace-insensitive answer comparison |
//! | `helpers`    | Fisher-Yates shuffling shared by pool and session |
//! | `pool`       | Candidate countries with a used-set; sampling without replacement |
//! | `session`    | One run: question queue, scoring, deferred advance |
//! | `score`      | Best-score record over a pluggable key-value store |
//! | `source`     | Provider `code -> name` mapping to `Country` records |
//! | `controller` | `SessionController`, the single entry point for user actions |

pub mod config;
pub mod controller;
pub mod error;
pub mod helpers;
pub mod models;
pub mod normalize;
pub mod pool;
pub mod score;
pub mod session;
pub mod source;

// Re-export the public API surface so callers can use
// `quiz_engine::SessionController` without reaching into sub-modules.
pub use config::QuizConfig;
pub use controller::SessionController;
pub use error::{QuizError, Result};
pub use models::{
    AnswerMode, AnswerOutcome, Country, Feedback, SessionPhase, SessionSummary, Tally,
    ViewSnapshot,
};
pub use normalize::{answers_match, normalize};
pub use pool::CountryPool;
pub use score::{JsonFileStore, MemoryStore, ScoreRecord, ScoreStore};
pub use session::{
    AdvanceTicket, QuestionSession, CHOICE_POINTS, FREE_TEXT_POINTS, MIN_QUESTIONS, OPTION_COUNT,
};
pub use source::{build_countries, CountrySource, JsonCodesSource, StaticSource};
