//! # flag_quiz
//!
//! A single-player flag quiz engine: identify countries from their flags by
//! typing the name or by picking one of four options.
//!
//! The crate holds the game logic only. Fetching the country list, drawing
//! flags and laying out buttons belong to the caller; the engine hands back
//! a plain [`ViewSnapshot`] after every action.
//!
//! ## How it works
//!
//! 1. Build a [`SessionController`] from a [`QuizConfig`] and a
//!    [`ScoreStore`] (where the best score lives).
//! 2. Feed it a [`CountrySource`]: a `code -> name` mapping such as flagcdn's
//!    `codes.json`. Subdivision codes (`gb-eng`) are dropped and every flag
//!    URL is derived from the configured template.
//! 3. Call [`SessionController::start_game`] with a question count (at least
//!    5). Countries are drawn without replacement and stay "used" across
//!    games until [`SessionController::reset_pool`].
//! 4. Answer with [`SessionController::answer_text`] (2 points) or, after
//!    [`SessionController::request_options`], with
//!    [`SessionController::answer_choice`] (1 point). Answers are compared
//!    ignoring case, surrounding whitespace and accents.
//! 5. After each answer the feedback stays on screen until the advance
//!    delay elapses; call [`SessionController::tick`] from your timer.
//!
//! ## Key features
//!
//! - **Deterministic**: set `rng_seed` in the config to reproduce the exact
//!   same question order and option sets.
//! - **No repeats**: a flag never reappears within a series of games until
//!   the pool is reset explicitly.
//! - **Persistent best score**: stored through [`ScoreStore`]; a JSON-file
//!   store ships with the crate.
//!
//! ## Quick start
//!
//! ```rust
//! use std::time::Instant;
//! use flag_quiz::{MemoryStore, QuizConfig, SessionController, StaticSource};
//!
//! let source = StaticSource::from_pairs([
//!     ("ar", "Argentina"), ("br", "Brasil"), ("cl", "Chile"),
//!     ("mx", "México"), ("pe", "Perú"), ("uy", "Uruguay"),
//! ]);
//! let config = QuizConfig { rng_seed: Some(7), ..QuizConfig::default() };
//! let mut quiz = SessionController::new(config, MemoryStore::new());
//! quiz.load_countries(&source)?;
//!
//! let view = quiz.start_game(5)?;
//! println!("Which flag is this? {}", view.image_ref.unwrap_or_default());
//!
//! // Typed answers: accents and case are ignored.
//! let view = quiz.answer_text("mexico", Instant::now())?;
//! println!("{} (points: {})", view.feedback, view.points);
//!
//! // Or ask for four options.
//! let view = quiz.request_options()?;
//! let view = quiz.answer_choice(&view.options[0], Instant::now())?;
//! assert_eq!(view.score.correct + view.score.incorrect, 2);
//! # Ok::<(), flag_quiz::QuizError>(())
//! ```

pub mod quiz_engine;
pub mod view_adapter;

// Convenience re-exports so callers can use `flag_quiz::SessionController`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    answers_match, normalize, AdvanceTicket, AnswerMode, AnswerOutcome, Country, CountryPool,
    CountrySource, Feedback, JsonCodesSource, JsonFileStore, MemoryStore, QuestionSession,
    QuizConfig, QuizError, ScoreRecord, ScoreStore, SessionController, SessionPhase,
    SessionSummary, StaticSource, Tally, ViewSnapshot,
};
pub use view_adapter::to_view_json;
