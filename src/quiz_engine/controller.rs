use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::quiz_engine::{
    config::QuizConfig,
    error::{QuizError, Result},
    models::{SessionPhase, ViewSnapshot},
    pool::CountryPool,
    score::{ScoreRecord, ScoreStore},
    session::{AdvanceTicket, QuestionSession, MIN_QUESTIONS},
    source::{build_countries, CountrySource},
};

/// Single entry point for user actions.
///
/// Owns the pool, the current session, the best-score record and the random
/// source. Each action runs to completion and returns a fresh
/// [`ViewSnapshot`]; answer actions that arrive while an advance is pending
/// complete that advance first.
pub struct SessionController<S: ScoreStore, R: Rng = StdRng> {
    config: QuizConfig,
    pool: CountryPool,
    session: QuestionSession,
    record: ScoreRecord<S>,
    rng: R,
}

impl<S: ScoreStore> SessionController<S, StdRng> {
    /// Seeded from `config.rng_seed`, or from entropy when unset.
    pub fn new(config: QuizConfig, store: S) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Self::with_rng(config, store, rng)
    }
}

impl<S: ScoreStore, R: Rng> SessionController<S, R> {
    pub fn with_rng(config: QuizConfig, store: S, rng: R) -> Self {
        let mut record = ScoreRecord::new(store, config.best_score_key.clone());
        if let Err(e) = record.load() {
            warn!("could not read best score, starting from 0: {e}");
        }
        SessionController {
            session: QuestionSession::new(config.advance_delay()),
            pool: CountryPool::new(),
            record,
            rng,
            config,
        }
    }

    /// Fill the pool from `source`. On failure the pool keeps its previous
    /// contents (empty on first load) and the error is returned. Countries
    /// already drawn stay used across a reload.
    pub fn load_countries(&mut self, source: &dyn CountrySource) -> Result<usize> {
        let names = source.country_names().map_err(|e| {
            warn!("country source failed: {e}");
            e
        })?;
        let countries = build_countries(&names, &self.config);
        self.pool.load(countries)
    }

    /// Allowed question counts for a new game.
    pub fn question_bounds(&self) -> (usize, usize) {
        (MIN_QUESTIONS, self.pool.len())
    }

    /// Draw `question_count` unused countries and start a new session. A
    /// running or finished session is discarded first.
    pub fn start_game(&mut self, question_count: usize) -> Result<ViewSnapshot> {
        if self.pool.is_empty() {
            return Err(QuizError::EmptyPool);
        }
        let (min, max) = self.question_bounds();
        if !(min..=max).contains(&question_count) {
            return Err(QuizError::InvalidQuestionCount { requested: question_count, min, max });
        }

        let questions = self.pool.sample_without_replacement(question_count, &mut self.rng)?;
        if self.session.phase() != SessionPhase::AwaitingStart {
            self.session.restart();
        }
        self.session.start(questions)?;
        info!(
            questions = question_count,
            pool_remaining = self.pool.remaining(),
            "game started"
        );
        Ok(self.snapshot())
    }

    pub fn answer_text(&mut self, input: &str, now: Instant) -> Result<ViewSnapshot> {
        self.flush_pending();
        self.session.submit_free_text(input, now)?;
        self.record_points();
        Ok(self.snapshot())
    }

    pub fn answer_choice(&mut self, option: &str, now: Instant) -> Result<ViewSnapshot> {
        self.flush_pending();
        self.session.submit_choice(option, now)?;
        self.record_points();
        Ok(self.snapshot())
    }

    /// Show multiple-choice options for the current question. Repeat
    /// requests leave the options as they are.
    pub fn request_options(&mut self) -> Result<ViewSnapshot> {
        self.flush_pending();
        self.session.request_multiple_choice(&self.pool, &mut self.rng)?;
        Ok(self.snapshot())
    }

    /// Abandon the session. The pool's used-set is kept.
    pub fn restart(&mut self) -> ViewSnapshot {
        self.session.restart();
        info!("session restarted");
        self.snapshot()
    }

    /// Let every country appear again in future games.
    pub fn reset_pool(&mut self) -> ViewSnapshot {
        self.pool.reset();
        self.snapshot()
    }

    /// Fire the pending advance if due. Returns whether the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.session.poll_advance(now)
    }

    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.session.pending_advance()
    }

    /// Fire a ticket handed out by [`Self::pending_advance`]; stale tickets
    /// are ignored.
    pub fn complete_advance(&mut self, ticket: AdvanceTicket) -> bool {
        self.session.complete_advance(ticket)
    }

    pub fn best_score(&self) -> u32 {
        self.record.best()
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let session = &self.session;
        let advance_pending = session.pending_advance().is_some();
        let question_number = match session.phase() {
            SessionPhase::AwaitingStart => 0,
            SessionPhase::Finished      => session.question_count(),
            SessionPhase::InProgress if advance_pending => session.index(),
            SessionPhase::InProgress    => session.index() + 1,
        };

        ViewSnapshot {
            phase: session.phase(),
            image_ref: session.displayed_question().map(|c| c.image_ref.clone()),
            question_number,
            question_count: session.question_count(),
            remaining: session.remaining(),
            mode: session.mode(),
            options: session.options().to_vec(),
            feedback: session.feedback().clone(),
            score: session.tally(),
            points: session.points_total(),
            best_score: self.record.best(),
            advance_pending,
            pool_remaining: self.pool.remaining(),
        }
    }

    fn flush_pending(&mut self) {
        if let Some(ticket) = self.session.pending_advance() {
            self.session.complete_advance(ticket);
        }
    }

    fn record_points(&mut self) {
        if let Err(e) = self.record.record_if_better(self.session.points_total()) {
            warn!("could not persist best score: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::models::{AnswerMode, Feedback, Tally};
    use crate::quiz_engine::score::MemoryStore;
    use crate::quiz_engine::source::StaticSource;
    use std::time::Duration;

    fn source(n: usize) -> StaticSource {
        StaticSource::from_pairs((0..n).map(|i| (format!("c{i:02}"), format!("Country {i}"))))
    }

    fn controller(n: usize) -> SessionController<MemoryStore> {
        let config = QuizConfig { rng_seed: Some(42), ..QuizConfig::default() };
        let mut ctl = SessionController::new(config, MemoryStore::new());
        ctl.load_countries(&source(n)).unwrap();
        ctl
    }

    /// Name of the question currently being asked, read off the image ref.
    fn current_name(ctl: &SessionController<MemoryStore>) -> String {
        let view = ctl.snapshot();
        let image = view.image_ref.expect("a flag is shown");
        let code = image
            .trim_start_matches("https://flagcdn.com/w640/c")
            .trim_end_matches(".webp");
        format!("Country {}", code.parse::<u32>().unwrap())
    }

    #[test]
    fn start_game_validates_count_against_pool() {
        let mut ctl = controller(8);
        assert!(matches!(
            ctl.start_game(4),
            Err(QuizError::InvalidQuestionCount { requested: 4, min: 5, max: 8 })
        ));
        assert!(matches!(
            ctl.start_game(9),
            Err(QuizError::InvalidQuestionCount { requested: 9, max: 8, .. })
        ));
        assert_eq!(ctl.snapshot().phase, SessionPhase::AwaitingStart);
        assert_eq!(ctl.snapshot().pool_remaining, 8);
    }

    #[test]
    fn start_without_countries_is_blocked() {
        let mut ctl = SessionController::new(QuizConfig::default(), MemoryStore::new());
        let err = ctl.start_game(5).unwrap_err();
        assert!(matches!(err, QuizError::EmptyPool));
        assert!(err.blocks_start());
    }

    #[test]
    fn failed_source_leaves_pool_empty() {
        let mut ctl = SessionController::new(QuizConfig::default(), MemoryStore::new());
        let bad = crate::quiz_engine::source::JsonCodesSource::new("oops");
        assert!(ctl.load_countries(&bad).is_err());
        assert!(matches!(ctl.start_game(5), Err(QuizError::EmptyPool)));
    }

    #[test]
    fn second_game_needs_unused_countries() {
        let mut ctl = controller(8);
        ctl.start_game(5).unwrap();
        ctl.restart();
        assert!(matches!(
            ctl.start_game(5),
            Err(QuizError::InsufficientPool { requested: 5, available: 3 })
        ));
        ctl.reset_pool();
        assert!(ctl.start_game(5).is_ok());
    }

    #[test]
    fn answer_updates_snapshot_and_best_score() {
        let mut ctl = controller(10);
        ctl.start_game(5).unwrap();
        let name = current_name(&ctl);

        let view = ctl.answer_text(&name.to_uppercase(), Instant::now()).unwrap();
        assert_eq!(view.score, Tally { correct: 1, incorrect: 0 });
        assert_eq!(view.points, 2);
        assert_eq!(view.best_score, 2);
        assert_eq!(view.feedback, Feedback::Correct);
        assert!(view.advance_pending);
        assert_eq!(view.question_number, 1);
        assert_eq!(view.remaining, 4);
    }

    #[test]
    fn tick_reveals_next_flag_after_delay() {
        let mut ctl = controller(10);
        ctl.start_game(5).unwrap();
        let first = ctl.snapshot().image_ref;
        let t0 = Instant::now();
        ctl.answer_text("wrong", t0).unwrap();

        assert!(!ctl.tick(t0));
        assert_eq!(ctl.snapshot().image_ref, first);
        assert!(ctl.tick(t0 + Duration::from_millis(1500)));

        let view = ctl.snapshot();
        assert_ne!(view.image_ref, first);
        assert_eq!(view.feedback, Feedback::None);
        assert_eq!(view.question_number, 2);
    }

    #[test]
    fn answering_during_delay_completes_the_advance_first() {
        let mut ctl = controller(10);
        ctl.start_game(5).unwrap();
        let t0 = Instant::now();
        ctl.answer_text("wrong", t0).unwrap();
        let view = ctl.answer_text("also wrong", t0).unwrap();
        assert_eq!(view.score, Tally { correct: 0, incorrect: 2 });
        assert_eq!(view.question_number, 2);
    }

    #[test]
    fn request_options_switches_mode_once() {
        let mut ctl = controller(10);
        ctl.start_game(5).unwrap();
        let first = ctl.request_options().unwrap();
        assert_eq!(first.mode, AnswerMode::MultipleChoice);
        assert_eq!(first.options.len(), 4);
        let second = ctl.request_options().unwrap();
        assert_eq!(first.options, second.options);
    }

    #[test]
    fn restart_drops_stale_ticket() {
        let mut ctl = controller(12);
        ctl.start_game(5).unwrap();
        let t0 = Instant::now();
        ctl.answer_text("wrong", t0).unwrap();
        let ticket = ctl.pending_advance().unwrap();

        let view = ctl.restart();
        assert_eq!(view.phase, SessionPhase::AwaitingStart);
        assert!(!ctl.complete_advance(ticket));
        assert!(!ctl.tick(t0 + Duration::from_secs(10)));

        ctl.start_game(5).unwrap();
        assert!(!ctl.complete_advance(ticket));
        assert_eq!(ctl.snapshot().question_number, 1);
    }

    #[test]
    fn best_score_is_read_at_startup() {
        let mut store = MemoryStore::new();
        store.set("flag_quiz.best_score", 11).unwrap();
        let ctl = SessionController::new(QuizConfig::default(), store);
        assert_eq!(ctl.best_score(), 11);
        assert_eq!(ctl.snapshot().best_score, 11);
    }
}
