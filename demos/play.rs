//! Terminal flag quiz.
//!
//! Run with: `cargo run --example play [codes.json]`
//!
//! Without an argument a small built-in country list is used. A flagcdn
//! `codes.json` file (`{ "mx": "México", ... }`) can be passed instead.
//! Flags are shown as their image URL.
//!
//! ## Commands
//!
//! - any text: typed answer (2 points)
//! - `?`: ask for four options, then answer with `1`-`4` (1 point)
//! - `:restart`: abandon the current game
//! - `:reset`: let every country appear again
//! - `:quit`
//!
//! Set `RUST_LOG=flag_quiz=debug` to watch the engine's decisions, and
//! `FLAG_QUIZ_CONFIG=path/to/config.json` to override the defaults.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use flag_quiz::{
    AnswerMode, CountrySource, JsonCodesSource, JsonFileStore, QuizConfig, SessionController,
    SessionPhase, StaticSource, ViewSnapshot,
};
use tracing_subscriber::EnvFilter;

const BUILT_IN: [(&str, &str); 12] = [
    ("ar", "Argentina"),
    ("br", "Brasil"),
    ("ca", "Canadá"),
    ("de", "Alemania"),
    ("es", "España"),
    ("fr", "Francia"),
    ("gb", "Reino Unido"),
    ("gb-sct", "Escocia"),
    ("it", "Italia"),
    ("jp", "Japón"),
    ("mx", "México"),
    ("pe", "Perú"),
];

/// Pretty-print one view snapshot.
fn print_view(view: &ViewSnapshot) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if !view.feedback.to_string().is_empty() {
        println!("  {}", view.feedback);
    }
    if view.phase == SessionPhase::InProgress && !view.advance_pending {
        println!("  [{}/{}]  Flag: {}",
            view.question_number, view.question_count,
            view.image_ref.as_deref().unwrap_or("-"));
        if view.mode == AnswerMode::MultipleChoice {
            for (i, option) in view.options.iter().enumerate() {
                println!("    {}) {}", i + 1, option);
            }
        }
    }
    println!("  Correct: {}  Incorrect: {}  Points: {}  Best: {}",
        view.score.correct, view.score.incorrect, view.points, view.best_score);
}

fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label} > ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Wait out the feedback delay, then show the next flag.
fn wait_for_advance(quiz: &mut SessionController<JsonFileStore>) {
    if let Some(ticket) = quiz.pending_advance() {
        std::thread::sleep(ticket.remaining(Instant::now()));
        quiz.tick(Instant::now());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::var("FLAG_QUIZ_CONFIG") {
        Ok(path) => QuizConfig::load(Path::new(&path))?,
        Err(_)   => QuizConfig::default(),
    };
    let store = JsonFileStore::new(std::env::temp_dir().join("flag_quiz_scores.json"));
    let mut quiz = SessionController::new(config, store);

    let source: Box<dyn CountrySource> = match std::env::args().nth(1) {
        Some(path) => Box::new(JsonCodesSource::from_file(Path::new(&path))?),
        None       => Box::new(StaticSource::from_pairs(BUILT_IN)),
    };
    let loaded = quiz.load_countries(source.as_ref())?;
    println!("Loaded {loaded} countries. Best score so far: {}", quiz.best_score());

    loop {
        let view = quiz.snapshot();
        if view.phase != SessionPhase::InProgress {
            let (min, max) = quiz.question_bounds();
            let suggested = quiz.config().default_question_count.min(max).max(min);
            let Some(line) = prompt(&format!("How many flags? ({min}-{max}, enter for {suggested})"))? else {
                break;
            };
            match line.as_str() {
                ":quit" => break,
                ":reset" => {
                    quiz.reset_pool();
                    println!("All countries are back in play.");
                    continue;
                }
                _ => {}
            }
            let count = if line.is_empty() { suggested } else { line.parse().unwrap_or(0) };
            match quiz.start_game(count) {
                Ok(view) => print_view(&view),
                Err(e) => println!("  Cannot start: {e}"),
            }
            continue;
        }

        let Some(line) = prompt("Country")? else { break };
        let result = match line.as_str() {
            ":quit" => break,
            ":restart" => Ok(quiz.restart()),
            ":reset" => Ok(quiz.reset_pool()),
            "?" => quiz.request_options(),
            _ if view.mode == AnswerMode::MultipleChoice => {
                match line.parse::<usize>().ok().and_then(|i| view.options.get(i.wrapping_sub(1))) {
                    Some(option) => quiz.answer_choice(option, Instant::now()),
                    None => {
                        println!("  Pick a number from 1 to {}", view.options.len());
                        continue;
                    }
                }
            }
            _ => quiz.answer_text(&line, Instant::now()),
        };

        match result {
            Ok(view) => {
                print_view(&view);
                if view.advance_pending {
                    wait_for_advance(&mut quiz);
                    print_view(&quiz.snapshot());
                }
            }
            Err(e) => println!("  {e}"),
        }
    }

    println!("Best score: {}", quiz.best_score());
    Ok(())
}
