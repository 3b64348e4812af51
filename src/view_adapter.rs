use serde_json::{json, Value};
use crate::quiz_engine::models::{AnswerMode, Feedback, SessionPhase, ViewSnapshot};

/// Phase string expected by the JS client.
fn phase_str(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::AwaitingStart => "awaitingStart",
        SessionPhase::InProgress    => "inProgress",
        SessionPhase::Finished      => "finished",
    }
}

fn mode_str(mode: AnswerMode) -> &'static str {
    match mode {
        AnswerMode::FreeText       => "freeText",
        AnswerMode::MultipleChoice => "multipleChoice",
    }
}

/// Build the feedback block. `kind` drives the CSS class on the client.
fn feedback_block(feedback: &Feedback) -> Value {
    let (kind, correct_name) = match feedback {
        Feedback::None                       => ("none", None),
        Feedback::Correct                    => ("correct", None),
        Feedback::Incorrect { correct_name } => ("incorrect", Some(correct_name.as_str())),
        Feedback::Finished { .. }            => ("finished", None),
    };
    json!({
        "kind": kind,
        "message": feedback.to_string(),
        "correctName": correct_name
    })
}

/// Option buttons, with a stable index so the client can key them.
fn option_buttons(options: &[String]) -> Value {
    Value::Array(
        options
            .iter()
            .enumerate()
            .map(|(i, text)| json!({ "id": i, "text": text }))
            .collect(),
    )
}

/// Map a [`ViewSnapshot`] to the JSON object rendered by the web client.
///
/// Only display values are emitted; the correct answer is revealed solely
/// through `feedback.correctName` after a wrong answer.
pub fn to_view_json(view: &ViewSnapshot) -> Value {
    json!({
        "phase": phase_str(view.phase),
        "flag": {
            "src": view.image_ref,
            "questionNumber": view.question_number,
            "questionCount": view.question_count,
            "remaining": view.remaining
        },
        "input": {
            "mode": mode_str(view.mode),
            "options": option_buttons(&view.options),
            // Hide the "ask for options" button once options are on screen.
            "canRequestOptions": view.phase == SessionPhase::InProgress
                && view.mode == AnswerMode::FreeText
                && !view.advance_pending
        },
        "feedback": feedback_block(&view.feedback),
        "scoreboard": {
            "correct": view.score.correct,
            "incorrect": view.score.incorrect,
            "points": view.points,
            "best": view.best_score
        },
        "advancePending": view.advance_pending,
        "poolRemaining": view.pool_remaining
    })
}
