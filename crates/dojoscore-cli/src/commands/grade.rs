//! The `dojoscore grade` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use dojoscore_core::engine::ProgressEngine;
use dojoscore_core::parser::{load_question_set, validate_question_set};
use dojoscore_core::quiz::{evaluate, QuizResult};

use super::open_tracker;

pub async fn execute(
    questions: PathBuf,
    answers: Option<PathBuf>,
    username: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let set = load_question_set(&questions)?;

    let warnings = validate_question_set(&set);
    for w in &warnings {
        match w.question_index {
            Some(i) => eprintln!("Warning (question {i}): {}", w.message),
            None => eprintln!("Warning: {}", w.message),
        }
    }

    let Some(answers_path) = answers else {
        // Validate-only mode.
        println!(
            "{}: {} question(s), {} warning(s)",
            set.name,
            set.questions.len(),
            warnings.len()
        );
        return Ok(());
    };

    let answers = read_answers(&answers_path)?;

    let (points, results) = if let Some(username) = username {
        let (_, tracker) = open_tracker(config.as_ref())?;
        let engine = ProgressEngine::new(tracker);
        let mut ctx = engine.open_session(&username).await;
        engine.start_quiz(&mut ctx, set.questions.clone());
        let graded = engine.submit_quiz(&mut ctx, &set.questions, &answers).await?;
        println!(
            "Persisted: {} now at {} pts, {} session(s)",
            username, ctx.score, ctx.active_sessions
        );
        graded
    } else {
        // Anonymous grading; nothing hits the store and unanswered
        // questions simply grade incorrect.
        evaluate(&set.questions, &answers)
    };

    print_results(&results);
    let correct = results.iter().filter(|r| r.is_correct).count();
    println!("Score: {correct}/{} correct, {points} points", results.len());

    Ok(())
}

/// Submitted answers arrive as a JSON object of question index (as a
/// string key) to the selected option text.
fn read_answers(path: &PathBuf) -> Result<HashMap<usize, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;
    let raw: HashMap<String, String> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))?;

    let mut answers = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        let index: usize = key
            .parse()
            .with_context(|| format!("answer key {key:?} is not a question index"))?;
        answers.insert(index, value);
    }
    Ok(answers)
}

fn print_results(results: &[QuizResult]) {
    for (i, r) in results.iter().enumerate() {
        let verdict = if r.is_correct { "correct" } else { "incorrect" };
        let given = r.user_answer.as_deref().unwrap_or("(no answer)");
        println!("{}. {} [{verdict}]", i + 1, r.question);
        println!("   answered: {given}");
        if !r.is_correct {
            println!("   expected: {}", r.correct_answer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_parse_from_string_keyed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"0": "A", "1": "C"}"#).unwrap();

        let answers = read_answers(&path).unwrap();
        assert_eq!(answers.get(&0).map(String::as_str), Some("A"));
        assert_eq!(answers.get(&1).map(String::as_str), Some("C"));
    }

    #[test]
    fn non_numeric_answer_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"first": "A"}"#).unwrap();

        assert!(read_answers(&path).is_err());
    }
}
