//! Quiz evaluation: grade submitted answers against a question set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Points awarded per correctly answered question.
pub const POINTS_PER_CORRECT: u64 = 10;

/// A multiple-choice question with its answer key.
///
/// Produced externally (the LLM collaborator emits these as a JSON array);
/// consumed read-only here. `answer` must equal one element of `options` —
/// see [`crate::parser::validate_question_set`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// The question text.
    pub question: String,
    /// Candidate answers, in display order. Conventionally three.
    pub options: Vec<String>,
    /// The correct option, verbatim.
    pub answer: String,
}

/// Per-question grading outcome. Derived, ephemeral, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub question: String,
    /// What the user picked, or `None` if the question went unanswered.
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Grade a submission against a question set.
///
/// `answers` maps question index to the submitted option text. Correctness
/// is exact, case-sensitive string equality with the answer key. Results
/// preserve question order.
///
/// Callers are expected to reject incomplete submissions before calling
/// (see [`crate::engine::ProgressEngine::submit_quiz`]); an index missing
/// from `answers` grades as incorrect with `user_answer: None`.
pub fn evaluate(
    questions: &[QuestionRecord],
    answers: &HashMap<usize, String>,
) -> (u64, Vec<QuizResult>) {
    let mut points = 0;
    let mut results = Vec::with_capacity(questions.len());

    for (i, q) in questions.iter().enumerate() {
        let user_answer = answers.get(&i).cloned();
        let is_correct = user_answer.as_deref() == Some(q.answer.as_str());

        if is_correct {
            points += POINTS_PER_CORRECT;
        }

        results.push(QuizResult {
            question: q.question.clone(),
            user_answer,
            correct_answer: q.answer.clone(),
            is_correct,
        });
    }

    (points, results)
}
