//! The progress engine: the handler-facing orchestration layer.
//!
//! Ties sessions, quiz grading, and the progress store together the way the
//! UI collaborator drives them: one load-mutate-store cycle per user action,
//! session counted at most once, quiz points added to the session score and
//! persisted as the new absolute score.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::quiz::{evaluate, QuestionRecord, QuizResult};
use crate::session::SessionContext;
use crate::traits::ProgressTracker;

/// Coordinates session state with the progress store.
pub struct ProgressEngine {
    tracker: ProgressTracker,
}

impl ProgressEngine {
    pub fn new(tracker: ProgressTracker) -> Self {
        Self { tracker }
    }

    /// Direct access to the underlying store facade.
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Begin a session for `username`, loading stored progress. New and
    /// unknown users start from zeros.
    pub async fn open_session(&self, username: &str) -> SessionContext {
        let progress = self.tracker.get(username).await;
        SessionContext {
            username: Some(username.to_string()),
            score: progress.score,
            active_sessions: progress.active_sessions,
            interaction_recorded: false,
            active_quiz: None,
        }
    }

    /// Count this session toward the stored session total, once. The first
    /// interaction of a session (a chat message, a quiz submission) triggers
    /// the increment; every later call is a no-op.
    pub async fn record_interaction(&self, ctx: &mut SessionContext) -> Result<(), EngineError> {
        let Some(username) = ctx.username.clone() else {
            return Ok(());
        };
        if ctx.interaction_recorded {
            return Ok(());
        }

        self.tracker.set(&username, None, true).await?;
        ctx.active_sessions += 1;
        ctx.interaction_recorded = true;
        Ok(())
    }

    /// Hand the user a quiz to take.
    pub fn start_quiz(&self, ctx: &mut SessionContext, questions: Vec<QuestionRecord>) {
        ctx.active_quiz = Some(questions);
    }

    /// Grade a submission and persist the earned points.
    ///
    /// All questions are required: an incomplete submission is rejected
    /// before grading and the active quiz stays open. On success the score
    /// delta is added to the session score, the new absolute score is
    /// written through the store, the submission counts as the session's
    /// interaction if none was recorded yet, and the quiz is cleared.
    pub async fn submit_quiz(
        &self,
        ctx: &mut SessionContext,
        questions: &[QuestionRecord],
        answers: &HashMap<usize, String>,
    ) -> Result<(u64, Vec<QuizResult>), EngineError> {
        let missing = (0..questions.len())
            .filter(|i| !answers.contains_key(i))
            .count();
        if missing > 0 {
            return Err(EngineError::IncompleteQuiz { missing });
        }

        let (points, results) = evaluate(questions, answers);
        ctx.score += points;

        // Anonymous demo sessions grade but never persist.
        if let Some(username) = ctx.username.clone() {
            let increment = !ctx.interaction_recorded;
            self.tracker
                .set(&username, Some(ctx.score), increment)
                .await?;
            if increment {
                ctx.active_sessions += 1;
                ctx.interaction_recorded = true;
            }
        }

        ctx.active_quiz = None;
        Ok((points, results))
    }
}
