//! Question-set loading and validation.
//!
//! Two source formats: the raw JSON array the question-generation
//! collaborator emits, and a TOML format for curated sets. Validation is
//! advisory — warnings, not failures — because sets arrive from an LLM and
//! the evaluator must still run against imperfect ones.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::quiz::QuestionRecord;

/// A named collection of questions.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

/// Load a question set from a `.toml` or `.json` file, dispatching on the
/// extension. JSON files are the bare array format; id and name fall back
/// to the file stem.
pub fn load_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let questions: Vec<QuestionRecord> = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse JSON: {}", path.display()))?;
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("quiz")
                .to_string();
            Ok(QuestionSet {
                id: stem.clone(),
                name: stem,
                description: String::new(),
                questions,
            })
        }
        _ => parse_question_set_str(&content, path),
    }
}

/// Parse the TOML format into a `QuestionSet` (useful for testing).
pub fn parse_question_set_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(QuestionSet {
        id: parsed.quiz.id,
        name: parsed.quiz.name,
        description: parsed.quiz.description,
        questions: parsed.questions,
    })
}

/// Recursively load all `.toml` and `.json` question sets under a directory.
pub fn load_question_directory(dir: &Path) -> Result<Vec<QuestionSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_question_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match load_question_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// A warning from question-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Index of the offending question, if the warning is per-question.
    pub question_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for the issues that produce silent mis-grading.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_index: None,
            message: "question set is empty".into(),
        });
    }

    // An answer key outside the options can never be selected, so every
    // submission grades incorrect. This is the worst upstream failure mode.
    for (i, q) in set.questions.iter().enumerate() {
        if !q.options.contains(&q.answer) {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: format!("answer {:?} is not among the options", q.answer),
            });
        }
    }

    for (i, q) in set.questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: "question text is empty".into(),
            });
        }
        if q.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: format!("only {} option(s)", q.options.len()),
            });
        }
    }

    // Duplicate questions confuse index-keyed submissions.
    let mut seen = std::collections::HashSet::new();
    for (i, q) in set.questions.iter().enumerate() {
        if !seen.insert(q.question.as_str()) {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: format!("duplicate question: {:?}", q.question),
            });
        }
    }

    warnings
}
