// src/models/question.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// One data row of an uploaded CSV file, before any rule has been applied.
///
/// Field names follow the CSV header contract. Empty `option3`/`option4`
/// cells and a missing or empty `question_type` cell deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct QuestionRecord {
    pub question: String,

    #[validate(custom(function = not_blank, message = "Option1 is required"))]
    pub option1: String,

    #[validate(custom(function = not_blank, message = "Option2 is required"))]
    pub option2: String,

    #[serde(default)]
    pub option3: Option<String>,

    #[serde(default)]
    pub option4: Option<String>,

    #[validate(custom(function = not_blank, message = "Correct answer is required"))]
    pub correct_answer: String,

    #[validate(custom(function = not_blank, message = "Answer description is required"))]
    pub answer_description: String,

    #[validate(custom(function = not_blank, message = "Category is required"))]
    pub category: String,

    #[validate(custom(function = validate_level, message = "Level must be defined - easy, medium, or hard"))]
    pub level: String,

    #[serde(default, alias = "questionType")]
    pub question_type: Option<String>,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_level(level: &str) -> Result<(), validator::ValidationError> {
    level
        .parse::<Level>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_level"))
}

/// The closed set of supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Mcq,
    TrueFalse,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Mcq => "MCQ",
            QuestionKind::TrueFalse => "True/False",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    /// Case-insensitive match against "MCQ" and "True/False".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("MCQ") {
            Ok(QuestionKind::Mcq)
        } else if s.eq_ignore_ascii_case("True/False") {
            Ok(QuestionKind::TrueFalse)
        } else {
            Err(s.to_string())
        }
    }
}

/// Difficulty level of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard" => Ok(Level::Hard),
            _ => Err(s.to_string()),
        }
    }
}

/// A record that passed validation, ready to be written for an exam.
///
/// `level` and `question_type` keep the text as uploaded; `kind` is the
/// parsed type the record was validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: Option<String>,
    pub option4: Option<String>,
    pub correct_answer: String,
    pub answer_description: String,
    pub category: String,
    pub level: String,
    pub question_type: String,
    pub kind: QuestionKind,
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuestion {
    pub id: i64,
    pub exam_name: String,
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: Option<String>,
    pub option4: Option<String>,
    pub correct_answer: String,
    pub answer_description: String,
    pub category: String,
    pub level: String,
    pub question_type: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Query string for listing the questions of one exam.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuery {
    pub exam_name: String,
}
