// src/services/validation.rs

//! Row-level rules for uploaded questions.
//!
//! A record is checked in this order:
//! 1. question text and question type must be present,
//! 2. the question type must name a supported `QuestionKind`,
//! 3. the per-field constraints declared on `QuestionRecord`,
//! 4. the rule owned by the record's kind.

use std::fmt;

use validator::Validate;

use crate::models::question::{NewQuestion, QuestionKind, QuestionRecord};

/// Reason a single record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQuestion(pub String);

impl InvalidQuestion {
    fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl fmt::Display for InvalidQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvalidQuestion {}

/// Validates one record and returns the question to be stored.
///
/// Accepted text is stored as uploaded; case-insensitive matching only decides validity.
pub fn validate_question(record: &QuestionRecord) -> Result<NewQuestion, InvalidQuestion> {
    let raw_type = record
        .question_type
        .as_deref()
        .filter(|t| !t.trim().is_empty());

    let Some(raw_type) = raw_type.filter(|_| !record.question.trim().is_empty()) else {
        return Err(InvalidQuestion::new(
            "Question type and content must be provided.",
        ));
    };

    let kind: QuestionKind = raw_type
        .parse()
        .map_err(|t| InvalidQuestion(format!("Unsupported question type: {}", t)))?;

    if let Err(errors) = record.validate() {
        return Err(InvalidQuestion(field_errors_message(&errors)));
    }

    kind.check(record)?;

    Ok(NewQuestion {
        question: record.question.clone(),
        option1: record.option1.clone(),
        option2: record.option2.clone(),
        option3: record.option3.clone(),
        option4: record.option4.clone(),
        correct_answer: record.correct_answer.clone(),
        answer_description: record.answer_description.clone(),
        category: record.category.clone(),
        level: record.level.clone(),
        question_type: raw_type.to_string(),
        kind,
    })
}

impl QuestionKind {
    /// Applies the rule owned by this kind.
    pub fn check(self, record: &QuestionRecord) -> Result<(), InvalidQuestion> {
        match self {
            QuestionKind::TrueFalse => check_true_false(record),
            QuestionKind::Mcq => check_mcq(record),
        }
    }
}

fn check_true_false(record: &QuestionRecord) -> Result<(), InvalidQuestion> {
    if record.option1.is_empty() || record.option2.is_empty() {
        return Err(InvalidQuestion::new(
            "True/False questions must have two options (True, False)",
        ));
    }
    if !record.option1.eq_ignore_ascii_case("True") || !record.option2.eq_ignore_ascii_case("False") {
        return Err(InvalidQuestion::new(
            "True/False question options must be 'True' and 'False'",
        ));
    }
    if !record.correct_answer.eq_ignore_ascii_case("True")
        && !record.correct_answer.eq_ignore_ascii_case("False")
    {
        return Err(InvalidQuestion::new(
            "Correct answer must be 'True' or 'False' for True/False questions",
        ));
    }
    Ok(())
}

fn check_mcq(record: &QuestionRecord) -> Result<(), InvalidQuestion> {
    if record.option1.is_empty() || record.option2.is_empty() || record.correct_answer.is_empty() {
        return Err(InvalidQuestion::new(
            "MCQ questions must have at least two options and a correct answer",
        ));
    }

    let answer = record.correct_answer.to_lowercase();
    let matches_option = [
        Some(record.option1.as_str()),
        Some(record.option2.as_str()),
        record.option3.as_deref(),
        record.option4.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|option| option.to_lowercase() == answer);

    if !matches_option {
        return Err(InvalidQuestion::new(
            "Correct answer must be one of the provided options",
        ));
    }
    Ok(())
}

/// Joins field errors in field-name order, e.g. `Validation failed: Category is required`.
fn field_errors_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    format!("Validation failed: {}", messages.join("; "))
}
