// src/services/csv_parser.rs

//! Turns an uploaded CSV file into `QuestionRecord`s.
//!
//! The first nine header columns are fixed and must appear in this order:
//! `question,option1,option2,option3,option4,correct_answer,answer_description,category,level`.
//! A trailing `question_type` (or `questionType`) column is optional.

use csv::{ReaderBuilder, Trim};

use crate::{error::AppError, models::question::QuestionRecord};

pub const REQUIRED_HEADERS: [&str; 9] = [
    "question",
    "option1",
    "option2",
    "option3",
    "option4",
    "correct_answer",
    "answer_description",
    "category",
    "level",
];

const TYPE_HEADERS: [&str; 2] = ["question_type", "questionType"];

/// Parses every data row of `bytes`, in file order.
///
/// The whole file is materialized; a bad header, a row with the wrong
/// number of columns or invalid UTF-8 fails the entire parse.
pub fn parse_questions(bytes: &[u8]) -> Result<Vec<QuestionRecord>, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::Headers)
        .from_reader(bytes);

    check_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<QuestionRecord>() {
        records.push(row?);
    }

    tracing::debug!("Parsed {} question rows", records.len());
    Ok(records)
}

fn check_headers(headers: &csv::StringRecord) -> Result<(), AppError> {
    let actual: Vec<&str> = headers.iter().collect();

    let fixed_ok = actual.len() >= REQUIRED_HEADERS.len()
        && actual[..REQUIRED_HEADERS.len()] == REQUIRED_HEADERS;
    let extra_ok = match &actual[REQUIRED_HEADERS.len().min(actual.len())..] {
        [] => true,
        [column] => TYPE_HEADERS.contains(column),
        _ => false,
    };

    if fixed_ok && extra_ok {
        Ok(())
    } else {
        Err(AppError::Csv(format!(
            "Invalid CSV header '{}', expected '{},question_type'",
            actual.join(","),
            REQUIRED_HEADERS.join(",")
        )))
    }
}
