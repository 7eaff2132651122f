//! Offline response sheets: a two-column CSV (`Question,Response`) with one row per core item.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::bank::CORE_QUESTION_COUNT;

#[derive(Debug)]
pub enum ResponseSheetError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownQuestion(usize),
    DuplicateQuestion(usize),
    MissingQuestion(usize),
}

impl std::fmt::Display for ResponseSheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseSheetError::Io(err) => write!(f, "failed to read response sheet: {}", err),
            ResponseSheetError::Csv(err) => write!(f, "invalid response sheet CSV: {}", err),
            ResponseSheetError::UnknownQuestion(number) => write!(
                f,
                "question {} is outside the 1-{} core range",
                number, CORE_QUESTION_COUNT
            ),
            ResponseSheetError::DuplicateQuestion(number) => {
                write!(f, "question {} answered more than once", number)
            }
            ResponseSheetError::MissingQuestion(number) => {
                write!(f, "question {} has no answer", number)
            }
        }
    }
}

impl std::error::Error for ResponseSheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseSheetError::Io(err) => Some(err),
            ResponseSheetError::Csv(err) => Some(err),
            ResponseSheetError::UnknownQuestion(_)
            | ResponseSheetError::DuplicateQuestion(_)
            | ResponseSheetError::MissingQuestion(_) => None,
        }
    }
}

impl From<std::io::Error> for ResponseSheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ResponseSheetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    #[serde(rename = "Question")]
    question: usize,
    #[serde(rename = "Response")]
    response: i32,
}

pub struct ResponseSheetImporter;

impl ResponseSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<i32>, ResponseSheetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a sheet into a response vector ordered by question number. Answer ranges are left to
    /// the engine, which validates every vector it scores.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<i32>, ResponseSheetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut answers: Vec<Option<i32>> = vec![None; CORE_QUESTION_COUNT];

        for row in csv_reader.deserialize::<ResponseRow>() {
            let row = row?;
            let slot = row
                .question
                .checked_sub(1)
                .and_then(|index| answers.get_mut(index))
                .ok_or(ResponseSheetError::UnknownQuestion(row.question))?;
            if slot.replace(row.response).is_some() {
                return Err(ResponseSheetError::DuplicateQuestion(row.question));
            }
        }

        answers
            .into_iter()
            .enumerate()
            .map(|(index, answer)| answer.ok_or(ResponseSheetError::MissingQuestion(index + 1)))
            .collect()
    }
}
