use std::path::Path;

use tracing::{info, warn};

use quiz_core::bank;
use quiz_core::model::{Question, RawRow};

use crate::error::LoadError;
use crate::rows;
use crate::templates::{SAMPLE_CSV, SAMPLE_NAME};

/// A randomized bank ready to play, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBank {
    pub source_name: String,
    pub questions: Vec<Question>,
}

impl LoadedBank {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

/// Validates decoded rows and shuffles the survivors into a bank.
///
/// # Errors
///
/// Returns `LoadError::NoValidQuestions` when every row was rejected.
pub fn load_rows(source_name: impl Into<String>, rows: &[RawRow]) -> Result<LoadedBank, LoadError> {
    let source_name = source_name.into();
    let normalized = bank::normalize(rows);
    if normalized.is_empty() {
        warn!(source = %source_name, rows = rows.len(), "no valid questions in source");
        return Err(LoadError::NoValidQuestions { rows: rows.len() });
    }

    let questions = bank::build_bank(&normalized);
    info!(
        source = %source_name,
        rows = rows.len(),
        questions = questions.len(),
        skipped = rows.len() - normalized.len(),
        "question bank loaded"
    );

    Ok(LoadedBank {
        source_name,
        questions,
    })
}

/// Loads a CSV or JSON question file.
///
/// # Errors
///
/// Returns `LoadError` for unreadable or undecodable files and for files
/// without a single valid question.
pub fn load_file(path: &Path) -> Result<LoadedBank, LoadError> {
    let rows = rows::read_rows(path)?;
    let source_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    load_rows(source_name, &rows)
}

/// Loads CSV text already held in memory.
///
/// # Errors
///
/// Returns `LoadError::Csv` for malformed CSV and
/// `LoadError::NoValidQuestions` when no row is usable.
pub fn load_csv(source_name: impl Into<String>, text: &str) -> Result<LoadedBank, LoadError> {
    let rows = rows::rows_from_csv(text.as_bytes())?;
    load_rows(source_name, &rows)
}

/// Loads the built-in sample question set.
///
/// # Errors
///
/// Only fails if the bundled CSV is broken.
pub fn load_sample() -> Result<LoadedBank, LoadError> {
    load_csv(SAMPLE_NAME, SAMPLE_CSV)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_bank_loads_every_question() {
        let loaded = load_sample().unwrap();
        assert_eq!(loaded.source_name, SAMPLE_NAME);
        assert_eq!(loaded.total(), 10);
    }

    #[test]
    fn all_invalid_rows_is_a_distinct_failure() {
        let text = "id,pertanyaan,jawaban\n1,,A\n2,Ada?,Z\n";
        let err = load_csv("bad.csv", text).unwrap_err();
        assert!(matches!(err, LoadError::NoValidQuestions { rows: 2 }));
    }

    #[test]
    fn header_only_file_has_no_valid_questions() {
        let err = load_csv("empty.csv", "id,pertanyaan,jawaban\n").unwrap_err();
        assert!(matches!(err, LoadError::NoValidQuestions { rows: 0 }));
    }

    #[test]
    fn invalid_rows_are_dropped_silently() {
        let text = "pertanyaan,pilihan_a,pilihan_b,pilihan_c,pilihan_d,jawaban\n\
                    Satu?,a,b,c,d,A\n\
                    ,a,b,c,d,A\n\
                    Tiga?,a,b,c,d,B\n";
        let loaded = load_csv("mixed.csv", text).unwrap();
        assert_eq!(loaded.total(), 2);
    }
}
