//! Turns decoded rows into a randomized, presentation-ready question bank.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{OptionKey, Question, RawRow};

/// Canonical column names of an uploaded question file.
pub const COLUMNS: [&str; 8] = [
    "id",
    "kategori",
    "pertanyaan",
    "pilihan_a",
    "pilihan_b",
    "pilihan_c",
    "pilihan_d",
    "jawaban",
];

// Alternate spellings are only honoured for these three fields.
const ID_ALIASES: &[&str] = &["ID"];
const CATEGORY_ALIASES: &[&str] = &["Kategori", "category"];
const PROMPT_ALIASES: &[&str] = &["Pertanyaan", "question"];
const OPTION_KEYS: [&str; 4] = ["pilihan_a", "pilihan_b", "pilihan_c", "pilihan_d"];
const ANSWER_KEY: &str = "jawaban";

//
// ─── NORMALIZE ─────────────────────────────────────────────────────────────────
//

/// Validates rows and converts the valid ones into questions, in input order.
///
/// Rows with an empty prompt or an answer outside `A`..`D` are skipped
/// without error. An empty result is the caller's "no valid rows" case.
#[must_use]
pub fn normalize(rows: &[RawRow]) -> Vec<Question> {
    rows.iter()
        .enumerate()
        .filter_map(|(position, row)| normalize_row(position, row))
        .collect()
}

fn normalize_row(position: usize, row: &RawRow) -> Option<Question> {
    let prompt = row.text_or_alias("pertanyaan", PROMPT_ALIASES);
    if prompt.is_empty() {
        return None;
    }
    let answer_key: OptionKey = row.text(ANSWER_KEY).parse().ok()?;

    let id = row.text_or_alias("id", ID_ALIASES);
    let id = if id.is_empty() {
        (position + 1).to_string()
    } else {
        id
    };

    Some(Question::new(
        id,
        row.text_or_alias("kategori", CATEGORY_ALIASES),
        prompt,
        OPTION_KEYS.map(|key| row.text(key)),
        answer_key,
    ))
}

//
// ─── SHUFFLE ───────────────────────────────────────────────────────────────────
//

/// Shuffles question order and each question's options using the thread RNG.
///
/// The result is deliberately not reproducible between builds.
#[must_use]
pub fn build_bank(questions: &[Question]) -> Vec<Question> {
    build_bank_with(questions, &mut rand::rng())
}

/// [`build_bank`] with a caller-supplied random source.
#[must_use]
pub fn build_bank_with<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
    let mut bank = questions.to_vec();
    bank.as_mut_slice().shuffle(rng);
    bank.into_iter()
        .map(|question| shuffle_options(question, rng))
        .collect()
}

/// Shuffles the four options and relabels them `A`..`D` by new position.
///
/// The answer key follows the correct option's text. When two options share
/// that text the first match after shuffling becomes the key.
#[must_use]
pub fn shuffle_options<R: Rng + ?Sized>(question: Question, rng: &mut R) -> Question {
    let correct_text = question.correct_text().to_owned();
    let mut texts = question.options().each_ref().map(|o| o.text().to_owned());
    texts.as_mut_slice().shuffle(rng);
    let answer_key = remap_answer_key(&texts, &correct_text);
    question.with_options(texts, answer_key)
}

/// Key of the first option whose text equals `correct_text`.
///
/// Falls back to `A` when nothing matches, which cannot happen for options
/// taken from a valid question.
pub(crate) fn remap_answer_key(texts: &[String; 4], correct_text: &str) -> OptionKey {
    texts
        .iter()
        .position(|text| text == correct_text)
        .and_then(OptionKey::from_index)
        .unwrap_or(OptionKey::A)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
