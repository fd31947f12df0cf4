use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category assigned to questions that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Umum";

//
// ─── OPTION KEY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid option key {raw:?}, expected one of A, B, C, D")]
pub struct OptionKeyError {
    raw: String,
}

/// Letter label of one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    /// All keys in presentation order.
    pub const ALL: [OptionKey; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Key at a zero-based option position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl FromStr for OptionKey {
    type Err = OptionKeyError;

    /// Parses a key case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(OptionKeyError { raw: s.to_owned() }),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── ANSWER OPTION ─────────────────────────────────────────────────────────────
//

/// One labelled answer option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    key: OptionKey,
    text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn key(&self) -> OptionKey {
        self.key
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A structurally valid multiple-choice question.
///
/// Options are always keyed `A`, `B`, `C`, `D` by position, so exactly one
/// option carries `answer_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: String,
    category: String,
    prompt: String,
    options: [AnswerOption; 4],
    answer_key: OptionKey,
}

impl Question {
    /// Builds a question from option texts given in `A`..`D` order.
    ///
    /// An empty `category` falls back to [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        prompt: impl Into<String>,
        option_texts: [String; 4],
        answer_key: OptionKey,
    ) -> Self {
        let category = category.into();
        let category = if category.is_empty() {
            DEFAULT_CATEGORY.to_owned()
        } else {
            category
        };

        Self {
            id: id.into(),
            category,
            prompt: prompt.into(),
            options: label_options(option_texts),
            answer_key,
        }
    }

    /// Same question with its options replaced and relabelled by position.
    pub(crate) fn with_options(mut self, option_texts: [String; 4], answer_key: OptionKey) -> Self {
        self.options = label_options(option_texts);
        self.answer_key = answer_key;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption; 4] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, key: OptionKey) -> &AnswerOption {
        &self.options[key.index()]
    }

    #[must_use]
    pub fn answer_key(&self) -> OptionKey {
        self.answer_key
    }

    /// Text of the option holding the correct answer.
    #[must_use]
    pub fn correct_text(&self) -> &str {
        self.option(self.answer_key).text()
    }

    #[must_use]
    pub fn is_correct(&self, key: OptionKey) -> bool {
        key == self.answer_key
    }
}

fn label_options(texts: [String; 4]) -> [AnswerOption; 4] {
    let [a, b, c, d] = texts;
    [
        AnswerOption { key: OptionKey::A, text: a },
        AnswerOption { key: OptionKey::B, text: b },
        AnswerOption { key: OptionKey::C, text: c },
        AnswerOption { key: OptionKey::D, text: d },
    ]
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
