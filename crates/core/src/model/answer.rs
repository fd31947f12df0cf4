use serde::Serialize;

use crate::model::{OptionKey, Question};

/// Resolution of a single question in a session.
///
/// `chosen` is `None` when the question timed out without a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub chosen: Option<OptionKey>,
    pub correct: bool,
    pub answer_key: OptionKey,
}

impl Answer {
    #[must_use]
    pub fn new(question: &Question, chosen: Option<OptionKey>) -> Self {
        let answer_key = question.answer_key();
        Self {
            chosen,
            correct: chosen == Some(answer_key),
            answer_key,
        }
    }

    /// True when no option was chosen before the question was resolved.
    #[must_use]
    pub fn is_timed_out(&self) -> bool {
        self.chosen.is_none()
    }
}
