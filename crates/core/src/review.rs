use serde::Serialize;

use crate::model::{AnswerOption, Mode, OptionKey, Question};
use crate::session::{CerdasPhase, Session};

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// How far a session has come, for progress bars and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    /// Share of answered questions, rounded to the nearest whole percent.
    pub percent: u8,
}

impl Progress {
    #[must_use]
    pub fn new(total: usize, answered: usize) -> Self {
        let answered = answered.min(total);
        let percent = if total == 0 {
            0
        } else {
            (answered * 100 + total / 2) / total
        };

        Self {
            total,
            answered,
            remaining: total - answered,
            percent: u8::try_from(percent).unwrap_or(100),
        }
    }
}

//
// ─── REVIEW ────────────────────────────────────────────────────────────────────
//

/// One question as shown on the review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    /// 1-based position in the bank.
    pub number: usize,
    pub category: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub answer_key: OptionKey,
    pub chosen: Option<OptionKey>,
    pub answered: bool,
    pub correct: bool,
}

/// End-of-game overview. Unanswered questions count as wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub mode: Mode,
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub team_scores: Option<Vec<u32>>,
    pub lives_left: Option<u32>,
    pub cerdas_phase: Option<CerdasPhase>,
    pub items: Vec<ReviewItem>,
}

impl ReviewSummary {
    /// Builds the review of `session` over the bank it was played on.
    #[must_use]
    pub fn build(bank: &[Question], session: &Session) -> Self {
        let items: Vec<ReviewItem> = bank
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let answer = session.answers().get(i).copied().flatten();
                ReviewItem {
                    number: i + 1,
                    category: question.category().to_owned(),
                    prompt: question.prompt().to_owned(),
                    options: question.options().to_vec(),
                    answer_key: question.answer_key(),
                    chosen: answer.and_then(|a| a.chosen),
                    answered: answer.is_some(),
                    correct: answer.is_some_and(|a| a.correct),
                }
            })
            .collect();

        let total = items.len();
        let correct = items.iter().filter(|item| item.correct).count();

        Self {
            mode: session.mode(),
            total,
            correct,
            wrong: total - correct,
            team_scores: session.team_scores().map(<[u32]>::to_vec),
            lives_left: session.lives(),
            cerdas_phase: session.cerdas_phase(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizConfig;

    fn bank() -> Vec<Question> {
        (0..4)
            .map(|n| {
                Question::new(
                    n.to_string(),
                    "Umum",
                    format!("Q{n}"),
                    ["w", "x", "y", "z"].map(str::to_owned),
                    OptionKey::B,
                )
            })
            .collect()
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        assert_eq!(Progress::new(3, 1).percent, 33);
        assert_eq!(Progress::new(3, 2).percent, 67);
        assert_eq!(Progress::new(8, 1).percent, 13);
        assert_eq!(Progress::new(4, 4).percent, 100);
        assert_eq!(Progress::new(0, 0).percent, 0);
        assert_eq!(Progress::new(5, 2).remaining, 3);
    }

    #[test]
    fn review_counts_unanswered_as_wrong() {
        let bank = bank();
        let cfg = QuizConfig::default();
        let session = Session::new(Mode::Classic, &cfg, bank.len())
            .resolve_answer(&bank[0], Some(OptionKey::B))
            .advance()
            .into_session()
            .resolve_answer(&bank[1], None);

        let review = ReviewSummary::build(&bank, &session);

        assert_eq!(review.total, 4);
        assert_eq!(review.correct, 1);
        assert_eq!(review.wrong, 3);
        assert!(review.items[0].correct);
        assert!(review.items[1].answered);
        assert_eq!(review.items[1].chosen, None);
        assert!(!review.items[2].answered);
        assert_eq!(review.items[3].number, 4);
        assert_eq!(review.items[3].answer_key, OptionKey::B);
    }

    #[test]
    fn review_carries_mode_state() {
        let bank = bank();
        let cfg = QuizConfig::default().with_lives(3);
        let session = Session::new(Mode::Survival, &cfg, bank.len())
            .resolve_answer(&bank[0], Some(OptionKey::A));

        let review = ReviewSummary::build(&bank, &session);

        assert_eq!(review.mode, Mode::Survival);
        assert_eq!(review.lives_left, Some(2));
        assert_eq!(review.team_scores, None);
    }
}
