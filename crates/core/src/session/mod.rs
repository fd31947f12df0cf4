//! Per-playthrough state and the transitions that drive it.
//!
//! A [`Session`] is a plain value: [`Session::resolve_answer`] and
//! [`Session::advance`] consume it and hand back the next version, and the
//! caller keeps whichever version is latest.

mod policy;

use serde::Serialize;

use crate::model::{Answer, Mode, OptionKey, Question, QuizConfig};
use crate::review::Progress;

/// Questions every team must answer before the quiz bowl leaves its first round.
pub const PHASE_ONE_QUOTA: u32 = 10;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Round of a quiz-bowl session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CerdasPhase {
    /// Round 1: teams rotate until each has played the quota.
    Quota,
    /// Round 2: the remaining questions. Final, never left.
    Remainder,
}

impl CerdasPhase {
    /// Round number as shown to players (1 or 2).
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Quota => 1,
            Self::Remainder => 2,
        }
    }
}

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// Result of [`Session::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The next question is up.
    Continue(Session),
    /// The playthrough is over; the session is final and ready for review.
    Terminal(Session),
}

impl Step {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        match self {
            Self::Continue(session) | Self::Terminal(session) => session,
        }
    }

    #[must_use]
    pub fn into_session(self) -> Session {
        match self {
            Self::Continue(session) | Self::Terminal(session) => session,
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Mutable state of one playthrough over a bank of questions.
///
/// Mode-specific fields are `None` outside their mode: team scores in team
/// and quiz-bowl play, lives in survival, phase and per-team counts in quiz
/// bowl only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    mode: Mode,
    team_count: usize,
    current_index: usize,
    answers: Vec<Option<Answer>>,
    team_scores: Option<Vec<u32>>,
    turn_team: usize,
    lives: Option<u32>,
    cerdas_phase: Option<CerdasPhase>,
    cerdas_count_by_team: Option<Vec<u32>>,
}

impl Session {
    /// Fresh session at the first question of a bank with `bank_len` questions.
    ///
    /// The team count is read from `config` here and fixed for the rest of
    /// the playthrough.
    #[must_use]
    pub fn new(mode: Mode, config: &QuizConfig, bank_len: usize) -> Self {
        let team_count = config.team_count();
        let is_cerdas = mode == Mode::Cerdas;

        Self {
            mode,
            team_count,
            current_index: 0,
            answers: vec![None; bank_len],
            team_scores: mode.is_team_based().then(|| vec![0; team_count]),
            turn_team: 0,
            lives: (mode == Mode::Survival).then(|| config.lives()),
            cerdas_phase: is_cerdas.then_some(CerdasPhase::Quota),
            cerdas_count_by_team: is_cerdas.then(|| vec![0; team_count]),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Teams the session was created for, whether or not the mode uses them.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.team_count
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn bank_len(&self) -> usize {
        self.answers.len()
    }

    /// One slot per bank question, filled in index order.
    #[must_use]
    pub fn answers(&self) -> &[Option<Answer>] {
        &self.answers
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(self.current_index).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_current_resolved(&self) -> bool {
        self.current_answer().is_some()
    }

    #[must_use]
    pub fn team_scores(&self) -> Option<&[u32]> {
        self.team_scores.as_deref()
    }

    /// Team on turn, for team-based modes.
    #[must_use]
    pub fn turn_team(&self) -> Option<usize> {
        self.mode.is_team_based().then_some(self.turn_team)
    }

    #[must_use]
    pub fn lives(&self) -> Option<u32> {
        self.lives
    }

    #[must_use]
    pub fn cerdas_phase(&self) -> Option<CerdasPhase> {
        self.cerdas_phase
    }

    /// Turns each team has played during the quota round.
    #[must_use]
    pub fn cerdas_count_by_team(&self) -> Option<&[u32]> {
        self.cerdas_count_by_team.as_deref()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().flatten().count()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().flatten().filter(|a| a.correct).count()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.bank_len(), self.answered_count())
    }

    /// Records the response to the current question.
    ///
    /// `chosen` is `None` when the question's timer ran out. Resolving a
    /// question that already has an answer leaves the session untouched, so
    /// a late timer expiry after a click is harmless.
    #[must_use]
    pub fn resolve_answer(mut self, question: &Question, chosen: Option<OptionKey>) -> Self {
        let Some(slot) = self.answers.get_mut(self.current_index) else {
            return self;
        };
        if slot.is_some() {
            return self;
        }

        let answer = Answer::new(question, chosen);
        *slot = Some(answer);
        (policy::rules(self.mode).score)(&mut self, answer.correct);
        self
    }

    /// Moves past the current, resolved question.
    ///
    /// Ends the playthrough when survival lives are gone or the last
    /// question was just resolved, checked in that order. Advancing an
    /// unresolved question is a caller bug; debug builds panic, release
    /// builds return the session unchanged.
    #[must_use]
    pub fn advance(mut self) -> Step {
        debug_assert!(
            self.is_current_resolved(),
            "advance called before question {} was resolved",
            self.current_index
        );
        if !self.is_current_resolved() {
            return Step::Continue(self);
        }

        let rules = policy::rules(self.mode);
        if (rules.exhausted)(&self) {
            return Step::Terminal(self);
        }
        if self.current_index + 1 >= self.bank_len() {
            return Step::Terminal(self);
        }

        self.current_index += 1;
        (rules.rotate)(&mut self);
        Step::Continue(self)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: usize) -> Question {
        let texts = ["a", "b", "c", "d"].map(|t| format!("{t}{n}"));
        Question::new(n.to_string(), "Umum", format!("Q{n}"), texts, OptionKey::A)
    }

    fn bank(len: usize) -> Vec<Question> {
        (0..len).map(question).collect()
    }

    fn config(teams: usize, lives: u32) -> QuizConfig {
        QuizConfig::new(teams, 30, lives).unwrap()
    }

    /// Resolves the current question and advances, returning the next step.
    fn play(session: Session, bank: &[Question], correct: bool) -> Step {
        let q = &bank[session.current_index()];
        let chosen = if correct { OptionKey::A } else { OptionKey::B };
        session.resolve_answer(q, Some(chosen)).advance()
    }

    #[test]
    fn fresh_session_initializes_mode_fields() {
        let cfg = config(3, 4);

        let classic = Session::new(Mode::Classic, &cfg, 5);
        assert_eq!(classic.answers().len(), 5);
        assert!(classic.answers().iter().all(Option::is_none));
        assert_eq!(classic.team_scores(), None);
        assert_eq!(classic.turn_team(), None);
        assert_eq!(classic.lives(), None);
        assert_eq!(classic.cerdas_phase(), None);

        let team = Session::new(Mode::Team, &cfg, 5);
        assert_eq!(team.team_scores(), Some(&[0, 0, 0][..]));
        assert_eq!(team.turn_team(), Some(0));

        let survival = Session::new(Mode::Survival, &cfg, 5);
        assert_eq!(survival.lives(), Some(4));

        let cerdas = Session::new(Mode::Cerdas, &cfg, 5);
        assert_eq!(cerdas.cerdas_phase(), Some(CerdasPhase::Quota));
        assert_eq!(cerdas.cerdas_count_by_team(), Some(&[0, 0, 0][..]));
        assert_eq!(cerdas.team_scores(), Some(&[0, 0, 0][..]));
    }

    #[test]
    fn classic_three_questions_then_terminal() {
        let cfg = QuizConfig::default();
        let bank = bank(3);
        let mut session = Session::new(Mode::Classic, &cfg, bank.len());

        session = play(session, &bank, true).into_session();
        session = play(session, &bank, false).into_session();
        let step = play(session, &bank, true);

        assert!(step.is_terminal());
        let correct: Vec<_> = step
            .session()
            .answers()
            .iter()
            .map(|a| a.unwrap().correct)
            .collect();
        assert_eq!(correct, vec![true, false, true]);
    }

    #[test]
    fn resolve_records_answer_key_and_choice() {
        let cfg = QuizConfig::default();
        let bank = bank(2);
        let session = Session::new(Mode::Classic, &cfg, 2).resolve_answer(&bank[0], Some(OptionKey::C));

        let answer = session.current_answer().unwrap();
        assert_eq!(answer.chosen, Some(OptionKey::C));
        assert_eq!(answer.answer_key, OptionKey::A);
        assert!(!answer.correct);
    }

    #[test]
    fn timeout_resolves_as_incorrect_and_duplicates_are_ignored() {
        let cfg = QuizConfig::default();
        let bank = bank(2);
        let session = Session::new(Mode::Countdown, &cfg, 2).resolve_answer(&bank[0], None);

        let answer = *session.current_answer().unwrap();
        assert!(answer.is_timed_out());
        assert!(!answer.correct);

        let again = session.clone().resolve_answer(&bank[0], Some(OptionKey::A));
        assert_eq!(again, session);
    }

    #[test]
    fn late_expiry_after_answer_changes_nothing() {
        let cfg = config(2, 1);
        let bank = bank(2);
        let answered = Session::new(Mode::Team, &cfg, 2).resolve_answer(&bank[0], Some(OptionKey::A));

        let expired = answered.clone().resolve_answer(&bank[0], None);

        assert_eq!(expired, answered);
        assert_eq!(expired.team_scores(), Some(&[1, 0][..]));
    }

    #[test]
    fn answers_fill_in_index_order() {
        let cfg = QuizConfig::default();
        let bank = bank(6);
        let mut session = Session::new(Mode::Classic, &cfg, bank.len());

        loop {
            let i = session.current_index();
            assert!(session.answers()[i..].iter().all(Option::is_none));
            session = session.resolve_answer(&bank[i], Some(OptionKey::D));
            assert!(session.answers()[..=i].iter().all(Option::is_some));
            match session.advance() {
                Step::Continue(next) => {
                    assert_eq!(next.current_index(), i + 1);
                    session = next;
                }
                Step::Terminal(done) => {
                    assert_eq!(done.current_index(), bank.len() - 1);
                    break;
                }
            }
        }
    }

    #[test]
    fn team_turns_rotate_and_scores_follow_turn() {
        let cfg = config(2, 1);
        let bank = bank(4);
        let mut session = Session::new(Mode::Team, &cfg, bank.len());
        let mut turns = Vec::new();

        for (i, correct) in [true, false, true, false].into_iter().enumerate() {
            turns.push(session.turn_team().unwrap());
            let step = play(session, &bank, correct);
            assert_eq!(step.is_terminal(), i == 3);
            session = step.into_session();
        }

        assert_eq!(turns, vec![0, 1, 0, 1]);
        assert_eq!(session.team_scores(), Some(&[2, 0][..]));
    }

    #[test]
    fn team_scores_match_correct_answers_per_turn() {
        let cfg = config(3, 1);
        let bank = bank(11);
        let pattern = [true, true, false, true, false, false, true, true, true, false, true];
        let mut expected = [0_u32; 3];
        let mut session = Session::new(Mode::Team, &cfg, bank.len());

        for correct in pattern {
            if correct {
                expected[session.turn_team().unwrap()] += 1;
            }
            session = play(session, &bank, correct).into_session();
        }

        assert_eq!(session.team_scores(), Some(&expected[..]));
    }

    #[test]
    fn every_correct_answer_is_credited_for_any_team_count() {
        let bank = bank(24);
        for teams in 2..=8 {
            let cfg = config(teams, 1);
            for mode in [Mode::Team, Mode::Cerdas] {
                let mut session = Session::new(mode, &cfg, bank.len());
                let mut correct = 0;
                loop {
                    assert!(session.turn_team().is_some_and(|t| t < teams));
                    correct += 1;
                    match play(session, &bank, true) {
                        Step::Continue(next) => session = next,
                        Step::Terminal(done) => {
                            session = done;
                            break;
                        }
                    }
                }
                let credited: u32 = session.team_scores().unwrap().iter().sum();
                assert_eq!(credited, correct, "{mode} with {teams} teams");
                assert_eq!(session.team_count(), teams);
            }
        }
    }

    #[test]
    fn survival_wrong_answer_costs_a_life_and_floors_at_zero() {
        let cfg = config(2, 2);
        let bank = bank(5);
        let session = Session::new(Mode::Survival, &cfg, bank.len());

        let session = play(session, &bank, true).into_session();
        assert_eq!(session.lives(), Some(2));
        let session = play(session, &bank, false).into_session();
        assert_eq!(session.lives(), Some(1));

        let step = play(session, &bank, false);
        assert!(step.is_terminal());
        assert_eq!(step.session().lives(), Some(0));
    }

    #[test]
    fn survival_terminates_early_when_out_of_lives() {
        let cfg = config(2, 1);
        let bank = bank(10);
        let session = Session::new(Mode::Survival, &cfg, bank.len());

        let session = session.resolve_answer(&bank[0], Some(OptionKey::B));
        assert_eq!(session.lives(), Some(0));

        let step = session.advance();
        assert!(step.is_terminal());
        assert_eq!(step.session().current_index(), 0);
    }

    #[test]
    fn scores_and_lives_ignored_by_modes_without_them() {
        let cfg = config(2, 1);
        let bank = bank(2);
        let session = Session::new(Mode::Classic, &cfg, 2).resolve_answer(&bank[0], Some(OptionKey::B));
        assert_eq!(session.lives(), None);
        assert_eq!(session.team_scores(), None);
    }

    #[test]
    fn cerdas_enters_second_round_once_every_team_reaches_quota() {
        let cfg = config(2, 1);
        let bank = bank(25);
        let mut session = Session::new(Mode::Cerdas, &cfg, bank.len());
        let mut transitions = Vec::new();

        for i in 0..24 {
            let before = session.cerdas_phase();
            session = play(session, &bank, i % 3 == 0).into_session();
            if before != session.cerdas_phase() {
                transitions.push(i);
            }
        }

        // Twenty advances give each of the two teams ten turns.
        assert_eq!(transitions, vec![19]);
        assert_eq!(session.cerdas_phase(), Some(CerdasPhase::Remainder));
        assert_eq!(session.cerdas_count_by_team(), Some(&[10, 10][..]));
    }

    #[test]
    fn cerdas_rotation_continues_in_second_round() {
        let cfg = config(3, 1);
        let bank = bank(40);
        let mut session = Session::new(Mode::Cerdas, &cfg, bank.len());

        for i in 0..39 {
            assert_eq!(session.turn_team(), Some(i % 3));
            session = play(session, &bank, true).into_session();
        }
        assert_eq!(session.cerdas_phase(), Some(CerdasPhase::Remainder));
        assert_eq!(session.turn_team(), Some(0));
    }

    #[test]
    fn cerdas_small_bank_never_leaves_quota_round() {
        let cfg = config(2, 1);
        let bank = bank(19);
        let mut session = Session::new(Mode::Cerdas, &cfg, bank.len());

        loop {
            match play(session, &bank, true) {
                Step::Continue(next) => session = next,
                Step::Terminal(done) => {
                    session = done;
                    break;
                }
            }
        }

        assert_eq!(session.cerdas_phase(), Some(CerdasPhase::Quota));
        assert_eq!(session.team_scores(), Some(&[10, 9][..]));
    }

    #[test]
    fn session_serializes_for_inspection() {
        let cfg = config(3, 1);
        let bank = bank(2);
        let session = Session::new(Mode::Cerdas, &cfg, 2).resolve_answer(&bank[0], None);

        let value = serde_json::to_value(&session).unwrap();

        assert_eq!(value["mode"], "cerdas");
        assert_eq!(value["team_count"], 3);
        assert_eq!(value["cerdas_phase"], "Quota");
        assert_eq!(value["answers"][0]["chosen"], serde_json::Value::Null);
        assert_eq!(value["answers"][1], serde_json::Value::Null);
    }

    #[test]
    #[should_panic(expected = "advance called before question 0 was resolved")]
    fn advancing_unresolved_question_is_a_bug() {
        let cfg = QuizConfig::default();
        let _ = Session::new(Mode::Classic, &cfg, 3).advance();
    }
}
