use tracing::{debug, info};

use quiz_core::model::{Answer, Mode, OptionKey, Question, QuizConfig};
use quiz_core::{Countdown, Progress, ReviewSummary, Session, Step, Tick};

use crate::error::SessionError;

/// Whether a response was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Recorded(Answer),
    /// The question was already resolved, or the playthrough is over.
    Ignored,
}

/// Result of forwarding a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timer is running for the current question.
    Idle,
    /// Seconds left on the current question.
    Running(u32),
    /// Time ran out and the question was resolved without an answer.
    TimedOut(Answer),
}

/// What follows after [`Playthrough::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Continue,
    Finished,
}

/// One playthrough of a bank: the session, its countdown, and the bank it
/// runs over.
///
/// This is the piece a front end talks to. It forwards clicks and timer
/// ticks into the session, arms the countdown for each new question in
/// countdown mode, and keeps the latest session version.
#[derive(Debug, Clone)]
pub struct Playthrough {
    bank: Vec<Question>,
    mode: Mode,
    config: QuizConfig,
    session: Session,
    countdown: Countdown,
    finished: bool,
}

impl Playthrough {
    /// Starts at the first question of `bank`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the bank has no questions.
    pub fn start(bank: Vec<Question>, mode: Mode, config: QuizConfig) -> Result<Self, SessionError> {
        if bank.is_empty() {
            return Err(SessionError::Empty);
        }

        let session = Session::new(mode, &config, bank.len());
        let mut playthrough = Self {
            bank,
            mode,
            config,
            session,
            countdown: Countdown::default(),
            finished: false,
        };
        playthrough.arm_countdown();

        info!(
            mode = %mode,
            questions = playthrough.bank.len(),
            teams = config.team_count(),
            seconds = config.seconds_per_question(),
            lives = config.lives(),
            "playthrough started"
        );
        Ok(playthrough)
    }

    /// Throws the session away and starts over on the same bank.
    pub fn restart(&mut self) {
        self.restart_with(self.mode, self.config);
    }

    /// Starts over on the same bank with a different mode or settings.
    pub fn restart_with(&mut self, mode: Mode, config: QuizConfig) {
        self.mode = mode;
        self.config = config;
        self.session = Session::new(mode, &config, self.bank.len());
        self.finished = false;
        self.arm_countdown();
        info!(
            mode = %mode,
            teams = config.team_count(),
            lives = config.lives(),
            "playthrough restarted"
        );
    }

    #[must_use]
    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.bank[self.session.current_index()]
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&Answer> {
        self.session.current_answer()
    }

    /// Seconds left on the current question, when a timer is running.
    #[must_use]
    pub fn seconds_left(&self) -> Option<u32> {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.session.progress()
    }

    #[must_use]
    pub fn review(&self) -> ReviewSummary {
        ReviewSummary::build(&self.bank, &self.session)
    }

    /// Submits the player's choice for the current question.
    pub fn choose(&mut self, key: OptionKey) -> Resolution {
        self.resolve(Some(key))
    }

    /// Forwards one second of wall time to the countdown.
    pub fn tick(&mut self) -> TickOutcome {
        if self.finished || self.session.is_current_resolved() {
            self.countdown.disarm();
            return TickOutcome::Idle;
        }

        match self.countdown.tick() {
            Tick::Idle => TickOutcome::Idle,
            Tick::Running(left) => TickOutcome::Running(left),
            Tick::Expired => match self.resolve(None) {
                Resolution::Recorded(answer) => TickOutcome::TimedOut(answer),
                Resolution::Ignored => TickOutcome::Idle,
            },
        }
    }

    /// Moves past the current question once it is resolved.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the playthrough has ended and
    /// `SessionError::Unresolved` if the current question is still open.
    pub fn next(&mut self) -> Result<Advance, SessionError> {
        if self.finished {
            return Err(SessionError::Completed);
        }
        if !self.session.is_current_resolved() {
            return Err(SessionError::Unresolved);
        }

        match self.session.clone().advance() {
            Step::Continue(session) => {
                self.session = session;
                self.arm_countdown();
                debug!(
                    index = self.session.current_index(),
                    turn_team = ?self.session.turn_team(),
                    phase = ?self.session.cerdas_phase().map(|p| p.number()),
                    "advanced to next question"
                );
                Ok(Advance::Continue)
            }
            Step::Terminal(session) => {
                self.session = session;
                self.finished = true;
                self.countdown.disarm();
                info!(
                    mode = %self.mode,
                    correct = self.session.correct_count(),
                    answered = self.session.answered_count(),
                    total = self.bank.len(),
                    "playthrough finished"
                );
                Ok(Advance::Finished)
            }
        }
    }

    fn resolve(&mut self, chosen: Option<OptionKey>) -> Resolution {
        if self.finished || self.session.is_current_resolved() {
            debug!(
                index = self.session.current_index(),
                "ignoring response to resolved question"
            );
            return Resolution::Ignored;
        }

        let question = &self.bank[self.session.current_index()];
        self.session = self.session.clone().resolve_answer(question, chosen);
        self.countdown.disarm();

        let Some(answer) = self.session.current_answer().copied() else {
            return Resolution::Ignored;
        };
        debug!(
            index = self.session.current_index(),
            chosen = ?answer.chosen,
            correct = answer.correct,
            "question resolved"
        );
        Resolution::Recorded(answer)
    }

    fn arm_countdown(&mut self) {
        if self.mode.is_timed() {
            self.countdown.arm(self.config.seconds_per_question());
        } else {
            self.countdown.disarm();
        }
    }
}
