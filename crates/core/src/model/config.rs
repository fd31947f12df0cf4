use std::ops::RangeInclusive;
use thiserror::Error;

pub const TEAM_COUNT_RANGE: RangeInclusive<usize> = 2..=8;
pub const SECONDS_PER_QUESTION_RANGE: RangeInclusive<u32> = 5..=120;
pub const LIVES_RANGE: RangeInclusive<u32> = 1..=10;

const DEFAULT_TEAM_COUNT: usize = 2;
const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;
const DEFAULT_LIVES: u32 = 1;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("team count must be between 2 and 8, got {0}")]
    InvalidTeamCount(usize),

    #[error("seconds per question must be between 5 and 120, got {0}")]
    InvalidSecondsPerQuestion(u32),

    #[error("lives must be between 1 and 10, got {0}")]
    InvalidLives(u32),
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Per-playthrough settings chosen before a session starts.
///
/// Only the fields relevant to the selected mode are consulted: team count
/// for team and quiz-bowl play, seconds for countdown, lives for survival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    team_count: usize,
    seconds_per_question: u32,
    lives: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            team_count: DEFAULT_TEAM_COUNT,
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
            lives: DEFAULT_LIVES,
        }
    }
}

impl QuizConfig {
    /// Creates a config, rejecting out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first field outside its range.
    pub fn new(team_count: usize, seconds_per_question: u32, lives: u32) -> Result<Self, ConfigError> {
        if !TEAM_COUNT_RANGE.contains(&team_count) {
            return Err(ConfigError::InvalidTeamCount(team_count));
        }
        if !SECONDS_PER_QUESTION_RANGE.contains(&seconds_per_question) {
            return Err(ConfigError::InvalidSecondsPerQuestion(seconds_per_question));
        }
        if !LIVES_RANGE.contains(&lives) {
            return Err(ConfigError::InvalidLives(lives));
        }

        Ok(Self {
            team_count,
            seconds_per_question,
            lives,
        })
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.team_count
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    // Clamping setters mirror what a settings form does with a spinner value.

    #[must_use]
    pub fn with_team_count(mut self, team_count: usize) -> Self {
        self.team_count = clamp_to(team_count, &TEAM_COUNT_RANGE);
        self
    }

    #[must_use]
    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.seconds_per_question = clamp_to(seconds, &SECONDS_PER_QUESTION_RANGE);
        self
    }

    #[must_use]
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = clamp_to(lives, &LIVES_RANGE);
        self
    }

    /// One more life, capped at the maximum.
    #[must_use]
    pub fn add_life(self) -> Self {
        let lives = self.lives.saturating_add(1);
        self.with_lives(lives)
    }
}

//
// ─── LENIENT PARSING ───────────────────────────────────────────────────────────
//

/// Parses free-form team count input. Blank or unparsable text yields the
/// default; numbers outside the range are clamped.
#[must_use]
pub fn parse_team_count(raw: &str) -> usize {
    parse_clamped(raw, DEFAULT_TEAM_COUNT, &TEAM_COUNT_RANGE)
}

/// Parses free-form seconds-per-question input, see [`parse_team_count`].
#[must_use]
pub fn parse_seconds_per_question(raw: &str) -> u32 {
    parse_clamped(raw, DEFAULT_SECONDS_PER_QUESTION, &SECONDS_PER_QUESTION_RANGE)
}

/// Parses free-form lives input, see [`parse_team_count`].
#[must_use]
pub fn parse_lives(raw: &str) -> u32 {
    parse_clamped(raw, DEFAULT_LIVES, &LIVES_RANGE)
}

fn clamp_to<T: Ord + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    value.clamp(*range.start(), *range.end())
}

fn parse_clamped<T>(raw: &str, default: T, range: &RangeInclusive<T>) -> T
where
    T: Ord + Copy + TryFrom<i64> + TryInto<i64>,
{
    let Ok(parsed) = raw.trim().parse::<i64>() else {
        return default;
    };
    let min: Option<i64> = (*range.start()).try_into().ok();
    let max: Option<i64> = (*range.end()).try_into().ok();
    let (Some(min), Some(max)) = (min, max) else {
        return default;
    };
    T::try_from(parsed.clamp(min, max)).unwrap_or(default)
}
