use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown quiz mode {raw:?}, expected classic, team, countdown, survival or cerdas")]
pub struct ModeParseError {
    raw: String,
}

/// Play mode of a quiz session.
///
/// - `Classic`: answer, see the result, move on.
/// - `Team`: teams take turns; correct answers score for the team on turn.
/// - `Countdown`: every question has a timer; running out counts as wrong.
/// - `Survival`: wrong answers cost a life; no lives left ends the run.
/// - `Cerdas`: quiz-bowl format with a quota round followed by a remainder round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Classic,
    Team,
    Countdown,
    Survival,
    Cerdas,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Self::Classic,
        Self::Team,
        Self::Countdown,
        Self::Survival,
        Self::Cerdas,
    ];

    /// Identifier used on the command line and in serialized settings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Team => "team",
            Self::Countdown => "countdown",
            Self::Survival => "survival",
            Self::Cerdas => "cerdas",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Team => "Team",
            Self::Countdown => "Waktu Mundur",
            Self::Survival => "Survival",
            Self::Cerdas => "Cerdas Cermat",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Classic => "Answer, check the result, continue.",
            Self::Team => "Teams take turns; scores are tallied per team.",
            Self::Countdown => "Every question is timed; running out of time counts as wrong.",
            Self::Survival => "Each wrong answer costs a life; no lives left ends the game.",
            Self::Cerdas => {
                "Quiz bowl in two rounds: 10 questions per team, then the remaining questions."
            }
        }
    }

    /// True for modes that track a turn team and team scores.
    #[must_use]
    pub fn is_team_based(self) -> bool {
        matches!(self, Self::Team | Self::Cerdas)
    }

    /// True for modes that put a timer on every question.
    #[must_use]
    pub fn is_timed(self) -> bool {
        matches!(self, Self::Countdown)
    }
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| ModeParseError { raw: s.to_owned() })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identifiers_and_rejects_unknown() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!(" Survival ".parse::<Mode>().unwrap(), Mode::Survival);
        assert!("bowling".parse::<Mode>().is_err());
    }

    #[test]
    fn team_based_and_timed_flags() {
        assert!(Mode::Team.is_team_based());
        assert!(Mode::Cerdas.is_team_based());
        assert!(!Mode::Survival.is_team_based());
        assert!(Mode::Countdown.is_timed());
        assert!(!Mode::Classic.is_timed());
    }
}
