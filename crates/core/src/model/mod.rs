mod answer;
mod config;
mod mode;
mod question;
mod row;

pub use answer::Answer;
pub use config::{
    ConfigError, LIVES_RANGE, QuizConfig, SECONDS_PER_QUESTION_RANGE, TEAM_COUNT_RANGE,
    parse_lives, parse_seconds_per_question, parse_team_count,
};
pub use mode::{Mode, ModeParseError};
pub use question::{AnswerOption, DEFAULT_CATEGORY, OptionKey, OptionKeyError, Question};
pub use row::RawRow;
