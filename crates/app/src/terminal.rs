//! Line-based front end: prints questions, reads choices from stdin and
//! races them against the one-second countdown ticker.

use std::time::Duration;

use anyhow::Result;
use quiz_core::model::{Answer, Mode, OptionKey, Question, QuizConfig};
use quiz_core::ReviewSummary;
use services::{Advance, LoadedBank, Playthrough, Resolution, TickOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Choice(OptionKey),
    Quit,
    Unknown,
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Self::Quit;
        }
        line.parse().map_or(Self::Unknown, Self::Choice)
    }
}

/// What the player picked on the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndChoice {
    Replay,
    SwitchMode(Mode),
    AddLife,
    Quit,
    Unknown,
}

impl EndChoice {
    fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(cmd), None, None) if cmd.eq_ignore_ascii_case("r") => Self::Replay,
            (Some(cmd), None, None) if cmd.eq_ignore_ascii_case("q") => Self::Quit,
            (Some("+"), None, None) => Self::AddLife,
            (Some(cmd), Some(mode), None) if cmd.eq_ignore_ascii_case("m") => {
                mode.parse().map_or(Self::Unknown, Self::SwitchMode)
            }
            _ => Self::Unknown,
        }
    }
}

/// How one pass over the bank ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Finished,
    Quit,
}

/// Plays `loaded` until the player quits, printing a review after every pass.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub async fn run_quiz(loaded: LoadedBank, mode: Mode, config: QuizConfig) -> Result<()> {
    println!(
        "Loaded {} questions from {}. Mode: {} - {}",
        loaded.total(),
        loaded.source_name,
        mode.label(),
        mode.description()
    );
    info!(source = %loaded.source_name, "starting terminal quiz");

    let mut play = Playthrough::start(loaded.questions, mode, config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let outcome = play_bank(&mut play, &mut lines, &mut ticker).await?;
        render_review(&play.review());
        if outcome == Outcome::Quit {
            return Ok(());
        }

        loop {
            println!();
            println!("r = play again | m <mode> = switch mode | + = play survival with one more life | q = quit");
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };
            match EndChoice::parse(&line) {
                EndChoice::Replay => play.restart(),
                EndChoice::SwitchMode(mode) => {
                    println!("Mode: {} - {}", mode.label(), mode.description());
                    play.restart_with(mode, *play.config());
                }
                EndChoice::AddLife => {
                    let config = play.config().add_life();
                    println!("Lives: {}", config.lives());
                    play.restart_with(Mode::Survival, config);
                }
                EndChoice::Quit => return Ok(()),
                EndChoice::Unknown => continue,
            }
            break;
        }
    }
}

/// One pass over the bank, from the current question to the end or a quit.
async fn play_bank<R>(
    play: &mut Playthrough,
    lines: &mut Lines<R>,
    ticker: &mut Interval,
) -> Result<Outcome>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        render_question(play);
        ticker.reset();

        let answer = loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        return Ok(Outcome::Quit);
                    };
                    match Input::parse(&line) {
                        Input::Choice(key) => {
                            if let Resolution::Recorded(answer) = play.choose(key) {
                                break answer;
                            }
                        }
                        Input::Quit => return Ok(Outcome::Quit),
                        Input::Unknown => println!("Type A, B, C or D (q to stop)."),
                    }
                }
                _ = ticker.tick(), if play.mode().is_timed() => {
                    match play.tick() {
                        TickOutcome::Running(left) if left <= 5 || left % 10 == 0 => {
                            println!("  {left}s left");
                        }
                        TickOutcome::TimedOut(answer) => break answer,
                        TickOutcome::Running(_) | TickOutcome::Idle => {}
                    }
                }
            }
        };
        render_feedback(play.current_question(), &answer);

        println!("Press Enter to continue (q to stop).");
        match lines.next_line().await? {
            Some(line) if Input::parse(&line) != Input::Quit => {}
            _ => return Ok(Outcome::Quit),
        }
        if play.next()? == Advance::Finished {
            return Ok(Outcome::Finished);
        }
    }
}

fn render_question(play: &Playthrough) {
    let session = play.session();
    let question = play.current_question();
    let progress = play.progress();

    let mut badges = vec![
        format!("Question {} / {}", session.current_index() + 1, progress.total),
        format!("{}% done", progress.percent),
    ];
    if let Some(left) = play.seconds_left() {
        badges.push(format!("{left}s"));
    }
    if let Some(lives) = session.lives() {
        badges.push(format!("lives {lives}"));
    }
    if let Some(team) = session.turn_team() {
        badges.push(format!("Team {} of {}", team + 1, play.config().team_count()));
    }
    if let Some(phase) = session.cerdas_phase() {
        badges.push(format!("Round {}", phase.number()));
    }

    println!();
    println!("[{}]", badges.join(" | "));
    println!("Category: {}", question.category());
    println!("{}", question.prompt());
    for option in question.options() {
        println!("  {}. {}", option.key(), option.text());
    }
    if let Some(scores) = session.team_scores() {
        println!("Scores: {}", format_scores(scores));
    }
}

fn render_feedback(question: &Question, answer: &Answer) {
    let key = answer.answer_key;
    let text = question.option(key).text();
    if answer.correct {
        println!("Correct!");
    } else if answer.is_timed_out() {
        println!("Time is up. Answer: {key}. {text}");
    } else {
        println!("Wrong. Answer: {key}. {text}");
    }
}

fn render_review(review: &ReviewSummary) {
    println!();
    println!(
        "Review: correct {} | wrong {} | total {}",
        review.correct, review.wrong, review.total
    );
    if let Some(scores) = &review.team_scores {
        println!("Final scores: {}", format_scores(scores));
    }
    if let Some(lives) = review.lives_left {
        println!("Lives left: {lives}");
    }

    for item in &review.items {
        let verdict = if item.correct { "correct" } else { "wrong" };
        println!();
        println!("No. {} [{}] {verdict}", item.number, item.category);
        println!("{}", item.prompt);
        for option in &item.options {
            let marker = if option.key() == item.answer_key {
                "*"
            } else if Some(option.key()) == item.chosen {
                "x"
            } else {
                " "
            };
            println!(" {marker} {}. {}", option.key(), option.text());
        }
        if !item.answered {
            println!("   (not answered)");
        }
    }
}

fn format_scores(scores: &[u32]) -> String {
    scores
        .iter()
        .enumerate()
        .map(|(team, score)| format!("Team {}: {score}", team + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_parses_choices_and_quit() {
        assert_eq!(Input::parse(" c "), Input::Choice(OptionKey::C));
        assert_eq!(Input::parse("Q"), Input::Quit);
        assert_eq!(Input::parse("e"), Input::Unknown);
        assert_eq!(Input::parse(""), Input::Unknown);
    }

    #[test]
    fn end_choice_reads_replay_mode_switch_and_extra_life() {
        assert_eq!(EndChoice::parse(" R "), EndChoice::Replay);
        assert_eq!(EndChoice::parse("m survival"), EndChoice::SwitchMode(Mode::Survival));
        assert_eq!(EndChoice::parse("M Cerdas"), EndChoice::SwitchMode(Mode::Cerdas));
        assert_eq!(EndChoice::parse("+"), EndChoice::AddLife);
        assert_eq!(EndChoice::parse("q"), EndChoice::Quit);
        assert_eq!(EndChoice::parse("m"), EndChoice::Unknown);
        assert_eq!(EndChoice::parse("m bowling"), EndChoice::Unknown);
        assert_eq!(EndChoice::parse("r now"), EndChoice::Unknown);
    }

    #[test]
    fn scores_are_numbered_from_one() {
        assert_eq!(format_scores(&[3, 1]), "Team 1: 3, Team 2: 1");
    }
}
