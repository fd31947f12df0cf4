mod terminal;

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use quiz_core::model::{
    Mode, QuizConfig, parse_lives, parse_seconds_per_question, parse_team_count,
};
use services::{loader, templates};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMode { raw: String },
    MissingFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid --mode value: {raw}"),
            ArgsError::MissingFile => write!(f, "play needs a question file (--file or QUIZ_FILE)"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app play     --file <soal.csv|soal.json> [--mode <mode>] [settings]");
    eprintln!("  app demo     [--mode <mode>] [settings]   # built-in contoh_soal.csv");
    eprintln!("  app template                              # CSV template + AI prompt");
    eprintln!();
    eprintln!("Modes: classic (default), team, countdown, survival, cerdas");
    eprintln!();
    eprintln!("Settings:");
    eprintln!("  --teams <2-8>      teams for team/cerdas (default 2)");
    eprintln!("  --seconds <5-120>  timer per question for countdown (default 30)");
    eprintln!("  --lives <1-10>     lives for survival (default 1)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE, QUIZ_MODE, QUIZ_TEAMS, QUIZ_SECONDS, QUIZ_LIVES, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Demo,
    Template,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "demo" => Some(Self::Demo),
            "template" => Some(Self::Template),
            _ => None,
        }
    }
}

struct Args {
    file: Option<PathBuf>,
    mode: Mode,
    config: QuizConfig,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let env = |key: &str| std::env::var(key).ok();

        let mut file = env("QUIZ_FILE").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let mut mode = env("QUIZ_MODE")
            .and_then(|value| value.parse::<Mode>().ok())
            .unwrap_or_default();
        // Out-of-range numbers are clamped into range.
        let mut config = QuizConfig::default();
        if let Some(value) = env("QUIZ_TEAMS") {
            config = config.with_team_count(parse_team_count(&value));
        }
        if let Some(value) = env("QUIZ_SECONDS") {
            config = config.with_seconds_per_question(parse_seconds_per_question(&value));
        }
        if let Some(value) = env("QUIZ_LIVES") {
            config = config.with_lives(parse_lives(&value));
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => file = Some(PathBuf::from(require_value(args, "--file")?)),
                "--mode" => {
                    let value = require_value(args, "--mode")?;
                    mode = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidMode { raw: value.clone() })?;
                }
                "--teams" => {
                    let value = require_value(args, "--teams")?;
                    config = config.with_team_count(parse_team_count(&value));
                }
                "--seconds" => {
                    let value = require_value(args, "--seconds")?;
                    config = config.with_seconds_per_question(parse_seconds_per_question(&value));
                }
                "--lives" => {
                    let value = require_value(args, "--lives")?;
                    config = config.with_lives(parse_lives(&value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { file, mode, config })
    }
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with the quiz on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> anyhow::Result<()> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Flags without a subcommand mean `play`.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Demo,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            print_usage();
            ArgsError::UnknownArg(first.to_owned())
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    if cmd == Command::Template {
        println!("{}", templates::CSV_TEMPLATE);
        println!("{}", templates::ai_prompt());
        return Ok(());
    }

    let parsed = Args::parse(&mut argv.into_iter()).inspect_err(|_| print_usage())?;

    let loaded = match cmd {
        Command::Demo => loader::load_sample().context("bundled sample questions are broken")?,
        _ => {
            let path = parsed.file.ok_or(ArgsError::MissingFile)?;
            loader::load_file(&path)
                .with_context(|| format!("could not load questions from {}", path.display()))?
        }
    };

    terminal::run_quiz(loaded, parsed.mode, parsed.config).await
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
