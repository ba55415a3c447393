use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;

use clap::Parser;
use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::SeedableRng;

use reading_hero_core::game::domain::difficulty::Difficulty;
use reading_hero_core::game::domain::phrase::PhraseList;
use reading_hero_core::game::domain::round_controller::RoundController;
use reading_hero_core::game::domain::round_event::RoundEvent;
use reading_hero_core::game::domain::round_observer::RoundObserver;
use reading_hero_core::game::domain::session_summary::SessionSummary;
use reading_hero_core::game::infrastructure::log_round_observer::LogRoundObserver;
use reading_hero_core::recognition::domain::recognition_session::MicStatus;
use reading_hero_core::recognition::infrastructure::channel_recognizer::{
    ChannelRecognizer, TranscriptFeeder,
};
use reading_hero_core::runtime::game_event::GameEvent;
use reading_hero_core::runtime::game_loop::GameLoop;
use reading_hero_core::scheduling::infrastructure::thread_timer::ThreadTimer;
use reading_hero_core::shared::settings::Settings;
use reading_hero_core::shared::word_lists::{self, BUILT_IN_LISTS};

/// Reading practice: say (type) each word before the timer runs out.
#[derive(Parser)]
#[command(name = "reading-hero")]
struct Cli {
    /// Text file with one word or sentence per line.
    input: Option<PathBuf>,

    /// Use a built-in word list instead of a file (see --lists).
    #[arg(long)]
    list: Option<String>,

    /// Print the built-in word lists and exit.
    #[arg(long)]
    lists: bool,

    /// Difficulty: easy, medium or hard.
    #[arg(long)]
    difficulty: Option<String>,

    /// Seconds per round, overriding the difficulty's time limit.
    #[arg(long)]
    timer: Option<u32>,

    /// Keep the phrases in file order.
    #[arg(long)]
    no_shuffle: bool,

    /// Seed for the phrase shuffle.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Results after which the simulated recognizer ends its stream (0 = never).
    #[arg(long)]
    results_per_stream: Option<usize>,

    /// Print the final summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.lists {
        print_lists();
        return Ok(());
    }
    validate(&cli)?;

    let settings = resolve_settings(&cli)?;
    let profile = settings.profile()?;
    let mut phrases = load_phrases(cli.input.as_deref(), cli.list.as_deref())?;
    if settings.shuffle {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        phrases.shuffle(&mut rng);
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let recognizer = ChannelRecognizer::new(tx.clone(), settings.results_per_stream);
    spawn_input_reader(recognizer.feeder(), tx.clone());

    let controller = RoundController::new(
        phrases,
        profile,
        Box::new(recognizer),
        Box::new(ThreadTimer::new(tx)),
        Box::new(TerminalObserver::new()),
    );

    eprintln!(
        "Difficulty: {} ({}s per round). Type what you read; /skip skips, /retry resumes listening, /quit stops.",
        settings.difficulty, profile.round_duration_secs
    );
    let summary = GameLoop::new(controller, rx).run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if let Some(difficulty) = &cli.difficulty {
        settings.difficulty = difficulty.parse::<Difficulty>()?;
    }
    if cli.timer.is_some() {
        settings.round_duration_secs = cli.timer;
    }
    if cli.no_shuffle {
        settings.shuffle = false;
    }
    if let Some(n) = cli.results_per_stream {
        settings.results_per_stream = n;
    }
    log::debug!("Effective settings: {settings:?}");
    Ok(settings)
}

fn load_phrases(
    input: Option<&Path>,
    list: Option<&str>,
) -> Result<PhraseList, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        return Ok(PhraseList::from_lines(&text)?);
    }

    let id = list.unwrap_or(BUILT_IN_LISTS[0].id);
    let words = word_lists::find(id)
        .ok_or_else(|| format!("Unknown word list {id:?}; run with --lists to see them"))?;
    Ok(PhraseList::new(words.words)?)
}

const NOT_LISTENING: &str = "  Not listening yet, try again.";

/// Forwards typed lines to the recognizer. `/skip`, `/retry` and `/quit`
/// are commands.
fn spawn_input_reader(feeder: TranscriptFeeder, events: Sender<GameEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let Some(command) = parse_command(&line) else {
                if let Some(notice) = submit_answer(&feeder, &line) {
                    println!("{notice}");
                }
                continue;
            };
            if events.send(command).is_err() {
                break;
            }
        }
        log::debug!("Input closed");
    });
}

fn parse_command(line: &str) -> Option<GameEvent> {
    match line.trim() {
        "/skip" => Some(GameEvent::Skip),
        "/retry" => Some(GameEvent::ResumeListening),
        "/quit" => Some(GameEvent::Stop),
        _ => None,
    }
}

/// Pushes a typed answer. Returns a notice for the player when the
/// recognizer was between streams and the answer was lost.
fn submit_answer(feeder: &TranscriptFeeder, line: &str) -> Option<&'static str> {
    let text = line.trim();
    if text.is_empty() || feeder.push(text) {
        None
    } else {
        Some(NOT_LISTENING)
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.input.is_some() && cli.list.is_some() {
        return Err("An input file and --list are mutually exclusive".into());
    }
    if let Some(path) = &cli.input {
        if !path.exists() {
            return Err(format!("Input file not found: {}", path.display()).into());
        }
    }
    if cli.timer == Some(0) {
        return Err("Timer must be at least 1 second".into());
    }
    Ok(())
}

fn print_lists() {
    for list in BUILT_IN_LISTS {
        println!("{:<10} {} ({} words)", list.id, list.name, list.words.len());
    }
}

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("{}", summary.rating.message());
    println!(
        "Score: {}/{} ({}%)",
        summary.score, summary.total, summary.accuracy_percent
    );
    println!("Best streak: {}", summary.best_streak);
    if !summary.missed_words.is_empty() {
        println!("Practice these: {}", summary.missed_words.join(", "));
    }
}

/// Renders round events as plain terminal lines and keeps a log tally.
struct TerminalObserver {
    log: LogRoundObserver,
}

impl TerminalObserver {
    fn new() -> Self {
        Self {
            log: LogRoundObserver::new(),
        }
    }
}

impl RoundObserver for TerminalObserver {
    fn on_event(&mut self, event: &RoundEvent) {
        self.log.on_event(event);

        match event {
            RoundEvent::WordShown {
                index,
                total,
                target,
                time_limit_secs,
            } => {
                println!();
                println!("[{}/{total}] {target}   ({time_limit_secs}s)", index + 1);
            }
            RoundEvent::Tick {
                remaining_secs,
                warning: true,
            } => println!("  {remaining_secs}..."),
            RoundEvent::Progress { matched, total } => println!("  {matched}/{total} words"),
            RoundEvent::Correct {
                streak,
                streak_tier,
                milestone,
                ..
            } => {
                println!("  Correct!");
                if let Some(tier) = streak_tier {
                    println!("  {tier} in a row! (streak {streak})");
                }
                if let Some(score) = milestone {
                    println!("  {score} words read!");
                }
            }
            RoundEvent::TimedOut { target, struggling } => {
                println!("  Time's up! The word was: {target}");
                if *struggling {
                    println!("  Try saying it slowly, one sound at a time.");
                }
            }
            RoundEvent::Skipped { target, struggling } => {
                println!("  Skipped: {target}");
                if *struggling {
                    println!("  Try saying it slowly, one sound at a time.");
                }
            }
            RoundEvent::Microphone(MicStatus::Blocked) => {
                eprintln!("Microphone access was denied. Type /retry once it is allowed.");
            }
            RoundEvent::Finished(_) => {
                if let Some(tally) = self.log.summary_string() {
                    log::info!("{tally}");
                }
            }
            _ => {}
        }
    }
}
