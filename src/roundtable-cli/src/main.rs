//! Roundtable CLI - AI panel discussion generator
//!
//! Runs a multi-persona roundtable episode against an OpenAI-compatible
//! completion API, optionally speaks each line through the OS speech
//! command, and persists finished episodes to a JSON store.

mod store;

use clap::Parser;
use colored::Colorize;
use roundtable_core::{
    run_roundtable, Config, RoundtableCallback, RoundtableEvent, TopicRegistry,
};
use std::env;
use std::path::PathBuf;
use store::EpisodeStore;

#[derive(Parser)]
#[command(
    name = "roundtable",
    version,
    about = "AI Roundtable - generate spoken panel discussions",
    long_about = "Generates a multi-persona roundtable episode using an \
                  OpenAI-compatible completion API, with optional speech \
                  synthesis per line."
)]
struct Cli {
    /// Topic type to discuss
    #[arg(value_name = "TOPIC", default_value = "government_jobs")]
    topic: String,

    /// Number of discussion rounds (overrides config)
    #[arg(short, long, value_name = "ROUNDS")]
    rounds: Option<u32>,

    /// Disable speech synthesis
    #[arg(long)]
    no_tts: bool,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the episode store
    #[arg(long, default_value = "episodes.json", value_name = "FILE")]
    store: PathBuf,

    /// List stored episodes (newest first) and exit
    #[arg(long)]
    list: bool,

    /// List available topic types and exit
    #[arg(long)]
    topics: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = EpisodeStore::new(&cli.store);

    if cli.topics {
        for topic in TopicRegistry::builtin().available_topics() {
            println!("{topic}");
        }
        return Ok(());
    }

    if cli.list {
        for episode in store.list() {
            println!(
                "{}  {}  {} turns  {} audio files",
                episode.id.bold(),
                episode.created_at.format("%Y-%m-%d %H:%M:%S"),
                episode.turns.len(),
                episode.audio_files.len()
            );
            println!("    {}", episode.topic.dimmed());
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }

    let api_key = env::var("GROQ_API_KEY")
        .or_else(|_| env::var("OPENAI_API_KEY"))
        .unwrap_or_else(|_| {
            eprintln!(
                "{}",
                "Warning: GROQ_API_KEY not set. API calls may fail.".yellow()
            );
            String::new()
        });

    let callback: RoundtableCallback = Box::new(|event: RoundtableEvent| match event {
        RoundtableEvent::EpisodeStart { topic } => {
            println!("{}", format!("=== {topic} ===").bold());
        }
        RoundtableEvent::RoundStart { round } => {
            println!("{}", format!("--- Round {round} ---").dimmed());
        }
        RoundtableEvent::SpokenTurn { speaker, message } => {
            println!("{}: {}", speaker.cyan().bold(), message);
        }
        RoundtableEvent::EpisodeEnd => {
            println!("{}", "Episode complete.".green());
        }
    });

    let episode =
        run_roundtable(&cli.topic, !cli.no_tts, &config, &api_key, Some(callback)).await?;

    store.add(&episode)?;
    println!(
        "Saved episode {} ({} turns, {} audio files) to {}",
        episode.id.bold(),
        episode.turns.len(),
        episode.audio_files.len(),
        cli.store.display()
    );

    Ok(())
}
