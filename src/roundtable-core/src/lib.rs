//! Roundtable Core Library
//!
//! Orchestrates multi-persona roundtable episodes: prompt construction,
//! tolerant parsing of model output, per-speaker voice resolution, speech
//! synthesis, and episode assembly.

pub mod accent;
pub mod characters;
pub mod completion;
pub mod config;
pub mod episode;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod tts;

pub use characters::{Character, TopicConfig, TopicRegistry};
pub use config::Config;
pub use episode::Episode;
pub use error::RoundtableError;
pub use orchestrator::{
    run_roundtable, RoundtableCallback, RoundtableEvent, RoundtableOrchestrator, Transcript, Turn,
};
pub use parser::DialogueEntry;
