//! Roundtable orchestration logic.
//!
//! Drives the fixed-length turn loop: build prompt, invoke the completion
//! collaborator, parse the response, resolve each speaker's voice, fan out
//! speech synthesis, and append the spoken turns to the transcript.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::accent::{self, Platform};
use crate::characters::{TopicConfig, TopicRegistry};
use crate::completion::OpenAiCompletion;
use crate::config::Config;
use crate::episode::{self, Episode};
use crate::error::RoundtableError;
use crate::parser::{self, DialogueEntry};
use crate::prompt;
use crate::tts::CommandSynthesizer;

/// Default number of discussion rounds per episode.
pub const DEFAULT_ROUNDS: u32 = 8;

/// Cooperative pause between rounds.
const ROUND_PAUSE: Duration = Duration::from_millis(300);

/// Message role for the completion collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// One message in a completion request.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Completion collaborator boundary.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RoundtableError>;
}

/// Speech-synthesis collaborator boundary.
///
/// Returns an opaque audio artifact reference; the container format may
/// vary by platform and the orchestrator never interprets it.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<String, RoundtableError>;
}

/// One spoken line of the episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: String,
    pub message: String,
    /// Audio artifact reference, absent when synthesis is disabled.
    pub audio: Option<String>,
}

/// The ordered turns of one completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub topic: String,
    pub turns: Vec<Turn>,
}

/// Callback for roundtable events.
pub type RoundtableCallback = Box<dyn Fn(RoundtableEvent) + Send + Sync>;

/// Events emitted while an episode runs.
#[derive(Debug, Clone)]
pub enum RoundtableEvent {
    /// The episode is starting.
    EpisodeStart { topic: String },
    /// A discussion round is starting (1-based).
    RoundStart { round: u32 },
    /// A turn was appended to the transcript.
    SpokenTurn { speaker: String, message: String },
    /// The episode has concluded.
    EpisodeEnd,
}

/// Orchestrates one roundtable episode.
pub struct RoundtableOrchestrator {
    topic: TopicConfig,
    completion: Box<dyn CompletionClient>,
    synthesizer: Option<Box<dyn SpeechSynthesizer>>,
    rounds: u32,
    platform: Platform,
    callback: Option<RoundtableCallback>,
}

impl RoundtableOrchestrator {
    pub fn new(topic: TopicConfig, completion: Box<dyn CompletionClient>, rounds: u32) -> Self {
        Self {
            topic,
            completion,
            synthesizer: None,
            rounds,
            platform: Platform::detect(),
            callback: None,
        }
    }

    /// Enable speech synthesis through the given collaborator.
    pub fn with_synthesizer(mut self, synthesizer: Box<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Override the detected platform (voice-table selection).
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set a callback for roundtable events.
    pub fn with_callback(mut self, callback: RoundtableCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Run the full episode and return its transcript.
    ///
    /// Any completion, parse, or synthesis failure aborts the whole run;
    /// no partial transcript is returned.
    pub async fn run(&self) -> Result<Transcript, RoundtableError> {
        info!(topic = %self.topic.key, rounds = self.rounds, "starting roundtable");
        self.emit(RoundtableEvent::EpisodeStart {
            topic: self.topic.title.clone(),
        });

        let mut turns: Vec<Turn> = Vec::new();
        turns.push(self.intro_turn().await?);
        if let Some(intro) = turns.first() {
            self.emit(RoundtableEvent::SpokenTurn {
                speaker: intro.speaker.clone(),
                message: intro.message.clone(),
            });
        }

        let system = prompt::system_prompt(&self.topic);

        for round in 1..=self.rounds {
            self.emit(RoundtableEvent::RoundStart { round });
            debug!(round, "requesting next turn");

            let user = prompt::turn_prompt(&turns, &self.topic);
            let raw = self
                .completion
                .complete(&[ChatMessage::system(&system), ChatMessage::user(&user)])
                .await?;

            let entries = parser::parse_dialogue(&raw)?;
            self.validate_round(&entries, &raw)?;

            for turn in self.synthesize_round(entries).await? {
                self.emit(RoundtableEvent::SpokenTurn {
                    speaker: turn.speaker.clone(),
                    message: turn.message.clone(),
                });
                turns.push(turn);
            }

            tokio::time::sleep(ROUND_PAUSE).await;
        }

        self.emit(RoundtableEvent::EpisodeEnd);
        info!(turns = turns.len(), "roundtable complete");

        Ok(Transcript {
            topic: self.topic.title.clone(),
            turns,
        })
    }

    /// The synthetic moderator introduction, spoken in the default voice.
    async fn intro_turn(&self) -> Result<Turn, RoundtableError> {
        let audio = match &self.synthesizer {
            Some(synth) => {
                let voice = accent::resolve(crate::characters::DEFAULT_ACCENT, self.platform);
                Some(synth.synthesize(&self.topic.intro, voice).await?)
            }
            None => None,
        };

        Ok(Turn {
            speaker: "Moderator".to_string(),
            message: self.topic.intro.clone(),
            audio,
        })
    }

    /// Enforce the round shape the parser deliberately ignores: one entry
    /// per roster character, every entry with a speaker and a message.
    fn validate_round(&self, entries: &[DialogueEntry], raw: &str) -> Result<(), RoundtableError> {
        let expected = self.topic.characters.len();
        let shape_ok = entries.len() == expected
            && entries
                .iter()
                .all(|e| !e.speaker.trim().is_empty() && !e.message.trim().is_empty());

        if shape_ok {
            Ok(())
        } else {
            warn!(
                expected,
                got = entries.len(),
                "round rejected: malformed dialogue"
            );
            Err(RoundtableError::UnparsableResponse {
                raw: raw.to_string(),
            })
        }
    }

    /// Synthesize one round's entries concurrently and return them as
    /// turns in parse order. Entries are independent within a round, so
    /// the fan-out only has to preserve ordering at the join.
    async fn synthesize_round(
        &self,
        entries: Vec<DialogueEntry>,
    ) -> Result<Vec<Turn>, RoundtableError> {
        let Some(synth) = &self.synthesizer else {
            return Ok(entries
                .into_iter()
                .map(|e| Turn {
                    speaker: e.speaker,
                    message: e.message,
                    audio: None,
                })
                .collect());
        };

        let audio = futures::future::try_join_all(entries.iter().map(|entry| {
            let voice = self.voice_for(&entry.speaker);
            async move { synth.synthesize(&entry.message, voice).await }
        }))
        .await?;

        Ok(entries
            .into_iter()
            .zip(audio)
            .map(|(e, a)| Turn {
                speaker: e.speaker,
                message: e.message,
                audio: Some(a),
            })
            .collect())
    }

    /// Resolve a speaker to a concrete voice: roster accent lookup with the
    /// default-accent fallback, then the platform voice table.
    fn voice_for(&self, speaker: &str) -> &'static str {
        accent::resolve(self.topic.accent_for(speaker), self.platform)
    }

    fn emit(&self, event: RoundtableEvent) {
        if let Some(callback) = &self.callback {
            callback(event);
        }
    }
}

/// Run one episode end to end: registry lookup, live collaborators from
/// configuration, orchestration, and episode assembly.
pub async fn run_roundtable(
    topic_key: &str,
    tts_enabled: bool,
    config: &Config,
    api_key: &str,
    callback: Option<RoundtableCallback>,
) -> Result<Episode, RoundtableError> {
    let registry = TopicRegistry::builtin();
    let topic = registry.config_for(topic_key)?.clone();

    let completion = Box::new(OpenAiCompletion::new(&config.completion, api_key));
    let mut orchestrator = RoundtableOrchestrator::new(topic, completion, config.rounds);

    if tts_enabled {
        orchestrator = orchestrator
            .with_synthesizer(Box::new(CommandSynthesizer::new(&config.tts.output_dir)));
    }
    if let Some(callback) = callback {
        orchestrator = orchestrator.with_callback(callback);
    }

    let transcript = orchestrator.run().await?;
    Ok(episode::assemble(transcript))
}
