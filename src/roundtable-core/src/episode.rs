//! Episode assembly.
//!
//! Packages a completed transcript into the persisted episode record. Pure
//! transformation: no network or synthesis calls happen here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::orchestrator::{Transcript, Turn};

/// Well-known prefix under which synthesized audio is served.
pub const SERVE_PREFIX: &str = "/tts_output/";

static STAMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp with a process-wide counter suffix.
///
/// The counter closes the sub-millisecond collision window that a bare
/// timestamp leaves open for episode ids and audio filenames alike.
pub(crate) fn unique_stamp() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = STAMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{millis}-{seq:04}")
}

/// A finished, persistable roundtable episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub turns: Vec<Turn>,
    /// Servable paths of every synthesized turn, in transcript order.
    pub audio_files: Vec<String>,
}

/// Build an [`Episode`] from a completed transcript.
pub fn assemble(transcript: Transcript) -> Episode {
    let audio_files = transcript
        .turns
        .iter()
        .filter_map(|t| t.audio.as_deref())
        .map(normalize_audio_path)
        .collect();

    Episode {
        id: unique_stamp(),
        topic: transcript.topic,
        created_at: Utc::now(),
        turns: transcript.turns,
        audio_files,
    }
}

/// Normalize a synthesis artifact reference to its servable form.
fn normalize_audio_path(path: &str) -> String {
    if path.starts_with(SERVE_PREFIX) {
        return path.to_string();
    }
    if let Some(rest) = path.strip_prefix("tts_output/") {
        return format!("{SERVE_PREFIX}{rest}");
    }
    let basename = path.rsplit('/').next().unwrap_or(path);
    format!("{SERVE_PREFIX}{basename}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(speaker: &str, audio: Option<&str>) -> Turn {
        Turn {
            speaker: speaker.to_string(),
            message: "hello".to_string(),
            audio: audio.map(str::to_string),
        }
    }

    fn transcript(turns: Vec<Turn>) -> Transcript {
        Transcript {
            topic: "Government Jobs and Exams in India".to_string(),
            turns,
        }
    }

    #[test]
    fn test_assemble_skips_null_audio() {
        let episode = assemble(transcript(vec![
            turn("Moderator", None),
            turn("Citizen", Some("tts_output/17000-0001.aiff")),
            turn("Serving Officer", Some("17000-0002.aiff")),
        ]));

        assert_eq!(
            episode.audio_files,
            vec!["/tts_output/17000-0001.aiff", "/tts_output/17000-0002.aiff"]
        );
    }

    #[test]
    fn test_audio_paths_always_carry_serve_prefix() {
        let episode = assemble(transcript(vec![
            turn("A", Some("/tts_output/a.aiff")),
            turn("B", Some("/var/data/audio/b.wav")),
            turn("C", Some("c.wav")),
        ]));

        for path in &episode.audio_files {
            assert!(path.starts_with(SERVE_PREFIX), "bad path: {path}");
        }
        assert_eq!(episode.audio_files[1], "/tts_output/b.wav");
    }

    #[test]
    fn test_episode_ids_unique_under_rapid_calls() {
        let a = assemble(transcript(vec![]));
        let b = assemble(transcript(vec![]));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_unique_stamp_monotonic_counter() {
        let a = unique_stamp();
        let b = unique_stamp();
        assert_ne!(a, b);
    }
}
