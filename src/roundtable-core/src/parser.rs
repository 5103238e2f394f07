//! Tolerant parsing of model output into structured dialogue.
//!
//! The model is instructed to return a bare JSON list, but real responses
//! arrive wrapped in prose or code fences, or truncated mid-list. The
//! repair ladder here tries the cheap fixes in order before giving up;
//! re-querying the model costs far more than a few string repairs.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RoundtableError;

/// One line of dialogue as produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEntry {
    pub speaker: String,
    pub message: String,
}

/// Recover a dialogue list from raw model output.
///
/// Ladder, first success wins:
/// 1. decode the trimmed text as-is;
/// 2. slice from the first `[` to the last `]` (appending a `]` when the
///    closing bracket was truncated away);
/// 3. strip trailing commas before `]`/`}` and retry;
/// 4. fail with [`RoundtableError::UnparsableResponse`] carrying the raw text.
///
/// Purely syntactic: entry count and speaker membership are the
/// orchestrator's concern.
pub fn parse_dialogue(raw: &str) -> Result<Vec<DialogueEntry>, RoundtableError> {
    let text = raw.trim();

    if let Ok(entries) = serde_json::from_str::<Vec<DialogueEntry>>(text) {
        return Ok(entries);
    }

    if let Some(start) = text.find('[') {
        let candidate = match text.rfind(']') {
            Some(end) if end > start => text[start..=end].to_string(),
            _ => format!("{}]", &text[start..]),
        };

        let candidate = strip_trailing_commas(&candidate);
        match serde_json::from_str::<Vec<DialogueEntry>>(&candidate) {
            Ok(entries) => {
                debug!(len = entries.len(), "recovered dialogue from repaired JSON");
                return Ok(entries);
            }
            Err(e) => debug!(error = %e, "repair candidate still unparsable"),
        }
    }

    Err(RoundtableError::UnparsableResponse {
        raw: raw.to_string(),
    })
}

/// Remove trailing commas immediately preceding a closing bracket or brace,
/// the usual malformation of a truncated model response.
fn strip_trailing_commas(candidate: &str) -> String {
    match Regex::new(r",\s*([\]}])") {
        Ok(re) => re.replace_all(candidate, "$1").to_string(),
        Err(_) => candidate.to_string(),
    }
}
