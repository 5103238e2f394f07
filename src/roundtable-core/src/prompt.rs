//! Prompt construction for the roundtable model calls.
//!
//! Both builders are pure functions of the topic configuration and the
//! transcript so far. The turn prompt only ever embeds a fixed trailing
//! window of the conversation, which keeps prompt size flat no matter how
//! long an episode runs while still giving the model the recent context it
//! needs for a coherent continuation.

use std::fmt::Write;

use crate::characters::TopicConfig;
use crate::orchestrator::Turn;

/// How many trailing turns the turn prompt embeds.
pub const HISTORY_WINDOW: usize = 6;

/// System instruction: roster, topic background, style, and the output
/// contract the parser relies on.
pub fn system_prompt(topic: &TopicConfig) -> String {
    let mut prompt = format!(
        "You are generating a lively, engaging roundtable discussion with \
         EXACTLY {} characters.\n\nCHARACTERS:\n",
        topic.characters.len()
    );

    for c in &topic.characters {
        let _ = writeln!(prompt, "- {}: {} - {}", c.name, c.role, c.perspective);
    }

    if !topic.context.is_empty() {
        prompt.push_str("\nBACKGROUND:\n");
        for line in &topic.context {
            let _ = writeln!(prompt, "- {line}");
        }
    }

    prompt.push_str("\nCONVERSATION STYLE:\n");
    for line in &topic.style {
        let _ = writeln!(prompt, "- {line}");
    }

    let _ = write!(
        prompt,
        "\nOUTPUT RULES:\n\
         1. Output ONLY valid JSON\n\
         2. Output ONLY a JSON list\n\
         3. EXACTLY {} objects with \"speaker\" and \"message\"\n\
         4. NO markdown, NO code blocks, NO trailing commas\n\
         5. Each message: 1-3 sentences maximum\n",
        topic.characters.len()
    );

    prompt
}

/// Per-turn user prompt: topic, recent history window, and a literal JSON
/// skeleton restating the output contract with the roster's own names.
pub fn turn_prompt(turns: &[Turn], topic: &TopicConfig) -> String {
    let start = turns.len().saturating_sub(HISTORY_WINDOW);
    let mut history = String::new();
    for t in &turns[start..] {
        let _ = writeln!(history, "{}: {}", t.speaker, t.message);
    }

    let skeleton = topic
        .characters
        .iter()
        .map(|c| format!("  {{\"speaker\": \"{}\", \"message\": \"Short, natural response\"}}", c.name))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "Topic: {}\n\n\
         Recent conversation:\n{history}\n\
         Now generate the NEXT TURN with natural, engaging responses.\n\n\
         GUIDELINES:\n\
         - Keep each response 1-3 sentences\n\
         - Show personality and emotion\n\
         - React to what others said\n\
         - Ask questions or challenge ideas when natural\n\
         - Make it sound like a real conversation\n\n\
         Respond with JSON list of {} objects:\n\n\
         [\n{skeleton}\n]\n\n\
         NO extra text. NO markdown.\n",
        topic.title,
        topic.characters.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::TopicRegistry;

    fn turn(speaker: &str, message: &str) -> Turn {
        Turn {
            speaker: speaker.to_string(),
            message: message.to_string(),
            audio: None,
        }
    }

    #[test]
    fn test_system_prompt_lists_roster_and_contract() {
        let registry = TopicRegistry::builtin();
        let topic = registry.config_for("government_jobs").unwrap();
        let prompt = system_prompt(topic);

        assert!(prompt.contains("EXACTLY 4 characters"));
        assert!(prompt.contains("- Exam Strategist: Experienced mentor"));
        assert!(prompt.contains("EXACTLY 4 objects with \"speaker\" and \"message\""));
        assert!(prompt.contains("NO markdown, NO code blocks, NO trailing commas"));
    }

    #[test]
    fn test_system_prompt_includes_travel_background() {
        let registry = TopicRegistry::builtin();
        let topic = registry.config_for("travel").unwrap();
        let prompt = system_prompt(topic);

        assert!(prompt.contains("BACKGROUND:"));
        assert!(prompt.contains("Abu Dhabi, UAE"));
    }

    #[test]
    fn test_turn_prompt_skeleton_uses_roster_names() {
        let registry = TopicRegistry::builtin();
        let topic = registry.config_for("travel").unwrap();
        let prompt = turn_prompt(&[turn("Moderator", "Welcome!")], topic);

        assert!(prompt.contains("Topic: Our Favorite Travel Destinations"));
        assert!(prompt.contains("Moderator: Welcome!"));
        assert!(prompt.contains("{\"speaker\": \"Elena\""));
        assert!(prompt.contains("{\"speaker\": \"Carlos\""));
        assert!(prompt.contains("NO extra text. NO markdown."));
    }

    #[test]
    fn test_turn_prompt_window_is_bounded() {
        let registry = TopicRegistry::builtin();
        let topic = registry.config_for("government_jobs").unwrap();

        let turns: Vec<Turn> = (0..20)
            .map(|i| turn("Citizen", &format!("message number {i}")))
            .collect();
        let prompt = turn_prompt(&turns, topic);

        // Only the 6 most recent turns appear, oldest first.
        assert!(!prompt.contains("message number 13"));
        assert!(prompt.contains("message number 14"));
        assert!(prompt.contains("message number 19"));
        let pos_14 = prompt.find("message number 14").unwrap();
        let pos_19 = prompt.find("message number 19").unwrap();
        assert!(pos_14 < pos_19);
    }

    #[test]
    fn test_turn_prompt_short_transcript() {
        let registry = TopicRegistry::builtin();
        let topic = registry.config_for("government_jobs").unwrap();
        let prompt = turn_prompt(&[turn("Moderator", "Welcome")], topic);
        assert!(prompt.contains("Moderator: Welcome"));
    }
}
