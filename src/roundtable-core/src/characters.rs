//! Character registry and topic configuration.
//!
//! Each topic type carries its own persona roster, moderator introduction,
//! and prompt material. Registries are built once at startup and are
//! read-only for the rest of the process.

use serde::{Deserialize, Serialize};

use crate::error::RoundtableError;

/// Accent tag applied when a speaker has no roster entry.
pub const DEFAULT_ACCENT: &str = "default";

/// A panelist persona for one topic type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Display name, unique within a topic's roster.
    pub name: String,
    /// Short role description (e.g. "Serving Officer").
    pub role: String,
    /// What this persona brings to the conversation.
    pub perspective: String,
    /// Abstract accent tag, resolved to a concrete voice at synthesis time.
    pub accent: String,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        perspective: impl Into<String>,
        accent: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            perspective: perspective.into(),
            accent: accent.into(),
        }
    }
}

/// Everything the orchestrator needs to run one topic type.
///
/// The historical implementation duplicated the whole turn loop per topic;
/// here a single orchestrator is parameterized by this value instead.
#[derive(Debug, Clone)]
pub struct TopicConfig {
    /// Registry key (e.g. "government_jobs").
    pub key: String,
    /// Human-readable discussion topic.
    pub title: String,
    /// Moderator introduction, spoken as turn zero.
    pub intro: String,
    /// Ordered persona roster.
    pub characters: Vec<Character>,
    /// Topic-specific background lines fed into the system prompt
    /// (e.g. destination blurbs for the travel topic). May be empty.
    pub context: Vec<String>,
    /// Conversation-style directives for the system prompt.
    pub style: Vec<String>,
}

impl TopicConfig {
    /// Look up a roster character by speaker name.
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Accent tag for a speaker, falling back to [`DEFAULT_ACCENT`] when
    /// the model invents a name outside the roster.
    pub fn accent_for(&self, speaker: &str) -> &str {
        self.character(speaker)
            .map(|c| c.accent.as_str())
            .unwrap_or(DEFAULT_ACCENT)
    }
}

/// Immutable collection of configured topics.
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    topics: Vec<TopicConfig>,
}

impl TopicRegistry {
    /// Build the registry with the built-in topic types.
    pub fn builtin() -> Self {
        Self {
            topics: vec![government_jobs_topic(), travel_topic()],
        }
    }

    /// Ordered roster and prompt material for a topic key.
    pub fn config_for(&self, key: &str) -> Result<&TopicConfig, RoundtableError> {
        self.topics
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| RoundtableError::UnknownTopic(key.to_string()))
    }

    /// List all registered topic keys.
    pub fn available_topics(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.key.as_str()).collect()
    }
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn government_jobs_topic() -> TopicConfig {
    TopicConfig {
        key: "government_jobs".to_string(),
        title: "Government Jobs and Exams in India".to_string(),
        intro: "Welcome to the AI Roundtable. Today we discuss Government Jobs \
                and Exams in India. Our panel includes an Exam Strategist, a \
                Serving Officer, a Fresh Qualifier, and a Citizen."
            .to_string(),
        characters: vec![
            Character::new(
                "Exam Strategist",
                "Experienced mentor",
                "practical and strategic",
                "Indian English",
            ),
            Character::new(
                "Serving Officer",
                "Current government officer",
                "realistic and grounded",
                "Indian English",
            ),
            Character::new(
                "Fresh Qualifier",
                "Recent exam qualifier",
                "energetic and relatable",
                "Indian English",
            ),
            Character::new(
                "Citizen",
                "Informed citizen",
                "asks tough questions, sometimes skeptical",
                "Indian English",
            ),
        ],
        context: vec!["Use examples from the Indian context.".to_string()],
        style: vec![
            "Keep responses SHORT (1-3 sentences max)".to_string(),
            "Use natural, conversational language".to_string(),
            "Show personality and emotion".to_string(),
            "Disagree respectfully when appropriate".to_string(),
            "Build on what others say".to_string(),
            "Ask follow-up questions".to_string(),
            "Use examples and stories".to_string(),
        ],
    }
}

fn travel_topic() -> TopicConfig {
    TopicConfig {
        key: "travel".to_string(),
        title: "Our Favorite Travel Destinations".to_string(),
        intro: "Welcome to the AI Roundtable Travel Edition! Today we're \
                discussing amazing destinations: Salt Lake City USA, Abu Dhabi \
                UAE, Chennai and Bangalore in India, and Manchester UK. Our \
                panel includes Elena from Spain who's visited all these places, \
                Fatima from UAE who's researched them extensively, Priya from \
                India whose sister lives abroad, and Carlos from Mexico who's \
                planning to relocate."
            .to_string(),
        characters: vec![
            Character::new(
                "Elena",
                "Traveler from Spain",
                "has visited all the destinations in person",
                "American",
            ),
            Character::new(
                "Fatima",
                "Researcher from UAE",
                "has studied the destinations extensively",
                "British",
            ),
            Character::new(
                "Priya",
                "Panelist from India",
                "knows the destinations through her sister living abroad",
                "Indian English",
            ),
            Character::new(
                "Carlos",
                "Relocator from Mexico",
                "planning to move and comparing the options",
                "Australian",
            ),
        ],
        context: vec![
            "Salt Lake City, USA: Mountain activities, skiing, Temple Square, craft breweries"
                .to_string(),
            "Abu Dhabi, UAE: Sheikh Zayed Grand Mosque, Louvre, desert safaris, luxury"
                .to_string(),
            "Chennai, India: Marina Beach, temples, filter coffee, seafood".to_string(),
            "Bangalore, India: Tech hub, gardens, pub culture, pleasant weather".to_string(),
            "Manchester, UK: Football, music scene, industrial heritage, Northern Quarter"
                .to_string(),
        ],
        style: vec![
            "Keep responses SHORT (1-3 sentences max)".to_string(),
            "Share specific recommendations: places to visit, food to try, best seasons, activities"
                .to_string(),
            "Use natural, conversational language with personality".to_string(),
            "Each character brings their unique perspective".to_string(),
            "Build on what others say".to_string(),
            "Ask follow-up questions".to_string(),
            "Share practical tips and personal insights".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_topics_registered() {
        let registry = TopicRegistry::builtin();
        assert_eq!(registry.available_topics(), vec!["government_jobs", "travel"]);
    }

    #[test]
    fn test_government_jobs_roster() {
        let registry = TopicRegistry::builtin();
        let topic = registry.config_for("government_jobs").unwrap();

        let names: Vec<&str> = topic.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Exam Strategist", "Serving Officer", "Fresh Qualifier", "Citizen"]
        );
    }

    #[test]
    fn test_unknown_topic() {
        let registry = TopicRegistry::builtin();
        let err = registry.config_for("cooking").unwrap_err();
        assert!(matches!(err, RoundtableError::UnknownTopic(_)));
    }

    #[test]
    fn test_accent_fallback_for_unknown_speaker() {
        let registry = TopicRegistry::builtin();
        let topic = registry.config_for("travel").unwrap();

        assert_eq!(topic.accent_for("Priya"), "Indian English");
        assert_eq!(topic.accent_for("Narrator"), DEFAULT_ACCENT);
    }
}
