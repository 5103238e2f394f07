//! Accent-to-voice resolution.
//!
//! Maps a character's abstract accent tag to the concrete voice identifier
//! understood by the platform's speech command. Resolution is total: a tag
//! missing from the active table falls back to that table's default voice
//! so one unsupported accent never aborts synthesis.

/// Speech-synthesis platform, selecting the active voice table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS `say`.
    MacOs,
    /// espeak (Linux and everything else).
    Linux,
}

impl Platform {
    /// Platform for the current build target.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }
}

/// macOS `say` voices.
const MAC_VOICES: &[(&str, &str)] = &[
    ("Indian English", "Veena"),
    ("American", "Alex"),
    ("British", "Daniel"),
    ("Australian", "Karen"),
];
const MAC_DEFAULT: &str = "Alex";

/// espeak voice codes.
const ESPEAK_VOICES: &[(&str, &str)] = &[
    ("Indian English", "en-in"),
    ("American", "en-us"),
    ("British", "en-gb"),
    ("Australian", "en-au"),
];
const ESPEAK_DEFAULT: &str = "en-us";

/// Resolve an accent tag to the platform's voice identifier.
pub fn resolve(accent: &str, platform: Platform) -> &'static str {
    let (table, default) = match platform {
        Platform::MacOs => (MAC_VOICES, MAC_DEFAULT),
        Platform::Linux => (ESPEAK_VOICES, ESPEAK_DEFAULT),
    };

    table
        .iter()
        .find(|(tag, _)| *tag == accent)
        .map(|(_, voice)| *voice)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_accents_macos() {
        assert_eq!(resolve("Indian English", Platform::MacOs), "Veena");
        assert_eq!(resolve("American", Platform::MacOs), "Alex");
        assert_eq!(resolve("British", Platform::MacOs), "Daniel");
        assert_eq!(resolve("Australian", Platform::MacOs), "Karen");
    }

    #[test]
    fn test_known_accents_espeak() {
        assert_eq!(resolve("Indian English", Platform::Linux), "en-in");
        assert_eq!(resolve("British", Platform::Linux), "en-gb");
    }

    #[test]
    fn test_unknown_accent_falls_back_to_default() {
        assert_eq!(resolve("Martian", Platform::MacOs), "Alex");
        assert_eq!(resolve("Martian", Platform::Linux), "en-us");
        assert_eq!(resolve("default", Platform::MacOs), "Alex");
        assert_eq!(resolve("", Platform::Linux), "en-us");
    }
}
