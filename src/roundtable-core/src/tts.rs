//! Speech synthesis via the platform's speech command.
//!
//! macOS uses `say` (AIFF output), everything else espeak (WAV). Each call
//! writes a uniquely named new file; nothing is ever mutated after
//! creation, so concurrent calls within a round need no coordination.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::accent::Platform;
use crate::episode::unique_stamp;
use crate::error::RoundtableError;
use crate::orchestrator::SpeechSynthesizer;

/// Synthesizer shelling out to the OS speech command.
pub struct CommandSynthesizer {
    output_dir: PathBuf,
    platform: Platform,
}

impl CommandSynthesizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            platform: Platform::detect(),
        }
    }

    /// Override the detected platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}

/// Audio container extension produced by the platform's speech command.
fn output_extension(platform: Platform) -> &'static str {
    match platform {
        Platform::MacOs => "aiff",
        Platform::Linux => "wav",
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<String, RoundtableError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                RoundtableError::Synthesis(format!("failed to create output dir: {e}"))
            })?;

        let filename = format!("{}.{}", unique_stamp(), output_extension(self.platform));
        let path = self.output_dir.join(filename);

        let status = match self.platform {
            Platform::MacOs => {
                Command::new("say")
                    .arg("-v")
                    .arg(voice)
                    .arg("-o")
                    .arg(&path)
                    .arg(text)
                    .status()
                    .await
            }
            Platform::Linux => {
                Command::new("espeak")
                    .arg("-v")
                    .arg(voice)
                    .arg("-w")
                    .arg(&path)
                    .arg(text)
                    .status()
                    .await
            }
        }
        .map_err(|e| RoundtableError::Synthesis(format!("failed to run speech command: {e}")))?;

        if !status.success() {
            return Err(RoundtableError::Synthesis(format!(
                "speech command exited with {status}"
            )));
        }

        debug!(voice, path = %path.display(), "synthesized audio");
        Ok(path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_format_varies_by_platform() {
        assert_eq!(output_extension(Platform::MacOs), "aiff");
        assert_eq!(output_extension(Platform::Linux), "wav");
    }

    #[test]
    fn test_platform_override() {
        let synth = CommandSynthesizer::new("tts_output").with_platform(Platform::MacOs);
        assert_eq!(synth.platform, Platform::MacOs);
    }
}
