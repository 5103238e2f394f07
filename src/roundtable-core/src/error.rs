//! Error types for the roundtable engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoundtableError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("completion returned unparsable dialogue:\n{raw}")]
    UnparsableResponse { raw: String },

    #[error("completion call failed: {0}")]
    CompletionCall(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("configuration error: {0}")]
    Config(String),
}
