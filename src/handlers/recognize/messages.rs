//! Recognition WebSocket message types
//!
//! One call is a client-streaming exchange: the client sends any number of
//! `audio` messages (or bare binary frames), then `end_of_stream`; the server
//! answers with exactly one `result` or one `error` message and closes.

use serde::{Deserialize, Serialize};

use crate::core::engine::Hypothesis;

/// Default n-best width when the client never sent a config
pub const DEFAULT_MAX_ALTERNATIVES: u32 = 1;

// =============================================================================
// Incoming Messages (Client -> Server)
// =============================================================================

/// Incoming WebSocket messages from the client
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum RecognizeIncomingMessage {
    /// One streamed request message: audio segment plus (optional) config
    /// and correlation id. The config/uuid on the last message win.
    #[serde(rename = "audio")]
    Audio(RecognizeRequest),

    /// Clean end-of-stream signal; triggers finalize
    #[serde(rename = "end_of_stream")]
    EndOfStream,
}

/// Body of one streamed request message
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecognizeRequest {
    /// Audio payload for this segment
    #[serde(default)]
    pub audio: Option<RecognitionAudio>,

    /// Recognition configuration; last received value is authoritative
    #[serde(default)]
    pub config: Option<RecognitionConfig>,

    /// Correlation id, used only for logging
    #[serde(default)]
    pub uuid: Option<String>,
}

/// Raw audio bytes for one segment, base64-encoded on the wire
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecognitionAudio {
    pub content: String,
}

/// Recognition configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecognitionConfig {
    /// Maximum number of ranked hypotheses to return (>= 1)
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: u32,
}

fn default_max_alternatives() -> u32 {
    DEFAULT_MAX_ALTERNATIVES
}

// =============================================================================
// Outgoing Messages (Server -> Client)
// =============================================================================

/// Outgoing WebSocket messages to the client
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum RecognizeOutgoingMessage {
    /// The single response for a successful call
    #[serde(rename = "result")]
    Result {
        results: Vec<SpeechRecognitionResult>,
    },

    /// Terminal call-level error status
    #[serde(rename = "error")]
    Error { code: String, message: String },
}

/// One recognition result: ranked alternatives, engine order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeechRecognitionResult {
    pub alternatives: Vec<SpeechRecognitionAlternative>,
}

/// One ranked transcript hypothesis
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeechRecognitionAlternative {
    pub transcript: String,
    pub confidence: f32,
}

impl From<Hypothesis> for SpeechRecognitionAlternative {
    fn from(hyp: Hypothesis) -> Self {
        Self {
            transcript: hyp.transcript,
            confidence: hyp.confidence,
        }
    }
}

impl RecognizeOutgoingMessage {
    /// Build the single result message from finalized hypotheses
    pub fn from_hypotheses(hypotheses: Vec<Hypothesis>) -> Self {
        RecognizeOutgoingMessage::Result {
            results: vec![SpeechRecognitionResult {
                alternatives: hypotheses.into_iter().map(Into::into).collect(),
            }],
        }
    }
}
