//! Vosk decoder backend
//!
//! Wraps the Vosk (libkaldi) streaming recognizer. One [`vosk::Model`] is
//! loaded at startup and shared read-only by every call; each call gets its
//! own [`vosk::Recognizer`], which carries the feature pipeline, adaptation
//! and lattice search state for that call alone.

use vosk::{CompleteResult, DecodingState, Model, Recognizer};

use super::audio::chunk_to_samples;
use super::{DecodeStream, DecoderEngine, EngineError, Hypothesis};
use crate::config::EngineConfig;

/// Shared Vosk model plus the audio parameters recognizers are created with
pub struct VoskEngine {
    model: Model,
    sample_rate: f32,
}

impl VoskEngine {
    /// Load the model from the configured path. Expensive; done once.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let path = config.model_path.to_string_lossy();
        let model = Model::new(path.as_ref())
            .ok_or_else(|| EngineError::ModelLoad(format!("cannot load model from {path}")))?;

        Ok(Self {
            model,
            sample_rate: config.sample_rate as f32,
        })
    }
}

impl DecoderEngine for VoskEngine {
    fn name(&self) -> &'static str {
        "vosk"
    }

    fn start_stream(&self) -> Result<Box<dyn DecodeStream>, EngineError> {
        let recognizer = Recognizer::new(&self.model, self.sample_rate).ok_or_else(|| {
            EngineError::StreamInit("failed to create recognizer for call".to_string())
        })?;

        Ok(Box::new(VoskStream { recognizer }))
    }
}

/// Per-call recognizer state; dropped (and freed) when the call ends
struct VoskStream {
    recognizer: Recognizer,
}

impl DecodeStream for VoskStream {
    fn feed(&mut self, chunk: &[u8]) -> Result<(), EngineError> {
        let samples = chunk_to_samples(chunk)?;
        if samples.is_empty() {
            return Ok(());
        }
        match self.recognizer.accept_waveform(&samples) {
            Ok(DecodingState::Failed) => Err(EngineError::Decode(
                "recognizer rejected waveform".to_string(),
            )),
            Ok(_) => Ok(()),
            Err(e) => Err(EngineError::Decode(format!("accept_waveform: {e}"))),
        }
    }

    fn finalize(&mut self, max_alternatives: u32) -> Result<Vec<Hypothesis>, EngineError> {
        // Width must be set before the final result is pulled; Vosk then
        // returns the multiple-alternatives result shape.
        let n_best = max_alternatives.min(u16::MAX as u32) as u16;
        self.recognizer.set_max_alternatives(n_best);

        let hypotheses = match self.recognizer.final_result() {
            CompleteResult::Multiple(result) => result
                .alternatives
                .into_iter()
                .map(|alt| Hypothesis {
                    transcript: alt.text.to_string(),
                    confidence: alt.confidence,
                })
                .collect(),
            CompleteResult::Single(result) => vec![Hypothesis {
                transcript: result.text.to_string(),
                confidence: 1.0,
            }],
        };

        Ok(hypotheses)
    }
}
