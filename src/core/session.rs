//! Per-call recognition session
//!
//! A [`RecognitionSession`] owns the mutable decode state for exactly one
//! call and enforces its lifecycle: `Created` → `Streaming` → `Finalized`,
//! with finalize legal exactly once. The session is created inside the call
//! handler's scope and never shared; dropping it on any exit path releases
//! the engine state it owns.

use std::time::{Duration, Instant};

use super::engine::{DecodeStream, DecoderEngine, Hypothesis};
use crate::errors::{RecognizeError, RecognizeResult};

/// Lifecycle tag for a session. `Finalized` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Streaming,
    Finalized,
}

/// One call's isolated decode state plus its lifecycle
pub struct RecognitionSession {
    stream: Box<dyn DecodeStream>,
    state: SessionState,
    created_at: Instant,
    first_chunk_at: Option<Instant>,
    finalized_at: Option<Instant>,
}

impl RecognitionSession {
    /// Bind a fresh session to the shared engine.
    ///
    /// Fails with a decode error when the engine cannot hand out per-call
    /// state; the call is aborted before any chunk is read.
    pub fn start(engine: &dyn DecoderEngine) -> RecognizeResult<Self> {
        let stream = engine.start_stream()?;
        Ok(Self {
            stream,
            state: SessionState::Created,
            created_at: Instant::now(),
            first_chunk_at: None,
            finalized_at: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ingest one audio chunk, in arrival order.
    ///
    /// Legal in `Created` or `Streaming`. A decode failure leaves the session
    /// unusable; callers abandon it and surface the error.
    pub fn feed(&mut self, chunk: &[u8]) -> RecognizeResult<()> {
        match self.state {
            SessionState::Finalized => {
                return Err(RecognizeError::InvalidState("feed after finalize"));
            }
            SessionState::Created => {
                self.first_chunk_at = Some(Instant::now());
                self.state = SessionState::Streaming;
            }
            SessionState::Streaming => {}
        }

        self.stream.feed(chunk)?;
        Ok(())
    }

    /// Close ingestion and extract up to `max_alternatives` hypotheses.
    ///
    /// Legal exactly once, from `Created` or `Streaming` — a zero-chunk call
    /// is legitimate and yields whatever the engine produces for empty input.
    /// Hypothesis order and scores are the engine's; the session only caps
    /// the list length.
    pub fn finalize(&mut self, max_alternatives: u32) -> RecognizeResult<Vec<Hypothesis>> {
        if self.state == SessionState::Finalized {
            return Err(RecognizeError::InvalidState("finalize called twice"));
        }
        self.state = SessionState::Finalized;

        let n_best = max_alternatives.max(1);
        let mut hypotheses = self.stream.finalize(n_best)?;
        hypotheses.truncate(n_best as usize);

        self.finalized_at = Some(Instant::now());
        Ok(hypotheses)
    }

    /// Wall-clock time from the first chunk (or session creation when no
    /// chunk ever arrived) to finalize completion. Reported for operational
    /// visibility; not part of the protocol response.
    pub fn elapsed(&self) -> Duration {
        let start = self.first_chunk_at.unwrap_or(self.created_at);
        match self.finalized_at {
            Some(end) => end.duration_since(start),
            None => start.elapsed(),
        }
    }
}
