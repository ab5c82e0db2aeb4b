//! Recognition WebSocket handler
//!
//! The call dispatcher: accepts one connection, binds exactly one
//! [`RecognitionSession`] to the shared engine, drives chunk ingestion in
//! arrival order, finalizes on the client's end-of-stream signal and emits
//! the single response. The session lives in this handler's scope, so its
//! decode state is released on every exit path.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::engine::Hypothesis;
use crate::core::session::RecognitionSession;
use crate::errors::{RecognizeError, RecognizeResult};
use crate::state::AppState;

use super::messages::{
    DEFAULT_MAX_ALTERNATIVES, RecognizeIncomingMessage, RecognizeOutgoingMessage,
    RecognitionConfig,
};

/// Maximum WebSocket frame size (10 MB)
const MAX_WS_FRAME_SIZE: usize = 10 * 1024 * 1024;

/// Maximum WebSocket message size (10 MB)
const MAX_WS_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// Recognition WebSocket handler
///
/// Upgrades the HTTP connection to a WebSocket carrying one client-streaming
/// recognition call.
pub async fn recognize_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    debug!("Recognition WebSocket connection upgrade requested");

    ws.max_frame_size(MAX_WS_FRAME_SIZE)
        .max_message_size(MAX_WS_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_recognize_socket(socket, state))
}

/// What a completed ingestion loop hands to finalize/response emission
struct CallOutcome {
    uuid: String,
    hypotheses: Vec<Hypothesis>,
}

/// Handle one recognition call end to end
async fn handle_recognize_socket(mut socket: WebSocket, state: Arc<AppState>) {
    // Server-side call id; the client-supplied uuid is logged alongside it
    // once known.
    let call_id = Uuid::new_v4();

    // Fresh per-call decode state, never pooled or reused across calls.
    let mut session = match RecognitionSession::start(state.engine.as_ref()) {
        Ok(session) => session,
        Err(err) => {
            warn!(call_id = %call_id, error = %err, "Failed to create recognition session");
            send_error(&mut socket, &err).await;
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    match drive_call(&mut socket, &mut session).await {
        Ok(outcome) => {
            info!(
                call_id = %call_id,
                uuid = %outcome.uuid,
                alternatives = outcome.hypotheses.len(),
                elapsed_ms = session.elapsed().as_millis() as u64,
                "request resolved"
            );
            send_message(
                &mut socket,
                &RecognizeOutgoingMessage::from_hypotheses(outcome.hypotheses),
            )
            .await;
        }
        Err(err) => {
            warn!(call_id = %call_id, error = %err, code = err.code(), "Recognition call aborted");
            // Best effort; the peer may already be gone on transport errors.
            send_error(&mut socket, &err).await;
        }
    }

    let _ = socket.send(Message::Close(None)).await;
    // `session` drops here, releasing the call's decode state.
}

/// Read inbound messages sequentially until end-of-stream, then finalize.
///
/// The config and uuid carried on the last received message are the ones
/// used for finalize; a call with zero messages finalizes with
/// `max_alternatives = 1`.
async fn drive_call(
    socket: &mut WebSocket,
    session: &mut RecognitionSession,
) -> RecognizeResult<CallOutcome> {
    let mut last_config: Option<RecognitionConfig> = None;
    let mut last_uuid: Option<String> = None;

    loop {
        match socket.recv().await {
            Some(Ok(Message::Text(text))) => {
                let msg: RecognizeIncomingMessage = serde_json::from_str(&text)
                    .map_err(|e| RecognizeError::Transport(format!("invalid message: {e}")))?;

                match msg {
                    RecognizeIncomingMessage::Audio(request) => {
                        if let Some(config) = request.config {
                            last_config = Some(config);
                        }
                        if let Some(uuid) = request.uuid {
                            last_uuid = Some(uuid);
                        }
                        if let Some(audio) = request.audio {
                            let chunk = BASE64.decode(audio.content.as_bytes()).map_err(|e| {
                                RecognizeError::Transport(format!("invalid audio content: {e}"))
                            })?;
                            session.feed(&chunk)?;
                        }
                    }
                    RecognizeIncomingMessage::EndOfStream => break,
                }
            }
            // Bare binary frames are accepted as audio chunks, keeping the
            // last-seen config and uuid.
            Some(Ok(Message::Binary(chunk))) => {
                session.feed(&chunk)?;
            }
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
            Some(Ok(Message::Close(_))) | None => {
                return Err(RecognizeError::Transport(
                    "stream closed before end-of-stream".to_string(),
                ));
            }
            Some(Err(e)) => {
                return Err(RecognizeError::Transport(e.to_string()));
            }
        }
    }

    let max_alternatives = last_config
        .map(|config| config.max_alternatives)
        .unwrap_or(DEFAULT_MAX_ALTERNATIVES)
        .max(1);

    let hypotheses = session.finalize(max_alternatives)?;

    Ok(CallOutcome {
        uuid: last_uuid.unwrap_or_default(),
        hypotheses,
    })
}

/// Serialize and send one outgoing message; failures are logged, not fatal
async fn send_message(socket: &mut WebSocket, message: &RecognizeOutgoingMessage) {
    match serde_json::to_string(message) {
        Ok(json) => {
            if let Err(e) = socket.send(Message::Text(json.into())).await {
                debug!(error = %e, "Failed to send WebSocket message");
            }
        }
        Err(e) => {
            warn!(error = %e, "Failed to serialize outgoing message");
        }
    }
}

async fn send_error(socket: &mut WebSocket, err: &RecognizeError) {
    send_message(
        socket,
        &RecognizeOutgoingMessage::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        },
    )
    .await;
}
