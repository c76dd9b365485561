pub mod handlers;
mod judge;
mod kitchen;
mod lobby;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::protocol::{ClientMessage, ServerMessage, PROTOCOL_VERSION};
use crate::state::AppState;
use handlers::Connection;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!("WebSocket connection request");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

fn countdown(period: Duration) -> Interval {
    // First tick fires one full period after the challenge starts
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Arm the ticker while a challenge runs, drop it otherwise
fn sync_ticker(ticker: &mut Option<Interval>, conn: &Connection, period: Duration) {
    match (conn.needs_ticks(), ticker.is_some()) {
        (true, false) => *ticker = Some(countdown(period)),
        (false, true) => *ticker = None,
        _ => {}
    }
}

/// Handle individual WebSocket connection.
///
/// The connection task is the only owner of its session, so client messages
/// and countdown ticks are serialized by this loop.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut conn = Connection::new();
    let mut ticker: Option<Interval> = None;

    let welcome = ServerMessage::Welcome {
        protocol: PROTOCOL_VERSION.to_string(),
        server_now: chrono::Utc::now().to_rfc3339(),
    };

    if let Ok(msg) = serde_json::to_string(&welcome) {
        if sender.send(Message::Text(msg.into())).await.is_err() {
            tracing::error!("Failed to send welcome message");
            return;
        }
    }

    loop {
        sync_ticker(&mut ticker, &conn, state.tick_interval);

        tokio::select! {
            // Countdown ticks, only while a challenge is active
            _ = async {
                match ticker.as_mut() {
                    Some(t) => {
                        t.tick().await;
                    }
                    None => std::future::pending::<()>().await,
                }
            } => {
                if let Some(msg) = handlers::handle_tick(&mut conn) {
                    if let Ok(json) = serde_json::to_string(&msg) {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                }
            }

            // Handle client messages
            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received message: {}", text);

                        let response = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => {
                                handlers::handle_message(client_msg, &mut conn, &state).await
                            }
                            Err(e) => {
                                tracing::error!("Failed to parse client message: {}", e);
                                Some(ServerMessage::error(
                                    "PARSE_ERROR",
                                    format!("Invalid message format: {}", e),
                                ))
                            }
                        };

                        if let Some(response) = response {
                            if let Ok(json) = serde_json::to_string(&response) {
                                if sender.send(Message::Text(json.into())).await.is_err() {
                                    tracing::error!("Failed to send response");
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("WebSocket closed");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    // Closing the socket is the same hard cancellation as leaving the room
    if let Some(session) = conn.session.take() {
        tracing::info!(room = %session.room_id(), "Discarding session on disconnect");
    }
    if let Some(id) = conn.participant_id.take() {
        state.sign_out(&id).await;
    }
    tracing::info!("WebSocket connection closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Session;

    #[tokio::test]
    async fn test_sync_ticker_follows_session_phase() {
        let period = Duration::from_millis(10);
        let mut conn = Connection::new();
        let mut ticker = None;

        sync_ticker(&mut ticker, &conn, period);
        assert!(ticker.is_none(), "no session, no ticks");

        let mut session = Session::new("R1", false);
        session
            .start_challenge(crate::catalog::ChallengeCatalog::builtin().list()[0].clone())
            .unwrap();
        conn.session = Some(session);
        sync_ticker(&mut ticker, &conn, period);
        assert!(ticker.is_some());

        conn.session.as_mut().unwrap().force_finalize();
        sync_ticker(&mut ticker, &conn, period);
        assert!(ticker.is_none(), "idle sessions are not ticked");
    }
}
