//! Sign-in and lobby message handlers

use super::handlers::Connection;
use crate::protocol::ServerMessage;
use crate::state::{AppState, RegistryError};
use crate::types::Role;
use std::sync::Arc;

pub async fn handle_sign_in(
    state: &Arc<AppState>,
    conn: &mut Connection,
    display_name: String,
    family_mode: bool,
) -> Option<ServerMessage> {
    if conn.participant_id.is_some() {
        return Some(ServerMessage::error(
            "ALREADY_SIGNED_IN",
            "Sign out before signing in again",
        ));
    }

    match state.sign_in(&display_name, family_mode).await {
        Ok(participant) => {
            conn.participant_id = Some(participant.id.clone());
            Some(ServerMessage::SignedIn { participant })
        }
        Err(RegistryError::BlankDisplayName) => Some(ServerMessage::error(
            "INVALID_NAME",
            "Display name must not be empty",
        )),
        Err(e) => Some(ServerMessage::error("SIGN_IN_FAILED", e.to_string())),
    }
}

pub async fn handle_sign_out(state: &Arc<AppState>, conn: &mut Connection) -> Option<ServerMessage> {
    // Signing out also leaves the room; its session is dropped unfinalized
    conn.session = None;
    if let Some(id) = conn.participant_id.take() {
        state.sign_out(&id).await;
    }
    Some(ServerMessage::SignedOut)
}

pub async fn handle_join_room(
    state: &Arc<AppState>,
    conn: &mut Connection,
    role: Role,
    room_code: String,
    shamony: bool,
) -> Option<ServerMessage> {
    let Some(participant_id) = conn.participant_id.clone() else {
        return Some(ServerMessage::error("NOT_SIGNED_IN", "Sign in first"));
    };

    if let Some(session) = &conn.session {
        return Some(ServerMessage::error(
            "ALREADY_IN_ROOM",
            format!("Leave room {} first", session.room_id()),
        ));
    }

    match state
        .join_room(&participant_id, role, &room_code, shamony)
        .await
    {
        Ok((session, participant, placement)) => {
            let snapshot = session.snapshot();
            conn.session = Some(session);
            Some(ServerMessage::RoomJoined {
                participant,
                placement,
                snapshot,
            })
        }
        Err(e) => {
            tracing::warn!("Join failed for {}: {}", participant_id, e);
            // The registry entry is gone, so this connection is effectively signed out
            conn.participant_id = None;
            Some(ServerMessage::error("NOT_SIGNED_IN", e.to_string()))
        }
    }
}

pub fn handle_leave_room(conn: &mut Connection) -> Option<ServerMessage> {
    match conn.session.take() {
        Some(session) => {
            if session.is_active() {
                tracing::info!(
                    room = %session.room_id(),
                    "Leaving with a running challenge; votes and timer discarded"
                );
            }
            Some(ServerMessage::RoomLeft {
                room_id: session.room_id().to_string(),
            })
        }
        None => Some(ServerMessage::error("NO_ROOM", "Not in a room")),
    }
}
