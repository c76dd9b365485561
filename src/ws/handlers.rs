//! WebSocket message dispatch
//!
//! Each connection carries its own `Connection` context. Messages that need
//! a signed-in participant or a joined room are checked here, then
//! dispatched to the concern-specific handler modules.

use crate::engine::{Session, SessionError};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::ParticipantId;
use std::sync::Arc;

use super::{judge, kitchen, lobby};

/// Per-connection state: who is connected and the room session they own
#[derive(Debug, Default)]
pub struct Connection {
    pub participant_id: Option<ParticipantId>,
    pub session: Option<Session>,
}

impl Connection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The countdown only needs driving while a challenge runs
    pub fn needs_ticks(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_active)
    }
}

/// Macro to fetch the joined session or return early with an error
macro_rules! require_session {
    ($conn:expr) => {
        match $conn.session.as_mut() {
            Some(session) => session,
            None => {
                return Some(ServerMessage::error(
                    "NO_ROOM",
                    "Join a room before playing",
                ))
            }
        }
    };
}

/// Engine guards are silent: log and answer with the unchanged state
pub(super) fn session_reply(session: &Session, result: Result<(), SessionError>) -> ServerMessage {
    match result {
        Ok(()) => {}
        Err(SessionError::InvalidTransition { operation, phase }) => {
            tracing::debug!("Guarded {} in phase {:?}", operation, phase);
        }
        Err(e @ SessionError::UnknownChallenge(_)) => {
            return ServerMessage::error("UNKNOWN_CHALLENGE", e.to_string());
        }
    }
    ServerMessage::SessionState {
        snapshot: session.snapshot(),
    }
}

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    conn: &mut Connection,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        // Sign-in and lobby
        ClientMessage::SignIn {
            display_name,
            family_mode,
        } => lobby::handle_sign_in(state, conn, display_name, family_mode).await,

        ClientMessage::SignOut => lobby::handle_sign_out(state, conn).await,

        ClientMessage::JoinRoom {
            role,
            room_code,
            shamony,
        } => lobby::handle_join_room(state, conn, role, room_code, shamony).await,

        ClientMessage::LeaveRoom => lobby::handle_leave_room(conn),

        ClientMessage::ListChallenges => Some(ServerMessage::Challenges {
            list: state.catalog.list().to_vec(),
        }),

        // Match operations (require a joined room)
        ClientMessage::StartChallenge { challenge_id } => {
            let session = require_session!(conn);
            kitchen::handle_start_challenge(state, session, &challenge_id)
        }

        ClientMessage::AdjustTimer { delta_seconds } => {
            let session = require_session!(conn);
            kitchen::handle_adjust_timer(session, delta_seconds)
        }

        ClientMessage::ForceFinalize => {
            let session = require_session!(conn);
            kitchen::handle_force_finalize(session)
        }

        ClientMessage::RequestState => {
            let session = require_session!(conn);
            Some(ServerMessage::SessionState {
                snapshot: session.snapshot(),
            })
        }

        ClientMessage::SubmitVote { team, vote } => {
            let session = require_session!(conn);
            judge::handle_submit_vote(session, team, vote)
        }

        ClientMessage::Cheer { team } => {
            let session = require_session!(conn);
            judge::handle_cheer(session, team)
        }
    }
}

/// Drive one countdown tick for this connection's session
pub fn handle_tick(conn: &mut Connection) -> Option<ServerMessage> {
    let session = conn.session.as_mut()?;
    kitchen::handle_tick(session)
}
