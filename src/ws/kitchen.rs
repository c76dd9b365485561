//! Challenge lifecycle handlers: start, timer control, finalize

use super::handlers::session_reply;
use crate::engine::{Session, TickOutcome};
use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::FinalizeOutcome;
use std::sync::Arc;

fn finalized(session: &Session, outcome: FinalizeOutcome) -> ServerMessage {
    ServerMessage::ChallengeFinalized {
        outcome,
        snapshot: session.snapshot(),
    }
}

pub fn handle_start_challenge(
    state: &Arc<AppState>,
    session: &mut Session,
    challenge_id: &str,
) -> Option<ServerMessage> {
    tracing::info!("Start challenge requested: {}", challenge_id);
    let result = session.start_challenge_by_id(&state.catalog, challenge_id);
    Some(session_reply(session, result))
}

pub fn handle_adjust_timer(session: &mut Session, delta_seconds: i64) -> Option<ServerMessage> {
    let result = session.adjust_timer(delta_seconds);
    Some(session_reply(session, result))
}

pub fn handle_force_finalize(session: &mut Session) -> Option<ServerMessage> {
    match session.force_finalize() {
        Some(outcome) => Some(finalized(session, outcome)),
        // Nothing running: answer with the unchanged state
        None => Some(ServerMessage::SessionState {
            snapshot: session.snapshot(),
        }),
    }
}

pub fn handle_tick(session: &mut Session) -> Option<ServerMessage> {
    match session.tick() {
        TickOutcome::Ignored => None,
        TickOutcome::Finalized(outcome) => Some(finalized(session, outcome)),
        TickOutcome::Running { remaining_seconds } => Some(ServerMessage::TimerTick {
            remaining_seconds,
            total_seconds: session.timer().total(),
            clock: session.timer().clock(),
        }),
    }
}
