//! Judge and spectator voting handlers

use super::handlers::session_reply;
use crate::engine::Session;
use crate::protocol::ServerMessage;
use crate::types::{JudgeVote, TeamId};

pub fn handle_submit_vote(
    session: &mut Session,
    team: TeamId,
    vote: JudgeVote,
) -> Option<ServerMessage> {
    tracing::debug!("Vote for {:?}: {:?}", team, vote);
    let result = session.submit_vote(team, &vote);
    Some(session_reply(session, result))
}

pub fn handle_cheer(session: &mut Session, team: TeamId) -> Option<ServerMessage> {
    let result = session.cheer(team);
    Some(session_reply(session, result))
}
