use crate::engine::RosterPlacement;
use crate::types::*;
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "1.0";

fn default_family_mode() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    SignIn {
        display_name: String,
        #[serde(default = "default_family_mode")]
        family_mode: bool,
    },
    SignOut,
    JoinRoom {
        role: Role,
        #[serde(default)]
        room_code: String,
        #[serde(default)]
        shamony: bool,
    },
    /// Discards the session, including any running challenge
    LeaveRoom,
    ListChallenges,
    StartChallenge {
        challenge_id: ChallengeId,
    },
    SubmitVote {
        team: TeamId,
        vote: JudgeVote,
    },
    /// Spectator vote for a team
    Cheer {
        team: TeamId,
    },
    AdjustTimer {
        delta_seconds: i64,
    },
    ForceFinalize,
    RequestState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        server_now: String,
    },
    SignedIn {
        participant: Participant,
    },
    SignedOut,
    RoomJoined {
        participant: Participant,
        placement: RosterPlacement,
        snapshot: SessionSnapshot,
    },
    RoomLeft {
        room_id: RoomId,
    },
    Challenges {
        list: Vec<Challenge>,
    },
    SessionState {
        snapshot: SessionSnapshot,
    },
    /// Sent on every countdown tick that does not end the challenge
    TimerTick {
        remaining_seconds: u32,
        total_seconds: u32,
        clock: String,
    },
    ChallengeFinalized {
        outcome: FinalizeOutcome,
        snapshot: SessionSnapshot,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl ServerMessage {
    pub fn error(code: &str, msg: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            msg: msg.into(),
        }
    }
}
