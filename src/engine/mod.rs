//! Match session engine
//!
//! A `Session` is one room's live match state. It is purely reactive: the
//! host pushes operations and once-per-second ticks into it and renders the
//! resulting snapshot. Nothing here does I/O or keeps global state.

mod lifecycle;
mod roster;
pub mod reward;
pub mod tally;
pub mod timer;

pub use lifecycle::TickOutcome;
pub use roster::RosterPlacement;

use crate::config::SessionConfig;
use crate::types::*;
use tally::VoteAggregator;
use thiserror::Error;
use timer::Timer;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Operation not permitted in the current phase. Always recoverable.
    #[error("{operation} is not allowed while {phase:?}")]
    InvalidTransition {
        operation: &'static str,
        phase: SessionPhase,
    },

    #[error("unknown challenge: {0}")]
    UnknownChallenge(ChallengeId),
}

#[derive(Debug, Clone)]
pub struct Session {
    room_id: RoomId,
    shamony: bool,
    phase: SessionPhase,
    teams: [Team; 2],
    /// Judges and spectators act on the whole session, not a side
    observers: Vec<Participant>,
    challenge: Option<Challenge>,
    timer: Timer,
    votes: VoteAggregator,
    coins: u32,
    gifts: u32,
}

impl Session {
    /// Create an idle session with default engine settings
    pub fn new(room_id: impl Into<RoomId>, shamony: bool) -> Self {
        Self::with_config(room_id, shamony, &SessionConfig::default())
    }

    pub fn with_config(room_id: impl Into<RoomId>, shamony: bool, config: &SessionConfig) -> Self {
        Self {
            room_id: room_id.into(),
            shamony,
            phase: SessionPhase::Idle,
            teams: [Team::new(TeamId::A), Team::new(TeamId::B)],
            observers: Vec::new(),
            challenge: None,
            timer: Timer::default(),
            votes: VoteAggregator::new(config.vote_ceiling, config.max_vote_delta),
            coins: 0,
            gifts: 0,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Cosmetic multi-team flag, no effect on scoring
    pub fn is_shamony(&self) -> bool {
        self.shamony
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    fn team_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id.index()]
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn observers(&self) -> &[Participant] {
        &self.observers
    }

    pub fn active_challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn tally(&self, team: TeamId) -> &VoteTally {
        self.votes.tally(team)
    }

    pub fn cheers(&self, team: TeamId) -> u32 {
        self.votes.cheers(team)
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn gifts(&self) -> u32 {
        self.gifts
    }

    /// Sum of both teams' cumulative scores
    pub fn combined_score(&self) -> u32 {
        self.teams
            .iter()
            .fold(0u32, |total, t| total.saturating_add(t.score))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            room_id: self.room_id.clone(),
            shamony: self.shamony,
            phase: self.phase,
            challenge: self.challenge.clone(),
            remaining_seconds: self.timer.remaining(),
            total_seconds: self.timer.total(),
            clock: self.timer.clock(),
            teams: self.teams.to_vec(),
            observers: self.observers.clone(),
            tallies: TeamId::ALL
                .iter()
                .map(|&team| TallyView {
                    team,
                    tally: *self.votes.tally(team),
                    cheers: self.votes.cheers(team),
                })
                .collect(),
            combined_score: self.combined_score(),
            coins: self.coins,
            gifts: self.gifts,
        }
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        tracing::debug!(
            room = %self.room_id,
            phase = ?self.phase,
            "Ignoring {} outside of an active challenge",
            operation
        );
        SessionError::InvalidTransition {
            operation,
            phase: self.phase,
        }
    }
}
