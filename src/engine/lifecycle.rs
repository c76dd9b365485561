use super::reward::compute_rewards;
use super::{Session, SessionError};
use crate::catalog::ChallengeCatalog;
use crate::types::*;

/// What a single countdown tick did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No challenge running; nothing changed
    Ignored,
    /// Countdown advanced, challenge still running
    Running { remaining_seconds: u32 },
    Finalized(FinalizeOutcome),
}

impl Session {
    /// Start a challenge. Only valid while idle; an in-progress challenge is
    /// never overwritten.
    pub fn start_challenge(&mut self, challenge: Challenge) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Idle {
            return Err(self.invalid("start_challenge"));
        }

        self.timer.start(challenge.duration_seconds());
        for team in TeamId::ALL {
            self.votes.reset(team);
        }

        tracing::info!(
            room = %self.room_id,
            challenge = %challenge.id,
            seconds = challenge.duration_seconds(),
            "Challenge started: {}",
            challenge.title
        );

        self.challenge = Some(challenge);
        self.phase = SessionPhase::Active;
        Ok(())
    }

    /// Look up a challenge in the catalog and start it
    pub fn start_challenge_by_id(
        &mut self,
        catalog: &ChallengeCatalog,
        challenge_id: &str,
    ) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Idle {
            return Err(self.invalid("start_challenge"));
        }

        let challenge = catalog
            .get(challenge_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownChallenge(challenge_id.to_string()))?;
        self.start_challenge(challenge)
    }

    pub fn submit_vote(&mut self, team: TeamId, vote: &JudgeVote) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(self.invalid("submit_vote"));
        }

        self.votes.submit(team, vote);
        tracing::debug!(
            room = %self.room_id,
            ?team,
            total = self.votes.sum(team),
            "Judge vote recorded"
        );
        Ok(())
    }

    /// Spectator vote for a team; shown to the audience, never scored
    pub fn cheer(&mut self, team: TeamId) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(self.invalid("cheer"));
        }

        self.votes.cheer(team);
        Ok(())
    }

    /// Shift the countdown. Driving it to zero does not finalize; the next
    /// tick observes the expiry.
    pub fn adjust_timer(&mut self, delta_seconds: i64) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(self.invalid("adjust_timer"));
        }

        self.timer.adjust(delta_seconds);
        tracing::debug!(
            room = %self.room_id,
            delta_seconds,
            remaining = self.timer.remaining(),
            "Timer adjusted"
        );
        Ok(())
    }

    /// Advance the countdown by one second, finalizing on expiry.
    /// Ticks outside of an active challenge are ignored.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Ignored;
        }

        if self.timer.tick() {
            tracing::info!(room = %self.room_id, "Challenge timer expired");
            if let Some(outcome) = self.finalize(FinalizeReason::Expired) {
                return TickOutcome::Finalized(outcome);
            }
        }
        TickOutcome::Running {
            remaining_seconds: self.timer.remaining(),
        }
    }

    /// End the running challenge now, whatever time is left.
    /// A no-op while idle.
    pub fn force_finalize(&mut self) -> Option<FinalizeOutcome> {
        self.finalize(FinalizeReason::Forced)
    }

    fn finalize(&mut self, reason: FinalizeReason) -> Option<FinalizeOutcome> {
        if !self.is_active() {
            tracing::debug!(room = %self.room_id, "Finalize ignored, no active challenge");
            return None;
        }
        self.phase = SessionPhase::Finalizing;

        let score_a = self.votes.sum(TeamId::A);
        let score_b = self.votes.sum(TeamId::B);
        let team_a = self.team_mut(TeamId::A);
        team_a.score = team_a.score.saturating_add(score_a);
        let team_b = self.team_mut(TeamId::B);
        team_b.score = team_b.score.saturating_add(score_b);

        let rewards = compute_rewards(score_a, score_b);
        self.coins = self.coins.saturating_add(rewards.coins);
        self.gifts = self.gifts.saturating_add(rewards.gifts);

        let challenge_id = self
            .challenge
            .take()
            .map(|c| c.id)
            .unwrap_or_default();
        self.timer.reset();
        self.phase = SessionPhase::Idle;

        tracing::info!(
            room = %self.room_id,
            challenge = %challenge_id,
            ?reason,
            score_a,
            score_b,
            coins = rewards.coins,
            gifts = rewards.gifts,
            "Challenge finalized"
        );

        Some(FinalizeOutcome {
            challenge_id,
            reason,
            score_a,
            score_b,
            rewards,
        })
    }
}
