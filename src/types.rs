use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type ParticipantId = String;
pub type RoomId = String;
pub type ChallengeId = String;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Chef,
    Contestant,
    Judge,
    Spectator,
    #[default]
    Unassigned,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub role: Role,
    /// Chat filter on, voice off by default
    pub family_mode: bool,
    /// Two-letter badge derived from the display name
    pub avatar: String,
}

/// The two fixed sides of every session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::A, TeamId::B];

    pub fn display_name(self) -> &'static str {
        match self {
            TeamId::A => "Team Basil",
            TeamId::B => "Team Thyme",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            TeamId::A => 0,
            TeamId::B => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub chefs: Vec<Participant>,
    pub contestants: Vec<Participant>,
    /// Cumulative across finalized challenges, never decreases
    pub score: u32,
}

impl Team {
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            chefs: Vec::new(),
            contestants: Vec::new(),
            score: 0,
        }
    }

    pub fn has_member(&self, participant_id: &str) -> bool {
        self.chefs
            .iter()
            .chain(self.contestants.iter())
            .any(|p| p.id == participant_id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeCategory {
    Dish,
    Buffet,
    Banquet,
    Hospitality,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkillTag {
    Prep,
    Cook,
    Plating,
    Service,
    Management,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Challenge {
    pub id: ChallengeId,
    pub title: String,
    pub category: ChallengeCategory,
    pub skill: SkillTag,
    pub minutes: u32,
    pub points: u32,
    pub description: String,
}

impl Challenge {
    pub fn duration_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60)
    }
}

/// One judge's submission for a team; each category is expected in 0..=5.
/// Wire values outside the `i64` range saturate instead of failing to parse.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct JudgeVote {
    #[serde(deserialize_with = "saturating_i64")]
    pub taste: i64,
    #[serde(deserialize_with = "saturating_i64")]
    pub technique: i64,
    #[serde(deserialize_with = "saturating_i64")]
    pub timing: i64,
    #[serde(deserialize_with = "saturating_i64")]
    pub presentation: i64,
}

impl JudgeVote {
    pub fn uniform(value: i64) -> Self {
        Self {
            taste: value,
            technique: value,
            timing: value,
            presentation: value,
        }
    }
}

fn saturating_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct SaturatingI64;

    impl serde::de::Visitor<'_> for SaturatingI64 {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a number")
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<i64, E> {
            // `as` saturates at the bounds and maps NaN to 0
            Ok(v as i64)
        }
    }

    deserializer.deserialize_any(SaturatingI64)
}

/// Per-team category totals for the running challenge
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteTally {
    pub taste: u32,
    pub technique: u32,
    pub timing: u32,
    pub presentation: u32,
}

impl VoteTally {
    pub fn sum(&self) -> u32 {
        self.taste
            .saturating_add(self.technique)
            .saturating_add(self.timing)
            .saturating_add(self.presentation)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Idle,
    Active,
    Finalizing,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rewards {
    pub coins: u32,
    pub gifts: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FinalizeReason {
    /// Countdown reached zero on a tick
    Expired,
    /// Operator ended the challenge early
    Forced,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalizeOutcome {
    pub challenge_id: ChallengeId,
    pub reason: FinalizeReason,
    pub score_a: u32,
    pub score_b: u32,
    pub rewards: Rewards,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TallyView {
    pub team: TeamId,
    pub tally: VoteTally,
    pub cheers: u32,
}

/// Read-only view of a session for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub room_id: RoomId,
    pub shamony: bool,
    pub phase: SessionPhase,
    pub challenge: Option<Challenge>,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    /// Remaining time as m:ss
    pub clock: String,
    pub teams: Vec<Team>,
    pub observers: Vec<Participant>,
    pub tallies: Vec<TallyView>,
    pub combined_score: u32,
    pub coins: u32,
    pub gifts: u32,
}
