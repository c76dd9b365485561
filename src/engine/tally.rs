use crate::types::{JudgeVote, TeamId, VoteTally};

/// Upper bound for a single category total
pub const CATEGORY_CEILING: u32 = 50;
/// Largest delta a single judge submission may add per category
pub const MAX_VOTE_DELTA: u32 = 5;

/// Folds judge submissions into bounded per-team tallies.
///
/// Votes are strictly additive while a challenge runs; there is no undo.
/// Spectator cheers are counted alongside but never feed into scoring.
#[derive(Debug, Clone)]
pub struct VoteAggregator {
    tallies: [VoteTally; 2],
    cheers: [u32; 2],
    ceiling: u32,
    max_delta: u32,
}

impl Default for VoteAggregator {
    fn default() -> Self {
        Self::new(CATEGORY_CEILING, MAX_VOTE_DELTA)
    }
}

impl VoteAggregator {
    pub fn new(ceiling: u32, max_delta: u32) -> Self {
        Self {
            tallies: [VoteTally::default(); 2],
            cheers: [0; 2],
            ceiling,
            max_delta,
        }
    }

    /// Clamp each delta to `0..=max_delta`, then add with a ceiling per category
    pub fn submit(&mut self, team: TeamId, vote: &JudgeVote) {
        let (ceiling, max_delta) = (self.ceiling, self.max_delta);
        let fold = |total: &mut u32, delta: i64| {
            let delta = u32::try_from(delta.max(0))
                .unwrap_or(u32::MAX)
                .min(max_delta);
            *total = total.saturating_add(delta).min(ceiling);
        };

        let tally = &mut self.tallies[team.index()];
        fold(&mut tally.taste, vote.taste);
        fold(&mut tally.technique, vote.technique);
        fold(&mut tally.timing, vote.timing);
        fold(&mut tally.presentation, vote.presentation);
    }

    pub fn cheer(&mut self, team: TeamId) {
        let count = &mut self.cheers[team.index()];
        *count = count.saturating_add(1);
    }

    pub fn reset(&mut self, team: TeamId) {
        self.tallies[team.index()] = VoteTally::default();
        self.cheers[team.index()] = 0;
    }

    pub fn sum(&self, team: TeamId) -> u32 {
        self.tallies[team.index()].sum()
    }

    pub fn tally(&self, team: TeamId) -> &VoteTally {
        &self.tallies[team.index()]
    }

    pub fn cheers(&self, team: TeamId) -> u32 {
        self.cheers[team.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_adds_per_category() {
        let mut votes = VoteAggregator::default();
        votes.submit(
            TeamId::A,
            &JudgeVote {
                taste: 3,
                technique: 4,
                timing: 1,
                presentation: 0,
            },
        );

        let tally = votes.tally(TeamId::A);
        assert_eq!(tally.taste, 3);
        assert_eq!(tally.technique, 4);
        assert_eq!(tally.timing, 1);
        assert_eq!(tally.presentation, 0);
        assert_eq!(votes.sum(TeamId::A), 8);
        assert_eq!(votes.sum(TeamId::B), 0, "other team untouched");
    }

    #[test]
    fn test_categories_clamp_at_ceiling() {
        let mut votes = VoteAggregator::default();
        for _ in 0..11 {
            votes.submit(TeamId::A, &JudgeVote::uniform(5));
        }

        assert_eq!(
            *votes.tally(TeamId::A),
            VoteTally {
                taste: 50,
                technique: 50,
                timing: 50,
                presentation: 50,
            }
        );
        assert_eq!(votes.sum(TeamId::A), 200);
    }

    #[test]
    fn test_out_of_range_deltas_are_clamped() {
        let mut votes = VoteAggregator::default();
        votes.submit(
            TeamId::B,
            &JudgeVote {
                taste: 99,
                technique: -7,
                timing: i64::MAX,
                presentation: i64::MIN,
            },
        );

        let tally = votes.tally(TeamId::B);
        assert_eq!(tally.taste, 5);
        assert_eq!(tally.technique, 0);
        assert_eq!(tally.timing, 5);
        assert_eq!(tally.presentation, 0);
    }

    #[test]
    fn test_tally_stays_bounded_for_mixed_sequences() {
        let mut votes = VoteAggregator::default();
        let inputs = [-3, 0, 1, 2, 5, 6, 40, -100, 4, 3];

        for round in 0..200 {
            let pick = |offset: usize| inputs[(round + offset) % inputs.len()];
            let team = if round % 3 == 0 { TeamId::B } else { TeamId::A };
            votes.submit(
                team,
                &JudgeVote {
                    taste: pick(0),
                    technique: pick(1),
                    timing: pick(2),
                    presentation: pick(3),
                },
            );

            for team in TeamId::ALL {
                let t = votes.tally(team);
                for value in [t.taste, t.technique, t.timing, t.presentation] {
                    assert!(value <= CATEGORY_CEILING);
                }
            }
        }
    }

    #[test]
    fn test_reset_zeroes_team_only() {
        let mut votes = VoteAggregator::default();
        votes.submit(TeamId::A, &JudgeVote::uniform(2));
        votes.submit(TeamId::B, &JudgeVote::uniform(2));
        votes.cheer(TeamId::A);

        votes.reset(TeamId::A);

        assert_eq!(votes.sum(TeamId::A), 0);
        assert_eq!(votes.cheers(TeamId::A), 0);
        assert_eq!(votes.sum(TeamId::B), 8);
    }

    #[test]
    fn test_cheers_do_not_touch_tally() {
        let mut votes = VoteAggregator::default();
        votes.cheer(TeamId::B);
        votes.cheer(TeamId::B);

        assert_eq!(votes.cheers(TeamId::B), 2);
        assert_eq!(votes.sum(TeamId::B), 0);
    }
}
