use super::Session;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Chefs always coach from this side
pub const CHEF_TEAM: TeamId = TeamId::A;
/// Contestants always cook for this side
pub const CONTESTANT_TEAM: TeamId = TeamId::B;

/// Where a joining participant ended up
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RosterPlacement {
    Chef { team: TeamId },
    Contestant { team: TeamId },
    /// Judges, spectators and unassigned participants are not on a team
    Observer,
    /// Already part of this session; nothing changed
    AlreadyJoined,
}

impl Session {
    /// Place a participant by role. Assignment happens once and is never
    /// reversed; a second join of the same participant id is ignored.
    pub fn join_participant(&mut self, participant: &Participant, role: Role) -> RosterPlacement {
        if self.has_participant(&participant.id) {
            tracing::debug!(
                room = %self.room_id,
                participant = %participant.id,
                "Participant already joined"
            );
            return RosterPlacement::AlreadyJoined;
        }

        let mut member = participant.clone();
        member.role = role;

        let placement = match role {
            Role::Chef => {
                self.team_mut(CHEF_TEAM).chefs.push(member);
                RosterPlacement::Chef { team: CHEF_TEAM }
            }
            Role::Contestant => {
                self.team_mut(CONTESTANT_TEAM).contestants.push(member);
                RosterPlacement::Contestant {
                    team: CONTESTANT_TEAM,
                }
            }
            Role::Judge | Role::Spectator | Role::Unassigned => {
                self.observers.push(member);
                RosterPlacement::Observer
            }
        };

        tracing::info!(
            room = %self.room_id,
            participant = %participant.id,
            ?role,
            "Participant joined: {:?}",
            placement
        );
        placement
    }

    pub fn has_participant(&self, participant_id: &str) -> bool {
        self.teams.iter().any(|t| t.has_member(participant_id))
            || self.observers.iter().any(|p| p.id == participant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str, name: &str) -> Participant {
        Participant {
            id: id.to_string(),
            display_name: name.to_string(),
            role: Role::Unassigned,
            family_mode: true,
            avatar: name[..2].to_uppercase(),
        }
    }

    #[test]
    fn test_chefs_and_contestants_land_on_fixed_teams() {
        let mut session = Session::new("R1", false);

        let first = session.join_participant(&participant("p1", "Luna"), Role::Chef);
        let second = session.join_participant(&participant("p2", "Milo"), Role::Chef);
        let third = session.join_participant(&participant("p3", "Ada"), Role::Contestant);

        assert_eq!(first, RosterPlacement::Chef { team: TeamId::A });
        assert_eq!(second, RosterPlacement::Chef { team: TeamId::A });
        assert_eq!(third, RosterPlacement::Contestant { team: TeamId::B });

        let chefs: Vec<_> = session
            .team(TeamId::A)
            .chefs
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(chefs, vec!["p1", "p2"], "chefs keep join order");
        assert!(session.team(TeamId::A).contestants.is_empty());

        let team_b = session.team(TeamId::B);
        assert!(team_b.chefs.is_empty());
        assert_eq!(team_b.contestants.len(), 1);
        assert_eq!(team_b.contestants[0].id, "p3");
        assert_eq!(team_b.contestants[0].role, Role::Contestant);
    }

    #[test]
    fn test_judges_and_spectators_are_not_rostered() {
        let mut session = Session::new("R1", false);

        assert_eq!(
            session.join_participant(&participant("j1", "Judy"), Role::Judge),
            RosterPlacement::Observer
        );
        assert_eq!(
            session.join_participant(&participant("s1", "Sam"), Role::Spectator),
            RosterPlacement::Observer
        );

        for team in TeamId::ALL {
            assert!(session.team(team).chefs.is_empty());
            assert!(session.team(team).contestants.is_empty());
        }
        assert_eq!(session.observers().len(), 2);
        assert_eq!(session.observers()[0].role, Role::Judge);
    }

    #[test]
    fn test_duplicate_join_is_ignored() {
        let mut session = Session::new("R1", false);
        let luna = participant("p1", "Luna");

        session.join_participant(&luna, Role::Chef);
        let again = session.join_participant(&luna, Role::Contestant);

        assert_eq!(again, RosterPlacement::AlreadyJoined);
        assert_eq!(session.team(TeamId::A).chefs.len(), 1);
        assert!(session.team(TeamId::B).contestants.is_empty());
    }
}
