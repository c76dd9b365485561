use super::{AppState, RegistryError};
use crate::engine::{RosterPlacement, Session};
use crate::types::*;

/// Trimmed room code, or the configured default when left blank
pub fn resolve_room_code(room_code: &str, default_code: &str) -> RoomId {
    let trimmed = room_code.trim();
    if trimmed.is_empty() {
        default_code.to_string()
    } else {
        trimmed.to_string()
    }
}

impl AppState {
    /// Join a room from the lobby: fix the participant's role, create the
    /// room's session and place the participant on its roster.
    pub async fn join_room(
        &self,
        participant_id: &str,
        role: Role,
        room_code: &str,
        shamony: bool,
    ) -> Result<(Session, Participant, RosterPlacement), RegistryError> {
        let participant = self
            .participants
            .write()
            .await
            .assign_role(participant_id, role)?;

        let room_id = resolve_room_code(room_code, &self.session_config.default_room_code);
        let mut session = Session::with_config(room_id, shamony, &self.session_config);
        let placement = session.join_participant(&participant, role);

        tracing::info!(
            participant = %participant.id,
            room = %session.room_id(),
            shamony,
            "Joined room"
        );
        Ok((session, participant, placement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_room_code() {
        assert_eq!(resolve_room_code("", "KITCHEN-101"), "KITCHEN-101");
        assert_eq!(resolve_room_code("   ", "KITCHEN-101"), "KITCHEN-101");
        assert_eq!(resolve_room_code(" OVEN-7 ", "KITCHEN-101"), "OVEN-7");
    }

    #[tokio::test]
    async fn test_join_room_as_chef() {
        let state = AppState::new();
        let luna = state.sign_in("Luna", true).await.unwrap();

        let (session, participant, placement) =
            state.join_room(&luna.id, Role::Chef, "", true).await.unwrap();

        assert_eq!(session.room_id(), "KITCHEN-101");
        assert!(session.is_shamony());
        assert_eq!(participant.role, Role::Chef);
        assert_eq!(placement, RosterPlacement::Chef { team: TeamId::A });
        assert_eq!(session.team(TeamId::A).chefs[0].id, luna.id);

        let stored = state.get_participant(&luna.id).await.unwrap();
        assert_eq!(stored.role, Role::Chef);
    }

    #[tokio::test]
    async fn test_join_room_as_spectator() {
        let state = AppState::new();
        let sam = state.sign_in("Sam", true).await.unwrap();

        let (session, _, placement) = state
            .join_room(&sam.id, Role::Spectator, "PANTRY", false)
            .await
            .unwrap();

        assert_eq!(session.room_id(), "PANTRY");
        assert_eq!(placement, RosterPlacement::Observer);
        assert_eq!(session.observers().len(), 1);
    }

    #[tokio::test]
    async fn test_join_room_unknown_participant() {
        let state = AppState::new();
        let result = state.join_room("ghost", Role::Judge, "", false).await;
        assert!(matches!(result, Err(RegistryError::UnknownParticipant(_))));
    }
}
