use crate::types::*;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("display name must not be blank")]
    BlankDisplayName,

    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),
}

/// Two-letter badge from the first characters of a name
pub fn avatar_for(display_name: &str) -> String {
    display_name
        .trim()
        .chars()
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Signed-in participants, owned by the application state
#[derive(Debug, Default)]
pub struct ParticipantRegistry {
    participants: HashMap<ParticipantId, Participant>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a participant with no role yet
    pub fn sign_in(
        &mut self,
        display_name: &str,
        family_mode: bool,
    ) -> Result<Participant, RegistryError> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(RegistryError::BlankDisplayName);
        }

        let participant = Participant {
            id: ulid::Ulid::new().to_string(),
            display_name: name.to_string(),
            role: Role::Unassigned,
            family_mode,
            avatar: avatar_for(name),
        };

        self.participants
            .insert(participant.id.clone(), participant.clone());
        Ok(participant)
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.get(id)
    }

    /// Record the role picked in the lobby
    pub fn assign_role(&mut self, id: &str, role: Role) -> Result<Participant, RegistryError> {
        let participant = self
            .participants
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownParticipant(id.to_string()))?;
        participant.role = role;
        Ok(participant.clone())
    }

    pub fn remove(&mut self, id: &str) -> Option<Participant> {
        self.participants.remove(id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
