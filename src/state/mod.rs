mod lobby;
pub mod registry;

pub use lobby::resolve_room_code;
pub use registry::{ParticipantRegistry, RegistryError};

use crate::catalog::ChallengeCatalog;
use crate::config::SessionConfig;
use crate::types::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Shared application state.
///
/// Sessions are not stored here: each connection owns its own session
/// outright. Only sign-in identities and the catalog are shared.
#[derive(Clone)]
pub struct AppState {
    pub participants: Arc<RwLock<ParticipantRegistry>>,
    pub catalog: Arc<ChallengeCatalog>,
    pub session_config: SessionConfig,
    /// Period of the countdown tick driven by each connection
    pub tick_interval: Duration,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_catalog(ChallengeCatalog::builtin())
    }

    pub fn with_catalog(catalog: ChallengeCatalog) -> Self {
        Self {
            participants: Arc::new(RwLock::new(ParticipantRegistry::new())),
            catalog: Arc::new(catalog),
            session_config: SessionConfig::default(),
            tick_interval: Duration::from_secs(1),
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Register a new participant from the sign-in form
    pub async fn sign_in(
        &self,
        display_name: &str,
        family_mode: bool,
    ) -> Result<Participant, RegistryError> {
        let participant = self
            .participants
            .write()
            .await
            .sign_in(display_name, family_mode)?;
        tracing::info!(
            participant = %participant.id,
            "Participant signed in as {}",
            participant.display_name
        );
        Ok(participant)
    }

    pub async fn get_participant(&self, id: &str) -> Option<Participant> {
        self.participants.read().await.get(id).cloned()
    }

    pub async fn sign_out(&self, id: &str) -> Option<Participant> {
        let removed = self.participants.write().await.remove(id);
        if removed.is_some() {
            tracing::info!(participant = %id, "Participant signed out");
        }
        removed
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_and_lookup() {
        let state = AppState::new();
        let participant = state.sign_in("Chef Luna", true).await.unwrap();

        let found = state.get_participant(&participant.id).await.unwrap();
        assert_eq!(found.display_name, "Chef Luna");
        assert_eq!(found.avatar, "CH");
    }

    #[tokio::test]
    async fn test_sign_in_blank_name() {
        let state = AppState::new();
        let result = state.sign_in("", true).await;
        assert_eq!(result, Err(RegistryError::BlankDisplayName));
    }

    #[tokio::test]
    async fn test_sign_out() {
        let state = AppState::new();
        let participant = state.sign_in("Milo", false).await.unwrap();

        assert!(state.sign_out(&participant.id).await.is_some());
        assert!(state.get_participant(&participant.id).await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_registry() {
        let state = AppState::new();
        let other = state.clone();
        let participant = state.sign_in("Ada", false).await.unwrap();

        assert!(other.get_participant(&participant.id).await.is_some());
    }
}
