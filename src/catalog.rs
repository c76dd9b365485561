//! Read-only challenge catalog
//!
//! Sessions look challenges up by id here; nothing in the engine creates or
//! edits a challenge.

use crate::types::{Challenge, ChallengeCategory, SkillTag};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no challenges")]
    Empty,

    #[error("duplicate challenge id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone)]
pub struct ChallengeCatalog {
    challenges: Vec<Challenge>,
}

fn challenge(
    id: &str,
    title: &str,
    category: ChallengeCategory,
    skill: SkillTag,
    minutes: u32,
    points: u32,
    description: &str,
) -> Challenge {
    Challenge {
        id: id.to_string(),
        title: title.to_string(),
        category,
        skill,
        minutes,
        points,
        description: description.to_string(),
    }
}

impl ChallengeCatalog {
    /// The four trending challenges shown in the lobby
    pub fn builtin() -> Self {
        use ChallengeCategory::*;
        use SkillTag::*;

        Self {
            challenges: vec![
                challenge(
                    "c1",
                    "Two-Pan Omelet Showdown",
                    Dish,
                    Cook,
                    8,
                    100,
                    "Chef guides steps; contestant executes fluffy omelet with 2 fillings.",
                ),
                challenge(
                    "c2",
                    "Kid-Friendly Fruit Platter Art",
                    Buffet,
                    Plating,
                    10,
                    120,
                    "Compose a rainbow platter. Family Mode preset.",
                ),
                challenge(
                    "c3",
                    "Express Sandwich Bar for 12",
                    Hospitality,
                    Service,
                    12,
                    160,
                    "Set up a mini station with allergen tags and one hot item.",
                ),
                challenge(
                    "c4",
                    "Banquet Timing Orchestrator",
                    Banquet,
                    Management,
                    18,
                    220,
                    "Apps → mains → dessert; hit the cadence.",
                ),
            ],
        }
    }

    pub fn new(challenges: Vec<Challenge>) -> Result<Self, CatalogError> {
        if challenges.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for c in &challenges {
            if !seen.insert(c.id.as_str()) {
                return Err(CatalogError::DuplicateId(c.id.clone()));
            }
        }

        Ok(Self { challenges })
    }

    /// Parse a JSON array of challenges
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let challenges: Vec<Challenge> = serde_json::from_str(json)?;
        Self::new(challenges)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn get(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn list(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }
}

impl Default for ChallengeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = ChallengeCatalog::builtin();

        assert_eq!(catalog.len(), 4);
        let omelet = catalog.get("c1").unwrap();
        assert_eq!(omelet.minutes, 8);
        assert_eq!(omelet.points, 100);
        assert_eq!(omelet.category, ChallengeCategory::Dish);
        assert_eq!(catalog.get("c4").unwrap().duration_seconds(), 18 * 60);
        assert!(catalog.get("c9").is_none());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"id": "b1", "title": "Brunch Board", "category": "buffet", "skill": "prep",
             "minutes": 6, "points": 80, "description": "Board it up."}
        ]"#;
        let catalog = ChallengeCatalog::from_json_str(json).unwrap();

        let brunch = catalog.get("b1").unwrap();
        assert_eq!(brunch.skill, SkillTag::Prep);
        assert_eq!(brunch.category, ChallengeCategory::Buffet);
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let result = ChallengeCatalog::from_json_str("[]");
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut challenges = ChallengeCatalog::builtin().list().to_vec();
        challenges.push(challenges[0].clone());

        let result = ChallengeCatalog::new(challenges);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "c1"));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let json = r#"[{"id": "z", "title": "Z", "category": "snack", "skill": "prep",
                        "minutes": 1, "points": 1, "description": ""}]"#;
        assert!(matches!(
            ChallengeCatalog::from_json_str(json),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ChallengeCatalog::from_path(dir.path().join("missing.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
