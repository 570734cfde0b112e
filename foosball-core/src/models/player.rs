//! Players and their expertise

use serde::{Deserialize, Serialize};

use super::validation::{check_name, Validate, ValidationError};
use super::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Expertise {
    #[serde(alias = "Novice")]
    Novice,
    #[serde(alias = "Intermediate")]
    Intermediate,
    #[serde(alias = "Advanced")]
    Advanced,
    #[serde(alias = "Expert")]
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub expertise: Expertise,
    pub points: u32,
}

impl Entity for Player {
    const OBJECT_NAME: &'static str = "Player";
    const ID_PREFIX: &'static str = "player";
    const TABLE: &'static str = "players";

    type Draft = PlayerDraft;
    type Update = PlayerUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Create player request. `points` defaults to 0 when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDraft {
    pub name: String,
    pub expertise: Expertise,
    #[serde(default)]
    pub points: Option<u32>,
}

impl Validate for PlayerDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise: Option<Expertise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl Validate for PlayerUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => check_name("name", name),
            None => Ok(()),
        }
    }
}
