//! Challenges: a scheduled match at a place, owned by a player

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    check_id, check_name, date_format, optional_date_format, Validate, ValidationError,
};
use super::{Entity, Place, Player};

/// Lifecycle of a challenge. New challenges are `Open`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeStatus {
    #[default]
    #[serde(alias = "Open")]
    Open,
    #[serde(alias = "Active")]
    Active,
    #[serde(alias = "Dropped")]
    Dropped,
    #[serde(alias = "Terminated")]
    Terminated,
}

/// Time-of-day slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeTime {
    #[serde(alias = "Morning")]
    Morning,
    #[serde(alias = "Afternoon")]
    Afternoon,
    #[serde(alias = "Evening")]
    Evening,
    #[serde(alias = "Night")]
    Night,
}

/// Stored challenge. Place, owner and participants are embedded as they
/// were when resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub name: String,
    pub place: Place,
    pub status: ChallengeStatus,
    pub date: DateTime<Utc>,
    pub time: ChallengeTime,
    pub owner: Player,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Entity for Challenge {
    const OBJECT_NAME: &'static str = "Challenge";
    const ID_PREFIX: &'static str = "ch";
    const TABLE: &'static str = "challenges";

    type Draft = ChallengeDraft;
    type Update = ChallengeUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Create challenge request, referencing place and players by id
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDraft {
    pub name: String,
    pub place_id: String,
    #[serde(deserialize_with = "date_format::deserialize")]
    pub date: DateTime<Utc>,
    pub time: ChallengeTime,
    #[serde(default)]
    pub status: Option<ChallengeStatus>,
    pub owner_id: String,
    #[serde(default)]
    pub players_id: Option<Vec<String>>,
}

impl Validate for ChallengeDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name)?;
        check_id("placeId", &self.place_id)?;
        check_id("ownerId", &self.owner_id)?;
        for id in self.players_id.iter().flatten() {
            check_id("playersId", id)?;
        }
        Ok(())
    }
}

/// Partial challenge update. Changed references are resolved again.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "optional_date_format::deserialize")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time: Option<ChallengeTime>,
    #[serde(default)]
    pub status: Option<ChallengeStatus>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub players_id: Option<Vec<String>>,
}

impl Validate for ChallengeUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_name("name", name)?;
        }
        if let Some(id) = &self.place_id {
            check_id("placeId", id)?;
        }
        if let Some(id) = &self.owner_id {
            check_id("ownerId", id)?;
        }
        for id in self.players_id.iter().flatten() {
            check_id("playersId", id)?;
        }
        Ok(())
    }
}
