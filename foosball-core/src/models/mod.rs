//! Domain models with validation
//!
//! Drafts and updates are checked with [`Validate`] before they reach a
//! service. Invalid input returns ValidationError, not panic.
//!
//! Records serialize with camelCase keys; enum literals are SCREAMING_CASE.

pub mod challenge;
pub mod pagination;
pub mod place;
pub mod player;
pub mod validation;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use challenge::{Challenge, ChallengeDraft, ChallengeStatus, ChallengeTime, ChallengeUpdate};
pub use pagination::{Page, PageRequest, PaginationParams, SortOrder};
pub use place::{Coordinates, Place, PlaceDraft, PlaceStatus, PlaceUpdate};
pub use player::{Expertise, Player, PlayerDraft, PlayerUpdate};
pub use validation::{Validate, ValidationError};

/// A record kept in one storage collection, keyed by string id.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Display name of the collection ("Place", "Player", ...)
    const OBJECT_NAME: &'static str;

    /// Prefix of ids minted by the persisted backend
    const ID_PREFIX: &'static str;

    /// PostgreSQL table holding the collection
    const TABLE: &'static str;

    /// Creation payload
    type Draft: Send + Sync + 'static;

    /// Partial update payload
    type Update: Send + Sync + 'static;

    fn id(&self) -> &str;
}
