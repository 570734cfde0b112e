//! foosball-core: entities, storage and services for foosball matchmaking
//!
//! Layers, leaves first:
//! - `storage`: single-collection adapters (in-memory map, PostgreSQL documents)
//! - `repository`: per-entity CRUD + search facades over adapters
//! - `search`: bounded accumulation over cursor pages
//! - `service`: the operation surface consumed by the HTTP layer
//! - `factory`: engine selection at process start

pub mod config;
pub mod db;
pub mod error;
pub mod factory;
pub mod models;
pub mod repository;
pub mod search;
pub mod service;
pub mod storage;

pub use config::{CoreConfig, StorageEngine};
pub use error::{ConfigError, StoreError};
pub use factory::build_services;
pub use models::{
    Challenge, ChallengeDraft, ChallengeStatus, ChallengeTime, ChallengeUpdate, Coordinates, Entity,
    Expertise, Page, PageRequest, Place, PlaceDraft, PlaceStatus, PlaceUpdate, Player, PlayerDraft,
    PlayerUpdate, SortOrder,
};
pub use service::{ChallengeService, EntityService, FoosballServices, PlaceService, PlayerService};
pub use storage::{Document, Filter};
