//! Challenge endpoints
//!
//! Create and update take `placeId`, `ownerId` and `playersId`; a reference
//! to a missing record answers 404 and nothing is stored.

use std::sync::Arc;

use axum::Router;
use foosball_core::{Challenge, ChallengeService, FoosballServices};

use super::common::{resource_router, Resource};
use crate::http::server::AppState;

impl Resource for Challenge {
    const COLLECTION: &'static str = "challenges";

    fn service(services: &FoosballServices) -> &ChallengeService {
        &services.challenges
    }
}

/// Challenge routes
pub fn router() -> Router<Arc<AppState>> {
    resource_router::<Challenge>("/challenges")
}
