//! Player endpoints

use std::sync::Arc;

use axum::Router;
use foosball_core::{FoosballServices, Player, PlayerService};

use super::common::{resource_router, Resource};
use crate::http::server::AppState;

impl Resource for Player {
    const COLLECTION: &'static str = "players";

    fn service(services: &FoosballServices) -> &PlayerService {
        &services.players
    }
}

/// Player routes
pub fn router() -> Router<Arc<AppState>> {
    resource_router::<Player>("/players")
}
