//! Place endpoints

use std::sync::Arc;

use axum::Router;
use foosball_core::{FoosballServices, Place, PlaceService};

use super::common::{resource_router, Resource};
use crate::http::server::AppState;

impl Resource for Place {
    const COLLECTION: &'static str = "places";

    fn service(services: &FoosballServices) -> &PlaceService {
        &services.places
    }
}

/// Place routes
pub fn router() -> Router<Arc<AppState>> {
    resource_router::<Place>("/places")
}
