//! Handlers shared by every resource
//!
//! Each resource implements [`Resource`] and mounts [`resource_router`]:
//!
//! | Method | Path              | Handler  |
//! |--------|-------------------|----------|
//! | POST   | `{base}`          | create   |
//! | GET    | `{base}`          | list     |
//! | POST   | `{base}/search`   | search   |
//! | GET    | `{base}/{id}`     | get      |
//! | PUT    | `{base}/{id}`     | update   |
//! | DELETE | `{base}/{id}`     | delete   |

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use foosball_core::models::{Entity, Page, PaginationParams, Validate};
use foosball_core::{EntityService, Filter, FoosballServices};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, Pagination, ValidId};
use crate::http::server::AppState;

/// An entity exposed over HTTP
pub trait Resource: Entity {
    /// Key holding the records in listing responses ("places", ...)
    const COLLECTION: &'static str;

    fn service(services: &FoosballServices) -> &EntityService<Self>;
}

/// Listing response: `{ <collection>: [...], nextToken }`
#[derive(Debug)]
pub struct Listing<E> {
    collection: &'static str,
    page: Page<E>,
}

impl<E: Resource> From<Page<E>> for Listing<E> {
    fn from(page: Page<E>) -> Self {
        Self {
            collection: E::COLLECTION,
            page,
        }
    }
}

impl<E: Serialize> Serialize for Listing<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.collection, &self.page.results)?;
        map.serialize_entry("nextToken", &self.page.next_token)?;
        map.end()
    }
}

/// Search request body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Exact-match filter over top-level fields
    #[serde(default)]
    pub query: Filter,
    #[serde(flatten)]
    pub page: PaginationParams,
}

/// POST {base}
async fn create<E>(
    State(state): State<Arc<AppState>>,
    ApiJson(draft): ApiJson<E::Draft>,
) -> Result<(StatusCode, Json<E>), ApiError>
where
    E: Resource,
    E::Draft: DeserializeOwned + Validate,
{
    draft.validate()?;
    let record = E::service(&state.services).create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET {base} - list with pagination
async fn list<E: Resource>(
    State(state): State<Arc<AppState>>,
    Pagination(params): Pagination,
) -> Result<Json<Listing<E>>, ApiError> {
    let (request, order) = params.into_request(state.page_size);
    let page = E::service(&state.services)
        .search(&Filter::new(), &request, order)
        .await?;
    Ok(Json(Listing::from(page)))
}

/// POST {base}/search
async fn search<E: Resource>(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SearchRequest>,
) -> Result<Json<Listing<E>>, ApiError> {
    let (request, order) = req.page.into_request(state.page_size);
    let page = E::service(&state.services)
        .search(&req.query, &request, order)
        .await?;
    Ok(Json(Listing::from(page)))
}

/// GET {base}/{id}
async fn get_one<E: Resource>(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<E>, ApiError> {
    match E::service(&state.services).get_by_id(&id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound {
            resource: E::OBJECT_NAME,
            id,
        }),
    }
}

/// PUT {base}/{id} - partial update
async fn update<E>(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ApiJson(update): ApiJson<E::Update>,
) -> Result<Json<E>, ApiError>
where
    E: Resource,
    E::Update: DeserializeOwned + Validate,
{
    update.validate()?;
    match E::service(&state.services).update(&id, update).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound {
            resource: E::OBJECT_NAME,
            id,
        }),
    }
}

/// DELETE {base}/{id}
async fn delete<E: Resource>(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    if E::service(&state.services).delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound {
            resource: E::OBJECT_NAME,
            id,
        })
    }
}

/// The six routes of one resource under `base`
pub fn resource_router<E>(base: &str) -> Router<Arc<AppState>>
where
    E: Resource,
    E::Draft: DeserializeOwned + Validate,
    E::Update: DeserializeOwned + Validate,
{
    Router::new()
        .route(base, get(list::<E>).post(create::<E>))
        .route(&format!("{base}/search"), post(search::<E>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_one::<E>).put(update::<E>).delete(delete::<E>),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use foosball_core::models::{Expertise, Player};
    use serde_json::json;

    #[test]
    fn search_request_reads_flattened_paging() {
        let req: SearchRequest = serde_json::from_value(json!({
            "query": { "status": "OPEN" },
            "pageSize": 5,
            "maxResult": 20,
            "order": "desc"
        }))
        .unwrap();

        assert_eq!(req.query.get("status"), Some(&json!("OPEN")));
        assert_eq!(req.page.page_size, Some(5));
        assert_eq!(req.page.max_result, Some(20));
        assert!(req.page.next_token.is_none());
    }

    #[test]
    fn empty_search_body_matches_everything() {
        let req: SearchRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.query.is_empty());
    }

    #[test]
    fn listing_uses_collection_key() {
        let page = Page {
            results: vec![Player {
                id: "player_1".to_owned(),
                name: "Alice".to_owned(),
                expertise: Expertise::Novice,
                points: 0,
            }],
            next_token: Some("player_1".to_owned()),
        };

        let body = serde_json::to_value(Listing::from(page)).unwrap();
        assert_eq!(body["players"][0]["name"], "Alice");
        assert_eq!(body["nextToken"], "player_1");
    }
}
