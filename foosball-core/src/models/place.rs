//! Places where challenges are played

use serde::{Deserialize, Serialize};

use super::validation::{check_name, check_range, Validate, ValidationError};
use super::Entity;

/// Verification status of a place.
///
/// Title-case literals from older records ("Active") are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceStatus {
    #[serde(alias = "Active")]
    Active,
    #[serde(alias = "Inactive")]
    Inactive,
    #[serde(alias = "Unknown")]
    Unknown,
    #[serde(alias = "Unverified")]
    Unverified,
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

impl Validate for Coordinates {
    fn validate(&self) -> Result<(), ValidationError> {
        check_range("coordinates.lat", self.lat, -90.0, 90.0)?;
        check_range("coordinates.long", self.long, -180.0, 180.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub status: PlaceStatus,
}

impl Entity for Place {
    const OBJECT_NAME: &'static str = "Place";
    const ID_PREFIX: &'static str = "place";
    const TABLE: &'static str = "places";

    type Draft = PlaceDraft;
    type Update = PlaceUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Create place request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDraft {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Validate for PlaceDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name)?;
        self.coordinates.validate()
    }
}

/// Partial place update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlaceStatus>,
}

impl Validate for PlaceUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_name("name", name)?;
        }
        if let Some(coordinates) = &self.coordinates {
            coordinates.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_accepts_legacy_casing() {
        let status: PlaceStatus = serde_json::from_value(json!("Active")).unwrap();
        assert_eq!(status, PlaceStatus::Active);

        let status: PlaceStatus = serde_json::from_value(json!("UNVERIFIED")).unwrap();
        assert_eq!(serde_json::to_value(status).unwrap(), json!("UNVERIFIED"));
    }

    #[test]
    fn draft_rejects_out_of_range_coordinates() {
        let draft = PlaceDraft {
            name: "Harbour Bar".into(),
            coordinates: Coordinates {
                lat: 91.0,
                long: 2.0,
            },
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::OutOfRange {
                field: "coordinates.lat",
                ..
            })
        ));
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = PlaceUpdate {
            status: Some(PlaceStatus::Active),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "status": "ACTIVE" })
        );
    }
}
