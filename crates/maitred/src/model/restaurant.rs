//! Restaurant entity. The `rating` field is a derived value: the
//! aggregation loop periodically overwrites it from the restaurant's
//! reviews, and nothing else holds a write path to it.

use super::RestaurantId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;
use store_actor::{SortField, StoreEntity, UnknownSortField};

/// A restaurant, reduced to what the booking core needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    /// Cached mean of this restaurant's review ratings, 0 when it has none.
    /// Written only by the aggregation loop.
    pub rating: f64,
}

/// Payload for creating a restaurant. New restaurants start unrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
}

/// Rating overwrite applied by the aggregation loop. Always carries a
/// concrete value; the loop never patches partially.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestaurantPatch {
    pub rating: f64,
}

/// Restaurant as embedded in booking and review views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantView {
    pub id: RestaurantId,
    pub name: String,
    pub rating: f64,
}

impl From<Restaurant> for RestaurantView {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            rating: restaurant.rating,
        }
    }
}

/// Sort fields accepted when listing restaurants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RestaurantSortField {
    #[default]
    Id,
}

impl FromStr for RestaurantSortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

impl SortField for RestaurantSortField {
    fn names() -> &'static [&'static str] {
        &["id"]
    }
}

impl StoreEntity for Restaurant {
    type Id = RestaurantId;
    type Draft = RestaurantCreate;
    type Patch = RestaurantPatch;
    type SortField = RestaurantSortField;
    type Filter = ();
    type UniqueKey = ();
    type Error = Infallible;

    fn from_draft(id: RestaurantId, draft: RestaurantCreate) -> Self {
        Self {
            id,
            name: draft.name,
            rating: 0.0,
        }
    }

    fn id(&self) -> RestaurantId {
        self.id
    }

    fn apply_patch(&mut self, patch: RestaurantPatch) -> Result<(), Infallible> {
        self.rating = patch.rating;
        Ok(())
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn compare(&self, other: &Self, field: RestaurantSortField) -> Ordering {
        match field {
            RestaurantSortField::Id => self.id.cmp(&other.id),
        }
    }
}
