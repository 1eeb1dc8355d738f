// crates/geopath-core/src/listing.rs
use crate::error::Result;
use crate::model::{CategoryId, CityId, CountryId, Listing, ListingStatus, StateId};
use crate::resolve::RouteScope;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Page size used by every location and category page.
pub const DEFAULT_LISTING_LIMIT: usize = 20;

/// Which listings a page shows: the resolved location and category,
/// one status, newest first, at most `limit` rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub country_id: Option<CountryId>,
    pub state_id: Option<StateId>,
    pub city_id: Option<CityId>,
    pub category_id: Option<CategoryId>,
    pub status: ListingStatus,
    pub limit: usize,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            country_id: None,
            state_id: None,
            city_id: None,
            category_id: None,
            status: ListingStatus::Active,
            limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

impl ListingFilter {
    /// Narrows to everything the resolver matched.
    pub fn for_scope(scope: &RouteScope) -> Self {
        Self {
            country_id: scope.country.as_ref().map(|c| c.id.clone()),
            state_id: scope.state.as_ref().map(|s| s.id.clone()),
            city_id: scope.city.as_ref().map(|c| c.id.clone()),
            category_id: scope.category.as_ref().map(|c| c.id.clone()),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        listing.status == self.status
            && self
                .country_id
                .as_ref()
                .map_or(true, |id| *id == listing.country_id)
            && self
                .state_id
                .as_ref()
                .map_or(true, |id| listing.state_id.as_ref() == Some(id))
            && self
                .city_id
                .as_ref()
                .map_or(true, |id| listing.city_id.as_ref() == Some(id))
            && self
                .category_id
                .as_ref()
                .map_or(true, |id| *id == listing.category_id)
    }
}

/// Read access to listings.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Listings matching `filter`, newest first, at most `filter.limit`.
    async fn listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>>;
}
