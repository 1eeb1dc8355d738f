// crates/geopath-core/src/lookup.rs
use crate::error::Result;
use crate::model::{Category, City, Country, CountryId, State, StateId};
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to the geography and category collections.
///
/// Implementations must return only active countries, states and cities,
/// with countries and categories ordered by `order_index` and states and
/// cities by English name.
///
/// A failed request is an `Err`, never an empty `Vec`: the resolver turns
/// empty collections into `NotFound`, which must only happen when the
/// entity truly does not exist.
#[async_trait]
pub trait Lookup: Send + Sync {
    async fn countries(&self) -> Result<Vec<Country>>;

    async fn categories(&self) -> Result<Vec<Category>>;

    async fn states_for_country(&self, country: &CountryId) -> Result<Vec<State>>;

    async fn cities_for_state(&self, state: &StateId) -> Result<Vec<City>>;
}

#[async_trait]
impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    async fn countries(&self) -> Result<Vec<Country>> {
        (**self).countries().await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        (**self).categories().await
    }

    async fn states_for_country(&self, country: &CountryId) -> Result<Vec<State>> {
        (**self).states_for_country(country).await
    }

    async fn cities_for_state(&self, state: &StateId) -> Result<Vec<City>> {
        (**self).cities_for_state(state).await
    }
}
