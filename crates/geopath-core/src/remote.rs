// crates/geopath-core/src/remote.rs

//! # Remote Lookup
//!
//! Reads the collections straight from the hosted backend's REST
//! surface (`{url}/rest/v1/{table}`), authenticating with the public
//! anon key. Filters use the backend's `column=eq.value` syntax.
//!
//! Transport failures, non-2xx answers and undecodable bodies are all
//! [`GeoPathError::Lookup`]; an empty JSON array is a genuine empty
//! result.

use crate::config::BackendConfig;
use crate::error::{GeoPathError, Result};
use crate::listing::{ListingFilter, ListingSource};
use crate::lookup::Lookup;
use crate::model::{Category, City, Country, CountryId, Listing, State, StateId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

type Query = Vec<(&'static str, String)>;

#[derive(Debug, Clone)]
pub struct RestLookup {
    client: reqwest::Client,
    config: BackendConfig,
}

impl RestLookup {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("geopath/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    async fn fetch<T: DeserializeOwned>(&self, table: &'static str, query: Query) -> Result<Vec<T>> {
        let url = self.config.rest_url(table);
        tracing::debug!(%url, ?query, "backend request");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .send()
            .await
            .map_err(|e| GeoPathError::lookup(table, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeoPathError::lookup(table, format!("HTTP {status}: {body}")));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| GeoPathError::lookup(table, format!("undecodable response: {e}")))
    }
}

fn countries_query() -> Query {
    vec![
        ("select", "*".into()),
        ("is_active", "eq.true".into()),
        ("order", "order_index".into()),
    ]
}

fn categories_query() -> Query {
    vec![("select", "*".into()), ("order", "order_index".into())]
}

fn states_query(country: &CountryId) -> Query {
    vec![
        ("select", "*".into()),
        ("country_id", format!("eq.{country}")),
        ("is_active", "eq.true".into()),
        ("order", "name_en".into()),
    ]
}

fn cities_query(state: &StateId) -> Query {
    vec![
        ("select", "*".into()),
        ("state_id", format!("eq.{state}")),
        ("is_active", "eq.true".into()),
        ("order", "name_en".into()),
    ]
}

fn listings_query(filter: &ListingFilter) -> Query {
    let mut query: Query = vec![
        ("select", "*".into()),
        ("status", format!("eq.{}", filter.status.as_str())),
    ];
    if let Some(id) = &filter.country_id {
        query.push(("country_id", format!("eq.{id}")));
    }
    if let Some(id) = &filter.state_id {
        query.push(("state_id", format!("eq.{id}")));
    }
    if let Some(id) = &filter.city_id {
        query.push(("city_id", format!("eq.{id}")));
    }
    if let Some(id) = &filter.category_id {
        query.push(("category_id", format!("eq.{id}")));
    }
    query.push(("order", "created_at.desc".into()));
    query.push(("limit", filter.limit.to_string()));
    query
}

#[async_trait]
impl Lookup for RestLookup {
    async fn countries(&self) -> Result<Vec<Country>> {
        self.fetch("countries", countries_query()).await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        self.fetch("categories", categories_query()).await
    }

    async fn states_for_country(&self, country: &CountryId) -> Result<Vec<State>> {
        self.fetch("states", states_query(country)).await
    }

    async fn cities_for_state(&self, state: &StateId) -> Result<Vec<City>> {
        self.fetch("cities", cities_query(state)).await
    }
}

#[async_trait]
impl ListingSource for RestLookup {
    async fn listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        self.fetch("listings", listings_query(filter)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;

    #[test]
    fn child_queries_filter_by_parent_and_activity() {
        let q = states_query(&CountryId::new("abc"));
        assert!(q.contains(&("country_id", "eq.abc".to_owned())));
        assert!(q.contains(&("is_active", "eq.true".to_owned())));

        let q = cities_query(&StateId::new("s1"));
        assert!(q.contains(&("state_id", "eq.s1".to_owned())));
    }

    #[test]
    fn listing_query_only_filters_on_known_scope() {
        let filter = ListingFilter {
            country_id: Some(CountryId::new("c1")),
            category_id: Some(CategoryId::new("cat")),
            ..ListingFilter::default()
        };
        let q = listings_query(&filter);
        assert!(q.contains(&("status", "eq.active".to_owned())));
        assert!(q.contains(&("category_id", "eq.cat".to_owned())));
        assert!(q.contains(&("limit", "20".to_owned())));
        assert!(!q.iter().any(|(k, _)| *k == "state_id"));
        assert_eq!(q.last().map(|(k, _)| *k), Some("limit"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_lookup_error_not_empty() {
        let lookup = RestLookup::new(BackendConfig {
            url: "http://127.0.0.1:9".into(),
            anon_key: "k".into(),
        })
        .unwrap();

        let err = lookup.countries().await.unwrap_err();
        assert!(matches!(err, GeoPathError::Lookup { collection: "countries", .. }));
        assert!(err.is_retryable());
    }
}
