// crates/geopath-core/src/resolve.rs

//! # Hierarchical Route Resolver
//!
//! Classifies path tokens as home, a country, a state, a city, or a
//! category inside one of those:
//!
//! | tokens                                 | route              |
//! |----------------------------------------|--------------------|
//! | *(none)*                               | `home`             |
//! | `us`                                   | `country`          |
//! | `us/california`                        | `state`            |
//! | `us/california/la`                     | `city`             |
//! | `us/massage`                           | `category-country` |
//! | `us/massage/california`                | `category-state`   |
//! | `us/massage/california/la`             | `category-city`    |
//!
//! The second token is tested against categories *before* states, so a
//! category slug that collides with a state slug always means the
//! category. Existing links depend on this order.

use crate::cache::LookupCache;
use crate::error::Result;
use crate::lookup::Lookup;
use crate::model::{Category, City, Country, CountryId, Slugged, State, StateId};
use crate::segment::segments;
use serde::{Deserialize, Serialize};

/// Classified result of resolving a path.
///
/// Serializes as `{"type": "category-state", "countryCode": "US", ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RouteDescriptor {
    Home,
    NotFound,
    Country {
        country_code: String,
    },
    State {
        country_code: String,
        state_slug: String,
    },
    City {
        country_code: String,
        state_slug: String,
        city_slug: String,
    },
    CategoryCountry {
        country_code: String,
        category_slug: String,
    },
    CategoryState {
        country_code: String,
        category_slug: String,
        state_slug: String,
    },
    CategoryCity {
        country_code: String,
        category_slug: String,
        state_slug: String,
        city_slug: String,
    },
}

impl RouteDescriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            RouteDescriptor::Home => "home",
            RouteDescriptor::NotFound => "not-found",
            RouteDescriptor::Country { .. } => "country",
            RouteDescriptor::State { .. } => "state",
            RouteDescriptor::City { .. } => "city",
            RouteDescriptor::CategoryCountry { .. } => "category-country",
            RouteDescriptor::CategoryState { .. } => "category-state",
            RouteDescriptor::CategoryCity { .. } => "category-city",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RouteDescriptor::NotFound)
    }
}

/// The entities a resolution matched, for renderers and listing queries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteScope {
    pub country: Option<Country>,
    pub category: Option<Category>,
    pub state: Option<State>,
    pub city: Option<City>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    pub descriptor: RouteDescriptor,
    pub scope: RouteScope,
}

impl ResolvedRoute {
    fn home() -> Self {
        Self {
            descriptor: RouteDescriptor::Home,
            scope: RouteScope::default(),
        }
    }

    fn not_found() -> Self {
        Self {
            descriptor: RouteDescriptor::NotFound,
            scope: RouteScope::default(),
        }
    }
}

/// Resolves token sequences against a [`Lookup`], memoizing every
/// collection it fetches in an owned [`LookupCache`].
///
/// Construct one per application session and reuse it for every
/// navigation.
#[derive(Debug)]
pub struct Resolver<L> {
    lookup: L,
    cache: LookupCache,
}

impl<L: Lookup> Resolver<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_cache(lookup, LookupCache::new())
    }

    pub fn with_cache(lookup: L, cache: LookupCache) -> Self {
        Self { lookup, cache }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    /// Segments `path` and resolves the tokens.
    pub async fn resolve_path(&self, path: &str) -> Result<ResolvedRoute> {
        self.resolve(&segments(path)).await
    }

    /// Classifies `tokens`.
    ///
    /// Unknown entities at any level give `NotFound`. Lookup faults are
    /// returned as `Err` so callers can tell "does not exist" from
    /// "could not ask".
    pub async fn resolve(&self, tokens: &[&str]) -> Result<ResolvedRoute> {
        let route = self.classify(tokens).await?;
        tracing::debug!(?tokens, route = route.descriptor.kind(), "resolved");
        Ok(route)
    }

    async fn classify(&self, tokens: &[&str]) -> Result<ResolvedRoute> {
        let Some((&country_token, rest)) = tokens.split_first() else {
            return Ok(ResolvedRoute::home());
        };

        let countries = self.cache.countries(&self.lookup).await?;
        let Some(country) = countries.iter().find(|c| c.matches_token(country_token)) else {
            return Ok(ResolvedRoute::not_found());
        };
        let country_code = country.code.clone();
        let mut scope = RouteScope {
            country: Some(country.clone()),
            ..RouteScope::default()
        };

        let Some((&second, rest)) = rest.split_first() else {
            return Ok(ResolvedRoute {
                descriptor: RouteDescriptor::Country { country_code },
                scope,
            });
        };

        let categories = self.cache.categories(&self.lookup).await?;
        if let Some(category) = categories.iter().find(|c| c.has_slug(second)) {
            let category_slug = category.slug.clone();
            scope.category = Some(category.clone());

            if rest.len() > 2 {
                return Ok(ResolvedRoute::not_found());
            }
            let Some((&state_token, rest)) = rest.split_first() else {
                return Ok(ResolvedRoute {
                    descriptor: RouteDescriptor::CategoryCountry {
                        country_code,
                        category_slug,
                    },
                    scope,
                });
            };

            let Some(state) = self.find_state(&country.id, state_token).await? else {
                return Ok(ResolvedRoute::not_found());
            };
            let state_slug = state.slug.clone();
            let state_id = state.id.clone();
            scope.state = Some(state);

            let Some(&city_token) = rest.first() else {
                return Ok(ResolvedRoute {
                    descriptor: RouteDescriptor::CategoryState {
                        country_code,
                        category_slug,
                        state_slug,
                    },
                    scope,
                });
            };

            let Some(city) = self.find_city(&state_id, city_token).await? else {
                return Ok(ResolvedRoute::not_found());
            };
            let city_slug = city.slug.clone();
            scope.city = Some(city);

            Ok(ResolvedRoute {
                descriptor: RouteDescriptor::CategoryCity {
                    country_code,
                    category_slug,
                    state_slug,
                    city_slug,
                },
                scope,
            })
        } else {
            if rest.len() > 1 {
                return Ok(ResolvedRoute::not_found());
            }

            let Some(state) = self.find_state(&country.id, second).await? else {
                return Ok(ResolvedRoute::not_found());
            };
            let state_slug = state.slug.clone();
            let state_id = state.id.clone();
            scope.state = Some(state);

            let Some(&city_token) = rest.first() else {
                return Ok(ResolvedRoute {
                    descriptor: RouteDescriptor::State {
                        country_code,
                        state_slug,
                    },
                    scope,
                });
            };

            let Some(city) = self.find_city(&state_id, city_token).await? else {
                return Ok(ResolvedRoute::not_found());
            };
            let city_slug = city.slug.clone();
            scope.city = Some(city);

            Ok(ResolvedRoute {
                descriptor: RouteDescriptor::City {
                    country_code,
                    state_slug,
                    city_slug,
                },
                scope,
            })
        }
    }

    async fn find_state(&self, country: &CountryId, token: &str) -> Result<Option<State>> {
        let states = self.cache.states(&self.lookup, country).await?;
        Ok(states.iter().find(|s| s.has_slug(token)).cloned())
    }

    async fn find_city(&self, state: &StateId, token: &str) -> Result<Option<City>> {
        let cities = self.cache.cities(&self.lookup, state).await?;
        Ok(cities.iter().find(|c| c.has_slug(token)).cloned())
    }
}
