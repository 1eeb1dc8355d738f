// crates/geopath-core/tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use geopath_core::model::CategoryId;
use geopath_core::{
    Catalog, Category, City, CityId, Country, CountryId, GeoPathError, Lookup, Result, State,
    StateId,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

pub fn country(id: &str, code: &str, slug: &str) -> Country {
    Country {
        id: CountryId::new(id),
        code: code.into(),
        slug: slug.into(),
        name_en: code.into(),
        name_es: String::new(),
        flag_emoji: String::new(),
        is_active: true,
        order_index: 0,
    }
}

pub fn state(id: &str, country: &str, slug: &str) -> State {
    State {
        id: StateId::new(id),
        country_id: CountryId::new(country),
        slug: slug.into(),
        name_en: slug.into(),
        name_es: String::new(),
        is_active: true,
    }
}

pub fn city(id: &str, state: &str, slug: &str) -> City {
    City {
        id: CityId::new(id),
        state_id: StateId::new(state),
        slug: slug.into(),
        name_en: slug.into(),
        name_es: String::new(),
        is_active: true,
    }
}

pub fn category(id: &str, slug: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        slug: slug.into(),
        name_en: slug.into(),
        name_es: String::new(),
        icon: String::new(),
        order_index: 0,
    }
}

/// US → california → la, with one category `massage`.
pub fn fixture() -> Catalog {
    Catalog {
        countries: vec![country("us", "US", "us")],
        states: vec![state("ca", "us", "california")],
        cities: vec![city("la", "ca", "la")],
        categories: vec![category("massage", "massage")],
        listings: Vec::new(),
    }
}

/// Catalog-backed lookup that records every call, can be switched into
/// failure mode, and can hold state fetches until released.
#[derive(Default)]
pub struct ProbeLookup {
    pub catalog: Catalog,
    calls: Mutex<Vec<String>>,
    failing: AtomicBool,
    hold_states: AtomicBool,
    pub release: Notify,
}

impl ProbeLookup {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Next state fetches wait for `release.notify_one()`.
    pub fn hold_states(&self, hold: bool) {
        self.hold_states.store(hold, Ordering::SeqCst);
    }

    fn record(&self, call: String, collection: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(GeoPathError::lookup(collection, "backend unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl Lookup for ProbeLookup {
    async fn countries(&self) -> Result<Vec<Country>> {
        self.record("countries".into(), "countries")?;
        self.catalog.countries().await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        self.record("categories".into(), "categories")?;
        self.catalog.categories().await
    }

    async fn states_for_country(&self, country: &CountryId) -> Result<Vec<State>> {
        self.record(format!("states:{country}"), "states")?;
        if self.hold_states.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        self.catalog.states_for_country(country).await
    }

    async fn cities_for_state(&self, state: &StateId) -> Result<Vec<City>> {
        self.record(format!("cities:{state}"), "cities")?;
        self.catalog.cities_for_state(state).await
    }
}
