// crates/geopath-core/tests/resolver_tests.rs
mod common;

use common::{category, fixture, state, ProbeLookup};
use geopath_core::{GeoPathError, Resolver, RouteDescriptor};
use rstest::rstest;
use std::sync::Arc;

fn resolver() -> Resolver<Arc<ProbeLookup>> {
    Resolver::new(Arc::new(ProbeLookup::new(fixture())))
}

fn country(code: &str) -> RouteDescriptor {
    RouteDescriptor::Country {
        country_code: code.into(),
    }
}

#[rstest]
#[case(&[], RouteDescriptor::Home)]
#[case(&["fr"], RouteDescriptor::NotFound)]
#[case(&["us"], country("US"))]
#[case(&["US"], country("US"))]
#[case(&["us", "california"], RouteDescriptor::State {
    country_code: "US".into(),
    state_slug: "california".into(),
})]
#[case(&["us", "massage"], RouteDescriptor::CategoryCountry {
    country_code: "US".into(),
    category_slug: "massage".into(),
})]
#[case(&["us", "massage", "california"], RouteDescriptor::CategoryState {
    country_code: "US".into(),
    category_slug: "massage".into(),
    state_slug: "california".into(),
})]
#[case(&["us", "california", "la"], RouteDescriptor::City {
    country_code: "US".into(),
    state_slug: "california".into(),
    city_slug: "la".into(),
})]
#[case(&["us", "massage", "california", "la"], RouteDescriptor::CategoryCity {
    country_code: "US".into(),
    category_slug: "massage".into(),
    state_slug: "california".into(),
    city_slug: "la".into(),
})]
#[case(&["us", "massage", "california", "miami"], RouteDescriptor::NotFound)]
#[case(&["us", "texas"], RouteDescriptor::NotFound)]
#[case(&["us", "california", "miami"], RouteDescriptor::NotFound)]
#[case(&["us", "massage", "texas"], RouteDescriptor::NotFound)]
#[case(&["us", "california", "la", "extra"], RouteDescriptor::NotFound)]
#[case(&["us", "massage", "california", "la", "extra"], RouteDescriptor::NotFound)]
#[tokio::test]
async fn resolves_reference_paths(#[case] tokens: &[&str], #[case] expected: RouteDescriptor) {
    let route = resolver().resolve(tokens).await.unwrap();
    assert_eq!(route.descriptor, expected, "tokens: {tokens:?}");
}

#[tokio::test]
async fn empty_path_issues_no_lookups() {
    let lookup = Arc::new(ProbeLookup::new(fixture()));
    let resolver = Resolver::new(lookup.clone());

    for path in ["", "/", "///"] {
        let route = resolver.resolve_path(path).await.unwrap();
        assert_eq!(route.descriptor, RouteDescriptor::Home);
    }
    assert!(lookup.calls().is_empty());
}

#[rstest]
#[case("/fr")]
#[case("/fr/massage/california/la")]
#[case("/united-states")]
#[tokio::test]
async fn unknown_country_stops_after_country_list(#[case] path: &str) {
    let lookup = Arc::new(ProbeLookup::new(fixture()));
    let resolver = Resolver::new(lookup.clone());

    let route = resolver.resolve_path(path).await.unwrap();
    assert!(route.descriptor.is_not_found());
    assert_eq!(lookup.calls(), vec!["countries"]);
}

#[tokio::test]
async fn repeated_resolution_hits_the_cache() {
    let lookup = Arc::new(ProbeLookup::new(fixture()));
    let resolver = Resolver::new(lookup.clone());

    let first = resolver.resolve_path("/us/massage/california/la").await.unwrap();
    let calls_after_first = lookup.calls();
    assert_eq!(
        calls_after_first,
        vec!["countries", "categories", "states:us", "cities:ca"]
    );

    let second = resolver.resolve_path("/us/massage/california/la").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(lookup.calls(), calls_after_first);

    let stats = resolver.cache().stats();
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.hits, 4);
    assert_eq!(stats.entries, 4);
}

#[tokio::test]
async fn sibling_paths_share_parent_collections() {
    let lookup = Arc::new(ProbeLookup::new(fixture()));
    let resolver = Resolver::new(lookup.clone());

    resolver.resolve_path("/us/california").await.unwrap();
    resolver.resolve_path("/us/massage/california").await.unwrap();
    resolver.resolve_path("/us/california/la").await.unwrap();

    assert_eq!(
        lookup.calls(),
        vec!["countries", "categories", "states:us", "cities:ca"]
    );
}

#[tokio::test]
async fn category_wins_over_state_with_the_same_slug() {
    let mut catalog = fixture();
    catalog.states.push(state("fl", "us", "florida"));
    catalog.categories.push(category("florida-cat", "florida"));
    let resolver = Resolver::new(ProbeLookup::new(catalog));

    let route = resolver.resolve(&["us", "florida"]).await.unwrap();
    assert_eq!(
        route.descriptor,
        RouteDescriptor::CategoryCountry {
            country_code: "US".into(),
            category_slug: "florida".into(),
        }
    );
}

#[tokio::test]
async fn category_match_is_case_sensitive_and_falls_through_to_states() {
    let lookup = Arc::new(ProbeLookup::new(fixture()));
    let resolver = Resolver::new(lookup.clone());

    let route = resolver.resolve(&["us", "Massage"]).await.unwrap();
    assert!(route.descriptor.is_not_found());
    assert_eq!(lookup.calls(), vec!["countries", "categories", "states:us"]);

    let route = resolver.resolve(&["us", "California"]).await.unwrap();
    assert!(route.descriptor.is_not_found());
}

#[tokio::test]
async fn same_country_regardless_of_code_case() {
    let resolver = resolver();
    let lower = resolver.resolve(&["us"]).await.unwrap();
    let upper = resolver.resolve(&["US"]).await.unwrap();
    let mixed = resolver.resolve(&["Us"]).await.unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower, mixed);
}

#[tokio::test]
async fn country_matches_by_slug_too() {
    let mut catalog = fixture();
    catalog.countries[0].slug = "united-states".into();
    let resolver = Resolver::new(ProbeLookup::new(catalog));

    let route = resolver.resolve(&["united-states", "california"]).await.unwrap();
    assert_eq!(
        route.descriptor,
        RouteDescriptor::State {
            country_code: "US".into(),
            state_slug: "california".into(),
        }
    );
}

#[tokio::test]
async fn scope_carries_matched_entities() {
    let resolver = resolver();
    let route = resolver.resolve(&["us", "massage", "california", "la"]).await.unwrap();

    assert_eq!(route.scope.country.as_ref().map(|c| c.code.as_str()), Some("US"));
    assert_eq!(route.scope.category.as_ref().map(|c| c.slug.as_str()), Some("massage"));
    assert_eq!(route.scope.state.as_ref().map(|s| s.slug.as_str()), Some("california"));
    assert_eq!(route.scope.city.as_ref().map(|c| c.slug.as_str()), Some("la"));
}

#[tokio::test]
async fn lookup_failure_is_an_error_not_a_not_found() {
    let lookup = Arc::new(ProbeLookup::new(fixture()));
    let resolver = Resolver::new(lookup.clone());

    lookup.set_failing(true);
    let err = resolver.resolve(&["us"]).await.unwrap_err();
    assert!(matches!(err, GeoPathError::Lookup { collection: "countries", .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn failures_are_not_cached() {
    let lookup = Arc::new(ProbeLookup::new(fixture()));
    let resolver = Resolver::new(lookup.clone());

    // Warm countries and categories, then break the backend for states.
    resolver.resolve(&["us", "massage"]).await.unwrap();
    lookup.set_failing(true);
    assert!(resolver.resolve(&["us", "california"]).await.is_err());
    assert_eq!(resolver.cache().stats().entries, 2);

    lookup.set_failing(false);
    let route = resolver.resolve(&["us", "california"]).await.unwrap();
    assert_eq!(
        route.descriptor,
        RouteDescriptor::State {
            country_code: "US".into(),
            state_slug: "california".into(),
        }
    );
    let state_fetches = lookup
        .calls()
        .iter()
        .filter(|c| c.starts_with("states:"))
        .count();
    assert_eq!(state_fetches, 2);
}

#[tokio::test]
async fn inactive_entities_are_not_routable() {
    let mut catalog = fixture();
    catalog.states[0].is_active = false;
    let resolver = Resolver::new(ProbeLookup::new(catalog));

    let route = resolver.resolve(&["us", "california"]).await.unwrap();
    assert!(route.descriptor.is_not_found());
}
