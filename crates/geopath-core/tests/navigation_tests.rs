// crates/geopath-core/tests/navigation_tests.rs
mod common;

use common::{fixture, ProbeLookup};
use geopath_core::{GeoPathError, Navigation, Navigator, PageKind};
use std::sync::Arc;

fn navigator() -> (Arc<ProbeLookup>, Navigator<Arc<ProbeLookup>>) {
    let lookup = Arc::new(ProbeLookup::new(fixture()));
    (lookup.clone(), Navigator::with_lookup(lookup))
}

#[tokio::test]
async fn later_navigation_wins_over_slower_earlier_one() {
    let (lookup, navigator) = navigator();
    lookup.hold_states(true);

    let slow = navigator.navigate("/us/california");
    let fast = async {
        let nav = navigator.navigate("/us").await;
        lookup.release.notify_one();
        nav
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert!(slow.is_superseded());
    let page = fast.page().unwrap();
    assert_eq!(page.page, PageKind::Country);
    assert_eq!(page.get("countryCode"), Some("US"));
    assert_eq!(navigator.generation(), 2);
}

#[tokio::test]
async fn superseded_resolution_still_warms_the_cache() {
    let (lookup, navigator) = navigator();
    lookup.hold_states(true);

    let slow = navigator.navigate("/us/california");
    let fast = async {
        let nav = navigator.navigate("/").await;
        lookup.release.notify_one();
        nav
    };
    let (slow, _) = tokio::join!(slow, fast);
    assert!(slow.is_superseded());

    lookup.hold_states(false);
    let again = navigator.navigate("/us/california").await;
    assert_eq!(again.page().unwrap().page, PageKind::State);

    let state_fetches = lookup
        .calls()
        .iter()
        .filter(|c| c.starts_with("states:"))
        .count();
    assert_eq!(state_fetches, 1);
}

#[tokio::test]
async fn lookup_failure_surfaces_as_failed() {
    let (lookup, navigator) = navigator();
    lookup.set_failing(true);

    match navigator.navigate("/us/massage").await {
        Navigation::Failed(err) => {
            assert!(matches!(err, GeoPathError::Lookup { .. }));
            assert!(err.is_retryable());
        }
        other => panic!("expected failure, got {other:?}"),
    }

    lookup.set_failing(false);
    let retry = navigator.navigate("/us/massage").await;
    assert_eq!(retry.page().unwrap().page, PageKind::CategoryCountry);
}

#[tokio::test]
async fn unknown_path_shows_the_not_found_page() {
    let (_, navigator) = navigator();
    let nav = navigator.navigate("/fr/massage").await;
    let page = nav.page().unwrap();
    assert_eq!(page.page, PageKind::NotFound);
    assert!(page.scope.is_none());
}

#[tokio::test]
async fn table_routes_skip_resolution() {
    let (lookup, navigator) = navigator();

    let nav = navigator.navigate("/edit-ad/7").await;
    let page = nav.page().unwrap();
    assert_eq!(page.page, PageKind::App("edit-ad".into()));
    assert_eq!(page.get("id"), Some("7"));
    assert!(lookup.calls().is_empty());
}

#[tokio::test]
async fn query_and_fragment_do_not_affect_routing() {
    let (_, navigator) = navigator();

    let nav = navigator.navigate("/us/california/la?page=2#top").await;
    let page = nav.page().unwrap();
    assert_eq!(page.page, PageKind::City);
    assert_eq!(page.get("citySlug"), Some("la"));

    let scope = page.scope.as_ref().unwrap();
    assert_eq!(scope.city.as_ref().map(|c| c.slug.as_str()), Some("la"));
}

#[tokio::test]
async fn home_has_no_scope() {
    let (_, navigator) = navigator();
    let nav = navigator.navigate("/").await;
    let page = nav.page().unwrap();
    assert_eq!(page.page, PageKind::Home);
    assert!(page.scope.is_none());
}
