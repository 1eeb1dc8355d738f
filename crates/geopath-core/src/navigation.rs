// crates/geopath-core/src/navigation.rs

//! # Navigation
//!
//! Link clicks and history moves both end in [`Navigator::navigate`].
//! Every call takes a ticket from a monotonically increasing generation
//! counter; when a resolution finishes after a newer navigation has
//! started, its result is dropped (last navigation wins). Cache writes
//! made by the dropped resolution are kept, since they are write-once.
//!
//! No timeout is applied: a resolution that never completes leaves the
//! page as it was.

use crate::dispatch::{PageRequest, RouteTable, Router};
use crate::error::GeoPathError;
use crate::lookup::Lookup;
use crate::resolve::Resolver;
use std::sync::atomic::{AtomicU64, Ordering};

/// What a front end should do with an activated link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    /// Nothing to follow (`href` empty or `#`).
    Ignore,
    /// Push `href` onto history and route it in-app.
    InApp(String),
    /// Let the browser perform a full navigation to `href`.
    FullNavigation(String),
}

impl LinkAction {
    /// Decides how to follow `href`. Only links marked as in-app
    /// (`in_app`) that point at a same-origin absolute path are routed
    /// in-app; everything else falls back to a full navigation.
    ///
    /// ```
    /// use geopath_core::LinkAction;
    ///
    /// assert_eq!(LinkAction::classify("/us/texas", true), LinkAction::InApp("/us/texas".into()));
    /// assert_eq!(LinkAction::classify("/us/texas", false), LinkAction::FullNavigation("/us/texas".into()));
    /// assert_eq!(LinkAction::classify("#", true), LinkAction::Ignore);
    /// ```
    pub fn classify(href: &str, in_app: bool) -> Self {
        let href = href.trim();
        if href.is_empty() || href == "#" {
            return LinkAction::Ignore;
        }
        let same_origin_path = href.starts_with('/') && !href.starts_with("//");
        if in_app && same_origin_path {
            LinkAction::InApp(href.to_owned())
        } else {
            LinkAction::FullNavigation(href.to_owned())
        }
    }
}

/// Path component of an in-app href (query and fragment removed).
pub fn path_of(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}

/// Outcome of one navigation.
#[derive(Debug)]
pub enum Navigation {
    /// Render this page.
    Show(PageRequest),
    /// Resolution could not complete; show a retryable error banner.
    Failed(GeoPathError),
    /// A newer navigation started before this one finished; do nothing.
    Superseded,
}

impl Navigation {
    pub fn page(&self) -> Option<&PageRequest> {
        match self {
            Navigation::Show(page) => Some(page),
            _ => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Navigation::Superseded)
    }
}

/// Session-wide navigation driver.
#[derive(Debug)]
pub struct Navigator<L> {
    router: Router<L>,
    generation: AtomicU64,
}

impl<L: Lookup> Navigator<L> {
    pub fn new(router: Router<L>) -> Self {
        Self {
            router,
            generation: AtomicU64::new(0),
        }
    }

    /// Builtin route table and a fresh resolver over `lookup`.
    pub fn with_lookup(lookup: L) -> Self {
        Self::new(Router::new(RouteTable::builtin(), Resolver::new(lookup)))
    }

    pub fn router(&self) -> &Router<L> {
        &self.router
    }

    /// Number of navigations started so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Routes `href` (query and fragment ignored) unless a newer
    /// navigation overtakes it.
    pub async fn navigate(&self, href: &str) -> Navigation {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let path = path_of(href);
        tracing::debug!(path, ticket, "navigation started");

        let outcome = self.router.route(path).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(path, ticket, "navigation superseded");
            return Navigation::Superseded;
        }
        match outcome {
            Ok(page) => Navigation::Show(page),
            Err(err) => {
                tracing::warn!(path, error = %err, "navigation failed");
                Navigation::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", true, LinkAction::Ignore)]
    #[case("  #  ", true, LinkAction::Ignore)]
    #[case("/us", true, LinkAction::InApp("/us".into()))]
    #[case("/us?page=2", true, LinkAction::InApp("/us?page=2".into()))]
    #[case("https://example.com/us", true, LinkAction::FullNavigation("https://example.com/us".into()))]
    #[case("//cdn.example.com/x", true, LinkAction::FullNavigation("//cdn.example.com/x".into()))]
    #[case("/us", false, LinkAction::FullNavigation("/us".into()))]
    #[case("#top", true, LinkAction::FullNavigation("#top".into()))]
    fn classifies_links(#[case] href: &str, #[case] in_app: bool, #[case] expected: LinkAction) {
        assert_eq!(LinkAction::classify(href, in_app), expected);
    }

    #[rstest]
    #[case("/us/texas", "/us/texas")]
    #[case("/us/texas?page=2", "/us/texas")]
    #[case("/us#listings", "/us")]
    #[case("?q", "")]
    fn strips_query_and_fragment(#[case] href: &str, #[case] path: &str) {
        assert_eq!(path_of(href), path);
    }
}
