// crates/geopath-core/src/dispatch.rs

//! # Render Dispatch
//!
//! Two sources decide which page a path shows:
//!
//! 1. A declarative [`RouteTable`] of fixed application screens
//!    (`/admin`, `/edit-ad/:id`, ...), compiled once at startup.
//! 2. The hierarchical [`Resolver`] for everything else.
//!
//! [`Router`] tries them in that order and returns a [`PageRequest`]
//! naming the page plus the identifiers it needs.

use crate::error::{GeoPathError, Result};
use crate::lookup::Lookup;
use crate::resolve::{Resolver, RouteDescriptor, RouteScope};
use crate::segment::{segments, PathSegments};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// One entry of the route table, e.g. `{ pattern = "/edit-ad/:id", page = "edit-ad" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub pattern: String,
    pub page: String,
}

impl RouteSpec {
    pub fn new(pattern: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            page: page.into(),
        }
    }

    /// The application's fixed screens.
    pub fn builtin() -> Vec<RouteSpec> {
        vec![
            RouteSpec::new("/auth", "auth"),
            RouteSpec::new("/dashboard", "dashboard"),
            RouteSpec::new("/post-ad", "post-ad"),
            RouteSpec::new("/edit-ad/:id", "edit-ad"),
            RouteSpec::new("/listing/:id", "listing"),
            RouteSpec::new("/admin", "admin-dashboard"),
            RouteSpec::new("/admin/listings", "admin-listings"),
        ]
    }
}

/// Which page to render.
///
/// Serialized as its kebab-case name; table pages use their configured
/// name verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PageKind {
    Home,
    NotFound,
    Country,
    State,
    City,
    CategoryCountry,
    CategoryState,
    CategoryCity,
    /// A page from the route table.
    App(String),
}

impl PageKind {
    pub fn name(&self) -> &str {
        match self {
            PageKind::Home => "home",
            PageKind::NotFound => "not-found",
            PageKind::Country => "country",
            PageKind::State => "state",
            PageKind::City => "city",
            PageKind::CategoryCountry => "category-country",
            PageKind::CategoryState => "category-state",
            PageKind::CategoryCity => "category-city",
            PageKind::App(name) => name,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PageKind> for String {
    fn from(kind: PageKind) -> Self {
        kind.name().to_owned()
    }
}

impl From<String> for PageKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "home" => PageKind::Home,
            "not-found" => PageKind::NotFound,
            "country" => PageKind::Country,
            "state" => PageKind::State,
            "city" => PageKind::City,
            "category-country" => PageKind::CategoryCountry,
            "category-state" => PageKind::CategoryState,
            "category-city" => PageKind::CategoryCity,
            _ => PageKind::App(name),
        }
    }
}

/// A page plus the identifiers it is rendered with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: PageKind,
    pub params: BTreeMap<String, String>,
    /// Entities matched during resolution, absent for table pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<RouteScope>,
}

impl PageRequest {
    pub fn new(page: PageKind) -> Self {
        Self {
            page,
            params: BTreeMap::new(),
            scope: None,
        }
    }

    fn param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Maps a descriptor onto its page and parameters.
pub fn dispatch(descriptor: &RouteDescriptor) -> PageRequest {
    match descriptor {
        RouteDescriptor::Home => PageRequest::new(PageKind::Home),
        RouteDescriptor::NotFound => PageRequest::new(PageKind::NotFound),
        RouteDescriptor::Country { country_code } => {
            PageRequest::new(PageKind::Country).param("countryCode", country_code)
        }
        RouteDescriptor::State {
            country_code,
            state_slug,
        } => PageRequest::new(PageKind::State)
            .param("countryCode", country_code)
            .param("stateSlug", state_slug),
        RouteDescriptor::City {
            country_code,
            state_slug,
            city_slug,
        } => PageRequest::new(PageKind::City)
            .param("countryCode", country_code)
            .param("stateSlug", state_slug)
            .param("citySlug", city_slug),
        RouteDescriptor::CategoryCountry {
            country_code,
            category_slug,
        } => PageRequest::new(PageKind::CategoryCountry)
            .param("countryCode", country_code)
            .param("categorySlug", category_slug),
        RouteDescriptor::CategoryState {
            country_code,
            category_slug,
            state_slug,
        } => PageRequest::new(PageKind::CategoryState)
            .param("countryCode", country_code)
            .param("categorySlug", category_slug)
            .param("stateSlug", state_slug),
        RouteDescriptor::CategoryCity {
            country_code,
            category_slug,
            state_slug,
            city_slug,
        } => PageRequest::new(PageKind::CategoryCity)
            .param("countryCode", country_code)
            .param("categorySlug", category_slug)
            .param("stateSlug", state_slug)
            .param("citySlug", city_slug),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Matcher {
    Literal(String),
    Param(String),
}

#[derive(Clone, Debug)]
struct CompiledRoute {
    page: String,
    matchers: Vec<Matcher>,
}

impl CompiledRoute {
    fn compile(spec: &RouteSpec) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut matchers = Vec::new();
        for token in PathSegments::new(&spec.pattern) {
            let matcher = match token.strip_prefix(':') {
                Some("") => {
                    return Err(GeoPathError::Config(format!(
                        "empty parameter name in route `{}`",
                        spec.pattern
                    )))
                }
                Some(name) => {
                    if !seen.insert(name) {
                        return Err(GeoPathError::Config(format!(
                            "duplicate parameter `{name}` in route `{}`",
                            spec.pattern
                        )));
                    }
                    Matcher::Param(name.to_owned())
                }
                None => Matcher::Literal(token.to_owned()),
            };
            matchers.push(matcher);
        }
        if spec.page.is_empty() {
            return Err(GeoPathError::Config(format!(
                "route `{}` has no page name",
                spec.pattern
            )));
        }
        Ok(Self {
            page: spec.page.clone(),
            matchers,
        })
    }

    fn matches(&self, tokens: &[&str]) -> Option<PageRequest> {
        if tokens.len() != self.matchers.len() {
            return None;
        }
        let mut request = PageRequest::new(PageKind::from(self.page.clone()));
        for (matcher, &token) in self.matchers.iter().zip(tokens) {
            match matcher {
                Matcher::Literal(lit) if lit == token => {}
                Matcher::Literal(_) => return None,
                Matcher::Param(name) => {
                    request.params.insert(name.clone(), token.to_owned());
                }
            }
        }
        Some(request)
    }
}

/// Fixed application screens, matched in declaration order.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compiles `specs` into matchers. Fails on empty or duplicate
    /// parameter names and on entries without a page.
    pub fn compile(specs: &[RouteSpec]) -> Result<Self> {
        let routes = specs
            .iter()
            .map(CompiledRoute::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { routes })
    }

    /// The table compiled from [`RouteSpec::builtin`].
    pub fn builtin() -> Self {
        Self::compile(&RouteSpec::builtin()).expect("builtin route table must compile")
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// First table page whose pattern matches `path`.
    pub fn match_path(&self, path: &str) -> Option<PageRequest> {
        let tokens = segments(path);
        if tokens.is_empty() {
            return None;
        }
        self.routes.iter().find_map(|r| r.matches(&tokens))
    }
}

/// Route table plus resolver: the full path → page pipeline.
#[derive(Debug)]
pub struct Router<L> {
    table: RouteTable,
    resolver: Resolver<L>,
}

impl<L: Lookup> Router<L> {
    pub fn new(table: RouteTable, resolver: Resolver<L>) -> Self {
        Self { table, resolver }
    }

    /// Builtin table in front of a fresh resolver over `lookup`.
    pub fn with_lookup(lookup: L) -> Self {
        Self::new(RouteTable::builtin(), Resolver::new(lookup))
    }

    pub fn resolver(&self) -> &Resolver<L> {
        &self.resolver
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Table pages win over geography; anything else is resolved.
    pub async fn route(&self, path: &str) -> Result<PageRequest> {
        if let Some(page) = self.table.match_path(path) {
            tracing::debug!(path, page = %page.page, "matched route table");
            return Ok(page);
        }
        let resolved = self.resolver.resolve_path(path).await?;
        let mut page = dispatch(&resolved.descriptor);
        if !resolved.descriptor.is_not_found() && resolved.descriptor != RouteDescriptor::Home {
            page.scope = Some(resolved.scope);
        }
        Ok(page)
    }
}
