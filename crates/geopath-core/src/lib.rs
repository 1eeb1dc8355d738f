// crates/geopath-core/src/lib.rs

//! # geopath-core
//!
//! Hierarchical route resolution for a classifieds site whose URLs are
//! shaped like `/{country}/{category?}/{state?}/{city?}`.
//!
//! The crate is split along the path a navigation takes:
//!
//! - [`segment`] splits a request path into tokens.
//! - [`resolve`] classifies tokens into a [`RouteDescriptor`], fetching
//!   collections through a [`Lookup`] and memoizing them in a
//!   resolver-owned [`LookupCache`].
//! - [`dispatch`] maps descriptors (and fixed app screens) onto pages.
//! - [`navigation`] drives the above for link clicks and history moves,
//!   discarding results of navigations that were superseded.
//!
//! Data comes either from an in-memory [`Catalog`] or, with the `remote`
//! feature, from the hosted backend via `remote::RestLookup`.
//!
//! ## Example
//!
//! ```
//! use geopath_core::prelude::*;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let resolver = Resolver::new(Catalog::demo());
//!
//! let route = resolver.resolve_path("/us/massage/california").await?;
//! assert_eq!(
//!     route.descriptor,
//!     RouteDescriptor::CategoryState {
//!         country_code: "US".into(),
//!         category_slug: "massage".into(),
//!         state_slug: "california".into(),
//!     }
//! );
//! # Ok::<(), GeoPathError>(())
//! # }).unwrap();
//! ```

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod listing;
pub mod loader;
pub mod lookup;
pub mod model;
pub mod navigation;
#[cfg(feature = "remote")]
pub mod remote;
pub mod resolve;
pub mod segment;
pub mod text;

// Re-exports
pub use crate::cache::{CacheStats, LookupCache};
pub use crate::config::{BackendConfig, RouterConfig};
pub use crate::dispatch::{dispatch, PageKind, PageRequest, RouteSpec, RouteTable, Router};
pub use crate::error::{GeoPathError, Result};
pub use crate::listing::{ListingFilter, ListingSource};
pub use crate::loader::Catalog;
pub use crate::lookup::Lookup;
pub use crate::model::{
    Category, City, CityId, Country, CountryId, Listing, ListingStatus, Locale, State, StateId,
};
pub use crate::navigation::{LinkAction, Navigation, Navigator};
pub use crate::resolve::{ResolvedRoute, Resolver, RouteDescriptor, RouteScope};
pub use crate::segment::{segments, PathSegments};

/// Everything a front end usually needs in one import.
pub mod prelude {
    pub use crate::{
        dispatch, Catalog, Category, City, Country, GeoPathError, LinkAction, ListingFilter,
        ListingSource, Locale, Lookup, Navigation, Navigator, PageKind, PageRequest,
        ResolvedRoute, Resolver, Result, RouteDescriptor, RouteScope, RouteTable, Router,
        State,
    };
}
