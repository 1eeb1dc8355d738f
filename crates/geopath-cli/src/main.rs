//! geopath-cli: command-line interface for geopath-core
//!
//! This binary resolves classifieds paths the same way the site does and
//! lets you inspect the data they resolve against.
//!
//! Usage examples
//! --------------
//!
//! - Resolve paths against the built-in demo catalog
//!   $ geopath resolve /us /us/massage/california /fr
//!
//! - Show the page a path renders (route table first)
//!   $ geopath page /edit-ad/42
//!   $ geopath --routes routes.toml page /about
//!
//! - Browse the hierarchy
//!   $ geopath countries
//!   $ geopath states us
//!   $ geopath cities us california
//!
//! - Newest active listings for a resolved scope
//!   $ geopath listings /us/massage --limit 5
//!
//! - Work with catalog files
//!   $ geopath --catalog catalog.json.gz validate
//!   $ geopath --catalog catalog.json.gz snapshot catalog.bin.gz
//!
//! Data source
//! -----------
//!
//! Without `--catalog` the demo catalog bundled with `geopath-core` is
//! used. `--remote` reads the hosted backend configured through
//! `GEOPATH_BACKEND_URL` and `GEOPATH_BACKEND_KEY`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use geopath_core::model::Named;
use geopath_core::navigation::path_of;
use geopath_core::{
    Catalog, Country, ListingFilter, ListingSource, Locale, Lookup, Resolver, RouteDescriptor,
    RouteTable, Router, RouterConfig, State,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let config = match &args.routes {
        Some(path) => RouterConfig::load_from_path(path)?,
        None => RouterConfig::default(),
    };
    let table = config
        .route_table()
        .context("compiling the route table")?;
    let locale = config.default_locale;

    if args.remote {
        return run_remote(args.command, table, locale).await;
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::load_from_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => {
            tracing::info!("no --catalog given, using the demo catalog");
            Catalog::demo()
        }
    };

    // Commands that need the whole catalog rather than a lookup.
    match &args.command {
        Commands::Snapshot { out } => {
            catalog.write_snapshot(out)?;
            println!("Snapshot written to {}", out.display());
            return Ok(());
        }
        Commands::Validate => {
            catalog.validate()?;
            println!("Catalog is consistent:");
            println!("  Countries: {}", catalog.countries.len());
            println!("  States: {}", catalog.states.len());
            println!("  Cities: {}", catalog.cities.len());
            println!("  Categories: {}", catalog.categories.len());
            println!("  Listings: {}", catalog.listings.len());
            return Ok(());
        }
        _ => {}
    }

    run(catalog, table, locale, args.command).await
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "remote")]
async fn run_remote(command: Commands, table: RouteTable, locale: Locale) -> anyhow::Result<()> {
    use geopath_core::remote::RestLookup;
    use geopath_core::BackendConfig;

    if matches!(command, Commands::Snapshot { .. } | Commands::Validate) {
        bail!("`snapshot` and `validate` need a local --catalog");
    }
    let lookup = RestLookup::new(BackendConfig::from_env()?)?;
    run(lookup, table, locale, command).await
}

#[cfg(not(feature = "remote"))]
async fn run_remote(_: Commands, _: RouteTable, _: Locale) -> anyhow::Result<()> {
    bail!("this build of geopath has no `remote` feature")
}

async fn run<S>(source: S, table: RouteTable, locale: Locale, command: Commands) -> anyhow::Result<()>
where
    S: Lookup + ListingSource,
{
    let router = Router::new(table, Resolver::new(source));
    let resolver = router.resolver();

    match command {
        Commands::Resolve { paths } => {
            for path in &paths {
                let descriptor = resolve_descriptor(resolver, path).await?;
                println!("{path}\t{}", serde_json::to_string(&descriptor)?);
            }
        }

        Commands::Page { path } => {
            let page = router
                .route(path_of(&path))
                .await
                .with_context(|| format!("routing {path}"))?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }

        Commands::Countries => {
            for c in resolver.cache().countries(resolver.lookup()).await?.iter() {
                println!("{} {} ({}, /{})", c.flag_emoji, c.display_name(locale), c.code, c.slug);
            }
        }

        Commands::Categories => {
            for c in resolver.cache().categories(resolver.lookup()).await?.iter() {
                println!("{} {} (/{})", c.icon, c.display_name(locale), c.slug);
            }
        }

        Commands::States { country } => {
            let country = find_country(resolver, &country).await?;
            println!("States in {}:", country.display_name(locale));
            for s in resolver.cache().states(resolver.lookup(), &country.id).await?.iter() {
                println!("- {} (/{}/{})", s.display_name(locale), country.slug, s.slug);
            }
        }

        Commands::Cities { country, state } => {
            let country = find_country(resolver, &country).await?;
            let state = find_state(resolver, &country, &state).await?;
            println!("Cities in {}, {}:", state.display_name(locale), country.display_name(locale));
            for c in resolver.cache().cities(resolver.lookup(), &state.id).await?.iter() {
                println!(
                    "- {} (/{}/{}/{})",
                    c.display_name(locale),
                    country.slug,
                    state.slug,
                    c.slug
                );
            }
        }

        Commands::Listings { path, limit } => {
            let route = resolver
                .resolve_path(path_of(&path))
                .await
                .with_context(|| format!("resolving {path}"))?;
            if route.descriptor.is_not_found() {
                bail!("{path} does not resolve to a location or category");
            }
            let filter = ListingFilter::for_scope(&route.scope).with_limit(limit);
            let listings = resolver.lookup().listings(&filter).await?;
            if listings.is_empty() {
                println!("No active listings for {path}");
            }
            for l in &listings {
                let price = l.price.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".into());
                println!("{}  {}  {}  {}", l.created_at, l.id, price, l.title_for(locale));
            }
        }

        Commands::Snapshot { .. } | Commands::Validate => {
            bail!("this command needs a local --catalog")
        }
    }

    Ok(())
}

/// Resolves an href as typed on the command line; query and fragment are ignored.
async fn resolve_descriptor<L: Lookup>(
    resolver: &Resolver<L>,
    href: &str,
) -> anyhow::Result<RouteDescriptor> {
    let route = resolver
        .resolve_path(path_of(href))
        .await
        .with_context(|| format!("resolving {href}"))?;
    Ok(route.descriptor)
}

async fn find_country<L: Lookup>(resolver: &Resolver<L>, token: &str) -> anyhow::Result<Country> {
    resolver
        .cache()
        .countries(resolver.lookup())
        .await?
        .iter()
        .find(|c| c.matches_token(token))
        .cloned()
        .with_context(|| format!("Country {token} not found"))
}

async fn find_state<L: Lookup>(
    resolver: &Resolver<L>,
    country: &Country,
    slug: &str,
) -> anyhow::Result<State> {
    resolver
        .cache()
        .states(resolver.lookup(), &country.id)
        .await?
        .iter()
        .find(|s| s.slug == slug)
        .cloned()
        .with_context(|| format!("State {slug} not found in {}", country.code))
}
