// crates/geopath-core/src/loader/mod.rs

//! # Catalog Loader
//!
//! Handles the Physical Layer (I/O, Decompression) for in-memory
//! datasets and serves them through [`Lookup`] and [`ListingSource`].
//!
//! Supported files, chosen by extension:
//! - `*.json`, `*.json.gz`: backend table dump (`json` / `compact`)
//! - `*.bin`, `*.bin.gz`: bincode snapshot written by
//!   [`Catalog::write_snapshot`]

use crate::error::{GeoPathError, Result};
use crate::listing::{ListingFilter, ListingSource};
use crate::lookup::Lookup;
use crate::model::{Category, City, Country, CountryId, Listing, State, StateId};
use crate::text::slugify;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

mod demo;

/// Every table the router and the listing pages read, held in memory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub cities: Vec<City>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub listings: Vec<Listing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Snapshot,
}

impl Catalog {
    /// **Standard Loader:** picks the decoder from the file extension.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (format, gzip) = detect_format(path)?;
        let reader = open_stream(path, gzip)?;

        let catalog = match format {
            Format::Json => Self::from_json_reader(reader)?,
            Format::Snapshot => bincode::deserialize_from::<_, Catalog>(reader)?,
        };
        tracing::debug!(
            path = %path.display(),
            countries = catalog.countries.len(),
            states = catalog.states.len(),
            cities = catalog.cities.len(),
            "catalog loaded"
        );
        Ok(catalog.normalized())
    }

    /// Parses a JSON table dump and fills missing slugs.
    #[cfg(feature = "json")]
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let catalog: Catalog = serde_json::from_reader(reader)?;
        Ok(catalog.normalized())
    }

    #[cfg(not(feature = "json"))]
    fn from_json_reader(_reader: impl Read) -> Result<Self> {
        Err(GeoPathError::Config(
            "reading JSON catalogs requires the `json` feature".into(),
        ))
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_reader(json.as_bytes())
    }

    /// Writes a bincode snapshot; gzip-compressed when `path` ends in `.gz`.
    pub fn write_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (format, gzip) = detect_format(path)?;
        if format != Format::Snapshot {
            return Err(GeoPathError::Config(format!(
                "snapshot path must end in .bin or .bin.gz: {}",
                path.display()
            )));
        }

        let mut writer = BufWriter::new(File::create(path)?);
        if gzip {
            write_gzip(&mut writer, self)?;
        } else {
            bincode::serialize_into(&mut writer, self)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Derives a slug from the English name for every row stored
    /// without one. Stored slugs are left untouched.
    pub fn normalized(mut self) -> Self {
        fn fill(slug: &mut String, name: &str) {
            if slug.is_empty() {
                *slug = slugify(name);
            }
        }
        for c in &mut self.countries {
            fill(&mut c.slug, &c.name_en);
        }
        for s in &mut self.states {
            fill(&mut s.slug, &s.name_en);
        }
        for c in &mut self.cities {
            fill(&mut c.slug, &c.name_en);
        }
        for c in &mut self.categories {
            fill(&mut c.slug, &c.name_en);
        }
        self
    }

    /// Checks the referential rules the resolver relies on:
    /// states point at an existing active country, cities at an existing
    /// active state, category slugs are unique.
    pub fn validate(&self) -> Result<()> {
        let active_countries: HashSet<&CountryId> = self
            .countries
            .iter()
            .filter(|c| c.is_active)
            .map(|c| &c.id)
            .collect();
        let active_states: HashSet<&StateId> = self
            .states
            .iter()
            .filter(|s| s.is_active)
            .map(|s| &s.id)
            .collect();

        if let Some(s) = self
            .states
            .iter()
            .find(|s| !active_countries.contains(&s.country_id))
        {
            return Err(GeoPathError::InvalidData(format!(
                "state {} references missing or inactive country {}",
                s.id, s.country_id
            )));
        }
        if let Some(c) = self
            .cities
            .iter()
            .find(|c| !active_states.contains(&c.state_id))
        {
            return Err(GeoPathError::InvalidData(format!(
                "city {} references missing or inactive state {}",
                c.id, c.state_id
            )));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.slug.as_str()) {
                return Err(GeoPathError::InvalidData(format!(
                    "duplicate category slug `{}`",
                    category.slug
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Lookup for Catalog {
    async fn countries(&self) -> Result<Vec<Country>> {
        let mut out: Vec<Country> = self
            .countries
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        out.sort_by_key(|c| c.order_index);
        Ok(out)
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let mut out = self.categories.clone();
        out.sort_by_key(|c| c.order_index);
        Ok(out)
    }

    async fn states_for_country(&self, country: &CountryId) -> Result<Vec<State>> {
        let mut out: Vec<State> = self
            .states
            .iter()
            .filter(|s| s.is_active && s.country_id == *country)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name_en.cmp(&b.name_en));
        Ok(out)
    }

    async fn cities_for_state(&self, state: &StateId) -> Result<Vec<City>> {
        let mut out: Vec<City> = self
            .cities
            .iter()
            .filter(|c| c.is_active && c.state_id == *state)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name_en.cmp(&b.name_en));
        Ok(out)
    }
}

#[async_trait]
impl ListingSource for Catalog {
    async fn listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        let mut out: Vec<Listing> = self
            .listings
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.truncate(filter.limit);
        Ok(out)
    }
}

// -----------------------------------------------------------------------
// INTERNAL TRANSPORT HELPERS
// -----------------------------------------------------------------------

fn detect_format(path: &Path) -> Result<(Format, bool)> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let (stem, gzip) = match name.strip_suffix(".gz") {
        Some(stem) => (stem, true),
        None => (name.as_str(), false),
    };

    let format = if stem.ends_with(".json") {
        Format::Json
    } else if stem.ends_with(".bin") {
        Format::Snapshot
    } else {
        return Err(GeoPathError::Config(format!(
            "unrecognized catalog extension: {}",
            path.display()
        )));
    };
    Ok((format, gzip))
}

/// Opens a file, buffers it, and optionally wraps it in a Gzip decoder.
fn open_stream(path: &Path, gzip: bool) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoPathError::NotFound(format!("Catalog not found at {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    if !gzip {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GeoPathError::Config(
            "reading .gz files requires the `compact` feature".into(),
        ))
    }
}

fn write_gzip<W: Write>(writer: W, catalog: &Catalog) -> Result<()> {
    #[cfg(feature = "compact")]
    {
        use flate2::{write::GzEncoder, Compression};
        let mut encoder = GzEncoder::new(writer, Compression::default());
        bincode::serialize_into(&mut encoder, catalog)?;
        encoder.finish()?;
        Ok(())
    }

    #[cfg(not(feature = "compact"))]
    {
        let _ = (writer, catalog);
        Err(GeoPathError::Config(
            "writing .gz files requires the `compact` feature".into(),
        ))
    }
}
