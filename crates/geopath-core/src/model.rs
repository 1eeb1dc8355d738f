// crates/geopath-core/src/model.rs
//! Entities read from the backend.
//!
//! Field names mirror the backend's column names so rows deserialize
//! without renaming. Everything here is read-only from the router's
//! point of view.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

id_type!(
    /// Opaque country id (a UUID on the hosted backend).
    CountryId
);
id_type!(StateId);
id_type!(CityId);
id_type!(CategoryId);
id_type!(ListingId);
id_type!(UserId);

/// UI language. Display names exist in English and Spanish.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Parses a language code (`"es"`, `"ES"`, `"es-MX"`). Unknown codes
    /// fall back to English.
    pub fn from_code(code: &str) -> Self {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("es") {
            Locale::Es
        } else {
            Locale::En
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

/// Entities with bilingual display names.
pub trait Named {
    fn name_en(&self) -> &str;
    fn name_es(&self) -> &str;

    /// Name for `locale`; an empty Spanish name falls back to English.
    fn display_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es if !self.name_es().is_empty() => self.name_es(),
            _ => self.name_en(),
        }
    }
}

/// Entities addressable by a URL slug.
pub trait Slugged {
    fn slug(&self) -> &str;

    /// Exact, case-sensitive comparison against the stored slug.
    #[inline]
    fn has_slug(&self, token: &str) -> bool {
        self.slug() == token
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    /// ISO-like short code, e.g. `"US"`. Matched case-insensitively.
    pub code: String,
    #[serde(default)]
    pub slug: String,
    pub name_en: String,
    #[serde(default)]
    pub name_es: String,
    #[serde(default)]
    pub flag_emoji: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_index: i32,
}

impl Country {
    /// Case-insensitive code match or exact slug match.
    pub fn matches_token(&self, token: &str) -> bool {
        self.code.eq_ignore_ascii_case(token) || self.has_slug(token)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub country_id: CountryId,
    #[serde(default)]
    pub slug: String,
    pub name_en: String,
    #[serde(default)]
    pub name_es: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub state_id: StateId,
    #[serde(default)]
    pub slug: String,
    pub name_en: String,
    #[serde(default)]
    pub name_es: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Globally unique.
    #[serde(default)]
    pub slug: String,
    pub name_en: String,
    #[serde(default)]
    pub name_es: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order_index: i32,
}

macro_rules! impl_named_slugged {
    ($($ty:ty),+) => {
        $(
            impl Named for $ty {
                fn name_en(&self) -> &str {
                    &self.name_en
                }
                fn name_es(&self) -> &str {
                    &self.name_es
                }
            }

            impl Slugged for $ty {
                fn slug(&self) -> &str {
                    &self.slug
                }
            }
        )+
    };
}

impl_named_slugged!(Country, State, City, Category);

/// Moderation state of a listing. Only `Active` listings are public.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    #[default]
    Pending,
    Inactive,
    Expired,
    Rejected,
}

impl ListingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Pending => "pending",
            ListingStatus::Inactive => "inactive",
            ListingStatus::Expired => "expired",
            ListingStatus::Rejected => "rejected",
        }
    }
}

/// A classified ad.
///
/// Older rows carry a single-locale `title`/`description`; newer rows
/// carry per-locale columns. [`Listing::title_for`] hides the difference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub country_id: CountryId,
    #[serde(default)]
    pub state_id: Option<StateId>,
    #[serde(default)]
    pub city_id: Option<CityId>,

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub title_es: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub description_es: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: ListingStatus,

    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub favorites_count: u64,
    #[serde(default)]
    pub shares_count: u64,
    #[serde(default)]
    pub featured: bool,

    /// RFC 3339 timestamps; lexical order equals chronological order.
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,

    #[serde(default)]
    pub service_type: Vec<String>,
    #[serde(default)]
    pub attends_to: Vec<String>,
    #[serde(default)]
    pub schedule: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub payment_methods: Vec<String>,
}

impl Listing {
    pub fn title_for(&self, locale: Locale) -> &str {
        pick_localized(&self.title_en, &self.title_es, &self.title, locale)
    }

    pub fn description_for(&self, locale: Locale) -> &str {
        pick_localized(
            &self.description_en,
            &self.description_es,
            &self.description,
            locale,
        )
    }
}

fn pick_localized<'a>(
    en: &'a Option<String>,
    es: &'a Option<String>,
    single: &'a Option<String>,
    locale: Locale,
) -> &'a str {
    let non_empty = |v: &'a Option<String>| v.as_deref().filter(|s| !s.is_empty());
    let preferred = match locale {
        Locale::Es => non_empty(es),
        Locale::En => non_empty(en),
    };
    preferred
        .or_else(|| non_empty(en))
        .or_else(|| non_empty(single))
        .unwrap_or_default()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(code: &str, slug: &str) -> Country {
        Country {
            id: CountryId::new("c1"),
            code: code.into(),
            slug: slug.into(),
            name_en: "United States".into(),
            name_es: "Estados Unidos".into(),
            flag_emoji: String::new(),
            is_active: true,
            order_index: 0,
        }
    }

    #[test]
    fn country_code_is_case_insensitive_but_slug_is_exact() {
        let c = country("US", "united-states");
        assert!(c.matches_token("us"));
        assert!(c.matches_token("Us"));
        assert!(c.matches_token("united-states"));
        assert!(!c.matches_token("United-States"));
    }

    #[test]
    fn locale_parsing_falls_back_to_english() {
        assert_eq!(Locale::from_code("es"), Locale::Es);
        assert_eq!(Locale::from_code("ES-mx"), Locale::Es);
        assert_eq!(Locale::from_code("fr"), Locale::En);
        assert_eq!(Locale::from_code(""), Locale::En);
    }

    #[test]
    fn spanish_name_falls_back_when_empty() {
        let mut c = country("US", "us");
        assert_eq!(c.display_name(Locale::Es), "Estados Unidos");
        c.name_es.clear();
        assert_eq!(c.display_name(Locale::Es), "United States");
    }

    #[cfg(feature = "json")]
    #[test]
    fn listing_title_prefers_locale_then_english_then_single() {
        let json = r#"{
            "id": "l1", "user_id": "u1", "category_id": "cat", "country_id": "c1",
            "title": "Legacy", "title_es": "Hola",
            "status": "active", "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.status, ListingStatus::Active);
        assert_eq!(listing.title_for(Locale::Es), "Hola");
        assert_eq!(listing.title_for(Locale::En), "Legacy");
        assert_eq!(listing.description_for(Locale::En), "");
    }
}
