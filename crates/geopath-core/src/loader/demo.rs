// crates/geopath-core/src/loader/demo.rs
use super::Catalog;
use crate::model::{
    Category, CategoryId, City, CityId, Country, CountryId, Listing, ListingId, ListingStatus,
    State, StateId, UserId,
};

fn country(id: &str, code: &str, slug: &str, en: &str, es: &str, flag: &str, order: i32) -> Country {
    Country {
        id: CountryId::new(id),
        code: code.into(),
        slug: slug.into(),
        name_en: en.into(),
        name_es: es.into(),
        flag_emoji: flag.into(),
        is_active: true,
        order_index: order,
    }
}

fn state(id: &str, country: &str, slug: &str, en: &str) -> State {
    State {
        id: StateId::new(id),
        country_id: CountryId::new(country),
        slug: slug.into(),
        name_en: en.into(),
        name_es: String::new(),
        is_active: true,
    }
}

fn city(id: &str, state: &str, slug: &str, en: &str) -> City {
    City {
        id: CityId::new(id),
        state_id: StateId::new(state),
        slug: slug.into(),
        name_en: en.into(),
        name_es: String::new(),
        is_active: true,
    }
}

fn category(id: &str, slug: &str, en: &str, es: &str, icon: &str, order: i32) -> Category {
    Category {
        id: CategoryId::new(id),
        slug: slug.into(),
        name_en: en.into(),
        name_es: es.into(),
        icon: icon.into(),
        order_index: order,
    }
}

fn listing(
    id: &str,
    category: &str,
    location: (&str, Option<&str>, Option<&str>),
    title: &str,
    status: ListingStatus,
    created_at: &str,
) -> Listing {
    let (country, state, city) = location;
    Listing {
        id: ListingId::new(id),
        user_id: UserId::new("user-demo"),
        category_id: CategoryId::new(category),
        country_id: CountryId::new(country),
        state_id: state.map(StateId::new),
        city_id: city.map(CityId::new),
        title: None,
        title_en: Some(title.into()),
        title_es: None,
        description: None,
        description_en: None,
        description_es: None,
        price: Some(80.0),
        status,
        views_count: 0,
        favorites_count: 0,
        shares_count: 0,
        featured: false,
        created_at: created_at.into(),
        updated_at: None,
        contact_phone: None,
        contact_email: None,
        whatsapp: None,
        service_type: Vec::new(),
        attends_to: Vec::new(),
        schedule: Vec::new(),
        languages: vec!["en".into()],
        payment_methods: vec!["cash".into()],
    }
}

impl Catalog {
    /// Small built-in dataset for examples, tests and the CLI's
    /// `--demo` mode.
    pub fn demo() -> Self {
        let mut canada = country("country-ca", "CA", "canada", "Canada", "Canadá", "🇨🇦", 3);
        canada.is_active = false;

        let mut nevada = state("state-nv", "country-us", "nevada", "Nevada");
        nevada.is_active = false;

        let mut nuevo_leon = state("state-nl", "country-mx", "", "Nuevo León");
        nuevo_leon.name_es = "Nuevo León".into();

        let us = "country-us";
        Catalog {
            countries: vec![
                country(us, "US", "us", "United States", "Estados Unidos", "🇺🇸", 1),
                country("country-mx", "MX", "mexico", "Mexico", "México", "🇲🇽", 2),
                canada,
            ],
            states: vec![
                state("state-ca", us, "california", "California"),
                state("state-tx", us, "texas", "Texas"),
                state("state-fl", us, "florida", "Florida"),
                nevada,
                state("state-ja", "country-mx", "jalisco", "Jalisco"),
                nuevo_leon,
            ],
            cities: vec![
                city("city-la", "state-ca", "la", "Los Angeles"),
                city("city-sf", "state-ca", "san-francisco", "San Francisco"),
                city("city-hou", "state-tx", "houston", "Houston"),
                city("city-mia", "state-fl", "miami", "Miami"),
                city("city-gdl", "state-ja", "guadalajara", "Guadalajara"),
                city("city-mty", "state-nl", "monterrey", "Monterrey"),
            ],
            categories: vec![
                category("cat-massage", "massage", "Massage", "Masajes", "💆", 1),
                category("cat-spa", "spa", "Spa & Wellness", "Spa y Bienestar", "🧖", 2),
                category("cat-tutoring", "tutoring", "Tutoring", "Clases", "📚", 3),
            ],
            listings: vec![
                listing(
                    "listing-1",
                    "cat-massage",
                    (us, Some("state-ca"), Some("city-la")),
                    "Deep tissue massage in LA",
                    ListingStatus::Active,
                    "2024-05-02T10:00:00Z",
                ),
                listing(
                    "listing-2",
                    "cat-massage",
                    (us, Some("state-ca"), Some("city-sf")),
                    "Sports massage, Mission district",
                    ListingStatus::Active,
                    "2024-05-03T09:30:00Z",
                ),
                listing(
                    "listing-3",
                    "cat-spa",
                    (us, Some("state-tx"), Some("city-hou")),
                    "Day spa package",
                    ListingStatus::Pending,
                    "2024-05-04T12:00:00Z",
                ),
                listing(
                    "listing-4",
                    "cat-tutoring",
                    (us, Some("state-fl"), Some("city-mia")),
                    "Spanish lessons",
                    ListingStatus::Active,
                    "2024-04-28T08:15:00Z",
                ),
                listing(
                    "listing-5",
                    "cat-massage",
                    ("country-mx", Some("state-ja"), Some("city-gdl")),
                    "Masaje relajante",
                    ListingStatus::Active,
                    "2024-05-01T18:45:00Z",
                ),
            ],
        }
        .normalized()
    }
}
