pub mod cache {

    pub const RESTAURANT_TTL_HOURS: i64 = 24;

    /// Ten years.
    pub const MAX_TTL_HOURS: i64 = 24 * 365 * 10;
}

pub mod places {

    pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

    pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

    pub const API_KEY_ENV_PUBLIC: &str = "NEXT_PUBLIC_GOOGLE_PLACES_API_KEY";

    pub const INCLUDED_TYPE: &str = "restaurant";

    pub const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.location,places.rating,places.priceLevel,places.photos,places.types";

    pub const DETAILS_FIELD_MASK: &str =
        "id,displayName,formattedAddress,location,rating,priceLevel,photos,types";

    pub const UNKNOWN_NAME: &str = "Unknown Restaurant";

    pub const DEFAULT_PHOTO_MAX_PX: u32 = 400;
}

pub mod limits {

    pub const MAX_QUERY_CHARS: usize = 200;

    pub const MAX_RESULT_COUNT: u32 = 20;

    pub const DEFAULT_RADIUS_METERS: u32 = 5000;

    pub const MAX_RADIUS_METERS: u32 = 50_000;

    pub const MAX_PLACE_ID_CHARS: usize = 256;
}
