pub mod restaurant_cache;
pub use restaurant_cache::{RestaurantCache, SeaOrmRestaurantCache};

pub mod search;
pub use search::{RestaurantSearchService, SearchError};
