mod details;
mod init;
mod search;

pub use details::cmd_details;
pub use init::cmd_init_config;
pub use search::cmd_search;

use crate::domain::PriceLevel;
use crate::models::Restaurant;

fn print_restaurant(restaurant: &Restaurant) {
    let price = restaurant
        .price_level
        .and_then(|p| u8::try_from(p).ok())
        .and_then(PriceLevel::new)
        .map(|p| p.to_string());
    let rating = restaurant
        .rating
        .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));

    println!("• {}", restaurant.name);
    if let Some(address) = &restaurant.address {
        println!("  {address}");
    }
    println!(
        "  Rating: {} | Price: {} | Cuisine: {}",
        rating,
        price.as_deref().unwrap_or("-"),
        restaurant.cuisine_type.as_deref().unwrap_or("-")
    );
    println!("  Place ID: {}", restaurant.google_place_id);
    if !restaurant.is_cached() {
        println!("  (not cached)");
    }
}
