use crate::config::Config;
use crate::models::RawPlaceQuery;
use crate::services::SearchError;
use crate::state::SharedState;

use super::print_restaurant;

pub async fn cmd_search(config: Config, raw: RawPlaceQuery) -> anyhow::Result<()> {
    let query = raw.q.clone().unwrap_or_default();
    println!("Searching for: {query}");

    let state = SharedState::new(config).await?;

    let results = match state.search_service.search_raw(&raw).await {
        Ok(results) => results,
        Err(SearchError::Validation(e)) => {
            for detail in &e.details {
                println!("Invalid {}: {}", detail.field, detail.message);
            }
            return Ok(());
        }
        Err(SearchError::Configuration(msg)) => {
            println!("{msg}. Set GOOGLE_PLACES_API_KEY or places.api_key in config.toml");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if results.is_empty() {
        println!("No restaurants found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for restaurant in &results {
        print_restaurant(restaurant);
        println!();
    }

    println!("{} restaurants", results.len());

    Ok(())
}
