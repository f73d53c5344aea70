use crate::config::Config;
use crate::services::SearchError;
use crate::state::SharedState;

use super::print_restaurant;

pub async fn cmd_details(config: Config, place_id: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    match state.search_service.details(place_id).await {
        Ok(Some(restaurant)) => {
            println!("Restaurant Info");
            println!("{:-<60}", "");
            print_restaurant(&restaurant);
            if let Some(url) = &restaurant.photo_url {
                println!("  Photo: {url}");
            }
            Ok(())
        }
        Ok(None) => {
            println!("No place found with ID {place_id}");
            Ok(())
        }
        Err(SearchError::InvalidPlaceId(e)) => {
            println!("Invalid place ID: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
