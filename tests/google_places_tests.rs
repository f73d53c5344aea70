use dinearound::clients::google_places::GooglePlacesClient;
use dinearound::clients::{PlacesError, PlacesProvider};
use dinearound::config::PlacesConfig;
use dinearound::domain::PlaceId;
use dinearound::models::{PlaceQuery, RawPlaceQuery};
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> GooglePlacesClient {
    let config = PlacesConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.url(),
        ..PlacesConfig::default()
    };
    GooglePlacesClient::new(&config).unwrap()
}

fn query(q: &str, lat: Option<&str>, lng: Option<&str>) -> PlaceQuery {
    PlaceQuery::parse(&RawPlaceQuery {
        q: Some(q.to_string()),
        lat: lat.map(str::to_string),
        lng: lng.map(str::to_string),
        radius: None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_unbiased_search_sends_minimal_body_and_keeps_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/places:searchText")
        .match_header("x-goog-api-key", "test-key")
        .match_header("x-goog-fieldmask", Matcher::Regex("places.id".to_string()))
        .match_body(Matcher::Json(json!({
            "textQuery": "sushi",
            "maxResultCount": 20,
            "includedType": "restaurant"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "places": [
                    {
                        "id": "second-best",
                        "displayName": { "text": "Sushi Two" },
                        "priceLevel": "PRICE_LEVEL_MODERATE",
                        "types": ["sushi_restaurant", "restaurant"]
                    },
                    {
                        "id": "first-best",
                        "displayName": { "text": "Sushi One" },
                        "photos": [{ "name": "places/first-best/photos/xyz" }]
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let results = client.search_text(&query("sushi", None, None)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].google_place_id, "second-best");
    assert_eq!(results[0].price_level, Some(2));
    assert_eq!(results[0].cuisine_type.as_deref(), Some("Sushi"));
    assert_eq!(results[1].google_place_id, "first-best");
    assert_eq!(
        results[1].photo_url,
        Some(format!(
            "{}/v1/places/first-best/photos/xyz/media?maxHeightPx=400&maxWidthPx=400&key=test-key",
            server.url()
        ))
    );
}

#[tokio::test]
async fn test_biased_search_sends_circle() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/places:searchText")
        .match_body(Matcher::Json(json!({
            "textQuery": "tacos restaurant",
            "maxResultCount": 20,
            "includedType": "restaurant",
            "locationBias": {
                "circle": {
                    "center": { "latitude": 37.5, "longitude": -122.25 },
                    "radius": 5000
                }
            }
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server);
    let results = client
        .search_text(&query("tacos", Some("37.5"), Some("-122.25")))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/places:searchText")
        .with_status(403)
        .with_body(r#"{"error":{"code":403,"status":"PERMISSION_DENIED"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .search_text(&query("sushi", None, None))
        .await
        .unwrap_err();

    match err {
        PlacesError::Status { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("PERMISSION_DENIED"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_dedicated_client_uses_configured_builder() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/places:searchText")
        .match_header(
            "user-agent",
            concat!("DineAround/", env!("CARGO_PKG_VERSION")),
        )
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let config = PlacesConfig {
        api_key: Some("test-key".to_string()),
        base_url: format!("{}/", server.url()),
        request_timeout_seconds: 5,
        ..PlacesConfig::default()
    };
    let client = GooglePlacesClient::new(&config).expect("client should build");

    let results = client.search_text(&query("ramen", None, None)).await.unwrap();

    assert!(results.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/places:searchText")
        .expect(0)
        .create_async()
        .await;

    let config = PlacesConfig {
        api_key: Some("   ".to_string()),
        base_url: server.url(),
        ..PlacesConfig::default()
    };
    let client = GooglePlacesClient::new(&config).unwrap();

    let err = client
        .search_text(&query("sushi", None, None))
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_place_details() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/places/known-place")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_body(
            json!({
                "id": "known-place",
                "displayName": { "text": "Trattoria" },
                "formattedAddress": "9 Via Roma",
                "location": { "latitude": 41.9, "longitude": 12.5 },
                "rating": 4.6,
                "types": ["italian_restaurant"]
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/v1/places/unknown-place")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/v1/places/broken-place")
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server);

    let found = client
        .place_details(&PlaceId::parse("known-place").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Trattoria");
    assert_eq!(found.cuisine_type.as_deref(), Some("Italian"));
    assert_eq!(found.lat, Some(41.9));

    let missing = client
        .place_details(&PlaceId::parse("unknown-place").unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());

    let err = client
        .place_details(&PlaceId::parse("broken-place").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, PlacesError::Status { status: 500, .. }));
}
