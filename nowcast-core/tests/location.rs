//! Integration tests for location resolution using wiremock.

use nowcast_core::{Config, Context, LocationQuery, WeatherError, resolve};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context_for(server: &MockServer) -> Context {
    let base = server.uri();
    let mut cfg = Config::default();
    cfg.endpoints.geocode = format!("{base}/search?q={{query}}&format=json");
    cfg.endpoints.reverse_geocode =
        format!("{base}/reverse-geocode-client?latitude={{lat}}&longitude={{lon}}");
    cfg.endpoints.ip_geolocation = format!("{base}/geoip/city/me");
    Context::new(cfg).expect("context should build")
}

#[tokio::test]
async fn test_geocode_uses_first_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Den Haag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "place_id": 1,
                "lat": "52.0799838",
                "lon": "4.3113461",
                "display_name": "Den Haag, Zuid-Holland, Nederland",
                "boundingbox": ["52.0", "52.1", "4.2", "4.4"]
            },
            {
                "place_id": 2,
                "lat": "0",
                "lon": "0",
                "display_name": "Somewhere else"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let location = resolve(&ctx, &LocationQuery::Name("Den Haag".into()))
        .await
        .unwrap();

    assert_eq!(location.description, "Den Haag, Zuid-Holland, Nederland");
    assert!((location.latitude - 52.0799838).abs() < 1e-9);
    assert!((location.longitude - 4.3113461).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_without_results_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let result = resolve(&ctx, &LocationQuery::Name("Atlantis".into())).await;

    match result {
        Err(WeatherError::NotFound { query }) => assert_eq!(query, "Atlantis"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_geocode_with_bad_coordinate_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "n/a", "lon": "4.3", "display_name": "Broken"}
        ])))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let result = resolve(&ctx, &LocationQuery::Name("Broken".into())).await;

    assert!(matches!(
        result,
        Err(WeatherError::InvalidCoordinate { field: "lat", .. })
    ));
}

#[tokio::test]
async fn test_geocode_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let err = resolve(&ctx, &LocationQuery::Name("Anywhere".into()))
        .await
        .unwrap_err();

    assert!(err.is_http());
}

#[tokio::test]
async fn test_coordinates_use_reverse_geocoded_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse-geocode-client"))
        .and(query_param("latitude", "52.37"))
        .and(query_param("longitude", "4.90"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "locality": "Amsterdam",
            "city": "Amsterdam",
            "countryCode": "NL"
        })))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let query = LocationQuery::Coordinates {
        latitude: 52.3676,
        longitude: 4.9041,
    };
    let location = resolve(&ctx, &query).await.unwrap();

    assert_eq!(location.description, "Amsterdam");
    assert_eq!(location.latitude, 52.3676);
    assert_eq!(location.longitude, 4.9041);
}

#[tokio::test]
async fn test_coordinates_fall_back_when_reverse_lookup_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let query = LocationQuery::Coordinates {
        latitude: 52.3676,
        longitude: 4.9041,
    };
    let location = resolve(&ctx, &query).await.unwrap();

    assert_eq!(location.description, "Lat 52.37, Lon 4.90");
}

#[tokio::test]
async fn test_ip_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geoip/city/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": {"geoname_id": 2759794, "names": {"en": "Amsterdam"}},
            "country": {"iso_code": "NL", "names": {"en": "Netherlands"}},
            "location": {"accuracy_radius": 5, "latitude": 52.3759, "longitude": 4.8975, "time_zone": "Europe/Amsterdam"}
        })))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let location = resolve(&ctx, &LocationQuery::Auto).await.unwrap();

    assert_eq!(location.description, "Amsterdam, Netherlands (±5m)");
    assert_eq!(location.latitude, 52.3759);
}

#[tokio::test]
async fn test_ip_lookup_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geoip/city/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let result = resolve(&ctx, &LocationQuery::Auto).await;

    assert!(matches!(result, Err(WeatherError::Decode { .. })));
}
