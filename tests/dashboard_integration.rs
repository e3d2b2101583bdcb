//! Dashboard and scheduler endpoints end to end against a mocked provider

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use skysense::api::AppState;
use skysense::{ActivityPlan, Unavailable};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with_paris(failing: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    mount_city(&server, "Paris", "FR", 48.86, 2.35, 18.4).await;
    mount_roster(&server, failing).await;
    server
}

#[tokio::test]
async fn test_dashboard_for_selected_city() {
    let server = server_with_paris(&[]).await;
    let app = test_app(&test_config(&server));

    let (status, body) = get(app, "/api/dashboard?city=Paris").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isLive"], true);

    let view = &body["view"];
    assert_eq!(view["city"], "Paris");
    assert_eq!(view["country"], "FR");
    assert_eq!(view["temp"], 18);
    assert_eq!(view["high"], 22);
    assert_eq!(view["low"], 12);
    assert_eq!(view["windSpeed"], 11);
    assert_eq!(view["chanceOfRain"], 10);
    assert_eq!(view["hourly"].as_array().unwrap().len(), 12);
    assert_eq!(view["daily"].as_array().unwrap().len(), 7);
    assert_eq!(view["otherCities"].as_array().unwrap().len(), 6);
    assert_eq!(view["otherCities"][1]["name"], "Dubai");
    assert_eq!(view["otherCities"][1]["temp"], 30);

    let highlights = &body["highlights"];
    assert_eq!(highlights["temperature"], "18°C");
    assert_eq!(highlights["uvStatus"], "Low");
    assert_eq!(highlights["windStatus"], "Gentle");
}

#[tokio::test]
async fn test_failed_roster_cities_are_dropped() {
    let server = server_with_paris(&["Dubai", "Ibadan"]).await;
    let app = test_app(&test_config(&server));

    let (status, body) = get(app, "/api/dashboard?city=Paris").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["view"]["otherCities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["New York", "Tokyo", "London", "Lagos"]);
}

#[tokio::test]
async fn test_primary_failure_fails_the_dashboard() {
    let server = MockServer::start().await;
    mount_failing_city(&server, "Paris").await;
    mount_roster(&server, &[]).await;
    let app = test_app(&test_config(&server));

    let (status, body) = get(app, "/api/dashboard?city=Paris").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal error"}));
}

#[tokio::test]
async fn test_default_city_without_selection_or_position() {
    let server = server_with_paris(&[]).await;
    let app = test_app(&test_config(&server));

    let (status, body) = get(app, "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["city"], "London");
    assert_eq!(body["view"]["temp"], 7);
}

#[tokio::test]
async fn test_device_position_is_used_without_selection() {
    let server = server_with_paris(&[]).await;
    mount_forecast(&server, 9.08, 7.4, 27.0).await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([geocode_hit(
            "Abuja", "NG", 9.08, 7.4
        )])))
        .mount(&server)
        .await;
    let app = test_app(&test_config(&server));

    let (status, body) = get(app, "/api/dashboard?lat=9.08&lon=7.4").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["city"], "Abuja");
    assert_eq!(body["view"]["temp"], 27);
}

#[tokio::test]
async fn test_fahrenheit_highlights() {
    let server = server_with_paris(&[]).await;
    let config = test_config(&server);

    let (status, body) = get(test_app(&config), "/api/dashboard?city=Paris&unit=F").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["highlights"]["unit"], "F");
    assert_eq!(body["highlights"]["temperature"], "64°F");
    // The view itself stays in Celsius
    assert_eq!(body["view"]["temp"], 18);

    let (status, body) = get(test_app(&config), "/api/dashboard?city=Paris&unit=K").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("K"));
}

#[tokio::test]
async fn test_schedule_for_city() {
    let server = server_with_paris(&[]).await;
    let app = test_app(&test_config(&server));

    let (status, body) = get(app, "/api/schedule?city=Paris").await;

    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<&str> = body["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["Ideal", "Perfect", "Great", "Safe"]);
    assert_eq!(body["hourly"].as_array().unwrap().len(), 8);
    assert_eq!(body["hourly"][0]["isGood"], true);
}

#[tokio::test]
async fn test_dashboard_service_directly() {
    let server = server_with_paris(&["Tokyo"]).await;
    let state = AppState::from_config(&test_config(&server)).unwrap();

    let view = state
        .dashboard
        .build_view(Some("Paris"), &Unavailable)
        .await
        .unwrap();
    assert_eq!(view.other_cities.len(), 5);

    let plan = ActivityPlan::from_view(&view);
    assert_eq!(plan.activities.len(), 4);
    assert!(plan.activities.iter().all(|a| a.favourable || a.name == "Beach Day"));
}
