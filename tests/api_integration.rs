use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Datelike;
use serde_json::{json, Value};
use tower::ServiceExt;

use f1_stats_api::model::{Query, Row};
use f1_stats_api::seed::seed_provider;
use f1_stats_api::{build_app, DataProvider, MemoryProvider, ProviderError};

fn app() -> Router {
    build_app(Arc::new(seed_provider().unwrap()), None)
}

async fn get_raw(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get_raw(app, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn field(rows: &Value, name: &str) -> Vec<Value> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row[name].clone())
        .collect()
}

fn error(message: &str) -> Value {
    json!({ "error": message })
}

/// Counts provider calls and fails every one of them.
#[derive(Default)]
struct BrokenProvider {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl DataProvider for BrokenProvider {
    async fn query(&self, _query: &Query) -> Result<Vec<Row>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::new("connection refused"))
    }
}

/// Answers from `inner` after a fixed delay on every call.
struct SlowProvider {
    inner: MemoryProvider,
    delay: Duration,
}

#[async_trait::async_trait]
impl DataProvider for SlowProvider {
    async fn query(&self, query: &Query) -> Result<Vec<Row>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        self.inner.query(query).await
    }
}

fn result_row(result_id: i64, race_id: i64) -> Value {
    json!({
        "resultId": result_id, "raceId": race_id, "driverId": 1, "constructorId": 1,
        "number": 44, "grid": 1, "position": 1, "positionText": "1", "positionOrder": 1,
        "points": 25.0, "laps": 53, "time": null, "milliseconds": null, "fastestLap": null,
        "rank": null, "fastestLapTime": null, "fastestLapSpeed": null, "statusId": 1
    })
}

/// Lower ids belong to later seasons, so id order and year order disagree.
fn seasons_out_of_id_order() -> Router {
    let provider = MemoryProvider::from_dataset(json!({
        "circuits": [{"circuitId": 1, "circuitRef": "monza", "name": "Monza"}],
        "constructors": [{"constructorId": 1, "constructorRef": "mclaren", "name": "McLaren"}],
        "drivers": [{"driverId": 1, "driverRef": "hamilton", "forename": "Lewis", "surname": "Hamilton"}],
        "races": [
            {"raceId": 10, "year": 2012, "round": 13, "circuitId": 1, "name": "Italian Grand Prix", "date": "2012-09-09"},
            {"raceId": 11, "year": 2010, "round": 14, "circuitId": 1, "name": "Italian Grand Prix", "date": "2010-09-12"}
        ],
        "results": [result_row(1, 10), result_row(2, 11)]
    }))
    .unwrap();
    build_app(Arc::new(provider), None)
}

#[tokio::test]
async fn test_root_and_unknown_route() {
    let app = app();
    let (status, body) = get_raw(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Formula 1 API is running !");

    let (status, body) = get(&app, "/api/teams").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Route not found."));
}

#[tokio::test]
async fn test_circuit_listing_and_lookup() {
    let app = app();

    let (status, body) = get(&app, "/api/circuits").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field(&body, "circuitRef"),
        vec![json!("albert_park"), json!("monza"), json!("bahrain"), json!("silverstone")]
    );

    let (status, lower) = get_raw(&app, "/api/circuits/monza").await;
    assert_eq!(status, StatusCode::OK);
    let (_, upper) = get_raw(&app, "/api/circuits/MONZA").await;
    assert_eq!(lower, upper);
    let circuit: Value = serde_json::from_slice(&lower).unwrap();
    assert_eq!(circuit["circuitId"], json!(14));
    assert_eq!(circuit["country"], json!("Italy"));

    let (status, body) = get(&app, "/api/circuits/monz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Circuit with ref 'monz' not found."));
}

#[tokio::test]
async fn test_circuits_in_season() {
    let app = app();

    let (status, body) = get(&app, "/api/circuits/season/2009").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "round"), vec![json!(1), json!(4), json!(12)]);
    assert_eq!(
        body[0],
        json!({
            "round": 1,
            "year": 2009,
            "circuitId": 1,
            "name": "Albert Park Grand Prix Circuit",
            "location": "Melbourne",
            "country": "Australia"
        })
    );

    let next_season = chrono::Utc::now().year() + 1;
    let (status, body) = get(&app, &format!("/api/circuits/season/{next_season}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = get(&app, &format!("/api/circuits/season/{}", next_season + 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_season_circuit_without_circuit_row_is_null_filled() {
    let provider = MemoryProvider::from_dataset(json!({
        "races": [{"raceId": 1, "year": 2009, "round": 1, "circuitId": 77, "name": "Lost GP", "date": "2009-03-29"}]
    }))
    .unwrap();
    let app = build_app(Arc::new(provider), None);

    let (status, body) = get(&app, "/api/circuits/season/2009").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"round": 1, "year": 2009, "circuitId": 77, "name": null, "location": null, "country": null}])
    );

    // The required join drops the same race from the season listing.
    let (status, body) = get(&app, "/api/races/season/2009").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_invalid_years_are_rejected_everywhere() {
    let app = app();
    for year in ["99", "20999", "1899", "20a4"] {
        for uri in [
            format!("/api/circuits/season/{year}"),
            format!("/api/races/season/{year}"),
            format!("/api/races/season/{year}/1"),
            format!("/api/races/circuits/monza/season/{year}/2012"),
            format!("/api/results/drivers/hamilton/seasons/2010/{year}"),
        ] {
            let (status, body) = get(&app, &uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let message = body["error"].as_str().unwrap();
            assert!(message.ends_with(&format!("Received: {year}")), "{uri}: {message}");
        }
    }
}

#[tokio::test]
async fn test_constructors() {
    let app = app();

    let (status, body) = get(&app, "/api/constructors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field(&body, "name"),
        vec![json!("Brawn"), json!("Ferrari"), json!("McLaren"), json!("Red Bull")]
    );

    let (status, body) = get(&app, "/api/constructors/Red_Bull").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "constructorId": 9,
            "constructorRef": "red_bull",
            "name": "Red Bull",
            "nationality": "Austrian",
            "url": "http://en.wikipedia.org/wiki/Red_Bull_Racing"
        })
    );

    let (status, body) = get(&app, "/api/constructors/lotus").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Constructor with ref 'lotus' not found."));
}

#[tokio::test]
async fn test_drivers_and_search() {
    let app = app();

    let (_, body) = get(&app, "/api/drivers").await;
    assert_eq!(
        field(&body, "surname"),
        vec![json!("Alonso"), json!("Barrichello"), json!("Button"), json!("Hamilton"), json!("Vettel")]
    );

    let (status, body) = get(&app, "/api/drivers/Hamilton").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dob"], json!("1985-01-07"));
    assert_eq!(body["code"], json!("HAM"));

    let (status, body) = get(&app, "/api/drivers/senna").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Driver with ref 'senna' not found."));

    let (status, body) = get(&app, "/api/drivers/search/Ham").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "driverRef"), vec![json!("hamilton")]);

    let (_, body) = get(&app, "/api/drivers/search/b").await;
    assert_eq!(field(&body, "surname"), vec![json!("Barrichello"), json!("Button")]);

    let (status, body) = get(&app, "/api/drivers/search/amilton").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("No drivers found with surname starting with 'amilton'."));
}

#[tokio::test]
async fn test_drivers_in_race() {
    let app = app();

    let (status, body) = get(&app, "/api/drivers/race/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field(&body, "surname"),
        vec![json!("Button"), json!("Barrichello"), json!("Hamilton"), json!("Vettel")]
    );
    assert_eq!(
        body[0],
        json!({"forename": "Jenson", "surname": "Button", "nationality": "British", "position": 1, "points": 10.0})
    );
    assert_eq!(body[3]["position"], Value::Null);

    let (status, body) = get(&app, "/api/drivers/race/841").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get(&app, "/api/drivers/race/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Race with ID '9999' not found."));

    let (status, body) = get(&app, "/api/drivers/race/first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("Invalid race id 'first'. Expected an integer."));
}

#[tokio::test]
async fn test_races() {
    let app = app();

    let (status, body) = get(&app, "/api/races/350").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "raceId": 350,
            "name": "Italian Grand Prix",
            "round": 14,
            "year": 2010,
            "date": "2010-09-12",
            "circuits": {"name": "Autodromo Nazionale di Monza", "location": "Monza", "country": "Italy"}
        })
    );

    let (status, body) = get(&app, "/api/races/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Race with ID '9999' not found."));

    let (status, body) = get(&app, "/api/races/season/2009").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "raceId"), vec![json!(1), json!(4), json!(12)]);

    let (status, body) = get(&app, "/api/races/season/2013").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get(&app, "/api/races/season/2010/14").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["raceId"], json!(350));

    let (status, body) = get(&app, "/api/races/season/2010/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Race for year 2010, round 3 not found."));
}

#[tokio::test]
async fn test_races_at_circuit() {
    let app = app();

    let (status, body) = get(&app, "/api/races/circuits/Monza").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["circuit"],
        json!({"circuitRef": "monza", "name": "Autodromo Nazionale di Monza", "location": "Monza", "country": "Italy"})
    );
    assert_eq!(field(&body["races"], "year"), vec![json!(2009), json!(2010), json!(2012)]);

    let (status, body) = get(&app, "/api/races/circuits/silverstone").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["races"], json!([]));

    let (status, body) = get(&app, "/api/races/circuits/monza/season/2010/2012").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body["races"], "raceId"), vec![json!(350), json!(872)]);

    let (status, body) = get(&app, "/api/races/circuits/imola").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Circuit with ref 'imola' not found."));
}

#[tokio::test]
async fn test_range_ordering_is_checked_before_circuit_exists() {
    let app = app();

    let (status, body) = get(&app, "/api/races/circuits/imola/season/2012/2010").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("The end year cannot be earlier than the start year."));

    let (status, _) = get(&app, "/api/races/circuits/imola/season/2010/2012").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_results_for_race() {
    let app = app();

    let (status, body) = get(&app, "/api/results/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "grid"), vec![json!(1), json!(2), json!(3), json!(18)]);
    for row in body.as_array().unwrap() {
        assert!(row["drivers"].is_object());
        assert!(row["races"].is_object());
        assert!(row["constructors"].is_object());
    }
    assert_eq!(
        body[0],
        json!({
            "position": 1,
            "points": 10.0,
            "grid": 1,
            "laps": 58,
            "time": "1:34:15.784",
            "fastestLap": 17,
            "rank": 3,
            "drivers": {"driverRef": "button", "code": "BUT", "forename": "Jenson", "surname": "Button"},
            "races": {"name": "Australian Grand Prix", "round": 1, "year": 2009, "date": "2009-03-29"},
            "constructors": {"name": "Brawn", "constructorRef": "brawn", "nationality": "British"}
        })
    );

    let (status, body) = get(&app, "/api/results/841").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get(&app, "/api/results/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Race with ID '9999' not found."));
}

#[tokio::test]
async fn test_results_for_driver() {
    let app = app();

    let (status, body) = get(&app, "/api/results/driver/HAMILTON").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field(&body, "resultId"),
        vec![json!(7557), json!(20798), json!(21467)]
    );
    assert!(body[0].get("drivers").is_none());

    let (status, body) = get(&app, "/api/results/driver/senna").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("Driver with ref 'senna' not found."));

    let (status, body) = get(&app, "/api/results/drivers/hamilton/seasons/2010/2012").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "raceId"), vec![json!(350), json!(872)]);

    let (status, body) = get(&app, "/api/results/drivers/hamilton/seasons/2013/2014").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = get(&app, "/api/results/drivers/senna/seasons/2010/2012").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/api/results/drivers/hamilton/seasons/2012/2010").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_qualifying_and_standings() {
    let app = app();

    let (status, body) = get(&app, "/api/qualifying/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "position"), vec![json!(1), json!(2), json!(3), json!(15)]);
    assert_eq!(body[3]["q2"], Value::Null);

    let (status, body) = get(&app, "/api/standings/drivers/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "position"), vec![json!(1), json!(2), json!(3), json!(4)]);
    assert_eq!(
        body[0]["drivers"],
        json!({"code": "BUT", "forename": "Jenson", "surname": "Button", "driverRef": "button"})
    );

    let (status, body) = get(&app, "/api/standings/constructors/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field(&body, "constructorId"),
        vec![json!(23), json!(1), json!(9)]
    );
    assert_eq!(body[0]["constructors"]["constructorRef"], json!("brawn"));

    for uri in ["/api/qualifying/841", "/api/standings/drivers/841", "/api/standings/constructors/841"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }

    for uri in ["/api/qualifying/9999", "/api/standings/drivers/9999", "/api/standings/constructors/9999"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, error("Race with ID '9999' not found."), "{uri}");
    }
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let app = app();
    for uri in ["/api/results/1", "/api/drivers", "/api/races/circuits/monza", "/api/standings/drivers/1"] {
        let first = get_raw(&app, uri).await;
        let second = get_raw(&app, uri).await;
        assert_eq!(first, second, "{uri}");
    }
}

#[tokio::test]
async fn test_provider_failure_surfaces_message() {
    let provider = Arc::new(BrokenProvider::default());
    let app = build_app(provider.clone(), None);

    let (status, body) = get(&app, "/api/circuits").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, error("connection refused"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    // Validation failures never reach the provider.
    let (status, _) = get(&app, "/api/circuits/season/99").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(&app, "/api/races/circuits/monza/season/2012/2010").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_ambiguous_ref_is_internal_error() {
    let provider = MemoryProvider::from_dataset(json!({
        "circuits": [
            {"circuitId": 1, "circuitRef": "monza", "name": "Monza"},
            {"circuitId": 2, "circuitRef": "Monza", "name": "Monza again"}
        ]
    }))
    .unwrap();
    let app = build_app(Arc::new(provider), None);

    let (status, body) = get(&app, "/api/circuits/monza").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, error("Internal server error"));

    let (status, _) = get(&app, "/api/races/circuits/monza").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_driver_results_in_range_follow_race_year() {
    let app = seasons_out_of_id_order();

    let (status, body) = get(&app, "/api/results/drivers/hamilton/seasons/2010/2012").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "raceId"), vec![json!(11), json!(10)]);

    // Without a range the listing stays in result id order.
    let (status, body) = get(&app, "/api/results/driver/hamilton").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "raceId"), vec![json!(10), json!(11)]);
}

#[tokio::test]
async fn test_races_at_circuit_follow_year() {
    let app = seasons_out_of_id_order();

    let (status, body) = get(&app, "/api/races/circuits/monza").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body["races"], "raceId"), vec![json!(11), json!(10)]);
    assert_eq!(field(&body["races"], "year"), vec![json!(2010), json!(2012)]);
}

#[tokio::test]
async fn test_deadline_covers_the_whole_request() {
    let provider = SlowProvider {
        inner: seed_provider().unwrap(),
        delay: Duration::from_millis(200),
    };
    let app = build_app(Arc::new(provider), Some(Duration::from_millis(300)));

    // One provider call fits inside the deadline.
    let (status, _) = get(&app, "/api/circuits").await;
    assert_eq!(status, StatusCode::OK);

    // Circuit lookup plus race listing does not, although each call would.
    let (status, body) = get(&app, "/api/races/circuits/monza").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, error("Request timed out after 300ms"));
}
