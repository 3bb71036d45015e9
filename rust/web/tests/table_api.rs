use seatread_web::{AppContext, ErrorResponse, ServerConfig, WebServer, DEFAULT_TABLE_TTL};
use serde_json::{json, Value};
use std::time::Duration;
use warp::http::StatusCode;

fn three_handed() -> Value {
    json!([
        { "name": "Alice", "chips": 150, "position": 1, "isDealer": false,
          "status": "active", "bets": { "preflop": "2" },
          "holeCards": { "card1": "SA", "card2": "HK" } },
        { "name": "Bob", "chips": 200, "position": 2, "isDealer": true,
          "status": "active", "bets": { "preflop": "" } },
        { "name": "Cara", "chips": 180, "position": 3, "isDealer": false,
          "status": "active", "bets": { "preflop": 1 } }
    ])
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("json body")
}

async fn create_table(ctx: &AppContext) -> String {
    let routes = WebServer::routes(ctx);
    let response = warp::test::request()
        .method("POST")
        .path("/api/tables")
        .json(&json!({ "players": three_handed() }))
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response.body())["table_id"]
        .as_str()
        .expect("table id")
        .to_string()
}

#[tokio::test]
async fn health_reports_table_count() {
    let ctx = AppContext::new_for_tests();
    create_table(&ctx).await;

    let routes = WebServer::routes(&ctx);
    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.body());
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tables"], 1);
}

#[tokio::test]
async fn create_returns_summary() {
    let ctx = AppContext::new_for_tests();
    let routes = WebServer::routes(&ctx);

    let response = warp::test::request()
        .method("POST")
        .path("/api/tables")
        .json(&json!({ "players": three_handed() }))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response.body());
    assert_eq!(body["summary"]["total_players"], 3);
    assert_eq!(body["summary"]["total_chips"], 530);
    assert_eq!(body["summary"]["dealer_seat"], 2);
}

#[tokio::test]
async fn advice_lifecycle_over_http() {
    let ctx = AppContext::new_for_tests();
    let id = create_table(&ctx).await;
    let routes = WebServer::routes(&ctx);
    let advice_path = format!("/api/tables/{id}/advice");
    let request = json!({
        "players": three_handed(),
        "cards": { "flop": ["", "", ""], "turn": "", "river": "" }
    });

    let first = warp::test::request()
        .method("POST")
        .path(&advice_path)
        .json(&request)
        .reply(&routes)
        .await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first.body());
    assert_eq!(first["stage"], "preflop");
    assert_eq!(first["first_prompt"], true);
    assert!(first["advice"].is_null());
    let prompt = first["prompt"].as_str().expect("prompt");
    assert!(prompt.contains("Hole cards: SA HK"));
    assert!(prompt.contains("Please give a detailed strategy recommendation"));

    let second = warp::test::request()
        .method("POST")
        .path(&advice_path)
        .json(&request)
        .reply(&routes)
        .await;
    let second = body_json(second.body());
    assert_eq!(second["first_prompt"], false);
    assert!(!second["prompt"]
        .as_str()
        .expect("prompt")
        .contains("Hole cards"));

    let reset = warp::test::request()
        .method("POST")
        .path(&format!("/api/tables/{id}/reset"))
        .reply(&routes)
        .await;
    assert_eq!(reset.status(), StatusCode::OK);
    assert_eq!(body_json(reset.body())["active"], false);

    let status = warp::test::request()
        .method("GET")
        .path(&format!("/api/tables/{id}"))
        .reply(&routes)
        .await;
    let status = body_json(status.body());
    assert_eq!(status["active"], false);
    assert!(status["phase"].is_null());
}

#[tokio::test]
async fn status_tracks_stage_and_pot() {
    let ctx = AppContext::new_for_tests();
    let id = create_table(&ctx).await;
    let routes = WebServer::routes(&ctx);

    warp::test::request()
        .method("POST")
        .path(&format!("/api/tables/{id}/advice"))
        .json(&json!({
            "players": three_handed(),
            "cards": { "flop": ["HA", "D7", "C2"], "turn": "", "river": "" }
        }))
        .reply(&routes)
        .await;

    let response = warp::test::request()
        .method("GET")
        .path(&format!("/api/tables/{id}"))
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.body());
    assert_eq!(body["active"], true);
    assert_eq!(body["stage"], "flop");
    assert_eq!(body["phase"], "prompts_issued");
    assert_eq!(body["pot"], 3);
    assert_eq!(body["players"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn setup_starts_a_fresh_hand() {
    let ctx = AppContext::new_for_tests();
    let id = create_table(&ctx).await;
    let routes = WebServer::routes(&ctx);
    let advice = json!({ "players": three_handed() });

    warp::test::request()
        .method("POST")
        .path(&format!("/api/tables/{id}/advice"))
        .json(&advice)
        .reply(&routes)
        .await;

    let setup = warp::test::request()
        .method("POST")
        .path(&format!("/api/tables/{id}/setup"))
        .json(&json!({ "players": three_handed() }))
        .reply(&routes)
        .await;
    assert_eq!(setup.status(), StatusCode::OK);

    let again = warp::test::request()
        .method("POST")
        .path(&format!("/api/tables/{id}/advice"))
        .json(&advice)
        .reply(&routes)
        .await;
    assert_eq!(body_json(again.body())["first_prompt"], true);
}

#[tokio::test]
async fn invalid_setup_is_rejected_with_validation_error() {
    let ctx = AppContext::new_for_tests();
    let routes = WebServer::routes(&ctx);

    let response = warp::test::request()
        .method("POST")
        .path("/api/tables")
        .json(&json!({ "players": [
            { "name": "Ann", "chips": 100, "position": 1, "isDealer": true },
            { "name": "Ben", "chips": 100, "position": 2, "isDealer": true }
        ]}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(response.body()).expect("error body");
    assert_eq!(error.error, "validation_failed");
    assert!(error.message.contains("Exactly one dealer"));
    assert!(ctx.tables().active_tables().is_empty());
}

#[tokio::test]
async fn unknown_table_is_not_found() {
    let ctx = AppContext::new_for_tests();
    let routes = WebServer::routes(&ctx);

    let response = warp::test::request()
        .method("POST")
        .path("/api/tables/no-such-table/advice")
        .json(&json!({ "players": three_handed() }))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_slice(response.body()).expect("error body");
    assert_eq!(error.error, "table_not_found");
    assert_eq!(
        error.details.expect("details")["table_id"],
        "no-such-table"
    );
}

#[tokio::test]
async fn advice_without_dealer_is_unprocessable() {
    let ctx = AppContext::new_for_tests();
    let id = create_table(&ctx).await;
    let routes = WebServer::routes(&ctx);

    let response = warp::test::request()
        .method("POST")
        .path(&format!("/api/tables/{id}/advice"))
        .json(&json!({ "players": [
            { "name": "Ann", "chips": 100, "position": 1,
              "holeCards": { "card1": "SA", "card2": "HK" } },
            { "name": "Ben", "chips": 100, "position": 2 }
        ]}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(response.body()).expect("error body");
    assert_eq!(error.error, "position_unresolved");
}

#[tokio::test]
async fn missing_hole_cards_fail_the_first_render() {
    let ctx = AppContext::new_for_tests();
    let id = create_table(&ctx).await;
    let routes = WebServer::routes(&ctx);

    let response = warp::test::request()
        .method("POST")
        .path(&format!("/api/tables/{id}/advice"))
        .json(&json!({ "players": [
            { "name": "Ann", "chips": 100, "position": 1 },
            { "name": "Ben", "chips": 100, "position": 2, "isDealer": true }
        ]}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(response.body()).expect("error body");
    assert_eq!(error.error, "render_failed");
}

#[tokio::test]
async fn delete_removes_the_table() {
    let ctx = AppContext::new_for_tests();
    let id = create_table(&ctx).await;
    let routes = WebServer::routes(&ctx);

    let deleted = warp::test::request()
        .method("DELETE")
        .path(&format!("/api/tables/{id}"))
        .reply(&routes)
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = warp::test::request()
        .method("DELETE")
        .path(&format!("/api/tables/{id}"))
        .reply(&routes)
        .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let ctx = AppContext::new_for_tests();
    let routes = WebServer::routes(&ctx);

    let response = warp::test::request()
        .method("POST")
        .path("/api/tables")
        .header("content-type", "application/json")
        .body("{\"players\": [{\"name\": \"Ann\", \"chips\": \"lots\"}]}")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(response.body()).expect("error body");
    assert_eq!(error.error, "invalid_body");
}

#[test]
fn table_ttl_reaches_the_registry() {
    let ctx = AppContext::new(ServerConfig::for_tests()).expect("context");
    assert_eq!(ctx.tables().table_ttl(), DEFAULT_TABLE_TTL);

    let config = ServerConfig::for_tests().with_table_ttl(Duration::from_secs(90));
    let ctx = AppContext::new(config).expect("context");
    assert_eq!(ctx.tables().table_ttl(), Duration::from_secs(90));
}
