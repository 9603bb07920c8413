//! Integration tests for the HTTP surface

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use roster_api::{models::*, ApiServer, ApiServerConfig};
use roster_db::seed::{seed, SeedData};
use roster_db::ObjectId;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt; // For `oneshot` method

/// Helper to create an in-memory database with migrations applied
async fn create_test_db() -> DatabaseConnection {
    let db = roster_db::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    roster_db::migrate(&db)
        .await
        .expect("Failed to run migrations");

    db
}

fn create_test_router(db: &DatabaseConnection) -> Router {
    let config = ApiServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        enable_cors: true,
    };

    ApiServer::new(config, db).build_router()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body.to_vec())
}

#[tokio::test]
async fn test_health_check() {
    let db = create_test_db().await;
    let app = create_test_router(&db);

    let (status, body) = send(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_create_and_list_organizations() {
    let db = create_test_db().await;
    let app = create_test_router(&db);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/organizations",
        Some(json!({ "name": "Acme", "billingId": "acme-001" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created: Organization = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.name, "Acme");
    assert_eq!(created.billing_id, "acme-001");
    assert!(ObjectId::parse(&created.id).is_ok());

    let (status, body) = send(&app, "GET", "/api/v1/organizations", None).await;

    assert_eq!(status, StatusCode::OK);
    let list: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(list["totalCount"], 1);
    assert_eq!(list["organizations"][0]["billingId"], "acme-001");
    assert_eq!(list["organizations"][0]["id"], created.id.as_str());
}

#[tokio::test]
async fn test_create_organization_duplicate_billing_id() {
    let db = create_test_db().await;
    let app = create_test_router(&db);

    let body = json!({ "name": "Acme", "billingId": "acme-001" });
    let (status, _) = send(&app, "POST", "/api/v1/organizations", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/v1/organizations", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("DUPLICATE_KEY"));

    let (_, body) = send(&app, "GET", "/api/v1/organizations", None).await;
    let list: OrganizationList = serde_json::from_slice(&body).unwrap();
    assert_eq!(list.total_count, 1);
}

#[tokio::test]
async fn test_create_organization_rejects_bad_body() {
    let db = create_test_db().await;
    let app = create_test_router(&db);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/organizations",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/organizations",
        Some(json!({ "name": "", "billingId": "acme-001" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("INVALID_RECORD"));
}

#[tokio::test]
async fn test_users_placeholder() {
    let db = create_test_db().await;
    let app = create_test_router(&db);

    let (status, body) = send(&app, "GET", "/api/v1/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let message: MessageResponse = serde_json::from_slice(&body).unwrap();
    assert!(!message.message.is_empty());
}

#[tokio::test]
async fn test_get_team_expanded() {
    let db = create_test_db().await;
    let data = SeedData::bills();
    seed(&db, &data).await.unwrap();
    let app = create_test_router(&db);

    let bills = data.team_by_name("Buffalo Bills").unwrap();
    let (status, body) = send(&app, "GET", &format!("/api/v1/teams/{}", bills.id), None).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["id"], bills.id.as_str());
    assert_eq!(json["name"], "Buffalo Bills");
    assert_eq!(json["description"], "AFC East Champions");
    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 4);
    assert_eq!(users[0]["firstName"], "Andre");
    assert_eq!(users[0]["lastName"], "Reed");
}

#[tokio::test]
async fn test_get_team_errors() {
    let db = create_test_db().await;
    let app = create_test_router(&db);

    let (status, body) = send(&app, "GET", "/api/v1/teams/InvalidTeamId", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("INVALID_IDENTIFIER"));

    let missing = ObjectId::new().to_hex();
    let (status, _) = send(&app, "GET", &format!("/api/v1/teams/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_user_teams() {
    let db = create_test_db().await;
    let data = SeedData::bills();
    seed(&db, &data).await.unwrap();
    let app = create_test_router(&db);

    let don = data.user_by_email("don@bills.com").unwrap();
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{}/teams", don.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let expanded: UserWithTeams = serde_json::from_slice(&body).unwrap();
    assert_eq!(expanded.user.email, "don@bills.com");
    assert_eq!(expanded.teams.len(), 2);

    let (status, _) = send(&app, "GET", "/api/v1/users/InvalidUserId/teams", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_and_remove_team_user() {
    let db = create_test_db().await;
    let data = SeedData::bills();
    seed(&db, &data).await.unwrap();
    let app = create_test_router(&db);

    let packers = data.team_by_name("Green Bay Packers").unwrap();
    let andre = data.user_by_email("andre@bills.com").unwrap();
    let uri = format!("/api/v1/teams/{}/users/{}", packers.id, andre.id);

    let (status, body) = send(&app, "PUT", &uri, None).await;
    assert_eq!(status, StatusCode::CREATED);
    let record: TeamUser = serde_json::from_slice(&body).unwrap();
    assert_eq!(record.team_id, packers.id);
    assert_eq!(record.user_id, andre.id);

    let (status, body) = send(&app, "PUT", &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("DUPLICATE_KEY"));

    let (_, body) = send(&app, "GET", &format!("/api/v1/teams/{}", packers.id), None).await;
    let team: TeamWithUsers = serde_json::from_slice(&body).unwrap();
    assert_eq!(team.users.len(), 2);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/teams/{}/users/InvalidUserId", packers.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_json_is_served() {
    let db = create_test_db().await;
    let app = create_test_router(&db);

    let (status, body) = send(&app, "GET", "/api/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(doc["info"]["title"], "Roster API");
}
