use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use roster_db::{NewOrganization, StoreError};
use sea_orm::Condition;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::*;
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, err: &StoreError) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: Some(err.code().to_string()),
        }),
    )
}

/// Status for a store failure outside the organization routes.
fn store_error(err: StoreError) -> ApiError {
    let status = match &err {
        StoreError::InvalidIdentifier(_) | StoreError::Validation { .. } => {
            StatusCode::BAD_REQUEST
        }
        StoreError::DuplicateKey { .. } => StatusCode::CONFLICT,
        StoreError::Vanished { .. } | StoreError::Storage(_) => {
            error!("Request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, &err)
}

fn not_found(what: &str, id: &str, code: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{} '{}' not found", what, id),
            code: Some(code.to_string()),
        }),
    )
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create an organization
///
/// Every failure, including a malformed body, is reported as 400.
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 400, description = "Invalid request or duplicate billing id", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn create_organization(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOrganizationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Organization>), ApiError> {
    info!("POST /api/v1/organizations");

    let Json(req) = payload.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: rejection.body_text(),
                code: Some("INVALID_BODY".to_string()),
            }),
        )
    })?;

    let name = req.name.clone();
    let org = state
        .stores
        .organizations
        .create(NewOrganization::new(req.name, req.billing_id))
        .await
        .map_err(|e| {
            error!("Failed to create the organization [{}], error= {}", name, e);
            error_response(StatusCode::BAD_REQUEST, &e)
        })?;

    Ok((StatusCode::CREATED, Json(org.into())))
}

/// List organizations (first page)
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    responses(
        (status = 200, description = "First page of organizations", body = OrganizationList),
        (status = 400, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OrganizationList>, ApiError> {
    info!("GET /api/v1/organizations");

    let page = state
        .stores
        .organizations
        .find(Condition::all())
        .await
        .map_err(|e| {
            error!("Failed to get list of organizations, error= {}", e);
            error_response(StatusCode::BAD_REQUEST, &e)
        })?;

    let page = page.map(Organization::from);
    Ok(Json(OrganizationList {
        organizations: page.items,
        total_count: page.total_count,
    }))
}

/// Users placeholder
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Static placeholder", body = MessageResponse)
    ),
    tag = "users"
)]
pub async fn list_users() -> Json<MessageResponse> {
    info!("GET /api/v1/users");
    Json(MessageResponse {
        message: "It worked".to_string(),
    })
}

/// Get a team with its members expanded
#[utoipa::path(
    get,
    path = "/api/v1/teams/{team_id}",
    params(
        ("team_id" = String, Path, description = "Team id (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Team with members", body = TeamWithUsers),
        (status = 400, description = "Malformed team id", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamWithUsers>, ApiError> {
    debug!("Getting team: {}", team_id);

    match state
        .stores
        .expander
        .team_with_users(&team_id)
        .await
        .map_err(store_error)?
    {
        Some(team) => Ok(Json(team.into())),
        None => Err(not_found("Team", &team_id, "TEAM_NOT_FOUND")),
    }
}

/// Get a user with the teams it belongs to
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/teams",
    params(
        ("user_id" = String, Path, description = "User id (24 hex characters)")
    ),
    responses(
        (status = 200, description = "User with teams", body = UserWithTeams),
        (status = 400, description = "Malformed user id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user_teams(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserWithTeams>, ApiError> {
    debug!("Getting teams for user: {}", user_id);

    match state
        .stores
        .expander
        .user_with_teams(&user_id)
        .await
        .map_err(store_error)?
    {
        Some(user) => Ok(Json(user.into())),
        None => Err(not_found("User", &user_id, "USER_NOT_FOUND")),
    }
}

/// Add a user to a team
#[utoipa::path(
    put,
    path = "/api/v1/teams/{team_id}/users/{user_id}",
    params(
        ("team_id" = String, Path, description = "Team id"),
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 201, description = "User added to team", body = TeamUser),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 409, description = "User already on team", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn add_team_user(
    State(state): State<Arc<AppState>>,
    Path((team_id, user_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<TeamUser>), ApiError> {
    info!("Adding user {} to team {}", user_id, team_id);

    let record = state
        .stores
        .team_users
        .create(&team_id, &user_id)
        .await
        .map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Remove a user from a team
#[utoipa::path(
    delete,
    path = "/api/v1/teams/{team_id}/users/{user_id}",
    params(
        ("team_id" = String, Path, description = "Team id"),
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User removed from team"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "User is not on the team", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn remove_team_user(
    State(state): State<Arc<AppState>>,
    Path((team_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    info!("Removing user {} from team {}", user_id, team_id);

    let removed = state
        .stores
        .team_users
        .delete(&team_id, &user_id)
        .await
        .map_err(store_error)?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(
            "Team membership",
            &format!("{}/{}", team_id, user_id),
            "MEMBERSHIP_NOT_FOUND",
        ))
    }
}
