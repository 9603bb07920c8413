pub mod handlers;
pub mod models;

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, put},
    Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use roster_db::Stores;
use sea_orm::DatabaseConnection;

/// Application state shared across handlers
pub struct AppState {
    pub stores: Stores,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "0.1.0",
        description = "REST API for users, teams, team membership and organizations"
    ),
    paths(
        handlers::health_check,
        handlers::create_organization,
        handlers::list_organizations,
        handlers::list_users,
        handlers::get_team,
        handlers::get_user_teams,
        handlers::add_team_user,
        handlers::remove_team_user,
    ),
    components(
        schemas(
            models::HealthResponse,
            models::ErrorResponse,
            models::MessageResponse,
            models::User,
            models::Team,
            models::TeamWithUsers,
            models::UserWithTeams,
            models::TeamUser,
            models::Organization,
            models::CreateOrganizationRequest,
            models::OrganizationList,
        )
    ),
    tags(
        (name = "organizations", description = "Organization endpoints"),
        (name = "teams", description = "Team and membership endpoints"),
        (name = "users", description = "User endpoints"),
        (name = "system", description = "System health and info endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS for browser clients on other origins
    pub enable_cors: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            enable_cors: true,
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server over an already migrated database
    pub fn new(config: ApiServerConfig, db: &DatabaseConnection) -> Self {
        let state = Arc::new(AppState {
            stores: Stores::new(db),
        });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        let api_router = Router::new()
            .route("/api/health", get(handlers::health_check))
            .route(
                "/api/v1/organizations",
                get(handlers::list_organizations).post(handlers::create_organization),
            )
            .route("/api/v1/users", get(handlers::list_users))
            .route("/api/v1/users/{user_id}/teams", get(handlers::get_user_teams))
            .route("/api/v1/teams/{team_id}", get(handlers::get_team))
            .route(
                "/api/v1/teams/{team_id}/users/{user_id}",
                put(handlers::add_team_user).delete(handlers::remove_team_user),
            )
            .with_state(self.state.clone());

        // SwaggerUi serves the document at /api/openapi.json
        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router);

        let mut router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::ORIGIN,
                    HeaderName::from_static("x-requested-with"),
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                ]);
            router = router.layer(cors);
        }

        router
    }

    /// Start the API server, running until `shutdown` resolves
    pub async fn start<F>(self, shutdown: F) -> Result<(), anyhow::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        info!(
            "OpenAPI spec: http://{}/api/openapi.json",
            self.config.bind_addr
        );
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        info!("API server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let api_doc = ApiDoc::openapi();
        let json = serde_json::to_value(&api_doc).unwrap();

        assert!(json["paths"]["/api/v1/teams/{team_id}"].is_object());
        assert!(json["paths"]["/api/v1/organizations"]["post"].is_object());
    }
}
