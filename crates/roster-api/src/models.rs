use chrono::{DateTime, Utc};
use roster_db::entities::{organization, team, team_user, user};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Plain message response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id (24 hex characters)
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// User email
    pub email: String,
    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            created_at: m.created_at,
        }
    }
}

/// Team information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Team id (24 hex characters)
    pub id: String,
    /// Team name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the team was created
    pub created_at: DateTime<Utc>,
}

impl From<team::Model> for Team {
    fn from(m: team::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

/// Team with the full records of its members
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamWithUsers {
    #[serde(flatten)]
    pub team: Team,
    /// Members, in the order they were added
    pub users: Vec<User>,
}

impl From<roster_db::TeamWithUsers> for TeamWithUsers {
    fn from(t: roster_db::TeamWithUsers) -> Self {
        Self {
            team: t.team.into(),
            users: t.users.into_iter().map(User::from).collect(),
        }
    }
}

/// User with the full records of the teams it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithTeams {
    #[serde(flatten)]
    pub user: User,
    pub teams: Vec<Team>,
}

impl From<roster_db::UserWithTeams> for UserWithTeams {
    fn from(u: roster_db::UserWithTeams) -> Self {
        Self {
            user: u.user.into(),
            teams: u.teams.into_iter().map(Team::from).collect(),
        }
    }
}

/// Team membership record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamUser {
    /// Association id
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    /// When the user was added to the team
    pub created_at: DateTime<Utc>,
}

impl From<team_user::Model> for TeamUser {
    fn from(m: team_user::Model) -> Self {
        Self {
            id: m.id,
            team_id: m.team_id,
            user_id: m.user_id,
            created_at: m.created_at,
        }
    }
}

/// Organization information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization id (24 hex characters)
    pub id: String,
    /// Company name
    pub name: String,
    /// Billing account reference
    pub billing_id: String,
    /// When the organization was created
    pub created_at: DateTime<Utc>,
}

impl From<organization::Model> for Organization {
    fn from(m: organization::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            billing_id: m.billing_id,
            created_at: m.created_at,
        }
    }
}

/// Request to create an organization
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    /// Company name
    pub name: String,
    /// Billing account reference (must be unique)
    pub billing_id: String,
}

/// List of organizations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationList {
    /// First page of organizations
    pub organizations: Vec<Organization>,
    /// Number of organizations, ignoring the page window
    pub total_count: u64,
}
